//! Recommendations Insight
//!
//! Points at changes that would lift the score:
//! - The single worst transaction
//! - Categories whose weighted impact is negative overall
//! - A general boost when the score is below neutral
//!
//! Potential gain is measured in score points: dropping a negative
//! transaction recovers |weighted impact| × scale.

use crate::error::Result;
use crate::models::Category;
use crate::scoring::{
    category_summary, weighted_impact_tenths, NEUTRAL_SCORE, SCALE_FACTOR_TENTHS,
};

use super::engine::{AnalysisContext, Insight};
use super::types::{Findings, InsightType, Recommendation, WORST_KEY_PREFIX};

/// Score points recovered by removing `weighted_tenths` of weighted impact
fn gain_points(weighted_tenths: i64) -> f64 {
    (weighted_tenths.abs() * SCALE_FACTOR_TENTHS) as f64 / 100.0
}

/// Icon, title and action for a category recommendation
fn category_advice(category: Category) -> (&'static str, &'static str, &'static str) {
    match category {
        Category::Transport => (
            "🚇",
            "Switch to Green Transport",
            "Consider public transit, cycling, or electric vehicles for daily commute",
        ),
        Category::Shopping => (
            "🛒",
            "Shop Sustainably",
            "Choose second-hand, local, and eco-certified products",
        ),
        Category::Food => (
            "🥗",
            "Eat Greener",
            "Choose plant-based, organic, and package-free options",
        ),
        Category::Utilities => (
            "⚡",
            "Green Your Energy",
            "Move to a renewable energy plan and cut standby consumption",
        ),
        Category::Entertainment => (
            "🎬",
            "Rethink Entertainment",
            "Favour digital and local experiences over high-footprint ones",
        ),
        Category::Donations => (
            "💚",
            "Review Your Giving",
            "Direct donations toward verified environmental causes",
        ),
        Category::Other => (
            "🔍",
            "Review Other Spending",
            "Look for lower-impact alternatives to unclassified purchases",
        ),
    }
}

/// Insight that proposes improvements
pub struct RecommendationsInsight;

impl RecommendationsInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RecommendationsInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl Insight for RecommendationsInsight {
    fn id(&self) -> InsightType {
        InsightType::Recommendations
    }

    fn name(&self) -> &'static str {
        "Recommendations"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Findings> {
        let mut recommendations = Vec::new();

        // 1. Worst single transaction
        if let Some(worst) = ctx.worst_transaction().filter(|t| t.is_negative()) {
            recommendations.push(Recommendation::new(
                format!("{}{}", WORST_KEY_PREFIX, worst.id),
                "📉",
                "Reduce Negative Impacts",
                format!("Review spending like '{}'", worst.description),
                gain_points(weighted_impact_tenths(worst)),
            ));
        }

        // 2. Categories that drag the score down overall
        for (category, stats) in category_summary(ctx.transactions) {
            let weighted_tenths = (stats.weighted_impact * 10.0).round() as i64;
            if weighted_tenths >= 0 {
                continue;
            }
            let (icon, title, action) = category_advice(category);
            recommendations.push(Recommendation::new(
                format!("recommendation:category:{}", category),
                icon,
                title,
                action,
                gain_points(weighted_tenths),
            ));
        }

        // 3. Below-neutral score
        let score = ctx.score.green_score;
        if score < NEUTRAL_SCORE {
            recommendations.push(Recommendation::new(
                "recommendation:boost",
                "🚨",
                "Boost Your GreenScore",
                "Replace high-emission activities with sustainable alternatives",
                f64::from(NEUTRAL_SCORE - score),
            ));
        }

        // 4. Positive reinforcement
        if ctx.transactions.iter().any(|t| t.is_positive()) {
            recommendations.push(
                Recommendation::new(
                    "recommendation:keep_up",
                    "✨",
                    "Keep Up the Good Work",
                    "Continue your sustainable choices in transport and shopping",
                    0.0,
                )
                .with_potential_impact("Maintain your score"),
            );
        }

        Ok(Findings {
            highlights: vec![],
            recommendations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::types::Priority;
    use crate::models::Transaction;
    use crate::scoring::score;
    use chrono::NaiveDate;

    fn txn(id: &str, description: &str, category: Category, eco_impact: i32) -> Transaction {
        Transaction {
            id: id.to_string(),
            description: description.to_string(),
            amount: 100.0,
            category,
            date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            eco_impact,
            reasoning: String::new(),
            merchant: None,
        }
    }

    fn analyze(txns: &[Transaction]) -> Vec<Recommendation> {
        let scored = score(txns).unwrap();
        RecommendationsInsight::new()
            .analyze(&AnalysisContext::new(&scored, txns))
            .unwrap()
            .recommendations
    }

    #[test]
    fn test_worst_transaction_recommendation() {
        let recs = analyze(&[
            txn("a", "Metro Rail Pass", Category::Transport, 5),
            txn("b", "Flight Ticket", Category::Transport, -5),
            txn("c", "Fast Fashion", Category::Shopping, -4),
        ]);
        let worst = recs.iter().find(|r| r.key.starts_with("recommendation:worst")).unwrap();
        assert_eq!(worst.key, "recommendation:worst:b");
        assert_eq!(worst.action, "Review spending like 'Flight Ticket'");
        assert_eq!(worst.potential_gain, 7.5);
        assert_eq!(worst.priority, Priority::Medium);
    }

    #[test]
    fn test_negative_category_recommendations() {
        let recs = analyze(&[
            txn("a", "Flight", Category::Transport, -5),
            txn("b", "Petrol", Category::Transport, -4),
            txn("c", "Metro", Category::Transport, 1),
            txn("d", "Fast Fashion", Category::Shopping, -4),
            txn("e", "Thrift", Category::Shopping, 4),
        ]);

        // Transport: (-5 - 4 + 1) * 1.5 = -12 → 12 points
        let transport = recs
            .iter()
            .find(|r| r.key == "recommendation:category:Transport")
            .unwrap();
        assert_eq!(transport.title, "Switch to Green Transport");
        assert_eq!(transport.potential_gain, 12.0);
        assert_eq!(transport.priority, Priority::High);

        // Shopping nets to zero
        assert!(!recs.iter().any(|r| r.key == "recommendation:category:Shopping"));
    }

    #[test]
    fn test_boost_below_neutral() {
        // -5 * 1.5 * 2 = -15 → 35
        let recs = analyze(&[
            txn("a", "Flight", Category::Transport, -5),
            txn("b", "Flight", Category::Transport, -5),
        ]);
        let boost = recs.iter().find(|r| r.key == "recommendation:boost").unwrap();
        assert_eq!(boost.potential_gain, 15.0);
        assert_eq!(boost.priority, Priority::High);
        assert!(!recs.iter().any(|r| r.key == "recommendation:keep_up"));
    }

    #[test]
    fn test_keep_up_is_low_priority() {
        let recs = analyze(&[txn("a", "Metro", Category::Transport, 5)]);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].key, "recommendation:keep_up");
        assert_eq!(recs[0].priority, Priority::Low);
        assert_eq!(recs[0].potential_impact, "Maintain your score");
    }
}
