//! Highlights Insight
//!
//! Celebrates what went well:
//! - The single best eco-friendly transaction
//! - Five or more eco-friendly transactions
//! - Any donation

use crate::error::Result;
use crate::models::Category;

use super::engine::{AnalysisContext, Insight};
use super::types::{Findings, Highlight, HighlightKind, InsightType};

/// Positive transactions needed for the champion highlight
pub const CHAMPION_MIN_POSITIVE: usize = 5;

/// Insight that surfaces achievements
pub struct HighlightsInsight;

impl HighlightsInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HighlightsInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl Insight for HighlightsInsight {
    fn id(&self) -> InsightType {
        InsightType::Highlights
    }

    fn name(&self) -> &'static str {
        "Highlights"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Findings> {
        let mut highlights = Vec::new();

        if let Some(best) = ctx.best_transaction().filter(|t| t.is_positive()) {
            highlights.push(Highlight {
                key: format!("highlight:best:{}", best.id),
                kind: HighlightKind::Positive,
                icon: "🌟".to_string(),
                title: "Top Sustainable Choice".to_string(),
                description: format!("{} - Excellent eco-friendly decision!", best.description),
                impact: Some(format!("+{}", best.eco_impact)),
            });
        }

        let positive = ctx.transactions.iter().filter(|t| t.is_positive()).count();
        if positive >= CHAMPION_MIN_POSITIVE {
            highlights.push(Highlight {
                key: "highlight:champion".to_string(),
                kind: HighlightKind::Achievement,
                icon: "🏆".to_string(),
                title: "Sustainability Champion".to_string(),
                description: format!("You made {} eco-friendly transactions!", positive),
                impact: None,
            });
        }

        if ctx
            .transactions
            .iter()
            .any(|t| t.category == Category::Donations)
        {
            highlights.push(Highlight {
                key: "highlight:contributor".to_string(),
                kind: HighlightKind::Social,
                icon: "💚".to_string(),
                title: "Green Contributor".to_string(),
                description: "Your donations support environmental causes!".to_string(),
                impact: None,
            });
        }

        Ok(Findings {
            highlights,
            recommendations: vec![],
        })
    }
}
