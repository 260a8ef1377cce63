//! Insight Engine - orchestrates analyzers and assembles the result

use std::cmp::Ordering;

use crate::models::{Category, Transaction};
use crate::scoring::{weighted_impact_tenths, EsgAxis, ScoreResult, ESG_AXES};
use crate::Result;

use super::types::{
    EsgInsight, EsgInsights, EsgStatus, Findings, ImpactDistribution, InsightType,
    InsightsResult, MAX_HIGHLIGHTS, WORST_KEY_PREFIX,
};
use super::{HighlightsInsight, RecommendationsInsight};

/// Summary used when there is nothing to analyze
pub const EMPTY_SUMMARY: &str = "No transaction data available for analysis.";

/// Context provided to insight analyzers
pub struct AnalysisContext<'a> {
    /// Score computed from `transactions`
    pub score: &'a ScoreResult,
    pub transactions: &'a [Transaction],
}

impl<'a> AnalysisContext<'a> {
    pub fn new(score: &'a ScoreResult, transactions: &'a [Transaction]) -> Self {
        Self {
            score,
            transactions,
        }
    }

    /// Highest eco_impact, then largest weighted impact, then smallest id
    pub fn best_transaction(&self) -> Option<&'a Transaction> {
        self.transactions.iter().max_by(|a, b| {
            a.eco_impact
                .cmp(&b.eco_impact)
                .then_with(|| abs_weighted(a).cmp(&abs_weighted(b)))
                .then_with(|| b.id.cmp(&a.id))
        })
    }

    /// Lowest eco_impact, then largest weighted impact, then smallest id
    pub fn worst_transaction(&self) -> Option<&'a Transaction> {
        self.transactions.iter().min_by(|a, b| {
            a.eco_impact
                .cmp(&b.eco_impact)
                .then_with(|| abs_weighted(b).cmp(&abs_weighted(a)))
                .then_with(|| a.id.cmp(&b.id))
        })
    }

    pub fn distribution(&self) -> ImpactDistribution {
        let mut dist = ImpactDistribution::default();
        for txn in self.transactions {
            let impact = i64::from(txn.eco_impact);
            match impact.cmp(&0) {
                Ordering::Greater => {
                    dist.positive_count += 1;
                    dist.total_positive_impact += impact;
                }
                Ordering::Less => {
                    dist.negative_count += 1;
                    dist.total_negative_impact += impact;
                }
                Ordering::Equal => dist.neutral_count += 1,
            }
        }
        dist
    }
}

fn abs_weighted(txn: &Transaction) -> i64 {
    weighted_impact_tenths(txn).abs()
}

/// Trait for insight analyzers
pub trait Insight: Send + Sync {
    /// Unique identifier for this insight type
    fn id(&self) -> InsightType;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Analyze data and produce findings
    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Findings>;
}

/// The main insight engine that orchestrates analysis
pub struct InsightEngine {
    insights: Vec<Box<dyn Insight>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create a new insight engine with built-in insight types
    pub fn new() -> Self {
        let mut engine = Self { insights: vec![] };

        engine.register(Box::new(HighlightsInsight::new()));
        engine.register(Box::new(RecommendationsInsight::new()));

        engine
    }

    /// Create an engine with no analyzers registered
    pub fn empty() -> Self {
        Self { insights: vec![] }
    }

    /// Register an insight analyzer
    pub fn register(&mut self, insight: Box<dyn Insight>) {
        self.insights.push(insight);
    }

    /// Run all insight analyzers and collect findings
    ///
    /// A failing analyzer is logged and skipped. Recommendations come back
    /// led by the worst-transaction recommendation, the rest sorted by
    /// priority (highest first), then potential gain, then key.
    pub fn analyze_all(&self, ctx: &AnalysisContext<'_>) -> Findings {
        let mut all = Findings::default();

        for insight in &self.insights {
            match insight.analyze(ctx) {
                Ok(findings) => {
                    tracing::debug!(
                        insight = insight.name(),
                        highlights = findings.highlights.len(),
                        recommendations = findings.recommendations.len(),
                        "Insight analysis complete"
                    );
                    all.highlights.extend(findings.highlights);
                    all.recommendations.extend(findings.recommendations);
                }
                Err(e) => {
                    tracing::warn!(
                        insight = insight.name(),
                        error = %e,
                        "Insight analysis failed"
                    );
                }
            }
        }

        all.highlights.truncate(MAX_HIGHLIGHTS);
        all.recommendations.sort_by(|a, b| {
            b.priority
                .rank()
                .cmp(&a.priority.rank())
                .then_with(|| b.potential_gain.total_cmp(&a.potential_gain))
                .then_with(|| a.key.cmp(&b.key))
        });
        if let Some(pos) = all
            .recommendations
            .iter()
            .position(|r| r.key.starts_with(WORST_KEY_PREFIX))
        {
            let worst = all.recommendations.remove(pos);
            all.recommendations.insert(0, worst);
        }

        all
    }

    /// Build the full insights result for a scored transaction set
    pub fn generate(&self, score: &ScoreResult, transactions: &[Transaction]) -> InsightsResult {
        if transactions.is_empty() {
            return InsightsResult {
                summary: EMPTY_SUMMARY.to_string(),
                highlights: vec![],
                recommendations: vec![],
                esg_insights: None,
                impact_distribution: ImpactDistribution::default(),
            };
        }

        let ctx = AnalysisContext::new(score, transactions);
        let findings = self.analyze_all(&ctx);
        let distribution = ctx.distribution();

        InsightsResult {
            summary: summarize(score.green_score, &distribution),
            highlights: findings.highlights,
            recommendations: findings.recommendations,
            esg_insights: Some(esg_insights(&ctx)),
            impact_distribution: distribution,
        }
    }

    /// Get list of registered insight types
    pub fn insight_types(&self) -> Vec<InsightType> {
        self.insights.iter().map(|i| i.id()).collect()
    }
}

/// Summary sentence by score band
pub fn summarize(green_score: u8, dist: &ImpactDistribution) -> String {
    if green_score >= 75 {
        format!(
            "Excellent sustainability profile! You made {} eco-friendly choices this period.",
            dist.positive_count
        )
    } else if green_score >= 50 {
        format!(
            "Good progress with {} sustainable transactions. Reducing {} high-impact activities could boost your score.",
            dist.positive_count, dist.negative_count
        )
    } else {
        format!(
            "Room for improvement. Focus on shifting from {} high-impact activities to greener alternatives.",
            dist.negative_count
        )
    }
}

fn esg_insights(ctx: &AnalysisContext<'_>) -> EsgInsights {
    let members = |axis: EsgAxis| {
        ESG_AXES
            .iter()
            .filter(|spec| spec.axis == axis)
            .flat_map(|spec| ctx.transactions.iter().filter(move |t| spec.includes(t)))
            .collect::<Vec<&Transaction>>()
    };

    let env = members(EsgAxis::Environmental);
    let env_positive = env.iter().filter(|t| t.is_positive()).count();
    let environmental = EsgInsight {
        axis: EsgAxis::Environmental,
        score: ctx.score.esg.environmental,
        status: if env_positive * 2 > env.len() {
            EsgStatus::Strong
        } else {
            EsgStatus::NeedsImprovement
        },
        insight: format!(
            "{} of {} transactions are eco-friendly",
            env_positive,
            env.len()
        ),
    };

    let gives = ctx
        .transactions
        .iter()
        .any(|t| t.category == Category::Donations);
    let social = EsgInsight {
        axis: EsgAxis::Social,
        score: ctx.score.esg.social,
        status: if gives {
            EsgStatus::Engaged
        } else {
            EsgStatus::Opportunity
        },
        insight: if gives {
            "Great social contribution through charitable giving!".to_string()
        } else {
            "Consider supporting environmental causes through donations".to_string()
        },
    };

    let digital = members(EsgAxis::Governance).len();
    let governance = EsgInsight {
        axis: EsgAxis::Governance,
        score: ctx.score.esg.governance,
        status: if digital > 0 {
            EsgStatus::Good
        } else {
            EsgStatus::Standard
        },
        insight: if digital > 0 {
            format!("{} digital/transparent payment(s) detected", digital)
        } else {
            "Digital payments enhance transparency".to_string()
        },
    };

    EsgInsights {
        environmental,
        social,
        governance,
    }
}
