//! GreenScore Core Library
//!
//! Sustainability credit scoring over financial transactions:
//! - Rule-based classifier (description → category, eco-impact, reasoning)
//! - Rule table configuration with embedded defaults and file overrides
//! - Scoring engine (0-100 GreenScore with ESG breakdown)
//! - Incentive simulator (tiers, progress, simulated benefits)
//! - Insight engine for highlights and recommendations
//! - Transaction sources and CSV/JSON import
//!
//! The pipeline is pure and synchronous: raw records are classified one by
//! one, a batch is scored, and insights and incentives are derived from the
//! score independently.

pub mod classifier;
pub mod error;
pub mod import;
pub mod incentives;
pub mod insights;
pub mod models;
pub mod scoring;
pub mod sources;

pub use classifier::{default_rules_path, parse_rules, ClassificationRule, Classifier, RuleSource};
pub use error::{Error, Result};
pub use incentives::{
    eligible_incentives, progress, tier_and_progress, tier_comparison, tier_for, IncentiveReport,
    Progress, Tier, TierId, TierStanding, TIERS,
};
pub use insights::{insights, InsightEngine, InsightsResult, Priority};
pub use models::{
    Category, ClassificationMethod, ClassificationResult, PatternType, RawTransaction,
    RuleStrength, Transaction,
};
pub use scoring::{
    category_summary, esg_breakdown, score, CategoryStats, EsgScores, MalformedPolicy,
    ScoreResult, ScoreStatus, ScoringEngine,
};
pub use sources::{InMemorySource, TransactionFilter, TransactionSource};
