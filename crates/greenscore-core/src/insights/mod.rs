//! Insight Engine - Sustainability Highlights and Recommendations
//!
//! The Insight Engine is a pluggable system that turns a score and its
//! transactions into human-readable text: what went well, what to change,
//! and how each ESG axis is doing.
//!
//! ## Core Insight Types
//!
//! - **Highlights** - Best choice, champion and contributor achievements
//! - **Recommendations** - Worst transaction, negative categories, score boost
//!
//! ## Usage
//!
//! ```rust,ignore
//! use greenscore_core::insights::InsightEngine;
//!
//! let scored = greenscore_core::score(&transactions)?;
//! let result = InsightEngine::new().generate(&scored, &transactions);
//! ```

pub mod engine;
pub mod highlights;
pub mod recommendations;
pub mod types;

pub use engine::{AnalysisContext, Insight, InsightEngine, EMPTY_SUMMARY};
pub use highlights::HighlightsInsight;
pub use recommendations::RecommendationsInsight;
pub use types::{
    EsgInsight, EsgInsights, EsgStatus, Findings, Highlight, HighlightKind, ImpactDistribution,
    InsightType, InsightsResult, Priority, Recommendation,
};

use crate::models::Transaction;
use crate::scoring::ScoreResult;

/// Generate insights with the built-in analyzers
pub fn insights(score: &ScoreResult, transactions: &[Transaction]) -> InsightsResult {
    InsightEngine::new().generate(score, transactions)
}
