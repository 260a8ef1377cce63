//! Core types for the Insight Engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::scoring::EsgAxis;

/// Gain (score points) at or above which a recommendation is high priority
pub const HIGH_PRIORITY_GAIN: f64 = 8.0;
/// Gain (score points) at or above which a recommendation is medium priority
pub const MEDIUM_PRIORITY_GAIN: f64 = 4.0;

/// Highlights kept per result
pub const MAX_HIGHLIGHTS: usize = 5;

/// Key prefix of the worst-transaction recommendation, which always leads
pub const WORST_KEY_PREFIX: &str = "recommendation:worst:";

/// Types of analyzers registered with the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    /// Celebrates the best choices
    Highlights,
    /// Points at the biggest improvements
    Recommendations,
}

impl InsightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightType::Highlights => "highlights",
            InsightType::Recommendations => "recommendations",
        }
    }
}

impl fmt::Display for InsightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "highlights" => Ok(InsightType::Highlights),
            "recommendations" => Ok(InsightType::Recommendations),
            _ => Err(format!("Unknown insight type: {}", s)),
        }
    }
}

/// Urgency of a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Numeric priority for sorting (higher = more urgent)
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }

    /// Priority tier for a potential gain in score points
    pub fn from_gain(gain: f64) -> Self {
        let gain = gain.abs();
        if gain >= HIGH_PRIORITY_GAIN {
            Priority::High
        } else if gain >= MEDIUM_PRIORITY_GAIN {
            Priority::Medium
        } else {
            Priority::Low
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Flavour of a highlight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightKind {
    /// A single standout transaction
    Positive,
    /// A pattern across many transactions
    Achievement,
    /// Giving to causes
    Social,
}

/// Something the user did well
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    /// Unique key (e.g., "highlight:best:TXN001")
    pub key: String,
    pub kind: HighlightKind,
    pub icon: String,
    pub title: String,
    pub description: String,
    /// Signed eco-impact for transaction highlights (e.g., "+5")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
}

/// Something the user could change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Unique key (e.g., "recommendation:category:Transport")
    pub key: String,
    pub priority: Priority,
    pub icon: String,
    pub title: String,
    pub action: String,
    /// Score points the change could recover
    pub potential_gain: f64,
    /// Display form of the gain (e.g., "+7.5 points")
    pub potential_impact: String,
}

impl Recommendation {
    /// Build a recommendation whose priority follows from its gain
    pub fn new(
        key: impl Into<String>,
        icon: impl Into<String>,
        title: impl Into<String>,
        action: impl Into<String>,
        potential_gain: f64,
    ) -> Self {
        let potential_gain = potential_gain.abs();
        Self {
            key: key.into(),
            priority: Priority::from_gain(potential_gain),
            icon: icon.into(),
            title: title.into(),
            action: action.into(),
            potential_gain,
            potential_impact: format!("+{} points", potential_gain),
        }
    }

    pub fn with_potential_impact(mut self, text: impl Into<String>) -> Self {
        self.potential_impact = text.into();
        self
    }
}

/// Output of one analyzer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Findings {
    pub highlights: Vec<Highlight>,
    pub recommendations: Vec<Recommendation>,
}

/// Qualitative standing of one ESG axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EsgStatus {
    /// Most environmental transactions are eco-friendly
    Strong,
    NeedsImprovement,
    /// Gives to causes
    Engaged,
    Opportunity,
    /// Uses digital payments
    Good,
    Standard,
}

/// One-line insight for an ESG axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EsgInsight {
    pub axis: EsgAxis,
    pub score: u8,
    pub status: EsgStatus,
    pub insight: String,
}

/// Insights for all three ESG axes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EsgInsights {
    pub environmental: EsgInsight,
    pub social: EsgInsight,
    pub governance: EsgInsight,
}

/// Spread of eco-impacts across a transaction set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactDistribution {
    pub positive_count: usize,
    pub negative_count: usize,
    pub neutral_count: usize,
    pub total_positive_impact: i64,
    pub total_negative_impact: i64,
}

/// Everything the generator derives from a score and its transactions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsResult {
    pub summary: String,
    pub highlights: Vec<Highlight>,
    pub recommendations: Vec<Recommendation>,
    /// None when there were no transactions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub esg_insights: Option<EsgInsights>,
    pub impact_distribution: ImpactDistribution,
}
