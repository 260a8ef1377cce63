//! Domain models for GreenScore

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Lowest eco-impact a transaction can carry
pub const ECO_IMPACT_MIN: i32 = -5;
/// Highest eco-impact a transaction can carry
pub const ECO_IMPACT_MAX: i32 = 5;

/// Spending category assigned by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Transport,
    Food,
    Shopping,
    Utilities,
    Entertainment,
    Donations,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transport => "Transport",
            Self::Food => "Food",
            Self::Shopping => "Shopping",
            Self::Utilities => "Utilities",
            Self::Entertainment => "Entertainment",
            Self::Donations => "Donations",
            Self::Other => "Other",
        }
    }

    /// All categories in declaration order
    pub fn all() -> &'static [Category] {
        &[
            Self::Transport,
            Self::Food,
            Self::Shopping,
            Self::Utilities,
            Self::Entertainment,
            Self::Donations,
            Self::Other,
        ]
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "transport" => Ok(Self::Transport),
            "food" => Ok(Self::Food),
            "shopping" => Ok(Self::Shopping),
            "utilities" => Ok(Self::Utilities),
            "entertainment" => Ok(Self::Entertainment),
            "donations" => Ok(Self::Donations),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A classified transaction
///
/// Built by the classifier from a [`RawTransaction`]; category, eco_impact
/// and reasoning are classifier output, never raw input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub description: String,
    /// Always positive
    pub amount: f64,
    pub category: Category,
    pub date: NaiveDate,
    /// Sustainability contribution in [-5, 5]
    pub eco_impact: i32,
    pub reasoning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
}

impl Transaction {
    /// Check the invariants a scorer relies on
    pub fn validate(&self) -> Result<()> {
        validate_eco_impact(self.eco_impact)
            .map_err(|e| Error::InvalidInput(format!("transaction {}: {}", self.id, e)))?;
        validate_amount(self.amount)
            .map_err(|e| Error::InvalidInput(format!("transaction {}: {}", self.id, e)))?;
        Ok(())
    }

    pub fn is_positive(&self) -> bool {
        self.eco_impact > 0
    }

    pub fn is_negative(&self) -> bool {
        self.eco_impact < 0
    }
}

/// An unclassified transaction record as it arrives from a source file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    /// Derived from a content hash when absent
    #[serde(default)]
    pub id: Option<String>,
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(default)]
    pub merchant: Option<String>,
}

impl RawTransaction {
    pub fn new(description: impl Into<String>, amount: f64, date: NaiveDate) -> Self {
        Self {
            id: None,
            description: description.into(),
            amount,
            date,
            merchant: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_merchant(mut self, merchant: impl Into<String>) -> Self {
        self.merchant = Some(merchant.into());
        self
    }
}

/// How a rule's patterns are matched against a description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PatternType {
    /// Case-insensitive substring match
    #[default]
    Contains,
    /// Case-insensitive regular expression match
    Regex,
    /// Whole description match (case-insensitive, trimmed)
    Exact,
}

impl PatternType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contains => "contains",
            Self::Regex => "regex",
            Self::Exact => "exact",
        }
    }
}

/// Signal strength of a classification rule, which fixes its confidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuleStrength {
    /// Specific keyword (e.g. "metro", "fast fashion")
    #[default]
    Strong,
    /// Generic keyword (e.g. "green", "market")
    Weak,
}

impl RuleStrength {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Weak => "weak",
        }
    }
}

/// How a classification was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationMethod {
    RuleBased,
    Default,
}

/// Classifier output for one description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: Category,
    pub eco_impact: i32,
    pub reasoning: String,
    pub confidence: f64,
    pub method: ClassificationMethod,
    /// Id of the matching rule (None for the fallback)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
}

/// Check an eco-impact value is within [-5, 5]
pub fn validate_eco_impact(eco_impact: i32) -> std::result::Result<(), String> {
    if (ECO_IMPACT_MIN..=ECO_IMPACT_MAX).contains(&eco_impact) {
        Ok(())
    } else {
        Err(format!(
            "eco_impact {} outside [{}, {}]",
            eco_impact, ECO_IMPACT_MIN, ECO_IMPACT_MAX
        ))
    }
}

/// Check an amount is a positive, finite number
pub fn validate_amount(amount: f64) -> std::result::Result<(), String> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(format!("amount must be a positive number, got {}", amount))
    }
}
