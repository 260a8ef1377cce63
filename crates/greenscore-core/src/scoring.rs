//! Scoring engine
//!
//! Aggregates classified transactions into a bounded 0-100 GreenScore with a
//! per-category breakdown and an Environmental/Social/Governance split.
//!
//! All aggregation is integer arithmetic: category weights are held in tenths
//! and amounts in paise, so a result never depends on the order of its input.
//! The final value is rounded half-up to the nearest integer, then clamped.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{Category, Transaction};

/// Score of an empty transaction set (and of an ESG axis with no members)
pub const NEUTRAL_SCORE: u8 = 50;

/// Scale applied to the weighted sum, in tenths (1.0)
pub const SCALE_FACTOR_TENTHS: i64 = 10;

/// Lowest score with `high` status
pub const HIGH_STATUS_MIN: u8 = 71;
/// Lowest score with `medium` status
pub const MEDIUM_STATUS_MIN: u8 = 41;

/// Category weight in tenths (Transport 1.5, Utilities 1.3, Food 1.0, Shopping 0.8)
pub fn category_weight_tenths(category: Category) -> i64 {
    match category {
        Category::Transport => 15,
        Category::Utilities => 13,
        Category::Food => 10,
        Category::Shopping => 8,
        Category::Entertainment | Category::Donations | Category::Other => 10,
    }
}

/// eco_impact × category weight, in tenths
pub fn weighted_impact_tenths(txn: &Transaction) -> i64 {
    i64::from(txn.eco_impact) * category_weight_tenths(txn.category)
}

/// clamp(0, 100, round_half_up(50 + weighted_sum × scale))
fn bounded_score(weighted_tenths: i64, scale_tenths: i64) -> u8 {
    let hundredths = i64::from(NEUTRAL_SCORE) * 100 + weighted_tenths * scale_tenths;
    (hundredths + 50).div_euclid(100).clamp(0, 100) as u8
}

/// Coarse band of a GreenScore
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreStatus {
    Low,
    Medium,
    High,
}

impl ScoreStatus {
    pub fn from_score(score: u8) -> Self {
        if score >= HIGH_STATUS_MIN {
            Self::High
        } else if score >= MEDIUM_STATUS_MIN {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for ScoreStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// ESG axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EsgAxis {
    Environmental,
    Social,
    Governance,
}

impl EsgAxis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Environmental => "environmental",
            Self::Social => "social",
            Self::Governance => "governance",
        }
    }
}

/// Membership rule and scale of one ESG axis
#[derive(Debug, Clone, Copy)]
pub struct EsgAxisSpec {
    pub axis: EsgAxis,
    /// A transaction in any of these categories belongs to the axis
    pub categories: &'static [Category],
    /// A description containing any of these (lowercase) belongs to the axis
    pub signals: &'static [&'static str],
    pub scale_tenths: i64,
}

impl EsgAxisSpec {
    pub fn includes(&self, txn: &Transaction) -> bool {
        if self.categories.contains(&txn.category) {
            return true;
        }
        if self.signals.is_empty() {
            return false;
        }
        let desc = txn.description.to_lowercase();
        self.signals.iter().any(|s| desc.contains(s))
    }
}

/// Shared-mobility description signals
pub const SHARED_MOBILITY_SIGNALS: &[&str] = &["carpool", "rideshare", "ride share", "shared ride"];

/// Digital-payment description signals
pub const DIGITAL_PAYMENT_SIGNALS: &[&str] =
    &["upi", "digital", "online", "net banking", "netbanking", "wallet"];

/// ESG axis table; axes may overlap
pub const ESG_AXES: [EsgAxisSpec; 3] = [
    EsgAxisSpec {
        axis: EsgAxis::Environmental,
        categories: &[
            Category::Transport,
            Category::Utilities,
            Category::Food,
            Category::Shopping,
        ],
        signals: &[],
        scale_tenths: 10,
    },
    EsgAxisSpec {
        axis: EsgAxis::Social,
        categories: &[Category::Donations],
        signals: SHARED_MOBILITY_SIGNALS,
        scale_tenths: 20,
    },
    EsgAxisSpec {
        axis: EsgAxis::Governance,
        categories: &[],
        signals: DIGITAL_PAYMENT_SIGNALS,
        scale_tenths: 30,
    },
];

/// Environmental/Social/Governance sub-scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EsgScores {
    pub environmental: u8,
    pub social: u8,
    pub governance: u8,
}

impl EsgScores {
    pub fn neutral() -> Self {
        Self {
            environmental: NEUTRAL_SCORE,
            social: NEUTRAL_SCORE,
            governance: NEUTRAL_SCORE,
        }
    }

    pub fn get(&self, axis: EsgAxis) -> u8 {
        match axis {
            EsgAxis::Environmental => self.environmental,
            EsgAxis::Social => self.social,
            EsgAxis::Governance => self.governance,
        }
    }
}

/// Aggregate figures for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub count: usize,
    pub total_amount: f64,
    /// Unweighted sum of eco_impact
    pub total_impact: i64,
    pub weighted_impact: f64,
    /// Mean eco_impact, two decimals
    pub avg_impact: f64,
}

/// Result of scoring a transaction set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub green_score: u8,
    pub status: ScoreStatus,
    pub esg: EsgScores,
    pub total_transactions: usize,
    /// Unweighted sum of eco_impact
    pub net_impact: i64,
    pub weighted_sum: f64,
    pub breakdown: BTreeMap<Category, CategoryStats>,
    /// Malformed records left out under [`MalformedPolicy::Skip`]
    pub skipped: usize,
    pub explanation: String,
}

impl ScoreResult {
    /// Result for an empty transaction set
    pub fn neutral() -> Self {
        Self {
            green_score: NEUTRAL_SCORE,
            status: ScoreStatus::Medium,
            esg: EsgScores::neutral(),
            total_transactions: 0,
            net_impact: 0,
            weighted_sum: 0.0,
            breakdown: BTreeMap::new(),
            skipped: 0,
            explanation: "No transactions to analyze".to_string(),
        }
    }
}

/// Human explanation of a score
pub fn explain_score(score: u8) -> &'static str {
    if score >= 80 {
        "Excellent! Your spending habits strongly support sustainability. Keep up the great work!"
    } else if score >= 60 {
        "Good progress! You're making sustainable choices. A few improvements could boost your score further."
    } else if score >= 40 {
        "Room for improvement. Consider shifting towards more eco-friendly alternatives."
    } else {
        "Your spending patterns have significant environmental impact. Small changes can make a big difference!"
    }
}

/// What to do with a transaction that breaks the model invariants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Fail the whole batch with `InvalidInput`
    #[default]
    Reject,
    /// Leave the record out and count it in `ScoreResult::skipped`
    Skip,
}

/// Scoring engine
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine {
    policy: MalformedPolicy,
}

impl ScoringEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: MalformedPolicy) -> Self {
        Self { policy }
    }

    /// Score a transaction set
    pub fn score(&self, transactions: &[Transaction]) -> Result<ScoreResult> {
        let (valid, skipped) = self.admit(transactions)?;

        if valid.is_empty() {
            return Ok(ScoreResult {
                skipped,
                ..ScoreResult::neutral()
            });
        }

        let weighted_tenths: i64 = valid.iter().map(|t| weighted_impact_tenths(t)).sum();
        let net_impact: i64 = valid.iter().map(|t| i64::from(t.eco_impact)).sum();

        let green_score = bounded_score(weighted_tenths, SCALE_FACTOR_TENTHS);
        let status = ScoreStatus::from_score(green_score);

        debug!(
            transactions = valid.len(),
            skipped,
            weighted_tenths,
            green_score,
            "Scored transactions"
        );

        Ok(ScoreResult {
            green_score,
            status,
            esg: esg_scores(valid.iter().copied()),
            total_transactions: valid.len(),
            net_impact,
            weighted_sum: weighted_tenths as f64 / 10.0,
            breakdown: summarize(valid.iter().copied()),
            skipped,
            explanation: explain_score(green_score).to_string(),
        })
    }

    /// Split into scoreable records and a skip count, per policy
    fn admit<'a>(&self, transactions: &'a [Transaction]) -> Result<(Vec<&'a Transaction>, usize)> {
        let mut valid = Vec::with_capacity(transactions.len());
        let mut skipped = 0;

        for txn in transactions {
            match txn.validate() {
                Ok(()) => valid.push(txn),
                Err(e) => match self.policy {
                    MalformedPolicy::Reject => return Err(e),
                    MalformedPolicy::Skip => {
                        warn!(id = %txn.id, error = %e, "Skipping malformed transaction");
                        skipped += 1;
                    }
                },
            }
        }

        Ok((valid, skipped))
    }
}

/// Score a transaction set, rejecting malformed records
pub fn score(transactions: &[Transaction]) -> Result<ScoreResult> {
    ScoringEngine::new().score(transactions)
}

/// Per-category stats without scoring
pub fn category_summary(transactions: &[Transaction]) -> BTreeMap<Category, CategoryStats> {
    summarize(transactions.iter())
}

/// ESG scores alone; fails like [`score`] on a malformed record
pub fn esg_breakdown(transactions: &[Transaction]) -> Result<EsgScores> {
    for txn in transactions {
        txn.validate()?;
    }
    Ok(esg_scores(transactions.iter()))
}

/// Sum of weighted impact (tenths) over an axis' members, None if it has none
pub fn axis_weighted_tenths<'a>(
    spec: &EsgAxisSpec,
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> Option<i64> {
    let mut members = 0usize;
    let mut total = 0i64;
    for txn in transactions.into_iter().filter(|t| spec.includes(t)) {
        members += 1;
        total += weighted_impact_tenths(txn);
    }
    (members > 0).then_some(total)
}

fn esg_scores<'a>(transactions: impl Iterator<Item = &'a Transaction> + Clone) -> EsgScores {
    let axis_score = |spec: &EsgAxisSpec| {
        axis_weighted_tenths(spec, transactions.clone())
            .map(|tenths| bounded_score(tenths, spec.scale_tenths))
            .unwrap_or(NEUTRAL_SCORE)
    };

    let mut esg = EsgScores::neutral();
    for spec in &ESG_AXES {
        let value = axis_score(spec);
        match spec.axis {
            EsgAxis::Environmental => esg.environmental = value,
            EsgAxis::Social => esg.social = value,
            EsgAxis::Governance => esg.governance = value,
        }
    }
    esg
}

#[derive(Default)]
struct Accumulator {
    count: usize,
    /// Saturates for amounts no real statement carries
    amount_paise: i128,
    impact: i64,
    weighted_tenths: i64,
}

fn summarize<'a>(
    transactions: impl Iterator<Item = &'a Transaction>,
) -> BTreeMap<Category, CategoryStats> {
    let mut acc: BTreeMap<Category, Accumulator> = BTreeMap::new();

    for txn in transactions {
        let entry = acc.entry(txn.category).or_default();
        entry.count += 1;
        entry.amount_paise = entry
            .amount_paise
            .saturating_add((txn.amount * 100.0).round() as i128);
        entry.impact += i64::from(txn.eco_impact);
        entry.weighted_tenths += weighted_impact_tenths(txn);
    }

    acc.into_iter()
        .map(|(category, a)| {
            let avg = (a.impact as f64 / a.count as f64 * 100.0).round() / 100.0;
            (
                category,
                CategoryStats {
                    count: a.count,
                    total_amount: a.amount_paise as f64 / 100.0,
                    total_impact: a.impact,
                    weighted_impact: a.weighted_tenths as f64 / 10.0,
                    avg_impact: avg,
                },
            )
        })
        .collect()
}

/// Reject a score outside [0, 100]
pub fn check_score_range(score: i64) -> Result<u8> {
    u8::try_from(score)
        .ok()
        .filter(|s| *s <= 100)
        .ok_or_else(|| Error::InvalidInput(format!("green_score {} outside [0, 100]", score)))
}
