//! Incentive simulator
//!
//! Maps a GreenScore to a fixed tier, reports progress toward the next tier
//! and lists the simulated benefits each tier unlocks. Everything here is
//! static configuration plus lookup; no benefit is ever paid out.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::Result;
use crate::scoring::check_score_range;

/// Simulated benefit notice attached to every incentive report
pub const DISCLAIMER: &str =
    "These are simulated incentives for demonstration purposes. No real financial benefits are provided.";

/// Incentive tier, ordered lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierId {
    Starter,
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl TierId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Starter => "starter",
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Platinum => "platinum",
        }
    }

    pub fn all() -> &'static [TierId] {
        &[
            Self::Starter,
            Self::Bronze,
            Self::Silver,
            Self::Gold,
            Self::Platinum,
        ]
    }

    fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Option<TierId> {
        Self::all().get(self.index() + 1).copied()
    }

    pub fn tier(self) -> &'static Tier {
        &TIERS[self.index()]
    }
}

impl std::fmt::Display for TierId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Headline benefits of a tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TierBenefits {
    pub cashback_percent: f64,
    /// Percentage points off the loan rate
    pub loan_rate_reduction: f64,
    pub reward_multiplier: f64,
}

/// A named score band
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tier {
    pub id: TierId,
    pub name: &'static str,
    pub min_score: u8,
    pub max_score: u8,
    pub badge: &'static str,
    pub color: &'static str,
    pub benefits: TierBenefits,
}

impl Tier {
    pub fn contains(&self, score: u8) -> bool {
        (self.min_score..=self.max_score).contains(&score)
    }
}

/// Tier table; ranges are inclusive and partition [0, 100]
pub static TIERS: [Tier; 5] = [
    Tier {
        id: TierId::Starter,
        name: "Green Starter",
        min_score: 0,
        max_score: 29,
        badge: "🌱",
        color: "#808080",
        benefits: TierBenefits {
            cashback_percent: 0.0,
            loan_rate_reduction: 0.0,
            reward_multiplier: 1.0,
        },
    },
    Tier {
        id: TierId::Bronze,
        name: "Bronze Green",
        min_score: 30,
        max_score: 49,
        badge: "🥉",
        color: "#CD7F32",
        benefits: TierBenefits {
            cashback_percent: 0.5,
            loan_rate_reduction: 0.25,
            reward_multiplier: 1.0,
        },
    },
    Tier {
        id: TierId::Silver,
        name: "Silver Green",
        min_score: 50,
        max_score: 69,
        badge: "🥈",
        color: "#C0C0C0",
        benefits: TierBenefits {
            cashback_percent: 1.5,
            loan_rate_reduction: 0.75,
            reward_multiplier: 1.5,
        },
    },
    Tier {
        id: TierId::Gold,
        name: "Gold Green",
        min_score: 70,
        max_score: 84,
        badge: "🥇",
        color: "#FFD700",
        benefits: TierBenefits {
            cashback_percent: 3.0,
            loan_rate_reduction: 1.5,
            reward_multiplier: 2.0,
        },
    },
    Tier {
        id: TierId::Platinum,
        name: "Platinum Green",
        min_score: 85,
        max_score: 100,
        badge: "🌟",
        color: "#00D4AA",
        benefits: TierBenefits {
            cashback_percent: 5.0,
            loan_rate_reduction: 2.0,
            reward_multiplier: 3.0,
        },
    },
];

/// Tier containing `score`; scores above 100 saturate to the top tier
pub fn tier_for(score: u8) -> &'static Tier {
    let score = score.min(100);
    TIERS
        .iter()
        .find(|t| t.contains(score))
        .unwrap_or(&TIERS[TIERS.len() - 1])
}

/// Distance from a score to the next tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// None at the top tier, serialized as `"none"`
    #[serde(serialize_with = "serialize_next_tier")]
    pub next_tier: Option<TierId>,
    /// Integer percent of the way from this tier's min to the next tier's min
    pub percent_to_next: u8,
    pub points_needed: u8,
    pub message: String,
}

fn serialize_next_tier<S: Serializer>(
    next: &Option<TierId>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match next {
        Some(tier) => tier.serialize(serializer),
        None => serializer.serialize_str("none"),
    }
}

/// Progress of `score` within `tier` toward the next one
pub fn progress(score: u8, tier: &Tier) -> Progress {
    let Some(next_id) = tier.id.next() else {
        return Progress {
            next_tier: None,
            percent_to_next: 100,
            points_needed: 0,
            message: "You're at the highest tier! 🎉".to_string(),
        };
    };

    let next = next_id.tier();
    let span = u32::from(next.min_score - tier.min_score);
    let into = u32::from(score.saturating_sub(tier.min_score));
    // round half-up
    let percent = ((into * 200 + span) / (2 * span)).min(100) as u8;
    let points_needed = next.min_score.saturating_sub(score);

    Progress {
        next_tier: Some(next_id),
        percent_to_next: percent,
        points_needed,
        message: format!(
            "Earn {} more points to unlock {}!",
            points_needed, next.name
        ),
    }
}

/// A score's tier and progress
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierStanding {
    pub green_score: u8,
    pub tier: Tier,
    #[serde(flatten)]
    pub progress: Progress,
}

/// Tier and progress for a score; fails with `InvalidInput` outside [0, 100]
pub fn tier_and_progress(green_score: i64) -> Result<TierStanding> {
    let score = check_score_range(green_score)?;
    let tier = tier_for(score);
    Ok(TierStanding {
        green_score: score,
        tier: *tier,
        progress: progress(score, tier),
    })
}

/// Benefit of one incentive at one tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IncentiveValue {
    pub value: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

const fn value(value: &'static str, note: Option<&'static str>) -> IncentiveValue {
    IncentiveValue { value, note }
}

/// A simulated incentive product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Incentive {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    /// Lowest tier that qualifies
    pub min_tier: TierId,
    /// Indexed by tier, lowest first
    #[serde(skip)]
    values: [IncentiveValue; 5],
}

impl Incentive {
    pub fn value_for(&self, tier: TierId) -> IncentiveValue {
        self.values[tier.index()]
    }

    pub fn is_eligible(&self, tier: TierId) -> bool {
        tier >= self.min_tier
    }
}

/// Incentive catalogue
pub static INCENTIVES: [Incentive; 5] = [
    Incentive {
        id: "cashback",
        name: "Green Cashback",
        description: "Cashback on eco-friendly purchases",
        icon: "💰",
        min_tier: TierId::Bronze,
        values: [
            value("0%", Some("₹0 max monthly")),
            value("0.5%", Some("₹250 max monthly")),
            value("1.5%", Some("₹750 max monthly")),
            value("3%", Some("₹1,500 max monthly")),
            value("5%", Some("₹2,500 max monthly")),
        ],
    },
    Incentive {
        id: "green_loan",
        name: "Green Loan Benefits",
        description: "Reduced interest rates on eco-friendly purchases",
        icon: "🏦",
        min_tier: TierId::Bronze,
        values: [
            value("0%", None),
            value("0.25%", None),
            value("0.75%", None),
            value("1.5%", None),
            value("2.0%", None),
        ],
    },
    Incentive {
        id: "rewards",
        name: "Green Reward Points",
        description: "Bonus reward points on sustainable transactions",
        icon: "🎁",
        min_tier: TierId::Starter,
        values: [
            value("1x", Some("0 bonus points")),
            value("1x", Some("50 bonus points")),
            value("1.5x", Some("150 bonus points")),
            value("2x", Some("300 bonus points")),
            value("3x", Some("500 bonus points")),
        ],
    },
    Incentive {
        id: "insurance",
        name: "Green Insurance Discount",
        description: "Premium discounts on vehicle and health insurance",
        icon: "🛡️",
        min_tier: TierId::Bronze,
        values: [
            value("0%", None),
            value("2%", None),
            value("5%", None),
            value("10%", None),
            value("15%", None),
        ],
    },
    Incentive {
        id: "credit_limit",
        name: "Enhanced Credit Limit",
        description: "Higher credit limits for sustainable spenders",
        icon: "💳",
        min_tier: TierId::Silver,
        values: [
            value("0%", None),
            value("0%", None),
            value("+5%", None),
            value("+15%", None),
            value("+25%", None),
        ],
    },
];

/// Estimated monthly value of a tier's incentives
pub fn estimated_monthly_value(tier: TierId) -> &'static str {
    match tier {
        TierId::Platinum => "₹3,000 - ₹5,000",
        TierId::Gold => "₹1,500 - ₹3,000",
        TierId::Silver => "₹500 - ₹1,500",
        TierId::Bronze => "₹100 - ₹500",
        TierId::Starter => "₹0",
    }
}

/// One incentive as it applies to a tier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncentiveOffer {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub eligible: bool,
    pub min_tier: TierId,
    pub benefit: IncentiveValue,
}

/// Tier standing plus every incentive's eligibility
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncentiveReport {
    pub standing: TierStanding,
    pub incentives: Vec<IncentiveOffer>,
    pub estimated_monthly_value: &'static str,
    pub disclaimer: &'static str,
}

/// Incentives available at a score
pub fn eligible_incentives(green_score: i64) -> Result<IncentiveReport> {
    let standing = tier_and_progress(green_score)?;
    let tier = standing.tier.id;

    let incentives = INCENTIVES
        .iter()
        .map(|i| IncentiveOffer {
            id: i.id,
            name: i.name,
            description: i.description,
            icon: i.icon,
            eligible: i.is_eligible(tier),
            min_tier: i.min_tier,
            benefit: i.value_for(tier),
        })
        .collect();

    Ok(IncentiveReport {
        standing,
        incentives,
        estimated_monthly_value: estimated_monthly_value(tier),
        disclaimer: DISCLAIMER,
    })
}

/// Incentive cell in the tier comparison table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComparisonCell {
    pub eligible: bool,
    #[serde(flatten)]
    pub benefit: IncentiveValue,
}

/// One tier's row in the comparison table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierComparison {
    pub tier: TierId,
    pub name: &'static str,
    pub score_range: String,
    pub badge: &'static str,
    pub benefits: TierBenefits,
    pub incentives: BTreeMap<&'static str, ComparisonCell>,
}

/// All tiers against all incentives, lowest tier first
pub fn tier_comparison() -> Vec<TierComparison> {
    TIERS
        .iter()
        .map(|tier| TierComparison {
            tier: tier.id,
            name: tier.name,
            score_range: format!("{} - {}", tier.min_score, tier.max_score),
            badge: tier.badge,
            benefits: tier.benefits,
            incentives: INCENTIVES
                .iter()
                .map(|i| {
                    (
                        i.id,
                        ComparisonCell {
                            eligible: i.is_eligible(tier.id),
                            benefit: i.value_for(tier.id),
                        },
                    )
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers_partition_score_range() {
        assert_eq!(TIERS[0].min_score, 0);
        assert_eq!(TIERS[TIERS.len() - 1].max_score, 100);
        for pair in TIERS.windows(2) {
            assert_eq!(pair[0].max_score + 1, pair[1].min_score);
            assert!(pair[0].id < pair[1].id);
        }
        for (i, id) in TierId::all().iter().enumerate() {
            assert_eq!(TIERS[i].id, *id);
        }
    }

    #[test]
    fn test_every_score_maps_to_exactly_one_tier() {
        for score in 0..=100i64 {
            let standing = tier_and_progress(score).unwrap();
            let containing: Vec<_> = TIERS
                .iter()
                .filter(|t| t.contains(score as u8))
                .collect();
            assert_eq!(containing.len(), 1, "score {}", score);
            assert_eq!(containing[0].id, standing.tier.id);
            assert!(standing.tier.contains(standing.green_score));
            assert!(standing.progress.percent_to_next <= 100);
        }
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(tier_and_progress(70).unwrap().tier.id, TierId::Gold);
        assert_eq!(tier_and_progress(69).unwrap().tier.id, TierId::Silver);
        assert_eq!(tier_and_progress(29).unwrap().tier.id, TierId::Starter);
        assert_eq!(tier_and_progress(30).unwrap().tier.id, TierId::Bronze);

        let top = tier_and_progress(85).unwrap();
        assert_eq!(top.tier.id, TierId::Platinum);
        assert_eq!(top.progress.next_tier, None);
        assert_eq!(top.progress.percent_to_next, 100);
        assert_eq!(top.progress.points_needed, 0);
    }

    #[test]
    fn test_out_of_range_scores_rejected() {
        assert!(tier_and_progress(101).unwrap_err().is_invalid_input());
        assert!(tier_and_progress(-1).unwrap_err().is_invalid_input());
        assert!(eligible_incentives(150).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_progress_percent() {
        let silver = TierId::Silver.tier();
        assert_eq!(progress(50, silver).percent_to_next, 0);
        assert_eq!(progress(60, silver).percent_to_next, 50);
        assert_eq!(progress(69, silver).percent_to_next, 95);

        // Gold spans 70..85: 8/15 = 53.33%
        let gold = progress(78, TierId::Gold.tier());
        assert_eq!(gold.percent_to_next, 53);
        assert_eq!(gold.next_tier, Some(TierId::Platinum));
        assert_eq!(gold.points_needed, 7);
        assert_eq!(gold.message, "Earn 7 more points to unlock Platinum Green!");

        // Gold 81: 11/15 = 73.33%; Starter 29: 29/30 = 96.67% rounds up
        assert_eq!(progress(81, TierId::Gold.tier()).percent_to_next, 73);
        assert_eq!(progress(29, TierId::Starter.tier()).percent_to_next, 97);
    }

    #[test]
    fn test_tier_for_saturates() {
        assert_eq!(tier_for(255).id, TierId::Platinum);
        assert_eq!(tier_for(0).id, TierId::Starter);
    }

    #[test]
    fn test_eligibility_by_tier() {
        let starter = eligible_incentives(10).unwrap();
        let eligible: Vec<_> = starter
            .incentives
            .iter()
            .filter(|i| i.eligible)
            .map(|i| i.id)
            .collect();
        assert_eq!(eligible, vec!["rewards"]);
        assert_eq!(starter.estimated_monthly_value, "₹0");

        let bronze = eligible_incentives(35).unwrap();
        let credit = bronze.incentives.iter().find(|i| i.id == "credit_limit").unwrap();
        assert!(!credit.eligible);
        assert_eq!(credit.benefit.value, "0%");

        let gold = eligible_incentives(81).unwrap();
        assert!(gold.incentives.iter().all(|i| i.eligible));
        assert_eq!(gold.standing.tier.id, TierId::Gold);
        assert_eq!(gold.estimated_monthly_value, "₹1,500 - ₹3,000");
        assert_eq!(gold.disclaimer, DISCLAIMER);
        let cashback = gold.incentives.iter().find(|i| i.id == "cashback").unwrap();
        assert_eq!(cashback.benefit.value, "3%");
    }

    #[test]
    fn test_zero_benefit_is_never_eligible() {
        for tier in TierId::all() {
            for incentive in &INCENTIVES {
                let v = incentive.value_for(*tier);
                if v.value == "0%" {
                    assert!(!incentive.is_eligible(*tier), "{} at {}", incentive.id, tier);
                }
            }
        }
    }

    #[test]
    fn test_tier_comparison_table() {
        let table = tier_comparison();
        assert_eq!(table.len(), TIERS.len());
        for row in &table {
            assert_eq!(row.incentives.len(), INCENTIVES.len());
        }
        assert_eq!(table[3].score_range, "70 - 84");
        assert_eq!(table[4].incentives["credit_limit"].benefit.value, "+25%");
        assert!(!table[0].incentives["cashback"].eligible);
    }

    #[test]
    fn test_standing_serializes_flat() {
        let json = serde_json::to_value(tier_and_progress(81).unwrap()).unwrap();
        assert_eq!(json["tier"]["id"], "gold");
        assert_eq!(json["next_tier"], "platinum");
        assert_eq!(json["percent_to_next"], 73);
    }

    #[test]
    fn test_top_tier_serializes_next_as_none() {
        let json = serde_json::to_value(tier_and_progress(85).unwrap()).unwrap();
        assert_eq!(json["tier"]["id"], "platinum");
        assert_eq!(json["next_tier"], "none");
        assert_eq!(json["percent_to_next"], 100);
    }
}
