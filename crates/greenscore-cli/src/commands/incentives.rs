//! Incentive command implementation

use anyhow::Result;
use greenscore_core::{
    eligible_incentives, incentives::DISCLAIMER, score, tier_comparison, InMemorySource,
    TransactionSource,
};

use super::print_json;

/// Tier standing and simulated incentives, or the full tier comparison with `compare`
///
/// `score_override` skips scoring the transactions; it must lie in [0, 100].
pub fn cmd_incentives(
    source: &InMemorySource,
    score_override: Option<i64>,
    compare: bool,
    json: bool,
) -> Result<()> {
    if compare {
        return cmd_tier_comparison(json);
    }

    let green_score = match score_override {
        Some(s) => s,
        None => i64::from(score(&source.all())?.green_score),
    };
    let report = eligible_incentives(green_score)?;

    if json {
        return print_json(&report);
    }

    let standing = &report.standing;
    let tier = &standing.tier;

    println!();
    println!(
        "{} {} Tier (GreenScore {})",
        tier.badge, tier.name, standing.green_score
    );
    println!("   ─────────────────────────────────────────────");
    println!("   Cashback:        {}%", tier.benefits.cashback_percent);
    println!("   Loan discount:   {}%", tier.benefits.loan_rate_reduction);
    println!("   Reward points:   {}x", tier.benefits.reward_multiplier);
    if let Some(next) = standing.progress.next_tier {
        println!(
            "   Next tier:       {} ({}% of the way)",
            next.tier().name,
            standing.progress.percent_to_next
        );
    }
    println!("   {}", standing.progress.message);

    println!();
    println!("🎁 Incentives (est. {} / month)", report.estimated_monthly_value);
    println!("   ─────────────────────────────────────────────");
    for offer in &report.incentives {
        let mark = if offer.eligible { "✅" } else { "🔒" };
        let note = offer
            .benefit
            .note
            .map(|n| format!(" ({})", n))
            .unwrap_or_default();
        println!(
            "   {} {} {:<26} {}{}",
            mark, offer.icon, offer.name, offer.benefit.value, note
        );
    }

    println!();
    println!("   ⚠️  {}", report.disclaimer);

    Ok(())
}

fn cmd_tier_comparison(json: bool) -> Result<()> {
    let rows = tier_comparison();

    if json {
        return print_json(&rows);
    }

    println!();
    println!("🏆 Tier Comparison");
    println!("   ─────────────────────────────────────────────────────────────");
    for row in &rows {
        println!(
            "   {} {:<9} {:>8} │ cashback {}% │ loan -{}% │ points {}x",
            row.badge,
            row.name,
            row.score_range,
            row.benefits.cashback_percent,
            row.benefits.loan_rate_reduction,
            row.benefits.reward_multiplier
        );
        let unlocked: Vec<&str> = row
            .incentives
            .iter()
            .filter(|(_, cell)| cell.eligible)
            .map(|(id, _)| *id)
            .collect();
        if !unlocked.is_empty() {
            println!("      unlocks: {}", unlocked.join(", "));
        }
    }

    println!();
    println!("   ⚠️  {}", DISCLAIMER);

    Ok(())
}
