//! Score command implementations (score, esg, categories)

use anyhow::Result;
use greenscore_core::{
    category_summary, scoring::ESG_AXES, EsgScores, InMemorySource, MalformedPolicy, ScoreStatus,
    ScoringEngine, TransactionSource,
};

use super::{print_json, signed};

/// 20-cell bar for a 0-100 value
fn bar(value: u8) -> String {
    let filled = usize::from(value.min(100)) / 5;
    format!("{}{}", "█".repeat(filled), "░".repeat(20 - filled))
}

fn status_icon(status: ScoreStatus) -> &'static str {
    match status {
        ScoreStatus::High => "🟢",
        ScoreStatus::Medium => "🟡",
        ScoreStatus::Low => "🔴",
    }
}

pub fn cmd_score(source: &InMemorySource, skip_invalid: bool, json: bool) -> Result<()> {
    let policy = if skip_invalid {
        MalformedPolicy::Skip
    } else {
        MalformedPolicy::Reject
    };
    let result = ScoringEngine::with_policy(policy).score(&source.all())?;

    if json {
        return print_json(&result);
    }

    println!();
    println!("🌱 GreenScore");
    println!("   ─────────────────────────────────────────────");
    println!(
        "   Score:        {} {}/100  {} {}",
        bar(result.green_score),
        result.green_score,
        status_icon(result.status),
        result.status
    );
    println!("   Transactions: {}", result.total_transactions);
    if result.skipped > 0 {
        println!("   Skipped:      {} malformed", result.skipped);
    }
    println!("   Net impact:   {}", signed(result.net_impact));
    println!("   Weighted sum: {}", signed(result.weighted_sum));
    println!();
    println!("   {}", result.explanation);

    print_esg(&result.esg);

    Ok(())
}

fn print_esg(esg: &EsgScores) {
    println!();
    println!("🌍 ESG Breakdown");
    println!("   ─────────────────────────────────────────────");
    for spec in &ESG_AXES {
        let value = esg.get(spec.axis);
        println!("   {:<14} {} {:>3}", spec.axis.as_str(), bar(value), value);
    }
}

pub fn cmd_esg(source: &InMemorySource, json: bool) -> Result<()> {
    let esg = greenscore_core::esg_breakdown(&source.all())?;

    if json {
        return print_json(&esg);
    }

    print_esg(&esg);
    Ok(())
}

pub fn cmd_categories(source: &InMemorySource, json: bool) -> Result<()> {
    let summary = category_summary(&source.all());

    if json {
        return print_json(&summary);
    }

    if summary.is_empty() {
        println!("No transactions to summarize.");
        return Ok(());
    }

    println!();
    println!("📊 Categories");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:<14} │ {:>5} │ {:>12} │ {:>6} │ {:>8} │ {:>6}",
        "Category", "Count", "Amount", "Impact", "Weighted", "Avg"
    );
    for (category, stats) in &summary {
        println!(
            "   {:<14} │ {:>5} │ {:>12} │ {:>6} │ {:>8} │ {:>6.2}",
            category.as_str(),
            stats.count,
            format!("₹{:.2}", stats.total_amount),
            signed(stats.total_impact),
            signed(stats.weighted_impact),
            stats.avg_impact
        );
    }

    Ok(())
}
