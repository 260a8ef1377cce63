//! Insights command implementation

use anyhow::Result;
use greenscore_core::{insights, score, InMemorySource, Priority, TransactionSource};

use super::print_json;

pub fn cmd_insights(source: &InMemorySource, json: bool) -> Result<()> {
    let transactions = source.all();
    let scored = score(&transactions)?;
    let result = insights(&scored, &transactions);

    if json {
        return print_json(&result);
    }

    println!();
    println!("💡 {}", result.summary);

    if !result.highlights.is_empty() {
        println!();
        println!("✨ Highlights");
        println!("   ─────────────────────────────────────────────");
        for h in &result.highlights {
            println!("   {} {}", h.icon, h.title);
            println!("      {}", h.description);
            if let Some(impact) = &h.impact {
                println!("      {}", impact);
            }
        }
    }

    if !result.recommendations.is_empty() {
        println!();
        println!("🎯 Recommendations");
        println!("   ─────────────────────────────────────────────");
        for r in &result.recommendations {
            let priority = match r.priority {
                Priority::High => "\x1b[31mhigh\x1b[0m",
                Priority::Medium => "\x1b[33mmedium\x1b[0m",
                Priority::Low => "low",
            };
            println!("   {} {} [{}]", r.icon, r.title, priority);
            println!("      {}", r.action);
            println!("      {}", r.potential_impact);
        }
    }

    if let Some(esg) = &result.esg_insights {
        println!();
        println!("🌍 ESG");
        println!("   ─────────────────────────────────────────────");
        for axis in [&esg.environmental, &esg.social, &esg.governance] {
            println!(
                "   {:<14} {:>3}  {}",
                axis.axis.as_str(),
                axis.score,
                axis.insight
            );
        }
    }

    Ok(())
}
