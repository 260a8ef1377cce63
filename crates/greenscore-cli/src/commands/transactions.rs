//! Transaction command implementations

use anyhow::Result;
use greenscore_core::{InMemorySource, TransactionFilter, TransactionSource};

use super::{print_json, signed, truncate};

pub fn cmd_transactions(source: &InMemorySource, filter: &TransactionFilter, json: bool) -> Result<()> {
    let transactions = source.list_transactions(filter);

    if json {
        return print_json(&transactions);
    }

    if transactions.is_empty() {
        println!("No transactions match. Try widening the filter or load a file with:");
        println!("  greenscore --data transactions.csv transactions");
        return Ok(());
    }

    println!();
    println!("📝 Transactions ({} of {})", transactions.len(), source.len());
    println!("   ─────────────────────────────────────────────────────────────────────");

    for tx in &transactions {
        let impact = if tx.eco_impact > 0 {
            format!("\x1b[32m{:>3}\x1b[0m", signed(tx.eco_impact)) // Green for eco-friendly
        } else if tx.eco_impact < 0 {
            format!("\x1b[31m{:>3}\x1b[0m", tx.eco_impact) // Red for harmful
        } else {
            format!("{:>3}", tx.eco_impact)
        };

        println!(
            "   {} │ {:<16} │ {:>13} │ {:<13} │ {} │ {}",
            tx.date,
            tx.id,
            format!("₹{:.2}", tx.amount),
            tx.category.as_str(),
            impact,
            truncate(&tx.description, 34)
        );
    }

    Ok(())
}
