//! Rules command implementation

use anyhow::Result;
use greenscore_core::Classifier;

use super::{print_json, signed, truncate};

pub fn cmd_rules(classifier: &Classifier, json: bool) -> Result<()> {
    let rules = classifier.rules();

    if json {
        return print_json(&rules);
    }

    println!();
    println!("📐 Classification Rules ({})", classifier.source());
    println!("   ─────────────────────────────────────────────────────────────");

    for (i, rule) in rules.iter().enumerate() {
        println!(
            "   {:>2}. {:<18} {:<13} {:>3}  {:<6} {:<8} {}",
            i + 1,
            rule.id,
            rule.category.as_str(),
            signed(rule.eco_impact),
            rule.strength.as_str(),
            rule.pattern_type.as_str(),
            truncate(&rule.patterns.join(", "), 40)
        );
    }

    println!();
    println!("   First match wins; unmatched descriptions fall back to Other (0).");

    Ok(())
}
