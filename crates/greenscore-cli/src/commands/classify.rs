//! Classify command implementation

use anyhow::Result;
use greenscore_core::{ClassificationMethod, Classifier};

use super::{print_json, signed};

pub fn cmd_classify(classifier: &Classifier, description: &str, amount: f64, json: bool) -> Result<()> {
    let result = classifier.classify(description, amount)?;

    if json {
        return print_json(&result);
    }

    println!();
    println!("🏷️  Classification");
    println!("   ─────────────────────────────────────────────");
    println!("   Description: {}", description);
    println!("   Amount:      ₹{:.2}", amount);
    println!("   Category:    {}", result.category);
    println!("   Eco-impact:  {}", signed(result.eco_impact));
    println!("   Reasoning:   {}", result.reasoning);
    match (&result.method, &result.rule) {
        (ClassificationMethod::RuleBased, Some(rule)) => println!(
            "   Confidence:  {:.0}% (rule '{}')",
            result.confidence * 100.0,
            rule
        ),
        _ => println!(
            "   Confidence:  {:.0}% (no rule matched)",
            result.confidence * 100.0
        ),
    }

    Ok(())
}
