//! Shared utilities for commands
//!
//! - `load_classifier` - Build the classifier from `--rules` or the standard resolution
//! - `load_source` - Load `--data` or fall back to the sample set
//! - `print_json` - Pretty JSON output for `--json`

use std::path::Path;

use anyhow::{Context, Result};
use greenscore_core::{Classifier, InMemorySource};
use serde::Serialize;
use tracing::debug;

/// Build the classifier, preferring an explicit rule file
pub fn load_classifier(rules: Option<&Path>) -> Result<Classifier> {
    match rules {
        Some(path) => Classifier::with_rules_path(path)
            .with_context(|| format!("Failed to load rules from {}", path.display())),
        None => Classifier::new().context("Failed to load classification rules"),
    }
}

/// Load and classify the transaction file, or the sample set when none is given
pub fn load_source(classifier: &Classifier, data: Option<&Path>) -> Result<InMemorySource> {
    match data {
        Some(path) => InMemorySource::from_file(classifier, path)
            .with_context(|| format!("Failed to load transactions from {}", path.display())),
        None => {
            debug!("No --data file given, using the sample set");
            InMemorySource::sample(classifier).context("Failed to classify sample transactions")
        }
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
