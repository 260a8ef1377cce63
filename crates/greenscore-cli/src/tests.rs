//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::path::Path;

use clap::Parser;
use greenscore_core::{Category, Classifier, InMemorySource, TransactionFilter};

use crate::cli::{Cli, Commands};
use crate::commands::{self, signed, truncate};

fn setup_classifier() -> Classifier {
    Classifier::embedded().unwrap()
}

fn setup_sample() -> InMemorySource {
    InMemorySource::sample(&setup_classifier()).unwrap()
}

fn write_csv(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

// ========== Loading Tests ==========

#[test]
fn test_load_classifier_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "rules.toml",
        r#"
[[rules]]
id = "metro"
category = "Transport"
eco_impact = 5
patterns = ["metro"]
detail = "public transit"
"#,
    );

    let classifier = commands::load_classifier(Some(&path)).unwrap();
    assert_eq!(classifier.rules().len(), 1);
    assert!(commands::cmd_rules(&classifier, false).is_ok());
}

#[test]
fn test_load_classifier_missing_file() {
    let result = commands::load_classifier(Some(Path::new("/nonexistent/rules.toml")));
    let err = result.unwrap_err();
    assert!(err.to_string().contains("Failed to load rules"));
}

#[test]
fn test_load_source_defaults_to_sample() {
    let source = commands::load_source(&setup_classifier(), None).unwrap();
    assert_eq!(source.len(), 16);
}

#[test]
fn test_load_source_from_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "txns.csv",
        "date,description,amount\n2026-02-01,Metro Card Recharge,500\n2026-02-02,Petrol Refill,2000\n",
    );

    let source = commands::load_source(&setup_classifier(), Some(&path)).unwrap();
    assert_eq!(source.len(), 2);
    assert!(commands::cmd_score(&source, false, false).is_ok());
    assert!(commands::cmd_insights(&source, false).is_ok());
}

#[test]
fn test_load_source_rejects_bad_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "txns.csv", "date,description,amount\n2026-02-01,Metro,-5\n");

    let err = commands::load_source(&setup_classifier(), Some(&path)).unwrap_err();
    assert!(err.to_string().contains("Failed to load transactions"));
}

#[test]
fn test_load_source_unknown_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "txns.xlsx", "whatever");
    assert!(commands::load_source(&setup_classifier(), Some(&path)).is_err());
}

// ========== Classify Command Tests ==========

#[test]
fn test_cmd_classify() {
    let classifier = setup_classifier();
    assert!(commands::cmd_classify(&classifier, "Metro Rail Pass", 1500.0, false).is_ok());
    assert!(commands::cmd_classify(&classifier, "Hardware Store", 900.0, true).is_ok());
}

#[test]
fn test_cmd_classify_rejects_bad_amount() {
    let classifier = setup_classifier();
    assert!(commands::cmd_classify(&classifier, "Metro Rail Pass", -10.0, false).is_err());
    assert!(commands::cmd_classify(&classifier, "Metro Rail Pass", 0.0, false).is_err());
    assert!(commands::cmd_classify(&classifier, "Metro Rail Pass", f64::NAN, false).is_err());
}

// ========== Transaction Command Tests ==========

#[test]
fn test_cmd_transactions() {
    let source = setup_sample();
    assert!(commands::cmd_transactions(&source, &TransactionFilter::default(), false).is_ok());
    assert!(commands::cmd_transactions(&source, &TransactionFilter::default(), true).is_ok());
}

#[test]
fn test_cmd_transactions_filtered_empty() {
    let source = setup_sample();
    let filter = TransactionFilter::new().search("no such merchant");
    assert!(commands::cmd_transactions(&source, &filter, false).is_ok());
}

// ========== Score Command Tests ==========

#[test]
fn test_cmd_score_esg_categories() {
    let source = setup_sample();
    assert!(commands::cmd_score(&source, false, false).is_ok());
    assert!(commands::cmd_score(&source, true, true).is_ok());
    assert!(commands::cmd_esg(&source, false).is_ok());
    assert!(commands::cmd_categories(&source, false).is_ok());
}

#[test]
fn test_cmd_score_empty_source() {
    let source = InMemorySource::default();
    assert!(commands::cmd_score(&source, false, false).is_ok());
    assert!(commands::cmd_categories(&source, false).is_ok());
    assert!(commands::cmd_insights(&source, false).is_ok());
}

// ========== Incentives Command Tests ==========

#[test]
fn test_cmd_incentives() {
    let source = setup_sample();
    assert!(commands::cmd_incentives(&source, None, false, false).is_ok());
    assert!(commands::cmd_incentives(&source, Some(0), false, false).is_ok());
    assert!(commands::cmd_incentives(&source, Some(100), false, true).is_ok());
    assert!(commands::cmd_incentives(&source, None, true, false).is_ok());
}

#[test]
fn test_cmd_incentives_rejects_out_of_range() {
    let source = setup_sample();
    assert!(commands::cmd_incentives(&source, Some(101), false, false).is_err());
    assert!(commands::cmd_incentives(&source, Some(-1), false, false).is_err());
}

// ========== Argument Parsing Tests ==========

#[test]
fn test_parse_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["greenscore", "score", "--json", "--data", "t.csv"]).unwrap();
    assert!(cli.json);
    assert_eq!(cli.data.as_deref(), Some(Path::new("t.csv")));
    assert!(matches!(cli.command, Commands::Score { skip_invalid: false }));
}

#[test]
fn test_parse_transactions_filter() {
    let cli = Cli::try_parse_from([
        "greenscore",
        "transactions",
        "--category",
        "transport",
        "--from",
        "2026-01-01",
    ])
    .unwrap();
    match cli.command {
        Commands::Transactions { category, from, .. } => {
            assert_eq!(category, Some(Category::Transport));
            assert_eq!(from, chrono::NaiveDate::from_ymd_opt(2026, 1, 1));
        }
        _ => panic!("expected transactions command"),
    }
}

#[test]
fn test_parse_rejects_unknown_category() {
    assert!(Cli::try_parse_from(["greenscore", "transactions", "--category", "Space"]).is_err());
}

#[test]
fn test_parse_serve_defaults() {
    let cli = Cli::try_parse_from(["greenscore", "serve"]).unwrap();
    match cli.command {
        Commands::Serve { port, host } => {
            assert_eq!(port, 8000);
            assert_eq!(host, "127.0.0.1");
        }
        _ => panic!("expected serve command"),
    }
}

// ========== Helper Tests ==========

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("hello world this is long", 10), "hello w...");
}

#[test]
fn test_truncate_multibyte() {
    assert_eq!(truncate("₹₹₹₹₹₹₹₹", 5), "₹₹...");
}

#[test]
fn test_signed() {
    assert_eq!(signed(5), "+5");
    assert_eq!(signed(-3), "-3");
    assert_eq!(signed(0), "0");
    assert_eq!(signed(30.5), "+30.5");
}
