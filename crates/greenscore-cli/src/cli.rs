//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use greenscore_core::Category;

/// GreenScore - Sustainability credit scoring from your transactions
#[derive(Parser)]
#[command(name = "greenscore")]
#[command(about = "Score the sustainability of your spending", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Classification rule table (TOML)
    ///
    /// Falls back to GREENSCORE_RULES, then the override in the data
    /// directory, then the built-in rules.
    #[arg(long, global = true)]
    pub rules: Option<PathBuf>,

    /// Transaction file (CSV or JSON); the built-in sample set when omitted
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify a single transaction description
    Classify {
        /// Transaction description (e.g. "Metro Rail Pass")
        description: String,

        /// Transaction amount (must be positive)
        #[arg(short, long)]
        amount: f64,
    },

    /// List classified transactions
    Transactions {
        /// Only this category (Transport, Food, Shopping, ...)
        #[arg(short, long)]
        category: Option<Category>,

        /// Case-insensitive text in description or merchant
        #[arg(short, long)]
        search: Option<String>,

        /// Earliest date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Latest date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Compute the GreenScore
    Score {
        /// Skip malformed transactions instead of failing
        #[arg(long)]
        skip_invalid: bool,
    },

    /// Show the Environmental/Social/Governance breakdown
    Esg,

    /// Show per-category statistics
    Categories,

    /// Show highlights and recommendations
    Insights,

    /// Show the incentive tier and simulated benefits
    Incentives {
        /// Use this score instead of scoring the transactions
        #[arg(long)]
        score: Option<i64>,

        /// Compare all tiers side by side
        #[arg(long)]
        compare: bool,
    },

    /// List the active classification rules
    Rules,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}
