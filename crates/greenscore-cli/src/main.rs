//! GreenScore CLI - Sustainability credit scoring
//!
//! Usage:
//!   greenscore score                       Score the sample transactions
//!   greenscore --data txns.csv insights    Insights for your own file
//!   greenscore classify "Metro Pass" -a 50 Classify one description
//!   greenscore serve --port 8000           Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use greenscore_core::TransactionFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let classifier = commands::load_classifier(cli.rules.as_deref())?;
    let data = cli.data.as_deref();
    let source = || commands::load_source(&classifier, data);

    match cli.command {
        Commands::Classify {
            description,
            amount,
        } => commands::cmd_classify(&classifier, &description, amount, cli.json),
        Commands::Transactions {
            category,
            search,
            from,
            to,
        } => {
            let filter = TransactionFilter {
                category,
                search,
                from,
                to,
            };
            commands::cmd_transactions(&source()?, &filter, cli.json)
        }
        Commands::Score { skip_invalid } => commands::cmd_score(&source()?, skip_invalid, cli.json),
        Commands::Esg => commands::cmd_esg(&source()?, cli.json),
        Commands::Categories => commands::cmd_categories(&source()?, cli.json),
        Commands::Insights => commands::cmd_insights(&source()?, cli.json),
        Commands::Incentives { score, compare } => {
            commands::cmd_incentives(&source()?, score, compare, cli.json)
        }
        Commands::Rules => commands::cmd_rules(&classifier, cli.json),
        Commands::Serve { port, host } => {
            let source = source()?;
            commands::cmd_serve(classifier, source, data, &host, port).await
        }
    }
}
