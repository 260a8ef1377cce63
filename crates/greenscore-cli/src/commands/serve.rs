//! Server command implementation

use std::path::Path;

use anyhow::Result;
use greenscore_core::{Classifier, InMemorySource};

pub async fn cmd_serve(
    classifier: Classifier,
    source: InMemorySource,
    data: Option<&Path>,
    host: &str,
    port: u16,
) -> Result<()> {
    println!("🚀 Starting GreenScore web server...");
    match data {
        Some(path) => println!("   Data: {} ({} transactions)", path.display(), source.len()),
        None => println!("   Data: built-in sample set ({} transactions)", source.len()),
    }
    println!("   Rules: {} ({} rules)", classifier.source(), classifier.rules().len());
    println!("   Listening: http://{}:{}/api", host, port);

    // Comma-separated origins allowed by CORS
    let allowed_origins: Vec<String> = std::env::var("GREENSCORE_ALLOWED_ORIGINS")
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if !allowed_origins.is_empty() {
        println!(
            "   🌐 CORS origins: {} (GREENSCORE_ALLOWED_ORIGINS)",
            allowed_origins.join(", ")
        );
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let config = greenscore_server::ServerConfig { allowed_origins };
    greenscore_server::serve_with_config(classifier, source, host, port, config).await?;

    Ok(())
}
