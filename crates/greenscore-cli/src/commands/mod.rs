//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (classifier and transaction loading, JSON output)
//! - `classify` - Classify a single description
//! - `incentives` - Tier standing, simulated incentives, tier comparison
//! - `insights` - Highlights and recommendations
//! - `rules` - Active rule table listing
//! - `score` - GreenScore, ESG breakdown, category statistics
//! - `serve` - Web server command
//! - `transactions` - Transaction listing

pub mod classify;
pub mod core;
pub mod incentives;
pub mod insights;
pub mod rules;
pub mod score;
pub mod serve;
pub mod transactions;

// Re-export command functions for main.rs
pub use classify::*;
pub use core::*;
pub use incentives::*;
pub use insights::*;
pub use rules::*;
pub use score::*;
pub use serve::*;
pub use transactions::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Render an eco-impact with its sign
pub fn signed(impact: impl std::fmt::Display + PartialOrd + Default) -> String {
    if impact > Default::default() {
        format!("+{}", impact)
    } else {
        impact.to_string()
    }
}
