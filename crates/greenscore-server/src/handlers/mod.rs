//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod incentives;
pub mod insights;
pub mod scoring;
pub mod status;
pub mod transactions;

// Re-export all handlers for use in router
pub use incentives::*;
pub use insights::*;
pub use scoring::*;
pub use status::*;
pub use transactions::*;
