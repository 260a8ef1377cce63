//! Status handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

/// Response for the status endpoint
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub transactions: usize,
    pub rules: usize,
    pub rule_source: String,
    pub cors_origins: usize,
}

/// GET /api/status - Liveness and loaded data summary
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        transactions: state.source.all().len(),
        rules: state.classifier.rules().len(),
        rule_source: state.classifier.source().to_string(),
        cors_origins: state.config.allowed_origins.len(),
    })
}
