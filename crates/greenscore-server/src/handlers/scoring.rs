//! Scoring handlers

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use tracing::debug;

use crate::{AppError, AppState};
use greenscore_core::{
    category_summary, esg_breakdown, score, Category, CategoryStats, EsgScores, MalformedPolicy,
    ScoreResult, ScoringEngine, Transaction,
};

/// Request body for scoring an arbitrary batch
#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub transactions: Vec<Transaction>,
    /// Skip malformed transactions instead of rejecting the batch
    #[serde(default)]
    pub skip_invalid: bool,
}

/// GET /api/score - GreenScore of the loaded transactions
pub async fn get_score(State(state): State<Arc<AppState>>) -> Result<Json<ScoreResult>, AppError> {
    let result = score(&state.source.all())?;
    Ok(Json(result))
}

/// POST /api/score - GreenScore of the posted transactions
///
/// An out-of-range eco-impact or non-positive amount rejects the batch
/// with 400 unless `skip_invalid` is set.
pub async fn score_transactions(
    body: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Json<ScoreResult>, AppError> {
    let Json(req) = body?;
    let policy = if req.skip_invalid {
        MalformedPolicy::Skip
    } else {
        MalformedPolicy::Reject
    };
    debug!(count = req.transactions.len(), ?policy, "Scoring posted batch");

    let result = ScoringEngine::with_policy(policy).score(&req.transactions)?;
    Ok(Json(result))
}

/// GET /api/esg-breakdown - ESG axis scores
pub async fn get_esg_breakdown(
    State(state): State<Arc<AppState>>,
) -> Result<Json<EsgScores>, AppError> {
    let esg = esg_breakdown(&state.source.all())?;
    Ok(Json(esg))
}

/// GET /api/categories - Per-category statistics
pub async fn get_categories(
    State(state): State<Arc<AppState>>,
) -> Json<BTreeMap<Category, CategoryStats>> {
    Json(category_summary(&state.source.all()))
}
