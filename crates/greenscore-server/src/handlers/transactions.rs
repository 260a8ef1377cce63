//! Transaction handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState};
use greenscore_core::{ClassificationResult, Transaction, TransactionFilter};

/// GET /api/transactions - List transactions, newest first
///
/// Query: `category` (e.g. `Transport`), `search`, `from`, `to` (YYYY-MM-DD).
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<TransactionFilter>,
) -> Json<Vec<Transaction>> {
    Json(state.source.list_transactions(&filter))
}

/// GET /api/transactions/:id - Get a single transaction
pub async fn get_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Transaction>, AppError> {
    let tx = state
        .source
        .get_transaction(&id)
        .ok_or_else(|| AppError::not_found(&format!("Transaction {} not found", id)))?;
    Ok(Json(tx))
}

/// Request body for classifying a description
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub description: String,
    pub amount: f64,
}

/// POST /api/classify - Classify one description
pub async fn classify(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ClassifyRequest>, JsonRejection>,
) -> Result<Json<ClassificationResult>, AppError> {
    let Json(req) = body?;
    let result = state.classifier.classify(&req.description, req.amount)?;
    Ok(Json(result))
}
