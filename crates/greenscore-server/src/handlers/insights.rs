//! Insight handlers

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::{AppError, AppState};
use greenscore_core::{insights, score, InsightsResult};

/// GET /api/insights - Highlights, recommendations and ESG insights
pub async fn get_insights(
    State(state): State<Arc<AppState>>,
) -> Result<Json<InsightsResult>, AppError> {
    let transactions = state.source.all();
    let scored = score(&transactions)?;
    Ok(Json(insights(&scored, &transactions)))
}
