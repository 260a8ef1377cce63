//! Incentive handlers
//!
//! All incentives are simulated; every report carries the disclaimer.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{AppError, AppState};
use greenscore_core::{
    eligible_incentives, incentives::TierComparison, score, tier_and_progress, tier_comparison,
    IncentiveReport, TierStanding,
};

/// GET /api/incentives - Tier and incentives for the loaded transactions
pub async fn get_incentives(
    State(state): State<Arc<AppState>>,
) -> Result<Json<IncentiveReport>, AppError> {
    let scored = score(&state.source.all())?;
    let report = eligible_incentives(i64::from(scored.green_score))?;
    Ok(Json(report))
}

/// GET /api/incentives/comparison - Every tier against every incentive
pub async fn get_tier_comparison() -> Json<Vec<TierComparison>> {
    Json(tier_comparison())
}

/// GET /api/tiers/:score - Tier and progress for a score in [0, 100]
pub async fn get_tier(Path(green_score): Path<i64>) -> Result<Json<TierStanding>, AppError> {
    let standing = tier_and_progress(green_score)?;
    Ok(Json(standing))
}
