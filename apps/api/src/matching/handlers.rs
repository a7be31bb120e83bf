//! Axum route handlers for the Match API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::engine::MatchOutcome;
use crate::models::matching::MatchSummary;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub recruiter_id: Uuid,
}

/// POST /api/v1/match/run/:resume_id
pub async fn handle_run_match(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<MatchOutcome>, AppError> {
    let outcome = state.engine.run_match(resume_id).await?;
    Ok(Json(outcome))
}

/// GET /api/v1/match/history?recruiter_id=
pub async fn handle_match_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<Vec<MatchSummary>>, AppError> {
    let history = state.engine.history(params.recruiter_id).await?;
    Ok(Json(history))
}
