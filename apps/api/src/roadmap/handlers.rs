//! Axum route handlers for the Roadmap API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::Value;

use crate::errors::AppError;
use crate::roadmap::pipeline::RoadmapReport;
use crate::state::AppState;

/// POST /api/v1/roadmaps
///
/// Body: `{weak_topics: [string], total_solved: number}`.
/// Runs the full pipeline: classify → prompt → model → extract → validate.
pub async fn handle_generate_roadmap(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<RoadmapReport>, AppError> {
    let Json(body) = body?;
    let report = state.pipeline.handle(&body).await?;
    Ok(Json(report))
}
