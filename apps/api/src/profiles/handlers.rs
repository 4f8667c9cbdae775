//! Axum route handlers for the Profile API.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::profile::StoredProfile;
use crate::profiles::requests::{parse_store_request, require_user_id};
use crate::roadmap::pipeline::RoadmapReport;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub message: String,
    pub user_id: String,
    pub profile: StoredProfile,
}

/// POST /api/v1/profiles
///
/// Body: `{user_id, profile_data: {weak_topics, strong_topics, total_solved}}`.
pub async fn handle_store_profile(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ProfileResponse>, AppError> {
    let Json(body) = body?;
    let request = parse_store_request(&body)?;

    let profile = state.profiles.put(&request.user_id, request.data).await?;

    Ok(Json(ProfileResponse {
        status_code: 200,
        message: "Profile stored successfully".to_string(),
        user_id: request.user_id,
        profile,
    }))
}

/// GET /api/v1/profiles/:user_id
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = load_profile(&state, &user_id).await?;

    Ok(Json(ProfileResponse {
        status_code: 200,
        message: "Profile retrieved successfully".to_string(),
        user_id: profile.user_id.clone(),
        profile,
    }))
}

/// POST /api/v1/profiles/:user_id/roadmap
///
/// Loads the stored profile and feeds its weak topics and solved count to the pipeline.
pub async fn handle_profile_roadmap(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<RoadmapReport>, AppError> {
    let profile = load_profile(&state, &user_id).await?;
    let report = state.pipeline.run(profile.skill_profile()).await?;
    Ok(Json(report))
}

async fn load_profile(state: &AppState, user_id: &str) -> Result<StoredProfile, AppError> {
    let user_id = require_user_id(user_id)?;
    state
        .profiles
        .get(&user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile not found for user_id: {user_id}")))
}
