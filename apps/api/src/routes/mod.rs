pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::profiles::handlers as profiles;
use crate::roadmap::handlers as roadmap;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Roadmap API
        .route("/api/v1/roadmaps", post(roadmap::handle_generate_roadmap))
        // Profile API
        .route("/api/v1/profiles", post(profiles::handle_store_profile))
        .route("/api/v1/profiles/:user_id", get(profiles::handle_get_profile))
        .route(
            "/api/v1/profiles/:user_id/roadmap",
            post(profiles::handle_profile_roadmap),
        )
        .with_state(state)
}
