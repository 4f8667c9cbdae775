use std::sync::Arc;

use crate::profiles::store::ProfileStore;
use crate::roadmap::pipeline::RoadmapPipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Postgres-backed when DATABASE_URL is set, in-memory otherwise.
    pub profiles: Arc<dyn ProfileStore>,
    pub pipeline: Arc<RoadmapPipeline>,
}
