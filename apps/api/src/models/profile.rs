use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::roadmap::models::SkillProfile;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct StoredProfile {
    pub user_id: String,
    pub weak_topics: Vec<String>,
    pub strong_topics: Vec<String>,
    pub total_solved: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredProfile {
    /// The subset of the profile the roadmap pipeline consumes.
    pub fn skill_profile(&self) -> SkillProfile {
        SkillProfile {
            weak_topics: self.weak_topics.clone(),
            total_solved: self.total_solved.into(),
        }
    }
}
