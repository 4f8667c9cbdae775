//! Profile store: pluggable, trait-based persistence for user skill profiles.
//!
//! `PgProfileStore` when a database is configured, `InMemoryProfileStore` otherwise.
//! `AppState` holds an `Arc<dyn ProfileStore>`, chosen at startup.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::info;

use crate::errors::AppError;
use crate::models::profile::StoredProfile;

/// Profile fields supplied by the caller on store.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileData {
    pub weak_topics: Vec<String>,
    pub strong_topics: Vec<String>,
    pub total_solved: i64,
}

/// Key-value record store keyed by user id.
///
/// `put` overwrites any existing profile for the user but keeps its `created_at`.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, user_id: &str) -> Result<Option<StoredProfile>, AppError>;

    async fn put(&self, user_id: &str, data: ProfileData) -> Result<StoredProfile, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// PgProfileStore
// ────────────────────────────────────────────────────────────────────────────

pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn get(&self, user_id: &str) -> Result<Option<StoredProfile>, AppError> {
        let profile = sqlx::query_as::<_, StoredProfile>(
            r#"
            SELECT user_id, weak_topics, strong_topics, total_solved, created_at, updated_at
            FROM skill_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    async fn put(&self, user_id: &str, data: ProfileData) -> Result<StoredProfile, AppError> {
        let now = Utc::now();

        let profile = sqlx::query_as::<_, StoredProfile>(
            r#"
            INSERT INTO skill_profiles
                (user_id, weak_topics, strong_topics, total_solved, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            ON CONFLICT (user_id) DO UPDATE SET
                weak_topics = EXCLUDED.weak_topics,
                strong_topics = EXCLUDED.strong_topics,
                total_solved = EXCLUDED.total_solved,
                updated_at = EXCLUDED.updated_at
            RETURNING user_id, weak_topics, strong_topics, total_solved, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(&data.weak_topics)
        .bind(&data.strong_topics)
        .bind(data.total_solved)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        info!("Stored profile for user {user_id}");
        Ok(profile)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// InMemoryProfileStore
// ────────────────────────────────────────────────────────────────────────────

/// Process-local store. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<String, StoredProfile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get(&self, user_id: &str) -> Result<Option<StoredProfile>, AppError> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }

    async fn put(&self, user_id: &str, data: ProfileData) -> Result<StoredProfile, AppError> {
        let now = Utc::now();
        let mut profiles = self.profiles.write().await;
        let created_at = profiles
            .get(user_id)
            .map(|existing| existing.created_at)
            .unwrap_or(now);

        let profile = StoredProfile {
            user_id: user_id.to_string(),
            weak_topics: data.weak_topics,
            strong_topics: data.strong_topics,
            total_solved: data.total_solved,
            created_at,
            updated_at: now,
        };
        profiles.insert(user_id.to_string(), profile.clone());

        info!("Stored profile for user {user_id}");
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(total_solved: i64) -> ProfileData {
        ProfileData {
            weak_topics: vec!["Array".to_string(), "Dynamic Programming".to_string()],
            strong_topics: vec!["Hash Table".to_string()],
            total_solved,
        }
    }

    #[tokio::test]
    async fn test_get_missing_profile_is_none() {
        let store = InMemoryProfileStore::new();
        assert!(store.get("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let store = InMemoryProfileStore::new();
        let stored = store.put("user-1", data(150)).await.unwrap();
        assert_eq!(stored.user_id, "user-1");
        assert_eq!(stored.created_at, stored.updated_at);

        let fetched = store.get("user-1").await.unwrap().unwrap();
        assert_eq!(fetched, stored);
        assert_eq!(fetched.skill_profile().solved_count(), 150);
        assert_eq!(fetched.skill_profile().weak_topics.len(), 2);
    }

    #[tokio::test]
    async fn test_overwrite_keeps_created_at() {
        let store = InMemoryProfileStore::new();
        let first = store.put("user-1", data(10)).await.unwrap();
        let second = store.put("user-1", data(60)).await.unwrap();

        assert_eq!(second.created_at, first.created_at);
        assert!(second.updated_at >= first.updated_at);
        assert_eq!(store.get("user-1").await.unwrap().unwrap().total_solved, 60);
    }
}
