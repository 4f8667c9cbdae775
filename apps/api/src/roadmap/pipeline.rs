//! Roadmap pipeline: orchestrates a single roadmap generation.
//!
//! Flow: validate input → classify level → build prompt → invoke model →
//!       extract payload → validate envelope → report.
//!
//! Strictly linear. No stage retries, and the model is called at most once per run.
//! Collaborators are injected at construction; the pipeline holds no per-call state.

use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::FutureExt;
use serde::Serialize;
use serde_json::{Number, Value};
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::llm_client::ModelInvoker;
use crate::roadmap::extractor::ResponseExtractor;
use crate::roadmap::input::parse_roadmap_request;
use crate::roadmap::level::classify;
use crate::roadmap::models::{Roadmap, SkillProfile, UserLevel};
use crate::roadmap::prompts::build_prompt;
use crate::roadmap::validator::validate;

pub const SUCCESS_MESSAGE: &str = "Learning roadmap generated successfully";

/// Where a pipeline run currently is. `Success` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Classifying,
    Prompting,
    Invoking,
    Extracting,
    Validating,
    Success,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Successful pipeline output: the roadmap plus the echoed input.
#[derive(Debug, Clone, Serialize)]
pub struct RoadmapReport {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub message: String,
    pub user_level: UserLevel,
    pub total_solved: Number,
    pub weak_topics: Vec<String>,
    pub roadmap: Roadmap,
    pub generated_at: DateTime<Utc>,
}

pub struct RoadmapPipeline {
    invoker: Arc<dyn ModelInvoker>,
    extractor: Arc<dyn ResponseExtractor>,
}

impl RoadmapPipeline {
    pub fn new(invoker: Arc<dyn ModelInvoker>, extractor: Arc<dyn ResponseExtractor>) -> Self {
        Self { invoker, extractor }
    }

    /// Entry point for untyped request bodies. Shape errors never reach the model.
    pub async fn handle(&self, body: &Value) -> Result<RoadmapReport, AppError> {
        let profile = parse_roadmap_request(body).inspect_err(|e| {
            warn!(kind = e.kind(), "Roadmap request rejected: {e}");
        })?;
        self.run(profile).await
    }

    /// Runs every stage for an already-typed profile.
    ///
    /// This is the single place failures are caught: a panicking stage becomes
    /// `AppError::Internal`, and every failure is logged once with the stage it hit.
    pub async fn run(&self, profile: SkillProfile) -> Result<RoadmapReport, AppError> {
        let mut stage = Stage::Idle;

        let outcome = AssertUnwindSafe(self.execute(&profile, &mut stage))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| {
                Err(AppError::Internal(anyhow::anyhow!(
                    "roadmap pipeline panicked: {}",
                    panic_message(&*panic)
                )))
            });

        match outcome {
            Ok((user_level, roadmap)) => {
                advance(&mut stage, Stage::Success);
                info!(
                    "Generated {user_level} roadmap for {} weak topic(s), {} solved",
                    profile.weak_topics.len(),
                    profile.total_solved
                );
                Ok(RoadmapReport {
                    status_code: 200,
                    message: SUCCESS_MESSAGE.to_string(),
                    user_level,
                    total_solved: profile.total_solved,
                    weak_topics: profile.weak_topics,
                    roadmap,
                    generated_at: Utc::now(),
                })
            }
            Err(e) => {
                warn!(kind = e.kind(), failed_in = %stage, "Roadmap pipeline failed: {e}");
                advance(&mut stage, Stage::Failed);
                Err(e)
            }
        }
    }

    async fn execute(
        &self,
        profile: &SkillProfile,
        stage: &mut Stage,
    ) -> Result<(UserLevel, Roadmap), AppError> {
        if profile.weak_topics.is_empty() {
            return Err(AppError::Validation(
                "weak_topics is required and cannot be empty".to_string(),
            ));
        }

        advance(stage, Stage::Classifying);
        let user_level = classify(profile.solved_count());

        advance(stage, Stage::Prompting);
        let prompt = build_prompt(&profile.weak_topics, user_level);

        advance(stage, Stage::Invoking);
        let reply = self
            .invoker
            .invoke(&prompt)
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        advance(stage, Stage::Extracting);
        let candidate = self.extractor.extract(&reply);

        advance(stage, Stage::Validating);
        let roadmap = validate(candidate).inspect_err(|_| {
            debug!("Raw model reply: {reply}");
        })?;

        match roadmap.day_plans() {
            Ok(days) => debug!("Roadmap has {} fully-formed day(s)", days.len()),
            Err(e) => debug!("Roadmap days deviate from the requested schema: {e}"),
        }

        Ok((user_level, roadmap))
    }
}

fn advance(stage: &mut Stage, next: Stage) {
    debug!(from = %stage, to = %next, "roadmap pipeline transition");
    *stage = next;
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}
