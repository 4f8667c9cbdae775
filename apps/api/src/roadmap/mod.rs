// Roadmap generation: turns a skill profile into a validated multi-day study plan.
// All model calls go through llm_client::ModelInvoker, no direct HTTP calls here.

pub mod extractor;
pub mod handlers;
pub mod input;
pub mod level;
pub mod models;
pub mod pipeline;
pub mod prompts;
pub mod validator;
