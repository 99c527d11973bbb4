//! LearnHub - recursive curriculum plan generator
//!
//! Turns a free-text learning goal into a hierarchical curriculum: a tree of
//! subjects, each either decomposed into sub-subjects or terminated with
//! concrete resources and exercises. Expansion is recursive and concurrent;
//! sibling subtrees grow in parallel and join before their parent settles.
//!
//! # Modules
//!
//! - [`domain`] - Plan/Subject data model
//! - [`reply`] - repair and decoding of responder output
//! - [`prompts`] - task payload construction
//! - [`llm`] - responder adapter (OpenAI implementation)
//! - [`engine`] - subject expansion state machine
//! - [`planner`] - plan assembly entry point
//! - [`render`] - Markdown presentation
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod llm;
pub mod planner;
pub mod prompts;
pub mod render;
pub mod reply;

// Re-export commonly used types
pub use config::{Config, LlmConfig, StorageConfig};
pub use domain::{Exercise, Plan, Resource, Subject};
pub use engine::{ExpansionEngine, MAX_DECOMPOSITION_DEPTH, Outcome, PlanError, PlanTree};
pub use llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError, OpenAIClient, create_client};
pub use planner::Planner;
pub use prompts::TaskBuilder;
pub use render::render_markdown;
pub use reply::{
    AnswerReply, DecodeError, ExerciseReply, ReplyError, ResourceExerciseReply, ResourceReply, SchemaError,
    SubjectListReply, SubjectReply,
};
