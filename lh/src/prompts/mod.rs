//! Task payload construction
//!
//! Builds the textual tasks sent to the responder for each request kind.

mod builder;
pub mod embedded;

pub use builder::{
    AI_ROLE, ANSWER_FORMAT, RESOURCES_AND_EXERCISES, RESOURCES_AND_EXERCISES_FORMAT, SUBJECT_FORMAT,
    SUBJECT_LIST_FORMAT, TOPICS, TaskBuilder, TaskContext,
};
