//! Plan domain types
//!
//! A Plan is a learning goal plus a tree of Subjects. Each Subject either
//! decomposes into child subjects or terminates with concrete resources and
//! exercises. The serde field names here are the persisted representation.

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Generate a fresh opaque identifier
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// A learning resource attached to a terminal subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    pub description: String,
}

/// An exercise attached to a terminal subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub description: String,
}

/// One node of the curriculum tree
///
/// A subject is either decomposed (`subjects` non-empty) or terminal
/// (`resources`/`exercises` populated); a single expansion step never
/// produces both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Unique identifier, assigned at creation
    #[serde(default = "generate_id")]
    pub id: String,

    /// Short subject title
    pub subject: String,

    /// What this subject covers
    #[serde(default)]
    pub description: String,

    /// Why this subject matters for the goal
    #[serde(default)]
    pub reason: String,

    /// Child subjects, in the order the decomposition step returned them
    #[serde(default)]
    pub subjects: Vec<Subject>,

    /// Resources, populated only for terminal subjects
    #[serde(default)]
    pub resources: Vec<Resource>,

    /// Exercises, populated only for terminal subjects
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

impl Subject {
    /// Create a subject with a fresh id and no children or resources
    pub fn new(title: impl Into<String>, description: impl Into<String>, reason: impl Into<String>) -> Self {
        let title = title.into();
        debug!(%title, "Subject::new: called");
        Self {
            id: generate_id(),
            subject: title,
            description: description.into(),
            reason: reason.into(),
            subjects: Vec::new(),
            resources: Vec::new(),
            exercises: Vec::new(),
        }
    }

    /// Serialize this subject tree for use as responder context
    ///
    /// Best-effort: the snapshot steers the responder away from topics it
    /// already produced, so a stale or empty snapshot degrades output
    /// quality but not correctness.
    pub fn snapshot(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            debug!(error = %e, "Subject::snapshot: serialization failed");
            String::new()
        })
    }
}

/// The complete generated curriculum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Unique identifier, assigned at creation
    #[serde(default = "generate_id")]
    pub id: String,

    /// The original free-text learning goal
    pub goal: String,

    /// Root of the subject tree
    pub subject: Subject,
}

impl Plan {
    /// Create a plan with a fresh id
    pub fn new(goal: impl Into<String>, subject: Subject) -> Self {
        let goal = goal.into();
        debug!(%goal, "Plan::new: called");
        Self {
            id: generate_id(),
            goal,
            subject,
        }
    }
}
