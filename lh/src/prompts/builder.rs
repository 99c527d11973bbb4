//! Task payload builder
//!
//! Renders the task template into the four request payloads the engine
//! issues. Every payload embeds the plan goal, the task instruction, and a
//! literal example of the expected reply shape; payloads issued after the
//! root subject exists also embed a serialized snapshot of the tree so far,
//! so the responder does not repeat subjects it already produced.

use std::path::Path;

use handlebars::{Handlebars, RenderError};
use serde::Serialize;
use tracing::debug;

use super::embedded;

/// Role preamble sent with every task
pub const AI_ROLE: &str = "You are a professor and a tutor. Your role is to create a custom \
     curriculum and course for your user to achieve a goal. Your decisions must always be made \
     independently without seeking user assistance. Play to your strengths as an LLM and pursue \
     simple strategies with no legal complications.";

const CONSTRAINTS: &str = "1. ~4000 word limit for short term memory. Your short term memory is \
     short, so immediately save important information to files.\n\
     2. No user assistance\n\
     3. Refer to the user in the second person as \"you\"";

/// Decide answer that routes a subject to decomposition
pub const TOPICS: &str = "topics";

/// Decide answer that routes a subject to resources and exercises
pub const RESOURCES_AND_EXERCISES: &str = "resources/exercises";

/// Reply shape example for decide questions
pub const ANSWER_FORMAT: &str = r#"{
    "answer": "answer"
}"#;

/// Reply shape example for the root subject request
pub const SUBJECT_FORMAT: &str = r#"{
    "subject": "subject",
    "description": "description",
    "reason": "reason"
}"#;

/// Reply shape example for decomposition requests
pub const SUBJECT_LIST_FORMAT: &str = r#"{
    "subjects": [
        {
            "subject": "subject",
            "description": "description",
            "reason": "reason"
        }
    ]
}"#;

/// Reply shape example for terminalize requests
pub const RESOURCES_AND_EXERCISES_FORMAT: &str = r#"{
    "resources": [
        {
            "title": "resource title",
            "description": "resource description"
        }
    ],
    "exercises": [
        {
            "description": "exercise description"
        }
    ]
}"#;

const ROOT_SUBJECT_TASK: &str = "Provide exactly one subject title based on what the user wants to learn.";

/// Context rendered into the task template
#[derive(Debug, Clone, Serialize)]
pub struct TaskContext {
    pub ai_role: String,
    pub user_goal: String,
    pub ai_task: String,
    pub constraints: String,
    pub json_response_format: String,
}

/// Builds the textual task payloads sent to the responder
#[derive(Debug, Clone)]
pub struct TaskBuilder {
    template: String,
}

impl TaskBuilder {
    /// Builder using the embedded task template
    pub fn new() -> Self {
        Self {
            template: embedded::TASK.to_string(),
        }
    }

    /// Builder that prefers `<dir>/task.pmt` over the embedded template
    pub fn with_override(dir: impl AsRef<Path>) -> Self {
        let path = dir.as_ref().join("task.pmt");
        match std::fs::read_to_string(&path) {
            Ok(template) => {
                debug!(?path, "TaskBuilder::with_override: using template override");
                Self { template }
            }
            Err(_) => {
                debug!(?path, "TaskBuilder::with_override: no override, using embedded");
                Self::new()
            }
        }
    }

    fn render(&self, goal: &str, task: String, response_format: &str) -> Result<String, RenderError> {
        let context = TaskContext {
            ai_role: AI_ROLE.to_string(),
            user_goal: goal.to_string(),
            ai_task: task,
            constraints: CONSTRAINTS.to_string(),
            json_response_format: response_format.to_string(),
        };
        Handlebars::new().render_template(&self.template, &context)
    }

    fn with_context(snapshot: &str, task: &str) -> String {
        format!("Remember the subjects you've already been provided:\n{snapshot}\n\n{task}")
    }

    /// Root subject request: no snapshot yet, the tree is empty
    pub fn root_subject_task(&self, goal: &str) -> Result<String, RenderError> {
        debug!(%goal, "root_subject_task: called");
        self.render(goal, ROOT_SUBJECT_TASK.to_string(), SUBJECT_FORMAT)
    }

    /// Decide question: split this subject into topics, or terminalize it?
    pub fn decide_task(&self, goal: &str, title: &str, snapshot: &str) -> Result<String, RenderError> {
        debug!(%title, "decide_task: called");
        let question = format!(
            "For the user to learn about the subject \"{title}\" is this subject large or \
             important enough to be broken down into discrete topics or should the user go \
             straight to resources and exercises? Answer with either \"{TOPICS}\" or \
             \"{RESOURCES_AND_EXERCISES}\" below"
        );
        self.render(goal, Self::with_context(snapshot, &question), ANSWER_FORMAT)
    }

    /// Decomposition request: list child subjects for this subject
    pub fn child_subjects_task(&self, goal: &str, title: &str, snapshot: &str) -> Result<String, RenderError> {
        debug!(%title, "child_subjects_task: called");
        let task = format!(
            "Provide a list of subjects (sub-topics) related to \"{title}\" that the user should \
             learn in order to achieve the above goal along with a description of the topic and \
             reason why that topic is important."
        );
        self.render(goal, Self::with_context(snapshot, &task), SUBJECT_LIST_FORMAT)
    }

    /// Terminalize request: list resources and exercises for this subject
    pub fn resources_task(&self, goal: &str, title: &str, snapshot: &str) -> Result<String, RenderError> {
        debug!(%title, "resources_task: called");
        let task = format!(
            "Generate a list of resources and exercises for the user to learn about the subject \
             \"{title}\". If it does not make sense to add either resources or exercises, leave \
             it empty."
        );
        self.render(goal, Self::with_context(snapshot, &task), RESOURCES_AND_EXERCISES_FORMAT)
    }
}

impl Default for TaskBuilder {
    fn default() -> Self {
        Self::new()
    }
}
