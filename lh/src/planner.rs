//! Plan assembly
//!
//! Acquires the root subject for a goal, then drives the expansion engine
//! until the whole tree has settled. This is the single entry point into
//! plan generation.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{Plan, Subject};
use crate::engine::{ExpansionEngine, PlanError, PlanTree};
use crate::llm::{CompletionRequest, LlmClient};
use crate::prompts::TaskBuilder;
use crate::reply::{self, SubjectReply};

/// Generates complete plans from free-text learning goals
pub struct Planner {
    llm: Arc<dyn LlmClient>,
    tasks: TaskBuilder,
    max_tokens: u32,
}

impl Planner {
    pub fn new(llm: Arc<dyn LlmClient>, tasks: TaskBuilder, max_tokens: u32) -> Self {
        Self { llm, tasks, max_tokens }
    }

    /// Generate a complete plan for a learning goal
    ///
    /// Fails without a partial result if any responder call, decode, or
    /// shape coercion anywhere in the tree fails.
    pub async fn create_plan(&self, goal: &str) -> Result<Plan, PlanError> {
        info!(%goal, "create_plan: requesting root subject");
        let root = self.root_subject(goal).await?;
        debug!(root_subject = %root.subject, "create_plan: root subject acquired");

        let tree = PlanTree::new(goal, root);
        let engine = ExpansionEngine::new(self.llm.clone(), self.tasks.clone(), self.max_tokens);
        engine.expand(&tree, Vec::new(), 1).await?;

        let plan = Plan::new(goal, tree.into_root());
        info!(plan_id = %plan.id, "create_plan: plan complete");
        Ok(plan)
    }

    /// Ask the responder for exactly one root subject
    ///
    /// The root's description and reason come from this step; its own
    /// expansion never revisits them.
    async fn root_subject(&self, goal: &str) -> Result<Subject, PlanError> {
        let prompt = self.tasks.root_subject_task(goal)?;
        let response = self.llm.complete(CompletionRequest::new(prompt, self.max_tokens)).await?;
        let decoded: SubjectReply = reply::decode_as(&response.content)?;
        Ok(Subject::new(decoded.subject, decoded.description, decoded.reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MAX_DECOMPOSITION_DEPTH;
    use crate::llm::client::mock::ScriptedClient;

    fn planner(client: Arc<ScriptedClient>) -> Planner {
        Planner::new(client, TaskBuilder::new(), 2048)
    }

    #[tokio::test]
    async fn test_create_plan_terminal_root() {
        let client = Arc::new(ScriptedClient::new(&[
            (
                "exactly one subject title",
                r#"{"subject": "X", "description": "d", "reason": "r"}"#,
            ),
            (r#"subject "X" is this subject"#, r#"{"answer": "resources/exercises"}"#),
            (
                r#"about the subject "X". If it does not"#,
                r#"{"resources": [{"title": "Book", "description": "intro"}], "exercises": []}"#,
            ),
        ]));

        let plan = planner(client).create_plan("Learn X").await.unwrap();

        assert_eq!(plan.goal, "Learn X");
        assert!(!plan.id.is_empty());
        assert_eq!(plan.subject.subject, "X");
        assert_eq!(plan.subject.description, "d");
        assert_eq!(plan.subject.reason, "r");
        assert!(plan.subject.subjects.is_empty());
        assert_eq!(plan.subject.resources.len(), 1);
        assert_eq!(plan.subject.resources[0].title, "Book");
        assert!(plan.subject.exercises.is_empty());
    }

    #[tokio::test]
    async fn test_create_plan_decomposed_root() {
        let client = Arc::new(ScriptedClient::new(&[
            ("exactly one subject title", r#"{"subject": "X"}"#),
            (r#"subject "X" is this subject"#, r#"{"answer": "topics"}"#),
            (
                r#"(sub-topics) related to "X""#,
                r#"{"subjects": [{"subject": "A"}, {"subject": "B"}]}"#,
            ),
            (r#"is this subject"#, r#"{"answer": "resources/exercises"}"#),
            (r#"If it does not"#, r#"{"resources": [], "exercises": []}"#),
        ]));

        let plan = planner(client).create_plan("Learn X").await.unwrap();

        assert_eq!(plan.subject.subjects.len(), 2);
        assert_eq!(plan.subject.subjects[0].subject, "A");
        assert_eq!(plan.subject.subjects[1].subject, "B");
        assert!(plan.subject.resources.is_empty());
    }

    #[tokio::test]
    async fn test_create_plan_fails_on_malformed_root_reply() {
        let client = Arc::new(ScriptedClient::new(&[("exactly one subject title", "no json here {")]));

        let err = planner(client).create_plan("Learn X").await.unwrap_err();
        assert!(matches!(err, PlanError::Decode(_)));
    }

    #[tokio::test]
    async fn test_create_plan_fails_on_deep_malformed_reply() {
        // Failure in a grandchild aborts the whole plan, no partial result
        let client = Arc::new(ScriptedClient::new(&[
            ("exactly one subject title", r#"{"subject": "X"}"#),
            (r#"subject "X" is this subject"#, r#"{"answer": "topics"}"#),
            (r#"(sub-topics) related to "X""#, r#"{"subjects": [{"subject": "A"}]}"#),
            (r#"subject "A" is this subject"#, r#"{"answer": "resources/exercises"}"#),
            (r#"about the subject "A". If it does not"#, "}{"),
        ]));

        let err = planner(client).create_plan("Learn X").await.unwrap_err();
        assert!(matches!(err, PlanError::Decode(_)));
    }

    #[tokio::test]
    async fn test_tree_never_exceeds_depth_bound() {
        // Every decide answer says "topics", every decomposition returns one
        // child with the same title; the depth bound must still cut off
        // further decomposition at depth 3.
        let client = Arc::new(ScriptedClient::new(&[
            ("exactly one subject title", r#"{"subject": "Deep"}"#),
            (r#"is this subject"#, r#"{"answer": "topics"}"#),
            (r#"(sub-topics) related to"#, r#"{"subjects": [{"subject": "Deep"}]}"#),
            (r#"If it does not"#, "{}"),
        ]));

        let plan = planner(client).create_plan("go deep").await.unwrap();

        let mut depth = 1;
        let mut node = &plan.subject;
        while let Some(child) = node.subjects.first() {
            node = child;
            depth += 1;
        }
        assert_eq!(depth, MAX_DECOMPOSITION_DEPTH);
        assert!(node.subjects.is_empty());
    }
}
