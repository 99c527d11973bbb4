//! End-to-end plan generation tests
//!
//! Drives the public Planner API with a scripted responder, then round-trips
//! the result through the plan store and the Markdown renderer.

use std::sync::Arc;

use async_trait::async_trait;
use learnhub::{
    CompletionRequest, CompletionResponse, LlmClient, LlmError, Plan, Planner, TaskBuilder, render_markdown,
};
use planstore::PlanStore;
use tempfile::TempDir;

/// Responder scripted on prompt substrings; sibling expansions interleave
/// nondeterministically, so replies cannot be keyed on call order.
struct ScriptedResponder {
    rules: Vec<(&'static str, &'static str)>,
}

#[async_trait]
impl LlmClient for ScriptedResponder {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        for (needle, reply) in &self.rules {
            if request.prompt.contains(needle) {
                return Ok(CompletionResponse {
                    content: reply.to_string(),
                });
            }
        }
        Err(LlmError::InvalidResponse("no scripted reply for prompt".to_string()))
    }
}

fn scripted_planner(rules: Vec<(&'static str, &'static str)>) -> Planner {
    Planner::new(Arc::new(ScriptedResponder { rules }), TaskBuilder::new(), 2048)
}

fn two_level_rules() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "exactly one subject title",
            r#"{"subject": "Neural Networks", "description": "nets", "reason": "the goal"}"#,
        ),
        (r#"subject "Neural Networks" is this subject"#, r#"{"answer": "topics"}"#),
        (
            r#"(sub-topics) related to "Neural Networks""#,
            r#"{"subjects": [{"subject": "Linear Algebra", "description": "vectors", "reason": "prerequisite"}, {"subject": "Backpropagation"}]}"#,
        ),
        (
            r#"subject "Linear Algebra" is this subject"#,
            r#"{"answer": "resources/exercises"}"#,
        ),
        (
            r#"subject "Backpropagation" is this subject"#,
            r#"{"answer": "resources/exercises"}"#,
        ),
        (
            r#"about the subject "Linear Algebra". If it does not"#,
            r#"{"resources": [{"title": "Book", "description": "intro"},], "exercises": []}"#,
        ),
        (
            r#"about the subject "Backpropagation". If it does not"#,
            r#"{"exercises": [{"description": "derive the chain rule"}]}"#,
        ),
    ]
}

#[tokio::test]
async fn test_full_plan_generation() {
    let planner = scripted_planner(two_level_rules());
    let plan = planner.create_plan("learn neural networks").await.unwrap();

    assert_eq!(plan.goal, "learn neural networks");
    assert_eq!(plan.subject.subject, "Neural Networks");
    assert_eq!(plan.subject.description, "nets");
    assert_eq!(plan.subject.subjects.len(), 2);

    let algebra = &plan.subject.subjects[0];
    assert_eq!(algebra.subject, "Linear Algebra");
    // The scripted resource reply carries a trailing comma; repair handles it
    assert_eq!(algebra.resources.len(), 1);
    assert_eq!(algebra.resources[0].title, "Book");

    let backprop = &plan.subject.subjects[1];
    assert_eq!(backprop.subject, "Backpropagation");
    assert!(backprop.resources.is_empty());
    assert_eq!(backprop.exercises.len(), 1);
}

#[tokio::test]
async fn test_plan_survives_store_round_trip() {
    let planner = scripted_planner(two_level_rules());
    let plan = planner.create_plan("learn neural networks").await.unwrap();

    let dir = TempDir::new().unwrap();
    let store = PlanStore::open(dir.path()).unwrap();
    store.save(&plan.id, &plan).unwrap();

    let loaded: Plan = store.load(&plan.id).unwrap();
    assert_eq!(loaded, plan);
    assert_eq!(store.list().unwrap(), vec![plan.id.clone()]);
}

#[tokio::test]
async fn test_generated_plan_renders_as_markdown() {
    let planner = scripted_planner(two_level_rules());
    let plan = planner.create_plan("learn neural networks").await.unwrap();

    let md = render_markdown(&plan, "gpt-3.5-turbo");
    assert!(md.starts_with("# Learning Hub: Neural Networks"));
    assert!(md.contains("> learn neural networks"));
    assert!(md.contains(" * [Neural Networks](#neural-networks)"));
    assert!(md.contains("   * [Linear Algebra](#linear-algebra)"));
    assert!(md.contains("## Linear Algebra"));
    assert!(md.contains("* Book: intro"));
    assert!(md.contains("* derive the chain rule"));
}

#[tokio::test]
async fn test_responder_failure_fails_whole_plan() {
    // The terminalize reply for one child is missing entirely; generation
    // must fail rather than return a partial plan.
    let mut rules = two_level_rules();
    rules.retain(|(needle, _)| !needle.contains("Backpropagation\". If it does not"));

    let planner = scripted_planner(rules);
    let result = planner.create_plan("learn neural networks").await;
    assert!(result.is_err());
}
