//! Subject expansion engine
//!
//! Visits each subject and decides its fate: decompose into child subjects
//! or terminalize with resources and exercises. Decomposed children expand
//! concurrently; a node is complete only once its whole subtree is complete.

use std::sync::Arc;

use futures::future::{BoxFuture, try_join_all};
use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{Exercise, Resource, Subject};
use crate::llm::{CompletionRequest, LlmClient, LlmError};
use crate::prompts::{TOPICS, TaskBuilder};
use crate::reply::{self, AnswerReply, DecodeError, ReplyError, ResourceExerciseReply, SchemaError, SubjectListReply};

/// Depth at which subjects are terminalized without asking
///
/// The root is visited at depth 1 and the decide question is only asked
/// below this bound, so at most two levels of decomposition questions are
/// ever issued. This bounds total tree size and total responder calls.
pub const MAX_DECOMPOSITION_DEPTH: u32 = 3;

/// Errors that abort plan generation
///
/// None of these are recovered locally: a failure anywhere in the subtree
/// cancels the sibling expansions still in flight and surfaces to the
/// caller. Missing optional reply keys are empty results, not errors.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The responder call itself failed
    #[error("responder call failed: {0}")]
    Transport(#[from] LlmError),

    /// Responder output unparseable even after repair
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Responder output parsed but did not match the expected shape
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The task template failed to render
    #[error("failed to render task template: {0}")]
    Template(#[from] handlebars::RenderError),
}

impl From<ReplyError> for PlanError {
    fn from(err: ReplyError) -> Self {
        match err {
            ReplyError::Decode(e) => PlanError::Decode(e),
            ReplyError::Schema(e) => PlanError::Schema(e),
        }
    }
}

/// Outcome of the decide step for one subject
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Split the subject into child subjects
    Decompose,
    /// Attach resources and exercises
    Terminalize,
}

impl Outcome {
    /// Map a decide answer onto an outcome
    ///
    /// Anything other than the "topics" sentinel terminalizes the subject;
    /// unexpected answers are the default branch, not an error.
    pub fn from_answer(answer: &str) -> Self {
        if answer == TOPICS { Outcome::Decompose } else { Outcome::Terminalize }
    }
}

/// The plan being grown, shared across in-flight expansion tasks
///
/// Every in-flight task serializes the live root as request context, so the
/// tree sits behind a mutex. Writes stay disjoint: each node is written only
/// by the expansion call that owns its path, so the lock is held for single
/// reads and writes, never across an await.
#[derive(Clone)]
pub struct PlanTree {
    goal: Arc<String>,
    root: Arc<Mutex<Subject>>,
}

impl PlanTree {
    pub fn new(goal: impl Into<String>, root: Subject) -> Self {
        Self {
            goal: Arc::new(goal.into()),
            root: Arc::new(Mutex::new(root)),
        }
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    /// Serialize the root subject as it currently stands
    ///
    /// Sibling subtrees may be appending while this runs; the snapshot is
    /// best-effort context, not a consistent read.
    pub fn snapshot(&self) -> String {
        self.root.lock().snapshot()
    }

    /// Run `f` against the node addressed by `path` (child indices from the
    /// root). Paths only ever come from children this engine attached, so
    /// they are valid by construction.
    fn with_node<R>(&self, path: &[usize], f: impl FnOnce(&mut Subject) -> R) -> R {
        let mut root = self.root.lock();
        let mut node = &mut *root;
        for &idx in path {
            node = &mut node.subjects[idx];
        }
        f(node)
    }

    /// Title of the node at `path`
    fn title_at(&self, path: &[usize]) -> String {
        self.with_node(path, |node| node.subject.clone())
    }

    /// Take the finished tree back out of the shared handle
    pub fn into_root(self) -> Subject {
        match Arc::try_unwrap(self.root) {
            Ok(mutex) => mutex.into_inner(),
            Err(shared) => shared.lock().clone(),
        }
    }
}

/// Expands subjects by querying the responder
pub struct ExpansionEngine {
    llm: Arc<dyn LlmClient>,
    tasks: TaskBuilder,
    max_tokens: u32,
}

impl ExpansionEngine {
    pub fn new(llm: Arc<dyn LlmClient>, tasks: TaskBuilder, max_tokens: u32) -> Self {
        Self { llm, tasks, max_tokens }
    }

    /// Expand the node at `path`, recursing into any children it produces
    ///
    /// Returns once the entire subtree below the node has settled. Children
    /// run concurrently and are joined here; if any child fails, its
    /// unfinished siblings are dropped along with the join.
    pub fn expand<'a>(&'a self, plan: &'a PlanTree, path: Vec<usize>, depth: u32) -> BoxFuture<'a, Result<(), PlanError>> {
        Box::pin(async move {
            let title = plan.title_at(&path);
            debug!(%title, depth, "expand: visiting subject");

            let outcome = if depth < MAX_DECOMPOSITION_DEPTH {
                self.decide(plan, &title).await?
            } else {
                debug!(%title, depth, "expand: depth bound reached, terminalizing");
                Outcome::Terminalize
            };

            match outcome {
                Outcome::Decompose => {
                    let count = self.decompose(plan, &path, &title).await?;
                    info!(%title, depth, children = count, "expand: decomposed");
                    let children = (0..count)
                        .map(|idx| {
                            let mut child_path = path.clone();
                            child_path.push(idx);
                            self.expand(plan, child_path, depth + 1)
                        })
                        .collect::<Vec<_>>();
                    try_join_all(children).await?;
                }
                Outcome::Terminalize => {
                    self.terminalize(plan, &path, &title).await?;
                    info!(%title, depth, "expand: terminalized");
                }
            }

            Ok(())
        })
    }

    /// Ask whether the subject should be split or go straight to resources
    async fn decide(&self, plan: &PlanTree, title: &str) -> Result<Outcome, PlanError> {
        let prompt = self.tasks.decide_task(plan.goal(), title, &plan.snapshot())?;
        let raw = self.submit(prompt).await?;
        let answer: AnswerReply = reply::decode_as(&raw)?;
        debug!(%title, answer = %answer.answer, "decide: decoded answer");
        Ok(Outcome::from_answer(&answer.answer))
    }

    /// Request child subjects and attach them; returns how many were attached
    ///
    /// Children get fresh ids and keep the order the responder returned
    /// them in. Zero children degrades to a childless, resource-less node.
    async fn decompose(&self, plan: &PlanTree, path: &[usize], title: &str) -> Result<usize, PlanError> {
        let prompt = self.tasks.child_subjects_task(plan.goal(), title, &plan.snapshot())?;
        let raw = self.submit(prompt).await?;
        let listed: SubjectListReply = reply::decode_as(&raw)?;

        let children = listed
            .subjects
            .into_iter()
            .map(|child| Subject::new(child.subject, child.description, child.reason))
            .collect::<Vec<_>>();
        let count = children.len();

        plan.with_node(path, |node| node.subjects = children);
        Ok(count)
    }

    /// Request resources and exercises and attach them
    async fn terminalize(&self, plan: &PlanTree, path: &[usize], title: &str) -> Result<(), PlanError> {
        let prompt = self.tasks.resources_task(plan.goal(), title, &plan.snapshot())?;
        let raw = self.submit(prompt).await?;
        let decoded: ResourceExerciseReply = reply::decode_as(&raw)?;

        plan.with_node(path, |node| {
            node.resources = decoded
                .resources
                .into_iter()
                .map(|r| Resource {
                    title: r.title,
                    description: r.description,
                })
                .collect();
            node.exercises = decoded
                .exercises
                .into_iter()
                .map(|e| Exercise { description: e.description })
                .collect();
        });
        Ok(())
    }

    async fn submit(&self, prompt: String) -> Result<String, PlanError> {
        let response = self.llm.complete(CompletionRequest::new(prompt, self.max_tokens)).await?;
        Ok(response.content)
    }
}
