use serde::Serialize;
use tracing::{info, warn};

use super::outcome::{classify_failure, ActionOutcome};
use super::request::ActionRequest;
use crate::api::ResourceRemover;
use crate::presenter::{
    ConfirmationPrompt, FailureDetails, Presenter, ResultReport, ResultResponse, UserDecision,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WorkflowState {
    Idle,
    AwaitingConfirmation,
    Cancelled,
    Mutating,
    Succeeded,
    Failed,
}

impl WorkflowState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            WorkflowState::Cancelled | WorkflowState::Succeeded | WorkflowState::Failed
        )
    }
}

/// What a finished workflow hands back to its caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowReport {
    pub state: WorkflowState,
    /// `None` when the user cancelled before any call was made
    pub outcome: Option<ActionOutcome>,
}

/// Confirm, delete once, classify, report.
///
/// Built fresh for each user interaction and consumed by [`run`](Self::run).
pub struct DestructiveActionWorkflow<'a> {
    request: ActionRequest,
    consequences: Vec<String>,
    remover: &'a dyn ResourceRemover,
    presenter: &'a dyn Presenter,
    state: WorkflowState,
}

impl<'a> DestructiveActionWorkflow<'a> {
    pub fn new(
        request: ActionRequest,
        remover: &'a dyn ResourceRemover,
        presenter: &'a dyn Presenter,
    ) -> Self {
        let consequences = request.target().kind.deletion_consequences();
        Self {
            request,
            consequences,
            remover,
            presenter,
            state: WorkflowState::Idle,
        }
    }

    /// Replace the default consequence list shown in the prompt
    pub fn with_consequences(mut self, consequences: Vec<String>) -> Self {
        self.consequences = consequences;
        self
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    fn transition(&mut self, next: WorkflowState) {
        info!(
            target_kind = %self.request.target().kind,
            target_id = %self.request.target().id,
            "workflow {:?} -> {:?}",
            self.state,
            next
        );
        self.state = next;
    }

    /// Drive the workflow to a terminal state.
    ///
    /// `on_success` runs exactly once, after the user acknowledges a
    /// successful result, and never on cancel or failure.
    pub async fn run<F>(mut self, on_success: F) -> WorkflowReport
    where
        F: FnOnce(),
    {
        if self.request_confirmation().await == UserDecision::Cancel {
            self.transition(WorkflowState::Cancelled);
            return WorkflowReport {
                state: self.state,
                outcome: None,
            };
        }

        let outcome = self.perform_mutation().await;
        self.present_result(&outcome, on_success).await;

        WorkflowReport {
            state: self.state,
            outcome: Some(outcome),
        }
    }

    async fn request_confirmation(&mut self) -> UserDecision {
        self.transition(WorkflowState::AwaitingConfirmation);
        let target = self.request.target();
        let prompt = ConfirmationPrompt {
            title: format!(
                "{} {}",
                capitalize(&self.request.operation().to_string()),
                target.kind
            ),
            question: format!(
                "Are you sure you want to {} {}? This cannot be undone.",
                self.request.operation(),
                target
            ),
            consequences: self.consequences.clone(),
        };
        self.presenter.confirm(&prompt).await
    }

    async fn perform_mutation(&mut self) -> ActionOutcome {
        self.transition(WorkflowState::Mutating);
        let target = self.request.target();
        let outcome = ActionOutcome::from_result(self.remover.remove(target).await);

        match &outcome {
            ActionOutcome::Success => {
                info!("{} {} succeeded", self.request.operation(), target);
                self.transition(WorkflowState::Succeeded);
            }
            ActionOutcome::Failure {
                status, raw_message, ..
            } => {
                warn!(
                    "{} {} failed (status {:?}): {}",
                    self.request.operation(),
                    target,
                    status,
                    raw_message
                );
                self.transition(WorkflowState::Failed);
            }
        }

        outcome
    }

    async fn present_result<F>(&self, outcome: &ActionOutcome, on_success: F)
    where
        F: FnOnce(),
    {
        let target = self.request.target();
        let title = format!(
            "{} {}",
            capitalize(&self.request.operation().to_string()),
            target
        );

        match outcome {
            ActionOutcome::Success => {
                let report = ResultReport {
                    success: true,
                    title,
                    message: format!("{} was deleted", target),
                    suggestion: None,
                    has_details: false,
                };
                self.presenter.show_result(&report).await;
                on_success();
            }
            ActionOutcome::Failure {
                status_class,
                status,
                raw_message,
                payload,
            } => {
                let classification = classify_failure(*status_class, raw_message);
                let report = ResultReport {
                    success: false,
                    title,
                    message: classification.message,
                    suggestion: classification.suggestion,
                    has_details: true,
                };

                if self.presenter.show_result(&report).await == ResultResponse::DetailsRequested {
                    let details = FailureDetails {
                        status: *status,
                        payload: payload.clone().unwrap_or_else(|| raw_message.clone()),
                    };
                    self.presenter.show_details(&details).await;
                }
            }
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
