//! Presenter capability
//!
//! Everything the user sees during a destructive action goes through this
//! trait, so the workflow runs the same against a terminal or a headless fake.

mod console;

pub use console::ConsolePresenter;

use async_trait::async_trait;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserDecision {
    Cancel,
    Confirm,
}

/// How the user dismissed a result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultResponse {
    Acknowledged,
    /// Only meaningful for failures that carry details
    DetailsRequested,
}

/// Two-choice prompt shown before the mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmationPrompt {
    pub title: String,
    pub question: String,
    pub consequences: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultReport {
    pub success: bool,
    pub title: String,
    pub message: String,
    pub suggestion: Option<String>,
    /// Whether a "more details" view is available
    pub has_details: bool,
}

/// Diagnostic view; echoes the response verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureDetails {
    pub status: Option<u16>,
    pub payload: String,
}

#[async_trait]
pub trait Presenter: Send + Sync {
    /// Block until the user picks Cancel or Confirm.
    async fn confirm(&self, prompt: &ConfirmationPrompt) -> UserDecision;

    /// Show the outcome and wait for the user to dismiss it.
    async fn show_result(&self, report: &ResultReport) -> ResultResponse;

    async fn show_details(&self, details: &FailureDetails);
}
