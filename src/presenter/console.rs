//! Terminal presenter
//!
//! Prompts are read with rustyline on the blocking pool. Anything other than
//! an explicit yes is a cancel, including Ctrl-C and EOF.

use async_trait::async_trait;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

use super::{
    ConfirmationPrompt, FailureDetails, Presenter, ResultReport, ResultResponse, UserDecision,
};

#[derive(Debug, Default, Clone)]
pub struct ConsolePresenter;

impl ConsolePresenter {
    pub fn new() -> Self {
        Self
    }

    async fn read_line(prompt: String) -> Option<String> {
        let result = tokio::task::spawn_blocking(move || -> rustyline::Result<String> {
            let mut editor = DefaultEditor::new()?;
            editor.readline(&prompt)
        })
        .await;

        match result {
            Ok(Ok(line)) => Some(line),
            Ok(Err(ReadlineError::Interrupted)) | Ok(Err(ReadlineError::Eof)) => None,
            Ok(Err(e)) => {
                debug!("readline failed: {}", e);
                None
            }
            Err(e) => {
                debug!("prompt task failed: {}", e);
                None
            }
        }
    }
}

pub fn parse_decision(input: &str) -> UserDecision {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" | "confirm" => UserDecision::Confirm,
        _ => UserDecision::Cancel,
    }
}

fn wants_details(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "d" | "details")
}

pub fn render_prompt(prompt: &ConfirmationPrompt) -> String {
    let mut out = format!("{}\n{}\n", prompt.title.yellow().bold(), prompt.question);
    if !prompt.consequences.is_empty() {
        out.push_str("This will also remove:\n");
        for item in &prompt.consequences {
            out.push_str(&format!("  - {}\n", item));
        }
    }
    out
}

pub fn render_report(report: &ResultReport) -> String {
    let heading = if report.success {
        format!("{} {}", "OK".green().bold(), report.title)
    } else {
        format!("{} {}", "FAILED".red().bold(), report.title)
    };

    let mut out = format!("{}\n{}\n", heading, report.message);
    if let Some(suggestion) = &report.suggestion {
        out.push_str(&format!("{} {}\n", "hint:".cyan(), suggestion));
    }
    out
}

pub fn render_details(details: &FailureDetails) -> String {
    let status = details
        .status
        .map(|s| s.to_string())
        .unwrap_or_else(|| "no response".to_string());
    format!(
        "{} {}\n{}\n{}\n",
        "status:".dimmed(),
        status,
        "payload:".dimmed(),
        details.payload
    )
}

#[async_trait]
impl Presenter for ConsolePresenter {
    async fn confirm(&self, prompt: &ConfirmationPrompt) -> UserDecision {
        print!("{}", render_prompt(prompt));
        match Self::read_line("[y]es to confirm, anything else cancels: ".to_string()).await {
            Some(line) => parse_decision(&line),
            None => UserDecision::Cancel,
        }
    }

    async fn show_result(&self, report: &ResultReport) -> ResultResponse {
        print!("{}", render_report(report));
        if !report.has_details {
            return ResultResponse::Acknowledged;
        }

        match Self::read_line("[d]etails, or Enter to continue: ".to_string()).await {
            Some(line) if wants_details(&line) => ResultResponse::DetailsRequested,
            _ => ResultResponse::Acknowledged,
        }
    }

    async fn show_details(&self, details: &FailureDetails) {
        print!("{}", render_details(details));
    }
}
