//! School client - API access for the school management backend
//!
//! This crate talks to the school management REST API (students, teachers,
//! disciplines, classes) and formalises the confirm-then-delete flow used
//! for destructive operations.
//!
//! ## Architecture
//! Read/write calls flow through thin per-resource services:
//! Service -> ApiClient -> HTTP
//!
//! Deletions always go through the workflow:
//! Presenter confirm -> ResourceRemover::remove -> classify -> Presenter result
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use school_client::config::ClientConfig;
//! use school_client::api::ApiClient;
//! use school_client::services;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::from_env()?;
//! let client = ApiClient::new(&config)?;
//! let students = services::students(client).list().await?;
//! println!("{} students", students.len());
//! # Ok(())
//! # }
//! ```

// Core error handling
pub mod error;

// Environment-driven configuration
pub mod config;

// Resource kinds and records
pub mod models;

// HTTP client and the deletion seam
pub mod api;

// Pass-through services per resource
pub mod services;

// Confirm / mutate / classify workflow for destructive actions
pub mod workflow;

// User-facing prompts
pub mod presenter;

pub use api::{ApiClient, ResourceRemover};
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError};
pub use models::{ResourceId, ResourceKind};
pub use presenter::{ConsolePresenter, Presenter};
pub use workflow::{
    classify, ActionOutcome, ActionRequest, DestructiveActionWorkflow, StatusCategory, Target,
    WorkflowReport, WorkflowState,
};
