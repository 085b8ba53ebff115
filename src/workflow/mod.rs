//! Confirm-then-mutate-then-classify workflow for destructive actions
//!
//! ```text
//! Idle -> AwaitingConfirmation -> Cancelled
//!                              -> Mutating -> Succeeded
//!                                          -> Failed
//! ```
//!
//! Every terminal state is final. A workflow instance is consumed by
//! `run`, so it can neither be re-entered nor issue a second mutation.

mod destructive;
mod outcome;
mod request;

pub use destructive::{DestructiveActionWorkflow, WorkflowReport, WorkflowState};
pub use outcome::{classify, ActionOutcome, Classification, FailureKind, StatusCategory};
pub use request::{ActionRequest, Operation, Target};
