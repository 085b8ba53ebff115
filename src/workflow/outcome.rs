//! Outcome of one mutation attempt and its user-facing classification

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Bucket derived from an HTTP status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusCategory {
    Conflict,
    NotFound,
    ServerError,
    Unknown,
}

impl StatusCategory {
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => StatusCategory::Conflict,
            404 => StatusCategory::NotFound,
            500 => StatusCategory::ServerError,
            _ => StatusCategory::Unknown,
        }
    }
}

/// Failure taxonomy surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    ValidationConflict,
    NotFound,
    ServerFault,
    Unclassified,
}

impl From<StatusCategory> for FailureKind {
    fn from(category: StatusCategory) -> Self {
        match category {
            StatusCategory::Conflict => FailureKind::ValidationConflict,
            StatusCategory::NotFound => FailureKind::NotFound,
            StatusCategory::ServerError => FailureKind::ServerFault,
            StatusCategory::Unknown => FailureKind::Unclassified,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    Success,
    Failure {
        status_class: StatusCategory,
        /// `None` when no response arrived
        status: Option<u16>,
        /// Server-provided message, else the raw body, else the transport error text
        raw_message: String,
        /// Response payload exactly as received
        payload: Option<String>,
    },
}

impl ActionOutcome {
    pub fn from_result(result: Result<(), ApiError>) -> Self {
        match result {
            Ok(()) => ActionOutcome::Success,
            Err(err) => Self::from_error(&err),
        }
    }

    pub fn from_error(err: &ApiError) -> Self {
        let status = err.status();
        let status_class = status
            .map(StatusCategory::from_status)
            .unwrap_or(StatusCategory::Unknown);

        let raw_message = err
            .server_message()
            .or_else(|| {
                err.body()
                    .map(str::trim)
                    .filter(|b| !b.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| match err {
                ApiError::Transport(text) => text.clone(),
                ApiError::Status { status, .. } => format!("HTTP {}", status),
                other => other.to_string(),
            });

        ActionOutcome::Failure {
            status_class,
            status,
            raw_message,
            payload: err.body().map(str::to_string),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ActionOutcome::Success)
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            ActionOutcome::Success => None,
            ActionOutcome::Failure { status_class, .. } => Some(FailureKind::from(*status_class)),
        }
    }
}

/// Headline plus optional hint shown for a failed attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub message: String,
    pub suggestion: Option<String>,
}

/// Map an outcome to its display message. Pure; `None` for success.
pub fn classify(outcome: &ActionOutcome) -> Option<Classification> {
    match outcome {
        ActionOutcome::Success => None,
        ActionOutcome::Failure {
            status_class,
            raw_message,
            ..
        } => Some(classify_failure(*status_class, raw_message)),
    }
}

pub(crate) fn classify_failure(
    status_class: StatusCategory,
    raw_message: &str,
) -> Classification {
    let (message, suggestion) = match status_class {
        StatusCategory::Conflict => (
            "could not be deleted",
            Some("target may have dependent records blocking deletion"),
        ),
        StatusCategory::NotFound => ("target not found", Some("may already have been deleted")),
        StatusCategory::ServerError => (
            "internal server error",
            Some("target likely has dependencies (grades, activities, etc.)"),
        ),
        StatusCategory::Unknown => (raw_message, None),
    };

    Classification {
        message: message.to_string(),
        suggestion: suggestion.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16, body: &str) -> ActionOutcome {
        ActionOutcome::from_error(&ApiError::Status {
            status,
            body: body.to_string(),
        })
    }

    #[test]
    fn test_status_categories() {
        assert_eq!(StatusCategory::from_status(400), StatusCategory::Conflict);
        assert_eq!(StatusCategory::from_status(404), StatusCategory::NotFound);
        assert_eq!(StatusCategory::from_status(500), StatusCategory::ServerError);
        assert_eq!(StatusCategory::from_status(409), StatusCategory::Unknown);
        assert_eq!(StatusCategory::from_status(503), StatusCategory::Unknown);
        for code in [400, 404, 500, 418] {
            assert_eq!(
                StatusCategory::from_status(code),
                StatusCategory::from_status(code)
            );
        }
    }

    #[test]
    fn test_classification_table() {
        let cases = [
            (
                400,
                "could not be deleted",
                "target may have dependent records blocking deletion",
            ),
            (404, "target not found", "may already have been deleted"),
            (
                500,
                "internal server error",
                "target likely has dependencies (grades, activities, etc.)",
            ),
        ];

        for (status, message, suggestion) in cases {
            let outcome = http(status, r#"{"message":"whatever"}"#);
            let first = classify(&outcome).unwrap();
            assert_eq!(first.message, message);
            assert_eq!(first.suggestion.as_deref(), Some(suggestion));
            assert_eq!(classify(&outcome), Some(first));
        }
    }

    #[test]
    fn test_unknown_status_uses_server_message() {
        let outcome = http(409, r#"{"error":"record locked by another user"}"#);
        let classification = classify(&outcome).unwrap();
        assert_eq!(classification.message, "record locked by another user");
        assert_eq!(classification.suggestion, None);
        assert_eq!(outcome.failure_kind(), Some(FailureKind::Unclassified));
    }

    #[test]
    fn test_unknown_status_without_json_uses_raw_body() {
        let outcome = http(502, "Bad Gateway");
        assert_eq!(classify(&outcome).unwrap().message, "Bad Gateway");
    }

    #[test]
    fn test_unknown_status_with_empty_body() {
        let outcome = http(503, "");
        assert_eq!(classify(&outcome).unwrap().message, "HTTP 503");
    }

    #[test]
    fn test_transport_error_falls_back_to_error_text() {
        let outcome = ActionOutcome::from_error(&ApiError::Transport("connection refused".into()));
        match &outcome {
            ActionOutcome::Failure {
                status_class,
                status,
                raw_message,
                payload,
            } => {
                assert_eq!(*status_class, StatusCategory::Unknown);
                assert_eq!(*status, None);
                assert_eq!(raw_message, "connection refused");
                assert_eq!(*payload, None);
            }
            ActionOutcome::Success => panic!("expected failure"),
        }
        assert_eq!(classify(&outcome).unwrap().message, "connection refused");
    }

    #[test]
    fn test_raw_message_kept_for_classified_failures() {
        let outcome = http(400, r#"{"message":"has dependent grades"}"#);
        match outcome {
            ActionOutcome::Failure {
                raw_message,
                payload,
                ..
            } => {
                assert_eq!(raw_message, "has dependent grades");
                assert_eq!(payload.as_deref(), Some(r#"{"message":"has dependent grades"}"#));
            }
            ActionOutcome::Success => panic!("expected failure"),
        }
    }

    #[test]
    fn test_success_has_no_classification() {
        assert_eq!(classify(&ActionOutcome::Success), None);
        assert!(ActionOutcome::from_result(Ok(())).is_success());
        assert_eq!(ActionOutcome::Success.failure_kind(), None);
    }
}
