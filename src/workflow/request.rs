use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{ResourceId, ResourceKind};

/// The resource a destructive action is aimed at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub kind: ResourceKind,
    pub id: ResourceId,
    /// Human-readable name shown in prompts, e.g. the student's name
    pub display_name: Option<String>,
}

impl Target {
    pub fn new(kind: ResourceKind, id: impl Into<ResourceId>) -> Self {
        Self {
            kind,
            id: id.into(),
            display_name: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.display_name {
            Some(name) => write!(f, "{} \"{}\" (#{})", self.kind, name, self.id),
            None => write!(f, "{} #{}", self.kind, self.id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Delete => f.write_str("delete"),
        }
    }
}

/// One destructive request, fixed at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    target: Target,
    operation: Operation,
}

impl ActionRequest {
    pub fn delete(target: Target) -> Self {
        Self {
            target,
            operation: Operation::Delete,
        }
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }
}
