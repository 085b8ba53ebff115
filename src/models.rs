//! Resource kinds and records exposed by the school API

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// The collections the API exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Student,
    Teacher,
    Discipline,
    SchoolClass,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Student,
        ResourceKind::Teacher,
        ResourceKind::Discipline,
        ResourceKind::SchoolClass,
    ];

    /// Path segment of the collection (`DELETE /{collection}/{id}`)
    pub fn collection(&self) -> &'static str {
        match self {
            ResourceKind::Student => "students",
            ResourceKind::Teacher => "teachers",
            ResourceKind::Discipline => "disciplines",
            ResourceKind::SchoolClass => "classes",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Student => "student",
            ResourceKind::Teacher => "teacher",
            ResourceKind::Discipline => "discipline",
            ResourceKind::SchoolClass => "class",
        }
    }

    /// What the user loses when a record of this kind is deleted
    pub fn deletion_consequences(&self) -> Vec<String> {
        let items: &[&str] = match self {
            ResourceKind::Student => &[
                "All grades recorded for this student",
                "Enrolment in every class",
                "Activity submissions and attendance history",
            ],
            ResourceKind::Teacher => &[
                "Assignments to disciplines",
                "Links to the classes taught",
            ],
            ResourceKind::Discipline => &[
                "Grades and activities recorded for the discipline",
                "Its place in every class curriculum",
            ],
            ResourceKind::SchoolClass => &[
                "Enrolment of every student in the class",
                "The class timetable",
            ],
        };
        items.iter().map(|s| s.to_string()).collect()
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "student" | "students" => Ok(ResourceKind::Student),
            "teacher" | "teachers" => Ok(ResourceKind::Teacher),
            "discipline" | "disciplines" => Ok(ResourceKind::Discipline),
            "class" | "classes" | "school_class" => Ok(ResourceKind::SchoolClass),
            other => Err(format!(
                "unknown resource '{}': expected student, teacher, discipline or class",
                other
            )),
        }
    }
}

/// Numeric or string identifier, rendered verbatim in request paths
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Number(n) => write!(f, "{}", n),
            ResourceId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ResourceId {
    fn from(n: i64) -> Self {
        ResourceId::Number(n)
    }
}

impl From<i32> for ResourceId {
    fn from(n: i32) -> Self {
        ResourceId::Number(i64::from(n))
    }
}

impl From<&str> for ResourceId {
    /// Canonical integers become `Number`; anything else ("007", "+5") stays text
    fn from(s: &str) -> Self {
        match s.parse::<i64>() {
            Ok(n) if n.to_string() == s => ResourceId::Number(n),
            _ => ResourceId::Text(s.to_string()),
        }
    }
}

impl From<String> for ResourceId {
    fn from(s: String) -> Self {
        ResourceId::from(s.as_str())
    }
}

/// A record type living in one API collection
pub trait Resource: Serialize + DeserializeOwned + Send + Sync {
    const KIND: ResourceKind;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_id: Option<ResourceId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discipline {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workload_hours: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<ResourceId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolClass {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift: Option<String>,
}

impl Resource for Student {
    const KIND: ResourceKind = ResourceKind::Student;
}

impl Resource for Teacher {
    const KIND: ResourceKind = ResourceKind::Teacher;
}

impl Resource for Discipline {
    const KIND: ResourceKind = ResourceKind::Discipline;
}

impl Resource for SchoolClass {
    const KIND: ResourceKind = ResourceKind::SchoolClass;
}
