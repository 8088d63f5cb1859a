//! Transient user-facing notices ("toasts").

use serde::{Deserialize, Serialize};

use crate::error::{SelectionError, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    #[default]
    Info,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub level: NoticeLevel,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            level: NoticeLevel::Info,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            level: NoticeLevel::Destructive,
        }
    }
}

impl From<&SelectionError> for Notice {
    fn from(err: &SelectionError) -> Self {
        match err {
            SelectionError::EmptyList => Notice::destructive(
                "No tasks available",
                "Generate a task breakdown first to use the dice roller.",
            ),
        }
    }
}

impl From<&ValidationError> for Notice {
    fn from(err: &ValidationError) -> Self {
        match err {
            ValidationError::MissingField(field) => {
                Notice::destructive(format!("{} required", capitalize(field)), err.to_string())
            }
            ValidationError::NotFound { .. } => Notice::destructive("Not found", err.to_string()),
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
