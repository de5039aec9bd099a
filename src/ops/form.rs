use chrono::NaiveDate;

use crate::model::task::{Task, TaskFields};

/// Error type for form validation
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Title is required")]
    EmptyTitle,
    #[error("invalid due date '{0}' (expected YYYY-MM-DD)")]
    InvalidDueDate(String),
}

/// Raw task form input, one string per field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub due_date: String,
    /// Comma-separated tags
    pub tags: String,
}

impl TaskForm {
    /// Prefill the form from an existing task
    pub fn from_task(task: &Task) -> Self {
        TaskForm {
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: task
                .due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            tags: task.tags.join(", "),
        }
    }

    /// Validate and map the form onto task fields
    pub fn validate(&self) -> Result<TaskFields, FormError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormError::EmptyTitle);
        }
        Ok(TaskFields {
            title: title.to_string(),
            description: self.description.trim().to_string(),
            due_date: parse_due_date(&self.due_date)?,
            tags: parse_tags(&self.tags),
        })
    }
}

/// Split a comma-separated tag string, trimming entries and dropping empties
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse an optional `YYYY-MM-DD` date; blank input means no due date
pub fn parse_due_date(input: &str) -> Result<Option<NaiveDate>, FormError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| FormError::InvalidDueDate(input.to_string()))
}
