use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier of a task (short random string)
pub type TaskId = String;

/// A single work item on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    /// Task title (never empty once accepted by the form)
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Due date, stored as `YYYY-MM-DD`
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Tags in entry order (duplicates allowed)
    #[serde(default)]
    pub tags: Vec<String>,
    /// Written when the task is dropped into a column, see `ops::board_ops::is_done_column`
    #[serde(default)]
    pub completed: bool,
}

/// The user-editable fields of a task, as produced by the form controller
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskFields {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub tags: Vec<String>,
}

impl Task {
    /// Create a new, not-completed task from form fields
    pub fn new(id: TaskId, fields: TaskFields) -> Self {
        Task {
            id,
            title: fields.title,
            description: fields.description,
            due_date: fields.due_date,
            tags: fields.tags,
            completed: false,
        }
    }

    /// Replace the editable fields, keeping id and completion
    pub fn apply_fields(&mut self, fields: TaskFields) {
        self.title = fields.title;
        self.description = fields.description;
        self.due_date = fields.due_date;
        self.tags = fields.tags;
    }

    /// The editable fields of this task
    pub fn fields(&self) -> TaskFields {
        TaskFields {
            title: self.title.clone(),
            description: self.description.clone(),
            due_date: self.due_date,
            tags: self.tags.clone(),
        }
    }
}
