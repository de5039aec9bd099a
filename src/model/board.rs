use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::task::{Task, TaskId};

/// Identifier of a column (short random string)
pub type ColumnId = String;

/// Title given to a column whose title was left blank
pub const UNTITLED_COLUMN: &str = "Untitled";

/// Board colour scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    Light,
    #[default]
    Dark,
}

impl ThemeKind {
    pub fn toggled(self) -> Self {
        match self {
            ThemeKind::Light => ThemeKind::Dark,
            ThemeKind::Dark => ThemeKind::Light,
        }
    }

    pub fn parse_theme(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Some(ThemeKind::Light),
            "dark" => Some(ThemeKind::Dark),
            _ => None,
        }
    }
}

impl std::fmt::Display for ThemeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeKind::Light => write!(f, "light"),
            ThemeKind::Dark => write!(f, "dark"),
        }
    }
}

/// A named, ordered bucket of task references
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    /// Display order of the column's tasks
    #[serde(default)]
    pub task_ids: Vec<TaskId>,
}

impl Column {
    pub fn new(id: ColumnId, title: &str) -> Self {
        Column {
            id,
            title: normalize_column_title(title),
            task_ids: Vec::new(),
        }
    }
}

/// Trim a column title, falling back to "Untitled" when blank
pub fn normalize_column_title(title: &str) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        UNTITLED_COLUMN.to_string()
    } else {
        trimmed.to_string()
    }
}

/// The root aggregate: theme, ordered columns and all tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    #[serde(default)]
    pub theme: ThemeKind,
    /// Required: a stored value without columns is not a board
    pub columns: Vec<Column>,
    #[serde(default)]
    pub tasks: IndexMap<TaskId, Task>,
}

impl Board {
    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    pub fn column_mut(&mut self, column_id: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.id == column_id)
    }

    pub fn column_index(&self, column_id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == column_id)
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.get(task_id)
    }

    /// The column currently holding `task_id`
    pub fn column_of_task(&self, task_id: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|c| c.task_ids.iter().any(|id| id == task_id))
    }

    /// Tasks of a column in display order, skipping dangling ids
    pub fn column_tasks<'a>(&'a self, column: &'a Column) -> impl Iterator<Item = &'a Task> + 'a {
        column.task_ids.iter().filter_map(|id| self.tasks.get(id))
    }
}
