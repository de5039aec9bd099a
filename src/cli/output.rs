use serde::Serialize;

use crate::model::board::{Board, Column, ThemeKind};
use crate::model::task::Task;
use crate::ops::progress::{Progress, ProgressCount};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub tags: Vec<String>,
    pub completed: bool,
}

#[derive(Serialize)]
pub struct ColumnJson {
    pub id: String,
    pub title: String,
    pub progress: ProgressCount,
    pub tasks: Vec<TaskJson>,
}

#[derive(Serialize)]
pub struct BoardJson {
    pub theme: ThemeKind,
    pub columns: Vec<ColumnJson>,
    pub overall: ProgressCount,
}

#[derive(Serialize)]
pub struct ColumnProgressJson {
    pub id: String,
    pub title: String,
    #[serde(flatten)]
    pub progress: ProgressCount,
}

#[derive(Serialize)]
pub struct ProgressJson {
    pub columns: Vec<ColumnProgressJson>,
    pub overall: ProgressCount,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        id: task.id.clone(),
        title: task.title.clone(),
        description: task.description.clone(),
        due_date: task.due_date.map(|d| d.format("%Y-%m-%d").to_string()),
        tags: task.tags.clone(),
        completed: task.completed,
    }
}

pub fn column_to_json(board: &Board, column: &Column, progress: &Progress) -> ColumnJson {
    ColumnJson {
        id: column.id.clone(),
        title: column.title.clone(),
        progress: progress
            .per_column
            .get(&column.id)
            .copied()
            .unwrap_or_default(),
        tasks: board.column_tasks(column).map(task_to_json).collect(),
    }
}

pub fn board_to_json(board: &Board, progress: &Progress) -> BoardJson {
    BoardJson {
        theme: board.theme,
        columns: board
            .columns
            .iter()
            .map(|c| column_to_json(board, c, progress))
            .collect(),
        overall: progress.overall,
    }
}

pub fn progress_to_json(board: &Board, progress: &Progress) -> ProgressJson {
    ProgressJson {
        columns: board
            .columns
            .iter()
            .map(|c| ColumnProgressJson {
                id: c.id.clone(),
                title: c.title.clone(),
                progress: progress.per_column.get(&c.id).copied().unwrap_or_default(),
            })
            .collect(),
        overall: progress.overall,
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// `3/4 75%`
pub fn format_count(count: &ProgressCount) -> String {
    format!("{}/{} {}%", count.done, count.total, count.percent)
}

/// Format a single task as a one-line summary
pub fn format_task_line(task: &Task) -> String {
    let check = if task.completed { 'x' } else { ' ' };
    let tags_str = if task.tags.is_empty() {
        String::new()
    } else {
        format!(
            " {}",
            task.tags
                .iter()
                .map(|t| format!("#{}", t))
                .collect::<Vec<_>>()
                .join(" ")
        )
    };
    let due_str = task
        .due_date
        .map(|d| format!(" (due {})", d.format("%Y-%m-%d")))
        .unwrap_or_default();
    format!("[{}] {} {}{}{}", check, task.id, task.title, tags_str, due_str)
}

/// Format a column header and its tasks
pub fn format_column(board: &Board, column: &Column, progress: &Progress) -> Vec<String> {
    let count = progress
        .per_column
        .get(&column.id)
        .copied()
        .unwrap_or_default();
    let mut lines = vec![format!(
        "== {} ({}) == {}",
        column.title,
        column.id,
        format_count(&count)
    )];
    for task in board.column_tasks(column) {
        lines.push(format!("  {}", format_task_line(task)));
        if !task.description.is_empty() {
            for line in task.description.lines() {
                lines.push(format!("      {}", line));
            }
        }
    }
    lines
}

/// Format the whole board
pub fn format_board(board: &Board, progress: &Progress) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, column) in board.columns.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.extend(format_column(board, column, progress));
    }
    lines.push(String::new());
    lines.push(format!("Overall: {}", format_count(&progress.overall)));
    lines
}

/// Format the progress report
pub fn format_progress(board: &Board, progress: &Progress) -> Vec<String> {
    let width = board
        .columns
        .iter()
        .map(|c| c.title.chars().count())
        .max()
        .unwrap_or(0)
        .max("Overall".len());
    let mut lines = Vec::new();
    for column in &board.columns {
        let count = progress
            .per_column
            .get(&column.id)
            .copied()
            .unwrap_or_default();
        lines.push(format!(
            "{:<width$}  {}",
            column.title,
            format_count(&count),
            width = width
        ));
    }
    lines.push(format!(
        "{:<width$}  {}",
        "Overall",
        format_count(&progress.overall),
        width = width
    ));
    lines
}
