use indexmap::IndexMap;

use crate::model::board::{Board, Column, ColumnId, ThemeKind, normalize_column_title};
use crate::model::task::{Task, TaskFields, TaskId};
use crate::ops::id::new_id;

/// Error type for board mutations
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("column not found: {0}")]
    ColumnNotFound(String),
    #[error("task not found: {0}")]
    TaskNotFound(String),
}

/// A single state change on the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Append a column; `None` names it "Column N"
    AddColumn { title: Option<String> },
    RenameColumn { column_id: ColumnId, title: String },
    /// Delete a column and every task it holds
    DeleteColumn { column_id: ColumnId },
    /// Move a column to `index` (counted without the moved column), or to the end
    MoveColumn {
        column_id: ColumnId,
        index: Option<usize>,
    },
    AddTask {
        column_id: ColumnId,
        fields: TaskFields,
    },
    EditTask { task_id: TaskId, fields: TaskFields },
    DeleteTask { task_id: TaskId },
    /// Transfer a task into `to_column_id` at `index` (counted without the
    /// moved task), or at the end. Sets `completed` from the target title.
    MoveTask {
        task_id: TaskId,
        from_column_id: ColumnId,
        to_column_id: ColumnId,
        index: Option<usize>,
    },
    ToggleTheme,
    SetTheme(ThemeKind),
    /// Replace the board with the default board
    Reset,
}

impl Action {
    /// Actions that need explicit user confirmation before they run
    pub fn is_destructive(&self) -> bool {
        matches!(
            self,
            Action::DeleteColumn { .. } | Action::DeleteTask { .. } | Action::Reset
        )
    }
}

/// A fresh board: dark theme, empty Backlog / In Progress / Done columns
pub fn default_board() -> Board {
    Board {
        theme: ThemeKind::Dark,
        columns: vec![
            Column::new(new_id(), "Backlog"),
            Column::new(new_id(), "In Progress"),
            Column::new(new_id(), "Done"),
        ],
        tasks: IndexMap::new(),
    }
}

/// Whether tasks dropped into a column titled `title` count as completed.
///
/// Case-insensitive substring match on "done" or "complete".
pub fn is_done_column(title: &str) -> bool {
    let title = title.to_lowercase();
    title.contains("done") || title.contains("complete")
}

/// Apply `action` to `board`. Returns the id of a created column or task.
///
/// On error the board is left untouched.
pub fn apply(board: &mut Board, action: Action) -> Result<Option<String>, BoardError> {
    match action {
        Action::AddColumn { title } => {
            let title = title.unwrap_or_else(|| format!("Column {}", board.columns.len() + 1));
            let column = Column::new(new_id(), &title);
            let id = column.id.clone();
            board.columns.push(column);
            Ok(Some(id))
        }
        Action::RenameColumn { column_id, title } => {
            let column = board
                .column_mut(&column_id)
                .ok_or(BoardError::ColumnNotFound(column_id))?;
            column.title = normalize_column_title(&title);
            Ok(None)
        }
        Action::DeleteColumn { column_id } => {
            let idx = board
                .column_index(&column_id)
                .ok_or(BoardError::ColumnNotFound(column_id))?;
            let column = board.columns.remove(idx);
            for task_id in &column.task_ids {
                board.tasks.shift_remove(task_id);
            }
            Ok(None)
        }
        Action::MoveColumn { column_id, index } => {
            let old_index = board
                .column_index(&column_id)
                .ok_or(BoardError::ColumnNotFound(column_id))?;
            let column = board.columns.remove(old_index);
            let new_index = index.map_or(board.columns.len(), |i| i.min(board.columns.len()));
            board.columns.insert(new_index, column);
            Ok(None)
        }
        Action::AddTask { column_id, fields } => {
            if board.column(&column_id).is_none() {
                return Err(BoardError::ColumnNotFound(column_id));
            }
            let id = new_id();
            board.tasks.insert(id.clone(), Task::new(id.clone(), fields));
            if let Some(column) = board.column_mut(&column_id) {
                column.task_ids.push(id.clone());
            }
            Ok(Some(id))
        }
        Action::EditTask { task_id, fields } => {
            let task = board
                .tasks
                .get_mut(&task_id)
                .ok_or(BoardError::TaskNotFound(task_id))?;
            task.apply_fields(fields);
            Ok(None)
        }
        Action::DeleteTask { task_id } => {
            if board.tasks.shift_remove(&task_id).is_none() {
                return Err(BoardError::TaskNotFound(task_id));
            }
            for column in &mut board.columns {
                column.task_ids.retain(|id| *id != task_id);
            }
            Ok(None)
        }
        Action::MoveTask {
            task_id,
            from_column_id,
            to_column_id,
            index,
        } => {
            move_task(board, &task_id, &from_column_id, &to_column_id, index)?;
            Ok(None)
        }
        Action::ToggleTheme => {
            board.theme = board.theme.toggled();
            Ok(None)
        }
        Action::SetTheme(theme) => {
            board.theme = theme;
            Ok(None)
        }
        Action::Reset => {
            *board = default_board();
            Ok(None)
        }
    }
}

fn move_task(
    board: &mut Board,
    task_id: &str,
    from_column_id: &str,
    to_column_id: &str,
    index: Option<usize>,
) -> Result<(), BoardError> {
    if !board.tasks.contains_key(task_id) {
        return Err(BoardError::TaskNotFound(task_id.to_string()));
    }
    let to_idx = board
        .column_index(to_column_id)
        .ok_or_else(|| BoardError::ColumnNotFound(to_column_id.to_string()))?;

    // Remove from the source column (no-op when already absent), and from any
    // other column still listing the id so membership stays unique.
    for column in &mut board.columns {
        column.task_ids.retain(|id| id != task_id);
    }

    let target = &mut board.columns[to_idx];
    let insert_at = index.map_or(target.task_ids.len(), |i| i.min(target.task_ids.len()));
    target.task_ids.insert(insert_at, task_id.to_string());
    let completed = is_done_column(&target.title);

    if let Some(task) = board.tasks.get_mut(task_id) {
        task.completed = completed;
    }
    tracing::debug!(task_id, from_column_id, to_column_id, insert_at, completed, "task moved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled(title: &str) -> TaskFields {
        TaskFields {
            title: title.to_string(),
            ..Default::default()
        }
    }

    /// Board with columns Backlog / Done and task ids returned in order
    fn backlog_done(n: usize) -> (Board, Vec<String>) {
        let mut board = Board {
            theme: ThemeKind::Dark,
            columns: vec![
                Column::new("backlog".into(), "Backlog"),
                Column::new("done".into(), "Done"),
            ],
            tasks: IndexMap::new(),
        };
        let mut ids = Vec::new();
        for i in 0..n {
            let id = apply(
                &mut board,
                Action::AddTask {
                    column_id: "backlog".into(),
                    fields: titled(&format!("T{}", i + 1)),
                },
            )
            .unwrap()
            .unwrap();
            ids.push(id);
        }
        (board, ids)
    }

    fn mv(task: &str, from: &str, to: &str, index: Option<usize>) -> Action {
        Action::MoveTask {
            task_id: task.into(),
            from_column_id: from.into(),
            to_column_id: to.into(),
            index,
        }
    }

    #[test]
    fn default_board_has_three_empty_columns() {
        let board = default_board();
        let titles: Vec<&str> = board.columns.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Backlog", "In Progress", "Done"]);
        assert!(board.columns.iter().all(|c| c.task_ids.is_empty()));
        assert_eq!(board.theme, ThemeKind::Dark);
        assert_ne!(board.columns[0].id, board.columns[1].id);
    }

    #[test]
    fn done_detection_is_substring_and_case_insensitive() {
        assert!(is_done_column("Done"));
        assert!(is_done_column("ALMOST DONE"));
        assert!(is_done_column("Completed"));
        assert!(is_done_column("Incomplete")); // substring match, kept as is
        assert!(!is_done_column("In Progress"));
        assert!(!is_done_column("Backlog"));
    }

    #[test]
    fn add_column_names_by_position() {
        let mut board = default_board();
        let id = apply(&mut board, Action::AddColumn { title: None })
            .unwrap()
            .unwrap();
        assert_eq!(board.columns[3].title, "Column 4");
        assert_eq!(board.columns[3].id, id);
    }

    #[test]
    fn rename_blank_becomes_untitled() {
        let (mut board, _) = backlog_done(0);
        apply(
            &mut board,
            Action::RenameColumn {
                column_id: "backlog".into(),
                title: "  ".into(),
            },
        )
        .unwrap();
        assert_eq!(board.columns[0].title, "Untitled");
    }

    #[test]
    fn rename_does_not_recompute_completion() {
        let (mut board, ids) = backlog_done(1);
        apply(&mut board, mv(&ids[0], "backlog", "done", None)).unwrap();
        apply(
            &mut board,
            Action::RenameColumn {
                column_id: "done".into(),
                title: "Review".into(),
            },
        )
        .unwrap();
        assert!(board.tasks[&ids[0]].completed);
    }

    #[test]
    fn move_into_done_marks_completed() {
        let (mut board, ids) = backlog_done(1);
        let t1 = &ids[0];
        apply(&mut board, mv(t1, "backlog", "done", None)).unwrap();
        assert!(board.columns[0].task_ids.is_empty());
        assert_eq!(board.columns[1].task_ids, vec![t1.clone()]);
        assert!(board.tasks[t1].completed);
    }

    #[test]
    fn move_out_of_done_clears_completed() {
        let (mut board, ids) = backlog_done(1);
        let t1 = &ids[0];
        apply(&mut board, mv(t1, "backlog", "done", None)).unwrap();
        apply(&mut board, mv(t1, "done", "backlog", Some(0))).unwrap();
        assert!(!board.tasks[t1].completed);
        assert_eq!(board.columns[0].task_ids, vec![t1.clone()]);
    }

    #[test]
    fn reorder_within_column_preserves_membership() {
        let (mut board, ids) = backlog_done(4);
        // Move T4 to the front
        apply(&mut board, mv(&ids[3], "backlog", "backlog", Some(0))).unwrap();
        let col = &board.columns[0].task_ids;
        assert_eq!(col, &vec![ids[3].clone(), ids[0].clone(), ids[1].clone(), ids[2].clone()]);
        let mut sorted = col.clone();
        sorted.sort();
        let mut expected = ids.clone();
        expected.sort();
        assert_eq!(sorted, expected);
        assert_eq!(board.tasks.len(), 4);
    }

    #[test]
    fn move_in_place_is_a_noop_reorder() {
        let (mut board, ids) = backlog_done(3);
        let before = board.columns[0].task_ids.clone();
        apply(&mut board, mv(&ids[1], "backlog", "backlog", Some(1))).unwrap();
        assert_eq!(board.columns[0].task_ids, before);
    }

    #[test]
    fn move_index_is_clamped() {
        let (mut board, ids) = backlog_done(2);
        apply(&mut board, mv(&ids[0], "backlog", "done", Some(99))).unwrap();
        assert_eq!(board.columns[1].task_ids, vec![ids[0].clone()]);
    }

    #[test]
    fn move_with_stale_source_keeps_single_membership() {
        let (mut board, ids) = backlog_done(1);
        // Source column id does not hold the task
        apply(&mut board, mv(&ids[0], "done", "done", None)).unwrap();
        let count: usize = board
            .columns
            .iter()
            .map(|c| c.task_ids.iter().filter(|id| **id == ids[0]).count())
            .sum();
        assert_eq!(count, 1);
        assert_eq!(board.columns[1].task_ids, vec![ids[0].clone()]);
    }

    #[test]
    fn move_unknown_task_or_column_fails_without_change() {
        let (mut board, ids) = backlog_done(1);
        let before = board.clone();
        assert_eq!(
            apply(&mut board, mv("ghost", "backlog", "done", None)),
            Err(BoardError::TaskNotFound("ghost".into()))
        );
        assert_eq!(
            apply(&mut board, mv(&ids[0], "backlog", "nowhere", None)),
            Err(BoardError::ColumnNotFound("nowhere".into()))
        );
        assert_eq!(board, before);
    }

    #[test]
    fn delete_column_cascades_to_tasks() {
        let (mut board, ids) = backlog_done(3);
        apply(&mut board, mv(&ids[2], "backlog", "done", None)).unwrap();
        apply(
            &mut board,
            Action::DeleteColumn {
                column_id: "backlog".into(),
            },
        )
        .unwrap();
        assert_eq!(board.columns.len(), 1);
        assert!(!board.tasks.contains_key(&ids[0]));
        assert!(!board.tasks.contains_key(&ids[1]));
        assert!(board.tasks.contains_key(&ids[2]));
    }

    #[test]
    fn delete_task_removes_everywhere() {
        let (mut board, ids) = backlog_done(2);
        apply(
            &mut board,
            Action::DeleteTask {
                task_id: ids[0].clone(),
            },
        )
        .unwrap();
        assert_eq!(board.columns[0].task_ids, vec![ids[1].clone()]);
        assert!(!board.tasks.contains_key(&ids[0]));
    }

    #[test]
    fn move_column_to_front_and_end() {
        let mut board = default_board();
        let done_id = board.columns[2].id.clone();
        apply(
            &mut board,
            Action::MoveColumn {
                column_id: done_id.clone(),
                index: Some(0),
            },
        )
        .unwrap();
        assert_eq!(board.columns[0].id, done_id);
        apply(
            &mut board,
            Action::MoveColumn {
                column_id: done_id.clone(),
                index: None,
            },
        )
        .unwrap();
        assert_eq!(board.columns[2].id, done_id);
    }

    #[test]
    fn add_task_starts_not_completed_even_in_done() {
        let (mut board, _) = backlog_done(0);
        let id = apply(
            &mut board,
            Action::AddTask {
                column_id: "done".into(),
                fields: titled("Already?"),
            },
        )
        .unwrap()
        .unwrap();
        assert!(!board.tasks[&id].completed);
        assert_eq!(board.columns[1].task_ids, vec![id]);
    }

    #[test]
    fn add_task_to_missing_column_creates_nothing() {
        let (mut board, _) = backlog_done(0);
        let err = apply(
            &mut board,
            Action::AddTask {
                column_id: "nope".into(),
                fields: titled("x"),
            },
        );
        assert!(err.is_err());
        assert!(board.tasks.is_empty());
    }

    #[test]
    fn edit_task_keeps_completion() {
        let (mut board, ids) = backlog_done(1);
        apply(&mut board, mv(&ids[0], "backlog", "done", None)).unwrap();
        apply(
            &mut board,
            Action::EditTask {
                task_id: ids[0].clone(),
                fields: titled("Renamed"),
            },
        )
        .unwrap();
        assert_eq!(board.tasks[&ids[0]].title, "Renamed");
        assert!(board.tasks[&ids[0]].completed);
    }

    #[test]
    fn theme_toggle_and_reset() {
        let (mut board, _) = backlog_done(2);
        apply(&mut board, Action::ToggleTheme).unwrap();
        assert_eq!(board.theme, ThemeKind::Light);
        apply(&mut board, Action::SetTheme(ThemeKind::Dark)).unwrap();
        assert_eq!(board.theme, ThemeKind::Dark);
        apply(&mut board, Action::Reset).unwrap();
        assert!(board.tasks.is_empty());
        assert_eq!(board.columns.len(), 3);
    }

    #[test]
    fn destructive_actions() {
        assert!(Action::Reset.is_destructive());
        assert!(
            Action::DeleteTask {
                task_id: "x".into()
            }
            .is_destructive()
        );
        assert!(!Action::ToggleTheme.is_destructive());
    }
}
