use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::board_ops::Action;
use crate::ops::form::TaskForm;
use crate::tui::app::{App, FormKind, FormState};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    // Any key dismisses the previous status message
    app.status_message = None;

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,

        // Cursor
        KeyCode::Char('h') | KeyCode::Left => move_column_cursor(app, -1),
        KeyCode::Char('l') | KeyCode::Right => move_column_cursor(app, 1),
        KeyCode::Char('k') | KeyCode::Up => move_task_cursor(app, -1),
        KeyCode::Char('j') | KeyCode::Down => move_task_cursor(app, 1),
        KeyCode::Char('g') | KeyCode::Home => app.cursor.task = 0,
        KeyCode::Char('G') | KeyCode::End => {
            app.cursor.task = usize::MAX;
            app.clamp_cursor();
        }

        // Tasks
        KeyCode::Char('n') => open_add_task(app),
        KeyCode::Char('e') | KeyCode::Enter => open_edit_task(app),
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(task_id) = app.selected_task_id() {
                app.request(Action::DeleteTask { task_id });
            }
        }
        KeyCode::Char('H') => move_task_across(app, -1),
        KeyCode::Char('L') => move_task_across(app, 1),
        KeyCode::Char('K') => move_task_within(app, -1),
        KeyCode::Char('J') => move_task_within(app, 1),

        // Columns
        KeyCode::Char('a') => add_column(app),
        KeyCode::Char('r') => open_rename_column(app),
        KeyCode::Char('D') => {
            if let Some(column) = app.current_column() {
                let column_id = column.id.clone();
                app.request(Action::DeleteColumn { column_id });
            }
        }
        KeyCode::Char('<') => move_column(app, -1),
        KeyCode::Char('>') => move_column(app, 1),

        // Board
        KeyCode::Char('t') => {
            app.request(Action::ToggleTheme);
            let theme = app.board().theme;
            app.set_status(format!("{} theme", theme));
        }
        KeyCode::Char('R') => app.request(Action::Reset),
        _ => {}
    }
}

fn move_column_cursor(app: &mut App, delta: isize) {
    let count = app.board().columns.len();
    if count == 0 {
        return;
    }
    let next = (app.cursor.column as isize + delta).clamp(0, count as isize - 1);
    app.cursor.column = next as usize;
    app.clamp_cursor();
}

fn move_task_cursor(app: &mut App, delta: isize) {
    app.cursor.task = app.cursor.task.saturating_add_signed(delta);
    app.clamp_cursor();
}

fn open_add_task(app: &mut App) {
    let Some(column) = app.current_column() else {
        app.set_error("add a column first (a)");
        return;
    };
    let kind = FormKind::AddTask {
        column_id: column.id.clone(),
    };
    app.open_form(FormState::task(kind, TaskForm::default()));
}

fn open_edit_task(app: &mut App) {
    let Some(task_id) = app.selected_task_id() else {
        return;
    };
    let Some(task) = app.board().task(&task_id) else {
        return;
    };
    let form = TaskForm::from_task(task);
    app.open_form(FormState::task(FormKind::EditTask { task_id }, form));
}

fn add_column(app: &mut App) {
    if let Some(column_id) = app.commit(Action::AddColumn { title: None }) {
        app.select_column(&column_id);
        let title = app
            .board()
            .column(&column_id)
            .map(|c| c.title.clone())
            .unwrap_or_default();
        app.set_status(format!("added \"{}\" (r to rename)", title));
    }
}

fn open_rename_column(app: &mut App) {
    if let Some(column) = app.current_column() {
        let form = FormState::column(column.id.clone(), column.title.clone());
        app.open_form(form);
    }
}

/// Move the selected task to the end of the neighbouring column
fn move_task_across(app: &mut App, delta: isize) {
    let Some(task_id) = app.selected_task_id() else {
        return;
    };
    let board = app.board();
    let target = app.cursor.column as isize + delta;
    if target < 0 || target as usize >= board.columns.len() {
        return;
    }
    let action = Action::MoveTask {
        task_id: task_id.clone(),
        from_column_id: board.columns[app.cursor.column].id.clone(),
        to_column_id: board.columns[target as usize].id.clone(),
        index: None,
    };
    app.commit(action);
    app.select_task(&task_id);
}

/// Move the selected task one slot up or down in its column
fn move_task_within(app: &mut App, delta: isize) {
    let Some(task_id) = app.selected_task_id() else {
        return;
    };
    let Some(column) = app.current_column() else {
        return;
    };
    let Some(pos) = column.task_ids.iter().position(|id| *id == task_id) else {
        return;
    };
    let last = column.task_ids.len() - 1;
    let next = (pos as isize + delta).clamp(0, last as isize) as usize;
    if next == pos {
        return;
    }
    let column_id = column.id.clone();
    app.commit(Action::MoveTask {
        task_id: task_id.clone(),
        from_column_id: column_id.clone(),
        to_column_id: column_id,
        index: Some(next),
    });
    app.select_task(&task_id);
}

fn move_column(app: &mut App, delta: isize) {
    let count = app.board().columns.len();
    let Some(column) = app.current_column() else {
        return;
    };
    let column_id = column.id.clone();
    let next = (app.cursor.column as isize + delta).clamp(0, count as isize - 1) as usize;
    if next == app.cursor.column {
        return;
    }
    app.commit(Action::MoveColumn {
        column_id: column_id.clone(),
        index: Some(next),
    });
    app.select_column(&column_id);
}
