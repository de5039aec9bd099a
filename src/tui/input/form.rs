use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::board_ops::Action;
use crate::tui::app::{App, FormKind};
use crate::util::unicode::{next_grapheme_boundary, prev_grapheme_boundary, word_boundary_left};

pub(super) fn handle_form(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => app.close_form(),
        KeyCode::Enter => submit(app),
        KeyCode::Tab | KeyCode::Down => cycle_focus(app, 1),
        KeyCode::BackTab | KeyCode::Up => cycle_focus(app, -1),
        KeyCode::Char('w') if ctrl => edit_field(app, |value, cursor| {
            let start = word_boundary_left(value, *cursor);
            value.replace_range(start..*cursor, "");
            *cursor = start;
        }),
        KeyCode::Char('u') if ctrl => edit_field(app, |value, cursor| {
            value.clear();
            *cursor = 0;
        }),
        KeyCode::Char(c) if !ctrl => insert_str(app, c.encode_utf8(&mut [0; 4])),
        KeyCode::Backspace => edit_field(app, |value, cursor| {
            if let Some(prev) = prev_grapheme_boundary(value, *cursor) {
                value.replace_range(prev..*cursor, "");
                *cursor = prev;
            }
        }),
        KeyCode::Delete => edit_field(app, |value, cursor| {
            if let Some(next) = next_grapheme_boundary(value, *cursor) {
                value.replace_range(*cursor..next, "");
            }
        }),
        KeyCode::Left => edit_field(app, |value, cursor| {
            if let Some(prev) = prev_grapheme_boundary(value, *cursor) {
                *cursor = prev;
            }
        }),
        KeyCode::Right => edit_field(app, |value, cursor| {
            if let Some(next) = next_grapheme_boundary(value, *cursor) {
                *cursor = next;
            }
        }),
        KeyCode::Home => edit_field(app, |_, cursor| *cursor = 0),
        KeyCode::End => edit_field(app, |value, cursor| *cursor = value.len()),
        _ => {}
    }
}

/// Insert text at the cursor of the focused field
pub(super) fn insert_str(app: &mut App, text: &str) {
    edit_field(app, |value, cursor| {
        value.insert_str(*cursor, text);
        *cursor += text.len();
    });
}

fn edit_field(app: &mut App, f: impl FnOnce(&mut String, &mut usize)) {
    if let Some(form) = &mut app.form {
        let field = form.focused_mut();
        f(&mut field.value, &mut field.cursor);
        form.error = None;
    }
}

fn cycle_focus(app: &mut App, delta: isize) {
    if let Some(form) = &mut app.form {
        let n = form.fields.len() as isize;
        form.focus = (form.focus as isize + delta).rem_euclid(n) as usize;
    }
}

/// Validate and commit the form. Invalid input keeps the form open with a message.
fn submit(app: &mut App) {
    let Some(form) = app.form.as_ref() else {
        return;
    };

    let validated = match &form.kind {
        FormKind::RenameColumn { column_id } => Ok(Action::RenameColumn {
            column_id: column_id.clone(),
            title: form.task_form().title,
        }),
        FormKind::AddTask { column_id } => {
            form.task_form()
                .validate()
                .map(|fields| Action::AddTask {
                    column_id: column_id.clone(),
                    fields,
                })
        }
        FormKind::EditTask { task_id } => {
            form.task_form()
                .validate()
                .map(|fields| Action::EditTask {
                    task_id: task_id.clone(),
                    fields,
                })
        }
    };
    let action = match validated {
        Ok(action) => action,
        Err(e) => return reject(app, e.to_string()),
    };

    let edited = match &action {
        Action::EditTask { task_id, .. } => Some(task_id.clone()),
        _ => None,
    };
    app.close_form();
    let created = app.commit(action);
    if let Some(task_id) = created.or(edited) {
        app.select_task(&task_id);
    }
}

fn reject(app: &mut App, message: String) {
    tracing::debug!(%message, "form rejected");
    if let Some(form) = &mut app.form {
        form.error = Some(message.clone());
    }
    app.set_error(message);
}
