//! Mouse drag and drop.
//!
//! A left press on a task or column arms a drag; the first motion event
//! starts it. Motion feeds the pointer and the hit-tested container into
//! the drag engine, release commits whatever the engine returns.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::ops::board_ops::Action;
use crate::ops::drag::DropTarget;
use crate::ops::form::TaskForm;
use crate::tui::app::{App, FormKind, FormState, Hit, Mode, Press};

pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    // Popups own the screen
    if app.mode != Mode::Navigate || app.show_help {
        return;
    }
    let (x, y) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => press(app, x, y),
        MouseEventKind::Drag(MouseButton::Left) => drag_to(app, x, y),
        MouseEventKind::Up(MouseButton::Left) => release(app, x, y),
        MouseEventKind::ScrollDown => {
            app.cursor.task = app.cursor.task.saturating_add(1);
            app.clamp_cursor();
        }
        MouseEventKind::ScrollUp => {
            app.cursor.task = app.cursor.task.saturating_sub(1);
        }
        _ => {}
    }
}

fn press(app: &mut App, x: u16, y: u16) {
    cancel_drag(app);
    let Some(hit) = app.layout.hit(x, y) else {
        return;
    };
    match &hit {
        Hit::Task { task_id, .. } => {
            let task_id = task_id.clone();
            app.select_task(&task_id);
        }
        Hit::Column { column_id } => {
            let column_id = column_id.clone();
            app.select_column(&column_id);
        }
        Hit::AddTask { column_id } => {
            let column_id = column_id.clone();
            app.select_column(&column_id);
            app.open_form(FormState::task(
                FormKind::AddTask { column_id },
                TaskForm::default(),
            ));
            return;
        }
    }
    app.press = Some(Press { x, y, hit });
}

fn drag_to(app: &mut App, x: u16, y: u16) {
    if !app.drag.is_dragging() {
        // Motion within the pressed cell is still a click
        let moved = app.press.as_ref().is_some_and(|p| (p.x, p.y) != (x, y));
        if !moved || !begin_drag(app) {
            return;
        }
    }
    app.pointer = Some((x, y));
    update_targets(app, x, y);
}

/// Turn the armed press into a drag. Returns false when nothing was pressed.
///
/// The whole column is the column drag source; a press that landed on a
/// card turns the column drag down and drags the card instead.
fn begin_drag(app: &mut App) -> bool {
    let Some(press) = app.press.take() else {
        return false;
    };
    let origin_on_task = matches!(press.hit, Hit::Task { .. });
    let column_id = match &press.hit {
        Hit::Task { column_id, .. } | Hit::Column { column_id } => column_id.clone(),
        Hit::AddTask { .. } => return false,
    };
    if app.drag.start_column_drag(&column_id, origin_on_task) {
        tracing::debug!(%column_id, "column drag started");
        return true;
    }
    if let Hit::Task { task_id, .. } = press.hit {
        tracing::debug!(%task_id, %column_id, "task drag started");
        app.drag.start_task_drag(&task_id, &column_id);
        return true;
    }
    false
}

/// Recompute placeholders for the pointer position
fn update_targets(app: &mut App, x: u16, y: u16) {
    if let Some(task_id) = app.drag.dragged_task().map(str::to_string) {
        let over = app.layout.column_at(x, y).map(|c| c.column_id.clone());
        let others: Vec<String> = app
            .layout
            .columns
            .iter()
            .map(|c| c.column_id.clone())
            .filter(|id| Some(id) != over.as_ref())
            .collect();
        for column_id in others {
            app.drag.drag_leave(&DropTarget::TaskList(column_id));
        }
        if let Some(column_id) = over {
            let siblings = app.layout.task_slots(&column_id, Some(&task_id));
            app.drag.drag_over_tasks(&column_id, &siblings, y as f64);
        }
    } else if let Some(column_id) = app.drag.dragged_column().map(str::to_string) {
        if app.layout.in_strip(x, y) {
            let siblings = app.layout.column_slots(Some(&column_id));
            app.drag.drag_over_board(&siblings, x as f64);
        } else {
            app.drag.drag_leave(&DropTarget::Board);
        }
    }
}

fn release(app: &mut App, x: u16, y: u16) {
    app.press = None;
    if !app.drag.is_dragging() {
        return;
    }
    update_targets(app, x, y);

    let action = if app.drag.dragged_task().is_some() {
        app.layout
            .column_at(x, y)
            .map(|c| c.column_id.clone())
            .and_then(|column_id| app.drag.drop_on_tasks(&column_id))
    } else if app.layout.in_strip(x, y) {
        app.drag.drop_on_board()
    } else {
        None
    };
    cancel_drag(app);

    match action {
        Some(Action::MoveTask {
            task_id,
            from_column_id,
            to_column_id,
            index,
        }) => {
            app.commit(Action::MoveTask {
                task_id: task_id.clone(),
                from_column_id,
                to_column_id,
                index,
            });
            app.select_task(&task_id);
        }
        Some(Action::MoveColumn { column_id, index }) => {
            app.commit(Action::MoveColumn {
                column_id: column_id.clone(),
                index,
            });
            app.select_column(&column_id);
        }
        Some(other) => {
            app.commit(other);
        }
        None => tracing::debug!(x, y, "drop outside any target"),
    }
}

/// End the gesture without committing; every placeholder goes
pub(super) fn cancel_drag(app: &mut App) {
    app.drag.end();
    app.pointer = None;
    app.press = None;
}
