use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::board_ops::Action;
use crate::tui::app::{App, Mode};

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            let state = app.confirm.take();
            app.mode = Mode::Navigate;
            if let Some(state) = state {
                let done = match &state.action {
                    Action::DeleteTask { .. } => "task deleted",
                    Action::DeleteColumn { .. } => "column deleted",
                    Action::Reset => "board reset",
                    _ => "done",
                };
                app.commit(state.action);
                if !app.status_is_error {
                    app.set_status(done);
                }
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.confirm = None;
            app.mode = Mode::Navigate;
            app.set_status("cancelled");
        }
        _ => {}
    }
}
