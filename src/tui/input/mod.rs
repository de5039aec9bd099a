mod confirm;
mod form;
mod mouse;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};

pub use mouse::handle_mouse;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Ctrl-C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // A drag in progress only listens for Esc
    if app.drag.is_dragging() {
        if key.code == KeyCode::Esc {
            mouse::cancel_drag(app);
        }
        return;
    }

    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return;
    }

    let key = normalize_key(key);
    match app.mode {
        Mode::Navigate => navigate::handle_navigate(app, key),
        Mode::Form => form::handle_form(app, key),
        Mode::Confirm => confirm::handle_confirm(app, key),
    }
}

/// Handle a bracketed paste. Only the form takes text; newlines become spaces.
pub fn handle_paste(app: &mut App, text: &str) {
    if app.mode != Mode::Form || text.is_empty() {
        return;
    }
    let clean = text.replace(['\r', '\n'], " ");
    form::insert_str(app, &clean);
}

/// Some terminals report Shift+h as a lowercase char with SHIFT set
fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
        && c.is_ascii_lowercase()
    {
        key.code = KeyCode::Char(c.to_ascii_uppercase());
    }
    key
}
