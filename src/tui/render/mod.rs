pub mod board_view;
pub mod confirm_popup;
pub mod form_popup;
pub mod header;
pub mod help_overlay;
mod helpers;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::{App, Mode};

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header (2 rows) | board | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // title + overall progress, separator
            Constraint::Min(1),    // columns
            Constraint::Length(1), // status row
        ])
        .split(area);

    header::render_header(frame, app, chunks[0]);

    // Records the hit boxes the mouse handler uses
    board_view::render_board(frame, app, chunks[1]);

    if let Some((x, y)) = app.pointer {
        board_view::render_drag_ghost(frame, app, x, y);
    }

    match app.mode {
        Mode::Form => form_popup::render_form_popup(frame, app, area),
        Mode::Confirm => confirm_popup::render_confirm_popup(frame, app, area),
        Mode::Navigate => {}
    }

    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }

    status_row::render_status_row(frame, app, chunks[2]);
}
