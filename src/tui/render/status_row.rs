use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

use super::helpers::spans_width;

const NAVIGATE_HINT: &str = "n new  e edit  d delete  H/L move  a column  t theme  ? help";

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let (left, hint): (Vec<Span>, &str) = if app.drag.is_dragging() {
        let what = if app.drag.dragged_task().is_some() {
            "task"
        } else {
            "column"
        };
        (
            vec![Span::styled(
                format!("moving {}", what),
                Style::default().fg(app.theme.highlight).bg(bg),
            )],
            "release to drop  Esc cancel",
        )
    } else {
        match app.mode {
            Mode::Navigate => {
                let left = match &app.status_message {
                    Some(msg) => {
                        let fg = if app.status_is_error {
                            app.theme.red
                        } else {
                            app.theme.text
                        };
                        vec![Span::styled(msg.clone(), Style::default().fg(fg).bg(bg))]
                    }
                    None => Vec::new(),
                };
                let hint = if app.ui.show_key_hints { NAVIGATE_HINT } else { "" };
                (left, hint)
            }
            Mode::Form => (Vec::new(), "Tab next field  Enter save  Esc cancel"),
            Mode::Confirm => (Vec::new(), "y confirm  n cancel"),
        }
    };

    let mut spans = left;
    let content_width = spans_width(&spans);
    let hint_width = hint.chars().count();
    if !hint.is_empty() && content_width + hint_width < width {
        spans.push(Span::styled(
            " ".repeat(width - content_width - hint_width),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::{TERM_W, app_with_tasks, render_to_string};

    #[test]
    fn error_message_shown() {
        let mut app = app_with_tasks();
        app.set_error("not saved: disk full");
        let output = render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert_eq!(output, "not saved: disk full");
    }

    #[test]
    fn key_hints_opt_in() {
        let mut app = app_with_tasks();
        let quiet = render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert_eq!(quiet, "");

        app.ui.show_key_hints = true;
        let output = render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert!(output.ends_with(NAVIGATE_HINT));
    }

    #[test]
    fn drag_hint() {
        let mut app = app_with_tasks();
        let task_id = app.board().columns[0].task_ids[0].clone();
        let column_id = app.board().columns[0].id.clone();
        app.drag.start_task_drag(&task_id, &column_id);
        let output = render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert!(output.starts_with("moving task"));
        assert!(output.ends_with("Esc cancel"));
    }
}
