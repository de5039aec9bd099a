use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::tui::app::App;

use super::helpers::centered_rect;

const BINDINGS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigate",
        &[
            ("h/l \u{2190}\u{2192}", "Previous / next column"),
            ("j/k \u{2191}\u{2193}", "Next / previous task"),
            ("g/G", "First / last task"),
        ],
    ),
    (
        "Tasks",
        &[
            ("n", "New task in column"),
            ("e Enter", "Edit task"),
            ("d", "Delete task"),
            ("H/L", "Move task to previous / next column"),
            ("J/K", "Move task down / up"),
        ],
    ),
    (
        "Columns",
        &[
            ("a", "Add column"),
            ("r", "Rename column"),
            ("D", "Delete column and its tasks"),
            ("< >", "Move column left / right"),
        ],
    ),
    (
        "Board",
        &[
            ("mouse", "Drag tasks and column headers"),
            ("t", "Toggle light / dark theme"),
            ("R", "Reset board"),
            ("q", "Quit"),
        ],
    ),
];

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = theme.surface;
    let key_style = Style::default()
        .fg(theme.highlight)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(theme.text);
    let header_style = Style::default()
        .fg(theme.text_bright)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    for (i, (section, bindings)) in BINDINGS.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(format!(" {}", section), header_style)));
        for (key, desc) in bindings.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<10}", key), key_style),
                Span::styled(*desc, desc_style),
            ]));
        }
    }

    let popup = centered_rect(52, lines.len() as u16 + 2, area);
    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.highlight))
        .style(Style::default().bg(bg))
        .title(Line::from(Span::styled(" Key Bindings ", header_style)));
    frame.render_widget(
        Paragraph::new(lines).block(block).style(Style::default().bg(bg)),
        popup,
    );
}
