use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::ThemeKind;
use crate::tui::app::App;

use super::helpers::{progress_bar, spans_width};

const BAR_WIDTH: usize = 12;

/// Title on the left, overall progress and theme on the right, then a rule
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let overall = app.store.progress().overall;

    let mut spans = vec![
        Span::styled(
            " [#] ",
            Style::default().fg(app.theme.highlight).bg(bg),
        ),
        Span::styled(
            "taskboard",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    let theme_label = match app.theme.kind {
        ThemeKind::Dark => "\u{263E} dark",
        ThemeKind::Light => "\u{2600} light",
    };
    let right = vec![
        Span::styled("Overall ", Style::default().fg(app.theme.dim).bg(bg)),
        Span::styled(
            progress_bar(overall.percent, BAR_WIDTH),
            Style::default().fg(app.theme.green).bg(bg),
        ),
        Span::styled(
            format!(
                " {}% ({}/{})   {} ",
                overall.percent, overall.done, overall.total, theme_label
            ),
            Style::default().fg(app.theme.text).bg(bg),
        ),
    ];

    let left_w = spans_width(&spans);
    let right_w = spans_width(&right);
    if left_w + right_w < width {
        spans.push(Span::styled(
            " ".repeat(width - left_w - right_w),
            Style::default().bg(bg),
        ));
        spans.extend(right);
    }

    let rule = Span::styled(
        "\u{2500}".repeat(width),
        Style::default().fg(app.theme.dim).bg(bg),
    );
    let paragraph =
        Paragraph::new(vec![Line::from(spans), Line::from(rule)]).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
