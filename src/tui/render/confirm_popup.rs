use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use crate::tui::app::App;
use crate::util::unicode::display_width;

use super::helpers::centered_rect;

/// Render the y/n prompt for a destructive action
pub fn render_confirm_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(confirm) = &app.confirm else {
        return;
    };
    let theme = &app.theme;
    let bg = theme.surface;

    let width = (display_width(&confirm.prompt) as u16 + 4).clamp(30, 60);
    let popup = centered_rect(width, 6, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.red))
        .style(Style::default().bg(bg))
        .title(Line::from(Span::styled(
            " Confirm ",
            Style::default().fg(theme.red).add_modifier(Modifier::BOLD),
        )));

    let lines = vec![
        Line::from(Span::styled(
            confirm.prompt.clone(),
            Style::default().fg(theme.text_bright),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(theme.highlight).add_modifier(Modifier::BOLD)),
            Span::styled(" yes   ", Style::default().fg(theme.text)),
            Span::styled("n", Style::default().fg(theme.highlight).add_modifier(Modifier::BOLD)),
            Span::styled(" no", Style::default().fg(theme.text)),
        ]),
    ];
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true })
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, popup);
}

#[cfg(test)]
mod tests {
    use crate::ops::board_ops::Action;
    use crate::tui::render::test_helpers::{TERM_H, TERM_W, app_with_tasks, render_app};

    #[test]
    fn prompt_names_the_task() {
        let mut app = app_with_tasks();
        let task_id = app.board().columns[0].task_ids[0].clone();
        app.request(Action::DeleteTask { task_id });
        let output = render_app(&mut app, TERM_W, TERM_H);
        assert!(output.contains("Delete task \"Design schema\"?"));
        assert!(output.contains("y yes"));
    }
}
