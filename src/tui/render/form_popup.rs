use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::util::unicode::{byte_offset_to_display_col, display_width};

use super::helpers::centered_rect;

const POPUP_WIDTH: u16 = 56;

/// Render the task / column form as a centred popup
pub fn render_form_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(form) = &app.form else {
        return;
    };
    let theme = &app.theme;
    let bg = theme.surface;

    // Label + input per field, blank between fields, error line, hint line
    let height = form.fields.len() as u16 * 3 + 3 + 2;
    let popup = centered_rect(POPUP_WIDTH, height, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.highlight))
        .style(Style::default().bg(bg))
        .title(Line::from(Span::styled(
            format!(" {} ", form.heading()),
            Style::default()
                .fg(theme.text_bright)
                .add_modifier(Modifier::BOLD),
        )));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let input_w = (inner.width as usize).saturating_sub(2);
    let mut lines: Vec<Line> = Vec::new();
    let mut cursor_pos = None;
    for (i, field) in form.fields.iter().enumerate() {
        let focused = i == form.focus;
        let label_style = if focused {
            Style::default().fg(theme.highlight).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.dim)
        };
        lines.push(Line::from(Span::styled(format!(" {}", field.label), label_style)));

        // Keep the cursor inside the visible window of long values
        let col = byte_offset_to_display_col(&field.value, field.cursor);
        let shown = if focused && col >= input_w {
            let skip = col + 1 - input_w;
            tail_from_col(&field.value, skip)
        } else {
            field.value.clone()
        };
        let input_style = Style::default()
            .fg(theme.text_bright)
            .bg(if focused { theme.selection_bg } else { bg });
        let padded = format!(
            "{}{}",
            shown,
            " ".repeat(input_w.saturating_sub(display_width(&shown)))
        );
        lines.push(Line::from(vec![
            Span::raw(" "),
            Span::styled(padded, input_style),
        ]));
        if focused {
            let visible_col = col.min(input_w.saturating_sub(1)) as u16;
            cursor_pos = Some(Position::new(
                inner.x + 1 + visible_col,
                inner.y + lines.len() as u16 - 1,
            ));
        }
        lines.push(Line::from(""));
    }

    match &form.error {
        Some(err) => lines.push(Line::from(Span::styled(
            format!(" {}", err),
            Style::default().fg(theme.red),
        ))),
        None => lines.push(Line::from("")),
    }
    lines.push(Line::from(Span::styled(
        " Tab next field  Enter save  Esc cancel",
        Style::default().fg(theme.dim),
    )));

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), inner);
    if let Some(pos) = cursor_pos
        && inner.contains(pos)
    {
        frame.set_cursor_position(pos);
    }
}

/// The part of `s` starting at display column `skip`
fn tail_from_col(s: &str, skip: usize) -> String {
    let mut width = 0;
    for (i, c) in s.char_indices() {
        if width >= skip {
            return s[i..].to_string();
        }
        width += display_width(c.encode_utf8(&mut [0; 4]));
    }
    String::new()
}
