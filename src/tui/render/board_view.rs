use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::model::{Column, Task};
use crate::ops::drag::{DragPayload, DropTarget};
use crate::ops::progress::Progress;
use crate::tui::app::{App, BoardLayout, ColumnBox, TaskBox};
use crate::util::unicode::{display_width, truncate_to_width};

use super::helpers::progress_bar;

/// Narrowest a column gets before the strip scrolls horizontally
pub const MIN_COLUMN_WIDTH: u16 = 24;

const PLACEHOLDER_LABEL: &str = " drop here ";

/// Render the column strip and record its hit boxes in `app.layout`
pub fn render_board(frame: &mut Frame, app: &mut App, area: Rect) {
    app.layout = BoardLayout {
        strip: area,
        order: app.board().columns.iter().map(|c| c.id.clone()).collect(),
        columns: Vec::new(),
    };

    let count = app.board().columns.len();
    if count == 0 {
        let hint = Paragraph::new(Line::from(Span::styled(
            " No columns. Press a to add one.",
            Style::default().fg(app.theme.dim).bg(app.theme.background),
        )));
        frame.render_widget(hint, area);
        return;
    }

    let visible = ((area.width / MIN_COLUMN_WIDTH).max(1) as usize).min(count);
    keep_cursor_column_visible(app, visible, count);

    let chunks = Layout::horizontal(vec![Constraint::Ratio(1, visible as u32); visible]).split(area);
    let progress = app.store.progress();
    for (slot, column_idx) in (app.column_scroll..app.column_scroll + visible).enumerate() {
        let column_box = render_column(frame, app, &progress, column_idx, chunks[slot]);
        app.layout.columns.push(column_box);
    }

    if let Some(index) = app.drag.placeholder(&DropTarget::Board) {
        render_column_marker(frame, app, index);
    }
}

fn keep_cursor_column_visible(app: &mut App, visible: usize, count: usize) {
    let cursor = app.cursor.column;
    if cursor < app.column_scroll {
        app.column_scroll = cursor;
    } else if cursor >= app.column_scroll + visible {
        app.column_scroll = cursor + 1 - visible;
    }
    app.column_scroll = app.column_scroll.min(count - visible);
}

/// Rows a task card occupies
fn card_height(task: &Task) -> u16 {
    let meta = !task.tags.is_empty() || task.due_date.is_some();
    1 + meta as u16 + !task.description.is_empty() as u16
}

/// One rendered row group inside a task list
enum ListItem<'a> {
    Card { index: usize, task: &'a Task },
    Placeholder,
}

fn render_column(
    frame: &mut Frame,
    app: &App,
    progress: &Progress,
    column_idx: usize,
    area: Rect,
) -> ColumnBox {
    let board = app.board();
    let column = &board.columns[column_idx];
    let theme = &app.theme;
    let is_current = column_idx == app.cursor.column;
    let is_dragged = app.drag.dragged_column() == Some(column.id.as_str());
    let count = progress
        .per_column
        .get(&column.id)
        .copied()
        .unwrap_or_default();

    let surface = Style::default().bg(theme.surface);
    let border_color = if is_current && !is_dragged {
        theme.selection_border
    } else {
        theme.dim
    };
    let title_style = if is_dragged {
        Style::default().fg(theme.dim)
    } else {
        Style::default()
            .fg(theme.text_bright)
            .add_modifier(Modifier::BOLD)
    };
    let title_room = (area.width as usize).saturating_sub(12);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .style(surface)
        .title(Line::from(Span::styled(
            format!(" {} ", truncate_to_width(&column.title, title_room)),
            title_style,
        )))
        .title(
            Line::from(Span::styled(
                format!(" {}/{} ", count.done, count.total),
                Style::default().fg(theme.dim),
            ))
            .right_aligned(),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut column_box = ColumnBox {
        column_id: column.id.clone(),
        area,
        tasks: Vec::new(),
        add_button: Rect::default(),
    };
    if inner.height == 0 || inner.width < 6 {
        return column_box;
    }

    // Progress row: bar plus percentage
    let bar_width = (inner.width as usize).saturating_sub(6);
    let progress_line = Line::from(vec![
        Span::styled(
            format!(" {}", progress_bar(count.percent, bar_width)),
            Style::default().fg(theme.green),
        ),
        Span::styled(
            format!("{:>4}%", count.percent),
            Style::default().fg(theme.text),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(progress_line).style(surface),
        Rect::new(inner.x, inner.y, inner.width, 1),
    );

    let list = Rect::new(inner.x, inner.y + 1, inner.width, inner.height - 1);
    render_task_list(frame, app, column, is_current, list, &mut column_box);
    column_box
}

fn render_task_list(
    frame: &mut Frame,
    app: &App,
    column: &Column,
    is_current: bool,
    list: Rect,
    column_box: &mut ColumnBox,
) {
    let board = app.board();
    let tasks: Vec<&Task> = board.column_tasks(column).collect();
    let placeholder = app
        .drag
        .placeholder(&DropTarget::TaskList(column.id.clone()));
    let dragged = app.drag.dragged_task();

    // Placeholder index counts cards without the dragged one
    let mut items = Vec::with_capacity(tasks.len() + 1);
    let mut candidates = 0;
    for (index, task) in tasks.iter().copied().enumerate() {
        if dragged != Some(task.id.as_str()) {
            if placeholder == Some(candidates) {
                items.push(ListItem::Placeholder);
            }
            candidates += 1;
        }
        items.push(ListItem::Card { index, task });
    }
    if placeholder.is_some_and(|p| p >= candidates) {
        items.push(ListItem::Placeholder);
    }

    // Scroll the current column so the selected card (and the add row) fit
    let mut skip = 0;
    if is_current && app.cursor.task < tasks.len() {
        let sel = app.cursor.task;
        let room = list.height.saturating_sub(1);
        let span = |from: usize| -> u16 { tasks[from..=sel].iter().map(|t| card_height(t) + 1).sum() };
        while skip < sel && span(skip) > room {
            skip += 1;
        }
    }

    let bottom = list.y + list.height;
    let mut y = list.y;
    for item in items {
        match item {
            ListItem::Card { index, task } => {
                let h = card_height(task);
                // Off-screen cards keep a zero-height slot so insertion
                // indices still count them
                if index < skip {
                    column_box.tasks.push(TaskBox {
                        task_id: task.id.clone(),
                        area: Rect::new(list.x, list.y, list.width, 0),
                    });
                    continue;
                }
                if y + h > bottom {
                    column_box.tasks.push(TaskBox {
                        task_id: task.id.clone(),
                        area: Rect::new(list.x, bottom, list.width, 0),
                    });
                    y = bottom;
                    continue;
                }
                let area = Rect::new(list.x, y, list.width, h);
                let selected = is_current && index == app.cursor.task;
                let ghost = dragged == Some(task.id.as_str());
                render_card(frame, app, task, area, selected, ghost);
                column_box.tasks.push(TaskBox {
                    task_id: task.id.clone(),
                    area,
                });
                y = (y + h + 1).min(bottom);
            }
            ListItem::Placeholder => {
                if y < bottom {
                    render_placeholder(frame, app, Rect::new(list.x, y, list.width, 1));
                    y = (y + 2).min(bottom);
                }
            }
        }
    }

    if y < bottom {
        let add_button = Rect::new(list.x, y, list.width, 1);
        frame.render_widget(
            Paragraph::new(Span::styled(
                " + add task",
                Style::default().fg(app.theme.dim),
            ))
            .style(Style::default().bg(app.theme.surface)),
            add_button,
        );
        column_box.add_button = add_button;
    }
}

fn render_card(frame: &mut Frame, app: &App, task: &Task, area: Rect, selected: bool, ghost: bool) {
    let theme = &app.theme;
    let bg = if selected {
        theme.selection_bg
    } else {
        theme.surface
    };
    let width = area.width as usize;
    let marker = if selected {
        Span::styled("\u{258C}", Style::default().fg(theme.selection_border).bg(bg))
    } else {
        Span::styled(" ", Style::default().bg(bg))
    };

    let (check, check_color) = if task.completed {
        ("[x] ", theme.green)
    } else {
        ("[ ] ", theme.dim)
    };
    let mut title_style = Style::default().fg(if selected {
        theme.text_bright
    } else {
        theme.text
    });
    if task.completed {
        title_style = title_style.fg(theme.dim).add_modifier(Modifier::CROSSED_OUT);
    }
    let mut lines = vec![Line::from(vec![
        marker.clone(),
        Span::styled(check, Style::default().fg(check_color)),
        Span::styled(
            truncate_to_width(&task.title, width.saturating_sub(5)),
            title_style,
        ),
    ])];

    if !task.tags.is_empty() || task.due_date.is_some() {
        let mut meta = vec![marker.clone(), Span::raw("    ")];
        for tag in &task.tags {
            meta.push(Span::styled(
                format!("#{} ", tag),
                Style::default().fg(theme.tag_color(tag)),
            ));
        }
        if let Some(due) = task.due_date {
            meta.push(Span::styled(
                format!("due {}", due.format("%Y-%m-%d")),
                Style::default().fg(theme.yellow),
            ));
        }
        lines.push(Line::from(meta));
    }

    if !task.description.is_empty() {
        let first = task.description.lines().next().unwrap_or_default();
        let room = width.saturating_sub(5);
        let text = if task.description.lines().nth(1).is_some() && display_width(first) < room {
            format!("{}\u{2026}", first)
        } else {
            truncate_to_width(first, room)
        };
        lines.push(Line::from(vec![
            marker,
            Span::raw("    "),
            Span::styled(text, Style::default().fg(theme.dim)),
        ]));
    }

    let mut paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    if ghost {
        paragraph = paragraph.style(
            Style::default()
                .bg(theme.surface)
                .fg(theme.dim)
                .add_modifier(Modifier::DIM),
        );
    }
    frame.render_widget(paragraph, area);
}

fn render_placeholder(frame: &mut Frame, app: &App, area: Rect) {
    let width = area.width as usize;
    let label_w = display_width(PLACEHOLDER_LABEL);
    let side = width.saturating_sub(label_w) / 2;
    let rest = width.saturating_sub(label_w + side);
    let text = if width > label_w {
        format!(
            "{}{}{}",
            "\u{254C}".repeat(side),
            PLACEHOLDER_LABEL,
            "\u{254C}".repeat(rest)
        )
    } else {
        "\u{254C}".repeat(width)
    };
    frame.render_widget(
        Paragraph::new(Span::styled(
            text,
            Style::default()
                .fg(app.theme.placeholder)
                .bg(app.theme.surface),
        )),
        area,
    );
}

/// Vertical bar where a dragged column would land
fn render_column_marker(frame: &mut Frame, app: &App, index: usize) {
    let Some(x) = app.layout.column_marker_x(index, app.drag.dragged_column()) else {
        return;
    };
    let strip = app.layout.strip;
    let lines: Vec<Line> = (0..strip.height)
        .map(|_| Line::from("\u{2503}"))
        .collect();
    frame.render_widget(
        Paragraph::new(lines).style(Style::default().fg(app.theme.placeholder)),
        Rect::new(x, strip.y, 1, strip.height),
    );
}

/// Label following the pointer while dragging
pub fn render_drag_ghost(frame: &mut Frame, app: &App, x: u16, y: u16) {
    let label = match app.drag.payload() {
        Some(DragPayload::Task { task_id, .. }) => app.board().task(&task_id).map(|t| t.title.clone()),
        Some(DragPayload::Column { column_id }) => {
            app.board().column(&column_id).map(|c| c.title.clone())
        }
        None => None,
    };
    let Some(label) = label else {
        return;
    };
    let screen = frame.area();
    let text = format!(" \u{2807} {} ", truncate_to_width(&label, 24));
    let x = (x + 1).min(screen.right().saturating_sub(1));
    let width = (display_width(&text) as u16).min(screen.right() - x);
    if width == 0 || y >= screen.bottom() {
        return;
    }
    let area = Rect::new(x, y, width, 1);
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(Span::styled(
            text,
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.highlight)
                .add_modifier(Modifier::BOLD),
        )),
        area,
    );
}
