use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::storage::MemoryKvStore;
use crate::model::{TaskFields, UiConfig};
use crate::ops::board_ops::Action;
use crate::ops::store::BoardStore;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Render the whole screen for `app`
pub fn render_app(app: &mut App, w: u16, h: u16) -> String {
    render_to_string(w, h, |frame, _| crate::tui::render::render(frame, app))
}

fn add(store: &mut BoardStore, column: usize, fields: TaskFields) -> String {
    let column_id = store.board().columns[column].id.clone();
    store
        .mutate(Action::AddTask { column_id, fields })
        .unwrap()
        .unwrap()
}

/// Default board with:
/// Backlog: "Design schema" #design (with description), "Fix login" due 2025-03-01
/// Done: "Set up CI" (completed)
pub fn app_with_tasks() -> App {
    let mut store = BoardStore::open(Box::new(MemoryKvStore::new()), "taskboard");
    add(
        &mut store,
        0,
        TaskFields {
            title: "Design schema".into(),
            description: "Tables and indexes".into(),
            tags: vec!["design".into()],
            ..Default::default()
        },
    );
    add(
        &mut store,
        0,
        TaskFields {
            title: "Fix login".into(),
            due_date: chrono::NaiveDate::from_ymd_opt(2025, 3, 1),
            ..Default::default()
        },
    );
    let ci = add(
        &mut store,
        0,
        TaskFields {
            title: "Set up CI".into(),
            ..Default::default()
        },
    );
    let from = store.board().columns[0].id.clone();
    let to = store.board().columns[2].id.clone();
    store
        .mutate(Action::MoveTask {
            task_id: ci,
            from_column_id: from,
            to_column_id: to,
            index: None,
        })
        .unwrap();
    App::new(store, UiConfig::default())
}
