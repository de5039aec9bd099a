use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Position, Rect};

use crate::model::{Board, Column, TaskId, UiConfig};
use crate::ops::board_ops::Action;
use crate::ops::drag::DragEngine;
use crate::ops::form::TaskForm;
use crate::ops::reorder::Slot;
use crate::ops::store::{BoardStore, StoreError};

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Task or column form popup is open
    Form,
    /// Waiting for y/n on a destructive action
    Confirm,
}

/// Selected column, and task index within that column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub column: usize,
    pub task: usize,
}

/// What a form submits to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormKind {
    AddTask { column_id: String },
    EditTask { task_id: TaskId },
    RenameColumn { column_id: String },
}

/// One editable line in a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    /// Byte offset of the edit cursor in `value`
    pub cursor: usize,
}

impl FormField {
    fn new(label: &'static str, value: String) -> Self {
        let cursor = value.len();
        FormField {
            label,
            value,
            cursor,
        }
    }
}

/// State of the open form popup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub kind: FormKind,
    pub fields: Vec<FormField>,
    pub focus: usize,
    /// Validation message shown under the fields
    pub error: Option<String>,
}

pub const TITLE_FIELD: usize = 0;
pub const DESCRIPTION_FIELD: usize = 1;
pub const DUE_FIELD: usize = 2;
pub const TAGS_FIELD: usize = 3;

impl FormState {
    /// A task form prefilled from `form`
    pub fn task(kind: FormKind, form: TaskForm) -> Self {
        FormState {
            kind,
            fields: vec![
                FormField::new("Title", form.title),
                FormField::new("Description", form.description),
                FormField::new("Due (YYYY-MM-DD)", form.due_date),
                FormField::new("Tags (comma separated)", form.tags),
            ],
            focus: TITLE_FIELD,
            error: None,
        }
    }

    pub fn column(column_id: String, title: String) -> Self {
        FormState {
            kind: FormKind::RenameColumn { column_id },
            fields: vec![FormField::new("Title", title)],
            focus: TITLE_FIELD,
            error: None,
        }
    }

    pub fn heading(&self) -> &'static str {
        match self.kind {
            FormKind::AddTask { .. } => "New task",
            FormKind::EditTask { .. } => "Edit task",
            FormKind::RenameColumn { .. } => "Rename column",
        }
    }

    pub fn focused_mut(&mut self) -> &mut FormField {
        let focus = self.focus.min(self.fields.len().saturating_sub(1));
        &mut self.fields[focus]
    }

    fn value(&self, idx: usize) -> String {
        self.fields
            .get(idx)
            .map(|f| f.value.clone())
            .unwrap_or_default()
    }

    /// The raw task form behind the fields
    pub fn task_form(&self) -> TaskForm {
        TaskForm {
            title: self.value(TITLE_FIELD),
            description: self.value(DESCRIPTION_FIELD),
            due_date: self.value(DUE_FIELD),
            tags: self.value(TAGS_FIELD),
        }
    }
}

/// A destructive action waiting for confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmState {
    pub prompt: String,
    pub action: Action,
}

/// What sits under a screen cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hit {
    Task { column_id: String, task_id: TaskId },
    /// Column header or empty list space
    Column { column_id: String },
    /// The "+ add task" row at the bottom of a column
    AddTask { column_id: String },
}

/// On-screen rectangle of a task card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskBox {
    pub task_id: TaskId,
    pub area: Rect,
}

/// On-screen rectangles of a rendered column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnBox {
    pub column_id: String,
    pub area: Rect,
    pub tasks: Vec<TaskBox>,
    pub add_button: Rect,
}

/// Hit boxes from the last render, used to turn mouse positions into targets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardLayout {
    /// Area holding the column strip
    pub strip: Rect,
    /// Every board column id in board order, on screen or not
    pub order: Vec<String>,
    /// Columns drawn on screen
    pub columns: Vec<ColumnBox>,
}

impl BoardLayout {
    pub fn in_strip(&self, x: u16, y: u16) -> bool {
        self.strip.contains(Position::new(x, y))
    }

    pub fn column_at(&self, x: u16, y: u16) -> Option<&ColumnBox> {
        self.columns
            .iter()
            .find(|c| c.area.contains(Position::new(x, y)))
    }

    pub fn hit(&self, x: u16, y: u16) -> Option<Hit> {
        let column = self.column_at(x, y)?;
        let pos = Position::new(x, y);
        let column_id = column.column_id.clone();
        if let Some(task) = column.tasks.iter().find(|t| t.area.contains(pos)) {
            return Some(Hit::Task {
                column_id,
                task_id: task.task_id.clone(),
            });
        }
        if column.add_button.contains(pos) {
            return Some(Hit::AddTask { column_id });
        }
        Some(Hit::Column { column_id })
    }

    /// Vertical slots of a column's task cards, `exclude` left out
    pub fn task_slots(&self, column_id: &str, exclude: Option<&str>) -> Vec<Slot> {
        self.columns
            .iter()
            .find(|c| c.column_id == column_id)
            .map(|c| {
                c.tasks
                    .iter()
                    .filter(|t| Some(t.task_id.as_str()) != exclude)
                    .map(|t| Slot::new(t.area.y as f64, t.area.height as f64))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn visible(&self, column_id: &str) -> Option<&ColumnBox> {
        self.columns.iter().find(|c| c.column_id == column_id)
    }

    /// Board position of the first column on screen
    fn first_visible_position(&self) -> Option<usize> {
        let first = self.columns.first()?;
        self.order.iter().position(|id| *id == first.column_id)
    }

    /// Horizontal slots of every board column, `exclude` left out. Columns
    /// scrolled off to the left sit at the strip's left edge, those off to
    /// the right at its right edge, both zero wide, so insertion indices
    /// count the whole board.
    pub fn column_slots(&self, exclude: Option<&str>) -> Vec<Slot> {
        let first = self.first_visible_position();
        self.order
            .iter()
            .enumerate()
            .filter(|(_, id)| Some(id.as_str()) != exclude)
            .map(|(pos, id)| match self.visible(id) {
                Some(c) => Slot::new(c.area.x as f64, c.area.width as f64),
                None if first.is_some_and(|f| pos < f) => Slot::new(self.strip.x as f64, 0.0),
                None => Slot::new(self.strip.right() as f64, 0.0),
            })
            .collect()
    }

    /// Screen x of the marker for a column placeholder at board `index`
    /// (counted without `exclude`)
    pub fn column_marker_x(&self, index: usize, exclude: Option<&str>) -> Option<u16> {
        let last = self
            .columns
            .iter()
            .rev()
            .find(|c| Some(c.column_id.as_str()) != exclude)?;
        let candidates: Vec<(usize, &String)> = self
            .order
            .iter()
            .enumerate()
            .filter(|(_, id)| Some(id.as_str()) != exclude)
            .collect();
        let first = self.first_visible_position();
        match candidates.get(index) {
            Some((_, id)) if self.visible(id).is_some() => self.visible(id).map(|c| c.area.x),
            Some((pos, _)) if first.is_some_and(|f| *pos < f) => Some(self.strip.x),
            _ => Some(last.area.right().saturating_sub(1)),
        }
    }
}

/// A mouse press that turns into a drag once the pointer moves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Press {
    pub x: u16,
    pub y: u16,
    pub hit: Hit,
}

/// Main application state
pub struct App {
    pub store: BoardStore,
    pub ui: UiConfig,
    pub theme: Theme,
    pub mode: Mode,
    pub should_quit: bool,
    pub cursor: Cursor,
    /// First visible column when the board is wider than the screen
    pub column_scroll: usize,
    pub drag: DragEngine,
    pub press: Option<Press>,
    /// Pointer position while dragging
    pub pointer: Option<(u16, u16)>,
    pub layout: BoardLayout,
    pub form: Option<FormState>,
    pub confirm: Option<ConfirmState>,
    pub status_message: Option<String>,
    pub status_is_error: bool,
    pub show_help: bool,
}

impl App {
    pub fn new(store: BoardStore, ui: UiConfig) -> Self {
        let theme = Theme::from_config(store.board().theme, &ui);
        App {
            store,
            ui,
            theme,
            mode: Mode::Navigate,
            should_quit: false,
            cursor: Cursor::default(),
            column_scroll: 0,
            drag: DragEngine::new(),
            press: None,
            pointer: None,
            layout: BoardLayout::default(),
            form: None,
            confirm: None,
            status_message: None,
            status_is_error: false,
            show_help: false,
        }
    }

    pub fn board(&self) -> &Board {
        self.store.board()
    }

    pub fn current_column(&self) -> Option<&Column> {
        self.board().columns.get(self.cursor.column)
    }

    pub fn selected_task_id(&self) -> Option<TaskId> {
        let column = self.current_column()?;
        self.board()
            .column_tasks(column)
            .nth(self.cursor.task)
            .map(|t| t.id.clone())
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_is_error = false;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_is_error = true;
    }

    /// Run `action`, asking first when it is destructive
    pub fn request(&mut self, action: Action) {
        if action.is_destructive() {
            let prompt = self.confirm_prompt(&action);
            self.confirm = Some(ConfirmState { prompt, action });
            self.mode = Mode::Confirm;
        } else {
            self.commit(action);
        }
    }

    /// Apply `action` through the store. Returns the created id, if any.
    pub fn commit(&mut self, action: Action) -> Option<String> {
        match self.store.mutate(action) {
            Ok(created) => {
                self.after_change();
                created
            }
            Err(StoreError::Storage(e)) => {
                // The board changed in memory; only the write failed
                self.after_change();
                self.set_error(format!("not saved: {}", e));
                None
            }
            Err(e) => {
                self.set_error(e.to_string());
                None
            }
        }
    }

    /// Sync derived UI state with the board after a mutation
    pub fn after_change(&mut self) {
        let kind = self.store.board().theme;
        if self.theme.kind != kind {
            self.theme = Theme::from_config(kind, &self.ui);
        }
        self.clamp_cursor();
    }

    pub fn clamp_cursor(&mut self) {
        let columns = self.board().columns.len();
        self.cursor.column = self.cursor.column.min(columns.saturating_sub(1));
        let tasks = self
            .current_column()
            .map_or(0, |c| self.board().column_tasks(c).count());
        self.cursor.task = self.cursor.task.min(tasks.saturating_sub(1));
    }

    /// Put the cursor on `task_id`, wherever it is
    pub fn select_task(&mut self, task_id: &str) {
        let board = self.store.board();
        let found = board.columns.iter().enumerate().find_map(|(ci, column)| {
            board
                .column_tasks(column)
                .position(|t| t.id == task_id)
                .map(|ti| (ci, ti))
        });
        if let Some((column, task)) = found {
            self.cursor = Cursor { column, task };
        }
    }

    pub fn select_column(&mut self, column_id: &str) {
        if let Some(idx) = self.board().column_index(column_id) {
            self.cursor = Cursor {
                column: idx,
                task: 0,
            };
        }
    }

    pub fn open_form(&mut self, form: FormState) {
        self.form = Some(form);
        self.mode = Mode::Form;
    }

    pub fn close_form(&mut self) {
        self.form = None;
        self.mode = Mode::Navigate;
    }

    fn confirm_prompt(&self, action: &Action) -> String {
        let board = self.board();
        match action {
            Action::DeleteTask { task_id } => {
                let title = board.task(task_id).map_or("", |t| t.title.as_str());
                format!("Delete task \"{}\"?", title)
            }
            Action::DeleteColumn { column_id } => match board.column(column_id) {
                Some(c) => format!(
                    "Delete column \"{}\" and its {} task(s)?",
                    c.title,
                    c.task_ids.len()
                ),
                None => "Delete column?".to_string(),
            },
            Action::Reset => "Reset the board? All columns and tasks are lost.".to_string(),
            _ => "Are you sure?".to_string(),
        }
    }
}

/// Run the TUI application
pub fn run(data_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let (store, config) = BoardStore::open_dir(data_dir)?;
    let mut app = App::new(store, config.ui);
    tracing::info!(data_dir = %data_dir.display(), "tui started");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::storage::MemoryKvStore;
    use crate::model::ThemeKind;
    use crate::ops::reorder::insertion_index;

    fn app() -> App {
        let store = BoardStore::open(Box::new(MemoryKvStore::new()), "taskboard");
        App::new(store, UiConfig::default())
    }

    fn layout() -> BoardLayout {
        BoardLayout {
            strip: Rect::new(0, 2, 60, 20),
            order: vec!["c1".into(), "c2".into()],
            columns: vec![
                ColumnBox {
                    column_id: "c1".into(),
                    area: Rect::new(0, 2, 30, 20),
                    tasks: vec![
                        TaskBox {
                            task_id: "a".into(),
                            area: Rect::new(1, 4, 28, 2),
                        },
                        TaskBox {
                            task_id: "b".into(),
                            area: Rect::new(1, 7, 28, 3),
                        },
                    ],
                    add_button: Rect::new(1, 11, 28, 1),
                },
                ColumnBox {
                    column_id: "c2".into(),
                    area: Rect::new(30, 2, 30, 20),
                    tasks: vec![],
                    add_button: Rect::new(31, 4, 28, 1),
                },
            ],
        }
    }

    #[test]
    fn hit_testing() {
        let l = layout();
        assert_eq!(
            l.hit(5, 8),
            Some(Hit::Task {
                column_id: "c1".into(),
                task_id: "b".into()
            })
        );
        assert_eq!(
            l.hit(5, 11),
            Some(Hit::AddTask {
                column_id: "c1".into()
            })
        );
        assert_eq!(
            l.hit(40, 15),
            Some(Hit::Column {
                column_id: "c2".into()
            })
        );
        assert_eq!(l.hit(5, 0), None);
    }

    #[test]
    fn slots_leave_out_the_dragged_element() {
        let l = layout();
        assert_eq!(l.task_slots("c1", Some("a")), vec![Slot::new(7.0, 3.0)]);
        assert_eq!(l.task_slots("c1", None).len(), 2);
        assert_eq!(l.column_slots(Some("c1")), vec![Slot::new(30.0, 30.0)]);
    }

    /// Board a, b, c, d scrolled so only c and d are on screen
    fn scrolled_layout() -> BoardLayout {
        let column = |id: &str, x: u16| ColumnBox {
            column_id: id.into(),
            area: Rect::new(x, 2, 30, 20),
            tasks: vec![],
            add_button: Rect::new(x + 1, 4, 28, 1),
        };
        BoardLayout {
            strip: Rect::new(0, 2, 60, 20),
            order: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            columns: vec![column("c", 0), column("d", 30)],
        }
    }

    #[test]
    fn off_screen_columns_keep_zero_width_slots() {
        let l = scrolled_layout();
        assert_eq!(
            l.column_slots(Some("d")),
            vec![
                Slot::new(0.0, 0.0),
                Slot::new(0.0, 0.0),
                Slot::new(0.0, 30.0),
            ]
        );
        assert_eq!(l.column_slots(Some("c"))[2], Slot::new(30.0, 30.0));
        assert_eq!(
            insertion_index(&l.column_slots(Some("d")), 5.0),
            2,
            "left of c's midpoint lands before c, after the hidden columns"
        );
    }

    #[test]
    fn column_marker_maps_board_index_to_screen() {
        let l = scrolled_layout();
        assert_eq!(l.column_marker_x(0, Some("d")), Some(0));
        assert_eq!(l.column_marker_x(2, Some("d")), Some(0));
        assert_eq!(l.column_marker_x(3, Some("d")), Some(29));
        assert_eq!(l.column_marker_x(3, Some("a")), Some(59));
    }

    #[test]
    fn destructive_actions_wait_for_confirmation() {
        let mut app = app();
        let column_id = app.board().columns[0].id.clone();
        app.request(Action::DeleteColumn {
            column_id: column_id.clone(),
        });
        assert_eq!(app.mode, Mode::Confirm);
        assert_eq!(app.board().columns.len(), 3);
        let prompt = &app.confirm.as_ref().unwrap().prompt;
        assert!(prompt.contains("Backlog"));
    }

    #[test]
    fn theme_follows_board() {
        let mut app = app();
        assert_eq!(app.theme.kind, ThemeKind::Dark);
        app.request(Action::ToggleTheme);
        assert_eq!(app.theme.kind, ThemeKind::Light);
        assert_eq!(app.theme.background, Theme::light().background);
    }

    #[test]
    fn failed_action_sets_error_status() {
        let mut app = app();
        app.commit(Action::DeleteTask {
            task_id: "ghost".into(),
        });
        assert!(app.status_is_error);
        assert_eq!(app.status_message.as_deref(), Some("task not found: ghost"));
    }

    #[test]
    fn cursor_clamps_after_column_delete() {
        let mut app = app();
        app.cursor.column = 2;
        let last = app.board().columns[2].id.clone();
        app.commit(Action::DeleteColumn { column_id: last });
        assert_eq!(app.cursor.column, 1);
    }
}
