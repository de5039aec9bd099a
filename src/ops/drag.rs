//! Drag-and-drop protocols for tasks and columns.
//!
//! A gesture carries a [`DragData`] payload from start to drop. While the
//! pointer moves over a drop target the engine keeps a placeholder index for
//! that target; dropping turns the payload and placeholder into an
//! [`Action`]. Placeholders never survive [`DragEngine::end`].

use std::collections::BTreeMap;

use crate::model::board::ColumnId;
use crate::model::task::TaskId;
use crate::ops::board_ops::Action;
use crate::ops::reorder::{Slot, insertion_index};

/// Marker carrying the dragged task id
pub const TASK_MARKER: &str = "text/task";
/// Marker carrying the column the dragged task came from
pub const FROM_COLUMN_MARKER: &str = "text/fromColumn";
/// Marker carrying the dragged column id
pub const COLUMN_MARKER: &str = "text/column";

/// String data attached to a drag gesture, keyed by marker type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragData {
    entries: BTreeMap<String, String>,
}

impl DragData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_data(&mut self, kind: &str, value: &str) {
        self.entries.insert(kind.to_string(), value.to_string());
    }

    /// The value for `kind`; empty values read as absent
    pub fn get_data(&self, kind: &str) -> Option<&str> {
        self.entries
            .get(kind)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn has_type(&self, kind: &str) -> bool {
        self.get_data(kind).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Decoded drag payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragPayload {
    Task {
        task_id: TaskId,
        source_column_id: ColumnId,
    },
    Column {
        column_id: ColumnId,
    },
}

impl DragPayload {
    /// Decode the payload; `None` when neither marker is present
    pub fn from_data(data: &DragData) -> Option<Self> {
        if let (Some(task_id), Some(source)) =
            (data.get_data(TASK_MARKER), data.get_data(FROM_COLUMN_MARKER))
        {
            return Some(DragPayload::Task {
                task_id: task_id.to_string(),
                source_column_id: source.to_string(),
            });
        }
        data.get_data(COLUMN_MARKER)
            .map(|column_id| DragPayload::Column {
                column_id: column_id.to_string(),
            })
    }

    pub fn to_data(&self) -> DragData {
        let mut data = DragData::new();
        match self {
            DragPayload::Task {
                task_id,
                source_column_id,
            } => {
                data.set_data(TASK_MARKER, task_id);
                data.set_data(FROM_COLUMN_MARKER, source_column_id);
            }
            DragPayload::Column { column_id } => data.set_data(COLUMN_MARKER, column_id),
        }
        data
    }
}

/// Where a placeholder is shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// A column's task list
    TaskList(ColumnId),
    /// The column strip
    Board,
}

/// A transient insertion marker inside a drop target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub target: DropTarget,
    /// Index among the target's children, dragged element excluded
    pub index: usize,
}

/// Drag state for the current gesture
#[derive(Debug, Default)]
pub struct DragEngine {
    data: DragData,
    placeholders: Vec<Placeholder>,
}

impl DragEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a gesture with arbitrary drag data
    pub fn begin(&mut self, data: DragData) {
        self.placeholders.clear();
        self.data = data;
    }

    /// Begin dragging a task out of `column_id`
    pub fn start_task_drag(&mut self, task_id: &str, column_id: &str) {
        self.begin(
            DragPayload::Task {
                task_id: task_id.to_string(),
                source_column_id: column_id.to_string(),
            }
            .to_data(),
        );
    }

    /// Begin dragging a column. A press that landed on a task belongs to the
    /// task drag, so `origin_on_task` suppresses the column drag.
    pub fn start_column_drag(&mut self, column_id: &str, origin_on_task: bool) -> bool {
        if origin_on_task {
            return false;
        }
        self.begin(
            DragPayload::Column {
                column_id: column_id.to_string(),
            }
            .to_data(),
        );
        true
    }

    pub fn is_dragging(&self) -> bool {
        !self.data.is_empty()
    }

    pub fn payload(&self) -> Option<DragPayload> {
        DragPayload::from_data(&self.data)
    }

    /// Id of the task being dragged
    pub fn dragged_task(&self) -> Option<&str> {
        self.data
            .get_data(TASK_MARKER)
            .filter(|_| self.data.has_type(FROM_COLUMN_MARKER))
    }

    /// Id of the column being dragged
    pub fn dragged_column(&self) -> Option<&str> {
        if self.dragged_task().is_some() {
            return None;
        }
        self.data.get_data(COLUMN_MARKER)
    }

    /// Placeholder index shown in `target`
    pub fn placeholder(&self, target: &DropTarget) -> Option<usize> {
        self.placeholders
            .iter()
            .find(|p| p.target == *target)
            .map(|p| p.index)
    }

    pub fn placeholders(&self) -> &[Placeholder] {
        &self.placeholders
    }

    /// Pointer moved over a column's task list. `siblings` are that list's
    /// task rows without the dragged task. Only task drags react.
    pub fn drag_over_tasks(&mut self, column_id: &str, siblings: &[Slot], pointer: f64) -> bool {
        if self.dragged_task().is_none() {
            return false;
        }
        let index = insertion_index(siblings, pointer);
        self.show_placeholder(DropTarget::TaskList(column_id.to_string()), index);
        true
    }

    /// Pointer moved over the column strip. `siblings` are the columns
    /// without the dragged one. Only column drags react.
    pub fn drag_over_board(&mut self, siblings: &[Slot], pointer: f64) -> bool {
        if self.dragged_column().is_none() {
            return false;
        }
        let index = insertion_index(siblings, pointer);
        self.show_placeholder(DropTarget::Board, index);
        true
    }

    /// Pointer left a drop target: its placeholder goes, nothing commits
    pub fn drag_leave(&mut self, target: &DropTarget) {
        self.placeholders.retain(|p| p.target != *target);
    }

    /// Drop onto a column's task list. Returns the move to commit, or `None`
    /// when the gesture carries no task payload.
    pub fn drop_on_tasks(&mut self, column_id: &str) -> Option<Action> {
        let target = DropTarget::TaskList(column_id.to_string());
        let index = self.placeholder(&target);
        self.drag_leave(&target);

        match self.payload()? {
            DragPayload::Task {
                task_id,
                source_column_id,
            } => Some(Action::MoveTask {
                task_id,
                from_column_id: source_column_id,
                to_column_id: column_id.to_string(),
                index,
            }),
            DragPayload::Column { .. } => None,
        }
    }

    /// Drop onto the column strip. Returns the column move to commit, or
    /// `None` when the gesture carries no column payload.
    pub fn drop_on_board(&mut self) -> Option<Action> {
        let index = self.placeholder(&DropTarget::Board);
        self.drag_leave(&DropTarget::Board);

        let column_id = self.dragged_column()?.to_string();
        Some(Action::MoveColumn { column_id, index })
    }

    /// Gesture finished, committed or not: clear every placeholder and the payload
    pub fn end(&mut self) {
        self.placeholders.clear();
        self.data = DragData::new();
    }

    fn show_placeholder(&mut self, target: DropTarget, index: usize) {
        match self.placeholders.iter_mut().find(|p| p.target == target) {
            Some(p) => p.index = index,
            None => self.placeholders.push(Placeholder { target, index }),
        }
    }
}
