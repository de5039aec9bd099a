use indexmap::IndexMap;
use serde::Serialize;

use crate::model::board::{Board, ColumnId};

/// Completion counts for one column or the whole board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ProgressCount {
    pub done: usize,
    pub total: usize,
    /// Whole percent in 0..=100
    pub percent: u8,
}

impl ProgressCount {
    pub fn new(done: usize, total: usize) -> Self {
        ProgressCount {
            done,
            total,
            percent: percent(done, total),
        }
    }
}

/// Progress report for a board
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Progress {
    /// Per-column counts, in column display order
    pub per_column: IndexMap<ColumnId, ProgressCount>,
    /// Counts over every task of every column
    pub overall: ProgressCount,
}

impl Progress {
    /// Percent for a column (0 for unknown columns)
    pub fn column_percent(&self, column_id: &str) -> u8 {
        self.per_column.get(column_id).map_or(0, |c| c.percent)
    }
}

/// `round(100 * done / total)` with halves rounded up; 0 when `total` is 0.
pub fn percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let done = done.min(total);
    ((done * 100 + total / 2) / total) as u8
}

/// Compute per-column and overall completion.
///
/// Dangling task ids are ignored. The overall figure counts tasks, it is not
/// an average of the column percentages.
pub fn compute_progress(board: &Board) -> Progress {
    let mut per_column = IndexMap::new();
    let mut done = 0;
    let mut total = 0;

    for column in &board.columns {
        let mut col_done = 0;
        let mut col_total = 0;
        for task in board.column_tasks(column) {
            col_total += 1;
            if task.completed {
                col_done += 1;
            }
        }
        done += col_done;
        total += col_total;
        per_column.insert(column.id.clone(), ProgressCount::new(col_done, col_total));
    }

    Progress {
        per_column,
        overall: ProgressCount::new(done, total),
    }
}
