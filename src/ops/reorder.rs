//! Insertion-point computation for drag reordering.
//!
//! The dragged element snaps in front of the first sibling whose midpoint
//! the pointer has not yet passed, or to the end when it has passed them all.
//! The same rule serves vertical task lists and the horizontal column strip.

/// Drag axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Task lists (pointer y against task rows)
    Vertical,
    /// Column strip (pointer x against columns)
    Horizontal,
}

impl Axis {
    /// The pointer coordinate along this axis
    pub fn coordinate(self, x: f64, y: f64) -> f64 {
        match self {
            Axis::Vertical => y,
            Axis::Horizontal => x,
        }
    }

    /// The extent of a rectangle along this axis
    pub fn slot(self, x: f64, y: f64, width: f64, height: f64) -> Slot {
        match self {
            Axis::Vertical => Slot::new(y, height),
            Axis::Horizontal => Slot::new(x, width),
        }
    }
}

/// Position of a candidate sibling along the drag axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    pub start: f64,
    pub size: f64,
}

impl Slot {
    pub fn new(start: f64, size: f64) -> Self {
        Slot { start, size }
    }

    pub fn midpoint(&self) -> f64 {
        self.start + self.size / 2.0
    }

    /// Signed distance from the pointer to this slot's midpoint
    pub fn offset(&self, pointer: f64) -> f64 {
        pointer - self.midpoint()
    }
}

/// Index among `siblings` to insert before, or `siblings.len()` for the end.
///
/// `siblings` must not include the element being dragged. Among siblings
/// whose midpoint lies after the pointer (negative offset), the one closest
/// to the pointer wins; on equal offsets the earlier sibling wins.
pub fn insertion_index(siblings: &[Slot], pointer: f64) -> usize {
    let mut best: Option<(usize, f64)> = None;
    for (i, slot) in siblings.iter().enumerate() {
        let offset = slot.offset(pointer);
        if offset < 0.0 && best.is_none_or(|(_, closest)| offset > closest) {
            best = Some((i, offset));
        }
    }
    best.map_or(siblings.len(), |(i, _)| i)
}
