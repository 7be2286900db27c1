//! Edit scripts produced by an external diff computation.
//!
//! The adapter does not diff lists itself. A [`DiffCalculator`] (or any code
//! running off the main flow) produces an [`EditScript`] describing how the
//! old list becomes the new one, and the adapter replays it as change events.

use crate::notify::ChangeEvent;

/// One step of an edit script, in old-list coordinates as updated by all
/// previous steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditOp {
    /// `count` items were inserted at `position`.
    Inserted {
        /// Insert position.
        position: usize,
        /// Number of inserted items.
        count: usize,
    },
    /// `count` items were removed from `position`.
    Removed {
        /// First removed position.
        position: usize,
        /// Number of removed items.
        count: usize,
    },
    /// One item moved.
    Moved {
        /// Position before the move.
        from: usize,
        /// Position after the move.
        to: usize,
    },
    /// `count` items at `position` changed in place.
    Changed {
        /// First changed position.
        position: usize,
        /// Number of changed items.
        count: usize,
    },
}

impl EditOp {
    /// The data-relative change event for this step.
    pub fn to_event(self) -> ChangeEvent {
        match self {
            EditOp::Inserted { position, count } => ChangeEvent::RangeInserted {
                start: position,
                count,
            },
            EditOp::Removed { position, count } => ChangeEvent::RangeRemoved {
                start: position,
                count,
            },
            EditOp::Moved { from, to } => ChangeEvent::Moved { from, to },
            EditOp::Changed { position, count } => ChangeEvent::RangeChanged {
                start: position,
                count,
            },
        }
    }
}

/// An ordered sequence of edit steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditScript {
    ops: Vec<EditOp>,
}

impl EditScript {
    /// Create an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step.
    pub fn push(&mut self, op: EditOp) {
        self.ops.push(op);
    }

    /// Append an insertion.
    pub fn inserted(mut self, position: usize, count: usize) -> Self {
        self.push(EditOp::Inserted { position, count });
        self
    }

    /// Append a removal.
    pub fn removed(mut self, position: usize, count: usize) -> Self {
        self.push(EditOp::Removed { position, count });
        self
    }

    /// Append a move.
    pub fn moved(mut self, from: usize, to: usize) -> Self {
        self.push(EditOp::Moved { from, to });
        self
    }

    /// Append an in-place change.
    pub fn changed(mut self, position: usize, count: usize) -> Self {
        self.push(EditOp::Changed { position, count });
        self
    }

    /// The steps in order.
    pub fn ops(&self) -> &[EditOp] {
        &self.ops
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns `true` if there are no steps.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Whether replaying the script turns a list of `old_len` items into one
    /// of `new_len` items without touching out-of-range positions.
    pub fn fits(&self, old_len: usize, new_len: usize) -> bool {
        let mut len = old_len;
        for op in &self.ops {
            match *op {
                EditOp::Inserted { position, count } => {
                    if position > len {
                        return false;
                    }
                    let Some(grown) = len.checked_add(count) else {
                        return false;
                    };
                    len = grown;
                }
                EditOp::Removed { position, count } => {
                    if exceeds(position, count, len) {
                        return false;
                    }
                    len -= count;
                }
                EditOp::Moved { from, to } => {
                    if from >= len || to >= len {
                        return false;
                    }
                }
                EditOp::Changed { position, count } => {
                    if exceeds(position, count, len) {
                        return false;
                    }
                }
            }
        }
        len == new_len
    }
}

/// Whether the range `position..position + count` reaches past `len`.
fn exceeds(position: usize, count: usize, len: usize) -> bool {
    position.checked_add(count).is_none_or(|end| end > len)
}

impl From<Vec<EditOp>> for EditScript {
    fn from(ops: Vec<EditOp>) -> Self {
        Self { ops }
    }
}

impl FromIterator<EditOp> for EditScript {
    fn from_iter<I: IntoIterator<Item = EditOp>>(iter: I) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

/// Computes an edit script between two lists.
pub trait DiffCalculator<T> {
    /// Produce the script turning `old` into `new`.
    fn calculate(&self, old: &[T], new: &[T]) -> EditScript;
}

impl<T, F> DiffCalculator<T> for F
where
    F: Fn(&[T], &[T]) -> EditScript,
{
    fn calculate(&self, old: &[T], new: &[T]) -> EditScript {
        self(old, new)
    }
}
