//! Expand and collapse on the adapter.
//!
//! The list surgery lives in [`crate::expandable`]; these wrappers turn its
//! outcomes into change events.

use lattice_adapter_core::logging::targets;

use super::QuickAdapter;
use crate::expandable::{self, CollapseOutcome, ExpandOutcome};
use crate::item::ListItem;
use crate::notify::ChangeEvent;

impl<T: ListItem> QuickAdapter<T> {
    fn notify_expanded(&self, index: usize, count: usize, animate: bool) {
        if animate {
            self.emit(ChangeEvent::RangeChanged {
                start: index,
                count: 1,
            });
            self.emit(ChangeEvent::RangeInserted {
                start: index + 1,
                count,
            });
        } else {
            self.refresh();
        }
    }

    fn finish_expand(&self, index: usize, outcome: ExpandOutcome, animate: bool, notify: bool) -> usize {
        match outcome {
            ExpandOutcome::Leaf => {
                self.notify_data_changed(index);
                0
            }
            ExpandOutcome::Expanded(count) => {
                tracing::debug!(target: targets::EXPAND, index, count, "expanded");
                if notify {
                    self.notify_expanded(index, count, animate);
                }
                count
            }
            ExpandOutcome::AlreadyExpanded | ExpandOutcome::NotExpandable => {
                tracing::trace!(target: targets::EXPAND, index, ?outcome, "expand skipped");
                0
            }
        }
    }

    /// Whether the item at `index` has the expandable capability.
    pub fn is_expandable(&self, index: usize) -> bool {
        self.data
            .get(index)
            .is_some_and(|item| item.as_expandable().is_some())
    }

    /// Expand the node at data index `index`. Returns the number of items
    /// spliced in.
    ///
    /// With `notify`, an animated expand emits a change at the node plus an
    /// insertion after it; otherwise a full refresh.
    pub fn expand(&mut self, index: usize, animate: bool, notify: bool) -> usize {
        let outcome = expandable::expand(&mut self.data, index);
        self.finish_expand(index, outcome, animate, notify)
    }

    /// Expand the node at `index` and every node beneath it.
    pub fn expand_all(&mut self, index: usize, animate: bool, notify: bool) -> usize {
        let outcome = expandable::expand_all(&mut self.data, index);
        self.finish_expand(index, outcome, animate, notify)
    }

    /// Expand every node, then refresh once.
    pub fn expand_all_items(&mut self) -> usize {
        let count = expandable::expand_all_items(&mut self.data);
        tracing::debug!(target: targets::EXPAND, count, "expanded all items");
        self.refresh();
        count
    }

    /// Collapse the node at `index`. Returns the number of items removed.
    pub fn collapse(&mut self, index: usize, animate: bool, notify: bool) -> usize {
        let outcome = expandable::collapse(&mut self.data, index);
        let CollapseOutcome::Collapsed(count) = outcome else {
            tracing::trace!(target: targets::EXPAND, index, ?outcome, "collapse skipped");
            return 0;
        };

        tracing::debug!(target: targets::EXPAND, index, count, "collapsed");
        if notify {
            if animate {
                self.emit(ChangeEvent::RangeChanged {
                    start: index,
                    count: 1,
                });
                self.emit(ChangeEvent::RangeRemoved {
                    start: index + 1,
                    count,
                });
            } else {
                self.refresh();
            }
        }
        count
    }

    /// Collapse every node, then refresh once.
    pub fn collapse_all_items(&mut self) -> usize {
        let count = expandable::collapse_all_items(&mut self.data);
        tracing::debug!(target: targets::EXPAND, count, "collapsed all items");
        self.refresh();
        count
    }

    /// Position of the closest parent of the item at `index`.
    pub fn parent_position_at(&self, index: usize) -> Option<usize> {
        expandable::parent_position(&self.data, index)
    }

    /// Position of the closest parent of the first item equal to `item`.
    pub fn parent_position(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        let index = self.data.iter().position(|candidate| candidate == item)?;
        self.parent_position_at(index)
    }
}
