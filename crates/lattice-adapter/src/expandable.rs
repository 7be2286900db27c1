//! Expand/collapse bookkeeping over a flattened hierarchical list.
//!
//! The visible tree is stored depth first in a plain `Vec`: an expanded
//! node's children follow it directly, up to the next expandable item whose
//! level is not deeper than the node's own. These functions splice that run in
//! and out and report how many items moved. They never notify anyone; the
//! adapter turns the outcomes into change events.

use crate::item::{ListItem, NOT_EXPANDABLE_LEVEL};

/// Result of [`expand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandOutcome {
    /// The index is out of range or the item has no expandable capability.
    NotExpandable,
    /// The node has no children; it was marked expanded without splicing.
    Leaf,
    /// The node was already expanded; nothing changed.
    AlreadyExpanded,
    /// This many items were spliced in after the node.
    Expanded(usize),
}

impl ExpandOutcome {
    /// Number of inserted items.
    pub fn inserted(self) -> usize {
        match self {
            ExpandOutcome::Expanded(count) => count,
            _ => 0,
        }
    }
}

/// Result of [`collapse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollapseOutcome {
    /// The index is out of range or the item has no expandable capability.
    NotExpandable,
    /// The node was not expanded; nothing changed.
    NotExpanded,
    /// This many items were removed after the node.
    Collapsed(usize),
}

impl CollapseOutcome {
    /// Number of removed items.
    pub fn removed(self) -> usize {
        match self {
            CollapseOutcome::Collapsed(count) => count,
            _ => 0,
        }
    }
}

/// Level of an item, `None` when it is not expandable.
pub fn level_of<T: ListItem>(item: &T) -> Option<i32> {
    item.as_expandable().map(|node| node.level())
}

/// Whether an expandable item at `level` ends the visible run of a node at
/// `root_level`.
///
/// Sentinel items only bound sentinel roots, so a `-1` item nested inside a
/// subtree never cuts the subtree short.
fn ends_run(level: i32, root_level: i32) -> bool {
    if root_level < 0 {
        level <= root_level
    } else {
        (0..=root_level).contains(&level)
    }
}

/// Index one past the visible run of the node at `index`.
///
/// For collapsed or non-expandable items this is `index + 1`.
pub fn subtree_end<T: ListItem>(data: &[T], index: usize) -> usize {
    let Some(node) = data.get(index).and_then(|item| item.as_expandable()) else {
        return (index + 1).min(data.len());
    };
    if !node.is_expanded() {
        return index + 1;
    }
    let root_level = node.level();
    data[index + 1..]
        .iter()
        .position(|item| level_of(item).is_some_and(|level| ends_run(level, root_level)))
        .map_or(data.len(), |offset| index + 1 + offset)
}

/// Splice `children` in at `at`, re-splicing every already expanded child.
///
/// Children are visited in reverse so the indices of unvisited siblings stay
/// valid while deeper runs are inserted.
fn splice_children<T: ListItem>(data: &mut Vec<T>, at: usize, children: Vec<T>) -> usize {
    let mut total = children.len();
    data.splice(at..at, children.iter().cloned());

    for (offset, child) in children.iter().enumerate().rev() {
        let grandchildren = match child.as_expandable() {
            Some(node) if node.is_expanded() && node.has_sub_items() => node.sub_items(),
            _ => continue,
        };
        total += splice_children(data, at + offset + 1, grandchildren);
    }

    total
}

/// Expand the node at `index`.
pub fn expand<T: ListItem>(data: &mut Vec<T>, index: usize) -> ExpandOutcome {
    let Some(node) = data.get(index).and_then(|item| item.as_expandable()) else {
        return ExpandOutcome::NotExpandable;
    };

    if !node.has_sub_items() {
        node.set_expanded(true);
        return ExpandOutcome::Leaf;
    }
    if node.is_expanded() {
        return ExpandOutcome::AlreadyExpanded;
    }

    let children = node.sub_items();
    node.set_expanded(true);
    ExpandOutcome::Expanded(splice_children(data, index + 1, children))
}

/// Expand the node at `index` and every expandable node beneath it.
///
/// The walk stops at the item that followed the node's visible run before
/// anything was expanded. That boundary is tracked by index and advanced by
/// every splice, so items equal to the boundary never end the walk early.
pub fn expand_all<T: ListItem>(data: &mut Vec<T>, index: usize) -> ExpandOutcome {
    if index >= data.len() {
        return ExpandOutcome::NotExpandable;
    }
    let mut boundary = subtree_end(data, index);

    let root = expand(data, index);
    let mut total = match root {
        ExpandOutcome::NotExpandable | ExpandOutcome::Leaf => return root,
        outcome => outcome.inserted(),
    };
    boundary += total;

    let mut cursor = index + 1;
    while cursor < boundary && cursor < data.len() {
        let inserted = expand(data, cursor).inserted();
        total += inserted;
        boundary += inserted;
        cursor += 1;
    }

    if total == 0 {
        ExpandOutcome::AlreadyExpanded
    } else {
        ExpandOutcome::Expanded(total)
    }
}

/// Expand every node in the list. Returns the number of inserted items.
pub fn expand_all_items<T: ListItem>(data: &mut Vec<T>) -> usize {
    // Last to first keeps the indices of unvisited items stable.
    (0..data.len())
        .rev()
        .map(|index| expand_all(data, index).inserted())
        .sum()
}

/// Collapse the node at `index`.
///
/// The whole visible run is removed in one step. Nested nodes keep their
/// own expanded flag so a later [`expand`] restores the same shape.
pub fn collapse<T: ListItem>(data: &mut Vec<T>, index: usize) -> CollapseOutcome {
    let Some(node) = data.get(index).and_then(|item| item.as_expandable()) else {
        return CollapseOutcome::NotExpandable;
    };
    if !node.is_expanded() {
        return CollapseOutcome::NotExpanded;
    }
    node.set_expanded(false);

    let end = {
        let root_level = node.level();
        data[index + 1..]
            .iter()
            .position(|item| level_of(item).is_some_and(|level| ends_run(level, root_level)))
            .map_or(data.len(), |offset| index + 1 + offset)
    };

    let removed = data.drain(index + 1..end).count();
    CollapseOutcome::Collapsed(removed)
}

/// Collapse every node in the list. Returns the number of removed items.
pub fn collapse_all_items<T: ListItem>(data: &mut Vec<T>) -> usize {
    let mut removed = 0;
    let mut index = data.len();
    while index > 0 {
        index -= 1;
        if index < data.len() {
            removed += collapse(data, index).removed();
        }
    }
    removed
}

/// Position of the closest parent node of the item at `index`.
///
/// Level-0 nodes report their own position. Sentinel-level items have no
/// parent. Plain items are treated as infinitely deep, so their parent is the
/// nearest preceding node of any non-negative level.
pub fn parent_position<T: ListItem>(data: &[T], index: usize) -> Option<usize> {
    let item = data.get(index)?;
    let level = level_of(item).unwrap_or(i32::MAX);

    match level {
        0 => return Some(index),
        NOT_EXPANDABLE_LEVEL => return None,
        _ => {}
    }

    (0..=index).rev().find(|&candidate| {
        level_of(&data[candidate]).is_some_and(|candidate_level| {
            candidate_level >= 0 && candidate_level < level
        })
    })
}
