//! Item traits for adapter data.
//!
//! Every element of an adapter's data list implements [`ListItem`]. Items that
//! own nested children additionally expose the [`Expandable`] capability,
//! which is what the expand/collapse operations work on.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;

/// Level reported by items that opt out of expansion semantics.
pub const NOT_EXPANDABLE_LEVEL: i32 = -1;

/// Trait for items held by a [`QuickAdapter`](crate::QuickAdapter).
///
/// Both methods have defaults, so plain payloads only need an empty impl.
///
/// # Example
///
/// ```
/// use lattice_adapter::ListItem;
///
/// #[derive(Clone)]
/// struct Message {
///     text: String,
///     outgoing: bool,
/// }
///
/// impl ListItem for Message {
///     fn item_type(&self) -> u32 {
///         if self.outgoing { 1 } else { 0 }
///     }
/// }
/// ```
pub trait ListItem: Clone + Send + Sync + 'static {
    /// Returns the expandable view of this item, if it has one.
    fn as_expandable(&self) -> Option<&dyn Expandable<Self>> {
        None
    }

    /// Returns the per-item view type used by the host surface.
    fn item_type(&self) -> u32 {
        0
    }
}

/// Implement ListItem for String for convenience.
impl ListItem for String {}

impl ListItem for &'static str {}

/// Capability of an item that owns an ordered list of child items.
///
/// The expanded flag uses interior mutability: the same node shared through
/// an `Arc` between a parent's children and the flat data list carries one
/// flag, so collapsing and re-expanding restores the prior visible shape.
pub trait Expandable<T>: Send + Sync {
    /// Whether the children are currently spliced into the list.
    fn is_expanded(&self) -> bool;

    /// Update the expanded flag.
    fn set_expanded(&self, expanded: bool);

    /// Nesting level, `0` for top-level nodes or [`NOT_EXPANDABLE_LEVEL`].
    fn level(&self) -> i32;

    /// The immediate children, in display order.
    fn sub_items(&self) -> Vec<T>;

    /// Returns `true` if the node has at least one child.
    fn has_sub_items(&self) -> bool {
        !self.sub_items().is_empty()
    }
}

/// A ready-made expandable tree node.
///
/// Nodes are shared through `Arc`, and `Arc<ExpandableNode<V>>` implements
/// [`ListItem`], so a list of nodes can be handed to an adapter directly.
///
/// # Example
///
/// ```
/// use lattice_adapter::ExpandableNode;
///
/// let fruit = ExpandableNode::new("fruit", 0);
/// fruit.push_child(ExpandableNode::new("apple", 1));
/// fruit.push_child(ExpandableNode::new("pear", 1));
///
/// assert_eq!(fruit.child_count(), 2);
/// assert!(!fruit.expanded());
/// ```
pub struct ExpandableNode<V> {
    value: V,
    level: i32,
    expanded: AtomicBool,
    children: RwLock<Vec<Arc<ExpandableNode<V>>>>,
}

impl<V> ExpandableNode<V> {
    /// Create a collapsed node without children.
    pub fn new(value: V, level: i32) -> Arc<Self> {
        Arc::new(Self {
            value,
            level,
            expanded: AtomicBool::new(false),
            children: RwLock::new(Vec::new()),
        })
    }

    /// Create a node with the given children.
    pub fn with_children(value: V, level: i32, children: Vec<Arc<Self>>) -> Arc<Self> {
        Arc::new(Self {
            value,
            level,
            expanded: AtomicBool::new(false),
            children: RwLock::new(children),
        })
    }

    /// Returns the payload.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Returns the node level.
    pub fn node_level(&self) -> i32 {
        self.level
    }

    /// Returns the expanded flag.
    pub fn expanded(&self) -> bool {
        self.expanded.load(Ordering::Acquire)
    }

    /// Append a child.
    ///
    /// Adding a child to an expanded node does not update an adapter that
    /// already shows it; collapse and expand again to refresh.
    pub fn push_child(&self, child: Arc<Self>) {
        self.children.write().push(child);
    }

    /// Remove the child at `index`.
    pub fn remove_child(&self, index: usize) -> Option<Arc<Self>> {
        let mut children = self.children.write();
        (index < children.len()).then(|| children.remove(index))
    }

    /// Number of immediate children.
    pub fn child_count(&self) -> usize {
        self.children.read().len()
    }

    /// Snapshot of the immediate children.
    pub fn children(&self) -> Vec<Arc<Self>> {
        self.children.read().clone()
    }
}

impl<V: Send + Sync + 'static> Expandable<Arc<ExpandableNode<V>>> for ExpandableNode<V> {
    fn is_expanded(&self) -> bool {
        self.expanded()
    }

    fn set_expanded(&self, expanded: bool) {
        self.expanded.store(expanded, Ordering::Release);
    }

    fn level(&self) -> i32 {
        self.level
    }

    fn sub_items(&self) -> Vec<Arc<ExpandableNode<V>>> {
        self.children()
    }

    fn has_sub_items(&self) -> bool {
        self.child_count() > 0
    }
}

impl<V: Send + Sync + 'static> ListItem for Arc<ExpandableNode<V>> {
    // Sentinel nodes still report through the capability so parent lookups
    // can see the -1 level.
    fn as_expandable(&self) -> Option<&dyn Expandable<Self>> {
        Some(self.as_ref())
    }
}

impl<V: fmt::Debug> fmt::Debug for ExpandableNode<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpandableNode")
            .field("value", &self.value)
            .field("level", &self.level)
            .field("expanded", &self.expanded())
            .field("children", &self.child_count())
            .finish()
    }
}
