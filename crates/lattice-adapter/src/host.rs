//! Host surface boundary.
//!
//! The host is a virtualized, position-addressed view recycler. It asks the
//! adapter for counts and view types, creates holders through a factory and
//! binds them per position. These traits are the only contact points; how
//! views are inflated or drawn is entirely up to the host.

use std::fmt;
use std::sync::Arc;

use lattice_adapter_core::Result;
use serde::{Deserialize, Serialize};

use crate::position::Segment;
use crate::segment::LoadMoreStatus;

/// Opaque handle of a host view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ViewId(pub u64);

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

/// Layout manager used by the host surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    /// A single column or row.
    Linear,
    /// A uniform grid.
    Grid {
        /// Number of spans per row.
        span_count: usize,
    },
    /// A staggered grid with independently filled spans.
    StaggeredGrid {
        /// Number of spans.
        span_count: usize,
    },
}

/// The view type of a host slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewType {
    /// Header block.
    Header,
    /// Footer block.
    Footer,
    /// Empty-state block.
    Empty,
    /// Load-more indicator.
    LoadMore,
    /// A data item of the given item type.
    Item(u32),
}

impl ViewType {
    /// Whether slots of this type span the whole width of a grid.
    pub fn is_full_span(self) -> bool {
        !matches!(self, ViewType::Item(_))
    }
}

/// Read access to the host surface the adapter is attached to.
pub trait HostSurface: Send + Sync {
    /// The active layout manager.
    fn layout_kind(&self) -> LayoutKind;

    /// First host position whose view is completely visible.
    fn first_completely_visible_position(&self) -> Option<usize>;

    /// Last completely visible host position of every span.
    ///
    /// Linear and grid layouts return at most one entry.
    fn last_completely_visible_positions(&self) -> Vec<usize>;

    /// Look up a child view of the view bound at `position`.
    fn view_at(&self, position: usize, view: ViewId) -> Option<ViewId>;
}

/// The contract a host queries on each layout pass.
pub trait AdapterCore {
    /// Total number of host slots.
    fn item_count(&self) -> usize;

    /// Segment of a host position.
    fn classify(&self, position: usize) -> Option<Segment>;

    /// View type of a host position.
    fn item_view_type(&self, position: usize) -> Option<ViewType>;

    /// Stable id of a host position.
    fn item_id(&self, position: usize) -> u64 {
        position as u64
    }
}

/// A view holder that can display adapter content.
pub trait Bindable<T>: Send {
    /// Bind a data item.
    fn bind_item(&mut self, item: &T, data_index: usize);

    /// Bind the load-more indicator.
    fn bind_load_more(&mut self, _status: LoadMoreStatus) {}

    /// Bind a header, footer or empty slot.
    fn bind_segment(&mut self, _segment: Segment) {}
}

/// Creates a holder for a view type.
pub type HolderFactory<T> = Arc<dyn Fn(ViewType) -> Box<dyn Bindable<T>> + Send + Sync>;

/// Helper alias for fallible holder creation.
pub type HolderResult<T> = Result<Box<dyn Bindable<T>>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_span_types() {
        assert!(ViewType::Header.is_full_span());
        assert!(ViewType::Footer.is_full_span());
        assert!(ViewType::Empty.is_full_span());
        assert!(ViewType::LoadMore.is_full_span());
        assert!(!ViewType::Item(3).is_full_span());
    }

    #[test]
    fn test_view_id_display() {
        assert_eq!(ViewId(7).to_string(), "view#7");
    }
}
