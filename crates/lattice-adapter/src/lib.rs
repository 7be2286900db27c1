//! Lattice Adapter - a list adapter with virtual segments for recycling list hosts.
//!
//! A host surface (a virtualized, position-addressed list) sees one flat
//! sequence of slots. [`QuickAdapter`] builds that sequence out of a data
//! list plus optional header, footer, empty-state and load-more slots, keeps
//! the two coordinate systems apart, and translates every change into host
//! positions before the host hears about it.
//!
//! On top of that it layers:
//!
//! - **Expandable items**: tree nodes flattened in place by expand and collapse
//! - **Load more and up fetch**: paging triggered from binding
//! - **Edit scripts**: fine-grained change events from a precomputed diff
//! - **Clicks**: host positions translated to data items
//!
//! # Example
//!
//! ```
//! use lattice_adapter::{AdapterCore, ExpandableNode, QuickAdapter, Segment, ViewId};
//!
//! let parent = ExpandableNode::with_children(
//!     "fruit",
//!     0,
//!     vec![ExpandableNode::new("apple", 1), ExpandableNode::new("pear", 1)],
//! );
//! let mut adapter = QuickAdapter::new(vec![parent]);
//! adapter.add_header_view(ViewId(1), None);
//!
//! assert_eq!(adapter.expand(0, true, true), 2);
//! assert_eq!(adapter.item_count(), 4);
//! assert_eq!(adapter.classify(3), Some(Segment::Data(2)));
//! ```

mod adapter;
pub mod config;
pub mod diff;
pub mod expandable;
pub mod host;
pub mod item;
pub mod listener;
pub mod notify;
pub mod position;
pub mod segment;

pub use adapter::{QuickAdapter, QuickAdapterBuilder};
pub use config::{AdapterConfig, EmptyLayoutConfig, EmptyViewState};
pub use diff::{DiffCalculator, EditOp, EditScript};
pub use expandable::{CollapseOutcome, ExpandOutcome};
pub use host::{
    AdapterCore, Bindable, HolderFactory, HolderResult, HostSurface, LayoutKind, ViewId, ViewType,
};
pub use item::{Expandable, ExpandableNode, ListItem, NOT_EXPANDABLE_LEVEL};
pub use listener::{Callback, ItemClickListener, ItemLongClickListener, ItemTypeFn};
pub use notify::{AdapterObserver, AdapterSignals, ChangeEvent, ChangeNotifier, ObserverProxy};
pub use position::{PositionMapper, Segment};
pub use segment::{LoadMoreStatus, SegmentCounts, SegmentFlags};

pub use lattice_adapter_core::{AdapterError, ConnectionId, DeferredQueue, Result, Signal};

static_assertions::assert_impl_all!(QuickAdapter<String>: Send, Sync);
static_assertions::assert_impl_all!(PositionMapper: Send, Sync, Copy);
