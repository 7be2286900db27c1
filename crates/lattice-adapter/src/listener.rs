//! Callback types registered on an adapter.

use std::sync::Arc;

use crate::host::ViewId;

/// Click on an item or one of its child views. Args: (item, view, data index)
pub type ItemClickListener<T> = Arc<dyn Fn(&T, ViewId, usize) + Send + Sync>;

/// Long click on an item or one of its child views.
///
/// Returns `true` if the click was consumed.
pub type ItemLongClickListener<T> = Arc<dyn Fn(&T, ViewId, usize) -> bool + Send + Sync>;

/// A parameterless callback: load-more requests, up fetch, retry.
pub type Callback = Arc<dyn Fn() + Send + Sync>;

/// Overrides the per-item view type. Args: (item, data index)
pub type ItemTypeFn<T> = Arc<dyn Fn(&T, usize) -> u32 + Send + Sync>;

/// The four click listener slots of an adapter.
pub struct ClickListeners<T> {
    pub(crate) item_click: Option<ItemClickListener<T>>,
    pub(crate) item_long_click: Option<ItemLongClickListener<T>>,
    pub(crate) child_click: Option<ItemClickListener<T>>,
    pub(crate) child_long_click: Option<ItemLongClickListener<T>>,
}

impl<T> Default for ClickListeners<T> {
    fn default() -> Self {
        Self {
            item_click: None,
            item_long_click: None,
            child_click: None,
            child_long_click: None,
        }
    }
}
