//! The quick adapter.
//!
//! [`QuickAdapter`] owns a data list and presents it to a host surface as one
//! logical list with optional header, footer, empty and load-more slots. Its
//! behavior is split by concern:
//!
//! - data mutation and notification (this module)
//! - header, footer and empty blocks ([`segments`])
//! - load more and up fetch ([`load_more`])
//! - expand and collapse ([`expand`])
//! - edit script application ([`diff`])
//! - holder creation, binding and clicks ([`binding`])

mod binding;
mod diff;
mod expand;
mod load_more;
mod segments;

use std::sync::Arc;

use lattice_adapter_core::logging::{OutlineDebug, OutlineRow, targets};
use lattice_adapter_core::DeferredQueue;

use crate::config::{AdapterConfig, EmptyViewState};
use crate::expandable::level_of;
use crate::host::{AdapterCore, HolderFactory, HostSurface, ViewId, ViewType};
use crate::item::ListItem;
use crate::listener::{Callback, ClickListeners, ItemTypeFn};
use crate::notify::{AdapterObserver, AdapterSignals, ChangeEvent, ChangeNotifier};
use crate::position::{PositionMapper, Segment};
use crate::segment::{LoadMoreStatus, SegmentFlags};

/// Work deferred out of a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeferredAction {
    /// Invoke the load-more handler.
    RequestLoadMore,
    /// Re-enable load more if the visible region is full.
    CheckFullPage,
}

/// Load-more bookkeeping.
struct LoadMoreState {
    handler: Option<Callback>,
    enabled: bool,
    next_load_enabled: bool,
    loading: bool,
    status: LoadMoreStatus,
    end_gone: bool,
    end_click: bool,
    pre_load_number: usize,
}

/// Up fetch bookkeeping.
struct UpFetchState {
    enabled: bool,
    fetching: bool,
    start_position: usize,
    listener: Option<Callback>,
}

/// A list adapter with virtual segments and expandable items.
///
/// # Example
///
/// ```
/// use lattice_adapter::{QuickAdapter, ViewId, Segment};
/// use lattice_adapter::AdapterCore;
///
/// let mut adapter = QuickAdapter::new(vec![String::from("a"), String::from("b")]);
/// adapter.add_header_view(ViewId(1), None);
///
/// assert_eq!(adapter.item_count(), 3);
/// assert_eq!(adapter.classify(0), Some(Segment::Header));
/// assert_eq!(adapter.classify(2), Some(Segment::Data(1)));
/// ```
pub struct QuickAdapter<T: ListItem> {
    data: Vec<T>,
    config: AdapterConfig,

    header_views: Vec<ViewId>,
    footer_views: Vec<ViewId>,
    empty_view: Option<ViewId>,
    use_empty: bool,
    header_with_empty: bool,
    footer_with_empty: bool,
    paging_empty_override: bool,
    empty_state: Option<EmptyViewState>,
    on_retry: Option<Callback>,

    load_more: LoadMoreState,
    up_fetch: UpFetchState,

    surface: Option<Arc<dyn HostSurface>>,
    deferred: DeferredQueue<DeferredAction>,
    notifier: ChangeNotifier,
    listeners: ClickListeners<T>,
    holder_factory: Option<HolderFactory<T>>,
    item_type_fn: Option<ItemTypeFn<T>>,
}

/// Builder for [`QuickAdapter`].
pub struct QuickAdapterBuilder<T: ListItem> {
    data: Vec<T>,
    config: AdapterConfig,
    holder_factory: Option<HolderFactory<T>>,
    item_type_fn: Option<ItemTypeFn<T>>,
}

impl<T: ListItem> Default for QuickAdapterBuilder<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            config: AdapterConfig::default(),
            holder_factory: None,
            item_type_fn: None,
        }
    }
}

impl<T: ListItem> QuickAdapterBuilder<T> {
    /// Set the initial data.
    pub fn data(mut self, data: Vec<T>) -> Self {
        self.data = data;
        self
    }

    /// Set the configuration.
    pub fn config(mut self, config: AdapterConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the factory used by [`QuickAdapter::create_view_holder`].
    pub fn holder_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(ViewType) -> Box<dyn crate::host::Bindable<T>> + Send + Sync + 'static,
    {
        self.holder_factory = Some(Arc::new(factory));
        self
    }

    /// Override the view type reported for data items.
    pub fn item_type<F>(mut self, classifier: F) -> Self
    where
        F: Fn(&T, usize) -> u32 + Send + Sync + 'static,
    {
        self.item_type_fn = Some(Arc::new(classifier));
        self
    }

    /// Build the adapter.
    pub fn build(self) -> QuickAdapter<T> {
        let config = self.config;
        QuickAdapter {
            data: self.data,
            header_views: Vec::new(),
            footer_views: Vec::new(),
            empty_view: None,
            use_empty: config.use_empty,
            header_with_empty: config.header_with_empty,
            footer_with_empty: config.footer_with_empty,
            paging_empty_override: false,
            empty_state: None,
            on_retry: None,
            load_more: LoadMoreState {
                handler: None,
                enabled: false,
                next_load_enabled: false,
                loading: false,
                status: LoadMoreStatus::Default,
                end_gone: false,
                end_click: config.load_more_end_click,
                pre_load_number: if config.pre_load_number > 1 {
                    config.pre_load_number
                } else {
                    AdapterConfig::default().pre_load_number
                },
            },
            up_fetch: UpFetchState {
                enabled: false,
                fetching: false,
                start_position: config.start_up_fetch_position,
                listener: None,
            },
            surface: None,
            deferred: DeferredQueue::new(),
            notifier: ChangeNotifier::new(),
            listeners: ClickListeners::default(),
            holder_factory: self.holder_factory,
            item_type_fn: self.item_type_fn,
            config,
        }
    }
}

impl<T: ListItem> QuickAdapter<T> {
    /// Create an adapter over `data` with the default configuration.
    pub fn new(data: Vec<T>) -> Self {
        Self::builder().data(data).build()
    }

    /// Start building an adapter.
    pub fn builder() -> QuickAdapterBuilder<T> {
        QuickAdapterBuilder::default()
    }

    /// The configuration the adapter was built with.
    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    // =========================================================================
    // Segment state
    // =========================================================================

    /// Snapshot of the current segment flags.
    pub fn segment_flags(&self) -> SegmentFlags {
        SegmentFlags {
            has_header: !self.header_views.is_empty(),
            has_footer: !self.footer_views.is_empty(),
            has_empty_view: self.empty_view.is_some(),
            use_empty: self.use_empty,
            header_with_empty: self.header_with_empty,
            footer_with_empty: self.footer_with_empty,
            paging_empty_override: self.paging_empty_override,
            has_load_more_handler: self.load_more.handler.is_some(),
            load_more_enabled: self.load_more.enabled,
            next_load_enabled: self.load_more.next_load_enabled,
            load_more_status: self.load_more.status,
            load_end_gone: self.load_more.end_gone,
        }
    }

    /// A position mapper over the current state.
    pub fn mapper(&self) -> PositionMapper {
        PositionMapper::new(&self.segment_flags(), self.data.len())
    }

    /// Host position of a data index.
    pub fn host_position(&self, data_index: usize) -> Option<usize> {
        self.mapper().to_host_position(data_index)
    }

    /// Data index at a host position.
    pub fn data_index(&self, host_position: usize) -> Option<usize> {
        self.mapper().to_data_index(host_position)
    }

    /// Whether the slot at `host_position` spans the whole grid width.
    pub fn is_full_span_at(&self, host_position: usize) -> bool {
        self.item_view_type(host_position)
            .is_some_and(ViewType::is_full_span)
    }

    // =========================================================================
    // Observers
    // =========================================================================

    /// Data-relative signals.
    pub fn signals(&self) -> &AdapterSignals {
        self.notifier.signals()
    }

    /// Register the raw observer that receives host positions.
    pub fn register_observer(&mut self, observer: Arc<dyn AdapterObserver>) {
        self.notifier.register_observer(observer);
    }

    /// Unregister the raw observer.
    pub fn unregister_observer(&mut self, observer: &Arc<dyn AdapterObserver>) -> bool {
        self.notifier.unregister_observer(observer)
    }

    /// Emit a data-relative event with the current offset.
    fn emit(&self, event: ChangeEvent) {
        self.emit_with_offset(event, self.mapper().data_offset());
    }

    fn emit_with_offset(&self, event: ChangeEvent, offset: usize) {
        self.notifier.emit_data(event, offset);
    }

    /// Emit a host-position event that has no data counterpart.
    fn emit_raw(&self, event: ChangeEvent) {
        self.notifier.emit_raw(&event);
    }

    /// Request a full refresh.
    fn refresh(&self) {
        self.emit(ChangeEvent::Reset);
    }

    /// Route a host-position event: positions inside the data area reach
    /// both layers, positions in a leading segment only the observer.
    fn dispatch_host(&self, event: ChangeEvent) {
        let offset = self.mapper().data_offset();
        match event.unshifted(offset) {
            Some(data_event) => self.emit_with_offset(data_event, offset),
            None => self.emit_raw(event),
        }
    }

    /// Notify that the slot at `host_position` changed.
    pub fn notify_changed(&self, host_position: usize) {
        self.dispatch_host(ChangeEvent::RangeChanged {
            start: host_position,
            count: 1,
        });
    }

    /// Notify that a slot was inserted at `host_position`.
    pub fn notify_inserted(&self, host_position: usize) {
        self.dispatch_host(ChangeEvent::RangeInserted {
            start: host_position,
            count: 1,
        });
    }

    /// Notify that the slot at `host_position` was removed.
    pub fn notify_removed(&self, host_position: usize) {
        self.dispatch_host(ChangeEvent::RangeRemoved {
            start: host_position,
            count: 1,
        });
    }

    /// Notify that a slot moved between host positions.
    pub fn notify_moved(&self, from_host: usize, to_host: usize) {
        self.dispatch_host(ChangeEvent::Moved {
            from: from_host,
            to: to_host,
        });
    }

    /// Notify that the item at `data_index` changed.
    pub fn notify_data_changed(&self, data_index: usize) {
        self.emit(ChangeEvent::RangeChanged {
            start: data_index,
            count: 1,
        });
    }

    /// Notify that everything changed.
    pub fn notify_data_set_changed(&self) {
        self.refresh();
    }

    // =========================================================================
    // Data access
    // =========================================================================

    /// The data list.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// The item at `index`.
    pub fn item(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    /// Number of data items.
    pub fn data_len(&self) -> usize {
        self.data.len()
    }

    // =========================================================================
    // Data mutation
    // =========================================================================

    /// Replace the data with a new list and re-open load more.
    pub fn set_new_data(&mut self, data: Vec<T>) {
        self.data = data;
        if self.load_more.handler.is_some() {
            self.load_more.next_load_enabled = true;
            self.load_more.enabled = true;
            self.load_more.loading = false;
            self.set_load_more_status(LoadMoreStatus::Default);
        }
        tracing::debug!(target: targets::ADAPTER, len = self.data.len(), "new data set");
        self.refresh();
    }

    /// Replace the contents without touching load-more state.
    pub fn replace_data<I: IntoIterator<Item = T>>(&mut self, data: I) {
        self.data.clear();
        self.data.extend(data);
        tracing::debug!(target: targets::ADAPTER, len = self.data.len(), "data replaced");
        self.refresh();
    }

    /// Insert `item` at `index`. Returns `false` if `index` is out of range.
    pub fn add_data_at(&mut self, index: usize, item: T) -> bool {
        self.add_all_at(index, vec![item])
    }

    /// Append `item`.
    pub fn add_data(&mut self, item: T) {
        let len = self.data.len();
        self.add_all_at(len, vec![item]);
    }

    /// Insert `items` at `index`. Returns `false` if `index` is out of range.
    pub fn add_all_at<I: IntoIterator<Item = T>>(&mut self, index: usize, items: I) -> bool {
        if index > self.data.len() {
            tracing::debug!(target: targets::ADAPTER, index, len = self.data.len(), "insert out of range");
            return false;
        }

        let was_empty = self.data.is_empty();
        let offset = self.mapper().data_offset();
        let before = self.data.len();
        self.data.splice(index..index, items);
        let count = self.data.len() - before;
        if count == 0 {
            return true;
        }

        if was_empty {
            // The empty slot turns into data slots.
            self.refresh();
        } else {
            self.emit_with_offset(ChangeEvent::RangeInserted { start: index, count }, offset);
        }
        true
    }

    /// Append `items`.
    pub fn add_all<I: IntoIterator<Item = T>>(&mut self, items: I) {
        let len = self.data.len();
        self.add_all_at(len, items);
    }

    /// Remove the item at `index`.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index >= self.data.len() {
            return None;
        }

        let offset = self.mapper().data_offset();
        let removed = self.data.remove(index);
        self.emit_with_offset(ChangeEvent::RangeRemoved { start: index, count: 1 }, offset);

        if self.data.is_empty() {
            self.refresh();
        } else if index < self.data.len() {
            self.emit_with_offset(
                ChangeEvent::RangeChanged {
                    start: index,
                    count: self.data.len() - index,
                },
                offset,
            );
        }
        Some(removed)
    }

    /// Replace the item at `index`. Returns the previous item.
    pub fn set_data(&mut self, index: usize, item: T) -> Option<T> {
        let slot = self.data.get_mut(index)?;
        let previous = std::mem::replace(slot, item);
        self.notify_data_changed(index);
        Some(previous)
    }

    /// Mutate the item at `index` in place. Returns `false` if out of range.
    pub fn modify<F: FnOnce(&mut T)>(&mut self, index: usize, f: F) -> bool {
        let Some(item) = self.data.get_mut(index) else {
            return false;
        };
        f(item);
        self.notify_data_changed(index);
        true
    }

    /// Move the item at `from` to `to`. Returns `false` if either is out of range.
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        if from >= self.data.len() || to >= self.data.len() {
            return false;
        }
        let item = self.data.remove(from);
        self.data.insert(to, item);
        self.emit(ChangeEvent::Moved { from, to });
        true
    }

    // =========================================================================
    // Debugging
    // =========================================================================

    /// Outline rows of the data list, indented by item level.
    pub fn outline_rows<F: Fn(&T) -> String>(&self, label: F) -> Vec<OutlineRow> {
        self.data
            .iter()
            .map(|item| {
                let depth = level_of(item).map_or(0, |level| level.max(0) as usize);
                let row = OutlineRow::new(depth, label(item));
                match item.as_expandable() {
                    Some(node) if node.has_sub_items() => row.expanded(node.is_expanded()),
                    _ => row,
                }
            })
            .collect()
    }

    /// Render the data list as an indented outline.
    pub fn debug_outline<F: Fn(&T) -> String>(&self, label: F) -> String {
        OutlineDebug::new().format("QuickAdapter", &self.outline_rows(label))
    }
}

impl<T: ListItem> AdapterCore for QuickAdapter<T> {
    fn item_count(&self) -> usize {
        self.mapper().item_count()
    }

    fn classify(&self, position: usize) -> Option<Segment> {
        self.mapper().classify(position)
    }

    fn item_view_type(&self, position: usize) -> Option<ViewType> {
        Some(match self.classify(position)? {
            Segment::Header => ViewType::Header,
            Segment::Footer => ViewType::Footer,
            Segment::Empty => ViewType::Empty,
            Segment::LoadMore => ViewType::LoadMore,
            Segment::Data(index) => {
                let item = self.data.get(index)?;
                ViewType::Item(match &self.item_type_fn {
                    Some(type_fn) => type_fn(item, index),
                    None => item.item_type(),
                })
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<ChangeEvent>>,
    }

    impl AdapterObserver for Recorder {
        fn on_changed(&self) {
            self.events.lock().push(ChangeEvent::Reset);
        }

        fn on_item_range_changed(&self, start: usize, count: usize) {
            self.events.lock().push(ChangeEvent::RangeChanged { start, count });
        }

        fn on_item_range_inserted(&self, start: usize, count: usize) {
            self.events.lock().push(ChangeEvent::RangeInserted { start, count });
        }

        fn on_item_range_removed(&self, start: usize, count: usize) {
            self.events.lock().push(ChangeEvent::RangeRemoved { start, count });
        }

        fn on_item_moved(&self, from: usize, to: usize) {
            self.events.lock().push(ChangeEvent::Moved { from, to });
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn observed(items: &[&str]) -> (QuickAdapter<String>, Arc<Recorder>) {
        let mut adapter = QuickAdapter::new(strings(items));
        let recorder = Arc::new(Recorder::default());
        adapter.register_observer(recorder.clone());
        (adapter, recorder)
    }

    #[test]
    fn test_insert_offsets_by_header() {
        let (mut adapter, recorder) = observed(&["a", "b", "c"]);
        adapter.add_header_view(ViewId(1), None);
        recorder.events.lock().clear();

        assert!(adapter.add_data_at(3, "d".into()));
        assert_eq!(
            *recorder.events.lock(),
            vec![ChangeEvent::RangeInserted { start: 4, count: 1 }]
        );
    }

    #[test]
    fn test_insert_into_empty_list_refreshes() {
        let (mut adapter, recorder) = observed(&[]);
        adapter.add_data("a".into());
        assert_eq!(*recorder.events.lock(), vec![ChangeEvent::Reset]);
    }

    #[test]
    fn test_insert_out_of_range() {
        let (mut adapter, recorder) = observed(&["a"]);
        assert!(!adapter.add_data_at(5, "x".into()));
        assert!(recorder.events.lock().is_empty());
    }

    #[test]
    fn test_remove_notifies_tail() {
        let (mut adapter, recorder) = observed(&["a", "b", "c"]);
        assert_eq!(adapter.remove(0).as_deref(), Some("a"));
        assert_eq!(
            *recorder.events.lock(),
            vec![
                ChangeEvent::RangeRemoved { start: 0, count: 1 },
                ChangeEvent::RangeChanged { start: 0, count: 2 },
            ]
        );
        assert!(adapter.remove(7).is_none());
    }

    #[test]
    fn test_remove_last_item_refreshes() {
        let (mut adapter, recorder) = observed(&["a"]);
        adapter.remove(0);
        assert_eq!(
            *recorder.events.lock(),
            vec![ChangeEvent::RangeRemoved { start: 0, count: 1 }, ChangeEvent::Reset]
        );
    }

    #[test]
    fn test_set_modify_and_move() {
        let (mut adapter, recorder) = observed(&["a", "b", "c"]);
        assert_eq!(adapter.set_data(1, "B".into()).as_deref(), Some("b"));
        assert!(adapter.modify(2, |item| item.push('!')));
        assert!(adapter.move_item(0, 2));
        assert!(!adapter.move_item(0, 3));

        assert_eq!(adapter.data(), strings(&["B", "c!", "a"]).as_slice());
        assert_eq!(
            *recorder.events.lock(),
            vec![
                ChangeEvent::RangeChanged { start: 1, count: 1 },
                ChangeEvent::RangeChanged { start: 2, count: 1 },
                ChangeEvent::Moved { from: 0, to: 2 },
            ]
        );
    }

    #[test]
    fn test_signals_see_data_positions() {
        let (mut adapter, _recorder) = observed(&["a", "b"]);
        adapter.add_header_view(ViewId(1), None);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        adapter.signals().items_inserted.connect(move |&(start, count)| {
            seen_clone.lock().push((start, count));
        });

        adapter.add_data_at(1, "x".into());
        assert_eq!(*seen.lock(), vec![(1, 1)]);
    }

    #[test]
    fn test_notify_helpers_subtract_offset() {
        let (mut adapter, recorder) = observed(&["a", "b"]);
        adapter.add_header_view(ViewId(1), None);
        recorder.events.lock().clear();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        adapter.signals().items_changed.connect(move |&(start, _)| {
            seen_clone.lock().push(start);
        });

        adapter.notify_changed(2);
        adapter.notify_changed(0);

        assert_eq!(*seen.lock(), vec![1]);
        assert_eq!(
            *recorder.events.lock(),
            vec![
                ChangeEvent::RangeChanged { start: 2, count: 1 },
                ChangeEvent::RangeChanged { start: 0, count: 1 },
            ]
        );
    }

    #[test]
    fn test_item_view_type_classifier() {
        let adapter = QuickAdapter::builder()
            .data(strings(&["a", "bb"]))
            .item_type(|item: &String, _| item.len() as u32)
            .build();
        assert_eq!(adapter.item_view_type(1), Some(ViewType::Item(2)));
        assert_eq!(adapter.item_view_type(2), None);
        assert!(!adapter.is_full_span_at(0));
        assert_eq!(adapter.item_id(1), 1);
    }

    #[test]
    fn test_debug_outline() {
        let adapter = QuickAdapter::new(strings(&["a", "b"]));
        let output = adapter.debug_outline(|item| item.clone());
        assert!(output.contains("QuickAdapter (2 rows)"));
        assert!(output.contains("a @0"));
    }
}
