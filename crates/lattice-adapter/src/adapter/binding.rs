//! Host attachment, holder binding and click dispatch.

use std::sync::Arc;

use lattice_adapter_core::logging::targets;
use lattice_adapter_core::{AdapterError, Result};

use super::QuickAdapter;
use crate::host::{AdapterCore, Bindable, HolderResult, HostSurface, ViewId, ViewType};
use crate::item::ListItem;
use crate::position::Segment;

impl<T: ListItem> QuickAdapter<T> {
    // =========================================================================
    // Attachment
    // =========================================================================

    /// Attach the adapter to its host surface.
    ///
    /// A configured empty layout becomes the empty view unless one was set
    /// explicitly.
    pub fn attach(&mut self, surface: Arc<dyn HostSurface>) -> Result<()> {
        if self.surface.is_some() {
            return Err(AdapterError::AlreadyAttached);
        }
        tracing::debug!(target: targets::ADAPTER, layout = ?surface.layout_kind(), "attached");
        self.surface = Some(surface);

        if self.empty_view.is_none() {
            if let Some(layout) = self.config.empty_layout {
                self.set_empty_view(layout.layout_id);
            }
        }
        Ok(())
    }

    /// Whether a host surface is attached.
    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    /// Look up a child view of the view bound at `host_position`.
    pub fn view_by_position(&self, host_position: usize, view: ViewId) -> Result<Option<ViewId>> {
        let surface = self.surface.as_ref().ok_or(AdapterError::NotAttached)?;
        Ok(surface.view_at(host_position, view))
    }

    // =========================================================================
    // Holders
    // =========================================================================

    /// Create a holder for `view_type` through the registered factory.
    pub fn create_view_holder(&self, view_type: ViewType) -> HolderResult<T> {
        let factory = self
            .holder_factory
            .as_ref()
            .ok_or_else(|| AdapterError::missing_holder_factory(view_type))?;
        Ok(factory(view_type))
    }

    /// Bind `holder` to the slot at `host_position`.
    ///
    /// Binding drives paging: a slot near the top may start an up fetch and
    /// a slot near the end may request the next page.
    pub fn bind_view_holder(&mut self, holder: &mut dyn Bindable<T>, host_position: usize) {
        self.auto_up_fetch(host_position);
        self.auto_load_more(host_position);

        match self.classify(host_position) {
            Some(Segment::Data(index)) => {
                if let Some(item) = self.data.get(index) {
                    holder.bind_item(item, index);
                }
            }
            Some(Segment::LoadMore) => holder.bind_load_more(self.load_more.status),
            Some(segment) => holder.bind_segment(segment),
            None => {
                tracing::trace!(target: targets::ADAPTER, host_position, "bind past end");
            }
        }
    }

    // =========================================================================
    // Clicks
    // =========================================================================

    /// Set the item click listener.
    pub fn set_on_item_click_listener<F>(&mut self, listener: F)
    where
        F: Fn(&T, ViewId, usize) + Send + Sync + 'static,
    {
        self.listeners.item_click = Some(Arc::new(listener));
    }

    /// Set the item long click listener.
    pub fn set_on_item_long_click_listener<F>(&mut self, listener: F)
    where
        F: Fn(&T, ViewId, usize) -> bool + Send + Sync + 'static,
    {
        self.listeners.item_long_click = Some(Arc::new(listener));
    }

    /// Set the child view click listener.
    pub fn set_on_item_child_click_listener<F>(&mut self, listener: F)
    where
        F: Fn(&T, ViewId, usize) + Send + Sync + 'static,
    {
        self.listeners.child_click = Some(Arc::new(listener));
    }

    /// Set the child view long click listener.
    pub fn set_on_item_child_long_click_listener<F>(&mut self, listener: F)
    where
        F: Fn(&T, ViewId, usize) -> bool + Send + Sync + 'static,
    {
        self.listeners.child_long_click = Some(Arc::new(listener));
    }

    fn data_at_host(&self, host_position: usize) -> Option<(usize, &T)> {
        let index = self.data_index(host_position)?;
        self.data.get(index).map(|item| (index, item))
    }

    /// Dispatch a click on the slot at `host_position`. Returns `true` if a
    /// listener ran.
    pub fn perform_item_click(&self, host_position: usize, view: ViewId) -> bool {
        let (Some(listener), Some((index, item))) =
            (&self.listeners.item_click, self.data_at_host(host_position))
        else {
            return false;
        };
        listener(item, view, index);
        true
    }

    /// Dispatch a long click. Returns whether the listener consumed it.
    pub fn perform_item_long_click(&self, host_position: usize, view: ViewId) -> bool {
        let (Some(listener), Some((index, item))) =
            (&self.listeners.item_long_click, self.data_at_host(host_position))
        else {
            return false;
        };
        listener(item, view, index)
    }

    /// Dispatch a click on child `view` of the slot at `host_position`.
    pub fn perform_child_click(&self, host_position: usize, view: ViewId) -> bool {
        let (Some(listener), Some((index, item))) =
            (&self.listeners.child_click, self.data_at_host(host_position))
        else {
            return false;
        };
        listener(item, view, index);
        true
    }

    /// Dispatch a long click on child `view`. Returns whether it was consumed.
    pub fn perform_child_long_click(&self, host_position: usize, view: ViewId) -> bool {
        let (Some(listener), Some((index, item))) =
            (&self.listeners.child_long_click, self.data_at_host(host_position))
        else {
            return false;
        };
        listener(item, view, index)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{Duration, Instant};

    use parking_lot::Mutex;

    use super::*;
    use crate::config::{AdapterConfig, EmptyLayoutConfig};
    use crate::host::LayoutKind;
    use crate::segment::LoadMoreStatus;

    struct MockSurface {
        layout: LayoutKind,
        first: Mutex<Option<usize>>,
        lasts: Mutex<Vec<usize>>,
    }

    impl MockSurface {
        fn linear(first: Option<usize>, last: usize) -> Arc<Self> {
            Arc::new(Self {
                layout: LayoutKind::Linear,
                first: Mutex::new(first),
                lasts: Mutex::new(vec![last]),
            })
        }
    }

    impl HostSurface for MockSurface {
        fn layout_kind(&self) -> LayoutKind {
            self.layout
        }

        fn first_completely_visible_position(&self) -> Option<usize> {
            *self.first.lock()
        }

        fn last_completely_visible_positions(&self) -> Vec<usize> {
            self.lasts.lock().clone()
        }

        fn view_at(&self, position: usize, view: ViewId) -> Option<ViewId> {
            (position == 0).then_some(ViewId(view.0 + 100))
        }
    }

    #[derive(Default)]
    struct RecordingHolder {
        bound: Vec<String>,
    }

    impl Bindable<String> for RecordingHolder {
        fn bind_item(&mut self, item: &String, data_index: usize) {
            self.bound.push(format!("{item}:{data_index}"));
        }

        fn bind_load_more(&mut self, status: LoadMoreStatus) {
            self.bound.push(format!("load_more:{status:?}"));
        }

        fn bind_segment(&mut self, segment: Segment) {
            self.bound.push(format!("{segment:?}"));
        }
    }

    fn strings(len: usize) -> Vec<String> {
        (0..len).map(|i| format!("item{i}")).collect()
    }

    fn paging_adapter(len: usize) -> (QuickAdapter<String>, Arc<AtomicUsize>) {
        let mut adapter = QuickAdapter::new(strings(len));
        let requests = Arc::new(AtomicUsize::new(0));
        let requests_clone = requests.clone();
        adapter.set_on_load_more_listener(move || {
            requests_clone.fetch_add(1, Ordering::SeqCst);
        });
        (adapter, requests)
    }

    #[test]
    fn test_attach_once() {
        let mut adapter = QuickAdapter::new(strings(1));
        assert!(!adapter.is_attached());
        assert_eq!(adapter.view_by_position(0, ViewId(1)), Err(AdapterError::NotAttached));

        adapter.attach(MockSurface::linear(Some(0), 0)).unwrap();
        assert!(adapter.is_attached());
        assert_eq!(adapter.view_by_position(0, ViewId(1)), Ok(Some(ViewId(101))));
        assert_eq!(
            adapter.attach(MockSurface::linear(Some(0), 0)),
            Err(AdapterError::AlreadyAttached)
        );
    }

    #[test]
    fn test_attach_applies_empty_layout() {
        let layout = EmptyLayoutConfig {
            layout_id: ViewId(50),
            loading_group_id: ViewId(51),
            empty_group_id: ViewId(52),
            error_group_id: ViewId(53),
            retry_id: ViewId(54),
        };
        let mut adapter: QuickAdapter<String> = QuickAdapter::builder()
            .config(AdapterConfig::new().with_empty_layout(layout))
            .build();
        adapter.attach(MockSurface::linear(None, 0)).unwrap();

        assert_eq!(adapter.empty_view(), Some(ViewId(50)));
        assert_eq!(adapter.item_count(), 1);
    }

    #[test]
    fn test_create_view_holder() {
        let adapter = QuickAdapter::new(strings(1));
        assert_eq!(
            adapter.create_view_holder(ViewType::Header).err(),
            Some(AdapterError::missing_holder_factory(ViewType::Header))
        );

        let adapter = QuickAdapter::builder()
            .data(strings(1))
            .holder_factory(|_| Box::new(RecordingHolder::default()))
            .build();
        assert!(adapter.create_view_holder(ViewType::Item(0)).is_ok());
    }

    #[test]
    fn test_bind_dispatches_by_segment() {
        let (mut adapter, _requests) = paging_adapter(2);
        adapter.add_header_view(ViewId(1), None);
        let mut holder = RecordingHolder::default();

        for position in 0..adapter.item_count() {
            adapter.bind_view_holder(&mut holder, position);
        }
        assert_eq!(
            holder.bound,
            vec!["Header", "item0:0", "item1:1", "load_more:Loading"]
        );
    }

    #[test]
    fn test_attached_load_more_is_deferred() {
        let (mut adapter, requests) = paging_adapter(3);
        adapter.attach(MockSurface::linear(Some(0), 3)).unwrap();

        let mut holder = RecordingHolder::default();
        adapter.bind_view_holder(&mut holder, 2);
        assert!(adapter.is_loading());
        assert_eq!(requests.load(Ordering::SeqCst), 0);
        assert_eq!(adapter.pending_deferred(), 1);

        assert_eq!(adapter.run_deferred(Instant::now()), 1);
        assert_eq!(requests.load(Ordering::SeqCst), 1);

        adapter.bind_view_holder(&mut holder, 3);
        adapter.run_deferred(Instant::now());
        assert_eq!(requests.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_full_page_check() {
        let (mut adapter, _requests) = paging_adapter(20);
        let surface = MockSurface::linear(Some(0), 9);
        adapter.attach(surface).unwrap();

        adapter.disable_load_more_if_not_full_page().unwrap();
        assert_eq!(adapter.load_more_view_count(), 0);
        assert_eq!(adapter.run_deferred(Instant::now()), 0);

        let later = Instant::now() + Duration::from_secs(1);
        assert_eq!(adapter.run_deferred(later), 1);
        assert_eq!(adapter.load_more_view_count(), 1);
    }

    #[test]
    fn test_short_page_stays_disabled() {
        let (mut adapter, _requests) = paging_adapter(3);
        let surface = MockSurface::linear(Some(0), 2);
        adapter.attach(surface).unwrap();

        adapter.disable_load_more_if_not_full_page().unwrap();
        adapter.run_deferred(Instant::now() + Duration::from_secs(1));
        assert_eq!(adapter.load_more_view_count(), 0);
    }

    #[test]
    fn test_up_fetch_on_bind() {
        let mut adapter = QuickAdapter::new(strings(5));
        let fetches = Arc::new(AtomicUsize::new(0));
        let fetches_clone = fetches.clone();
        adapter.set_up_fetch_listener(move || {
            fetches_clone.fetch_add(1, Ordering::SeqCst);
        });
        adapter.set_up_fetch_enable(true);

        let mut holder = RecordingHolder::default();
        adapter.bind_view_holder(&mut holder, 3);
        adapter.bind_view_holder(&mut holder, 1);
        assert_eq!(fetches.load(Ordering::SeqCst), 1);

        adapter.set_up_fetching(true);
        adapter.bind_view_holder(&mut holder, 0);
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_clicks_translate_positions() {
        let mut adapter = QuickAdapter::new(strings(2));
        adapter.add_header_view(ViewId(1), None);

        let clicks = Arc::new(Mutex::new(Vec::new()));
        let clicks_clone = clicks.clone();
        adapter.set_on_item_click_listener(move |item: &String, view, index| {
            clicks_clone.lock().push((item.clone(), view, index));
        });
        adapter.set_on_item_child_long_click_listener(|_, view, _| view == ViewId(7));

        assert!(adapter.perform_item_click(2, ViewId(3)));
        assert!(!adapter.perform_item_click(0, ViewId(3)));
        assert!(!adapter.perform_item_long_click(1, ViewId(3)));
        assert!(!adapter.perform_child_click(1, ViewId(3)));
        assert!(adapter.perform_child_long_click(1, ViewId(7)));
        assert!(!adapter.perform_child_long_click(1, ViewId(8)));

        assert_eq!(*clicks.lock(), vec![(String::from("item1"), ViewId(3), 1)]);
    }
}
