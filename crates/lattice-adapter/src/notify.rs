//! Change notification.
//!
//! Every change is emitted in two layers:
//!
//! - The raw layer carries host positions and goes to the one registered
//!   [`AdapterObserver`], normally the host surface itself.
//! - The data layer carries data indices and goes to the [`AdapterSignals`],
//!   which any number of application subscribers may connect to.
//!
//! The offset between the two is recomputed by the adapter for every event,
//! never frozen at registration.

use std::sync::Arc;

use lattice_adapter_core::Signal;
use lattice_adapter_core::logging::targets;

use crate::config::EmptyViewState;
use crate::segment::LoadMoreStatus;

/// A position-based change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeEvent {
    /// Everything may have changed.
    Reset,
    /// `count` items starting at `start` changed in place.
    RangeChanged {
        /// First changed position.
        start: usize,
        /// Number of changed positions.
        count: usize,
    },
    /// `count` items were inserted at `start`.
    RangeInserted {
        /// First inserted position.
        start: usize,
        /// Number of inserted positions.
        count: usize,
    },
    /// `count` items were removed from `start`.
    RangeRemoved {
        /// First removed position.
        start: usize,
        /// Number of removed positions.
        count: usize,
    },
    /// One item moved.
    Moved {
        /// Position before the move.
        from: usize,
        /// Position after the move.
        to: usize,
    },
}

impl ChangeEvent {
    /// The event with every position moved forward by `offset`.
    pub fn shifted(self, offset: usize) -> Self {
        match self {
            ChangeEvent::Reset => ChangeEvent::Reset,
            ChangeEvent::RangeChanged { start, count } => ChangeEvent::RangeChanged {
                start: start + offset,
                count,
            },
            ChangeEvent::RangeInserted { start, count } => ChangeEvent::RangeInserted {
                start: start + offset,
                count,
            },
            ChangeEvent::RangeRemoved { start, count } => ChangeEvent::RangeRemoved {
                start: start + offset,
                count,
            },
            ChangeEvent::Moved { from, to } => ChangeEvent::Moved {
                from: from + offset,
                to: to + offset,
            },
        }
    }

    /// The event with every position moved back by `offset`.
    ///
    /// Returns `None` if a position lies before `offset`.
    pub fn unshifted(self, offset: usize) -> Option<Self> {
        Some(match self {
            ChangeEvent::Reset => ChangeEvent::Reset,
            ChangeEvent::RangeChanged { start, count } => ChangeEvent::RangeChanged {
                start: start.checked_sub(offset)?,
                count,
            },
            ChangeEvent::RangeInserted { start, count } => ChangeEvent::RangeInserted {
                start: start.checked_sub(offset)?,
                count,
            },
            ChangeEvent::RangeRemoved { start, count } => ChangeEvent::RangeRemoved {
                start: start.checked_sub(offset)?,
                count,
            },
            ChangeEvent::Moved { from, to } => ChangeEvent::Moved {
                from: from.checked_sub(offset)?,
                to: to.checked_sub(offset)?,
            },
        })
    }
}

/// Receiver of raw change events in host positions.
///
/// All range methods default to a full refresh through [`on_changed`].
///
/// [`on_changed`]: AdapterObserver::on_changed
pub trait AdapterObserver: Send + Sync {
    /// Everything may have changed.
    fn on_changed(&self);

    /// A range changed in place.
    fn on_item_range_changed(&self, _start: usize, _count: usize) {
        self.on_changed();
    }

    /// A range was inserted.
    fn on_item_range_inserted(&self, _start: usize, _count: usize) {
        self.on_changed();
    }

    /// A range was removed.
    fn on_item_range_removed(&self, _start: usize, _count: usize) {
        self.on_changed();
    }

    /// One item moved.
    fn on_item_moved(&self, _from: usize, _to: usize) {
        self.on_changed();
    }
}

/// Wrapper around the single registered observer.
#[derive(Clone)]
pub struct ObserverProxy {
    observer: Arc<dyn AdapterObserver>,
}

impl ObserverProxy {
    fn new(observer: Arc<dyn AdapterObserver>) -> Self {
        Self { observer }
    }

    /// Whether this proxy wraps `observer`.
    pub fn wraps(&self, observer: &Arc<dyn AdapterObserver>) -> bool {
        Arc::ptr_eq(&self.observer, observer)
    }

    fn dispatch(&self, event: &ChangeEvent) {
        match *event {
            ChangeEvent::Reset => self.observer.on_changed(),
            ChangeEvent::RangeChanged { start, count } => {
                self.observer.on_item_range_changed(start, count)
            }
            ChangeEvent::RangeInserted { start, count } => {
                self.observer.on_item_range_inserted(start, count)
            }
            ChangeEvent::RangeRemoved { start, count } => {
                self.observer.on_item_range_removed(start, count)
            }
            ChangeEvent::Moved { from, to } => self.observer.on_item_moved(from, to),
        }
    }
}

/// Data-relative signals emitted by an adapter.
///
/// Positions are data indices; virtual segments are never reported here.
pub struct AdapterSignals {
    /// Items changed in place. Args: (first index, count)
    pub items_changed: Signal<(usize, usize)>,
    /// Items were inserted. Args: (first index, count)
    pub items_inserted: Signal<(usize, usize)>,
    /// Items were removed. Args: (first index, count)
    pub items_removed: Signal<(usize, usize)>,
    /// An item moved. Args: (from index, to index)
    pub item_moved: Signal<(usize, usize)>,
    /// The whole list must be re-read.
    pub data_reset: Signal<()>,
    /// The load-more indicator changed state.
    pub load_more_status_changed: Signal<LoadMoreStatus>,
    /// The visible group of the empty layout changed.
    pub empty_state_changed: Signal<EmptyViewState>,
}

impl Default for AdapterSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl AdapterSignals {
    /// Creates a new set of signals.
    pub fn new() -> Self {
        Self {
            items_changed: Signal::new(),
            items_inserted: Signal::new(),
            items_removed: Signal::new(),
            item_moved: Signal::new(),
            data_reset: Signal::new(),
            load_more_status_changed: Signal::new(),
            empty_state_changed: Signal::new(),
        }
    }

    fn emit(&self, event: ChangeEvent) {
        match event {
            ChangeEvent::Reset => self.data_reset.emit(()),
            ChangeEvent::RangeChanged { start, count } => self.items_changed.emit((start, count)),
            ChangeEvent::RangeInserted { start, count } => {
                self.items_inserted.emit((start, count))
            }
            ChangeEvent::RangeRemoved { start, count } => self.items_removed.emit((start, count)),
            ChangeEvent::Moved { from, to } => self.item_moved.emit((from, to)),
        }
    }
}

/// Two-layer event emitter owned by an adapter.
#[derive(Default)]
pub struct ChangeNotifier {
    proxy: Option<ObserverProxy>,
    signals: AdapterSignals,
}

impl ChangeNotifier {
    /// Create a notifier without an observer.
    pub fn new() -> Self {
        Self::default()
    }

    /// The data-relative signals.
    pub fn signals(&self) -> &AdapterSignals {
        &self.signals
    }

    /// Register the raw observer.
    ///
    /// Registering the same instance again is a no-op; a different instance
    /// replaces the previous one.
    pub fn register_observer(&mut self, observer: Arc<dyn AdapterObserver>) {
        if self.proxy.as_ref().is_some_and(|proxy| proxy.wraps(&observer)) {
            tracing::trace!(target: targets::NOTIFY, "observer already registered");
            return;
        }
        if self.proxy.is_some() {
            tracing::debug!(target: targets::NOTIFY, "replacing registered observer");
        }
        self.proxy = Some(ObserverProxy::new(observer));
    }

    /// Unregister `observer`. Returns `false` if it was not the registered one.
    pub fn unregister_observer(&mut self, observer: &Arc<dyn AdapterObserver>) -> bool {
        if self.proxy.as_ref().is_some_and(|proxy| proxy.wraps(observer)) {
            self.proxy = None;
            true
        } else {
            false
        }
    }

    /// Whether an observer is registered.
    pub fn has_observer(&self) -> bool {
        self.proxy.is_some()
    }

    /// Send a host-position event to the observer only.
    pub fn emit_raw(&self, event: &ChangeEvent) {
        tracing::trace!(target: targets::NOTIFY, ?event, "raw event");
        if let Some(proxy) = &self.proxy {
            proxy.dispatch(event);
        }
    }

    /// Send a data-index event to the signals, and its host-position form
    /// shifted by `offset` to the observer.
    pub fn emit_data(&self, event: ChangeEvent, offset: usize) {
        self.emit_raw(&event.shifted(offset));
        self.signals.emit(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl AdapterObserver for Recorder {
        fn on_changed(&self) {
            self.events.lock().push("changed".into());
        }

        fn on_item_range_inserted(&self, start: usize, count: usize) {
            self.events.lock().push(format!("inserted {start} {count}"));
        }
    }

    #[test]
    fn test_shift_round_trip() {
        let event = ChangeEvent::Moved { from: 1, to: 4 };
        assert_eq!(event.shifted(2), ChangeEvent::Moved { from: 3, to: 6 });
        assert_eq!(event.shifted(2).unshifted(2), Some(event));
        assert_eq!(event.unshifted(2), None);
        assert_eq!(ChangeEvent::Reset.unshifted(9), Some(ChangeEvent::Reset));
    }

    #[test]
    fn test_emit_data_offsets_observer_only() {
        let recorder = Arc::new(Recorder::default());
        let mut notifier = ChangeNotifier::new();
        notifier.register_observer(recorder.clone());

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        notifier.signals().items_inserted.connect(move |&(start, count)| {
            seen_clone.lock().push((start, count));
        });

        notifier.emit_data(ChangeEvent::RangeInserted { start: 3, count: 1 }, 1);

        assert_eq!(*recorder.events.lock(), vec!["inserted 4 1"]);
        assert_eq!(*seen.lock(), vec![(3, 1)]);
    }

    #[test]
    fn test_default_methods_fall_back_to_changed() {
        let recorder = Arc::new(Recorder::default());
        let mut notifier = ChangeNotifier::new();
        notifier.register_observer(recorder.clone());

        notifier.emit_raw(&ChangeEvent::RangeRemoved { start: 0, count: 2 });
        assert_eq!(*recorder.events.lock(), vec!["changed"]);
    }

    #[test]
    fn test_register_is_idempotent() {
        let first: Arc<dyn AdapterObserver> = Arc::new(Recorder::default());
        let second: Arc<dyn AdapterObserver> = Arc::new(Recorder::default());
        let mut notifier = ChangeNotifier::new();

        notifier.register_observer(first.clone());
        notifier.register_observer(first.clone());
        assert!(notifier.has_observer());

        notifier.register_observer(second.clone());
        assert!(!notifier.unregister_observer(&first));
        assert!(notifier.unregister_observer(&second));
        assert!(!notifier.has_observer());
    }
}
