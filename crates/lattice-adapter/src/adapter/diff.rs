//! Applying edit scripts.

use lattice_adapter_core::logging::targets;

use super::QuickAdapter;
use crate::diff::{DiffCalculator, EditScript};
use crate::item::ListItem;

impl<T: ListItem> QuickAdapter<T> {
    /// Replace the data with `new_data`, announcing the change through
    /// `script` instead of a full refresh.
    ///
    /// While the empty block is shown there is no stable prior shape to diff
    /// against, so this falls back to [`set_new_data`](Self::set_new_data).
    /// A script that does not describe `old -> new_data` falls back to
    /// [`replace_data`](Self::replace_data). A full refresh follows the script
    /// when the new length adds or drops the empty or load-more slot.
    pub fn set_new_diff_data(&mut self, script: &EditScript, new_data: Vec<T>) {
        let mapper = self.mapper();
        if mapper.empty_active() {
            tracing::debug!(target: targets::DIFF, "empty block active, replacing without diff");
            self.set_new_data(new_data);
            return;
        }
        if !script.fits(self.data.len(), new_data.len()) {
            tracing::warn!(
                target: targets::DIFF,
                old_len = self.data.len(),
                new_len = new_data.len(),
                ops = script.len(),
                "edit script does not match data, replacing"
            );
            self.replace_data(new_data);
            return;
        }

        let offset = mapper.data_offset();
        tracing::debug!(target: targets::DIFF, ops = script.len(), "applying edit script");
        for op in script.ops() {
            self.emit_with_offset(op.to_event(), offset);
        }
        self.data = new_data;

        // The script only covers data slots. If the empty or load-more slot
        // appeared or vanished with the new length, the host count is stale.
        let before = mapper.counts();
        let after = self.mapper().counts();
        if before.empty != after.empty || before.load_more != after.load_more {
            tracing::debug!(target: targets::DIFF, ?before, ?after, "segment slots changed, refreshing");
            self.refresh();
        }
    }

    /// Compute a script with `calculator` and apply it.
    pub fn set_new_diff_data_with<C>(&mut self, calculator: &C, new_data: Vec<T>)
    where
        C: DiffCalculator<T> + ?Sized,
    {
        let script = calculator.calculate(&self.data, &new_data);
        self.set_new_diff_data(&script, new_data);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::host::{AdapterCore, ViewId};
    use crate::notify::{AdapterObserver, ChangeEvent};

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<ChangeEvent>>,
    }

    impl AdapterObserver for Recorder {
        fn on_changed(&self) {
            self.events.lock().push(ChangeEvent::Reset);
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
        adapter.add_header_view(ViewId(1), None);
        let recorder = Arc::new(Recorder::default());
        adapter.register_observer(recorder.clone());
        (adapter, recorder)
    }

    #[test]
    fn test_script_is_offset() {
        let (mut adapter, recorder) = observed(&["a", "b", "c"]);
        let script = EditScript::new().removed(0, 1).moved(1, 0).inserted(2, 1);

        adapter.set_new_diff_data(&script, strings(&["c", "b", "d"]));
        assert_eq!(adapter.data(), strings(&["c", "b", "d"]).as_slice());
        assert_eq!(
            *recorder.events.lock(),
            vec![
                ChangeEvent::RangeRemoved { start: 1, count: 1 },
                ChangeEvent::Moved { from: 2, to: 1 },
                ChangeEvent::RangeInserted { start: 3, count: 1 },
            ]
        );
    }

    #[test]
    fn test_mismatched_script_replaces() {
        let (mut adapter, recorder) = observed(&["a"]);
        adapter.set_new_diff_data(&EditScript::new(), strings(&["x", "y"]));
        assert_eq!(adapter.data_len(), 2);
        assert_eq!(*recorder.events.lock(), vec![ChangeEvent::Reset]);
    }

    #[test]
    fn test_empty_block_bypasses_diff() {
        let (mut adapter, recorder) = observed(&[]);
        adapter.set_empty_view(ViewId(9));
        recorder.events.lock().clear();

        adapter.set_new_diff_data(&EditScript::new().inserted(0, 1), strings(&["a"]));
        assert_eq!(adapter.data_len(), 1);
        assert_eq!(*recorder.events.lock(), vec![ChangeEvent::Reset]);
    }

    #[test]
    fn test_diff_to_empty_activates_empty_block() {
        let (mut adapter, recorder) = observed(&["a"]);
        adapter.set_empty_view(ViewId(9));

        adapter.set_new_diff_data(&EditScript::new().removed(0, 1), Vec::new());
        assert_eq!(adapter.empty_view_count(), 1);
        assert_eq!(
            *recorder.events.lock(),
            vec![ChangeEvent::RangeRemoved { start: 1, count: 1 }, ChangeEvent::Reset]
        );
    }

    #[test]
    fn test_diff_to_empty_drops_load_more_slot() {
        let (mut adapter, recorder) = observed(&["a", "b"]);
        adapter.set_on_load_more_listener(|| {});
        assert_eq!(adapter.item_count(), 4);

        adapter.set_new_diff_data(&EditScript::new().removed(0, 2), Vec::new());
        assert_eq!(adapter.item_count(), 1);
        assert_eq!(
            *recorder.events.lock(),
            vec![ChangeEvent::RangeRemoved { start: 1, count: 2 }, ChangeEvent::Reset]
        );
    }

    #[test]
    fn test_diff_from_empty_adds_load_more_slot() {
        let (mut adapter, recorder) = observed(&[]);
        adapter.set_on_load_more_listener(|| {});
        assert_eq!(adapter.item_count(), 1);

        adapter.set_new_diff_data(&EditScript::new().inserted(0, 2), strings(&["a", "b"]));
        assert_eq!(adapter.item_count(), 4);
        assert_eq!(
            *recorder.events.lock(),
            vec![ChangeEvent::RangeInserted { start: 1, count: 2 }, ChangeEvent::Reset]
        );
    }

    #[test]
    fn test_diff_within_data_keeps_slots() {
        let (mut adapter, recorder) = observed(&["a"]);
        adapter.set_on_load_more_listener(|| {});

        adapter.set_new_diff_data(&EditScript::new().inserted(1, 1), strings(&["a", "b"]));
        assert_eq!(
            *recorder.events.lock(),
            vec![ChangeEvent::RangeInserted { start: 2, count: 1 }]
        );
    }

    #[test]
    fn test_calculator() {
        let (mut adapter, _recorder) = observed(&["a"]);
        let appended = |old: &[String], new: &[String]| {
            EditScript::new().inserted(old.len(), new.len() - old.len())
        };
        adapter.set_new_diff_data_with(&appended, strings(&["a", "b"]));
        assert_eq!(adapter.data_len(), 2);
    }
}
