//! Load more and up fetch.
//!
//! Binding a slot near the end of the list requests the next page; binding
//! one near the top triggers an up fetch. Requests made while attached are
//! deferred onto the work queue so the handler never runs inside a layout
//! pass.

use std::sync::Arc;
use std::time::Instant;

use lattice_adapter_core::logging::targets;
use lattice_adapter_core::{AdapterError, Result};

use super::{DeferredAction, QuickAdapter};
use crate::host::LayoutKind;
use crate::item::ListItem;
use crate::notify::ChangeEvent;
use crate::segment::LoadMoreStatus;

impl<T: ListItem> QuickAdapter<T> {
    pub(super) fn set_load_more_status(&mut self, status: LoadMoreStatus) {
        if self.load_more.status != status {
            self.load_more.status = status;
            tracing::trace!(target: targets::LOAD_MORE, ?status, "load more status");
            self.notifier.signals().load_more_status_changed.emit(status);
        }
    }

    fn load_more_slot_changed(&self) {
        self.emit_raw(ChangeEvent::RangeChanged {
            start: self.load_more_position(),
            count: 1,
        });
    }

    /// Register the page request handler and enable load more.
    pub fn set_on_load_more_listener<F>(&mut self, handler: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.load_more.handler = Some(Arc::new(handler));
        self.load_more.next_load_enabled = true;
        self.load_more.enabled = true;
        self.load_more.loading = false;
    }

    /// Load-more slot count, 0 or 1.
    pub fn load_more_view_count(&self) -> usize {
        self.mapper().counts().load_more
    }

    /// Host position of the load-more slot.
    pub fn load_more_position(&self) -> usize {
        self.mapper().load_more_position()
    }

    /// Whether a page request is in flight.
    pub fn is_loading(&self) -> bool {
        self.load_more.loading
    }

    /// Current indicator state.
    pub fn load_more_status(&self) -> LoadMoreStatus {
        self.load_more.status
    }

    /// Whether load more is enabled.
    pub fn is_load_more_enabled(&self) -> bool {
        self.load_more.enabled
    }

    /// Enable or disable load more, refreshing if the slot appears or vanishes.
    pub fn set_enable_load_more(&mut self, enable: bool) {
        let old_count = self.load_more_view_count();
        self.load_more.enabled = enable;
        let new_count = self.load_more_view_count();

        match (old_count, new_count) {
            (1, 0) => self.refresh(),
            (0, 1) => {
                self.set_load_more_status(LoadMoreStatus::Default);
                self.refresh();
            }
            _ => {}
        }
    }

    /// The requested page arrived; more may follow.
    pub fn load_more_complete(&mut self) {
        if self.load_more_view_count() == 0 {
            return;
        }
        self.load_more.loading = false;
        self.load_more.next_load_enabled = true;
        self.set_load_more_status(LoadMoreStatus::Default);
        self.load_more_slot_changed();
    }

    /// The requested page failed.
    pub fn load_more_fail(&mut self) {
        if self.load_more_view_count() == 0 {
            return;
        }
        self.load_more.loading = false;
        self.set_load_more_status(LoadMoreStatus::Fail);
        self.load_more_slot_changed();
    }

    /// No further pages. With `gone` the indicator collapses entirely.
    pub fn load_more_end(&mut self, gone: bool) {
        let had_slot = self.load_more_view_count() != 0;
        if had_slot {
            self.load_more.loading = false;
            self.load_more.next_load_enabled = false;
        }
        self.set_loading_view_state(gone, had_slot);
    }

    fn set_loading_view_state(&mut self, gone: bool, had_slot: bool) {
        self.load_more.end_gone = gone;
        if gone {
            // Only a slot the host has seen can be removed.
            if had_slot && self.load_more_view_count() == 0 {
                self.emit_raw(ChangeEvent::RangeRemoved {
                    start: self.load_more_position(),
                    count: 1,
                });
            }
        } else {
            self.set_load_more_status(LoadMoreStatus::End);
            self.refresh();
        }
    }

    /// Put the indicator back into its idle state so the next bind requests a
    /// page.
    pub fn notify_load_more_to_loading(&mut self) {
        if self.load_more.status == LoadMoreStatus::Loading {
            return;
        }
        self.set_load_more_status(LoadMoreStatus::Default);
        self.load_more_slot_changed();
    }

    /// Allow clicks on the "end" indicator to request another page.
    pub fn enable_load_more_end_click(&mut self, enable: bool) {
        self.load_more.end_click = enable;
    }

    /// Handle a click on the load-more indicator.
    pub fn on_load_more_clicked(&mut self) {
        match self.load_more.status {
            LoadMoreStatus::Fail => self.notify_load_more_to_loading(),
            LoadMoreStatus::End if self.load_more.end_click => self.notify_load_more_to_loading(),
            _ => {}
        }
    }

    /// Set how close to the end binding triggers a request. Values of 1 or
    /// less are ignored.
    pub fn set_pre_load_number(&mut self, number: usize) {
        if number > 1 {
            self.load_more.pre_load_number = number;
        }
    }

    pub(super) fn auto_load_more(&mut self, host_position: usize) {
        if self.load_more_view_count() == 0 {
            return;
        }
        let reach = host_position.saturating_add(self.load_more.pre_load_number);
        if reach < self.mapper().item_count() {
            return;
        }
        if self.load_more.status != LoadMoreStatus::Default {
            return;
        }

        self.set_load_more_status(LoadMoreStatus::Loading);
        if self.load_more.loading {
            return;
        }
        self.load_more.loading = true;

        if self.surface.is_some() {
            tracing::debug!(target: targets::LOAD_MORE, host_position, "deferring load more request");
            self.deferred.post(DeferredAction::RequestLoadMore);
        } else {
            self.request_load_more();
        }
    }

    fn request_load_more(&self) {
        if let Some(handler) = self.load_more.handler.clone() {
            tracing::debug!(target: targets::LOAD_MORE, "requesting next page");
            handler();
        }
    }

    /// Disable load more, then re-enable it after a short delay if the data
    /// fills the visible region.
    pub fn disable_load_more_if_not_full_page(&mut self) -> Result<()> {
        let Some(surface) = self.surface.clone() else {
            return Err(AdapterError::NotAttached);
        };
        self.set_enable_load_more(false);

        tracing::debug!(target: targets::LOAD_MORE, layout = ?surface.layout_kind(), "scheduling full page check");
        let delay = self.config.full_page_check_delay;
        self.deferred.post_delayed(delay, DeferredAction::CheckFullPage);
        Ok(())
    }

    fn check_full_page(&mut self) {
        let Some(surface) = self.surface.clone() else {
            return;
        };
        let item_count = self.mapper().item_count();
        let last_plus_one = surface
            .last_completely_visible_positions()
            .into_iter()
            .max()
            .map_or(0, |last| last + 1);

        let full = match surface.layout_kind() {
            LayoutKind::Linear | LayoutKind::Grid { .. } => {
                last_plus_one != item_count || surface.first_completely_visible_position() != Some(0)
            }
            LayoutKind::StaggeredGrid { .. } => last_plus_one != item_count,
        };

        tracing::debug!(target: targets::LOAD_MORE, full, item_count, "full page check");
        if full {
            self.set_enable_load_more(true);
        }
    }

    /// Run every deferred task due at `now`. Returns how many ran.
    ///
    /// Each task re-reads live state, so tasks superseded by later changes
    /// are harmless.
    pub fn run_deferred(&mut self, now: Instant) -> usize {
        let due = self.deferred.take_due(now);
        let count = due.len();
        for action in due {
            match action {
                DeferredAction::RequestLoadMore => self.request_load_more(),
                DeferredAction::CheckFullPage => self.check_full_page(),
            }
        }
        count
    }

    /// Number of deferred tasks waiting to run.
    pub fn pending_deferred(&self) -> usize {
        self.deferred.len()
    }

    // =========================================================================
    // Up fetch
    // =========================================================================

    /// Enable or disable up fetch.
    pub fn set_up_fetch_enable(&mut self, enable: bool) {
        self.up_fetch.enabled = enable;
    }

    /// Whether up fetch is enabled.
    pub fn is_up_fetch_enable(&self) -> bool {
        self.up_fetch.enabled
    }

    /// Mark an up fetch as running or finished.
    pub fn set_up_fetching(&mut self, fetching: bool) {
        self.up_fetch.fetching = fetching;
    }

    /// Whether an up fetch is running.
    pub fn is_up_fetching(&self) -> bool {
        self.up_fetch.fetching
    }

    /// Set the up fetch callback.
    pub fn set_up_fetch_listener<F>(&mut self, listener: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.up_fetch.listener = Some(Arc::new(listener));
    }

    /// Binding at or before this host position triggers an up fetch.
    pub fn set_start_up_fetch_position(&mut self, position: usize) {
        self.up_fetch.start_position = position;
    }

    pub(super) fn auto_up_fetch(&self, host_position: usize) {
        if !self.up_fetch.enabled || self.up_fetch.fetching {
            return;
        }
        if host_position <= self.up_fetch.start_position {
            if let Some(listener) = self.up_fetch.listener.clone() {
                tracing::debug!(target: targets::LOAD_MORE, host_position, "up fetch");
                listener();
            }
        }
    }
}
