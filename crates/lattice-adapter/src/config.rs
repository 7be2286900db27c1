//! Adapter configuration.
//!
//! Configuration is a plain value passed to the builder, so different
//! adapters in one application can use different empty layouts. Leaving
//! [`AdapterConfig::empty_layout`] unset disables the built-in empty states.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::host::ViewId;

/// Views making up a stateful empty layout.
///
/// The empty layout contains three groups of which exactly one is visible,
/// plus a retry control inside the error group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyLayoutConfig {
    /// The layout registered as the empty view on attach.
    pub layout_id: ViewId,
    /// Group shown while loading.
    pub loading_group_id: ViewId,
    /// Group shown when there is no data.
    pub empty_group_id: ViewId,
    /// Group shown when loading failed.
    pub error_group_id: ViewId,
    /// Control that triggers a retry.
    pub retry_id: ViewId,
}

impl EmptyLayoutConfig {
    /// Group to show for `state`.
    pub fn group_for(&self, state: EmptyViewState) -> ViewId {
        match state {
            EmptyViewState::Loading => self.loading_group_id,
            EmptyViewState::Empty => self.empty_group_id,
            EmptyViewState::Error => self.error_group_id,
        }
    }
}

/// Which group of the empty layout is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmptyViewState {
    /// Data is being fetched.
    Loading,
    /// The source has no data.
    Empty,
    /// Fetching failed.
    Error,
}

/// Adapter configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Stateful empty layout, applied when the adapter is attached.
    pub empty_layout: Option<EmptyLayoutConfig>,
    /// Distance from the end at which binding triggers a page request.
    pub pre_load_number: usize,
    /// Binding at or before this host position triggers an up fetch.
    pub start_up_fetch_position: usize,
    /// Delay before re-checking whether the visible region is full.
    pub full_page_check_delay: Duration,
    /// Show the empty block when there is no data.
    pub use_empty: bool,
    /// Keep the header visible next to the empty block.
    pub header_with_empty: bool,
    /// Keep the footer visible next to the empty block.
    pub footer_with_empty: bool,
    /// Clicking the "end" indicator requests another page.
    pub load_more_end_click: bool,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            empty_layout: None,
            pre_load_number: 10,
            start_up_fetch_position: 1,
            full_page_check_delay: Duration::from_millis(50),
            use_empty: true,
            header_with_empty: false,
            footer_with_empty: false,
            load_more_end_click: false,
        }
    }
}

impl AdapterConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the empty layout.
    pub fn with_empty_layout(mut self, layout: EmptyLayoutConfig) -> Self {
        self.empty_layout = Some(layout);
        self
    }

    /// Set the pre-load distance. Values of 1 or less are ignored.
    pub fn with_pre_load_number(mut self, number: usize) -> Self {
        if number > 1 {
            self.pre_load_number = number;
        }
        self
    }

    /// Set the up fetch start position.
    pub fn with_start_up_fetch_position(mut self, position: usize) -> Self {
        self.start_up_fetch_position = position;
        self
    }

    /// Set the full-page check delay.
    pub fn with_full_page_check_delay(mut self, delay: Duration) -> Self {
        self.full_page_check_delay = delay;
        self
    }

    /// Enable or disable the empty block.
    pub fn with_use_empty(mut self, use_empty: bool) -> Self {
        self.use_empty = use_empty;
        self
    }

    /// Keep header and footer visible next to the empty block.
    pub fn with_header_footer_empty(mut self, header: bool, footer: bool) -> Self {
        self.header_with_empty = header;
        self.footer_with_empty = footer;
        self
    }

    /// Let clicks on the "end" indicator request another page.
    pub fn with_load_more_end_click(mut self, enabled: bool) -> Self {
        self.load_more_end_click = enabled;
        self
    }
}
