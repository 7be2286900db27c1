//! Header, footer and empty blocks.

use lattice_adapter_core::logging::targets;
use lattice_adapter_core::{AdapterError, Result};

use super::QuickAdapter;
use crate::config::EmptyViewState;
use crate::host::ViewId;
use crate::item::ListItem;
use crate::notify::ChangeEvent;
use crate::position::PositionMapper;

/// Which of the two view blocks an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Header,
    Footer,
}

impl<T: ListItem> QuickAdapter<T> {
    fn block_views(&mut self, block: Block) -> &mut Vec<ViewId> {
        match block {
            Block::Header => &mut self.header_views,
            Block::Footer => &mut self.footer_views,
        }
    }

    fn block_position(&self, block: Block) -> Option<usize> {
        let mapper = self.mapper();
        match block {
            Block::Header => mapper.header_position(),
            Block::Footer => mapper.footer_position(),
        }
    }

    fn add_block_view(&mut self, block: Block, view: ViewId, index: Option<usize>) -> usize {
        let views = self.block_views(block);
        let index = index.filter(|&i| i <= views.len()).unwrap_or(views.len());
        views.insert(index, view);

        if views.len() == 1 {
            if let Some(start) = self.block_position(block) {
                self.emit_raw(ChangeEvent::RangeInserted { start, count: 1 });
            }
        }
        index
    }

    fn set_block_view(&mut self, block: Block, view: ViewId, index: usize) -> usize {
        let views = self.block_views(block);
        if index >= views.len() {
            return self.add_block_view(block, view, Some(index));
        }
        views[index] = view;
        if let Some(start) = self.block_position(block) {
            self.emit_raw(ChangeEvent::RangeChanged { start, count: 1 });
        }
        index
    }

    fn remove_block_view(&mut self, block: Block, view: ViewId) -> bool {
        let views = self.block_views(block);
        let Some(index) = views.iter().position(|&v| v == view) else {
            return false;
        };
        views.remove(index);

        if views.is_empty() {
            if let Some(start) = self.block_position(block) {
                self.emit_raw(ChangeEvent::RangeRemoved { start, count: 1 });
            }
        }
        true
    }

    fn remove_all_block_views(&mut self, block: Block) {
        let views = self.block_views(block);
        if views.is_empty() {
            return;
        }
        views.clear();
        if let Some(start) = self.block_position(block) {
            self.emit_raw(ChangeEvent::RangeRemoved { start, count: 1 });
        }
    }

    // =========================================================================
    // Header
    // =========================================================================

    /// Add a view to the header block at `index`, or at the end when `index`
    /// is `None` or past the end. Returns the index used.
    pub fn add_header_view(&mut self, view: ViewId, index: Option<usize>) -> usize {
        self.add_block_view(Block::Header, view, index)
    }

    /// Replace the header view at `index`, or add it when the block is shorter.
    pub fn set_header_view(&mut self, view: ViewId, index: usize) -> usize {
        self.set_block_view(Block::Header, view, index)
    }

    /// Remove a view from the header block.
    pub fn remove_header_view(&mut self, view: ViewId) -> bool {
        self.remove_block_view(Block::Header, view)
    }

    /// Remove every header view.
    pub fn remove_all_header_views(&mut self) {
        self.remove_all_block_views(Block::Header);
    }

    /// Views in the header block.
    pub fn header_views(&self) -> &[ViewId] {
        &self.header_views
    }

    /// Header slot count, 0 or 1.
    pub fn header_layout_count(&self) -> usize {
        self.mapper().counts().header
    }

    // =========================================================================
    // Footer
    // =========================================================================

    /// Add a view to the footer block. Returns the index used.
    pub fn add_footer_view(&mut self, view: ViewId, index: Option<usize>) -> usize {
        self.add_block_view(Block::Footer, view, index)
    }

    /// Replace the footer view at `index`, or add it when the block is shorter.
    pub fn set_footer_view(&mut self, view: ViewId, index: usize) -> usize {
        self.set_block_view(Block::Footer, view, index)
    }

    /// Remove a view from the footer block.
    pub fn remove_footer_view(&mut self, view: ViewId) -> bool {
        self.remove_block_view(Block::Footer, view)
    }

    /// Remove every footer view.
    pub fn remove_all_footer_views(&mut self) {
        self.remove_all_block_views(Block::Footer);
    }

    /// Views in the footer block.
    pub fn footer_views(&self) -> &[ViewId] {
        &self.footer_views
    }

    /// Footer slot count, 0 or 1.
    pub fn footer_layout_count(&self) -> usize {
        self.mapper().counts().footer
    }

    // =========================================================================
    // Empty block
    // =========================================================================

    /// Register the empty view and enable the empty policy.
    pub fn set_empty_view(&mut self, view: ViewId) {
        let old_count = self.mapper().item_count();
        let insert = self.empty_view.is_none();
        self.empty_view = Some(view);
        self.use_empty = true;

        let mapper = self.mapper();
        if insert && mapper.empty_active() {
            if mapper.item_count() > old_count {
                self.emit_raw(ChangeEvent::RangeInserted {
                    start: mapper.empty_position(),
                    count: 1,
                });
            } else {
                self.refresh();
            }
        }
    }

    /// The registered empty view.
    pub fn empty_view(&self) -> Option<ViewId> {
        self.empty_view
    }

    /// Empty slot count, 0 or 1.
    pub fn empty_view_count(&self) -> usize {
        self.mapper().counts().empty
    }

    /// Refresh when an empty-block setting changed the host layout.
    fn refresh_if_layout_changed(&self, before: PositionMapper) {
        let after = self.mapper();
        if before.item_count() != after.item_count()
            || before.empty_active() != after.empty_active()
        {
            tracing::debug!(
                target: targets::ADAPTER,
                before = before.item_count(),
                after = after.item_count(),
                "empty block layout changed"
            );
            self.refresh();
        }
    }

    /// Enable or disable the empty block.
    pub fn set_use_empty(&mut self, use_empty: bool) {
        let before = self.mapper();
        self.use_empty = use_empty;
        self.refresh_if_layout_changed(before);
    }

    /// Whether the empty policy is enabled.
    pub fn is_use_empty(&self) -> bool {
        self.use_empty
    }

    /// Keep the header visible next to the empty block.
    pub fn set_header_and_empty(&mut self, header_with_empty: bool) {
        self.set_header_footer_empty(header_with_empty, false);
    }

    /// Keep header and footer visible next to the empty block.
    pub fn set_header_footer_empty(&mut self, header_with_empty: bool, footer_with_empty: bool) {
        let before = self.mapper();
        self.header_with_empty = header_with_empty;
        self.footer_with_empty = footer_with_empty;
        self.refresh_if_layout_changed(before);
    }

    /// Switch the visible group of the empty layout.
    ///
    /// Requires an [`EmptyLayoutConfig`](crate::EmptyLayoutConfig). Without a
    /// registered empty view this does nothing.
    pub fn set_empty_view_state(&mut self, state: EmptyViewState) -> Result<()> {
        if self.config.empty_layout.is_none() {
            return Err(AdapterError::MissingEmptyConfig);
        }
        if self.empty_view.is_none() {
            tracing::debug!(target: targets::ADAPTER, ?state, "no empty view to switch");
            return Ok(());
        }

        self.empty_state = Some(state);
        self.use_empty = true;
        self.paging_empty_override = false;
        self.notifier.signals().empty_state_changed.emit(state);

        let mapper = self.mapper();
        if mapper.empty_active() {
            self.emit_raw(ChangeEvent::RangeChanged {
                start: mapper.empty_position(),
                count: 1,
            });
        }
        Ok(())
    }

    /// The current empty layout state.
    pub fn empty_view_state(&self) -> Option<EmptyViewState> {
        self.empty_state
    }

    /// The group of the empty layout that should be visible.
    pub fn visible_empty_group(&self) -> Option<ViewId> {
        let layout = self.config.empty_layout.as_ref()?;
        Some(layout.group_for(self.empty_state?))
    }

    /// Set the callback run by [`on_retry_load`](Self::on_retry_load).
    pub fn set_on_retry<F>(&mut self, f: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_retry = Some(std::sync::Arc::new(f));
    }

    /// Show the loading group and run the retry callback.
    pub fn on_retry_load(&mut self) -> Result<()> {
        self.set_empty_view_state(EmptyViewState::Loading)?;
        if let Some(retry) = self.on_retry.clone() {
            retry();
        }
        Ok(())
    }

    /// A paged source inserted `count` items at `position`.
    ///
    /// The first page suppresses the empty block until the empty state is set
    /// again.
    pub fn on_paged_list_inserted(&mut self, position: usize, count: usize) {
        if position == 0 && count != 0 && self.use_empty && !self.paging_empty_override {
            self.paging_empty_override = true;
            self.refresh();
        }
    }
}
