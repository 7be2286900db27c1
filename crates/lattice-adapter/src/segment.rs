//! Virtual segment bookkeeping.
//!
//! An adapter presents up to four virtual blocks around its data: a header,
//! a footer, a trailing load-more indicator and an empty-state block that
//! replaces the data when there is none. [`SegmentCounts::compute`] derives
//! how many host slots each block occupies from a snapshot of the flags.

use serde::{Deserialize, Serialize};

/// State of the trailing load-more indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LoadMoreStatus {
    /// Idle; binding near the end will request the next page.
    #[default]
    Default,
    /// A page request is in flight.
    Loading,
    /// The last request failed; clicking the indicator retries.
    Fail,
    /// No further pages.
    End,
}

/// Snapshot of every flag that influences segment sizes.
///
/// Built from live adapter state on each query, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SegmentFlags {
    /// The header block holds at least one view.
    pub has_header: bool,
    /// The footer block holds at least one view.
    pub has_footer: bool,
    /// An empty view has been registered.
    pub has_empty_view: bool,
    /// The empty policy is enabled.
    pub use_empty: bool,
    /// The header stays visible while the empty block is shown.
    pub header_with_empty: bool,
    /// The footer stays visible while the empty block is shown.
    pub footer_with_empty: bool,
    /// A paged source reported its first page, suppressing the empty block.
    pub paging_empty_override: bool,
    /// A load-more request handler is registered.
    pub has_load_more_handler: bool,
    /// Load more is enabled.
    pub load_more_enabled: bool,
    /// Further pages may be requested.
    pub next_load_enabled: bool,
    /// Current indicator state.
    pub load_more_status: LoadMoreStatus,
    /// The "end" indicator collapses to zero height.
    pub load_end_gone: bool,
}

/// Number of host slots (0 or 1) each virtual segment occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SegmentCounts {
    /// Header slot count.
    pub header: usize,
    /// Footer slot count.
    pub footer: usize,
    /// Empty-state slot count.
    pub empty: usize,
    /// Load-more slot count.
    pub load_more: usize,
}

impl SegmentCounts {
    /// Compute the counts for `flags` over a data list of `data_len` items.
    pub fn compute(flags: &SegmentFlags, data_len: usize) -> Self {
        let header = usize::from(flags.has_header);
        let footer = usize::from(flags.has_footer);

        // Data presence always wins over the empty block.
        let empty = usize::from(
            flags.has_empty_view
                && flags.use_empty
                && !flags.paging_empty_override
                && data_len == 0,
        );

        let load_more = if !flags.has_load_more_handler
            || !flags.load_more_enabled
            || (!flags.next_load_enabled && flags.load_end_gone)
            || data_len == 0
        {
            0
        } else {
            1
        };

        Self {
            header,
            footer,
            empty,
            load_more,
        }
    }

    /// Returns `true` if the empty block replaces the data segment.
    pub fn empty_active(&self) -> bool {
        self.empty == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_more_flags() -> SegmentFlags {
        SegmentFlags {
            has_load_more_handler: true,
            load_more_enabled: true,
            next_load_enabled: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_header_and_footer_follow_blocks() {
        let flags = SegmentFlags {
            has_header: true,
            ..Default::default()
        };
        let counts = SegmentCounts::compute(&flags, 3);
        assert_eq!(counts.header, 1);
        assert_eq!(counts.footer, 0);
    }

    #[test]
    fn test_empty_requires_every_condition() {
        let flags = SegmentFlags {
            has_empty_view: true,
            use_empty: true,
            ..Default::default()
        };
        assert!(SegmentCounts::compute(&flags, 0).empty_active());
        assert!(!SegmentCounts::compute(&flags, 1).empty_active());

        let disabled = SegmentFlags {
            use_empty: false,
            ..flags
        };
        assert!(!SegmentCounts::compute(&disabled, 0).empty_active());

        let paged = SegmentFlags {
            paging_empty_override: true,
            ..flags
        };
        assert!(!SegmentCounts::compute(&paged, 0).empty_active());
    }

    #[test]
    fn test_load_more_count() {
        let flags = load_more_flags();
        assert_eq!(SegmentCounts::compute(&flags, 4).load_more, 1);
        assert_eq!(SegmentCounts::compute(&flags, 0).load_more, 0);

        let no_handler = SegmentFlags {
            has_load_more_handler: false,
            ..flags
        };
        assert_eq!(SegmentCounts::compute(&no_handler, 4).load_more, 0);

        let disabled = SegmentFlags {
            load_more_enabled: false,
            ..flags
        };
        assert_eq!(SegmentCounts::compute(&disabled, 4).load_more, 0);
    }

    #[test]
    fn test_load_end_visibility() {
        let ended = SegmentFlags {
            next_load_enabled: false,
            load_more_status: LoadMoreStatus::End,
            ..load_more_flags()
        };
        assert_eq!(SegmentCounts::compute(&ended, 4).load_more, 1);

        let gone = SegmentFlags {
            load_end_gone: true,
            ..ended
        };
        assert_eq!(SegmentCounts::compute(&gone, 4).load_more, 0);
    }
}
