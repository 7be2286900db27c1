//! Translation between data indices and host positions.

use crate::segment::{SegmentCounts, SegmentFlags};

/// The kind of host slot at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    /// The header block.
    Header,
    /// A data item, carrying its data index.
    Data(usize),
    /// The footer block.
    Footer,
    /// The load-more indicator.
    LoadMore,
    /// The empty-state block.
    Empty,
}

impl Segment {
    /// Returns the data index for data slots.
    pub fn data_index(self) -> Option<usize> {
        match self {
            Segment::Data(index) => Some(index),
            _ => None,
        }
    }
}

/// Position arithmetic over one snapshot of segment state.
///
/// A mapper is cheap to build and must not outlive the state it was built
/// from; adapters construct a fresh one for every query.
///
/// With the empty block active the surface is at most three slots:
/// `[header?] empty [footer?]`, where header and footer only appear when
/// configured to coexist with the empty block. Otherwise the layout is
/// `[header?] data... [footer?] [load more?]`.
#[derive(Debug, Clone, Copy)]
pub struct PositionMapper {
    counts: SegmentCounts,
    header_with_empty: bool,
    footer_with_empty: bool,
    data_len: usize,
}

impl PositionMapper {
    /// Build a mapper for the given flags and data length.
    pub fn new(flags: &SegmentFlags, data_len: usize) -> Self {
        Self {
            counts: SegmentCounts::compute(flags, data_len),
            header_with_empty: flags.header_with_empty,
            footer_with_empty: flags.footer_with_empty,
            data_len,
        }
    }

    /// Segment counts this mapper was built from.
    pub fn counts(&self) -> SegmentCounts {
        self.counts
    }

    /// Returns `true` if the empty block replaces the data segment.
    pub fn empty_active(&self) -> bool {
        self.counts.empty_active()
    }

    fn header_visible_with_empty(&self) -> bool {
        self.header_with_empty && self.counts.header == 1
    }

    fn footer_visible_with_empty(&self) -> bool {
        self.footer_with_empty && self.counts.footer == 1
    }

    /// Total number of host slots.
    pub fn item_count(&self) -> usize {
        if self.empty_active() {
            1 + usize::from(self.header_visible_with_empty())
                + usize::from(self.footer_visible_with_empty())
        } else {
            self.counts.header + self.data_len + self.counts.footer + self.counts.load_more
        }
    }

    /// Host slots in front of the data segment.
    ///
    /// A header hidden by the empty block takes no slot and is excluded.
    pub fn data_offset(&self) -> usize {
        if self.empty_active() {
            usize::from(self.header_visible_with_empty()) + 1
        } else {
            self.counts.header
        }
    }

    /// Host position of a data index.
    pub fn to_host_position(&self, data_index: usize) -> Option<usize> {
        (!self.empty_active() && data_index < self.data_len)
            .then(|| data_index + self.counts.header)
    }

    /// Data index at a host position, if the slot belongs to the data segment.
    pub fn to_data_index(&self, host_position: usize) -> Option<usize> {
        self.classify(host_position).and_then(Segment::data_index)
    }

    /// Classify a host position. Out-of-range positions yield `None`.
    pub fn classify(&self, host_position: usize) -> Option<Segment> {
        if host_position >= self.item_count() {
            return None;
        }

        if self.empty_active() {
            let header = self.header_visible_with_empty();
            return Some(match (host_position, header) {
                (0, true) => Segment::Header,
                (0, false) | (1, true) => Segment::Empty,
                _ => Segment::Footer,
            });
        }

        let header = self.counts.header;
        let data_end = header + self.data_len;
        let footer_end = data_end + self.counts.footer;

        Some(if host_position < header {
            Segment::Header
        } else if host_position < data_end {
            Segment::Data(host_position - header)
        } else if host_position < footer_end {
            Segment::Footer
        } else {
            Segment::LoadMore
        })
    }

    /// Host position at which header notifications are emitted.
    ///
    /// `None` while the empty block hides the header.
    pub fn header_position(&self) -> Option<usize> {
        if self.empty_active() && !self.header_with_empty {
            return None;
        }
        Some(0)
    }

    /// Host position at which footer notifications are emitted.
    pub fn footer_position(&self) -> Option<usize> {
        if self.empty_active() {
            if !self.footer_with_empty {
                return None;
            }
            return Some(1 + usize::from(self.header_visible_with_empty()));
        }
        Some(self.counts.header + self.data_len)
    }

    /// Host position of the load-more slot.
    pub fn load_more_position(&self) -> usize {
        self.counts.header + self.data_len + self.counts.footer
    }

    /// Host position of the empty slot.
    pub fn empty_position(&self) -> usize {
        usize::from(self.header_visible_with_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::LoadMoreStatus;

    fn full_flags() -> SegmentFlags {
        SegmentFlags {
            has_header: true,
            has_footer: true,
            has_load_more_handler: true,
            load_more_enabled: true,
            next_load_enabled: true,
            load_more_status: LoadMoreStatus::Default,
            ..Default::default()
        }
    }

    #[test]
    fn test_classify_normal_layout() {
        let mapper = PositionMapper::new(&full_flags(), 5);
        assert_eq!(mapper.item_count(), 8);
        assert_eq!(mapper.classify(0), Some(Segment::Header));
        for i in 0..5 {
            assert_eq!(mapper.classify(i + 1), Some(Segment::Data(i)));
        }
        assert_eq!(mapper.classify(6), Some(Segment::Footer));
        assert_eq!(mapper.classify(7), Some(Segment::LoadMore));
        assert_eq!(mapper.classify(8), None);
    }

    #[test]
    fn test_round_trip_positions() {
        let mapper = PositionMapper::new(&full_flags(), 5);
        assert_eq!(mapper.to_host_position(3), Some(4));
        assert_eq!(mapper.to_data_index(4), Some(3));
        assert_eq!(mapper.to_host_position(5), None);
        assert_eq!(mapper.to_data_index(0), None);
        assert_eq!(mapper.data_offset(), 1);
        assert_eq!(mapper.footer_position(), Some(6));
        assert_eq!(mapper.load_more_position(), 7);
    }

    #[test]
    fn test_empty_layout_hides_header() {
        let flags = SegmentFlags {
            has_header: true,
            has_footer: true,
            has_empty_view: true,
            use_empty: true,
            ..Default::default()
        };
        let mapper = PositionMapper::new(&flags, 0);
        assert!(mapper.empty_active());
        assert_eq!(mapper.item_count(), 1);
        assert_eq!(mapper.classify(0), Some(Segment::Empty));
        assert_eq!(mapper.classify(1), None);
        assert_eq!(mapper.data_offset(), 1);
        assert_eq!(mapper.header_position(), None);
        assert_eq!(mapper.footer_position(), None);
        assert_eq!(mapper.to_host_position(0), None);
    }

    #[test]
    fn test_empty_layout_with_header_and_footer() {
        let flags = SegmentFlags {
            has_header: true,
            has_footer: true,
            has_empty_view: true,
            use_empty: true,
            header_with_empty: true,
            footer_with_empty: true,
            ..Default::default()
        };
        let mapper = PositionMapper::new(&flags, 0);
        assert_eq!(mapper.item_count(), 3);
        assert_eq!(mapper.classify(0), Some(Segment::Header));
        assert_eq!(mapper.classify(1), Some(Segment::Empty));
        assert_eq!(mapper.classify(2), Some(Segment::Footer));
        assert_eq!(mapper.empty_position(), 1);
        assert_eq!(mapper.footer_position(), Some(2));
        assert_eq!(mapper.data_offset(), 2);
    }

    #[test]
    fn test_empty_layout_footer_only() {
        let flags = SegmentFlags {
            has_footer: true,
            has_empty_view: true,
            use_empty: true,
            footer_with_empty: true,
            ..Default::default()
        };
        let mapper = PositionMapper::new(&flags, 0);
        assert_eq!(mapper.item_count(), 2);
        assert_eq!(mapper.classify(0), Some(Segment::Empty));
        assert_eq!(mapper.classify(1), Some(Segment::Footer));
        assert_eq!(mapper.footer_position(), Some(1));
    }
}
