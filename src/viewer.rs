//! Popup navigation state machine.
//!
//! `Closed`, `Open` and `Enlarged` are an explicit tagged variant so that
//! illegal combinations (an enlarged index while nothing is open) cannot be
//! represented. All transitions are pure index arithmetic over the media
//! length passed in by the caller, which re-reads it at transition time so
//! slides added concurrently by the admin surface are accounted for.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ViewerState {
    #[default]
    Closed,
    Open {
        block: usize,
        media: usize,
    },
    Enlarged {
        block: usize,
        media: usize,
        enlarged: usize,
    },
}

impl ViewerState {
    pub fn open_block(&mut self, block: usize) {
        *self = ViewerState::Open { block, media: 0 };
    }

    /// Close peels one layer: the enlarged view first, then the popup.
    pub fn close(&mut self) {
        *self = match *self {
            ViewerState::Enlarged { block, media, .. } => ViewerState::Open { block, media },
            _ => ViewerState::Closed,
        };
    }

    /// Enlarges the media at `index` in the open block. No-op while closed.
    pub fn enlarge(&mut self, index: usize) {
        if let ViewerState::Open { block, media } | ViewerState::Enlarged { block, media, .. } =
            *self
        {
            *self = ViewerState::Enlarged {
                block,
                media,
                enlarged: index,
            };
        }
    }

    /// Advances whichever layer is on top, wrapping circularly.
    pub fn next(&mut self, len: usize) {
        self.step(len, 1);
    }

    pub fn prev(&mut self, len: usize) {
        self.step(len, -1);
    }

    fn step(&mut self, len: usize, dir: isize) {
        if len == 0 {
            return;
        }
        let wrap = |index: usize| (index as isize + dir).rem_euclid(len as isize) as usize;
        *self = match *self {
            ViewerState::Closed => ViewerState::Closed,
            ViewerState::Open { block, media } => ViewerState::Open {
                block,
                media: wrap(media),
            },
            ViewerState::Enlarged {
                block,
                media,
                enlarged,
            } => ViewerState::Enlarged {
                block,
                media,
                enlarged: wrap(enlarged),
            },
        };
    }

    pub fn open_block_index(&self) -> Option<usize> {
        match *self {
            ViewerState::Closed => None,
            ViewerState::Open { block, .. } | ViewerState::Enlarged { block, .. } => Some(block),
        }
    }

    /// The paged index, independent of any enlargement.
    pub fn media_index(&self) -> Option<usize> {
        match *self {
            ViewerState::Closed => None,
            ViewerState::Open { media, .. } | ViewerState::Enlarged { media, .. } => Some(media),
        }
    }

    pub fn enlarged_index(&self) -> Option<usize> {
        match *self {
            ViewerState::Enlarged { enlarged, .. } => Some(enlarged),
            _ => None,
        }
    }

    /// Indices for the fixed 3-thumbnail preview strip: previous, next and
    /// next-but-one neighbors of the paged index. With `len <= 2` the same
    /// index may legitimately fill more than one slot.
    pub fn strip_indices(&self, len: usize) -> Option<[usize; 3]> {
        let media = self.media_index()?;
        if len == 0 {
            return None;
        }
        Some([
            (media + len - 1) % len,
            (media + 1) % len,
            (media + 2) % len,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_starts_at_first_slide() {
        let mut viewer = ViewerState::Closed;
        viewer.open_block(3);
        assert_eq!(viewer, ViewerState::Open { block: 3, media: 0 });
    }

    #[test]
    fn next_then_prev_returns_to_start() {
        for len in 1..=5 {
            for start in 0..len {
                let mut viewer = ViewerState::Open { block: 0, media: start };
                viewer.next(len);
                viewer.prev(len);
                assert_eq!(viewer.media_index(), Some(start), "len {len} start {start}");
            }
        }
    }

    #[test]
    fn paging_wraps_in_both_directions() {
        let mut viewer = ViewerState::Open { block: 0, media: 0 };
        viewer.prev(4);
        assert_eq!(viewer.media_index(), Some(3));
        viewer.next(4);
        assert_eq!(viewer.media_index(), Some(0));
    }

    #[test]
    fn full_cycle_of_a_ten_item_list_returns_to_zero() {
        // 6 seeded blocks of 10 media each, open block 2, page forward 10x.
        let mut viewer = ViewerState::Closed;
        viewer.open_block(2);
        for _ in 0..10 {
            viewer.next(10);
        }
        assert_eq!(viewer, ViewerState::Open { block: 2, media: 0 });
    }

    #[test]
    fn enlarged_layer_pages_independently_of_paged_index() {
        let mut viewer = ViewerState::Open { block: 1, media: 4 };
        viewer.enlarge(7);
        viewer.next(10);
        assert_eq!(viewer.enlarged_index(), Some(8));
        assert_eq!(viewer.media_index(), Some(4));
    }

    #[test]
    fn close_peels_enlarged_layer_first() {
        let mut viewer = ViewerState::Enlarged {
            block: 1,
            media: 4,
            enlarged: 7,
        };
        viewer.close();
        assert_eq!(viewer, ViewerState::Open { block: 1, media: 4 });
        viewer.close();
        assert_eq!(viewer, ViewerState::Closed);
    }

    #[test]
    fn enlarge_while_closed_is_a_no_op() {
        let mut viewer = ViewerState::Closed;
        viewer.enlarge(3);
        assert_eq!(viewer, ViewerState::Closed);
        viewer.next(10);
        assert_eq!(viewer, ViewerState::Closed);
    }

    #[test]
    fn strip_indices_surround_the_paged_index() {
        let viewer = ViewerState::Open { block: 0, media: 5 };
        assert_eq!(viewer.strip_indices(10), Some([4, 6, 7]));

        let viewer = ViewerState::Open { block: 0, media: 0 };
        assert_eq!(viewer.strip_indices(10), Some([9, 1, 2]));
    }

    #[test]
    fn strip_indices_collide_for_tiny_lists() {
        let viewer = ViewerState::Open { block: 0, media: 0 };
        assert_eq!(viewer.strip_indices(1), Some([0, 0, 0]));
        assert_eq!(viewer.strip_indices(2), Some([1, 1, 0]));
        assert_eq!(ViewerState::Closed.strip_indices(10), None);
    }
}
