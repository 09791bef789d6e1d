//! Lane partitions of the global slot domain
//!
//! Each lane owns an ordered list of slot ids. The first `used` ids are
//! occupied, the remainder are free for reuse. The list length is the lane's
//! capacity and never changes; rebalancing only swaps which ids sit in which
//! lane.

use std::ops::Range;

use crate::domain::particle::SlotId;

/// Split `0..total` into `lanes` contiguous ranges whose lengths differ by at
/// most one. Earlier lanes take the remainder.
pub fn split_slot_domain(total: usize, lanes: usize) -> Vec<Range<usize>> {
    let lanes = lanes.max(1);
    let base = total / lanes;
    let remainder = total % lanes;

    let mut start = 0;
    (0..lanes)
        .map(|lane| {
            let len = base + usize::from(lane < remainder);
            let range = start..start + len;
            start += len;
            range
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanePartition {
    ids: Vec<SlotId>,
    used: usize,
}

impl LanePartition {
    pub fn new(range: Range<usize>) -> Self {
        LanePartition {
            ids: range.map(|id| id as SlotId).collect(),
            used: 0,
        }
    }

    #[inline]
    pub fn used(&self) -> usize {
        self.used
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.used == self.ids.len()
    }

    /// Occupied slot ids, in processing order
    #[inline]
    pub fn occupied(&self) -> &[SlotId] {
        &self.ids[..self.used]
    }

    #[inline]
    pub fn free(&self) -> &[SlotId] {
        &self.ids[self.used..]
    }

    /// Every id this lane owns, occupied first
    #[inline]
    pub fn ids(&self) -> &[SlotId] {
        &self.ids
    }

    /// Start a new generation from `src`'s id layout with nothing occupied.
    /// Both lists have the same length because capacities never change.
    pub fn reset_from(&mut self, src: &LanePartition) {
        self.ids.copy_from_slice(&src.ids);
        self.used = 0;
    }

    /// Take the next free id, or `None` when the lane is at capacity
    #[inline]
    pub fn claim(&mut self) -> Option<SlotId> {
        if self.is_full() {
            return None;
        }
        let id = *fast!(self.ids, [self.used]);
        self.used += 1;
        Some(id)
    }

    /// The id the next `claim` would return, without claiming it
    #[inline]
    pub fn peek_free(&self) -> Option<SlotId> {
        self.ids.get(self.used).copied()
    }

    /// Move the last occupied id of `self` into the first free position of
    /// `other`, taking `other`'s free id in exchange.
    ///
    /// Returns false (and changes nothing) when `self` is empty or `other` is full.
    pub fn hand_over_to(&mut self, other: &mut LanePartition) -> bool {
        if self.used == 0 || other.is_full() {
            return false;
        }
        let from = self.used - 1;
        let to = other.used;
        std::mem::swap(&mut self.ids[from], &mut other.ids[to]);
        self.used -= 1;
        other.used += 1;
        true
    }

    #[cfg(test)]
    pub(crate) fn set_used(&mut self, used: usize) {
        assert!(used <= self.ids.len());
        self.used = used;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::particle::{MAX_EFFECTS, MAX_LANES};
    use proptest::prelude::*;

    #[test]
    fn split_gives_remainder_to_earlier_lanes() {
        let ranges = split_slot_domain(10, 3);
        assert_eq!(ranges, vec![0..4, 4..7, 7..10]);
    }

    #[test]
    fn claim_until_full_then_drop() {
        let mut lane = LanePartition::new(5..8);
        assert_eq!(lane.claim(), Some(5));
        assert_eq!(lane.claim(), Some(6));
        assert_eq!(lane.claim(), Some(7));
        assert!(lane.is_full());
        assert_eq!(lane.claim(), None);
        assert_eq!(lane.used(), 3);
    }

    #[test]
    fn peek_matches_next_claim() {
        let mut lane = LanePartition::new(0..2);
        assert_eq!(lane.peek_free(), Some(0));
        assert_eq!(lane.used(), 0);
        assert_eq!(lane.claim(), Some(0));
        assert_eq!(lane.peek_free(), Some(1));
        lane.claim();
        assert_eq!(lane.peek_free(), None);
    }

    #[test]
    fn hand_over_swaps_used_for_free() {
        let mut busy = LanePartition::new(0..3);
        let mut idle = LanePartition::new(3..6);
        busy.set_used(3);

        assert!(busy.hand_over_to(&mut idle));

        assert_eq!(busy.used(), 2);
        assert_eq!(idle.used(), 1);
        assert_eq!(idle.occupied(), &[2]);
        assert_eq!(busy.free(), &[3]);
    }

    #[test]
    fn hand_over_refuses_when_target_full() {
        let mut busy = LanePartition::new(0..2);
        let mut full = LanePartition::new(2..3);
        busy.set_used(2);
        full.set_used(1);

        assert!(!busy.hand_over_to(&mut full));
        assert_eq!(busy.used(), 2);
        assert_eq!(full.used(), 1);
    }

    proptest! {
        #[test]
        fn split_partitions_the_domain(lanes in 1usize..=MAX_LANES) {
            let ranges = split_slot_domain(MAX_EFFECTS, lanes);
            prop_assert_eq!(ranges.len(), lanes);

            let total: usize = ranges.iter().map(|r| r.len()).sum();
            prop_assert_eq!(total, MAX_EFFECTS);

            let mut expected_start = 0;
            for r in &ranges {
                prop_assert_eq!(r.start, expected_start);
                expected_start = r.end;
            }

            let min = ranges.iter().map(|r| r.len()).min().unwrap();
            let max = ranges.iter().map(|r| r.len()).max().unwrap();
            prop_assert!(max - min <= 1);
            for pair in ranges.windows(2) {
                prop_assert!(pair[0].len() >= pair[1].len());
            }
        }
    }
}
