//! Fixed-width carousel over a sentinel-padded member sequence.
//!
//! The window slides over `[sentinel, members..., sentinel]` instead of the
//! raw roster, so navigation never branches at the ends and the middle slot
//! holds a real, centered member whenever one exists near either edge. The
//! cost is one empty card rendered at each extreme of the traversal.

use crate::types::BoardMember;

/// Number of visible card slots.
pub const CARDS_VISIBLE: usize = 3;

/// Cursor over the padded sequence. Cheap to copy; filter changes build a
/// fresh carousel (cursor 0) rather than mutating this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    start_index: usize,
    padded_len: usize,
}

impl Carousel {
    /// Carousel at the start of a roster of `member_count` entries.
    pub fn new(member_count: usize) -> Self {
        Self {
            start_index: 0,
            padded_len: member_count + 2,
        }
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    fn max_start(&self) -> usize {
        self.padded_len.saturating_sub(CARDS_VISIBLE)
    }

    pub fn can_go_left(&self) -> bool {
        self.start_index > 0
    }

    pub fn can_go_right(&self) -> bool {
        self.start_index + CARDS_VISIBLE < self.padded_len
    }

    /// Single-step advance, clamped at the right boundary.
    pub fn advance(&mut self) {
        self.start_index = (self.start_index + 1).min(self.max_start());
    }

    /// Single-step retreat, clamped at the left boundary.
    pub fn retreat(&mut self) {
        self.start_index = self.start_index.saturating_sub(1);
    }

    /// Re-clamp after the roster changed size without a filter change
    /// (e.g. a refresh shrank the member list under the cursor).
    pub fn clamp(&mut self, member_count: usize) {
        self.padded_len = member_count + 2;
        self.start_index = self.start_index.min(self.max_start());
    }

    /// The three visible slots. Sentinel positions and any slots past the
    /// end of the padded sequence are `None`; the caller always receives
    /// exactly `CARDS_VISIBLE` entries.
    pub fn visible<'a>(&self, members: &'a [BoardMember]) -> [Option<&'a BoardMember>; CARDS_VISIBLE] {
        let mut slots = [None; CARDS_VISIBLE];
        for (slot, padded_index) in (self.start_index..self.start_index + CARDS_VISIBLE).enumerate()
        {
            // padded_index 0 and padded_len - 1 are the sentinels.
            if padded_index >= 1 && padded_index + 1 < self.padded_len {
                slots[slot] = members.get(padded_index - 1);
            }
        }
        slots
    }
}
