#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Per-cell candidate bitmasks and the MRV selection over them.
//!
//! Each empty cell carries a [`DigitSet`]: a `u16` where bit `v` set means
//! digit `v` is still legally placeable there. The table is derived from
//! scratch exactly once per solve, by [`CandidateTable::scan`]; afterwards
//! the propagation engine maintains it incrementally. Invariant: for every
//! empty cell, the set equals the digits [`placement_allowed`] would accept
//! against the current grid. Filled cells carry the empty set.

use crate::engine::grid::{Grid, CELLS, EMPTY};
use crate::engine::validator::placement_allowed;
use core::ops::Index;

/// A set of candidate digits, stored as a bitmask.
///
/// Bit index equals digit value (`1 << digit`); bit 0 is never set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct DigitSet(u16);

impl DigitSet {
    /// The set with no candidates.
    pub const NONE: Self = Self(0);
    /// The set with all nine digits.
    pub const ALL: Self = Self(0b11_1111_1110);

    /// Whether `digit` is in the set.
    #[must_use]
    pub const fn contains(self, digit: u8) -> bool {
        self.0 & (1 << digit) != 0
    }

    /// Adds `digit` to the set.
    pub const fn insert(&mut self, digit: u8) {
        self.0 |= 1 << digit;
    }

    /// Removes `digit` from the set.
    pub const fn remove(&mut self, digit: u8) {
        self.0 &= !(1 << digit);
    }

    /// Whether the set holds no digits. For an empty cell this is the
    /// forward-checking contradiction signal.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of candidates, via a population count.
    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Iterator over the digits in the set, in ascending order. The search
    /// controller relies on this ordering for deterministic traces.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (1..=9).filter(move |&digit| self.contains(digit))
    }
}

/// One [`DigitSet`] per cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateTable([DigitSet; CELLS]);

impl Index<usize> for CandidateTable {
    type Output = DigitSet;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl CandidateTable {
    /// Derives the table from scratch by one full-board scan: every digit
    /// of every empty cell is tested through the validator. This is the
    /// only place candidates are computed non-incrementally.
    #[must_use]
    pub fn scan(grid: &Grid) -> Self {
        let mut table = Self([DigitSet::NONE; CELLS]);
        for index in 0..CELLS {
            if grid[index] != EMPTY {
                continue;
            }
            for digit in 1..=9 {
                if placement_allowed(grid, digit, index) {
                    table.0[index].insert(digit);
                }
            }
        }
        table
    }

    /// The empty cell with the fewest remaining candidates, ties broken by
    /// lowest index. `None` means the grid has no empty cell left.
    #[must_use]
    pub fn min_remaining(&self, grid: &Grid) -> Option<usize> {
        let mut best: Option<usize> = None;
        let mut best_count = u32::MAX;
        for index in 0..CELLS {
            if grid[index] != EMPTY {
                continue;
            }
            let count = self.0[index].len();
            if count < best_count {
                best_count = count;
                best = Some(index);
            }
        }
        best
    }

    /// Clears every candidate of a cell. Used when a digit is committed
    /// there.
    pub(crate) const fn clear_cell(&mut self, index: usize) {
        self.0[index] = DigitSet::NONE;
    }

    /// Strips one digit from one cell's set.
    pub(crate) const fn eliminate(&mut self, index: usize, digit: u8) {
        self.0[index].remove(digit);
    }
}
