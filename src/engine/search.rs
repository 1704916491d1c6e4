#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Backtracking search: MRV-guided with forward checking, plus a plain
//! index-order oracle.
//!
//! The MRV controller recurses on a fresh copy of the candidate table per
//! branch and mutates the grid in place, undoing before trying the next
//! digit — a failed branch leaves the caller's state untouched. The plain
//! variant carries no candidate table at all: it rescans legality through
//! the validator on every attempt, which makes it slow but immune to any
//! table-maintenance bug, so it serves as a cross-validation oracle for
//! the heuristic variant.

use crate::engine::candidates::CandidateTable;
use crate::engine::grid::{Grid, EMPTY};
use crate::engine::propagation::reduce;
use crate::engine::trace::TraceSink;
use crate::engine::validator::placement_allowed;

/// How a search run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Verdict {
    /// Every cell is filled.
    Solved,
    /// The search space was exhausted with no solution.
    Exhausted,
    /// The guess ceiling was hit; all frames unwound immediately.
    Aborted,
}

/// MRV backtracking over a grid and its candidate table.
pub(crate) struct MrvSearch<'a> {
    grid: &'a mut Grid,
    sink: &'a mut dyn TraceSink,
    guesses: u64,
    ceiling: u64,
}

impl<'a> MrvSearch<'a> {
    pub(crate) fn new(grid: &'a mut Grid, sink: &'a mut dyn TraceSink, ceiling: u64) -> Self {
        Self { grid, sink, guesses: 0, ceiling }
    }

    pub(crate) const fn guesses(&self) -> u64 {
        self.guesses
    }

    /// One selection step: pick the MRV cell, try its candidates in
    /// ascending digit order, recurse on a derived table. The ceiling is
    /// checked cooperatively here, at the top of every step.
    pub(crate) fn run(&mut self, table: &CandidateTable) -> Verdict {
        if self.guesses > self.ceiling {
            return Verdict::Aborted;
        }
        let Some(cell) = table.min_remaining(self.grid) else {
            return Verdict::Solved;
        };
        let set = table[cell];
        if set.is_empty() {
            // Dead end: some earlier placement starved this cell.
            return Verdict::Exhausted;
        }
        for digit in set.iter() {
            // Redundant while the table invariant holds; kept as a cheap
            // guard against it not holding.
            if !placement_allowed(self.grid, digit, cell) {
                continue;
            }
            self.grid[cell] = digit;
            self.guesses += 1;

            let mut child = table.clone();
            let consistent = reduce(&mut child, cell, digit);
            // Recorded whether or not propagation found a contradiction:
            // the trace keeps what was tried, not only what survived.
            self.sink.record(self.grid, &child, cell, digit);

            if consistent {
                match self.run(&child) {
                    Verdict::Solved => return Verdict::Solved,
                    Verdict::Aborted => {
                        self.grid[cell] = EMPTY;
                        return Verdict::Aborted;
                    }
                    Verdict::Exhausted => {}
                }
            }
            self.grid[cell] = EMPTY;
        }
        Verdict::Exhausted
    }
}

/// Plain backtracking in flat index order, no candidate table.
pub(crate) struct ScanSearch<'a> {
    grid: &'a mut Grid,
    guesses: u64,
    ceiling: u64,
}

impl<'a> ScanSearch<'a> {
    pub(crate) fn new(grid: &'a mut Grid, ceiling: u64) -> Self {
        Self { grid, guesses: 0, ceiling }
    }

    pub(crate) const fn guesses(&self) -> u64 {
        self.guesses
    }

    pub(crate) fn run(&mut self, start: usize) -> Verdict {
        if self.guesses > self.ceiling {
            return Verdict::Aborted;
        }
        let Some(cell) = self.grid.first_empty_from(start) else {
            return Verdict::Solved;
        };
        for digit in 1..=9 {
            if placement_allowed(self.grid, digit, cell) {
                self.grid[cell] = digit;
                self.guesses += 1;
                match self.run(cell + 1) {
                    Verdict::Solved => return Verdict::Solved,
                    Verdict::Aborted => {
                        self.grid[cell] = EMPTY;
                        return Verdict::Aborted;
                    }
                    Verdict::Exhausted => {}
                }
                self.grid[cell] = EMPTY;
            }
        }
        Verdict::Exhausted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::trace::NoopSink;
    use crate::engine::validator::is_solved;

    const PUZZLE: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";

    const SOLUTION: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    fn unsatisfiable() -> Grid {
        // Row 0 holds 1..=8 with cell 8 open; 9 sits in cell 8's column
        // and block, so cell 8 has no legal digit but no given clashes.
        let mut grid = Grid::new();
        for (i, digit) in (1..=7).enumerate() {
            grid[i] = digit;
        }
        grid[16] = 8; // row 1, col 7: bars 8 from cell 8's block.
        grid[17] = 9; // row 1, col 8: bars 9 from cell 8's column and block.
        grid
    }

    #[test]
    fn test_mrv_solves_classical_puzzle() {
        let mut grid: Grid = PUZZLE.parse().unwrap();
        let table = CandidateTable::scan(&grid);
        let mut sink = NoopSink;
        let mut search = MrvSearch::new(&mut grid, &mut sink, u64::MAX);
        assert_eq!(search.run(&table), Verdict::Solved);
        assert!(search.guesses() > 0);
        assert_eq!(grid, SOLUTION.parse().unwrap());
        assert!(is_solved(&grid));
    }

    #[test]
    fn test_scan_solves_classical_puzzle() {
        let mut grid: Grid = PUZZLE.parse().unwrap();
        let mut search = ScanSearch::new(&mut grid, u64::MAX);
        assert_eq!(search.run(0), Verdict::Solved);
        assert_eq!(grid, SOLUTION.parse().unwrap());
    }

    #[test]
    fn test_failed_branch_restores_grid() {
        let before = unsatisfiable();
        let mut grid = before;
        let table = CandidateTable::scan(&grid);
        let mut sink = NoopSink;
        let mut search = MrvSearch::new(&mut grid, &mut sink, u64::MAX);
        assert_eq!(search.run(&table), Verdict::Exhausted);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_both_variants_agree_on_unsatisfiable() {
        let mut a = unsatisfiable();
        let table = CandidateTable::scan(&a);
        let mut sink = NoopSink;
        assert_eq!(MrvSearch::new(&mut a, &mut sink, u64::MAX).run(&table), Verdict::Exhausted);

        let mut b = unsatisfiable();
        assert_eq!(ScanSearch::new(&mut b, u64::MAX).run(0), Verdict::Exhausted);
    }

    #[test]
    fn test_ceiling_aborts_and_restores() {
        let before: Grid = PUZZLE.parse().unwrap();
        let mut grid = before;
        let table = CandidateTable::scan(&grid);
        let mut sink = NoopSink;
        let mut search = MrvSearch::new(&mut grid, &mut sink, 0);
        assert_eq!(search.run(&table), Verdict::Aborted);
        assert!(search.guesses() >= 1);
        assert_eq!(grid, before);
    }
}
