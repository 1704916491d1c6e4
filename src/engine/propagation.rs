#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Forward-checking candidate elimination.

use crate::engine::candidates::CandidateTable;
use crate::engine::grid::peers;

/// Updates `table` for a digit just committed at `index`: the placed cell
/// loses all candidates and every peer still carrying `digit` loses that
/// bit. Returns `false` as soon as any stripped peer is left with zero
/// candidates — the placement has made the board locally unsatisfiable and
/// the caller must backtrack instead of recursing.
///
/// On `true`, the table is again consistent with the new grid: filled cells
/// were already empty sets, peers lost exactly the digit whose legality
/// changed, and no other cell's legality is affected by one placement.
#[must_use]
pub fn reduce(table: &mut CandidateTable, index: usize, digit: u8) -> bool {
    table.clear_cell(index);
    for peer in peers(index) {
        if table[peer].contains(digit) {
            table.eliminate(peer, digit);
            if table[peer].is_empty() {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::candidates::CandidateTable;
    use crate::engine::grid::{Grid, CELLS, EMPTY};

    const PUZZLE: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";

    #[test]
    fn test_reduce_strips_peers_only() {
        let mut grid: Grid = PUZZLE.parse().unwrap();
        let mut table = CandidateTable::scan(&grid);
        let cell = 2; // row 0, col 2; candidates include 1.
        assert!(table[cell].contains(1));

        grid[cell] = 1;
        assert!(reduce(&mut table, cell, 1));

        assert!(table[cell].is_empty());
        for peer in peers(cell) {
            assert!(!table[peer].contains(1));
        }
    }

    // After a consistent reduce, the incremental table must equal a fresh
    // full scan of the updated grid.
    #[test]
    fn test_reduce_preserves_scan_invariant() {
        let mut grid: Grid = PUZZLE.parse().unwrap();
        let mut table = CandidateTable::scan(&grid);
        let cell = grid.first_empty_from(0).unwrap();
        let digit = table[cell].iter().next().unwrap();

        grid[cell] = digit;
        assert!(reduce(&mut table, cell, digit));

        let rescanned = CandidateTable::scan(&grid);
        for index in 0..CELLS {
            if grid[index] == EMPTY {
                assert_eq!(table[index], rescanned[index], "cell {index} went stale");
            }
        }
    }

    #[test]
    fn test_reduce_detects_contradiction() {
        // Row 0 holds 1..=7; cell 8's column and block both hold 9, so its
        // only candidate is 8. Committing 8 at cell 7 must zero cell 8 out.
        let mut grid = Grid::new();
        for (i, digit) in (1..=7).enumerate() {
            grid[i] = digit;
        }
        grid[17] = 9; // row 1, col 8: same column and block as cell 8.
        let mut table = CandidateTable::scan(&grid);
        assert_eq!(table[8].iter().collect::<Vec<_>>(), vec![8]);
        assert!(table[7].contains(8));

        grid[7] = 8;
        assert!(!reduce(&mut table, 7, 8));
    }
}
