#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Constraint validation against row, column, and block uniqueness.
//!
//! [`placement_allowed`] is the single legality primitive the rest of the
//! engine is built on: the candidate table derives its bits from it and the
//! search controller keeps it as a safety re-check before every commit.
//! [`check_givens`] rejects malformed boards before any search begins, and
//! [`is_solved`] is a full-board validity check that deliberately shares no
//! code with `placement_allowed`, so tests and `--verify` can use it as an
//! independent witness.

use crate::engine::grid::{block_of, block_origin, col_of, peers, row_of, Grid, BLOCK, CELLS, EMPTY, SIZE};
use core::fmt;

/// Whether placing `digit` at `index` violates no row, column, or block
/// uniqueness constraint of the current grid.
///
/// The three scans overlap only at `index` itself, so the cost is a fixed
/// 27 cell reads. Callers only pass digits `1..=9` for empty cells.
#[must_use]
pub fn placement_allowed(grid: &Grid, digit: u8, index: usize) -> bool {
    let start = row_of(index) * SIZE;
    for i in start..start + SIZE {
        if grid[i] == digit {
            return false;
        }
    }

    let col = col_of(index);
    for row in 0..SIZE {
        if grid[row * SIZE + col] == digit {
            return false;
        }
    }

    let origin = block_origin(index);
    for r in 0..BLOCK {
        for c in 0..BLOCK {
            if grid[origin + r * SIZE + c] == digit {
                return false;
            }
        }
    }

    true
}

/// A board rejected before search: the input itself is malformed.
///
/// Unsolvable boards are not errors; this covers only inputs the engine
/// refuses to search at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// A cell holds a value outside `0..=9`.
    CellOutOfRange {
        /// Flat index of the offending cell.
        index: usize,
        /// The out-of-range value found there.
        value: u8,
    },
    /// Two givens with the same digit share a row, column, or block.
    DuplicateGiven {
        /// Flat index of the second of the two clashing givens.
        index: usize,
        /// The duplicated digit.
        digit: u8,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CellOutOfRange { index, value } => {
                write!(f, "cell {index} holds {value}, outside 0..=9")
            }
            Self::DuplicateGiven { index, digit } => {
                write!(f, "digit {digit} at cell {index} duplicates a peer given")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Rejects a board whose givens are already contradictory.
///
/// Fails fast on any cell value above 9 and on any digit occurring twice in
/// a row, column, or block, so the search never runs on a board it could
/// only disprove.
///
/// # Errors
///
/// [`GridError::CellOutOfRange`] or [`GridError::DuplicateGiven`] naming the
/// first offending cell in index order.
pub fn check_givens(grid: &Grid) -> Result<(), GridError> {
    for (index, &value) in grid.cells().iter().enumerate() {
        if value > 9 {
            return Err(GridError::CellOutOfRange { index, value });
        }
    }
    for index in 0..CELLS {
        let digit = grid[index];
        if digit == EMPTY {
            continue;
        }
        for peer in peers(index) {
            if peer < index && grid[peer] == digit {
                return Err(GridError::DuplicateGiven { index, digit });
            }
        }
    }
    Ok(())
}

// Bits 1..=9 set: the mask a complete constraint group must accumulate.
const FULL_GROUP: u16 = 0b11_1111_1110;

/// Whether `grid` is a complete, valid solution: every cell filled and
/// every row, column, and block a permutation of `1..=9`.
///
/// Implemented with per-group seen-masks rather than through
/// [`placement_allowed`], so it can stand as an independent check on solver
/// output.
#[must_use]
pub fn is_solved(grid: &Grid) -> bool {
    if !grid.is_complete() {
        return false;
    }
    let mut rows = [0u16; SIZE];
    let mut cols = [0u16; SIZE];
    let mut blocks = [0u16; SIZE];
    for index in 0..CELLS {
        let bit = 1u16 << grid[index];
        let (block_row, block_col) = block_of(index);
        rows[row_of(index)] |= bit;
        cols[col_of(index)] |= bit;
        blocks[block_row * BLOCK + block_col] |= bit;
    }
    rows.iter()
        .chain(cols.iter())
        .chain(blocks.iter())
        .all(|&mask| mask == FULL_GROUP)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUZZLE: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";

    const SOLUTION: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    #[test]
    fn test_placement_rejects_row_col_block() {
        let grid: Grid = PUZZLE.parse().unwrap();
        // Cell 2 is in the row with 5 and 3, the column with 8, and the
        // block with 6, 9, 8.
        assert!(!placement_allowed(&grid, 5, 2));
        assert!(!placement_allowed(&grid, 3, 2));
        assert!(!placement_allowed(&grid, 8, 2));
        assert!(!placement_allowed(&grid, 9, 2));
        assert!(placement_allowed(&grid, 1, 2));
        assert!(placement_allowed(&grid, 4, 2));
    }

    #[test]
    fn test_check_givens_accepts_valid_puzzle() {
        let grid: Grid = PUZZLE.parse().unwrap();
        assert_eq!(check_givens(&grid), Ok(()));
    }

    #[test]
    fn test_check_givens_rejects_duplicate_in_row() {
        let mut grid: Grid = PUZZLE.parse().unwrap();
        // Second 5 in the first row.
        grid[8] = 5;
        assert_eq!(
            check_givens(&grid),
            Err(GridError::DuplicateGiven { index: 8, digit: 5 })
        );
    }

    #[test]
    fn test_check_givens_rejects_duplicate_in_block() {
        let mut grid = Grid::new();
        grid[0] = 7;
        grid[10] = 7;
        assert_eq!(
            check_givens(&grid),
            Err(GridError::DuplicateGiven { index: 10, digit: 7 })
        );
    }

    #[test]
    fn test_check_givens_rejects_out_of_range() {
        let mut grid = Grid::new();
        grid[17] = 12;
        assert_eq!(
            check_givens(&grid),
            Err(GridError::CellOutOfRange { index: 17, value: 12 })
        );
    }

    #[test]
    fn test_is_solved() {
        let solution: Grid = SOLUTION.parse().unwrap();
        assert!(is_solved(&solution));

        let puzzle: Grid = PUZZLE.parse().unwrap();
        assert!(!is_solved(&puzzle));

        let mut broken = solution;
        broken[0] = solution[1];
        assert!(!is_solved(&broken));
    }
}
