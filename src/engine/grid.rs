#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The 9x9 board representation and its geometry.
//!
//! A [`Grid`] is a flat array of 81 cells in row-major order. A cell holds
//! `0` for empty or a digit `1..=9`. Row, column, and block membership are
//! derived from the flat index by the pure helpers in this module; nothing
//! here knows about legality, candidates, or search.

use core::fmt;
use core::ops::{Index, IndexMut};
use core::str::FromStr;
use smallvec::SmallVec;

/// Cells per row, rows per grid, and distinct digits.
pub const SIZE: usize = 9;
/// Side length of one block (the 3x3 sub-grid).
pub const BLOCK: usize = 3;
/// Total number of cells.
pub const CELLS: usize = SIZE * SIZE;
/// The value of an empty cell.
pub const EMPTY: u8 = 0;

/// The indices sharing a row, column, or block with a cell, excluding the
/// cell itself. Always exactly 20 entries, so it never spills to the heap.
pub type PeerList = SmallVec<[usize; 20]>;

/// Row of a flat cell index.
#[must_use]
pub const fn row_of(index: usize) -> usize {
    index / SIZE
}

/// Column of a flat cell index.
#[must_use]
pub const fn col_of(index: usize) -> usize {
    index % SIZE
}

/// Block coordinates `(block_row, block_col)` of a flat cell index.
#[must_use]
pub const fn block_of(index: usize) -> (usize, usize) {
    (row_of(index) / BLOCK, col_of(index) / BLOCK)
}

/// Flat index of the top-left cell of the block containing `index`.
#[must_use]
pub const fn block_origin(index: usize) -> usize {
    let (block_row, block_col) = block_of(index);
    block_row * BLOCK * SIZE + block_col * BLOCK
}

/// The 20 peers of a cell: 8 in its row, 8 in its column, and the 4 block
/// cells that share neither its row nor its column.
#[must_use]
pub fn peers(index: usize) -> PeerList {
    let mut list = PeerList::new();
    let row = row_of(index);
    let col = col_of(index);
    for c in 0..SIZE {
        let i = row * SIZE + c;
        if i != index {
            list.push(i);
        }
    }
    for r in 0..SIZE {
        let i = r * SIZE + col;
        if i != index {
            list.push(i);
        }
    }
    let origin = block_origin(index);
    for r in 0..BLOCK {
        for c in 0..BLOCK {
            let i = origin + r * SIZE + c;
            if row_of(i) != row && col_of(i) != col {
                list.push(i);
            }
        }
    }
    list
}

/// A 9x9 Sudoku board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid([u8; CELLS]);

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// An entirely empty grid.
    #[must_use]
    pub const fn new() -> Self {
        Self([EMPTY; CELLS])
    }

    /// Wraps a raw cell array. Values are not checked here; use
    /// [`crate::engine::validator::check_givens`] before solving.
    #[must_use]
    pub const fn from_cells(cells: [u8; CELLS]) -> Self {
        Self(cells)
    }

    /// The underlying cell array.
    #[must_use]
    pub const fn cells(&self) -> &[u8; CELLS] {
        &self.0
    }

    /// Iterator over the flat indices of all empty cells.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, &v)| (v == EMPTY).then_some(i))
    }

    /// First empty cell at or after `start`, in index order.
    #[must_use]
    pub fn first_empty_from(&self, start: usize) -> Option<usize> {
        (start..CELLS).find(|&i| self.0[i] == EMPTY)
    }

    /// Whether every cell holds a digit.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.0.iter().all(|&v| v != EMPTY)
    }
}

impl Index<usize> for Grid {
    type Output = u8;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IndexMut<usize> for Grid {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIZE {
            for col in 0..SIZE {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", self.0[row * SIZE + col])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Error produced when text does not describe a valid 81-cell grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseGridError {
    /// The input held the wrong number of cell characters.
    WrongLength(usize),
    /// A character other than `.`, `0`..`9`, or whitespace was found.
    BadChar(char),
}

impl fmt::Display for ParseGridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength(n) => write!(f, "expected {CELLS} cells, found {n}"),
            Self::BadChar(c) => write!(f, "invalid cell character {c:?}"),
        }
    }
}

impl std::error::Error for ParseGridError {}

impl FromStr for Grid {
    type Err = ParseGridError;

    /// Parses 81 cell characters: `0` or `.` for empty, `1`..`9` for a
    /// given. Whitespace anywhere in the input is ignored, so multi-line
    /// grid literals parse the same as single-record corpus lines.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = [EMPTY; CELLS];
        let mut count = 0usize;
        for c in s.chars() {
            if c.is_whitespace() {
                continue;
            }
            let value = match c {
                '.' | '0' => EMPTY,
                '1'..='9' => c as u8 - b'0',
                other => return Err(ParseGridError::BadChar(other)),
            };
            if count < CELLS {
                cells[count] = value;
            }
            count += 1;
        }
        if count == CELLS {
            Ok(Self(cells))
        } else {
            Err(ParseGridError::WrongLength(count))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_helpers() {
        assert_eq!(row_of(0), 0);
        assert_eq!(col_of(0), 0);
        assert_eq!(row_of(80), 8);
        assert_eq!(col_of(80), 8);
        assert_eq!(block_of(40), (1, 1));
        assert_eq!(block_origin(40), 30);
        assert_eq!(block_of(53), (1, 2));
        assert_eq!(block_origin(53), 33);
    }

    #[test]
    fn test_peers_cover_row_col_block() {
        let list = peers(40);
        assert_eq!(list.len(), 20);
        // Row 4, column 4, block (1, 1).
        for &p in &list {
            let same_row = row_of(p) == 4;
            let same_col = col_of(p) == 4;
            let same_block = block_of(p) == (1, 1);
            assert!(same_row || same_col || same_block);
            assert_ne!(p, 40);
        }
    }

    #[test]
    fn test_peers_are_distinct() {
        for index in 0..CELLS {
            let list = peers(index);
            assert_eq!(list.len(), 20);
            for (i, &a) in list.iter().enumerate() {
                for &b in &list[i + 1..] {
                    assert_ne!(a, b);
                }
            }
        }
    }

    #[test]
    fn test_parse_round_trip() {
        let text = "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";
        let grid: Grid = text.parse().unwrap();
        assert_eq!(grid[0], 5);
        assert_eq!(grid[1], 3);
        assert_eq!(grid[2], 0);
        assert_eq!(grid[80], 9);
        assert_eq!(grid.empty_cells().count(), 51);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!("123".parse::<Grid>(), Err(ParseGridError::WrongLength(3)));
        let mut text = String::from("x");
        text.push_str(&"0".repeat(80));
        assert_eq!(text.parse::<Grid>(), Err(ParseGridError::BadChar('x')));
    }

    #[test]
    fn test_first_empty_from() {
        let mut grid = Grid::new();
        grid[0] = 5;
        grid[1] = 3;
        assert_eq!(grid.first_empty_from(0), Some(2));
        assert_eq!(grid.first_empty_from(2), Some(2));
        assert_eq!(grid.first_empty_from(81), None);
    }
}
