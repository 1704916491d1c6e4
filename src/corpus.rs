#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A parser for puzzle corpus files.
//!
//! A corpus is a plain text file holding one puzzle per line: 81 characters,
//! row-major, with `1`..`9` for givens and `0` or `.` for empty cells.
//! Comment lines starting with `#` or `=` and blank lines are skipped, so
//! the common public collections (top95, hardest, and the like) parse as-is.

use crate::engine::grid::{Grid, ParseGridError};
use itertools::Itertools;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

/// Why a corpus could not be read.
#[derive(Debug)]
pub enum CorpusError {
    /// The underlying file or stream failed.
    Io(io::Error),
    /// A record line did not parse as a grid.
    Grid {
        /// One-based line number of the offending record.
        line: usize,
        /// The parse failure itself.
        err: ParseGridError,
    },
}

impl std::fmt::Display for CorpusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "i/o error: {err}"),
            Self::Grid { line, err } => write!(f, "line {line}: {err}"),
        }
    }
}

impl std::error::Error for CorpusError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Grid { err, .. } => Some(err),
        }
    }
}

impl From<io::Error> for CorpusError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Parses corpus data from a `BufRead` source into a list of grids.
///
/// Lines starting with `#` or `=` are comments; blank lines are separators.
/// Every other line must be one 81-character record.
///
/// # Errors
///
/// [`CorpusError::Io`] if a line cannot be read, [`CorpusError::Grid`] with
/// the one-based line number if a record is malformed.
pub fn parse_corpus<R: BufRead>(reader: R) -> Result<Vec<Grid>, CorpusError> {
    let mut grids = Vec::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('=') {
            continue;
        }
        let grid = trimmed.parse().map_err(|err| CorpusError::Grid {
            line: number + 1,
            err,
        })?;
        grids.push(grid);
    }

    Ok(grids)
}

/// Opens a corpus file and parses it with [`parse_corpus`].
///
/// # Errors
///
/// As [`parse_corpus`], plus [`CorpusError::Io`] if the file cannot be
/// opened.
pub fn parse_corpus_file<P: AsRef<Path>>(path: P) -> Result<Vec<Grid>, CorpusError> {
    let file = std::fs::File::open(path)?;
    parse_corpus(io::BufReader::new(file))
}

/// Recursively collects puzzle files (`.txt` or `.sdk`) under a directory,
/// sorted by path for a stable solving order.
#[must_use]
pub fn find_puzzle_files(dir: &Path) -> Vec<PathBuf> {
    walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .map(|entry| entry.path().to_path_buf())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext == "txt" || ext == "sdk")
        })
        .sorted()
        .collect()
}
