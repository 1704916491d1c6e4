#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The solving engine: board representation, constraint validation,
//! candidate propagation, MRV backtracking, and decision tracing.
//!
//! The entry point is [`solve`]: it validates the givens, seeds the
//! candidate table with one full-board scan, and drives the selected
//! search strategy to a [`Report`]. The engine never touches a file, a
//! window, or a display; its whole contract is 81 cells in, 81 cells out.

/// Per-cell candidate bitmasks and MRV selection.
pub mod candidates;
/// The 81-cell board and its row/column/block geometry.
pub mod grid;
/// Forward-checking elimination over the candidate table.
pub mod propagation;
/// The MRV backtracking controller and the plain index-order oracle.
pub mod search;
/// Decision trace sinks, steps, and cursor navigation.
pub mod trace;
/// Legality checks, malformed-input rejection, and the independent
/// full-solution check.
pub mod validator;

pub use candidates::{CandidateTable, DigitSet};
pub use grid::{Grid, ParseGridError, CELLS, SIZE};
pub use trace::{NoopSink, Recorder, Trace, TraceCursor, TraceSink, TraceStep};
pub use validator::GridError;

use core::fmt;
use core::str::FromStr;
use search::{MrvSearch, ScanSearch, Verdict};

/// Default guess ceiling: 9^9, the source's fixed constant. Sized so only
/// pathological or unsatisfiable inputs ever reach it.
pub const DEFAULT_GUESS_CEILING: u64 = 387_420_489;

/// Which backtracking variant drives the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Minimum-remaining-values selection over a forward-checked
    /// candidate table.
    #[default]
    Mrv,
    /// Plain index-order backtracking, legality recomputed per attempt.
    /// Slower, but carries no candidate-table invariant; used as a
    /// cross-validation oracle.
    Scan,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mrv => write!(f, "mrv"),
            Self::Scan => write!(f, "scan"),
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mrv" => Ok(Self::Mrv),
            "scan" => Ok(Self::Scan),
            other => Err(format!("unknown strategy {other:?} (expected mrv or scan)")),
        }
    }
}

/// Knobs for one [`solve`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Search variant; MRV by default.
    pub strategy: Strategy,
    /// Record a [`Trace`] of committed placements. Only the MRV strategy
    /// produces trace events; the scan oracle has no candidate table to
    /// snapshot.
    pub trace: bool,
    /// Abort with [`Outcome::BudgetExceeded`] once this many placements
    /// have been attempted.
    pub guess_ceiling: u64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            strategy: Strategy::Mrv,
            trace: false,
            guess_ceiling: DEFAULT_GUESS_CEILING,
        }
    }
}

/// How a solve ended. All three are normal outcomes; only malformed input
/// is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A complete, valid solution was found.
    Solved,
    /// The search space was exhausted: no legal completion exists.
    Unsolvable,
    /// The guess ceiling was hit before either of the above. Distinct from
    /// [`Outcome::Unsolvable`]: the puzzle may merely be pathologically
    /// hard.
    BudgetExceeded,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solved => write!(f, "solved"),
            Self::Unsolvable => write!(f, "unsolvable"),
            Self::BudgetExceeded => write!(f, "budget exceeded"),
        }
    }
}

/// Result of one [`solve`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// How the search ended.
    pub outcome: Outcome,
    /// The solved grid when [`Outcome::Solved`]; otherwise the input grid
    /// restored (every speculative placement undone).
    pub grid: Grid,
    /// Digit placements attempted across the whole search tree, including
    /// ones later undone.
    pub guesses: u64,
    /// The recorded decision trace; empty unless `options.trace` was set.
    pub trace: Trace,
}

/// Solves a puzzle, recording a trace if `options.trace` is set.
///
/// # Errors
///
/// [`GridError`] if the input grid holds a value outside `0..=9` or two
/// equal givens in one row, column, or block. The board is rejected before
/// any search.
pub fn solve(grid: &Grid, options: &Options) -> Result<Report, GridError> {
    if options.trace {
        let mut recorder = Recorder::new();
        let mut report = solve_with_sink(grid, options, &mut recorder)?;
        report.trace = recorder.into_trace();
        Ok(report)
    } else {
        solve_with_sink(grid, options, &mut NoopSink)
    }
}

/// Like [`solve`], but streams trace events into a caller-supplied sink
/// instead of collecting them; the returned report's trace is empty.
///
/// # Errors
///
/// [`GridError`] under the same conditions as [`solve`].
pub fn solve_with_sink(
    grid: &Grid,
    options: &Options,
    sink: &mut dyn TraceSink,
) -> Result<Report, GridError> {
    validator::check_givens(grid)?;
    let mut working = *grid;
    let (verdict, guesses) = match options.strategy {
        Strategy::Mrv => {
            let table = CandidateTable::scan(&working);
            let mut search = MrvSearch::new(&mut working, sink, options.guess_ceiling);
            let verdict = search.run(&table);
            (verdict, search.guesses())
        }
        Strategy::Scan => {
            let mut search = ScanSearch::new(&mut working, options.guess_ceiling);
            let verdict = search.run(0);
            (verdict, search.guesses())
        }
    };
    let outcome = match verdict {
        Verdict::Solved => Outcome::Solved,
        Verdict::Exhausted => Outcome::Unsolvable,
        Verdict::Aborted => Outcome::BudgetExceeded,
    };
    Ok(Report {
        outcome,
        grid: working,
        guesses,
        trace: Trace::default(),
    })
}
