#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Decision trace recording for inspection and visualization.
//!
//! The search controller reports every committed placement through a
//! [`TraceSink`]. The default sink does nothing; [`Recorder`] appends a
//! [`TraceStep`] per event into an append-only [`Trace`]. The trace records
//! the path the search explored, dead ends included: a placement that is
//! later undone keeps its step. Once built, a trace is never edited;
//! [`TraceCursor`] walks it forward and backward without mutating it.

use crate::engine::candidates::CandidateTable;
use crate::engine::grid::Grid;

/// Receiver for search decision events.
///
/// Called exactly once per committed placement — after the grid mutation
/// and after propagation has updated `candidates` — and never for attempts
/// the validator rejected, for undos, or for the synthetic root.
pub trait TraceSink {
    /// Records one committed placement of `digit` at `cell`.
    fn record(&mut self, grid: &Grid, candidates: &CandidateTable, cell: usize, digit: u8);
}

/// The default sink: discards every event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopSink;

impl TraceSink for NoopSink {
    fn record(&mut self, _: &Grid, _: &CandidateTable, _: usize, _: u8) {}
}

/// One committed placement: snapshots of the grid and candidate table just
/// after the commit, plus the cell and digit placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceStep {
    /// Position in the trace, starting at 1. Id 0 is the synthetic root
    /// (the state before any placement) and has no step of its own.
    pub id: usize,
    /// The grid immediately after the placement.
    pub grid: Grid,
    /// The candidate table immediately after propagation.
    pub candidates: CandidateTable,
    /// Flat index of the cell just filled.
    pub cell: usize,
    /// The digit placed there.
    pub digit: u8,
}

/// An ordered, append-only sequence of [`TraceStep`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    steps: Vec<TraceStep>,
}

impl Trace {
    /// Number of recorded steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether no step was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The step with the given id, if recorded. Id 0 is the root and has
    /// no step.
    #[must_use]
    pub fn get(&self, id: usize) -> Option<&TraceStep> {
        id.checked_sub(1).and_then(|i| self.steps.get(i))
    }

    /// The most recently recorded step.
    #[must_use]
    pub fn last(&self) -> Option<&TraceStep> {
        self.steps.last()
    }

    /// Iterator over the steps in recording order.
    pub fn iter(&self) -> impl Iterator<Item = &TraceStep> {
        self.steps.iter()
    }

    /// A cursor positioned at the root, before the first step.
    #[must_use]
    pub const fn cursor(&self) -> TraceCursor<'_> {
        TraceCursor { trace: self, position: 0 }
    }

    fn push(&mut self, grid: &Grid, candidates: &CandidateTable, cell: usize, digit: u8) {
        let id = self.steps.len() + 1;
        self.steps.push(TraceStep {
            id,
            grid: *grid,
            candidates: candidates.clone(),
            cell,
            digit,
        });
    }
}

/// A sink that keeps every event as a [`TraceStep`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recorder {
    trace: Trace,
}

impl Recorder {
    /// A recorder with an empty trace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrows the trace recorded so far.
    #[must_use]
    pub const fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Consumes the recorder, yielding the finished trace.
    #[must_use]
    pub fn into_trace(self) -> Trace {
        self.trace
    }
}

impl TraceSink for Recorder {
    fn record(&mut self, grid: &Grid, candidates: &CandidateTable, cell: usize, digit: u8) {
        self.trace.push(grid, candidates, cell, digit);
    }
}

/// A navigable position within a [`Trace`].
///
/// Position 0 is the root; positions `1..=len` sit on the step with that
/// id. Moving past either end is a no-op that returns `None`/root.
#[derive(Debug, Clone, Copy)]
pub struct TraceCursor<'a> {
    trace: &'a Trace,
    position: usize,
}

impl<'a> TraceCursor<'a> {
    /// The step under the cursor, or `None` at the root.
    #[must_use]
    pub fn current(&self) -> Option<&'a TraceStep> {
        self.trace.get(self.position)
    }

    /// Advances one step and returns it, or `None` at the end.
    pub fn forward(&mut self) -> Option<&'a TraceStep> {
        if self.position < self.trace.len() {
            self.position += 1;
            self.current()
        } else {
            None
        }
    }

    /// Steps back one step and returns the new current step, or `None`
    /// once back at the root.
    pub fn back(&mut self) -> Option<&'a TraceStep> {
        if self.position > 0 {
            self.position -= 1;
        }
        self.current()
    }

    /// Current position: 0 at the root, otherwise the current step id.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::candidates::CandidateTable;
    use crate::engine::grid::Grid;

    fn record_n(n: usize) -> Trace {
        let grid = Grid::new();
        let table = CandidateTable::scan(&grid);
        let mut recorder = Recorder::new();
        for i in 0..n {
            recorder.record(&grid, &table, i, 1);
        }
        recorder.into_trace()
    }

    #[test]
    fn test_ids_start_at_one() {
        let trace = record_n(3);
        assert_eq!(trace.len(), 3);
        assert_eq!(trace.get(0), None);
        assert_eq!(trace.get(1).unwrap().id, 1);
        assert_eq!(trace.last().unwrap().id, 3);
        assert_eq!(trace.get(4), None);
    }

    #[test]
    fn test_cursor_navigation() {
        let trace = record_n(2);
        let mut cursor = trace.cursor();
        assert_eq!(cursor.position(), 0);
        assert!(cursor.current().is_none());

        assert_eq!(cursor.forward().unwrap().id, 1);
        assert_eq!(cursor.forward().unwrap().id, 2);
        assert!(cursor.forward().is_none());
        assert_eq!(cursor.position(), 2);

        assert_eq!(cursor.back().unwrap().id, 1);
        assert!(cursor.back().is_none());
        assert_eq!(cursor.position(), 0);
        assert!(cursor.back().is_none());
    }

    #[test]
    fn test_noop_sink_records_nothing() {
        let grid = Grid::new();
        let table = CandidateTable::scan(&grid);
        let mut sink = NoopSink;
        sink.record(&grid, &table, 0, 9);
        // Nothing observable; this pins the sink as a valid TraceSink.
    }
}
