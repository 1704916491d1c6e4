#![deny(missing_docs)]
//! This crate provides a 9x9 Sudoku solving engine built on candidate
//! bitmasks, forward checking, and MRV (minimum remaining values) guided
//! backtracking, with an optional decision trace for inspecting the search.

/// The `corpus` module parses puzzle corpus files, one 81-character record
/// per line, and discovers puzzle files on disk.
pub mod corpus;

/// The `engine` module implements the solver itself: grid, validator,
/// candidate table, propagation, search, and trace.
pub mod engine;
