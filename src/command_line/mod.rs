//! Command-line parsing and the solve-and-report plumbing behind it.

pub(crate) mod cli;
