//! # `sudoku_mrv`
//!
//! `sudoku_mrv` is a command-line 9x9 Sudoku solver built on candidate
//! bitmasks, forward checking, and MRV (minimum remaining values) guided
//! backtracking.
//!
//! ## Features
//!
//! -   **Multiple Input Formats**:
//!     -   Puzzle corpus files (one 81-character record per line)
//!     -   Plain text records on the command line
//!     -   Whole directories of puzzle files
//! -   **Configurable Search**: Choose between `mrv` and the plain `scan`
//!     backtracker, with an adjustable guess ceiling.
//! -   **Verification**: Solved grids are re-checked independently of the
//!     search, clue preservation included.
//! -   **Statistics**: Parse time, solve time, guess counts and rates, and
//!     memory usage via `tikv-jemallocator`.
//! -   **Decision Trace**: Optionally records every committed placement for
//!     inspection after the fact.
//!
//! ## Usage
//!
//! ```sh
//! # Solve a corpus file with the default MRV strategy
//! sudoku_mrv puzzles.txt
//!
//! # Solve with the plain backtracker and debug output
//! sudoku_mrv file --path puzzles.txt --strategy scan --debug
//!
//! # Solve a single puzzle given inline and print the solution
//! sudoku_mrv text --input "530070000...000080079" --print-solution
//!
//! # Solve every .txt/.sdk file under a directory
//! sudoku_mrv dir --path corpora/
//! ```
//!
//! This file (`main.rs`) contains the main entry point and dispatches to
//! the `command_line` module for parsing and reporting.

use clap::{CommandFactory, Parser};
use command_line::cli::{Cli, Commands};

mod command_line;

/// Global allocator using `tikv-jemallocator` for potentially better
/// performance and memory usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    let cli = Cli::parse();

    // A bare path without a subcommand is treated as a corpus file.
    if let Some(path) = cli.path.clone() {
        if cli.command.is_none() {
            exit_on_error(command_line::cli::solve_corpus_file(&path, &cli.common));
            return;
        }
    }

    match cli.command {
        Some(Commands::File { path, common }) => {
            exit_on_error(command_line::cli::solve_corpus_file(&path, &common));
        }

        Some(Commands::Text { input, common }) => {
            exit_on_error(command_line::cli::solve_text(&input, &common));
        }

        Some(Commands::Dir { path, common }) => {
            exit_on_error(command_line::cli::solve_dir(&path, &common));
        }

        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        }

        None => {
            eprintln!("No command provided. Use --help for more information.");
            std::process::exit(1);
        }
    }
}

fn exit_on_error(result: Result<(), String>) {
    if let Err(message) = result {
        eprintln!("{message}");
        std::process::exit(1);
    }
}
