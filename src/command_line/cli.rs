#![allow(clippy::cast_precision_loss)]

use clap::{Args, Parser, Subcommand};
use std::io::Cursor;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use sudoku_mrv::corpus::{find_puzzle_files, parse_corpus, parse_corpus_file};
use sudoku_mrv::engine::grid::{col_of, row_of, EMPTY};
use sudoku_mrv::engine::{
    self, validator, Grid, Options, Outcome, Report, Strategy, CELLS, DEFAULT_GUESS_CEILING,
};
use tikv_jemalloc_ctl::{epoch, stats};

/// Defines the command-line interface for the sudoku solver application.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "sudoku_mrv", version, about = "An MRV backtracking sudoku solver")]
pub(crate) struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// it's treated as the path to a puzzle corpus file to solve.
    #[arg(global = true)]
    pub path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `file`, `text`, `dir`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands for the sudoku solver.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a puzzle corpus file: one 81-character record per line,
    /// `#`/`=` comment lines and blank lines skipped.
    File {
        /// Path to the corpus file.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve puzzles provided as plain text.
    Text {
        /// One or more 81-character records (whitespace between cells is
        /// ignored; `0` or `.` marks an empty cell).
        #[arg(short, long)]
        input: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every puzzle file (.txt or .sdk) under a directory.
    Dir {
        /// Path to the directory to scan recursively.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct CommonOptions {
    /// Enable debug output, providing more verbose logging during the solving process.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Enable verification of the found solution. Solved grids are re-checked
    /// independently of the search, clue preservation included.
    #[arg(short, long, default_value_t = true)]
    pub(crate) verify: bool,

    /// Enable printing of performance and corpus statistics after solving.
    #[arg(short, long, default_value_t = true)]
    pub(crate) stats: bool,

    /// Enable printing of the solved grid for each puzzle.
    #[arg(short, long, default_value_t = false)]
    pub(crate) print_solution: bool,

    /// Specifies the search strategy to use.
    /// Supported values are "mrv" (minimum remaining values with forward
    /// checking) and "scan" (plain index-order backtracking).
    #[arg(long, default_value_t = Strategy::Mrv)]
    strategy: Strategy,

    /// Abort a puzzle once this many placements have been attempted.
    #[arg(long, default_value_t = DEFAULT_GUESS_CEILING)]
    guess_ceiling: u64,

    /// Record the decision trace and print a per-step log after solving.
    /// Only meaningful with the mrv strategy.
    #[arg(long, default_value_t = false)]
    trace: bool,
}

impl CommonOptions {
    pub(crate) const fn to_options(&self) -> Options {
        Options {
            strategy: self.strategy,
            trace: self.trace,
            guess_ceiling: self.guess_ceiling,
        }
    }
}

/// Running totals across a corpus.
#[derive(Debug, Default, Clone, Copy)]
struct CorpusTotals {
    puzzles: usize,
    solved: usize,
    unsolvable: usize,
    aborted: usize,
    guesses: u64,
}

impl CorpusTotals {
    fn absorb(&mut self, report: &Report) {
        self.puzzles += 1;
        self.guesses += report.guesses;
        match report.outcome {
            Outcome::Solved => self.solved += 1,
            Outcome::Unsolvable => self.unsolvable += 1,
            Outcome::BudgetExceeded => self.aborted += 1,
        }
    }
}

/// Solves every record of a corpus file and reports totals.
///
/// # Errors
///
/// If the file cannot be read, a record is malformed, or a grid holds
/// conflicting givens.
pub(crate) fn solve_corpus_file(path: &PathBuf, common: &CommonOptions) -> Result<(), String> {
    if !path.is_file() {
        return Err(format!("Provided path is not a file: {}", path.display()));
    }

    println!("Solving: {}", path.display());

    let time = Instant::now();
    let grids = parse_corpus_file(path).map_err(|e| e.to_string())?;
    let parse_time = time.elapsed();

    solve_batch(&grids, common, parse_time)
}

/// Solves puzzles given as plain text on the command line.
///
/// # Errors
///
/// If a record is malformed or a grid holds conflicting givens.
pub(crate) fn solve_text(input: &str, common: &CommonOptions) -> Result<(), String> {
    let time = Instant::now();
    let grids = parse_corpus(Cursor::new(input)).map_err(|e| e.to_string())?;
    let parse_time = time.elapsed();

    if grids.is_empty() {
        return Err("No puzzle records in input".into());
    }

    solve_batch(&grids, common, parse_time)
}

/// Solves every puzzle file under a directory.
///
/// # Errors
///
/// If the path is not a directory or any file fails to solve.
pub(crate) fn solve_dir(path: &PathBuf, common: &CommonOptions) -> Result<(), String> {
    if !path.is_dir() {
        return Err(format!("Provided path is not a directory: {}", path.display()));
    }

    let files = find_puzzle_files(path);
    if files.is_empty() {
        eprintln!("No puzzle files under: {}", path.display());
        return Ok(());
    }

    for file in files {
        solve_corpus_file(&file, common)?;
    }

    Ok(())
}

fn solve_batch(grids: &[Grid], common: &CommonOptions, parse_time: Duration) -> Result<(), String> {
    epoch::advance().map_err(|e| e.to_string())?;

    let options = common.to_options();
    let mut totals = CorpusTotals::default();

    let time = Instant::now();
    for (number, grid) in grids.iter().enumerate() {
        let report = engine::solve(grid, &options)
            .map_err(|e| format!("puzzle {}: {e}", number + 1))?;

        if common.debug {
            println!("puzzle {}:\n{grid}", number + 1);
            println!("{} ({} guesses)", report.outcome, report.guesses);
        }

        if common.verify && report.outcome == Outcome::Solved {
            verify_solution(grid, &report)?;
        }

        if common.print_solution && report.outcome == Outcome::Solved {
            println!("{}", report.grid);
        }

        if common.trace {
            print_trace(&report);
        }

        totals.absorb(&report);
    }
    let elapsed = time.elapsed();

    epoch::advance().map_err(|e| e.to_string())?;

    let allocated_bytes = stats::allocated::mib()
        .and_then(|m| m.read())
        .map_err(|e| e.to_string())?;
    let resident_bytes = stats::resident::mib()
        .and_then(|m| m.read())
        .map_err(|e| e.to_string())?;

    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    if common.stats {
        print_stats(parse_time, elapsed, &totals, allocated_mib, resident_mib);
    }

    Ok(())
}

/// Re-checks a solved grid independently of the search: full row, column,
/// and block coverage plus clue preservation.
fn verify_solution(puzzle: &Grid, report: &Report) -> Result<(), String> {
    if !validator::is_solved(&report.grid) {
        return Err("Solution failed verification!".into());
    }
    for index in 0..CELLS {
        if puzzle[index] != EMPTY && report.grid[index] != puzzle[index] {
            return Err(format!("Solution overwrote the given at cell {index}!"));
        }
    }
    println!("Verified: true");
    Ok(())
}

fn print_trace(report: &Report) {
    println!("Trace: {} steps", report.trace.len());
    for step in report.trace.iter() {
        println!(
            "  step {:>5}: {} at r{}c{} ({} open)",
            step.id,
            step.digit,
            row_of(step.cell),
            col_of(step.cell),
            step.grid.empty_cells().count()
        );
    }
}

/// Prints a summary of corpus and search statistics.
fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    totals: &CorpusTotals,
    allocated: f64,
    resident: f64,
) {
    let elapsed_secs = elapsed.as_secs_f64();
    let average = if totals.puzzles > 0 {
        totals.guesses as f64 / totals.puzzles as f64
    } else {
        0.0
    };

    println!("\n=======================[ Corpus Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Puzzles", totals.puzzles);
    stat_line("Solved", totals.solved);
    stat_line("Unsolvable", totals.unsolvable);
    stat_line("Budget exceeded", totals.aborted);

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Guesses", totals.guesses, elapsed_secs);
    stat_line("Guesses per puzzle", format!("{average:.1}"));
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");

    if totals.aborted > 0 {
        println!("\nBUDGET EXCEEDED");
    } else if totals.unsolvable > 0 {
        println!("\nUNSOLVABLE");
    } else {
        println!("\nSOLVED");
    }
}

/// Helper function to print a single statistic line in a formatted table row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
fn stat_line_with_rate(label: &str, value: u64, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}
