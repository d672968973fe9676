//! 8-Puzzle Solver
//!
//! Reads a 3x3 sliding puzzle from a file, checks that it is a valid and
//! solvable arrangement, and solves it with breadth-first, depth-first or A*
//! search. The move list is written to a solution file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

use eight_puzzle::grid::{Grid, DIM};
use eight_puzzle::persistence::{self, RawRows, SOLUTION_FILE};
use eight_puzzle::{
    is_solvable, is_valid_permutation, Algorithm, Heuristic, SearchLimits, Solution, Solver,
    SolverConfig, Status,
};

/// Solves the 3x3 sliding puzzle with BFS, DFS or A*.
#[derive(Parser)]
#[command(name = "eight-puzzle")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a puzzle and write the move list to a file.
    Solve {
        #[command(flatten)]
        search: SearchArgs,
        /// Where to write the move list.
        #[arg(short, long, default_value = SOLUTION_FILE)]
        output: PathBuf,
    },
    /// Report whether a puzzle is valid and solvable without searching.
    Check {
        /// Puzzle file.
        input: PathBuf,
    },
    /// Solve a puzzle and print every grid along the solution.
    Trace {
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Run all three algorithms concurrently and compare their results.
    Compare {
        /// Puzzle file.
        input: PathBuf,
        /// Stop each search after this many node expansions.
        #[arg(long)]
        max_expansions: Option<usize>,
    },
}

#[derive(Args)]
struct SearchArgs {
    /// Puzzle file: three rows of three space-separated tiles, 0 for the blank.
    input: PathBuf,
    /// Search algorithm.
    #[arg(short, long, value_enum, default_value_t = Algorithm::Bfs)]
    algorithm: Algorithm,
    /// Heuristic used by A*.
    #[arg(long, value_enum, default_value_t = Heuristic::Manhattan)]
    heuristic: Heuristic,
    /// Stop after this many node expansions.
    #[arg(long)]
    max_expansions: Option<usize>,
}

impl SearchArgs {
    fn solver(&self) -> Solver {
        Solver::new(SolverConfig {
            algorithm: self.algorithm,
            heuristic: self.heuristic,
            limits: SearchLimits {
                max_expansions: self.max_expansions,
            },
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Solve { search, output } => run_solve(&search, &output),
        Command::Check { input } => run_check(&input),
        Command::Trace { search } => run_trace(&search),
        Command::Compare {
            input,
            max_expansions,
        } => run_compare(&input, SearchLimits { max_expansions }),
    }
}

/// Installs `env_logger` at a level picked from the `-v` count.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load(input: &Path) -> Result<[[u8; DIM]; DIM]> {
    let rows = persistence::load_grid(input)
        .with_context(|| format!("failed to load puzzle from {}", input.display()))?;
    print!("{}", format_rows(&rows));
    Ok(persistence::to_tiles(&rows))
}

/// Solves the puzzle, prints the result, and saves the move list.
fn run_solve(search: &SearchArgs, output: &Path) -> Result<()> {
    let rows = load(&search.input)?;
    let solution = search.solver().solve(rows)?;
    print!("{}", render_solution(search.algorithm, &solution));

    if solution.is_solved() {
        persistence::save_solution(output, &solution)
            .with_context(|| format!("failed to save solution to {}", output.display()))?;
        println!("Wrote {}", output.display());
    }
    Ok(())
}

/// Prints the validity / solvability verdict.
fn run_check(input: &Path) -> Result<()> {
    let rows = load(input)?;
    println!("{}", status_message(classify(&rows)));
    Ok(())
}

/// Solves the puzzle and prints every intermediate grid.
fn run_trace(search: &SearchArgs) -> Result<()> {
    let rows = load(&search.input)?;
    let solution = search.solver().solve(rows)?;
    print!("{}", render_solution(search.algorithm, &solution));
    if solution.is_solved() {
        println!();
        print!("{}", persistence::format_trace(&solution.path));
    }
    Ok(())
}

/// Runs every algorithm on its own thread and tabulates the outcomes.
fn run_compare(input: &Path, limits: SearchLimits) -> Result<()> {
    let rows = load(input)?;
    let status = classify(&rows);
    if status != Status::Solvable {
        println!("{}", status_message(status));
        return Ok(());
    }

    let grid = Grid::from_rows(rows)?;
    let results = compare(&grid, &Algorithm::ALL, limits);
    print!("{}", render_comparison(&results));
    Ok(())
}

/// Searches `grid` with each algorithm concurrently.
fn compare(
    grid: &Grid,
    algorithms: &[Algorithm],
    limits: SearchLimits,
) -> Vec<(Algorithm, eight_puzzle::Result<Solution>)> {
    std::thread::scope(|scope| {
        let handles: Vec<_> = algorithms
            .iter()
            .map(|&algorithm| {
                let solver = Solver::new(SolverConfig {
                    algorithm,
                    limits,
                    ..SolverConfig::default()
                });
                (algorithm, scope.spawn(move || solver.solve_grid(grid)))
            })
            .collect();

        handles
            .into_iter()
            .filter_map(|(algorithm, handle)| match handle.join() {
                Ok(result) => Some((algorithm, result)),
                Err(_) => {
                    log::error!("{algorithm} search thread panicked");
                    None
                }
            })
            .collect()
    })
}

/// Determines the puzzle status without searching.
fn classify(rows: &[[u8; DIM]; DIM]) -> Status {
    let cells = eight_puzzle::grid::flatten(*rows);
    if !is_valid_permutation(&cells) {
        Status::Invalid
    } else if !is_solvable(&cells) {
        Status::NotSolvable
    } else {
        Status::Solvable
    }
}

fn status_message(status: Status) -> &'static str {
    match status {
        Status::Solvable => "Solvable.",
        Status::NotSolvable => "Non-solvable.",
        Status::Invalid => "Invalid puzzle values.",
    }
}

/// Formats the raw input rows, one per line.
fn format_rows(rows: &RawRows) -> String {
    let mut output = String::new();
    for row in rows {
        let line: Vec<String> = row.iter().map(i32::to_string).collect();
        output.push_str(&line.join(" "));
        output.push('\n');
    }
    output
}

/// Formats a solve result: the move list and path cost, or the status.
fn render_solution(algorithm: Algorithm, solution: &Solution) -> String {
    match solution.status {
        Status::Solvable => format!(
            "Solution: {}\nPath Cost: {} ({})\n",
            persistence::format_actions(&solution.actions),
            solution.cost,
            algorithm
        ),
        status => format!("{}\n", status_message(status)),
    }
}

/// Formats comparison results as an aligned table.
fn render_comparison(results: &[(Algorithm, eight_puzzle::Result<Solution>)]) -> String {
    let mut output = format!(
        "{:<10}{:>6}{:>10}{:>11}{:>14}\n",
        "Algorithm", "Cost", "Expanded", "Generated", "Max frontier"
    );
    for (algorithm, result) in results {
        let name = algorithm.to_string();
        match result {
            Ok(solution) => output.push_str(&format!(
                "{:<10}{:>6}{:>10}{:>11}{:>14}\n",
                name,
                solution.cost,
                solution.stats.expanded,
                solution.stats.generated,
                solution.stats.max_frontier
            )),
            Err(e) => output.push_str(&format!("{name:<10}error: {e}\n")),
        }
    }
    output
}
