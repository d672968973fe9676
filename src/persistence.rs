//! File I/O for puzzle input and solution output.
//!
//! Input format: three non-blank lines, each holding three whitespace
//! separated integers, row-major. Blank lines are skipped.
//!
//! Solution format: the move list on one line, e.g. `[U, R, D, L]`.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::grid::{Action, Grid, DIM};
use crate::solver::Solution;

/// Default solution file name.
pub const SOLUTION_FILE: &str = "solutionPuzzle.out";

/// Rows exactly as written in an input file, before range checking.
pub type RawRows = [[i32; DIM]; DIM];

/// Tile label standing in for any value that does not fit a `u8`.
///
/// It is never part of a valid permutation.
const OUT_OF_RANGE: u8 = u8::MAX;

/// Parses a 3x3 grid from text.
///
/// Only the shape and integer syntax are checked here; whether the values
/// form a permutation is left to the solver, so `-1` or `300` parse fine.
pub fn parse_grid(text: &str) -> Result<RawRows> {
    let mut rows = [[0i32; DIM]; DIM];
    let mut row_count = 0;

    for (line_index, line) in text.lines().enumerate() {
        let line_number = line_index + 1;
        if line.trim().is_empty() {
            continue;
        }
        if row_count == DIM {
            return Err(Error::Parse {
                line: line_number,
                message: format!("expected {DIM} rows, found more"),
            });
        }

        let values = line
            .split_whitespace()
            .map(|token| {
                token.parse::<i32>().map_err(|_| Error::Parse {
                    line: line_number,
                    message: format!("'{token}' is not an integer"),
                })
            })
            .collect::<Result<Vec<i32>>>()?;

        if values.len() != DIM {
            return Err(Error::Parse {
                line: line_number,
                message: format!("expected {DIM} values, found {}", values.len()),
            });
        }

        rows[row_count].copy_from_slice(&values);
        row_count += 1;
    }

    if row_count != DIM {
        return Err(Error::Parse {
            line: text.lines().count(),
            message: format!("expected {DIM} rows, found {row_count}"),
        });
    }

    Ok(rows)
}

/// Narrows raw rows to tile labels for the solver.
///
/// Values outside `0..=255` become [`OUT_OF_RANGE`], so they surface as an
/// invalid puzzle rather than being silently wrapped.
pub fn to_tiles(rows: &RawRows) -> [[u8; DIM]; DIM] {
    rows.map(|row| row.map(|value| u8::try_from(value).unwrap_or(OUT_OF_RANGE)))
}

/// Reads and parses a grid file.
pub fn load_grid(path: &Path) -> Result<RawRows> {
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        operation: format!("read {}", path.display()),
        source,
    })?;
    parse_grid(&text)
}

/// Formats moves as a bracketed, comma separated list of direction symbols.
pub fn format_actions(actions: &[Action]) -> String {
    let symbols: Vec<String> = actions.iter().map(Action::to_string).collect();
    format!("[{}]", symbols.join(", "))
}

/// Formats every grid on a solution path, separated by blank lines.
pub fn format_trace(path: &[Grid]) -> String {
    let mut output = String::new();
    for (step, grid) in path.iter().enumerate() {
        if step > 0 {
            output.push('\n');
        }
        output.push_str(&format!("Step {step}:\n{grid}"));
    }
    output
}

/// Writes the move list of `solution` to `path`.
pub fn save_solution(path: &Path, solution: &Solution) -> Result<()> {
    fs::write(path, format_actions(&solution.actions)).map_err(|source| Error::Io {
        operation: format!("write {}", path.display()),
        source,
    })
}
