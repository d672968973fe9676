//! Error types for the puzzle engine.

use thiserror::Error;

use crate::grid::Action;

/// Errors raised by the search engine and its I/O helpers.
///
/// Unsolvable and malformed grids are not errors when going through
/// [`crate::solve`]; they are reported as a [`crate::Status`] instead.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid puzzle: {cells:?} is not a permutation of 0..=8")]
    InvalidPuzzle { cells: [u8; 9] },

    #[error("invalid move: cannot move blank {action:?} from ({row}, {col})")]
    InvalidMove { action: Action, row: usize, col: usize },

    #[error("no solution found after expanding {expanded} nodes")]
    NoSolutionFound { expanded: usize },

    #[error("search budget of {limit} expansions exhausted")]
    BudgetExhausted { limit: usize },

    #[error("search cancelled after expanding {expanded} nodes")]
    Cancelled { expanded: usize },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
