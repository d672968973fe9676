//! 8-Puzzle Solver Library
//!
//! Provides the state-space search engine for the 3x3 sliding puzzle:
//! grid model, solvability check, BFS / DFS / A* strategies, and path
//! reconstruction.

pub mod error;
pub mod grid;
pub mod node;
pub mod persistence;
pub mod solvability;
pub mod solver;

pub use error::{Error, Result};
pub use grid::{Action, Grid};
pub use solvability::{is_solvable, is_valid_permutation};
pub use solver::{
    solve, Algorithm, CancelToken, Heuristic, SearchLimits, SearchStats, Solution, Solver,
    SolverConfig, Status,
};
