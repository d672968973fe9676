//! Board representation and blank-move model for the 8-puzzle.
//!
//! The board is a flat row-major array of nine tile labels, 0 denoting the
//! blank. A [`Grid`] is immutable: every move produces a new value.

use std::fmt;

use crate::error::{Error, Result};
use crate::solvability::is_valid_permutation;

/// Number of rows (and columns) on the board.
pub const DIM: usize = 3;

/// Total number of cells on the board.
pub const GRID_SIZE: usize = DIM * DIM;

/// Tile label of the blank cell.
pub const BLANK: u8 = 0;

/// Cell layout of the solved board, row-major.
pub const GOAL_CELLS: [u8; GRID_SIZE] = [1, 2, 3, 4, 5, 6, 7, 8, 0];

/// Compact hashable encoding of a grid (4 bits per cell).
pub type GridKey = u64;

/// Direction the blank moves in.
///
/// Equivalently, the tile on that side of the blank slides into the blank's
/// former cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Right,
    Down,
    Left,
}

impl Action {
    /// Fixed expansion order shared by every search strategy.
    pub const ALL: [Action; 4] = [Action::Up, Action::Right, Action::Down, Action::Left];

    /// The move that undoes this one.
    pub fn inverse(self) -> Self {
        match self {
            Action::Up => Action::Down,
            Action::Down => Action::Up,
            Action::Left => Action::Right,
            Action::Right => Action::Left,
        }
    }

    /// Single-letter direction symbol used in solution output.
    pub fn symbol(self) -> char {
        match self {
            Action::Up => 'U',
            Action::Right => 'R',
            Action::Down => 'D',
            Action::Left => 'L',
        }
    }

    /// Row and column delta applied to the blank.
    fn offset(self) -> (isize, isize) {
        match self {
            Action::Up => (-1, 0),
            Action::Right => (0, 1),
            Action::Down => (1, 0),
            Action::Left => (0, -1),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Immutable snapshot of the board with the blank position cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: [u8; GRID_SIZE],
    blank: u8,
}

impl Grid {
    /// The solved board `[[1,2,3],[4,5,6],[7,8,0]]`.
    pub const GOAL: Grid = Grid {
        cells: GOAL_CELLS,
        blank: (GRID_SIZE - 1) as u8,
    };

    /// Builds a grid from row-major cells, rejecting anything that is not a
    /// permutation of `0..=8`.
    pub fn new(cells: [u8; GRID_SIZE]) -> Result<Self> {
        if !is_valid_permutation(&cells) {
            return Err(Error::InvalidPuzzle { cells });
        }
        let blank = cells
            .iter()
            .position(|&tile| tile == BLANK)
            .ok_or(Error::InvalidPuzzle { cells })?;

        Ok(Self {
            cells,
            blank: blank as u8,
        })
    }

    /// Builds a grid from three rows of three tiles.
    pub fn from_rows(rows: [[u8; DIM]; DIM]) -> Result<Self> {
        Self::new(flatten(rows))
    }

    /// Row-major cell values.
    #[inline]
    pub fn cells(&self) -> &[u8; GRID_SIZE] {
        &self.cells
    }

    /// The board as three rows of three tiles.
    pub fn rows(&self) -> [[u8; DIM]; DIM] {
        let mut rows = [[0u8; DIM]; DIM];
        for (idx, &tile) in self.cells.iter().enumerate() {
            rows[idx / DIM][idx % DIM] = tile;
        }
        rows
    }

    /// Tile at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row * DIM + col]
    }

    /// Coordinates `(row, col)` of the blank.
    #[inline]
    pub fn blank(&self) -> (usize, usize) {
        let idx = self.blank as usize;
        (idx / DIM, idx % DIM)
    }

    #[inline]
    pub fn is_goal(&self) -> bool {
        self.cells == GOAL_CELLS
    }

    /// Returns true if moving the blank in `action`'s direction stays on the board.
    pub fn is_legal(&self, action: Action) -> bool {
        self.target(action).is_some()
    }

    /// Legal actions in the fixed `Up, Right, Down, Left` order.
    ///
    /// Four for the centre, three on an edge, two in a corner.
    pub fn legal_actions(&self) -> impl Iterator<Item = Action> + '_ {
        Action::ALL
            .into_iter()
            .filter(move |&action| self.is_legal(action))
    }

    /// Moves the blank, returning the resulting grid. `self` is left untouched.
    pub fn apply(&self, action: Action) -> Result<Grid> {
        let (row, col) = self.blank();
        let target = self
            .target(action)
            .ok_or(Error::InvalidMove { action, row, col })?;

        let mut cells = self.cells;
        cells.swap(self.blank as usize, target);

        Ok(Grid {
            cells,
            blank: target as u8,
        })
    }

    /// Cell index the blank would move into, if that cell exists.
    fn target(&self, action: Action) -> Option<usize> {
        let (row, col) = self.blank();
        let (d_row, d_col) = action.offset();
        let new_row = row.checked_add_signed(d_row).filter(|&r| r < DIM)?;
        let new_col = col.checked_add_signed(d_col).filter(|&c| c < DIM)?;
        Some(new_row * DIM + new_col)
    }

    /// Packs the cells into a `u64`, 4 bits each, for fast set membership.
    #[inline]
    pub fn key(&self) -> GridKey {
        self.cells
            .iter()
            .fold(0u64, |key, &tile| (key << 4) | tile as u64)
    }

    /// Sum over tiles 1..=8 of the Manhattan distance to the tile's goal cell.
    pub fn manhattan(&self) -> u32 {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &tile)| tile != BLANK)
            .map(|(idx, &tile)| {
                let goal = tile as usize - 1;
                let row_distance = (idx / DIM).abs_diff(goal / DIM);
                let col_distance = (idx % DIM).abs_diff(goal % DIM);
                (row_distance + col_distance) as u32
            })
            .sum()
    }

    /// Number of tiles 1..=8 not on their goal cell.
    pub fn misplaced(&self) -> u32 {
        self.cells
            .iter()
            .zip(GOAL_CELLS.iter())
            .filter(|&(&tile, &goal)| tile != BLANK && tile != goal)
            .count() as u32
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::GOAL
    }
}

/// Flattens three rows into row-major order.
pub fn flatten(rows: [[u8; DIM]; DIM]) -> [u8; GRID_SIZE] {
    let mut cells = [0u8; GRID_SIZE];
    for (row_index, row) in rows.iter().enumerate() {
        cells[row_index * DIM..(row_index + 1) * DIM].copy_from_slice(row);
    }
    cells
}

/// One row per line, tiles separated by a space, the blank shown as `.`.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: Vec<String> = row
                .iter()
                .map(|&tile| {
                    if tile == BLANK {
                        ".".to_string()
                    } else {
                        tile.to_string()
                    }
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
