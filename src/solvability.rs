//! Input validation and the inversion-parity solvability check.

use crate::grid::{BLANK, GRID_SIZE};

/// Returns true if the nine values are exactly `{0, ..., 8}` with no repeats.
pub fn is_valid_permutation(cells: &[u8; GRID_SIZE]) -> bool {
    // bit i set = value i seen
    let mut seen = 0u16;
    for &tile in cells {
        if tile as usize >= GRID_SIZE || seen & (1 << tile) != 0 {
            return false;
        }
        seen |= 1 << tile;
    }
    true
}

/// Counts pairs `i < j` of non-blank tiles with `cells[i] > cells[j]`.
pub fn count_inversions(cells: &[u8; GRID_SIZE]) -> usize {
    cells
        .iter()
        .enumerate()
        .filter(|&(_, &tile)| tile != BLANK)
        .map(|(i, &tile)| {
            cells[i + 1..]
                .iter()
                .filter(|&&later| later != BLANK && later < tile)
                .count()
        })
        .sum()
}

/// A 3x3 board reaches the goal iff its inversion count is even.
///
/// Callers must check [`is_valid_permutation`] first.
pub fn is_solvable(cells: &[u8; GRID_SIZE]) -> bool {
    count_inversions(cells) % 2 == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{flatten, Action, Grid, GOAL_CELLS};

    #[test]
    fn test_valid_permutation() {
        assert!(is_valid_permutation(&GOAL_CELLS));
        assert!(is_valid_permutation(&[8, 7, 6, 5, 4, 3, 2, 1, 0]));
    }

    #[test]
    fn test_duplicate_and_missing_value_is_invalid() {
        let cells = flatten([[1, 2, 5], [4, 5, 6], [7, 8, 0]]);
        assert!(!is_valid_permutation(&cells));
    }

    #[test]
    fn test_out_of_range_value_is_invalid() {
        assert!(!is_valid_permutation(&[1, 2, 3, 4, 5, 6, 7, 8, 9]));
        assert!(!is_valid_permutation(&[1, 2, 3, 4, 5, 6, 7, 8, 200]));
    }

    #[test]
    fn test_goal_has_no_inversions() {
        assert_eq!(count_inversions(&GOAL_CELLS), 0);
        assert!(is_solvable(&GOAL_CELLS));
    }

    #[test]
    fn test_inversions_ignore_blank() {
        // blank placed first would otherwise add 8 comparisons
        let cells = [0, 1, 2, 3, 4, 5, 6, 7, 8];
        assert_eq!(count_inversions(&cells), 0);
    }

    #[test]
    fn test_swapped_pair_is_not_solvable() {
        let cells = flatten([[1, 2, 3], [4, 5, 6], [8, 7, 0]]);
        assert_eq!(count_inversions(&cells), 1);
        assert!(!is_solvable(&cells));
    }

    #[test]
    fn test_known_hard_instance_is_solvable() {
        let cells = flatten([[8, 6, 7], [2, 5, 4], [3, 0, 1]]);
        assert!(is_solvable(&cells));
    }

    #[test]
    fn test_reversed_board_inversions() {
        let cells = flatten([[8, 7, 6], [5, 4, 3], [2, 1, 0]]);
        assert_eq!(count_inversions(&cells), 28);
        assert!(is_solvable(&cells));
    }

    /// Horizontal moves keep the tile order; vertical moves hop one tile over
    /// two others, changing the count by -2, 0 or +2.
    #[test]
    fn test_parity_is_invariant_under_moves() {
        let mut frontier = vec![
            Grid::GOAL,
            Grid::from_rows([[1, 2, 3], [4, 5, 6], [8, 7, 0]]).unwrap(),
        ];
        let mut visited = Vec::new();

        for _ in 0..6 {
            let mut next = Vec::new();
            for grid in frontier.drain(..) {
                let parity = count_inversions(grid.cells()) % 2;
                for action in grid.legal_actions() {
                    let child = grid.apply(action).unwrap();
                    let child_inversions = count_inversions(child.cells());
                    assert_eq!(
                        child_inversions % 2,
                        parity,
                        "{action:?} flipped parity of {grid:?}"
                    );
                    assert_eq!(is_solvable(child.cells()), is_solvable(grid.cells()));

                    let delta = child_inversions as isize
                        - count_inversions(grid.cells()) as isize;
                    match action {
                        Action::Left | Action::Right => {
                            assert_eq!(delta, 0)
                        }
                        Action::Up | Action::Down => {
                            assert!([-2, 0, 2].contains(&delta), "vertical delta {delta}")
                        }
                    }

                    if !visited.contains(&child) {
                        visited.push(child);
                        next.push(child);
                    }
                }
            }
            frontier = next;
        }
    }
}
