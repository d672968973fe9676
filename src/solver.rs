//! State-space search over 8-puzzle grids.
//!
//! Three interchangeable strategies share one contract: start from a root
//! grid, return the node whose grid is the goal, or report that the frontier
//! ran dry. Key points:
//! - Nodes live in a [`SearchTree`] arena; parents are indices
//! - Duplicate states are detected through the packed `u64` grid key in an
//!   `FxHashSet`
//! - Every expansion passes through a [`Budget`] that enforces the expansion
//!   limit and the cancellation flag

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;

use log::{debug, info, trace};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{Error, Result};
use crate::grid::{flatten, Action, Grid, GridKey, DIM};
use crate::node::{reconstruct, trace as trace_path, NodeId, SearchTree};
use crate::solvability::{is_solvable, is_valid_permutation};

/// Search strategy selectable by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum Algorithm {
    /// Breadth-first search; returns a shortest path.
    #[default]
    Bfs,
    /// Depth-first search; any path, usually a long one.
    Dfs,
    /// A* ordered by `f = g + h`.
    #[value(name = "astar", alias = "a*")]
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Bfs, Algorithm::Dfs, Algorithm::AStar];

    /// Returns the strategy implementing this algorithm.
    pub fn strategy(self, heuristic: Heuristic) -> Box<dyn Strategy> {
        match self {
            Algorithm::Bfs => Box::new(BreadthFirst),
            Algorithm::Dfs => Box::new(DepthFirst),
            Algorithm::AStar => Box::new(AStar { heuristic }),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::Bfs => "BFS",
            Algorithm::Dfs => "DFS",
            Algorithm::AStar => "A*",
        };
        write!(f, "{name}")
    }
}

/// Remaining-cost estimate used by A*.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum Heuristic {
    /// Sum of per-tile Manhattan distances. Admissible and consistent.
    #[default]
    Manhattan,
    /// Count of tiles off their goal cell. Admissible, weaker.
    Misplaced,
}

impl Heuristic {
    #[inline]
    pub fn estimate(self, grid: &Grid) -> u32 {
        match self {
            Heuristic::Manhattan => grid.manhattan(),
            Heuristic::Misplaced => grid.misplaced(),
        }
    }
}

/// Work limits applied to one search invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Stop with [`Error::BudgetExhausted`] after this many expansions.
    pub max_expansions: Option<usize>,
}

/// Shared flag a caller can set to stop a running search.
///
/// Cloning yields a handle to the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, AtomicOrdering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(AtomicOrdering::Relaxed)
    }
}

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes taken off the frontier and expanded (the goal node is not counted).
    pub expanded: usize,
    /// Nodes added to the search tree, the root included.
    pub generated: usize,
    /// Largest frontier size observed.
    pub max_frontier: usize,
}

/// Tracks progress of one search and enforces its limits.
#[derive(Debug)]
pub struct Budget {
    limits: SearchLimits,
    cancel: Option<CancelToken>,
    stats: SearchStats,
}

impl Budget {
    pub fn new(limits: SearchLimits, cancel: Option<CancelToken>) -> Self {
        Self {
            limits,
            cancel,
            stats: SearchStats::default(),
        }
    }

    /// Unlimited, uncancellable budget.
    pub fn unlimited() -> Self {
        Self::new(SearchLimits::default(), None)
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Charges one expansion, failing if cancelled or out of budget.
    fn expand(&mut self) -> Result<()> {
        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            return Err(Error::Cancelled {
                expanded: self.stats.expanded,
            });
        }
        if let Some(limit) = self.limits.max_expansions {
            if self.stats.expanded >= limit {
                return Err(Error::BudgetExhausted { limit });
            }
        }
        self.stats.expanded += 1;
        Ok(())
    }

    #[inline]
    fn generated(&mut self) {
        self.stats.generated += 1;
    }

    #[inline]
    fn observe_frontier(&mut self, len: usize) {
        self.stats.max_frontier = self.stats.max_frontier.max(len);
    }

    fn no_solution(&self) -> Error {
        Error::NoSolutionFound {
            expanded: self.stats.expanded,
        }
    }
}

/// A search strategy: explores from `root` until it reaches the goal grid.
///
/// Returns the tree it built and the id of the goal node within it.
pub trait Strategy {
    fn search(&self, root: Grid, budget: &mut Budget) -> Result<(SearchTree, NodeId)>;
}

/// Frontier discipline for the uninformed searches.
trait Frontier: Default {
    fn push(&mut self, id: NodeId);
    fn pop(&mut self) -> Option<NodeId>;
    fn len(&self) -> usize;
}

/// FIFO queue.
impl Frontier for VecDeque<NodeId> {
    fn push(&mut self, id: NodeId) {
        self.push_back(id);
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.pop_front()
    }

    fn len(&self) -> usize {
        VecDeque::len(self)
    }
}

/// LIFO stack.
impl Frontier for Vec<NodeId> {
    fn push(&mut self, id: NodeId) {
        Vec::push(self, id);
    }

    fn pop(&mut self) -> Option<NodeId> {
        Vec::pop(self)
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }
}

/// Shared loop for BFS and DFS.
///
/// A child is enqueued only if its grid has never been seen, i.e. it is in
/// neither the frontier nor the explored set. A state leaves the frontier
/// only to enter the explored set, so one "discovered" set is their union.
fn uninformed_search<F: Frontier>(root: Grid, budget: &mut Budget) -> Result<(SearchTree, NodeId)> {
    let (mut tree, root_id) = SearchTree::with_root(root, 0);
    budget.generated();

    let mut frontier = F::default();
    frontier.push(root_id);
    budget.observe_frontier(frontier.len());

    let mut discovered: FxHashSet<GridKey> = FxHashSet::default();
    discovered.insert(root.key());

    while let Some(current) = frontier.pop() {
        let grid = tree.get(current).grid;
        if grid.is_goal() {
            return Ok((tree, current));
        }

        budget.expand()?;
        trace!("expanding g={} blank={:?}", tree.get(current).g, grid.blank());

        for action in grid.legal_actions() {
            let child = grid.apply(action)?;
            if discovered.insert(child.key()) {
                frontier.push(tree.add_child(current, action, child, 0));
                budget.generated();
            }
        }
        budget.observe_frontier(frontier.len());
    }

    Err(budget.no_solution())
}

/// Breadth-first search over a FIFO frontier.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreadthFirst;

impl Strategy for BreadthFirst {
    fn search(&self, root: Grid, budget: &mut Budget) -> Result<(SearchTree, NodeId)> {
        uninformed_search::<VecDeque<NodeId>>(root, budget)
    }
}

/// Depth-first search over a LIFO frontier.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthFirst;

impl Strategy for DepthFirst {
    fn search(&self, root: Grid, budget: &mut Budget) -> Result<(SearchTree, NodeId)> {
        uninformed_search::<Vec<NodeId>>(root, budget)
    }
}

/// Open-list entry for A*, ordered so `BinaryHeap` pops the smallest `f`.
///
/// Among equal `f`, the node inserted first wins. Arena indices grow with
/// every insertion, so the node id doubles as the insertion sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenEntry {
    f: u32,
    id: NodeId,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed on both keys: BinaryHeap is a max-heap
        other.f.cmp(&self.f).then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* search.
///
/// Duplicate policy: a child whose state is already closed is dropped. A
/// child whose state is already open re-enters the open list only with a
/// strictly lower `g`; the superseded entry is skipped when popped. Closed
/// states are never reopened, so the result is optimal only for consistent
/// heuristics (both provided ones are).
#[derive(Debug, Clone, Copy, Default)]
pub struct AStar {
    pub heuristic: Heuristic,
}

impl Strategy for AStar {
    fn search(&self, root: Grid, budget: &mut Budget) -> Result<(SearchTree, NodeId)> {
        let (mut tree, root_id) = SearchTree::with_root(root, self.heuristic.estimate(&root));
        budget.generated();

        let mut open = BinaryHeap::new();
        open.push(OpenEntry {
            f: tree.get(root_id).f(),
            id: root_id,
        });
        budget.observe_frontier(open.len());

        // cheapest g among the open entries of each state
        let mut open_g: FxHashMap<GridKey, u32> = FxHashMap::default();
        open_g.insert(root.key(), 0);
        let mut closed: FxHashSet<GridKey> = FxHashSet::default();

        while let Some(entry) = open.pop() {
            let node = *tree.get(entry.id);
            let key = node.grid.key();
            if !closed.insert(key) {
                // superseded by a cheaper copy
                continue;
            }
            open_g.remove(&key);

            if node.grid.is_goal() {
                return Ok((tree, entry.id));
            }

            budget.expand()?;
            // every expansion closes a state not closed before
            debug_assert_eq!(closed.len(), budget.stats().expanded);
            trace!("expanding f={} g={} h={}", node.f(), node.g, node.h);

            let g = node.g + 1;
            for action in node.grid.legal_actions() {
                let child = node.grid.apply(action)?;
                let child_key = child.key();
                if closed.contains(&child_key) {
                    continue;
                }
                if open_g.get(&child_key).is_some_and(|&existing| existing <= g) {
                    continue;
                }

                open_g.insert(child_key, g);
                let id = tree.add_child(entry.id, action, child, self.heuristic.estimate(&child));
                open.push(OpenEntry {
                    f: tree.get(id).f(),
                    id,
                });
                budget.generated();
            }
            budget.observe_frontier(open.len());
        }

        Err(budget.no_solution())
    }
}

/// Outcome category of a [`solve`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Solvable,
    NotSolvable,
    /// The input was not a permutation of `0..=8`.
    Invalid,
}

/// Result of solving one puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub status: Status,
    /// Blank moves from the initial grid to the goal; empty unless solvable.
    pub actions: Vec<Action>,
    /// Number of moves in `actions`.
    pub cost: usize,
    /// Grids visited along the path, initial and goal included.
    pub path: Vec<Grid>,
    pub stats: SearchStats,
}

impl Solution {
    fn unsolved(status: Status) -> Self {
        Self {
            status,
            actions: Vec::new(),
            cost: 0,
            path: Vec::new(),
            stats: SearchStats::default(),
        }
    }

    pub fn is_solved(&self) -> bool {
        self.status == Status::Solvable
    }
}

/// Solver settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverConfig {
    pub algorithm: Algorithm,
    pub heuristic: Heuristic,
    pub limits: SearchLimits,
}

/// Validates, gates on solvability, then runs the configured strategy.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
    cancel: Option<CancelToken>,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Makes the search observe `token`.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Solves a raw 3x3 grid.
    ///
    /// Malformed and unsolvable inputs come back as `Ok` with the matching
    /// [`Status`] and no search performed.
    pub fn solve(&self, rows: [[u8; DIM]; DIM]) -> Result<Solution> {
        let cells = flatten(rows);
        if !is_valid_permutation(&cells) {
            info!("invalid puzzle values: {cells:?}");
            return Ok(Solution::unsolved(Status::Invalid));
        }
        self.solve_grid(&Grid::new(cells)?)
    }

    /// Solves an already validated grid.
    pub fn solve_grid(&self, grid: &Grid) -> Result<Solution> {
        if !is_solvable(grid.cells()) {
            info!("puzzle is not solvable");
            return Ok(Solution::unsolved(Status::NotSolvable));
        }

        let SolverConfig {
            algorithm,
            heuristic,
            limits,
        } = self.config;
        debug!("starting {algorithm} search (heuristic {heuristic:?}, limits {limits:?})");

        let mut budget = Budget::new(limits, self.cancel.clone());
        let (tree, goal) = algorithm.strategy(heuristic).search(*grid, &mut budget)?;
        let (actions, cost) = reconstruct(&tree, goal);
        let stats = budget.stats();

        debug!(
            "{algorithm} search finished: {} expanded, {} generated, peak frontier {}",
            stats.expanded, stats.generated, stats.max_frontier
        );
        info!("{algorithm} found a {cost}-move solution");

        Ok(Solution {
            status: Status::Solvable,
            actions,
            cost,
            path: trace_path(&tree, goal),
            stats,
        })
    }
}

/// Solves `rows` with `algorithm` and default settings.
pub fn solve(rows: [[u8; DIM]; DIM], algorithm: Algorithm) -> Result<Solution> {
    Solver::new(SolverConfig {
        algorithm,
        ..SolverConfig::default()
    })
    .solve(rows)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    const HARDEST: [[u8; 3]; 3] = [[8, 6, 7], [2, 5, 4], [3, 0, 1]];

    /// Exact distance to the goal for every grid within `depth` moves of it.
    fn distances_from_goal(depth: u32) -> HashMap<Grid, u32> {
        let mut distances = HashMap::from([(Grid::GOAL, 0)]);
        let mut layer = vec![Grid::GOAL];
        for distance in 1..=depth {
            let mut next = Vec::new();
            for grid in &layer {
                for action in grid.legal_actions() {
                    let child = grid.apply(action).unwrap();
                    if !distances.contains_key(&child) {
                        distances.insert(child, distance);
                        next.push(child);
                    }
                }
            }
            layer = next;
        }
        distances
    }

    /// Replays `actions` from `start` and returns the final grid.
    fn replay(start: &Grid, actions: &[Action]) -> Grid {
        actions
            .iter()
            .fold(*start, |grid, &action| grid.apply(action).unwrap())
    }

    fn solve_with(grid: &Grid, algorithm: Algorithm) -> Solution {
        Solver::new(SolverConfig {
            algorithm,
            ..SolverConfig::default()
        })
        .solve_grid(grid)
        .unwrap()
    }

    #[test]
    fn test_goal_input_needs_no_moves() {
        for algorithm in Algorithm::ALL {
            let solution = solve([[1, 2, 3], [4, 5, 6], [7, 8, 0]], algorithm).unwrap();
            assert_eq!(solution.status, Status::Solvable, "{algorithm}");
            assert!(solution.actions.is_empty(), "{algorithm}");
            assert_eq!(solution.cost, 0, "{algorithm}");
            assert_eq!(solution.path, vec![Grid::GOAL]);
            assert_eq!(solution.stats.expanded, 0);
            assert_eq!(solution.stats.max_frontier, 1, "{algorithm}");
        }
    }

    #[test]
    fn test_one_move_from_goal() {
        for algorithm in Algorithm::ALL {
            let solution = solve([[1, 2, 3], [4, 5, 0], [7, 8, 6]], algorithm).unwrap();
            assert_eq!(solution.status, Status::Solvable);
            if algorithm != Algorithm::Dfs {
                assert_eq!(solution.actions, vec![Action::Down], "{algorithm}");
                assert_eq!(solution.cost, 1, "{algorithm}");
            }
            assert_eq!(solution.cost, solution.actions.len());
            assert_eq!(solution.path.last(), Some(&Grid::GOAL));
        }
    }

    #[test]
    fn test_odd_inversions_are_not_solvable() {
        for algorithm in Algorithm::ALL {
            let solution = solve([[1, 2, 3], [4, 5, 6], [8, 7, 0]], algorithm).unwrap();
            assert_eq!(solution.status, Status::NotSolvable);
            assert!(solution.actions.is_empty());
            assert_eq!(solution.cost, 0);
            assert_eq!(solution.stats, SearchStats::default(), "search must not run");
        }
    }

    #[test]
    fn test_non_permutation_is_invalid() {
        // two 5s and no 3
        let solution = solve([[1, 2, 5], [4, 5, 6], [7, 8, 0]], Algorithm::Bfs).unwrap();
        assert_eq!(solution.status, Status::Invalid);
        assert!(solution.actions.is_empty());
        assert_eq!(solution.stats, SearchStats::default());
    }

    #[test]
    fn test_invalid_takes_precedence_over_parity() {
        let solution = solve([[9, 2, 3], [4, 5, 6], [7, 8, 0]], Algorithm::AStar).unwrap();
        assert_eq!(solution.status, Status::Invalid);
    }

    #[test]
    fn test_bfs_matches_brute_force_minimum() {
        let distances = distances_from_goal(5);
        for (grid, &expected) in &distances {
            let solution = solve_with(grid, Algorithm::Bfs);
            assert_eq!(solution.cost as u32, expected, "BFS not minimal for {grid:?}");
            assert!(replay(grid, &solution.actions).is_goal());
        }
    }

    #[test]
    fn test_astar_matches_bfs_cost() {
        let distances = distances_from_goal(14);
        let mut battery: Vec<Grid> = distances
            .iter()
            .filter(|&(_, &d)| d == 8 || d == 11 || d == 14)
            .map(|(grid, _)| *grid)
            .collect();
        battery.sort_by_key(Grid::key);
        battery.truncate(40);
        assert!(!battery.is_empty());

        for grid in &battery {
            let bfs = solve_with(grid, Algorithm::Bfs);
            let astar = solve_with(grid, Algorithm::AStar);
            assert_eq!(astar.cost, bfs.cost, "A* and BFS disagree on {grid:?}");
            assert_eq!(astar.cost as u32, distances[grid]);
            assert!(replay(grid, &astar.actions).is_goal());
        }
    }

    #[test]
    fn test_misplaced_heuristic_is_also_optimal() {
        let distances = distances_from_goal(10);
        let solver = Solver::new(SolverConfig {
            algorithm: Algorithm::AStar,
            heuristic: Heuristic::Misplaced,
            ..SolverConfig::default()
        });
        for (grid, &expected) in distances.iter().filter(|&(_, &d)| d == 10).take(10) {
            let solution = solver.solve_grid(grid).unwrap();
            assert_eq!(solution.cost as u32, expected);
        }
    }

    #[test]
    fn test_hardest_instance() {
        let grid = Grid::from_rows(HARDEST).unwrap();
        let astar = solve_with(&grid, Algorithm::AStar);
        assert_eq!(astar.cost, 31);

        let bfs = solve_with(&grid, Algorithm::Bfs);
        assert_eq!(bfs.cost, 31);
        assert!(astar.stats.expanded < bfs.stats.expanded);
    }

    #[test]
    fn test_dfs_returns_a_valid_path() {
        let distances = distances_from_goal(6);
        for grid in distances.keys().take(20) {
            let solution = solve_with(grid, Algorithm::Dfs);
            assert_eq!(solution.status, Status::Solvable);
            assert_eq!(solution.cost, solution.actions.len());
            assert!(replay(grid, &solution.actions).is_goal());
            assert_eq!(solution.path.len(), solution.cost + 1);
        }
    }

    #[test]
    fn test_path_matches_actions() {
        let grid = Grid::from_rows([[4, 1, 3], [7, 2, 5], [0, 8, 6]]).unwrap();
        let solution = solve_with(&grid, Algorithm::AStar);
        assert_eq!(solution.cost, 6);
        for (step, action) in solution.actions.iter().enumerate() {
            assert_eq!(solution.path[step].apply(*action).unwrap(), solution.path[step + 1]);
        }
    }

    #[test]
    fn test_expansion_budget_is_enforced() {
        let solver = Solver::new(SolverConfig {
            algorithm: Algorithm::Bfs,
            limits: SearchLimits {
                max_expansions: Some(10),
            },
            ..SolverConfig::default()
        });
        let result = solver.solve(HARDEST);
        assert!(matches!(result, Err(Error::BudgetExhausted { limit: 10 })));
    }

    #[test]
    fn test_zero_budget_still_accepts_goal_root() {
        let solver = Solver::new(SolverConfig {
            limits: SearchLimits {
                max_expansions: Some(0),
            },
            ..SolverConfig::default()
        });
        let solution = solver.solve_grid(&Grid::GOAL).unwrap();
        assert_eq!(solution.cost, 0);
    }

    #[test]
    fn test_cancelled_search_stops() {
        let token = CancelToken::new();
        token.cancel();
        let solver = Solver::new(SolverConfig::default()).with_cancel_token(token.clone());
        let result = solver.solve(HARDEST);
        assert!(matches!(result, Err(Error::Cancelled { expanded: 0 })));
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_cancel_from_another_thread_stops_running_search() {
        // bypasses the parity gate so the search has 181_440 states to visit
        let grid = Grid::from_rows([[1, 2, 3], [4, 5, 6], [8, 7, 0]]).unwrap();
        let token = CancelToken::new();
        let result = std::thread::scope(|scope| {
            let canceller = token.clone();
            scope.spawn(move || {
                std::thread::sleep(std::time::Duration::from_millis(5));
                canceller.cancel();
            });
            let mut budget = Budget::new(SearchLimits::default(), Some(token.clone()));
            BreadthFirst.search(grid, &mut budget).map(|_| ())
        });
        match result {
            Err(Error::Cancelled { expanded }) => {
                assert!(expanded > 0);
                assert!(expanded < 181_440);
            }
            other => panic!("expected cancellation, got {other:?}"),
        }
    }

    #[test]
    fn test_astar_cheaper_rediscovery_is_not_expanded_twice() {
        let instances = [
            HARDEST,
            [[4, 1, 3], [7, 2, 5], [0, 8, 6]],
            [[6, 4, 7], [8, 5, 0], [3, 2, 1]],
        ];
        let mut reentries = 0;
        for rows in instances {
            for heuristic in [Heuristic::Manhattan, Heuristic::Misplaced] {
                let grid = Grid::from_rows(rows).unwrap();
                let mut budget = Budget::unlimited();
                let (tree, goal) = AStar { heuristic }.search(grid, &mut budget).unwrap();

                // a state stored more than once was re-entered with a lower g
                let mut copies: HashMap<GridKey, Vec<u32>> = HashMap::new();
                for node in tree.iter() {
                    copies.entry(node.grid.key()).or_default().push(node.g);
                }
                for costs in copies.values() {
                    assert!(costs.windows(2).all(|pair| pair[1] < pair[0]), "{costs:?}");
                }
                reentries += tree.len() - copies.len();

                let stats = budget.stats();
                assert_eq!(stats.generated, tree.len());
                assert!(stats.expanded < copies.len());
                assert_eq!(reconstruct(&tree, goal).1 as u32, tree.get(goal).g);
            }
        }
        assert!(reentries > 0);
    }

    #[test]
    fn test_unsolvable_root_exhausts_frontier() {
        // bypasses the parity gate on purpose
        let grid = Grid::from_rows([[1, 2, 3], [4, 5, 6], [8, 7, 0]]).unwrap();
        let mut budget = Budget::unlimited();
        let result = BreadthFirst.search(grid, &mut budget);
        assert!(matches!(result, Err(Error::NoSolutionFound { .. })));
        // every state of the odd-parity half is expanded exactly once
        assert_eq!(budget.stats().expanded, 181_440);
    }

    #[test]
    fn test_open_entry_orders_by_f_then_insertion() {
        let (mut tree, root) = SearchTree::with_root(Grid::GOAL, 0);
        let child = Grid::GOAL.apply(Action::Up).unwrap();
        let later = tree.add_child(root, Action::Up, child, 0);

        let mut open = BinaryHeap::new();
        open.push(OpenEntry { f: 5, id: later });
        open.push(OpenEntry { f: 5, id: root });
        open.push(OpenEntry { f: 7, id: root });
        open.push(OpenEntry { f: 3, id: later });

        let popped: Vec<_> = std::iter::from_fn(|| open.pop()).map(|e| (e.f, e.id)).collect();
        assert_eq!(popped, vec![(3, later), (5, root), (5, later), (7, root)]);
    }

    #[test]
    fn test_concurrent_searches_share_a_grid() {
        let grid = Grid::from_rows([[4, 1, 3], [7, 2, 5], [0, 8, 6]]).unwrap();
        let solutions: Vec<Solution> = std::thread::scope(|scope| {
            let handles: Vec<_> = Algorithm::ALL
                .iter()
                .map(|&algorithm| scope.spawn(move || solve_with(&grid, algorithm)))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(solutions[0].cost, 6);
        assert_eq!(solutions[2].cost, 6);
        assert!(replay(&grid, &solutions[1].actions).is_goal());
    }

    #[test]
    fn test_algorithm_names() {
        let names: Vec<String> = Algorithm::ALL.iter().map(|a| a.to_string()).collect();
        assert_eq!(names, ["BFS", "DFS", "A*"]);
    }
}
