//! Arena-backed search tree.
//!
//! Nodes live in a flat `Vec` and refer to their parent by index, so the
//! tree has no shared ownership and a node is never re-parented. Nodes are
//! immutable once pushed.

use crate::grid::{Action, Grid};

/// Index of a node within its [`SearchTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// A grid together with its path cost, heuristic estimate, and generating move.
#[derive(Debug, Clone, Copy)]
pub struct SearchNode {
    pub grid: Grid,
    /// Moves taken from the root.
    pub g: u32,
    /// Heuristic estimate of the remaining moves (0 for uninformed searches).
    pub h: u32,
    /// Move that produced this node; `None` only for the root.
    pub action: Option<Action>,
    pub parent: Option<NodeId>,
}

impl SearchNode {
    /// Total estimated cost `g + h`.
    #[inline]
    pub fn f(&self) -> u32 {
        self.g + self.h
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Owns every node generated by one search invocation.
#[derive(Debug, Default)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    fn new() -> Self {
        Self::default()
    }

    /// Creates a tree whose single node is the root for `grid`.
    pub fn with_root(grid: Grid, h: u32) -> (Self, NodeId) {
        let mut tree = Self::new();
        let root = tree.push(SearchNode {
            grid,
            g: 0,
            h,
            action: None,
            parent: None,
        });
        (tree, root)
    }

    /// Adds the child reached from `parent` via `action`.
    pub fn add_child(&mut self, parent: NodeId, action: Action, grid: Grid, h: u32) -> NodeId {
        let g = self.nodes[parent.0].g + 1;
        self.push(SearchNode {
            grid,
            g,
            h,
            action: Some(action),
            parent: Some(parent),
        })
    }

    fn push(&mut self, node: SearchNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    /// Number of nodes generated so far, the root included.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Nodes in insertion order.
    #[cfg(test)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = &SearchNode> {
        self.nodes.iter()
    }

    /// Iterates from `id` up to the root, `id` first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: Some(id),
        }
    }
}

/// Iterator over a node and its ancestors, walking parent links.
pub struct Ancestors<'a> {
    tree: &'a SearchTree,
    next: Option<NodeId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a SearchNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.tree.get(self.next?);
        self.next = node.parent;
        Some(node)
    }
}

/// Root-to-goal action sequence and its cost (the number of moves).
pub fn reconstruct(tree: &SearchTree, goal: NodeId) -> (Vec<Action>, usize) {
    let mut actions: Vec<Action> = tree
        .ancestors(goal)
        .filter_map(|node| node.action)
        .collect();
    actions.reverse();
    let cost = actions.len();
    (actions, cost)
}

/// Every grid on the path from the root to `goal`, both ends included.
pub fn trace(tree: &SearchTree, goal: NodeId) -> Vec<Grid> {
    let mut grids: Vec<Grid> = tree.ancestors(goal).map(|node| node.grid).collect();
    grids.reverse();
    grids
}
