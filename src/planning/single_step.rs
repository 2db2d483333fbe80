//! Single-step planner: search from scratch every turn and commit to only
//! the first step of the result.
//!
//! The search is A* with integer costs: `f = g + h` where `g` is steps
//! taken and `h` the Manhattan distance to the goal. Manhattan distance is
//! admissible here — hazards can only lengthen a route, never shorten it
//! below the unobstructed distance — so the first time the goal is popped
//! the route is length-optimal. Ties on `f` break by insertion order, which
//! keeps the chosen route reproducible. There is no cached state, so there
//! is nothing to invalidate.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::grid::{Cell, GridModel};

use super::Planner;

/// Node in the open set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct SearchNode {
    f_score: i32,
    /// Insertion counter; earlier insertions win f-score ties.
    seq: u64,
    cell: Cell,
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (lower f_score = higher priority)
        other
            .f_score
            .cmp(&self.f_score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Strategy B: per-turn A* planner.
#[derive(Debug, Default)]
pub struct SingleStepPlanner;

impl SingleStepPlanner {
    pub fn new() -> Self {
        Self
    }

    /// A* search returning the first step of a length-optimal route.
    ///
    /// `from` must differ from `goal`; the controller handles arrival
    /// before planning.
    fn search(grid: &GridModel, from: Cell, goal: Cell) -> Option<Cell> {
        let mut open: BinaryHeap<SearchNode> = BinaryHeap::new();
        let mut g_score: HashMap<Cell, i32> = HashMap::new();
        let mut parent: HashMap<Cell, Cell> = HashMap::new();
        let mut closed: HashSet<Cell> = HashSet::new();
        let mut seq: u64 = 0;

        g_score.insert(from, 0);
        open.push(SearchNode {
            f_score: from.manhattan_distance(&goal),
            seq,
            cell: from,
        });

        while let Some(node) = open.pop() {
            let current = node.cell;

            // A finalized cell is never re-expanded; with uniform edge
            // weights and an admissible heuristic its g-score is optimal.
            if !closed.insert(current) {
                continue;
            }

            if current == goal {
                return Some(first_step(&parent, from, goal));
            }

            let current_g = g_score[&current];

            for neighbor in grid.neighbors(current) {
                if closed.contains(&neighbor) {
                    continue;
                }
                let tentative_g = current_g + 1;
                if tentative_g < *g_score.get(&neighbor).unwrap_or(&i32::MAX) {
                    g_score.insert(neighbor, tentative_g);
                    parent.insert(neighbor, current);
                    seq += 1;
                    open.push(SearchNode {
                        f_score: tentative_g + neighbor.manhattan_distance(&goal),
                        seq,
                        cell: neighbor,
                    });
                }
            }
        }

        None
    }
}

/// Walk the parent map back from the goal to the node adjacent to `from`.
fn first_step(parent: &HashMap<Cell, Cell>, from: Cell, goal: Cell) -> Cell {
    let mut current = goal;
    loop {
        match parent.get(&current) {
            Some(&p) if p == from => return current,
            Some(&p) => current = p,
            // from == goal is excluded by the caller; the chain always
            // terminates at from.
            None => return current,
        }
    }
}

impl Planner for SingleStepPlanner {
    fn next_step(&mut self, grid: &GridModel, from: Cell, goal: Cell) -> Option<Cell> {
        Self::search(grid, from, goal)
    }

    fn invalidate(&mut self) {
        // Nothing cached, nothing to invalidate.
    }
}
