//! Full-path planner: compute a complete shortest route once, then replay
//! it one step per turn until it is invalidated.
//!
//! The route is found with breadth-first search (uniform edge weights make
//! the first-discovered path shortest) and cached as a [`Plan`]. The cached
//! plan survives across turns as long as every remaining cell is still
//! hazard-free and its terminal cell still matches the goal; any violation
//! forces a full replan.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::grid::{Cell, GridModel};

use super::Planner;

/// A cached route from start (inclusive) to goal (inclusive), plus a cursor
/// pointing at the next unconsumed step.
#[derive(Clone, Debug)]
pub struct Plan {
    cells: Vec<Cell>,
    cursor: usize,
}

impl Plan {
    fn new(cells: Vec<Cell>) -> Self {
        // cells[0] is the start the agent already occupies
        Self { cells, cursor: 1 }
    }

    /// Next unconsumed step, if any remain.
    pub fn next_cell(&self) -> Option<Cell> {
        self.cells.get(self.cursor).copied()
    }

    /// Consume one step.
    fn advance(&mut self) {
        self.cursor += 1;
    }

    /// The route's terminal cell.
    pub fn terminal(&self) -> Option<Cell> {
        self.cells.last().copied()
    }

    /// A plan is valid while every cell in it is hazard-free and the route
    /// still ends at the current goal.
    pub fn is_valid(&self, grid: &GridModel, goal: Cell) -> bool {
        self.terminal() == Some(goal) && self.cells.iter().all(|&cell| grid.is_legal(cell))
    }
}

/// BFS route from `from` to `goal` over the currently legal cells.
///
/// Each cell is enqueued at most once; the parent map reconstructs the
/// first-discovered (shortest) route. Returns `None` on exhaustion.
fn plan_route(grid: &GridModel, from: Cell, goal: Cell) -> Option<Vec<Cell>> {
    if from == goal {
        return Some(vec![from]);
    }

    let mut visited: HashSet<Cell> = HashSet::new();
    let mut parent: HashMap<Cell, Cell> = HashMap::new();
    let mut queue: VecDeque<Cell> = VecDeque::new();
    visited.insert(from);
    queue.push_back(from);

    while let Some(cell) = queue.pop_front() {
        for neighbor in grid.neighbors(cell) {
            if !visited.insert(neighbor) {
                continue;
            }
            parent.insert(neighbor, cell);
            if neighbor == goal {
                return Some(reconstruct_route(&parent, from, goal));
            }
            queue.push_back(neighbor);
        }
    }

    None
}

/// Walk the parent map back from the goal and reverse.
fn reconstruct_route(parent: &HashMap<Cell, Cell>, from: Cell, goal: Cell) -> Vec<Cell> {
    let mut route = vec![goal];
    let mut current = goal;
    while current != from {
        current = parent[&current];
        route.push(current);
    }
    route.reverse();
    route
}

/// Strategy A: cache-and-replay BFS planner.
#[derive(Debug, Default)]
pub struct FullPathPlanner {
    plan: Option<Plan>,
}

impl FullPathPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached plan, if one is held.
    pub fn cached_plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }
}

impl Planner for FullPathPlanner {
    fn next_step(&mut self, grid: &GridModel, from: Cell, goal: Cell) -> Option<Cell> {
        let reusable = self
            .plan
            .as_ref()
            .is_some_and(|plan| plan.is_valid(grid, goal) && plan.next_cell().is_some());

        if !reusable {
            if self.plan.is_some() {
                tracing::debug!("Cached plan invalid, replanning");
            }
            self.plan = plan_route(grid, from, goal).map(Plan::new);
        }

        let plan = self.plan.as_mut()?;
        let step = plan.next_cell()?;
        plan.advance();
        Some(step)
    }

    fn invalidate(&mut self) {
        self.plan = None;
    }
}
