//! Path planning strategies.
//!
//! Two interchangeable strategies produce length-optimal routes over the
//! currently known hazard set:
//!
//! - [`FullPathPlanner`]: compute and cache a complete BFS route, replay it
//!   step by step until invalidated.
//! - [`SingleStepPlanner`]: run A* from scratch every turn and commit only
//!   to the first step.
//!
//! They differ in statefulness, not in announced path length.

pub mod distance;
mod full_path;
mod single_step;

pub use distance::shortest_distance;
pub use full_path::{FullPathPlanner, Plan};
pub use single_step::SingleStepPlanner;

use crate::config::StrategyKind;
use crate::grid::{Cell, GridModel};

/// One planning strategy.
pub trait Planner {
    /// Choose the next cell on a shortest known-safe route from `from` to
    /// `goal`, or `None` if no hazard-free route exists.
    fn next_step(&mut self, grid: &GridModel, from: Cell, goal: Cell) -> Option<Cell>;

    /// Drop any cached route state.
    fn invalidate(&mut self);
}

/// Strategy-selected planner.
#[derive(Debug)]
pub enum PathPlanner {
    FullPath(FullPathPlanner),
    SingleStep(SingleStepPlanner),
}

impl PathPlanner {
    /// Construct the planner selected by configuration.
    pub fn from_strategy(strategy: StrategyKind) -> Self {
        match strategy {
            StrategyKind::FullPath => PathPlanner::FullPath(FullPathPlanner::new()),
            StrategyKind::SingleStep => PathPlanner::SingleStep(SingleStepPlanner::new()),
        }
    }
}

impl Planner for PathPlanner {
    fn next_step(&mut self, grid: &GridModel, from: Cell, goal: Cell) -> Option<Cell> {
        match self {
            PathPlanner::FullPath(p) => p.next_step(grid, from, goal),
            PathPlanner::SingleStep(p) => p.next_step(grid, from, goal),
        }
    }

    fn invalidate(&mut self) {
        match self {
            PathPlanner::FullPath(p) => p.invalidate(),
            PathPlanner::SingleStep(p) => p.invalidate(),
        }
    }
}
