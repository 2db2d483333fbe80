//! Turn-by-turn agent controller.
//!
//! One call to [`AgentController::decide`] handles one turn: ingest the
//! observation batch, validate or invalidate the cached plan, obtain a next
//! step from the planner, and commit exactly one action. A step that turns
//! out to be hazardous at commit time is retried within the same turn (the
//! stale plan is discarded and planning runs again) under a bounded budget,
//! so no turn ever emits more than one action and no emitted move enters a
//! known hazard.

use crate::config::PlannerConfig;
use crate::grid::{Cell, GridModel};
use crate::observe::{self, TurnRecord};
use crate::planning::{shortest_distance, PathPlanner, Planner};

/// The single action committed for a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Move to (and occupy) the given cell.
    Move(Cell),
    /// Terminate, reporting the shortest known hazard-free distance from
    /// the origin to the goal; `None` when no such path exists.
    Finish(Option<i32>),
}

/// Phase of the per-turn state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnPhase {
    /// Waiting for the next observation batch
    AwaitingObservation,
    /// Batch ingested, choosing an action
    Planning,
    /// A move was committed this turn
    Moving,
    /// A terminal action was emitted; no further turns
    Terminated,
}

/// The agent: owns the grid model, goal belief, position, and planner.
pub struct AgentController {
    grid: GridModel,
    position: Cell,
    goal: Cell,
    /// Collectible position, tracked but never consulted for routing.
    collectible: Option<Cell>,
    planner: PathPlanner,
    max_replans_per_turn: usize,
    phase: TurnPhase,
}

impl AgentController {
    /// Create an agent at the origin with the handshake goal belief.
    pub fn new(goal: Cell, config: &PlannerConfig) -> Self {
        Self {
            grid: GridModel::new(),
            position: Cell::ORIGIN,
            goal,
            collectible: None,
            planner: PathPlanner::from_strategy(config.strategy),
            max_replans_per_turn: config.max_replans_per_turn,
            phase: TurnPhase::AwaitingObservation,
        }
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    pub fn goal(&self) -> Cell {
        self.goal
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    pub fn is_terminated(&self) -> bool {
        self.phase == TurnPhase::Terminated
    }

    /// Process one turn's observation batch and commit one action.
    pub fn decide(&mut self, records: &[TurnRecord]) -> Action {
        let summary = observe::ingest(
            &mut self.grid,
            &mut self.goal,
            &mut self.collectible,
            records,
        );
        self.phase = TurnPhase::Planning;

        if summary.goal_moved {
            self.planner.invalidate();
        }

        // Arrival check precedes planning: the answer is the shortest known
        // distance from the origin, which can itself be unreachable under
        // hazards observed after the walk.
        if self.position == self.goal {
            let distance = shortest_distance(&self.grid, Cell::ORIGIN, self.goal);
            tracing::info!("Goal reached; shortest known distance: {:?}", distance);
            self.phase = TurnPhase::Terminated;
            return Action::Finish(distance);
        }

        for _ in 0..self.max_replans_per_turn {
            match self.planner.next_step(&self.grid, self.position, self.goal) {
                None => {
                    tracing::info!("No hazard-free route to goal");
                    self.phase = TurnPhase::Terminated;
                    return Action::Finish(None);
                }
                Some(step) => {
                    // Commit-time recheck: a step chosen from a cached plan
                    // may have been revealed hazardous this same turn.
                    if self.grid.is_legal(step) && self.position.manhattan_distance(&step) == 1 {
                        self.position = step;
                        self.phase = TurnPhase::Moving;
                        return Action::Move(step);
                    }
                    tracing::warn!(
                        "Stale step ({}, {}) rejected at commit; replanning",
                        step.x,
                        step.y
                    );
                    self.planner.invalidate();
                }
            }
        }

        tracing::warn!("Replan budget exhausted; reporting unreachable");
        self.phase = TurnPhase::Terminated;
        Action::Finish(None)
    }
}
