//! MargaNav - incremental grid navigation agent.
//!
//! An agent on a bounded 9×9 grid walks toward a goal whose position and
//! surrounding hazards are revealed one observation batch per turn over a
//! line-based protocol. The core is the replanning engine: a growing
//! hazard model, two interchangeable shortest-path strategies (cached BFS
//! replay and per-turn A*), and a controller that commits exactly one
//! action per turn or reports the shortest known distance / unreachability.

pub mod agent;
pub mod config;
pub mod error;
pub mod grid;
pub mod observe;
pub mod planning;
pub mod protocol;

pub use agent::{Action, AgentController, TurnPhase};
pub use config::{MargaConfig, PlannerConfig, StrategyKind};
pub use error::{MargaError, Result};
pub use grid::{Cell, GridModel, GRID_MAX, GRID_MIN};
pub use observe::{IngestSummary, ObservedObject, TurnRecord};
pub use planning::{shortest_distance, FullPathPlanner, PathPlanner, Planner, SingleStepPlanner};
pub use protocol::Handshake;
