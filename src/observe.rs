//! Observation record parsing and ingestion.
//!
//! Each turn the environment reports a batch of `x y SYMBOL` records.
//! Hazard-class symbols fold into the grid's hazard set; the goal symbol
//! relocates the goal; the collectible symbol is tracked but never routed
//! on. Records within a batch carry no ordering guarantee and ingestion is
//! commutative and idempotent.

use crate::grid::{Cell, GridModel};

/// Object classes that can appear in an observation record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObservedObject {
    /// Any hazard-class object; the cell is unsafe to occupy.
    Hazard,
    /// The goal object.
    Goal,
    /// Secondary collectible; tracked, not used for routing.
    Collectible,
}

/// Classify a symbol token. Returns `None` for unrecognized symbols.
fn classify(symbol: &str) -> Option<ObservedObject> {
    match symbol {
        "P" | "A" | "S" => Some(ObservedObject::Hazard),
        "K" => Some(ObservedObject::Goal),
        "B" => Some(ObservedObject::Collectible),
        _ => None,
    }
}

/// A single parsed observation record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnRecord {
    pub cell: Cell,
    pub object: ObservedObject,
}

impl TurnRecord {
    /// Parse one record line.
    ///
    /// Returns `None` for malformed lines (wrong field count, non-numeric
    /// coordinates) and for unrecognized symbols; neither aborts the turn.
    pub fn parse(line: &str) -> Option<TurnRecord> {
        let mut tokens = line.split_whitespace();
        let x: i32 = tokens.next()?.parse().ok()?;
        let y: i32 = tokens.next()?.parse().ok()?;
        let object = classify(tokens.next()?)?;
        if tokens.next().is_some() {
            return None;
        }
        Some(TurnRecord {
            cell: Cell::new(x, y),
            object,
        })
    }
}

/// Outcome of ingesting one observation batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// The goal was reported at a different cell than previously believed.
    pub goal_moved: bool,
    /// Number of hazards not previously known.
    pub new_hazards: usize,
}

/// Fold a batch of records into the grid model and goal position.
pub fn ingest(
    grid: &mut GridModel,
    goal: &mut Cell,
    collectible: &mut Option<Cell>,
    records: &[TurnRecord],
) -> IngestSummary {
    let mut summary = IngestSummary::default();
    for record in records {
        match record.object {
            ObservedObject::Hazard => {
                if grid.observe_hazard(record.cell) {
                    summary.new_hazards += 1;
                }
            }
            ObservedObject::Goal => {
                if *goal != record.cell {
                    tracing::info!(
                        "Goal relocated: ({}, {}) -> ({}, {})",
                        goal.x,
                        goal.y,
                        record.cell.x,
                        record.cell.y
                    );
                    *goal = record.cell;
                    summary.goal_moved = true;
                }
            }
            ObservedObject::Collectible => {
                if collectible.is_none() {
                    tracing::debug!("Collectible seen at ({}, {})", record.cell.x, record.cell.y);
                }
                *collectible = Some(record.cell);
            }
        }
    }
    summary
}

/// Parse raw record lines, skipping malformed or unrecognized ones.
pub fn parse_batch(lines: &[String]) -> Vec<TurnRecord> {
    lines
        .iter()
        .filter_map(|line| {
            let record = TurnRecord::parse(line);
            if record.is_none() && !line.trim().is_empty() {
                tracing::debug!("Skipping malformed observation record: {:?}", line);
            }
            record
        })
        .collect()
}
