//! Grid cells and the partial world model.
//!
//! The world is a fixed 9×9 grid. Hazard knowledge accumulates over the
//! run: cells are only ever added to the hazard set, never removed, so a
//! cell that was legal last turn can become illegal but not the reverse.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Inclusive lower coordinate bound.
pub const GRID_MIN: i32 = 0;
/// Inclusive upper coordinate bound.
pub const GRID_MAX: i32 = 8;

/// Grid coordinates (integer cell indices)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    /// Create a new cell coordinate
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The agent's starting cell.
    pub const ORIGIN: Cell = Cell { x: 0, y: 0 };

    /// Manhattan distance to another cell
    #[inline]
    pub fn manhattan_distance(&self, other: &Cell) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// The 4 cardinal neighbors (N, E, S, W), unfiltered
    #[inline]
    pub fn neighbors_4(&self) -> [Cell; 4] {
        [
            Cell::new(self.x, self.y + 1), // North
            Cell::new(self.x + 1, self.y), // East
            Cell::new(self.x, self.y - 1), // South
            Cell::new(self.x - 1, self.y), // West
        ]
    }
}

/// Partial model of the grid: fixed bounds plus the hazards observed so far.
#[derive(Clone, Debug, Default)]
pub struct GridModel {
    hazards: HashSet<Cell>,
}

impl GridModel {
    /// Create an empty model (no hazards known yet).
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a cell lies within the grid bounds.
    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        (GRID_MIN..=GRID_MAX).contains(&cell.x) && (GRID_MIN..=GRID_MAX).contains(&cell.y)
    }

    /// Check whether a cell is known to be hazardous.
    #[inline]
    pub fn is_hazard(&self, cell: Cell) -> bool {
        self.hazards.contains(&cell)
    }

    /// Check whether a cell may be occupied: in bounds and not a known hazard.
    #[inline]
    pub fn is_legal(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && !self.is_hazard(cell)
    }

    /// Record an observed hazard. Idempotent; returns true if the cell was new.
    pub fn observe_hazard(&mut self, cell: Cell) -> bool {
        self.hazards.insert(cell)
    }

    /// Number of hazards observed so far.
    pub fn hazard_count(&self) -> usize {
        self.hazards.len()
    }

    /// Legal cardinal neighbors of a cell, in fixed N, E, S, W order.
    ///
    /// The order is deterministic so that tie-breaks among equal-cost
    /// routes are reproducible across runs.
    pub fn neighbors(&self, cell: Cell) -> Vec<Cell> {
        cell.neighbors_4()
            .into_iter()
            .filter(|&c| self.is_legal(c))
            .collect()
    }
}
