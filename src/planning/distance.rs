//! Hazard-aware shortest distances.
//!
//! Breadth-first search over the grid's legal neighborhood. All edges are
//! uniform weight, so the first time a cell is dequeued its distance is
//! final. The search space is at most 81 cells, so termination is
//! guaranteed even when no path exists.

use std::collections::{HashSet, VecDeque};

use crate::grid::{Cell, GridModel};

/// Shortest hazard-free path length between two cells.
///
/// Returns `None` when `to` cannot be reached under the current hazard set.
pub fn shortest_distance(grid: &GridModel, from: Cell, to: Cell) -> Option<i32> {
    if from == to {
        return Some(0);
    }

    let mut visited: HashSet<Cell> = HashSet::new();
    let mut queue: VecDeque<(Cell, i32)> = VecDeque::new();
    visited.insert(from);
    queue.push_back((from, 0));

    while let Some((cell, dist)) = queue.pop_front() {
        for neighbor in grid.neighbors(cell) {
            if !visited.insert(neighbor) {
                continue;
            }
            if neighbor == to {
                return Some(dist + 1);
            }
            queue.push_back((neighbor, dist + 1));
        }
    }

    None
}
