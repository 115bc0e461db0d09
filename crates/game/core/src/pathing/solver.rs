use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::config::GameConfig;
use crate::grid::{Grid, GridError};
use crate::pathing::MovementRange;
use crate::state::NodeId;

/// Per-node working state for one Dijkstra run.
#[derive(Clone, Copy, Debug)]
struct Scratch {
    distance: u32,
    visited: bool,
    predecessor: Option<NodeId>,
}

impl Scratch {
    const CLEAR: Self = Self {
        distance: u32::MAX,
        visited: false,
        predecessor: None,
    };
}

/// Dijkstra movement-range solver.
///
/// Owns reusable scratch space sized to the grid. Scratch is reset before and
/// after every query, so no state from one query is visible to the next.
#[derive(Clone, Debug)]
pub struct PathSolver {
    scratch: Vec<Scratch>,
    reconstruction_cap: usize,
}

impl PathSolver {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            scratch: Vec::new(),
            reconstruction_cap: config.path_reconstruction_cap,
        }
    }

    /// Computes the reachable set and the weapon-range set from `start`.
    ///
    /// A node is reachable when its accumulated cost is at most
    /// `movement_points`, and in range when that same cost is at most
    /// `weapon_range`. Both checks use the distance from `start`.
    pub fn compute_movement_range(
        &mut self,
        grid: &Grid,
        start: NodeId,
        movement_points: u32,
        weapon_range: u32,
    ) -> Result<MovementRange, GridError> {
        if !grid.contains(start) {
            return Err(GridError::UnknownNode(start));
        }
        self.reset(grid.len());

        let mut reachable = Vec::new();
        let mut in_range = Vec::new();
        let mut frontier = BinaryHeap::new();

        self.scratch[start.index()].distance = 0;
        frontier.push(Reverse((0u32, start)));

        while let Some(Reverse((distance, current))) = frontier.pop() {
            let slot = &mut self.scratch[current.index()];
            if slot.visited {
                continue;
            }
            slot.visited = true;

            if distance <= movement_points {
                reachable.push(current);
            }
            if distance <= weapon_range {
                in_range.push(current);
            }

            for &next in grid.neighbors(current) {
                let tentative = distance.saturating_add(grid.cost(next));
                let neighbor = &mut self.scratch[next.index()];
                if !neighbor.visited && tentative < neighbor.distance {
                    neighbor.distance = tentative;
                    neighbor.predecessor = Some(current);
                    frontier.push(Reverse((tentative, next)));
                }
            }
        }

        let distance = self
            .scratch
            .iter()
            .map(|s| s.visited.then_some(s.distance))
            .collect();
        let predecessor = self.scratch.iter().map(|s| s.predecessor).collect();
        self.reset(grid.len());

        tracing::trace!(
            %start,
            movement_points,
            weapon_range,
            reachable = reachable.len(),
            in_range = in_range.len(),
            "movement range computed"
        );

        Ok(MovementRange::new(
            start,
            movement_points,
            weapon_range,
            reachable,
            in_range,
            distance,
            predecessor,
            self.reconstruction_cap,
        ))
    }

    /// Full distance field from `source`, ignoring any budget.
    pub fn flood(&mut self, grid: &Grid, source: NodeId) -> Result<MovementRange, GridError> {
        self.compute_movement_range(grid, source, u32::MAX, 0)
    }

    fn reset(&mut self, len: usize) {
        self.scratch.clear();
        self.scratch.resize(len, Scratch::CLEAR);
    }
}
