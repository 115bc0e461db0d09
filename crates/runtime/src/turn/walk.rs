//! Multi-tick movement along a reconstructed path.

use tactics_core::{Battlefield, MoveError, NodeId, UnitId};

/// A unit walking a path one node at a time.
///
/// Occupancy is released when the walk starts and claimed again on arrival;
/// in between only the unit's position changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Walk {
    unit: UnitId,
    path: Vec<NodeId>,
    next: usize,
    elapsed: u32,
    ticks_per_step: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkProgress {
    /// Waiting for the next step.
    Walking,
    Stepped { from: NodeId, to: NodeId },
    Arrived(NodeId),
}

impl Walk {
    /// Starts walking `path`, which must begin on the unit's node.
    pub fn start(
        battlefield: &mut Battlefield,
        unit: UnitId,
        path: Vec<NodeId>,
        ticks_per_step: u32,
    ) -> Result<Self, MoveError> {
        let state = battlefield.require(unit)?;
        if !state.is_alive() {
            return Err(MoveError::UnitDefeated(unit));
        }
        let origin = state.node();

        let (Some(&first), Some(&destination)) = (path.first(), path.last()) else {
            return Err(MoveError::OutOfReach { unit, node: origin });
        };
        if first != origin {
            return Err(MoveError::OutOfReach {
                unit,
                node: destination,
            });
        }
        if let Some(by) = battlefield
            .grid()
            .occupant(destination)
            .filter(|&by| by != unit)
        {
            return Err(MoveError::Occupied {
                node: destination,
                by,
            });
        }

        battlefield.vacate(unit)?;
        tracing::trace!(%unit, %destination, steps = path.len() - 1, "walk started");

        Ok(Self {
            unit,
            path,
            next: 1,
            elapsed: 0,
            ticks_per_step: ticks_per_step.max(1),
        })
    }

    pub fn unit(&self) -> UnitId {
        self.unit
    }

    pub fn destination(&self) -> Option<NodeId> {
        self.path.last().copied()
    }

    pub fn remaining_steps(&self) -> usize {
        self.path.len().saturating_sub(self.next)
    }

    /// Advances one tick.
    ///
    /// Steps once every `ticks_per_step` ticks; the tick after the last step
    /// claims the destination and reports arrival.
    pub fn advance(&mut self, battlefield: &mut Battlefield) -> Result<WalkProgress, MoveError> {
        if self.next >= self.path.len() {
            battlefield.settle(self.unit)?;
            let node = battlefield.require(self.unit)?.node();
            return Ok(WalkProgress::Arrived(node));
        }

        self.elapsed += 1;
        if self.elapsed < self.ticks_per_step {
            return Ok(WalkProgress::Walking);
        }
        self.elapsed = 0;

        let from = self.path[self.next - 1];
        let to = self.path[self.next];
        battlefield.step(self.unit, to)?;
        self.next += 1;
        Ok(WalkProgress::Stepped { from, to })
    }
}
