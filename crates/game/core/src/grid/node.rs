use arrayvec::ArrayVec;

use crate::grid::TerrainKind;
use crate::state::{NodeId, Position, UnitId};

/// Cardinal step directions, in neighbor order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }
}

/// A tile in the grid arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphNode {
    id: NodeId,
    position: Position,
    terrain: TerrainKind,
    cost: u32,
    neighbors: ArrayVec<NodeId, 4>,
    occupant: Option<UnitId>,
}

impl GraphNode {
    pub(crate) fn new(
        id: NodeId,
        position: Position,
        terrain: TerrainKind,
        cost: u32,
        neighbors: ArrayVec<NodeId, 4>,
    ) -> Self {
        Self {
            id,
            position,
            terrain,
            cost,
            neighbors,
            occupant: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn terrain(&self) -> TerrainKind {
        self.terrain
    }

    /// Cost of stepping onto this node.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn neighbors(&self) -> &[NodeId] {
        &self.neighbors
    }

    pub fn occupant(&self) -> Option<UnitId> {
        self.occupant
    }

    pub(crate) fn set_occupant(&mut self, occupant: Option<UnitId>) {
        self.occupant = occupant;
    }
}
