//! Grid arena: nodes addressed by [`NodeId`], terrain lookup and occupancy.
//!
//! The grid is static for a level except for occupancy, which the battlefield
//! rewrites as units move. Units refer to nodes by id and nodes refer to units
//! by id; there are no back-references.

mod node;
mod terrain;

pub use node::{Direction, GraphNode};
pub use terrain::{TerrainKind, TerrainProfile, TerrainTable};

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{NodeId, Position, UnitId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    pub fn tile_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Row-major index of `position`.
    pub fn index_of(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.width as usize + position.x as usize)
    }

    pub fn position_of(&self, index: usize) -> Position {
        let width = self.width.max(1) as usize;
        Position::new((index % width) as i32, (index / width) as i32)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("map is {expected} tiles but {found} terrain entries were supplied")]
    ShapeMismatch { expected: usize, found: usize },

    #[error("node {0} does not exist")]
    UnknownNode(NodeId),

    #[error("position {0} is outside the map")]
    OutOfBounds(Position),
}

impl GameError for GridError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ShapeMismatch { .. } => ErrorSeverity::Fatal,
            Self::UnknownNode(_) | Self::OutOfBounds(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ShapeMismatch { .. } => "GRID_SHAPE_MISMATCH",
            Self::UnknownNode(_) => "GRID_UNKNOWN_NODE",
            Self::OutOfBounds(_) => "GRID_OUT_OF_BOUNDS",
        }
    }
}

/// Weighted graph of map tiles with 4-way adjacency.
#[derive(Clone, Debug)]
pub struct Grid {
    dimensions: MapDimensions,
    nodes: Vec<GraphNode>,
}

impl Grid {
    /// Builds the node arena from row-major terrain.
    ///
    /// Node costs come from `table`; unwalkable tiles get the sentinel cost
    /// from `config` and stay connected.
    pub fn from_terrain(
        dimensions: MapDimensions,
        tiles: &[TerrainKind],
        table: &TerrainTable,
        config: &GameConfig,
    ) -> Result<Self, GridError> {
        let expected = dimensions.tile_count();
        if tiles.len() != expected {
            return Err(GridError::ShapeMismatch {
                expected,
                found: tiles.len(),
            });
        }

        Ok(Self::build(dimensions, tiles, table, config))
    }

    /// A grid where every tile has the same terrain.
    pub fn uniform(
        dimensions: MapDimensions,
        terrain: TerrainKind,
        table: &TerrainTable,
        config: &GameConfig,
    ) -> Self {
        let tiles = vec![terrain; dimensions.tile_count()];
        Self::build(dimensions, &tiles, table, config)
    }

    fn build(
        dimensions: MapDimensions,
        tiles: &[TerrainKind],
        table: &TerrainTable,
        config: &GameConfig,
    ) -> Self {
        let nodes = tiles
            .iter()
            .enumerate()
            .map(|(index, &terrain)| {
                let position = dimensions.position_of(index);
                let neighbors = Direction::ALL
                    .iter()
                    .filter_map(|dir| {
                        let (dx, dy) = dir.delta();
                        dimensions.index_of(position.offset(dx, dy))
                    })
                    .map(|i| NodeId(i as u32))
                    .collect();
                GraphNode::new(
                    NodeId(index as u32),
                    position,
                    terrain,
                    table.node_cost(terrain, config),
                    neighbors,
                )
            })
            .collect();

        Self { dimensions, nodes }
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(id.index())
    }

    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter()
    }

    pub fn id_at(&self, position: Position) -> Option<NodeId> {
        self.dimensions
            .index_of(position)
            .map(|i| NodeId(i as u32))
    }

    pub fn node_at(&self, position: Position) -> Option<&GraphNode> {
        self.id_at(position).and_then(|id| self.node(id))
    }

    /// Neighbor ids of `id`; empty for unknown ids.
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(GraphNode::neighbors).unwrap_or(&[])
    }

    /// Entry cost of `id`; the sentinel cost for unknown ids.
    pub fn cost(&self, id: NodeId) -> u32 {
        self.node(id).map(GraphNode::cost).unwrap_or(u32::MAX)
    }

    pub fn terrain(&self, id: NodeId) -> Option<TerrainKind> {
        self.node(id).map(GraphNode::terrain)
    }

    pub fn position(&self, id: NodeId) -> Option<Position> {
        self.node(id).map(GraphNode::position)
    }

    /// Who stands on `id`.
    pub fn occupant(&self, id: NodeId) -> Option<UnitId> {
        self.node(id).and_then(GraphNode::occupant)
    }

    /// True when a unit other than `unit` stands on `id`.
    pub fn is_blocked_for(&self, id: NodeId, unit: UnitId) -> bool {
        self.occupant(id).is_some_and(|other| other != unit)
    }

    pub fn set_occupant(&mut self, id: NodeId, occupant: Option<UnitId>) -> Result<(), GridError> {
        let node = self
            .nodes
            .get_mut(id.index())
            .ok_or(GridError::UnknownNode(id))?;
        node.set_occupant(occupant);
        Ok(())
    }

    pub fn clear_occupants(&mut self) {
        for node in &mut self.nodes {
            node.set_occupant(None);
        }
    }

    /// True when `a` and `b` share an edge.
    pub fn are_adjacent(&self, a: NodeId, b: NodeId) -> bool {
        self.neighbors(a).contains(&b)
    }
}
