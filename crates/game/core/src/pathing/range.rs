use crate::pathing::reconstruct_path;
use crate::state::NodeId;

/// Result of one movement-range query.
///
/// `reachable` and `in_range` keep discovery order (the order nodes were
/// settled), not distance order, and contain no duplicates. The distance and
/// predecessor snapshots let callers rebuild paths after the solver has reset
/// its scratch state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovementRange {
    start: NodeId,
    movement_points: u32,
    weapon_range: u32,
    reachable: Vec<NodeId>,
    in_range: Vec<NodeId>,
    distance: Vec<Option<u32>>,
    predecessor: Vec<Option<NodeId>>,
    reconstruction_cap: usize,
}

impl MovementRange {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        start: NodeId,
        movement_points: u32,
        weapon_range: u32,
        reachable: Vec<NodeId>,
        in_range: Vec<NodeId>,
        distance: Vec<Option<u32>>,
        predecessor: Vec<Option<NodeId>>,
        reconstruction_cap: usize,
    ) -> Self {
        Self {
            start,
            movement_points,
            weapon_range,
            reachable,
            in_range,
            distance,
            predecessor,
            reconstruction_cap,
        }
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn movement_points(&self) -> u32 {
        self.movement_points
    }

    pub fn weapon_range(&self) -> u32 {
        self.weapon_range
    }

    /// Tiles within the movement budget, in discovery order.
    ///
    /// May include tiles held by other units.
    pub fn reachable(&self) -> &[NodeId] {
        &self.reachable
    }

    /// Tiles whose accumulated cost is within the weapon range.
    pub fn in_range(&self) -> &[NodeId] {
        &self.in_range
    }

    pub fn is_reachable(&self, node: NodeId) -> bool {
        self.distance(node)
            .is_some_and(|d| d <= self.movement_points)
    }

    pub fn is_in_range(&self, node: NodeId) -> bool {
        self.distance(node).is_some_and(|d| d <= self.weapon_range)
    }

    /// Accumulated movement cost from the start, if the node was settled.
    pub fn distance(&self, node: NodeId) -> Option<u32> {
        self.distance.get(node.index()).copied().flatten()
    }

    /// Cheapest path from the start to `target`, both inclusive.
    ///
    /// Empty when `target` was never reached.
    pub fn reconstruct_path(&self, target: NodeId) -> Vec<NodeId> {
        reconstruct_path(
            &self.predecessor,
            self.start,
            target,
            self.reconstruction_cap,
        )
    }

    /// Number of steps along the cheapest path to `target`.
    pub fn steps_to(&self, target: NodeId) -> Option<u32> {
        let path = self.reconstruct_path(target);
        (!path.is_empty()).then(|| path.len() as u32 - 1)
    }

    /// Drops all results, leaving an empty range around the start.
    pub fn clear(&mut self) {
        self.reachable.clear();
        self.in_range.clear();
        self.distance.clear();
        self.predecessor.clear();
    }
}
