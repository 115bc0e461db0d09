//! Movement-range solver and path reconstruction.
//!
//! [`PathSolver`] runs a single-source Dijkstra where the weight of an edge is
//! the cost of the node being entered. One run yields both the tiles a unit can
//! stop on within its movement budget and the tiles within its weapon range,
//! plus the predecessor table used to rebuild paths.
//!
//! Occupancy is not consulted here. Tiles held by other units remain
//! traversable and may appear in the reachable set; whether a unit may stop on
//! a tile is a caller-level decision.

mod path;
mod range;
mod solver;

pub use path::reconstruct_path;
pub use range::MovementRange;
pub use solver::PathSolver;
