//! Arena-backed behavior tree for tick-driven, turn-based games.
//!
//! Trees are built once and ticked repeatedly. A node that needs more than one
//! tick to finish returns [`Status::Running`]; the tree remembers where it was
//! and resumes there on the next tick instead of starting over.
//!
//! - **Tagged nodes**: [`Node`] is an enum over Selector, Sequence, Inverter and
//!   Leaf, stored in a flat arena and addressed by [`NodeId`]
//! - **External memory**: sequence cursors and leaf "initiated" flags live in a
//!   per-node record owned by the [`BehaviorTree`], not in the nodes
//! - **Zero dependencies**: Pure Rust with no external crates
//!
//! # Architecture
//!
//! - [`Behavior`]: trait implemented by leaf payloads
//! - [`Status`]: Running, Success or Failure
//! - [`TreeBuilder`]: assembles the arena bottom-up
//! - [`TreeObserver`]: optional hooks for sequence and leaf activity

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod decorator;
pub mod node;
pub mod observer;
pub mod status;
pub mod tree;

pub use behavior::{Behavior, LeafState};
pub use builder::TreeBuilder;
pub use node::{Node, NodeId};
pub use observer::TreeObserver;
pub use status::Status;
pub use tree::BehaviorTree;
