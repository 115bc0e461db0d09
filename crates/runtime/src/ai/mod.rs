//! Desirability-driven enemy AI.
//!
//! Each enemy turn the unit observes its surroundings ([`AiContext`]), scores
//! Retreat, Fort, Attack and Wait ([`scoring`]), and walks a behavior tree
//! ([`presets::enemy_tree`]) whose check leaves let only the winning branch
//! through.

pub mod context;
pub mod nodes;
pub mod presets;
pub mod scoring;
pub mod types;

pub use context::AiContext;
pub use nodes::{AiLeaf, AiTurn};
pub use presets::{AiTree, enemy_tree};
pub use scoring::Situation;
pub use types::{AiAction, Desirabilities, VisibleTerrain, VisibleUnit};
