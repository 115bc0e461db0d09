//! Ports to sources outside the deterministic rules.

mod rng;

pub use rng::{RollSource, ScriptedRolls, SeededRolls};
