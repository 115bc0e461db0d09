//! Topic-based event bus for battle signals.
//!
//! The core never waits on its consumers: presentation layers subscribe to the
//! topics they render and the runtime keeps going whether or not anyone is
//! listening.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{AiEvent, BattleEvent, BoardEvent, NodeState};
