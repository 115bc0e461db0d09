//! Turn orchestration for the tactics battle.
//!
//! This crate layers the enemy AI and the phase cycle on top of
//! `tactics-core`. Consumers build a [`Runtime`] from a battlefield, issue
//! [`PlayerCommand`]s during the player phase, tick the enemy phase, and
//! subscribe to the [`EventBus`] to follow along.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`ai`] scores actions and defines the enemy behavior tree
//! - [`turn`] runs one enemy unit's turn across ticks
//! - [`events`] provides the topic-based event bus
pub mod ai;
pub mod error;
pub mod events;
pub mod runtime;
pub mod turn;

pub use ai::{AiAction, AiContext, AiLeaf, AiTree, Desirabilities, enemy_tree};
pub use error::{Result, RuntimeError};
pub use events::{AiEvent, BattleEvent, BoardEvent, Event, EventBus, NodeState, Topic};
pub use runtime::{Phase, PlayerCommand, Runtime, RuntimeBuilder, RuntimeConfig, TickOutcome};
pub use turn::{EnemyTurn, TurnState, World};
