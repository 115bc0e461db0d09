//! Deterministic rules for a grid-based tactics battle.
//!
//! `tactics-core` defines the grid arena, the movement-range solver, the battle
//! calculator and the live battlefield state. It performs no I/O and never
//! blocks; randomness enters only through [`env::RollSource`].
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod grid;
pub mod pathing;
pub mod state;

pub use combat::{
    AttackOutcome, BattleError, BattleForecast, BattleOutcome, BattleSequence, Combatant,
    CombatantForecast, Side, Strike,
};
pub use config::GameConfig;
pub use env::{RollSource, ScriptedRolls, SeededRolls};
pub use error::{ErrorSeverity, GameError};
pub use grid::{
    Direction, GraphNode, Grid, GridError, MapDimensions, TerrainKind, TerrainProfile,
    TerrainTable,
};
pub use pathing::{MovementRange, PathSolver, reconstruct_path};
pub use state::{
    Battlefield, MoveError, NodeId, Playstyle, Position, Team, UnitCombatProfile, UnitId,
    UnitState, UnitStats, Weapon, WeaponType,
};
