//! Data-driven content definitions and loaders.
//!
//! This crate houses static battle content and provides loaders for RON/TOML data files:
//! - AI playstyle weights (built-in presets, overridable via RON)
//! - Map layouts (RON)
//! - Unit rosters with starting positions (RON)
//! - Terrain tables (TOML)
//! - Game configuration (TOML)
//!
//! Content is read once per level and never mutated during play.

pub mod playstyles;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use playstyles::{DesirabilityProfile, PlaystyleTable};

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, MapLoader, PlaystyleLoader, RosterLoader, Scenario,
    TerrainLoader, UnitSpawn,
};
