//! Unit roster loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tactics_core::{Playstyle, Position, UnitCombatProfile};

use crate::loaders::{LoadResult, read_file};

/// A unit and where it starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSpawn {
    pub profile: UnitCombatProfile,
    pub position: Position,
    #[serde(default)]
    pub playstyle: Playstyle,
}

/// Loads a list of [`UnitSpawn`]s from RON. Spawn order becomes unit id order.
pub struct RosterLoader;

impl RosterLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<UnitSpawn>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<UnitSpawn>> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))
    }
}
