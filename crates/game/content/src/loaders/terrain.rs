//! Terrain table loader.

use std::path::Path;

use tactics_core::TerrainTable;

use crate::loaders::{LoadResult, read_file};

/// Loads a [`TerrainTable`] from TOML, one table per terrain kind.
///
/// ```toml
/// [forest]
/// movement_cost = 2
/// defense_boost = 1
/// avoid_boost = 20
/// heal_percentage = 0
/// ```
///
/// Kinds that are left out keep the standard profile.
pub struct TerrainLoader;

impl TerrainLoader {
    pub fn load(path: &Path) -> LoadResult<TerrainTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<TerrainTable> {
        let table: TerrainTable = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse terrain TOML: {}", e))?;

        if let Some(kind) = table_zero_cost(&table) {
            anyhow::bail!("terrain '{}' has a movement cost of 0", kind);
        }
        Ok(table)
    }
}

fn table_zero_cost(table: &TerrainTable) -> Option<&'static str> {
    [
        ("plain", table.plain),
        ("forest", table.forest),
        ("river", table.river),
        ("fort", table.fort),
        ("bridge", table.bridge),
    ]
    .into_iter()
    .find(|(_, profile)| profile.movement_cost == 0)
    .map(|(name, _)| name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::TerrainProfile;

    #[test]
    fn overrides_single_kind() {
        let table = TerrainLoader::parse(
            "[fort]\nmovement_cost = 1\ndefense_boost = 3\navoid_boost = 10\nheal_percentage = 50\n",
        )
        .unwrap();
        assert_eq!(table.fort, TerrainProfile::new(1, 3, 10, 50));
        assert_eq!(table.forest, TerrainTable::standard().forest);
    }

    #[test]
    fn rejects_free_movement() {
        let err = TerrainLoader::parse(
            "[river]\nmovement_cost = 0\ndefense_boost = 0\navoid_boost = 0\nheal_percentage = 0\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("river"));
    }
}
