//! Content factory for assembling a battle from data files.

use std::path::{Path, PathBuf};

use tactics_core::{Battlefield, GameConfig, Grid, MapDimensions, TerrainKind, TerrainTable};

use crate::loaders::{
    ConfigLoader, LoadResult, MapLoader, PlaystyleLoader, RosterLoader, TerrainLoader, UnitSpawn,
};
use crate::playstyles::PlaystyleTable;

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── terrain.toml      (optional, standard table otherwise)
/// ├── playstyles.ron    (optional, built-in presets otherwise)
/// ├── rosters/
/// │   └── skirmish.ron
/// └── maps/
///     └── skirmish.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load terrain modifiers from `terrain.toml`.
    pub fn load_terrain(&self) -> LoadResult<TerrainTable> {
        let path = self.data_dir.join("terrain.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no terrain table, using standard");
            return Ok(TerrainTable::standard());
        }
        TerrainLoader::load(&path)
    }

    /// Load AI weights from `playstyles.ron`.
    pub fn load_playstyles(&self) -> LoadResult<PlaystyleTable> {
        let path = self.data_dir.join("playstyles.ron");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no playstyle table, using presets");
            return Ok(PlaystyleTable::standard());
        }
        PlaystyleLoader::load(&path)
    }

    /// Load a map from `maps/{map_name}.ron`.
    pub fn load_map(&self, map_name: &str) -> LoadResult<(MapDimensions, Vec<TerrainKind>)> {
        let path = self.data_dir.join("maps").join(format!("{}.ron", map_name));
        MapLoader::load(&path)
    }

    /// Load unit placements from `rosters/{roster_name}.ron`.
    pub fn load_roster(&self, roster_name: &str) -> LoadResult<Vec<UnitSpawn>> {
        let path = self
            .data_dir
            .join("rosters")
            .join(format!("{}.ron", roster_name));
        RosterLoader::load(&path)
    }

    /// Load everything needed for one battle.
    pub fn load_scenario(&self, map_name: &str, roster_name: &str) -> LoadResult<Scenario> {
        let config = self.load_config()?;
        let terrain = self.load_terrain()?;
        let playstyles = self.load_playstyles()?;
        let (dimensions, tiles) = self.load_map(map_name)?;
        let roster = self.load_roster(roster_name)?;

        tracing::info!(
            map = map_name,
            roster = roster_name,
            width = dimensions.width,
            height = dimensions.height,
            units = roster.len(),
            "scenario loaded"
        );

        Ok(Scenario {
            config,
            terrain,
            playstyles,
            dimensions,
            tiles,
            roster,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Everything read from disk for one battle.
#[derive(Clone, Debug)]
pub struct Scenario {
    pub config: GameConfig,
    pub terrain: TerrainTable,
    pub playstyles: PlaystyleTable,
    pub dimensions: MapDimensions,
    pub tiles: Vec<TerrainKind>,
    pub roster: Vec<UnitSpawn>,
}

impl Scenario {
    /// Builds the grid and spawns the roster in order.
    pub fn build_battlefield(&self) -> LoadResult<Battlefield> {
        let grid = Grid::from_terrain(self.dimensions, &self.tiles, &self.terrain, &self.config)
            .map_err(|e| anyhow::anyhow!("Failed to build grid: {}", e))?;
        let mut battlefield = Battlefield::new(grid, self.terrain.clone());

        for spawn in &self.roster {
            let node = battlefield.grid().id_at(spawn.position).ok_or_else(|| {
                anyhow::anyhow!(
                    "Unit '{}' spawns at {} which is outside the map",
                    spawn.profile.name,
                    spawn.position
                )
            })?;
            battlefield
                .spawn(spawn.profile.clone(), node, spawn.playstyle)
                .map_err(|e| anyhow::anyhow!("Failed to spawn '{}': {}", spawn.profile.name, e))?;
        }

        Ok(battlefield)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tactics_core::{Position, Team};

    const MAP: &str = "(dimensions: (4, 3), tiles: [(3, 0, Fort), (1, 1, Forest)])";
    const ROSTER: &str = r#"[
        (
            profile: (
                name: "Lyn",
                team: Player,
                stats: (hp: 20, strength: 6, speed: 9, skill: 8, hit: 90, avoid: 30, movement: 5),
                weapon: (name: "Iron Sword", kind: Sword, might: 5, min_range: 1, max_range: 1),
            ),
            position: (x: 0, y: 0),
        ),
        (
            profile: (
                name: "Bandit",
                team: Enemy,
                stats: (hp: 22, strength: 5, speed: 4, hit: 70, movement: 5),
                weapon: (name: "Hand Axe", kind: Axe, might: 7, min_range: 1, max_range: 2),
            ),
            position: (x: 3, y: 2),
            playstyle: Aggressive,
        ),
    ]"#;

    fn write_data_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("maps")).unwrap();
        fs::create_dir_all(dir.path().join("rosters")).unwrap();
        fs::write(dir.path().join("config.toml"), "critical_multiplier = 3\n").unwrap();
        fs::write(dir.path().join("maps/field.ron"), MAP).unwrap();
        fs::write(dir.path().join("rosters/field.ron"), ROSTER).unwrap();
        dir
    }

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn scenario_builds_battlefield() {
        let dir = write_data_dir();
        let factory = ContentFactory::new(dir.path());

        let scenario = factory.load_scenario("field", "field").unwrap();
        assert_eq!(scenario.terrain, TerrainTable::standard());
        assert_eq!(scenario.playstyles, PlaystyleTable::standard());

        let battlefield = scenario.build_battlefield().unwrap();
        assert_eq!(battlefield.units().len(), 2);
        assert_eq!(battlefield.living(Team::Enemy).count(), 1);

        let fort = battlefield.grid().id_at(Position::new(3, 0)).unwrap();
        assert_eq!(battlefield.grid().terrain(fort), Some(TerrainKind::Fort));

        let lyn = battlefield.grid().id_at(Position::new(0, 0)).unwrap();
        assert!(battlefield.grid().occupant(lyn).is_some());
    }

    #[test]
    fn spawn_outside_map_is_reported() {
        let dir = write_data_dir();
        fs::write(
            dir.path().join("rosters/bad.ron"),
            ROSTER.replace("(x: 3, y: 2)", "(x: 9, y: 9)"),
        )
        .unwrap();

        let scenario = ContentFactory::new(dir.path())
            .load_scenario("field", "bad")
            .unwrap();
        let err = scenario.build_battlefield().unwrap_err();
        assert!(err.to_string().contains("Bandit"));
    }

    #[test]
    fn bundled_skirmish_loads() {
        let factory = ContentFactory::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"));
        let scenario = factory.load_scenario("skirmish", "skirmish").unwrap();
        assert_eq!(scenario.config, GameConfig::default());
        assert_eq!(scenario.terrain, TerrainTable::standard());

        let battlefield = scenario.build_battlefield().unwrap();
        assert_eq!(battlefield.living(Team::Player).count(), 3);
        assert_eq!(battlefield.living(Team::Enemy).count(), 3);
    }

    #[test]
    fn missing_map_is_an_error() {
        let dir = write_data_dir();
        let factory = ContentFactory::new(dir.path());
        assert!(factory.load_map("nowhere").is_err());
    }
}
