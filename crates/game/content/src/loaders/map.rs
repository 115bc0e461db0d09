//! Map data loader.
//!
//! Loads terrain layout from map RON files. Units are placed by the roster.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tactics_core::{MapDimensions, Position, TerrainKind};

use crate::loaders::{LoadResult, read_file};

/// Map data structure for RON files (terrain only).
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MapDataRon {
    dimensions: (u32, u32),
    /// Terrain for every tile not listed in `tiles`.
    #[serde(default = "default_terrain")]
    default: TerrainKind,
    tiles: Vec<(i32, i32, TerrainKind)>, // (x, y, terrain)
}

fn default_terrain() -> TerrainKind {
    TerrainKind::Plain
}

/// Loader for map data from RON files.
pub struct MapLoader;

impl MapLoader {
    /// Returns dimensions and row-major terrain, ready for `Grid::from_terrain`.
    pub fn load(path: &Path) -> LoadResult<(MapDimensions, Vec<TerrainKind>)> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<(MapDimensions, Vec<TerrainKind>)> {
        let data: MapDataRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))?;

        let dimensions = MapDimensions::new(data.dimensions.0, data.dimensions.1);
        let mut tiles = vec![data.default; dimensions.tile_count()];

        for (x, y, terrain) in data.tiles {
            let position = Position::new(x, y);
            let index = dimensions
                .index_of(position)
                .ok_or_else(|| anyhow::anyhow!("Map tile {} is outside the map", position))?;
            tiles[index] = terrain;
        }

        Ok((dimensions, tiles))
    }
}
