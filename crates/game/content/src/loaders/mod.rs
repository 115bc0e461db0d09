//! Content loaders for reading battle data from files.
//!
//! Every loader has a `load(path)` entry point and a `parse(str)` variant that
//! does the actual decoding, so tests and embedders can skip the filesystem.

pub mod config;
pub mod factory;
pub mod map;
pub mod playstyles;
pub mod roster;
pub mod terrain;

pub use config::ConfigLoader;
pub use factory::{ContentFactory, Scenario};
pub use map::MapLoader;
pub use playstyles::PlaystyleLoader;
pub use roster::{RosterLoader, UnitSpawn};
pub use terrain::TerrainLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
