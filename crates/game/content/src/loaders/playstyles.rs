//! Playstyle weight loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::playstyles::PlaystyleTable;

/// Loads a [`PlaystyleTable`] from RON.
///
/// ```ron
/// (
///     aggressive: (health_weight: 0.2, distance_weight: 0.3, player_distance_weight: 0.5,
///                  power_difference_weight: 0.6, escape_weight: 0.1),
///     normal: (...),
///     easy: (...),
///     very_easy: (...),
/// )
/// ```
///
/// Weights outside `[0, 1]` are clamped with a warning.
pub struct PlaystyleLoader;

impl PlaystyleLoader {
    pub fn load(path: &Path) -> LoadResult<PlaystyleTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<PlaystyleTable> {
        let table: PlaystyleTable = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse playstyle RON: {}", e))?;

        let clamped = table.clamped();
        if clamped != table {
            tracing::warn!("playstyle weights outside [0, 1] were clamped");
        }
        Ok(clamped)
    }
}
