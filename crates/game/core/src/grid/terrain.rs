//! Terrain kinds and their reference data.

use strum::{Display, EnumCount, EnumIter};

use crate::config::GameConfig;

/// Canonical terrain classes for map tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumCount)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    Plain,
    Forest,
    River,
    Fort,
    /// Kept in the graph with a sentinel cost rather than removed.
    Unwalkable,
    Bridge,
}

impl TerrainKind {
    /// Terrain worth reasoning about when scanning the surroundings.
    ///
    /// Plain ground carries no modifiers and unwalkable ground cannot be used.
    pub fn is_notable(self) -> bool {
        !matches!(self, TerrainKind::Plain | TerrainKind::Unwalkable)
    }

    pub fn is_walkable(self) -> bool {
        self != TerrainKind::Unwalkable
    }
}

/// Per-terrain modifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainProfile {
    pub movement_cost: u32,
    /// Added to the defender's Defense/Resistance.
    pub defense_boost: i32,
    pub avoid_boost: i32,
    /// Percent of max HP restored at the start of the owner's phase.
    pub heal_percentage: u32,
}

impl TerrainProfile {
    pub const fn new(
        movement_cost: u32,
        defense_boost: i32,
        avoid_boost: i32,
        heal_percentage: u32,
    ) -> Self {
        Self {
            movement_cost,
            defense_boost,
            avoid_boost,
            heal_percentage,
        }
    }

    pub const fn plain() -> Self {
        Self::new(1, 0, 0, 0)
    }
}

impl Default for TerrainProfile {
    fn default() -> Self {
        Self::plain()
    }
}

/// Lookup table from [`TerrainKind`] to [`TerrainProfile`].
///
/// Static for the duration of a level.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TerrainTable {
    pub plain: TerrainProfile,
    pub forest: TerrainProfile,
    pub river: TerrainProfile,
    pub fort: TerrainProfile,
    pub unwalkable: TerrainProfile,
    pub bridge: TerrainProfile,
}

impl TerrainTable {
    /// The stock table used when no terrain data is supplied.
    pub fn standard() -> Self {
        Self {
            plain: TerrainProfile::plain(),
            forest: TerrainProfile::new(2, 1, 20, 0),
            river: TerrainProfile::new(5, 0, 0, 0),
            fort: TerrainProfile::new(2, 2, 20, 20),
            unwalkable: TerrainProfile::new(GameConfig::DEFAULT_MAX_NODE_COST, 0, 0, 0),
            bridge: TerrainProfile::plain(),
        }
    }

    pub fn profile(&self, kind: TerrainKind) -> TerrainProfile {
        match kind {
            TerrainKind::Plain => self.plain,
            TerrainKind::Forest => self.forest,
            TerrainKind::River => self.river,
            TerrainKind::Fort => self.fort,
            TerrainKind::Unwalkable => self.unwalkable,
            TerrainKind::Bridge => self.bridge,
        }
    }

    /// Graph edge weight for entering a tile of `kind`.
    ///
    /// Always at least 1, and exactly `max_node_cost` (itself at least 1) for
    /// unwalkable ground.
    pub fn node_cost(&self, kind: TerrainKind, config: &GameConfig) -> u32 {
        let sentinel = config.max_node_cost.max(1);
        if kind.is_walkable() {
            self.profile(kind).movement_cost.clamp(1, sentinel)
        } else {
            sentinel
        }
    }
}

impl Default for TerrainTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn node_costs_are_positive() {
        let table = TerrainTable {
            plain: TerrainProfile::new(0, 0, 0, 0),
            ..TerrainTable::standard()
        };
        let config = GameConfig::default();

        for kind in TerrainKind::iter() {
            assert!(table.node_cost(kind, &config) >= 1, "{kind} has zero cost");
        }
    }

    #[test]
    fn unwalkable_uses_sentinel_cost() {
        let config = GameConfig {
            max_node_cost: 500,
            ..GameConfig::default()
        };
        let table = TerrainTable::standard();
        assert_eq!(table.node_cost(TerrainKind::Unwalkable, &config), 500);
        assert_eq!(table.node_cost(TerrainKind::Forest, &config), 2);
    }

    #[test]
    fn zero_sentinel_is_raised_to_one() {
        let config = GameConfig {
            max_node_cost: 0,
            ..GameConfig::default()
        };
        let table = TerrainTable::standard();
        for kind in TerrainKind::iter() {
            assert_eq!(table.node_cost(kind, &config), 1, "{kind}");
        }
    }

    #[test]
    fn notable_terrain_excludes_plain_and_walls() {
        assert!(!TerrainKind::Plain.is_notable());
        assert!(!TerrainKind::Unwalkable.is_notable());
        assert!(TerrainKind::Fort.is_notable());
        assert!(TerrainKind::Forest.is_notable());
    }
}
