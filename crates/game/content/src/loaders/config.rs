//! Game configuration loader.

use std::path::Path;

use tactics_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
///
/// Missing keys keep their default values.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("weapon_triangle_bonus = 10\n").unwrap();
        assert_eq!(config.weapon_triangle_bonus, 10);
        assert_eq!(
            config.double_attack_threshold,
            GameConfig::DEFAULT_DOUBLE_ATTACK_THRESHOLD
        );
    }

    #[test]
    fn rejects_bad_types() {
        assert!(ConfigLoader::parse("max_node_cost = \"lots\"\n").is_err());
    }
}
