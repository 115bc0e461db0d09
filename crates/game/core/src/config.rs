/// Game configuration constants and tunable parameters.
///
/// Every field falls back to its default when omitted from a config file.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Speed lead (inclusive) needed to strike twice in one exchange.
    pub double_attack_threshold: i32,
    /// Damage multiplier applied to forecasts when a unit doubles.
    pub double_attack_multiplier: i32,
    /// Skill is divided by this before adding to the critical rate.
    pub crit_skill_divider: i32,
    /// Damage multiplier for a critical strike.
    pub critical_multiplier: i32,
    /// Magnitude of the weapon-triangle bonus/penalty.
    pub weapon_triangle_bonus: i32,
    /// Cost given to unwalkable tiles. Large but finite so sums never overflow.
    pub max_node_cost: u32,
    /// Predecessor hops walked before path reconstruction gives up.
    pub path_reconstruction_cap: usize,
    /// Power difference is clamped to +/- this before rescaling to [0, 1].
    pub power_advantage_cap: i32,
}

impl GameConfig {
    pub const DEFAULT_DOUBLE_ATTACK_THRESHOLD: i32 = 5;
    pub const DEFAULT_DOUBLE_ATTACK_MULTIPLIER: i32 = 2;
    pub const DEFAULT_CRIT_SKILL_DIVIDER: i32 = 2;
    pub const DEFAULT_CRITICAL_MULTIPLIER: i32 = 3;
    pub const DEFAULT_WEAPON_TRIANGLE_BONUS: i32 = 5;
    pub const DEFAULT_MAX_NODE_COST: u32 = 99_999;
    pub const DEFAULT_PATH_RECONSTRUCTION_CAP: usize = 1_000;
    pub const DEFAULT_POWER_ADVANTAGE_CAP: i32 = 50;

    pub fn new() -> Self {
        Self {
            double_attack_threshold: Self::DEFAULT_DOUBLE_ATTACK_THRESHOLD,
            double_attack_multiplier: Self::DEFAULT_DOUBLE_ATTACK_MULTIPLIER,
            crit_skill_divider: Self::DEFAULT_CRIT_SKILL_DIVIDER,
            critical_multiplier: Self::DEFAULT_CRITICAL_MULTIPLIER,
            weapon_triangle_bonus: Self::DEFAULT_WEAPON_TRIANGLE_BONUS,
            max_node_cost: Self::DEFAULT_MAX_NODE_COST,
            path_reconstruction_cap: Self::DEFAULT_PATH_RECONSTRUCTION_CAP,
            power_advantage_cap: Self::DEFAULT_POWER_ADVANTAGE_CAP,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
