//! Attack power, power comparison and HP forecasts.

use crate::config::GameConfig;
use crate::grid::TerrainProfile;
use crate::state::UnitCombatProfile;

use super::triangle::weapon_triangle_factor;

/// Damage one strike deals before criticals.
///
/// # Formula
///
/// ```text
/// magic:    (Magic + Might)    - (Resistance + terrain defense)
/// physical: (Strength + Might) - (Defense + terrain defense)
/// ```
///
/// Floored at 0.
pub fn attack_power(
    attacker: &UnitCombatProfile,
    defender: &UnitCombatProfile,
    defender_terrain: &TerrainProfile,
) -> i32 {
    let (offense, defense) = if attacker.weapon.kind.is_magic() {
        (attacker.stats.magic, defender.stats.resistance)
    } else {
        (attacker.stats.strength, defender.stats.defense)
    };

    let raw = offense
        .saturating_add(attacker.weapon.might)
        .saturating_sub(defense.saturating_add(defender_terrain.defense_boost));
    raw.max(0)
}

/// Raw power: Attack plus weapon might.
pub fn power(unit: &UnitCombatProfile) -> i32 {
    unit.stats.attack.saturating_add(unit.weapon.might)
}

/// Power adjusted by the weapon triangle against `defender`.
pub fn power_against(
    attacker: &UnitCombatProfile,
    defender: &UnitCombatProfile,
    config: &GameConfig,
) -> i32 {
    power(attacker).saturating_add(weapon_triangle_factor(
        attacker.weapon.kind,
        defender.weapon.kind,
        config.weapon_triangle_bonus,
    ))
}

/// How much stronger `attacker` is than `defender`, rescaled to `[0, 1]`.
///
/// The difference is clamped to `+/- power_advantage_cap`; 0.5 means even.
pub fn power_advantage(
    attacker: &UnitCombatProfile,
    defender: &UnitCombatProfile,
    config: &GameConfig,
) -> f64 {
    let cap = config.power_advantage_cap.max(1);
    let difference = power_against(attacker, defender, config)
        .saturating_sub(power(defender))
        .clamp(-cap, cap);
    (f64::from(difference) + f64::from(cap)) / (2.0 * f64::from(cap))
}

/// HP left after taking `incoming` once, or twice when the opponent doubles.
///
/// May be negative; callers display it clamped.
pub fn remaining_hp_forecast(
    current_hp: i32,
    incoming: i32,
    opponent_doubles: bool,
    config: &GameConfig,
) -> i32 {
    let strikes = if opponent_doubles {
        config.double_attack_multiplier
    } else {
        1
    };
    current_hp.saturating_sub(incoming.saturating_mul(strikes))
}

/// Damage of one landed strike.
pub fn strike_damage(attack_power: i32, critical: bool, config: &GameConfig) -> i32 {
    if critical {
        attack_power.saturating_mul(config.critical_multiplier)
    } else {
        attack_power
    }
}

/// HP after taking `damage`, never below zero.
pub fn apply_damage(current_hp: i32, damage: i32) -> i32 {
    current_hp.saturating_sub(damage.max(0)).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Team, UnitStats, Weapon, WeaponType};

    fn profile(kind: WeaponType, stats: UnitStats, might: i32) -> UnitCombatProfile {
        UnitCombatProfile {
            name: "unit".into(),
            team: Team::Player,
            stats,
            weapon: Weapon::new("weapon", kind, might),
        }
    }

    #[test]
    fn physical_attack_uses_strength_and_defense() {
        let attacker = profile(
            WeaponType::Sword,
            UnitStats {
                strength: 10,
                magic: 99,
                ..Default::default()
            },
            5,
        );
        let defender = profile(
            WeaponType::Axe,
            UnitStats {
                defense: 4,
                resistance: 0,
                ..Default::default()
            },
            0,
        );
        let forest = TerrainProfile::new(2, 1, 20, 0);
        assert_eq!(attack_power(&attacker, &defender, &forest), 10);
    }

    #[test]
    fn magic_attack_uses_magic_and_resistance() {
        let attacker = profile(
            WeaponType::Tome,
            UnitStats {
                magic: 8,
                strength: 99,
                ..Default::default()
            },
            4,
        );
        let defender = profile(
            WeaponType::Lance,
            UnitStats {
                defense: 99,
                resistance: 3,
                ..Default::default()
            },
            0,
        );
        assert_eq!(
            attack_power(&attacker, &defender, &TerrainProfile::plain()),
            9
        );
    }

    #[test]
    fn attack_power_is_never_negative() {
        let attacker = profile(WeaponType::Sword, UnitStats::default(), 1);
        let defender = profile(
            WeaponType::Sword,
            UnitStats {
                defense: 30,
                ..Default::default()
            },
            0,
        );
        let fort = TerrainProfile::new(2, 2, 20, 20);
        assert_eq!(attack_power(&attacker, &defender, &fort), 0);
    }

    #[test]
    fn power_advantage_is_rescaled() {
        let config = GameConfig::default();
        let strong = profile(
            WeaponType::Axe,
            UnitStats {
                attack: 100,
                ..Default::default()
            },
            0,
        );
        let weak = profile(WeaponType::Lance, UnitStats::default(), 0);

        assert_eq!(power_advantage(&strong, &weak, &config), 1.0);
        assert_eq!(power_advantage(&weak, &strong, &config), 0.0);

        let even = profile(WeaponType::Sword, UnitStats::default(), 3);
        assert_eq!(power_advantage(&even, &even, &config), 0.5);
    }

    #[test]
    fn huge_power_cap_does_not_overflow() {
        let config = GameConfig {
            power_advantage_cap: i32::MAX,
            ..GameConfig::default()
        };
        let strong = profile(
            WeaponType::Sword,
            UnitStats {
                attack: i32::MAX,
                ..Default::default()
            },
            0,
        );
        let weak = profile(WeaponType::Sword, UnitStats::default(), 0);

        assert_eq!(power_advantage(&weak, &weak, &config), 0.5);
        assert_eq!(power_advantage(&strong, &weak, &config), 1.0);
        assert_eq!(power_advantage(&weak, &strong, &config), 0.0);
    }

    #[test]
    fn forecast_accounts_for_doubling() {
        let config = GameConfig::default();
        assert_eq!(remaining_hp_forecast(20, 6, false, &config), 14);
        assert_eq!(remaining_hp_forecast(20, 6, true, &config), 8);
        assert_eq!(remaining_hp_forecast(5, 6, true, &config), -7);
    }

    #[test]
    fn criticals_triple_damage() {
        let config = GameConfig::default();
        assert_eq!(strike_damage(4, false, &config), 4);
        assert_eq!(strike_damage(4, true, &config), 12);
        assert_eq!(apply_damage(10, 12), 0);
    }
}
