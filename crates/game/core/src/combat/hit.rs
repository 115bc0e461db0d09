//! Hit, critical and doubling checks, and the percentage rolls.

use crate::config::GameConfig;
use crate::env::RollSource;
use crate::state::UnitCombatProfile;

use super::triangle::weapon_triangle_factor;

/// True iff `defender.speed + threshold <= attacker.speed`.
pub fn can_double_attack(
    attacker: &UnitCombatProfile,
    defender: &UnitCombatProfile,
    config: &GameConfig,
) -> bool {
    defender
        .stats
        .speed
        .saturating_add(config.double_attack_threshold)
        <= attacker.stats.speed
}

/// Chance to hit, clamped to `[0, 100]`.
///
/// # Formula
///
/// ```text
/// hit = attacker.Hit + triangle - defender.Avoid
/// ```
pub fn hit_rate(
    attacker: &UnitCombatProfile,
    defender: &UnitCombatProfile,
    config: &GameConfig,
) -> i32 {
    let triangle = weapon_triangle_factor(
        attacker.weapon.kind,
        defender.weapon.kind,
        config.weapon_triangle_bonus,
    );
    attacker
        .stats
        .hit
        .saturating_add(triangle)
        .saturating_sub(defender.stats.avoid)
        .clamp(0, 100)
}

/// Chance to crit, clamped to `[0, 100]`.
///
/// # Formula
///
/// ```text
/// crit = attacker.Crit + attacker.Skill / divider - defender.Luck
/// ```
pub fn critical_rate(
    attacker: &UnitCombatProfile,
    defender: &UnitCombatProfile,
    config: &GameConfig,
) -> i32 {
    let skill_bonus = attacker
        .stats
        .skill
        .checked_div(config.crit_skill_divider)
        .unwrap_or(0);
    attacker
        .stats
        .crit
        .saturating_add(skill_bonus)
        .saturating_sub(defender.stats.luck)
        .clamp(0, 100)
}

/// Draws from `[0, 100)` and succeeds iff the draw is `<= pct`.
///
/// A draw equal to `pct` counts as success, so 0% still succeeds on a draw of 0.
pub fn roll(pct: i32, rolls: &mut (impl RollSource + ?Sized)) -> bool {
    let draw = rolls.roll_percent() as i32;
    draw <= pct
}

pub fn hit_roll(hit_rate: i32, rolls: &mut (impl RollSource + ?Sized)) -> bool {
    roll(hit_rate, rolls)
}

pub fn crit_roll(critical_rate: i32, rolls: &mut (impl RollSource + ?Sized)) -> bool {
    roll(critical_rate, rolls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ScriptedRolls;
    use crate::state::{Team, UnitStats, Weapon, WeaponType};

    fn profile(kind: WeaponType, stats: UnitStats) -> UnitCombatProfile {
        UnitCombatProfile {
            name: "unit".into(),
            team: Team::Enemy,
            stats,
            weapon: Weapon::new("weapon", kind, 5),
        }
    }

    fn with_speed(speed: i32) -> UnitCombatProfile {
        profile(
            WeaponType::Sword,
            UnitStats {
                speed,
                ..Default::default()
            },
        )
    }

    #[test]
    fn doubling_threshold() {
        let config = GameConfig::default();
        assert!(can_double_attack(&with_speed(20), &with_speed(14), &config));
        assert!(!can_double_attack(&with_speed(18), &with_speed(14), &config));
        assert!(can_double_attack(&with_speed(19), &with_speed(14), &config));
    }

    #[test]
    fn hit_rate_includes_triangle() {
        let config = GameConfig::default();
        let lance = profile(
            WeaponType::Lance,
            UnitStats {
                hit: 80,
                ..Default::default()
            },
        );
        let sword = profile(
            WeaponType::Sword,
            UnitStats {
                avoid: 30,
                ..Default::default()
            },
        );
        assert_eq!(hit_rate(&lance, &sword, &config), 55);
    }

    #[test]
    fn rates_are_clamped() {
        let config = GameConfig::default();
        let extreme = profile(
            WeaponType::Axe,
            UnitStats {
                hit: i32::MAX,
                crit: i32::MAX,
                skill: i32::MAX,
                avoid: i32::MIN,
                luck: i32::MIN,
                ..Default::default()
            },
        );
        let hopeless = profile(
            WeaponType::Sword,
            UnitStats {
                hit: i32::MIN,
                crit: i32::MIN,
                avoid: i32::MAX,
                luck: i32::MAX,
                ..Default::default()
            },
        );
        for (a, b) in [(&extreme, &hopeless), (&hopeless, &extreme), (&extreme, &extreme)] {
            assert!((0..=100).contains(&hit_rate(a, b, &config)));
            assert!((0..=100).contains(&critical_rate(a, b, &config)));
        }
        assert_eq!(hit_rate(&extreme, &hopeless, &config), 0);
    }

    #[test]
    fn critical_rate_halves_skill() {
        let config = GameConfig::default();
        let attacker = profile(
            WeaponType::Sword,
            UnitStats {
                crit: 5,
                skill: 9,
                ..Default::default()
            },
        );
        let defender = profile(
            WeaponType::Sword,
            UnitStats {
                luck: 3,
                ..Default::default()
            },
        );
        assert_eq!(critical_rate(&attacker, &defender, &config), 6);
    }

    #[test]
    fn roll_boundary_counts_as_success() {
        let mut rolls = ScriptedRolls::new([40, 41, 0, 99]);
        assert!(hit_roll(40, &mut rolls));
        assert!(!hit_roll(40, &mut rolls));
        assert!(crit_roll(0, &mut rolls));
        assert!(crit_roll(100, &mut rolls));
    }
}
