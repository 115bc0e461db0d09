//! Battle forecast: the numbers shown before committing to an attack.

use crate::config::GameConfig;
use crate::grid::TerrainProfile;
use crate::state::{UnitCombatProfile, UnitId};

use super::damage::{attack_power, remaining_hp_forecast};
use super::hit::{can_double_attack, critical_rate, hit_rate};

/// One side of a battle as the calculator sees it.
#[derive(Clone, Copy, Debug)]
pub struct Combatant<'a> {
    pub id: UnitId,
    pub profile: &'a UnitCombatProfile,
    pub current_hp: i32,
    /// Terrain the unit stands on.
    pub terrain: TerrainProfile,
}

/// Forecast values for one side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantForecast {
    pub unit: UnitId,
    pub current_hp: i32,
    /// Damage per landed, non-critical strike.
    pub attack_power: i32,
    pub hit_rate: i32,
    pub crit_rate: i32,
    pub doubles: bool,
    /// This side's HP if every opposing strike lands without a crit.
    pub hp_after: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleForecast {
    pub attacker: CombatantForecast,
    pub defender: CombatantForecast,
}

impl BattleForecast {
    pub fn compute(attacker: &Combatant<'_>, defender: &Combatant<'_>, config: &GameConfig) -> Self {
        let attacker_power = attack_power(attacker.profile, defender.profile, &defender.terrain);
        let defender_power = attack_power(defender.profile, attacker.profile, &attacker.terrain);
        let attacker_doubles = can_double_attack(attacker.profile, defender.profile, config);
        let defender_doubles = can_double_attack(defender.profile, attacker.profile, config);

        Self {
            attacker: CombatantForecast {
                unit: attacker.id,
                current_hp: attacker.current_hp,
                attack_power: attacker_power,
                hit_rate: hit_rate(attacker.profile, defender.profile, config),
                crit_rate: critical_rate(attacker.profile, defender.profile, config),
                doubles: attacker_doubles,
                hp_after: remaining_hp_forecast(
                    attacker.current_hp,
                    defender_power,
                    defender_doubles,
                    config,
                ),
            },
            defender: CombatantForecast {
                unit: defender.id,
                current_hp: defender.current_hp,
                attack_power: defender_power,
                hit_rate: hit_rate(defender.profile, attacker.profile, config),
                crit_rate: critical_rate(defender.profile, attacker.profile, config),
                doubles: defender_doubles,
                hp_after: remaining_hp_forecast(
                    defender.current_hp,
                    attacker_power,
                    attacker_doubles,
                    config,
                ),
            },
        }
    }
}
