//! Battle calculator.
//!
//! Pure functions over two [`UnitCombatProfile`](crate::state::UnitCombatProfile)s
//! plus a steppable [`BattleSequence`]. The hit and crit rolls are the only
//! randomness and draw through [`RollSource`](crate::env::RollSource).

mod damage;
mod forecast;
mod hit;
mod result;
mod sequence;
mod triangle;

pub use damage::{
    apply_damage, attack_power, power, power_against, power_advantage, remaining_hp_forecast,
    strike_damage,
};
pub use forecast::{BattleForecast, Combatant, CombatantForecast};
pub use hit::{can_double_attack, crit_roll, critical_rate, hit_rate, hit_roll, roll};
pub use result::{AttackOutcome, BattleOutcome, Side, Strike};
pub use sequence::BattleSequence;
pub use triangle::weapon_triangle_factor;

use crate::error::{ErrorSeverity, GameError};
use crate::state::UnitId;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    #[error("unit {0} not found")]
    UnknownUnit(UnitId),

    #[error("unit {0} is already defeated")]
    Defeated(UnitId),

    #[error("units {attacker} and {defender} are on the same team")]
    SameTeam { attacker: UnitId, defender: UnitId },
}

impl GameError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownUnit(_) | Self::SameTeam { .. } => ErrorSeverity::Validation,
            Self::Defeated(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownUnit(_) => "BATTLE_UNKNOWN_UNIT",
            Self::Defeated(_) => "BATTLE_UNIT_DEFEATED",
            Self::SameTeam { .. } => "BATTLE_SAME_TEAM",
        }
    }
}
