//! Strike and battle result types.

use crate::state::UnitId;

/// Outcome of a single strike.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    Miss,
    Hit,
    Critical,
}

impl AttackOutcome {
    pub fn landed(self) -> bool {
        !matches!(self, AttackOutcome::Miss)
    }
}

/// Which side of the exchange struck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// The unit that started the battle.
    Attacker,
    Defender,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Attacker => Side::Defender,
            Side::Defender => Side::Attacker,
        }
    }
}

/// One resolved strike.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Strike {
    pub side: Side,
    pub striker: UnitId,
    pub target: UnitId,
    pub outcome: AttackOutcome,
    pub damage: i32,
    /// Target HP after the strike.
    pub target_hp: i32,
}

/// Final state of a resolved battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleOutcome {
    pub attacker: UnitId,
    pub defender: UnitId,
    pub strikes: Vec<Strike>,
    pub attacker_hp: i32,
    pub defender_hp: i32,
}

impl BattleOutcome {
    /// The unit that fell, if any.
    pub fn defeated(&self) -> Option<UnitId> {
        if self.defender_hp <= 0 {
            Some(self.defender)
        } else if self.attacker_hp <= 0 {
            Some(self.attacker)
        } else {
            None
        }
    }
}
