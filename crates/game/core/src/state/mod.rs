//! Live battle state: identifiers, units and the battlefield.

mod battlefield;
mod ids;
mod unit;

pub use battlefield::{Battlefield, MoveError};
pub use ids::{NodeId, Position, UnitId};
pub use unit::{
    Playstyle, Team, UnitCombatProfile, UnitState, UnitStats, Weapon, WeaponType,
};
