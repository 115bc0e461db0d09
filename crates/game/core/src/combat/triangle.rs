//! Weapon triangle.
//!
//! Axe beats Lance, Lance beats Sword and Tome, Sword beats Axe, Tome beats Axe.

use crate::state::WeaponType;

impl WeaponType {
    /// True when `self` has the triangle advantage over `other`.
    pub fn beats(self, other: WeaponType) -> bool {
        use WeaponType::*;
        matches!(
            (self, other),
            (Axe, Lance) | (Lance, Sword) | (Lance, Tome) | (Sword, Axe) | (Tome, Axe)
        )
    }
}

/// `+bonus` with the advantage, `-bonus` against it, `0` otherwise.
pub fn weapon_triangle_factor(attacker: WeaponType, defender: WeaponType, bonus: i32) -> i32 {
    if attacker.beats(defender) {
        bonus
    } else if defender.beats(attacker) {
        -bonus
    } else {
        0
    }
}
