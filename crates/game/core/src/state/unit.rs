//! Unit profiles and live unit state.

use strum::{Display, EnumIter};

use crate::state::{NodeId, UnitId};

/// Side a unit fights for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Team {
    Player,
    Enemy,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::Player => Team::Enemy,
            Team::Enemy => Team::Player,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeaponType {
    Sword,
    Lance,
    Axe,
    /// Magic: uses Magic against Resistance.
    Tome,
}

impl WeaponType {
    pub fn is_magic(self) -> bool {
        self == WeaponType::Tome
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    pub name: String,
    pub kind: WeaponType,
    pub might: i32,
    pub min_range: u32,
    pub max_range: u32,
}

impl Weapon {
    pub fn new(name: impl Into<String>, kind: WeaponType, might: i32) -> Self {
        Self {
            name: name.into(),
            kind,
            might,
            min_range: 1,
            max_range: 1,
        }
    }

    pub fn with_range(mut self, min_range: u32, max_range: u32) -> Self {
        self.min_range = min_range;
        self.max_range = max_range;
        self
    }
}

/// Base stats. `hp` is the maximum; live HP is tracked on [`UnitState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UnitStats {
    pub hp: i32,
    pub attack: i32,
    pub speed: i32,
    pub skill: i32,
    pub luck: i32,
    pub defense: i32,
    pub resistance: i32,
    pub magic: i32,
    pub strength: i32,
    pub hit: i32,
    pub avoid: i32,
    pub crit: i32,
    pub movement: u32,
}

/// Named AI weight preset a unit plays with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Playstyle {
    Aggressive,
    #[default]
    Normal,
    Easy,
    VeryEasy,
}

/// Everything the battle math needs to know about a unit.
///
/// Immutable during a battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitCombatProfile {
    pub name: String,
    pub team: Team,
    pub stats: UnitStats,
    pub weapon: Weapon,
}

/// A unit on the battlefield.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitState {
    id: UnitId,
    profile: UnitCombatProfile,
    current_hp: i32,
    node: NodeId,
    has_acted: bool,
    playstyle: Playstyle,
}

impl UnitState {
    pub fn new(id: UnitId, profile: UnitCombatProfile, node: NodeId, playstyle: Playstyle) -> Self {
        let current_hp = profile.stats.hp.max(0);
        Self {
            id,
            profile,
            current_hp,
            node,
            has_acted: false,
            playstyle,
        }
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn profile(&self) -> &UnitCombatProfile {
        &self.profile
    }

    pub fn name(&self) -> &str {
        &self.profile.name
    }

    pub fn team(&self) -> Team {
        self.profile.team
    }

    pub fn stats(&self) -> &UnitStats {
        &self.profile.stats
    }

    pub fn weapon(&self) -> &Weapon {
        &self.profile.weapon
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn max_hp(&self) -> i32 {
        self.profile.stats.hp
    }

    pub fn current_hp(&self) -> i32 {
        self.current_hp
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    /// True once the unit has lost any HP.
    pub fn is_damaged(&self) -> bool {
        self.current_hp < self.max_hp()
    }

    pub fn has_acted(&self) -> bool {
        self.has_acted
    }

    pub fn playstyle(&self) -> Playstyle {
        self.playstyle
    }

    pub fn set_playstyle(&mut self, playstyle: Playstyle) {
        self.playstyle = playstyle;
    }

    pub fn set_has_acted(&mut self, has_acted: bool) {
        self.has_acted = has_acted;
    }

    /// Sets live HP, clamped to `[0, max_hp]`.
    pub fn set_current_hp(&mut self, hp: i32) {
        self.current_hp = hp.clamp(0, self.max_hp().max(0));
    }

    /// Restores up to `amount` HP and returns how much was actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.current_hp;
        self.set_current_hp(before.saturating_add(amount.max(0)));
        self.current_hp - before
    }

    pub(crate) fn set_node(&mut self, node: NodeId) {
        self.node = node;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(hp: i32) -> UnitState {
        let profile = UnitCombatProfile {
            name: "Test".into(),
            team: Team::Enemy,
            stats: UnitStats {
                hp,
                ..UnitStats::default()
            },
            weapon: Weapon::new("Iron Axe", WeaponType::Axe, 8),
        };
        UnitState::new(UnitId(0), profile, NodeId(0), Playstyle::Normal)
    }

    #[test]
    fn hp_is_clamped() {
        let mut u = unit(20);
        u.set_current_hp(-5);
        assert_eq!(u.current_hp(), 0);
        assert!(!u.is_alive());

        u.set_current_hp(50);
        assert_eq!(u.current_hp(), 20);
        assert!(!u.is_damaged());
    }

    #[test]
    fn heal_reports_restored_amount() {
        let mut u = unit(20);
        u.set_current_hp(15);
        assert_eq!(u.heal(10), 5);
        assert_eq!(u.current_hp(), 20);
    }

    #[test]
    fn teams_oppose() {
        assert_eq!(Team::Player.opponent(), Team::Enemy);
        assert_eq!(Team::Enemy.opponent(), Team::Player);
    }
}
