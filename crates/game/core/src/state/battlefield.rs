//! The battlefield: grid, terrain table and unit arena.
//!
//! Occupancy on the grid is written only through this type, one unit at a
//! time, so a node's occupant always matches some living unit's node.

use crate::combat::{BattleError, BattleForecast, Combatant};
use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::grid::{Grid, TerrainProfile, TerrainTable};
use crate::state::{NodeId, Playstyle, Team, UnitCombatProfile, UnitId, UnitState};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("unit {0} not found")]
    UnknownUnit(UnitId),

    #[error("node {0} does not exist")]
    UnknownNode(NodeId),

    #[error("unit {0} is defeated")]
    UnitDefeated(UnitId),

    #[error("node {node} is occupied by {by}")]
    Occupied { node: NodeId, by: UnitId },

    #[error("node {node} is outside the movement range of {unit}")]
    OutOfReach { unit: UnitId, node: NodeId },

    #[error("unit {0} has already acted this phase")]
    AlreadyActed(UnitId),
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownUnit(_) | Self::UnknownNode(_) => ErrorSeverity::Validation,
            Self::UnitDefeated(_) | Self::AlreadyActed(_) => ErrorSeverity::Validation,
            Self::Occupied { .. } | Self::OutOfReach { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownUnit(_) => "MOVE_UNKNOWN_UNIT",
            Self::UnknownNode(_) => "MOVE_UNKNOWN_NODE",
            Self::UnitDefeated(_) => "MOVE_UNIT_DEFEATED",
            Self::Occupied { .. } => "MOVE_OCCUPIED",
            Self::OutOfReach { .. } => "MOVE_OUT_OF_REACH",
            Self::AlreadyActed(_) => "MOVE_ALREADY_ACTED",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Battlefield {
    grid: Grid,
    terrain: TerrainTable,
    units: Vec<UnitState>,
}

impl Battlefield {
    pub fn new(grid: Grid, terrain: TerrainTable) -> Self {
        Self {
            grid,
            terrain,
            units: Vec::new(),
        }
    }

    /// Places a new unit on `node`.
    pub fn spawn(
        &mut self,
        profile: UnitCombatProfile,
        node: NodeId,
        playstyle: Playstyle,
    ) -> Result<UnitId, MoveError> {
        if !self.grid.contains(node) {
            return Err(MoveError::UnknownNode(node));
        }
        if let Some(by) = self.grid.occupant(node) {
            return Err(MoveError::Occupied { node, by });
        }

        let id = UnitId(self.units.len() as u32);
        self.units.push(UnitState::new(id, profile, node, playstyle));
        self.occupy(node, Some(id))?;
        Ok(id)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn terrain_table(&self) -> &TerrainTable {
        &self.terrain
    }

    pub fn units(&self) -> &[UnitState] {
        &self.units
    }

    pub fn unit(&self, id: UnitId) -> Option<&UnitState> {
        self.units.get(id.index())
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut UnitState> {
        self.units.get_mut(id.index())
    }

    pub fn require(&self, id: UnitId) -> Result<&UnitState, MoveError> {
        self.unit(id).ok_or(MoveError::UnknownUnit(id))
    }

    /// Living units of `team`, in spawn order.
    pub fn living(&self, team: Team) -> impl Iterator<Item = &UnitState> {
        self.units
            .iter()
            .filter(move |u| u.team() == team && u.is_alive())
    }

    pub fn unit_at(&self, node: NodeId) -> Option<&UnitState> {
        self.grid.occupant(node).and_then(|id| self.unit(id))
    }

    /// Terrain modifiers of `node`; plain ground for unknown nodes.
    pub fn terrain_at(&self, node: NodeId) -> TerrainProfile {
        self.grid
            .terrain(node)
            .map(|kind| self.terrain.profile(kind))
            .unwrap_or_default()
    }

    /// Rebuilds occupancy from the living units' positions.
    pub fn update_occupancy(&mut self) {
        self.grid.clear_occupants();
        for unit in self.units.iter().filter(|u| u.is_alive()) {
            match self.grid.occupant(unit.node()) {
                Some(other) => tracing::warn!(
                    unit = %unit.id(),
                    %other,
                    node = %unit.node(),
                    "two units share a node; keeping the first"
                ),
                None => {
                    // Node ids on units are validated on spawn and step.
                    let _ = self.grid.set_occupant(unit.node(), Some(unit.id()));
                }
            }
        }
        tracing::trace!("occupancy refreshed");
    }

    /// Removes `unit` from the node it occupies, if it does.
    pub fn vacate(&mut self, unit: UnitId) -> Result<(), MoveError> {
        let node = self.require(unit)?.node();
        if self.grid.occupant(node) == Some(unit) {
            self.occupy(node, None)?;
        }
        Ok(())
    }

    /// Moves the unit's position without touching occupancy (mid-walk).
    pub fn step(&mut self, unit: UnitId, node: NodeId) -> Result<(), MoveError> {
        if !self.grid.contains(node) {
            return Err(MoveError::UnknownNode(node));
        }
        self.unit_mut(unit)
            .ok_or(MoveError::UnknownUnit(unit))?
            .set_node(node);
        Ok(())
    }

    /// Claims the unit's current node.
    pub fn settle(&mut self, unit: UnitId) -> Result<(), MoveError> {
        let state = self.require(unit)?;
        if !state.is_alive() {
            return Err(MoveError::UnitDefeated(unit));
        }
        let node = state.node();
        if let Some(by) = self.grid.occupant(node).filter(|&by| by != unit) {
            return Err(MoveError::Occupied { node, by });
        }
        self.occupy(node, Some(unit))
    }

    /// Moves a unit to `to` in one step.
    pub fn relocate(&mut self, unit: UnitId, to: NodeId) -> Result<(), MoveError> {
        if !self.grid.contains(to) {
            return Err(MoveError::UnknownNode(to));
        }
        if let Some(by) = self.grid.occupant(to).filter(|&by| by != unit) {
            return Err(MoveError::Occupied { node: to, by });
        }
        self.vacate(unit)?;
        self.step(unit, to)?;
        self.settle(unit)
    }

    /// Battle view of a living unit.
    pub fn combatant(&self, id: UnitId) -> Result<Combatant<'_>, BattleError> {
        let unit = self.unit(id).ok_or(BattleError::UnknownUnit(id))?;
        if !unit.is_alive() {
            return Err(BattleError::Defeated(id));
        }
        Ok(Combatant {
            id,
            profile: unit.profile(),
            current_hp: unit.current_hp(),
            terrain: self.terrain_at(unit.node()),
        })
    }

    pub fn forecast(
        &self,
        attacker: UnitId,
        defender: UnitId,
        config: &GameConfig,
    ) -> Result<BattleForecast, BattleError> {
        let a = self.combatant(attacker)?;
        let d = self.combatant(defender)?;
        if a.profile.team == d.profile.team {
            return Err(BattleError::SameTeam { attacker, defender });
        }
        Ok(BattleForecast::compute(&a, &d, config))
    }

    /// Writes battle HP back; a unit at 0 HP leaves the grid.
    pub fn set_hp(&mut self, unit: UnitId, hp: i32) -> Result<(), MoveError> {
        let state = self.unit_mut(unit).ok_or(MoveError::UnknownUnit(unit))?;
        state.set_current_hp(hp);
        if !state.is_alive() {
            self.vacate(unit)?;
        }
        Ok(())
    }

    /// Heals living units of `team` standing on healing terrain.
    ///
    /// Returns `(unit, restored)` for every unit that regained HP.
    pub fn apply_terrain_effects(&mut self, team: Team) -> Vec<(UnitId, i32)> {
        let mut healed = Vec::new();
        for index in 0..self.units.len() {
            let (node, max_hp) = {
                let unit = &self.units[index];
                if unit.team() != team || !unit.is_alive() {
                    continue;
                }
                (unit.node(), unit.max_hp())
            };
            let percentage = self.terrain_at(node).heal_percentage as i32;
            if percentage == 0 {
                continue;
            }
            let unit = &mut self.units[index];
            let restored = unit.heal(max_hp.saturating_mul(percentage) / 100);
            if restored > 0 {
                healed.push((unit.id(), restored));
            }
        }
        healed
    }

    /// Clears `has_acted` for every unit of `team`.
    pub fn reset_actions(&mut self, team: Team) {
        for unit in self.units.iter_mut().filter(|u| u.team() == team) {
            unit.set_has_acted(false);
        }
    }

    /// True when every living unit of `team` has acted.
    pub fn all_acted(&self, team: Team) -> bool {
        self.living(team).all(UnitState::has_acted)
    }

    fn occupy(&mut self, node: NodeId, occupant: Option<UnitId>) -> Result<(), MoveError> {
        self.grid
            .set_occupant(node, occupant)
            .map_err(|_| MoveError::UnknownNode(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{MapDimensions, TerrainKind};
    use crate::state::{Position, UnitStats, Weapon, WeaponType};

    fn profile(team: Team, hp: i32) -> UnitCombatProfile {
        UnitCombatProfile {
            name: format!("{team} unit"),
            team,
            stats: UnitStats {
                hp,
                strength: 6,
                movement: 5,
                hit: 80,
                ..Default::default()
            },
            weapon: Weapon::new("Iron Lance", WeaponType::Lance, 7),
        }
    }

    fn field() -> Battlefield {
        use TerrainKind::*;
        let config = GameConfig::default();
        let table = TerrainTable::standard();
        let grid = Grid::from_terrain(
            MapDimensions::new(3, 1),
            &[Plain, Fort, Plain],
            &table,
            &config,
        )
        .unwrap();
        Battlefield::new(grid, table)
    }

    #[test]
    fn spawn_claims_node() {
        let mut field = field();
        let id = field
            .spawn(profile(Team::Player, 20), NodeId(0), Playstyle::Normal)
            .unwrap();
        assert_eq!(field.unit_at(NodeId(0)).map(UnitState::id), Some(id));

        let err = field
            .spawn(profile(Team::Enemy, 20), NodeId(0), Playstyle::Normal)
            .unwrap_err();
        assert_eq!(err, MoveError::Occupied { node: NodeId(0), by: id });
    }

    #[test]
    fn relocate_moves_occupancy() {
        let mut field = field();
        let a = field
            .spawn(profile(Team::Player, 20), NodeId(0), Playstyle::Normal)
            .unwrap();
        let b = field
            .spawn(profile(Team::Enemy, 20), NodeId(2), Playstyle::Normal)
            .unwrap();

        field.relocate(a, NodeId(1)).unwrap();
        assert_eq!(field.grid().occupant(NodeId(0)), None);
        assert_eq!(field.grid().occupant(NodeId(1)), Some(a));
        assert_eq!(
            field.relocate(b, NodeId(1)),
            Err(MoveError::Occupied { node: NodeId(1), by: a })
        );
    }

    #[test]
    fn dead_units_leave_the_grid() {
        let mut field = field();
        let a = field
            .spawn(profile(Team::Enemy, 20), NodeId(2), Playstyle::Normal)
            .unwrap();
        field.set_hp(a, 0).unwrap();

        assert_eq!(field.grid().occupant(NodeId(2)), None);
        field.update_occupancy();
        assert_eq!(field.grid().occupant(NodeId(2)), None);
        assert_eq!(field.living(Team::Enemy).count(), 0);
    }

    #[test]
    fn fort_heals_its_team_at_phase_start() {
        let mut field = field();
        let a = field
            .spawn(profile(Team::Enemy, 30), NodeId(1), Playstyle::Normal)
            .unwrap();
        field.set_hp(a, 10).unwrap();

        assert!(field.apply_terrain_effects(Team::Player).is_empty());
        assert_eq!(field.apply_terrain_effects(Team::Enemy), vec![(a, 6)]);
        assert_eq!(field.unit(a).unwrap().current_hp(), 16);
    }

    #[test]
    fn forecast_rejects_teammates() {
        let mut field = field();
        let a = field
            .spawn(profile(Team::Enemy, 20), NodeId(0), Playstyle::Normal)
            .unwrap();
        let b = field
            .spawn(profile(Team::Enemy, 20), NodeId(2), Playstyle::Normal)
            .unwrap();
        assert_eq!(
            field.forecast(a, b, &GameConfig::default()),
            Err(BattleError::SameTeam { attacker: a, defender: b })
        );
    }

    #[test]
    fn defender_terrain_reduces_damage() {
        let mut field = field();
        let a = field
            .spawn(profile(Team::Enemy, 20), NodeId(0), Playstyle::Normal)
            .unwrap();
        let b = field
            .spawn(profile(Team::Player, 20), NodeId(1), Playstyle::Normal)
            .unwrap();
        let forecast = field.forecast(a, b, &GameConfig::default()).unwrap();
        // 6 + 7 - (0 + fort 2)
        assert_eq!(forecast.attacker.attack_power, 11);
        assert_eq!(field.grid().position(NodeId(1)), Some(Position::new(1, 0)));
    }

    #[test]
    fn acted_flags_reset_per_team() {
        let mut field = field();
        let a = field
            .spawn(profile(Team::Player, 20), NodeId(0), Playstyle::Normal)
            .unwrap();
        field.unit_mut(a).unwrap().set_has_acted(true);
        assert!(field.all_acted(Team::Player));

        field.reset_actions(Team::Player);
        assert!(!field.all_acted(Team::Player));
    }
}
