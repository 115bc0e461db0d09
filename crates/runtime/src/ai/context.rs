//! AI context for desirability-based decision making.
//!
//! The [`AiContext`] is the blackboard for one enemy unit's turn. It is built
//! by [`AiContext::observe`] when the turn starts and provides:
//!
//! - The unit's movement range (computed once and reused by every leaf)
//! - Visible opposing units and notable terrain, with step distances
//! - The safest reachable tile
//! - Target selection and attack-spot lookup
//! - The memoized desirability decision for this turn

use tactics_content::DesirabilityProfile;
use tactics_core::combat::power_advantage;
use tactics_core::{
    Battlefield, GameConfig, GridError, MovementRange, NodeId, PathSolver, RollSource,
    TerrainKind, UnitId,
};

use super::scoring::{self, Situation};
use super::types::{AiAction, Desirabilities, VisibleTerrain, VisibleUnit};
use crate::error::Result;

/// Per-unit AI state for one turn.
#[derive(Debug, Clone)]
pub struct AiContext {
    unit: UnitId,
    range: Option<MovementRange>,
    visible_units: Vec<VisibleUnit>,
    visible_terrain: Vec<VisibleTerrain>,
    safe_spot: Option<NodeId>,
    target: Option<UnitId>,
    next_target_override: bool,
    desirabilities: Desirabilities,
    decision: Option<AiAction>,
    has_attacked: bool,
}

impl AiContext {
    /// A context that sees nothing.
    ///
    /// Used when observation fails; the tree then falls through to its
    /// default branch.
    pub fn blind(unit: UnitId) -> Self {
        Self {
            unit,
            range: None,
            visible_units: Vec::new(),
            visible_terrain: Vec::new(),
            safe_spot: None,
            target: None,
            next_target_override: false,
            desirabilities: Desirabilities::default(),
            decision: None,
            has_attacked: false,
        }
    }

    /// Scans the unit's surroundings.
    ///
    /// Everything is measured from the node the unit stands on when its turn
    /// starts.
    pub fn observe(unit: UnitId, battlefield: &Battlefield, solver: &mut PathSolver) -> Result<Self> {
        let me = battlefield.require(unit)?;
        let team = me.team();
        let range = solver.compute_movement_range(
            battlefield.grid(),
            me.node(),
            me.stats().movement,
            me.weapon().max_range,
        )?;

        let mut visible_units = Vec::new();
        let mut visible_terrain = Vec::new();
        for &node in range.reachable() {
            let Some(distance) = range.steps_to(node) else {
                continue;
            };
            if let Some(other) = battlefield.unit_at(node)
                && other.team() != team
                && other.is_alive()
            {
                visible_units.push(VisibleUnit {
                    unit: other.id(),
                    node,
                    distance,
                    wounded: other.is_damaged(),
                });
            }
            if let Some(kind) = battlefield.grid().terrain(node)
                && kind.is_notable()
            {
                visible_terrain.push(VisibleTerrain {
                    node,
                    kind,
                    distance,
                });
            }
        }

        let safe_spot = find_safe_spot(unit, battlefield, solver, &range, &visible_units)?;

        tracing::debug!(
            %unit,
            visible_units = visible_units.len(),
            visible_terrain = visible_terrain.len(),
            safe_spot = ?safe_spot,
            "surroundings observed"
        );

        Ok(Self {
            range: Some(range),
            visible_units,
            visible_terrain,
            safe_spot,
            ..Self::blind(unit)
        })
    }

    pub fn unit(&self) -> UnitId {
        self.unit
    }

    pub fn range(&self) -> Option<&MovementRange> {
        self.range.as_ref()
    }

    pub fn visible_units(&self) -> &[VisibleUnit] {
        &self.visible_units
    }

    pub fn visible_terrain(&self) -> &[VisibleTerrain] {
        &self.visible_terrain
    }

    pub fn are_enemies_visible(&self) -> bool {
        !self.visible_units.is_empty()
    }

    pub fn target(&self) -> Option<UnitId> {
        self.target
    }

    pub fn next_target_override(&self) -> bool {
        self.next_target_override
    }

    pub fn set_next_target_override(&mut self, value: bool) {
        self.next_target_override = value;
    }

    pub fn has_attacked(&self) -> bool {
        self.has_attacked
    }

    pub fn mark_attacked(&mut self) {
        self.has_attacked = true;
    }

    pub fn desirabilities(&self) -> Desirabilities {
        self.desirabilities
    }

    /// Steps from the unit's starting node to `node`.
    pub fn distance_to(&self, node: NodeId) -> Option<u32> {
        self.range.as_ref()?.steps_to(node)
    }

    /// Cheapest path from the starting node, both ends inclusive.
    pub fn path_to(&self, node: NodeId) -> Vec<NodeId> {
        self.range
            .as_ref()
            .map(|range| range.reconstruct_path(node))
            .unwrap_or_default()
    }

    pub fn nearest_fort(&self) -> Option<VisibleTerrain> {
        self.visible_terrain
            .iter()
            .filter(|t| t.kind == TerrainKind::Fort)
            .min_by_key(|t| t.distance)
            .copied()
    }

    pub fn nearest_enemy(&self) -> Option<VisibleUnit> {
        self.visible_units.iter().min_by_key(|v| v.distance).copied()
    }

    /// The reachable tile farthest from every visible enemy.
    pub fn safe_spot(&self) -> Option<NodeId> {
        self.safe_spot
    }

    /// Scores the four actions and memoizes the winner for this turn.
    ///
    /// Later calls return the memoized decision without rolling again, so every
    /// check leaf agrees for the whole turn.
    pub fn decide(
        &mut self,
        battlefield: &Battlefield,
        profile: &DesirabilityProfile,
        config: &GameConfig,
        rolls: &mut dyn RollSource,
    ) -> AiAction {
        if let Some(decision) = self.decision {
            return decision;
        }

        self.desirabilities = match self.situation(battlefield, config) {
            Some(situation) => scoring::score_all(&situation, profile),
            None => Desirabilities::default(),
        };
        let decision = scoring::highest_action(&self.desirabilities, rolls);
        self.decision = Some(decision);

        tracing::debug!(
            unit = %self.unit,
            retreat = self.desirabilities.retreat,
            fort = self.desirabilities.fort,
            attack = self.desirabilities.attack,
            wait = self.desirabilities.wait,
            %decision,
            "desirabilities computed"
        );
        decision
    }

    /// The memoized decision, if [`decide`](Self::decide) has run.
    pub fn decision(&self) -> Option<AiAction> {
        self.decision
    }

    fn situation(&self, battlefield: &Battlefield, config: &GameConfig) -> Option<Situation> {
        let me = battlefield.unit(self.unit)?;
        let nearest_enemy = self.nearest_enemy();
        let power = nearest_enemy
            .and_then(|enemy| battlefield.unit(enemy.unit))
            .map(|enemy| power_advantage(me.profile(), enemy.profile(), config));

        Some(Situation {
            current_hp: me.current_hp(),
            max_hp: me.max_hp(),
            movement: me.stats().movement,
            fort_distance: self.nearest_fort().map(|fort| fort.distance),
            safe_spot_distance: self.safe_spot.and_then(|spot| self.distance_to(spot)),
            enemy_distance: nearest_enemy.map(|enemy| enemy.distance),
            power_advantage: power,
        })
    }

    /// Picks who to attack.
    ///
    /// Keeps the current target while the next-target override is set;
    /// otherwise prefers the nearest wounded unit, then the nearest unit.
    pub fn best_target(&mut self) -> Option<UnitId> {
        if self.next_target_override && self.target.is_some() {
            return self.target;
        }

        let wounded = self
            .visible_units
            .iter()
            .filter(|v| v.wounded)
            .min_by_key(|v| v.distance);
        self.target = wounded
            .or_else(|| self.visible_units.iter().min_by_key(|v| v.distance))
            .map(|v| v.unit);
        self.target
    }

    /// Switches to the first other visible unit that has an attack spot, and
    /// sets the override so the choice sticks.
    pub fn next_target(&mut self, battlefield: &Battlefield) -> Option<UnitId> {
        let current = self.target;
        let next = self
            .visible_units
            .iter()
            .filter(|v| Some(v.unit) != current)
            .find(|v| !self.attack_spots(battlefield, v.unit).is_empty())?
            .unit;
        self.target = Some(next);
        self.next_target_override = true;
        Some(next)
    }

    /// Tiles next to `target` this unit can attack from.
    ///
    /// A cardinal neighbor of the target qualifies when it is the unit's own
    /// tile, or reachable and free.
    pub fn attack_spots(&self, battlefield: &Battlefield, target: UnitId) -> Vec<NodeId> {
        let (Some(range), Some(target)) = (self.range.as_ref(), battlefield.unit(target)) else {
            return Vec::new();
        };
        let grid = battlefield.grid();
        grid.neighbors(target.node())
            .iter()
            .copied()
            .filter(|&node| {
                node == range.start()
                    || (range.is_reachable(node) && !grid.is_blocked_for(node, self.unit))
            })
            .collect()
    }

    /// The spot to attack `target` from: the own tile if possible, else a
    /// random qualifying spot.
    pub fn attack_spot(
        &self,
        battlefield: &Battlefield,
        target: UnitId,
        rolls: &mut dyn RollSource,
    ) -> Option<NodeId> {
        let spots = self.attack_spots(battlefield, target);
        let start = self.range.as_ref()?.start();
        if spots.contains(&start) {
            return Some(start);
        }
        rolls.pick(spots.len()).and_then(|i| spots.get(i).copied())
    }
}

/// Reachable, unoccupied tile maximizing the smallest step distance to any
/// visible enemy. Ties keep the tile discovered first.
fn find_safe_spot(
    unit: UnitId,
    battlefield: &Battlefield,
    solver: &mut PathSolver,
    range: &MovementRange,
    visible_units: &[VisibleUnit],
) -> std::result::Result<Option<NodeId>, GridError> {
    if visible_units.is_empty() {
        return Ok(None);
    }

    let grid = battlefield.grid();
    let fields = visible_units
        .iter()
        .map(|enemy| solver.flood(grid, enemy.node))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut best: Option<(NodeId, u32)> = None;
    for &node in range.reachable() {
        if grid.is_blocked_for(node, unit) {
            continue;
        }
        let margin = fields
            .iter()
            .filter_map(|field| field.steps_to(node))
            .min()
            .unwrap_or(u32::MAX);
        if best.is_none_or(|(_, top)| margin > top) {
            best = Some((node, margin));
        }
    }

    Ok(best.map(|(node, _)| node))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::{
        Grid, MapDimensions, Playstyle, Position, ScriptedRolls, Team, TerrainTable,
        UnitCombatProfile, UnitStats, Weapon, WeaponType,
    };

    fn profile(name: &str, team: Team, hp: i32) -> UnitCombatProfile {
        UnitCombatProfile {
            name: name.to_string(),
            team,
            stats: UnitStats {
                hp,
                attack: 6,
                strength: 6,
                speed: 5,
                hit: 80,
                movement: 3,
                ..UnitStats::default()
            },
            weapon: Weapon::new("Iron Sword", WeaponType::Sword, 5),
        }
    }

    fn field(tiles: &[(i32, i32, TerrainKind)]) -> Battlefield {
        let config = GameConfig::default();
        let table = TerrainTable::standard();
        let dims = MapDimensions::new(7, 1);
        let mut terrain = vec![TerrainKind::Plain; dims.tile_count()];
        for &(x, y, kind) in tiles {
            if let Some(i) = dims.index_of(Position::new(x, y)) {
                terrain[i] = kind;
            }
        }
        let grid = Grid::from_terrain(dims, &terrain, &table, &config).unwrap();
        Battlefield::new(grid, table)
    }

    fn spawn(bf: &mut Battlefield, p: UnitCombatProfile, x: i32) -> UnitId {
        let node = bf.grid().id_at(Position::new(x, 0)).unwrap();
        bf.spawn(p, node, Playstyle::Normal).unwrap()
    }

    #[test]
    fn sees_enemies_and_forts_in_reach() {
        let mut bf = field(&[(1, 0, TerrainKind::Fort), (6, 0, TerrainKind::Fort)]);
        let me = spawn(&mut bf, profile("Brigand", Team::Enemy, 20), 3);
        let near = spawn(&mut bf, profile("Lyn", Team::Player, 20), 5);
        spawn(&mut bf, profile("Kent", Team::Player, 20), 0);
        let mut solver = PathSolver::new(&GameConfig::default());

        let ctx = AiContext::observe(me, &bf, &mut solver).unwrap();

        assert_eq!(ctx.visible_units().len(), 1);
        assert_eq!(ctx.nearest_enemy().map(|v| (v.unit, v.distance)), Some((near, 2)));
        let fort = ctx.nearest_fort().unwrap();
        assert_eq!(bf.grid().position(fort.node), Some(Position::new(1, 0)));
        assert_eq!(fort.distance, 2);
    }

    #[test]
    fn safe_spot_maximizes_distance_from_enemy() {
        let mut bf = field(&[]);
        let me = spawn(&mut bf, profile("Brigand", Team::Enemy, 20), 3);
        spawn(&mut bf, profile("Lyn", Team::Player, 20), 5);
        let mut solver = PathSolver::new(&GameConfig::default());

        let ctx = AiContext::observe(me, &bf, &mut solver).unwrap();
        let spot = ctx.safe_spot().unwrap();
        assert_eq!(bf.grid().position(spot), Some(Position::new(0, 0)));
        assert_eq!(ctx.distance_to(spot), Some(3));
    }

    #[test]
    fn prefers_wounded_targets_until_overridden() {
        let mut bf = field(&[]);
        let me = spawn(&mut bf, profile("Brigand", Team::Enemy, 20), 3);
        let healthy = spawn(&mut bf, profile("Lyn", Team::Player, 20), 4);
        let wounded = spawn(&mut bf, profile("Kent", Team::Player, 20), 1);
        bf.set_hp(wounded, 5).unwrap();
        let mut solver = PathSolver::new(&GameConfig::default());

        let mut ctx = AiContext::observe(me, &bf, &mut solver).unwrap();
        assert_eq!(ctx.best_target(), Some(wounded));

        assert_eq!(ctx.next_target(&bf), Some(healthy));
        assert!(ctx.next_target_override());
        assert_eq!(ctx.best_target(), Some(healthy));
    }

    #[test]
    fn own_tile_is_the_preferred_attack_spot() {
        let mut bf = field(&[]);
        let me = spawn(&mut bf, profile("Brigand", Team::Enemy, 20), 3);
        let target = spawn(&mut bf, profile("Lyn", Team::Player, 20), 4);
        let mut solver = PathSolver::new(&GameConfig::default());

        let ctx = AiContext::observe(me, &bf, &mut solver).unwrap();
        let spots = ctx.attack_spots(&bf, target);
        assert_eq!(spots.len(), 2);

        let own = bf.unit(me).unwrap().node();
        let mut rolls = ScriptedRolls::constant(1);
        assert_eq!(ctx.attack_spot(&bf, target, &mut rolls), Some(own));
    }

    #[test]
    fn decision_is_memoized() {
        let mut bf = field(&[]);
        let me = spawn(&mut bf, profile("Brigand", Team::Enemy, 20), 3);
        let mut solver = PathSolver::new(&GameConfig::default());
        let config = GameConfig::default();
        let weights = DesirabilityProfile::new(0.5, 0.5, 0.5, 0.5, 0.5);

        let mut ctx = AiContext::observe(me, &bf, &mut solver).unwrap();
        let mut rolls = ScriptedRolls::default();
        assert_eq!(ctx.decide(&bf, &weights, &config, &mut rolls), AiAction::Wait);
        assert_eq!(ctx.desirabilities().wait, 100);

        bf.set_hp(me, 1).unwrap();
        assert_eq!(ctx.decide(&bf, &weights, &config, &mut rolls), AiAction::Wait);
        assert_eq!(ctx.decision(), Some(AiAction::Wait));
    }
}
