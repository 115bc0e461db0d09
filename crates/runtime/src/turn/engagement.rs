//! A battle spread over ticks, one strike at a time.

use tactics_core::{
    Battlefield, BattleError, BattleForecast, BattleOutcome, BattleSequence, GameConfig,
    MoveError, RollSource, Strike, UnitId,
};

/// A battle between two units in progress on the battlefield.
///
/// Every strike writes the target's HP back immediately, so a unit killed
/// mid-battle leaves the grid before the next strike would be played.
#[derive(Debug, Clone)]
pub struct Engagement {
    sequence: BattleSequence,
    elapsed: u32,
    ticks_per_strike: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngagementProgress {
    Pending,
    Struck(Strike),
    Concluded,
}

impl Engagement {
    pub fn start(
        battlefield: &Battlefield,
        attacker: UnitId,
        defender: UnitId,
        config: &GameConfig,
        ticks_per_strike: u32,
    ) -> Result<Self, BattleError> {
        let forecast = battlefield.forecast(attacker, defender, config)?;
        Ok(Self {
            sequence: BattleSequence::new(forecast, config),
            elapsed: 0,
            ticks_per_strike: ticks_per_strike.max(1),
        })
    }

    pub fn forecast(&self) -> &BattleForecast {
        self.sequence.forecast()
    }

    pub fn is_finished(&self) -> bool {
        self.sequence.is_finished()
    }

    /// Advances one tick, striking once every `ticks_per_strike` ticks.
    pub fn advance(
        &mut self,
        battlefield: &mut Battlefield,
        rolls: &mut dyn RollSource,
    ) -> Result<EngagementProgress, MoveError> {
        if self.sequence.is_finished() {
            return Ok(EngagementProgress::Concluded);
        }

        self.elapsed += 1;
        if self.elapsed < self.ticks_per_strike {
            return Ok(EngagementProgress::Pending);
        }
        self.elapsed = 0;

        match self.sequence.next_strike(rolls) {
            Some(strike) => {
                battlefield.set_hp(strike.target, strike.target_hp)?;
                Ok(EngagementProgress::Struck(strike))
            }
            None => Ok(EngagementProgress::Concluded),
        }
    }

    /// Plays every remaining strike at once.
    pub fn resolve(
        mut self,
        battlefield: &mut Battlefield,
        rolls: &mut dyn RollSource,
    ) -> Result<BattleOutcome, MoveError> {
        self.ticks_per_strike = 1;
        while self.advance(battlefield, rolls)? != EngagementProgress::Concluded {}
        Ok(self.into_outcome())
    }

    pub fn into_outcome(self) -> BattleOutcome {
        self.sequence.into_outcome()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::{
        Grid, MapDimensions, Playstyle, ScriptedRolls, Team, TerrainKind, TerrainTable,
        UnitCombatProfile, UnitStats, Weapon, WeaponType, NodeId,
    };

    fn unit(name: &str, team: Team, hp: i32, strength: i32, speed: i32) -> UnitCombatProfile {
        UnitCombatProfile {
            name: name.into(),
            team,
            stats: UnitStats {
                hp,
                strength,
                speed,
                hit: 100,
                movement: 4,
                ..UnitStats::default()
            },
            weapon: Weapon::new("Iron Sword", WeaponType::Sword, 5),
        }
    }

    fn duel(attacker_hp: i32, defender_hp: i32) -> (Battlefield, UnitId, UnitId) {
        let grid = Grid::uniform(
            MapDimensions::new(2, 1),
            TerrainKind::Plain,
            &TerrainTable::standard(),
            &GameConfig::default(),
        );
        let mut bf = Battlefield::new(grid, TerrainTable::standard());
        let a = bf
            .spawn(unit("Eliwood", Team::Player, attacker_hp, 5, 10), NodeId(0), Playstyle::Normal)
            .unwrap();
        let d = bf
            .spawn(unit("Bandit", Team::Enemy, defender_hp, 5, 4), NodeId(1), Playstyle::Normal)
            .unwrap();
        (bf, a, d)
    }

    #[test]
    fn strikes_are_spaced_by_ticks() {
        let (mut bf, a, d) = duel(30, 30);
        let config = GameConfig::default();
        let mut fight = Engagement::start(&bf, a, d, &config, 2).unwrap();
        // Hit every time, never crit.
        let mut rolls = ScriptedRolls::new([0, 99, 0, 99, 0, 99]);

        assert_eq!(fight.advance(&mut bf, &mut rolls).unwrap(), EngagementProgress::Pending);
        let EngagementProgress::Struck(first) = fight.advance(&mut bf, &mut rolls).unwrap() else {
            panic!("expected a strike");
        };
        assert_eq!(first.striker, a);
        assert_eq!(first.damage, 10);
        assert_eq!(bf.unit(d).unwrap().current_hp(), 20);
    }

    #[test]
    fn lethal_strike_ends_the_battle_and_clears_the_tile() {
        let (mut bf, a, d) = duel(30, 10);
        let config = GameConfig::default();
        let fight = Engagement::start(&bf, a, d, &config, 1).unwrap();
        let mut rolls = ScriptedRolls::new([0, 99]);

        let outcome = fight.resolve(&mut bf, &mut rolls).unwrap();
        assert_eq!(outcome.strikes.len(), 1);
        assert_eq!(outcome.defeated(), Some(d));
        assert!(!bf.unit(d).unwrap().is_alive());
        assert_eq!(bf.grid().occupant(NodeId(1)), None);
    }

    #[test]
    fn same_team_cannot_fight() {
        let (bf, a, _) = duel(30, 30);
        let config = GameConfig::default();
        assert!(Engagement::start(&bf, a, a, &config, 1).is_err());
    }
}
