//! Strike-by-strike battle resolution.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::env::RollSource;

use super::damage::{apply_damage, strike_damage};
use super::forecast::{BattleForecast, CombatantForecast};
use super::hit::{crit_roll, hit_roll};
use super::result::{AttackOutcome, BattleOutcome, Side, Strike};

/// A battle in progress.
///
/// Order: attacker strikes, defender counters, then a follow-up strike for
/// whichever side doubles (attacker first). The exchange stops as soon as
/// either side reaches 0 HP.
#[derive(Clone, Debug)]
pub struct BattleSequence {
    forecast: BattleForecast,
    attacker_hp: i32,
    defender_hp: i32,
    order: ArrayVec<Side, 4>,
    next: usize,
    strikes: Vec<Strike>,
    config: GameConfig,
}

impl BattleSequence {
    pub fn new(forecast: BattleForecast, config: &GameConfig) -> Self {
        let mut order = ArrayVec::new();
        order.push(Side::Attacker);
        order.push(Side::Defender);
        if forecast.attacker.doubles {
            order.push(Side::Attacker);
        }
        if forecast.defender.doubles {
            order.push(Side::Defender);
        }

        Self {
            attacker_hp: forecast.attacker.current_hp,
            defender_hp: forecast.defender.current_hp,
            forecast,
            order,
            next: 0,
            strikes: Vec::new(),
            config: config.clone(),
        }
    }

    pub fn forecast(&self) -> &BattleForecast {
        &self.forecast
    }

    pub fn hp(&self, side: Side) -> i32 {
        match side {
            Side::Attacker => self.attacker_hp,
            Side::Defender => self.defender_hp,
        }
    }

    pub fn strikes(&self) -> &[Strike] {
        &self.strikes
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.order.len() || self.attacker_hp <= 0 || self.defender_hp <= 0
    }

    /// Resolves the next strike: hit roll, then crit roll if it hit.
    ///
    /// Returns `None` once the battle is over.
    pub fn next_strike(&mut self, rolls: &mut (impl RollSource + ?Sized)) -> Option<Strike> {
        if self.is_finished() {
            return None;
        }
        let side = self.order[self.next];
        self.next += 1;

        let (striker, target) = self.sides(side);
        let (striker, target) = (*striker, *target);

        let outcome = if !hit_roll(striker.hit_rate, rolls) {
            AttackOutcome::Miss
        } else if crit_roll(striker.crit_rate, rolls) {
            AttackOutcome::Critical
        } else {
            AttackOutcome::Hit
        };
        let damage = if outcome.landed() {
            strike_damage(
                striker.attack_power,
                outcome == AttackOutcome::Critical,
                &self.config,
            )
        } else {
            0
        };

        let target_hp = match side.other() {
            Side::Attacker => {
                self.attacker_hp = apply_damage(self.attacker_hp, damage);
                self.attacker_hp
            }
            Side::Defender => {
                self.defender_hp = apply_damage(self.defender_hp, damage);
                self.defender_hp
            }
        };

        let strike = Strike {
            side,
            striker: striker.unit,
            target: target.unit,
            outcome,
            damage,
            target_hp,
        };
        self.strikes.push(strike);
        Some(strike)
    }

    /// Plays every remaining strike.
    pub fn resolve(mut self, rolls: &mut (impl RollSource + ?Sized)) -> BattleOutcome {
        while self.next_strike(rolls).is_some() {}
        self.into_outcome()
    }

    pub fn into_outcome(self) -> BattleOutcome {
        BattleOutcome {
            attacker: self.forecast.attacker.unit,
            defender: self.forecast.defender.unit,
            strikes: self.strikes,
            attacker_hp: self.attacker_hp,
            defender_hp: self.defender_hp,
        }
    }

    fn sides(&self, side: Side) -> (&CombatantForecast, &CombatantForecast) {
        match side {
            Side::Attacker => (&self.forecast.attacker, &self.forecast.defender),
            Side::Defender => (&self.forecast.defender, &self.forecast.attacker),
        }
    }
}
