//! Desirability functions.
//!
//! Each scorer blends two or three normalized signals with the unit's
//! [`DesirabilityProfile`] weights and returns an integer in `[0, 100]`.
//!
//! # Formulas
//!
//! ```text
//! hurt      = 1 - normalize(current_hp, 0, max_hp)
//! near(d)   = 1 - normalize(d, 0, movement)
//!
//! fort      = health*hurt + distance*near(fort)
//! retreat   = health*hurt + distance*near(safe_spot) + escape*normalize(enemy, 0, movement)
//! attack    = player_distance*near(enemy) + power_difference*advantage + health*hurt
//! wait      = 0 if hurt and fort > 0, else 0 if any enemy is visible, else 100
//! ```
//!
//! A signal that has nothing to measure (no fort in sight, no enemy) adds
//! nothing to the sum.

use tactics_content::DesirabilityProfile;
use tactics_core::RollSource;

use super::types::{AiAction, Desirabilities};

/// Everything the scorers need to know about one unit's situation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Situation {
    pub current_hp: i32,
    pub max_hp: i32,
    /// Movement stat; the distance scale for every distance signal.
    pub movement: u32,
    pub fort_distance: Option<u32>,
    pub safe_spot_distance: Option<u32>,
    pub enemy_distance: Option<u32>,
    /// Power advantage over the nearest enemy, in `[0, 1]`.
    pub power_advantage: Option<f64>,
}

impl Situation {
    fn hurt(&self) -> f64 {
        1.0 - normalize(f64::from(self.current_hp), 0.0, f64::from(self.max_hp))
    }

    fn near(&self, distance: Option<u32>) -> f64 {
        distance.map_or(0.0, |d| {
            1.0 - normalize(f64::from(d), 0.0, f64::from(self.movement))
        })
    }

    fn far(&self, distance: Option<u32>) -> f64 {
        distance.map_or(0.0, |d| normalize(f64::from(d), 0.0, f64::from(self.movement)))
    }

    fn is_damaged(&self) -> bool {
        self.current_hp < self.max_hp
    }
}

/// `(value - lo) / (hi - lo)` clamped to `[0, 1]`; 0 when `lo == hi`.
pub fn normalize(value: f64, lo: f64, hi: f64) -> f64 {
    if hi == lo {
        return 0.0;
    }
    ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
}

/// Scales a raw `[0, 1]` blend to an integer percentage, truncating.
fn to_score(raw: f64) -> u32 {
    if !raw.is_finite() {
        return 0;
    }
    // Absorbs representation error so 0.81 scores 81, not 80.
    ((raw * 100.0) + 1e-9).clamp(0.0, 100.0) as u32
}

pub fn fort_desirability(situation: &Situation, profile: &DesirabilityProfile) -> u32 {
    to_score(
        profile.health_weight * situation.hurt()
            + profile.distance_weight * situation.near(situation.fort_distance),
    )
}

pub fn retreat_desirability(situation: &Situation, profile: &DesirabilityProfile) -> u32 {
    to_score(
        profile.health_weight * situation.hurt()
            + profile.distance_weight * situation.near(situation.safe_spot_distance)
            + profile.escape_weight * situation.far(situation.enemy_distance),
    )
}

pub fn attack_desirability(situation: &Situation, profile: &DesirabilityProfile) -> u32 {
    to_score(
        profile.player_distance_weight * situation.near(situation.enemy_distance)
            + profile.power_difference_weight * situation.power_advantage.unwrap_or(0.0)
            + profile.health_weight * situation.hurt(),
    )
}

pub fn wait_desirability(situation: &Situation, profile: &DesirabilityProfile) -> u32 {
    if situation.is_damaged() && fort_desirability(situation, profile) > 0 {
        0
    } else if situation.enemy_distance.is_some() {
        0
    } else {
        100
    }
}

pub fn score_all(situation: &Situation, profile: &DesirabilityProfile) -> Desirabilities {
    Desirabilities {
        retreat: retreat_desirability(situation, profile),
        fort: fort_desirability(situation, profile),
        attack: attack_desirability(situation, profile),
        wait: wait_desirability(situation, profile),
    }
}

/// The best-scoring action; ties are broken uniformly at random.
pub fn highest_action(scores: &Desirabilities, rolls: &mut dyn RollSource) -> AiAction {
    let best = scores.iter().map(|(_, score)| score).max().unwrap_or(0);
    let tied: Vec<AiAction> = scores
        .iter()
        .filter(|&(_, score)| score == best)
        .map(|(action, _)| action)
        .collect();

    match tied.as_slice() {
        [only] => *only,
        _ => rolls
            .pick(tied.len())
            .and_then(|index| tied.get(index).copied())
            .unwrap_or(AiAction::Wait),
    }
}
