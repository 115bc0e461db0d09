//! AI playstyle weights.
//!
//! A playstyle is a bundle of five weights in `[0, 1]` that scale the terms of
//! the desirability functions. The same scoring code produces an aggressive or
//! a timid unit depending on which bundle it is given.

use tactics_core::Playstyle;

/// Weights consumed by the desirability scorers.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DesirabilityProfile {
    /// Weight of "I am hurt" in Fort, Retreat and Attack.
    pub health_weight: f64,
    /// Weight of "a fort or safe tile is close".
    pub distance_weight: f64,
    /// Weight of "an enemy is close" when attacking.
    pub player_distance_weight: f64,
    /// Weight of the power advantage when attacking.
    pub power_difference_weight: f64,
    /// Weight of "the enemy is far" when retreating.
    pub escape_weight: f64,
}

impl DesirabilityProfile {
    pub const fn new(
        health_weight: f64,
        distance_weight: f64,
        player_distance_weight: f64,
        power_difference_weight: f64,
        escape_weight: f64,
    ) -> Self {
        Self {
            health_weight,
            distance_weight,
            player_distance_weight,
            power_difference_weight,
            escape_weight,
        }
    }

    /// Copy with every weight clamped into `[0, 1]`.
    pub fn clamped(self) -> Self {
        let c = |w: f64| if w.is_nan() { 0.0 } else { w.clamp(0.0, 1.0) };
        Self::new(
            c(self.health_weight),
            c(self.distance_weight),
            c(self.player_distance_weight),
            c(self.power_difference_weight),
            c(self.escape_weight),
        )
    }
}

/// One profile per [`Playstyle`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaystyleTable {
    pub aggressive: DesirabilityProfile,
    pub normal: DesirabilityProfile,
    pub easy: DesirabilityProfile,
    pub very_easy: DesirabilityProfile,
}

impl PlaystyleTable {
    /// Built-in presets.
    ///
    /// Aggressive units mostly weigh power and enemy proximity; the easier
    /// presets care more about their own health and about escaping.
    pub const fn standard() -> Self {
        Self {
            aggressive: DesirabilityProfile::new(0.2, 0.3, 0.5, 0.6, 0.1),
            normal: DesirabilityProfile::new(0.5, 0.4, 0.4, 0.4, 0.3),
            easy: DesirabilityProfile::new(0.7, 0.5, 0.2, 0.2, 0.5),
            very_easy: DesirabilityProfile::new(0.9, 0.6, 0.1, 0.1, 0.7),
        }
    }

    pub fn profile(&self, playstyle: Playstyle) -> DesirabilityProfile {
        match playstyle {
            Playstyle::Aggressive => self.aggressive,
            Playstyle::Normal => self.normal,
            Playstyle::Easy => self.easy,
            Playstyle::VeryEasy => self.very_easy,
        }
    }

    /// Copy with every profile clamped into `[0, 1]`.
    pub fn clamped(self) -> Self {
        Self {
            aggressive: self.aggressive.clamped(),
            normal: self.normal.clamped(),
            easy: self.easy.clamped(),
            very_easy: self.very_easy.clamped(),
        }
    }
}

impl Default for PlaystyleTable {
    fn default() -> Self {
        Self::standard()
    }
}
