//! Core types for the desirability-driven enemy AI.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
use tactics_core::{NodeId, TerrainKind, UnitId};

/// The four things an enemy unit can decide to do with its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum AiAction {
    /// Walk to the tile farthest from every visible enemy.
    Retreat,
    /// Walk to the nearest fort to heal.
    Fort,
    /// Close in on a target and fight it.
    Attack,
    /// Stay put.
    Wait,
}

impl AiAction {
    /// All actions in the order they are scored.
    pub const fn all() -> [AiAction; 4] {
        [
            AiAction::Retreat,
            AiAction::Fort,
            AiAction::Attack,
            AiAction::Wait,
        ]
    }
}

/// One 0-100 score per [`AiAction`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Desirabilities {
    pub retreat: u32,
    pub fort: u32,
    pub attack: u32,
    pub wait: u32,
}

impl Desirabilities {
    pub fn get(&self, action: AiAction) -> u32 {
        match action {
            AiAction::Retreat => self.retreat,
            AiAction::Fort => self.fort,
            AiAction::Attack => self.attack,
            AiAction::Wait => self.wait,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (AiAction, u32)> + '_ {
        AiAction::all()
            .into_iter()
            .map(move |action| (action, self.get(action)))
    }
}

/// An opposing unit inside the AI unit's movement range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleUnit {
    pub unit: UnitId,
    pub node: NodeId,
    /// Steps along the cheapest path.
    pub distance: u32,
    pub wounded: bool,
}

/// A notable terrain tile inside the AI unit's movement range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleTerrain {
    pub node: NodeId,
    pub kind: TerrainKind,
    /// Steps along the cheapest path.
    pub distance: u32,
}
