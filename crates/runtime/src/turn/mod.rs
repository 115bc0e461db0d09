//! Enemy turn execution.
//!
//! - [`walk`]: multi-tick movement along a path
//! - [`engagement`]: multi-tick battles
//! - [`controller`]: the per-unit turn state machine driving the AI tree

pub mod controller;
pub mod engagement;
pub mod walk;

pub use controller::{EnemyTurn, TurnState};
pub use engagement::{Engagement, EngagementProgress};
pub use walk::{Walk, WalkProgress};

use tactics_content::PlaystyleTable;
use tactics_core::{Battlefield, GameConfig, PathSolver, RollSource};

use crate::events::EventBus;
use crate::runtime::RuntimeConfig;

/// What the acting unit is physically doing across ticks.
#[derive(Debug, Default)]
pub enum Activity {
    #[default]
    Idle,
    Walking(Walk),
    Fighting(Engagement),
}

impl Activity {
    pub fn is_idle(&self) -> bool {
        matches!(self, Activity::Idle)
    }
}

/// Borrowed view of everything an enemy turn reads or mutates.
pub struct World<'a> {
    pub battlefield: &'a mut Battlefield,
    pub solver: &'a mut PathSolver,
    pub config: &'a GameConfig,
    pub settings: &'a RuntimeConfig,
    pub playstyles: &'a PlaystyleTable,
    pub rolls: &'a mut dyn RollSource,
    pub events: &'a EventBus,
}
