use behavior_tree::Status;
use serde::{Deserialize, Serialize};
use tactics_core::{BattleForecast, BattleOutcome, Position, Strike, UnitId};

use crate::ai::{AiAction, Desirabilities};
use crate::runtime::Phase;

/// Board-level changes: phases, movement, terrain effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BoardEvent {
    PhaseChanged {
        phase: Phase,
        turn: u32,
    },
    /// One step of a walk, or a whole player move.
    UnitMoved {
        unit: UnitId,
        from: Position,
        to: Position,
    },
    TerrainHealed {
        unit: UnitId,
        restored: i32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BattleEvent {
    Started {
        forecast: BattleForecast,
    },
    Struck {
        strike: Strike,
    },
    UnitDied {
        unit: UnitId,
    },
    Ended {
        outcome: BattleOutcome,
    },
}

/// What the enemy AI is thinking, for debug overlays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AiEvent {
    DesirabilitiesComputed {
        unit: UnitId,
        desirabilities: Desirabilities,
        decision: AiAction,
    },
    ActiveSequenceChanged {
        unit: UnitId,
        label: String,
    },
    ActiveActionChanged {
        unit: UnitId,
        action: String,
    },
    NodeStateChanged {
        unit: UnitId,
        action: String,
        state: NodeState,
    },
    TurnFinished {
        unit: UnitId,
    },
}

/// Serializable mirror of a leaf's [`Status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeState {
    Running,
    Success,
    Failure,
}

impl From<Status> for NodeState {
    fn from(status: Status) -> Self {
        match status {
            Status::Running => NodeState::Running,
            Status::Success => NodeState::Success,
            Status::Failure => NodeState::Failure,
        }
    }
}
