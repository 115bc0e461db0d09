//! Unified error type surfaced by the runtime API.
//!
//! Behavior-tree leaves never return these: a refused move or battle inside an
//! AI turn becomes a failed branch. Errors reach callers only through the
//! builder and the player command API.

use tactics_core::{BattleError, ErrorSeverity, GameError, GridError, MoveError, UnitId};
use thiserror::Error;

use crate::runtime::Phase;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("runtime requires a battlefield before building")]
    MissingBattlefield,

    #[error("{command} is not allowed during the {phase} phase")]
    WrongPhase {
        phase: Phase,
        command: &'static str,
    },

    #[error("unit {0} is not controlled by the player")]
    NotPlayerUnit(UnitId),

    #[error("unit {0} has already moved this phase")]
    AlreadyMoved(UnitId),

    #[error("unit {target} is outside the weapon range of {unit}")]
    OutOfRange { unit: UnitId, target: UnitId },

    #[error("the battle is already decided")]
    BattleDecided,

    #[error(transparent)]
    Move(#[from] MoveError),

    #[error(transparent)]
    Battle(#[from] BattleError),

    #[error(transparent)]
    Grid(#[from] GridError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MissingBattlefield => ErrorSeverity::Fatal,
            Self::WrongPhase { .. }
            | Self::NotPlayerUnit(_)
            | Self::AlreadyMoved(_)
            | Self::BattleDecided => ErrorSeverity::Validation,
            Self::OutOfRange { .. } => ErrorSeverity::Recoverable,
            Self::Move(e) => e.severity(),
            Self::Battle(e) => e.severity(),
            Self::Grid(e) => e.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingBattlefield => "RUNTIME_MISSING_BATTLEFIELD",
            Self::WrongPhase { .. } => "RUNTIME_WRONG_PHASE",
            Self::NotPlayerUnit(_) => "RUNTIME_NOT_PLAYER_UNIT",
            Self::AlreadyMoved(_) => "RUNTIME_ALREADY_MOVED",
            Self::OutOfRange { .. } => "RUNTIME_OUT_OF_RANGE",
            Self::BattleDecided => "RUNTIME_BATTLE_DECIDED",
            Self::Move(e) => e.error_code(),
            Self::Battle(e) => e.error_code(),
            Self::Grid(e) => e.error_code(),
        }
    }
}
