//! Per-unit enemy turn state machine.
//!
//! ```text
//! Thinking ──(tree terminal)──────────────────────────► Finished
//!     │
//!     └──(unit died)──► Dying { remaining } ──(0)──────► Finished
//! ```
//!
//! The tree is reset when the turn begins and ticked once per runtime tick
//! while Thinking. A unit that dies mid-turn, typically to a counter-attack,
//! lingers for a short grace period so presentation can play out the death.

use behavior_tree::{Status, TreeObserver};
use tactics_core::UnitId;

use super::{Activity, World};
use crate::ai::{AiContext, AiTree, AiTurn};
use crate::events::{AiEvent, NodeState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Thinking,
    Dying { remaining: u32 },
    Finished,
}

/// Remembers which sequence and leaf decided the last tick.
#[derive(Default)]
struct Trace {
    current_sequence: Option<String>,
    last: Option<(Option<String>, String, Status)>,
}

impl TreeObserver for Trace {
    fn sequence_ticked(&mut self, label: &str) {
        self.current_sequence = Some(label.to_string());
    }

    fn leaf_ticked(&mut self, name: &str, status: Status) {
        self.last = Some((self.current_sequence.clone(), name.to_string(), status));
    }
}

/// One enemy unit's turn in progress.
#[derive(Debug)]
pub struct EnemyTurn {
    unit: UnitId,
    ai: AiContext,
    activity: Activity,
    state: TurnState,
    ticks: u32,
    active_sequence: Option<String>,
    active_action: Option<String>,
    action_state: Option<NodeState>,
}

impl EnemyTurn {
    /// Observes the unit's surroundings and settles this turn's decision.
    pub fn begin(unit: UnitId, tree: &mut AiTree, world: &mut World<'_>) -> Self {
        tree.reset();

        let ai = match AiContext::observe(unit, world.battlefield, world.solver) {
            Ok(ai) => ai,
            Err(error) => {
                tracing::warn!(%unit, %error, "observation failed; acting blind");
                AiContext::blind(unit)
            }
        };

        let mut turn = Self {
            unit,
            ai,
            activity: Activity::Idle,
            state: TurnState::Thinking,
            ticks: 0,
            active_sequence: None,
            active_action: None,
            action_state: None,
        };

        let decision = AiTurn {
            world: &mut *world,
            ai: &mut turn.ai,
            activity: &mut turn.activity,
        }
        .decide();
        world.events.publish(AiEvent::DesirabilitiesComputed {
            unit,
            desirabilities: turn.ai.desirabilities(),
            decision,
        });
        tracing::info!(%unit, %decision, "enemy turn started");

        turn
    }

    pub fn unit(&self) -> UnitId {
        self.unit
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn context(&self) -> &AiContext {
        &self.ai
    }

    /// Ticks spent in this turn so far.
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn active_sequence(&self) -> Option<&str> {
        self.active_sequence.as_deref()
    }

    pub fn active_action(&self) -> Option<&str> {
        self.active_action.as_deref()
    }

    /// Advances the turn by one tick.
    pub fn tick(&mut self, tree: &mut AiTree, world: &mut World<'_>) -> TurnState {
        match self.state {
            TurnState::Finished => return self.state,
            TurnState::Dying { remaining } => {
                self.ticks += 1;
                match remaining.checked_sub(1) {
                    Some(left) if left > 0 => self.state = TurnState::Dying { remaining: left },
                    _ => self.finish(world),
                }
                return self.state;
            }
            TurnState::Thinking => {}
        }
        self.ticks += 1;

        if !self.is_alive(world) {
            self.start_dying(world);
            return self.state;
        }

        let mut trace = Trace::default();
        let status = {
            let mut ctx = AiTurn {
                world: &mut *world,
                ai: &mut self.ai,
                activity: &mut self.activity,
            };
            tree.tick_observed(&mut ctx, &mut trace)
        };
        tracing::trace!(unit = %self.unit, tick = self.ticks, ?status, "tree ticked");
        self.report(trace, world);

        if !self.is_alive(world) {
            self.start_dying(world);
        } else if status.is_terminal() {
            tracing::debug!(unit = %self.unit, ?status, ticks = self.ticks, "tree finished");
            self.finish(world);
        }
        self.state
    }

    fn is_alive(&self, world: &World<'_>) -> bool {
        world
            .battlefield
            .unit(self.unit)
            .is_some_and(|u| u.is_alive())
    }

    fn start_dying(&mut self, world: &mut World<'_>) {
        self.activity = Activity::Idle;
        let grace = world.settings.death_grace_ticks;
        tracing::info!(unit = %self.unit, grace, "enemy died during its turn");
        if grace == 0 {
            self.finish(world);
        } else {
            self.state = TurnState::Dying { remaining: grace };
        }
    }

    fn finish(&mut self, world: &mut World<'_>) {
        if let Some(unit) = world.battlefield.unit_mut(self.unit) {
            unit.set_has_acted(true);
        }
        self.state = TurnState::Finished;
        world.events.publish(AiEvent::TurnFinished { unit: self.unit });
    }

    fn report(&mut self, trace: Trace, world: &World<'_>) {
        let Some((sequence, action, status)) = trace.last else {
            return;
        };
        let unit = self.unit;

        if let Some(label) = sequence
            && self.active_sequence.as_deref() != Some(label.as_str())
        {
            world.events.publish(AiEvent::ActiveSequenceChanged {
                unit,
                label: label.clone(),
            });
            self.active_sequence = Some(label);
        }

        if self.active_action.as_deref() != Some(action.as_str()) {
            world.events.publish(AiEvent::ActiveActionChanged {
                unit,
                action: action.clone(),
            });
            self.active_action = Some(action.clone());
            self.action_state = None;
        }

        let state = NodeState::from(status);
        if self.action_state != Some(state) {
            world
                .events
                .publish(AiEvent::NodeStateChanged { unit, action, state });
            self.action_state = Some(state);
        }
    }
}
