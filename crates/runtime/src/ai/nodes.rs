//! Leaf nodes for the enemy behavior tree.
//!
//! Check leaves read the turn's memoized decision. Movement and attack leaves
//! start their activity on the first tick they are reached and report
//! `Running` until it completes.

use behavior_tree::{Behavior, LeafState, Status};
use tactics_core::{NodeId, UnitId};

use super::context::AiContext;
use super::types::AiAction;
use crate::events::{BattleEvent, BoardEvent};
use crate::turn::{Activity, Engagement, EngagementProgress, Walk, WalkProgress, World};

/// Context a leaf ticks against: the world plus this unit's blackboard.
pub struct AiTurn<'t, 'w> {
    pub world: &'t mut World<'w>,
    pub ai: &'t mut AiContext,
    pub activity: &'t mut Activity,
}

impl AiTurn<'_, '_> {
    pub fn unit(&self) -> UnitId {
        self.ai.unit()
    }

    pub fn current_node(&self) -> Option<NodeId> {
        self.world.battlefield.unit(self.unit()).map(|u| u.node())
    }

    /// Scores the situation with the unit's playstyle, once per turn.
    pub fn decide(&mut self) -> AiAction {
        let playstyle = self
            .world
            .battlefield
            .unit(self.unit())
            .map(|u| u.playstyle())
            .unwrap_or_default();
        let profile = self.world.playstyles.profile(playstyle);
        self.ai.decide(
            self.world.battlefield,
            &profile,
            self.world.config,
            &mut *self.world.rolls,
        )
    }

    /// Starts walking to `destination` along the cheapest path.
    fn start_walk(&mut self, destination: NodeId) -> bool {
        let path = self.ai.path_to(destination);
        let ticks = self.world.settings.ticks_per_step;
        match Walk::start(self.world.battlefield, self.unit(), path, ticks) {
            Ok(walk) => {
                *self.activity = Activity::Walking(walk);
                true
            }
            Err(error) => {
                tracing::warn!(unit = %self.unit(), %destination, %error, "walk refused");
                false
            }
        }
    }

    fn advance_walk(&mut self) -> Status {
        let Activity::Walking(walk) = &mut *self.activity else {
            return Status::Failure;
        };

        match walk.advance(self.world.battlefield) {
            Ok(WalkProgress::Walking) => Status::Running,
            Ok(WalkProgress::Stepped { from, to }) => {
                let grid = self.world.battlefield.grid();
                if let (Some(from), Some(to)) = (grid.position(from), grid.position(to)) {
                    self.world.events.publish(BoardEvent::UnitMoved {
                        unit: self.ai.unit(),
                        from,
                        to,
                    });
                }
                Status::Running
            }
            Ok(WalkProgress::Arrived(node)) => {
                tracing::debug!(unit = %self.ai.unit(), %node, "walk finished");
                *self.activity = Activity::Idle;
                Status::Success
            }
            Err(error) => {
                tracing::warn!(unit = %self.ai.unit(), %error, "walk interrupted");
                *self.activity = Activity::Idle;
                self.world.battlefield.update_occupancy();
                Status::Failure
            }
        }
    }

    /// Where to stand to attack, switching targets once if the first has no
    /// free spot.
    fn choose_attack_spot(&mut self) -> Option<NodeId> {
        let target = self.ai.best_target()?;
        let battlefield = &*self.world.battlefield;
        if let Some(spot) = self.ai.attack_spot(battlefield, target, &mut *self.world.rolls) {
            return Some(spot);
        }

        let next = self.ai.next_target(battlefield)?;
        tracing::debug!(unit = %self.ai.unit(), from = %target, to = %next, "switched target");
        self.ai.attack_spot(battlefield, next, &mut *self.world.rolls)
    }

    fn start_battle(&mut self, target: UnitId) -> bool {
        let engagement = Engagement::start(
            self.world.battlefield,
            self.unit(),
            target,
            self.world.config,
            self.world.settings.ticks_per_strike,
        );
        match engagement {
            Ok(engagement) => {
                let forecast = *engagement.forecast();
                tracing::info!(
                    attacker = %self.unit(),
                    defender = %target,
                    hit = forecast.attacker.hit_rate,
                    damage = forecast.attacker.attack_power,
                    "enemy attacks"
                );
                self.world.events.publish(BattleEvent::Started { forecast });
                *self.activity = Activity::Fighting(engagement);
                true
            }
            Err(error) => {
                tracing::debug!(unit = %self.unit(), %target, %error, "battle refused");
                false
            }
        }
    }

    fn advance_battle(&mut self) -> Status {
        let Activity::Fighting(engagement) = &mut *self.activity else {
            return Status::Failure;
        };

        let progress = engagement.advance(self.world.battlefield, &mut *self.world.rolls);
        match progress {
            Ok(EngagementProgress::Pending) => return Status::Running,
            Ok(EngagementProgress::Struck(strike)) => {
                self.world.events.publish(BattleEvent::Struck { strike });
                if strike.target_hp <= 0 {
                    self.world
                        .events
                        .publish(BattleEvent::UnitDied { unit: strike.target });
                }
                if !engagement.is_finished() {
                    return Status::Running;
                }
            }
            Ok(EngagementProgress::Concluded) => {}
            Err(error) => {
                tracing::warn!(unit = %self.ai.unit(), %error, "battle interrupted");
                *self.activity = Activity::Idle;
                return Status::Failure;
            }
        }

        let Activity::Fighting(engagement) = std::mem::take(self.activity) else {
            return Status::Failure;
        };
        let outcome = engagement.into_outcome();
        tracing::info!(
            attacker = %outcome.attacker,
            attacker_hp = outcome.attacker_hp,
            defender_hp = outcome.defender_hp,
            "battle over"
        );
        self.world.events.publish(BattleEvent::Ended { outcome });
        self.ai.mark_attacked();
        Status::Success
    }
}

/// Leaf payloads of the enemy tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiLeaf {
    /// Succeeds iff `action` won this turn's scoring.
    Check(AiAction),
    MoveToSafeSpace,
    MoveToFort,
    MoveToAttackPosition,
    AttackTarget,
    Wait,
    /// Catch-all that ends the turn.
    Default,
}

impl<'t, 'w> Behavior<AiTurn<'t, 'w>> for AiLeaf {
    fn tick(&self, state: &mut LeafState, ctx: &mut AiTurn<'t, 'w>) -> Status {
        match self {
            AiLeaf::Check(action) => {
                if ctx.decide() == *action {
                    Status::Success
                } else {
                    Status::Failure
                }
            }
            AiLeaf::MoveToSafeSpace => {
                if state.begin() {
                    let Some(spot) = ctx.ai.safe_spot() else {
                        return Status::Failure;
                    };
                    if Some(spot) == ctx.current_node() || !ctx.start_walk(spot) {
                        return Status::Failure;
                    }
                }
                ctx.advance_walk()
            }
            AiLeaf::MoveToFort => {
                if state.begin() {
                    let Some(fort) = ctx.ai.nearest_fort() else {
                        return Status::Failure;
                    };
                    if Some(fort.node) == ctx.current_node() || !ctx.start_walk(fort.node) {
                        return Status::Failure;
                    }
                }
                ctx.advance_walk()
            }
            AiLeaf::MoveToAttackPosition => {
                if state.begin() {
                    let Some(spot) = ctx.choose_attack_spot() else {
                        return Status::Failure;
                    };
                    if Some(spot) == ctx.current_node() {
                        return Status::Success;
                    }
                    if !ctx.start_walk(spot) {
                        return Status::Failure;
                    }
                }
                ctx.advance_walk()
            }
            AiLeaf::AttackTarget => {
                if state.begin() {
                    if ctx.ai.has_attacked() {
                        return Status::Failure;
                    }
                    let Some(target) = ctx.ai.target() else {
                        return Status::Failure;
                    };
                    let battlefield = &*ctx.world.battlefield;
                    let adjacent = match (battlefield.unit(ctx.unit()), battlefield.unit(target)) {
                        (Some(me), Some(them)) => {
                            them.is_alive() && battlefield.grid().are_adjacent(me.node(), them.node())
                        }
                        _ => false,
                    };
                    if !adjacent || !ctx.start_battle(target) {
                        return Status::Failure;
                    }
                }
                ctx.advance_battle()
            }
            AiLeaf::Wait | AiLeaf::Default => Status::Success,
        }
    }

    fn name(&self) -> &str {
        match self {
            AiLeaf::Check(AiAction::Retreat) => "CheckRetreatDesirability",
            AiLeaf::Check(AiAction::Fort) => "CheckFortDesirability",
            AiLeaf::Check(AiAction::Attack) => "CheckAttackDesirability",
            AiLeaf::Check(AiAction::Wait) => "CheckWaitDesirability",
            AiLeaf::MoveToSafeSpace => "MoveToSafeSpace",
            AiLeaf::MoveToFort => "MoveToFort",
            AiLeaf::MoveToAttackPosition => "MoveToAttackPosition",
            AiLeaf::AttackTarget => "AttackTarget",
            AiLeaf::Wait => "Wait",
            AiLeaf::Default => "Default",
        }
    }
}
