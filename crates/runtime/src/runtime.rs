//! High-level runtime orchestrator.
//!
//! The runtime owns the battlefield and drives the phase cycle:
//!
//! ```text
//! Player phase ── all player units acted / EndPhase ──► Enemy phase
//!      ▲                                                    │
//!      └──────────── every enemy finished its turn ─────────┘
//! ```
//!
//! Player commands resolve immediately. Enemy turns run one unit at a time
//! and advance only through [`Runtime::tick`], so a frontend can pace them.

use std::collections::{HashMap, HashSet, VecDeque};
use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::Display;
use tactics_content::PlaystyleTable;
use tactics_core::{
    Battlefield, BattleOutcome, GameConfig, GridError, MoveError, MovementRange, PathSolver,
    Position, RollSource, SeededRolls, Team, UnitId,
};

use crate::ai::{AiTree, enemy_tree};
use crate::error::{Result, RuntimeError};
use crate::events::{BattleEvent, BoardEvent, EventBus};
use crate::turn::{Engagement, EngagementProgress, EnemyTurn, TurnState, World};

/// Which side is acting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Phase {
    Player,
    Enemy,
}

impl Phase {
    pub fn team(self) -> Team {
        match self {
            Phase::Player => Team::Player,
            Phase::Enemy => Team::Enemy,
        }
    }
}

/// Runtime pacing and buffering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Ticks between two steps of a walk.
    pub ticks_per_step: u32,
    /// Ticks between two strikes of a battle.
    pub ticks_per_strike: u32,
    /// Ticks a unit that died during its own turn lingers before the turn ends.
    pub death_grace_ticks: u32,
    /// Wall-clock spacing of ticks for [`Runtime::play_enemy_phase`].
    pub tick_interval: Duration,
    pub event_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            ticks_per_step: 1,
            ticks_per_strike: 1,
            death_grace_ticks: 3,
            tick_interval: Duration::from_millis(50),
            event_buffer_size: 100,
        }
    }
}

impl RuntimeConfig {
    /// Defaults overridden by `TACTICS_*` environment variables.
    ///
    /// Unparsable values are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(ticks) = read_env("TACTICS_TICKS_PER_STEP") {
            config.ticks_per_step = ticks;
        }
        if let Some(ticks) = read_env("TACTICS_TICKS_PER_STRIKE") {
            config.ticks_per_strike = ticks;
        }
        if let Some(ticks) = read_env("TACTICS_DEATH_GRACE_TICKS") {
            config.death_grace_ticks = ticks;
        }
        if let Some(millis) = read_env("TACTICS_TICK_INTERVAL_MS") {
            config.tick_interval = Duration::from_millis(millis);
        }
        if let Some(size) = read_env("TACTICS_EVENT_BUFFER_SIZE") {
            config.event_buffer_size = size;
        }
        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// A command issued by the player side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerCommand {
    Move { unit: UnitId, to: Position },
    Attack { unit: UnitId, target: UnitId },
    Wait { unit: UnitId },
    EndPhase,
}

/// Result of one [`Runtime::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Waiting on player input.
    Idle,
    /// An enemy turn is in progress.
    Running,
    /// The enemy phase ended and the player phase began.
    PhaseEnded,
    /// One side has no living units left.
    Decided(Team),
}

/// Main runtime that owns the battle and sequences the phases.
pub struct Runtime {
    battlefield: Battlefield,
    solver: PathSolver,
    config: GameConfig,
    settings: RuntimeConfig,
    playstyles: PlaystyleTable,
    rolls: Box<dyn RollSource + Send>,
    events: EventBus,
    trees: HashMap<UnitId, AiTree>,
    phase: Phase,
    turn: u32,
    queue: VecDeque<UnitId>,
    active: Option<EnemyTurn>,
    moved: HashSet<UnitId>,
}

impl Runtime {
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn battlefield(&self) -> &Battlefield {
        &self.battlefield
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn settings(&self) -> &RuntimeConfig {
        &self.settings
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current turn number, starting at 1 and counting player phases.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// The enemy turn in progress, if any.
    pub fn active_turn(&self) -> Option<&EnemyTurn> {
        self.active.as_ref()
    }

    /// The team that won, once the other has no living units.
    pub fn winner(&self) -> Option<Team> {
        if self.battlefield.living(Team::Enemy).next().is_none() {
            Some(Team::Player)
        } else if self.battlefield.living(Team::Player).next().is_none() {
            Some(Team::Enemy)
        } else {
            None
        }
    }

    /// Where `unit` could move and strike from its current node.
    pub fn movement_range(&mut self, unit: UnitId) -> Result<MovementRange> {
        let state = self.battlefield.require(unit)?;
        let range = self.solver.compute_movement_range(
            self.battlefield.grid(),
            state.node(),
            state.stats().movement,
            state.weapon().max_range,
        )?;
        Ok(range)
    }

    /// Executes a player command.
    pub fn command(&mut self, command: PlayerCommand) -> Result<()> {
        match command {
            PlayerCommand::Move { unit, to } => self.move_unit(unit, to),
            PlayerCommand::Attack { unit, target } => self.attack(unit, target).map(|_| ()),
            PlayerCommand::Wait { unit } => self.wait(unit),
            PlayerCommand::EndPhase => self.end_phase(),
        }
    }

    /// Moves a player unit to `to` in one step. Each unit moves once per phase.
    pub fn move_unit(&mut self, unit: UnitId, to: Position) -> Result<()> {
        self.ensure_player_unit(unit, "move")?;
        if self.moved.contains(&unit) {
            return Err(RuntimeError::AlreadyMoved(unit));
        }

        let destination = self
            .battlefield
            .grid()
            .id_at(to)
            .ok_or(GridError::OutOfBounds(to))?;
        let range = self.movement_range(unit)?;
        if !range.is_reachable(destination) {
            return Err(MoveError::OutOfReach {
                unit,
                node: destination,
            }
            .into());
        }

        let from = self.position_of(unit)?;
        self.battlefield.relocate(unit, destination)?;
        self.moved.insert(unit);
        tracing::info!(%unit, %from, %to, "player unit moved");
        self.events
            .publish(BoardEvent::UnitMoved { unit, from, to });
        Ok(())
    }

    /// Resolves a full battle started by a player unit, which then has acted.
    pub fn attack(&mut self, unit: UnitId, target: UnitId) -> Result<BattleOutcome> {
        self.ensure_player_unit(unit, "attack")?;

        let weapon = self.battlefield.require(unit)?.weapon().clone();
        let distance = self
            .position_of(unit)?
            .manhattan_distance(self.position_of(target)?);
        if distance < weapon.min_range || distance > weapon.max_range {
            return Err(RuntimeError::OutOfRange { unit, target });
        }

        let mut engagement = Engagement::start(&self.battlefield, unit, target, &self.config, 1)?;
        tracing::info!(attacker = %unit, defender = %target, "player attacks");
        self.events.publish(BattleEvent::Started {
            forecast: *engagement.forecast(),
        });
        loop {
            match engagement.advance(&mut self.battlefield, &mut *self.rolls)? {
                EngagementProgress::Struck(strike) => {
                    self.events.publish(BattleEvent::Struck { strike });
                    if strike.target_hp <= 0 {
                        self.events
                            .publish(BattleEvent::UnitDied { unit: strike.target });
                    }
                }
                EngagementProgress::Pending => {}
                EngagementProgress::Concluded => break,
            }
        }
        let outcome = engagement.into_outcome();
        self.events.publish(BattleEvent::Ended {
            outcome: outcome.clone(),
        });

        self.mark_acted(unit);
        Ok(outcome)
    }

    /// Ends a player unit's action without attacking.
    pub fn wait(&mut self, unit: UnitId) -> Result<()> {
        self.ensure_player_unit(unit, "wait")?;
        tracing::debug!(%unit, "player unit waits");
        self.mark_acted(unit);
        Ok(())
    }

    /// Hands control to the enemy side.
    pub fn end_phase(&mut self) -> Result<()> {
        self.ensure_open()?;
        if self.phase != Phase::Player {
            return Err(RuntimeError::WrongPhase {
                phase: self.phase,
                command: "end phase",
            });
        }
        self.begin_phase(Phase::Enemy);
        Ok(())
    }

    /// Advances the enemy phase by one tick.
    pub fn tick(&mut self) -> TickOutcome {
        if let Some(winner) = self.winner() {
            return TickOutcome::Decided(winner);
        }
        if self.phase == Phase::Player {
            return TickOutcome::Idle;
        }

        let mut world = World {
            battlefield: &mut self.battlefield,
            solver: &mut self.solver,
            config: &self.config,
            settings: &self.settings,
            playstyles: &self.playstyles,
            rolls: &mut *self.rolls,
            events: &self.events,
        };

        if self.active.is_none() {
            let Some(unit) = self.queue.pop_front() else {
                self.begin_phase(Phase::Player);
                return TickOutcome::PhaseEnded;
            };
            let ready = world
                .battlefield
                .unit(unit)
                .is_some_and(|u| u.is_alive() && !u.has_acted());
            if !ready {
                return TickOutcome::Running;
            }
            let tree = self.trees.entry(unit).or_insert_with(enemy_tree);
            self.active = Some(EnemyTurn::begin(unit, tree, &mut world));
        }

        if let Some(turn) = self.active.as_mut() {
            let tree = self.trees.entry(turn.unit()).or_insert_with(enemy_tree);
            if turn.tick(tree, &mut world) == TurnState::Finished {
                self.active = None;
            }
        }

        match self.winner() {
            Some(winner) => {
                tracing::info!(%winner, turn = self.turn, "battle decided");
                TickOutcome::Decided(winner)
            }
            None => TickOutcome::Running,
        }
    }

    /// Ticks until the enemy phase ends or the battle is decided.
    pub fn run_enemy_phase(&mut self) -> TickOutcome {
        loop {
            match self.tick() {
                TickOutcome::Running => continue,
                outcome => return outcome,
            }
        }
    }

    /// Like [`run_enemy_phase`](Self::run_enemy_phase), one tick per
    /// `tick_interval`.
    pub async fn play_enemy_phase(&mut self) -> TickOutcome {
        let mut interval = tokio::time::interval(self.settings.tick_interval);
        loop {
            interval.tick().await;
            match self.tick() {
                TickOutcome::Running => continue,
                outcome => return outcome,
            }
        }
    }

    fn begin_phase(&mut self, phase: Phase) {
        self.phase = phase;
        if phase == Phase::Player {
            self.turn += 1;
        }
        let team = phase.team();

        self.battlefield.update_occupancy();
        self.battlefield.reset_actions(team);
        for (unit, restored) in self.battlefield.apply_terrain_effects(team) {
            tracing::debug!(%unit, restored, "terrain healed unit");
            self.events
                .publish(BoardEvent::TerrainHealed { unit, restored });
        }
        self.moved.clear();
        self.active = None;
        self.queue = match phase {
            Phase::Player => VecDeque::new(),
            Phase::Enemy => self.battlefield.living(Team::Enemy).map(|u| u.id()).collect(),
        };

        tracing::info!(%phase, turn = self.turn, "phase started");
        self.events.publish(BoardEvent::PhaseChanged {
            phase,
            turn: self.turn,
        });
    }

    fn ensure_open(&self) -> Result<()> {
        if self.winner().is_some() {
            return Err(RuntimeError::BattleDecided);
        }
        Ok(())
    }

    fn ensure_player_unit(&self, unit: UnitId, command: &'static str) -> Result<()> {
        self.ensure_open()?;
        if self.phase != Phase::Player {
            return Err(RuntimeError::WrongPhase {
                phase: self.phase,
                command,
            });
        }
        let state = self.battlefield.require(unit)?;
        if state.team() != Team::Player {
            return Err(RuntimeError::NotPlayerUnit(unit));
        }
        if !state.is_alive() {
            return Err(MoveError::UnitDefeated(unit).into());
        }
        if state.has_acted() {
            return Err(MoveError::AlreadyActed(unit).into());
        }
        Ok(())
    }

    fn position_of(&self, unit: UnitId) -> Result<Position> {
        let node = self.battlefield.require(unit)?.node();
        Ok(self
            .battlefield
            .grid()
            .position(node)
            .ok_or(GridError::UnknownNode(node))?)
    }

    /// Marks a player unit done; the phase passes once every one is.
    fn mark_acted(&mut self, unit: UnitId) {
        if let Some(state) = self.battlefield.unit_mut(unit) {
            state.set_has_acted(true);
        }
        if self.winner().is_none() && self.battlefield.all_acted(Team::Player) {
            tracing::debug!("every player unit has acted");
            self.begin_phase(Phase::Enemy);
        }
    }
}

/// Builder for [`Runtime`].
pub struct RuntimeBuilder {
    battlefield: Option<Battlefield>,
    config: GameConfig,
    settings: RuntimeConfig,
    playstyles: PlaystyleTable,
    rolls: Option<Box<dyn RollSource + Send>>,
    events: Option<EventBus>,
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeBuilder {
    pub fn new() -> Self {
        Self {
            battlefield: None,
            config: GameConfig::default(),
            settings: RuntimeConfig::default(),
            playstyles: PlaystyleTable::standard(),
            rolls: None,
            events: None,
        }
    }

    pub fn battlefield(mut self, battlefield: Battlefield) -> Self {
        self.battlefield = Some(battlefield);
        self
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn settings(mut self, settings: RuntimeConfig) -> Self {
        self.settings = settings;
        self
    }

    pub fn playstyles(mut self, playstyles: PlaystyleTable) -> Self {
        self.playstyles = playstyles;
        self
    }

    /// Source for hit/crit rolls and AI tie-breaks.
    pub fn rolls(mut self, rolls: impl RollSource + Send + 'static) -> Self {
        self.rolls = Some(Box::new(rolls));
        self
    }

    /// Seeds a ChaCha roll source.
    pub fn seed(self, seed: u64) -> Self {
        self.rolls(SeededRolls::new(seed))
    }

    /// Publishes to an existing bus instead of creating one.
    pub fn events(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    /// Builds the runtime and opens the first player phase.
    pub fn build(self) -> Result<Runtime> {
        let battlefield = self.battlefield.ok_or(RuntimeError::MissingBattlefield)?;
        let solver = PathSolver::new(&self.config);
        let events = self
            .events
            .unwrap_or_else(|| EventBus::with_capacity(self.settings.event_buffer_size));
        let rolls = self
            .rolls
            .unwrap_or_else(|| Box::new(SeededRolls::new(0)));
        let trees = battlefield
            .living(Team::Enemy)
            .map(|u| (u.id(), enemy_tree()))
            .collect();

        let mut runtime = Runtime {
            battlefield,
            solver,
            config: self.config,
            settings: self.settings,
            playstyles: self.playstyles.clamped(),
            rolls,
            events,
            trees,
            phase: Phase::Player,
            turn: 0,
            queue: VecDeque::new(),
            active: None,
            moved: HashSet::new(),
        };
        runtime.begin_phase(Phase::Player);
        Ok(runtime)
    }
}
