//! Headless skirmish driver.
//!
//! Loads a scenario, plays the player side with a simple scripted policy and
//! lets the enemy AI answer, printing what happens.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tactics_content::ContentFactory;
use tactics_core::{NodeId, PathSolver, Position, Team, UnitId};
use tactics_runtime::{
    Event, EventBus, Phase, Runtime, RuntimeConfig, TickOutcome, Topic,
};
use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;

/// Play a scripted skirmish against the enemy AI.
#[derive(Parser)]
#[command(name = "skirmish")]
#[command(about = "Play a scripted skirmish against the enemy AI", long_about = None)]
#[command(version)]
struct Args {
    /// Content directory holding config, terrain, maps and rosters
    #[arg(long, default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/../game/content/data"))]
    data: PathBuf,

    /// Map name under `maps/`
    #[arg(long, default_value = "skirmish")]
    map: String,

    /// Roster name under `rosters/`
    #[arg(long, default_value = "skirmish")]
    roster: String,

    /// Seed for hit/crit rolls and AI tie-breaks
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Stop after this many turns
    #[arg(long, default_value_t = 20)]
    max_turns: u32,

    /// Print every event as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let factory = ContentFactory::new(args.data.clone());
    let scenario = factory
        .load_scenario(&args.map, &args.roster)
        .with_context(|| format!("loading scenario from {}", args.data.display()))?;

    let settings = RuntimeConfig::from_env();
    let events = EventBus::with_capacity(settings.event_buffer_size.max(1024));
    let mut receivers = events.subscribe_multiple(&[Topic::Board, Topic::Battle, Topic::Ai]);

    let mut runtime = Runtime::builder()
        .battlefield(scenario.build_battlefield()?)
        .config(scenario.config.clone())
        .playstyles(scenario.playstyles)
        .settings(settings)
        .events(events)
        .seed(args.seed)
        .build()?;

    let winner = loop {
        if let Some(winner) = runtime.winner() {
            break Some(winner);
        }
        if runtime.turn() > args.max_turns {
            break None;
        }

        play_player_phase(&mut runtime)?;
        if runtime.phase() == Phase::Player && runtime.winner().is_none() {
            runtime.end_phase()?;
        }
        drain(&mut receivers, args.json)?;

        let outcome = runtime.play_enemy_phase().await;
        drain(&mut receivers, args.json)?;
        if let TickOutcome::Decided(winner) = outcome {
            break Some(winner);
        }
    };

    match winner {
        Some(team) => println!("{team} side wins on turn {}", runtime.turn()),
        None => println!("no winner after {} turns", args.max_turns),
    }
    for unit in runtime.battlefield().units() {
        println!(
            "  {:<10} {:<6} hp {:>2}/{:<2}",
            unit.name(),
            unit.team().to_string(),
            unit.current_hp(),
            unit.max_hp()
        );
    }
    Ok(())
}

/// Each player unit walks up to the nearest enemy it can reach and attacks;
/// units that cannot reach anyone close in as far as they can, then wait.
fn play_player_phase(runtime: &mut Runtime) -> Result<()> {
    let players: Vec<UnitId> = runtime
        .battlefield()
        .living(Team::Player)
        .map(|u| u.id())
        .collect();

    for unit in players {
        if runtime.phase() != Phase::Player || runtime.winner().is_some() {
            break;
        }
        if runtime.battlefield().unit(unit).is_none_or(|u| !u.is_alive()) {
            continue;
        }

        match plan_attack(runtime, unit)? {
            Some((spot, target)) => {
                let here = runtime
                    .battlefield()
                    .unit(unit)
                    .and_then(|u| runtime.battlefield().grid().position(u.node()));
                if here != Some(spot) {
                    runtime.move_unit(unit, spot)?;
                }
                let outcome = runtime.attack(unit, target)?;
                tracing::info!(
                    %unit,
                    %target,
                    attacker_hp = outcome.attacker_hp,
                    defender_hp = outcome.defender_hp,
                    "scripted attack"
                );
            }
            None => {
                if let Some(to) = plan_advance(runtime, unit)? {
                    runtime.move_unit(unit, to)?;
                    tracing::info!(%unit, %to, "scripted advance");
                }
                runtime.wait(unit)?;
            }
        }
    }
    Ok(())
}

/// A free tile next to some enemy that `unit` can reach, nearest first.
fn plan_attack(runtime: &mut Runtime, unit: UnitId) -> Result<Option<(Position, UnitId)>> {
    let range = runtime.movement_range(unit)?;
    let battlefield = runtime.battlefield();
    let grid = battlefield.grid();

    let mut best: Option<(u32, Position, UnitId)> = None;
    for enemy in battlefield.living(Team::Enemy) {
        for &spot in grid.neighbors(enemy.node()) {
            let free = spot == range.start() || !grid.is_blocked_for(spot, unit);
            let Some(cost) = range.distance(spot).filter(|_| range.is_reachable(spot) && free)
            else {
                continue;
            };
            if best.is_none_or(|(top, _, _)| cost < top)
                && let Some(position) = grid.position(spot)
            {
                best = Some((cost, position, enemy.id()));
            }
        }
    }
    Ok(best.map(|(_, position, target)| (position, target)))
}

/// The free tile in reach with the cheapest path to some enemy, when it is
/// closer than where `unit` stands.
fn plan_advance(runtime: &mut Runtime, unit: UnitId) -> Result<Option<Position>> {
    let range = runtime.movement_range(unit)?;
    let battlefield = runtime.battlefield();
    let grid = battlefield.grid();

    let mut solver = PathSolver::new(runtime.config());
    let fields = battlefield
        .living(Team::Enemy)
        .map(|enemy| solver.flood(grid, enemy.node()))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let gap = |node: NodeId| {
        fields
            .iter()
            .filter_map(|field| field.distance(node))
            .min()
            .unwrap_or(u32::MAX)
    };

    let (mut best_gap, mut best) = (gap(range.start()), range.start());
    for &node in range.reachable() {
        if grid.is_blocked_for(node, unit) {
            continue;
        }
        let candidate = gap(node);
        if candidate < best_gap {
            (best_gap, best) = (candidate, node);
        }
    }

    if best == range.start() {
        return Ok(None);
    }
    Ok(grid.position(best))
}

fn drain(receivers: &mut [(Topic, broadcast::Receiver<Event>)], json: bool) -> Result<()> {
    for (_, receiver) in receivers.iter_mut() {
        while let Ok(event) = receiver.try_recv() {
            if json {
                println!("{}", serde_json::to_string(&event)?);
            }
        }
    }
    Ok(())
}
