#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Headless command-line adapter that runs a scripted Sanctum Defence
//! campaign and prints a per-wave combat summary.
//!
//! The adapter owns the host side of the contract: it keeps the resource
//! counters, folds the world's events back into them every frame, and decides
//! when to deploy or upgrade. The world itself never touches mana or base hit
//! points directly.

mod demo;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sanctum_defence_core::bundle::ResourceBundle;
use sanctum_defence_core::{Command, Event, GameStats};
use sanctum_defence_system_analytics::Analytics;
use sanctum_defence_system_placement::{evaluate, Deployment, DeploymentInput};
use sanctum_defence_world::{apply, query, World};

const MAX_DEPLOYED_UNITS: usize = 14;
const PLACEMENT_ATTEMPTS_PER_FRAME: u32 = 6;

/// Command-line options for the headless campaign runner.
#[derive(Debug, Parser)]
#[command(name = "sanctum-defence", about = "Headless Sanctum Defence campaign runner")]
struct Args {
    /// Path to a JSON resource bundle; the built-in demo bundle is used when
    /// omitted.
    #[arg(long)]
    bundle: Option<PathBuf>,
    /// Maximum number of frames to simulate.
    #[arg(long, default_value_t = 120_000)]
    frames: u64,
    /// Seed for the scripted defence layout.
    #[arg(long, default_value_t = 7)]
    seed: u64,
    /// Starting mana.
    #[arg(long, default_value_t = 600)]
    mana: u32,
    /// Starting base hit points.
    #[arg(long, default_value_t = 100)]
    base_hp: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let bundle = load_bundle(args.bundle.as_deref())?;
    run(bundle, &args)
}

fn load_bundle(path: Option<&std::path::Path>) -> Result<ResourceBundle> {
    let Some(path) = path else {
        return Ok(demo::bundle());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading bundle file {}", path.display()))?;
    let bundle: ResourceBundle = serde_json::from_str(&text)
        .with_context(|| format!("parsing bundle file {}", path.display()))?;
    bundle
        .validate()
        .with_context(|| format!("validating bundle file {}", path.display()))?;
    Ok(bundle)
}

fn run(bundle: ResourceBundle, args: &Args) -> Result<()> {
    let mut stats = GameStats {
        wave: 0,
        timer: bundle.waves().general().wave_duration(),
        mana: args.mana,
        base_hp: args.base_hp,
    };
    let mut world = World::new(bundle, stats).context("constructing world")?;
    let bundle = query::bundle(&world).clone();
    let mut analytics = Analytics::new();
    let placement = Deployment::new();
    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut events = Vec::new();

    apply(&mut world, Command::TriggerNextWave, &mut events);

    for _ in 0..args.frames {
        plan_defence(&mut world, &bundle, &placement, stats, &mut rng, &mut events);

        apply(&mut world, Command::Tick { stats }, &mut events);
        fold_into_stats(&events, &mut stats);
        analytics.handle(&events);
        events.clear();

        if query::outcome(&world).is_some() {
            break;
        }
    }

    print_summary(&world, &analytics, stats);
    Ok(())
}

/// Deploys and upgrades units with the spare mana of the frame.
///
/// Placement candidates are random grid positions vetted through the same
/// preview rules the world enforces, so every emitted command is expected to
/// succeed.
fn plan_defence(
    world: &mut World,
    bundle: &ResourceBundle,
    placement: &Deployment,
    stats: GameStats,
    rng: &mut StdRng,
    events: &mut Vec<Event>,
) {
    let units = query::unit_view(world).into_vec();

    if units.len() < MAX_DEPLOYED_UNITS {
        let keys: Vec<String> = bundle.units().keys().cloned().collect();
        let mut commands = Vec::new();
        for _ in 0..PLACEMENT_ATTEMPTS_PER_FRAME {
            let key = &keys[rng.gen_range(0..keys.len())];
            let x = rng.gen_range(0.0..bundle.map().width());
            let y = rng.gen_range(0.0..bundle.map().height());
            let preview = evaluate(bundle, &units, key, x, y, stats.mana);
            if preview.placeable() {
                placement.handle(
                    Some(&preview),
                    DeploymentInput::new(true, false, None),
                    |_| None,
                    &mut commands,
                );
                break;
            }
        }
        for command in commands {
            apply(world, command, events);
        }
        return;
    }

    // Fully built: funnel spare mana into upgrades.
    if let Some(unit) = units.iter().find(|unit| {
        bundle
            .unit(&unit.archetype)
            .and_then(|archetype| archetype.upgrades().get(unit.level as usize))
            .is_some_and(|tier| tier.cost() <= stats.mana)
    }) {
        apply(world, Command::UpgradeUnit { unit: unit.id }, events);
    }
}

fn fold_into_stats(events: &[Event], stats: &mut GameStats) {
    for event in events {
        match event {
            Event::ManaAwarded { amount, .. } => stats.mana += amount,
            Event::UnitDeployed { cost, .. } | Event::UnitUpgraded { cost, .. } => {
                stats.mana = stats.mana.saturating_sub(*cost);
            }
            Event::BaseDamaged { remaining_hp, .. } => stats.base_hp = *remaining_hp,
            Event::WaveStarted { wave } => stats.wave = *wave,
            Event::CountdownTicked { seconds_left } => stats.timer = *seconds_left,
            _ => {}
        }
    }
}

fn print_summary(world: &World, analytics: &Analytics, stats: GameStats) {
    println!("wave  spawned  killed  leaked  mana  base damage");
    for report in analytics.history().iter().chain([analytics.current()]) {
        println!(
            "{:>4}  {:>7}  {:>6}  {:>6}  {:>4}  {:>11}",
            report.wave,
            report.spawned,
            report.killed,
            report.leaked,
            report.mana_earned,
            report.base_damage
        );
    }
    match query::outcome(world) {
        Some(outcome) => println!(
            "campaign over after {} frames: {outcome:?} (base hp {}, mana {})",
            query::frame(world),
            stats.base_hp,
            stats.mana
        ),
        None => println!(
            "frame budget exhausted at wave {} (base hp {}, mana {})",
            stats.wave, stats.base_hp, stats.mana
        ),
    }
}
