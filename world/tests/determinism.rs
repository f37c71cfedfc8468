use std::collections::BTreeMap;

use sanctum_defence_core::balance::{
    BalanceConfig, DamageRules, DifficultyScaling, MiracleRules, Rewards,
};
use sanctum_defence_core::bundle::{
    MapColors, MapDefinition, MonsterArchetype, MonsterCatalog, PoolPhase, ResourceBundle,
    UnitArchetype, WavePacing, WaveSchedule,
};
use sanctum_defence_core::{Command, Event, GameStats, Miracle, Tint, UnitKind, WorldPoint};
use sanctum_defence_world::{apply, query, World};

fn tint() -> Tint {
    Tint::from_rgb(0x40, 0x40, 0x40)
}

fn bundle() -> ResourceBundle {
    let map = MapDefinition::new(
        vec![
            WorldPoint::new(0.0, 100.0),
            WorldPoint::new(400.0, 100.0),
            WorldPoint::new(400.0, 400.0),
            WorldPoint::new(750.0, 400.0),
        ],
        50.0,
        800.0,
        600.0,
        MapColors::new(tint(), tint()),
    );

    let mut units = BTreeMap::new();
    let _ = units.insert(
        "archer".to_owned(),
        UnitArchetype::new(
            "Archer".to_owned(),
            "A".to_owned(),
            UnitKind::RangedPhysical,
            250.0,
            50.0,
            60,
            100,
            900.0,
            tint(),
            Vec::new(),
            Vec::new(),
        ),
    );

    let mut pools = BTreeMap::new();
    let _ = pools.insert(
        "early".to_owned(),
        vec![
            MonsterArchetype::new("slime".to_owned(), "S".to_owned(), 40.0, 2.0, false),
            MonsterArchetype::new("wolf".to_owned(), "W".to_owned(), 60.0, 2.5, false),
        ],
    );
    let mut bosses = BTreeMap::new();
    let _ = bosses.insert(
        "boss10".to_owned(),
        MonsterArchetype::new("dragon".to_owned(), "D".to_owned(), 400.0, 1.0, true),
    );

    ResourceBundle::new(
        map,
        units,
        MonsterCatalog::new(pools, bosses),
        WaveSchedule::new(
            WavePacing::new(6, 8, 30, 10, 30, 2),
            PoolPhase::new("early".to_owned(), 50),
            "early".to_owned(),
            BTreeMap::new(),
            "boss10".to_owned(),
        ),
        BalanceConfig::new(
            DifficultyScaling::new(0.8, 0.25, 3.5, 1.18, 0.02, 2.0),
            DamageRules::new(1, 3, 2.0),
            Rewards::new(25, 120),
            MiracleRules::new(120, 100.0, 50, 15),
        ),
    )
}

fn script(frame: u64) -> Option<Command> {
    match frame {
        0 => Some(Command::TriggerNextWave),
        5 => Some(Command::DeployUnit {
            archetype: "archer".to_owned(),
            x: 210.0,
            y: 210.0,
        }),
        6 => Some(Command::DeployUnit {
            archetype: "archer".to_owned(),
            x: 310.0,
            y: 210.0,
        }),
        240 => Some(Command::CastMiracle {
            miracle: Miracle::Freeze,
        }),
        600 => Some(Command::CastMiracle {
            miracle: Miracle::Overload,
        }),
        _ => None,
    }
}

fn run(frames: u64) -> (World, Vec<Event>, GameStats) {
    let mut stats = GameStats {
        wave: 0,
        timer: 8,
        mana: 600,
        base_hp: 100,
    };
    let mut world = World::new(bundle(), stats).expect("valid bundle");
    let mut log = Vec::new();

    for frame in 0..frames {
        let mut events = Vec::new();
        if let Some(command) = script(frame) {
            apply(&mut world, command, &mut events);
        }
        apply(&mut world, Command::Tick { stats }, &mut events);
        for event in &events {
            match event {
                Event::ManaAwarded { amount, .. } => stats.mana += amount,
                Event::UnitDeployed { cost, .. } | Event::UnitUpgraded { cost, .. } => {
                    stats.mana = stats.mana.saturating_sub(*cost);
                }
                Event::BaseDamaged { remaining_hp, .. } => stats.base_hp = *remaining_hp,
                Event::WaveStarted { wave } => stats.wave = *wave,
                _ => {}
            }
        }
        log.extend(events);
    }
    (world, log, stats)
}

#[test]
fn identical_scripts_replay_to_identical_worlds() {
    let (first_world, first_log, first_stats) = run(900);
    let (second_world, second_log, second_stats) = run(900);

    assert_eq!(first_log, second_log);
    assert_eq!(first_stats, second_stats);
    assert_eq!(
        query::enemy_view(&first_world).into_vec(),
        query::enemy_view(&second_world).into_vec()
    );
    assert_eq!(
        query::unit_view(&first_world).into_vec(),
        query::unit_view(&second_world).into_vec()
    );
    assert_eq!(
        query::projectile_snapshots(&first_world),
        query::projectile_snapshots(&second_world)
    );
    assert_eq!(
        query::decorations(&first_world),
        query::decorations(&second_world)
    );
    assert_eq!(query::frame(&first_world), query::frame(&second_world));
    assert_eq!(query::wave(&first_world), query::wave(&second_world));
}

#[test]
fn the_event_log_is_causally_ordered_within_each_kill() {
    let (_, log, _) = run(900);

    // Every kill is followed by its mana award, possibly after further kills
    // from the same burst that share one award.
    for (index, event) in log.iter().enumerate() {
        if matches!(event, Event::EnemyKilled { .. }) {
            let next = log.get(index + 1);
            assert!(
                matches!(
                    next,
                    Some(Event::ManaAwarded { .. }) | Some(Event::EnemyKilled { .. })
                ),
                "kill at {index} lacks a reward"
            );
        }
    }
}
