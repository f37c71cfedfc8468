use std::collections::BTreeMap;

use sanctum_defence_core::balance::{
    BalanceConfig, DamageRules, DifficultyScaling, MiracleRules, Rewards,
};
use sanctum_defence_core::bundle::{
    MapColors, MapDefinition, MonsterArchetype, MonsterCatalog, PoolPhase, ResourceBundle,
    UnitArchetype, WavePacing, WaveSchedule,
};
use sanctum_defence_core::{Command, GameStats, Tint, UnitKind, WorldPoint};
use sanctum_defence_system_analytics::Analytics;
use sanctum_defence_world::{apply, World};

fn tint() -> Tint {
    Tint::from_rgb(0x80, 0x80, 0x80)
}

fn bundle() -> ResourceBundle {
    let map = MapDefinition::new(
        vec![WorldPoint::new(0.0, 100.0), WorldPoint::new(600.0, 100.0)],
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
        vec![MonsterArchetype::new(
            "slime".to_owned(),
            "S".to_owned(),
            40.0,
            2.0,
            false,
        )],
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
            WavePacing::new(2, 30, 60, 10, 30, 1),
            PoolPhase::new("early".to_owned(), 50),
            "early".to_owned(),
            BTreeMap::new(),
            "boss10".to_owned(),
        ),
        BalanceConfig::new(
            DifficultyScaling::new(0.8, 0.25, 3.5, 1.18, 0.02, 2.0),
            DamageRules::new(1, 3, 2.0),
            Rewards::new(25, 120),
            MiracleRules::new(300, 500.0, 50, 15),
        ),
    )
}

fn stats() -> GameStats {
    GameStats {
        wave: 0,
        timer: 30,
        mana: 500,
        base_hp: 100,
    }
}

#[test]
fn tallies_track_a_scripted_world_run() {
    let mut world = World::new(bundle(), stats()).expect("valid bundle");
    let mut analytics = Analytics::new();
    let mut events = Vec::new();

    apply(&mut world, Command::TriggerNextWave, &mut events);
    analytics.handle(&events);
    events.clear();

    // Long enough for the wave to spawn both enemies and leak them all:
    // the path is 600 units and base speed grows to 2.04 on wave one.
    for _ in 0..400 {
        apply(&mut world, Command::Tick { stats: stats() }, &mut events);
        analytics.handle(&events);
        events.clear();
    }

    let report = *analytics.current();
    assert_eq!(report.wave, 1);
    assert_eq!(report.spawned, 2);
    assert_eq!(report.leaked, 2);
    assert_eq!(report.base_damage, 2);
    assert_eq!(report.killed, 0);
    assert_eq!(report.mana_earned, 120);
    assert_eq!(analytics.history().len(), 1);
    assert_eq!(analytics.history()[0].wave, 0);
}

#[test]
fn split_and_whole_event_feeds_agree_over_a_live_run() {
    let mut world_a = World::new(bundle(), stats()).expect("valid bundle");
    let mut world_b = World::new(bundle(), stats()).expect("valid bundle");
    let mut whole = Analytics::new();
    let mut split = Analytics::new();

    let mut events = Vec::new();
    apply(&mut world_a, Command::TriggerNextWave, &mut events);
    whole.handle(&events);
    events.clear();
    apply(&mut world_b, Command::TriggerNextWave, &mut events);
    for event in &events {
        split.handle(std::slice::from_ref(event));
    }
    events.clear();

    for _ in 0..350 {
        apply(&mut world_a, Command::Tick { stats: stats() }, &mut events);
        whole.handle(&events);
        events.clear();

        apply(&mut world_b, Command::Tick { stats: stats() }, &mut events);
        for event in &events {
            split.handle(std::slice::from_ref(event));
        }
        events.clear();
    }

    assert_eq!(whole.current(), split.current());
    assert_eq!(whole.history(), split.history());
}
