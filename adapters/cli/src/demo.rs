//! Built-in demo bundle used when no bundle file is supplied.

use std::collections::BTreeMap;

use sanctum_defence_core::balance::{
    BalanceConfig, DamageRules, DifficultyScaling, MiracleRules, Rewards,
};
use sanctum_defence_core::bundle::{
    Evolution, MapColors, MapDefinition, MonsterArchetype, MonsterCatalog, PoolPhase,
    ResourceBundle, UnitArchetype, UpgradeTier, WavePacing, WaveSchedule,
};
use sanctum_defence_core::{Tint, UnitKind, WorldPoint};

fn monster(name: &str, icon: &str, hp: f32, speed: f32, boss: bool) -> MonsterArchetype {
    MonsterArchetype::new(name.to_owned(), icon.to_owned(), hp, speed, boss)
}

/// A complete playable bundle: winding road, three unit archetypes, two
/// monster pools and a thirty-wave schedule.
pub(crate) fn bundle() -> ResourceBundle {
    let map = MapDefinition::new(
        vec![
            WorldPoint::new(0.0, 325.0),
            WorldPoint::new(600.0, 325.0),
            WorldPoint::new(600.0, 125.0),
            WorldPoint::new(1100.0, 125.0),
            WorldPoint::new(1100.0, 475.0),
            WorldPoint::new(1700.0, 475.0),
            WorldPoint::new(1700.0, 225.0),
            WorldPoint::new(2500.0, 225.0),
        ],
        50.0,
        2500.0,
        650.0,
        MapColors::new(
            Tint::from_rgb(0x2a, 0x2a, 0x3a),
            Tint::from_rgb(0x8a, 0x6d, 0x4a),
        ),
    );

    let mut units = BTreeMap::new();
    let _ = units.insert(
        "archer".to_owned(),
        UnitArchetype::new(
            "Archer".to_owned(),
            "\u{1f3f9}".to_owned(),
            UnitKind::RangedPhysical,
            200.0,
            50.0,
            60,
            100,
            900.0,
            Tint::from_rgb(0x44, 0xaa, 0xff),
            vec![
                UpgradeTier::new(80, 1.5, 20.0),
                UpgradeTier::new(160, 1.6, 25.0),
                UpgradeTier::new(320, 1.7, 30.0),
            ],
            vec![Evolution::new(
                "sniper".to_owned(),
                "Sniper".to_owned(),
                "\u{1f3af}".to_owned(),
                900,
            )],
        ),
    );
    let _ = units.insert(
        "mage".to_owned(),
        UnitArchetype::new(
            "Mage".to_owned(),
            "\u{1f9d9}".to_owned(),
            UnitKind::RangedMagic,
            240.0,
            80.0,
            90,
            160,
            700.0,
            Tint::from_rgb(0xbb, 0x55, 0xff),
            vec![
                UpgradeTier::new(120, 1.6, 15.0),
                UpgradeTier::new(240, 1.7, 20.0),
            ],
            vec![Evolution::new(
                "archmage".to_owned(),
                "Archmage".to_owned(),
                "\u{1f52e}".to_owned(),
                1200,
            )],
        ),
    );
    let _ = units.insert(
        "guard".to_owned(),
        UnitArchetype::new(
            "Guard".to_owned(),
            "\u{1f6e1}".to_owned(),
            UnitKind::MeleeTank,
            40.0,
            10.0,
            30,
            80,
            2400.0,
            Tint::from_rgb(0xcc, 0xcc, 0x55),
            vec![UpgradeTier::new(100, 1.2, 0.0)],
            Vec::new(),
        ),
    );

    let mut pools = BTreeMap::new();
    let _ = pools.insert(
        "early".to_owned(),
        vec![
            monster("Slime", "\u{1f7e2}", 40.0, 1.6, false),
            monster("Bat", "\u{1f987}", 28.0, 2.4, false),
        ],
    );
    let _ = pools.insert(
        "mid".to_owned(),
        vec![
            monster("Wolf", "\u{1f43a}", 90.0, 2.2, false),
            monster("Golem", "\u{1f5ff}", 260.0, 1.1, false),
            monster("Wraith", "\u{1f47b}", 120.0, 1.9, false),
        ],
    );
    let mut bosses = BTreeMap::new();
    let _ = bosses.insert(
        "boss10".to_owned(),
        monster("Dragon", "\u{1f409}", 3200.0, 1.0, true),
    );
    let _ = bosses.insert(
        "boss20".to_owned(),
        monster("Lich King", "\u{1f480}", 5200.0, 0.9, true),
    );

    let mut special_waves = BTreeMap::new();
    let _ = special_waves.insert(20, "boss20".to_owned());

    ResourceBundle::new(
        map,
        units,
        MonsterCatalog::new(pools, bosses),
        WaveSchedule::new(
            WavePacing::new(8, 20, 60, 10, 30, 3),
            PoolPhase::new("early".to_owned(), 5),
            "mid".to_owned(),
            special_waves,
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
