//! The immutable resource bundle supplied to the simulation at construction.
//!
//! The bundle is the only configuration surface of the core: map geometry,
//! unit and monster catalogs, the wave schedule and the balance tables all
//! arrive here, already deserialized by an adapter. [`ResourceBundle::validate`]
//! turns every dangling catalog reference into a [`BundleError`] at load time
//! so spawn-time lookups never miss.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::balance::BalanceConfig;
use crate::geometry::WorldPoint;
use crate::{Tint, UnitKind};

/// Colours the renderer uses for the map background.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapColors {
    grid_line: Tint,
    road_stroke: Tint,
}

impl MapColors {
    /// Creates a new map colour pair.
    #[must_use]
    pub const fn new(grid_line: Tint, road_stroke: Tint) -> Self {
        Self {
            grid_line,
            road_stroke,
        }
    }

    /// Colour of the background grid lines.
    #[must_use]
    pub const fn grid_line(&self) -> Tint {
        self.grid_line
    }

    /// Colour of the road the enemies walk.
    #[must_use]
    pub const fn road_stroke(&self) -> Tint {
        self.road_stroke
    }
}

/// Static map geometry: the enemy route, grid metrics and colours.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapDefinition {
    path: Vec<WorldPoint>,
    grid_size: f32,
    width: f32,
    height: f32,
    colors: MapColors,
}

impl MapDefinition {
    /// Creates a new map definition.
    #[must_use]
    pub const fn new(
        path: Vec<WorldPoint>,
        grid_size: f32,
        width: f32,
        height: f32,
        colors: MapColors,
    ) -> Self {
        Self {
            path,
            grid_size,
            width,
            height,
            colors,
        }
    }

    /// Ordered waypoints enemies walk from spawn to the castle.
    #[must_use]
    pub fn path(&self) -> &[WorldPoint] {
        &self.path
    }

    /// Side length of a placement grid cell in world units.
    #[must_use]
    pub const fn grid_size(&self) -> f32 {
        self.grid_size
    }

    /// Total playfield width in world units.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Total playfield height in world units.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Map colour palette.
    #[must_use]
    pub const fn colors(&self) -> &MapColors {
        &self.colors
    }
}

/// One purchasable upgrade step for a unit archetype.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpgradeTier {
    cost: u32,
    damage_multiplier: f32,
    range_bonus: f32,
}

impl UpgradeTier {
    /// Creates a new upgrade tier.
    #[must_use]
    pub const fn new(cost: u32, damage_multiplier: f32, range_bonus: f32) -> Self {
        Self {
            cost,
            damage_multiplier,
            range_bonus,
        }
    }

    /// Mana cost the host deducts when applying this tier.
    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }

    /// Factor applied to the unit's damage on upgrade.
    #[must_use]
    pub const fn damage_multiplier(&self) -> f32 {
        self.damage_multiplier
    }

    /// World units added to the unit's range on upgrade.
    #[must_use]
    pub const fn range_bonus(&self) -> f32 {
        self.range_bonus
    }
}

/// Terminal evolution entry displayed by the upgrade panel.
///
/// Evolutions are catalog data for the UI layer; the core never applies them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evolution {
    id: String,
    name: String,
    icon: String,
    cost: u32,
}

impl Evolution {
    /// Creates a new evolution entry.
    #[must_use]
    pub const fn new(id: String, name: String, icon: String, cost: u32) -> Self {
        Self {
            id,
            name,
            icon,
            cost,
        }
    }

    /// Stable identifier of the evolution.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name of the evolution.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display icon of the evolution.
    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    /// Mana cost of the evolution.
    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }
}

/// Stat block for a deployable unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitArchetype {
    name: String,
    icon: String,
    kind: UnitKind,
    range: f32,
    damage: f32,
    cooldown_frames: u32,
    cost: u32,
    hp: f32,
    color: Tint,
    upgrades: Vec<UpgradeTier>,
    evolutions: Vec<Evolution>,
}

impl UnitArchetype {
    /// Creates a new unit archetype.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub const fn new(
        name: String,
        icon: String,
        kind: UnitKind,
        range: f32,
        damage: f32,
        cooldown_frames: u32,
        cost: u32,
        hp: f32,
        color: Tint,
        upgrades: Vec<UpgradeTier>,
        evolutions: Vec<Evolution>,
    ) -> Self {
        Self {
            name,
            icon,
            kind,
            range,
            damage,
            cooldown_frames,
            cost,
            hp,
            color,
            upgrades,
            evolutions,
        }
    }

    /// Display name of the archetype.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display icon of the archetype.
    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    /// Behavioural class of the archetype.
    #[must_use]
    pub const fn kind(&self) -> UnitKind {
        self.kind
    }

    /// Targeting range in world units.
    #[must_use]
    pub const fn range(&self) -> f32 {
        self.range
    }

    /// Damage per projectile before synergy and upgrades.
    #[must_use]
    pub const fn damage(&self) -> f32 {
        self.damage
    }

    /// Frames between shots.
    #[must_use]
    pub const fn cooldown_frames(&self) -> u32 {
        self.cooldown_frames
    }

    /// Deployment cost the host deducts.
    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }

    /// Hit points at deployment.
    #[must_use]
    pub const fn hp(&self) -> f32 {
        self.hp
    }

    /// Projectile colour fired by the archetype.
    #[must_use]
    pub const fn color(&self) -> Tint {
        self.color
    }

    /// Upgrade tiers purchasable in order.
    #[must_use]
    pub fn upgrades(&self) -> &[UpgradeTier] {
        &self.upgrades
    }

    /// Evolution options offered after the final upgrade tier.
    #[must_use]
    pub fn evolutions(&self) -> &[Evolution] {
        &self.evolutions
    }
}

/// Stat block for a spawnable monster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonsterArchetype {
    name: String,
    icon: String,
    hp: f32,
    speed: f32,
    boss: bool,
}

impl MonsterArchetype {
    /// Creates a new monster archetype.
    #[must_use]
    pub const fn new(name: String, icon: String, hp: f32, speed: f32, boss: bool) -> Self {
        Self {
            name,
            icon,
            hp,
            speed,
            boss,
        }
    }

    /// Display name of the monster.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display icon of the monster.
    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    /// Base hit points before wave scaling.
    #[must_use]
    pub const fn hp(&self) -> f32 {
        self.hp
    }

    /// Base movement speed in world units per frame.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Whether this entry is a boss.
    #[must_use]
    pub const fn boss(&self) -> bool {
        self.boss
    }
}

/// Keyed monster catalog: named pools for regular spawns plus boss entries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonsterCatalog {
    pools: BTreeMap<String, Vec<MonsterArchetype>>,
    bosses: BTreeMap<String, MonsterArchetype>,
}

impl MonsterCatalog {
    /// Creates a new catalog from its pools and boss entries.
    #[must_use]
    pub const fn new(
        pools: BTreeMap<String, Vec<MonsterArchetype>>,
        bosses: BTreeMap<String, MonsterArchetype>,
    ) -> Self {
        Self { pools, bosses }
    }

    /// Looks up a named spawn pool.
    #[must_use]
    pub fn pool(&self, name: &str) -> Option<&[MonsterArchetype]> {
        self.pools.get(name).map(Vec::as_slice)
    }

    /// Looks up a boss entry by id.
    #[must_use]
    pub fn boss(&self, id: &str) -> Option<&MonsterArchetype> {
        self.bosses.get(id)
    }
}

/// Cadence parameters shared by every wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WavePacing {
    monsters_per_wave: u32,
    wave_duration: u32,
    spawn_interval_frames: u32,
    boss_interval: u32,
    final_wave: u32,
    max_spawn_burst: u32,
}

impl WavePacing {
    /// Creates a new pacing table.
    #[must_use]
    pub const fn new(
        monsters_per_wave: u32,
        wave_duration: u32,
        spawn_interval_frames: u32,
        boss_interval: u32,
        final_wave: u32,
        max_spawn_burst: u32,
    ) -> Self {
        Self {
            monsters_per_wave,
            wave_duration,
            spawn_interval_frames,
            boss_interval,
            final_wave,
            max_spawn_burst,
        }
    }

    /// Enemies owed to the spawn pool per wave.
    #[must_use]
    pub const fn monsters_per_wave(&self) -> u32 {
        self.monsters_per_wave
    }

    /// Countdown seconds between waves.
    #[must_use]
    pub const fn wave_duration(&self) -> u32 {
        self.wave_duration
    }

    /// Frames between spawn bursts.
    #[must_use]
    pub const fn spawn_interval_frames(&self) -> u32 {
        self.spawn_interval_frames
    }

    /// Every Nth wave carries a boss.
    #[must_use]
    pub const fn boss_interval(&self) -> u32 {
        self.boss_interval
    }

    /// Wave at which the campaign can be won.
    #[must_use]
    pub const fn final_wave(&self) -> u32 {
        self.final_wave
    }

    /// Upper bound on enemies created in a single spawn burst.
    #[must_use]
    pub const fn max_spawn_burst(&self) -> u32 {
        self.max_spawn_burst
    }
}

/// Early-game spawn pool selection with its cutoff wave.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolPhase {
    pool: String,
    until_wave: u32,
}

impl PoolPhase {
    /// Creates a new pool phase.
    #[must_use]
    pub const fn new(pool: String, until_wave: u32) -> Self {
        Self { pool, until_wave }
    }

    /// Name of the pool drawn from during this phase.
    #[must_use]
    pub fn pool(&self) -> &str {
        &self.pool
    }

    /// Last wave (inclusive) on which this phase applies.
    #[must_use]
    pub const fn until_wave(&self) -> u32 {
        self.until_wave
    }
}

/// Complete wave schedule: pacing, pool phases and boss overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaveSchedule {
    general: WavePacing,
    early_game: PoolPhase,
    mid_game_pool: String,
    special_waves: BTreeMap<u32, String>,
    default_boss: String,
}

impl WaveSchedule {
    /// Creates a new wave schedule.
    #[must_use]
    pub const fn new(
        general: WavePacing,
        early_game: PoolPhase,
        mid_game_pool: String,
        special_waves: BTreeMap<u32, String>,
        default_boss: String,
    ) -> Self {
        Self {
            general,
            early_game,
            mid_game_pool,
            special_waves,
            default_boss,
        }
    }

    /// Shared pacing parameters.
    #[must_use]
    pub const fn general(&self) -> &WavePacing {
        &self.general
    }

    /// Early-game pool phase.
    #[must_use]
    pub const fn early_game(&self) -> &PoolPhase {
        &self.early_game
    }

    /// Pool drawn from once the early-game cutoff has passed.
    #[must_use]
    pub fn mid_game_pool(&self) -> &str {
        &self.mid_game_pool
    }

    /// Per-wave boss overrides.
    #[must_use]
    pub const fn special_waves(&self) -> &BTreeMap<u32, String> {
        &self.special_waves
    }

    /// Boss spawned when a boss wave has no override.
    #[must_use]
    pub fn default_boss(&self) -> &str {
        &self.default_boss
    }

    /// Boss id scheduled for the given wave.
    #[must_use]
    pub fn boss_for_wave(&self, wave: u32) -> &str {
        self.special_waves
            .get(&wave)
            .map_or(self.default_boss.as_str(), String::as_str)
    }

    /// Spawn pool name drawn from on the given wave.
    #[must_use]
    pub fn pool_for_wave(&self, wave: u32) -> &str {
        if wave > self.early_game.until_wave() {
            &self.mid_game_pool
        } else {
            self.early_game.pool()
        }
    }
}

/// Configuration problems detected when a bundle is loaded.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum BundleError {
    /// The map path cannot route enemies anywhere.
    #[error("map path requires at least two waypoints, found {count}")]
    PathTooShort {
        /// Number of waypoints present.
        count: usize,
    },
    /// The placement grid size cannot be used for snapping.
    #[error("map grid size must be finite and positive, found {size}")]
    InvalidGridSize {
        /// Offending grid size.
        size: f32,
    },
    /// No unit archetypes were supplied.
    #[error("unit archetype catalog is empty")]
    NoUnits,
    /// A unit archetype carries a non-finite stat.
    #[error("unit archetype `{archetype}` has a non-finite {field}")]
    NonFiniteUnitStat {
        /// Key of the offending archetype.
        archetype: String,
        /// Name of the offending field.
        field: &'static str,
    },
    /// A monster archetype carries a non-finite stat.
    #[error("monster `{name}` has a non-finite {field}")]
    NonFiniteMonsterStat {
        /// Name of the offending monster.
        name: String,
        /// Name of the offending field.
        field: &'static str,
    },
    /// The schedule references a pool the catalog does not hold.
    #[error("monster pool `{pool}` referenced by the wave schedule is missing or empty")]
    MissingPool {
        /// Name of the missing pool.
        pool: String,
    },
    /// A special wave references a boss absent from the catalog.
    #[error("boss `{boss}` scheduled for wave {wave} is missing from the catalog")]
    MissingBoss {
        /// Wave carrying the override.
        wave: u32,
        /// Id of the missing boss.
        boss: String,
    },
    /// The fallback boss itself is absent from the catalog.
    #[error("default boss `{boss}` is missing from the catalog")]
    MissingDefaultBoss {
        /// Id of the missing default boss.
        boss: String,
    },
    /// A pacing parameter would stall or divide the scheduler.
    #[error("wave pacing field {field} must be at least one")]
    InvalidPacing {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A balance coefficient is non-finite.
    #[error("balance coefficient {field} is not finite")]
    NonFiniteBalance {
        /// Name of the offending coefficient.
        field: &'static str,
    },
}

/// Immutable configuration snapshot consumed by the simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceBundle {
    map: MapDefinition,
    units: BTreeMap<String, UnitArchetype>,
    monsters: MonsterCatalog,
    waves: WaveSchedule,
    balance: BalanceConfig,
}

impl ResourceBundle {
    /// Creates a new resource bundle from its five sections.
    #[must_use]
    pub const fn new(
        map: MapDefinition,
        units: BTreeMap<String, UnitArchetype>,
        monsters: MonsterCatalog,
        waves: WaveSchedule,
        balance: BalanceConfig,
    ) -> Self {
        Self {
            map,
            units,
            monsters,
            waves,
            balance,
        }
    }

    /// Map geometry and palette.
    #[must_use]
    pub const fn map(&self) -> &MapDefinition {
        &self.map
    }

    /// Keyed unit archetype catalog.
    #[must_use]
    pub const fn units(&self) -> &BTreeMap<String, UnitArchetype> {
        &self.units
    }

    /// Looks up a unit archetype by key.
    #[must_use]
    pub fn unit(&self, key: &str) -> Option<&UnitArchetype> {
        self.units.get(key)
    }

    /// Monster pools and boss entries.
    #[must_use]
    pub const fn monsters(&self) -> &MonsterCatalog {
        &self.monsters
    }

    /// Wave schedule.
    #[must_use]
    pub const fn waves(&self) -> &WaveSchedule {
        &self.waves
    }

    /// Balance coefficient tables.
    #[must_use]
    pub const fn balance(&self) -> &BalanceConfig {
        &self.balance
    }

    /// Checks every cross-reference and numeric field of the bundle.
    ///
    /// Called by the world at construction so that every spawn-time catalog
    /// lookup is infallible afterwards.
    pub fn validate(&self) -> Result<(), BundleError> {
        let waypoints = self.map.path().len();
        if waypoints < 2 {
            return Err(BundleError::PathTooShort { count: waypoints });
        }
        if !self.map.grid_size().is_finite() || self.map.grid_size() <= 0.0 {
            return Err(BundleError::InvalidGridSize {
                size: self.map.grid_size(),
            });
        }

        if self.units.is_empty() {
            return Err(BundleError::NoUnits);
        }
        for (key, archetype) in &self.units {
            for (field, value) in [
                ("range", archetype.range()),
                ("damage", archetype.damage()),
                ("hp", archetype.hp()),
            ] {
                if !value.is_finite() {
                    return Err(BundleError::NonFiniteUnitStat {
                        archetype: key.clone(),
                        field,
                    });
                }
            }
        }

        let pacing = self.waves.general();
        for (field, value) in [
            ("monsters_per_wave", pacing.monsters_per_wave()),
            ("spawn_interval_frames", pacing.spawn_interval_frames()),
            ("boss_interval", pacing.boss_interval()),
            ("final_wave", pacing.final_wave()),
            ("max_spawn_burst", pacing.max_spawn_burst()),
        ] {
            if value == 0 {
                return Err(BundleError::InvalidPacing { field });
            }
        }

        for pool_name in [self.waves.early_game().pool(), self.waves.mid_game_pool()] {
            match self.monsters.pool(pool_name) {
                Some(pool) if !pool.is_empty() => {
                    for monster in pool {
                        check_monster(monster)?;
                    }
                }
                _ => {
                    return Err(BundleError::MissingPool {
                        pool: pool_name.to_owned(),
                    })
                }
            }
        }

        for (wave, boss) in self.waves.special_waves() {
            match self.monsters.boss(boss) {
                Some(monster) => check_monster(monster)?,
                None => {
                    return Err(BundleError::MissingBoss {
                        wave: *wave,
                        boss: boss.clone(),
                    })
                }
            }
        }
        match self.monsters.boss(self.waves.default_boss()) {
            Some(monster) => check_monster(monster)?,
            None => {
                return Err(BundleError::MissingDefaultBoss {
                    boss: self.waves.default_boss().to_owned(),
                })
            }
        }

        let ds = self.balance.difficulty_scaling();
        for (field, value) in [
            ("early_base_offset", ds.early_base_offset()),
            ("early_scaling_factor", ds.early_scaling_factor()),
            ("late_scaling_base", ds.late_scaling_base()),
            ("late_scaling_pow", ds.late_scaling_pow()),
            ("enemy_speed_growth", ds.enemy_speed_growth()),
            ("boss_hp_scaling", ds.boss_hp_scaling()),
        ] {
            if !value.is_finite() {
                return Err(BundleError::NonFiniteBalance { field });
            }
        }

        Ok(())
    }
}

fn check_monster(monster: &MonsterArchetype) -> Result<(), BundleError> {
    for (field, value) in [("hp", monster.hp()), ("speed", monster.speed())] {
        if !value.is_finite() {
            return Err(BundleError::NonFiniteMonsterStat {
                name: monster.name().to_owned(),
                field,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::{DamageRules, DifficultyScaling, MiracleRules, Rewards};

    fn tint() -> Tint {
        Tint::from_rgb(0xff, 0x66, 0xaa)
    }

    fn monster(name: &str, boss: bool) -> MonsterArchetype {
        MonsterArchetype::new(name.to_owned(), "S".to_owned(), 40.0, 1.5, boss)
    }

    fn bundle() -> ResourceBundle {
        let map = MapDefinition::new(
            vec![
                WorldPoint::new(0.0, 100.0),
                WorldPoint::new(400.0, 100.0),
                WorldPoint::new(400.0, 300.0),
            ],
            50.0,
            2500.0,
            650.0,
            MapColors::new(tint(), tint()),
        );

        let mut units = BTreeMap::new();
        let _ = units.insert(
            "archer".to_owned(),
            UnitArchetype::new(
                "Archer".to_owned(),
                "A".to_owned(),
                UnitKind::RangedPhysical,
                200.0,
                50.0,
                60,
                100,
                900.0,
                tint(),
                vec![UpgradeTier::new(80, 1.5, 20.0)],
                Vec::new(),
            ),
        );

        let mut pools = BTreeMap::new();
        let _ = pools.insert("phase1".to_owned(), vec![monster("slime", false)]);
        let _ = pools.insert("phase2".to_owned(), vec![monster("wolf", false)]);
        let mut bosses = BTreeMap::new();
        let _ = bosses.insert("boss10".to_owned(), monster("dragon", true));

        ResourceBundle::new(
            map,
            units,
            MonsterCatalog::new(pools, bosses),
            WaveSchedule::new(
                WavePacing::new(8, 20, 60, 10, 30, 3),
                PoolPhase::new("phase1".to_owned(), 5),
                "phase2".to_owned(),
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

    #[test]
    fn well_formed_bundle_validates() {
        assert_eq!(bundle().validate(), Ok(()));
    }

    #[test]
    fn short_path_is_rejected() {
        let mut bundle = bundle();
        bundle.map = MapDefinition::new(
            vec![WorldPoint::new(0.0, 0.0)],
            50.0,
            2500.0,
            650.0,
            MapColors::new(tint(), tint()),
        );
        assert_eq!(
            bundle.validate(),
            Err(BundleError::PathTooShort { count: 1 })
        );
    }

    #[test]
    fn non_positive_grid_size_is_rejected() {
        let mut bundle = bundle();
        bundle.map = MapDefinition::new(
            vec![WorldPoint::new(0.0, 0.0), WorldPoint::new(600.0, 0.0)],
            0.0,
            2500.0,
            650.0,
            MapColors::new(tint(), tint()),
        );
        assert_eq!(
            bundle.validate(),
            Err(BundleError::InvalidGridSize { size: 0.0 })
        );
    }

    #[test]
    fn missing_pool_is_rejected() {
        let mut bundle = bundle();
        bundle.waves = WaveSchedule::new(
            *bundle.waves.general(),
            PoolPhase::new("nowhere".to_owned(), 5),
            "phase2".to_owned(),
            BTreeMap::new(),
            "boss10".to_owned(),
        );
        assert_eq!(
            bundle.validate(),
            Err(BundleError::MissingPool {
                pool: "nowhere".to_owned()
            })
        );
    }

    #[test]
    fn missing_special_wave_boss_is_rejected() {
        let mut bundle = bundle();
        let mut special = BTreeMap::new();
        let _ = special.insert(20, "boss20".to_owned());
        bundle.waves = WaveSchedule::new(
            *bundle.waves.general(),
            bundle.waves.early_game().clone(),
            "phase2".to_owned(),
            special,
            "boss10".to_owned(),
        );
        assert_eq!(
            bundle.validate(),
            Err(BundleError::MissingBoss {
                wave: 20,
                boss: "boss20".to_owned()
            })
        );
    }

    #[test]
    fn missing_default_boss_is_rejected() {
        let mut bundle = bundle();
        bundle.waves = WaveSchedule::new(
            *bundle.waves.general(),
            bundle.waves.early_game().clone(),
            "phase2".to_owned(),
            BTreeMap::new(),
            "absent".to_owned(),
        );
        assert_eq!(
            bundle.validate(),
            Err(BundleError::MissingDefaultBoss {
                boss: "absent".to_owned()
            })
        );
    }

    #[test]
    fn zero_pacing_field_is_rejected() {
        let mut bundle = bundle();
        bundle.waves = WaveSchedule::new(
            WavePacing::new(8, 20, 0, 10, 30, 3),
            bundle.waves.early_game().clone(),
            "phase2".to_owned(),
            BTreeMap::new(),
            "boss10".to_owned(),
        );
        assert_eq!(
            bundle.validate(),
            Err(BundleError::InvalidPacing {
                field: "spawn_interval_frames"
            })
        );
    }

    #[test]
    fn non_finite_balance_coefficient_is_rejected() {
        let mut bundle = bundle();
        bundle.balance = BalanceConfig::new(
            DifficultyScaling::new(0.8, f32::NAN, 3.5, 1.18, 0.02, 2.0),
            DamageRules::new(1, 3, 2.0),
            Rewards::new(25, 120),
            MiracleRules::new(300, 500.0, 50, 15),
        );
        assert_eq!(
            bundle.validate(),
            Err(BundleError::NonFiniteBalance {
                field: "early_scaling_factor"
            })
        );
    }

    #[test]
    fn boss_for_wave_prefers_the_override() {
        let mut bundle = bundle();
        let mut special = BTreeMap::new();
        let _ = special.insert(20, "boss10".to_owned());
        bundle.waves = WaveSchedule::new(
            *bundle.waves.general(),
            bundle.waves.early_game().clone(),
            "phase2".to_owned(),
            special,
            "boss10".to_owned(),
        );
        assert_eq!(bundle.waves.boss_for_wave(20), "boss10");
        assert_eq!(bundle.waves.boss_for_wave(10), "boss10");
    }

    #[test]
    fn pool_selection_respects_the_cutoff() {
        let bundle = bundle();
        assert_eq!(bundle.waves.pool_for_wave(5), "phase1");
        assert_eq!(bundle.waves.pool_for_wave(6), "phase2");
    }
}
