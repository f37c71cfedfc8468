#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Sanctum Defence.
//!
//! The world owns every entity on the battlefield and advances them one fixed
//! frame at a time. Adapters drive it exclusively through [`apply`] with
//! [`Command`] values and observe it through the returned [`Event`] stream and
//! the read-only [`query`] functions. Host-owned resources (mana, base hit
//! points) arrive as [`GameStats`] on every tick; the world reads them for
//! affordability checks and reports changes back as events for the host to
//! apply.

mod entities;
mod pools;

use sanctum_defence_core::balance::{boss_scaling, enemy_scaling, enemy_speed, sanitize};
use sanctum_defence_core::bundle::{BundleError, MapDefinition, ResourceBundle};
use sanctum_defence_core::geometry::{
    self, snap_to_grid, WorldPoint, DEFAULT_PATH_THRESHOLD,
};
use sanctum_defence_core::{
    Command, DecorKind, Decoration, DeployError, DismissError, EffectKind, EnemyId, EnemyState,
    Event, GameOutcome, GameStats, ManaSource, Miracle, UnitId, UpgradeError, FRAMES_PER_SECOND,
};

use entities::{DamageNumber, Effect, Enemy, Projectile, StepOutcome, Unit};
use pools::{Pool, PoolSlot};

const SPAWN_SEED: u64 = 0x42f0_e1eb_d4a5_3c21;
const DECOR_SEED: u64 = 0x9e37_79b9_7f4a_7c15;
const DECOR_DENSITY_PERCENT: u64 = 10;

const BLOCK_RADIUS: f32 = 40.0;
const SYNERGY_RADIUS: f32 = 150.0;
const SYNERGY_MIN_NEIGHBOURS: usize = 2;
const SYNERGY_DAMAGE_BONUS: f32 = 1.25;
const PROJECTILE_SPEED: f32 = 45.0;

const CASTLE_HIT_FRAMES: u32 = 12;
const SHAKE_DECAY: f32 = 0.92;
const SHAKE_EPSILON: f32 = 0.05;
const LEAK_SHAKE: f32 = 6.0;
const FREEZE_SHAKE: f32 = 8.0;
const OVERLOAD_SHAKE: f32 = 12.0;

const MUZZLE_FLASH_FRAMES: u32 = 6;
const HIT_FLASH_FRAMES: u32 = 8;
const DAMAGE_NUMBER_FRAMES: u32 = 40;
const DAMAGE_NUMBER_RISE: f32 = 0.5;

const PROJECTILE_POOL_CAPACITY: usize = 128;
const EFFECT_POOL_CAPACITY: usize = 96;
const DAMAGE_NUMBER_POOL_CAPACITY: usize = 96;

/// Represents the authoritative Sanctum Defence world state.
#[derive(Debug)]
pub struct World {
    bundle: ResourceBundle,
    stats: GameStats,
    frame: u64,
    enemies: Vec<Enemy>,
    units: Vec<Unit>,
    projectiles: Pool<Projectile>,
    effects: Pool<Effect>,
    damage_numbers: Pool<DamageNumber>,
    decorations: Vec<Decoration>,
    next_enemy_id: u32,
    next_unit_id: u32,
    wave: u32,
    countdown_seconds: u32,
    countdown_acc: u32,
    spawn_pool: u32,
    spawn_timer: u32,
    pending_boss: Option<String>,
    rush_requested: bool,
    freeze_frames: u32,
    castle_hit_frames: u32,
    shake: f32,
    rng_state: u64,
    outcome: Option<GameOutcome>,
    pending_shots: Vec<(usize, EnemyId)>,
}

impl World {
    /// Creates a new world from a validated resource bundle.
    ///
    /// `initial_stats` seeds the host counters used for affordability checks
    /// until the first tick replaces them.
    pub fn new(bundle: ResourceBundle, initial_stats: GameStats) -> Result<Self, BundleError> {
        bundle.validate()?;
        let decorations = generate_decorations(bundle.map());
        let countdown_seconds = bundle.waves().general().wave_duration();
        Ok(Self {
            bundle,
            stats: initial_stats,
            frame: 0,
            enemies: Vec::new(),
            units: Vec::new(),
            projectiles: Pool::with_capacity(PROJECTILE_POOL_CAPACITY),
            effects: Pool::with_capacity(EFFECT_POOL_CAPACITY),
            damage_numbers: Pool::with_capacity(DAMAGE_NUMBER_POOL_CAPACITY),
            decorations,
            next_enemy_id: 0,
            next_unit_id: 0,
            wave: 0,
            countdown_seconds,
            countdown_acc: 0,
            spawn_pool: 0,
            spawn_timer: 0,
            pending_boss: None,
            rush_requested: false,
            freeze_frames: 0,
            castle_hit_frames: 0,
            shake: 0.0,
            rng_state: SPAWN_SEED,
            outcome: None,
            pending_shots: Vec::new(),
        })
    }

    fn tick(&mut self, stats: GameStats, out_events: &mut Vec<Event>) {
        if self.outcome.is_some() {
            return;
        }
        self.stats = stats;
        self.frame += 1;

        let mut hp_lost: u32 = 0;

        self.advance_countdown(out_events);
        // Corpses left by commands between ticks must not mask a win.
        self.sweep_dead();
        // Winning ends the frame early: no combat or spawning runs after it.
        let mut ended = self.check_victory();
        if ended.is_none() {
            self.advance_spawning(out_events);
            self.resolve_blocking(out_events);
            self.advance_enemies(&mut hp_lost, &mut ended, out_events);
            if self.frame % u64::from(FRAMES_PER_SECOND) == 0 {
                self.recompute_synergy();
            }
            self.resolve_firing();
            self.resolve_projectiles(out_events);
        }
        self.advance_timers();
        self.sweep_dead();

        if let Some(outcome) = ended {
            self.outcome = Some(outcome);
            out_events.push(Event::GameEnded { outcome });
        }
    }

    fn advance_countdown(&mut self, out_events: &mut Vec<Event>) {
        if self.rush_requested {
            self.rush_requested = false;
            self.start_wave(out_events);
            return;
        }

        self.countdown_acc += 1;
        if self.countdown_acc < FRAMES_PER_SECOND {
            return;
        }
        self.countdown_acc = 0;

        if self.countdown_seconds > 0 {
            self.countdown_seconds -= 1;
            out_events.push(Event::CountdownTicked {
                seconds_left: self.countdown_seconds,
            });
        }
        if self.countdown_seconds == 0 {
            self.start_wave(out_events);
        }
    }

    /// The campaign is won once the final wave has started, its quota is
    /// fully spawned, and the battlefield is clear.
    fn check_victory(&self) -> Option<GameOutcome> {
        let won = self.wave >= self.bundle.waves().general().final_wave()
            && self.spawn_pool == 0
            && self.pending_boss.is_none()
            && self.enemies.is_empty();
        won.then_some(GameOutcome::Victory)
    }

    fn start_wave(&mut self, out_events: &mut Vec<Event>) {
        let pacing = *self.bundle.waves().general();
        let next_wave = self.wave + 1;
        self.countdown_seconds = pacing.wave_duration();
        self.countdown_acc = 0;

        if next_wave > pacing.final_wave() {
            return;
        }

        self.wave = next_wave;
        out_events.push(Event::WaveStarted { wave: self.wave });
        out_events.push(Event::ManaAwarded {
            amount: self.bundle.balance().rewards().wave_clear_mana(),
            source: ManaSource::WaveClear,
        });

        self.spawn_pool = self.spawn_pool.saturating_add(pacing.monsters_per_wave());
        // Prime the interval so the first burst lands this frame.
        self.spawn_timer = 0;

        if self.wave % pacing.boss_interval() == 0 {
            self.pending_boss = Some(self.bundle.waves().boss_for_wave(self.wave).to_owned());
        }
    }

    fn advance_spawning(&mut self, out_events: &mut Vec<Event>) {
        if self.freeze_frames > 0 || self.spawn_pool == 0 {
            return;
        }

        // A boss burst consumes a full wave's quota and takes the place of
        // the regular spawn for this frame.
        if let Some(boss_id) = self.pending_boss.take() {
            if let Some(archetype) = self.bundle.monsters().boss(&boss_id) {
                let archetype = archetype.clone();
                let speed = sanitize(archetype.speed(), 1.0);
                self.spawn_enemy(
                    &archetype,
                    boss_scaling(self.wave, self.bundle.balance()),
                    speed,
                );
                out_events.push(Event::EnemySpawned {
                    enemy: EnemyId::new(self.next_enemy_id - 1),
                    boss: true,
                });
                let quota = self.bundle.waves().general().monsters_per_wave();
                self.spawn_pool = self.spawn_pool.saturating_sub(quota);
                return;
            }
        }

        if self.spawn_timer > 0 {
            self.spawn_timer -= 1;
            return;
        }
        // The spawning frame counts toward the interval.
        self.spawn_timer = self
            .bundle
            .waves()
            .general()
            .spawn_interval_frames()
            .saturating_sub(1);

        let burst = self
            .bundle
            .waves()
            .general()
            .max_spawn_burst()
            .min(self.spawn_pool);
        for _ in 0..burst {
            let pool_name = self.bundle.waves().pool_for_wave(self.wave).to_owned();
            let Some(pool) = self.bundle.monsters().pool(&pool_name) else {
                break;
            };
            self.rng_state = next_random(self.rng_state);
            let index = (self.rng_state % pool.len() as u64) as usize;
            let archetype = pool[index].clone();
            let speed = enemy_speed(archetype.speed(), self.wave, self.bundle.balance());
            self.spawn_enemy(
                &archetype,
                enemy_scaling(self.wave, self.bundle.balance()),
                speed,
            );
            out_events.push(Event::EnemySpawned {
                enemy: EnemyId::new(self.next_enemy_id - 1),
                boss: false,
            });
        }
        self.spawn_pool -= burst;
    }

    fn spawn_enemy(
        &mut self,
        archetype: &sanctum_defence_core::bundle::MonsterArchetype,
        hp_multiplier: f32,
        speed: f32,
    ) {
        let origin = self.bundle.map().path()[0];
        let id = EnemyId::new(self.next_enemy_id);
        self.next_enemy_id += 1;
        self.enemies
            .push(Enemy::spawn(id, archetype, origin, hp_multiplier, speed));
    }

    fn resolve_blocking(&mut self, out_events: &mut Vec<Event>) {
        for enemy in &mut self.enemies {
            if enemy.state == EnemyState::Blocked {
                enemy.state = EnemyState::Walking;
            }
        }

        let chip = self.bundle.balance().damage_system().block_chip_damage();
        let Self { units, enemies, .. } = self;
        for unit in units.iter_mut() {
            if unit.is_ranged() {
                continue;
            }
            for enemy in enemies.iter_mut() {
                if enemy.state != EnemyState::Walking {
                    continue;
                }
                if geometry::distance(unit.position, enemy.position) <= BLOCK_RADIUS {
                    enemy.state = EnemyState::Blocked;
                    unit.hp -= chip;
                }
            }
        }

        let mut destroyed: Vec<UnitId> = Vec::new();
        self.units.retain(|unit| {
            if unit.hp <= 0.0 {
                destroyed.push(unit.id);
                false
            } else {
                true
            }
        });
        for unit in destroyed {
            out_events.push(Event::UnitDestroyed { unit });
        }
    }

    fn advance_enemies(
        &mut self,
        hp_lost: &mut u32,
        ended: &mut Option<GameOutcome>,
        out_events: &mut Vec<Event>,
    ) {
        if self.freeze_frames > 0 {
            self.freeze_frames -= 1;
            return;
        }

        let damage = *self.bundle.balance().damage_system();
        let stats = self.stats;
        let Self {
            bundle,
            enemies,
            castle_hit_frames,
            shake,
            ..
        } = self;
        let path = bundle.map().path();

        for enemy in enemies.iter_mut() {
            if !enemy.is_alive() {
                continue;
            }
            if enemy.step(path) != StepOutcome::Reached {
                continue;
            }

            let penalty = if enemy.boss {
                damage.boss_leak_penalty()
            } else {
                damage.normal_leak_penalty()
            };
            out_events.push(Event::EnemyLeaked {
                enemy: enemy.id,
                penalty,
                boss: enemy.boss,
            });
            // Leaked enemies are discarded without a kill reward.
            enemy.hp = 0.0;
            enemy.state = EnemyState::Dead;

            if ended.is_some() {
                continue;
            }
            *hp_lost += penalty;
            let remaining_hp = stats.base_hp.saturating_sub(*hp_lost);
            out_events.push(Event::BaseDamaged {
                amount: penalty,
                remaining_hp,
            });
            *castle_hit_frames = CASTLE_HIT_FRAMES;
            *shake = shake.max(LEAK_SHAKE);
            if remaining_hp == 0 {
                *ended = Some(GameOutcome::Defeat);
            }
        }
    }

    fn recompute_synergy(&mut self) {
        let positions: Vec<WorldPoint> = self.units.iter().map(|unit| unit.position).collect();
        for (index, unit) in self.units.iter_mut().enumerate() {
            if !unit.is_ranged() {
                unit.synergy = false;
                continue;
            }
            let neighbours = positions
                .iter()
                .enumerate()
                .filter(|(other, position)| {
                    *other != index
                        && geometry::distance(unit.position, **position) <= SYNERGY_RADIUS
                })
                .count();
            unit.synergy = neighbours >= SYNERGY_MIN_NEIGHBOURS;
        }
    }

    fn resolve_firing(&mut self) {
        let mut shots = std::mem::take(&mut self.pending_shots);
        shots.clear();

        let path = self.bundle.map().path();
        for (index, unit) in self.units.iter().enumerate() {
            if !unit.is_ranged() || !unit.ready_to_fire(self.frame) {
                continue;
            }
            if let Some(target) = unit.select_target(&self.enemies, path) {
                shots.push((index, target));
            }
        }

        for (index, target) in shots.drain(..) {
            let (position, color, damage) = {
                let unit = &self.units[index];
                (
                    unit.position,
                    unit.color,
                    unit.effective_damage(SYNERGY_DAMAGE_BONUS),
                )
            };

            // Pool exhaustion skips the shot; the cooldown stays armed so the
            // unit retries next frame.
            let Some(slot) = self.projectiles.acquire() else {
                continue;
            };
            slot.active = true;
            slot.position = position;
            slot.target = Some(target);
            slot.color = color;
            slot.damage = damage;

            if let Some(effect) = self.effects.acquire() {
                effect.active = true;
                effect.kind = EffectKind::MuzzleFlash;
                effect.position = position;
                effect.frames_left = MUZZLE_FLASH_FRAMES;
            }

            self.units[index].last_shot_frame = self.frame;
        }

        self.pending_shots = shots;
    }

    fn resolve_projectiles(&mut self, out_events: &mut Vec<Event>) {
        let kill_mana = self.bundle.balance().rewards().kill_mana();
        let Self {
            projectiles,
            enemies,
            effects,
            damage_numbers,
            ..
        } = self;

        for slot in projectiles.iter_mut() {
            if !slot.active {
                continue;
            }
            let Some(target_id) = slot.target else {
                slot.deactivate();
                continue;
            };
            let Some(enemy) = enemies
                .iter_mut()
                .find(|enemy| enemy.id == target_id && enemy.is_alive())
            else {
                slot.deactivate();
                continue;
            };

            let remaining = geometry::distance(slot.position, enemy.position);
            if remaining > PROJECTILE_SPEED {
                let fraction = PROJECTILE_SPEED / remaining;
                slot.position = WorldPoint::new(
                    slot.position.x() + (enemy.position.x() - slot.position.x()) * fraction,
                    slot.position.y() + (enemy.position.y() - slot.position.y()) * fraction,
                );
                continue;
            }

            let killed = enemy.apply_damage(slot.damage);
            if let Some(effect) = effects.acquire() {
                effect.active = true;
                effect.kind = EffectKind::HitFlash;
                effect.position = enemy.position;
                effect.frames_left = HIT_FLASH_FRAMES;
            }
            if let Some(number) = damage_numbers.acquire() {
                number.active = true;
                number.position = enemy.position;
                number.amount = slot.damage;
                number.frames_left = DAMAGE_NUMBER_FRAMES;
            }
            if killed {
                out_events.push(Event::EnemyKilled { enemy: enemy.id });
                out_events.push(Event::ManaAwarded {
                    amount: kill_mana,
                    source: ManaSource::Kill,
                });
            }
            slot.deactivate();
        }
    }

    fn advance_timers(&mut self) {
        for effect in self.effects.iter_mut() {
            if !effect.active {
                continue;
            }
            effect.frames_left = effect.frames_left.saturating_sub(1);
            if effect.frames_left == 0 {
                effect.deactivate();
            }
        }
        for number in self.damage_numbers.iter_mut() {
            if !number.active {
                continue;
            }
            number.position =
                WorldPoint::new(number.position.x(), number.position.y() - DAMAGE_NUMBER_RISE);
            number.frames_left = number.frames_left.saturating_sub(1);
            if number.frames_left == 0 {
                number.deactivate();
            }
        }
        self.castle_hit_frames = self.castle_hit_frames.saturating_sub(1);
        self.shake *= SHAKE_DECAY;
        if self.shake < SHAKE_EPSILON {
            self.shake = 0.0;
        }
    }

    fn sweep_dead(&mut self) {
        self.enemies.retain(Enemy::is_alive);
    }

    fn deploy_unit(&mut self, archetype_key: &str, x: f32, y: f32, out_events: &mut Vec<Event>) {
        let reject = |reason: DeployError, out_events: &mut Vec<Event>| {
            out_events.push(Event::DeploymentRejected {
                archetype: archetype_key.to_owned(),
                reason,
            });
        };

        let Some(archetype) = self.bundle.unit(archetype_key).cloned() else {
            reject(DeployError::UnknownArchetype, out_events);
            return;
        };
        if self.stats.mana < archetype.cost() {
            reject(DeployError::InsufficientMana, out_events);
            return;
        }

        let map = self.bundle.map();
        let snapped = WorldPoint::new(
            snap_to_grid(x, map.grid_size()),
            snap_to_grid(y, map.grid_size()),
        );
        if snapped.x() < 0.0
            || snapped.x() > map.width()
            || snapped.y() < 0.0
            || snapped.y() > map.height()
        {
            reject(DeployError::OutOfBounds, out_events);
            return;
        }

        let on_path = geometry::is_on_path(snapped, map.path(), DEFAULT_PATH_THRESHOLD);
        let melee = !matches!(
            archetype.kind(),
            sanctum_defence_core::UnitKind::RangedPhysical
                | sanctum_defence_core::UnitKind::RangedMagic
        );
        if melee && !on_path {
            reject(DeployError::NotOnPath, out_events);
            return;
        }
        if !melee && on_path {
            reject(DeployError::BlocksPath, out_events);
            return;
        }

        let occupied = self
            .units
            .iter()
            .any(|unit| geometry::distance(unit.position, snapped) < 0.5);
        if occupied {
            reject(DeployError::Occupied, out_events);
            return;
        }

        let id = UnitId::new(self.next_unit_id);
        self.next_unit_id += 1;
        self.units
            .push(Unit::deploy(id, archetype_key, &archetype, snapped));
        out_events.push(Event::UnitDeployed {
            unit: id,
            cost: archetype.cost(),
        });
    }

    fn dismiss_unit(&mut self, unit: UnitId, out_events: &mut Vec<Event>) {
        let Some(index) = self.units.iter().position(|candidate| candidate.id == unit) else {
            out_events.push(Event::DismissalRejected {
                unit,
                reason: DismissError::MissingUnit,
            });
            return;
        };
        let _ = self.units.remove(index);
        out_events.push(Event::UnitDismissed { unit });
    }

    fn upgrade_unit(&mut self, unit_id: UnitId, out_events: &mut Vec<Event>) {
        let reject = |reason: UpgradeError, out_events: &mut Vec<Event>| {
            out_events.push(Event::UpgradeRejected {
                unit: unit_id,
                reason,
            });
        };

        let Some(index) = self
            .units
            .iter()
            .position(|candidate| candidate.id == unit_id)
        else {
            reject(UpgradeError::MissingUnit, out_events);
            return;
        };
        let level = self.units[index].level as usize;
        let key = self.units[index].archetype.clone();
        let Some(tier) = self
            .bundle
            .unit(&key)
            .and_then(|archetype| archetype.upgrades().get(level))
            .copied()
        else {
            reject(UpgradeError::FullyUpgraded, out_events);
            return;
        };
        if self.stats.mana < tier.cost() {
            reject(UpgradeError::InsufficientMana, out_events);
            return;
        }

        self.units[index].apply_upgrade(&tier);
        out_events.push(Event::UnitUpgraded {
            unit: unit_id,
            level: self.units[index].level,
            cost: tier.cost(),
        });
    }

    fn cast_miracle(&mut self, miracle: Miracle, out_events: &mut Vec<Event>) {
        out_events.push(Event::MiracleInvoked { miracle });
        let rules = *self.bundle.balance().miracles();
        match miracle {
            Miracle::Freeze => {
                self.freeze_frames = rules.freeze_duration_frames();
                self.shake = self.shake.max(FREEZE_SHAKE);
            }
            Miracle::Overload => {
                let mut kills: u32 = 0;
                let Self {
                    enemies,
                    effects,
                    damage_numbers,
                    ..
                } = self;
                for enemy in enemies.iter_mut() {
                    if !enemy.is_alive() {
                        continue;
                    }
                    let killed = enemy.apply_damage(rules.overload_damage());
                    if let Some(effect) = effects.acquire() {
                        effect.active = true;
                        effect.kind = EffectKind::HitFlash;
                        effect.position = enemy.position;
                        effect.frames_left = HIT_FLASH_FRAMES;
                    }
                    if let Some(number) = damage_numbers.acquire() {
                        number.active = true;
                        number.position = enemy.position;
                        number.amount = rules.overload_damage();
                        number.frames_left = DAMAGE_NUMBER_FRAMES;
                    }
                    if killed {
                        kills += 1;
                        out_events.push(Event::EnemyKilled { enemy: enemy.id });
                    }
                }
                out_events.push(Event::ManaAwarded {
                    amount: rules.overload_base_mana() + kills * rules.overload_kill_bonus(),
                    source: ManaSource::Overload,
                });
                self.shake = self.shake.max(OVERLOAD_SHAKE);
            }
        }
    }

    fn stun_enemy(&mut self, enemy_id: EnemyId, frames: u32, out_events: &mut Vec<Event>) {
        // Missing or dead targets are a silent no-op.
        let Some(enemy) = self
            .enemies
            .iter_mut()
            .find(|enemy| enemy.id == enemy_id && enemy.is_alive())
        else {
            return;
        };
        if frames == 0 {
            return;
        }
        enemy.stun(frames);
        out_events.push(Event::EnemyStunned {
            enemy: enemy_id,
            frames,
        });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// After `GameEnded` has been emitted the world is terminal and every further
/// command is ignored.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if world.outcome.is_some() {
        return;
    }
    match command {
        Command::Tick { stats } => world.tick(stats, out_events),
        Command::DeployUnit { archetype, x, y } => {
            world.deploy_unit(&archetype, x, y, out_events);
        }
        Command::DismissUnit { unit } => world.dismiss_unit(unit, out_events),
        Command::UpgradeUnit { unit } => world.upgrade_unit(unit, out_events),
        Command::CastMiracle { miracle } => world.cast_miracle(miracle, out_events),
        Command::TriggerNextWave => world.rush_requested = true,
        Command::StunEnemy { enemy, frames } => world.stun_enemy(enemy, frames, out_events),
    }
}

fn generate_decorations(map: &MapDefinition) -> Vec<Decoration> {
    let cell = map.grid_size();
    let columns = (map.width() / cell) as u32;
    let rows = (map.height() / cell) as u32;
    let margin = DEFAULT_PATH_THRESHOLD + cell / 2.0;

    let mut rng_state = DECOR_SEED;
    let mut decorations = Vec::new();
    for row in 0..rows {
        for column in 0..columns {
            rng_state = next_random(rng_state);
            if rng_state % 100 >= DECOR_DENSITY_PERCENT {
                continue;
            }
            let position = WorldPoint::new(
                column as f32 * cell + cell / 2.0,
                row as f32 * cell + cell / 2.0,
            );
            if geometry::is_on_path(position, map.path(), margin) {
                continue;
            }
            let kind = if (rng_state >> 8) % 2 == 0 {
                DecorKind::Evergreen
            } else {
                DecorKind::Broadleaf
            };
            decorations.push(Decoration { kind, position });
        }
    }
    decorations
}

fn next_random(state: u64) -> u64 {
    state
        .wrapping_mul(6_364_136_223_846_793_005)
        .wrapping_add(1)
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use sanctum_defence_core::bundle::ResourceBundle;
    use sanctum_defence_core::{
        DamageNumberSnapshot, Decoration, EffectSnapshot, EnemySnapshot, EnemyView, GameOutcome,
        ProjectileSnapshot, UnitSnapshot, UnitView,
    };

    use super::World;

    /// Captures a read-only view of the living enemies, sorted by identifier.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        let snapshots: Vec<EnemySnapshot> = world
            .enemies
            .iter()
            .filter(|enemy| enemy.is_alive())
            .map(|enemy| EnemySnapshot {
                id: enemy.id,
                icon: enemy.icon.clone(),
                position: enemy.position,
                path_index: enemy.path_index,
                hp: enemy.hp,
                max_hp: enemy.max_hp,
                speed: enemy.speed,
                state: enemy.state,
                boss: enemy.boss,
            })
            .collect();
        EnemyView::from_snapshots(snapshots)
    }

    /// Captures a read-only view of the deployed units, sorted by identifier.
    #[must_use]
    pub fn unit_view(world: &World) -> UnitView {
        let snapshots: Vec<UnitSnapshot> = world
            .units
            .iter()
            .map(|unit| UnitSnapshot {
                id: unit.id,
                archetype: unit.archetype.clone(),
                kind: unit.kind,
                icon: unit.icon.clone(),
                color: unit.color,
                position: unit.position,
                hp: unit.hp,
                max_hp: unit.max_hp,
                damage: unit.damage,
                range: unit.range,
                cooldown_frames: unit.cooldown_frames,
                level: unit.level,
                synergy: unit.synergy,
            })
            .collect();
        UnitView::from_snapshots(snapshots)
    }

    /// Snapshots of the projectiles currently in flight.
    #[must_use]
    pub fn projectile_snapshots(world: &World) -> Vec<ProjectileSnapshot> {
        world
            .projectiles
            .iter()
            .filter(|slot| slot.active)
            .map(|slot| ProjectileSnapshot {
                active: slot.active,
                position: slot.position,
                target: slot.target,
                color: slot.color,
                damage: slot.damage,
            })
            .collect()
    }

    /// Snapshots of the visual effects currently alive.
    #[must_use]
    pub fn effect_snapshots(world: &World) -> Vec<EffectSnapshot> {
        world
            .effects
            .iter()
            .filter(|effect| effect.active)
            .map(|effect| EffectSnapshot {
                kind: effect.kind,
                position: effect.position,
                frames_left: effect.frames_left,
            })
            .collect()
    }

    /// Snapshots of the floating damage numbers currently alive.
    #[must_use]
    pub fn damage_number_snapshots(world: &World) -> Vec<DamageNumberSnapshot> {
        world
            .damage_numbers
            .iter()
            .filter(|number| number.active)
            .map(|number| DamageNumberSnapshot {
                position: number.position,
                amount: number.amount,
                frames_left: number.frames_left,
            })
            .collect()
    }

    /// Static decorations generated at world construction.
    #[must_use]
    pub fn decorations(world: &World) -> &[Decoration] {
        &world.decorations
    }

    /// Provides read-only access to the resource bundle the world runs on.
    #[must_use]
    pub fn bundle(world: &World) -> &ResourceBundle {
        &world.bundle
    }

    /// Wave currently in progress; zero before the first wave starts.
    #[must_use]
    pub fn wave(world: &World) -> u32 {
        world.wave
    }

    /// Seconds remaining on the inter-wave countdown.
    #[must_use]
    pub fn countdown_seconds(world: &World) -> u32 {
        world.countdown_seconds
    }

    /// Enemies still owed to the battlefield by the current wave.
    #[must_use]
    pub fn spawn_backlog(world: &World) -> u32 {
        world.spawn_pool
    }

    /// Current screen-shake magnitude for the renderer.
    #[must_use]
    pub fn screen_shake(world: &World) -> f32 {
        world.shake
    }

    /// Whether the base-hit pulse is still flashing.
    #[must_use]
    pub fn castle_hit_active(world: &World) -> bool {
        world.castle_hit_frames > 0
    }

    /// Frames the freeze miracle still has to run.
    #[must_use]
    pub fn freeze_frames(world: &World) -> u32 {
        world.freeze_frames
    }

    /// Terminal outcome, once the campaign has ended.
    #[must_use]
    pub fn outcome(world: &World) -> Option<GameOutcome> {
        world.outcome
    }

    /// Number of frames the world has simulated.
    #[must_use]
    pub fn frame(world: &World) -> u64 {
        world.frame
    }

    /// Projectile slots currently in flight out of the fixed capacity.
    #[must_use]
    pub fn projectile_load(world: &World) -> (usize, usize) {
        (
            world.projectiles.active_count(),
            world.projectiles.capacity(),
        )
    }
}
