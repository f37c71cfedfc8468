//! Mutable entity state owned by the world.
//!
//! Enemies and units are plain structs with `pub(crate)` fields; the world
//! mutates them directly inside its frame steps and exposes them to the
//! outside exclusively through snapshot queries. Projectiles, effects and
//! damage numbers are pool slots and carry an `active` flag instead of being
//! created and dropped.

use sanctum_defence_core::bundle::{MonsterArchetype, UnitArchetype, UpgradeTier};
use sanctum_defence_core::geometry::{self, WorldPoint};
use sanctum_defence_core::{EffectKind, EnemyId, EnemyState, Tint, UnitId, UnitKind};

use crate::pools::PoolSlot;

/// Result of advancing an enemy by one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StepOutcome {
    /// Still somewhere on the path.
    Advancing,
    /// Passed the final waypoint this frame.
    Reached,
}

#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    pub(crate) id: EnemyId,
    pub(crate) icon: String,
    pub(crate) position: WorldPoint,
    pub(crate) path_index: usize,
    pub(crate) hp: f32,
    pub(crate) max_hp: f32,
    pub(crate) speed: f32,
    pub(crate) state: EnemyState,
    pub(crate) stun_frames: u32,
    pub(crate) boss: bool,
}

impl Enemy {
    pub(crate) fn spawn(
        id: EnemyId,
        archetype: &MonsterArchetype,
        origin: WorldPoint,
        hp_multiplier: f32,
        speed: f32,
    ) -> Self {
        let hp = (archetype.hp() * hp_multiplier).max(1.0);
        Self {
            id,
            icon: archetype.icon().to_owned(),
            position: origin,
            path_index: 1,
            hp,
            max_hp: hp,
            speed,
            state: EnemyState::Walking,
            stun_frames: 0,
            boss: archetype.boss(),
        }
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.state != EnemyState::Dead
    }

    /// Advances the enemy one frame along the path.
    ///
    /// Stunned enemies burn a frame off their timer, blocked enemies hold
    /// position, and walking enemies snap forward onto a waypoint whenever
    /// the remaining distance is smaller than one frame of travel.
    pub(crate) fn step(&mut self, path: &[WorldPoint]) -> StepOutcome {
        match self.state {
            EnemyState::Dead | EnemyState::Blocked => return StepOutcome::Advancing,
            EnemyState::Stunned => {
                self.stun_frames = self.stun_frames.saturating_sub(1);
                if self.stun_frames == 0 {
                    self.state = EnemyState::Walking;
                }
                return StepOutcome::Advancing;
            }
            EnemyState::Walking => {}
        }

        let Some(waypoint) = path.get(self.path_index) else {
            return StepOutcome::Reached;
        };

        let remaining = geometry::distance(self.position, *waypoint);
        if remaining < self.speed {
            self.position = *waypoint;
            self.path_index += 1;
            if self.path_index >= path.len() {
                return StepOutcome::Reached;
            }
        } else {
            let fraction = self.speed / remaining;
            self.position = WorldPoint::new(
                self.position.x() + (waypoint.x() - self.position.x()) * fraction,
                self.position.y() + (waypoint.y() - self.position.y()) * fraction,
            );
        }
        StepOutcome::Advancing
    }

    /// Applies damage, returning `true` exactly when this call killed the
    /// enemy. Repeated hits on a corpse stay at zero and return `false`.
    pub(crate) fn apply_damage(&mut self, amount: f32) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.hp = (self.hp - amount.max(0.0)).clamp(0.0, self.max_hp);
        if self.hp <= 0.0 {
            self.hp = 0.0;
            self.state = EnemyState::Dead;
            return true;
        }
        false
    }

    /// Suspends the enemy for the given number of frames. Longer of the new
    /// and any remaining stun wins; corpses are unaffected.
    pub(crate) fn stun(&mut self, frames: u32) {
        if frames == 0 || !self.is_alive() {
            return;
        }
        self.stun_frames = self.stun_frames.max(frames);
        self.state = EnemyState::Stunned;
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Unit {
    pub(crate) id: UnitId,
    pub(crate) archetype: String,
    pub(crate) kind: UnitKind,
    pub(crate) icon: String,
    pub(crate) color: Tint,
    pub(crate) position: WorldPoint,
    pub(crate) hp: f32,
    pub(crate) max_hp: f32,
    pub(crate) damage: f32,
    pub(crate) range: f32,
    pub(crate) cooldown_frames: u32,
    pub(crate) level: u32,
    pub(crate) synergy: bool,
    pub(crate) last_shot_frame: u64,
}

impl Unit {
    pub(crate) fn deploy(
        id: UnitId,
        key: &str,
        archetype: &UnitArchetype,
        position: WorldPoint,
    ) -> Self {
        Self {
            id,
            archetype: key.to_owned(),
            kind: archetype.kind(),
            icon: archetype.icon().to_owned(),
            color: archetype.color(),
            position,
            hp: archetype.hp(),
            max_hp: archetype.hp(),
            damage: archetype.damage(),
            range: archetype.range(),
            cooldown_frames: archetype.cooldown_frames(),
            level: 0,
            synergy: false,
            last_shot_frame: 0,
        }
    }

    pub(crate) fn is_ranged(&self) -> bool {
        matches!(self.kind, UnitKind::RangedPhysical | UnitKind::RangedMagic)
    }

    pub(crate) fn ready_to_fire(&self, frame: u64) -> bool {
        frame.saturating_sub(self.last_shot_frame) >= u64::from(self.cooldown_frames)
    }

    /// Damage per projectile with the synergy bonus applied.
    pub(crate) fn effective_damage(&self, synergy_bonus: f32) -> f32 {
        if self.synergy {
            self.damage * synergy_bonus
        } else {
            self.damage
        }
    }

    /// Picks the enemy to fire at: the one furthest along the path, then the
    /// one closest to its next waypoint, then the lowest identifier.
    pub(crate) fn select_target(&self, enemies: &[Enemy], path: &[WorldPoint]) -> Option<EnemyId> {
        let mut best: Option<(&Enemy, f32)> = None;
        for enemy in enemies {
            if !enemy.is_alive() {
                continue;
            }
            if geometry::distance(self.position, enemy.position) > self.range {
                continue;
            }
            let waypoint_distance = path
                .get(enemy.path_index)
                .map_or(0.0, |waypoint| geometry::distance(enemy.position, *waypoint));
            let candidate = (enemy, waypoint_distance);
            best = Some(match best {
                None => candidate,
                Some(current) => {
                    if further_along(candidate, current) {
                        candidate
                    } else {
                        current
                    }
                }
            });
        }
        best.map(|(enemy, _)| enemy.id)
    }

    pub(crate) fn apply_upgrade(&mut self, tier: &UpgradeTier) {
        self.damage *= tier.damage_multiplier();
        self.range += tier.range_bonus();
        self.level += 1;
    }
}

fn further_along(candidate: (&Enemy, f32), current: (&Enemy, f32)) -> bool {
    let (enemy, waypoint_distance) = candidate;
    let (best, best_distance) = current;
    if enemy.path_index != best.path_index {
        return enemy.path_index > best.path_index;
    }
    if waypoint_distance != best_distance {
        return waypoint_distance < best_distance;
    }
    enemy.id < best.id
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Projectile {
    pub(crate) active: bool,
    pub(crate) position: WorldPoint,
    pub(crate) target: Option<EnemyId>,
    pub(crate) color: Tint,
    pub(crate) damage: f32,
}

impl Default for Projectile {
    fn default() -> Self {
        Self {
            active: false,
            position: WorldPoint::new(0.0, 0.0),
            target: None,
            color: Tint::from_rgb(0, 0, 0),
            damage: 0.0,
        }
    }
}

impl PoolSlot for Projectile {
    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
        self.target = None;
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Effect {
    pub(crate) active: bool,
    pub(crate) kind: EffectKind,
    pub(crate) position: WorldPoint,
    pub(crate) frames_left: u32,
}

impl Default for Effect {
    fn default() -> Self {
        Self {
            active: false,
            kind: EffectKind::MuzzleFlash,
            position: WorldPoint::new(0.0, 0.0),
            frames_left: 0,
        }
    }
}

impl PoolSlot for Effect {
    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct DamageNumber {
    pub(crate) active: bool,
    pub(crate) position: WorldPoint,
    pub(crate) amount: f32,
    pub(crate) frames_left: u32,
}

impl Default for DamageNumber {
    fn default() -> Self {
        Self {
            active: false,
            position: WorldPoint::new(0.0, 0.0),
            amount: 0.0,
            frames_left: 0,
        }
    }
}

impl PoolSlot for DamageNumber {
    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slime() -> MonsterArchetype {
        MonsterArchetype::new("slime".to_owned(), "S".to_owned(), 40.0, 2.0, false)
    }

    fn straight_path() -> Vec<WorldPoint> {
        vec![
            WorldPoint::new(0.0, 100.0),
            WorldPoint::new(100.0, 100.0),
            WorldPoint::new(100.0, 200.0),
        ]
    }

    fn walker(id: u32, x: f32) -> Enemy {
        let mut enemy = Enemy::spawn(
            EnemyId::new(id),
            &slime(),
            WorldPoint::new(x, 100.0),
            1.0,
            2.0,
        );
        enemy.position = WorldPoint::new(x, 100.0);
        enemy
    }

    fn archer() -> UnitArchetype {
        UnitArchetype::new(
            "Archer".to_owned(),
            "A".to_owned(),
            UnitKind::RangedPhysical,
            200.0,
            50.0,
            60,
            100,
            900.0,
            Tint::from_rgb(0x44, 0xaa, 0xff),
            vec![UpgradeTier::new(80, 1.5, 20.0)],
            Vec::new(),
        )
    }

    #[test]
    fn walking_enemy_covers_speed_per_frame() {
        let path = straight_path();
        let mut enemy = walker(0, 0.0);
        assert_eq!(enemy.step(&path), StepOutcome::Advancing);
        assert!((enemy.position.x() - 2.0).abs() < 1e-6);
        assert!((enemy.position.y() - 100.0).abs() < 1e-6);
    }

    #[test]
    fn enemy_snaps_onto_a_close_waypoint_and_turns() {
        let path = straight_path();
        let mut enemy = walker(0, 99.0);
        assert_eq!(enemy.step(&path), StepOutcome::Advancing);
        assert_eq!(enemy.path_index, 2);
        assert!((enemy.position.x() - 100.0).abs() < 1e-6);
    }

    #[test]
    fn enemy_reports_reaching_the_final_waypoint() {
        let path = straight_path();
        let mut enemy = walker(0, 99.5);
        enemy.path_index = 2;
        enemy.position = WorldPoint::new(100.0, 199.0);
        assert_eq!(enemy.step(&path), StepOutcome::Reached);
    }

    #[test]
    fn stunned_enemy_holds_and_resumes() {
        let path = straight_path();
        let mut enemy = walker(0, 10.0);
        enemy.stun(2);
        assert_eq!(enemy.state, EnemyState::Stunned);

        let held = enemy.position;
        assert_eq!(enemy.step(&path), StepOutcome::Advancing);
        assert_eq!(enemy.position, held);
        assert_eq!(enemy.step(&path), StepOutcome::Advancing);
        assert_eq!(enemy.state, EnemyState::Walking);
    }

    #[test]
    fn stun_keeps_the_longer_timer() {
        let mut enemy = walker(0, 0.0);
        enemy.stun(120);
        enemy.stun(30);
        assert_eq!(enemy.stun_frames, 120);
    }

    #[test]
    fn damage_kills_exactly_once() {
        let mut enemy = walker(0, 0.0);
        assert!(!enemy.apply_damage(39.0));
        assert!(enemy.apply_damage(10.0));
        assert!(!enemy.apply_damage(10.0));
        assert_eq!(enemy.hp, 0.0);
    }

    #[test]
    fn negative_damage_cannot_heal() {
        let mut enemy = walker(0, 0.0);
        let _ = enemy.apply_damage(10.0);
        let before = enemy.hp;
        let _ = enemy.apply_damage(-50.0);
        assert_eq!(enemy.hp, before);
    }

    #[test]
    fn corpses_cannot_be_stunned() {
        let mut enemy = walker(0, 0.0);
        let _ = enemy.apply_damage(1000.0);
        enemy.stun(60);
        assert_eq!(enemy.state, EnemyState::Dead);
    }

    #[test]
    fn target_selection_prefers_the_enemy_furthest_along() {
        let path = straight_path();
        let unit = Unit::deploy(
            UnitId::new(0),
            "archer",
            &archer(),
            WorldPoint::new(75.0, 25.0),
        );

        let mut leader = walker(0, 90.0);
        leader.path_index = 2;
        leader.position = WorldPoint::new(100.0, 150.0);
        let trailer = walker(1, 90.0);

        let target = unit.select_target(&[trailer, leader.clone()], &path);
        assert_eq!(target, Some(leader.id));
    }

    #[test]
    fn target_selection_breaks_index_ties_by_remaining_distance() {
        let path = straight_path();
        let unit = Unit::deploy(
            UnitId::new(0),
            "archer",
            &archer(),
            WorldPoint::new(50.0, 25.0),
        );

        let near = walker(3, 80.0);
        let far = walker(1, 20.0);
        let target = unit.select_target(&[far, near.clone()], &path);
        assert_eq!(target, Some(near.id));
    }

    #[test]
    fn target_selection_ignores_corpses_and_out_of_range_enemies() {
        let path = straight_path();
        let unit = Unit::deploy(
            UnitId::new(0),
            "archer",
            &archer(),
            WorldPoint::new(0.0, 0.0),
        );

        let mut corpse = walker(0, 10.0);
        let _ = corpse.apply_damage(1000.0);
        let distant = walker(1, 100.0 + 250.0);

        assert_eq!(unit.select_target(&[corpse, distant], &path), None);
    }

    #[test]
    fn cooldown_gates_firing_from_frame_zero() {
        let unit = Unit::deploy(
            UnitId::new(0),
            "archer",
            &archer(),
            WorldPoint::new(0.0, 0.0),
        );
        assert!(!unit.ready_to_fire(59));
        assert!(unit.ready_to_fire(60));
    }

    #[test]
    fn upgrades_compound_damage_and_extend_range() {
        let archetype = archer();
        let mut unit = Unit::deploy(
            UnitId::new(0),
            "archer",
            &archetype,
            WorldPoint::new(0.0, 0.0),
        );
        unit.apply_upgrade(&archetype.upgrades()[0]);
        assert_eq!(unit.level, 1);
        assert!((unit.damage - 75.0).abs() < 1e-6);
        assert!((unit.range - 220.0).abs() < 1e-6);
    }

    #[test]
    fn synergy_scales_effective_damage() {
        let mut unit = Unit::deploy(
            UnitId::new(0),
            "archer",
            &archer(),
            WorldPoint::new(0.0, 0.0),
        );
        assert!((unit.effective_damage(1.25) - 50.0).abs() < 1e-6);
        unit.synergy = true;
        assert!((unit.effective_damage(1.25) - 62.5).abs() < 1e-6);
    }
}
