//! Difficulty-scaling formulas and the balance coefficient tables.
//!
//! The scaling curve feeds hit-point and speed fields directly, so every
//! function here guards against NaN and infinity: a broken coefficient falls
//! back to a neutral multiplier instead of producing an unkillable enemy.

use serde::{Deserialize, Serialize};

/// Wave number at which the scaling curve switches from linear to exponential.
pub const SCALING_CURVE_KNEE: u32 = 10;

/// Coefficients that shape the per-wave difficulty curve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultyScaling {
    early_base_offset: f32,
    early_scaling_factor: f32,
    late_scaling_base: f32,
    late_scaling_pow: f32,
    enemy_speed_growth: f32,
    boss_hp_scaling: f32,
}

impl DifficultyScaling {
    /// Creates a new coefficient set.
    #[must_use]
    pub const fn new(
        early_base_offset: f32,
        early_scaling_factor: f32,
        late_scaling_base: f32,
        late_scaling_pow: f32,
        enemy_speed_growth: f32,
        boss_hp_scaling: f32,
    ) -> Self {
        Self {
            early_base_offset,
            early_scaling_factor,
            late_scaling_base,
            late_scaling_pow,
            enemy_speed_growth,
            boss_hp_scaling,
        }
    }

    /// Additive base of the linear early-game branch.
    #[must_use]
    pub const fn early_base_offset(&self) -> f32 {
        self.early_base_offset
    }

    /// Per-wave slope of the linear early-game branch.
    #[must_use]
    pub const fn early_scaling_factor(&self) -> f32 {
        self.early_scaling_factor
    }

    /// Multiplier applied at the knee of the exponential branch.
    #[must_use]
    pub const fn late_scaling_base(&self) -> f32 {
        self.late_scaling_base
    }

    /// Exponent base of the late-game branch.
    #[must_use]
    pub const fn late_scaling_pow(&self) -> f32 {
        self.late_scaling_pow
    }

    /// Per-wave speed growth applied to non-boss enemies.
    #[must_use]
    pub const fn enemy_speed_growth(&self) -> f32 {
        self.enemy_speed_growth
    }

    /// Hit-point multiplier base applied to bosses every ten waves.
    #[must_use]
    pub const fn boss_hp_scaling(&self) -> f32 {
        self.boss_hp_scaling
    }
}

/// Penalties charged against the base when an enemy leaks, and the chip
/// damage blockers absorb.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DamageRules {
    normal_leak_penalty: u32,
    boss_leak_penalty: u32,
    block_chip_damage: f32,
}

impl DamageRules {
    /// Creates a new damage rule set.
    #[must_use]
    pub const fn new(normal_leak_penalty: u32, boss_leak_penalty: u32, block_chip_damage: f32) -> Self {
        Self {
            normal_leak_penalty,
            boss_leak_penalty,
            block_chip_damage,
        }
    }

    /// Base damage inflicted when a regular enemy leaks.
    #[must_use]
    pub const fn normal_leak_penalty(&self) -> u32 {
        self.normal_leak_penalty
    }

    /// Base damage inflicted when a boss leaks.
    #[must_use]
    pub const fn boss_leak_penalty(&self) -> u32 {
        self.boss_leak_penalty
    }

    /// Hit points a blocking unit loses per frame per blocked enemy.
    #[must_use]
    pub const fn block_chip_damage(&self) -> f32 {
        self.block_chip_damage
    }
}

/// Mana rewards granted by combat milestones.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rewards {
    kill_mana: u32,
    wave_clear_mana: u32,
}

impl Rewards {
    /// Creates a new reward table.
    #[must_use]
    pub const fn new(kill_mana: u32, wave_clear_mana: u32) -> Self {
        Self {
            kill_mana,
            wave_clear_mana,
        }
    }

    /// Mana paid for every projectile kill.
    #[must_use]
    pub const fn kill_mana(&self) -> u32 {
        self.kill_mana
    }

    /// Mana paid when a new wave begins.
    #[must_use]
    pub const fn wave_clear_mana(&self) -> u32 {
        self.wave_clear_mana
    }
}

/// Tuning values for the two player-triggered miracles.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MiracleRules {
    freeze_duration_frames: u32,
    overload_damage: f32,
    overload_base_mana: u32,
    overload_kill_bonus: u32,
}

impl MiracleRules {
    /// Creates a new miracle tuning table.
    #[must_use]
    pub const fn new(
        freeze_duration_frames: u32,
        overload_damage: f32,
        overload_base_mana: u32,
        overload_kill_bonus: u32,
    ) -> Self {
        Self {
            freeze_duration_frames,
            overload_damage,
            overload_base_mana,
            overload_kill_bonus,
        }
    }

    /// Frames enemy movement and spawning stay suspended after a freeze.
    #[must_use]
    pub const fn freeze_duration_frames(&self) -> u32 {
        self.freeze_duration_frames
    }

    /// Burst damage applied to every living enemy by an overload.
    #[must_use]
    pub const fn overload_damage(&self) -> f32 {
        self.overload_damage
    }

    /// Flat mana refunded by an overload regardless of kills.
    #[must_use]
    pub const fn overload_base_mana(&self) -> u32 {
        self.overload_base_mana
    }

    /// Extra mana per enemy the overload burst itself killed.
    #[must_use]
    pub const fn overload_kill_bonus(&self) -> u32 {
        self.overload_kill_bonus
    }
}

/// Complete balance coefficient bundle consumed by the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BalanceConfig {
    difficulty_scaling: DifficultyScaling,
    damage_system: DamageRules,
    rewards: Rewards,
    miracles: MiracleRules,
}

impl BalanceConfig {
    /// Creates a new balance configuration from its four tables.
    #[must_use]
    pub const fn new(
        difficulty_scaling: DifficultyScaling,
        damage_system: DamageRules,
        rewards: Rewards,
        miracles: MiracleRules,
    ) -> Self {
        Self {
            difficulty_scaling,
            damage_system,
            rewards,
            miracles,
        }
    }

    /// Difficulty curve coefficients.
    #[must_use]
    pub const fn difficulty_scaling(&self) -> &DifficultyScaling {
        &self.difficulty_scaling
    }

    /// Leak penalty and chip damage rules.
    #[must_use]
    pub const fn damage_system(&self) -> &DamageRules {
        &self.damage_system
    }

    /// Mana reward table.
    #[must_use]
    pub const fn rewards(&self) -> &Rewards {
        &self.rewards
    }

    /// Miracle tuning values.
    #[must_use]
    pub const fn miracles(&self) -> &MiracleRules {
        &self.miracles
    }
}

/// Returns `value` when it is finite and positive, `fallback` otherwise.
#[must_use]
pub fn sanitize(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

/// Hit-point multiplier applied to regular enemies on the given wave.
///
/// Linear up to [`SCALING_CURVE_KNEE`], exponential beyond it. The result is
/// always a finite positive multiplier; a malformed coefficient set yields
/// the neutral `1.0`.
#[must_use]
pub fn enemy_scaling(wave: u32, balance: &BalanceConfig) -> f32 {
    let ds = balance.difficulty_scaling();
    let raw = if wave <= SCALING_CURVE_KNEE {
        ds.early_base_offset() + wave as f32 * ds.early_scaling_factor()
    } else {
        let exponent = (wave - SCALING_CURVE_KNEE) as i32;
        ds.late_scaling_base() * ds.late_scaling_pow().powi(exponent)
    };
    sanitize(raw, 1.0)
}

/// Hit-point multiplier applied to the boss of the given wave.
///
/// Doubles the stakes every ten waves: `boss_hp_scaling ^ (wave / 10 - 1)`,
/// with the first boss appearing at multiplier one.
#[must_use]
pub fn boss_scaling(wave: u32, balance: &BalanceConfig) -> f32 {
    let tier = (wave / 10).saturating_sub(1);
    let raw = balance
        .difficulty_scaling()
        .boss_hp_scaling()
        .powi(tier as i32);
    sanitize(raw, 1.0)
}

/// Movement speed of an enemy spawned on the given wave.
#[must_use]
pub fn enemy_speed(base: f32, wave: u32, balance: &BalanceConfig) -> f32 {
    let growth = balance.difficulty_scaling().enemy_speed_growth();
    sanitize(base * (1.0 + wave as f32 * growth), sanitize(base, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BalanceConfig {
        BalanceConfig::new(
            DifficultyScaling::new(0.8, 0.25, 3.5, 1.18, 0.02, 2.0),
            DamageRules::new(1, 3, 2.0),
            Rewards::new(25, 120),
            MiracleRules::new(300, 500.0, 50, 15),
        )
    }

    #[test]
    fn scaling_is_linear_up_to_the_knee() {
        let balance = config();
        let expected = 0.8 + 4.0 * 0.25;
        assert!((enemy_scaling(4, &balance) - expected).abs() < 1e-6);
    }

    #[test]
    fn scaling_is_exponential_past_the_knee() {
        let balance = config();
        let expected = 3.5 * 1.18_f32.powi(5);
        assert!((enemy_scaling(15, &balance) - expected).abs() < 1e-4);
    }

    #[test]
    fn scaling_is_finite_on_both_sides_of_the_knee() {
        let balance = config();
        let at_knee = enemy_scaling(10, &balance);
        let past_knee = enemy_scaling(11, &balance);
        assert!(at_knee.is_finite() && at_knee > 0.0);
        assert!(past_knee.is_finite() && past_knee > 0.0);
    }

    #[test]
    fn scaling_is_idempotent() {
        let balance = config();
        for wave in 1..40 {
            assert_eq!(enemy_scaling(wave, &balance), enemy_scaling(wave, &balance));
        }
    }

    #[test]
    fn scaling_never_goes_negative_for_positive_waves() {
        let balance = config();
        for wave in 1..200 {
            let multiplier = enemy_scaling(wave, &balance);
            assert!(multiplier.is_finite());
            assert!(multiplier > 0.0, "wave {wave} produced {multiplier}");
        }
    }

    #[test]
    fn broken_coefficients_fall_back_to_neutral() {
        let balance = BalanceConfig::new(
            DifficultyScaling::new(f32::NAN, f32::INFINITY, 0.0, f32::NAN, f32::NAN, 0.0),
            DamageRules::new(1, 3, 2.0),
            Rewards::new(25, 120),
            MiracleRules::new(300, 500.0, 50, 15),
        );
        assert_eq!(enemy_scaling(3, &balance), 1.0);
        assert_eq!(enemy_scaling(30, &balance), 1.0);
        assert_eq!(boss_scaling(20, &balance), 1.0);
    }

    #[test]
    fn boss_scaling_starts_at_one_and_compounds() {
        let balance = config();
        assert_eq!(boss_scaling(10, &balance), 1.0);
        assert!((boss_scaling(20, &balance) - 2.0).abs() < f32::EPSILON);
        assert!((boss_scaling(30, &balance) - 4.0).abs() < f32::EPSILON);
    }

    #[test]
    fn enemy_speed_grows_with_wave_and_survives_bad_input() {
        let balance = config();
        assert!((enemy_speed(2.0, 10, &balance) - 2.4).abs() < 1e-6);
        assert!((enemy_speed(f32::NAN, 10, &balance) - 1.0).abs() < f32::EPSILON);
    }
}
