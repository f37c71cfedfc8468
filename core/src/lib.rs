#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Sanctum Defence simulation.
//!
//! This crate defines the message surface that connects host adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then returns [`Event`] values for the host and
//! systems to react to deterministically. Systems consume event streams,
//! query immutable snapshots, and respond exclusively with new command
//! batches.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod balance;
pub mod bundle;
pub mod geometry;

pub use geometry::WorldPoint;

/// Fixed simulation rate: every timer in the core counts these frames.
pub const FRAMES_PER_SECOND: u32 = 60;

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a deployed unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(u32);

impl UnitId {
    /// Creates a new unit identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Failure raised when a colour string cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("expected a `#rrggbb` colour, found `{input}`")]
pub struct TintParseError {
    /// The string that failed to parse.
    pub input: String,
}

/// RGB colour carried by archetypes, projectiles and map palettes.
///
/// Serializes as the `#rrggbb` string the bundle files use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tint {
    red: u8,
    green: u8,
    blue: u8,
}

impl Tint {
    /// Creates a new tint from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parses a `#rrggbb` colour string.
    pub fn parse(input: &str) -> Result<Self, TintParseError> {
        let digits = input.strip_prefix('#').ok_or_else(|| TintParseError {
            input: input.to_owned(),
        })?;
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(TintParseError {
                input: input.to_owned(),
            });
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| TintParseError {
                input: input.to_owned(),
            })
        };
        Ok(Self {
            red: channel(0..2)?,
            green: channel(2..4)?,
            blue: channel(4..6)?,
        })
    }

    /// Red component of the colour.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the colour.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the colour.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

impl TryFrom<String> for Tint {
    type Error = TintParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Tint> for String {
    fn from(tint: Tint) -> Self {
        format!("#{:02x}{:02x}{:02x}", tint.red, tint.green, tint.blue)
    }
}

/// Lifecycle state of an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyState {
    /// Advancing along the path toward the base.
    Walking,
    /// Held in place by a melee unit and chipping at it.
    Blocked,
    /// Suspended by a stun or freeze timer.
    Stunned,
    /// Out of hit points; awaiting end-of-frame removal.
    Dead,
}

/// Behavioural class of a unit archetype.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    /// Off-path attacker firing physical projectiles.
    RangedPhysical,
    /// Off-path attacker firing magic projectiles.
    RangedMagic,
    /// On-path blocker that holds enemies and absorbs chip damage.
    MeleeTank,
}

/// Player-triggered battlefield interventions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Miracle {
    /// Suspends enemy movement and spawning for a fixed duration.
    Freeze,
    /// Deals burst damage to every living enemy and refunds mana.
    Overload,
}

/// Terminal result of a campaign.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// The final wave was cleared with the base standing.
    Victory,
    /// Base hit points reached zero.
    Defeat,
}

/// Origin of a mana award.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ManaSource {
    /// A projectile or blocker kill.
    Kill,
    /// A new wave beginning.
    WaveClear,
    /// The overload miracle's refund.
    Overload,
}

/// Kind of a short-lived visual effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Flash at a unit's muzzle when it fires.
    MuzzleFlash,
    /// Flash on an enemy when a projectile lands.
    HitFlash,
}

/// Kind of a static map decoration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecorKind {
    /// Conifer sprite.
    Evergreen,
    /// Deciduous sprite.
    Broadleaf,
}

/// Host-owned resource counters handed to the world on every tick.
///
/// The world never mutates these directly; it reads them for affordability
/// checks and reports changes through events the host applies itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    /// Wave currently in progress (zero before the first wave starts).
    pub wave: u32,
    /// Seconds remaining on the inter-wave countdown.
    pub timer: u32,
    /// Mana available for deployments, upgrades and miracles.
    pub mana: u32,
    /// Remaining base hit points.
    pub base_hp: u32,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Advances the simulation by exactly one frame.
    Tick {
        /// Host resource counters as of this frame.
        stats: GameStats,
    },
    /// Requests deployment of a unit at a raw world position.
    DeployUnit {
        /// Catalog key of the archetype to deploy.
        archetype: String,
        /// Requested horizontal coordinate before grid snapping.
        x: f32,
        /// Requested vertical coordinate before grid snapping.
        y: f32,
    },
    /// Requests removal of a deployed unit.
    DismissUnit {
        /// Identifier of the unit to remove.
        unit: UnitId,
    },
    /// Requests the next upgrade tier for a deployed unit.
    UpgradeUnit {
        /// Identifier of the unit to upgrade.
        unit: UnitId,
    },
    /// Invokes a miracle.
    CastMiracle {
        /// Miracle to invoke.
        miracle: Miracle,
    },
    /// Collapses the remaining countdown so the next wave starts immediately.
    TriggerNextWave,
    /// Suspends a single enemy for the given number of frames.
    StunEnemy {
        /// Identifier of the enemy to stun.
        enemy: EnemyId,
        /// Duration of the stun in frames.
        frames: u32,
    },
}

/// Reasons a deployment request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeployError {
    /// The requested archetype key is absent from the bundle.
    UnknownArchetype,
    /// The host's mana cannot cover the archetype's cost.
    InsufficientMana,
    /// The snapped position falls outside the playfield.
    OutOfBounds,
    /// A melee unit was aimed at ground away from the road.
    NotOnPath,
    /// A ranged unit was aimed at the road itself.
    BlocksPath,
    /// The snapped grid cell already holds a unit.
    Occupied,
}

/// Reasons a dismissal request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DismissError {
    /// No unit with the provided identifier exists.
    MissingUnit,
}

/// Reasons an upgrade request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeError {
    /// No unit with the provided identifier exists.
    MissingUnit,
    /// The unit has already purchased every tier.
    FullyUpgraded,
    /// The host's mana cannot cover the next tier's cost.
    InsufficientMana,
}

/// Events returned by the world after processing commands.
///
/// Events within one frame are ordered by cause: a kill precedes its mana
/// award, a leak precedes its base damage, and `GameEnded` is always last.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// One second elapsed on the inter-wave countdown.
    CountdownTicked {
        /// Seconds remaining after this tick.
        seconds_left: u32,
    },
    /// A new wave began.
    WaveStarted {
        /// Number of the wave that started.
        wave: u32,
    },
    /// An enemy entered the playfield.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Whether the enemy is a boss.
        boss: bool,
    },
    /// An enemy reached the end of the path.
    EnemyLeaked {
        /// Identifier of the enemy that leaked.
        enemy: EnemyId,
        /// Base damage the leak inflicts.
        penalty: u32,
        /// Whether the enemy was a boss.
        boss: bool,
    },
    /// The base lost hit points.
    BaseDamaged {
        /// Hit points lost.
        amount: u32,
        /// Hit points remaining after the loss.
        remaining_hp: u32,
    },
    /// An enemy transitioned from alive to dead.
    EnemyKilled {
        /// Identifier of the killed enemy.
        enemy: EnemyId,
    },
    /// An enemy was suspended by a stun or freeze.
    EnemyStunned {
        /// Identifier of the stunned enemy.
        enemy: EnemyId,
        /// Frames the suspension lasts.
        frames: u32,
    },
    /// Mana was granted to the host.
    ManaAwarded {
        /// Amount of mana granted.
        amount: u32,
        /// Milestone that produced the award.
        source: ManaSource,
    },
    /// A unit was deployed.
    UnitDeployed {
        /// Identifier assigned to the unit.
        unit: UnitId,
        /// Mana cost the host must deduct.
        cost: u32,
    },
    /// A unit was dismissed at the player's request.
    UnitDismissed {
        /// Identifier of the dismissed unit.
        unit: UnitId,
    },
    /// A unit purchased its next upgrade tier.
    UnitUpgraded {
        /// Identifier of the upgraded unit.
        unit: UnitId,
        /// Tier level now active on the unit.
        level: u32,
        /// Mana cost the host must deduct.
        cost: u32,
    },
    /// A blocking unit was destroyed by chip damage.
    UnitDestroyed {
        /// Identifier of the destroyed unit.
        unit: UnitId,
    },
    /// A deployment request was rejected.
    DeploymentRejected {
        /// Catalog key from the rejected request.
        archetype: String,
        /// Specific reason the deployment failed.
        reason: DeployError,
    },
    /// A dismissal request was rejected.
    DismissalRejected {
        /// Identifier from the rejected request.
        unit: UnitId,
        /// Specific reason the dismissal failed.
        reason: DismissError,
    },
    /// An upgrade request was rejected.
    UpgradeRejected {
        /// Identifier from the rejected request.
        unit: UnitId,
        /// Specific reason the upgrade failed.
        reason: UpgradeError,
    },
    /// A miracle took effect.
    MiracleInvoked {
        /// Miracle that was invoked.
        miracle: Miracle,
    },
    /// The campaign reached a terminal state.
    GameEnded {
        /// Final result of the campaign.
        outcome: GameOutcome,
    },
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Display icon inherited from the monster archetype.
    pub icon: String,
    /// Current world position.
    pub position: WorldPoint,
    /// Index of the next waypoint the enemy walks toward.
    pub path_index: usize,
    /// Remaining hit points.
    pub hp: f32,
    /// Hit points at spawn, after wave scaling.
    pub max_hp: f32,
    /// Movement speed in world units per frame.
    pub speed: f32,
    /// Lifecycle state.
    pub state: EnemyState,
    /// Whether the enemy is a boss.
    pub boss: bool,
}

/// Read-only snapshot describing all living enemies.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in deterministic order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single unit's state used for queries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitSnapshot {
    /// Unique identifier assigned to the unit.
    pub id: UnitId,
    /// Catalog key of the unit's archetype.
    pub archetype: String,
    /// Behavioural class of the unit.
    pub kind: UnitKind,
    /// Display icon inherited from the archetype.
    pub icon: String,
    /// Projectile colour inherited from the archetype.
    pub color: Tint,
    /// Grid-snapped world position.
    pub position: WorldPoint,
    /// Remaining hit points.
    pub hp: f32,
    /// Hit points at deployment.
    pub max_hp: f32,
    /// Damage per projectile after upgrades, before synergy.
    pub damage: f32,
    /// Targeting range after upgrades.
    pub range: f32,
    /// Frames between shots.
    pub cooldown_frames: u32,
    /// Upgrade tiers purchased so far.
    pub level: u32,
    /// Whether the synergy damage bonus is currently active.
    pub synergy: bool,
}

/// Read-only snapshot describing all deployed units.
#[derive(Clone, Debug, Default)]
pub struct UnitView {
    snapshots: Vec<UnitSnapshot>,
}

impl UnitView {
    /// Creates a new unit view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<UnitSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured unit snapshots in deterministic order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &UnitSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<UnitSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of one projectile pool slot.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSnapshot {
    /// Whether the slot currently holds a projectile in flight.
    pub active: bool,
    /// Current world position.
    pub position: WorldPoint,
    /// Enemy the projectile homes toward, when active.
    pub target: Option<EnemyId>,
    /// Colour inherited from the firing unit.
    pub color: Tint,
    /// Damage delivered on impact.
    pub damage: f32,
}

/// Immutable representation of one visual-effect pool slot.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectSnapshot {
    /// Kind of the effect.
    pub kind: EffectKind,
    /// World position of the effect.
    pub position: WorldPoint,
    /// Frames before the effect expires.
    pub frames_left: u32,
}

/// Immutable representation of one floating damage number.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DamageNumberSnapshot {
    /// Current world position of the number as it rises.
    pub position: WorldPoint,
    /// Damage amount displayed.
    pub amount: f32,
    /// Frames before the number expires.
    pub frames_left: u32,
}

/// Static map decoration generated once at world construction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Decoration {
    /// Sprite kind of the decoration.
    pub kind: DecorKind,
    /// World position of the decoration.
    pub position: WorldPoint,
}
