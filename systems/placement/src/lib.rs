#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure placement system that previews deployments and emits the matching
//! commands.
//!
//! The world is the sole authority on whether a deployment succeeds; this
//! system mirrors the same rules over read-only snapshots so adapters can
//! paint a live placement ghost and avoid submitting commands that would be
//! rejected anyway.

use sanctum_defence_core::bundle::ResourceBundle;
use sanctum_defence_core::geometry::{self, snap_to_grid, WorldPoint, DEFAULT_PATH_THRESHOLD};
use sanctum_defence_core::{Command, UnitId, UnitKind, UnitSnapshot};

/// Outcome of evaluating a prospective deployment position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementVerdict {
    /// The deployment would be accepted.
    Placeable,
    /// The archetype key is absent from the bundle.
    UnknownArchetype,
    /// Available mana cannot cover the archetype's cost.
    Unaffordable,
    /// The snapped position falls outside the playfield.
    OutOfBounds,
    /// A melee archetype aimed at ground away from the road.
    NotOnPath,
    /// A ranged archetype aimed at the road itself.
    BlocksPath,
    /// The snapped grid cell already holds a unit.
    Occupied,
}

/// Declarative preview describing a potential deployment.
#[derive(Clone, Debug, PartialEq)]
pub struct DeploymentPreview {
    /// Catalog key of the archetype under the cursor.
    pub archetype: String,
    /// Grid-snapped position the unit would occupy.
    pub position: WorldPoint,
    /// Verdict the world would reach for this request.
    pub verdict: PlacementVerdict,
}

impl DeploymentPreview {
    /// Reports whether confirming this preview would deploy a unit.
    #[must_use]
    pub fn placeable(&self) -> bool {
        self.verdict == PlacementVerdict::Placeable
    }
}

/// Evaluates a prospective deployment against the same rules the world
/// enforces, in the same order.
#[must_use]
pub fn evaluate(
    bundle: &ResourceBundle,
    units: &[UnitSnapshot],
    archetype_key: &str,
    x: f32,
    y: f32,
    mana: u32,
) -> DeploymentPreview {
    let map = bundle.map();
    let snapped = WorldPoint::new(
        snap_to_grid(x, map.grid_size()),
        snap_to_grid(y, map.grid_size()),
    );
    let preview = |verdict| DeploymentPreview {
        archetype: archetype_key.to_owned(),
        position: snapped,
        verdict,
    };

    let Some(archetype) = bundle.unit(archetype_key) else {
        return preview(PlacementVerdict::UnknownArchetype);
    };
    if mana < archetype.cost() {
        return preview(PlacementVerdict::Unaffordable);
    }
    if snapped.x() < 0.0
        || snapped.x() > map.width()
        || snapped.y() < 0.0
        || snapped.y() > map.height()
    {
        return preview(PlacementVerdict::OutOfBounds);
    }

    let on_path = geometry::is_on_path(snapped, map.path(), DEFAULT_PATH_THRESHOLD);
    let melee = archetype.kind() == UnitKind::MeleeTank;
    if melee && !on_path {
        return preview(PlacementVerdict::NotOnPath);
    }
    if !melee && on_path {
        return preview(PlacementVerdict::BlocksPath);
    }

    let occupied = units
        .iter()
        .any(|unit| geometry::distance(unit.position, snapped) < 0.5);
    if occupied {
        return preview(PlacementVerdict::Occupied);
    }

    preview(PlacementVerdict::Placeable)
}

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct DeploymentInput {
    /// Indicates whether the player confirmed a deployment on this frame.
    pub confirm_action: bool,
    /// Indicates whether the player requested a dismissal on this frame.
    pub dismiss_action: bool,
    /// World position currently under the cursor.
    pub cursor: Option<(f32, f32)>,
}

impl DeploymentInput {
    /// Creates a new input descriptor with explicit field values.
    #[must_use]
    pub const fn new(
        confirm_action: bool,
        dismiss_action: bool,
        cursor: Option<(f32, f32)>,
    ) -> Self {
        Self {
            confirm_action,
            dismiss_action,
            cursor,
        }
    }
}

/// Placement system that translates preview + input into deployment commands.
#[derive(Clone, Debug, Default)]
pub struct Deployment;

impl Deployment {
    /// Creates a new placement system instance.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Consumes a preview and adapter-derived input to emit commands.
    ///
    /// The `unit_at` closure should mirror the world's unit lookup so the
    /// system can identify the unit under the cursor for dismissal.
    pub fn handle<F>(
        &self,
        preview: Option<&DeploymentPreview>,
        input: DeploymentInput,
        mut unit_at: F,
        out: &mut Vec<Command>,
    ) where
        F: FnMut(WorldPoint) -> Option<UnitId>,
    {
        if input.confirm_action {
            if let Some(preview) = preview {
                if preview.placeable() {
                    out.push(Command::DeployUnit {
                        archetype: preview.archetype.clone(),
                        x: preview.position.x(),
                        y: preview.position.y(),
                    });
                }
            }
        }

        if input.dismiss_action {
            if let Some((x, y)) = input.cursor {
                if let Some(unit) = unit_at(WorldPoint::new(x, y)) {
                    out.push(Command::DismissUnit { unit });
                }
            }
        }
    }
}
