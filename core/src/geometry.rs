//! Pure geometry helpers shared by the simulation and its adapters.
//!
//! Enemy movement, targeting range checks and deployment legality all reduce
//! to the three operations in this module. Every function coerces non-finite
//! coordinates to zero before computing, so a malformed bundle can never push
//! NaN into a position or hit-point field.

use serde::{Deserialize, Serialize};

/// Default distance, in world units, at which a point counts as "on" the road.
pub const DEFAULT_PATH_THRESHOLD: f32 = 48.0;

/// Position expressed in continuous world coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    x: f32,
    y: f32,
}

impl WorldPoint {
    /// Creates a new world point from raw coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate of the point.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate of the point.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Returns a copy with both coordinates coerced to finite values.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            x: finite_or_zero(self.x),
            y: finite_or_zero(self.y),
        }
    }
}

/// Euclidean distance between two points.
///
/// Non-finite coordinates are treated as zero so a single corrupt entity can
/// never poison every distance comparison around it.
#[must_use]
pub fn distance(a: WorldPoint, b: WorldPoint) -> f32 {
    let a = a.sanitized();
    let b = b.sanitized();
    (a.x - b.x).hypot(a.y - b.y)
}

/// Maps a coordinate to the centre of its containing grid cell.
///
/// Degenerate cell sizes (zero, negative, non-finite) return the sanitized
/// input unchanged rather than dividing by zero.
#[must_use]
pub fn snap_to_grid(value: f32, cell_size: f32) -> f32 {
    let value = finite_or_zero(value);
    if !cell_size.is_finite() || cell_size <= 0.0 {
        return value;
    }
    (value / cell_size).floor() * cell_size + cell_size / 2.0
}

/// Reports whether a point lies within `threshold` of any path segment.
///
/// The test projects the point onto each segment, clamps the projection to
/// `[0, 1]`, and compares the resulting distance. Melee units must be placed
/// where this returns `true`; ranged units and decorations where it returns
/// `false`.
#[must_use]
pub fn is_on_path(point: WorldPoint, path: &[WorldPoint], threshold: f32) -> bool {
    let point = point.sanitized();
    for segment in path.windows(2) {
        let start = segment[0].sanitized();
        let end = segment[1].sanitized();

        let dx = end.x - start.x;
        let dy = end.y - start.y;
        let length_sq = dx * dx + dy * dy;
        if length_sq == 0.0 {
            continue;
        }

        let t = ((point.x - start.x) * dx + (point.y - start.y) * dy) / length_sq;
        let t = t.clamp(0.0, 1.0);
        let closest = WorldPoint::new(start.x + t * dx, start.y + t * dy);

        if distance(point, closest) < threshold {
            return true;
        }
    }
    false
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
