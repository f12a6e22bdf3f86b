//! Value types for trajectory logs and 2D affine transforms.

use serde::{Deserialize, Serialize};

use super::math;

/// One parsed trajectory log row.
///
/// Timestamps are microseconds since the Unix epoch, the shared
/// representation both logs are converted to on ingest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedPoint {
    /// Timestamp in microseconds since epoch
    pub timestamp_us: i64,
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl TimedPoint {
    /// Create a new timed point.
    #[inline]
    pub fn new(timestamp_us: i64, x: f64, y: f64) -> Self {
        Self { timestamp_us, x, y }
    }

    /// Coordinates as a 2-vector.
    #[inline]
    pub fn position(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}

/// One path sample matched to the tracker sample nearest in time.
///
/// Both sides are always present; path rows without a tracker sample inside
/// the tolerance window are dropped during synchronization, never null-filled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyncedPair {
    /// Path timestamp in microseconds since epoch
    pub timestamp_us: i64,
    /// Planned path position
    pub path: [f64; 2],
    /// Tracked position
    pub tracker: [f64; 2],
}

/// A 2D affine map `path ≈ A·tracker + b`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineMap2D {
    /// Linear part (row-major 2x2)
    pub a: [[f64; 2]; 2],
    /// Translation
    pub b: [f64; 2],
}

impl AffineMap2D {
    /// Identity map.
    pub fn identity() -> Self {
        Self {
            a: [[1.0, 0.0], [0.0, 1.0]],
            b: [0.0, 0.0],
        }
    }

    /// Apply the map to a point.
    #[inline]
    pub fn apply(&self, p: [f64; 2]) -> [f64; 2] {
        [
            self.a[0][0] * p[0] + self.a[0][1] * p[1] + self.b[0],
            self.a[1][0] * p[0] + self.a[1][1] * p[1] + self.b[1],
        ]
    }

    /// Determinant of the linear part. Negative means the map includes a
    /// reflection.
    #[inline]
    pub fn det(&self) -> f64 {
        math::det2(&self.a)
    }

    /// The 3x3 homogeneous form `[[A, b], [0 0 1]]`.
    pub fn to_homogeneous(&self) -> [[f64; 3]; 3] {
        [
            [self.a[0][0], self.a[0][1], self.b[0]],
            [self.a[1][0], self.a[1][1], self.b[1]],
            [0.0, 0.0, 1.0],
        ]
    }

    /// Build the map from decomposed components:
    /// `A = refl · rot(θ) · shear · scale`, `b = translation`.
    ///
    /// `rot(θ)` follows the convention recovered by
    /// [`decompose`](crate::algorithms::decompose::decompose)
    /// (`θ = atan2(rot[0][1], rot[0][0])`), so for positive scales
    /// compose and decompose round-trip.
    pub fn from_parts(parts: &TransformParts) -> Self {
        let (sin_t, cos_t) = parts.rotation_rad.sin_cos();
        let rot = [[cos_t, sin_t], [-sin_t, cos_t]];
        let shear = [[1.0, parts.shear], [0.0, 1.0]];
        let scale = [[parts.scale[0], 0.0], [0.0, parts.scale[1]]];
        let refl = [[1.0, 0.0], [0.0, parts.reflection]];

        let a = math::mul2(&refl, &math::mul2(&rot, &math::mul2(&shear, &scale)));
        Self {
            a,
            b: parts.translation,
        }
    }
}

/// Factorization of an [`AffineMap2D`] into interpretable components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformParts {
    /// Translation between the two frames
    pub translation: [f64; 2],
    /// +1.0 for a proper rotation, -1.0 when the map flips the y axis
    pub reflection: f64,
    /// Rotation angle in radians (`atan2(rot[0][1], rot[0][0])`)
    pub rotation_rad: f64,
    /// Per-axis scale factors
    pub scale: [f64; 2],
    /// Shear coefficient after removing anisotropic scale
    pub shear: f64,
}
