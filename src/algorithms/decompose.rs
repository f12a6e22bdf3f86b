//! Factorization of an affine map into interpretable components.
//!
//! Splits `A = refl · rot · shear · scale` via Gram-Schmidt QR of the linear
//! part, after reading the translation off the homogeneous column. Working on
//! the 2x2 block is equivalent to factoring the 3x3 homogeneous matrix with
//! its translation zeroed, since the trailing `[0, 0, 1]` row and column pass
//! through QR untouched.

use crate::core::math::qr2;
use crate::core::types::{AffineMap2D, TransformParts};
use crate::error::{AlignError, Result};

/// Decompose an affine map into translation, reflection, rotation, scale,
/// and shear.
///
/// The QR used here keeps the diagonal of R non-negative, so a reflection in
/// the map surfaces as `det(Q) < 0`; Q is then corrected with `diag(1, -1)`
/// to leave a proper rotation, and the flip is reported as
/// `reflection = -1.0` on the y axis. The rotation angle is
/// `atan2(rot[0][1], rot[0][0])` of the corrected rotation.
///
/// A rank-deficient linear part (either scale collapsing to zero, which
/// leaves shear undefined) fails with [`AlignError::DegenerateTransform`]
/// rather than producing NaN.
pub fn decompose(map: &AffineMap2D) -> Result<TransformParts> {
    let qr = qr2(&map.a).ok_or_else(|| {
        AlignError::DegenerateTransform(
            "linear part is rank-deficient, scale/shear undefined".to_string(),
        )
    })?;

    let det_q = qr.q[0][0] * qr.q[1][1] - qr.q[0][1] * qr.q[1][0];
    let reflection = if det_q < 0.0 { -1.0 } else { 1.0 };

    // Compose with diag(1, -1) so the remaining rotation is proper.
    let rot = [
        [qr.q[0][0], qr.q[0][1]],
        [reflection * qr.q[1][0], reflection * qr.q[1][1]],
    ];

    Ok(TransformParts {
        translation: map.b,
        reflection,
        rotation_rad: rot[0][1].atan2(rot[0][0]),
        scale: [qr.r[0][0], qr.r[1][1]],
        shear: qr.r[0][1] / qr.r[1][1],
    })
}
