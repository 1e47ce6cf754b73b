//! Basis rotation and re-orthonormalization (spec.md §4.I): applies an
//! angular-velocity delta to an orthonormal frame and corrects numerical
//! drift by three consecutive cross products.

use vek::Vec3;

use crate::math::{apply_rotation, rotation_matrix};
use crate::world::ball::Basis;

/// Rotates `basis` by angular velocity `w` over `dt`, then re-orthonormalizes
/// it (spec.md §4.I `sol_rotate`).
///
/// Re-orthonormalization order matters: `e2` is rebuilt from the (possibly
/// drifted) `e0`/`e1`, `e1` from the corrected `e2`/`e0`, and finally `e0`
/// from the corrected `e1`/`e2`. This is numerically stable and keeps drift
/// below single-precision noise across thousands of steps.
pub fn rotate(basis: &mut Basis, w: Vec3<f32>, dt: f32) {
    let mag = w.magnitude();
    if mag > 0.0 {
        let m = rotation_matrix(w / mag, mag * dt);
        basis[0] = apply_rotation(&m, basis[0]);
        basis[1] = apply_rotation(&m, basis[1]);
        basis[2] = apply_rotation(&m, basis[2]);
    }

    basis[2] = basis[0].cross(basis[1]).normalized();
    basis[1] = basis[2].cross(basis[0]).normalized();
    basis[0] = basis[1].cross(basis[2]).normalized();
}
