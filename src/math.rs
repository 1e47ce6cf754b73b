//! 3-vector algebra and axis-angle rotation, built on top of [`vek`].
//!
//! The collision and integration code never reaches for `vek`'s own
//! quaternion type directly; `rotation_matrix` is kept as a free function so
//! the Rodrigues form used by the rest of the core (§4.A, §4.I) is in one
//! place and easy to audit against the spec.

use vek::Vec3;

/// `a + t * b`, the multiply-add used throughout the sweep and integrator code.
#[inline]
pub fn mad(a: Vec3<f32>, b: Vec3<f32>, t: f32) -> Vec3<f32> {
    a + b * t
}

/// Builds the 3x3 rotation matrix (as three column vectors) for a rotation of
/// `angle` radians around `axis`, via the Rodrigues rotation formula.
///
/// `axis` is assumed normalized. Returns the identity columns if `angle` is
/// zero, which also avoids any NaN propagation for a zero-length angular
/// velocity multiplied by dt.
pub fn rotation_matrix(axis: Vec3<f32>, angle: f32) -> [Vec3<f32>; 3] {
    if angle == 0.0 {
        return [Vec3::unit_x(), Vec3::unit_y(), Vec3::unit_z()];
    }

    let (s, c) = angle.sin_cos();
    let t = 1.0 - c;
    let Vec3 { x, y, z } = axis;

    [
        Vec3::new(t * x * x + c, t * x * y + s * z, t * x * z - s * y),
        Vec3::new(t * x * y - s * z, t * y * y + c, t * y * z + s * x),
        Vec3::new(t * x * z + s * y, t * y * z - s * x, t * z * z + c),
    ]
}

/// Applies a column-major rotation matrix (as produced by [`rotation_matrix`])
/// to a vector.
#[inline]
pub fn apply_rotation(m: &[Vec3<f32>; 3], v: Vec3<f32>) -> Vec3<f32> {
    m[0] * v.x + m[1] * v.y + m[2] * v.z
}
