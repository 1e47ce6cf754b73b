//! The rolling ball: its rigid state, render basis, and pendulum basis
//! (spec.md §3).

use vek::Vec3;

/// Index into `World::balls`.
pub type BallIndex = u32;

/// Orthonormal 3x3 basis, stored column-major. Used both for the ball's
/// render orientation (`e`) and the pendulum frame (`E`) in spec.md §4.F.
pub type Basis = [Vec3<f32>; 3];

/// Identity basis.
pub fn identity_basis() -> Basis {
    [Vec3::unit_x(), Vec3::unit_y(), Vec3::unit_z()]
}

/// A spherical ball.
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    pub p: Vec3<f32>,
    pub v: Vec3<f32>,
    pub r: f32,
    /// Spin angular velocity, driven by rolling contact (spec.md §4.E).
    pub w: Vec3<f32>,
    /// Render basis, re-orthonormalized by `w` each step (spec.md §4.I).
    pub e: Basis,
    /// Pendulum angular velocity (spec.md §4.F).
    pub pendulum_w: Vec3<f32>,
    /// Pendulum basis, re-orthonormalized by `pendulum_w` each step.
    pub pendulum_e: Basis,
}

impl Ball {
    pub fn new(p: Vec3<f32>, r: f32) -> Self {
        Self {
            p,
            v: Vec3::zero(),
            r,
            w: Vec3::zero(),
            e: identity_basis(),
            pendulum_w: Vec3::zero(),
            pendulum_e: identity_basis(),
        }
    }

    /// How far a basis has drifted from orthonormal, the largest of
    /// `|col| . |col| - 1` and `|col_i . col_j|` over all pairs. Used by
    /// tests to check spec.md §8's "orthonormal within 1e-4" invariant.
    pub fn basis_orthonormality_error(basis: &Basis) -> f32 {
        let mut err: f32 = 0.0;
        for v in basis {
            err = err.max((v.magnitude_squared() - 1.0).abs());
        }
        for i in 0..3 {
            for j in (i + 1)..3 {
                err = err.max(basis[i].dot(basis[j]).abs());
            }
        }
        err
    }
}

/// Counts consecutive frames in which the ball has been at rest under
/// rolling friction (spec.md §4.E step 1's `*m`, §6's `rest_counter_out`).
///
/// A concrete type stands in for the spec's bare out-parameter, since
/// "increment `*m`" only makes sense once the caller owns something to
/// increment across frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestCounter(pub u32);

impl RestCounter {
    pub fn increment(&mut self) {
        self.0 += 1;
    }

    pub fn reset(&mut self) {
        self.0 = 0;
    }
}
