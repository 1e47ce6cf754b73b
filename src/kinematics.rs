//! Body path kinematics (spec.md §4.B): position and velocity of a
//! path-driven body, derived from its elapsed segment time.

use vek::Vec3;

use crate::world::path::Body;
use crate::world::World;

/// Hermite ease with zero endpoint derivatives: `3*tau^2 - 2*tau^3`.
#[inline]
fn erp(tau: f32) -> f32 {
    tau * tau * (3.0 - 2.0 * tau)
}

/// Derivative of [`erp`]: `6*tau - 6*tau^2`.
#[inline]
fn derp(tau: f32) -> f32 {
    6.0 * tau * (1.0 - tau)
}

/// Position of a body at its current path time (spec.md §4.B `body_p`).
///
/// Returns the origin for a body with no path. Interpolates between the
/// anchor of `world.paths[body.pi]` and its successor, using ease-in/out if
/// the path segment is marked smooth.
pub fn body_position(world: &World, body: &Body) -> Vec3<f32> {
    if body.pi < 0 {
        return Vec3::zero();
    }
    let p = &world.paths[body.pi as usize];
    let q = &world.paths[p.pi as usize];
    let tau = (body.t / p.t).clamp(0.0, 1.0);
    let d = q.p - p.p;

    if p.s {
        p.p + d * erp(tau)
    } else {
        p.p + d * tau
    }
}

/// Velocity of a body at its current path time (spec.md §4.B `body_v`).
///
/// Zero unless the body has a path and that path's enable flag is set: a
/// disabled path yields zero velocity but unchanged position, so a disabled
/// body stands still wherever it sits in its cycle.
pub fn body_velocity(world: &World, body: &Body) -> Vec3<f32> {
    if body.pi < 0 {
        return Vec3::zero();
    }
    let p = &world.paths[body.pi as usize];
    if !p.f {
        return Vec3::zero();
    }
    let q = &world.paths[p.pi as usize];
    let tau = (body.t / p.t).clamp(0.0, 1.0);
    let base = (q.p - p.p) / p.t;

    if p.s {
        base * derp(tau)
    } else {
        base
    }
}

/// Advances a body's path time by `dt`, wrapping onto the successor path
/// when the current segment's duration is exceeded (spec.md §8: "on wrap,
/// `b.pi` advances to `p.pi` and `b.t` resets to 0").
pub fn advance_body(world: &mut World, body_index: usize, dt: f32) {
    let body = &mut world.bodies[body_index];
    if body.pi < 0 {
        return;
    }
    body.t += dt;
    let p = world.paths[body.pi as usize];
    if body.t >= p.t {
        body.t = 0.0;
        let body = &mut world.bodies[body_index];
        body.pi = p.pi;
    }
}
