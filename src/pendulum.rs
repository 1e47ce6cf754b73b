//! The pendulum simulator (spec.md §4.F): an auxiliary orthonormal frame
//! hanging from the ball's center, tracking effective gravity and ball
//! acceleration. Cosmetic — it drives a rendered rope/pendant — but its
//! contract is part of the determinism guarantee so saved replays reproduce
//! (spec.md §5).

use vek::Vec3;

use crate::config::Config;
use crate::rotate::rotate;
use crate::world::ball::Ball;

/// Advances a ball's pendulum frame by one frame's `delta_v` (the net
/// velocity change over the full `dt`, spec.md §4.E step 5) and `dt`
/// itself.
pub fn step(ball: &mut Ball, config: &Config, gravity: Vec3<f32>, delta_v: Vec3<f32>, dt: f32) {
    if dt <= 0.0 {
        return;
    }

    let a = config.pendulum_k_a * delta_v - gravity * dt;
    let force = a * (config.pendulum_mass / dt);

    let lever = -ball.r * ball.pendulum_e[1];
    let torque = if lever.dot(force) != 0.0 {
        force.cross(lever)
    } else {
        Vec3::zero()
    };

    ball.pendulum_w += torque * dt;
    ball.pendulum_w *= config.pendulum_k_d;

    rotate(&mut ball.pendulum_e, ball.pendulum_w, dt);

    // Align E[1] toward the ball's motion with a small corrective torque.
    let e1 = ball.pendulum_e[1];
    let e2 = ball.pendulum_e[2];
    let v_parallel = e1 * ball.v.dot(e1);
    let y = v_parallel.cross(e2);
    let corrective = e1 * (2.0 * y.dot(e1));
    rotate(&mut ball.pendulum_e, corrective, dt);
}
