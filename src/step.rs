//! The per-frame integrator and bounce resolution (spec.md §4.E): advances
//! one ball by one tick under gravity, resolving up to
//! [`Config::iteration_cap`] contacts within the frame.

use vek::Vec3;

use crate::bsp::test_world;
use crate::config::Config;
use crate::kinematics::advance_body;
use crate::math::mad;
use crate::pendulum;
use crate::timers::step_switch_timers;
use crate::world::ball::{BallIndex, RestCounter};
use crate::world::World;

/// Advances every body's path time and every switch's countdown by `dt`,
/// without touching any ball. Shared by the friction-probe slice and the
/// main collision loop in [`step`] so bodies/switches always advance in
/// lockstep with the ball (spec.md §4.E: "advance bodies, switch timers,
/// and the ball by that duration").
fn advance_world_time(world: &mut World, dt: f32) {
    for i in 0..world.bodies.len() {
        advance_body(world, i, dt);
    }
    step_switch_timers(world, dt);
}

/// Reflects the ball's velocity off a contact, updates spin, and
/// re-projects position to remove residual penetration (spec.md §4.E
/// `sol_bounce`). Returns the normal-aligned closing speed, used as bounce
/// loudness.
fn bounce(ball: &mut crate::world::ball::Ball, config: &Config, contact_point: Vec3<f32>, contact_velocity: Vec3<f32>) -> f32 {
    let r = ball.p - contact_point;
    let n = r.normalized();
    let d = ball.v - contact_velocity;

    let r_sq = r.magnitude_squared();
    if r_sq > 0.0 {
        ball.w = -(d.cross(r)) / r_sq;
    }

    let closing = contact_velocity.dot(n) - ball.v.dot(n);
    ball.v += n * (config.restitution * closing);

    ball.p = contact_point + n * ball.r;

    (n.dot(d)).abs()
}

/// Advances ball `ball_index` by one tick under gravity `gravity`.
///
/// Returns the maximum bounce energy of the frame (0 if nothing was hit).
/// `rest` tracks consecutive at-rest frames for friction purposes; pass
/// `None` to suppress the friction-probe/rolling-friction branch entirely
/// (spec.md §6: "may be null to suppress friction logic").
pub fn step(
    world: &mut World,
    config: &Config,
    gravity: Vec3<f32>,
    dt: f32,
    ball_index: BallIndex,
    mut rest: Option<&mut RestCounter>,
) -> f32 {
    if dt <= 0.0 {
        return 0.0;
    }

    let a = world.balls[ball_index as usize].v;
    let mut v = a;

    // 1. Friction probe: query the world as if the ball were moving along
    // gravity, to see whether it is resting on a surface.
    let mut took_rest_branch = false;
    if rest.is_some() {
        let p = world.balls[ball_index as usize].p;
        let r = world.balls[ball_index as usize].r;
        if let Some(contact) = test_world(world, dt, p, gravity, r) {
            if contact.t < config.friction_probe_threshold {
                let to_contact = contact.point - p;
                let g_dir = gravity.normalized();
                let aligned = if to_contact.magnitude_squared() > 0.0 {
                    to_contact.normalized().dot(g_dir)
                } else {
                    0.0
                };

                if aligned > config.rest_alignment_cos {
                    took_rest_branch = true;

                    let mut speed = v.magnitude();
                    speed -= dt;

                    if speed > 0.0 {
                        let slip = contact.velocity - v;
                        let r_vec = contact.point - p;
                        let r_sq = r_vec.magnitude_squared();
                        v = v.normalized() * speed;
                        if r_sq > 0.0 {
                            world.balls[ball_index as usize].w = -(slip.cross(r_vec)) / r_sq;
                        }
                    } else {
                        v = Vec3::zero();
                        if let Some(m) = rest.as_deref_mut() {
                            m.increment();
                        }
                    }
                }
            }
        }
    }

    // 2. Acceleration, unless step 1 took the rest branch.
    if !took_rest_branch {
        v += gravity * dt;
    }
    world.balls[ball_index as usize].v = v;

    // 3. Bounded collision-resolution loop.
    let mut tt = dt;
    let mut max_energy = 0.0f32;
    let mut iterations_left = config.iteration_cap;

    loop {
        if iterations_left == 0 {
            log::debug!("ball {ball_index} hit the collision-loop iteration cap; punting the rest of the frame");
            break;
        }

        let p = world.balls[ball_index as usize].p;
        let v = world.balls[ball_index as usize].v;
        let r = world.balls[ball_index as usize].r;

        let Some(contact) = test_world(world, tt, p, v, r) else {
            break;
        };
        if contact.t >= tt {
            break;
        }

        advance_world_time(world, contact.t);
        {
            let ball = &mut world.balls[ball_index as usize];
            ball.p = mad(ball.p, ball.v, contact.t);
        }

        let energy = {
            let mut ball = world.balls[ball_index as usize];
            let e = bounce(&mut ball, config, contact.point, contact.velocity);
            world.balls[ball_index as usize] = ball;
            e
        };
        max_energy = max_energy.max(energy);

        tt -= contact.t;
        iterations_left -= 1;

        if tt <= 0.0 {
            break;
        }
    }

    // 4. Advance the remaining slice.
    if tt > 0.0 {
        advance_world_time(world, tt);
        let ball = &mut world.balls[ball_index as usize];
        ball.p = mad(ball.p, ball.v, tt);
    }

    // 5. Feed the full-frame velocity delta to the pendulum.
    let delta_v = world.balls[ball_index as usize].v - a;
    let mut ball = world.balls[ball_index as usize];
    pendulum::step(&mut ball, config, gravity, delta_v, dt);
    world.balls[ball_index as usize] = ball;

    max_energy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::ball::Ball;

    fn empty_world_with_ball(p: Vec3<f32>, v: Vec3<f32>, r: f32) -> World {
        let mut world = World::new();
        world.balls.push(Ball::new(p, r));
        world.balls[0].v = v;
        world
    }

    #[test]
    fn free_fall_one_tenth_second() {
        let mut world = empty_world_with_ball(Vec3::new(0.0, 10.0, 0.0), Vec3::zero(), 0.25);
        let config = Config::default();
        let gravity = Vec3::new(0.0, -9.8, 0.0);

        let energy = step(&mut world, &config, gravity, 0.1, 0, None);

        assert_eq!(energy, 0.0);
        let ball = &world.balls[0];
        assert!((ball.p.y - 9.902).abs() < 1e-3);
        assert!((ball.v.y - (-0.98)).abs() < 1e-3);
    }

    #[test]
    fn dt_zero_is_a_no_op() {
        let mut world = empty_world_with_ball(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.1, 0.2, 0.3), 0.25);
        let config = Config::default();
        let before = world.balls[0];

        step(&mut world, &config, Vec3::new(0.0, -9.8, 0.0), 0.0, 0, None);

        let after = world.balls[0];
        assert_eq!(before.p, after.p);
        assert_eq!(before.v, after.v);
    }

    #[test]
    fn flat_floor_bounce_restitution() {
        use crate::world::geometry::{IndexRange, Lump, Node, Side};
        use crate::world::path::Body;

        let mut world = empty_world_with_ball(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -5.0, 0.0), 0.25);
        world.sides.push(Side { n: Vec3::new(0.0, 1.0, 0.0), d: 0.0 });
        world.pool.sides.push(0);
        world.lumps.push(Lump {
            sides: IndexRange { start: 0, count: 1 },
            edges: IndexRange { start: 0, count: 0 },
            verts: IndexRange { start: 0, count: 0 },
            flags: 0,
        });
        world.nodes.push(Node {
            side: None,
            front: -1,
            back: -1,
            lumps: IndexRange { start: 0, count: 1 },
        });
        world.bodies.push(Body { ni: 0, pi: -1, t: 0.0 });

        let config = Config::default();
        let gravity = Vec3::new(0.0, -9.8, 0.0);

        let energy = step(&mut world, &config, gravity, 0.2, 0, None);

        // Gravity integrates over the full frame before the sweep, so the
        // ball strikes the floor faster than -5 u/s and rebounds upward
        // scaled by `restitution` (sub-elastic relative to the nominal 2.0).
        let ball = &world.balls[0];
        assert!(ball.v.y > 4.0 && ball.v.y < 5.5, "v.y = {}", ball.v.y);
        assert!((energy - 6.96).abs() < 0.3, "energy = {energy}");
    }

    #[test]
    fn collision_loop_terminates_within_iteration_cap() {
        // Two closing planes: the ball is pinched and should punt, not hang.
        use crate::world::geometry::{IndexRange, Lump, Node, Side};
        use crate::world::path::Body;

        let mut world = empty_world_with_ball(Vec3::new(0.0, 0.0, 0.0), Vec3::zero(), 0.1);

        world.sides.push(Side { n: Vec3::new(1.0, 0.0, 0.0), d: 0.5 });
        world.sides.push(Side { n: Vec3::new(-1.0, 0.0, 0.0), d: 0.5 });
        world.pool.sides.push(0);
        world.pool.sides.push(1);
        world.lumps.push(Lump {
            sides: IndexRange { start: 0, count: 1 },
            edges: IndexRange { start: 0, count: 0 },
            verts: IndexRange { start: 0, count: 0 },
            flags: 0,
        });
        world.lumps.push(Lump {
            sides: IndexRange { start: 1, count: 1 },
            edges: IndexRange { start: 0, count: 0 },
            verts: IndexRange { start: 0, count: 0 },
            flags: 0,
        });
        world.nodes.push(Node {
            side: None,
            front: -1,
            back: -1,
            lumps: IndexRange { start: 0, count: 2 },
        });

        world.bodies.push(Body { ni: 0, pi: -1, t: 0.0 });
        world.bodies.push(Body { ni: 0, pi: -1, t: 0.0 });

        let config = Config::default();
        // Should complete without hanging regardless of outcome.
        let _ = step(&mut world, &config, Vec3::new(0.0, -9.8, 0.0), 1.0, 0, None);
    }
}
