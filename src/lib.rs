//! Real-time collision and motion core for a gravity-driven rolling-ball
//! level simulator.
//!
//! The crate owns one thing: advancing a [`World`] by a fixed `dt` and
//! answering region predicates against it. Rendering, input, asset loading,
//! and audio all live outside this crate (spec.md §1, §9 Non-goals).
//!
//! # Determinism
//!
//! [`step`] and the predicate functions never iterate a `HashMap`/`HashSet`;
//! every traversal is over a `Vec`/slice in stored order, so two runs fed
//! the same inputs in the same order produce bit-identical results
//! (spec.md §5).

pub mod bsp;
pub mod config;
pub mod error;
pub mod kinematics;
pub mod math;
pub mod pendulum;
pub mod predicates;
pub mod rotate;
pub mod step;
pub mod sweep;
pub mod timers;
pub mod world;

pub use config::Config;
pub use error::CoreError;
pub use predicates::{goal_hit, item_hit, jump_state, switch_event, take_item, ItemHit, JumpState};
pub use step::step;
pub use world::ball::{BallIndex, RestCounter};
pub use world::World;
pub use kinematics::{body_position, body_velocity};

#[cfg(test)]
mod tests {
    use vek::Vec3;

    use super::*;
    use crate::world::ball::Ball;
    use crate::world::geometry::{IndexRange, Lump, Node, Side};
    use crate::world::path::Body;
    use crate::world::region::{Goal, Item, Jump, Switch};

    /// A single flat floor, one ball hovering just above it — exercises the
    /// public API end to end the way a host application would drive it.
    fn floor_and_ball(p: Vec3<f32>, v: Vec3<f32>, r: f32) -> World {
        let mut world = World::new();
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
        world.balls.push(Ball::new(p, r));
        world.balls[0].v = v;
        world
    }

    #[test]
    fn a_freely_falling_ball_reports_no_goal_item_jump_or_switch() {
        let world = floor_and_ball(Vec3::new(0.0, 5.0, 0.0), Vec3::zero(), 0.25);
        assert_eq!(item_hit(&world, 0, 0.1).map(|h| h.index), None);
        assert_eq!(goal_hit(&world, 0), None);
        assert_eq!(predicates::jump_state(&world, 0), JumpState::NotInside);
    }

    #[test]
    fn ball_settles_onto_a_flat_floor() {
        let config = Config::default();
        let mut world = floor_and_ball(Vec3::new(0.0, 0.25, 0.0), Vec3::zero(), 0.25);
        let mut rest = RestCounter::default();
        let gravity = Vec3::new(0.0, -9.8, 0.0);

        for _ in 0..300 {
            step(&mut world, &config, gravity, 1.0 / 60.0, 0, Some(&mut rest));
        }

        assert!(world.balls[0].v.magnitude() < 1.0, "v = {:?}", world.balls[0].v);
        assert!(world.balls[0].p.y >= 0.24 && world.balls[0].p.y <= 0.26);
    }

    #[test]
    fn world_validates_before_the_crate_will_step_it() {
        let mut world = World::new();
        world.items.push(Item { p: Vec3::zero(), t: 1 });
        world.goals.push(Goal { p: Vec3::zero(), r: 1.0 });
        world.jumps.push(Jump { p: Vec3::zero(), r: 1.0, q: Vec3::zero() });
        world.switches.push(Switch {
            p: Vec3::zero(),
            r: 1.0,
            t: 0.0,
            t0: 0.0,
            f0: true,
            f: true,
            pi: -1,
            invisible: false,
            entered: false,
        });
        assert!(world.validate().is_ok());
    }
}
