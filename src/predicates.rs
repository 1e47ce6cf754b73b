//! Region predicates (spec.md §4.G): item pickup, goal containment,
//! jump-portal containment, and switch-entry events. All read the ball's
//! current position and radius; only switch entry mutates world state.

use vek::Vec3;

use crate::config::{GOAL_HEIGHT, JUMP_HEIGHT, SWCH_HEIGHT};
use crate::timers::set_cycle_flag;
use crate::world::ball::BallIndex;
use crate::world::World;

pub use crate::world::region::{Goal, Item, Jump, Switch};

/// Reference to the item the ball first touches and its position, per
/// spec.md §6 `item_hit`.
pub struct ItemHit {
    pub index: usize,
    pub pos: Vec3<f32>,
}

/// First item whose distance to the ball's center is less than `ball.r +
/// item_r` and whose type is not NONE (spec.md §4.G, §6 `item_hit`).
pub fn item_hit(world: &World, ball_index: BallIndex, item_r: f32) -> Option<ItemHit> {
    let ball = &world.balls[ball_index as usize];

    world
        .items
        .iter()
        .enumerate()
        .find(|(_, item)| {
            !item.is_taken() && (item.p - ball.p).magnitude() < ball.r + item_r
        })
        .map(|(index, item)| ItemHit { index, pos: item.p })
}

/// First goal containing the ball, horizontally within `r - ball.r` and
/// vertically within `[p.y, p.y + GOAL_HEIGHT/2]` (spec.md §4.G, §6
/// `goal_hit`).
pub fn goal_hit(world: &World, ball_index: BallIndex) -> Option<usize> {
    let ball = &world.balls[ball_index as usize];

    world.goals.iter().position(|goal| {
        let dx = ball.p.x - goal.p.x;
        let dz = ball.p.z - goal.p.z;
        let horizontal = (dx * dx + dz * dz).sqrt();
        horizontal < goal.r - ball.r
            && ball.p.y >= goal.p.y
            && ball.p.y <= goal.p.y + GOAL_HEIGHT / 2.0
    })
}

/// Tri-state jump containment (spec.md §4.G, §6 `jump_state`):
/// `NotInside`, `Border` (inside the cylinder but not fully enclosed), or
/// `Enclosed(dest)` (ball entirely inside; caller should teleport to
/// `dest`, which preserves the ball's offset from the jump's source
/// center).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JumpState {
    NotInside,
    Border,
    Enclosed { dest: Vec3<f32> },
}

pub fn jump_state(world: &World, ball_index: BallIndex) -> JumpState {
    let ball = &world.balls[ball_index as usize];

    for jump in &world.jumps {
        let dx = ball.p.x - jump.p.x;
        let dz = ball.p.z - jump.p.z;
        let horizontal = (dx * dx + dz * dz).sqrt();

        if ball.p.y < jump.p.y || ball.p.y > jump.p.y + JUMP_HEIGHT / 2.0 {
            continue;
        }
        if horizontal - jump.r >= ball.r {
            continue;
        }

        if horizontal - jump.r < -ball.r {
            let dest = jump.q + (ball.p - jump.p);
            return JumpState::Enclosed { dest };
        }
        return JumpState::Border;
    }

    JumpState::NotInside
}

/// Walks every switch, applying entry/exit transitions for the one the ball
/// currently occupies (spec.md §4.G `switch_event`). Returns `true` iff a
/// *visible* switch toggled on this call.
///
/// A switch with no countdown that has already moved away from its default
/// is skipped (it is "used up"). The entered-flag debounces repeated calls
/// while the ball stays inside the same switch cylinder (spec.md §8: calling
/// twice while stationary inside a switch returns true at most once).
pub fn switch_event(world: &mut World, ball_index: BallIndex) -> bool {
    let ball_p = world.balls[ball_index as usize].p;
    let ball_r = world.balls[ball_index as usize].r;

    let mut toggled_visible = false;

    for i in 0..world.switches.len() {
        let switch = world.switches[i];
        if switch.is_skipped() {
            continue;
        }

        let dx = ball_p.x - switch.p.x;
        let dz = ball_p.z - switch.p.z;
        let horizontal = (dx * dx + dz * dz).sqrt();
        let in_y_range = ball_p.y >= switch.p.y && ball_p.y <= switch.p.y + SWCH_HEIGHT / 2.0;
        let fully_inside = in_y_range && horizontal - switch.r < -ball_r;

        if fully_inside {
            if !switch.entered {
                let new_flag = !switch.f;
                world.switches[i].f = new_flag;
                world.switches[i].entered = true;
                set_cycle_flag(world, switch.pi, new_flag);

                if new_flag != switch.f0 {
                    world.switches[i].t = switch.t0;
                }

                if !switch.invisible {
                    toggled_visible = true;
                }
            }
        } else {
            world.switches[i].entered = false;
        }
    }

    toggled_visible
}

/// Marks an item as picked up (caller-driven; spec.md §3 lifecycle says the
/// core only mutates item type when the caller flips it to NONE after
/// pickup).
pub fn take_item(world: &mut World, item_index: usize) {
    world.items[item_index].t = crate::config::ITEM_NONE;
}
