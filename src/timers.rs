//! Switch countdown timers and the cyclic path-flag propagation shared by
//! switch timers (spec.md §4.H) and switch-entry events (spec.md §4.G).

use crate::world::path::PathIndex;
use crate::world::World;

/// Visits every path in the cycle rooted at `start`, in cycle order,
/// applying `action` to each exactly once.
///
/// Uses Brent/Floyd tortoise-and-hare: slow advances one path per
/// iteration, fast advances two; they meet exactly when slow has completed
/// one full lap of the cycle. This tolerates arbitrary path cycles without
/// an explicit visited-set (spec.md §4.G, §9 Design Notes). `action` must
/// be idempotent, since in principle the same path could be re-visited if
/// the loader ever handed the core a `pi` chain with a tail before the
/// cycle proper (the documented invariant forbids this, but the traversal
/// itself does not rely on the invariant to terminate or to stay correct).
pub fn for_each_in_cycle(world: &mut World, start: PathIndex, mut action: impl FnMut(&mut crate::world::path::Path)) {
    if start < 0 {
        return;
    }
    let mut slow = start as usize;
    let mut fast = start as usize;

    loop {
        action(&mut world.paths[slow]);
        slow = world.paths[slow].pi as usize;
        fast = world.paths[world.paths[fast].pi as usize].pi as usize;
        if slow == fast {
            break;
        }
    }
}

/// Sets every path in the cycle rooted at `start` to enable flag `value`.
pub fn set_cycle_flag(world: &mut World, start: PathIndex, value: bool) {
    for_each_in_cycle(world, start, |p| p.f = value);
}

/// Resets every path in the cycle rooted at `start` to its default flag,
/// `f0`, reading `f0` from the argument (the switch owns the cycle's
/// default, not the path itself).
pub fn reset_cycle_to_default(world: &mut World, start: PathIndex, f0: bool) {
    set_cycle_flag(world, start, f0);
}

/// Advances every switch's countdown by `dt` (spec.md §4.H). When a
/// countdown crosses zero, every path in the cycle rooted at `switch.pi` is
/// reset to `switch.f0` and the switch's current flag follows.
pub fn step_switch_timers(world: &mut World, dt: f32) {
    for i in 0..world.switches.len() {
        let switch = world.switches[i];
        if switch.t <= 0.0 {
            continue;
        }

        let new_t = (switch.t - dt).max(0.0);
        world.switches[i].t = new_t;

        if new_t <= 0.0 {
            log::debug!("switch {i} countdown expired, resetting path cycle to default");
            reset_cycle_to_default(world, switch.pi, switch.f0);
            world.switches[i].f = switch.f0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::path::Path;
    use crate::world::region::Switch;
    use vek::Vec3;

    fn four_path_cycle(world: &mut World, enabled: bool) {
        for i in 0..4u32 {
            world.paths.push(Path {
                p: Vec3::zero(),
                t: 1.0,
                pi: ((i + 1) % 4) as i32,
                f: enabled,
                s: false,
            });
        }
    }

    #[test]
    fn cycle_visits_every_path_exactly_once() {
        let mut world = World::new();
        four_path_cycle(&mut world, true);
        let mut count = 0usize;
        for_each_in_cycle(&mut world, 0, |_| count += 1);
        assert_eq!(count, 4);
    }

    #[test]
    fn self_cycle_visits_once() {
        let mut world = World::new();
        world.paths.push(Path {
            p: Vec3::zero(),
            t: 1.0,
            pi: 0,
            f: true,
            s: false,
        });
        let mut count = 0;
        for_each_in_cycle(&mut world, 0, |_| count += 1);
        assert_eq!(count, 1);
    }

    #[test]
    fn switch_timer_resets_cycle_after_five_seconds() {
        let mut world = World::new();
        four_path_cycle(&mut world, true);
        world.switches.push(Switch {
            p: Vec3::zero(),
            r: 1.0,
            t: 5.0,
            t0: 5.0,
            f0: true,
            f: false,
            pi: 0,
            invisible: false,
            entered: true,
        });
        for p in &mut world.paths {
            p.f = false;
        }

        for _ in 0..500 {
            step_switch_timers(&mut world, 0.01);
        }

        assert_eq!(world.switches[0].t, 0.0);
        assert!(world.paths.iter().all(|p| p.f));
    }

    #[test]
    fn zero_countdown_switch_is_left_alone() {
        let mut world = World::new();
        four_path_cycle(&mut world, true);
        world.switches.push(Switch {
            p: Vec3::zero(),
            r: 1.0,
            t: 0.0,
            t0: 5.0,
            f0: true,
            f: true,
            pi: 0,
            invisible: false,
            entered: false,
        });
        step_switch_timers(&mut world, 0.01);
        assert_eq!(world.switches[0].t, 0.0);
    }
}
