//! Inert/logical regions the ball can interact with: pickup items, goal
//! cylinders, jump portals, and switches (spec.md §3, §4.G, §4.H).

use vek::Vec3;

use crate::config::ITEM_NONE;
use crate::world::path::PathIndex;

/// A pickup item. Inert to physics; `t == ITEM_NONE` means already taken.
#[derive(Debug, Clone, Copy)]
pub struct Item {
    pub p: Vec3<f32>,
    pub t: i32,
}

impl Item {
    pub fn is_taken(&self) -> bool {
        self.t == ITEM_NONE
    }
}

/// A goal cylinder: center, radius; height is the constant `GOAL_HEIGHT`.
#[derive(Debug, Clone, Copy)]
pub struct Goal {
    pub p: Vec3<f32>,
    pub r: f32,
}

/// A jump portal: source cylinder at `p`/`r`, destination point `q`; height
/// is the constant `JUMP_HEIGHT`.
#[derive(Debug, Clone, Copy)]
pub struct Jump {
    pub p: Vec3<f32>,
    pub r: f32,
    pub q: Vec3<f32>,
}

/// A cylindrical switch that toggles a path-enable cycle on entry, with an
/// optional countdown that reverts it.
#[derive(Debug, Clone, Copy)]
pub struct Switch {
    pub p: Vec3<f32>,
    pub r: f32,
    /// Remaining countdown, seconds. `0` means no countdown in progress.
    pub t: f32,
    /// Countdown duration to arm when the flag moves away from `f0`.
    pub t0: f32,
    /// Default path-flag value.
    pub f0: bool,
    /// Current path-flag value.
    pub f: bool,
    /// Root of the path cycle this switch toggles.
    pub pi: PathIndex,
    /// Invisible switches toggle paths but never report to the caller.
    pub invisible: bool,
    /// Debounce: set while the ball remains inside the cylinder.
    pub entered: bool,
}

impl Switch {
    /// A switch with no countdown that has already moved away from its
    /// default is "used up" and ignored by further entry events (spec.md
    /// §4.G: "skipped if it has no countdown and is already toggled away
    /// from default").
    pub fn is_skipped(&self) -> bool {
        self.t0 <= 0.0 && self.f != self.f0
    }
}
