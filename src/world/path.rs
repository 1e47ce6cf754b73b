//! Scripted body motion: path nodes forming cycles, and the bodies that
//! walk them (spec.md §3, §4.B).

use vek::Vec3;

/// Index into `World::paths`. `-1` (`None` via `PathIndex::NONE`) means "no
/// path".
pub type PathIndex = i32;

/// A directed edge in a cyclic graph of keyframes. A body animates along its
/// outgoing path over a fixed duration with optional ease-in/ease-out.
#[derive(Debug, Clone, Copy)]
pub struct Path {
    pub p: Vec3<f32>,
    /// Duration of this segment, seconds. Always > 0.
    pub t: f32,
    /// Successor path index; following successors from any reachable path
    /// eventually cycles (spec.md §3 Path invariant).
    pub pi: PathIndex,
    /// Path-enable flag.
    pub f: bool,
    /// Smoothing flag: ease-in/ease-out vs. linear interpolation.
    pub s: bool,
}

/// Index into `World::bodies`.
pub type BodyIndex = u32;

/// A body references a BSP sub-root, optionally a path head, and tracks its
/// current path-segment elapsed time.
#[derive(Debug, Clone, Copy)]
pub struct Body {
    pub ni: crate::world::geometry::NodeIndex,
    /// Path head, or `-1` for a static body.
    pub pi: PathIndex,
    /// Elapsed time within the current path segment, `0 <= t < path.t`.
    pub t: f32,
}
