//! BSP traversal and the lump test (spec.md §4.D): recursively finds the
//! earliest sphere-vs-geometry contact over all bodies in a world.

use vek::Vec3;

use crate::config::LARGE;
use crate::kinematics::{body_position, body_velocity};
use crate::sweep::{v_edge, v_side, v_vert};
use crate::world::geometry::Lump;
use crate::world::World;

/// Result of a sphere-vs-geometry sweep: earliest time, contact point, and
/// velocity of the impacted surface.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    pub t: f32,
    pub point: Vec3<f32>,
    pub velocity: Vec3<f32>,
}

struct SphereState {
    p: Vec3<f32>,
    v: Vec3<f32>,
    r: f32,
}

/// Tests a single lump: the earliest contact among its sides (clipped to
/// the lump's convex region), and — if `ball.r > 0` — its edges and
/// vertices (spec.md §4.D).
///
/// A `DETAIL` lump is non-solid and always reports `dt` (no contact).
/// Returns `(t, point)`, with `t == dt` meaning no contact within this
/// slice.
fn test_lump(
    world: &World,
    dt: f32,
    sphere: &SphereState,
    lump: &Lump,
    o: Vec3<f32>,
    w: Vec3<f32>,
) -> (f32, Vec3<f32>) {
    if lump.is_detail() {
        return (dt, Vec3::zero());
    }

    let mut best_t = dt;
    let mut best_point = Vec3::zero();

    // Vertices, then edges, then sides: spec.md §5 mandates this tie-break
    // order so bit-identical replays agree on which primitive wins a tie.
    if sphere.r > 0.0 {
        for &vert_ref in lump.verts.iter() {
            let vert_index = world.pool.verts[vert_ref as usize] as usize;
            let q = world.vertices[vert_index].p;
            let (t, point) = v_vert(o, q, w, sphere.p, sphere.v, sphere.r);
            if t < best_t {
                best_t = t;
                best_point = point;
            }
        }

        for &edge_ref in lump.edges.iter() {
            let edge_index = world.pool.edges[edge_ref as usize] as usize;
            let edge = &world.edges[edge_index];
            let a = world.vertices[edge.vi as usize].p;
            let b = world.vertices[edge.vj as usize].p;
            let (t, point) = v_edge(o, a, b - a, w, sphere.p, sphere.v, sphere.r);
            if t < best_t {
                best_t = t;
                best_point = point;
            }
        }
    }

    // Sides, clipped to the lump's feasible region (spec.md §4.D).
    for &side_ref in lump.sides.iter() {
        let side_index = world.pool.sides[side_ref as usize] as usize;
        let side = &world.sides[side_index];
        let (t, point) = v_side(o, w, side.n, side.d, sphere.p, sphere.v, sphere.r);
        if t >= best_t {
            continue;
        }

        let mut clipped = false;
        for &other_ref in lump.sides.iter() {
            let other_index = world.pool.sides[other_ref as usize] as usize;
            if other_index == side_index {
                continue;
            }
            let other = &world.sides[other_index];
            let lhs = point.dot(other.n) - o.dot(other.n) - w.dot(other.n) * t;
            if lhs > other.d {
                clipped = true;
                break;
            }
        }
        if clipped {
            continue;
        }

        best_t = t;
        best_point = point;
    }

    (best_t, best_point)
}

/// Whether the ball is not strictly behind the splitting plane, now or
/// after `dt`, accounting for clearance `r` (spec.md §4.D `sol_test_fore`).
fn test_fore(dt: f32, sphere: &SphereState, n: Vec3<f32>, d: f32, o: Vec3<f32>, w: Vec3<f32>) -> bool {
    let q = sphere.p - o;
    let now = q.dot(n) - d + sphere.r;
    let future = (q + sphere.v * dt).dot(n) - (d + w.dot(n) * dt) + sphere.r;
    now >= 0.0 || future >= 0.0
}

/// Mirror of [`test_fore`] on the back side (spec.md §4.D `sol_test_back`).
fn test_back(dt: f32, sphere: &SphereState, n: Vec3<f32>, d: f32, o: Vec3<f32>, w: Vec3<f32>) -> bool {
    let q = sphere.p - o;
    let now = q.dot(n) - d - sphere.r;
    let future = (q + sphere.v * dt).dot(n) - (d + w.dot(n) * dt) - sphere.r;
    now <= 0.0 || future <= 0.0
}

/// Recursively tests a BSP node: its owned lumps, then the front/back
/// children that the ball's straddling makes reachable (spec.md §4.D
/// `sol_test_node`). Both children may be visited.
fn test_node(
    world: &World,
    node_index: i32,
    dt: f32,
    sphere: &SphereState,
    o: Vec3<f32>,
    w: Vec3<f32>,
) -> (f32, Vec3<f32>) {
    if node_index < 0 {
        return (dt, Vec3::zero());
    }
    let node = &world.nodes[node_index as usize];

    let mut best_t = dt;
    let mut best_point = Vec3::zero();

    for lump_ref in node.lumps.iter() {
        let lump = &world.lumps[lump_ref as usize];
        let (t, point) = test_lump(world, best_t, sphere, lump, o, w);
        if t < best_t {
            best_t = t;
            best_point = point;
        }
    }

    if let Some(side_index) = node.side {
        let side = &world.sides[side_index as usize];

        if test_fore(best_t, sphere, side.n, side.d, o, w) {
            let (t, point) = test_node(world, node.front, best_t, sphere, o, w);
            if t < best_t {
                best_t = t;
                best_point = point;
            }
        }
        if test_back(best_t, sphere, side.n, side.d, o, w) {
            let (t, point) = test_node(world, node.back, best_t, sphere, o, w);
            if t < best_t {
                best_t = t;
                best_point = point;
            }
        }
    }

    (best_t, best_point)
}

/// Tests one body: computes its current position/velocity from its path
/// (spec.md §4.B) and recurses into its BSP sub-root with those as the
/// moving frame (spec.md §4.D `sol_test_body`).
fn test_body(world: &World, body_index: usize, dt: f32, ball_p: Vec3<f32>, ball_v: Vec3<f32>, ball_r: f32) -> Option<Contact> {
    let body = world.bodies[body_index];
    let o = body_position(world, &body);
    let w = body_velocity(world, &body);
    let sphere = SphereState { p: ball_p, v: ball_v, r: ball_r };

    let (t, point) = test_node(world, body.ni, dt, &sphere, o, w);
    if t >= dt {
        None
    } else {
        Some(Contact { t, point, velocity: w })
    }
}

/// Minimum-time contact over every body in the world (spec.md §4.D
/// `sol_test_file`). Returns `None` if nothing is hit within `dt`.
///
/// Bodies are tested in stored order (lowest index first) so ties between
/// simultaneous contacts resolve deterministically (spec.md §5).
pub fn test_world(world: &World, dt: f32, ball_p: Vec3<f32>, ball_v: Vec3<f32>, ball_r: f32) -> Option<Contact> {
    let mut best: Option<Contact> = None;
    let mut remaining = dt;

    for body_index in 0..world.bodies.len() {
        if let Some(contact) = test_body(world, body_index, remaining, ball_p, ball_v, ball_r) {
            remaining = contact.t;
            best = Some(contact);
        }
    }

    best
}
