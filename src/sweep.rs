//! Earliest-time intersection of a moving sphere against a moving point,
//! segment, or plane (spec.md §4.C). Each sweep returns the earliest
//! contact time `t >= 0`, or [`LARGE`] when there is none, writing the
//! world-space contact point through `out`.

use vek::Vec3;

use crate::config::LARGE;
use crate::math::mad;

/// Solves `|P + t*V|^2 = r^2` for the smallest non-negative `t`.
///
/// Division by zero when `a == 0` is a documented compromise (spec.md §4.C,
/// §9): skipping that case caused missed low-velocity contacts in practice,
/// so `a == 0` is allowed to produce an infinite or NaN `t`, which callers
/// treat as [`LARGE`] ("no hit") the same as any genuinely out-of-range
/// result.
pub fn v_sol(p: Vec3<f32>, v: Vec3<f32>, r: f32) -> f32 {
    let a = v.dot(v);
    let b = 2.0 * p.dot(v);
    let c = p.dot(p) - r * r;
    let disc = b * b - 4.0 * a * c;

    if disc < 0.0 {
        return LARGE;
    }
    if disc > 0.0 {
        let sq = disc.sqrt();
        let t0 = (-b - sq) / (2.0 * a);
        let t1 = (-b + sq) / (2.0 * a);
        let t = t0.min(t1);
        return if t < 0.0 { LARGE } else { t };
    }
    // disc == 0.0: may be negative, caller filters.
    -b / (2.0 * a)
}

/// Earliest contact of a moving sphere with a moving point (spec.md §4.C
/// `v_vert`). `o` is the primitive's reference origin (a body's current
/// position), `q` the point's offset from that origin, `w` the primitive's
/// velocity.
pub fn v_vert(o: Vec3<f32>, q: Vec3<f32>, w: Vec3<f32>, p: Vec3<f32>, v: Vec3<f32>, r: f32) -> (f32, Vec3<f32>) {
    let rel_p = p - (o + q);
    let rel_v = v - w;

    // Only test if the sphere is approaching.
    if rel_p.dot(rel_v) >= 0.0 {
        return (LARGE, Vec3::zero());
    }

    let t = v_sol(rel_p, rel_v, r);
    if t >= LARGE {
        return (LARGE, Vec3::zero());
    }
    let contact = mad(o, w, t) + q;
    (t, contact)
}

/// Earliest contact of a moving sphere with a moving segment (spec.md §4.C
/// `v_edge`). `q` is the segment's start offset from `o`, `u` the segment
/// direction (endpoint minus start, not normalized).
pub fn v_edge(
    o: Vec3<f32>,
    q: Vec3<f32>,
    u: Vec3<f32>,
    w: Vec3<f32>,
    p: Vec3<f32>,
    v: Vec3<f32>,
    r: f32,
) -> (f32, Vec3<f32>) {
    let d = p - o - q;
    let e = v - w;

    let uu = u.dot(u);
    if uu <= 0.0 {
        return (LARGE, Vec3::zero());
    }

    // Remove the components parallel to u, leaving the perpendicular
    // relative position/velocity that v_sol solves against.
    let du = d.dot(u) / uu;
    let eu = e.dot(u) / uu;
    let big_p = d - u * du;
    let big_v = e - u * eu;

    let t = v_sol(big_p, big_v, r);
    if t >= LARGE {
        return (LARGE, Vec3::zero());
    }

    let s = (d.dot(u) + e.dot(u) * t) / uu;
    if !(0.0 < s && s < 1.0) {
        return (LARGE, Vec3::zero());
    }

    let contact = mad(o, w, t) + mad(q, u, s);
    (t, contact)
}

/// Earliest contact of a moving sphere with a moving plane half-space
/// (spec.md §4.C `v_side`). `n`/`d` describe the plane in the frame moving
/// with origin `o`, velocity `w`.
pub fn v_side(
    o: Vec3<f32>,
    w: Vec3<f32>,
    n: Vec3<f32>,
    d: f32,
    p: Vec3<f32>,
    v: Vec3<f32>,
    r: f32,
) -> (f32, Vec3<f32>) {
    let vn = v.dot(n);
    let wn = w.dot(n);
    let rel = vn - wn;

    if rel > 0.0 {
        return (LARGE, Vec3::zero());
    }

    let on = o.dot(n);
    let pn = p.dot(n);

    let u = (r + d + on - pn) / rel;
    let a = (d + on - pn) / rel;

    let t = if u >= 0.0 {
        u
    } else if a >= 0.0 {
        // Sphere already penetrates slightly: treat as instant contact.
        0.0
    } else {
        return (LARGE, Vec3::zero());
    };

    let contact = mad(p, v, t) - n * r;
    (t, contact)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn v_sol_no_real_roots_is_large() {
        // Sphere far away, moving away: no real intersection with |X|=r.
        let p = Vec3::new(10.0, 0.0, 0.0);
        let v = Vec3::new(1.0, 0.0, 0.0);
        assert_eq!(v_sol(p, v, 1.0), LARGE);
    }

    #[test]
    fn v_sol_approaching_returns_positive_time() {
        let p = Vec3::new(5.0, 0.0, 0.0);
        let v = Vec3::new(-1.0, 0.0, 0.0);
        let t = v_sol(p, v, 1.0);
        assert!((t - 4.0).abs() < 1e-4);
    }

    #[test]
    fn v_side_falling_onto_floor() {
        // Floor at y=0, n=(0,1,0), ball falling from y=1 at v=(0,-5,0), r=0.25.
        let n = Vec3::new(0.0, 1.0, 0.0);
        let (t, _) = v_side(
            Vec3::zero(),
            Vec3::zero(),
            n,
            0.0,
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, -5.0, 0.0),
            0.25,
        );
        // Contact when p.y - r == 0 -> p.y = 0.25 -> traveled 0.75 at 5 u/s = 0.15s
        assert!((t - 0.15).abs() < 1e-4);
    }

    #[test]
    fn v_side_receding_is_large() {
        let n = Vec3::new(0.0, 1.0, 0.0);
        let (t, _) = v_side(
            Vec3::zero(),
            Vec3::zero(),
            n,
            0.0,
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 5.0, 0.0),
            0.25,
        );
        assert_eq!(t, LARGE);
    }

    #[test]
    fn v_vert_approaching_point() {
        let (t, _) = v_vert(
            Vec3::zero(),
            Vec3::zero(),
            Vec3::zero(),
            Vec3::new(5.0, 0.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
            1.0,
        );
        assert!((t - 4.0).abs() < 1e-4);
    }

    #[test]
    fn v_edge_hits_midpoint_of_segment() {
        // Segment from (0,0,0) to (2,0,0) (u = (2,0,0)), ball approaches along z.
        let (t, contact) = v_edge(
            Vec3::zero(),
            Vec3::zero(),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::zero(),
            Vec3::new(1.0, 0.0, 5.0),
            Vec3::new(0.0, 0.0, -1.0),
            1.0,
        );
        assert!(t < LARGE);
        assert!((contact.x - 1.0).abs() < 1e-3);
    }

    #[test]
    fn v_edge_outside_segment_bounds_is_large() {
        // Ball approaches past the end of the segment (s > 1).
        let (t, _) = v_edge(
            Vec3::zero(),
            Vec3::zero(),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::zero(),
            Vec3::new(5.0, 0.0, 5.0),
            Vec3::new(0.0, 0.0, -1.0),
            1.0,
        );
        assert_eq!(t, LARGE);
    }
}
