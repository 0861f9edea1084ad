//! Clipping against the six homogeneous frustum planes and the 2D screen AABB, per spec.md
//! §4.1. Grounded on `original_source/asciirast/rasterize/{frustum_test,clip_line,bounds_test}.h`
//! for the algorithms, expressed in the teacher's idiom (plain free functions over small `Vec`
//! scratch buffers owned by the caller, matching `pipeline.rs`'s reused double-buffered queues).

use crate::math::{Aabb2, Vec2, Vec4};
use crate::varying::{Fragment, ProjectedFragment, Varying};

/// A homogeneous clip plane expressed as `dot(coeffs, p) >= 0` for "inside".
#[derive(Copy, Clone)]
struct HomPlane {
    coeffs: Vec4<f32>,
}

impl HomPlane {
    #[inline]
    fn dist(&self, p: Vec4<f32>) -> f32 {
        self.coeffs.dot(p)
    }
}

/// The six frustum planes, in the reverse-Z convention spec.md §9 fixes: near at `z = 0`, far at
/// `z = w`, both inclusive.
const FRUSTUM_PLANES: [HomPlane; 6] = [
    HomPlane { coeffs: Vec4::new(1.0, 0.0, 0.0, 1.0) },  // x >= -w
    HomPlane { coeffs: Vec4::new(-1.0, 0.0, 0.0, 1.0) }, // x <= w
    HomPlane { coeffs: Vec4::new(0.0, 1.0, 0.0, 1.0) },  // y >= -w
    HomPlane { coeffs: Vec4::new(0.0, -1.0, 0.0, 1.0) }, // y <= w
    HomPlane { coeffs: Vec4::new(0.0, 0.0, 1.0, 0.0) },  // z >= 0
    HomPlane { coeffs: Vec4::new(0.0, 0.0, -1.0, 1.0) }, // z <= w
];

/// Is `p` strictly admissible per spec.md §4.1's homogeneous inside test? The exact zero vector
/// and non-positive `w` are treated as degenerate and rejected.
pub fn point_in_frustum(p: Vec4<f32>) -> bool {
    if p.w <= 0.0 || (p.x == 0.0 && p.y == 0.0 && p.z == 0.0 && p.w == 0.0) {
        return false;
    }
    FRUSTUM_PLANES.iter().all(|pl| pl.dist(p) >= 0.0)
}

/// Is `p` inside the fixed `[-1, +1]^2` screen AABB?
pub fn point_in_screen(p: Vec2<f32>) -> bool {
    Aabb2::SCREEN.contains(p)
}

/// Liang-Barsky parametric clip of a single plane test against the running `[t0, t1]` range.
/// Returns `false` (segment fully rejected) when the range becomes empty.
fn liang_barsky_step(d0: f32, d1: f32, t0: &mut f32, t1: &mut f32) -> bool {
    let q = d0;
    let p = d0 - d1;
    if p.abs() <= f32::EPSILON {
        // Parallel to the plane: keep iff the tail is on the inside.
        q >= 0.0
    } else {
        let t = q / p;
        if p < 0.0 {
            // Entering the half-space at t.
            *t0 = t0.max(t);
            *t1 >= t
        } else {
            // Exiting the half-space at t.
            *t1 = t1.min(t);
            *t0 <= t
        }
    }
}

/// Parametrically clip the segment `a + t*(b-a)`, `t in [0,1]`, against the frustum. Returns the
/// surviving `(t0, t1)` range, or `None` if nothing survives.
pub fn clip_line_frustum_params(a: Vec4<f32>, b: Vec4<f32>) -> Option<(f32, f32)> {
    if a.w < 0.0 && b.w < 0.0 {
        return None;
    }
    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;
    for plane in &FRUSTUM_PLANES {
        let d0 = plane.dist(a);
        let d1 = plane.dist(b);
        if !liang_barsky_step(d0, d1, &mut t0, &mut t1) {
            return None;
        }
    }
    Some((t0, t1))
}

/// Clip a line segment (as [`Fragment`]s) against the frustum, trimming to the surviving
/// parametric range. Attributes are interpolated linearly in `t` (perspective-correct
/// interpolation is deferred until after the divide, per spec.md §4.1).
pub fn clip_line_frustum<V: Varying>(a: &Fragment<V>, b: &Fragment<V>) -> Option<(Fragment<V>, Fragment<V>)> {
    let (t0, t1) = clip_line_frustum_params(a.pos, b.pos)?;
    let new_a = if t0 <= 0.0 { *a } else { Fragment::lerp(a, b, t0) };
    let new_b = if t1 >= 1.0 { *b } else { Fragment::lerp(a, b, t1) };
    Some((new_a, new_b))
}

/// A 2D screen-space clip plane, `dot(coeffs, (x,y,1)) >= 0` for "inside".
#[derive(Copy, Clone)]
struct ScreenPlane {
    a: f32,
    b: f32,
    c: f32,
}

impl ScreenPlane {
    #[inline]
    fn dist(&self, p: Vec2<f32>) -> f32 {
        self.a * p.x + self.b * p.y + self.c
    }
}

const SCREEN_PLANES: [ScreenPlane; 4] = [
    ScreenPlane { a: 1.0, b: 0.0, c: 1.0 },  // x >= -1
    ScreenPlane { a: -1.0, b: 0.0, c: 1.0 }, // x <= 1
    ScreenPlane { a: 0.0, b: 1.0, c: 1.0 },  // y >= -1
    ScreenPlane { a: 0.0, b: -1.0, c: 1.0 }, // y <= 1
];

fn clip_line_screen_params(a: Vec2<f32>, b: Vec2<f32>) -> Option<(f32, f32)> {
    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;
    for plane in &SCREEN_PLANES {
        let d0 = plane.dist(a);
        let d1 = plane.dist(b);
        if !liang_barsky_step(d0, d1, &mut t0, &mut t1) {
            return None;
        }
    }
    Some((t0, t1))
}

/// Clip a line against the screen AABB. Endpoints arriving here already have finite `z_inv`, so
/// the new endpoints are interpolated perspective-correctly.
pub fn clip_line_screen<V: Varying>(
    a: &ProjectedFragment<V>,
    b: &ProjectedFragment<V>,
) -> Option<(ProjectedFragment<V>, ProjectedFragment<V>)> {
    let (t0, t1) = clip_line_screen_params(a.pos, b.pos)?;
    let new_a = if t0 <= 0.0 { *a } else { ProjectedFragment::lerp_perspective(a, b, t0) };
    let new_b = if t1 >= 1.0 { *b } else { ProjectedFragment::lerp_perspective(a, b, t1) };
    Some((new_a, new_b))
}

/// Rotate a 3-array so that `idx` becomes position 0, preserving cyclic (winding) order.
#[inline]
fn rotate_to_front<T: Copy>(tri: [T; 3], idx: usize) -> [T; 3] {
    [tri[idx], tri[(idx + 1) % 3], tri[(idx + 2) % 3]]
}

/// Clip a single triangle against one homogeneous plane, appending 0, 1, or 2 resulting
/// triangles to `out`. Implements spec.md §4.1 steps 1-5.
fn clip_triangle_plane_hom<V: Varying>(tri: [Fragment<V>; 3], plane: &HomPlane, out: &mut Vec<[Fragment<V>; 3]>) {
    let d = tri.map(|v| plane.dist(v.pos));
    let inside: [bool; 3] = [d[0] >= 0.0, d[1] >= 0.0, d[2] >= 0.0];
    let count = inside.iter().filter(|&&b| b).count();

    match count {
        0 => {}
        3 => out.push(tri),
        1 => {
            let idx = inside.iter().position(|&b| b).unwrap();
            let [v0, v1, v2] = rotate_to_front(tri, idx);
            let d0 = plane.dist(v0.pos);
            let d1 = plane.dist(v1.pos);
            let d2 = plane.dist(v2.pos);
            let t01 = d0 / (d0 - d1);
            let t02 = d0 / (d0 - d2);
            out.push([v0, Fragment::lerp(&v0, &v1, t01), Fragment::lerp(&v0, &v2, t02)]);
        }
        2 => {
            let idx = inside.iter().position(|&b| !b).unwrap();
            // Rotate so the outside vertex lands at index 2, preserving cyclic (winding) order.
            let [v0, v1, v2] = rotate_to_front(tri, (idx + 1) % 3);
            let d0 = plane.dist(v0.pos);
            let d1 = plane.dist(v1.pos);
            let d2 = plane.dist(v2.pos);
            let t02 = d0 / (d0 - d2);
            let t12 = d1 / (d1 - d2);
            let new_v2 = Fragment::lerp(&v0, &v2, t02);
            out.push([v1, Fragment::lerp(&v1, &v2, t12), new_v2]);
            out.push([v0, v1, new_v2]);
        }
        _ => unreachable!(),
    }
}

/// Clip a triangle against the frustum, emitting the surviving sub-triangle(s) into `out`.
/// `scratch` is caller-owned double-buffer storage reused across draw calls (spec.md §9).
pub fn clip_triangle_frustum<V: Varying>(
    tri: [Fragment<V>; 3],
    out: &mut Vec<[Fragment<V>; 3]>,
    scratch: &mut Vec<[Fragment<V>; 3]>,
) {
    scratch.clear();
    scratch.push(tri);
    out.clear();
    for plane in &FRUSTUM_PLANES {
        out.clear();
        for t in scratch.drain(..) {
            clip_triangle_plane_hom(t, plane, out);
        }
        core::mem::swap(scratch, out);
    }
    core::mem::swap(scratch, out);
}

fn clip_triangle_plane_screen<V: Varying>(
    tri: [ProjectedFragment<V>; 3],
    plane: &ScreenPlane,
    out: &mut Vec<[ProjectedFragment<V>; 3]>,
) {
    let d = tri.map(|v| plane.dist(v.pos));
    let inside: [bool; 3] = [d[0] >= 0.0, d[1] >= 0.0, d[2] >= 0.0];
    let count = inside.iter().filter(|&&b| b).count();

    match count {
        0 => {}
        3 => out.push(tri),
        1 => {
            let idx = inside.iter().position(|&b| b).unwrap();
            let [v0, v1, v2] = rotate_to_front(tri, idx);
            let d0 = plane.dist(v0.pos);
            let d1 = plane.dist(v1.pos);
            let d2 = plane.dist(v2.pos);
            let t01 = d0 / (d0 - d1);
            let t02 = d0 / (d0 - d2);
            out.push([
                v0,
                ProjectedFragment::lerp_perspective(&v0, &v1, t01),
                ProjectedFragment::lerp_perspective(&v0, &v2, t02),
            ]);
        }
        2 => {
            let idx = inside.iter().position(|&b| !b).unwrap();
            // Rotate so the outside vertex lands at index 2, preserving cyclic (winding) order.
            let [v0, v1, v2] = rotate_to_front(tri, (idx + 1) % 3);
            let d0 = plane.dist(v0.pos);
            let d1 = plane.dist(v1.pos);
            let d2 = plane.dist(v2.pos);
            let t02 = d0 / (d0 - d2);
            let t12 = d1 / (d1 - d2);
            let new_v2 = ProjectedFragment::lerp_perspective(&v0, &v2, t02);
            out.push([v1, ProjectedFragment::lerp_perspective(&v1, &v2, t12), new_v2]);
            out.push([v0, v1, new_v2]);
        }
        _ => unreachable!(),
    }
}

/// Clip a post-divide triangle against the screen AABB, perspective-correctly.
pub fn clip_triangle_screen<V: Varying>(
    tri: [ProjectedFragment<V>; 3],
    out: &mut Vec<[ProjectedFragment<V>; 3]>,
    scratch: &mut Vec<[ProjectedFragment<V>; 3]>,
) {
    scratch.clear();
    scratch.push(tri);
    out.clear();
    for plane in &SCREEN_PLANES {
        out.clear();
        for t in scratch.drain(..) {
            clip_triangle_plane_screen(t, plane, out);
        }
        core::mem::swap(scratch, out);
    }
    core::mem::swap(scratch, out);
}
