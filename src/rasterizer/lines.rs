//! Line rasterization: a canonical-direction DDA walk along the major axis, producing one
//! fragment per pixel and, for every non-final step, a one-pixel lookahead used to seed `dFdv`
//! (spec.md §4.2/§4.3). Grounded on the teacher's `src/rasterizer/lines.rs` major-axis walk,
//! generalized from its hardcoded depth/`VsOut::lerp2` pair to `ProjectedFragment<V>` and given a
//! canonical-direction pass so that two primitives sharing an edge, specified in either order,
//! rasterize to the same pixels.

use crate::math::Vec2;
use crate::varying::{Interpolation, ProjectedFragment, Varying};

/// Which of a line segment's two endpoints the walk emits a fragment for. Strip/loop adapters use
/// this to avoid drawing a shared vertex twice.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LineInclusion {
    pub include_first: bool,
    pub include_last: bool,
}

impl LineInclusion {
    pub const BOTH: Self = Self { include_first: true, include_last: true };
    pub const EXCLUDE_LAST: Self = Self { include_first: true, include_last: false };
    pub const EXCLUDE_FIRST: Self = Self { include_first: false, include_last: true };
}

impl Default for LineInclusion {
    fn default() -> Self { Self::BOTH }
}

/// A single stepped-to pixel, carrying the fragment plus (when this isn't the last step) the
/// fragment one pixel further along, from which the shader's `dFdv` can be derived.
pub struct LineStep<V> {
    pub x: i64,
    pub y: i64,
    pub fragment: ProjectedFragment<V>,
    pub lookahead: Option<ProjectedFragment<V>>,
}

/// The line walk's canonical direction (spec.md §6.4): which way along the segment the walk is
/// considered to run, independent of the order `a`/`b` were passed in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LineDrawingDirection {
    Upwards,
    Downwards,
    Leftwards,
    Rightwards,
}

fn direction_vector(direction: LineDrawingDirection) -> Vec2<f32> {
    match direction {
        LineDrawingDirection::Rightwards => Vec2::new(1.0, 0.0),
        LineDrawingDirection::Leftwards => Vec2::new(-1.0, 0.0),
        LineDrawingDirection::Downwards => Vec2::new(0.0, 1.0),
        LineDrawingDirection::Upwards => Vec2::new(0.0, -1.0),
    }
}

/// Is `p1` at or beyond `p0` along `direction`? An exact tie along the primary axis falls back to
/// the perpendicular axis, so two points differing only there still get a deterministic order.
fn canonical_order(p0: Vec2<f32>, p1: Vec2<f32>, direction: LineDrawingDirection) -> bool {
    let dir = direction_vector(direction);
    let perp = Vec2::new(-dir.y, dir.x);
    let delta = p1 - p0;
    let primary = delta.dot(dir);
    if primary != 0.0 {
        primary >= 0.0
    } else {
        delta.dot(perp) >= 0.0
    }
}

/// Walk the pixels of the line from `a` to `b`, biased so the walk direction depends only on the
/// two endpoints' positions, not on which was passed first — `a`/`b` order still determines the
/// `Flat` provoking vertex (always `b`), per spec.md §6.4.
pub fn rasterize_line<V: Varying>(
    a: &ProjectedFragment<V>,
    b: &ProjectedFragment<V>,
    inclusion: LineInclusion,
    mode: Interpolation,
    direction: LineDrawingDirection,
    mut plot: impl FnMut(LineStep<V>),
) {
    let swap = !canonical_order(a.pos, b.pos, direction);
    let (lo, hi) = if swap { (b, a) } else { (a, b) };
    let inclusion = if swap {
        LineInclusion { include_first: inclusion.include_last, include_last: inclusion.include_first }
    } else {
        inclusion
    };

    let delta = hi.pos - lo.pos;
    let steps = delta.x.abs().max(delta.y.abs()).round().max(1.0) as i64;

    let start = if inclusion.include_first { 0 } else { 1 };
    let end = if inclusion.include_last { steps } else { steps - 1 };
    if start > end {
        return;
    }

    let to_ab_t = |t_lo_hi: f32| if swap { 1.0 - t_lo_hi } else { t_lo_hi };

    for i in start..=end {
        let t_lo_hi = i as f32 / steps as f32;
        let frag = ProjectedFragment::along_line(a, b, to_ab_t(t_lo_hi), mode);
        let lookahead = if i < steps {
            let t_next = (i + 1) as f32 / steps as f32;
            Some(ProjectedFragment::along_line(a, b, to_ab_t(t_next), mode))
        } else {
            None
        };
        plot(LineStep {
            x: frag.pos.x.round() as i64,
            y: frag.pos.y.round() as i64,
            fragment: frag,
            lookahead,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Copy, Clone, Debug, Default, PartialEq)]
    struct Scalar(f32);
    impl core::ops::Add for Scalar {
        type Output = Self;
        fn add(self, rhs: Self) -> Self { Scalar(self.0 + rhs.0) }
    }
    impl core::ops::Mul<f32> for Scalar {
        type Output = Self;
        fn mul(self, rhs: f32) -> Self { Scalar(self.0 * rhs) }
    }

    fn frag(x: f32, y: f32, attrs: f32) -> ProjectedFragment<Scalar> {
        ProjectedFragment { pos: Vec2::new(x, y), depth: 0.0, z_inv: 1.0, attrs: Scalar(attrs) }
    }

    #[test]
    fn horizontal_walk_visits_every_pixel_once() {
        let a = frag(0.0, 0.0, 0.0);
        let b = frag(4.0, 0.0, 4.0);
        let mut xs = Vec::new();
        rasterize_line(&a, &b, LineInclusion::BOTH, Interpolation::NoPerspective, LineDrawingDirection::Rightwards, |step| xs.push(step.x));
        assert_eq!(xs, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn walk_is_order_independent() {
        let a = frag(0.0, 0.0, 0.0);
        let b = frag(4.0, 3.0, 1.0);
        let mut forward = Vec::new();
        rasterize_line(&a, &b, LineInclusion::BOTH, Interpolation::NoPerspective, LineDrawingDirection::Rightwards, |step| forward.push((step.x, step.y)));
        let mut backward = Vec::new();
        rasterize_line(&b, &a, LineInclusion::BOTH, Interpolation::NoPerspective, LineDrawingDirection::Rightwards, |step| backward.push((step.x, step.y)));
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn flat_interpolation_uses_the_second_endpoint_regardless_of_walk_direction() {
        let a = frag(4.0, 0.0, 10.0);
        let b = frag(0.0, 0.0, 20.0);
        let mut seen = Vec::new();
        rasterize_line(&a, &b, LineInclusion::BOTH, Interpolation::Flat, LineDrawingDirection::Rightwards, |step| seen.push(step.fragment.attrs.0));
        assert!(seen.iter().all(|&v| v == 20.0));
    }

    #[test]
    fn exclude_last_skips_the_shared_strip_vertex() {
        let a = frag(0.0, 0.0, 0.0);
        let b = frag(2.0, 0.0, 2.0);
        let mut xs = Vec::new();
        rasterize_line(&a, &b, LineInclusion::EXCLUDE_LAST, Interpolation::NoPerspective, LineDrawingDirection::Rightwards, |step| xs.push(step.x));
        assert_eq!(xs, vec![0, 1]);
    }
}
