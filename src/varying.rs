//! Per-vertex attribute interpolation and the fragment records that carry it through the
//! pipeline. Grounded on the teacher's `src/interpolate.rs` (`Interpolate::lerp2/lerp3`),
//! generalized from the teacher's concrete-type macro to spec.md §3's abstract contract: any
//! type satisfying `T + T -> T`, `T * f32 -> T`, `Default`, `Copy`.

use core::ops::{Add, Mul};

use crate::math::{Vec2, Vec4, WeightedSum};

/// The empty varying: primitives with no per-vertex attributes at all (spec.md §3).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct NoVarying;

impl Add for NoVarying {
    type Output = Self;
    #[inline(always)]
    fn add(self, _: Self) -> Self { self }
}

impl Mul<f32> for NoVarying {
    type Output = Self;
    #[inline(always)]
    fn mul(self, _: f32) -> Self { self }
}

/// A user attribute type interpolable by the core. The core never inspects fields of `T`; it
/// only ever composes these two operations (spec.md §3).
pub trait Varying: Copy + Default + Add<Output = Self> + Mul<f32, Output = Self> {}

impl<T> Varying for T where T: Copy + Default + Add<Output = T> + Mul<f32, Output = T> {}

impl<T: Varying> WeightedSum for T {
    #[inline(always)]
    fn weighted_sum2(a: Self, b: Self, wa: f32, wb: f32) -> Self {
        a * wa + b * wb
    }

    #[inline(always)]
    fn weighted_sum3(a: Self, b: Self, c: Self, wa: f32, wb: f32, wc: f32) -> Self {
        a * wa + b * wb + c * wc
    }
}

/// A vertex-shader output: a clip-space position plus interpolable attributes (spec.md §3).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Fragment<V> {
    pub pos: Vec4<f32>,
    pub attrs: V,
}

impl<V: Varying> Fragment<V> {
    #[inline]
    pub fn new(pos: Vec4<f32>, attrs: V) -> Self {
        Self { pos, attrs }
    }

    #[inline]
    pub fn lerp(a: &Self, b: &Self, t: f32) -> Self {
        Self {
            pos: a.pos.lerp(b.pos, t),
            attrs: V::weighted_sum2(a.attrs, b.attrs, 1.0 - t, t),
        }
    }
}

/// A fragment after the perspective divide: screen-space position, depth, inverse-w, and
/// attributes (spec.md §3). The invariant that `z_inv` is finite whenever the fragment arose
/// from a point strictly in front of the near plane is maintained by the clipper (§4.1) before a
/// `ProjectedFragment` is ever constructed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ProjectedFragment<V> {
    pub pos: Vec2<f32>,
    pub depth: f32,
    pub z_inv: f32,
    pub attrs: V,
}

impl<V: Varying> ProjectedFragment<V> {
    /// Project a clip-space [`Fragment`] by dividing through by `w`. `w` is assumed `> 0`
    /// (callers must have already frustum-culled degenerate and behind-camera points).
    pub fn project(f: &Fragment<V>) -> Self {
        let z_inv = 1.0 / f.pos.w;
        Self {
            pos: f.pos.xy() * z_inv,
            depth: f.pos.z * z_inv,
            z_inv,
            attrs: f.attrs,
        }
    }

    /// Linear interpolation in screen space — ignores `z_inv`; used for `NoPerspective`
    /// attribute interpolation and for interpolating along edges that are already in screen
    /// space (e.g. the final step of a screen-plane clip).
    pub fn lerp_linear(a: &Self, b: &Self, t: f32) -> Self {
        Self {
            pos: a.pos.lerp(b.pos, t),
            depth: f32::lerp_unchecked_raw(a.depth, b.depth, t),
            z_inv: f32::lerp_unchecked_raw(a.z_inv, b.z_inv, t),
            attrs: V::weighted_sum2(a.attrs, b.attrs, 1.0 - t, t),
        }
    }

    /// Perspective-correct interpolation of attributes using `z_inv`, with depth/position/z_inv
    /// interpolated linearly (barycentric), per spec.md §4.2's invariant 6:
    /// `(sum a_i w_i / z_i) / (sum w_i / z_i)`.
    pub fn lerp_perspective(a: &Self, b: &Self, t: f32) -> Self {
        let wa = (1.0 - t) * a.z_inv;
        let wb = t * b.z_inv;
        let norm = wa + wb;
        let attrs = if norm.is_finite() && norm != 0.0 {
            V::weighted_sum2(a.attrs, b.attrs, wa / norm, wb / norm)
        } else {
            V::weighted_sum2(a.attrs, b.attrs, 1.0 - t, t)
        };
        Self {
            pos: a.pos.lerp(b.pos, t),
            depth: f32::lerp_unchecked_raw(a.depth, b.depth, t),
            z_inv: f32::lerp_unchecked_raw(a.z_inv, b.z_inv, t),
            attrs,
        }
    }
}

/// Selects how a [`Varying`] is blended across a primitive (spec.md §4.2/§6.4).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Interpolation {
    /// `(sum a_i w_i / z_i) / (sum w_i / z_i)` — correct under projection (the default).
    Perspective,
    /// Plain barycentric/linear blend in screen space, ignoring `z_inv`.
    NoPerspective,
    /// No blend at all: every fragment gets the provoking vertex's attributes unchanged.
    Flat,
}

impl<V: Varying> ProjectedFragment<V> {
    /// Barycentric interpolation of three screen-space fragments, dispatching on `mode`. `wa`,
    /// `wb`, `wc` are assumed to already sum to 1 (the rasterizer's edge-function weights,
    /// normalized by triangle area).
    pub fn barycentric(a: &Self, b: &Self, c: &Self, wa: f32, wb: f32, wc: f32, mode: Interpolation) -> Self {
        let pos = a.pos * wa + b.pos * wb + c.pos * wc;
        let depth = a.depth * wa + b.depth * wb + c.depth * wc;
        let z_inv = a.z_inv * wa + b.z_inv * wb + c.z_inv * wc;
        let attrs = match mode {
            Interpolation::Flat => c.attrs,
            Interpolation::NoPerspective => V::weighted_sum3(a.attrs, b.attrs, c.attrs, wa, wb, wc),
            Interpolation::Perspective => {
                let za = wa * a.z_inv;
                let zb = wb * b.z_inv;
                let zc = wc * c.z_inv;
                let norm = za + zb + zc;
                if norm.is_finite() && norm != 0.0 {
                    V::weighted_sum3(a.attrs, b.attrs, c.attrs, za / norm, zb / norm, zc / norm)
                } else {
                    V::weighted_sum3(a.attrs, b.attrs, c.attrs, wa, wb, wc)
                }
            }
        };
        Self { pos, depth, z_inv, attrs }
    }

    /// Interpolation of two fragments along a line, dispatching on `mode` the same way as
    /// [`ProjectedFragment::barycentric`].
    pub fn along_line(a: &Self, b: &Self, t: f32, mode: Interpolation) -> Self {
        match mode {
            Interpolation::Flat => {
                let mut out = Self::lerp_linear(a, b, t);
                out.attrs = b.attrs;
                out
            }
            Interpolation::NoPerspective => Self::lerp_linear(a, b, t),
            Interpolation::Perspective => Self::lerp_perspective(a, b, t),
        }
    }
}

trait LerpRaw {
    fn lerp_unchecked_raw(a: Self, b: Self, t: Self) -> Self;
}

impl LerpRaw for f32 {
    #[inline(always)]
    fn lerp_unchecked_raw(a: Self, b: Self, t: Self) -> Self {
        t.mul_add(b - a, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Copy, Clone, Debug, Default, PartialEq)]
    struct Uv(Vec2<f32>);

    impl Add for Uv {
        type Output = Self;
        fn add(self, rhs: Self) -> Self { Uv(self.0 + rhs.0) }
    }
    impl Mul<f32> for Uv {
        type Output = Self;
        fn mul(self, rhs: f32) -> Self { Uv(self.0 * rhs) }
    }

    #[test]
    fn projection_divides_by_w() {
        let f = Fragment::new(Vec4::new(2.0, 4.0, 6.0, 2.0), Uv(Vec2::new(1.0, 1.0)));
        let p = ProjectedFragment::project(&f);
        assert_eq!(p.pos, Vec2::new(1.0, 2.0));
        assert_eq!(p.depth, 3.0);
        assert_eq!(p.z_inv, 0.5);
    }

    #[test]
    fn perspective_correct_matches_algebraic_formula() {
        // invariant 6 of spec.md §8, specialized to a 2-point lerp.
        let a = ProjectedFragment { pos: Vec2::new(0.0, 0.0), depth: 0.0, z_inv: 1.0, attrs: Uv(Vec2::new(0.0, 0.0)) };
        let b = ProjectedFragment { pos: Vec2::new(1.0, 0.0), depth: 0.0, z_inv: 0.25, attrs: Uv(Vec2::new(1.0, 0.0)) };
        let t = 0.5;
        let got = ProjectedFragment::lerp_perspective(&a, &b, t);
        let wa = (1.0 - t) * a.z_inv;
        let wb = t * b.z_inv;
        let expect = (wa * 0.0 + wb * 1.0) / (wa + wb);
        assert!((got.attrs.0.x - expect).abs() < 1e-6);
    }

    #[test]
    fn no_varying_is_inert() {
        let a = NoVarying;
        let b = NoVarying;
        assert_eq!(a + b, NoVarying);
        assert_eq!(a * 5.0, NoVarying);
    }
}
