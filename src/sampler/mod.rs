//! Samplers: wrap modes and sample modes layered over a [`Texture`](crate::texture::Texture), plus
//! LOD-driven mip selection. Grounded on the teacher's `src/sampler/mod.rs` (the `Sampler<N>`
//! trait and its `Clamped`/`Tiled`/`Mirrored` wrap decorators) and `nearest.rs`/`linear.rs` (the
//! two sample modes), extended with a `Mip` sampler for spec.md §4.5's LOD selection.

pub mod linear;
pub mod nearest;

pub use linear::Linear;
pub use nearest::Nearest;

use crate::texture::{MipTexture, Texture};

#[cfg(feature = "micromath")]
use micromath::F32Ext;

/// A sampler over a [`Texture`]: normalized `[0, 1)` coordinates in, a texel out. Sampler space
/// axes are consistent with the underlying texture's (spec.md §4.5).
pub trait Sampler<const N: usize> {
    type Index: Clone;
    type Sample: Clone;
    type Texture: Texture<N> + ?Sized;

    fn raw_texture(&self) -> &Self::Texture;
    fn sample(&self, index: [Self::Index; N]) -> Self::Sample;
}

impl<'a, S: Sampler<N>, const N: usize> Sampler<N> for &'a S {
    type Index = S::Index;
    type Sample = S::Sample;
    type Texture = S::Texture;

    fn raw_texture(&self) -> &Self::Texture { (*self).raw_texture() }
    fn sample(&self, index: [Self::Index; N]) -> Self::Sample { (*self).sample(index) }
}

/// A sample type with a well-known "out of range" colour, used as [`Blank`]'s default sentinel.
pub trait SentinelColor {
    fn sentinel() -> Self;
}

impl SentinelColor for [u8; 4] {
    /// Magenta: the conventional missing-texture colour.
    fn sentinel() -> Self { [255, 0, 255, 255] }
}

/// Blank wrap mode: out-of-range coordinates return a configurable sentinel colour instead of
/// being sampled at all (spec.md §4.5), defaulting to magenta for `[u8; 4]` samples.
#[derive(Copy, Clone)]
pub struct Blank<S, T> {
    pub inner: S,
    pub sentinel: T,
}

impl<S, T: SentinelColor> Blank<S, T> {
    pub fn new(inner: S) -> Self {
        Self { inner, sentinel: T::sentinel() }
    }
}

impl<S, T> Blank<S, T> {
    pub fn with_sentinel(inner: S, sentinel: T) -> Self {
        Self { inner, sentinel }
    }
}

impl<S: Sampler<N, Index = f32, Sample = T>, T: Clone, const N: usize> Sampler<N> for Blank<S, T> {
    type Index = f32;
    type Sample = T;
    type Texture = S::Texture;

    fn raw_texture(&self) -> &Self::Texture { self.inner.raw_texture() }
    fn sample(&self, index: [f32; N]) -> T {
        if index.iter().any(|&e| e < 0.0 || e > 1.0) {
            self.sentinel.clone()
        } else {
            self.inner.sample(index)
        }
    }
}

/// Clamp wrap mode: coordinates are clamped into `[0, 1]` before sampling.
#[derive(Copy, Clone)]
pub struct Clamp<S>(pub S);

impl<S: Sampler<N, Index = f32>, const N: usize> Sampler<N> for Clamp<S> {
    type Index = f32;
    type Sample = S::Sample;
    type Texture = S::Texture;

    fn raw_texture(&self) -> &Self::Texture { self.0.raw_texture() }
    fn sample(&self, index: [f32; N]) -> Self::Sample {
        self.0.sample(index.map(|e| e.max(0.0).min(1.0)))
    }
}

/// Periodic wrap mode: coordinates mirror about zero on alternate periods, so the texture edge is
/// seamless.
#[derive(Copy, Clone)]
pub struct Periodic<S>(pub S);

impl<S: Sampler<N, Index = f32>, const N: usize> Sampler<N> for Periodic<S> {
    type Index = f32;
    type Sample = S::Sample;
    type Texture = S::Texture;

    fn raw_texture(&self) -> &Self::Texture { self.0.raw_texture() }
    fn sample(&self, index: [f32; N]) -> Self::Sample {
        let index = index.map(|e| {
            if e.rem_euclid(2.0) >= 1.0 {
                1.0 - e.rem_euclid(1.0)
            } else {
                e.rem_euclid(1.0)
            }
        });
        self.0.sample(index)
    }
}

/// Repeat wrap mode: coordinates wrap modulo 1, negatives folded, with no mirroring.
#[derive(Copy, Clone)]
pub struct Repeat<S>(pub S);

impl<S: Sampler<N, Index = f32>, const N: usize> Sampler<N> for Repeat<S> {
    type Index = f32;
    type Sample = S::Sample;
    type Texture = S::Texture;

    fn raw_texture(&self) -> &Self::Texture { self.0.raw_texture() }
    fn sample(&self, index: [f32; N]) -> Self::Sample {
        self.0.sample(index.map(|e| e.rem_euclid(1.0)))
    }
}

/// A sampler of a full [`MipTexture`] chain, trilinearly blending the two levels bracketing a
/// continuous LOD (spec.md §4.5). `Inner` is the per-level sample mode (`Nearest` or `Linear`)
/// constructed fresh for each of the two levels sampled.
pub struct Mip<'t, T, Make> {
    texture: &'t MipTexture<T>,
    make_level_sampler: Make,
}

impl<'t, T, Make, S> Mip<'t, T, Make>
where
    Make: Fn(&crate::texture::MipLevel<T>) -> S,
    S: Sampler<2, Index = f32, Sample = T>,
    T: Clone + core::ops::Add<Output = T> + core::ops::Mul<f32, Output = T>,
{
    pub fn new(texture: &'t MipTexture<T>, make_level_sampler: Make) -> Self {
        Self { texture, make_level_sampler }
    }

    /// Sample at normalized coordinates `uv` using the LOD computed from screen-space
    /// derivatives, trilinearly blending the two bracketing mip levels.
    pub fn sample_at_lod(&self, uv: [f32; 2], lod: f32) -> T {
        let (lo, hi, t) = self.texture.trilinear_levels(lod);
        let sampler_lo = (self.make_level_sampler)(self.texture.level(lo));
        let sample_lo = sampler_lo.sample(uv);
        if lo == hi || t == 0.0 {
            return sample_lo;
        }
        let sampler_hi = (self.make_level_sampler)(self.texture.level(hi));
        let sample_hi = sampler_hi.sample(uv);
        sample_lo * (1.0 - t) + sample_hi * t
    }
}
