use super::Sampler;
use crate::texture::Texture;
use core::ops::{Add, Mul};

#[cfg(feature = "micromath")]
use micromath::F32Ext;

/// Bilinear sampling over a 2D texture, per spec.md §4.5's `Linear` sample mode. Grounded on the
/// teacher's `src/sampler/linear.rs`.
pub struct Linear<T>(pub T);

impl<T> Sampler<2> for Linear<T>
where
    T: Texture<2, Index = usize>,
    T::Texel: Mul<f32, Output = T::Texel> + Add<Output = T::Texel>,
{
    type Index = f32;
    type Sample = T::Texel;
    type Texture = T;

    #[inline(always)]
    fn raw_texture(&self) -> &Self::Texture { &self.0 }

    #[inline(always)]
    fn sample(&self, [x, y]: [f32; 2]) -> Self::Sample {
        let [w, h] = self.raw_texture().size();
        let index_tex_x = x.fract().rem_euclid(1.0) * w as f32;
        let index_tex_y = y.fract().rem_euclid(1.0) * h as f32;

        let posi_x = index_tex_x.trunc() as usize;
        let posi_y = index_tex_y.trunc() as usize;
        let fract_x = index_tex_x.fract();
        let fract_y = index_tex_y.fract();

        let p0x = posi_x.min(w - 1);
        let p0y = posi_y.min(h - 1);
        let p1x = (posi_x + 1).min(w - 1);
        let p1y = (posi_y + 1).min(h - 1);

        let t00 = self.raw_texture().read([p0x, p0y]);
        let t10 = self.raw_texture().read([p1x, p0y]);
        let t01 = self.raw_texture().read([p0x, p1y]);
        let t11 = self.raw_texture().read([p1x, p1y]);

        let t0 = t00 * (1.0 - fract_y) + t01 * fract_y;
        let t1 = t10 * (1.0 - fract_y) + t11 * fract_y;
        t0 * (1.0 - fract_x) + t1 * fract_x
    }
}
