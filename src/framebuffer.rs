//! Render targets and the depth test / window transform that sit between the rasterizer and a
//! target buffer (spec.md §4.6). Grounded on the teacher's newer-draft `src/buffer.rs` `Target`
//! trait (`read`/`write`/`clear`), simplified to ordinary `&mut self` access since a single draw
//! call never writes to a target from more than one thread (see `renderer.rs`).

use crate::math::Vec2;

/// A 2D surface fragments are written to: a color target, a depth target, or any other per-pixel
/// buffer a [`Program`](crate::program::Program) wants to read/write.
pub trait Target {
    type Texel: Clone;

    fn size(&self) -> [usize; 2];
    fn read(&self, index: [usize; 2]) -> Self::Texel;
    fn write(&mut self, index: [usize; 2], texel: Self::Texel);

    /// # Safety
    /// `index` must be within `self.size()`.
    unsafe fn write_unchecked(&mut self, index: [usize; 2], texel: Self::Texel) {
        self.write(index, texel);
    }

    fn clear(&mut self, texel: Self::Texel);
}

/// Which comparison (if any) a depth test performs, and whether a pass writes the new depth back,
/// per spec.md §4.6. Reverse-Z throughout this crate: smaller depth is closer to the camera.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DepthMode {
    pub test: Option<core::cmp::Ordering>,
    pub write: bool,
}

impl DepthMode {
    pub const NONE: Self = Self { test: None, write: false };
    pub const LESS_WRITE: Self = Self { test: Some(core::cmp::Ordering::Less), write: true };
    pub const LESS_PASS: Self = Self { test: Some(core::cmp::Ordering::Less), write: false };

    pub fn uses_depth(&self) -> bool {
        self.test.is_some() || self.write
    }
}

impl Default for DepthMode {
    fn default() -> Self { Self::LESS_WRITE }
}

/// Test a candidate depth against the current value in a depth target at `index`, per `mode`.
/// Returns whether the fragment passes. Does not write; call [`commit_depth`] after a pass when
/// `mode.write` is set.
pub fn test_depth<D: Target<Texel = f32>>(depth: &D, index: [usize; 2], z: f32, mode: &DepthMode) -> bool {
    match mode.test {
        Some(ordering) => z.partial_cmp(&depth.read(index)) == Some(ordering),
        None => true,
    }
}

pub fn commit_depth<D: Target<Texel = f32>>(depth: &mut D, index: [usize; 2], z: f32, mode: &DepthMode) {
    if mode.write {
        depth.write(index, z);
    }
}

/// Map a point in the fixed screen AABB `[-1, 1]^2` to window (pixel-center) coordinates for a
/// target of the given size: `x_window = (x_screen + 1) / 2 * width`, with `y` optionally flipped
/// (spec.md §4.6's screen-to-window transform).
#[derive(Copy, Clone, Debug)]
pub struct ScreenToWindow {
    pub target_size: [usize; 2],
    pub flip_y: bool,
}

impl ScreenToWindow {
    pub fn apply(&self, p: Vec2<f32>) -> Vec2<f32> {
        let w = self.target_size[0] as f32;
        let h = self.target_size[1] as f32;
        let y = if self.flip_y { -p.y } else { p.y };
        Vec2::new((p.x + 1.0) * 0.5 * w, (y + 1.0) * 0.5 * h)
    }
}
