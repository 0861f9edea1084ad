//! The per-fragment execution context, its shared-bundle scratch storage, and the token protocol
//! that drives mid-shader synchronization (spec.md §4.3). Grounded on
//! `original_source/asciirast/program_token.h` and `asciirast/varying.h`, realized per spec.md
//! §9's design note: "a tagged-variant approach (`enum Token { Keep, Discard,
//! Synchronize(Value) }`) cleanly replaces the original coroutine-plus-typed-slot design" — the
//! coroutine itself becomes a small hand-written state machine (the teacher's own
//! `core::iter::from_fn` vertex-fetch iterator in `pipeline.rs` is the same idiom) driven one
//! round at a time by `renderer::Renderer`.

use crate::math::{Vec2, Vec3};

/// The recognized shared value kinds a bundle's scratch slot can hold. Extend this enum when a
/// sampler or user coroutine needs to share a new kind of quantity across a bundle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SlotValue {
    F32(f32),
    Vec2(Vec2<f32>),
    Vec3(Vec3<f32>),
}

impl SlotValue {
    fn type_name(&self) -> &'static str {
        match self {
            SlotValue::F32(_) => "f32",
            SlotValue::Vec2(_) => "Vec2",
            SlotValue::Vec3(_) => "Vec3",
        }
    }

    pub fn as_f32(&self) -> f32 {
        match self {
            SlotValue::F32(v) => *v,
            other => panic!("FragmentContext: expected f32 slot, found {}", other.type_name()),
        }
    }

    pub fn as_vec2(&self) -> Vec2<f32> {
        match self {
            SlotValue::Vec2(v) => *v,
            other => panic!("FragmentContext: expected Vec2 slot, found {}", other.type_name()),
        }
    }

    pub fn as_vec3(&self) -> Vec3<f32> {
        match self {
            SlotValue::Vec3(v) => *v,
            other => panic!("FragmentContext: expected Vec3 slot, found {}", other.type_name()),
        }
    }
}

/// The bundle's type tag (spec.md §3). Transitions from `Uninitialized` to the primitive's kind
/// on the first joint `Synchronize`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BundleKind {
    Uninitialized,
    Point,
    Line,
    Filled,
}

/// A token yielded by a fragment program on each round. `Synchronize` is never the final token;
/// `Keep` carries the fragment's finished output.
#[derive(Copy, Clone, Debug)]
pub enum FragToken<P> {
    Keep(P),
    Discard,
    Synchronize(SlotValue),
}

/// Shared storage for one bundle (point: 1 slot, line: 2, quad: 4, in the layout `0 1 / 2 3`).
/// Owned by the driver and reused across primitives, mirroring the teacher's reused scratch
/// buffers in `pipeline.rs`.
pub struct Bundle {
    kind: BundleKind,
    slots: [Option<SlotValue>; 4],
    len: usize,
    sync_rounds: usize,
}

impl Bundle {
    /// A fresh, uninitialized bundle of the given length. The bundle's type tag only ever
    /// becomes non-`Uninitialized` on the first joint [`Bundle::synchronize_all`], per spec.md
    /// §4.3 — it is not set up front.
    pub fn new(len: usize) -> Self {
        assert!(len >= 1 && len <= 4, "bundle length must be 1, 2, or 4");
        Self { kind: BundleKind::Uninitialized, slots: [None; 4], len, sync_rounds: 0 }
    }

    pub fn kind(&self) -> BundleKind { self.kind }
    pub fn len(&self) -> usize { self.len }
    pub fn sync_rounds(&self) -> usize { self.sync_rounds }

    fn slot(&self, id: usize) -> SlotValue {
        self.slots[id].expect("FragmentContext: read of an uninitialized bundle slot")
    }
}

impl Bundle {
    /// Write every live fragment's value into its slot and flip the bundle's type tag, once all
    /// siblings have jointly yielded `Synchronize` this round. Returns the values so each
    /// fragment's `FragmentContext` can be marked initialized.
    pub fn synchronize_all(&mut self, values: &[Option<SlotValue>], target_kind: BundleKind) {
        assert!(
            values.len() == self.len,
            "all bundle siblings must synchronize together: expected {} values, got {}",
            self.len,
            values.len()
        );
        for (id, v) in values.iter().enumerate() {
            if let Some(v) = v {
                self.slots[id] = Some(*v);
            }
        }
        self.kind = target_kind;
        self.sync_rounds += 1;
    }
}

/// The per-fragment record threaded through a coroutine fragment program (spec.md §3/§4.3).
pub struct FragmentContext<'b> {
    id: usize,
    bundle: &'b Bundle,
    helper: bool,
    initialized: bool,
}

impl<'b> FragmentContext<'b> {
    pub fn new(id: usize, bundle: &'b Bundle, helper: bool) -> Self {
        assert!(id < bundle.len(), "fragment id {} out of range for bundle of length {}", id, bundle.len());
        Self { id, bundle, helper, initialized: false }
    }

    /// This fragment's index within its bundle: 0 for a point; 0..1 for a line; 0..3 for a quad
    /// in the layout `0 1 / 2 3`.
    pub fn id(&self) -> usize { self.id }

    /// True if this invocation exists only to supply derivatives to its neighbours; its output
    /// must never be committed to the framebuffer.
    pub fn is_helper(&self) -> bool { self.helper }

    pub(crate) fn mark_initialized(&mut self) { self.initialized = true; }

    fn require_initialized(&self) {
        assert!(self.initialized, "FragmentContext: accessed before the bundle has synchronized");
    }

    fn require_kind(&self, kind: BundleKind) {
        assert_eq!(self.bundle.kind(), kind, "FragmentContext: wrong bundle type for this accessor");
    }

    /// `dFdx` for a 2x2 quad bundle: `[1]-[0]` on the top row, `[3]-[2]` on the bottom.
    pub fn d_fdx_f32(&self) -> f32 {
        self.require_initialized();
        self.require_kind(BundleKind::Filled);
        let (lo, hi) = if self.id < 2 { (0, 1) } else { (2, 3) };
        self.bundle.slot(hi).as_f32() - self.bundle.slot(lo).as_f32()
    }

    /// `dFdy` for a 2x2 quad bundle: `[2]-[0]` on the left column, `[3]-[1]` on the right.
    pub fn d_fdy_f32(&self) -> f32 {
        self.require_initialized();
        self.require_kind(BundleKind::Filled);
        let (lo, hi) = if self.id % 2 == 0 { (0, 2) } else { (1, 3) };
        self.bundle.slot(hi).as_f32() - self.bundle.slot(lo).as_f32()
    }

    pub fn d_fdx_vec2(&self) -> Vec2<f32> {
        self.require_initialized();
        self.require_kind(BundleKind::Filled);
        let (lo, hi) = if self.id < 2 { (0, 1) } else { (2, 3) };
        self.bundle.slot(hi).as_vec2() - self.bundle.slot(lo).as_vec2()
    }

    pub fn d_fdy_vec2(&self) -> Vec2<f32> {
        self.require_initialized();
        self.require_kind(BundleKind::Filled);
        let (lo, hi) = if self.id % 2 == 0 { (0, 2) } else { (1, 3) };
        self.bundle.slot(hi).as_vec2() - self.bundle.slot(lo).as_vec2()
    }

    /// `dFdv` for a line bundle: `[1]-[0]`.
    pub fn d_fdv_vec2(&self) -> Vec2<f32> {
        self.require_initialized();
        self.require_kind(BundleKind::Line);
        self.bundle.slot(1).as_vec2() - self.bundle.slot(0).as_vec2()
    }

    pub fn d_fdv_f32(&self) -> f32 {
        self.require_initialized();
        self.require_kind(BundleKind::Line);
        self.bundle.slot(1).as_f32() - self.bundle.slot(0).as_f32()
    }

    pub fn read_slot(&self, id: usize) -> SlotValue {
        self.require_initialized();
        self.bundle.slot(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uv(x: f32, y: f32) -> SlotValue { SlotValue::Vec2(Vec2::new(x, y)) }

    /// S6: a 2x2 quad with UVs written to slots, derivatives computed per spec.md §4.3.
    #[test]
    fn quad_derivatives() {
        let mut bundle = Bundle::new(4);
        let values = [Some(uv(0.0, 0.0)), Some(uv(0.25, 0.0)), Some(uv(0.0, 0.25)), Some(uv(0.3, 0.3))];
        bundle.synchronize_all(&values, BundleKind::Filled);

        let mut ctx0 = FragmentContext::new(0, &bundle, false);
        ctx0.mark_initialized();
        let mut ctx1 = FragmentContext::new(1, &bundle, false);
        ctx1.mark_initialized();
        let mut ctx2 = FragmentContext::new(2, &bundle, false);
        ctx2.mark_initialized();
        let mut ctx3 = FragmentContext::new(3, &bundle, false);
        ctx3.mark_initialized();

        assert!((ctx0.d_fdx_vec2().x - 0.25).abs() < 1e-6);
        assert!((ctx1.d_fdx_vec2().x - 0.25).abs() < 1e-6);
        assert!((ctx2.d_fdx_vec2().x - 0.3).abs() < 1e-6);
        assert!((ctx3.d_fdx_vec2().x - 0.3).abs() < 1e-6);
    }

    #[test]
    fn line_derivative() {
        let mut bundle = Bundle::new(2);
        let values = [Some(uv(0.0, 0.0)), Some(uv(1.0, 2.0))];
        bundle.synchronize_all(&values, BundleKind::Line);
        let mut ctx0 = FragmentContext::new(0, &bundle, false);
        ctx0.mark_initialized();
        assert_eq!(ctx0.d_fdv_vec2(), Vec2::new(1.0, 2.0));
    }

    #[test]
    #[should_panic]
    fn wrong_bundle_kind_is_a_contract_violation() {
        let mut bundle = Bundle::new(2);
        bundle.synchronize_all(&[Some(uv(0.0, 0.0)), Some(uv(1.0, 1.0))], BundleKind::Line);
        let mut ctx0 = FragmentContext::new(0, &bundle, false);
        ctx0.mark_initialized();
        let _ = ctx0.d_fdx_vec2();
    }

    #[test]
    #[should_panic]
    fn uninitialized_access_is_a_contract_violation() {
        let bundle = Bundle::new(2);
        let ctx0 = FragmentContext::new(0, &bundle, false);
        let _ = ctx0.d_fdv_vec2();
    }
}
