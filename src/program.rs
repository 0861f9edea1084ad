//! The shader contract: a vertex stage plus a fragment stage that can either finish in one call or
//! synchronize mid-shader across its bundle (spec.md §4.3/§6.1). Grounded on the teacher's
//! `src/pipeline.rs` `Pipeline` trait (`Vertex`/`VertexData`/`Fragment`/`Pixel` associated types
//! and the `vertex`/`fragment`/`blend` split), generalized into the round-at-a-time `resume`
//! protocol that realizes spec.md's coroutine fragment programs as a hand-written state machine —
//! the same idiom as the teacher's own `core::iter::from_fn` vertex-fetch adapter in
//! `pipeline.rs`.

use crate::fragment_context::{FragToken, FragmentContext};
use crate::math::Vec4;
use crate::varying::{ProjectedFragment, Varying};

/// A fragment program: implement [`Program::resume`] for the general coroutine case (spec.md
/// §6.1's "Coroutine" variant), where `Self::State` tracks progress across rounds. Programs that
/// never need to synchronize mid-shader (the "Regular" variant) return `Keep` unconditionally from
/// round 0 — see [`Immediate`] for a ready-made adapter.
pub trait Program {
    type Uniform;
    type Vertex;
    type Varying: Varying;
    type Pixel: Clone;
    /// Per-fragment scratch carried between rounds of [`Program::resume`]. `()` for programs that
    /// never synchronize.
    type State: Default;

    /// Transform a vertex into a clip-space position plus interpolable attributes (spec.md §4.1).
    fn on_vertex(&self, uniform: &Self::Uniform, vertex: &Self::Vertex) -> (Vec4<f32>, Self::Varying);

    /// Advance this fragment's execution by one round. Called repeatedly by the renderer — once
    /// per round all bundle siblings take part in — until it returns `Keep` or `Discard`; every
    /// earlier call must return `Synchronize`.
    fn resume(
        &self,
        ctx: &mut FragmentContext,
        uniform: &Self::Uniform,
        frag: &ProjectedFragment<Self::Varying>,
        state: &mut Self::State,
    ) -> FragToken<Self::Pixel>;

    /// Blend a newly shaded pixel with whatever is already in the target (spec.md §4.6). The
    /// default overwrites unconditionally.
    #[inline]
    fn blend(&self, _old: Self::Pixel, new: Self::Pixel) -> Self::Pixel {
        new
    }
}

/// The common case: a fragment program that always finishes in a single round, never calling
/// `Synchronize`. Implement this and get [`Program`] for free via the blanket impl below.
pub trait ImmediateProgram {
    type Uniform;
    type Vertex;
    type Varying: Varying;
    type Pixel: Clone;

    fn on_vertex(&self, uniform: &Self::Uniform, vertex: &Self::Vertex) -> (Vec4<f32>, Self::Varying);

    /// Shade one fragment in a single step. Returning `None` discards it.
    fn on_fragment(&self, uniform: &Self::Uniform, frag: &ProjectedFragment<Self::Varying>) -> Option<Self::Pixel>;

    #[inline]
    fn blend(&self, _old: Self::Pixel, new: Self::Pixel) -> Self::Pixel {
        new
    }
}

/// Adapts any [`ImmediateProgram`] to the full [`Program`] interface.
pub struct Immediate<T>(pub T);

impl<T: ImmediateProgram> Program for Immediate<T> {
    type Uniform = T::Uniform;
    type Vertex = T::Vertex;
    type Varying = T::Varying;
    type Pixel = T::Pixel;
    type State = ();

    #[inline]
    fn on_vertex(&self, uniform: &Self::Uniform, vertex: &Self::Vertex) -> (Vec4<f32>, Self::Varying) {
        self.0.on_vertex(uniform, vertex)
    }

    #[inline]
    fn resume(
        &self,
        _ctx: &mut FragmentContext,
        uniform: &Self::Uniform,
        frag: &ProjectedFragment<Self::Varying>,
        _state: &mut Self::State,
    ) -> FragToken<Self::Pixel> {
        match self.0.on_fragment(uniform, frag) {
            Some(pixel) => FragToken::Keep(pixel),
            None => FragToken::Discard,
        }
    }

    #[inline]
    fn blend(&self, old: Self::Pixel, new: Self::Pixel) -> Self::Pixel {
        self.0.blend(old, new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::varying::NoVarying;

    struct DoubleVertex;
    impl ImmediateProgram for DoubleVertex {
        type Uniform = ();
        type Vertex = Vec4<f32>;
        type Varying = NoVarying;
        type Pixel = f32;

        fn on_vertex(&self, _uniform: &(), vertex: &Vec4<f32>) -> (Vec4<f32>, NoVarying) {
            (*vertex, NoVarying)
        }

        fn on_fragment(&self, _uniform: &(), frag: &ProjectedFragment<NoVarying>) -> Option<f32> {
            Some(frag.depth * 2.0)
        }
    }

    #[test]
    fn immediate_adapter_keeps_every_fragment() {
        let program = Immediate(DoubleVertex);
        let mut bundle = crate::fragment_context::Bundle::new(1);
        bundle.synchronize_all(&[None], crate::fragment_context::BundleKind::Point);
        let mut ctx = FragmentContext::new(0, &bundle, false);
        let frag = ProjectedFragment { pos: crate::math::Vec2::new(0.0, 0.0), depth: 0.5, z_inv: 1.0, attrs: NoVarying };
        let mut state = ();
        match program.resume(&mut ctx, &(), &frag, &mut state) {
            FragToken::Keep(pixel) => assert_eq!(pixel, 1.0),
            _ => panic!("expected Keep"),
        }
    }
}
