//! Rasterization algorithms: turning a clipped, projected primitive into a stream of fragment
//! candidates. Grounded on the teacher's `src/rasterizer/{mod,lines,triangles}.rs` module split;
//! the walks themselves are rewritten per spec.md §4.2 (see the redesign note in `triangles.rs`).

pub mod lines;
pub mod triangles;

pub use lines::{rasterize_line, LineDrawingDirection, LineInclusion, LineStep};
pub use triangles::{rasterize_triangle, FillBias, QuadLane};
