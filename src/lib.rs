#![cfg_attr(feature = "nightly", no_std)]
#![cfg_attr(feature = "nightly", feature(alloc))]

#[cfg(feature = "nightly")]
#[macro_use]
extern crate alloc;

pub mod buffer;
pub mod clip;
pub mod fragment_context;
pub mod framebuffer;
pub mod math;
pub mod primitives;
pub mod program;
pub mod rasterizer;
pub mod renderer;
pub mod sampler;
pub mod texture;
pub mod varying;

// Reexports of the names most draw calls need.
pub use self::buffer::{Buffer, Buffer1d, Buffer2d, Buffer3d, Buffer4d};
pub use self::fragment_context::{Bundle, BundleKind, FragToken, FragmentContext};
pub use self::framebuffer::{DepthMode, Target};
pub use self::primitives::{Primitive, Topology};
pub use self::program::{Immediate, ImmediateProgram, Program};
pub use self::renderer::{render, RendererOptions, YAxisDirection};
pub use self::varying::{Fragment, Interpolation, NoVarying, ProjectedFragment, Varying};
