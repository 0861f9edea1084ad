//! Grounded on the teacher's `examples/spinning_cube.rs`: a colored cube spun in front of a
//! perspective camera and pushed to a window each frame via `mini_gl_fb::gotta_go_fast`. Ported
//! from `euc::Pipeline::draw` to `raster_core::renderer::render`; matrix math still leans on
//! `vek` for the same reason `benches/teapot.rs` does.

use raster_core::buffer::Buffer2d;
use raster_core::framebuffer::{DepthMode, Target};
use raster_core::math::Vec4;
use raster_core::primitives::Topology;
use raster_core::program::{Immediate, ImmediateProgram};
use raster_core::renderer::{render, RendererOptions};
use raster_core::varying::ProjectedFragment;
use vek::Mat4;
use vek::Rgba;
use vek::Vec4 as VekVec4;

#[derive(Copy, Clone)]
struct CubeVertex {
    index: usize,
    color: Rgba<f32>,
}

struct Cube {
    cam_mat: Mat4<f32>,
    positions: [VekVec4<f32>; 8],
}

impl ImmediateProgram for Cube {
    type Uniform = ();
    type Vertex = CubeVertex;
    type Varying = Rgba<f32>;
    type Pixel = [u8; 4];

    fn on_vertex(&self, _uniform: &(), vertex: &CubeVertex) -> (Vec4<f32>, Rgba<f32>) {
        let clip = self.cam_mat * self.positions[vertex.index];
        (Vec4::new(clip.x, clip.y, clip.z, clip.w), vertex.color)
    }

    fn on_fragment(&self, _uniform: &(), frag: &ProjectedFragment<Rgba<f32>>) -> Option<[u8; 4]> {
        Some(frag.attrs.map(|e| (e * 255.0) as u8).into_array())
    }
}

const W: usize = 640;
const H: usize = 480;

fn cube_vertices() -> Vec<CubeVertex> {
    let faces: &[[(usize, Rgba<f32>); 3]] = &[
        [(0, Rgba::green()), (2, Rgba::red()), (3, Rgba::blue())],
        [(0, Rgba::green()), (3, Rgba::blue()), (1, Rgba::red())],
        [(4, Rgba::green()), (6, Rgba::red()), (7, Rgba::blue())],
        [(4, Rgba::green()), (7, Rgba::blue()), (5, Rgba::red())],
        [(0, Rgba::red()), (4, Rgba::green()), (5, Rgba::blue())],
        [(0, Rgba::red()), (5, Rgba::blue()), (1, Rgba::green())],
        [(2, Rgba::red()), (6, Rgba::green()), (7, Rgba::blue())],
        [(2, Rgba::red()), (7, Rgba::blue()), (3, Rgba::green())],
        [(0, Rgba::red()), (4, Rgba::blue()), (6, Rgba::green())],
        [(0, Rgba::red()), (6, Rgba::green()), (2, Rgba::blue())],
        [(1, Rgba::red()), (5, Rgba::blue()), (7, Rgba::green())],
        [(1, Rgba::red()), (7, Rgba::green()), (3, Rgba::blue())],
    ];
    faces
        .iter()
        .flat_map(|face| face.iter().map(|&(index, color)| CubeVertex { index, color }))
        .collect()
}

fn main() {
    let mut color = Buffer2d::fill([W, H], [0u8; 4]);
    let mut depth = Buffer2d::fill([W, H], 1.0f32);

    let mut win = mini_gl_fb::gotta_go_fast("Spinning Cube", W as f64, H as f64);

    let positions = [
        VekVec4::new(-1.0, -1.0, -1.0, 1.0),
        VekVec4::new(-1.0, -1.0, 1.0, 1.0),
        VekVec4::new(-1.0, 1.0, -1.0, 1.0),
        VekVec4::new(-1.0, 1.0, 1.0, 1.0),
        VekVec4::new(1.0, -1.0, -1.0, 1.0),
        VekVec4::new(1.0, -1.0, 1.0, 1.0),
        VekVec4::new(1.0, 1.0, -1.0, 1.0),
        VekVec4::new(1.0, 1.0, 1.0, 1.0),
    ];
    let vertices = cube_vertices();
    let options = RendererOptions { topology: Topology::TriangleList, depth_mode: DepthMode::LESS_WRITE, ..Default::default() };

    for i in 0.. {
        let cam_mat = Mat4::perspective_rh_no(1.3, W as f32 / H as f32, 0.01, 100.0)
            * Mat4::<f32>::scaling_3d(0.4)
            * Mat4::rotation_x((i as f32 * 0.01).sin() * 3.0)
            * Mat4::rotation_y((i as f32 * 0.02).cos() * 2.0);

        color.clear([0; 4]);
        depth.clear(1.0);

        let program = Immediate(Cube { cam_mat, positions });
        render(&program, &(), &vertices, &options, &mut color, &mut depth);

        win.update_buffer(color.raw());

        if !win.is_running() {
            break;
        }
    }
}
