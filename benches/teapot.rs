//! Retargeted from the teacher's `benches/teapot.rs`: renders a mesh through
//! `raster_core::renderer::render` instead of `euc::Pipeline::render`. The teacher's bench loads
//! `examples/data/teapot.obj` via `wavefront`; that asset isn't part of this crate, so the mesh
//! here is a small procedural icosphere built at bench setup instead (see `DESIGN.md`). Matrix
//! setup still leans on `vek` (a dev-only convenience this crate's own `math` module doesn't
//! replicate — no `perspective_fov`/`look_at` helpers) and is converted to this crate's own
//! `Vec4`/`Vec3` at the vertex-shader boundary. The shadow pass is dropped (spec.md's non-goals
//! exclude scene-graph / multi-pass composition); this benchmarks one Lambertian-lit
//! triangle-list draw call.

use criterion::{black_box, criterion_group, criterion_main, Bencher, Criterion};
use raster_core::buffer::Buffer2d;
use raster_core::framebuffer::{DepthMode, Target};
use raster_core::math::{Vec3, Vec4};
use raster_core::primitives::Topology;
use raster_core::program::{Immediate, ImmediateProgram};
use raster_core::renderer::{render, RendererOptions};
use raster_core::varying::ProjectedFragment;
use vek::Mat4 as VekMat4;
use vek::Vec3 as VekVec3;
use vek::Vec4 as VekVec4;

#[derive(Copy, Clone)]
struct MeshVertex {
    pos: VekVec3<f32>,
    norm: VekVec3<f32>,
}

/// A small recursively-subdivided octahedron, projected onto the unit sphere. Stands in for the
/// teacher's `teapot.obj` mesh so this bench has no external asset dependency.
fn icosphere(subdivisions: usize) -> Vec<MeshVertex> {
    let axes = [
        VekVec3::new(1.0, 0.0, 0.0),
        VekVec3::new(-1.0, 0.0, 0.0),
        VekVec3::new(0.0, 1.0, 0.0),
        VekVec3::new(0.0, -1.0, 0.0),
        VekVec3::new(0.0, 0.0, 1.0),
        VekVec3::new(0.0, 0.0, -1.0),
    ];
    let octants = [
        [0, 2, 4], [2, 1, 4], [1, 3, 4], [3, 0, 4],
        [2, 0, 5], [1, 2, 5], [3, 1, 5], [0, 3, 5],
    ];
    let mut tris: Vec<[VekVec3<f32>; 3]> =
        octants.iter().map(|&[a, b, c]| [axes[a], axes[b], axes[c]]).collect();

    for _ in 0..subdivisions {
        let mut next = Vec::with_capacity(tris.len() * 4);
        for [a, b, c] in tris {
            let ab = ((a + b) * 0.5).normalized();
            let bc = ((b + c) * 0.5).normalized();
            let ca = ((c + a) * 0.5).normalized();
            next.push([a, ab, ca]);
            next.push([ab, b, bc]);
            next.push([ca, bc, c]);
            next.push([ab, bc, ca]);
        }
        tris = next;
    }

    tris.into_iter()
        .flat_map(|[a, b, c]| {
            // A unit sphere centered at the origin has its own position as surface normal.
            [MeshVertex { pos: a, norm: a }, MeshVertex { pos: b, norm: b }, MeshVertex { pos: c, norm: c }]
        })
        .collect()
}

#[derive(Copy, Clone)]
struct VertexData {
    wpos: Vec3<f32>,
    wnorm: Vec3<f32>,
}

impl core::ops::Add for VertexData {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        VertexData { wpos: self.wpos + rhs.wpos, wnorm: self.wnorm + rhs.wnorm }
    }
}

impl core::ops::Mul<f32> for VertexData {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        VertexData { wpos: self.wpos * rhs, wnorm: self.wnorm * rhs }
    }
}

impl Default for VertexData {
    fn default() -> Self {
        VertexData { wpos: Vec3::new(0.0, 0.0, 0.0), wnorm: Vec3::new(0.0, 0.0, 0.0) }
    }
}

struct Shaded {
    mvp: VekMat4<f32>,
    model: VekMat4<f32>,
    light_pos: VekVec3<f32>,
}

impl ImmediateProgram for Shaded {
    type Uniform = ();
    type Vertex = MeshVertex;
    type Varying = VertexData;
    type Pixel = u32;

    fn on_vertex(&self, _uniform: &(), vertex: &MeshVertex) -> (Vec4<f32>, VertexData) {
        let local = VekVec4::from_point(vertex.pos);
        let wpos = self.model * local;
        let clip = self.mvp * local;
        let wnorm = (self.model * VekVec4::from_direction(vertex.norm)).xyz();
        (
            Vec4::new(clip.x, clip.y, clip.z, clip.w),
            VertexData { wpos: Vec3::new(wpos.x, wpos.y, wpos.z), wnorm: Vec3::new(wnorm.x, wnorm.y, wnorm.z) },
        )
    }

    fn on_fragment(&self, _uniform: &(), frag: &ProjectedFragment<VertexData>) -> Option<u32> {
        let wnorm = frag.attrs.wnorm.normalized();
        let light_pos = Vec3::new(self.light_pos.x, self.light_pos.y, self.light_pos.z);
        let light_dir = (frag.attrs.wpos - light_pos).normalized();
        let diffuse = wnorm.dot(light_dir * -1.0).max(0.0);
        let shade = (0.1 + diffuse * 0.9).min(1.0);
        let c = (shade * 255.0) as u32;
        Some(u32::from_le_bytes([c as u8, c as u8, c as u8, 255]))
    }
}

fn mesh_benchmark(b: &mut Bencher, &[width, height]: &[usize; 2]) {
    let mut color = Buffer2d::fill([width, height], 0u32);
    let mut depth = Buffer2d::fill([width, height], 1.0f32);

    let vertices = icosphere(3);

    let light_pos = VekVec3::new(-8.0, 5.0, -5.0);
    let p = VekMat4::perspective_fov_lh_zo(1.3, width as f32, height as f32, 0.01, 100.0);
    let v = VekMat4::<f32>::identity() * VekMat4::translation_3d(VekVec3::new(0.0, 0.0, 6.0));
    let m = VekMat4::<f32>::rotation_x(core::f32::consts::PI * 0.15);
    let mvp = p * v * m;

    let options = RendererOptions { topology: Topology::TriangleList, depth_mode: DepthMode::LESS_WRITE, ..Default::default() };

    b.iter(|| {
        color.clear(0x0);
        depth.clear(1.0);

        let program = Immediate(Shaded { mvp, model: m, light_pos });
        render(&program, &(), &vertices, &options, &mut color, &mut depth);

        black_box(&mut color);
        black_box(&mut depth);
    });
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function_over_inputs(
        "mesh",
        |b, &size| mesh_benchmark(b, size),
        &[[1, 1], [32, 32], [640, 480], [1024, 800]],
    );
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10).warm_up_time(std::time::Duration::from_millis(1000));
    targets = criterion_benchmark
}

criterion_main!(benches);
