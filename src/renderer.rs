//! The renderer: the driver that threads a vertex stream through clipping, rasterization, and
//! cooperative fragment execution into a pair of targets (spec.md §6). Grounded on the teacher's
//! `src/pipeline.rs` `Pipeline::render`/`render_seq`/`render_inner` — the vertex-fetch iterator,
//! the screen-size bookkeeping, and the `DepthMode`/`CoordinateMode` configuration types are kept
//! from there; the per-fragment inner loop is rewritten around `FragmentContext`'s bundle protocol
//! (spec.md §4.3) in place of the teacher's direct `Pipeline::fragment` call.

use crate::clip::{
    clip_line_frustum, clip_line_screen, clip_triangle_frustum, clip_triangle_screen, point_in_frustum,
    point_in_screen,
};
use crate::fragment_context::{Bundle, BundleKind, FragToken, FragmentContext};
use crate::framebuffer::{commit_depth, test_depth, DepthMode, ScreenToWindow, Target};
use crate::math::Vec2;
use crate::primitives::{expand, Primitive, Topology};
use crate::program::Program;
use crate::rasterizer::{rasterize_line, rasterize_triangle, FillBias, LineDrawingDirection, LineInclusion};
use crate::varying::{Fragment, Interpolation, ProjectedFragment};

/// The handedness/axis conventions a draw call's incoming clip-space vertices were produced
/// under. Mirrors the teacher's `CoordinateMode`, narrowed to the one axis convention this crate
/// actually needs to account for: whether `+y` in clip space points toward the top or bottom of
/// the window.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum YAxisDirection {
    /// `+y` points up; window rows increase downward, so the renderer flips `y`.
    Up,
    /// `+y` already points down the window; no flip needed.
    Down,
}

/// The winding a triangle's window-space vertices must have, in the order they were supplied, to
/// be considered front-facing; the other winding is culled before rasterization (spec.md §4.4/
/// §6.4). `CounterClockwise`/`Clockwise` are judged by the same signed-area sign the rasterizer
/// itself uses (`(b-a) x (c-a)` over the triangle's original vertex order, in window space).
/// `Neither` disables the cull.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WindingOrder {
    Clockwise,
    CounterClockwise,
    Neither,
}

/// Per-draw-call configuration (spec.md §6.4).
#[derive(Copy, Clone, Debug)]
pub struct RendererOptions {
    pub topology: Topology,
    pub interpolation: Interpolation,
    pub depth_mode: DepthMode,
    pub y_axis_direction: YAxisDirection,
    pub line_inclusion: LineInclusion,
    pub winding_order: WindingOrder,
    pub triangle_fill_bias: FillBias,
    pub line_drawing_direction: LineDrawingDirection,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            topology: Topology::TriangleList,
            interpolation: Interpolation::Perspective,
            depth_mode: DepthMode::LESS_WRITE,
            y_axis_direction: YAxisDirection::Up,
            line_inclusion: LineInclusion::BOTH,
            winding_order: WindingOrder::Neither,
            triangle_fill_bias: FillBias::TopLeft,
            line_drawing_direction: LineDrawingDirection::Rightwards,
        }
    }
}

fn shade_vertices<Prog: Program>(
    program: &Prog,
    uniform: &Prog::Uniform,
    vertices: &[Prog::Vertex],
) -> Vec<Fragment<Prog::Varying>> {
    vertices
        .iter()
        .map(|v| {
            let (pos, attrs) = program.on_vertex(uniform, v);
            Fragment::new(pos, attrs)
        })
        .collect()
}

/// Render a vertex stream per `options`, writing shaded pixels to `pixel` and, where
/// `options.depth_mode` uses it, depth to `depth`. This is the single entry point for both line
/// and triangle topologies (spec.md §6.2).
pub fn render<Prog, Pix, Depth>(
    program: &Prog,
    uniform: &Prog::Uniform,
    vertices: &[Prog::Vertex],
    options: &RendererOptions,
    pixel: &mut Pix,
    depth: &mut Depth,
) where
    Prog: Program,
    Pix: Target<Texel = Prog::Pixel>,
    Depth: Target<Texel = f32>,
{
    if options.depth_mode.uses_depth() {
        assert_eq!(pixel.size(), depth.size(), "pixel and depth targets must be the same size");
    }
    let to_window = ScreenToWindow {
        target_size: pixel.size(),
        flip_y: matches!(options.y_axis_direction, YAxisDirection::Up),
    };
    let shaded = shade_vertices(program, uniform, vertices);
    render_shaded(program, uniform, &shaded, options, &to_window, pixel, depth);
}

/// Render an indexed vertex buffer: `indices` are dereferenced into `vertices`, then the resulting
/// flat stream is treated identically to [`render`] (spec.md §3/§4.4 "Indexed buffers"). An
/// out-of-range index is a contract violation and panics, per spec.md §7's error table.
pub fn render_indexed<Prog, Pix, Depth>(
    program: &Prog,
    uniform: &Prog::Uniform,
    vertices: &[Prog::Vertex],
    indices: &[usize],
    options: &RendererOptions,
    pixel: &mut Pix,
    depth: &mut Depth,
) where
    Prog: Program,
    Pix: Target<Texel = Prog::Pixel>,
    Depth: Target<Texel = f32>,
{
    if options.depth_mode.uses_depth() {
        assert_eq!(pixel.size(), depth.size(), "pixel and depth targets must be the same size");
    }
    let to_window = ScreenToWindow {
        target_size: pixel.size(),
        flip_y: matches!(options.y_axis_direction, YAxisDirection::Up),
    };
    let all_shaded = shade_vertices(program, uniform, vertices);
    let shaded: Vec<Fragment<Prog::Varying>> = indices
        .iter()
        .map(|&i| {
            assert!(i < all_shaded.len(), "index {} out of range for {} vertices", i, all_shaded.len());
            all_shaded[i]
        })
        .collect();
    render_shaded(program, uniform, &shaded, options, &to_window, pixel, depth);
}

fn render_shaded<Prog, Pix, Depth>(
    program: &Prog,
    uniform: &Prog::Uniform,
    shaded: &[Fragment<Prog::Varying>],
    options: &RendererOptions,
    to_window: &ScreenToWindow,
    pixel: &mut Pix,
    depth: &mut Depth,
) where
    Prog: Program,
    Pix: Target<Texel = Prog::Pixel>,
    Depth: Target<Texel = f32>,
{
    for primitive in expand(shaded, options.topology) {
        match primitive {
            Primitive::Triangle(tri) => draw_triangle(program, uniform, tri, options, to_window, pixel, depth),
            Primitive::Line(line) => draw_line(program, uniform, line, options, to_window, pixel, depth),
            Primitive::Point(point) => draw_point(program, uniform, point, options, to_window, pixel, depth),
        }
    }
}

fn to_window_space<V: crate::varying::Varying>(
    f: ProjectedFragment<V>,
    to_window: &ScreenToWindow,
) -> ProjectedFragment<V> {
    ProjectedFragment { pos: to_window.apply(f.pos), ..f }
}

fn signed_area_2d(a: Vec2<f32>, b: Vec2<f32>, c: Vec2<f32>) -> f32 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Is this window-space triangle, in its original (unnormalized) vertex order, front-facing under
/// `winding`? `Neither` never culls.
fn is_front_facing<V>(tri: &[ProjectedFragment<V>; 3], winding: WindingOrder) -> bool {
    match winding {
        WindingOrder::Neither => true,
        WindingOrder::CounterClockwise => signed_area_2d(tri[0].pos, tri[1].pos, tri[2].pos) > 0.0,
        WindingOrder::Clockwise => signed_area_2d(tri[0].pos, tri[1].pos, tri[2].pos) < 0.0,
    }
}

fn draw_triangle<Prog, Pix, Depth>(
    program: &Prog,
    uniform: &Prog::Uniform,
    tri: [Fragment<Prog::Varying>; 3],
    options: &RendererOptions,
    to_window: &ScreenToWindow,
    pixel: &mut Pix,
    depth: &mut Depth,
) where
    Prog: Program,
    Pix: Target<Texel = Prog::Pixel>,
    Depth: Target<Texel = f32>,
{
    let mut hom_out = Vec::new();
    let mut hom_scratch = Vec::new();
    clip_triangle_frustum(tri, &mut hom_out, &mut hom_scratch);

    let target_size = pixel.size();
    for clipped in hom_out {
        let projected = clipped.map(|f| ProjectedFragment::project(&f));

        let mut scr_out = Vec::new();
        let mut scr_scratch = Vec::new();
        clip_triangle_screen(projected, &mut scr_out, &mut scr_scratch);

        for scr_tri in scr_out {
            let windowed = scr_tri.map(|f| to_window_space(f, to_window));
            if !is_front_facing(&windowed, options.winding_order) {
                continue;
            }
            rasterize_triangle(
                windowed,
                [0, 0],
                target_size,
                options.interpolation,
                options.triangle_fill_bias,
                |quad| {
                    let lanes: Vec<_> =
                        quad.into_iter().map(|lane| (lane.x, lane.y, lane.inside, lane.fragment)).collect();
                    drive_bundle(program, uniform, &lanes, &options.depth_mode, pixel, depth);
                },
            );
        }
    }
}

fn draw_line<Prog, Pix, Depth>(
    program: &Prog,
    uniform: &Prog::Uniform,
    line: [Fragment<Prog::Varying>; 2],
    options: &RendererOptions,
    to_window: &ScreenToWindow,
    pixel: &mut Pix,
    depth: &mut Depth,
) where
    Prog: Program,
    Pix: Target<Texel = Prog::Pixel>,
    Depth: Target<Texel = f32>,
{
    let [a, b] = line;
    let Some((a, b)) = clip_line_frustum(&a, &b) else { return };
    let (a, b) = (ProjectedFragment::project(&a), ProjectedFragment::project(&b));
    let Some((a, b)) = clip_line_screen(&a, &b) else { return };
    let a = to_window_space(a, to_window);
    let b = to_window_space(b, to_window);

    let target_size = pixel.size();
    rasterize_line(
        &a,
        &b,
        options.line_inclusion,
        options.interpolation,
        options.line_drawing_direction,
        |step| {
            if step.x < 0 || step.y < 0 {
                return;
            }
            let (x, y) = (step.x as usize, step.y as usize);
            if x >= target_size[0] || y >= target_size[1] {
                return;
            }
            let mut lanes = vec![(x, y, true, step.fragment)];
            if let Some(lookahead) = step.lookahead {
                lanes.push((x, y, false, lookahead));
            }
            drive_bundle(program, uniform, &lanes, &options.depth_mode, pixel, depth);
        },
    );
}

/// Draw a single point primitive: vertex-shade → frustum cull → perspective divide → scale to
/// viewport → (screen cull) → screen-to-window → run the fragment program as a singleton bundle →
/// depth test → plot (spec.md §4.4 "Draw(point)").
fn draw_point<Prog, Pix, Depth>(
    program: &Prog,
    uniform: &Prog::Uniform,
    point: [Fragment<Prog::Varying>; 1],
    options: &RendererOptions,
    to_window: &ScreenToWindow,
    pixel: &mut Pix,
    depth: &mut Depth,
) where
    Prog: Program,
    Pix: Target<Texel = Prog::Pixel>,
    Depth: Target<Texel = f32>,
{
    let [f] = point;
    if !point_in_frustum(f.pos) {
        return;
    }
    let projected = ProjectedFragment::project(&f);
    if !point_in_screen(projected.pos) {
        return;
    }
    let windowed = to_window_space(projected, to_window);

    let target_size = pixel.size();
    let x = windowed.pos.x.round();
    let y = windowed.pos.y.round();
    if x < 0.0 || y < 0.0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= target_size[0] || y >= target_size[1] {
        return;
    }
    let lanes = [(x, y, true, windowed)];
    drive_bundle(program, uniform, &lanes, &options.depth_mode, pixel, depth);
}

/// Drive a bundle's fragment programs in lock-step until every lane has a final token, then
/// commit `Keep` results from lanes marked `inside` (spec.md §4.3/§4.6). `lanes` is
/// `(x, y, inside, fragment)` per bundle position; a lane with `inside == false` is a helper
/// invocation kept alive only to feed its siblings' derivatives.
fn drive_bundle<Prog, Pix, Depth>(
    program: &Prog,
    uniform: &Prog::Uniform,
    lanes: &[(usize, usize, bool, ProjectedFragment<Prog::Varying>)],
    depth_mode: &DepthMode,
    pixel: &mut Pix,
    depth: &mut Depth,
) where
    Prog: Program,
    Pix: Target<Texel = Prog::Pixel>,
    Depth: Target<Texel = f32>,
{
    let n = lanes.len();
    let bundle_kind = match n {
        4 => BundleKind::Filled,
        2 => BundleKind::Line,
        _ => BundleKind::Point,
    };
    let mut bundle = Bundle::new(n);
    let mut states: Vec<Prog::State> = (0..n).map(|_| Default::default()).collect();
    let mut finished: Vec<Option<FragToken<Prog::Pixel>>> = (0..n).map(|_| None).collect();

    loop {
        let mut round_values: Vec<Option<crate::fragment_context::SlotValue>> = (0..n).map(|_| None).collect();
        let mut any_active = false;
        let mut synchronized_count = 0;
        let mut finished_count = 0;
        for (lane, &(_, _, inside, ref frag)) in lanes.iter().enumerate() {
            if finished[lane].is_some() {
                continue;
            }
            any_active = true;
            let mut ctx = FragmentContext::new(lane, &bundle, !inside);
            if bundle.sync_rounds() > 0 {
                ctx.mark_initialized();
            }
            match program.resume(&mut ctx, uniform, frag, &mut states[lane]) {
                FragToken::Synchronize(v) => {
                    round_values[lane] = Some(v);
                    synchronized_count += 1;
                }
                other => {
                    finished[lane] = Some(other);
                    finished_count += 1;
                }
            }
        }
        if !any_active {
            break;
        }
        assert!(
            synchronized_count == 0 || finished_count == 0,
            "program contract violation: bundle siblings disagreed on Synchronize vs. Keep/Discard \
             in the same round ({synchronized_count} synchronized, {finished_count} finished)"
        );
        if synchronized_count > 0 {
            bundle.synchronize_all(&round_values, bundle_kind);
        }
    }

    for (lane, &(x, y, inside, ref frag)) in lanes.iter().enumerate() {
        if !inside {
            continue;
        }
        if let Some(FragToken::Keep(new_pixel)) = finished[lane].take() {
            let index = [x, y];
            if test_depth(&*depth, index, frag.depth, depth_mode) {
                commit_depth(&mut *depth, index, frag.depth, depth_mode);
                let old = pixel.read(index);
                pixel.write(index, program.blend(old, new_pixel));
            }
        }
    }
}

/// Parallelize across independent draw calls, never within one (spec.md's non-goal on
/// intra-draw-call multi-threading). Grounded on the teacher's `render_par` row-partitioning
/// scheme in `pipeline.rs`, repurposed here to partition a list of draw calls instead of a
/// target's rows.
#[cfg(feature = "par")]
pub mod parallel {
    use core::sync::atomic::{AtomicUsize, Ordering};

    /// Run `draw_call(i)` for `i in 0..count`, spread across `num_cpus::get()` worker threads.
    /// Each invocation must touch disjoint targets (e.g. separate framebuffers, or disjoint
    /// tiles); this helper does no synchronization beyond handing out indices.
    pub fn for_each_draw_call<F: Fn(usize) + Sync>(count: usize, draw_call: F) {
        let next = AtomicUsize::new(0);
        let threads = num_cpus::get().min(count.max(1));
        std::thread::scope(|s| {
            for _ in 0..threads {
                s.spawn(|| loop {
                    let i = next.fetch_add(1, Ordering::Relaxed);
                    if i >= count {
                        break;
                    }
                    draw_call(i);
                });
            }
        });
    }
}
