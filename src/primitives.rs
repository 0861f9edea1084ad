//! Turning a flat vertex stream into the point/line/triangle groups the rasterizer consumes
//! (spec.md §4.4). Grounded on the teacher's `src/primitives.rs` `PrimitiveKind` trait (the
//! fixed-size `collect_primitive`/`primitive_vertices` list adapters for `TriangleList` and
//! `LineList`), extended with the strip/loop/fan topologies the distillation names but the
//! teacher's retrieved draft never implemented.

/// The way consecutive vertices in a stream group into primitives.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Topology {
    PointList,
    LineList,
    LineStrip,
    LineLoop,
    TriangleList,
    TriangleStrip,
    TriangleFan,
}

/// A primitive ready for the rasterizer: either a line (2 vertices) or a triangle (3).
pub enum Primitive<V> {
    Point([V; 1]),
    Line([V; 2]),
    Triangle([V; 3]),
}

/// Expand a flat slice of vertex-shader outputs into primitives per `topology` (spec.md §4.4).
pub fn expand<V: Copy>(vertices: &[V], topology: Topology) -> impl Iterator<Item = Primitive<V>> + '_ {
    ExpandIter { vertices, topology, i: 0 }
}

struct ExpandIter<'v, V> {
    vertices: &'v [V],
    topology: Topology,
    i: usize,
}

impl<'v, V: Copy> Iterator for ExpandIter<'v, V> {
    type Item = Primitive<V>;

    fn next(&mut self) -> Option<Primitive<V>> {
        use Topology::*;
        let n = self.vertices.len();
        match self.topology {
            PointList => {
                if self.i >= n {
                    return None;
                }
                let p = Primitive::Point([self.vertices[self.i]]);
                self.i += 1;
                Some(p)
            }
            LineList => {
                if self.i + 2 > n {
                    return None;
                }
                let p = Primitive::Line([self.vertices[self.i], self.vertices[self.i + 1]]);
                self.i += 2;
                Some(p)
            }
            LineStrip => {
                if self.i + 2 > n {
                    return None;
                }
                let p = Primitive::Line([self.vertices[self.i], self.vertices[self.i + 1]]);
                self.i += 1;
                Some(p)
            }
            LineLoop => {
                if n < 2 || self.i >= n {
                    return None;
                }
                let b = if self.i + 1 < n { self.i + 1 } else { 0 };
                let p = Primitive::Line([self.vertices[self.i], self.vertices[b]]);
                self.i += 1;
                Some(p)
            }
            TriangleList => {
                if self.i + 3 > n {
                    return None;
                }
                let p = Primitive::Triangle([
                    self.vertices[self.i],
                    self.vertices[self.i + 1],
                    self.vertices[self.i + 2],
                ]);
                self.i += 3;
                Some(p)
            }
            TriangleStrip => {
                if self.i + 3 > n {
                    return None;
                }
                // Alternate winding every other triangle so all faces wind the same way.
                let tri = if self.i % 2 == 0 {
                    [self.vertices[self.i], self.vertices[self.i + 1], self.vertices[self.i + 2]]
                } else {
                    [self.vertices[self.i + 1], self.vertices[self.i], self.vertices[self.i + 2]]
                };
                self.i += 1;
                Some(Primitive::Triangle(tri))
            }
            TriangleFan => {
                if n < 3 || self.i + 2 >= n {
                    return None;
                }
                let tri = [self.vertices[0], self.vertices[self.i + 1], self.vertices[self.i + 2]];
                self.i += 1;
                Some(Primitive::Triangle(tri))
            }
        }
    }
}
