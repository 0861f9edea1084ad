use super::transform::Transform2D;
use super::vec::Vec2;

/// An axis-aligned bounding box, stored as centre + half-extent per spec.md §3.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb2 {
    pub centre: Vec2<f32>,
    pub half_extent: Vec2<f32>,
}

impl Aabb2 {
    /// The fixed screen AABB used throughout the pipeline: `[-1, +1]^2`.
    pub const SCREEN: Self = Self {
        centre: Vec2::new(0.0, 0.0),
        half_extent: Vec2::new(1.0, 1.0),
    };

    /// Construct from a min/max pair, clamping the resulting size to be non-negative.
    pub fn from_min_max(min: Vec2<f32>, max: Vec2<f32>) -> Self {
        let max = max.max(min);
        Self {
            centre: (min + max) * 0.5,
            half_extent: (max - min) * 0.5,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2<f32> { self.centre - self.half_extent }

    #[inline]
    pub fn max(&self) -> Vec2<f32> { self.centre + self.half_extent }

    #[inline]
    pub fn contains(&self, p: Vec2<f32>) -> bool {
        let min = self.min();
        let max = self.max();
        p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
    }

    pub fn contains_aabb(&self, other: &Self) -> bool {
        self.contains(other.min()) && self.contains(other.max())
    }

    /// A transform mapping the unit box `[-1, 1]^2` onto this AABB.
    pub fn unit_to_self(&self) -> Transform2D {
        Transform2D::IDENTITY.scale(self.half_extent).translate(self.centre)
    }
}

impl Default for Aabb2 {
    fn default() -> Self { Self::SCREEN }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_min_max_clamps_size() {
        let a = Aabb2::from_min_max(Vec2::new(1.0, 1.0), Vec2::new(-1.0, -1.0));
        assert_eq!(a.half_extent, Vec2::new(0.0, 0.0));
    }

    #[test]
    fn contains_point() {
        assert!(Aabb2::SCREEN.contains(Vec2::new(0.0, 0.0)));
        assert!(Aabb2::SCREEN.contains(Vec2::new(1.0, -1.0)));
        assert!(!Aabb2::SCREEN.contains(Vec2::new(1.01, 0.0)));
    }

    #[test]
    fn contains_aabb() {
        let inner = Aabb2::from_min_max(Vec2::new(-0.5, -0.5), Vec2::new(0.5, 0.5));
        assert!(Aabb2::SCREEN.contains_aabb(&inner));
        assert!(!inner.contains_aabb(&Aabb2::SCREEN));
    }

    #[test]
    fn unit_to_self_maps_corners() {
        let a = Aabb2::from_min_max(Vec2::new(0.0, 0.0), Vec2::new(4.0, 2.0));
        let t = a.unit_to_self();
        let p = t.apply_point(Vec2::new(-1.0, -1.0));
        assert!(p.approx_eq(Vec2::new(0.0, 0.0), 1e-5));
        let p = t.apply_point(Vec2::new(1.0, 1.0));
        assert!(p.approx_eq(Vec2::new(4.0, 2.0), 1e-5));
    }
}
