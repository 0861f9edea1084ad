use super::mat::{Mat3, Mat4};
use super::vec::{Vec2, Vec3};

/// A unit complex number, used to carry a 2D rotation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rot2 {
    /// cos(theta)
    pub re: f32,
    /// sin(theta)
    pub im: f32,
}

impl Rot2 {
    pub const IDENTITY: Self = Self { re: 1.0, im: 0.0 };

    #[inline]
    pub fn from_angle(theta: f32) -> Self {
        Self { re: theta.cos(), im: theta.sin() }
    }

    /// The rotation that takes `from` to `to` (both assumed non-zero).
    pub fn from_to(from: Vec2<f32>, to: Vec2<f32>) -> Self {
        let from = from.normalized();
        let to = to.normalized();
        Self { re: from.dot(to), im: from.cross(to) }
    }

    #[inline]
    pub fn to_mat(&self) -> Mat3 {
        Mat3::from_rows([
            [self.re, -self.im, 0.0],
            [self.im, self.re, 0.0],
            [0.0, 0.0, 1.0],
        ])
    }

    #[inline]
    pub fn inversed(&self) -> Self {
        Self { re: self.re, im: -self.im }
    }

    /// Post-multiply by `other`, i.e. apply `self` then `other`. Renormalizes to counteract
    /// floating-point drift, matching the contract in spec.md §4: `Rot2`/`Rot3` stay unit-norm.
    pub fn stack(&self, other: &Self) -> Self {
        let re = self.re * other.re - self.im * other.im;
        let im = self.re * other.im + self.im * other.re;
        let n = (re * re + im * im).sqrt();
        Self { re: re / n, im: im / n }
    }

    #[inline]
    pub fn apply(&self, v: Vec2<f32>) -> Vec2<f32> {
        Vec2::new(self.re * v.x - self.im * v.y, self.im * v.x + self.re * v.y)
    }

    #[inline]
    pub fn apply_inv(&self, v: Vec2<f32>) -> Vec2<f32> {
        self.inversed().apply(v)
    }
}

impl Default for Rot2 {
    fn default() -> Self { Self::IDENTITY }
}

/// A unit quaternion, used to carry a 3D rotation. `w` is the real part; `xyz` the imaginary part.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rot3 {
    pub xyz: Vec3<f32>,
    pub w: f32,
}

impl Rot3 {
    pub const IDENTITY: Self = Self { xyz: Vec3::new(0.0, 0.0, 0.0), w: 1.0 };

    pub fn from_axis_angle(axis: Vec3<f32>, angle: f32) -> Self {
        let axis = axis.normalized();
        let (s, c) = (angle * 0.5).sin_cos();
        Self { xyz: axis * s, w: c }
    }

    /// The rotation that takes `from` to `to` (both assumed non-zero and non-antiparallel).
    pub fn from_to(from: Vec3<f32>, to: Vec3<f32>) -> Self {
        let from = from.normalized();
        let to = to.normalized();
        let axis = from.cross(to);
        let cos_theta = from.dot(to).clamp(-1.0, 1.0);
        let half = (0.5 * (1.0 + cos_theta)).sqrt().max(1e-8);
        Self { xyz: axis * (0.5 / half), w: half }.normalized()
    }

    fn norm_sq(&self) -> f32 {
        self.xyz.norm_sq() + self.w * self.w
    }

    pub fn normalized(&self) -> Self {
        let n = self.norm_sq().sqrt();
        if n > 0.0 {
            Self { xyz: self.xyz / n, w: self.w / n }
        } else {
            *self
        }
    }

    #[inline]
    pub fn inversed(&self) -> Self {
        Self { xyz: -self.xyz, w: self.w }
    }

    /// Post-multiply, i.e. apply `self` then `other`, then renormalize.
    pub fn stack(&self, other: &Self) -> Self {
        let (a, b) = (self, other);
        let w = a.w * b.w - a.xyz.dot(b.xyz);
        let xyz = b.xyz * a.w + a.xyz * b.w + a.xyz.cross(b.xyz);
        Self { xyz, w }.normalized()
    }

    pub fn apply(&self, v: Vec3<f32>) -> Vec3<f32> {
        let t = self.xyz.cross(v) * 2.0;
        v + t * self.w + self.xyz.cross(t)
    }

    pub fn apply_inv(&self, v: Vec3<f32>) -> Vec3<f32> {
        self.inversed().apply(v)
    }

    pub fn to_mat(&self) -> Mat3 {
        let (x, y, z, w) = (self.xyz.x, self.xyz.y, self.xyz.z, self.w);
        let (x2, y2, z2) = (x + x, y + y, z + z);
        let (xx, xy, xz) = (x * x2, x * y2, x * z2);
        let (yy, yz, zz) = (y * y2, y * z2, z * z2);
        let (wx, wy, wz) = (w * x2, w * y2, w * z2);
        Mat3::from_rows([
            [1.0 - (yy + zz), xy - wz, xz + wy],
            [xy + wz, 1.0 - (xx + zz), yz - wx],
            [xz - wy, yz + wx, 1.0 - (xx + yy)],
        ])
    }

    #[inline]
    pub fn to_mat4(&self) -> Mat4 {
        self.to_mat().to_mat4()
    }
}

impl Default for Rot3 {
    fn default() -> Self { Self::IDENTITY }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rot2_round_trip() {
        let r = Rot2::from_angle(0.7);
        let v = Vec2::new(1.0, 2.0);
        let back = r.apply_inv(r.apply(v));
        assert!(back.approx_eq(v, 1e-5));
    }

    #[test]
    fn rot2_stays_unit_norm() {
        let r = Rot2::from_angle(1.234).stack(&Rot2::from_angle(-0.4));
        assert!((r.re * r.re + r.im * r.im - 1.0).abs() < 1e-5);
    }

    #[test]
    fn rot3_round_trip() {
        let r = Rot3::from_axis_angle(Vec3::new(0.0, 1.0, 0.0), 1.1);
        let v = Vec3::new(1.0, 0.3, -2.0);
        let back = r.apply_inv(r.apply(v));
        assert!(back.approx_eq(v, 1e-4));
    }

    #[test]
    fn rot3_to_mat_matches_apply() {
        let r = Rot3::from_axis_angle(Vec3::new(0.2, 0.8, 0.1), 0.9);
        let v = Vec3::new(1.0, 2.0, 3.0);
        let via_apply = r.apply(v);
        let via_mat = r.to_mat().mul_vec(v);
        assert!(via_apply.approx_eq(via_mat, 1e-4));
    }
}
