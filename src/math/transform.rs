use super::mat::{Mat3, Mat4};
use super::rot::{Rot2, Rot3};
use super::vec::{Vec2, Vec3, Vec4};

/// A 2D affine transform that carries its own inverse, so every primitive op appends to both
/// matrices at once instead of inverting numerically after the fact (spec.md §9 design note).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform2D {
    pub mat: Mat3,
    pub mat_inv: Mat3,
}

impl Transform2D {
    pub const IDENTITY: Self = Self { mat: Mat3::IDENTITY, mat_inv: Mat3::IDENTITY };

    #[inline]
    pub fn apply_point(&self, p: Vec2<f32>) -> Vec2<f32> {
        self.mat.mul_vec(Vec3::from((p, 1.0))).xy()
    }

    #[inline]
    pub fn apply_vector(&self, v: Vec2<f32>) -> Vec2<f32> {
        self.mat.mul_vec(Vec3::from((v, 0.0))).xy()
    }

    pub fn inversed(&self) -> Self {
        Self { mat: self.mat_inv, mat_inv: self.mat }
    }

    pub fn then(&self, other: &Self) -> Self {
        Self {
            mat: other.mat.mul_mat(&self.mat),
            mat_inv: self.mat_inv.mul_mat(&other.mat_inv),
        }
    }

    pub fn translate(&self, t: Vec2<f32>) -> Self {
        let fwd = Mat3::from_rows([[1.0, 0.0, t.x], [0.0, 1.0, t.y], [0.0, 0.0, 1.0]]);
        let inv = Mat3::from_rows([[1.0, 0.0, -t.x], [0.0, 1.0, -t.y], [0.0, 0.0, 1.0]]);
        Self { mat: fwd.mul_mat(&self.mat), mat_inv: self.mat_inv.mul_mat(&inv) }
    }

    pub fn scale(&self, s: Vec2<f32>) -> Self {
        let fwd = Mat3::from_rows([[s.x, 0.0, 0.0], [0.0, s.y, 0.0], [0.0, 0.0, 1.0]]);
        let inv = Mat3::from_rows([[1.0 / s.x, 0.0, 0.0], [0.0, 1.0 / s.y, 0.0], [0.0, 0.0, 1.0]]);
        Self { mat: fwd.mul_mat(&self.mat), mat_inv: self.mat_inv.mul_mat(&inv) }
    }

    pub fn rotate(&self, r: Rot2) -> Self {
        let fwd = r.to_mat();
        let inv = r.inversed().to_mat();
        Self { mat: fwd.mul_mat(&self.mat), mat_inv: self.mat_inv.mul_mat(&inv) }
    }

    /// Reflects about the given axis-aligned line through the origin (`axis` must be a unit
    /// vector). Self-inverse, so the same matrix is appended on both sides.
    pub fn reflect(&self, axis: Vec2<f32>) -> Self {
        let fwd = Mat3::from_rows([
            [2.0 * axis.x * axis.x - 1.0, 2.0 * axis.x * axis.y, 0.0],
            [2.0 * axis.x * axis.y, 2.0 * axis.y * axis.y - 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ]);
        Self { mat: fwd.mul_mat(&self.mat), mat_inv: self.mat_inv.mul_mat(&fwd) }
    }

    pub fn shear_x(&self, amount: f32) -> Self {
        let fwd = Mat3::from_rows([[1.0, amount, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        let inv = Mat3::from_rows([[1.0, -amount, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        Self { mat: fwd.mul_mat(&self.mat), mat_inv: self.mat_inv.mul_mat(&inv) }
    }
}

impl Default for Transform2D {
    fn default() -> Self { Self::IDENTITY }
}

/// A 3D affine transform that carries its own inverse.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform3D {
    pub mat: Mat4,
    pub mat_inv: Mat4,
}

impl Transform3D {
    pub const IDENTITY: Self = Self { mat: Mat4::IDENTITY, mat_inv: Mat4::IDENTITY };

    #[inline]
    pub fn apply_point(&self, p: Vec3<f32>) -> Vec3<f32> {
        self.mat.mul_vec(Vec4::from((p, 1.0))).xyz()
    }

    #[inline]
    pub fn apply_vector(&self, v: Vec3<f32>) -> Vec3<f32> {
        self.mat.mul_vec(Vec4::from((v, 0.0))).xyz()
    }

    pub fn inversed(&self) -> Self {
        Self { mat: self.mat_inv, mat_inv: self.mat }
    }

    pub fn then(&self, other: &Self) -> Self {
        Self {
            mat: other.mat.mul_mat(&self.mat),
            mat_inv: self.mat_inv.mul_mat(&other.mat_inv),
        }
    }

    pub fn translate(&self, t: Vec3<f32>) -> Self {
        let fwd = Mat4::translation(t);
        let inv = Mat4::translation(-t);
        Self { mat: fwd.mul_mat(&self.mat), mat_inv: self.mat_inv.mul_mat(&inv) }
    }

    pub fn scale(&self, s: Vec3<f32>) -> Self {
        let fwd = Mat4::scaling(s);
        let inv = Mat4::scaling(Vec3::new(1.0 / s.x, 1.0 / s.y, 1.0 / s.z));
        Self { mat: fwd.mul_mat(&self.mat), mat_inv: self.mat_inv.mul_mat(&inv) }
    }

    pub fn rotate(&self, r: Rot3) -> Self {
        let fwd = r.to_mat4();
        let inv = r.inversed().to_mat4();
        Self { mat: fwd.mul_mat(&self.mat), mat_inv: self.mat_inv.mul_mat(&inv) }
    }

    /// Reflects about the plane through the origin with the given unit normal. Self-inverse.
    pub fn reflect(&self, normal: Vec3<f32>) -> Self {
        let n = normal;
        let fwd = Mat3::from_rows([
            [1.0 - 2.0 * n.x * n.x, -2.0 * n.x * n.y, -2.0 * n.x * n.z],
            [-2.0 * n.x * n.y, 1.0 - 2.0 * n.y * n.y, -2.0 * n.y * n.z],
            [-2.0 * n.x * n.z, -2.0 * n.y * n.z, 1.0 - 2.0 * n.z * n.z],
        ])
        .to_mat4();
        Self { mat: fwd.mul_mat(&self.mat), mat_inv: self.mat_inv.mul_mat(&fwd) }
    }

    pub fn shear_xy(&self, amount: f32) -> Self {
        let mut fwd = Mat4::IDENTITY;
        fwd.cols[1].x = amount;
        let mut inv = Mat4::IDENTITY;
        inv.cols[1].x = -amount;
        Self { mat: fwd.mul_mat(&self.mat), mat_inv: self.mat_inv.mul_mat(&inv) }
    }
}

impl Default for Transform3D {
    fn default() -> Self { Self::IDENTITY }
}
