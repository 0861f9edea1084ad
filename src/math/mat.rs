use super::vec::{Vec3, Vec4};

/// A 3x3, column-major matrix of `f32`.
///
/// Stored as an array of columns so that `cols[c][r]` is the element at row `r`, column `c`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Mat3 {
    pub cols: [Vec3<f32>; 3],
}

/// A 4x4, column-major matrix of `f32`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Mat4 {
    pub cols: [Vec4<f32>; 4],
}

impl Mat3 {
    pub const IDENTITY: Self = Self {
        cols: [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        ],
    };

    #[inline]
    pub fn from_cols(c0: Vec3<f32>, c1: Vec3<f32>, c2: Vec3<f32>) -> Self {
        Self { cols: [c0, c1, c2] }
    }

    #[inline]
    pub fn from_rows(rows: [[f32; 3]; 3]) -> Self {
        Self {
            cols: [
                Vec3::new(rows[0][0], rows[1][0], rows[2][0]),
                Vec3::new(rows[0][1], rows[1][1], rows[2][1]),
                Vec3::new(rows[0][2], rows[1][2], rows[2][2]),
            ],
        }
    }

    #[inline]
    pub fn row(&self, r: usize) -> Vec3<f32> {
        Vec3::new(self.cols[0].to_array()[r], self.cols[1].to_array()[r], self.cols[2].to_array()[r])
    }

    #[inline]
    pub fn mul_vec(&self, v: Vec3<f32>) -> Vec3<f32> {
        self.cols[0] * v.x + self.cols[1] * v.y + self.cols[2] * v.z
    }

    #[inline]
    pub fn mul_mat(&self, rhs: &Self) -> Self {
        Self::from_cols(self.mul_vec(rhs.cols[0]), self.mul_vec(rhs.cols[1]), self.mul_vec(rhs.cols[2]))
    }

    /// Extend this matrix into a `Mat4`, padding the new row/column with zeros except for a
    /// `1.0` on the diagonal, per spec.md's composition-by-padding construction rule.
    #[inline]
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_cols(
            Vec4::from((self.cols[0], 0.0)),
            Vec4::from((self.cols[1], 0.0)),
            Vec4::from((self.cols[2], 0.0)),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        )
    }

    pub fn determinant(&self) -> f32 {
        self.cols[0].dot(self.cols[1].cross(self.cols[2]))
    }
}

impl Default for Mat3 {
    fn default() -> Self { Self::IDENTITY }
}

impl Mat4 {
    pub const IDENTITY: Self = Self {
        cols: [
            Vec4::new(1.0, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 1.0, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 1.0, 0.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        ],
    };

    #[inline]
    pub fn from_cols(c0: Vec4<f32>, c1: Vec4<f32>, c2: Vec4<f32>, c3: Vec4<f32>) -> Self {
        Self { cols: [c0, c1, c2, c3] }
    }

    #[inline]
    pub fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        Self {
            cols: core::array::from_fn(|c| {
                Vec4::new(rows[0][c], rows[1][c], rows[2][c], rows[3][c])
            }),
        }
    }

    #[inline]
    pub fn mul_vec(&self, v: Vec4<f32>) -> Vec4<f32> {
        self.cols[0] * v.x + self.cols[1] * v.y + self.cols[2] * v.z + self.cols[3] * v.w
    }

    #[inline]
    pub fn mul_mat(&self, rhs: &Self) -> Self {
        Self::from_cols(
            self.mul_vec(rhs.cols[0]),
            self.mul_vec(rhs.cols[1]),
            self.mul_vec(rhs.cols[2]),
            self.mul_vec(rhs.cols[3]),
        )
    }

    pub fn translation(t: Vec3<f32>) -> Self {
        let mut m = Self::IDENTITY;
        m.cols[3] = Vec4::new(t.x, t.y, t.z, 1.0);
        m
    }

    pub fn scaling(s: Vec3<f32>) -> Self {
        Self::from_cols(
            Vec4::new(s.x, 0.0, 0.0, 0.0),
            Vec4::new(0.0, s.y, 0.0, 0.0),
            Vec4::new(0.0, 0.0, s.z, 0.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        )
    }

    /// Attempt to invert via cofactor expansion. Panics if the matrix is singular; callers that
    /// build up a `Transform3D` should instead append the inverse of each primitive op directly
    /// rather than calling this on an arbitrary composed matrix (see `math::transform`).
    pub fn inverse(&self) -> Self {
        let m = self.cols;
        let a = |r: usize, c: usize| m[c].to_array()[r];

        // Standard 4x4 cofactor/adjugate inverse.
        let mut inv = [0f32; 16];
        let src: [f32; 16] = core::array::from_fn(|i| a(i % 4, i / 4));

        inv[0] = src[5] * src[10] * src[15] - src[5] * src[11] * src[14] - src[9] * src[6] * src[15]
            + src[9] * src[7] * src[14] + src[13] * src[6] * src[11] - src[13] * src[7] * src[10];
        inv[4] = -src[4] * src[10] * src[15] + src[4] * src[11] * src[14] + src[8] * src[6] * src[15]
            - src[8] * src[7] * src[14] - src[12] * src[6] * src[11] + src[12] * src[7] * src[10];
        inv[8] = src[4] * src[9] * src[15] - src[4] * src[11] * src[13] - src[8] * src[5] * src[15]
            + src[8] * src[7] * src[13] + src[12] * src[5] * src[11] - src[12] * src[7] * src[9];
        inv[12] = -src[4] * src[9] * src[14] + src[4] * src[10] * src[13] + src[8] * src[5] * src[14]
            - src[8] * src[6] * src[13] - src[12] * src[5] * src[10] + src[12] * src[6] * src[9];
        inv[1] = -src[1] * src[10] * src[15] + src[1] * src[11] * src[14] + src[9] * src[2] * src[15]
            - src[9] * src[3] * src[14] - src[13] * src[2] * src[11] + src[13] * src[3] * src[10];
        inv[5] = src[0] * src[10] * src[15] - src[0] * src[11] * src[14] - src[8] * src[2] * src[15]
            + src[8] * src[3] * src[14] + src[12] * src[2] * src[11] - src[12] * src[3] * src[10];
        inv[9] = -src[0] * src[9] * src[15] + src[0] * src[11] * src[13] + src[8] * src[1] * src[15]
            - src[8] * src[3] * src[13] - src[12] * src[1] * src[11] + src[12] * src[3] * src[9];
        inv[13] = src[0] * src[9] * src[14] - src[0] * src[10] * src[13] - src[8] * src[1] * src[14]
            + src[8] * src[2] * src[13] + src[12] * src[1] * src[10] - src[12] * src[2] * src[9];
        inv[2] = src[1] * src[6] * src[15] - src[1] * src[7] * src[14] - src[5] * src[2] * src[15]
            + src[5] * src[3] * src[14] + src[13] * src[2] * src[7] - src[13] * src[3] * src[6];
        inv[6] = -src[0] * src[6] * src[15] + src[0] * src[7] * src[14] + src[4] * src[2] * src[15]
            - src[4] * src[3] * src[14] - src[12] * src[2] * src[7] + src[12] * src[3] * src[6];
        inv[10] = src[0] * src[5] * src[15] - src[0] * src[7] * src[13] - src[4] * src[1] * src[15]
            + src[4] * src[3] * src[13] + src[12] * src[1] * src[7] - src[12] * src[3] * src[5];
        inv[14] = -src[0] * src[5] * src[14] + src[0] * src[6] * src[13] + src[4] * src[1] * src[14]
            - src[4] * src[2] * src[13] - src[12] * src[1] * src[6] + src[12] * src[2] * src[5];
        inv[3] = -src[1] * src[6] * src[11] + src[1] * src[7] * src[10] + src[5] * src[2] * src[11]
            - src[5] * src[3] * src[10] - src[9] * src[2] * src[7] + src[9] * src[3] * src[6];
        inv[7] = src[0] * src[6] * src[11] - src[0] * src[7] * src[10] - src[4] * src[2] * src[11]
            + src[4] * src[3] * src[10] + src[8] * src[2] * src[7] - src[8] * src[3] * src[6];
        inv[11] = -src[0] * src[5] * src[11] + src[0] * src[7] * src[9] + src[4] * src[1] * src[11]
            - src[4] * src[3] * src[9] - src[8] * src[1] * src[7] + src[8] * src[3] * src[5];
        inv[15] = src[0] * src[5] * src[10] - src[0] * src[6] * src[9] - src[4] * src[1] * src[10]
            + src[4] * src[2] * src[9] + src[8] * src[1] * src[6] - src[8] * src[2] * src[5];

        let det = src[0] * inv[0] + src[1] * inv[4] + src[2] * inv[8] + src[3] * inv[12];
        assert!(det.abs() > 0.0, "attempted to invert a singular matrix");
        let rdet = 1.0 / det;
        let vals: [f32; 16] = core::array::from_fn(|i| inv[i] * rdet);

        Self::from_rows([
            [vals[0], vals[1], vals[2], vals[3]],
            [vals[4], vals[5], vals[6], vals[7]],
            [vals[8], vals[9], vals[10], vals[11]],
            [vals[12], vals[13], vals[14], vals[15]],
        ])
    }
}

impl Default for Mat4 {
    fn default() -> Self { Self::IDENTITY }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_times_vec_is_vec() {
        let v = Vec4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(Mat4::IDENTITY.mul_vec(v), v);
    }

    #[test]
    fn translation_moves_point() {
        let m = Mat4::translation(Vec3::new(1.0, 2.0, 3.0));
        let p = m.mul_vec(Vec4::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(p.xyz(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn inverse_round_trips() {
        let m = Mat4::translation(Vec3::new(3.0, -2.0, 1.0)).mul_mat(&Mat4::scaling(Vec3::new(2.0, 2.0, 2.0)));
        let inv = m.inverse();
        let round = m.mul_mat(&inv);
        for i in 0..4 {
            assert!(round.cols[i].approx_eq(Mat4::IDENTITY.cols[i], 1e-4));
        }
    }

    #[test]
    fn mat3_padded_into_mat4_has_identity_row_col() {
        let m = Mat3::IDENTITY.to_mat4();
        assert_eq!(m, Mat4::IDENTITY);
    }
}
