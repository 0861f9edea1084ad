use core::ops::{Add, Div, Mul, Neg, Sub};

macro_rules! vec_type {
    ($name:ident { $($field:ident),+ }, $n:expr) => {
        #[derive(Copy, Clone, Debug, Default, PartialEq)]
        #[repr(C)]
        pub struct $name<T> {
            $(pub $field: T,)+
        }

        impl<T> $name<T> {
            #[inline(always)]
            pub const fn new($($field: T),+) -> Self {
                Self { $($field),+ }
            }

            /// The number of components.
            pub const LEN: usize = $n;

            #[inline]
            pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> $name<U> {
                $name { $($field: f(self.$field)),+ }
            }

            #[inline]
            pub fn map2<U, R>(self, other: $name<U>, mut f: impl FnMut(T, U) -> R) -> $name<R> {
                $name { $($field: f(self.$field, other.$field)),+ }
            }

            #[inline]
            pub fn into_array(self) -> [T; $n] {
                [$(self.$field),+]
            }
        }

        impl<T: Copy> From<[T; $n]> for $name<T> {
            #[inline]
            fn from(a: [T; $n]) -> Self {
                let mut it = a.iter().copied();
                Self { $($field: it.next().unwrap()),+ }
            }
        }

        impl<T: Copy> $name<T> {
            #[inline]
            pub fn splat(v: T) -> Self {
                Self { $($field: v),+ }
            }
        }

        impl<T: Add<Output = T> + Copy> Add for $name<T> {
            type Output = Self;
            #[inline]
            fn add(self, rhs: Self) -> Self { self.map2(rhs, Add::add) }
        }

        impl<T: Sub<Output = T> + Copy> Sub for $name<T> {
            type Output = Self;
            #[inline]
            fn sub(self, rhs: Self) -> Self { self.map2(rhs, Sub::sub) }
        }

        impl<T: Mul<Output = T> + Copy> Mul for $name<T> {
            type Output = Self;
            #[inline]
            fn mul(self, rhs: Self) -> Self { self.map2(rhs, Mul::mul) }
        }

        impl<T: Mul<Output = T> + Copy> Mul<T> for $name<T> {
            type Output = Self;
            #[inline]
            fn mul(self, rhs: T) -> Self { self.map(|a| a * rhs) }
        }

        impl<T: Div<Output = T> + Copy> Div for $name<T> {
            type Output = Self;
            #[inline]
            fn div(self, rhs: Self) -> Self { self.map2(rhs, Div::div) }
        }

        impl<T: Div<Output = T> + Copy> Div<T> for $name<T> {
            type Output = Self;
            #[inline]
            fn div(self, rhs: T) -> Self { self.map(|a| a / rhs) }
        }

        impl<T: Neg<Output = T> + Copy> Neg for $name<T> {
            type Output = Self;
            #[inline]
            fn neg(self) -> Self { self.map(Neg::neg) }
        }
    };
}

vec_type!(Vec2 { x, y }, 2);
vec_type!(Vec3 { x, y, z }, 3);
vec_type!(Vec4 { x, y, z, w }, 4);

impl<T: Copy> Vec2<T> {
    #[inline]
    pub fn xy(self) -> Self { self }
}

impl<T: Copy> Vec3<T> {
    #[inline]
    pub fn xy(self) -> Vec2<T> { Vec2::new(self.x, self.y) }
    #[inline]
    pub fn xyz(self) -> Self { self }
    #[inline]
    pub fn rgb(self) -> Self { self }
}

impl<T: Copy> Vec4<T> {
    #[inline]
    pub fn xy(self) -> Vec2<T> { Vec2::new(self.x, self.y) }
    #[inline]
    pub fn xyz(self) -> Vec3<T> { Vec3::new(self.x, self.y, self.z) }
    #[inline]
    pub fn rgba(self) -> Self { self }
    #[inline]
    pub fn rgb(self) -> Vec3<T> { Vec3::new(self.x, self.y, self.z) }
}

impl<T: Copy> From<Vec3<T>> for Vec2<T> {
    #[inline]
    fn from(v: Vec3<T>) -> Self { v.xy() }
}

impl<T: Copy> From<Vec4<T>> for Vec3<T> {
    #[inline]
    fn from(v: Vec4<T>) -> Self { v.xyz() }
}

/// Construct a `Vec3` by composing a `Vec2` with a trailing scalar, zero-padding nothing.
impl<T> From<(Vec2<T>, T)> for Vec3<T> {
    #[inline]
    fn from((xy, z): (Vec2<T>, T)) -> Self { Vec3::new(xy.x, xy.y, z) }
}

/// Construct a `Vec4` by composing a `Vec3` with a trailing scalar.
impl<T> From<(Vec3<T>, T)> for Vec4<T> {
    #[inline]
    fn from((xyz, w): (Vec3<T>, T)) -> Self { Vec4::new(xyz.x, xyz.y, xyz.z, w) }
}

macro_rules! impl_float_ops {
    ($name:ident { $($field:ident),+ }) => {
        impl $name<f32> {
            #[inline]
            pub fn dot(self, rhs: Self) -> f32 {
                let mut sum = 0.0;
                $(sum += self.$field * rhs.$field;)+
                sum
            }

            #[inline]
            pub fn norm_sq(self) -> f32 { self.dot(self) }

            #[inline]
            pub fn norm(self) -> f32 { self.norm_sq().sqrt() }

            #[inline]
            pub fn normalized(self) -> Self {
                let n = self.norm();
                if n > 0.0 { self / n } else { self }
            }

            #[inline]
            pub fn lerp(self, rhs: Self, t: f32) -> Self {
                self.map2(rhs, |a, b| a + (b - a) * t)
            }

            #[inline]
            pub fn min(self, rhs: Self) -> Self { self.map2(rhs, f32::min) }

            #[inline]
            pub fn max(self, rhs: Self) -> Self { self.map2(rhs, f32::max) }

            #[inline]
            pub fn clamp(self, lo: Self, hi: Self) -> Self {
                self.map2(lo, f32::max).map2(hi, f32::min)
            }

            #[inline]
            pub fn abs(self) -> Self { self.map(f32::abs) }

            #[inline]
            pub fn floor(self) -> Self { self.map(f32::floor) }

            #[inline]
            pub fn ceil(self) -> Self { self.map(f32::ceil) }

            #[inline]
            pub fn round(self) -> Self { self.map(f32::round) }

            /// Approximate equality within an ULP-scaled tolerance.
            #[inline]
            pub fn approx_eq(self, rhs: Self, epsilon: f32) -> bool {
                let mut ok = true;
                $(ok &= (self.$field - rhs.$field).abs() <= epsilon;)+
                ok
            }
        }
    };
}

impl_float_ops!(Vec2 { x, y });
impl_float_ops!(Vec3 { x, y, z });
impl_float_ops!(Vec4 { x, y, z, w });

impl Vec3<f32> {
    #[inline]
    pub fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }
}

impl Vec2<f32> {
    /// The z component of the 3D cross product of two 2D vectors, i.e. the signed area of the
    /// parallelogram they span. Positive when `rhs` is counter-clockwise from `self`.
    #[inline]
    pub fn cross(self, rhs: Self) -> f32 {
        self.x * rhs.y - self.y * rhs.x
    }
}

impl<T: Copy> Vec2<T> {
    #[inline]
    pub fn to_array(self) -> [T; 2] { [self.x, self.y] }
}

impl<T: Copy> Vec3<T> {
    #[inline]
    pub fn to_array(self) -> [T; 3] { [self.x, self.y, self.z] }
}

impl<T: Copy> Vec4<T> {
    #[inline]
    pub fn to_array(self) -> [T; 4] { [self.x, self.y, self.z, self.w] }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_and_cross() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(a.dot(b), 0.0);
        assert_eq!(a.cross(b), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn lerp_is_linear() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 20.0);
        assert_eq!(a.lerp(b, 0.5), Vec2::new(5.0, 10.0));
    }

    #[test]
    fn swizzle_xyz() {
        let v = Vec4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(v.xyz(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(v.xy(), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn approx_eq_tolerance() {
        let a = Vec3::new(1.0, 1.0, 1.0);
        let b = Vec3::new(1.0 + 1e-7, 1.0, 1.0);
        assert!(a.approx_eq(b, 1e-5));
        assert!(!a.approx_eq(b, 1e-9));
    }
}
