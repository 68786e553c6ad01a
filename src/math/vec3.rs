use approx::{AbsDiffEq, RelativeEq};
use nalgebra as na;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::error::MathError;
use crate::math::Scalar;

/// A 3D vector
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct Vec3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T: Scalar> Vec3<T> {
    /// Creates a new 3D vector
    #[inline]
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// Creates a vector with all components set to `v`
    #[inline]
    pub fn splat(v: T) -> Self {
        Self { x: v, y: v, z: v }
    }

    #[inline]
    pub fn zero() -> Self {
        Self::splat(T::ZERO)
    }

    #[inline]
    pub fn unit_x() -> Self {
        Self::new(T::ONE, T::ZERO, T::ZERO)
    }

    #[inline]
    pub fn unit_y() -> Self {
        Self::new(T::ZERO, T::ONE, T::ZERO)
    }

    #[inline]
    pub fn unit_z() -> Self {
        Self::new(T::ZERO, T::ZERO, T::ONE)
    }

    #[inline]
    pub fn set(&mut self, x: T, y: T, z: T) {
        self.x = x;
        self.y = y;
        self.z = z;
    }

    #[inline]
    pub fn set_zero(&mut self) {
        self.set(T::ZERO, T::ZERO, T::ZERO);
    }

    /// Computes the dot product of two vectors
    #[inline]
    pub fn dot(&self, other: &Self) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Computes the cross product of two vectors
    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    #[inline]
    pub fn length_squared(&self) -> T {
        self.dot(self)
    }

    #[inline]
    pub fn length(&self) -> T {
        self.length_squared().sqrt()
    }

    /// Manhattan length `|x| + |y| + |z|`
    #[inline]
    pub fn taxicab_length(&self) -> T {
        self.x.abs() + self.y.abs() + self.z.abs()
    }

    #[inline]
    pub fn distance(&self, other: &Self) -> T {
        (*self - *other).length()
    }

    /// Affine interpolation `(1-t)*self + t*other`; `t` is not clamped.
    #[inline]
    pub fn lerp(&self, other: &Self, t: T) -> Self {
        *self * (T::ONE - t) + *other * t
    }

    #[inline]
    pub fn average(&self, other: &Self) -> Self {
        (*self + *other) * T::HALF
    }

    /// Divides by the length in place. A zero vector becomes NaN.
    #[inline]
    pub fn normalize(&mut self) {
        let len = self.length();
        *self /= len;
    }

    /// Divides by `length + eps` in place
    #[inline]
    pub fn normalize_safe(&mut self, eps: T) {
        let len = self.length();
        *self /= len + eps;
    }

    #[inline]
    pub fn normalized(&self) -> Self {
        let mut v = *self;
        v.normalize();
        v
    }

    #[inline]
    pub fn normalized_with_length(&self) -> (Self, T) {
        let len = self.length();
        (*self / len, len)
    }

    #[inline]
    pub fn normalized_safe(&self) -> Self {
        let mut v = *self;
        v.normalize_safe(T::EPSILON);
        v
    }

    #[inline]
    pub fn normalized_safe_with_length(&self) -> (Self, T) {
        let len = self.length();
        (*self / (len + T::EPSILON), len)
    }

    /// Normalized copy, or an error if the length is zero or not finite
    pub fn try_normalized(&self) -> Result<Self, MathError> {
        let len = self.length();
        if len == T::ZERO || !len.is_normal_valued() {
            return Err(MathError::ZeroLength);
        }
        Ok(*self / len)
    }

    /// Componentwise square root
    #[inline]
    pub fn sqrt(&self) -> Self {
        Self::new(self.x.sqrt(), self.y.sqrt(), self.z.sqrt())
    }

    /// Some vector perpendicular to this one, built from its two largest components.
    /// Zero only for the zero vector.
    pub fn any_perpendicular(&self) -> Self {
        if self.x.abs() > self.z.abs() {
            Self::new(-self.y, self.x, T::ZERO)
        } else {
            Self::new(T::ZERO, -self.z, self.y)
        }
    }

    /// True iff every component is a normal number or zero
    #[inline]
    pub fn is_normal_valued(&self) -> bool {
        self.x.is_normal_valued() && self.y.is_normal_valued() && self.z.is_normal_valued()
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        &self.x
    }
}

impl<T: Scalar> From<[T; 3]> for Vec3<T> {
    #[inline]
    fn from(array: [T; 3]) -> Self {
        Self::new(array[0], array[1], array[2])
    }
}

impl<T: Scalar> From<Vec3<T>> for [T; 3] {
    #[inline]
    fn from(v: Vec3<T>) -> Self {
        [v.x, v.y, v.z]
    }
}

impl<T: Scalar> From<na::Vector3<T>> for Vec3<T> {
    #[inline]
    fn from(v: na::Vector3<T>) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl<T: Scalar> From<Vec3<T>> for na::Vector3<T> {
    #[inline]
    fn from(v: Vec3<T>) -> Self {
        na::Vector3::new(v.x, v.y, v.z)
    }
}

impl<T: Scalar> fmt::Display for Vec3<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl<T: Scalar> Index<usize> for Vec3<T> {
    type Output = T;
    #[inline]
    fn index(&self, i: usize) -> &T {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vec3 index out of range: {}", i),
        }
    }
}

impl<T: Scalar> IndexMut<usize> for Vec3<T> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        match i {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Vec3 index out of range: {}", i),
        }
    }
}

impl<T: Scalar> Add for Vec3<T> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl<T: Scalar> Sub for Vec3<T> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl<T: Scalar> Neg for Vec3<T> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl<T: Scalar> Mul<T> for Vec3<T> {
    type Output = Self;
    #[inline]
    fn mul(self, s: T) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }
}

/// Hadamard (componentwise) product
impl<T: Scalar> Mul for Vec3<T> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

impl<T: Scalar> Div<T> for Vec3<T> {
    type Output = Self;
    #[inline]
    fn div(self, s: T) -> Self {
        Self::new(self.x / s, self.y / s, self.z / s)
    }
}

/// Componentwise division
impl<T: Scalar> Div for Vec3<T> {
    type Output = Self;
    #[inline]
    fn div(self, rhs: Self) -> Self {
        Self::new(self.x / rhs.x, self.y / rhs.y, self.z / rhs.z)
    }
}

impl<T: Scalar> AddAssign for Vec3<T> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl<T: Scalar> SubAssign for Vec3<T> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl<T: Scalar> MulAssign<T> for Vec3<T> {
    #[inline]
    fn mul_assign(&mut self, s: T) {
        self.x *= s;
        self.y *= s;
        self.z *= s;
    }
}

impl<T: Scalar> MulAssign for Vec3<T> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        self.x *= rhs.x;
        self.y *= rhs.y;
        self.z *= rhs.z;
    }
}

impl<T: Scalar> DivAssign<T> for Vec3<T> {
    #[inline]
    fn div_assign(&mut self, s: T) {
        self.x /= s;
        self.y /= s;
        self.z /= s;
    }
}

macro_rules! impl_scalar_lhs_mul {
    ($($t:ty),*) => {$(
        impl Mul<Vec3<$t>> for $t {
            type Output = Vec3<$t>;
            #[inline]
            fn mul(self, v: Vec3<$t>) -> Vec3<$t> {
                v * self
            }
        }
    )*};
}

impl_scalar_lhs_mul!(f32, f64);

impl<T: Scalar> AbsDiffEq for Vec3<T> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl<T: Scalar> RelativeEq for Vec3<T> {
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perpendicular_is_orthogonal() {
        for v in [
            Vec3::new(1.0_f64, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.3, -2.0, 0.7),
        ] {
            let p = v.any_perpendicular();
            assert!(p.length_squared() > 0.0);
            assert_eq!(v.dot(&p), 0.0);
        }
    }

    #[test]
    fn hadamard_and_division() {
        let a = Vec3::new(1.0_f32, 2.0, 3.0);
        let b = Vec3::new(2.0_f32, 4.0, 6.0);
        assert_eq!(a * b, Vec3::new(2.0, 8.0, 18.0));
        assert_eq!(b / a, Vec3::splat(2.0));
    }
}
