use approx::{AbsDiffEq, RelativeEq};
use nalgebra as na;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::error::MathError;
use crate::math::Scalar;

/// A 2D vector
///
/// `#[repr(C)]` so that a `[Vec2<T>]` can be handed to APIs expecting packed `x, y` pairs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct Vec2<T> {
    pub x: T,
    pub y: T,
}

impl<T: Scalar> Vec2<T> {
    /// Creates a new 2D vector
    #[inline]
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Creates a vector with both components set to `v`
    #[inline]
    pub fn splat(v: T) -> Self {
        Self { x: v, y: v }
    }

    #[inline]
    pub fn zero() -> Self {
        Self::splat(T::ZERO)
    }

    #[inline]
    pub fn set(&mut self, x: T, y: T) {
        self.x = x;
        self.y = y;
    }

    #[inline]
    pub fn set_zero(&mut self) {
        self.set(T::ZERO, T::ZERO);
    }

    /// Computes the dot product of two vectors
    #[inline]
    pub fn dot(&self, other: &Self) -> T {
        self.x * other.x + self.y * other.y
    }

    /// The z component of the 3D cross product of the two vectors
    #[inline]
    pub fn perp_dot(&self, other: &Self) -> T {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn length_squared(&self) -> T {
        self.dot(self)
    }

    #[inline]
    pub fn length(&self) -> T {
        self.length_squared().sqrt()
    }

    /// Manhattan length `|x| + |y|`
    #[inline]
    pub fn taxicab_length(&self) -> T {
        self.x.abs() + self.y.abs()
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

    /// Midpoint of two points
    #[inline]
    pub fn average(&self, other: &Self) -> Self {
        (*self + *other) * T::HALF
    }

    /// Divides by the length in place.
    ///
    /// No zero guard: a zero vector becomes NaN. Use
    /// [`is_normal_valued`](Self::is_normal_valued) to detect it afterwards.
    #[inline]
    pub fn normalize(&mut self) {
        let len = self.length();
        *self /= len;
    }

    /// Divides by `length + eps` in place, avoiding a hard divide by zero
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

    /// Strictly normalized copy together with the length before normalizing
    #[inline]
    pub fn normalized_with_length(&self) -> (Self, T) {
        let len = self.length();
        (*self / len, len)
    }

    /// Normalized copy using machine epsilon as the guard
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

    /// `(-y, x)`: right-perpendicular in a left-handed (y down) frame,
    /// left-perpendicular in a right-handed (y up) frame
    #[inline]
    pub fn perp_r(&self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// `(y, -x)`: left-perpendicular in a left-handed (y down) frame,
    /// right-perpendicular in a right-handed (y up) frame
    #[inline]
    pub fn perp_l(&self) -> Self {
        Self::new(self.y, -self.x)
    }

    /// True iff every component is a normal number or zero
    #[inline]
    pub fn is_normal_valued(&self) -> bool {
        self.x.is_normal_valued() && self.y.is_normal_valued()
    }

    /// Pointer to the first component, for handing to APIs that read `[T; 2]`
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        &self.x
    }
}

impl<T: Scalar> From<[T; 2]> for Vec2<T> {
    #[inline]
    fn from(array: [T; 2]) -> Self {
        Self::new(array[0], array[1])
    }
}

impl<T: Scalar> From<Vec2<T>> for [T; 2] {
    #[inline]
    fn from(v: Vec2<T>) -> Self {
        [v.x, v.y]
    }
}

impl<T: Scalar> From<na::Vector2<T>> for Vec2<T> {
    #[inline]
    fn from(v: na::Vector2<T>) -> Self {
        Self::new(v[0], v[1])
    }
}

impl<T: Scalar> From<Vec2<T>> for na::Vector2<T> {
    #[inline]
    fn from(v: Vec2<T>) -> Self {
        na::Vector2::new(v.x, v.y)
    }
}

impl<T: Scalar> fmt::Display for Vec2<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl<T: Scalar> Index<usize> for Vec2<T> {
    type Output = T;
    #[inline]
    fn index(&self, i: usize) -> &T {
        match i {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Vec2 index out of range: {}", i),
        }
    }
}

impl<T: Scalar> IndexMut<usize> for Vec2<T> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        match i {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => panic!("Vec2 index out of range: {}", i),
        }
    }
}

impl<T: Scalar> Add for Vec2<T> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Scalar> Sub for Vec2<T> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: Scalar> Neg for Vec2<T> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl<T: Scalar> Mul<T> for Vec2<T> {
    type Output = Self;
    #[inline]
    fn mul(self, s: T) -> Self {
        Self::new(self.x * s, self.y * s)
    }
}

impl<T: Scalar> Div<T> for Vec2<T> {
    type Output = Self;
    #[inline]
    fn div(self, s: T) -> Self {
        Self::new(self.x / s, self.y / s)
    }
}

impl<T: Scalar> AddAssign for Vec2<T> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl<T: Scalar> SubAssign for Vec2<T> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl<T: Scalar> MulAssign<T> for Vec2<T> {
    #[inline]
    fn mul_assign(&mut self, s: T) {
        self.x *= s;
        self.y *= s;
    }
}

impl<T: Scalar> DivAssign<T> for Vec2<T> {
    #[inline]
    fn div_assign(&mut self, s: T) {
        self.x /= s;
        self.y /= s;
    }
}

macro_rules! impl_scalar_lhs_mul {
    ($($t:ty),*) => {$(
        impl Mul<Vec2<$t>> for $t {
            type Output = Vec2<$t>;
            #[inline]
            fn mul(self, v: Vec2<$t>) -> Vec2<$t> {
                v * self
            }
        }
    )*};
}

impl_scalar_lhs_mul!(f32, f64);

impl<T: Scalar> AbsDiffEq for Vec2<T> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon) && self.y.abs_diff_eq(&other.y, epsilon)
    }
}

impl<T: Scalar> RelativeEq for Vec2<T> {
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
    }
}
