use approx::{AbsDiffEq, RelativeEq};
use std::ops::Mul;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::error::MathError;
use crate::math::{Mat3x2, Scalar, Vec2};

/// Uniform scale followed by a 2D translation: `p -> scale * p + pos`
///
/// Typically a 2D camera, with `pos` in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct PosScale<T> {
    /// Translation applied after scaling
    pub pos: Vec2<T>,

    /// Uniform scale factor
    pub scale: T,
}

impl<T: Scalar> PosScale<T> {
    /// Creates a new transform from a position and a uniform scale
    #[inline]
    pub fn new(pos: Vec2<T>, scale: T) -> Self {
        Self { pos, scale }
    }

    #[inline]
    pub fn identity() -> Self {
        Self::new(Vec2::zero(), T::ONE)
    }

    /// Equivalent affine matrix `(s, 0, 0, s, pos.x, pos.y)`
    #[inline]
    pub fn to_mat3x2(&self) -> Mat3x2<T> {
        Mat3x2::new(self.scale, T::ZERO, T::ZERO, self.scale, self.pos.x, self.pos.y)
    }

    #[inline]
    pub fn mul_point(&self, p: &Vec2<T>) -> Vec2<T> {
        *p * self.scale + self.pos
    }

    #[inline]
    pub fn mul_vector(&self, v: &Vec2<T>) -> Vec2<T> {
        *v * self.scale
    }

    /// `self` applied after `other`
    #[inline]
    pub fn then_after(&self, other: &Self) -> Self {
        Self::new(self.mul_point(&other.pos), self.scale * other.scale)
    }

    /// Inverse transform `p -> (p - pos) / scale`.
    ///
    /// A zero scale yields non-finite fields; see [`try_invert`](Self::try_invert).
    #[inline]
    pub fn invert(&self) -> Self {
        Self::new(-self.pos / self.scale, T::ONE / self.scale)
    }

    /// Inverse, or [`MathError::ZeroScale`]
    pub fn try_invert(&self) -> Result<Self, MathError> {
        if self.scale == T::ZERO {
            return Err(MathError::ZeroScale);
        }
        Ok(self.invert())
    }
}

impl<T: Scalar> Default for PosScale<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: Scalar> From<PosScale<T>> for Mat3x2<T> {
    #[inline]
    fn from(ps: PosScale<T>) -> Self {
        ps.to_mat3x2()
    }
}

/// Composition: `(a * b).mul_point(p) == a.mul_point(&b.mul_point(p))`
impl<T: Scalar> Mul for PosScale<T> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.then_after(&rhs)
    }
}

impl<T: Scalar> AbsDiffEq for PosScale<T> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.pos.abs_diff_eq(&other.pos, epsilon) && self.scale.abs_diff_eq(&other.scale, epsilon)
    }
}

impl<T: Scalar> RelativeEq for PosScale<T> {
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        self.pos.relative_eq(&other.pos, epsilon, max_relative)
            && self.scale.relative_eq(&other.scale, epsilon, max_relative)
    }
}
