use approx::{AbsDiffEq, RelativeEq};
use nalgebra as na;
use std::fmt;
use std::ops::Mul;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::error::MathError;
use crate::math::{Scalar, Vec2};

/// 2D affine matrix: three columns of 2-vectors, column-major (`xyxyxy`).
///
/// ```text
///     b0  b1   t
/// x    a   c  tx
/// y    b   d  ty
/// ```
///
/// The implied third row is `(0 0 1)` whenever two matrices are multiplied.
/// To accumulate a new transform `B` onto an existing `A`, multiply it on
/// the right: `A * B`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Mat3x2<T> {
    el: [T; 6],
}

impl<T: Scalar> Mat3x2<T> {
    /// Creates a matrix from basis columns `(a, b)`, `(c, d)` and translation `(tx, ty)`
    #[inline]
    pub fn new(a: T, b: T, c: T, d: T, tx: T, ty: T) -> Self {
        Self { el: [a, b, c, d, tx, ty] }
    }

    #[inline]
    pub fn from_elements(el: [T; 6]) -> Self {
        Self { el }
    }

    #[inline]
    pub fn identity() -> Self {
        Self::new(T::ONE, T::ZERO, T::ZERO, T::ONE, T::ZERO, T::ZERO)
    }

    /// Rotates points counter-clockwise about the origin by `angle_radians`
    pub fn rotation(angle_radians: T) -> Self {
        let (s, c) = angle_radians.sin_cos();
        Self::new(c, s, -s, c, T::ZERO, T::ZERO)
    }

    #[inline]
    pub fn translation(p: &Vec2<T>) -> Self {
        Self::new(T::ONE, T::ZERO, T::ZERO, T::ONE, p.x, p.y)
    }

    #[inline]
    pub fn scale(s: &Vec2<T>) -> Self {
        Self::new(s.x, T::ZERO, T::ZERO, s.y, T::ZERO, T::ZERO)
    }

    #[inline]
    pub fn uniform_scale(s: T) -> Self {
        Self::scale(&Vec2::splat(s))
    }

    // Element accessors

    #[inline]
    pub fn a(&self) -> T {
        self.el[0]
    }

    #[inline]
    pub fn b(&self) -> T {
        self.el[1]
    }

    #[inline]
    pub fn c(&self) -> T {
        self.el[2]
    }

    #[inline]
    pub fn d(&self) -> T {
        self.el[3]
    }

    #[inline]
    pub fn tx(&self) -> T {
        self.el[4]
    }

    #[inline]
    pub fn ty(&self) -> T {
        self.el[5]
    }

    /// Element at column `col` (0..3) and row `row` (0..2)
    #[inline]
    pub fn at(&self, col: usize, row: usize) -> T {
        self.el[(col << 1) + row]
    }

    #[inline]
    pub fn at_mut(&mut self, col: usize, row: usize) -> &mut T {
        &mut self.el[(col << 1) + row]
    }

    /// Column `i`: the two basis vectors, then the translation
    #[inline]
    pub fn col(&self, i: usize) -> Vec2<T> {
        Vec2::new(self.at(i, 0), self.at(i, 1))
    }

    /// Flat column-major storage, ready for a graphics API
    #[inline]
    pub fn as_slice(&self) -> &[T; 6] {
        &self.el
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.el.as_ptr()
    }

    /// Determinant of the 2x2 basis
    #[inline]
    pub fn determinant(&self) -> T {
        self.a() * self.d() - self.c() * self.b()
    }

    /// Product `self * other` under the implied homogeneous row
    pub fn multiply(&self, other: &Self) -> Self {
        let mut out = Self::from_elements([T::ZERO; 6]);
        for y in 0..2 {
            for x in 0..2 {
                let mut sum = T::ZERO;
                for k in 0..2 {
                    sum += self.at(k, y) * other.at(x, k);
                }
                *out.at_mut(x, y) = sum;
            }

            // translation column also picks up our own translation
            let mut sum = self.at(2, y);
            for k in 0..2 {
                sum += self.at(k, y) * other.at(2, k);
            }
            *out.at_mut(2, y) = sum;
        }
        out
    }

    /// Transforms a position (applies translation)
    #[inline]
    pub fn mul_point(&self, p: &Vec2<T>) -> Vec2<T> {
        Vec2::new(
            self.a() * p.x + self.c() * p.y + self.tx(),
            self.b() * p.x + self.d() * p.y + self.ty(),
        )
    }

    /// Transforms a direction (ignores translation)
    #[inline]
    pub fn mul_vector(&self, v: &Vec2<T>) -> Vec2<T> {
        Vec2::new(
            self.a() * v.x + self.c() * v.y,
            self.b() * v.x + self.d() * v.y,
        )
    }

    /// `scale(s) * self`: scales after applying this transform
    #[inline]
    pub fn scaled(&self, s: &Vec2<T>) -> Self {
        Self::scale(s).multiply(self)
    }

    /// `rotation(angle) * self`
    #[inline]
    pub fn rotated(&self, angle_radians: T) -> Self {
        Self::rotation(angle_radians).multiply(self)
    }

    /// `translation(p) * self`
    #[inline]
    pub fn translated(&self, p: &Vec2<T>) -> Self {
        Self::translation(p).multiply(self)
    }

    /// Inverse of the affine transform.
    ///
    /// A singular basis (determinant exactly zero) trips a debug assertion;
    /// release builds return non-finite elements. See [`try_invert`](Self::try_invert).
    pub fn invert(&self) -> Self {
        let det = self.determinant();
        debug_assert!(det != T::ZERO, "Singular Matrix");
        self.invert_with_det(det)
    }

    /// Inverse, or [`MathError::SingularMatrix`] when the determinant is zero
    pub fn try_invert(&self) -> Result<Self, MathError> {
        let det = self.determinant();
        if det == T::ZERO {
            return Err(MathError::SingularMatrix);
        }
        Ok(self.invert_with_det(det))
    }

    fn invert_with_det(&self, det: T) -> Self {
        let [a, b, c, d, tx, ty] = self.el;
        Self::new(
            d / det,
            -b / det,
            -c / det,
            a / det,
            (c * ty - tx * d) / det,
            (tx * b - a * ty) / det,
        )
    }

    /// True iff every element is a normal number or zero
    pub fn is_normal_valued(&self) -> bool {
        self.el.iter().all(|e| e.is_normal_valued())
    }
}

impl<T: Scalar> Default for Mat3x2<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: Scalar> Mul for Mat3x2<T> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl<T: Scalar> fmt::Display for Mat3x2<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "[{}, {}, {}]", self.a(), self.c(), self.tx())?;
        write!(f, "[{}, {}, {}]", self.b(), self.d(), self.ty())
    }
}

impl<T: Scalar> From<Mat3x2<T>> for na::Matrix2x3<T> {
    #[inline]
    fn from(m: Mat3x2<T>) -> Self {
        na::Matrix2x3::from_column_slice(&m.el)
    }
}

impl<T: Scalar> From<na::Matrix2x3<T>> for Mat3x2<T> {
    #[inline]
    fn from(m: na::Matrix2x3<T>) -> Self {
        let mut el = [T::ZERO; 6];
        el.copy_from_slice(m.as_slice());
        Self { el }
    }
}

impl<T: Scalar> AbsDiffEq for Mat3x2<T> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.el
            .iter()
            .zip(other.el.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<T: Scalar> RelativeEq for Mat3x2<T> {
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        self.el
            .iter()
            .zip(other.el.iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
