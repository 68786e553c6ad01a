use approx::{AbsDiffEq, RelativeEq};
use nalgebra as na;
use std::fmt;
use std::ops::{Mul, MulAssign};

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::config::Tolerances;
use crate::math::{Quat, Scalar, Vec3, DEGENERATE_DETERMINANT};

/// 3D affine matrix, 4 columns of 4 scalars, column-major.
///
/// Columns 0, 1 and 2 are the frame and column 3 is the translation.
/// Column vectors multiply on the right. A matrix that promotes a vector
/// into a more global space composes on the LEFT of a more local one.
///
/// The bottom row is `(0, 0, 0, 1)` by convention; nothing checks it, and
/// [`invert`](Self::invert) works on general 4x4 matrices.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Mat4x4<T> {
    el: [T; 16],
}

#[inline]
fn det2x2<T: Scalar>(a1: T, a2: T, b1: T, b2: T) -> T {
    a1 * b2 - b1 * a2
}

#[inline]
#[allow(clippy::too_many_arguments)]
fn det3x3<T: Scalar>(a1: T, a2: T, a3: T, b1: T, b2: T, b3: T, c1: T, c2: T, c3: T) -> T {
    a1 * det2x2(b2, b3, c2, c3) - b1 * det2x2(a2, a3, c2, c3) + c1 * det2x2(a2, a3, b2, b3)
}

impl<T: Scalar> Mat4x4<T> {
    /// Creates a matrix from 16 column-major elements
    #[inline]
    pub fn from_elements(el: [T; 16]) -> Self {
        Self { el }
    }

    #[inline]
    pub fn zero() -> Self {
        Self { el: [T::ZERO; 16] }
    }

    /// Creates the 4x4 identity matrix
    pub fn identity() -> Self {
        let mut m = Self::zero();
        m.set_identity();
        m
    }

    /// Resets all 16 elements to the identity
    pub fn set_identity(&mut self) {
        for (i, e) in self.el.iter_mut().enumerate() {
            *e = if i % 5 == 0 { T::ONE } else { T::ZERO };
        }
    }

    /// Element at column `col` and row `row`
    #[inline]
    pub fn at(&self, col: usize, row: usize) -> T {
        self.el[col * 4 + row]
    }

    #[inline]
    pub fn at_mut(&mut self, col: usize, row: usize) -> &mut T {
        &mut self.el[col * 4 + row]
    }

    /// First three rows of column `col`
    #[inline]
    pub fn col(&self, col: usize) -> Vec3<T> {
        Vec3::new(self.at(col, 0), self.at(col, 1), self.at(col, 2))
    }

    /// Writes a frame column and zeroes its w row
    #[inline]
    pub fn set_frame_col(&mut self, col: usize, v: &Vec3<T>) {
        self.set_frame_col_xyz(col, v.x, v.y, v.z);
    }

    #[inline]
    pub fn set_frame_col_xyz(&mut self, col: usize, x: T, y: T, z: T) {
        *self.at_mut(col, 0) = x;
        *self.at_mut(col, 1) = y;
        *self.at_mut(col, 2) = z;
        *self.at_mut(col, 3) = T::ZERO;
    }

    pub fn set_frame(&mut self, x: &Vec3<T>, y: &Vec3<T>, z: &Vec3<T>) {
        self.set_frame_col(0, x);
        self.set_frame_col(1, y);
        self.set_frame_col(2, z);
    }

    /// Writes column 3 as `(t, 1)`
    #[inline]
    pub fn set_translation(&mut self, t: &Vec3<T>) {
        *self.at_mut(3, 0) = t.x;
        *self.at_mut(3, 1) = t.y;
        *self.at_mut(3, 2) = t.z;
        *self.at_mut(3, 3) = T::ONE;
    }

    #[inline]
    pub fn translation(&self) -> Vec3<T> {
        self.col(3)
    }

    /// Flat column-major storage, ready for a graphics API
    #[inline]
    pub fn as_slice(&self) -> &[T; 16] {
        &self.el
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.el.as_ptr()
    }

    pub fn transpose(&self) -> Self {
        let mut out = Self::zero();
        for col in 0..4 {
            for row in 0..4 {
                *out.at_mut(col, row) = self.at(row, col);
            }
        }
        out
    }

    /// True iff the frame columns are unit length and mutually orthogonal within `tolerance`
    pub fn is_orthonormal(&self, tolerance: T) -> bool {
        let (x, y, z) = (self.col(0), self.col(1), self.col(2));
        let near = |v: T, target: T| (v - target).abs() <= tolerance;
        near(x.length_squared(), T::ONE)
            && near(y.length_squared(), T::ONE)
            && near(z.length_squared(), T::ONE)
            && near(x.dot(&y), T::ZERO)
            && near(y.dot(&z), T::ZERO)
            && near(z.dot(&x), T::ZERO)
    }

    /// [`is_orthonormal`](Self::is_orthonormal) using the configured orthonormal tolerance
    pub fn is_orthonormal_within(&self, tolerances: &Tolerances) -> bool {
        self.is_orthonormal(T::from_f64(tolerances.orthonormal))
    }

    /// In-place inverse of a rigid transform.
    ///
    /// Transposes the rotation block and rewrites the translation as
    /// `-R^T * t`. Only valid when the frame is orthonormal, which is checked
    /// in debug builds only.
    pub fn invert_ortho_normal_transform(&mut self) {
        debug_assert!(
            self.is_orthonormal_within(&Tolerances::default()),
            "frame is not orthonormal"
        );

        self.el.swap(4, 1);
        self.el.swap(8, 2);
        self.el.swap(9, 6);

        let t = self.translation();
        let new_translation = -self.transform_vector(&t);
        self.set_translation(&new_translation);
    }

    // Cofactor expansion after nVidia's nv_algebra; transpose of the cofactor matrix
    fn adjugate(&self) -> [T; 16] {
        let m = |col: usize, row: usize| self.el[col * 4 + row];
        [
            det3x3(m(1, 1), m(1, 2), m(1, 3), m(2, 1), m(2, 2), m(2, 3), m(3, 1), m(3, 2), m(3, 3)),
            -det3x3(m(0, 1), m(0, 2), m(0, 3), m(2, 1), m(2, 2), m(2, 3), m(3, 1), m(3, 2), m(3, 3)),
            det3x3(m(0, 1), m(0, 2), m(0, 3), m(1, 1), m(1, 2), m(1, 3), m(3, 1), m(3, 2), m(3, 3)),
            -det3x3(m(0, 1), m(0, 2), m(0, 3), m(1, 1), m(1, 2), m(1, 3), m(2, 1), m(2, 2), m(2, 3)),
            -det3x3(m(1, 0), m(1, 2), m(1, 3), m(2, 0), m(2, 2), m(2, 3), m(3, 0), m(3, 2), m(3, 3)),
            det3x3(m(0, 0), m(0, 2), m(0, 3), m(2, 0), m(2, 2), m(2, 3), m(3, 0), m(3, 2), m(3, 3)),
            -det3x3(m(0, 0), m(0, 2), m(0, 3), m(1, 0), m(1, 2), m(1, 3), m(3, 0), m(3, 2), m(3, 3)),
            det3x3(m(0, 0), m(0, 2), m(0, 3), m(1, 0), m(1, 2), m(1, 3), m(2, 0), m(2, 2), m(2, 3)),
            det3x3(m(1, 0), m(1, 1), m(1, 3), m(2, 0), m(2, 1), m(2, 3), m(3, 0), m(3, 1), m(3, 3)),
            -det3x3(m(0, 0), m(0, 1), m(0, 3), m(2, 0), m(2, 1), m(2, 3), m(3, 0), m(3, 1), m(3, 3)),
            det3x3(m(0, 0), m(0, 1), m(0, 3), m(1, 0), m(1, 1), m(1, 3), m(3, 0), m(3, 1), m(3, 3)),
            -det3x3(m(0, 0), m(0, 1), m(0, 3), m(1, 0), m(1, 1), m(1, 3), m(2, 0), m(2, 1), m(2, 3)),
            -det3x3(m(1, 0), m(1, 1), m(1, 2), m(2, 0), m(2, 1), m(2, 2), m(3, 0), m(3, 1), m(3, 2)),
            det3x3(m(0, 0), m(0, 1), m(0, 2), m(2, 0), m(2, 1), m(2, 2), m(3, 0), m(3, 1), m(3, 2)),
            -det3x3(m(0, 0), m(0, 1), m(0, 2), m(1, 0), m(1, 1), m(1, 2), m(3, 0), m(3, 1), m(3, 2)),
            det3x3(m(0, 0), m(0, 1), m(0, 2), m(1, 0), m(1, 1), m(1, 2), m(2, 0), m(2, 1), m(2, 2)),
        ]
    }

    #[inline]
    fn det_from_adjugate(&self, adj: &[T; 16]) -> T {
        self.at(0, 0) * adj[0] + self.at(1, 0) * adj[1] + self.at(2, 0) * adj[2] + self.at(3, 0) * adj[3]
    }

    pub fn determinant(&self) -> T {
        self.det_from_adjugate(&self.adjugate())
    }

    /// Full 4x4 inverse by cofactor expansion.
    ///
    /// A determinant within machine epsilon of zero is replaced by
    /// `±1e-6` (positive for an exact zero), so singular input still gives
    /// finite, if meaningless, elements.
    pub fn invert(&self) -> Self {
        let mut adj = self.adjugate();
        let mut det = self.det_from_adjugate(&adj);

        if det + T::EPSILON >= T::ZERO && det - T::EPSILON <= T::ZERO {
            let sign = if det < T::ZERO { -T::ONE } else { T::ONE };
            log::trace!("clamping near-singular determinant {}", det);
            det = sign * T::from_f64(DEGENERATE_DETERMINANT);
        }

        let det_inv = T::ONE / det;
        for e in adj.iter_mut() {
            *e *= det_inv;
        }
        Self { el: adj }
    }

    /// Writes `a * b` into `out`.
    ///
    /// `out` is filled element by element, so it must not overlap either
    /// input; the exclusive borrow makes that a compile-time guarantee.
    pub fn mul_into(out: &mut Self, a: &Self, b: &Self) {
        for col in 0..4 {
            for row in 0..4 {
                let mut sum = T::ZERO;
                for k in 0..4 {
                    sum += a.at(k, row) * b.at(col, k);
                }
                *out.at_mut(col, row) = sum;
            }
        }
    }

    /// `self * other` into a fresh matrix
    pub fn multiply(&self, other: &Self) -> Self {
        let mut out = Self::zero();
        Self::mul_into(&mut out, self, other);
        out
    }

    /// Transforms a position (applies translation, drops w)
    pub fn transform_point(&self, v: &Vec3<T>) -> Vec3<T> {
        let e = &self.el;
        Vec3::new(
            e[0] * v.x + e[4] * v.y + e[8] * v.z + e[12],
            e[1] * v.x + e[5] * v.y + e[9] * v.z + e[13],
            e[2] * v.x + e[6] * v.y + e[10] * v.z + e[14],
        )
    }

    /// Transforms a position and also returns the homogeneous w
    pub fn transform_point_w(&self, v: &Vec3<T>) -> (Vec3<T>, T) {
        let e = &self.el;
        let w = e[3] * v.x + e[7] * v.y + e[11] * v.z + e[15];
        (self.transform_point(v), w)
    }

    /// Transforms a direction (ignores translation)
    pub fn transform_vector(&self, v: &Vec3<T>) -> Vec3<T> {
        let e = &self.el;
        Vec3::new(
            e[0] * v.x + e[4] * v.y + e[8] * v.z,
            e[1] * v.x + e[5] * v.y + e[9] * v.z,
            e[2] * v.x + e[6] * v.y + e[10] * v.z,
        )
    }

    /// Rigid pose matrix from a position and a unit quaternion
    pub fn from_pos_rot(pos: &Vec3<T>, q: &Quat<T>) -> Self {
        let two = T::TWO;
        let (x2, y2, z2) = (q.x * q.x, q.y * q.y, q.z * q.z);
        let (xy, xz, yz) = (q.x * q.y, q.x * q.z, q.y * q.z);
        let (wx, wy, wz) = (q.w * q.x, q.w * q.y, q.w * q.z);

        let mut out = Self::zero();
        out.set_frame_col_xyz(0, T::ONE - two * (y2 + z2), two * (xy + wz), two * (xz - wy));
        out.set_frame_col_xyz(1, two * (xy - wz), T::ONE - two * (x2 + z2), two * (yz + wx));
        out.set_frame_col_xyz(2, two * (xz + wy), two * (yz - wx), T::ONE - two * (x2 + y2));
        out.set_translation(pos);
        out
    }

    /// Camera pose at `origin` looking along `direction`.
    ///
    /// Convention is x right, y forward, z up: `direction` goes into
    /// column 1 as given (not normalized), column 0 is
    /// `normalize(direction x up)` and column 2 is `right x direction`.
    pub fn look_at(origin: &Vec3<T>, direction: &Vec3<T>, up: &Vec3<T>) -> Self {
        let right = direction.cross(up).normalized();
        let t_up = right.cross(direction);
        let mut out = Self::zero();
        out.set_frame(&right, direction, &t_up);
        out.set_translation(origin);
        out
    }

    /// Parallel projection, as `glOrtho`
    pub fn ortho(left: T, right: T, bottom: T, top: T, z_near: T, z_far: T) -> Self {
        let mut out = Self::zero();
        out.el[0] = T::TWO / (right - left);
        out.el[5] = T::TWO / (top - bottom);
        out.el[10] = -T::TWO / (z_far - z_near);
        out.el[12] = -(right + left) / (right - left);
        out.el[13] = -(top + bottom) / (top - bottom);
        out.el[14] = -(z_far + z_near) / (z_far - z_near);
        out.el[15] = T::ONE;
        out
    }

    /// Symmetric perspective projection, `fovy` in degrees
    pub fn perspective(fovy_degrees: T, aspect_ratio: T, z_near: T, z_far: T) -> Self {
        let ymax = z_near * (fovy_degrees * T::PI / T::from_f64(360.0)).tan();
        let xmax = ymax * aspect_ratio;
        Self::frustum(-xmax, xmax, -ymax, ymax, z_near, z_far)
    }

    /// Perspective projection, as `glFrustum`
    pub fn frustum(left: T, right: T, bottom: T, top: T, z_near: T, z_far: T) -> Self {
        let temp = T::TWO * z_near;
        let width = right - left;
        let height = top - bottom;
        let depth = z_far - z_near;

        let mut out = Self::zero();
        out.el[0] = temp / width;
        out.el[5] = temp / height;
        out.el[8] = (right + left) / width;
        out.el[9] = (top + bottom) / height;
        out.el[10] = (-z_far - z_near) / depth;
        out.el[11] = -T::ONE;
        out.el[14] = (-temp * z_far) / depth;
        out
    }

    /// Maps normalized device x, y in [-1, 1] onto a window rectangle
    pub fn viewport(left: T, bottom: T, width: T, height: T) -> Self {
        let half_w = width * T::HALF;
        let half_h = height * T::HALF;

        let mut out = Self::zero();
        *out.at_mut(0, 0) = half_w;
        *out.at_mut(1, 1) = half_h;
        *out.at_mut(2, 2) = T::ONE;
        *out.at_mut(3, 0) = half_w + left;
        *out.at_mut(3, 1) = half_h + bottom;
        *out.at_mut(3, 3) = T::ONE;
        out
    }

    /// True iff every element is a normal number or zero
    pub fn is_normal_valued(&self) -> bool {
        self.el.iter().all(|e| e.is_normal_valued())
    }
}

impl<T: Scalar> Default for Mat4x4<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: Scalar> Mul for Mat4x4<T> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl<T: Scalar> MulAssign for Mat4x4<T> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.multiply(&rhs);
    }
}

impl<T: Scalar> fmt::Display for Mat4x4<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..4 {
            writeln!(
                f,
                "[{}, {}, {}, {}]",
                self.at(0, row),
                self.at(1, row),
                self.at(2, row),
                self.at(3, row)
            )?;
        }
        Ok(())
    }
}

impl<T: Scalar> From<Mat4x4<T>> for na::Matrix4<T> {
    #[inline]
    fn from(m: Mat4x4<T>) -> Self {
        na::Matrix4::from_column_slice(&m.el)
    }
}

impl<T: Scalar> From<na::Matrix4<T>> for Mat4x4<T> {
    #[inline]
    fn from(m: na::Matrix4<T>) -> Self {
        let mut el = [T::ZERO; 16];
        el.copy_from_slice(m.as_slice());
        Self { el }
    }
}

impl<T: Scalar> AbsDiffEq for Mat4x4<T> {
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

impl<T: Scalar> RelativeEq for Mat4x4<T> {
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
