use approx::{AbsDiffEq, RelativeEq};
use nalgebra as na;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::config::Tolerances;
use crate::math::{basic, Mat4x4, Scalar, Vec3, SLERP_LINEAR_THRESHOLD};

/// Quaternion `xi + yj + zk + w`
///
/// Stored vector part first, so the raw layout is `[x, y, z, w]`.
/// Represents a rotation when unit length. Nothing here renormalizes
/// implicitly; callers keep rotations near unit length themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct Quat<T> {
    pub x: T,
    pub y: T,
    pub z: T,
    pub w: T,
}

impl<T: Scalar> Quat<T> {
    /// Creates a new quaternion from vector part `(x, y, z)` and scalar part `w`
    #[inline]
    pub fn new(x: T, y: T, z: T, w: T) -> Self {
        Self { x, y, z, w }
    }

    #[inline]
    pub fn from_vector(v: Vec3<T>, w: T) -> Self {
        Self::new(v.x, v.y, v.z, w)
    }

    /// Creates an identity quaternion (no rotation)
    #[inline]
    pub fn identity() -> Self {
        Self::new(T::ZERO, T::ZERO, T::ZERO, T::ONE)
    }

    #[inline]
    pub fn set_identity(&mut self) {
        *self = Self::identity();
    }

    #[inline]
    pub fn set(&mut self, x: T, y: T, z: T, w: T) {
        *self = Self::new(x, y, z, w);
    }

    /// The vector part `(x, y, z)`
    #[inline]
    pub fn vector(&self) -> Vec3<T> {
        Vec3::new(self.x, self.y, self.z)
    }

    #[inline]
    pub fn set_vector(&mut self, v: Vec3<T>) {
        self.x = v.x;
        self.y = v.y;
        self.z = v.z;
    }

    /// Four-component dot product
    #[inline]
    pub fn dot(&self, other: &Self) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    #[inline]
    pub fn length_squared(&self) -> T {
        self.dot(self)
    }

    #[inline]
    pub fn length(&self) -> T {
        self.length_squared().sqrt()
    }

    /// Divides by the length in place; the zero quaternion becomes NaN
    #[inline]
    pub fn normalize(&mut self) {
        let len = self.length();
        *self /= len;
    }

    #[inline]
    pub fn normalize_safe(&mut self, eps: T) {
        let len = self.length();
        *self /= len + eps;
    }

    #[inline]
    pub fn normalized(&self) -> Self {
        let mut q = *self;
        q.normalize();
        q
    }

    #[inline]
    pub fn normalized_safe(&self, eps: T) -> Self {
        let mut q = *self;
        q.normalize_safe(eps);
        q
    }

    /// Returns the conjugate, which is the inverse for unit quaternions
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Hamilton product `self * other`. Not commutative.
    pub fn product(&self, other: &Self) -> Self {
        let (a, b) = (self.vector(), other.vector());
        let w = self.w * other.w - a.dot(&b);
        let v = b * self.w + a * other.w + a.cross(&b);
        Self::from_vector(v, w)
    }

    /// Sum that flips `other` into the same hemisphere as `self` first.
    ///
    /// A cheap pre-step for blending rotations without going the long way
    /// around the double cover.
    #[inline]
    pub fn add_hemisphere(&self, other: &Self) -> Self {
        if self.dot(other) < T::ZERO {
            *self - *other
        } else {
            *self + *other
        }
    }

    /// Spherical linear interpolation along the shorter arc.
    ///
    /// Falls back to linear interpolation of the coefficients when the
    /// operands are nearly parallel (`1 - cos < 1e-4`). The result is not
    /// renormalized.
    pub fn slerp(q1: &Self, q2: &Self, t: T) -> Self {
        let mut sign = T::ONE;
        let mut cosang = basic::clamp(q1.dot(q2), -T::ONE, T::ONE);
        if cosang < T::ZERO {
            cosang = -cosang;
            sign = -T::ONE;
        }

        let (s1, s2) = if T::ONE - cosang > T::from_f64(SLERP_LINEAR_THRESHOLD) {
            let ang = cosang.acos();
            let inv_sin_ang = T::ONE / ang.sin();
            (((T::ONE - t) * ang).sin() * inv_sin_ang, (t * ang).sin() * inv_sin_ang)
        } else {
            (T::ONE - t, t)
        };

        *q1 * (sign * s1) + *q2 * s2
    }

    /// Shortest-arc rotation taking direction `a` onto direction `b`.
    ///
    /// Parallel inputs (vanishing cross product, same direction) give the
    /// identity. Anti-parallel inputs, or nearly anti-parallel ones whose
    /// combined scale `|a||b| + a.b` underflows, give a half turn about an
    /// axis perpendicular to `a`.
    pub fn between(a: &Vec3<T>, b: &Vec3<T>) -> Self {
        let axis = a.cross(b);
        if axis.length_squared() < T::EPSILON {
            if a.dot(b) >= T::ZERO {
                log::debug!("rotation between parallel vectors, using identity");
                return Self::identity();
            }
            log::debug!("rotation between opposite vectors, using half turn");
            return Self::from_vector(a.any_perpendicular(), T::ZERO).normalized();
        }

        let len = (a.length_squared() * b.length_squared()).sqrt() + a.dot(b);
        if len < T::EPSILON {
            log::debug!("rotation between anti-parallel vectors, using half turn");
            return Self::from_vector(a.any_perpendicular(), T::ZERO).normalized();
        }

        Self::from_vector(axis, len).normalized()
    }

    /// Rotates `v` by conjugation `q * (v, 0) * q^-1`. Requires a unit quaternion.
    pub fn rotate_vec(&self, v: &Vec3<T>) -> Vec3<T> {
        let qc = self.conjugate();
        self.product(&Self::from_vector(*v, T::ZERO).product(&qc)).vector()
    }

    /// Rotation of `radians` about the unit `axis`. The axis is not normalized.
    pub fn from_axis_angle(axis: &Vec3<T>, radians: T) -> Self {
        let (s, c) = (T::HALF * radians).sin_cos();
        Self::from_vector(*axis * s, c)
    }

    /// Decomposes a unit quaternion into `(axis, angle)`.
    ///
    /// A zero vector part yields axis `(1, 0, 0)` and angle 0.
    pub fn to_axis_angle(&self) -> (Vec3<T>, T) {
        let sq_len = self.vector().length_squared();
        if sq_len > T::ZERO {
            let angle = T::TWO * basic::clamp(self.w, -T::ONE, T::ONE).acos();
            let inv_len = T::ONE / sq_len.sqrt();
            (self.vector() * inv_len, angle)
        } else {
            (Vec3::unit_x(), T::ZERO)
        }
    }

    /// Rotation whose matrix has the orthonormal frame `e0, e1, e2` as columns.
    ///
    /// Shoemake's method: uses the trace when it is positive, otherwise
    /// pivots on the largest diagonal element to keep the square root
    /// well away from zero.
    pub fn from_axes(e0: &Vec3<T>, e1: &Vec3<T>, e2: &Vec3<T>) -> Self {
        // m[i][j] is component j of axis i
        let m = [*e0, *e1, *e2];
        let tr = m[0][0] + m[1][1] + m[2][2];

        if tr > T::ZERO {
            // |w| > 1/2
            let root = (tr + T::ONE).sqrt();
            let w = T::HALF * root;
            let root = T::HALF / root;
            Self::new(
                (m[1][2] - m[2][1]) * root,
                (m[2][0] - m[0][2]) * root,
                (m[0][1] - m[1][0]) * root,
                w,
            )
        } else {
            // |w| <= 1/2
            const NEXT: [usize; 3] = [1, 2, 0];
            let mut i = 0;
            if m[1][1] > m[0][0] {
                i = 1;
            }
            if m[2][2] > m[i][i] {
                i = 2;
            }
            let j = NEXT[i];
            let k = NEXT[j];

            let root = (m[i][i] - m[j][j] - m[k][k] + T::ONE).sqrt();
            let mut v = Vec3::zero();
            v[i] = T::HALF * root;
            let root = T::HALF / root;
            v[j] = (m[i][j] + m[j][i]) * root;
            v[k] = (m[i][k] + m[k][i]) * root;
            Self::from_vector(v, (m[j][k] - m[k][j]) * root)
        }
    }

    /// [`from_axes`](Self::from_axes) over the first three columns of a pose matrix
    pub fn from_mat4x4_frame(m: &Mat4x4<T>) -> Self {
        Self::from_axes(&m.col(0), &m.col(1), &m.col(2))
    }

    /// True iff the squared length is within `tolerance` of 1
    pub fn is_unit(&self, tolerance: T) -> bool {
        (self.length_squared() - T::ONE).abs() <= tolerance
    }

    pub fn is_unit_within(&self, tolerances: &Tolerances) -> bool {
        self.is_unit(T::from_f64(tolerances.unit_length))
    }

    /// True iff every component is a normal number or zero
    #[inline]
    pub fn is_normal_valued(&self) -> bool {
        self.vector().is_normal_valued() && self.w.is_normal_valued()
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        &self.x
    }
}

impl<T: Scalar> Default for Quat<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: Scalar> fmt::Display for Quat<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {}, {}; {})", self.x, self.y, self.z, self.w)
    }
}

impl<T: Scalar> From<na::Quaternion<T>> for Quat<T> {
    #[inline]
    fn from(q: na::Quaternion<T>) -> Self {
        // nalgebra stores its coordinates as [i, j, k, w]
        Self::new(q.coords[0], q.coords[1], q.coords[2], q.coords[3])
    }
}

impl<T: Scalar> From<Quat<T>> for na::Quaternion<T> {
    #[inline]
    fn from(q: Quat<T>) -> Self {
        na::Quaternion {
            coords: na::Vector4::new(q.x, q.y, q.z, q.w),
        }
    }
}

impl<T: Scalar> Add for Quat<T> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w)
    }
}

impl<T: Scalar> Sub for Quat<T> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z, self.w - rhs.w)
    }
}

impl<T: Scalar> Neg for Quat<T> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl<T: Scalar> Mul<T> for Quat<T> {
    type Output = Self;
    #[inline]
    fn mul(self, s: T) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s, self.w * s)
    }
}

/// Hamilton product
impl<T: Scalar> Mul for Quat<T> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.product(&rhs)
    }
}

impl<T: Scalar> Div<T> for Quat<T> {
    type Output = Self;
    #[inline]
    fn div(self, s: T) -> Self {
        Self::new(self.x / s, self.y / s, self.z / s, self.w / s)
    }
}

impl<T: Scalar> AddAssign for Quat<T> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Scalar> SubAssign for Quat<T> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Scalar> MulAssign<T> for Quat<T> {
    #[inline]
    fn mul_assign(&mut self, s: T) {
        *self = *self * s;
    }
}

impl<T: Scalar> DivAssign<T> for Quat<T> {
    #[inline]
    fn div_assign(&mut self, s: T) {
        *self = *self / s;
    }
}

impl<T: Scalar> AbsDiffEq for Quat<T> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
            && self.w.abs_diff_eq(&other.w, epsilon)
    }
}

impl<T: Scalar> RelativeEq for Quat<T> {
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
            && self.w.relative_eq(&other.w, epsilon, max_relative)
    }
}

/// Rigid pose: a rotation followed by a translation.
/// Equivalent to a [`Mat4x4`] built with [`Mat4x4::from_pos_rot`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct PosQuat<T> {
    pub rot: Quat<T>,
    pub pos: Vec3<T>,
}

impl<T: Scalar> PosQuat<T> {
    #[inline]
    pub fn new(pos: Vec3<T>, rot: Quat<T>) -> Self {
        Self { rot, pos }
    }

    #[inline]
    pub fn identity() -> Self {
        Self::new(Vec3::zero(), Quat::identity())
    }

    /// Inverse pose; `rot` must be unit length
    pub fn invert(&self) -> Self {
        let rot = self.rot.conjugate();
        let pos = -rot.rotate_vec(&self.pos);
        Self { rot, pos }
    }

    /// Rotates then translates a point
    #[inline]
    pub fn transform_point(&self, p: &Vec3<T>) -> Vec3<T> {
        self.rot.rotate_vec(p) + self.pos
    }

    #[inline]
    pub fn to_mat4x4(&self) -> Mat4x4<T> {
        Mat4x4::from_pos_rot(&self.pos, &self.rot)
    }
}

impl<T: Scalar> Default for PosQuat<T> {
    fn default() -> Self {
        Self::identity()
    }
}
