#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::math::{Scalar, Vec2, REAL_EPS};

/// A 2D segment between two endpoints
///
/// Zero-length segments are allowed; their [`direction`](Line2::direction) is zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Line2<T> {
    pub pos_a: Vec2<T>,
    pub pos_b: Vec2<T>,
}

impl<T: Scalar> Line2<T> {
    #[inline]
    pub fn new(pos_a: Vec2<T>, pos_b: Vec2<T>) -> Self {
        Self { pos_a, pos_b }
    }

    #[inline]
    pub fn length(&self) -> T {
        (self.pos_b - self.pos_a).length()
    }

    /// Unit direction from `pos_a` to `pos_b`, safe-normalized
    #[inline]
    pub fn direction(&self) -> Vec2<T> {
        (self.pos_b - self.pos_a).normalized_safe()
    }

    /// Intersection of the lines through `self` and `other`, see [`line_intersect`]
    #[inline]
    pub fn intersect(&self, other: &Self, within_segments: bool) -> Option<Vec2<T>> {
        line_intersect(&self.pos_a, &self.pos_b, &other.pos_a, &other.pos_b, within_segments)
    }
}

/// Intersects the line through `a0, a1` with the line through `b0, b1`.
///
/// Returns `None` for parallel, non-colinear lines. With `within_segments`
/// set, an intersection outside either segment is also `None`.
///
/// Colinear, near-coincident input returns the midpoint of `a0, a1`
/// regardless of `within_segments`.
pub fn line_intersect<T: Scalar>(
    a0: &Vec2<T>,
    a1: &Vec2<T>,
    b0: &Vec2<T>,
    b1: &Vec2<T>,
    within_segments: bool,
) -> Option<Vec2<T>> {
    let da = *a1 - *a0;
    let db = *b1 - *b0;
    let d0 = *a0 - *b0;

    let denom = db.y * da.x - db.x * da.y;
    let ua_num = db.x * d0.y - db.y * d0.x;
    let ub_num = da.x * d0.y - da.y * d0.x;

    if ua_num.abs() < T::EPSILON && ub_num.abs() < T::EPSILON && denom.abs() < T::EPSILON {
        return Some(a0.average(a1));
    }

    if denom.abs() < T::from_f64(REAL_EPS) {
        return None;
    }

    let ua = ua_num / denom;
    if within_segments {
        let ub = ub_num / denom;
        let unit = |u: T| u >= T::ZERO && u <= T::ONE;
        if !unit(ua) || !unit(ub) {
            return None;
        }
    }

    Some(*a0 + da * ua)
}
