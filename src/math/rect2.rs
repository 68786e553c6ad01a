use approx::{AbsDiffEq, RelativeEq};
use std::fmt;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::math::{Scalar, Vec2};

/// Axis-aligned rectangle given by its minimum and maximum corners
///
/// Valid iff `max >= min` on both axes. [`Rect2::invalid`] is the sentinel
/// `min = (1, 1), max = (0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Rect2<T> {
    /// Minimum corner of the rectangle
    pub min: Vec2<T>,

    /// Maximum corner of the rectangle
    pub max: Vec2<T>,
}

impl<T: Scalar> Rect2<T> {
    #[inline]
    pub fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self::from_min_max(Vec2::new(min_x, min_y), Vec2::new(max_x, max_y))
    }

    /// Creates a rectangle from minimum and maximum points
    #[inline]
    pub fn from_min_max(min: Vec2<T>, max: Vec2<T>) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn invalid() -> Self {
        let mut r = Self::default();
        r.invalidate();
        r
    }

    #[inline]
    pub fn set(&mut self, min: Vec2<T>, max: Vec2<T>) {
        self.min = min;
        self.max = max;
    }

    #[inline]
    pub fn set_zero(&mut self) {
        self.min.set_zero();
        self.max.set_zero();
    }

    #[inline]
    pub fn width(&self) -> T {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> T {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn size(&self) -> Vec2<T> {
        Vec2::new(self.width(), self.height())
    }

    /// Returns the center of the rectangle
    #[inline]
    pub fn center(&self) -> Vec2<T> {
        self.min.average(&self.max)
    }

    /// Corner picked per axis: `false` selects the min side, `true` the max side
    #[inline]
    pub fn corner_xy(&self, xi: bool, yi: bool) -> Vec2<T> {
        Vec2::new(
            if xi { self.max.x } else { self.min.x },
            if yi { self.max.y } else { self.min.y },
        )
    }

    /// Corner `i` in 0..4: `(min, min)`, `(max, min)`, `(max, max)`, `(min, max)`.
    ///
    /// That is upper-left first and then clockwise in a y-down frame.
    pub fn corner(&self, i: usize) -> Vec2<T> {
        debug_assert!(i < 4, "corner index out of range: {}", i);
        self.corner_xy(i == 1 || i == 2, i == 2 || i == 3)
    }

    /// Swaps min and max on any axis where they are inverted
    pub fn make_positive(&mut self) {
        if self.min.x > self.max.x {
            std::mem::swap(&mut self.min.x, &mut self.max.x);
        }
        if self.min.y > self.max.y {
            std::mem::swap(&mut self.min.y, &mut self.max.y);
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.width() >= T::ZERO && self.height() >= T::ZERO
    }

    #[inline]
    pub fn invalidate(&mut self) {
        self.min.set(T::ONE, T::ONE);
        self.max.set_zero();
    }

    /// Grows each side by `dx`/`dy` (shrinks for negative values).
    ///
    /// An axis that would invert collapses to its midpoint instead.
    pub fn expand(&mut self, dx: T, dy: T) {
        self.min.x -= dx;
        self.min.y -= dy;
        self.max.x += dx;
        self.max.y += dy;

        if self.min.x > self.max.x {
            let mid = (self.min.x + self.max.x) * T::HALF;
            self.min.x = mid;
            self.max.x = mid;
        }
        if self.min.y > self.max.y {
            let mid = (self.min.y + self.max.y) * T::HALF;
            self.min.y = mid;
            self.max.y = mid;
        }
    }

    /// Checks if this rectangle contains a point, edges included
    #[inline]
    pub fn contains_point(&self, p: &Vec2<T>) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Boolean-only overlap test; touching edges count as overlapping
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        !(self.min.x > other.max.x
            || self.min.y > other.max.y
            || self.max.x < other.min.x
            || self.max.y < other.min.y)
    }

    /// Overlap of two rectangles, or `None` if either is invalid or they are disjoint
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.is_valid() || !other.is_valid() || !self.intersects(other) {
            return None;
        }

        Some(Self::new(
            self.min.x.max(other.min.x),
            self.min.y.max(other.min.y),
            self.max.x.min(other.max.x),
            self.max.y.min(other.max.y),
        ))
    }

    /// Sets the rectangle swept by moving the axis-aligned segment `a -> b`
    /// `delta` units to its right.
    ///
    /// An upward vertical segment extrudes towards +x, a rightward
    /// horizontal one towards -y. For any other segment the rectangle is
    /// zeroed and `false` is returned.
    pub fn set_by_extruding_segment_to_right(&mut self, a: &Vec2<T>, b: &Vec2<T>, delta: T) -> bool {
        if a.x == b.x {
            let direction = if a.y < b.y { T::ONE } else { -T::ONE };
            let (x0, x1) = (a.x, a.x + direction * delta);
            self.min.set(x0.min(x1), a.y.min(b.y));
            self.max.set(x0.max(x1), a.y.max(b.y));
        } else if a.y == b.y {
            let direction = if a.x < b.x { -T::ONE } else { T::ONE };
            let (y0, y1) = (a.y, a.y + direction * delta);
            self.min.set(a.x.min(b.x), y0.min(y1));
            self.max.set(a.x.max(b.x), y0.max(y1));
        } else {
            self.set_zero();
            return false;
        }
        true
    }
}

/// Free-function form of [`Rect2::intersects`]
#[inline]
pub fn rect2_intersects<T: Scalar>(a: &Rect2<T>, b: &Rect2<T>) -> bool {
    a.intersects(b)
}

impl<T: Scalar> fmt::Display for Rect2<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{} .. {}]", self.min, self.max)
    }
}

impl<T: Scalar> AbsDiffEq for Rect2<T> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.min.abs_diff_eq(&other.min, epsilon) && self.max.abs_diff_eq(&other.max, epsilon)
    }
}

impl<T: Scalar> RelativeEq for Rect2<T> {
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        self.min.relative_eq(&other.min, epsilon, max_relative)
            && self.max.relative_eq(&other.max, epsilon, max_relative)
    }
}
