use std::fmt;
use std::num::FpCategory;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use approx::RelativeEq;

/// Floating point classification of a scalar value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FpClass {
    /// Not a number
    Nan,
    /// Positive or negative infinity
    Infinite,
    /// Non-zero value too small to be represented in normalized form
    Subnormal,
    /// Normalized non-zero value
    Normal,
    /// Positive or negative zero
    Zero,
}

impl FpClass {
    /// Returns a short human readable name for the class
    pub fn as_str(&self) -> &'static str {
        match self {
            FpClass::Nan => "NaN",
            FpClass::Infinite => "infinite",
            FpClass::Subnormal => "denormalized",
            FpClass::Normal => "normal",
            FpClass::Zero => "zero",
        }
    }
}

impl From<FpCategory> for FpClass {
    fn from(category: FpCategory) -> Self {
        match category {
            FpCategory::Nan => FpClass::Nan,
            FpCategory::Infinite => FpClass::Infinite,
            FpCategory::Subnormal => FpClass::Subnormal,
            FpCategory::Normal => FpClass::Normal,
            FpCategory::Zero => FpClass::Zero,
        }
    }
}

impl fmt::Display for FpClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric contract every kernel type is generic over.
///
/// Implemented for `f32` and `f64`. Any other number type (an arbitrary
/// precision rational, a fixed point type) can be used by implementing this
/// trait, which only asks for closed arithmetic, ordering, a square root, a
/// handful of trig functions and a precision query.
pub trait Scalar:
    Copy
    + fmt::Debug
    + fmt::Display
    + PartialOrd
    + Default
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + RelativeEq<Epsilon = Self>
    + Send
    + Sync
    + 'static
{
    const ZERO: Self;
    const ONE: Self;
    const TWO: Self;
    const HALF: Self;
    const PI: Self;
    /// Machine epsilon: the gap between 1 and the next representable value
    const EPSILON: Self;
    /// Largest finite value
    const MAX: Self;

    fn sqrt(self) -> Self;
    fn abs(self) -> Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn tan(self) -> Self;
    fn acos(self) -> Self;
    fn atan2(self, other: Self) -> Self;
    fn sin_cos(self) -> (Self, Self);
    fn min(self, other: Self) -> Self;
    fn max(self, other: Self) -> Self;

    fn from_f64(v: f64) -> Self;
    fn to_f64(self) -> f64;

    /// Floating point class of the value
    fn fp_class(self) -> FpClass;

    /// True iff the value is a normal number or zero (not NaN, infinite or subnormal)
    #[inline]
    fn is_normal_valued(self) -> bool {
        matches!(self.fp_class(), FpClass::Normal | FpClass::Zero)
    }
}

macro_rules! impl_scalar_float {
    ($t:ident) => {
        impl Scalar for $t {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const TWO: Self = 2.0;
            const HALF: Self = 0.5;
            const PI: Self = std::$t::consts::PI;
            const EPSILON: Self = $t::EPSILON;
            const MAX: Self = $t::MAX;

            #[inline] fn sqrt(self) -> Self { $t::sqrt(self) }
            #[inline] fn abs(self) -> Self { $t::abs(self) }
            #[inline] fn sin(self) -> Self { $t::sin(self) }
            #[inline] fn cos(self) -> Self { $t::cos(self) }
            #[inline] fn tan(self) -> Self { $t::tan(self) }
            #[inline] fn acos(self) -> Self { $t::acos(self) }
            #[inline] fn atan2(self, other: Self) -> Self { $t::atan2(self, other) }
            #[inline] fn sin_cos(self) -> (Self, Self) { $t::sin_cos(self) }
            #[inline] fn min(self, other: Self) -> Self { if self < other { self } else { other } }
            #[inline] fn max(self, other: Self) -> Self { if self > other { self } else { other } }

            #[inline] fn from_f64(v: f64) -> Self { v as $t }
            #[inline] fn to_f64(self) -> f64 { self as f64 }

            #[inline] fn fp_class(self) -> FpClass { FpClass::from($t::classify(self)) }
        }
    };
}

impl_scalar_float!(f32);
impl_scalar_float!(f64);
