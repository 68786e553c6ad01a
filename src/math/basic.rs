//! Scalar helpers shared by the vector and matrix modules.

use crate::math::Scalar;

/// Clamps a value between a minimum and maximum value
#[inline]
pub fn clamp<T: PartialOrd>(val: T, min: T, max: T) -> T {
    if val < min {
        return min;
    }
    if val > max {
        return max;
    }
    val
}

/// Returns the smaller of two values (`b` on ties or unordered input)
#[inline]
pub fn min<T: PartialOrd>(a: T, b: T) -> T {
    if a < b { a } else { b }
}

/// Returns the larger of two values (`b` on ties or unordered input)
#[inline]
pub fn max<T: PartialOrd>(a: T, b: T) -> T {
    if a > b { a } else { b }
}

/// Returns -1, 0 or 1 according to the sign of `a`
#[inline]
pub fn sign<T: Scalar>(a: T) -> T {
    if a == T::ZERO {
        T::ZERO
    } else if a < T::ZERO {
        -T::ONE
    } else {
        T::ONE
    }
}

#[inline]
pub fn sqr<T: Scalar>(x: T) -> T {
    x * x
}

/// Affine interpolation `(1-t)*a + t*b`. `t` is not clamped.
#[inline]
pub fn lerp<T: Scalar>(a: T, b: T, t: T) -> T {
    (T::ONE - t) * a + t * b
}

/// Hermite smooth step of `x` across `[mn, mx]`
pub fn smooth_step<T: Scalar>(mn: T, mx: T, x: T) -> T {
    let x = (clamp(x, mn, mx) - mn) / (mx - mn);
    let x2 = x * x;
    let x3 = x2 * x;
    T::from_f64(3.0) * x2 - T::TWO * x3
}

/// Converts degrees to radians
#[inline]
pub fn deg_to_rad<T: Scalar>(degrees: T) -> T {
    degrees * T::PI / T::from_f64(180.0)
}

/// Converts radians to degrees
#[inline]
pub fn rad_to_deg<T: Scalar>(radians: T) -> T {
    radians * T::from_f64(180.0) / T::PI
}

/// Inclusive range test
#[inline]
pub fn is_in_range<T: PartialOrd>(x: T, min: T, max: T) -> bool {
    x >= min && x <= max
}

/// Name of the floating point class of `x`, e.g. "denormalized"
pub fn fp_class_name<T: Scalar>(x: T) -> &'static str {
    x.fp_class().as_str()
}

/// Greatest common divisor (Euclid). `gcd(0, b) == b`.
pub fn gcd(mut a: i32, mut b: i32) -> i32 {
    loop {
        if a == 0 {
            return b;
        }
        b %= a;
        if b == 0 {
            return a;
        }
        a %= b;
    }
}

/// Least common multiple; 0 when both inputs are 0
pub fn lcm(a: i32, b: i32) -> i32 {
    let temp = gcd(a, b);
    if temp != 0 { a / temp * b } else { 0 }
}

/// Euclidean modulo: projects `a` into `[0, |b|)`.
///
/// ```
/// use affine_kernel::math::basic::modulo;
/// assert_eq!(modulo(11, 10), 1);
/// assert_eq!(modulo(-11, 10), 9);
/// assert_eq!(modulo(11, -10), 1);
/// assert_eq!(modulo(-11, -10), 9);
/// ```
#[inline]
pub fn modulo(a: i32, b: i32) -> i32 {
    debug_assert!(b != 0, "zero divisor in modulo");
    a.rem_euclid(b)
}

#[inline]
pub fn is_odd(n: i32) -> bool {
    n & 1 != 0
}

/// Smallest power of two that is `>= v`. Powers of two map to themselves; 0 maps to 0.
pub fn next_pow2(v: u32) -> u32 {
    let mut v = v.wrapping_sub(1);
    v |= v >> 1;
    v |= v >> 2;
    v |= v >> 4;
    v |= v >> 8;
    v |= v >> 16;
    v.wrapping_add(1)
}

/// Integer logarithm base 2 of the nearest power of two not above `v`,
/// i.e. `log2i(3) == 1`, `log2i(4) == 2`
pub fn log2i(v: u32) -> u32 {
    debug_assert!(v != 0, "log2i of zero");
    let mut v = v;
    let mut pow_two = 0;
    loop {
        v >>= 1;
        if v == 0 {
            break;
        }
        pow_two += 1;
    }
    pow_two
}

/// Rounds to the nearest integer for positive inputs.
/// Negative inputs round toward zero after the half offset, so -1.7 becomes -1.
#[inline]
pub fn round_to_positive_int<T: Scalar>(x: T) -> i32 {
    (x + T::HALF).to_f64() as i32
}

/// True for the four axis-aligned orientations 0, 90, 180 and 270
pub fn is_normal_cardinal_orientation_degrees(degrees: i32) -> bool {
    matches!(degrees, 0 | 90 | 180 | 270)
}
