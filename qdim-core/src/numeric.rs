//! Numeric backends for [`crate::Quantity`].
//!
//! [`Numeric`] is what every quantity needs: field arithmetic, ordering, rounding and a way to apply a
//! [`ConversionFactor`]. It is implemented for `f32`, `f64` and [`Rational64`]; the rational backend keeps
//! conversions along the exact track exact. [`Real`] adds the transcendental functions and is implemented for
//! the two float types only.

use crate::factor::{ratio_to_f64, ConversionFactor};
use core::fmt::Debug;
use num_rational::Rational64;
use num_traits::{CheckedMul, Num, One, Signed};

/// Scalar types a quantity can carry.
pub trait Numeric: Clone + Debug + PartialOrd + Num + Signed {
    /// Multiplies by `factor`, applying the exact track as numerator/denominator so exact conversions stay exact
    /// whenever the backend can represent the result.
    fn apply_factor(self, factor: &ConversionFactor) -> Self;

    /// Lossy conversion to `f64`.
    fn to_f64(&self) -> f64;

    /// Largest integer not greater than the value.
    fn floor(&self) -> Self;

    /// Smallest integer not less than the value.
    fn ceil(&self) -> Self;

    /// Nearest integer, ties away from zero.
    fn round(&self) -> Self;

    /// Integer part.
    fn trunc(&self) -> Self;

    /// Whether the value is neither infinite nor NaN.
    fn is_finite(&self) -> bool;

    /// Whether the value is infinite.
    fn is_infinite(&self) -> bool;

    /// Whether the value is NaN.
    fn is_nan(&self) -> bool;

    /// Whether the sign bit is set (true for `-0.0`).
    fn signbit(&self) -> bool;

    /// Integer power.
    fn powi(&self, n: i32) -> Self;

    /// `self * a + b`, fused where the backend supports it.
    fn mul_add(self, a: Self, b: Self) -> Self {
        self * a + b
    }

    /// Floored remainder: the result takes the sign of `rhs`.
    fn modulo(self, rhs: Self) -> Self {
        let r = self % rhs.clone();
        if !r.is_zero() && r.is_negative() != rhs.is_negative() {
            r + rhs
        } else {
            r
        }
    }

    /// Quotient rounded toward zero.
    fn div_trunc(self, rhs: Self) -> Self {
        let r = self.clone() % rhs.clone();
        ((self - r) / rhs).round()
    }

    /// Quotient rounded toward negative infinity.
    fn div_floor(self, rhs: Self) -> Self {
        let m = self.clone().modulo(rhs.clone());
        ((self - m) / rhs).round()
    }

    /// Quotient rounded toward positive infinity.
    fn div_ceil(self, rhs: Self) -> Self {
        -((-self).div_floor(rhs))
    }
}

/// Floating-point backends: roots, real powers and transcendental functions.
pub trait Real: Numeric + Copy {
    /// Lossy conversion from `f64`.
    fn from_f64(v: f64) -> Self;
    /// Square root.
    fn sqrt(self) -> Self;
    /// Cube root.
    fn cbrt(self) -> Self;
    /// Real power.
    fn powf(self, e: Self) -> Self;
    /// `sqrt(self² + other²)` without undue overflow.
    fn hypot(self, other: Self) -> Self;
    /// Four-quadrant arctangent of `self / x`.
    fn atan2(self, x: Self) -> Self;
    /// Sine.
    fn sin(self) -> Self;
    /// Cosine.
    fn cos(self) -> Self;
    /// Tangent.
    fn tan(self) -> Self;
    /// Arcsine.
    fn asin(self) -> Self;
    /// Arccosine.
    fn acos(self) -> Self;
    /// Arctangent.
    fn atan(self) -> Self;
    /// Hyperbolic sine.
    fn sinh(self) -> Self;
    /// Hyperbolic cosine.
    fn cosh(self) -> Self;
    /// Hyperbolic tangent.
    fn tanh(self) -> Self;
    /// Inverse hyperbolic sine.
    fn asinh(self) -> Self;
    /// Inverse hyperbolic cosine.
    fn acosh(self) -> Self;
    /// Inverse hyperbolic tangent.
    fn atanh(self) -> Self;
    /// `e^self`.
    fn exp(self) -> Self;
    /// `2^self`.
    fn exp2(self) -> Self;
    /// `e^self - 1`, accurate near zero.
    fn exp_m1(self) -> Self;
    /// Natural logarithm.
    fn ln(self) -> Self;
    /// `ln(1 + self)`, accurate near zero.
    fn ln_1p(self) -> Self;
    /// Base-10 logarithm.
    fn log10(self) -> Self;
    /// Base-2 logarithm.
    fn log2(self) -> Self;
    /// Logarithm in an arbitrary base.
    fn log(self, base: Self) -> Self;
}

macro_rules! forward_unary {
    ($t:ty; $($f:ident),+ $(,)?) => {
        $(
            #[inline]
            fn $f(self) -> Self {
                <$t>::$f(self)
            }
        )+
    };
}

macro_rules! impl_float_backend {
    ($($t:ty),+ $(,)?) => {
        $(
            impl Numeric for $t {
                #[inline]
                fn apply_factor(self, factor: &ConversionFactor) -> Self {
                    let exact = factor.exact_part();
                    let mut v = self;
                    if !exact.is_one() {
                        v = v * (*exact.numer() as $t) / (*exact.denom() as $t);
                    }
                    if !factor.is_exact() {
                        v *= factor.inexact_part() as $t;
                    }
                    v
                }

                #[inline]
                fn to_f64(&self) -> f64 {
                    *self as f64
                }

                #[inline]
                fn floor(&self) -> Self {
                    <$t>::floor(*self)
                }

                #[inline]
                fn ceil(&self) -> Self {
                    <$t>::ceil(*self)
                }

                #[inline]
                fn round(&self) -> Self {
                    <$t>::round(*self)
                }

                #[inline]
                fn trunc(&self) -> Self {
                    <$t>::trunc(*self)
                }

                #[inline]
                fn is_finite(&self) -> bool {
                    <$t>::is_finite(*self)
                }

                #[inline]
                fn is_infinite(&self) -> bool {
                    <$t>::is_infinite(*self)
                }

                #[inline]
                fn is_nan(&self) -> bool {
                    <$t>::is_nan(*self)
                }

                #[inline]
                fn signbit(&self) -> bool {
                    <$t>::is_sign_negative(*self)
                }

                #[inline]
                fn powi(&self, n: i32) -> Self {
                    <$t>::powi(*self, n)
                }

                #[inline]
                fn mul_add(self, a: Self, b: Self) -> Self {
                    <$t>::mul_add(self, a, b)
                }
            }

            impl Real for $t {
                #[inline]
                fn from_f64(v: f64) -> Self {
                    v as $t
                }

                #[inline]
                fn powf(self, e: Self) -> Self {
                    <$t>::powf(self, e)
                }

                #[inline]
                fn hypot(self, other: Self) -> Self {
                    <$t>::hypot(self, other)
                }

                #[inline]
                fn atan2(self, x: Self) -> Self {
                    <$t>::atan2(self, x)
                }

                #[inline]
                fn log(self, base: Self) -> Self {
                    <$t>::log(self, base)
                }

                forward_unary!($t; sqrt, cbrt, sin, cos, tan, asin, acos, atan, sinh, cosh, tanh, asinh, acosh,
                    atanh, exp, exp2, exp_m1, ln, ln_1p, log10, log2);
            }
        )+
    };
}

impl_float_backend!(f32, f64);

impl Numeric for Rational64 {
    fn apply_factor(self, factor: &ConversionFactor) -> Self {
        let exact = factor.exact_part();
        match self.checked_mul(&exact) {
            Some(scaled) if factor.is_exact() => scaled,
            Some(scaled) => rational_from_f64(ratio_to_f64(&scaled) * factor.inexact_part()),
            None => {
                log::trace!("rational product {} * {} overflowed", self, exact);
                rational_from_f64(ratio_to_f64(&self) * factor.to_f64())
            }
        }
    }

    #[inline]
    fn to_f64(&self) -> f64 {
        ratio_to_f64(self)
    }

    #[inline]
    fn floor(&self) -> Self {
        Rational64::floor(self)
    }

    #[inline]
    fn ceil(&self) -> Self {
        Rational64::ceil(self)
    }

    #[inline]
    fn round(&self) -> Self {
        Rational64::round(self)
    }

    #[inline]
    fn trunc(&self) -> Self {
        Rational64::trunc(self)
    }

    #[inline]
    fn is_finite(&self) -> bool {
        true
    }

    #[inline]
    fn is_infinite(&self) -> bool {
        false
    }

    #[inline]
    fn is_nan(&self) -> bool {
        false
    }

    #[inline]
    fn signbit(&self) -> bool {
        self.is_negative()
    }

    #[inline]
    fn powi(&self, n: i32) -> Self {
        Rational64::pow(self, n)
    }
}

/// Nearest representable rational, saturating at `±i64::MAX` when out of range.
fn rational_from_f64(approx: f64) -> Rational64 {
    Rational64::approximate_float(approx).unwrap_or_else(|| {
        log::warn!("{} is outside the rational range; saturating", approx);
        if approx.is_sign_negative() {
            Rational64::from_integer(-i64::MAX)
        } else {
            Rational64::from_integer(i64::MAX)
        }
    })
}
