//! Elementary functions: sign, rounding, predicates, and the functions that only make sense on a pure number.
//!
//! Trigonometric, exponential and logarithmic functions are not defined on [`Quantity`] at all. They are
//! reached through [`Dimensionless`], which can only be obtained by converting a dimensionless quantity into
//! the unitless set (`45 deg` becomes `π/4`, `5000 ppm` becomes `0.005`).

use super::align;
use crate::error::DimensionResult;
use crate::numeric::{Numeric, Real};
use crate::quantity::Quantity;
use crate::registry::Registry;
use crate::unit::UnitSet;

/// A pure number obtained from a dimensionless quantity.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Dimensionless<T>(T);

impl<T: Numeric> Dimensionless<T> {
    /// Wraps a plain number.
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// The number.
    pub fn value(&self) -> T {
        self.0.clone()
    }

    /// Back into a unitless quantity.
    pub fn into_quantity(self) -> Quantity<T> {
        Quantity::unitless(self.0)
    }
}

impl<T: Numeric> From<Dimensionless<T>> for Quantity<T> {
    fn from(d: Dimensionless<T>) -> Self {
        d.into_quantity()
    }
}

macro_rules! forward_real {
    ($($(#[$doc:meta])* $f:ident),+ $(,)?) => {
        $(
            $(#[$doc])*
            #[inline]
            pub fn $f(&self) -> T {
                self.0.$f()
            }
        )+
    };
}

impl<T: Real> Dimensionless<T> {
    forward_real!(
        /// Sine (argument in radians).
        sin,
        /// Cosine (argument in radians).
        cos,
        /// Tangent (argument in radians).
        tan,
        /// Arcsine, in radians.
        asin,
        /// Arccosine, in radians.
        acos,
        /// Arctangent, in radians.
        atan,
        /// Hyperbolic sine.
        sinh,
        /// Hyperbolic cosine.
        cosh,
        /// Hyperbolic tangent.
        tanh,
        /// Inverse hyperbolic sine.
        asinh,
        /// Inverse hyperbolic cosine.
        acosh,
        /// Inverse hyperbolic tangent.
        atanh,
        /// `e^x`.
        exp,
        /// `2^x`.
        exp2,
        /// `e^x - 1`.
        exp_m1,
        /// Natural logarithm.
        ln,
        /// `ln(1 + x)`.
        ln_1p,
        /// Base-10 logarithm.
        log10,
        /// Base-2 logarithm.
        log2,
    );

    /// Logarithm in an arbitrary base.
    pub fn log(&self, base: T) -> T {
        self.0.log(base)
    }
}

impl<T: Numeric> Quantity<T> {
    /// The value as a pure number, after converting into the unitless set.
    ///
    /// # Errors
    ///
    /// [`crate::DimensionError`] unless the quantity is dimensionless.
    pub fn to_dimensionless(&self, registry: &Registry) -> DimensionResult<Dimensionless<T>> {
        self.strip_in(&UnitSet::none(), registry).map(Dimensionless)
    }

    /// Absolute value, same units.
    pub fn abs(&self) -> Self {
        self.with_value(self.raw().abs())
    }

    /// `|x|²`, with the unit-set squared.
    pub fn abs2(&self) -> Self {
        let v = self.value();
        Quantity::new(v.clone() * v, self.units().powi(2))
    }

    /// Sign of the value as a plain number (`-1`, `0` or `1`; NaN for NaN).
    ///
    /// Both zeros give `0`. Use [`Quantity::signbit`] to tell them apart.
    pub fn signum(&self) -> T {
        let v = self.raw();
        if v.is_zero() {
            T::zero()
        } else {
            v.signum()
        }
    }

    /// Whether the sign bit is set.
    pub fn signbit(&self) -> bool {
        self.raw().signbit()
    }

    /// Magnitude of `self` with the sign of `sign`. Units of `sign` are irrelevant.
    pub fn copysign(&self, sign: &Self) -> Self {
        let magnitude = self.raw().abs();
        self.with_value(if sign.signbit() { -magnitude } else { magnitude })
    }

    /// `self` negated when `sign` is negative.
    pub fn flipsign(&self, sign: &Self) -> Self {
        if sign.signbit() {
            self.with_value(-self.value())
        } else {
            self.clone()
        }
    }

    /// Largest integer not greater than the value, same units.
    pub fn floor(&self) -> Self {
        self.with_value(self.raw().floor())
    }

    /// Smallest integer not less than the value, same units.
    pub fn ceil(&self) -> Self {
        self.with_value(self.raw().ceil())
    }

    /// Nearest integer (ties away from zero), same units.
    pub fn round(&self) -> Self {
        self.with_value(self.raw().round())
    }

    /// Integer part, same units.
    pub fn trunc(&self) -> Self {
        self.with_value(self.raw().trunc())
    }

    /// [`Quantity::floor`] after converting into `target`.
    pub fn floor_in(&self, target: &UnitSet, registry: &Registry) -> DimensionResult<Self> {
        Ok(self.convert_to(target, registry)?.floor())
    }

    /// [`Quantity::ceil`] after converting into `target`.
    pub fn ceil_in(&self, target: &UnitSet, registry: &Registry) -> DimensionResult<Self> {
        Ok(self.convert_to(target, registry)?.ceil())
    }

    /// [`Quantity::round`] after converting into `target`.
    ///
    /// ```rust
    /// # use qdim_core::Registry;
    /// let reg = Registry::builder().base_dimension("Length", "m")?.build();
    /// let mm = reg.prefixed_unit("m", -3)?;
    /// let q = 1.23456 * reg.unit("m")?;
    /// assert_eq!(q.round_in(&mm, &reg).unwrap().value(), 1235.0);
    /// # Ok::<(), qdim_core::RegistryError>(())
    /// ```
    pub fn round_in(&self, target: &UnitSet, registry: &Registry) -> DimensionResult<Self> {
        Ok(self.convert_to(target, registry)?.round())
    }

    /// [`Quantity::trunc`] after converting into `target`.
    pub fn trunc_in(&self, target: &UnitSet, registry: &Registry) -> DimensionResult<Self> {
        Ok(self.convert_to(target, registry)?.trunc())
    }

    /// Whether the value is zero.
    pub fn is_zero(&self) -> bool {
        self.raw().is_zero()
    }

    /// Whether the value is finite.
    pub fn is_finite(&self) -> bool {
        self.raw().is_finite()
    }

    /// Whether the value is infinite.
    pub fn is_infinite(&self) -> bool {
        self.raw().is_infinite()
    }

    /// Whether the value is NaN.
    pub fn is_nan(&self) -> bool {
        self.raw().is_nan()
    }
}

impl<T: Real> Quantity<T> {
    /// Four-quadrant angle of the point `(x, self)`, in radians. `x` is converted into `self`'s units.
    pub fn atan2(&self, x: &Self, registry: &Registry) -> DimensionResult<T> {
        let x = align(self, x, registry)?;
        Ok(self.value().atan2(x))
    }
}
