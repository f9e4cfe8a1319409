//! Powers and roots. These never need a registry: the value and the unit-set are raised together.

use crate::error::{DimensionError, DimensionResult};
use crate::factor::exponent_to_f64;
use crate::numeric::{Numeric, Real};
use crate::quantity::Quantity;
use crate::unit::UnitSet;
use crate::{DimensionSet, Exponent};

/// Largest denominator accepted when a real exponent is turned into a rational one.
const MAX_EXPONENT_DENOMINATOR: i32 = 1000;

impl<T: Numeric> Quantity<T> {
    /// Integer power.
    pub fn powi(&self, n: i32) -> Self {
        Quantity::new(self.raw().powi(n), self.units().powi(n))
    }

    /// Reciprocal value with the inverse unit-set.
    pub fn recip(&self) -> Self {
        Quantity::new(T::one() / self.value(), self.units().inv())
    }
}

impl<T: Real> Quantity<T> {
    /// Rational power. Integer exponents go through [`Quantity::powi`].
    ///
    /// ```rust
    /// # use qdim_core::{Exponent, Registry};
    /// let reg = Registry::builder().base_dimension("Length", "m")?.build();
    /// let m = reg.unit("m")?;
    /// let side = (16.0 * m.powi(4)).pow(Exponent::new(1, 4));
    /// assert!((side.value() - 2.0).abs() < 1e-12);
    /// assert_eq!(side.units(), &m);
    /// # Ok::<(), qdim_core::RegistryError>(())
    /// ```
    pub fn pow(&self, power: Exponent) -> Self {
        if power.is_integer() {
            return self.powi(*power.numer());
        }
        let value = self.value().powf(T::from_f64(exponent_to_f64(power)));
        Quantity::new(value, self.units().pow(power))
    }

    /// Real power.
    ///
    /// Unitless values take any exponent. Otherwise the exponent must be a rational with a small denominator,
    /// because the unit-set has to be raised to it exactly.
    ///
    /// # Errors
    ///
    /// [`DimensionError`] (against the dimensionless set) when the exponent has no such rational form.
    pub fn powf(&self, e: T) -> DimensionResult<Self> {
        if self.is_unitless() {
            return Ok(self.with_value(self.value().powf(e)));
        }
        match rationalize(e.to_f64()) {
            Some(power) => Ok(self.pow(power)),
            None => Err(DimensionError::new(self.dimension(), &DimensionSet::NONE)),
        }
    }

    /// Square root of value and unit-set.
    pub fn sqrt(&self) -> Self {
        Quantity::new(self.value().sqrt(), self.units().sqrt())
    }

    /// Cube root of value and unit-set.
    pub fn cbrt(&self) -> Self {
        Quantity::new(self.value().cbrt(), self.units().cbrt())
    }
}

/// `e` as a rational exponent, if it is one with a small denominator.
fn rationalize(e: f64) -> Option<Exponent> {
    if !e.is_finite() {
        return None;
    }
    let candidate = Exponent::approximate_float(e)?;
    if *candidate.denom() > MAX_EXPONENT_DENOMINATOR {
        return None;
    }
    let error = (exponent_to_f64(candidate) - e).abs();
    (error <= 4.0 * f64::EPSILON * e.abs().max(1.0)).then_some(candidate)
}

impl UnitSet {
    /// Whether raising this set to `power` leaves every exponent an integer.
    pub fn has_integer_power(&self, power: Exponent) -> bool {
        self.units().iter().all(|u| (u.power() * power).is_integer())
    }
}

impl DimensionSet {
    /// Whether every exponent is an integer.
    pub fn is_integral(&self) -> bool {
        self.dimensions().iter().all(|d| d.power().is_integer())
    }
}
