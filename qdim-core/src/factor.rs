//! Conversion-factor engine.
//!
//! Every factor is split into an exact rational track and an inexact floating track. The exact track carries
//! powers of ten and defined ratios (`1 ft = 3048/10000 m`), so `3000 mm -> m` stays exactly `3`; the inexact
//! track only absorbs what cannot be represented exactly (`π/180` for degrees, overflowing prefixes, fractional
//! powers). Once magnitude lands on the inexact track it never moves back.

use crate::error::{DimensionError, DimensionResult};
use crate::registry::Registry;
use crate::unit::UnitSet;
use crate::Exponent;
use core::ops::{Div, Mul};
use num_rational::Rational64;
use num_traits::{CheckedMul, One, Zero};

/// Inexact parts closer to one than this are snapped to exactly one.
const SNAP_TOLERANCE: f64 = 4.0 * f64::EPSILON;

/// Largest magnitude (and reciprocal magnitude) still attempted on the exact track.
const EXACT_LIMIT: f64 = i64::MAX as f64;

/// A multiplicative factor `inexact * exact`.
///
/// Registry entries use the same type: a unit's base factor converts a value in that unit into the reference
/// units of its dimension.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConversionFactor {
    inexact: f64,
    exact: Rational64,
}

impl ConversionFactor {
    /// The factor one (on the exact track).
    pub const IDENTITY: Self = Self {
        inexact: 1.0,
        exact: Rational64::new_raw(1, 1),
    };

    /// Creates a factor from both tracks.
    pub fn new(inexact: f64, exact: Rational64) -> Self {
        Self { inexact, exact }
    }

    /// A purely exact factor.
    pub fn exact(exact: Rational64) -> Self {
        Self {
            inexact: 1.0,
            exact,
        }
    }

    /// A purely inexact factor.
    pub fn inexact(inexact: f64) -> Self {
        Self {
            inexact,
            exact: Rational64::one(),
        }
    }

    /// The floating track.
    #[inline]
    pub fn inexact_part(&self) -> f64 {
        self.inexact
    }

    /// The rational track.
    #[inline]
    pub fn exact_part(&self) -> Rational64 {
        self.exact
    }

    /// Whether all magnitude sits on the exact track.
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.inexact == 1.0
    }

    /// Whether the factor is usable: finite, strictly positive on both tracks.
    pub fn is_valid(&self) -> bool {
        self.inexact.is_finite() && self.inexact > 0.0 && self.exact > Rational64::zero()
    }

    /// Collapses both tracks into one float.
    pub fn to_f64(&self) -> f64 {
        self.inexact * ratio_to_f64(&self.exact)
    }

    /// Multiplicative inverse.
    pub fn recip(self) -> Self {
        Self {
            inexact: 1.0 / self.inexact,
            exact: self.exact.recip(),
        }
    }

    /// Raises the factor to a rational power.
    ///
    /// Integer powers stay exact while the result fits in `i64` numerator and denominator. Fractional powers keep
    /// the exact track only when it is already one.
    pub fn pow(self, power: Exponent) -> Self {
        if power.is_integer() {
            let p = *power.numer();
            if let Some(exact) = checked_powi(self.exact, p) {
                return Self {
                    inexact: self.inexact.powi(p),
                    exact,
                };
            }
        } else if self.exact.is_one() {
            return Self::inexact(self.inexact.powf(exponent_to_f64(power)));
        }
        log::trace!(
            "factor {:?} degraded to the inexact track under power {}",
            self,
            power
        );
        Self::inexact(self.to_f64().powf(exponent_to_f64(power)))
    }

    /// Factor of one atomic unit: its registered base factor, scaled by `10^tens`, raised to `power`.
    pub fn for_unit(base: ConversionFactor, tens: i32, power: Exponent) -> Self {
        let prefixed = ten_pow(tens).and_then(|t| base.exact.checked_mul(&t));
        match prefixed {
            Some(exact) => Self {
                inexact: base.inexact,
                exact,
            }
            .pow(power),
            None => {
                log::trace!("prefix 10^{} does not fit the exact track", tens);
                Self::inexact(base.to_f64() * 10f64.powi(tens)).pow(power)
            }
        }
    }

    /// Factor converting a value in `units` into the reference units of its dimension.
    ///
    /// Unit names unknown to `registry` contribute a factor of one.
    pub fn of_units(units: &UnitSet, registry: &Registry) -> Self {
        units.units().iter().fold(Self::IDENTITY, |acc, unit| {
            let base = registry.base_factor(unit.name().as_str()).unwrap_or_else(|| {
                log::warn!("no base factor registered for unit '{}'", unit.name());
                Self::IDENTITY
            });
            acc * Self::for_unit(base, unit.tens(), unit.power())
        })
    }

    /// Factor `f` such that a value `v` in `from` equals `v * f` in `to`.
    ///
    /// # Errors
    ///
    /// [`DimensionError`] when `from` and `to` measure different dimensions.
    pub fn between(from: &UnitSet, to: &UnitSet, registry: &Registry) -> DimensionResult<Self> {
        if from == to {
            return Ok(Self::IDENTITY);
        }
        if from.dimension() != to.dimension() {
            return Err(DimensionError::new(from.dimension(), to.dimension()));
        }
        let mut factor = Self::of_units(from, registry) / Self::of_units(to, registry);
        if (factor.inexact - 1.0).abs() <= SNAP_TOLERANCE {
            factor.inexact = 1.0;
        }
        Ok(factor)
    }
}

impl Default for ConversionFactor {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for ConversionFactor {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let inexact = self.inexact * rhs.inexact;
        match self.exact.checked_mul(&rhs.exact) {
            Some(exact) => Self { inexact, exact },
            None => {
                log::trace!("exact product {} * {} overflowed", self.exact, rhs.exact);
                Self::inexact(inexact * ratio_to_f64(&self.exact) * ratio_to_f64(&rhs.exact))
            }
        }
    }
}

impl Div for ConversionFactor {
    type Output = Self;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn div(self, rhs: Self) -> Self {
        self * rhs.recip()
    }
}

/// `10^tens` as an exact rational, if it fits.
fn ten_pow(tens: i32) -> Option<Rational64> {
    let magnitude = 10i64.checked_pow(tens.unsigned_abs())?;
    Some(if tens >= 0 {
        Rational64::from_integer(magnitude)
    } else {
        Rational64::new(1, magnitude)
    })
}

/// Exact integer power with overflow detection on both numerator and denominator.
fn checked_powi(base: Rational64, power: i32) -> Option<Rational64> {
    if base.is_zero() {
        return None;
    }
    let estimate = ratio_to_f64(&base).powi(power).abs();
    if !(estimate < EXACT_LIMIT && estimate.recip() < EXACT_LIMIT) {
        return None;
    }
    if base.is_one() {
        return Some(base);
    }
    let mut step = if power < 0 { base.recip() } else { base };
    let mut acc = Rational64::one();
    let mut n = power.unsigned_abs();
    while n > 0 {
        if n & 1 == 1 {
            acc = acc.checked_mul(&step)?;
        }
        n >>= 1;
        if n > 0 {
            step = step.checked_mul(&step)?;
        }
    }
    Some(acc)
}

pub(crate) fn ratio_to_f64(r: &Rational64) -> f64 {
    *r.numer() as f64 / *r.denom() as f64
}

pub(crate) fn exponent_to_f64(p: Exponent) -> f64 {
    f64::from(*p.numer()) / f64::from(*p.denom())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_registry as tr;
    use approx::assert_relative_eq;

    fn exp(n: i32) -> Exponent {
        Exponent::from_integer(n)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Atomic factors
    // ─────────────────────────────────────────────────────────────────────────────

    #[test]
    fn prefix_is_exact() {
        let f = ConversionFactor::for_unit(ConversionFactor::IDENTITY, -3, exp(1));
        assert!(f.is_exact());
        assert_eq!(f.exact_part(), Rational64::new(1, 1000));
    }

    #[test]
    fn prefix_squared_is_exact() {
        let f = ConversionFactor::for_unit(ConversionFactor::IDENTITY, 3, exp(-2));
        assert_eq!(f.exact_part(), Rational64::new(1, 1_000_000));
    }

    #[test]
    fn defined_ratio_survives_powers() {
        let foot = ConversionFactor::exact(Rational64::new(3048, 10000));
        let f = ConversionFactor::for_unit(foot, 0, exp(3));
        assert!(f.is_exact());
        assert_eq!(f.exact_part(), Rational64::new(3048, 10000).pow(3));
    }

    #[test]
    fn overflow_degrades_to_inexact() {
        let f = ConversionFactor::for_unit(ConversionFactor::IDENTITY, 24, exp(1));
        assert_eq!(f.exact_part(), Rational64::one());
        assert_relative_eq!(f.inexact_part(), 1e24, max_relative = 1e-12);

        let g = ConversionFactor::for_unit(ConversionFactor::IDENTITY, 9, exp(3));
        assert_eq!(g.exact_part(), Rational64::one());
        assert_relative_eq!(g.inexact_part(), 1e27, max_relative = 1e-12);
    }

    #[test]
    fn fractional_power_of_exact_value_goes_inexact() {
        let f = ConversionFactor::for_unit(ConversionFactor::IDENTITY, 2, Exponent::new(1, 2));
        assert_eq!(f.exact_part(), Rational64::one());
        assert_relative_eq!(f.inexact_part(), 10.0, max_relative = 1e-12);
    }

    #[test]
    fn huge_integer_powers_of_unity_stay_exact() {
        let f = ConversionFactor::IDENTITY.pow(Exponent::from_integer(i32::MAX));
        assert!(f.is_exact());
        assert_eq!(f.exact_part(), Rational64::one());
        assert_eq!(checked_powi(Rational64::one(), i32::MIN), Some(Rational64::one()));
    }

    #[test]
    fn integer_powers_by_squaring() {
        assert_eq!(checked_powi(Rational64::new(3, 2), 5), Some(Rational64::new(243, 32)));
        assert_eq!(checked_powi(Rational64::new(3, 2), -3), Some(Rational64::new(8, 27)));
        assert_eq!(checked_powi(Rational64::from_integer(10), 18), Some(Rational64::from_integer(10i64.pow(18))));
        assert_eq!(checked_powi(Rational64::from_integer(10), 19), None);
        assert_eq!(checked_powi(Rational64::new(7, 5), 0), Some(Rational64::one()));
    }

    #[test]
    fn fractional_power_of_unity_stays_exact() {
        let f = ConversionFactor::for_unit(ConversionFactor::IDENTITY, 0, Exponent::new(1, 2));
        assert_eq!(f, ConversionFactor::IDENTITY);
    }

    #[test]
    fn inexact_base_keeps_tracks_separate() {
        let degree = ConversionFactor::new(core::f64::consts::PI, Rational64::new(1, 180));
        let f = ConversionFactor::for_unit(degree, 0, exp(2));
        assert_eq!(f.exact_part(), Rational64::new(1, 32400));
        assert_relative_eq!(f.inexact_part(), core::f64::consts::PI.powi(2));
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Composite factors
    // ─────────────────────────────────────────────────────────────────────────────

    #[test]
    fn millimeter_to_meter_is_exact() {
        let reg = tr::registry();
        let f = ConversionFactor::between(&tr::mm(), &tr::m(), &reg).unwrap();
        assert!(f.is_exact());
        assert_eq!(f.exact_part(), Rational64::new(1, 1000));
    }

    #[test]
    fn foot_to_inch_is_twelve() {
        let reg = tr::registry();
        let f = ConversionFactor::between(&tr::ft(), &tr::inch(), &reg).unwrap();
        assert_eq!(f, ConversionFactor::exact(Rational64::from_integer(12)));
    }

    #[test]
    fn degree_round_trip_snaps_to_identity() {
        let reg = tr::registry();
        let there = ConversionFactor::between(&tr::deg(), &tr::rad(), &reg).unwrap();
        let back = ConversionFactor::between(&tr::rad(), &tr::deg(), &reg).unwrap();
        let round = there * back;
        assert_relative_eq!(round.to_f64(), 1.0, epsilon = 1e-15);
        assert!(!there.is_exact());
    }

    #[test]
    fn derived_unit_resolves_to_references() {
        let reg = tr::registry();
        let km_per_h = &tr::km() / &tr::hour();
        let m_per_s = &tr::m() / &tr::s();
        let f = ConversionFactor::between(&km_per_h, &m_per_s, &reg).unwrap();
        assert_eq!(f, ConversionFactor::exact(Rational64::new(5, 18)));
    }

    #[test]
    fn mismatched_dimensions_fail() {
        let reg = tr::registry();
        let err = ConversionFactor::between(&tr::m(), &tr::s(), &reg).unwrap_err();
        assert_eq!(err.left, *tr::m().dimension());
        assert_eq!(err.right, *tr::s().dimension());
    }

    #[test]
    fn identical_units_short_circuit() {
        let reg = tr::registry();
        let f = ConversionFactor::between(&tr::ft(), &tr::ft(), &reg).unwrap();
        assert_eq!(f, ConversionFactor::IDENTITY);
    }

    #[test]
    fn unknown_unit_contributes_identity() {
        let reg = Registry::default();
        assert_eq!(ConversionFactor::of_units(&tr::ft(), &reg), ConversionFactor::IDENTITY);
    }

    #[test]
    fn validity() {
        assert!(ConversionFactor::IDENTITY.is_valid());
        assert!(!ConversionFactor::inexact(0.0).is_valid());
        assert!(!ConversionFactor::inexact(f64::NAN).is_valid());
        assert!(!ConversionFactor::exact(Rational64::new(-1, 2)).is_valid());
    }
}
