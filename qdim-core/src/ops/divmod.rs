//! Integer division and remainders between quantities of the same dimension.
//!
//! The quotients convert the right operand into the left operand's units and return the plain count. The
//! remainders convert the left operand into the right operand's units and keep those units.

use super::align;
use crate::error::DimensionResult;
use crate::numeric::Numeric;
use crate::quantity::Quantity;
use crate::registry::Registry;

impl<T: Numeric> Quantity<T> {
    /// How many whole `rhs` fit in `self`, rounded toward zero.
    ///
    /// ```rust
    /// # use qdim_core::Registry;
    /// let reg = Registry::builder().base_dimension("Length", "m")?.build();
    /// let m = reg.unit("m")?;
    /// let cm = reg.prefixed_unit("m", -2)?;
    /// assert_eq!((1.0 * m).div_trunc(&(30.0 * cm), &reg).unwrap(), 3.0);
    /// # Ok::<(), qdim_core::RegistryError>(())
    /// ```
    pub fn div_trunc(&self, rhs: &Self, registry: &Registry) -> DimensionResult<T> {
        let divisor = align(self, rhs, registry)?;
        Ok(self.value().div_trunc(divisor))
    }

    /// Quotient rounded toward negative infinity.
    pub fn div_floor(&self, rhs: &Self, registry: &Registry) -> DimensionResult<T> {
        let divisor = align(self, rhs, registry)?;
        Ok(self.value().div_floor(divisor))
    }

    /// Quotient rounded toward positive infinity.
    pub fn div_ceil(&self, rhs: &Self, registry: &Registry) -> DimensionResult<T> {
        let divisor = align(self, rhs, registry)?;
        Ok(self.value().div_ceil(divisor))
    }

    /// Truncated remainder in `rhs`'s units; takes the sign of `self`.
    pub fn rem_trunc(&self, rhs: &Self, registry: &Registry) -> DimensionResult<Self> {
        let dividend = align(rhs, self, registry)?;
        Ok(rhs.with_value(dividend % rhs.value()))
    }

    /// Floored remainder in `rhs`'s units; takes the sign of `rhs`.
    pub fn modulo(&self, rhs: &Self, registry: &Registry) -> DimensionResult<Self> {
        let dividend = align(rhs, self, registry)?;
        Ok(rhs.with_value(dividend.modulo(rhs.value())))
    }

    /// [`Quantity::div_trunc`] and [`Quantity::rem_trunc`] together.
    pub fn div_rem(&self, rhs: &Self, registry: &Registry) -> DimensionResult<(T, Self)> {
        Ok((self.div_trunc(rhs, registry)?, self.rem_trunc(rhs, registry)?))
    }
}

#[cfg(test)]
mod tests {
    use crate::test_registry as tr;
    use num_rational::Rational64;

    fn r(n: i64) -> Rational64 {
        Rational64::from_integer(n)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Quotients
    // ─────────────────────────────────────────────────────────────────────────────

    #[test]
    fn quotient_converts_rhs_into_lhs_units() {
        let reg = tr::registry();
        let lhs = r(7) * tr::ft();
        let rhs = r(24) * tr::inch();
        assert_eq!(lhs.div_trunc(&rhs, &reg).unwrap(), r(3));
        assert_eq!(lhs.div_floor(&rhs, &reg).unwrap(), r(3));
        assert_eq!(lhs.div_ceil(&rhs, &reg).unwrap(), r(4));
    }

    #[test]
    fn negative_quotients_round_by_mode() {
        let reg = tr::registry();
        let lhs = r(-7) * tr::m();
        let rhs = r(2000) * tr::mm();
        assert_eq!(lhs.div_trunc(&rhs, &reg).unwrap(), r(-3));
        assert_eq!(lhs.div_floor(&rhs, &reg).unwrap(), r(-4));
        assert_eq!(lhs.div_ceil(&rhs, &reg).unwrap(), r(-3));
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Remainders
    // ─────────────────────────────────────────────────────────────────────────────

    #[test]
    fn remainder_carries_rhs_units() {
        let reg = tr::registry();
        // 1 h mod 25 min = 10 min
        let rem = (1.0 * tr::hour()).rem_trunc(&(25.0 * tr::minute()), &reg).unwrap();
        assert_eq!(rem, 10.0 * tr::minute());
    }

    #[test]
    fn modulo_takes_sign_of_divisor() {
        let reg = tr::registry();
        let lhs = r(-7) * tr::m();
        let rhs = r(2) * tr::m();
        assert_eq!(lhs.rem_trunc(&rhs, &reg).unwrap(), r(-1) * tr::m());
        assert_eq!(lhs.modulo(&rhs, &reg).unwrap(), r(1) * tr::m());
    }

    #[test]
    fn div_rem_reconstructs_dividend() {
        let reg = tr::registry();
        let lhs = r(100) * tr::inch();
        let rhs = r(1) * tr::ft();
        let (q, rem) = lhs.div_rem(&rhs, &reg).unwrap();
        // 100 in = 8 ft 4 in
        assert_eq!(q, r(8));
        assert_eq!(rem, Rational64::new(1, 3) * tr::ft());
    }

    #[test]
    fn mismatched_dimensions_fail() {
        let reg = tr::registry();
        let m = 1.0 * tr::m();
        let s = 1.0 * tr::s();
        assert!(m.div_trunc(&s, &reg).is_err());
        assert!(m.div_floor(&s, &reg).is_err());
        assert!(m.modulo(&s, &reg).is_err());
        assert!(m.rem_trunc(&s, &reg).is_err());
    }
}
