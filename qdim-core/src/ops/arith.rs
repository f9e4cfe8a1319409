//! Addition, subtraction and fused multiply-add.

use super::{promote, Compatibility};
use crate::error::{DimensionError, DimensionResult};
use crate::numeric::{Numeric, Real};
use crate::quantity::Quantity;
use crate::registry::Registry;

impl<T: Numeric> Quantity<T> {
    /// `self + rhs`.
    ///
    /// Identical units add directly and keep their units; otherwise both operands are promoted first.
    ///
    /// ```rust
    /// # use qdim_core::Registry;
    /// let reg = Registry::builder().base_dimension("Length", "m")?.build();
    /// let m = reg.unit("m")?;
    /// let mm = reg.prefixed_unit("m", -3)?;
    /// let sum = (1.0 * m.clone()).add(&(500.0 * mm), &reg).unwrap();
    /// assert_eq!(sum.value(), 1.5);
    /// assert_eq!(sum.units(), &m);
    /// # Ok::<(), qdim_core::RegistryError>(())
    /// ```
    pub fn add(&self, rhs: &Self, registry: &Registry) -> DimensionResult<Self> {
        let (a, b, units) = promote(self, rhs, registry)?;
        Ok(Quantity::new(a + b, units))
    }

    /// `self - rhs`, under the same rules as [`Quantity::add`].
    pub fn sub(&self, rhs: &Self, registry: &Registry) -> DimensionResult<Self> {
        let (a, b, units) = promote(self, rhs, registry)?;
        Ok(Quantity::new(a - b, units))
    }

    /// `self * y + z`, fused where the backend supports it.
    ///
    /// `z` must have the dimension of `self * y`. The product is moved into the units of the result (the
    /// promoted units of `z`'s dimension) before the fused operation.
    pub fn mul_add(&self, y: &Self, z: &Self, registry: &Registry) -> DimensionResult<Self> {
        let product_units = self.units() * y.units();
        match Compatibility::of(&product_units, z.units()) {
            Compatibility::SameUnits => Ok(z.with_value(self.value().mul_add(y.value(), z.value()))),
            Compatibility::SameDimension => {
                let target = registry
                    .preferred_units(z.dimension())
                    .unwrap_or_else(|| z.units().clone());
                let to_target = registry.conversion(&product_units, &target)?;
                let x = self.value().apply_factor(&to_target);
                let z = z.strip_in(&target, registry)?;
                Ok(Quantity::new(x.mul_add(y.value(), z), target))
            }
            Compatibility::Mismatch => Err(DimensionError::new(product_units.dimension(), z.dimension())),
        }
    }
}

impl<T: Real> Quantity<T> {
    /// `sqrt(self² + rhs²)` in the promoted units.
    pub fn hypot(&self, rhs: &Self, registry: &Registry) -> DimensionResult<Self> {
        let (a, b, units) = promote(self, rhs, registry)?;
        Ok(Quantity::new(a.hypot(b), units))
    }
}

#[cfg(test)]
mod tests {
    use crate::test_registry as tr;
    use approx::assert_relative_eq;
    use num_rational::Rational64;

    // ─────────────────────────────────────────────────────────────────────────────
    // Addition and subtraction
    // ─────────────────────────────────────────────────────────────────────────────

    #[test]
    fn same_units_add_directly() {
        let reg = tr::registry();
        let sum = (2.0 * tr::ft()).add(&(3.0 * tr::ft()), &reg).unwrap();
        assert_eq!(sum, 5.0 * tr::ft());
    }

    #[test]
    fn mixed_units_promote_to_preferred() {
        let reg = tr::registry();
        let sum = (1.0 * tr::kg()).add(&(500.0 * tr::g()), &reg).unwrap();
        assert_eq!(sum, 1.5 * tr::kg());

        let diff = (1.0 * tr::m()).sub(&(250.0 * tr::mm()), &reg).unwrap();
        assert_eq!(diff, 0.75 * tr::m());
    }

    #[test]
    fn rational_addition_stays_exact() {
        let reg = tr::registry();
        let a = Rational64::from_integer(1) * tr::ft();
        let b = Rational64::from_integer(6) * tr::inch();
        // 1 ft + 6 in = 0.4572 m
        let sum = a.add(&b, &reg).unwrap();
        assert_eq!(sum.units(), &tr::m());
        assert_eq!(sum.value(), Rational64::new(4572, 10000));
    }

    #[test]
    fn dimensionless_units_add() {
        let reg = tr::registry();
        let sum = (1.0 * tr::percent()).add(&(5000.0 * tr::ppm()), &reg).unwrap();
        assert!(sum.is_unitless());
        assert_relative_eq!(sum.value(), 0.015, max_relative = 1e-12);
    }

    #[test]
    fn adding_length_to_mass_fails() {
        let reg = tr::registry();
        let err = (1.0 * tr::m()).add(&(1.0 * tr::kg()), &reg).unwrap_err();
        assert_eq!(err.left, *tr::m().dimension());
        assert_eq!(err.right, *tr::kg().dimension());
        assert!((1.0 * tr::m()).sub(&(1.0 * tr::s()), &reg).is_err());
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Fused multiply-add and hypot
    // ─────────────────────────────────────────────────────────────────────────────

    #[test]
    fn mul_add_in_matching_units() {
        let reg = tr::registry();
        let area = (2.0 * tr::m()).mul_add(&(3.0 * tr::m()), &(1.0 * tr::m().powi(2)), &reg).unwrap();
        assert_eq!(area, 7.0 * tr::m().powi(2));
    }

    #[test]
    fn mul_add_converts_product() {
        let reg = tr::registry();
        // 2 min/s * 3 s + 10 s = 370 s
        let rate = 2.0 * (&tr::minute() / &tr::s());
        let t = rate.mul_add(&(3.0 * tr::s()), &(10.0 * tr::s()), &reg).unwrap();
        assert_eq!(t.units(), &tr::s());
        assert_relative_eq!(t.value(), 370.0);
    }

    #[test]
    fn mul_add_checks_dimensions() {
        let reg = tr::registry();
        let err = (2.0 * tr::m())
            .mul_add(&(3.0 * tr::m()), &(1.0 * tr::m()), &reg)
            .unwrap_err();
        assert_eq!(err.left, tr::m().dimension().powi(2));
    }

    #[test]
    fn hypot_promotes() {
        let reg = tr::registry();
        let h = (3.0 * tr::m()).hypot(&(4000.0 * tr::mm()), &reg).unwrap();
        assert_eq!(h, 5.0 * tr::m());
        assert!((3.0 * tr::m()).hypot(&(4.0 * tr::s()), &reg).is_err());
    }
}
