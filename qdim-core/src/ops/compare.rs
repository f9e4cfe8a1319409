//! Ordering, equality and min/max across units.

use super::{align, Compatibility};
use crate::error::DimensionResult;
use crate::numeric::Numeric;
use crate::quantity::Quantity;
use crate::registry::Registry;
use core::cmp::Ordering;

/// Relative tolerance used by [`Quantity::approx_eq`].
pub const DEFAULT_RTOL: f64 = 1.4901161193847656e-8; // sqrt(f64::EPSILON)

impl<T: Numeric> Quantity<T> {
    /// Three-way comparison after converting `rhs` into `self`'s units. `None` when either value is NaN.
    pub fn compare(&self, rhs: &Self, registry: &Registry) -> DimensionResult<Option<Ordering>> {
        let other = align(self, rhs, registry)?;
        Ok(self.raw().partial_cmp(&other))
    }

    /// `self < rhs`.
    pub fn lt(&self, rhs: &Self, registry: &Registry) -> DimensionResult<bool> {
        Ok(self.compare(rhs, registry)? == Some(Ordering::Less))
    }

    /// `self <= rhs`.
    pub fn le(&self, rhs: &Self, registry: &Registry) -> DimensionResult<bool> {
        Ok(matches!(
            self.compare(rhs, registry)?,
            Some(Ordering::Less | Ordering::Equal)
        ))
    }

    /// `self > rhs`.
    pub fn gt(&self, rhs: &Self, registry: &Registry) -> DimensionResult<bool> {
        Ok(self.compare(rhs, registry)? == Some(Ordering::Greater))
    }

    /// `self >= rhs`.
    pub fn ge(&self, rhs: &Self, registry: &Registry) -> DimensionResult<bool> {
        Ok(matches!(
            self.compare(rhs, registry)?,
            Some(Ordering::Greater | Ordering::Equal)
        ))
    }

    /// Physical equality: `1000 mm` equals `1 m`. Quantities of different dimensions are simply unequal.
    pub fn equals(&self, rhs: &Self, registry: &Registry) -> bool {
        match Compatibility::of(self.units(), rhs.units()) {
            Compatibility::SameUnits => self.raw() == rhs.raw(),
            Compatibility::SameDimension => rhs
                .strip_in(self.units(), registry)
                .map(|other| *self.raw() == other)
                .unwrap_or(false),
            Compatibility::Mismatch => false,
        }
    }

    /// Approximate equality with a relative tolerance of `sqrt(f64::EPSILON)`.
    pub fn approx_eq(&self, rhs: &Self, registry: &Registry) -> bool {
        self.approx_eq_with(rhs, DEFAULT_RTOL, 0.0, registry)
    }

    /// `|a - b| <= max(atol, rtol * max(|a|, |b|))`, evaluated in `self`'s units.
    ///
    /// `atol` is expressed in `self`'s units. Different dimensions compare unequal; infinities compare equal
    /// only to themselves.
    pub fn approx_eq_with(&self, rhs: &Self, rtol: f64, atol: f64, registry: &Registry) -> bool {
        let other = match align(self, rhs, registry) {
            Ok(v) => v,
            Err(_) => return false,
        };
        let (a, b) = (self.raw().to_f64(), other.to_f64());
        if a == b {
            return true;
        }
        if !(a.is_finite() && b.is_finite()) {
            return false;
        }
        (a - b).abs() <= atol.max(rtol * a.abs().max(b.abs()))
    }

    /// The smaller operand, returned unchanged in its own units. Ties return `self`; NaN wins.
    ///
    /// ```rust
    /// # use qdim_core::Registry;
    /// let reg = Registry::builder().base_dimension("Length", "m")?.build();
    /// let m = reg.unit("m")?;
    /// let mm = reg.prefixed_unit("m", -3)?;
    /// let small = 1000.0 * mm.clone();
    /// assert_eq!(small.min(&(2.0 * m), &reg).unwrap(), small);
    /// # Ok::<(), qdim_core::RegistryError>(())
    /// ```
    pub fn min(&self, rhs: &Self, registry: &Registry) -> DimensionResult<Self> {
        let other = align(self, rhs, registry)?;
        Ok(if rhs.raw().is_nan() || other < *self.raw() {
            rhs.clone()
        } else {
            self.clone()
        })
    }

    /// The larger operand, returned unchanged in its own units. Ties return `rhs`; NaN wins.
    pub fn max(&self, rhs: &Self, registry: &Registry) -> DimensionResult<Self> {
        let other = align(self, rhs, registry)?;
        Ok(if self.raw().is_nan() || other < *self.raw() {
            self.clone()
        } else {
            rhs.clone()
        })
    }

    /// `(min, max)` of the two operands.
    pub fn minmax(&self, rhs: &Self, registry: &Registry) -> DimensionResult<(Self, Self)> {
        Ok((self.min(rhs, registry)?, self.max(rhs, registry)?))
    }

    /// `self` limited to `[lo, hi]`. Whichever operand wins is returned in its own units.
    pub fn clamp(&self, lo: &Self, hi: &Self, registry: &Registry) -> DimensionResult<Self> {
        self.max(lo, registry)?.min(hi, registry)
    }
}
