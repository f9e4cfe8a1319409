//! Operator suite over [`Quantity`].
//!
//! Every binary operator first classifies its operands with [`Compatibility::of`]:
//!
//! - [`Compatibility::SameUnits`]: operate on the raw values.
//! - [`Compatibility::SameDimension`]: convert one or both operands, then operate.
//! - [`Compatibility::Mismatch`]: fail with [`DimensionError`] (or answer `false` for `equals`).
//!
//! The operator classes are split by module: [`arith`] (add, subtract, fused multiply-add), [`divmod`]
//! (integer division and remainders), [`compare`] (ordering, equality, min/max), [`power`] (powers and
//! roots) and [`functions`] (sign, rounding, predicates and the dimensionless-only functions).

pub mod arith;
pub mod compare;
pub mod divmod;
pub mod functions;
pub mod power;

use crate::error::{DimensionError, DimensionResult};
use crate::numeric::Numeric;
use crate::quantity::Quantity;
use crate::registry::Registry;
use crate::unit::UnitSet;

/// How two unit-sets relate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compatibility {
    /// Identical unit-sets; no conversion needed.
    SameUnits,
    /// Different unit-sets of the same dimension.
    SameDimension,
    /// Different dimensions.
    Mismatch,
}

impl Compatibility {
    /// Classifies `lhs` against `rhs`.
    pub fn of(lhs: &UnitSet, rhs: &UnitSet) -> Self {
        if lhs == rhs {
            Compatibility::SameUnits
        } else if lhs.dimension() == rhs.dimension() {
            Compatibility::SameDimension
        } else {
            Compatibility::Mismatch
        }
    }

    /// Classifies `lhs` against `rhs`, rejecting a mismatch.
    pub fn require(lhs: &UnitSet, rhs: &UnitSet) -> DimensionResult<Self> {
        match Self::of(lhs, rhs) {
            Compatibility::Mismatch => Err(DimensionError::new(lhs.dimension(), rhs.dimension())),
            ok => Ok(ok),
        }
    }
}

/// Both values expressed in a common unit-set, and that unit-set.
///
/// Identical units are kept. Otherwise both sides move into the registry's preferred units for the shared
/// dimension, or into the left operand's units when the registry has no preference.
pub(crate) fn promote<T: Numeric>(
    lhs: &Quantity<T>,
    rhs: &Quantity<T>,
    registry: &Registry,
) -> DimensionResult<(T, T, UnitSet)> {
    match Compatibility::require(lhs.units(), rhs.units())? {
        Compatibility::SameUnits => Ok((lhs.value(), rhs.value(), lhs.units().clone())),
        _ => {
            let target = registry
                .preferred_units(lhs.dimension())
                .unwrap_or_else(|| lhs.units().clone());
            let a = lhs.strip_in(&target, registry)?;
            let b = rhs.strip_in(&target, registry)?;
            Ok((a, b, target))
        }
    }
}

/// The right operand's value in the left operand's units.
pub(crate) fn align<T: Numeric>(lhs: &Quantity<T>, rhs: &Quantity<T>, registry: &Registry) -> DimensionResult<T> {
    match Compatibility::require(lhs.units(), rhs.units())? {
        Compatibility::SameUnits => Ok(rhs.value()),
        _ => rhs.strip_in(lhs.units(), registry),
    }
}
