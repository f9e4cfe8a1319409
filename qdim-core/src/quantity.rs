//! Quantity type and its registry-free operators.
//!
//! Operators that never need a conversion (multiplication, division, negation, scaling by a plain number) are
//! implemented through `core::ops`. Operators that may need one take the [`Registry`] explicitly and live in
//! [`crate::ops`].

use crate::dimension::DimensionSet;
use crate::error::DimensionResult;
use crate::numeric::Numeric;
use crate::registry::Registry;
use crate::unit::UnitSet;
use core::cmp::Ordering;
use core::fmt::{self, Display, Formatter};
use core::ops::*;
use num_rational::Rational64;

/// A numeric value paired with a canonical unit-set.
///
/// The dimension is cached inside the unit-set, so `q.dimension()` never re-derives it.
///
/// `PartialEq` is structural: `1000 mm` and `1 m` are different values. Use [`Quantity::equals`] for the
/// physical comparison.
///
/// ```rust
/// use qdim_core::{DimensionSet, Exponent, Quantity, Unit, UnitSet};
///
/// let m = UnitSet::from(Unit::new("m", 0, Exponent::from_integer(1), DimensionSet::base("Length")));
/// let s = UnitSet::from(Unit::new("s", 0, Exponent::from_integer(1), DimensionSet::base("Time")));
/// let v = Quantity::new(10.0, m) / Quantity::new(2.0, s);
/// assert_eq!(v.value(), 5.0);
/// assert_eq!(v.units().to_string(), "m·s^-1");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Quantity<T> {
    value: T,
    units: UnitSet,
}

impl<T: Numeric> Quantity<T> {
    /// Attaches `units` to `value`.
    #[inline]
    pub fn new(value: T, units: UnitSet) -> Self {
        Self { value, units }
    }

    /// A plain number (unit-set `NoUnits`).
    #[inline]
    pub fn unitless(value: T) -> Self {
        Self::new(value, UnitSet::none())
    }

    /// Zero in `units`.
    pub fn zero(units: UnitSet) -> Self {
        Self::new(T::zero(), units)
    }

    /// The raw value, in this quantity's own units.
    #[inline]
    pub fn value(&self) -> T {
        self.value.clone()
    }

    /// Consumes the quantity, returning the raw value.
    #[inline]
    pub fn into_value(self) -> T {
        self.value
    }

    /// The unit-set.
    #[inline]
    pub fn units(&self) -> &UnitSet {
        &self.units
    }

    /// The dimension of the unit-set.
    #[inline]
    pub fn dimension(&self) -> &DimensionSet {
        self.units.dimension()
    }

    /// Whether the dimension is empty (the units may still be e.g. `ppm`).
    #[inline]
    pub fn is_dimensionless(&self) -> bool {
        self.units.is_dimensionless()
    }

    /// Whether the unit-set is `NoUnits`.
    #[inline]
    pub fn is_unitless(&self) -> bool {
        self.units.is_unitless()
    }

    /// The value divided by its own unit, i.e. the raw number.
    #[inline]
    pub fn strip(self) -> T {
        self.value
    }

    /// The same physical quantity expressed in `target`.
    ///
    /// # Errors
    ///
    /// [`crate::DimensionError`] when `target` measures a different dimension.
    pub fn convert_to(&self, target: &UnitSet, registry: &Registry) -> DimensionResult<Self> {
        if &self.units == target {
            return Ok(self.clone());
        }
        let factor = registry.conversion(&self.units, target)?;
        Ok(Self::new(self.value.clone().apply_factor(&factor), target.clone()))
    }

    /// The raw value after converting into `target`.
    pub fn strip_in(&self, target: &UnitSet, registry: &Registry) -> DimensionResult<T> {
        self.convert_to(target, registry).map(Self::into_value)
    }

    /// A quantity in the same units with a different value.
    #[inline]
    pub(crate) fn with_value(&self, value: T) -> Self {
        Self::new(value, self.units.clone())
    }

    #[inline]
    pub(crate) fn raw(&self) -> &T {
        &self.value
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Free-function interface
// ─────────────────────────────────────────────────────────────────────────────

/// Anything with a dimension.
pub trait Dimensioned {
    /// The dimension-set.
    fn dimension(&self) -> &DimensionSet;
}

impl Dimensioned for DimensionSet {
    fn dimension(&self) -> &DimensionSet {
        self
    }
}

impl Dimensioned for UnitSet {
    fn dimension(&self) -> &DimensionSet {
        UnitSet::dimension(self)
    }
}

impl<T: Numeric> Dimensioned for Quantity<T> {
    fn dimension(&self) -> &DimensionSet {
        self.units.dimension()
    }
}

/// Builds a quantity; the dimension is taken from `units`.
pub fn quantity_of<T: Numeric>(value: T, units: UnitSet) -> Quantity<T> {
    Quantity::new(value, units)
}

/// The raw value of `q` in its own units.
pub fn strip_unit<T: Numeric>(q: Quantity<T>) -> T {
    q.strip()
}

/// The unit-set of `q`.
pub fn unit_of<T: Numeric>(q: &Quantity<T>) -> &UnitSet {
    q.units()
}

/// The dimension of a quantity, unit-set or dimension-set.
pub fn dimension_of<D: Dimensioned + ?Sized>(x: &D) -> &DimensionSet {
    x.dimension()
}

/// `q` expressed in `target`.
pub fn convert_to<T: Numeric>(target: &UnitSet, q: &Quantity<T>, registry: &Registry) -> DimensionResult<Quantity<T>> {
    q.convert_to(target, registry)
}

// ─────────────────────────────────────────────────────────────────────────────
// Formatting and ordering
// ─────────────────────────────────────────────────────────────────────────────

impl<T: Numeric + Display> Display for Quantity<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.units.is_unitless() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.units)
        }
    }
}

/// Only quantities carrying identical unit-sets are ordered; anything else needs
/// [`Quantity::compare`] and a registry.
impl<T: Numeric> PartialOrd for Quantity<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.units == other.units {
            self.value.partial_cmp(&other.value)
        } else {
            None
        }
    }
}

impl<T: Numeric> From<T> for Quantity<T> {
    fn from(value: T) -> Self {
        Self::unitless(value)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Operator implementations
// ─────────────────────────────────────────────────────────────────────────────

impl<T: Numeric> Mul for Quantity<T> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(self.value * rhs.value, self.units * rhs.units)
    }
}

impl<T: Numeric> Mul for &Quantity<T> {
    type Output = Quantity<T>;
    #[inline]
    fn mul(self, rhs: Self) -> Quantity<T> {
        Quantity::new(self.value.clone() * rhs.value.clone(), &self.units * &rhs.units)
    }
}

impl<T: Numeric> Div for Quantity<T> {
    type Output = Self;
    #[inline]
    fn div(self, rhs: Self) -> Self {
        Self::new(self.value / rhs.value, self.units / rhs.units)
    }
}

impl<T: Numeric> Div for &Quantity<T> {
    type Output = Quantity<T>;
    #[inline]
    fn div(self, rhs: Self) -> Quantity<T> {
        Quantity::new(self.value.clone() / rhs.value.clone(), &self.units / &rhs.units)
    }
}

impl<T: Numeric> Neg for Quantity<T> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.value, self.units)
    }
}

impl<T: Numeric> MulAssign<T> for Quantity<T> {
    #[inline]
    fn mul_assign(&mut self, rhs: T) {
        self.value = self.value.clone() * rhs;
    }
}

impl<T: Numeric> DivAssign<T> for Quantity<T> {
    #[inline]
    fn div_assign(&mut self, rhs: T) {
        self.value = self.value.clone() / rhs;
    }
}

impl<T: Numeric> Mul<&UnitSet> for Quantity<T> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: &UnitSet) -> Self {
        Self::new(self.value, &self.units * rhs)
    }
}

impl<T: Numeric> Div<&UnitSet> for Quantity<T> {
    type Output = Self;
    #[inline]
    fn div(self, rhs: &UnitSet) -> Self {
        Self::new(self.value, &self.units / rhs)
    }
}

macro_rules! impl_scalar_ops {
    ($($t:ty),+ $(,)?) => {
        $(
            impl Mul<$t> for Quantity<$t> {
                type Output = Self;
                #[inline]
                fn mul(self, rhs: $t) -> Self {
                    Self::new(self.value * rhs, self.units)
                }
            }

            impl Mul<Quantity<$t>> for $t {
                type Output = Quantity<$t>;
                #[inline]
                fn mul(self, rhs: Quantity<$t>) -> Quantity<$t> {
                    rhs * self
                }
            }

            impl Div<$t> for Quantity<$t> {
                type Output = Self;
                #[inline]
                fn div(self, rhs: $t) -> Self {
                    Self::new(self.value / rhs, self.units)
                }
            }

            impl Div<Quantity<$t>> for $t {
                type Output = Quantity<$t>;
                #[inline]
                fn div(self, rhs: Quantity<$t>) -> Quantity<$t> {
                    Quantity::new(self / rhs.value, rhs.units.inv())
                }
            }

            impl Rem<$t> for Quantity<$t> {
                type Output = Self;
                #[inline]
                fn rem(self, rhs: $t) -> Self {
                    Self::new(self.value % rhs, self.units)
                }
            }

        )+
    };
}

impl_scalar_ops!(f32, f64, Rational64);

// `f32` is left out so that a bare float literal times a unit-set is an `f64` quantity.
macro_rules! impl_unit_constructor {
    ($($t:ty),+ $(,)?) => {
        $(
            impl Mul<UnitSet> for $t {
                type Output = Quantity<$t>;
                #[inline]
                fn mul(self, rhs: UnitSet) -> Quantity<$t> {
                    Quantity::new(self, rhs)
                }
            }

            impl Mul<&UnitSet> for $t {
                type Output = Quantity<$t>;
                #[inline]
                fn mul(self, rhs: &UnitSet) -> Quantity<$t> {
                    Quantity::new(self, rhs.clone())
                }
            }
        )+
    };
}

impl_unit_constructor!(f64, Rational64);
