//! Dimensions and canonical dimension-sets.

use crate::canonical::{canonicalize, scale_powers, Factor};
use crate::{Exponent, Symbol};
use core::fmt::{self, Display, Formatter};
use core::ops::{Div, Mul};
use num_traits::{One, Zero};

/// An atomic physical dimension raised to a rational exponent, e.g. `Length^2`.
///
/// Ordered by name, then exponent.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Dimension {
    name: Symbol,
    power: Exponent,
}

impl Dimension {
    /// Creates a dimension factor.
    pub fn new(name: impl Into<Symbol>, power: Exponent) -> Self {
        Self {
            name: name.into(),
            power,
        }
    }

    /// Dimension name.
    #[inline]
    pub fn name(&self) -> &Symbol {
        &self.name
    }

    /// Rational exponent.
    #[inline]
    pub fn power(&self) -> Exponent {
        self.power
    }
}

impl Factor for Dimension {
    fn same_slot(&self, other: &Self) -> bool {
        self.name == other.name
    }

    fn power(&self) -> Exponent {
        self.power
    }

    fn set_power(&mut self, power: Exponent) {
        self.power = power;
    }
}

impl Display for Dimension {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        write_power(f, self.power)
    }
}

/// Writes `^n` or `^(n/d)` for exponents other than one.
pub(crate) fn write_power(f: &mut Formatter<'_>, power: Exponent) -> fmt::Result {
    if power.is_one() {
        Ok(())
    } else if power.is_integer() {
        write!(f, "^{}", power.numer())
    } else {
        write!(f, "^({}/{})", power.numer(), power.denom())
    }
}

/// A product of [`Dimension`]s in canonical form.
///
/// Invariants: names are unique and sorted, and no entry has a zero exponent. The empty set is the
/// dimensionless identity (see [`DimensionSet::none`]).
///
/// ```rust
/// use qdim_core::DimensionSet;
///
/// let length = DimensionSet::base("Length");
/// let time = DimensionSet::base("Time");
/// let velocity = &length / &time;
/// assert_eq!(&velocity * &time, length);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DimensionSet(Vec<Dimension>);

impl DimensionSet {
    /// The dimensionless identity.
    pub const NONE: DimensionSet = DimensionSet(Vec::new());

    /// Returns the dimensionless identity.
    #[inline]
    pub fn none() -> Self {
        Self::NONE
    }

    /// A single base dimension with exponent one.
    pub fn base(name: impl Into<Symbol>) -> Self {
        Self(vec![Dimension::new(name, Exponent::one())])
    }

    /// Builds a canonical set from arbitrary factors.
    pub fn new(factors: impl IntoIterator<Item = Dimension>) -> Self {
        Self(canonicalize(factors.into_iter().collect()))
    }

    /// Canonical product of any number of sets. An empty input yields the identity.
    pub fn product<'a>(sets: impl IntoIterator<Item = &'a DimensionSet>) -> Self {
        Self::new(sets.into_iter().flat_map(|s| s.0.iter().cloned()))
    }

    /// The canonical factors.
    #[inline]
    pub fn dimensions(&self) -> &[Dimension] {
        &self.0
    }

    /// Whether this is the dimensionless identity.
    #[inline]
    pub fn is_dimensionless(&self) -> bool {
        self.0.is_empty()
    }

    /// Raises the set to a rational exponent.
    pub fn pow(&self, power: Exponent) -> Self {
        if power.is_one() {
            return self.clone();
        }
        Self(scale_powers(&self.0, power))
    }

    /// Raises the set to an integer exponent.
    pub fn powi(&self, power: i32) -> Self {
        match power {
            0 => Self::none(),
            1 => self.clone(),
            -1 => self.inv(),
            2 => self * self,
            _ => self.pow(Exponent::from_integer(power)),
        }
    }

    /// Multiplicative inverse.
    pub fn inv(&self) -> Self {
        if self.is_dimensionless() {
            return self.clone();
        }
        self.pow(-Exponent::one())
    }

    /// Square root (halves every exponent).
    pub fn sqrt(&self) -> Self {
        self.pow(Exponent::new(1, 2))
    }

    /// Cube root (thirds every exponent).
    pub fn cbrt(&self) -> Self {
        self.pow(Exponent::new(1, 3))
    }

    /// Exponent of the named dimension, zero when absent.
    pub fn power_of(&self, name: &str) -> Exponent {
        self.0
            .iter()
            .find(|d| d.name.as_str() == name)
            .map_or_else(Exponent::zero, |d| d.power)
    }
}

impl Display for DimensionSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("1");
        }
        for (i, d) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("·")?;
            }
            write!(f, "{}", d)?;
        }
        Ok(())
    }
}

impl Mul for &DimensionSet {
    type Output = DimensionSet;
    fn mul(self, rhs: &DimensionSet) -> DimensionSet {
        if rhs.is_dimensionless() {
            return self.clone();
        }
        if self.is_dimensionless() {
            return rhs.clone();
        }
        DimensionSet::product([self, rhs])
    }
}

impl Mul for DimensionSet {
    type Output = DimensionSet;
    fn mul(self, rhs: DimensionSet) -> DimensionSet {
        &self * &rhs
    }
}

impl Div for &DimensionSet {
    type Output = DimensionSet;
    fn div(self, rhs: &DimensionSet) -> DimensionSet {
        self * &rhs.inv()
    }
}

impl Div for DimensionSet {
    type Output = DimensionSet;
    fn div(self, rhs: DimensionSet) -> DimensionSet {
        &self / &rhs
    }
}
