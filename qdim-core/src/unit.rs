//! Units and canonical unit-sets.

use crate::canonical::{canonicalize, scale_powers, Factor};
use crate::dimension::{write_power, DimensionSet};
use crate::{Exponent, Symbol};
use core::fmt::{self, Display, Formatter};
use core::hash::{Hash, Hasher};
use core::ops::{Div, Mul};
use num_traits::One;

/// An atomic named unit at a power-of-ten prefix, raised to a rational exponent.
///
/// `tens` is the SI prefix as a power of ten: millimetre is `m` with `tens == -3`. `dimension` is the
/// dimension of the bare unit (exponent one), which is all the algebra needs to know about what it measures.
///
/// Ordered by `(name, tens, power)`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Unit {
    name: Symbol,
    tens: i32,
    power: Exponent,
    dimension: DimensionSet,
}

impl Unit {
    /// Creates a unit factor.
    pub fn new(name: impl Into<Symbol>, tens: i32, power: Exponent, dimension: DimensionSet) -> Self {
        Self {
            name: name.into(),
            tens,
            power,
            dimension,
        }
    }

    /// Unit name (as registered).
    #[inline]
    pub fn name(&self) -> &Symbol {
        &self.name
    }

    /// Power-of-ten prefix.
    #[inline]
    pub fn tens(&self) -> i32 {
        self.tens
    }

    /// Rational exponent.
    #[inline]
    pub fn power(&self) -> Exponent {
        self.power
    }

    /// Dimension of the bare unit, ignoring this factor's exponent.
    #[inline]
    pub fn base_dimension(&self) -> &DimensionSet {
        &self.dimension
    }

    /// Dimension of this factor including its exponent.
    pub fn dimension(&self) -> DimensionSet {
        self.dimension.pow(self.power)
    }
}

// The bare dimension is a function of the name, so it stays out of the hash.
impl Hash for Unit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.tens.hash(state);
        self.power.hash(state);
    }
}

impl Factor for Unit {
    fn same_slot(&self, other: &Self) -> bool {
        self.name == other.name && self.tens == other.tens
    }

    fn power(&self) -> Exponent {
        self.power
    }

    fn set_power(&mut self, power: Exponent) {
        self.power = power;
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let prefixed = self.tens != 0;
        let powered = !self.power.is_one();
        if prefixed && powered {
            write!(f, "(10^{}·{})", self.tens, self.name)?;
        } else if prefixed {
            write!(f, "10^{}·{}", self.tens, self.name)?;
        } else {
            write!(f, "{}", self.name)?;
        }
        write_power(f, self.power)
    }
}

/// A product of [`Unit`]s in canonical form, together with its cached dimension.
///
/// Invariants: each `(name, tens)` pair appears once, factors are sorted, no factor has a zero exponent, and
/// `dimension()` equals the product of every factor's dimension. `m·m` and `m^2` normalize to the same set.
///
/// ```rust
/// use qdim_core::{DimensionSet, Exponent, Unit, UnitSet};
///
/// let m = UnitSet::from(Unit::new("m", 0, Exponent::from_integer(1), DimensionSet::base("Length")));
/// let area = &m * &m;
/// assert_eq!(area.units().len(), 1);
/// assert_eq!(area.units()[0].power(), Exponent::from_integer(2));
/// assert_eq!(area.sqrt(), m);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct UnitSet {
    units: Vec<Unit>,
    dimension: DimensionSet,
}

impl UnitSet {
    /// The unitless identity.
    pub const NONE: UnitSet = UnitSet {
        units: Vec::new(),
        dimension: DimensionSet::NONE,
    };

    /// Returns the unitless identity.
    #[inline]
    pub fn none() -> Self {
        Self::NONE
    }

    /// Builds a canonical set from arbitrary factors.
    pub fn new(factors: impl IntoIterator<Item = Unit>) -> Self {
        Self::from_canonical(canonicalize(factors.into_iter().collect()))
    }

    fn from_canonical(units: Vec<Unit>) -> Self {
        let dims: Vec<DimensionSet> = units.iter().map(Unit::dimension).collect();
        let dimension = DimensionSet::product(&dims);
        Self { units, dimension }
    }

    /// Canonical product of any number of sets. An empty input yields the identity.
    pub fn product<'a>(sets: impl IntoIterator<Item = &'a UnitSet>) -> Self {
        Self::new(sets.into_iter().flat_map(|s| s.units.iter().cloned()))
    }

    /// The canonical factors.
    #[inline]
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Cached dimension of the whole product.
    #[inline]
    pub fn dimension(&self) -> &DimensionSet {
        &self.dimension
    }

    /// Whether this is the unitless identity.
    #[inline]
    pub fn is_unitless(&self) -> bool {
        self.units.is_empty()
    }

    /// Whether the product is dimensionless (possibly with units, such as `ppm` or `m/km`).
    #[inline]
    pub fn is_dimensionless(&self) -> bool {
        self.dimension.is_dimensionless()
    }

    /// Raises the set to a rational exponent.
    pub fn pow(&self, power: Exponent) -> Self {
        if power.is_one() {
            return self.clone();
        }
        Self::from_canonical(scale_powers(&self.units, power))
    }

    /// Raises the set to an integer exponent.
    pub fn powi(&self, power: i32) -> Self {
        match power {
            0 => Self::none(),
            1 => self.clone(),
            -1 => self.inv(),
            2 => self * self,
            3 => &(self * self) * self,
            -2 => (self * self).inv(),
            -3 => (&(self * self) * self).inv(),
            _ => self.pow(Exponent::from_integer(power)),
        }
    }

    /// Multiplicative inverse.
    pub fn inv(&self) -> Self {
        if self.is_unitless() {
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
}

impl From<Unit> for UnitSet {
    fn from(unit: Unit) -> Self {
        Self::new([unit])
    }
}

impl Display for UnitSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, u) in self.units.iter().enumerate() {
            if i > 0 {
                f.write_str("·")?;
            }
            write!(f, "{}", u)?;
        }
        Ok(())
    }
}

impl Mul for &UnitSet {
    type Output = UnitSet;
    fn mul(self, rhs: &UnitSet) -> UnitSet {
        if rhs.is_unitless() {
            return self.clone();
        }
        if self.is_unitless() {
            return rhs.clone();
        }
        UnitSet::product([self, rhs])
    }
}

impl Mul for UnitSet {
    type Output = UnitSet;
    fn mul(self, rhs: UnitSet) -> UnitSet {
        &self * &rhs
    }
}

impl Div for &UnitSet {
    type Output = UnitSet;
    fn div(self, rhs: &UnitSet) -> UnitSet {
        self * &rhs.inv()
    }
}

impl Div for UnitSet {
    type Output = UnitSet;
    fn div(self, rhs: UnitSet) -> UnitSet {
        &self / &rhs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn length() -> DimensionSet {
        DimensionSet::base("Length")
    }

    fn time() -> DimensionSet {
        DimensionSet::base("Time")
    }

    fn u(name: &str, tens: i32, p: i32, dim: DimensionSet) -> Unit {
        Unit::new(name, tens, Exponent::from_integer(p), dim)
    }

    fn m() -> UnitSet {
        u("m", 0, 1, length()).into()
    }

    fn mm() -> UnitSet {
        u("m", -3, 1, length()).into()
    }

    fn s() -> UnitSet {
        u("s", 0, 1, time()).into()
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Canonical form
    // ─────────────────────────────────────────────────────────────────────────────

    #[test]
    fn m_times_m_is_single_entry() {
        let area = &m() * &m();
        assert_eq!(area.units(), &[u("m", 0, 2, length())]);
        assert_eq!(area, m().powi(2));
        assert_eq!(area.dimension(), &length().powi(2));
    }

    #[test]
    fn different_prefixes_do_not_merge() {
        let mixed = &m() * &mm();
        assert_eq!(mixed.units().len(), 2);
        assert_eq!(mixed.dimension(), &length().powi(2));
    }

    #[test]
    fn dimension_cache_tracks_product() {
        let v = &m() / &s();
        assert_eq!(v.dimension(), &(&length() / &time()));
        assert!((&v / &v).is_unitless());
        assert!((&m() / &mm()).is_dimensionless());
        assert!(!(&m() / &mm()).is_unitless());
    }

    #[test]
    fn order_does_not_matter() {
        let a = UnitSet::new([u("s", 0, -1, time()), u("m", 0, 1, length())]);
        let b = UnitSet::new([u("m", 0, 1, length()), u("s", 0, -1, time())]);
        assert_eq!(a, b);
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Powers
    // ─────────────────────────────────────────────────────────────────────────────

    #[test]
    fn identity_laws() {
        let v = &m() / &s();
        assert_eq!(&v * &UnitSet::none(), v);
        assert_eq!(v.powi(1), v);
        assert_eq!(v.powi(0), UnitSet::none());
        assert_eq!(v.inv().inv(), v);
        assert_eq!(UnitSet::none().inv(), UnitSet::none());
    }

    #[test]
    fn integer_fast_paths_match_general_rule() {
        let v = &(&m() / &s()) * &mm();
        for n in -4..=4 {
            assert_eq!(v.powi(n), v.pow(Exponent::from_integer(n)), "power {}", n);
        }
    }

    #[test]
    fn sqrt_of_square_is_exact() {
        assert_eq!(m().powi(2).sqrt(), m());
        let j = &m().powi(4) / &s().powi(2);
        assert_eq!(j.sqrt(), &m().powi(2) / &s());
        assert_eq!(m().sqrt().units()[0].power(), Exponent::new(1, 2));
    }

    #[test]
    fn display() {
        assert_eq!((&m() / &s()).to_string(), "m·s^-1");
        assert_eq!(mm().powi(2).to_string(), "(10^-3·m)^2");
        assert_eq!(mm().to_string(), "10^-3·m");
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Property-based tests
    // ─────────────────────────────────────────────────────────────────────────────

    fn arb_set() -> impl Strategy<Value = UnitSet> {
        prop::collection::vec((0usize..3, -3i32..=3, -3i32..=3), 0..6).prop_map(|v| {
            UnitSet::new(v.into_iter().map(|(which, tens, p)| match which {
                0 => u("m", tens, p, length()),
                1 => u("s", tens, p, time()),
                _ => u("ppm", 0, p, DimensionSet::none()),
            }))
        })
    }

    proptest! {
        #[test]
        fn prop_product_commutes(a in arb_set(), b in arb_set()) {
            prop_assert_eq!(&a * &b, &b * &a);
        }

        #[test]
        fn prop_canonicalization_idempotent(a in arb_set()) {
            prop_assert_eq!(UnitSet::new(a.units().to_vec()), a);
        }

        #[test]
        fn prop_inverse_cancels(a in arb_set()) {
            prop_assert!((&a * &a.inv()).is_unitless());
        }

        #[test]
        fn prop_dimension_is_homomorphic(a in arb_set(), b in arb_set()) {
            let ab = &a * &b;
            prop_assert_eq!(ab.dimension(), &(a.dimension() * b.dimension()));
        }
    }
}
