//! Standard SI declaration set.
//!
//! [`registry()`] returns a process-wide registry built on first use and read-only afterwards. It declares the
//! seven SI base dimensions (reference units `m`, `g`, `s`, `A`, `K`, `mol`, `cd`, with `kg` preferred for
//! mass), the common derived units, a few customary and time units, and the dimensionless angle and ratio units.
//!
//! The unit constructors below build their unit-sets directly and never touch the registry, so they are cheap
//! enough to call in hot loops.
//!
//! ```rust
//! use qdim::si;
//!
//! let reg = si::registry();
//! let speed = 90.0 * si::kilometer() / &si::hour();
//! let v = speed.convert_to(&(si::meter() / si::second()), reg).unwrap();
//! assert_eq!(v.value(), 25.0);
//! ```

use log::error;
use once_cell::sync::Lazy;
use qdim_core::{
    ConversionFactor, DimensionSet, Exponent, Rational64, Registry, RegistryError, RegistryResult, Unit, UnitSet,
};

static SI: Lazy<RegistryResult<Registry>> = Lazy::new(|| {
    declare().map_err(|err| {
        error!("SI declaration set rejected: {}", err);
        err
    })
});

/// The shared SI registry.
///
/// # Panics
///
/// If the built-in declaration set is rejected, which [`try_registry`] reports as an error instead.
pub fn registry() -> &'static Registry {
    try_registry().expect("built-in SI declarations are consistent")
}

/// The shared SI registry, or the error that rejected its declaration set.
pub fn try_registry() -> Result<&'static Registry, RegistryError> {
    SI.as_ref().map_err(Clone::clone)
}

fn exact(numer: i64, denom: i64) -> ConversionFactor {
    ConversionFactor::exact(Rational64::new(numer, denom))
}

/// Builds the SI declaration set from scratch.
pub fn declare() -> RegistryResult<Registry> {
    let builder = Registry::builder()
        .base_dimension("Length", "m")?
        .base_dimension("Mass", "g")?
        .base_dimension("Time", "s")?
        .base_dimension("Current", "A")?
        .base_dimension("Temperature", "K")?
        .base_dimension("Amount", "mol")?
        .base_dimension("Luminosity", "cd")?
        .prefer("Mass", kilogram())?;

    builder
        // derived
        .unit("N", &(kilogram() * meter() / second().powi(2)), ConversionFactor::IDENTITY)?
        .unit("J", &(newton() * meter()), ConversionFactor::IDENTITY)?
        .unit("W", &(joule() / second()), ConversionFactor::IDENTITY)?
        .unit("Pa", &(newton() / meter().powi(2)), ConversionFactor::IDENTITY)?
        .unit("Hz", &second().inv(), ConversionFactor::IDENTITY)?
        .unit("L", &named("m", -1, length()).powi(3), ConversionFactor::IDENTITY)?
        // customary
        .unit("inch", &meter(), exact(254, 10_000))?
        .unit("ft", &inch(), exact(12, 1))?
        .unit("yd", &foot(), exact(3, 1))?
        .unit("mi", &yard(), exact(1760, 1))?
        .unit("lb", &gram(), exact(45_359_237, 100_000))?
        // time
        .unit("minute", &second(), exact(60, 1))?
        .unit("h", &minute(), exact(60, 1))?
        .unit("d", &hour(), exact(24, 1))?
        // dimensionless
        .dimensionless_unit("rad", ConversionFactor::IDENTITY)?
        .dimensionless_unit(
            "deg",
            ConversionFactor::new(core::f64::consts::PI, Rational64::new(1, 180)),
        )?
        .dimensionless_unit("percent", exact(1, 100))?
        .dimensionless_unit("ppm", exact(1, 1_000_000))
        .map(|b| b.build())
}

// ─────────────────────────────────────────────────────────────────────────────
// Dimensions
// ─────────────────────────────────────────────────────────────────────────────

/// `Length`.
pub fn length() -> DimensionSet {
    DimensionSet::base("Length")
}

/// `Mass`.
pub fn mass() -> DimensionSet {
    DimensionSet::base("Mass")
}

/// `Time`.
pub fn time() -> DimensionSet {
    DimensionSet::base("Time")
}

fn named(name: &str, tens: i32, dimension: DimensionSet) -> UnitSet {
    UnitSet::from(Unit::new(name, tens, Exponent::from_integer(1), dimension))
}

// ─────────────────────────────────────────────────────────────────────────────
// Base units
// ─────────────────────────────────────────────────────────────────────────────

/// Metre.
pub fn meter() -> UnitSet {
    named("m", 0, length())
}

/// Millimetre.
pub fn millimeter() -> UnitSet {
    named("m", -3, length())
}

/// Centimetre.
pub fn centimeter() -> UnitSet {
    named("m", -2, length())
}

/// Kilometre.
pub fn kilometer() -> UnitSet {
    named("m", 3, length())
}

/// Gram.
pub fn gram() -> UnitSet {
    named("g", 0, mass())
}

/// Kilogram.
pub fn kilogram() -> UnitSet {
    named("g", 3, mass())
}

/// Second.
pub fn second() -> UnitSet {
    named("s", 0, time())
}

/// Millisecond.
pub fn millisecond() -> UnitSet {
    named("s", -3, time())
}

/// Ampere.
pub fn ampere() -> UnitSet {
    named("A", 0, DimensionSet::base("Current"))
}

/// Kelvin.
pub fn kelvin() -> UnitSet {
    named("K", 0, DimensionSet::base("Temperature"))
}

/// Mole.
pub fn mole() -> UnitSet {
    named("mol", 0, DimensionSet::base("Amount"))
}

/// Candela.
pub fn candela() -> UnitSet {
    named("cd", 0, DimensionSet::base("Luminosity"))
}

// ─────────────────────────────────────────────────────────────────────────────
// Derived units
// ─────────────────────────────────────────────────────────────────────────────

/// Newton.
pub fn newton() -> UnitSet {
    named("N", 0, (kilogram() * meter() / second().powi(2)).dimension().clone())
}

/// Joule.
pub fn joule() -> UnitSet {
    named("J", 0, (newton() * meter()).dimension().clone())
}

/// Watt.
pub fn watt() -> UnitSet {
    named("W", 0, (joule() / second()).dimension().clone())
}

/// Pascal.
pub fn pascal() -> UnitSet {
    named("Pa", 0, (newton() / meter().powi(2)).dimension().clone())
}

/// Hertz.
pub fn hertz() -> UnitSet {
    named("Hz", 0, time().inv())
}

/// Litre.
pub fn liter() -> UnitSet {
    named("L", 0, length().powi(3))
}

/// Millilitre.
pub fn milliliter() -> UnitSet {
    named("L", -3, length().powi(3))
}

// ─────────────────────────────────────────────────────────────────────────────
// Customary and time units
// ─────────────────────────────────────────────────────────────────────────────

/// International inch.
pub fn inch() -> UnitSet {
    named("inch", 0, length())
}

/// International foot.
pub fn foot() -> UnitSet {
    named("ft", 0, length())
}

/// International yard.
pub fn yard() -> UnitSet {
    named("yd", 0, length())
}

/// International mile.
pub fn mile() -> UnitSet {
    named("mi", 0, length())
}

/// Avoirdupois pound.
pub fn pound() -> UnitSet {
    named("lb", 0, mass())
}

/// Minute.
pub fn minute() -> UnitSet {
    named("minute", 0, time())
}

/// Hour.
pub fn hour() -> UnitSet {
    named("h", 0, time())
}

/// Day.
pub fn day() -> UnitSet {
    named("d", 0, time())
}

// ─────────────────────────────────────────────────────────────────────────────
// Dimensionless units
// ─────────────────────────────────────────────────────────────────────────────

/// Radian.
pub fn radian() -> UnitSet {
    named("rad", 0, DimensionSet::none())
}

/// Degree of arc.
pub fn degree() -> UnitSet {
    named("deg", 0, DimensionSet::none())
}

/// Percent.
pub fn percent() -> UnitSet {
    named("percent", 0, DimensionSet::none())
}

/// Parts per million.
pub fn ppm() -> UnitSet {
    named("ppm", 0, DimensionSet::none())
}
