//! Core algebra for dimension-checked quantities with run-time unit-sets.
//!
//! `qdim-core` provides the unit/dimension algebra and the operator suite built on it:
//!
//! - A [`Dimension`] is a named physical dimension with a rational exponent; a [`DimensionSet`] is a canonical
//!   product of them.
//! - A [`Unit`] is a named unit at a power-of-ten prefix with a rational exponent; a [`UnitSet`] is a canonical
//!   product of them that caches its dimension.
//! - A [`ConversionFactor`] relates two unit-sets of the same dimension, on an exact rational track and an
//!   inexact floating track.
//! - A [`Quantity<T>`] pairs a value of any [`Numeric`] backend (`f32`, `f64`, [`Rational64`]) with a unit-set.
//!
//! Unit names and their base factors live in an immutable [`Registry`], built once with a [`RegistryBuilder`]
//! or from a TOML description ([`RegistryConfig`]) and passed by reference to every operation that converts.
//!
//! Most users should depend on `qdim` (the facade crate), which also ships an SI registry.
//!
//! # Quick start
//!
//! ```rust
//! use qdim_core::{ConversionFactor, Rational64, Registry};
//!
//! let builder = Registry::builder().base_dimension("Length", "m")?;
//! let m = builder.declared().unit("m")?;
//! let reg = builder
//!     .unit("ft", &m, ConversionFactor::exact(Rational64::new(3048, 10000)))?
//!     .build();
//!
//! let mm = reg.prefixed_unit("m", -3)?;
//! let q = 3000.0 * mm;
//! assert_eq!(q.strip_in(&m, &reg).unwrap(), 3.0);
//!
//! let total = (1.0 * reg.unit("ft")?).add(&q, &reg).unwrap();
//! assert!((total.value() - 3.3048).abs() < 1e-12);
//! assert_eq!(total.units(), &m);
//! # Ok::<(), qdim_core::RegistryError>(())
//! ```
//!
//! # Errors
//!
//! Operators that need matching dimensions return [`DimensionResult`]. Registry declaration and configuration
//! loading return [`RegistryResult`]. Nothing in this crate panics on bad input.

#![deny(missing_docs)]
#![forbid(unsafe_code)]

// ─────────────────────────────────────────────────────────────────────────────
// Core modules
// ─────────────────────────────────────────────────────────────────────────────

mod canonical;
pub mod config;
mod dimension;
mod error;
mod factor;
mod numeric;
pub mod ops;
mod quantity;
mod registry;
mod symbol;
mod unit;

// ─────────────────────────────────────────────────────────────────────────────
// Public re-exports of core types
// ─────────────────────────────────────────────────────────────────────────────

pub use config::RegistryConfig;
pub use dimension::{Dimension, DimensionSet};
pub use error::{DimensionError, DimensionResult, RegistryError, RegistryResult};
pub use factor::ConversionFactor;
pub use numeric::{Numeric, Real};
pub use ops::functions::Dimensionless;
pub use ops::Compatibility;
pub use quantity::{convert_to, dimension_of, quantity_of, strip_unit, unit_of, Dimensioned, Quantity};
pub use registry::{Registry, RegistryBuilder, UnitDefinition};
pub use symbol::Symbol;
pub use unit::{Unit, UnitSet};

pub use num_rational::Rational64;

/// Rational exponent carried by dimensions and units.
pub type Exponent = num_rational::Ratio<i32>;
