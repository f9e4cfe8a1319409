//! Dimensionally checked quantities with automatic, exact-when-possible unit conversion.
//!
//! `qdim` is the user-facing crate in this workspace. It re-exports the full API from `qdim-core` and adds
//! [`si`], a ready-made SI registry with constructors for the common units.
//!
//! A value is a [`Quantity<T>`]: a number of any [`Numeric`] backend paired with a canonical [`UnitSet`].
//! Multiplication and division are always legal and combine unit-sets. Everything that may need a conversion
//! (adding, comparing, min/max, integer division, rounding into other units) takes the [`Registry`] explicitly
//! and fails with a [`DimensionError`] when the dimensions disagree.
//!
//! # Quick start
//!
//! ```rust
//! use qdim::si;
//!
//! let reg = si::registry();
//! let a = 1.0 * si::meter();
//! let b = 250.0 * si::millimeter();
//!
//! let sum = a.add(&b, reg).unwrap();
//! assert_eq!(sum.value(), 1.25);
//! assert_eq!(sum.units(), &si::meter());
//!
//! // min/max hand back the winning operand in its own units
//! assert_eq!(a.min(&b, reg).unwrap(), b);
//!
//! // mixing dimensions is an error, equality is just false
//! let t = 1.0 * si::second();
//! assert!(a.add(&t, reg).is_err());
//! assert!(!a.equals(&t, reg));
//! ```
//!
//! Exact conversions stay exact on the rational backend:
//!
//! ```rust
//! use qdim::{si, Rational64};
//!
//! let reg = si::registry();
//! let d = Rational64::from_integer(3) * si::mile();
//! let ft = d.strip_in(&si::foot(), reg).unwrap();
//! assert_eq!(ft, Rational64::from_integer(15_840));
//! ```
//!
//! # Custom registries
//!
//! Registries can be declared in code with [`Registry::builder`] or loaded from a TOML description with
//! [`RegistryConfig`].

#![deny(missing_docs)]
#![forbid(unsafe_code)]

pub use qdim_core::*;

pub mod si;
