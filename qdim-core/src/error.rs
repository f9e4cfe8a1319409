//! Error types.
//!
//! The operator suite has exactly one failure mode, [`DimensionError`]. Declaring units and loading registry
//! descriptions can fail in other ways; those are reported through [`RegistryError`] and never leak into
//! arithmetic.

use crate::dimension::DimensionSet;

/// Raised when an operation needs two operands (or an operand and a target) of the same physical dimension.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("dimension mismatch: {left} and {right}")]
pub struct DimensionError {
    /// Dimension of the left operand (or the converted value).
    pub left: DimensionSet,
    /// Dimension of the right operand (or the conversion target).
    pub right: DimensionSet,
}

impl DimensionError {
    /// Builds an error from the two offending dimensions.
    pub fn new(left: &DimensionSet, right: &DimensionSet) -> Self {
        Self {
            left: left.clone(),
            right: right.clone(),
        }
    }
}

/// Result type for dimension-checked operations.
pub type DimensionResult<T> = Result<T, DimensionError>;

/// Result type for registry declaration and lookup.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Error type for registry declaration, lookup and configuration loading.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryError {
    /// A unit name was not declared.
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    /// A dimension name was not declared.
    #[error("Unknown dimension: {0}")]
    UnknownDimension(String),

    /// A unit name was declared twice.
    #[error("Duplicate unit: {0}")]
    DuplicateUnit(String),

    /// A dimension name was declared twice.
    #[error("Duplicate dimension: {0}")]
    DuplicateDimension(String),

    /// A scale factor was zero, negative or not finite.
    #[error("Invalid conversion factor: {0}")]
    InvalidFactor(String),

    /// Preferred units do not measure the dimension they were registered for.
    #[error("Invalid preferred units: {0}")]
    InvalidPreference(String),

    /// A registry description could not be read or parsed.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}
