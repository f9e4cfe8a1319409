//! Registry descriptions in TOML.
//!
//! A description lists base dimensions, then units defined in terms of earlier units, then optional preferred
//! units per dimension:
//!
//! ```toml
//! [[dimension]]
//! name = "Length"
//! reference = "m"
//!
//! [[unit]]
//! name = "ft"
//! exact = "3048/10000"
//! definition = [{ unit = "m" }]
//!
//! [[unit]]
//! name = "deg"
//! exact = "1/180"
//! inexact = 3.141592653589793
//!
//! [[preferred]]
//! dimension = "Length"
//! units = [{ unit = "m", tens = 3 }]
//! ```
//!
//! Powers may be written as integers (`power = -1`) or rational strings (`power = "1/2"`).

use crate::error::{RegistryError, RegistryResult};
use crate::factor::ConversionFactor;
use crate::registry::{Registry, RegistryBuilder};
use crate::unit::UnitSet;
use crate::Exponent;
use num_rational::Rational64;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Parsed registry description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Base dimensions with their reference units.
    #[serde(default, rename = "dimension")]
    pub dimensions: Vec<DimensionSettings>,
    /// Derived and dimensionless units, in declaration order.
    #[serde(default, rename = "unit")]
    pub units: Vec<UnitSettings>,
    /// Preferred units per base dimension.
    #[serde(default)]
    pub preferred: Vec<PreferredSettings>,
}

/// One base dimension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionSettings {
    /// Dimension name, e.g. `Length`.
    pub name: String,
    /// Name of its reference unit, e.g. `m`.
    pub reference: String,
}

/// One derived unit: `inexact * exact * product(definition)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitSettings {
    /// Unit name.
    pub name: String,
    /// Factors of the defining unit-set; empty for a dimensionless unit.
    #[serde(default)]
    pub definition: Vec<FactorSettings>,
    /// Exact scale as a rational string (`"3048/10000"`). Defaults to one.
    #[serde(default)]
    pub exact: Option<String>,
    /// Inexact scale. Defaults to one.
    #[serde(default)]
    pub inexact: Option<f64>,
}

/// One factor of a unit-set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorSettings {
    /// Unit name.
    pub unit: String,
    /// Power-of-ten prefix.
    #[serde(default)]
    pub tens: i32,
    /// Exponent; one when omitted.
    #[serde(default)]
    pub power: Option<PowerSetting>,
}

/// An exponent written either as an integer or as a rational string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PowerSetting {
    /// `power = 2`
    Integer(i32),
    /// `power = "1/2"`
    Ratio(String),
}

/// Preferred units for one base dimension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferredSettings {
    /// Dimension name.
    pub dimension: String,
    /// Factors of the preferred unit-set.
    pub units: Vec<FactorSettings>,
}

impl RegistryConfig {
    /// Load a registry description from a TOML file.
    ///
    /// # Errors
    /// [`RegistryError::ConfigurationError`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> RegistryResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RegistryError::ConfigurationError(format!("Failed to read config file: {}", e))
        })?;
        content.parse()
    }

    /// Declares everything in the description, in order.
    pub fn build(&self) -> RegistryResult<Registry> {
        let mut builder = Registry::builder();
        for dim in &self.dimensions {
            builder = builder.base_dimension(&dim.name, &dim.reference)?;
        }
        for unit in &self.units {
            let definition = unit_set(&builder, &unit.definition)?;
            let scale = unit.factor()?;
            builder = builder.unit(&unit.name, &definition, scale)?;
        }
        for pref in &self.preferred {
            let units = unit_set(&builder, &pref.units)?;
            builder = builder.prefer(&pref.dimension, units)?;
        }
        Ok(builder.build())
    }
}

impl FromStr for RegistryConfig {
    type Err = RegistryError;

    fn from_str(s: &str) -> RegistryResult<Self> {
        toml::from_str(s).map_err(|e| {
            RegistryError::ConfigurationError(format!("Failed to parse config file: {}", e))
        })
    }
}

impl UnitSettings {
    /// The declared scale.
    pub fn factor(&self) -> RegistryResult<ConversionFactor> {
        let exact = match &self.exact {
            Some(text) => Rational64::from_str(text.trim()).map_err(|e| {
                RegistryError::InvalidFactor(format!("{}: '{}' ({})", self.name, text, e))
            })?,
            None => Rational64::from_integer(1),
        };
        Ok(ConversionFactor::new(self.inexact.unwrap_or(1.0), exact))
    }
}

impl PowerSetting {
    /// The exponent as a rational.
    pub fn exponent(&self) -> RegistryResult<Exponent> {
        match self {
            PowerSetting::Integer(n) => Ok(Exponent::from_integer(*n)),
            PowerSetting::Ratio(text) => Exponent::from_str(text.trim()).map_err(|e| {
                RegistryError::ConfigurationError(format!("Invalid power '{}': {}", text, e))
            }),
        }
    }
}

fn unit_set(builder: &RegistryBuilder, factors: &[FactorSettings]) -> RegistryResult<UnitSet> {
    let parts = factors
        .iter()
        .map(|f| -> RegistryResult<UnitSet> {
            let power = match &f.power {
                Some(p) => p.exponent()?,
                None => Exponent::from_integer(1),
            };
            Ok(builder.declared().prefixed_unit(&f.unit, f.tens)?.pow(power))
        })
        .collect::<RegistryResult<Vec<_>>>()?;
    Ok(UnitSet::product(&parts))
}
