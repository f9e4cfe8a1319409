//! Unit registry: the write-once table of base conversion data.
//!
//! A [`Registry`] is produced by an explicit initialization step ([`RegistryBuilder`] or
//! [`crate::config::RegistryConfig`]) and is immutable afterwards, so it can be shared by reference across
//! threads without synchronization.
//!
//! Conversions are relative to one *reference unit* per base dimension. A derived unit is declared as a
//! definition (a unit-set over already-declared units) times a scale; its base factor is resolved once, at
//! declaration time.
//!
//! ```rust
//! use qdim_core::{ConversionFactor, Rational64, Registry};
//!
//! let builder = Registry::builder().base_dimension("Time", "s")?;
//! let s = builder.declared().unit("s")?;
//! let reg = builder
//!     .unit("min", &s, ConversionFactor::exact(Rational64::from_integer(60)))?
//!     .build();
//!
//! let f = reg.conversion(&reg.unit("min")?, &reg.prefixed_unit("s", -3)?).unwrap();
//! assert_eq!(f.exact_part(), Rational64::from_integer(60_000));
//! # Ok::<(), qdim_core::RegistryError>(())
//! ```

use crate::dimension::DimensionSet;
use crate::error::{DimensionResult, RegistryError, RegistryResult};
use crate::factor::ConversionFactor;
use crate::numeric::Numeric;
use crate::quantity::Quantity;
use crate::unit::{Unit, UnitSet};
use crate::{Exponent, Symbol};
use log::debug;
use num_traits::One;
use std::collections::{BTreeMap, HashMap};

/// Declared data for one unit name.
#[derive(Clone, Debug, PartialEq)]
pub struct UnitDefinition {
    name: Symbol,
    dimension: DimensionSet,
    base: ConversionFactor,
}

impl UnitDefinition {
    /// Unit name.
    pub fn name(&self) -> &Symbol {
        &self.name
    }

    /// Dimension of the bare unit.
    pub fn dimension(&self) -> &DimensionSet {
        &self.dimension
    }

    /// Factor converting one of this unit into the reference units of its dimension.
    pub fn base_factor(&self) -> ConversionFactor {
        self.base
    }

    /// The unit at a power-of-ten prefix, exponent one.
    pub fn at(&self, tens: i32) -> Unit {
        Unit::new(self.name.clone(), tens, Exponent::one(), self.dimension.clone())
    }
}

/// Immutable lookup table from unit names to base conversion data, plus the per-dimension preferred units
/// used when promoting operands.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    references: BTreeMap<Symbol, Symbol>,
    units: HashMap<Symbol, UnitDefinition>,
    preferred: HashMap<Symbol, UnitSet>,
}

impl Registry {
    /// Starts a new declaration phase.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Declared data for `name`.
    pub fn definition(&self, name: &str) -> Option<&UnitDefinition> {
        self.units.get(name)
    }

    /// Base factor for `name`.
    pub fn base_factor(&self, name: &str) -> Option<ConversionFactor> {
        self.units.get(name).map(UnitDefinition::base_factor)
    }

    /// Whether `name` is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.units.contains_key(name)
    }

    /// Number of declared units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether nothing has been declared.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Declared base dimensions, sorted by name.
    pub fn dimensions(&self) -> impl Iterator<Item = &Symbol> {
        self.references.keys()
    }

    /// `name` as a unit-set without prefix.
    pub fn unit(&self, name: &str) -> RegistryResult<UnitSet> {
        self.prefixed_unit(name, 0)
    }

    /// `name` at a power-of-ten prefix (`prefixed_unit("m", -3)` is millimetre).
    pub fn prefixed_unit(&self, name: &str, tens: i32) -> RegistryResult<UnitSet> {
        self.definition(name)
            .map(|def| UnitSet::from(def.at(tens)))
            .ok_or_else(|| RegistryError::UnknownUnit(name.to_string()))
    }

    /// Reference unit of a base dimension.
    pub fn reference_unit(&self, dimension: &str) -> RegistryResult<UnitSet> {
        let name = self
            .references
            .get(dimension)
            .ok_or_else(|| RegistryError::UnknownDimension(dimension.to_string()))?;
        self.unit(name.as_str())
    }

    /// Units operands of dimension `dimension` are promoted into.
    ///
    /// Built from the preferred units of each base dimension, raised to its exponent. The dimensionless set maps
    /// to the unitless set. `None` when some base dimension was never declared.
    pub fn preferred_units(&self, dimension: &DimensionSet) -> Option<UnitSet> {
        let parts = dimension
            .dimensions()
            .iter()
            .map(|d| self.preferred.get(d.name().as_str()).map(|u| u.pow(d.power())))
            .collect::<Option<Vec<_>>>()?;
        Some(UnitSet::product(&parts))
    }

    /// Factor converting values in `from` into `to`.
    ///
    /// # Errors
    ///
    /// [`crate::DimensionError`] when the dimensions differ.
    pub fn conversion(&self, from: &UnitSet, to: &UnitSet) -> DimensionResult<ConversionFactor> {
        ConversionFactor::between(from, to, self)
    }

    /// Shorthand for `value` in the unprefixed unit `name`.
    pub fn quantity<T: Numeric>(&self, value: T, name: &str) -> RegistryResult<Quantity<T>> {
        Ok(Quantity::new(value, self.unit(name)?))
    }
}

/// Declaration phase of a [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    registry: Registry,
}

impl RegistryBuilder {
    /// Empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// What has been declared so far.
    pub fn declared(&self) -> &Registry {
        &self.registry
    }

    /// Declares a base dimension together with its reference unit (base factor one). The reference unit is also
    /// the dimension's preferred unit until [`RegistryBuilder::prefer`] says otherwise.
    pub fn base_dimension(mut self, dimension: &str, reference_unit: &str) -> RegistryResult<Self> {
        if self.registry.references.contains_key(dimension) {
            return Err(RegistryError::DuplicateDimension(dimension.to_string()));
        }
        if self.registry.contains(reference_unit) {
            return Err(RegistryError::DuplicateUnit(reference_unit.to_string()));
        }

        let definition = UnitDefinition {
            name: Symbol::new(reference_unit),
            dimension: DimensionSet::base(dimension),
            base: ConversionFactor::IDENTITY,
        };
        let preferred = UnitSet::from(definition.at(0));
        debug!("declared dimension {} with reference unit {}", dimension, reference_unit);

        self.registry
            .references
            .insert(Symbol::new(dimension), Symbol::new(reference_unit));
        self.registry.preferred.insert(Symbol::new(dimension), preferred);
        self.registry.units.insert(Symbol::new(reference_unit), definition);
        Ok(self)
    }

    /// Declares `name` as `scale` times `definition`.
    ///
    /// `definition` may only use units declared earlier; the unitless set declares a dimensionless unit.
    pub fn unit(mut self, name: &str, definition: &UnitSet, scale: ConversionFactor) -> RegistryResult<Self> {
        if self.registry.contains(name) {
            return Err(RegistryError::DuplicateUnit(name.to_string()));
        }
        if !scale.is_valid() {
            return Err(RegistryError::InvalidFactor(format!("{}: {:?}", name, scale)));
        }
        if let Some(unknown) = definition
            .units()
            .iter()
            .find(|u| !self.registry.contains(u.name().as_str()))
        {
            return Err(RegistryError::UnknownUnit(unknown.name().to_string()));
        }

        let base = ConversionFactor::of_units(definition, &self.registry) * scale;
        debug!("declared unit {} = {:?} x ({})", name, scale, definition);

        self.registry.units.insert(
            Symbol::new(name),
            UnitDefinition {
                name: Symbol::new(name),
                dimension: definition.dimension().clone(),
                base,
            },
        );
        Ok(self)
    }

    /// Declares a dimensionless unit such as `ppm`.
    pub fn dimensionless_unit(self, name: &str, scale: ConversionFactor) -> RegistryResult<Self> {
        self.unit(name, &UnitSet::none(), scale)
    }

    /// Sets the units a base dimension is promoted into (e.g. `kg` rather than the reference `g`).
    pub fn prefer(mut self, dimension: &str, units: UnitSet) -> RegistryResult<Self> {
        if !self.registry.references.contains_key(dimension) {
            return Err(RegistryError::UnknownDimension(dimension.to_string()));
        }
        if units.dimension() != &DimensionSet::base(dimension) {
            return Err(RegistryError::InvalidPreference(format!(
                "{} does not measure {}",
                units, dimension
            )));
        }
        if let Some(unknown) = units
            .units()
            .iter()
            .find(|u| !self.registry.contains(u.name().as_str()))
        {
            return Err(RegistryError::UnknownUnit(unknown.name().to_string()));
        }

        debug!("preferring {} for {}", units, dimension);
        self.registry.preferred.insert(Symbol::new(dimension), units);
        Ok(self)
    }

    /// Ends the declaration phase.
    pub fn build(self) -> Registry {
        debug!(
            "registry built with {} dimensions and {} units",
            self.registry.references.len(),
            self.registry.units.len()
        );
        self.registry
    }
}
