//! dimcalc-core: Dimensional analysis engine
//!
//! This crate parses compound unit expressions such as `kg*m**2/s**2`,
//! reduces them to a dimensional order vector plus a scale factor to SI,
//! and uses that signature to check and perform arithmetic on quantities.
//! It has no I/O and can be embedded in any front end.
//!
//! # Example
//!
//! ```
//! use dimcalc_core::{conversion_factor, Quantity};
//!
//! // Conversion factors between compatible units
//! assert_eq!(conversion_factor("miles", "m").unwrap(), 1609.344);
//!
//! // Quantities convert the right operand into the left unit
//! let total = (Quantity::with_unit(1.0, "m")? + Quantity::with_unit(1.0, "km")?)?;
//! assert_eq!(total.value(), 1001.0);
//!
//! // Units of products and quotients are inferred
//! let speed = (Quantity::with_unit(4.0, "m")? / Quantity::with_unit(1.0, "s")?)?;
//! assert_eq!(speed.unit(), Some("m/s"));
//! # Ok::<(), dimcalc_core::Error>(())
//! ```

pub mod catalog;
pub mod error;
pub mod eval;
pub mod parser;
pub mod resolve;
pub mod types;

pub use catalog::{BaseUnit, Catalog, CompoundUnit, Prefix, BASE_UNITS, COMPOUND_UNITS, PREFIXES};
pub use error::{Error, Result};
pub use eval::BinaryOp;
pub use parser::{split, Split, UnitExpr};
pub use resolve::{combine, same_dimension, Resolution, Resolver, MAX_COMPOUND_DEPTH};
pub use types::{Dimension, OrderVector, Quantity, ResolvedUnit};

/// Resolve a unit expression against the standard catalog
pub fn resolve(expression: &str) -> Result<Resolution> {
    Resolver::standard().resolve(expression)
}

/// Multiplier converting a value in `from` into `to` (standard catalog)
pub fn conversion_factor(from: &str, to: &str) -> Result<f64> {
    Resolver::standard().conversion_factor(from, to)
}

/// Main entry point for unit work against one catalog
#[derive(Debug, Clone, Copy)]
pub struct Engine<'c> {
    resolver: Resolver<'c>,
}

impl Engine<'static> {
    /// Create an engine over the standard catalog
    pub fn new() -> Self {
        Self {
            resolver: Resolver::standard(),
        }
    }
}

impl<'c> Engine<'c> {
    /// Create an engine over a caller-provided catalog
    pub fn with_catalog(catalog: &Catalog<'c>) -> Self {
        Self {
            resolver: Resolver::new(catalog),
        }
    }

    pub fn catalog(&self) -> &Catalog<'c> {
        self.resolver.catalog()
    }

    /// Split an expression into numerator and denominator tokens
    pub fn split(&self, expression: &str) -> Result<Split> {
        parser::split(expression)
    }

    /// Reduce an expression to its order vector and SI scale
    pub fn resolve(&self, expression: &str) -> Result<Resolution> {
        self.resolver.resolve(expression)
    }

    pub fn conversion_factor(&self, from: &str, to: &str) -> Result<f64> {
        self.resolver.conversion_factor(from, to)
    }

    /// True if both expressions share the same dimensional order
    pub fn same_dimension(&self, left: &str, right: &str) -> Result<bool> {
        let left = self.resolve(left)?;
        let right = self.resolve(right)?;
        Ok(same_dimension(&left.order, &right.order))
    }

    /// Convert a raw value from one unit to another
    pub fn convert(&self, value: f64, from: &str, to: &str) -> Result<f64> {
        Ok(value * self.conversion_factor(from, to)?)
    }
}

impl Default for Engine<'static> {
    fn default() -> Self {
        Self::new()
    }
}
