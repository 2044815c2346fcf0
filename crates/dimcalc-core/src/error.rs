//! Error types for dimcalc-core

use thiserror::Error;

/// Result type for dimcalc-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while resolving unit expressions or evaluating quantities
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Malformed unit expression
    #[error("Cannot parse unit: {0}")]
    Parse(String),

    /// Token did not match any base or compound unit
    #[error("Unit {0} not found")]
    UnknownUnit(String),

    /// Operation requires equal dimensional order
    #[error("Order of units: {left} and {right} does not match")]
    DimensionMismatch { left: String, right: String },

    /// Exponent operand carries a unit
    #[error("Cannot raise to power of quantity with units: {0}")]
    InvalidExponent(String),

    /// Denominator of a unit expression scales to zero
    #[error("Unit {0} has a zero scale denominator")]
    ZeroScale(String),

    /// Compound unit definition refers back to itself
    #[error("Compound unit {0} is defined in terms of itself")]
    CompoundCycle(String),
}

impl Error {
    pub(crate) fn mismatch(left: impl Into<String>, right: impl Into<String>) -> Self {
        Error::DimensionMismatch {
            left: left.into(),
            right: right.into(),
        }
    }
}
