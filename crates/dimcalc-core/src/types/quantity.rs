//! Quantity: numeric value tagged with a resolved unit expression

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

use super::OrderVector;
use crate::error::{Error, Result};
use crate::eval::{self, BinaryOp};
use crate::parser::UnitExpr;
use crate::resolve::{combine, Resolution, Resolver};

/// Unit expression text together with its resolution
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedUnit {
    pub expression: String,
    pub resolution: Resolution,
}

impl ResolvedUnit {
    /// Resolve `expression` against the standard catalog
    pub fn parse(expression: &str) -> Result<Self> {
        let resolution = Resolver::standard().resolve(expression)?;
        Ok(Self {
            expression: expression.to_string(),
            resolution,
        })
    }

    pub fn order(&self) -> &OrderVector {
        &self.resolution.order
    }

    pub fn scale(&self) -> f64 {
        self.resolution.scale
    }

    /// Multiplier converting a value in `self` into `target`
    pub fn factor_to(&self, target: &ResolvedUnit) -> Result<f64> {
        if self.order() != target.order() {
            return Err(Error::mismatch(&self.expression, &target.expression));
        }
        Ok(self.scale() / target.scale())
    }

    /// Unit of `self * other`, written as `lnum*rnum/lden*rden`
    pub(crate) fn product(&self, other: &ResolvedUnit) -> Result<Self> {
        let left = UnitExpr::parse(&self.expression)?;
        let expression = left.product(&UnitExpr::parse(&other.expression)?);
        Ok(Self {
            expression: expression.to_string(),
            resolution: Resolution {
                order: self.order().clone() + other.order().clone(),
                scale: self.scale() * other.scale(),
            },
        })
    }

    /// Unit of `self / other`, written as `lnum*rden/lden*rnum`
    pub(crate) fn quotient(&self, other: &ResolvedUnit) -> Result<Self> {
        let left = UnitExpr::parse(&self.expression)?;
        let expression = left.quotient(&UnitExpr::parse(&other.expression)?);
        Ok(Self {
            expression: expression.to_string(),
            resolution: combine(self.resolution.clone(), other.resolution.clone())?,
        })
    }

    /// Reciprocal unit with numerator and denominator swapped
    pub(crate) fn inverted(&self) -> Result<Self> {
        let expression = UnitExpr::parse(&self.expression)?.inverted();
        Ok(Self {
            expression: expression.to_string(),
            resolution: combine(Resolution::unity(), self.resolution.clone())?,
        })
    }
}

/// A numeric value with an optional unit.
///
/// The unit is resolved when it is set, so a quantity never holds an
/// expression that failed to resolve. A quantity without a unit is
/// untyped and combines with any other quantity as a plain scalar.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "QuantityRepr", into = "QuantityRepr")]
pub struct Quantity {
    value: f64,
    unit: Option<ResolvedUnit>,
}

impl Quantity {
    /// Quantity without a unit
    pub fn new(value: f64) -> Self {
        Self { value, unit: None }
    }

    /// Quantity tagged with a unit expression. An empty expression
    /// leaves the quantity untyped.
    pub fn with_unit(value: f64, expression: &str) -> Result<Self> {
        let mut quantity = Self::new(value);
        quantity.set_unit(expression)?;
        Ok(quantity)
    }

    pub(crate) fn from_parts(value: f64, unit: Option<ResolvedUnit>) -> Self {
        Self { value, unit }
    }

    /// Replace the unit expression. On failure the previous unit is kept.
    /// An expression without any unit symbol (`""`, `"*"`, `"/"`) clears
    /// the unit.
    pub fn set_unit(&mut self, expression: &str) -> Result<()> {
        let expression = expression.trim();
        if UnitExpr::parse(expression)?.is_empty() {
            self.unit = None;
            return Ok(());
        }
        self.unit = Some(ResolvedUnit::parse(expression)?);
        Ok(())
    }

    /// Drop the unit, keeping the value
    pub fn clear_unit(&mut self) {
        self.unit = None;
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Unit expression as set (or as synthesized by arithmetic)
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_ref().map(|u| u.expression.as_str())
    }

    pub fn resolved_unit(&self) -> Option<&ResolvedUnit> {
        self.unit.as_ref()
    }

    pub fn order(&self) -> Option<&OrderVector> {
        self.unit.as_ref().map(ResolvedUnit::order)
    }

    /// SI scale of the unit
    pub fn scale(&self) -> Option<f64> {
        self.unit.as_ref().map(ResolvedUnit::scale)
    }

    /// True when no unit is attached
    pub fn is_dimensionless(&self) -> bool {
        self.unit.is_none()
    }

    /// Value expressed in the SI combination of the same order
    pub fn si_value(&self) -> f64 {
        self.value * self.scale().unwrap_or(1.0)
    }

    /// True when the two quantities may be added, compared or converted
    pub fn same_dimension(&self, other: &Quantity) -> bool {
        match (self.order(), other.order()) {
            (Some(l), Some(r)) => l == r,
            _ => true,
        }
    }

    /// Same quantity expressed in `target`. Untyped quantities are
    /// returned unchanged.
    pub fn convert(&self, target: &str) -> Result<Quantity> {
        let Some(unit) = &self.unit else {
            return Ok(self.clone());
        };
        let target = ResolvedUnit::parse(target.trim())?;
        let factor = unit.factor_to(&target)?;
        Ok(Quantity::from_parts(self.value * factor, Some(target)))
    }

    /// Reciprocal: `1 / value` with numerator and denominator swapped
    pub fn invert(&self) -> Result<Quantity> {
        let unit = self.unit.as_ref().map(ResolvedUnit::inverted).transpose()?;
        Ok(Quantity::from_parts(1.0 / self.value, unit))
    }

    pub fn checked_add(&self, other: &Quantity) -> Result<Quantity> {
        eval::eval_binary_op(BinaryOp::Add, self, other)
    }

    pub fn checked_sub(&self, other: &Quantity) -> Result<Quantity> {
        eval::eval_binary_op(BinaryOp::Subtract, self, other)
    }

    pub fn checked_mul(&self, other: &Quantity) -> Result<Quantity> {
        eval::eval_binary_op(BinaryOp::Multiply, self, other)
    }

    pub fn checked_div(&self, other: &Quantity) -> Result<Quantity> {
        eval::eval_binary_op(BinaryOp::Divide, self, other)
    }

    pub fn checked_rem(&self, other: &Quantity) -> Result<Quantity> {
        eval::eval_binary_op(BinaryOp::Remainder, self, other)
    }

    /// Raise to a unitless power. The unit text is kept as is.
    pub fn pow(&self, exponent: &Quantity) -> Result<Quantity> {
        eval::eval_binary_op(BinaryOp::Power, self, exponent)
    }

    pub fn powf(&self, exponent: f64) -> Quantity {
        Quantity::from_parts(self.value.powf(exponent), self.unit.clone())
    }

    /// Truncated quotient and remainder, as plain numbers
    pub fn divmod(&self, other: &Quantity) -> Result<(f64, f64)> {
        eval::divmod(self, other)
    }

    /// Ordering after converting `other` into this unit.
    /// Fails when the dimensions differ.
    pub fn try_cmp(&self, other: &Quantity) -> Result<Option<Ordering>> {
        eval::compare(self, other)
    }

    pub fn try_lt(&self, other: &Quantity) -> Result<bool> {
        Ok(self.try_cmp(other)? == Some(Ordering::Less))
    }

    pub fn try_le(&self, other: &Quantity) -> Result<bool> {
        Ok(matches!(self.try_cmp(other)?, Some(Ordering::Less | Ordering::Equal)))
    }

    pub fn try_gt(&self, other: &Quantity) -> Result<bool> {
        Ok(self.try_cmp(other)? == Some(Ordering::Greater))
    }

    pub fn try_ge(&self, other: &Quantity) -> Result<bool> {
        Ok(matches!(self.try_cmp(other)?, Some(Ordering::Greater | Ordering::Equal)))
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Quantity::new(value)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit() {
            Some(unit) => write!(f, "{} {}", self.value, unit),
            None => write!(f, "{}", self.value),
        }
    }
}

/// Quantities of different dimension are unequal, never an error
impl PartialEq for Quantity {
    fn eq(&self, other: &Quantity) -> bool {
        eval::equals(self, other)
    }
}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Quantity) -> Option<Ordering> {
        self.try_cmp(other).ok().flatten()
    }
}

impl PartialEq<f64> for Quantity {
    fn eq(&self, other: &f64) -> bool {
        self.value == *other
    }
}

impl PartialEq<Quantity> for f64 {
    fn eq(&self, other: &Quantity) -> bool {
        *self == other.value
    }
}

impl PartialOrd<f64> for Quantity {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.value.partial_cmp(other)
    }
}

impl PartialOrd<Quantity> for f64 {
    fn partial_cmp(&self, other: &Quantity) -> Option<Ordering> {
        self.partial_cmp(&other.value)
    }
}

macro_rules! impl_checked_op {
    ($trait:ident, $method:ident, $checked:ident) => {
        impl $trait<&Quantity> for &Quantity {
            type Output = Result<Quantity>;

            fn $method(self, rhs: &Quantity) -> Result<Quantity> {
                self.$checked(rhs)
            }
        }

        impl $trait for Quantity {
            type Output = Result<Quantity>;

            fn $method(self, rhs: Quantity) -> Result<Quantity> {
                self.$checked(&rhs)
            }
        }
    };
}

impl_checked_op!(Add, add, checked_add);
impl_checked_op!(Sub, sub, checked_sub);
impl_checked_op!(Mul, mul, checked_mul);
impl_checked_op!(Div, div, checked_div);
impl_checked_op!(Rem, rem, checked_rem);

impl Mul<f64> for Quantity {
    type Output = Quantity;

    fn mul(self, rhs: f64) -> Quantity {
        Quantity::from_parts(self.value * rhs, self.unit)
    }
}

impl Div<f64> for Quantity {
    type Output = Quantity;

    fn div(self, rhs: f64) -> Quantity {
        Quantity::from_parts(self.value / rhs, self.unit)
    }
}

impl Neg for Quantity {
    type Output = Quantity;

    fn neg(self) -> Quantity {
        Quantity::from_parts(-self.value, self.unit)
    }
}

/// Serialized form; the unit is resolved again on the way in
#[derive(Serialize, Deserialize)]
struct QuantityRepr {
    value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    unit: Option<String>,
}

impl TryFrom<QuantityRepr> for Quantity {
    type Error = Error;

    fn try_from(repr: QuantityRepr) -> Result<Self> {
        match repr.unit {
            Some(unit) => Quantity::with_unit(repr.value, &unit),
            None => Ok(Quantity::new(repr.value)),
        }
    }
}

impl From<Quantity> for QuantityRepr {
    fn from(quantity: Quantity) -> Self {
        QuantityRepr {
            value: quantity.value,
            unit: quantity.unit.map(|u| u.expression),
        }
    }
}
