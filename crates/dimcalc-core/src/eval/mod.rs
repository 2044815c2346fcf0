//! Unit-aware evaluation of quantity operators

use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::types::{Quantity, ResolvedUnit};

/// Binary operators on quantities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    Power,
}

/// Evaluate `left op right`, deciding the result unit from the operands
pub fn eval_binary_op(op: BinaryOp, left: &Quantity, right: &Quantity) -> Result<Quantity> {
    match op {
        BinaryOp::Add | BinaryOp::Subtract => {
            let (l, r) = coerce_operands(left, right)?;
            let unit = left.resolved_unit().or(right.resolved_unit()).cloned();
            Ok(Quantity::from_parts(apply_op(op, l, r), unit))
        }
        BinaryOp::Remainder => {
            let (l, r) = coerce_operands(left, right)?;
            Ok(Quantity::new(apply_op(op, l, r)))
        }
        BinaryOp::Multiply | BinaryOp::Divide => {
            let unit = result_unit(op, left.resolved_unit(), right.resolved_unit())?;
            Ok(Quantity::from_parts(
                apply_op(op, left.value(), right.value()),
                unit,
            ))
        }
        BinaryOp::Power => {
            if let Some(unit) = right.unit() {
                return Err(Error::InvalidExponent(unit.to_string()));
            }
            Ok(Quantity::from_parts(
                apply_op(op, left.value(), right.value()),
                left.resolved_unit().cloned(),
            ))
        }
    }
}

/// Truncated quotient and remainder of two quantities in the left unit
pub fn divmod(left: &Quantity, right: &Quantity) -> Result<(f64, f64)> {
    let (l, r) = coerce_operands(left, right)?;
    Ok(((l / r).trunc(), l % r))
}

/// Numeric ordering after unit coercion
pub fn compare(left: &Quantity, right: &Quantity) -> Result<Option<Ordering>> {
    let (l, r) = coerce_operands(left, right)?;
    Ok(l.partial_cmp(&r))
}

/// Equality after unit coercion; differing dimensions are simply unequal
pub fn equals(left: &Quantity, right: &Quantity) -> bool {
    coerce_operands(left, right).is_ok_and(|(l, r)| l == r)
}

/// Bring both values into the left operand's unit.
///
/// An untyped operand is taken as a plain number in the other's unit.
fn coerce_operands(left: &Quantity, right: &Quantity) -> Result<(f64, f64)> {
    match (left.resolved_unit(), right.resolved_unit()) {
        (Some(lu), Some(ru)) if lu.expression == ru.expression => {
            Ok((left.value(), right.value()))
        }
        (Some(lu), Some(ru)) => {
            if lu.order() != ru.order() {
                return Err(Error::mismatch(&lu.expression, &ru.expression));
            }
            Ok((left.value(), right.value() * (ru.scale() / lu.scale())))
        }
        _ => Ok((left.value(), right.value())),
    }
}

/// Result unit of a product or quotient
fn result_unit(
    op: BinaryOp,
    left: Option<&ResolvedUnit>,
    right: Option<&ResolvedUnit>,
) -> Result<Option<ResolvedUnit>> {
    let unit = match (left, right) {
        // Same unit text on both sides keeps the left unit
        (Some(lu), Some(ru)) if lu.expression == ru.expression => lu.clone(),
        (Some(lu), Some(ru)) if op == BinaryOp::Multiply => lu.product(ru)?,
        (Some(lu), Some(ru)) => lu.quotient(ru)?,
        (Some(lu), None) => lu.clone(),
        (None, Some(ru)) if op == BinaryOp::Multiply => ru.clone(),
        (None, Some(ru)) => ru.inverted()?,
        (None, None) => return Ok(None),
    };
    Ok(Some(unit))
}

/// Apply the plain f64 operation
fn apply_op(op: BinaryOp, l: f64, r: f64) -> f64 {
    match op {
        BinaryOp::Add => l + r,
        BinaryOp::Subtract => l - r,
        BinaryOp::Multiply => l * r,
        BinaryOp::Divide => l / r,
        BinaryOp::Remainder => l % r,
        BinaryOp::Power => l.powf(r),
    }
}
