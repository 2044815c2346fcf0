//! Dimensional resolution of unit expressions
//!
//! A unit expression is reduced to an order vector (exponent per base
//! dimension) and a scale factor converting one of the unit into the SI
//! combination of the same order.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::parser::{self, parse_exponent};
use crate::types::OrderVector;

/// Maximum nesting of compound unit definitions
pub const MAX_COMPOUND_DEPTH: usize = 16;

/// Order vector and SI scale of a resolved unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub order: OrderVector,
    pub scale: f64,
}

impl Resolution {
    /// Dimensionless, scale 1
    pub fn unity() -> Self {
        Self {
            order: OrderVector::new(),
            scale: 1.0,
        }
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::unity()
    }
}

/// Resolves unit expressions against a catalog
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'c> {
    catalog: Catalog<'c>,
}

impl Resolver<'static> {
    /// Resolver over the standard catalog
    pub fn standard() -> Self {
        Self::new(&Catalog::standard())
    }
}

impl<'c> Resolver<'c> {
    pub fn new(catalog: &Catalog<'c>) -> Self {
        Self { catalog: *catalog }
    }

    pub fn catalog(&self) -> &Catalog<'c> {
        &self.catalog
    }

    /// Resolve a full expression: split, resolve both sides, combine
    pub fn resolve(&self, expression: &str) -> Result<Resolution> {
        let mut stack = Vec::new();
        self.resolve_expression(expression, &mut stack)
    }

    /// Resolve a flat token list (one side of an expression)
    pub fn resolve_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Resolution> {
        let mut stack = Vec::new();
        self.resolve_list(tokens, &mut stack)
    }

    /// Multiplier converting a value in `from` into `to`
    pub fn conversion_factor(&self, from: &str, to: &str) -> Result<f64> {
        let source = self.resolve(from)?;
        let target = self.resolve(to)?;
        if !same_dimension(&source.order, &target.order) {
            return Err(Error::mismatch(from, to));
        }
        let factor = source.scale / target.scale;
        debug!("conversion factor {from} -> {to}: {factor}");
        Ok(factor)
    }

    fn resolve_expression<'s>(
        &self,
        expression: &'s str,
        stack: &mut Vec<&'s str>,
    ) -> Result<Resolution> {
        let parts = parser::split(expression)?;
        let numerator = self.resolve_list(&parts.numerator, stack)?;
        let denominator = self.resolve_list(&parts.denominator, stack)?;
        combine(numerator, denominator).map_err(|e| match e {
            Error::ZeroScale(_) => Error::ZeroScale(expression.to_string()),
            other => other,
        })
    }

    fn resolve_list<'s, S: AsRef<str>>(
        &self,
        tokens: &[S],
        stack: &mut Vec<&'s str>,
    ) -> Result<Resolution> {
        let mut acc = Resolution::unity();
        for (index, token) in tokens.iter().enumerate() {
            let token = token.as_ref();
            if token.is_empty() {
                continue;
            }
            if let Some(exponent) = parse_exponent(token) {
                let base = index
                    .checked_sub(1)
                    .map(|i| tokens[i].as_ref())
                    .filter(|p| !p.is_empty() && parse_exponent(p).is_none())
                    .ok_or_else(|| {
                        Error::Parse(format!(
                            "number {token} found before unit, exponents must follow a unit"
                        ))
                    })?;
                // `base` already contributed once; add the remaining n - 1 copies
                let single = self.resolve_token(base, stack)?;
                acc.order.merge(&single.order.scaled(exponent - 1.0));
                acc.scale *= single.scale.powf(exponent - 1.0);
                trace!("{base}**{exponent}: {} x {}", acc.order, acc.scale);
                continue;
            }
            let single = self.resolve_token(token, stack)?;
            acc.order.merge(&single.order);
            acc.scale *= single.scale;
            trace!("{token}: {} x {}", acc.order, acc.scale);
        }
        Ok(acc)
    }

    /// Resolve one unit token, compound or base, prefixed or bare
    fn resolve_token<'s>(&self, token: &str, stack: &mut Vec<&'s str>) -> Result<Resolution> {
        let catalog = self.catalog;
        if let Some((compound, multiplier)) = catalog.lookup_compound(token) {
            if stack.contains(&compound.symbol) || stack.len() >= MAX_COMPOUND_DEPTH {
                return Err(Error::CompoundCycle(compound.symbol.to_string()));
            }
            stack.push(compound.symbol);
            let inner = self.resolve_expression(compound.definition, stack);
            stack.pop();
            let mut inner = inner?;
            inner.scale *= compound.si_scale * multiplier;
            return Ok(inner);
        }

        let (unit, multiplier) = catalog
            .lookup_base(token)
            .ok_or_else(|| Error::UnknownUnit(token.to_string()))?;
        Ok(Resolution {
            order: OrderVector::of(unit.dimension),
            scale: unit.si_scale * multiplier,
        })
    }
}

/// Numerator order minus denominator order, numerator scale over denominator scale
pub fn combine(numerator: Resolution, denominator: Resolution) -> Result<Resolution> {
    if denominator.scale == 0.0 {
        return Err(Error::ZeroScale(denominator.order.to_string()));
    }
    Ok(Resolution {
        order: numerator.order - denominator.order,
        scale: numerator.scale / denominator.scale,
    })
}

/// True when both orders describe the same dimension
pub fn same_dimension(left: &OrderVector, right: &OrderVector) -> bool {
    left == right
}
