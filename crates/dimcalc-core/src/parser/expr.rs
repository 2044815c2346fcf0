//! Structural view of a unit expression, used to build result units

use std::fmt;

use super::{parse_exponent, split};
use crate::error::{Error, Result};

/// A unit symbol with an optional exponent (`m`, `s**2`)
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub symbol: String,
    pub exponent: Option<f64>,
}

impl Term {
    /// Same symbol with the exponent negated
    fn reciprocal(&self) -> Term {
        let exponent = match self.exponent {
            None => Some(-1.0),
            Some(e) if e == -1.0 => None,
            Some(e) => Some(-e),
        };
        Term {
            symbol: self.symbol.clone(),
            exponent,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.exponent {
            Some(e) => write!(f, "{}**{}", self.symbol, e),
            None => f.write_str(&self.symbol),
        }
    }
}

/// Unit expression as numerator and denominator terms
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitExpr {
    pub numerator: Vec<Term>,
    pub denominator: Vec<Term>,
}

impl UnitExpr {
    pub fn parse(expression: &str) -> Result<UnitExpr> {
        let parts = split(expression)?;
        Ok(UnitExpr {
            numerator: terms(&parts.numerator)?,
            denominator: terms(&parts.denominator)?,
        })
    }

    /// True when neither side names a unit
    pub fn is_empty(&self) -> bool {
        self.numerator.is_empty() && self.denominator.is_empty()
    }

    /// Numerator text as written between the separators
    pub fn numerator_text(&self) -> String {
        join(&self.numerator)
    }

    pub fn denominator_text(&self) -> String {
        join(&self.denominator)
    }

    /// Swap numerator and denominator. Without a denominator every
    /// numerator term is raised to -1 instead (`m*s` -> `m**-1*s**-1`).
    pub fn inverted(&self) -> UnitExpr {
        if self.denominator.is_empty() {
            UnitExpr {
                numerator: self.numerator.iter().map(Term::reciprocal).collect(),
                denominator: Vec::new(),
            }
        } else {
            UnitExpr {
                numerator: self.denominator.clone(),
                denominator: self.numerator.clone(),
            }
        }
    }

    /// `lnum*rnum/lden*rden`
    pub fn product(&self, other: &UnitExpr) -> UnitExpr {
        UnitExpr {
            numerator: concat(&self.numerator, &other.numerator),
            denominator: concat(&self.denominator, &other.denominator),
        }
    }

    /// `lnum*rden/lden*rnum`
    pub fn quotient(&self, other: &UnitExpr) -> UnitExpr {
        UnitExpr {
            numerator: concat(&self.numerator, &other.denominator),
            denominator: concat(&self.denominator, &other.numerator),
        }
    }
}

impl fmt::Display for UnitExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.numerator_text())?;
        if !self.denominator.is_empty() {
            write!(f, "/{}", self.denominator_text())?;
        }
        Ok(())
    }
}

fn terms(tokens: &[String]) -> Result<Vec<Term>> {
    let mut terms: Vec<Term> = Vec::new();
    let mut previous: Option<&str> = None;
    for token in tokens {
        if let Some(exponent) = parse_exponent(token) {
            let follows_unit =
                previous.is_some_and(|p| !p.is_empty() && parse_exponent(p).is_none());
            match terms.last_mut() {
                Some(term) if follows_unit => term.exponent = Some(exponent),
                _ => {
                    return Err(Error::Parse(format!(
                        "exponent {token} does not follow a unit"
                    )))
                }
            }
        } else if !token.is_empty() {
            terms.push(Term {
                symbol: token.clone(),
                exponent: None,
            });
        }
        previous = Some(token);
    }
    Ok(terms)
}

fn concat(left: &[Term], right: &[Term]) -> Vec<Term> {
    left.iter().chain(right).cloned().collect()
}

fn join(terms: &[Term]) -> String {
    terms
        .iter()
        .map(Term::to_string)
        .collect::<Vec<_>>()
        .join("*")
}
