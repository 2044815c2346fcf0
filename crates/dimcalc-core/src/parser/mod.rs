//! Unit expression splitter using pest

mod expr;

pub use expr::{Term, UnitExpr};

use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Parser)]
#[grammar = "parser/grammar.pest"]
pub struct UnitParser;

/// Flat numerator and denominator token lists of a unit expression
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    pub numerator: Vec<String>,
    pub denominator: Vec<String>,
}

/// Split a unit expression into numerator and denominator tokens.
///
/// Division is not re-entrant: the expression is cut at every `/`, pieces at
/// even positions go to the numerator and pieces at odd positions to the
/// denominator, so `kg/m/s` splits as `kg*s` over `m`. Empty tokens produced
/// by adjacent separators are kept; the resolver skips them.
pub fn split(expression: &str) -> Result<Split> {
    let mut parts = Split::default();
    for (index, segment) in segments(expression)?.into_iter().enumerate() {
        if index % 2 == 0 {
            parts.numerator.extend(segment);
        } else {
            parts.denominator.extend(segment);
        }
    }
    Ok(parts)
}

/// Tokens of each `/`-separated segment, in order
fn segments(expression: &str) -> Result<Vec<Vec<String>>> {
    let mut pairs = UnitParser::parse(Rule::unit_expression, expression)
        .map_err(|e| Error::Parse(format!("{expression}: {e}")))?;
    let root = pairs
        .next()
        .ok_or_else(|| Error::Parse(expression.to_string()))?;

    Ok(root
        .into_inner()
        .filter(|pair| pair.as_rule() == Rule::segment)
        .map(segment_tokens)
        .collect())
}

fn segment_tokens(segment: Pair<'_, Rule>) -> Vec<String> {
    segment
        .into_inner()
        .filter(|pair| pair.as_rule() == Rule::token)
        .map(|pair| pair.as_str().trim().to_string())
        .collect()
}

/// Parse a numeric exponent token ("2", "-1", "0.5")
pub(crate) fn parse_exponent(token: &str) -> Option<f64> {
    let digits = token
        .strip_prefix(|c: char| c == '-' || c == '+')
        .unwrap_or(token);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    token.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tokens(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_split_compound_expression() {
        let parts = split("kg*m**2/s**2").unwrap();
        assert_eq!(parts.numerator, tokens(&["kg", "m", "2"]));
        assert_eq!(parts.denominator, tokens(&["s", "2"]));
    }

    #[test]
    fn test_split_without_division() {
        let parts = split("kg*m^2").unwrap();
        assert_eq!(parts.numerator, tokens(&["kg", "m", "2"]));
        assert!(parts.denominator.is_empty());
    }

    #[test]
    fn test_split_division_is_not_reentrant() {
        let parts = split("kg/m/s").unwrap();
        assert_eq!(parts.numerator, tokens(&["kg", "s"]));
        assert_eq!(parts.denominator, tokens(&["m"]));

        let parts = split("kg/m*m*m").unwrap();
        assert_eq!(parts.numerator, tokens(&["kg"]));
        assert_eq!(parts.denominator, tokens(&["m", "m", "m"]));
    }

    #[test]
    fn test_split_keeps_empty_tokens() {
        let parts = split("/s").unwrap();
        assert_eq!(parts.numerator, tokens(&[""]));
        assert_eq!(parts.denominator, tokens(&["s"]));

        let parts = split("m***2").unwrap();
        assert_eq!(parts.numerator, tokens(&["m", "", "2"]));

        let parts = split("").unwrap();
        assert_eq!(parts.numerator, tokens(&[""]));
        assert!(parts.denominator.is_empty());
    }

    #[test]
    fn test_split_trims_whitespace() {
        let parts = split("kg * m / s ** 2").unwrap();
        assert_eq!(parts.numerator, tokens(&["kg", "m"]));
        assert_eq!(parts.denominator, tokens(&["s", "2"]));
    }

    #[test]
    fn test_parse_exponent() {
        assert_eq!(parse_exponent("2"), Some(2.0));
        assert_eq!(parse_exponent("-1"), Some(-1.0));
        assert_eq!(parse_exponent("0.5"), Some(0.5));
        assert_eq!(parse_exponent("m"), None);
        assert_eq!(parse_exponent("inf"), None);
        assert_eq!(parse_exponent("-"), None);
        assert_eq!(parse_exponent(""), None);
    }
}
