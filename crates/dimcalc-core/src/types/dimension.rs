//! Base dimensions and dimensional order vectors

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Fundamental physical dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Length,
    Mass,
    Time,
    Charge,
    Temperature,
    Amount,
}

impl Dimension {
    /// Iterator over all dimensions
    pub fn all() -> impl Iterator<Item = Dimension> {
        [
            Dimension::Length,
            Dimension::Mass,
            Dimension::Time,
            Dimension::Charge,
            Dimension::Temperature,
            Dimension::Amount,
        ]
        .into_iter()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Length => "Length",
            Dimension::Mass => "Mass",
            Dimension::Time => "Time",
            Dimension::Charge => "Charge",
            Dimension::Temperature => "Temperature",
            Dimension::Amount => "Amount",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Dimensional signature of a unit: exponent per base dimension.
///
/// Absent and zero entries are equivalent. Equality compares every
/// dimension present in either side, so `{Length: 0}` equals `{}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderVector(BTreeMap<Dimension, f64>);

impl OrderVector {
    /// Dimensionless order (no entries)
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Order with a single dimension at exponent 1
    pub fn of(dimension: Dimension) -> Self {
        let mut order = Self::new();
        order.increment(dimension, 1.0);
        order
    }

    /// Exponent for a dimension (0 when absent)
    pub fn get(&self, dimension: Dimension) -> f64 {
        self.0.get(&dimension).copied().unwrap_or(0.0)
    }

    /// Add `by` to the exponent of `dimension`
    pub fn increment(&mut self, dimension: Dimension, by: f64) {
        *self.0.entry(dimension).or_insert(0.0) += by;
    }

    /// Entry-wise sum over the union of dimensions
    pub fn merge(&mut self, other: &OrderVector) {
        for (dimension, exponent) in &other.0 {
            self.increment(*dimension, *exponent);
        }
    }

    /// Entry-wise difference over the union of dimensions
    pub fn subtract(&mut self, other: &OrderVector) {
        for (dimension, exponent) in &other.0 {
            self.increment(*dimension, -exponent);
        }
    }

    /// Every exponent multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> OrderVector {
        Self(self.0.iter().map(|(d, e)| (*d, e * factor)).collect())
    }

    /// True when every exponent is zero
    pub fn is_dimensionless(&self) -> bool {
        self.0.values().all(|e| *e == 0.0)
    }

    /// Non-zero entries in dimension order
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, f64)> + '_ {
        self.0
            .iter()
            .filter(|(_, e)| **e != 0.0)
            .map(|(d, e)| (*d, *e))
    }

    /// Copy without zero entries
    pub fn normalized(&self) -> OrderVector {
        self.iter().collect()
    }
}

impl FromIterator<(Dimension, f64)> for OrderVector {
    fn from_iter<I: IntoIterator<Item = (Dimension, f64)>>(iter: I) -> Self {
        let mut order = OrderVector::new();
        for (dimension, exponent) in iter {
            order.increment(dimension, exponent);
        }
        order
    }
}

impl PartialEq for OrderVector {
    fn eq(&self, other: &Self) -> bool {
        self.0
            .keys()
            .chain(other.0.keys())
            .all(|d| self.get(*d) - other.get(*d) == 0.0)
    }
}

impl Add for OrderVector {
    type Output = OrderVector;

    fn add(mut self, rhs: OrderVector) -> OrderVector {
        self.merge(&rhs);
        self
    }
}

impl Sub for OrderVector {
    type Output = OrderVector;

    fn sub(mut self, rhs: OrderVector) -> OrderVector {
        self.subtract(&rhs);
        self
    }
}

impl Neg for OrderVector {
    type Output = OrderVector;

    fn neg(self) -> OrderVector {
        self.scaled(-1.0)
    }
}

impl Mul<f64> for OrderVector {
    type Output = OrderVector;

    fn mul(self, rhs: f64) -> OrderVector {
        self.scaled(rhs)
    }
}

impl fmt::Display for OrderVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return f.write_str("dimensionless");
        }
        let parts: Vec<String> = self
            .iter()
            .map(|(d, e)| {
                if e == 1.0 {
                    d.to_string()
                } else {
                    format!("{d}^{e}")
                }
            })
            .collect();
        write!(f, "{}", parts.join("*"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_zero_entries_ignored_in_equality() {
        let mut with_zero = OrderVector::of(Dimension::Length);
        with_zero.increment(Dimension::Mass, 0.0);
        assert_eq!(with_zero, OrderVector::of(Dimension::Length));
        assert_eq!(OrderVector::new(), [(Dimension::Time, 0.0)].into_iter().collect());
    }

    #[test]
    fn test_differing_orders() {
        let a: OrderVector = [(Dimension::Mass, 12.0), (Dimension::Length, 4.0)]
            .into_iter()
            .collect();
        let b: OrderVector = [(Dimension::Mass, 1.0), (Dimension::Length, 4.0)]
            .into_iter()
            .collect();
        assert_ne!(a, b);
        assert_ne!(OrderVector::of(Dimension::Time), -OrderVector::of(Dimension::Time));
    }

    #[test]
    fn test_arithmetic() {
        let force: OrderVector = [
            (Dimension::Mass, 1.0),
            (Dimension::Length, 1.0),
            (Dimension::Time, -2.0),
        ]
        .into_iter()
        .collect();
        let energy = force.clone() + OrderVector::of(Dimension::Length);
        assert_eq!(energy.get(Dimension::Length), 2.0);
        assert_eq!((energy - force).normalized(), OrderVector::of(Dimension::Length));
    }

    #[test]
    fn test_display() {
        let speed: OrderVector = [(Dimension::Length, 1.0), (Dimension::Time, -1.0)]
            .into_iter()
            .collect();
        assert_eq!(speed.to_string(), "Length*Time^-1");
        assert_eq!(OrderVector::new().to_string(), "dimensionless");
    }
}
