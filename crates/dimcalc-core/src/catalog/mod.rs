//! Unit catalog: base units, compound units and magnitude prefixes
//!
//! To add a new unit, simply add an entry to BASE_UNITS or COMPOUND_UNITS.
//! Resolution, conversion and quantity arithmetic pick it up automatically.

use crate::types::Dimension;

/// A unit tied directly to one dimension
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseUnit {
    /// Symbol as written in expressions (e.g., "m", "lb")
    pub symbol: &'static str,
    /// Multiplier converting one of this unit to the SI unit of its dimension
    pub si_scale: f64,
    /// Dimension measured by this unit
    pub dimension: Dimension,
}

/// A unit defined as an expression over other units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompoundUnit {
    /// Symbol as written in expressions (e.g., "N")
    pub symbol: &'static str,
    /// Extra multiplier applied on top of the defining expression
    pub si_scale: f64,
    /// Defining expression (e.g., "kg*m/s**2")
    pub definition: &'static str,
}

/// A single-character magnitude prefix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prefix {
    pub symbol: char,
    pub multiplier: f64,
}

pub static PREFIXES: &[Prefix] = &[
    Prefix {
        symbol: 'T',
        multiplier: 1e12,
    },
    Prefix {
        symbol: 'G',
        multiplier: 1e9,
    },
    Prefix {
        symbol: 'M',
        multiplier: 1e6,
    },
    Prefix {
        symbol: 'K',
        multiplier: 1e3,
    },
    Prefix {
        symbol: 'k',
        multiplier: 1e3,
    },
    Prefix {
        symbol: 'd',
        multiplier: 0.1,
    },
    Prefix {
        symbol: 'c',
        multiplier: 0.01,
    },
    Prefix {
        symbol: 'm',
        multiplier: 0.001,
    },
    Prefix {
        symbol: 'u',
        multiplier: 1e-6,
    },
    Prefix {
        symbol: 'n',
        multiplier: 1e-9,
    },
    Prefix {
        symbol: 'p',
        multiplier: 1e-12,
    },
];

pub static BASE_UNITS: &[BaseUnit] = &[
    // Length (SI: meter)
    BaseUnit {
        symbol: "m",
        si_scale: 1.0,
        dimension: Dimension::Length,
    },
    BaseUnit {
        symbol: "ft",
        si_scale: 0.3048,
        dimension: Dimension::Length,
    },
    BaseUnit {
        symbol: "in",
        si_scale: 0.0254,
        dimension: Dimension::Length,
    },
    BaseUnit {
        symbol: "miles",
        si_scale: 1609.344,
        dimension: Dimension::Length,
    },
    // Time (SI: second)
    BaseUnit {
        symbol: "s",
        si_scale: 1.0,
        dimension: Dimension::Time,
    },
    BaseUnit {
        symbol: "min",
        si_scale: 60.0,
        dimension: Dimension::Time,
    },
    BaseUnit {
        symbol: "hr",
        si_scale: 3600.0,
        dimension: Dimension::Time,
    },
    BaseUnit {
        symbol: "day",
        si_scale: 86400.0,
        dimension: Dimension::Time,
    },
    // Mass (SI: kilogram)
    BaseUnit {
        symbol: "kg",
        si_scale: 1.0,
        dimension: Dimension::Mass,
    },
    BaseUnit {
        symbol: "g",
        si_scale: 0.001,
        dimension: Dimension::Mass,
    },
    BaseUnit {
        symbol: "lb",
        si_scale: 0.45359237,
        dimension: Dimension::Mass,
    },
    // Charge (SI: coulomb)
    BaseUnit {
        symbol: "C",
        si_scale: 1.0,
        dimension: Dimension::Charge,
    },
    // Temperature (SI: kelvin)
    BaseUnit {
        symbol: "K",
        si_scale: 1.0,
        dimension: Dimension::Temperature,
    },
    // Amount of substance (SI: mole)
    BaseUnit {
        symbol: "mol",
        si_scale: 1.0,
        dimension: Dimension::Amount,
    },
];

pub static COMPOUND_UNITS: &[CompoundUnit] = &[
    CompoundUnit {
        symbol: "A",
        si_scale: 1.0,
        definition: "C/s",
    },
    CompoundUnit {
        symbol: "J",
        si_scale: 1.0,
        definition: "kg*m**2/s**2",
    },
    CompoundUnit {
        symbol: "N",
        si_scale: 1.0,
        definition: "kg*m/s**2",
    },
    CompoundUnit {
        symbol: "W",
        si_scale: 1.0,
        definition: "J/s",
    },
    CompoundUnit {
        symbol: "Pa",
        si_scale: 1.0,
        definition: "N/m**2",
    },
    CompoundUnit {
        symbol: "V",
        si_scale: 1.0,
        definition: "W/A",
    },
    CompoundUnit {
        symbol: "Hz",
        si_scale: 1.0,
        definition: "/s",
    },
];

/// Read-only view over a set of unit tables.
///
/// The standard catalog borrows the static tables above; tests and callers
/// can build their own from any slices. Copying a catalog copies only the
/// slice references.
#[derive(Debug, Clone, Copy)]
pub struct Catalog<'a> {
    pub base_units: &'a [BaseUnit],
    pub compound_units: &'a [CompoundUnit],
    pub prefixes: &'a [Prefix],
}

impl<'a> Catalog<'a> {
    pub fn new(
        base_units: &'a [BaseUnit],
        compound_units: &'a [CompoundUnit],
        prefixes: &'a [Prefix],
    ) -> Self {
        Self {
            base_units,
            compound_units,
            prefixes,
        }
    }

    /// The built-in SI-like catalog
    pub fn standard() -> Catalog<'static> {
        Catalog::new(BASE_UNITS, COMPOUND_UNITS, PREFIXES)
    }

    /// Multiplier for a prefix character
    pub fn prefix(&self, symbol: char) -> Option<f64> {
        self.prefixes
            .iter()
            .find(|p| p.symbol == symbol)
            .map(|p| p.multiplier)
    }

    /// Look up a base unit, bare symbol first, then prefix + symbol.
    /// Returns the unit and the prefix multiplier (1.0 when unprefixed).
    pub fn lookup_base(&self, token: &str) -> Option<(&'a BaseUnit, f64)> {
        let base_units = self.base_units;
        self.lookup(token, |symbol| base_units.iter().find(|u| u.symbol == symbol))
    }

    /// Look up a compound unit, bare symbol first, then prefix + symbol.
    pub fn lookup_compound(&self, token: &str) -> Option<(&'a CompoundUnit, f64)> {
        let compound_units = self.compound_units;
        self.lookup(token, |symbol| {
            compound_units.iter().find(|u| u.symbol == symbol)
        })
    }

    /// True if the token names a (possibly prefixed) compound unit
    pub fn is_compound(&self, token: &str) -> bool {
        self.lookup_compound(token).is_some()
    }

    /// All base and compound symbols
    pub fn symbols(&self) -> impl Iterator<Item = &'a str> {
        self.base_units
            .iter()
            .map(|u| u.symbol)
            .chain(self.compound_units.iter().map(|u| u.symbol))
    }

    fn lookup<T>(&self, token: &str, find: impl Fn(&str) -> Option<T>) -> Option<(T, f64)> {
        if let Some(unit) = find(token) {
            return Some((unit, 1.0));
        }
        let mut chars = token.chars();
        let first = chars.next()?;
        let rest = chars.as_str();
        if rest.is_empty() {
            return None;
        }
        let multiplier = self.prefix(first)?;
        find(rest).map(|unit| (unit, multiplier))
    }
}

impl Default for Catalog<'static> {
    fn default() -> Self {
        Catalog::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lookup_bare_base_units() {
        let catalog = Catalog::standard();
        let (unit, multiplier) = catalog.lookup_base("m").unwrap();
        assert_eq!((unit.dimension, unit.si_scale, multiplier), (Dimension::Length, 1.0, 1.0));

        let (unit, multiplier) = catalog.lookup_base("miles").unwrap();
        assert_eq!((unit.si_scale, multiplier), (1609.344, 1.0));

        let (unit, _) = catalog.lookup_base("min").unwrap();
        assert_eq!(unit.dimension, Dimension::Time);
        assert_eq!(unit.si_scale, 60.0);
    }

    #[test]
    fn test_lookup_prefixed_base_units() {
        let catalog = Catalog::standard();
        let (unit, multiplier) = catalog.lookup_base("km").unwrap();
        assert_eq!((unit.symbol, multiplier), ("m", 1000.0));

        let (unit, multiplier) = catalog.lookup_base("Gs").unwrap();
        assert_eq!((unit.symbol, multiplier), ("s", 1e9));

        let (unit, multiplier) = catalog.lookup_base("MC").unwrap();
        assert_eq!((unit.dimension, multiplier), (Dimension::Charge, 1e6));

        // "kg" is a unit in its own right, not kilo-gram
        let (unit, multiplier) = catalog.lookup_base("kg").unwrap();
        assert_eq!((unit.symbol, multiplier), ("kg", 1.0));
    }

    #[test]
    fn test_lookup_missing() {
        let catalog = Catalog::standard();
        assert!(catalog.lookup_base("xyz").is_none());
        assert!(catalog.lookup_base("").is_none());
        assert!(catalog.lookup_base("k").is_none());
        assert!(catalog.lookup_compound("m").is_none());
    }

    #[test]
    fn test_is_compound() {
        let catalog = Catalog::standard();
        for symbol in ["J", "N", "A", "kN", "MW", "kPa"] {
            assert!(catalog.is_compound(symbol), "{symbol} should be compound");
        }
        for symbol in ["m", "C", "g", "ft", "lb", "s", "min", "hr", "miles"] {
            assert!(!catalog.is_compound(symbol), "{symbol} should not be compound");
        }
    }

    #[test]
    fn test_symbols_are_unique() {
        let catalog = Catalog::standard();
        let mut symbols: Vec<&str> = catalog.symbols().collect();
        let total = symbols.len();
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), total);
    }

    #[test]
    fn test_every_dimension_has_an_si_unit() {
        let catalog = Catalog::standard();
        for dimension in Dimension::all() {
            assert!(
                catalog
                    .base_units
                    .iter()
                    .any(|u| u.dimension == dimension && u.si_scale == 1.0),
                "no SI unit for {dimension}"
            );
        }
    }
}
