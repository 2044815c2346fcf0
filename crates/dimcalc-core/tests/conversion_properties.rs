//! Conversion laws checked over the standard catalog

use approx::{assert_abs_diff_eq, assert_relative_eq};
use dimcalc_core::{conversion_factor, resolve, Dimension, Error, OrderVector, Quantity};
use proptest::prelude::*;

/// Groups of mutually compatible unit expressions
const COMPATIBLE: &[&[&str]] = &[
    &["m", "ft", "in", "miles", "km", "mm", "cm"],
    &["s", "min", "hr", "day", "ms", "Gs"],
    &["kg", "g", "lb", "mg"],
    &["m/s", "km/hr", "ft/s", "miles/hr"],
    &["J", "kJ", "N*m", "kg*m**2/s**2", "W*s"],
    &["A", "mA", "C/s"],
    &["Pa", "kPa", "N/m**2"],
];

fn compatible_pair() -> impl Strategy<Value = (&'static str, &'static str)> {
    prop::sample::select(COMPATIBLE).prop_flat_map(|group| {
        (
            prop::sample::select(group.to_vec()),
            prop::sample::select(group.to_vec()),
        )
    })
}

proptest! {
    #[test]
    fn convert_round_trip((from, to) in compatible_pair(), value in -1e6f64..1e6) {
        let quantity = Quantity::with_unit(value, from).unwrap();
        let back = quantity.convert(to).unwrap().convert(from).unwrap();
        prop_assert!((back.value() - value).abs() <= 1e-9 * value.abs().max(1.0));
        prop_assert_eq!(back.unit(), Some(from));
    }

    #[test]
    fn conversion_factor_symmetry((from, to) in compatible_pair()) {
        let forward = conversion_factor(from, to).unwrap();
        let backward = conversion_factor(to, from).unwrap();
        prop_assert!((forward - 1.0 / backward).abs() <= 1e-12 * forward.abs());
    }

    #[test]
    fn invert_twice_restores((from, _) in compatible_pair(), value in 1e-3f64..1e6) {
        let quantity = Quantity::with_unit(value, from).unwrap();
        let twice = quantity.invert().unwrap().invert().unwrap();
        prop_assert!((twice.value() - value).abs() <= 1e-9 * value);
        prop_assert_eq!(twice.order(), quantity.order());
    }
}

#[test]
fn test_newton_resolution() {
    let expected: OrderVector = [
        (Dimension::Mass, 1.0),
        (Dimension::Length, 1.0),
        (Dimension::Time, -2.0),
    ]
    .into_iter()
    .collect();

    let newton = resolve("N").unwrap();
    assert_eq!(newton.order, expected);
    assert_eq!(newton.scale, 1.0);

    let kilonewton = resolve("kN").unwrap();
    assert_eq!(kilonewton.order, expected);
    assert_eq!(kilonewton.scale, 1000.0);
}

#[test]
fn test_reference_factors() {
    assert_relative_eq!(conversion_factor("m", "ft").unwrap(), 3.280839895, epsilon = 1e-7);
    assert_eq!(conversion_factor("miles", "m").unwrap(), 1609.344);
    assert_eq!(conversion_factor("m", "km").unwrap(), 0.001);
    assert_abs_diff_eq!(conversion_factor("lb", "kg").unwrap(), 0.45359237);
}

#[test]
fn test_division_is_not_reentrant() {
    // every other "/" segment returns to the numerator
    let quirk = resolve("kg/m/s").unwrap();
    assert_eq!(quirk.order, resolve("kg*s/m").unwrap().order);
    assert_eq!(resolve("kg/m*s").unwrap().order.get(Dimension::Time), -1.0);
}

#[test]
fn test_unknown_unit() {
    assert_eq!(resolve("xyz"), Err(Error::UnknownUnit("xyz".to_string())));
    assert!(matches!(conversion_factor("m", "parsec"), Err(Error::UnknownUnit(_))));
}

#[test]
fn test_mismatch_names_both_expressions() {
    let err = conversion_factor("kg/m**3", "N").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Order of units: kg/m**3 and N does not match"
    );
}
