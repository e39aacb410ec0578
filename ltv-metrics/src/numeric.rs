//! Rounding and ratio helpers shared by every calculator.
//!
//! Each ratio in this crate names its zero-denominator fallback at the call
//! site through [`ratio_or`] instead of letting NaN or infinity leak out.
//!
//! Rounding works on the exact decimal value of the `f64` (through
//! [`rust_decimal::Decimal`]) and resolves true midpoints away from zero, so
//! `12.25` rounds to `12.3` while `1.115`, stored as `1.11499...`, rounds to
//! `1.11`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Exact decimal rounding, `None` for non-finite or out-of-range values.
fn round_decimal(value: f64, places: u32) -> Option<Decimal> {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero))
}

/// Round to `places` decimals, half away from zero.
///
/// Non-finite values and magnitudes beyond the decimal range are returned
/// unchanged.
pub fn round_to(value: f64, places: u32) -> f64 {
    round_decimal(value, places)
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// Round a monetary or ratio figure to cents.
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// Fixed-point text with `places` decimals, midpoints away from zero.
///
/// Used wherever a figure is interpolated into advice text.
pub fn to_fixed(value: f64, places: u32) -> String {
    let precision = places as usize;
    // Negative zero prints as plain zero.
    let value = if value == 0.0 { 0.0 } else { value };
    match round_decimal(value, places) {
        Some(d) => format!("{d:.precision$}"),
        None => format!("{value:.precision$}"),
    }
}

/// `numerator / denominator`, or `fallback` when the denominator is zero.
pub fn ratio_or(numerator: f64, denominator: f64, fallback: f64) -> f64 {
    if denominator == 0.0 {
        fallback
    } else {
        numerator / denominator
    }
}

/// Convert a 0-100 percentage into a 0-1 fraction.
pub fn pct(value: f64) -> f64 {
    value / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_round2() {
        assert_eq!(round2(71.982), 71.98);
        assert_eq!(round2(20.833_333), 20.83);
        assert_eq!(round2(-4.125_1), -4.13);
        assert_eq!(round2(2000.0), 2000.0);
    }

    #[test]
    fn test_round2_uses_stored_value_not_scaled_product() {
        // 1.115 * 100 lands on 111.5 exactly, but 1.115 itself sits below the midpoint.
        assert_eq!(round2(1.115), 1.11);
        assert_eq!(round2(2.675), 2.67);
        // Exact binary midpoints still go away from zero.
        assert_eq!(round2(32.125), 32.13);
        assert_eq!(round2(-32.125), -32.13);
    }

    #[test]
    fn test_round_passes_non_finite_through() {
        assert!(round2(f64::INFINITY).is_infinite());
        assert!(round2(f64::NEG_INFINITY).is_sign_negative());
        assert!(round2(f64::NAN).is_nan());
    }

    #[test_case(12.25, 1 => "12.3" ; "midpoint one decimal")]
    #[test_case(30.25, 1 => "30.3" ; "another midpoint")]
    #[test_case(32.125, 2 => "32.13" ; "midpoint two decimals")]
    #[test_case(1.115, 2 => "1.11" ; "below midpoint when stored")]
    #[test_case(85.0, 2 => "85.00" ; "pads whole numbers")]
    #[test_case(12.345, 1 => "12.3" ; "plain round down")]
    #[test_case(0.0, 1 => "0.0" ; "zero")]
    #[test_case(-0.0, 1 => "0.0" ; "negative zero")]
    #[test_case(f64::INFINITY, 2 => "inf" ; "infinite")]
    fn test_to_fixed(value: f64, places: u32) -> String {
        to_fixed(value, places)
    }

    #[test]
    fn test_ratio_or() {
        assert_eq!(ratio_or(10.0, 4.0, 0.0), 2.5);
        assert_eq!(ratio_or(10.0, 0.0, 0.0), 0.0);
        assert!(ratio_or(1.0, 0.0, f64::INFINITY).is_infinite());
    }

    #[test]
    fn test_pct() {
        assert!((pct(40.0) - 0.4).abs() < f64::EPSILON);
    }
}
