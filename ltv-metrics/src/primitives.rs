//! Lifetime value and marketing efficiency primitives.
//!
//! # LTV model
//!
//! ```text
//! LTV = AOV / (1 - repeat_rate)
//! ```
//!
//! The geometric series diverges once the repeat rate reaches 100%, so each
//! call site picks an [`LtvPolicy`] that says what happens there.

use serde::{Deserialize, Serialize};

use crate::numeric::pct;

/// Multiple of AOV returned by the capped policy at or above a 100% repeat rate.
pub const LTV_CAP_MULTIPLE: f64 = 10.0;

/// Share of LTV a healthy store should spend to acquire a customer.
pub const TARGET_CAC_SHARE_OF_LTV: f64 = 0.3;

/// Target MER reported when the target CAC is not positive.
pub const FALLBACK_TARGET_MER: f64 = 3.0;

/// Edge-case policy for the LTV formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LtvPolicy {
    /// Repeat rates of 100% or more return `AOV * 10`.
    Capped,
    /// Plain formula: infinite at exactly 100%, negative above it.
    Uncapped,
}

/// Customer lifetime value from AOV and a 0-100 repeat rate.
pub fn lifetime_value(aov: f64, repeat_rate_pct: f64, policy: LtvPolicy) -> f64 {
    let repeat = pct(repeat_rate_pct);
    match policy {
        LtvPolicy::Capped if repeat >= 1.0 => aov * LTV_CAP_MULTIPLE,
        _ => aov / (1.0 - repeat),
    }
}

/// Dashboard LTV: the capped variant.
pub fn calculate_ltv(aov: f64, repeat_rate_pct: f64) -> f64 {
    lifetime_value(aov, repeat_rate_pct, LtvPolicy::Capped)
}

/// Marketing efficiency ratio. Zero ad spend yields `0`, not an error.
pub fn calculate_mer(revenue: f64, ad_spend: f64) -> f64 {
    if ad_spend == 0.0 {
        return 0.0;
    }
    revenue / ad_spend
}

/// MER a store should aim for given its LTV.
///
/// The target CAC is 30% of the capped LTV; the target MER is how many
/// dollars of first-order revenue each acquisition dollar must return.
pub fn target_mer(aov: f64, repeat_rate_pct: f64) -> f64 {
    let cac = calculate_ltv(aov, repeat_rate_pct) * TARGET_CAC_SHARE_OF_LTV;
    if cac > 0.0 {
        aov / cac
    } else {
        FALLBACK_TARGET_MER
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test_case(50.0, 20.0, 62.5 ; "twenty percent repeat")]
    #[test_case(40.0, 0.0, 40.0 ; "no repeat customers")]
    #[test_case(30.0, 100.0, 300.0 ; "cap at one hundred percent")]
    #[test_case(30.0, 150.0, 300.0 ; "cap above one hundred percent")]
    fn test_calculate_ltv(aov: f64, repeat: f64, expected: f64) {
        assert!((calculate_ltv(aov, repeat) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_uncapped_ltv_at_one_hundred_percent_is_infinite() {
        let ltv = lifetime_value(50.0, 100.0, LtvPolicy::Uncapped);
        assert!(ltv.is_infinite() && ltv.is_sign_positive());
    }

    #[test]
    fn test_uncapped_ltv_above_one_hundred_percent_is_negative() {
        let ltv = lifetime_value(50.0, 125.0, LtvPolicy::Uncapped);
        assert!((ltv - -200.0).abs() < 1e-9);
    }

    #[test]
    fn test_policies_agree_below_one_hundred_percent() {
        let capped = lifetime_value(80.0, 35.0, LtvPolicy::Capped);
        let uncapped = lifetime_value(80.0, 35.0, LtvPolicy::Uncapped);
        assert_eq!(capped, uncapped);
    }

    #[test]
    fn test_calculate_mer() {
        assert_eq!(calculate_mer(10_000.0, 2_500.0), 4.0);
        assert_eq!(calculate_mer(10_000.0, 0.0), 0.0);
    }

    #[test]
    fn test_target_mer() {
        // LTV = 62.5, CAC = 18.75, MER = 50 / 18.75
        assert!((target_mer(50.0, 20.0) - 2.6667).abs() < 0.001);
        // With no repeat customers the target is always 1 / 0.3
        assert!((target_mer(35.0, 0.0) - 3.3333).abs() < 0.001);
        // A zero AOV leaves no CAC budget at all
        assert_eq!(target_mer(0.0, 20.0), FALLBACK_TARGET_MER);
    }

    proptest! {
        #[test]
        fn prop_ltv_matches_formula(aov in 0.01f64..10_000.0, repeat in 0.0f64..99.99) {
            let expected = aov / (1.0 - repeat / 100.0);
            prop_assert!((calculate_ltv(aov, repeat) - expected).abs() <= expected * 1e-12);
        }

        #[test]
        fn prop_capped_ltv_at_or_above_cap(aov in 0.01f64..10_000.0, repeat in 100.0f64..1_000.0) {
            prop_assert_eq!(calculate_ltv(aov, repeat), aov * LTV_CAP_MULTIPLE);
        }

        #[test]
        fn prop_mer_zero_spend(revenue in -1e9f64..1e9) {
            prop_assert_eq!(calculate_mer(revenue, 0.0), 0.0);
        }
    }
}
