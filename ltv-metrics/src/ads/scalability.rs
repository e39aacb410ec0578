//! Ads scalability calculator.
//!
//! Works out how much a store can pay to acquire a customer and how far ad
//! spend can be pushed:
//!
//! ```text
//! LTV                   = AOV / (1 - repeat_rate)          (uncapped)
//! Gross profit/customer = LTV * gross_margin
//! Max profitable CAC    = gross profit per customer        (break-even)
//! Target CAC            = LTV / target LTV:CAC ratio
//! Max scalable spend    = monthly revenue * 20%
//! ```
//!
//! Stores do not report their real CAC yet. Unless one is supplied, the
//! current CAC is assumed to be 80% of the target, which makes the scalable
//! branch the only reachable one for any positive target CAC.

use ltv_common::validation::{Checks, Validate, ValidationResult};
use serde::{Deserialize, Serialize};

use crate::numeric::{pct, round2, to_fixed};
use crate::primitives::{lifetime_value, LtvPolicy};
use crate::store::StoreMetrics;

/// Fraction of the target CAC assumed as the current CAC when none is known.
pub const ASSUMED_CAC_SHARE_OF_TARGET: f64 = 0.8;

/// Default share of monthly revenue used as the ad spend ceiling.
pub const DEFAULT_MAX_AD_SPEND_SHARE: f64 = 0.20;

/// Inputs for the ads scalability calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdsCalculatorInputs {
    #[serde(flatten)]
    pub store: StoreMetrics,
    /// Gross margin, 0-100
    pub gross_margin_percentage: f64,
    /// Desired LTV:CAC, e.g. 3 for 3:1
    pub target_ltv_cac_ratio: f64,
    /// Current monthly ad spend, for context only
    pub current_ad_spend: f64,
    /// Measured CAC, when the store tracks it. `None` uses the proxy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_cac: Option<f64>,
}

impl Validate for AdsCalculatorInputs {
    fn validate(&self) -> ValidationResult<()> {
        let checks = Checks::new()
            .positive("aov", self.store.aov)
            .positive("monthly_revenue", self.store.monthly_revenue)
            .percent("repeat_rate", self.store.repeat_rate)
            .percent("gross_margin_percentage", self.gross_margin_percentage)
            .positive("target_ltv_cac_ratio", self.target_ltv_cac_ratio)
            .non_negative("current_ad_spend", self.current_ad_spend);
        match self.current_cac {
            Some(cac) => checks.non_negative("current_cac", cac),
            None => checks,
        }
        .finish()
    }
}

/// Where the current CAC used for the decision came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacSource {
    /// 80% of the target CAC
    AssumedProxy,
    /// Supplied by the caller
    Measured,
}

/// Results of the ads scalability calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdsCalculatorResults {
    pub ltv: f64,
    pub gross_profit_per_customer: f64,
    pub max_profitable_cac: f64,
    pub target_cac: f64,
    pub max_scalable_ad_spend: f64,
    /// Echo of the target ratio until real CAC tracking exists
    pub current_ltv_cac_ratio: f64,
    pub is_scalable: bool,
    pub scaling_recommendation: String,
    pub cac_source: CacSource,
}

/// Ads scalability calculator.
#[derive(Debug, Clone)]
pub struct AdsScalabilityCalculator {
    max_ad_spend_share: f64,
}

impl Default for AdsScalabilityCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl AdsScalabilityCalculator {
    /// Create a calculator with the 20%-of-revenue spend ceiling.
    pub fn new() -> Self {
        Self {
            max_ad_spend_share: DEFAULT_MAX_AD_SPEND_SHARE,
        }
    }

    /// Create with a custom spend ceiling (fraction of monthly revenue).
    pub fn with_max_ad_spend_share(max_ad_spend_share: f64) -> Self {
        Self { max_ad_spend_share }
    }

    pub fn calculate(&self, inputs: &AdsCalculatorInputs) -> AdsCalculatorResults {
        let ltv = lifetime_value(inputs.store.aov, inputs.store.repeat_rate, LtvPolicy::Uncapped);
        let gross_profit_per_customer = ltv * pct(inputs.gross_margin_percentage);
        let max_profitable_cac = gross_profit_per_customer;
        let target_cac = ltv / inputs.target_ltv_cac_ratio;
        let max_scalable_ad_spend = inputs.store.monthly_revenue * self.max_ad_spend_share;

        let (current_cac, cac_source) = match inputs.current_cac {
            Some(cac) => (cac, CacSource::Measured),
            None => (assumed_current_cac(target_cac), CacSource::AssumedProxy),
        };
        let is_scalable = is_scalable(current_cac, target_cac);

        let scaling_recommendation = scaling_recommendation(
            is_scalable,
            target_cac,
            max_profitable_cac,
            max_scalable_ad_spend,
            inputs.target_ltv_cac_ratio,
        );

        tracing::debug!(
            ltv,
            target_cac,
            current_cac,
            ?cac_source,
            is_scalable,
            "Calculated ads scalability"
        );

        AdsCalculatorResults {
            ltv: round2(ltv),
            gross_profit_per_customer: round2(gross_profit_per_customer),
            max_profitable_cac: round2(max_profitable_cac),
            target_cac: round2(target_cac),
            max_scalable_ad_spend: round2(max_scalable_ad_spend),
            current_ltv_cac_ratio: inputs.target_ltv_cac_ratio,
            is_scalable,
            scaling_recommendation,
            cac_source,
        }
    }
}

/// Calculate with the default 20% spend ceiling.
pub fn calculate_ads_scalability(inputs: &AdsCalculatorInputs) -> AdsCalculatorResults {
    AdsScalabilityCalculator::new().calculate(inputs)
}

/// Stand-in for the store's current CAC.
pub fn assumed_current_cac(target_cac: f64) -> f64 {
    target_cac * ASSUMED_CAC_SHARE_OF_TARGET
}

/// A store can scale while acquiring customers below the target CAC.
pub fn is_scalable(current_cac: f64, target_cac: f64) -> bool {
    current_cac < target_cac
}

/// Advice text for either side of the scalability decision.
pub fn scaling_recommendation(
    is_scalable: bool,
    target_cac: f64,
    max_profitable_cac: f64,
    max_scalable_ad_spend: f64,
    target_ratio: f64,
) -> String {
    if is_scalable {
        let target_cac = to_fixed(target_cac, 2);
        let max_scalable_ad_spend = to_fixed(max_scalable_ad_spend, 2);
        format!(
            "Your estimated Target CAC is ${target_cac}. Since your LTV:CAC ratio is healthy, \
             you can safely scale your ad spend up to ${max_scalable_ad_spend} per month. \
             Focus on maintaining a LTV:CAC ratio above {target_ratio}:1."
        )
    } else {
        let max_profitable_cac = to_fixed(max_profitable_cac, 2);
        format!(
            "Your estimated Max Profitable CAC is ${max_profitable_cac}. Your current ad \
             performance suggests you are operating too close to or above your break-even point. \
             Focus on improving your LTV (AOV and Repeat Rate) before scaling ad spend."
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(repeat_rate: f64) -> AdsCalculatorInputs {
        AdsCalculatorInputs {
            store: StoreMetrics {
                aov: 50.0,
                monthly_revenue: 10_000.0,
                repeat_rate,
                niche: "Pets".into(),
            },
            gross_margin_percentage: 50.0,
            target_ltv_cac_ratio: 3.0,
            current_ad_spend: 1000.0,
            current_cac: None,
        }
    }

    #[test]
    fn test_reference_scenario() {
        let r = calculate_ads_scalability(&inputs(20.0));
        assert_eq!(r.ltv, 62.5);
        assert_eq!(r.gross_profit_per_customer, 31.25);
        assert_eq!(r.max_profitable_cac, 31.25);
        assert_eq!(r.target_cac, 20.83);
        assert_eq!(r.max_scalable_ad_spend, 2000.0);
        assert_eq!(r.current_ltv_cac_ratio, 3.0);
        assert!(r.is_scalable);
        assert_eq!(r.cac_source, CacSource::AssumedProxy);
        assert_eq!(
            r.scaling_recommendation,
            "Your estimated Target CAC is $20.83. Since your LTV:CAC ratio is healthy, you can \
             safely scale your ad spend up to $2000.00 per month. Focus on maintaining a LTV:CAC \
             ratio above 3:1."
        );
    }

    #[test]
    fn test_proxy_is_always_scalable_for_positive_target() {
        for repeat in [0.0, 10.0, 45.5, 80.0, 99.0] {
            assert!(calculate_ads_scalability(&inputs(repeat)).is_scalable);
        }
    }

    #[test]
    fn test_repeat_rate_of_one_hundred_is_uncapped() {
        let r = calculate_ads_scalability(&inputs(100.0));
        assert!(r.ltv.is_infinite());
        assert!(r.target_cac.is_infinite());
        // inf * 0.8 is not below inf, so the proxy cannot vouch for scaling.
        assert!(!r.is_scalable);
    }

    #[test]
    fn test_measured_cac_can_block_scaling() {
        let mut i = inputs(20.0);
        i.current_cac = Some(25.0);
        let r = calculate_ads_scalability(&i);
        assert!(!r.is_scalable);
        assert_eq!(r.cac_source, CacSource::Measured);
        assert!(r
            .scaling_recommendation
            .starts_with("Your estimated Max Profitable CAC is $31.25."));
    }

    #[test]
    fn test_custom_spend_ceiling() {
        let r = AdsScalabilityCalculator::with_max_ad_spend_share(0.35).calculate(&inputs(20.0));
        assert_eq!(r.max_scalable_ad_spend, 3500.0);
    }

    #[test]
    fn test_text_rounds_midpoints_up() {
        let text = scaling_recommendation(true, 20.125, 30.0, 2_000.005, 3.0);
        assert!(text.starts_with("Your estimated Target CAC is $20.13."));

        let text = scaling_recommendation(false, 20.0, 31.125, 2_000.0, 3.0);
        assert!(text.starts_with("Your estimated Max Profitable CAC is $31.13."));
    }

    #[test]
    fn test_fractional_ratio_in_text() {
        let mut i = inputs(20.0);
        i.target_ltv_cac_ratio = 2.5;
        let r = calculate_ads_scalability(&i);
        assert!(r.scaling_recommendation.ends_with("above 2.5:1."));
    }

    #[test]
    fn test_validation() {
        assert!(inputs(20.0).validate().is_ok());

        let mut bad = inputs(20.0);
        bad.target_ltv_cac_ratio = 0.0;
        bad.current_cac = Some(-5.0);
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_inputs_deserialize_flat() {
        let json = r#"{
            "aov": 50, "monthly_revenue": 10000, "repeat_rate": 20, "niche": "Pets",
            "gross_margin_percentage": 50, "target_ltv_cac_ratio": 3, "current_ad_spend": 1000
        }"#;
        let parsed: AdsCalculatorInputs = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, inputs(20.0));
    }
}
