//! Ad spend calculators.
//!
//! - [`scalability`]: LTV-driven CAC targets and how far spend can grow
//! - [`campaign`]: scale / hold / kill call on a live campaign's ROAS

pub mod campaign;
pub mod scalability;

pub use campaign::{
    evaluate_campaign, scaling_scenarios, CampaignInputs, CampaignLevel, CampaignVerdict,
    ScalingScenario,
};
pub use scalability::{
    calculate_ads_scalability, AdsCalculatorInputs, AdsCalculatorResults,
    AdsScalabilityCalculator, CacSource,
};
