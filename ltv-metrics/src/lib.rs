//! LTV Boost metrics library
//!
//! Financial calculators and a rule-based recommendation engine for
//! e-commerce stores.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                          ltv-metrics                             │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  ┌──────────────┐   ┌──────────────────┐   ┌──────────────────┐  │
//! │  │ Store        │──▶│ Recommendation   │──▶│ Suggestion       │  │
//! │  │ snapshots    │   │ rules            │   │ board            │  │
//! │  └──────┬───────┘   └──────────────────┘   └──────────────────┘  │
//! │         │                                                        │
//! │         ▼                                                        │
//! │  ┌──────────────┐   ┌──────────────────┐   ┌──────────────────┐  │
//! │  │ Primitives   │──▶│ Ads scalability  │   │ P&L / bundles /  │  │
//! │  │ LTV, MER     │   │ campaign verdict │   │ creatives        │  │
//! │  └──────────────┘   └──────────────────┘   └──────────────────┘  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All calculators are pure functions of their inputs. They never fail:
//! zero denominators resolve to documented fallbacks instead. Inputs are
//! checked separately through [`ltv_common::Validate`] before they reach a
//! calculator.
//!
//! # Key Concepts
//!
//! - **LTV**: `AOV / (1 - repeat rate)`, capped at `10 x AOV` on the dashboard
//! - **MER**: revenue per dollar of ad spend
//! - **Target CAC**: 30% of LTV, the most a store should pay per customer
//! - **Break-even ROAS**: `1 / gross margin`

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod ads;
pub mod bundle;
pub mod creative;
pub mod format;
pub mod numeric;
pub mod pnl;
pub mod primitives;
pub mod recommendation;
pub mod store;
pub mod suggestion;

pub use ads::{
    calculate_ads_scalability, evaluate_campaign, scaling_scenarios, AdsCalculatorInputs,
    AdsCalculatorResults, AdsScalabilityCalculator, CacSource, CampaignInputs, CampaignLevel,
    CampaignVerdict, ScalingScenario,
};
pub use bundle::{evaluate_bundle_tier, BundlePlan, BundleTier, BundleTierResult};
pub use creative::{kill_list, top_performers, CreativeData, CreativeEvaluator, CreativeResult};
pub use format::{format_currency, format_multiplier, format_percentage};
pub use pnl::{calculate_pnl, PnlCostInputs, PnlInputs, PnlResult};
pub use primitives::{calculate_ltv, calculate_mer, lifetime_value, target_mer, LtvPolicy};
pub use recommendation::{
    generate_recommendations, sort_by_priority, Priority, Recommendation, RecommendationType,
};
pub use store::{latest_for_owner, DashboardSummary, StoreMetrics, StoreMetricsRecord};
pub use suggestion::{Suggestion, SuggestionBoard};
