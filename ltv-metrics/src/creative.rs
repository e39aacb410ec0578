//! Ad creative profitability.
//!
//! Purchases are valued at an assumed average order value (default $50)
//! because revenue is not tracked per creative.
//!
//! | Metric         | Formula                          | Zero guard             |
//! |----------------|----------------------------------|------------------------|
//! | CTR            | clicks / impressions * 100       | 0 without impressions  |
//! | CPC            | spend / clicks                   | 0 without clicks       |
//! | ROAS           | revenue / spend                  | 0 without spend        |
//! | Break-even ROAS| 1 / (1 - COGS%)                  | ∞ when COGS% >= 100    |
//! | Profit         | revenue - spend - revenue * COGS%| -                      |

use ltv_common::validation::{Checks, Validate, ValidationResult};
use serde::{Deserialize, Serialize};

use crate::numeric::{pct, ratio_or, round2};

/// Revenue credited per purchase unless configured otherwise.
pub const DEFAULT_ASSUMED_AOV: f64 = 50.0;

/// Raw numbers for one ad creative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreativeData {
    pub name: String,
    pub spend: f64,
    pub impressions: u64,
    pub clicks: u64,
    pub purchases: u64,
    /// COGS as a share of revenue, 0-100
    pub cogs_percentage: f64,
}

impl Validate for CreativeData {
    fn validate(&self) -> ValidationResult<()> {
        Checks::new()
            .non_negative("spend", self.spend)
            .percent("cogs_percentage", self.cogs_percentage)
            .finish()
    }
}

/// Computed creative metrics, rounded to 2 decimals for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreativeResult {
    #[serde(flatten)]
    pub data: CreativeData,
    pub ctr: f64,
    pub cpc: f64,
    pub revenue: f64,
    pub roas: f64,
    pub profit: f64,
    pub breakeven_roas: f64,
    /// Decided on unrounded ROAS figures
    pub is_profitable: bool,
}

/// Minimum ROAS at which the gross margin covers the ad spend.
pub fn breakeven_roas(cogs_percentage: f64) -> f64 {
    let gross_margin = 1.0 - pct(cogs_percentage);
    if gross_margin > 0.0 {
        1.0 / gross_margin
    } else {
        f64::INFINITY
    }
}

/// Evaluates creatives against an assumed order value.
#[derive(Debug, Clone)]
pub struct CreativeEvaluator {
    assumed_aov: f64,
}

impl Default for CreativeEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl CreativeEvaluator {
    pub fn new() -> Self {
        Self {
            assumed_aov: DEFAULT_ASSUMED_AOV,
        }
    }

    pub fn with_assumed_aov(assumed_aov: f64) -> Self {
        Self { assumed_aov }
    }

    pub fn assumed_aov(&self) -> f64 {
        self.assumed_aov
    }

    pub fn evaluate(&self, data: &CreativeData) -> CreativeResult {
        let impressions = data.impressions as f64;
        let clicks = data.clicks as f64;

        let breakeven = breakeven_roas(data.cogs_percentage);
        let ctr = ratio_or(clicks, impressions, 0.0) * 100.0;
        let cpc = ratio_or(data.spend, clicks, 0.0);
        let revenue = data.purchases as f64 * self.assumed_aov;
        let roas = ratio_or(revenue, data.spend, 0.0);
        let cogs = revenue * pct(data.cogs_percentage);
        let profit = revenue - data.spend - cogs;

        CreativeResult {
            data: data.clone(),
            ctr: round2(ctr),
            cpc: round2(cpc),
            revenue: round2(revenue),
            roas: round2(roas),
            profit: round2(profit),
            breakeven_roas: round2(breakeven),
            is_profitable: roas >= breakeven,
        }
    }

    /// Evaluate every creative, most profitable first.
    ///
    /// Creatives with equal profit keep their input order.
    pub fn evaluate_all(&self, creatives: &[CreativeData]) -> Vec<CreativeResult> {
        let mut results: Vec<_> = creatives.iter().map(|c| self.evaluate(c)).collect();
        results.sort_by(|a, b| b.profit.total_cmp(&a.profit));

        tracing::debug!(
            count = results.len(),
            unprofitable = results.iter().filter(|r| !r.is_profitable).count(),
            "Evaluated creatives"
        );
        results
    }
}

/// The `n` most profitable creatives from a profit-sorted list.
pub fn top_performers(sorted: &[CreativeResult], n: usize) -> &[CreativeResult] {
    &sorted[..n.min(sorted.len())]
}

/// Creatives below break-even, in the order given.
pub fn kill_list(results: &[CreativeResult]) -> Vec<&CreativeResult> {
    results.iter().filter(|r| !r.is_profitable).collect()
}
