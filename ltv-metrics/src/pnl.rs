//! Monthly profit & loss.
//!
//! ```text
//! COGS         = revenue * (1 - gross_margin)
//! Gross profit = revenue - COGS
//! Net profit   = gross profit - ad spend - operating expenses
//! Net margin   = net profit / revenue * 100
//! ```
//!
//! Revenue is supplied by the caller (normally the latest store snapshot), so
//! the calculator has no data dependency of its own.

use ltv_common::validation::{Checks, Validate, ValidationResult};
use serde::{Deserialize, Serialize};

use crate::numeric::{pct, ratio_or, round2};

/// Cost inputs entered on the P&L page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PnlCostInputs {
    /// Gross margin, 0-100
    pub gross_margin_percentage: f64,
    pub monthly_ad_spend: f64,
    /// SaaS, rent, salaries and the like
    pub monthly_operating_expenses: f64,
}

impl PnlCostInputs {
    /// Combine with the revenue of the latest snapshot.
    pub fn with_revenue(self, monthly_revenue: f64) -> PnlInputs {
        PnlInputs {
            gross_margin_percentage: self.gross_margin_percentage,
            monthly_ad_spend: self.monthly_ad_spend,
            monthly_operating_expenses: self.monthly_operating_expenses,
            monthly_revenue,
        }
    }
}

impl Validate for PnlCostInputs {
    fn validate(&self) -> ValidationResult<()> {
        Checks::new()
            .percent("gross_margin_percentage", self.gross_margin_percentage)
            .non_negative("monthly_ad_spend", self.monthly_ad_spend)
            .non_negative("monthly_operating_expenses", self.monthly_operating_expenses)
            .finish()
    }
}

/// Full P&L input including revenue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PnlInputs {
    pub gross_margin_percentage: f64,
    pub monthly_ad_spend: f64,
    pub monthly_operating_expenses: f64,
    pub monthly_revenue: f64,
}

/// Computed P&L. Money fields are rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PnlResult {
    pub monthly_revenue: f64,
    pub cogs: f64,
    pub gross_profit: f64,
    pub ad_spend: f64,
    pub operating_expenses: f64,
    pub net_profit: f64,
    /// Passed through unrounded
    pub gross_margin_percentage: f64,
    /// Percentage of revenue, rounded to 2 decimals; 0 when revenue is 0
    pub net_profit_margin: f64,
}

impl PnlResult {
    pub fn is_profitable(&self) -> bool {
        self.net_profit > 0.0
    }
}

/// Calculate the P&L for one month.
pub fn calculate_pnl(inputs: &PnlInputs) -> PnlResult {
    let revenue = inputs.monthly_revenue;

    let cogs = revenue * (1.0 - pct(inputs.gross_margin_percentage));
    let gross_profit = revenue - cogs;
    let net_profit = gross_profit - inputs.monthly_ad_spend - inputs.monthly_operating_expenses;
    // Zero revenue has no meaningful margin; report 0 rather than NaN/inf.
    let net_profit_margin = ratio_or(net_profit, revenue, 0.0) * 100.0;

    tracing::debug!(revenue, net_profit, net_profit_margin, "Calculated P&L");

    PnlResult {
        monthly_revenue: round2(revenue),
        cogs: round2(cogs),
        gross_profit: round2(gross_profit),
        ad_spend: round2(inputs.monthly_ad_spend),
        operating_expenses: round2(inputs.monthly_operating_expenses),
        net_profit: round2(net_profit),
        gross_margin_percentage: inputs.gross_margin_percentage,
        net_profit_margin: round2(net_profit_margin),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(margin: f64, ads: f64, opex: f64, revenue: f64) -> PnlInputs {
        PnlInputs {
            gross_margin_percentage: margin,
            monthly_ad_spend: ads,
            monthly_operating_expenses: opex,
            monthly_revenue: revenue,
        }
    }

    #[test]
    fn test_reference_pnl() {
        let result = calculate_pnl(&inputs(50.0, 5000.0, 1000.0, 20_000.0));
        assert_eq!(result.monthly_revenue, 20_000.0);
        assert_eq!(result.cogs, 10_000.0);
        assert_eq!(result.gross_profit, 10_000.0);
        assert_eq!(result.ad_spend, 5000.0);
        assert_eq!(result.operating_expenses, 1000.0);
        assert_eq!(result.net_profit, 4000.0);
        assert_eq!(result.net_profit_margin, 20.0);
        assert!(result.is_profitable());
    }

    #[test]
    fn test_loss_making_month() {
        let result = calculate_pnl(&inputs(30.0, 4000.0, 1500.0, 12_345.67));
        // gross = 3703.701, net = -1796.299
        assert!((result.gross_profit - 3703.70).abs() < 1e-9);
        assert!((result.net_profit - -1796.30).abs() < 1e-9);
        assert!((result.net_profit_margin - -14.55).abs() < 1e-9);
        assert!(!result.is_profitable());
    }

    #[test]
    fn test_gross_margin_passes_through_unrounded() {
        let result = calculate_pnl(&inputs(33.333, 0.0, 0.0, 1000.0));
        assert_eq!(result.gross_margin_percentage, 33.333);
    }

    #[test]
    fn test_zero_revenue_margin_is_zero() {
        let result = calculate_pnl(&inputs(50.0, 200.0, 100.0, 0.0));
        assert_eq!(result.net_profit, -300.0);
        assert_eq!(result.net_profit_margin, 0.0);
    }

    #[test]
    fn test_cost_inputs_validation() {
        let ok = PnlCostInputs {
            gross_margin_percentage: 60.0,
            monthly_ad_spend: 0.0,
            monthly_operating_expenses: 0.0,
        };
        assert!(ok.validate().is_ok());

        let bad = PnlCostInputs {
            gross_margin_percentage: 120.0,
            ..ok.clone()
        };
        assert!(bad.validate().is_err());

        let full = ok.with_revenue(8000.0);
        assert_eq!(full.monthly_revenue, 8000.0);
    }

    #[test]
    fn test_idempotent() {
        let i = inputs(47.5, 1234.56, 789.0, 15_000.0);
        assert_eq!(calculate_pnl(&i), calculate_pnl(&i));
    }
}
