//! Bundle tier pricing.
//!
//! For a "buy N" tier of a single product:
//!
//! ```text
//! final price = base price * N * (1 - discount)
//! profit      = final price - COGS per unit * N
//! margin      = round(profit / final price * 100)      (0 when final price <= 0)
//! ```

use ltv_common::validation::{Checks, Validate, ValidationResult};
use serde::{Deserialize, Serialize};

use crate::numeric::pct;

/// Quantity used for tiers created with [`BundlePlan::add_tier`].
pub const DEFAULT_TIER_QUANTITY: u32 = 2;

/// Discount used for tiers created with [`BundlePlan::add_tier`].
pub const DEFAULT_TIER_DISCOUNT: f64 = 10.0;

/// One bundle offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleTier {
    pub name: String,
    pub quantity: u32,
    /// Discount on the bundle total, 0-100
    pub discount_percent: f64,
}

impl Validate for BundleTier {
    fn validate(&self) -> ValidationResult<()> {
        Checks::new()
            .ensure(self.quantity > 0, "quantity", "must be at least 1")
            .percent("discount_percent", self.discount_percent)
            .finish()
    }
}

/// Priced tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleTierResult {
    pub name: String,
    pub quantity: u32,
    pub discount_percent: f64,
    pub final_price: f64,
    pub profit: f64,
    /// Whole-number percentage
    pub margin: i64,
}

/// Price a single tier.
pub fn evaluate_bundle_tier(
    base_price: f64,
    cogs_per_unit: f64,
    tier: &BundleTier,
) -> BundleTierResult {
    let quantity = f64::from(tier.quantity);
    let total_before_discount = base_price * quantity;
    let discount = total_before_discount * pct(tier.discount_percent);
    let final_price = total_before_discount - discount;
    let total_cogs = cogs_per_unit * quantity;
    let profit = final_price - total_cogs;
    let margin = if final_price > 0.0 {
        round_half_up(profit / final_price * 100.0)
    } else {
        0
    };

    BundleTierResult {
        name: tier.name.clone(),
        quantity: tier.quantity,
        discount_percent: tier.discount_percent,
        final_price,
        profit,
        margin,
    }
}

/// Whole-number rounding with halves going up: -2.5 becomes -2.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// A product's base offer plus its ordered bundle tiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundlePlan {
    pub base_price: f64,
    pub cogs_per_unit: f64,
    #[serde(default)]
    pub tiers: Vec<BundleTier>,
}

impl BundlePlan {
    pub fn new(base_price: f64, cogs_per_unit: f64) -> Self {
        Self {
            base_price,
            cogs_per_unit,
            tiers: Vec::new(),
        }
    }

    /// Append a tier named after its position, e.g. "Bundle 3".
    pub fn add_tier(&mut self) -> &mut BundleTier {
        let name = format!("Bundle {}", self.tiers.len() + 1);
        self.tiers.push(BundleTier {
            name,
            quantity: DEFAULT_TIER_QUANTITY,
            discount_percent: DEFAULT_TIER_DISCOUNT,
        });
        let last = self.tiers.len() - 1;
        &mut self.tiers[last]
    }

    /// Remove the tier at `index`, if present.
    pub fn remove_tier(&mut self, index: usize) -> Option<BundleTier> {
        (index < self.tiers.len()).then(|| self.tiers.remove(index))
    }

    /// Price every tier, keeping tier order.
    pub fn evaluate(&self) -> Vec<BundleTierResult> {
        self.tiers
            .iter()
            .map(|tier| evaluate_bundle_tier(self.base_price, self.cogs_per_unit, tier))
            .collect()
    }
}

impl Validate for BundlePlan {
    fn validate(&self) -> ValidationResult<()> {
        let checks = Checks::new()
            .non_negative("base_price", self.base_price)
            .non_negative("cogs_per_unit", self.cogs_per_unit);
        self.tiers
            .iter()
            .fold(checks, |checks, tier| {
                checks
                    .ensure(
                        tier.quantity > 0,
                        "tiers.quantity",
                        format!("{} must have a quantity of at least 1", tier.name),
                    )
                    .percent("tiers.discount_percent", tier.discount_percent)
            })
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(quantity: u32, discount_percent: f64) -> BundleTier {
        BundleTier {
            name: format!("Buy {quantity}"),
            quantity,
            discount_percent,
        }
    }

    #[test]
    fn test_reference_tier() {
        let r = evaluate_bundle_tier(39.99, 10.0, &tier(2, 10.0));
        assert!((r.final_price - 71.982).abs() < 1e-9);
        assert!((r.profit - 51.982).abs() < 1e-9);
        assert_eq!(r.margin, 72);
    }

    #[test]
    fn test_free_bundle_has_zero_margin() {
        let r = evaluate_bundle_tier(20.0, 5.0, &tier(3, 100.0));
        assert_eq!(r.final_price, 0.0);
        assert_eq!(r.profit, -15.0);
        assert_eq!(r.margin, 0);
    }

    #[test]
    fn test_loss_making_tier_has_negative_margin() {
        let r = evaluate_bundle_tier(10.0, 9.0, &tier(2, 20.0));
        // final 16, profit -2, margin -12.5 -> -12
        assert_eq!(r.margin, -12);
    }

    #[test]
    fn test_plan_add_and_remove() {
        let mut plan = BundlePlan::new(39.99, 10.0);
        plan.tiers.push(tier(2, 10.0));
        plan.tiers.push(tier(3, 15.0));

        let added = plan.add_tier();
        assert_eq!(added.name, "Bundle 3");
        assert_eq!(added.quantity, DEFAULT_TIER_QUANTITY);

        let removed = plan.remove_tier(0).unwrap();
        assert_eq!(removed.name, "Buy 2");
        assert!(plan.remove_tier(5).is_none());

        let names: Vec<_> = plan.evaluate().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Buy 3", "Bundle 3"]);
    }

    #[test]
    fn test_plan_validation() {
        let mut plan = BundlePlan::new(39.99, 10.0);
        plan.tiers.push(tier(0, 10.0));
        assert!(plan.validate().is_err());
        assert!(tier(0, 10.0).validate().is_err());
        assert!(tier(2, 10.0).validate().is_ok());
    }
}
