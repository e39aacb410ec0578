//! Store metrics snapshots.
//!
//! A merchant submits AOV, monthly revenue, repeat rate and niche during
//! onboarding. Each submission is an immutable snapshot; the newest snapshot
//! per owner is the one every calculator and the recommendation engine read.

use chrono::{DateTime, Utc};
use ltv_common::validation::{Checks, Validate, ValidationResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::primitives::{calculate_ltv, target_mer};

/// Core store figures entered by a merchant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreMetrics {
    /// Average order value in dollars
    pub aov: f64,
    /// Monthly revenue in dollars
    pub monthly_revenue: f64,
    /// Share of customers who order again, 0-100
    pub repeat_rate: f64,
    /// Free-text niche, e.g. "Beauty & skincare"
    pub niche: String,
}

impl Validate for StoreMetrics {
    fn validate(&self) -> ValidationResult<()> {
        Checks::new()
            .positive("aov", self.aov)
            .positive("monthly_revenue", self.monthly_revenue)
            .percent("repeat_rate", self.repeat_rate)
            .not_blank("niche", &self.niche)
            .finish()
    }
}

/// A stored snapshot of [`StoreMetrics`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreMetricsRecord {
    pub id: Uuid,
    pub owner_id: String,
    pub metrics: StoreMetrics,
    pub created_at: DateTime<Utc>,
}

impl StoreMetricsRecord {
    /// Create a snapshot with a fresh id.
    pub fn new(owner_id: impl Into<String>, metrics: StoreMetrics, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.into(),
            metrics,
            created_at,
        }
    }
}

/// The authoritative snapshot for an owner: the newest by creation time.
///
/// When two snapshots share a timestamp the one later in the slice wins.
pub fn latest_for_owner<'a>(
    records: &'a [StoreMetricsRecord],
    owner_id: &str,
) -> Option<&'a StoreMetricsRecord> {
    records
        .iter()
        .filter(|r| r.owner_id == owner_id)
        .max_by_key(|r| r.created_at)
}

/// Figures shown on the dashboard metric cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub aov: f64,
    pub monthly_revenue: f64,
    pub repeat_rate: f64,
    /// Capped LTV
    pub ltv: f64,
    pub target_mer: f64,
}

impl DashboardSummary {
    pub fn from_metrics(metrics: &StoreMetrics) -> Self {
        Self {
            aov: metrics.aov,
            monthly_revenue: metrics.monthly_revenue,
            repeat_rate: metrics.repeat_rate,
            ltv: calculate_ltv(metrics.aov, metrics.repeat_rate),
            target_mer: target_mer(metrics.aov, metrics.repeat_rate),
        }
    }
}
