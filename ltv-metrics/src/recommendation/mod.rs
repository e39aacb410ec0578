//! Rule-based growth recommendations.
//!
//! [`generate_recommendations`] folds the [`rules::RULES`] table over a store's
//! metrics. Rules are not exclusive, so one profile can collect several
//! recommendations of the same type; nothing is deduplicated or capped. The
//! output keeps rule order, not priority order; callers wanting the most
//! urgent first can apply [`sort_by_priority`].
//!
//! When the rules yield fewer than [`MIN_RECOMMENDATIONS`], a post-purchase
//! email sequence is appended so every merchant gets something to act on.

pub mod rules;
pub mod types;

pub use rules::{rule, Rule, RuleId, RULES};
pub use types::{sort_by_priority, Priority, Recommendation, RecommendationType};

use crate::store::StoreMetrics;

/// Below this count the fallback retention play is appended.
pub const MIN_RECOMMENDATIONS: usize = 3;

/// Generate recommendations for a store, in rule order.
pub fn generate_recommendations(metrics: &StoreMetrics) -> Vec<Recommendation> {
    let mut recommendations = RULES.iter().fold(Vec::new(), |mut acc, rule| {
        let produced = rule.evaluate(metrics);
        if !produced.is_empty() {
            tracing::debug!(rule = ?rule.id, count = produced.len(), "Rule matched");
        }
        acc.extend(produced);
        acc
    });

    if recommendations.len() < MIN_RECOMMENDATIONS {
        tracing::debug!(
            matched = recommendations.len(),
            "Too few recommendations, adding post-purchase sequence"
        );
        recommendations.push(rules::post_purchase_sequence());
    }

    recommendations
}

/// Ids of the rules that fire for `metrics`, in evaluation order.
pub fn matching_rules(metrics: &StoreMetrics) -> Vec<RuleId> {
    RULES
        .iter()
        .filter(|rule| (rule.applies)(metrics))
        .map(|rule| rule.id)
        .collect()
}
