//! Recommendation types.

use serde::{Deserialize, Serialize};

/// Growth lever a recommendation pulls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationType {
    Subscription,
    Bundle,
    Upsell,
    CrossSell,
    Loyalty,
    Retention,
}

impl std::fmt::Display for RecommendationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Subscription => write!(f, "SUBSCRIPTION"),
            Self::Bundle => write!(f, "BUNDLE"),
            Self::Upsell => write!(f, "UPSELL"),
            Self::CrossSell => write!(f, "CROSS_SELL"),
            Self::Loyalty => write!(f, "LOYALTY"),
            Self::Retention => write!(f, "RETENTION"),
        }
    }
}

/// How urgently a recommendation should be acted on.
///
/// Ordering follows urgency: `Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// A single suggestion produced from store metrics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationType,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    /// Free text such as "+25-40% LTV"
    pub estimated_impact: String,
}

impl Recommendation {
    pub fn new(
        kind: RecommendationType,
        priority: Priority,
        title: impl Into<String>,
        description: impl Into<String>,
        estimated_impact: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            priority,
            title: title.into(),
            description: description.into(),
            estimated_impact: estimated_impact.into(),
        }
    }
}

/// Re-sort most urgent first. Equal priorities keep their relative order.
pub fn sort_by_priority(recommendations: &mut [Recommendation]) {
    recommendations.sort_by(|a, b| b.priority.cmp(&a.priority));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(kind: RecommendationType, priority: Priority, title: &str) -> Recommendation {
        Recommendation::new(kind, priority, title, "", "")
    }

    #[test]
    fn test_priority_order() {
        assert!(Priority::Critical > Priority::High);
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
    }

    #[test]
    fn test_sort_by_priority_is_stable() {
        let mut recs = vec![
            rec(RecommendationType::Loyalty, Priority::Medium, "a"),
            rec(RecommendationType::Bundle, Priority::Critical, "b"),
            rec(RecommendationType::Upsell, Priority::Medium, "c"),
            rec(RecommendationType::Subscription, Priority::High, "d"),
        ];
        sort_by_priority(&mut recs);
        let titles: Vec<_> = recs.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(rec(
            RecommendationType::CrossSell,
            Priority::High,
            "Complete-the-Look",
        ))
        .unwrap();
        assert_eq!(json["type"], "CROSS_SELL");
        assert_eq!(json["priority"], "HIGH");
        assert_eq!(json["estimated_impact"], "");
    }
}
