//! Persisted recommendations and their implementation status.
//!
//! Every generated [`Recommendation`] is stored as a [`Suggestion`] tied to the
//! metrics snapshot it was generated from. Merchants tick suggestions off as
//! they implement them; nothing else about a suggestion ever changes.

use chrono::{DateTime, Utc};
use ltv_common::{Error, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::recommendation::{generate_recommendations, Recommendation};
use crate::store::StoreMetricsRecord;

/// A recommendation saved for one store snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: Uuid,
    pub owner_id: String,
    pub store_metrics_id: Uuid,
    #[serde(flatten)]
    pub recommendation: Recommendation,
    pub implemented: bool,
    pub implemented_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Suggestion {
    pub fn new(
        record: &StoreMetricsRecord,
        recommendation: Recommendation,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id: record.owner_id.clone(),
            store_metrics_id: record.id,
            recommendation,
            implemented: false,
            implemented_at: None,
            created_at,
        }
    }

    /// Mark as implemented at `now`, or clear the mark.
    pub fn set_implemented(&mut self, implemented: bool, now: DateTime<Utc>) {
        self.implemented = implemented;
        self.implemented_at = implemented.then_some(now);
    }
}

/// In-memory collection of suggestions across owners.
#[derive(Debug, Clone, Default)]
pub struct SuggestionBoard {
    suggestions: Vec<Suggestion>,
}

impl SuggestionBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.suggestions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Suggestion> {
        self.suggestions.iter().find(|s| s.id == id)
    }

    /// Run the recommendation engine for a snapshot and store the results.
    ///
    /// Returns the ids of the new suggestions, in generation order.
    pub fn generate_for(&mut self, record: &StoreMetricsRecord, now: DateTime<Utc>) -> Vec<Uuid> {
        let created: Vec<Suggestion> = generate_recommendations(&record.metrics)
            .into_iter()
            .map(|rec| Suggestion::new(record, rec, now))
            .collect();
        let ids = created.iter().map(|s| s.id).collect();

        tracing::debug!(
            owner_id = %record.owner_id,
            store_metrics_id = %record.id,
            count = created.len(),
            "Stored suggestions"
        );
        self.suggestions.extend(created);
        ids
    }

    /// Set the implemented flag on one of `owner_id`'s suggestions.
    ///
    /// Ids owned by someone else are reported as not found.
    pub fn toggle(
        &mut self,
        owner_id: &str,
        id: Uuid,
        implemented: bool,
        now: DateTime<Utc>,
    ) -> Result<&Suggestion> {
        let suggestion = self
            .suggestions
            .iter_mut()
            .find(|s| s.id == id && s.owner_id == owner_id)
            .ok_or_else(|| Error::NotFound(format!("suggestion {id}")))?;

        suggestion.set_implemented(implemented, now);
        tracing::debug!(%id, implemented, "Toggled suggestion");
        Ok(suggestion)
    }

    /// Suggestions of one snapshot, most urgent first, then newest first.
    pub fn for_metrics(&self, record: &StoreMetricsRecord) -> Vec<&Suggestion> {
        let mut matching: Vec<_> = self
            .suggestions
            .iter()
            .filter(|s| s.store_metrics_id == record.id)
            .collect();
        matching.sort_by(|a, b| {
            b.recommendation
                .priority
                .cmp(&a.recommendation.priority)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        matching
    }

    /// Share of an owner's suggestions that are implemented, 0-100.
    pub fn completion_percentage(&self, owner_id: &str) -> f64 {
        let (done, total) = self
            .suggestions
            .iter()
            .filter(|s| s.owner_id == owner_id)
            .fold((0usize, 0usize), |(done, total), s| {
                (done + usize::from(s.implemented), total + 1)
            });
        if total == 0 {
            0.0
        } else {
            done as f64 / total as f64 * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommendation::Priority;
    use crate::store::StoreMetrics;
    use chrono::TimeZone;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 20, 14, minute, 0).unwrap()
    }

    fn record(owner: &str) -> StoreMetricsRecord {
        StoreMetricsRecord::new(
            owner,
            StoreMetrics {
                aov: 30.0,
                monthly_revenue: 5_000.0,
                repeat_rate: 10.0,
                niche: "Beauty".into(),
            },
            at(0),
        )
    }

    #[test]
    fn test_generate_for_links_snapshot() {
        let rec = record("alice");
        let mut board = SuggestionBoard::new();
        let ids = board.generate_for(&rec, at(1));

        assert_eq!(ids.len(), 4);
        assert_eq!(board.len(), 4);
        for id in ids {
            let s = board.get(id).unwrap();
            assert_eq!(s.owner_id, "alice");
            assert_eq!(s.store_metrics_id, rec.id);
            assert!(!s.implemented);
            assert!(s.implemented_at.is_none());
        }
    }

    #[test]
    fn test_toggle_sets_and_clears_timestamp() {
        let rec = record("alice");
        let mut board = SuggestionBoard::new();
        let id = board.generate_for(&rec, at(1))[0];

        let s = board.toggle("alice", id, true, at(5)).unwrap();
        assert!(s.implemented);
        assert_eq!(s.implemented_at, Some(at(5)));

        let s = board.toggle("alice", id, false, at(6)).unwrap();
        assert!(!s.implemented);
        assert!(s.implemented_at.is_none());
    }

    #[test]
    fn test_toggle_rejects_other_owner_and_unknown_id() {
        let rec = record("alice");
        let mut board = SuggestionBoard::new();
        let id = board.generate_for(&rec, at(1))[0];

        let err = board.toggle("bob", id, true, at(2)).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.status_code(), 404);
        assert!(!board.get(id).unwrap().implemented);

        assert!(board.toggle("alice", Uuid::new_v4(), true, at(2)).unwrap_err().is_not_found());
    }

    #[test]
    fn test_for_metrics_orders_by_priority_then_newest() {
        let rec = record("alice");
        let other = record("alice");
        let mut board = SuggestionBoard::new();
        board.generate_for(&rec, at(1));
        board.generate_for(&other, at(2));
        board.generate_for(&rec, at(3));

        let listed = board.for_metrics(&rec);
        assert_eq!(listed.len(), 8);
        assert!(listed.iter().all(|s| s.store_metrics_id == rec.id));
        assert_eq!(listed[0].recommendation.priority, Priority::Critical);
        assert_eq!(listed[0].created_at, at(3));
        assert_eq!(listed[1].recommendation.priority, Priority::Critical);
        assert_eq!(listed[1].created_at, at(1));
        for pair in listed.windows(2) {
            assert!(pair[0].recommendation.priority >= pair[1].recommendation.priority);
        }
    }

    #[test]
    fn test_completion_percentage() {
        let rec = record("alice");
        let mut board = SuggestionBoard::new();
        assert_eq!(board.completion_percentage("alice"), 0.0);

        let ids = board.generate_for(&rec, at(1));
        board.toggle("alice", ids[1], true, at(2)).unwrap();
        assert!((board.completion_percentage("alice") - 25.0).abs() < 1e-9);
        assert_eq!(board.completion_percentage("bob"), 0.0);
    }

    #[test]
    fn test_serialized_shape_is_flat() {
        let rec = record("alice");
        let s = Suggestion::new(&rec, generate_recommendations(&rec.metrics).remove(0), at(1));
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["type"], "SUBSCRIPTION");
        assert_eq!(json["priority"], "HIGH");
        assert_eq!(json["implemented"], false);
        assert!(json["implemented_at"].is_null());
    }
}
