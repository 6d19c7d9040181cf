//! Client-side tracker state
//!
//! All state the client holds between actions lives in one owned value.
//! Each update consumes the state and returns the next one; nothing is
//! shared or mutated behind the caller's back.

use chrono::{DateTime, NaiveDate, Utc};
use dinelog_common::recommend::{recommend_with, ScoringParams};
use dinelog_common::{Recommendation, VisitDraft, VisitRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct TrackerState {
    /// Known visits, newest first
    pub visits: Vec<VisitRecord>,
    /// Visit being composed
    pub draft: VisitDraft,
    /// Last computed recommendation, cleared whenever visits change
    pub recommendation: Option<Recommendation>,
}

impl TrackerState {
    /// Empty state with a blank draft dated `today`
    pub fn new(today: NaiveDate) -> Self {
        Self {
            visits: Vec::new(),
            draft: VisitDraft::blank(today),
            recommendation: None,
        }
    }

    /// Replace the visit list with a listing fetched from the store
    pub fn loaded(self, visits: Vec<VisitRecord>) -> Self {
        Self {
            visits,
            recommendation: None,
            ..self
        }
    }

    /// Replace the draft
    pub fn set_draft(self, draft: VisitDraft) -> Self {
        Self { draft, ..self }
    }

    /// Blank the draft, dated `today`
    pub fn reset_draft(self, today: NaiveDate) -> Self {
        self.set_draft(VisitDraft::blank(today))
    }

    /// Put a freshly stored visit at the front and start a new draft
    pub fn record_saved(mut self, saved: VisitRecord, today: NaiveDate) -> Self {
        self.visits.insert(0, saved);
        self.recommendation = None;
        self.reset_draft(today)
    }

    /// Recompute the recommendation from the current visits
    pub fn refresh_recommendation(self, now: DateTime<Utc>, params: &ScoringParams) -> Self {
        let recommendation = recommend_with(&self.visits, now, params);
        Self {
            recommendation: Some(recommendation),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn record(name: &str, rating: f64, on: &str) -> VisitRecord {
        VisitRecord {
            id: Uuid::new_v4(),
            name: name.to_string(),
            location: "Corner".to_string(),
            dish: "Dumplings".to_string(),
            rating,
            date: date(on),
        }
    }

    #[test]
    fn test_new_state_is_empty_with_blank_draft() {
        let state = TrackerState::new(date("2024-07-01"));
        assert!(state.visits.is_empty());
        assert!(state.recommendation.is_none());
        assert_eq!(state.draft, VisitDraft::blank(date("2024-07-01")));
        assert_eq!(state.draft.rating, 5.0);
    }

    #[test]
    fn test_record_saved_prepends_and_resets_draft() {
        let today = date("2024-07-02");
        let state = TrackerState::new(date("2024-07-01"))
            .loaded(vec![record("Old", 3.0, "2024-06-01")]);

        let mut draft = VisitDraft::blank(date("2024-07-01"));
        draft.name = "New".to_string();
        let state = state.set_draft(draft);

        let state = state.record_saved(record("New", 4.0, "2024-07-01"), today);

        assert_eq!(state.visits.len(), 2);
        assert_eq!(state.visits[0].name, "New");
        assert_eq!(state.draft, VisitDraft::blank(today));
    }

    #[test]
    fn test_recommendation_on_empty_state_is_no_data() {
        let now = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        let state = TrackerState::new(date("2024-07-01"))
            .refresh_recommendation(now, &ScoringParams::default());

        assert_eq!(state.recommendation, Some(Recommendation::NoData));
    }

    #[test]
    fn test_new_visit_clears_stale_recommendation() {
        let now = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        let state = TrackerState::new(date("2024-07-01"))
            .loaded(vec![record("A", 4.0, "2024-06-20")])
            .refresh_recommendation(now, &ScoringParams::default());
        assert!(state.recommendation.is_some());

        let state = state.record_saved(record("B", 5.0, "2024-07-01"), date("2024-07-01"));
        assert!(state.recommendation.is_none());
    }

    #[test]
    fn test_recommendation_uses_held_visits() {
        let now = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        let state = TrackerState::new(date("2024-07-01"))
            .loaded(vec![
                record("A", 3.0, "2024-06-01"),
                record("B", 5.0, "2024-06-25"),
                record("A", 5.0, "2024-01-01"),
            ])
            .refresh_recommendation(now, &ScoringParams::default());

        let recommendation = state.recommendation.unwrap();
        let picks = recommendation.picks();
        assert_eq!(picks.len(), 2);
        assert_eq!(picks[0].name, "A");
        assert_eq!(picks[0].visit_count, 2);
    }
}
