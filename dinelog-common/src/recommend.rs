//! Recommendation engine
//!
//! Ranks restaurants to revisit from the full visit history. Every call
//! rebuilds the per-restaurant aggregates from scratch; nothing is cached or
//! persisted between calls.
//!
//! # Scoring
//!
//! ```text
//! score = average_rating * rating_weight
//!       + visit_count * visit_weight
//!       + (days_since_last_visit > recency_threshold_days ? recency_bonus : 0)
//! ```
//!
//! With the default weights (0.4, 0.3, 0.3 after 30 days) a restaurant that
//! has not been visited for a month gets a nudge back up the list.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::models::VisitRecord;
use crate::time::days_since;

/// Weights and limits used by [`recommend_with`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParams {
    /// Multiplier applied to the average rating
    pub rating_weight: f64,
    /// Multiplier applied to the visit count
    pub visit_weight: f64,
    /// Added when the last visit is older than `recency_threshold_days`
    pub recency_bonus: f64,
    /// Strictly more days than this earn the bonus
    pub recency_threshold_days: i64,
    /// Maximum number of picks returned; 0 is treated as 1 so a non-empty
    /// history always yields at least one pick
    pub top_n: usize,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            rating_weight: 0.4,
            visit_weight: 0.3,
            recency_bonus: 0.3,
            recency_threshold_days: 30,
            top_n: 2,
        }
    }
}

/// Per-restaurant summary derived from its visits
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantAggregate {
    pub visit_count: u32,
    pub total_rating: f64,
    pub average_rating: f64,
    pub most_recent_visit: NaiveDate,
    /// Location of the most recent visit
    pub location: String,
}

impl RestaurantAggregate {
    fn first(visit: &VisitRecord) -> Self {
        Self {
            visit_count: 1,
            total_rating: visit.rating,
            average_rating: visit.rating,
            most_recent_visit: visit.date,
            location: visit.location.clone(),
        }
    }

    fn fold(&mut self, visit: &VisitRecord) {
        self.visit_count += 1;
        self.total_rating += visit.rating;
        self.average_rating = self.total_rating / f64::from(self.visit_count);

        // Equal dates keep the earlier record's location
        if visit.date > self.most_recent_visit {
            self.most_recent_visit = visit.date;
            self.location = visit.location.clone();
        }
    }

    /// Score this restaurant as of `now`
    pub fn score(&self, now: DateTime<Utc>, params: &ScoringParams) -> f64 {
        let bonus = if days_since(self.most_recent_visit, now) > params.recency_threshold_days {
            params.recency_bonus
        } else {
            0.0
        };

        self.average_rating * params.rating_weight
            + f64::from(self.visit_count) * params.visit_weight
            + bonus
    }
}

/// Group visits by exact restaurant name, in order of first appearance
pub fn aggregate(records: &[VisitRecord]) -> IndexMap<String, RestaurantAggregate> {
    let mut restaurants: IndexMap<String, RestaurantAggregate> = IndexMap::new();

    for visit in records {
        match restaurants.get_mut(&visit.name) {
            Some(stats) => stats.fold(visit),
            None => {
                restaurants.insert(visit.name.clone(), RestaurantAggregate::first(visit));
            }
        }
    }

    restaurants
}

/// One recommended restaurant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pick {
    pub name: String,
    pub location: String,
    pub visit_count: u32,
    pub average_rating: f64,
    pub score: f64,
}

impl fmt::Display for Pick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} in {} ({} visits, {:.1}/5)",
            self.name,
            self.location,
            self.visit_count,
            round_half_up_tenths(self.average_rating)
        )
    }
}

/// Round to one decimal place, halves away from zero (4.25 renders as 4.3)
fn round_half_up_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Result of a recommendation request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "picks", rename_all = "snake_case")]
pub enum Recommendation {
    /// No visits recorded yet
    NoData,
    /// Highest scoring restaurants, best first; never empty
    TopPicks(Vec<Pick>),
}

impl Recommendation {
    pub fn picks(&self) -> &[Pick] {
        match self {
            Recommendation::NoData => &[],
            Recommendation::TopPicks(picks) => picks,
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::NoData => write!(f, "No restaurant data available yet!"),
            Recommendation::TopPicks(picks) => {
                write!(f, "Top picks:")?;
                for (rank, pick) in picks.iter().enumerate() {
                    write!(f, "\n{}. {}", rank + 1, pick)?;
                }
                Ok(())
            }
        }
    }
}

/// Recommend restaurants with the default [`ScoringParams`]
pub fn recommend(records: &[VisitRecord], now: DateTime<Utc>) -> Recommendation {
    recommend_with(records, now, &ScoringParams::default())
}

/// Recommend up to `params.top_n` restaurants from `records` as of `now`
///
/// Ties in score keep first-appearance order. Fewer picks than `top_n` are
/// returned when fewer distinct restaurants exist.
pub fn recommend_with(
    records: &[VisitRecord],
    now: DateTime<Utc>,
    params: &ScoringParams,
) -> Recommendation {
    if records.is_empty() {
        return Recommendation::NoData;
    }

    let mut scored: Vec<Pick> = aggregate(records)
        .into_iter()
        .map(|(name, stats)| Pick {
            score: stats.score(now, params),
            name,
            location: stats.location,
            visit_count: stats.visit_count,
            average_rating: stats.average_rating,
        })
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.truncate(params.top_n.max(1));

    Recommendation::TopPicks(scored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn visit(name: &str, location: &str, rating: f64, date: &str) -> VisitRecord {
        VisitRecord {
            id: Uuid::new_v4(),
            name: name.to_string(),
            location: location.to_string(),
            dish: "soup".to_string(),
            rating,
            date: date.parse().unwrap(),
        }
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_input_is_no_data() {
        assert_eq!(recommend(&[], at(2024, 7, 1)), Recommendation::NoData);
    }

    #[test]
    fn test_no_data_message() {
        assert_eq!(
            Recommendation::NoData.to_string(),
            "No restaurant data available yet!"
        );
    }

    #[test]
    fn test_average_of_three_and_five_is_four() {
        let records = [
            visit("A", "X", 3.0, "2024-06-01"),
            visit("A", "X", 5.0, "2024-06-02"),
        ];
        let stats = aggregate(&records);
        assert_eq!(stats["A"].average_rating, 4.0);
    }

    #[test]
    fn test_visit_count_independent_of_other_restaurants() {
        let mut records = vec![
            visit("A", "X", 3.0, "2024-06-01"),
            visit("A", "X", 4.0, "2024-06-02"),
            visit("A", "X", 5.0, "2024-06-03"),
        ];
        for day in 1..=9 {
            records.push(visit("B", "Y", 2.0, &format!("2024-05-0{}", day)));
        }

        let stats = aggregate(&records);
        assert_eq!(stats["A"].visit_count, 3);
        assert_eq!(stats["B"].visit_count, 9);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let records = [
            visit("Pho", "X", 3.0, "2024-06-01"),
            visit("pho", "X", 5.0, "2024-06-01"),
        ];
        assert_eq!(aggregate(&records).len(), 2);
    }

    #[test]
    fn test_reference_scenario() {
        let records = [
            visit("A", "Downtown", 5.0, "2024-01-01"),
            visit("A", "Downtown", 3.0, "2024-06-01"),
            visit("B", "Uptown", 4.0, "2024-06-15"),
        ];

        let result = recommend(&records, at(2024, 7, 1));
        let picks = result.picks();

        assert_eq!(picks.len(), 2);
        assert_eq!(picks[0].name, "A");
        assert_eq!(picks[0].visit_count, 2);
        assert_eq!(picks[0].average_rating, 4.0);
        assert_eq!(picks[1].name, "B");
        assert_eq!(picks[1].visit_count, 1);
        assert_eq!(picks[1].average_rating, 4.0);

        // A: 1.6 + 0.6, last visit 30 days ago earns no bonus
        assert!((picks[0].score - 2.2).abs() < 1e-9);
        // B: 1.6 + 0.3
        assert!((picks[1].score - 1.9).abs() < 1e-9);
    }

    #[test]
    fn test_two_picks_sorted_descending() {
        let records = [
            visit("Low", "X", 1.0, "2024-06-30"),
            visit("High", "X", 5.0, "2024-06-30"),
            visit("Mid", "X", 3.0, "2024-06-30"),
        ];

        let result = recommend(&records, at(2024, 7, 1));
        let names: Vec<&str> = result.picks().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["High", "Mid"]);
        assert!(result.picks()[0].score >= result.picks()[1].score);
    }

    #[test]
    fn test_single_restaurant_yields_single_pick() {
        let records = [visit("Only", "Here", 4.0, "2024-06-30")];
        let result = recommend(&records, at(2024, 7, 1));

        assert_eq!(result.picks().len(), 1);
        assert_eq!(result.to_string(), "Top picks:\n1. Only in Here (1 visits, 4.0/5)");
    }

    #[test]
    fn test_recency_bonus_raises_stale_restaurant() {
        let now = at(2024, 7, 1);
        let stale = aggregate(&[visit("S", "X", 4.0, "2024-05-31")]);
        let fresh = aggregate(&[visit("F", "X", 4.0, "2024-06-01")]);

        let params = ScoringParams::default();
        let stale_score = stale["S"].score(now, &params);
        let fresh_score = fresh["F"].score(now, &params);

        assert!(stale_score > fresh_score);
        assert!((stale_score - fresh_score - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_ties_keep_first_appearance_order() {
        let records = [
            visit("First", "X", 4.0, "2024-06-30"),
            visit("Second", "X", 4.0, "2024-06-30"),
            visit("Third", "X", 4.0, "2024-06-30"),
        ];

        let result = recommend(&records, at(2024, 7, 1));
        let names: Vec<&str> = result.picks().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn test_location_follows_most_recent_visit_regardless_of_order() {
        let newest_last = [
            visit("A", "Old Town", 4.0, "2024-01-01"),
            visit("A", "New Town", 4.0, "2024-06-01"),
        ];
        let newest_first = [
            visit("A", "New Town", 4.0, "2024-06-01"),
            visit("A", "Old Town", 4.0, "2024-01-01"),
        ];

        assert_eq!(aggregate(&newest_last)["A"].location, "New Town");
        assert_eq!(aggregate(&newest_first)["A"].location, "New Town");
        assert_eq!(
            aggregate(&newest_first)["A"].most_recent_visit,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
    }

    #[test]
    fn test_rendered_two_line_summary() {
        let records = [
            visit("A", "Downtown", 5.0, "2024-01-01"),
            visit("A", "Downtown", 3.0, "2024-06-01"),
            visit("B", "Uptown", 4.5, "2024-06-15"),
        ];

        let text = recommend(&records, at(2024, 7, 1)).to_string();
        assert_eq!(
            text,
            "Top picks:\n\
             1. A in Downtown (2 visits, 4.0/5)\n\
             2. B in Uptown (1 visits, 4.5/5)"
        );
    }

    #[test]
    fn test_rendered_average_rounds_halves_up() {
        let records = [
            visit("A", "X", 4.0, "2024-06-01"),
            visit("A", "X", 4.0, "2024-06-02"),
            visit("A", "X", 4.0, "2024-06-03"),
            visit("A", "X", 5.0, "2024-06-04"),
        ];

        let result = recommend(&records, at(2024, 7, 1));
        assert_eq!(result.picks()[0].average_rating, 4.25);
        assert_eq!(
            result.to_string(),
            "Top picks:\n1. A in X (4 visits, 4.3/5)"
        );
    }

    #[test]
    fn test_round_half_up_tenths() {
        assert_eq!(round_half_up_tenths(4.25), 4.3);
        assert_eq!(round_half_up_tenths(4.75), 4.8);
        assert_eq!(round_half_up_tenths(4.0), 4.0);
        assert_eq!(round_half_up_tenths(3.14), 3.1);
    }

    #[test]
    fn test_zero_top_n_still_yields_one_pick() {
        let records = [
            visit("A", "X", 5.0, "2024-06-30"),
            visit("B", "X", 4.0, "2024-06-30"),
        ];
        let params = ScoringParams {
            top_n: 0,
            ..ScoringParams::default()
        };

        let result = recommend_with(&records, at(2024, 7, 1), &params);
        assert_eq!(result.picks().len(), 1);
        assert_eq!(result.picks()[0].name, "A");
    }

    #[test]
    fn test_custom_params_top_n() {
        let records = [
            visit("A", "X", 5.0, "2024-06-30"),
            visit("B", "X", 4.0, "2024-06-30"),
            visit("C", "X", 3.0, "2024-06-30"),
        ];
        let params = ScoringParams {
            top_n: 3,
            ..ScoringParams::default()
        };

        let result = recommend_with(&records, at(2024, 7, 1), &params);
        assert_eq!(result.picks().len(), 3);
    }
}
