// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Grouping reducers for the statistics dashboard.
//!
//! Every reducer is seeded from a reference list (all activity types, all
//! locations, the twelve months, the six price buckets) so that a category
//! with no matching activity still appears with a count of zero. Items whose
//! derived key was not seeded are ignored.

use crate::types::{Activity, ActivityType, ActivityUsers, Location, Registration};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Month abbreviations used as keys and labels by [`group_by_month`].
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One group in a grouped-count result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountBucket {
    /// The derived key items were matched on.
    pub key: String,
    /// Human-readable label.
    pub label: String,
    /// Number of items sharing the key.
    pub count: usize,
}

impl CountBucket {
    /// Creates an empty bucket.
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            count: 0,
        }
    }
}

/// Counts `items` by a derived key, pre-seeded from `seeds`.
///
/// The result keeps seed order. Repeated seed keys are kept once, at their
/// first position.
///
/// # Arguments
///
/// * `seeds` - `(key, label)` pairs, in display order
/// * `items` - The items to count
/// * `key_of` - Derives an item's key; `None` skips the item
#[must_use]
pub fn count_by<T, S, F>(seeds: S, items: &[T], key_of: F) -> Vec<CountBucket>
where
    S: IntoIterator<Item = (String, String)>,
    F: Fn(&T) -> Option<String>,
{
    let mut buckets: Vec<CountBucket> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (key, label) in seeds {
        if index.contains_key(&key) {
            continue;
        }
        index.insert(key.clone(), buckets.len());
        buckets.push(CountBucket::new(key, label));
    }

    for item in items {
        let Some(key) = key_of(item) else {
            continue;
        };
        if let Some(&position) = index.get(&key) {
            buckets[position].count += 1;
        }
    }

    buckets
}

/// Counts activities per activity type.
#[must_use]
pub fn group_by_type(activities: &[Activity], types: &[ActivityType]) -> Vec<CountBucket> {
    count_by(
        types.iter().map(|t| (t.id.clone(), t.name.clone())),
        activities,
        |a| a.activity_type.clone(),
    )
}

/// Counts activities per location.
///
/// The join compares the activity's free-text `location_name` against each
/// location's document id, not its name. Stored activities written by the
/// location picker carry the id in that field; ones typed by hand do not
/// match and are not counted.
#[must_use]
pub fn group_by_location(activities: &[Activity], locations: &[Location]) -> Vec<CountBucket> {
    count_by(
        locations.iter().map(|l| (l.id.clone(), l.name.clone())),
        activities,
        |a| a.location_name.clone(),
    )
}

/// Counts activities per calendar month of their creation time (UTC).
///
/// Activities without a creation time are not counted.
#[must_use]
pub fn group_by_month(activities: &[Activity]) -> Vec<CountBucket> {
    count_by(
        MONTH_LABELS
            .iter()
            .map(|m| ((*m).to_string(), (*m).to_string())),
        activities,
        |a| {
            let month0: usize = usize::try_from(a.created_at?.month0()).ok()?;
            MONTH_LABELS.get(month0).map(|m| (*m).to_string())
        },
    )
}

/// Price ranges shown on the dashboard, in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceBucket {
    /// Exactly zero.
    Free,
    /// Above 0, up to 50.
    UpTo50,
    /// Above 50, up to 100.
    UpTo100,
    /// Above 100, up to 200.
    UpTo200,
    /// Above 200, up to 500.
    UpTo500,
    /// Above 500.
    Over500,
}

impl PriceBucket {
    /// All buckets, in the order they are tested.
    pub const ALL: [Self; 6] = [
        Self::Free,
        Self::UpTo50,
        Self::UpTo100,
        Self::UpTo200,
        Self::UpTo500,
        Self::Over500,
    ];

    /// Returns the display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Free => "$0",
            Self::UpTo50 => "$1-$50",
            Self::UpTo100 => "$51-$100",
            Self::UpTo200 => "$101-$200",
            Self::UpTo500 => "$201-$500",
            Self::Over500 => "$500+",
        }
    }

    /// Inclusive upper bound of the bucket.
    const fn upper_bound(self) -> f64 {
        match self {
            Self::Free => 0.0,
            Self::UpTo50 => 50.0,
            Self::UpTo100 => 100.0,
            Self::UpTo200 => 200.0,
            Self::UpTo500 => 500.0,
            Self::Over500 => f64::INFINITY,
        }
    }

    /// Returns the first bucket whose upper bound covers `price`.
    ///
    /// Negative and non-finite prices have no bucket.
    #[must_use]
    pub fn classify(price: f64) -> Option<Self> {
        if !price.is_finite() || price < 0.0 {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|bucket| price <= bucket.upper_bound())
    }
}

/// Counts activities per price bucket.
///
/// Activities without a price are excluded rather than counted as free.
#[must_use]
pub fn group_by_price_bucket(activities: &[Activity]) -> Vec<CountBucket> {
    count_by(
        PriceBucket::ALL
            .iter()
            .map(|b| (b.label().to_string(), b.label().to_string())),
        activities,
        |a| PriceBucket::classify(a.price?).map(|b| b.label().to_string()),
    )
}

/// Counts registrations per activity, seeded from every activity.
#[must_use]
pub fn registrations_per_activity(
    activities: &[Activity],
    registrations: &[Registration],
) -> Vec<CountBucket> {
    count_by(
        activities.iter().map(|a| (a.id.clone(), a.name.clone())),
        registrations,
        |r| Some(r.activity_id.clone()),
    )
}

/// Maps each activity id to the number of users assigned to it.
#[must_use]
pub fn assigned_users_per_activity(activity_users: &[ActivityUsers]) -> HashMap<String, usize> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for entry in activity_users {
        *counts.entry(entry.activity_id.clone()).or_insert(0) += entry.user_ids.len();
    }
    counts
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::types::ActivityStatus;
    use chrono::{TimeZone, Utc};

    fn activity(id: &str, price: Option<f64>, month: Option<u32>) -> Activity {
        Activity {
            id: id.to_string(),
            name: format!("Activity {id}"),
            activity_type: None,
            location_name: None,
            description: None,
            image_url: None,
            price,
            status: ActivityStatus::Active,
            activity_date: None,
            created_at: month.map(|m| Utc.with_ymd_and_hms(2025, m, 10, 9, 0, 0).unwrap()),
        }
    }

    fn location(id: &str, name: &str) -> Location {
        Location {
            id: id.to_string(),
            name: name.to_string(),
            category: None,
            description: None,
            coordinates: None,
        }
    }

    #[test]
    fn test_count_by_keeps_unmatched_seeds_at_zero() {
        let seeds = vec![
            (String::from("a"), String::from("A")),
            (String::from("b"), String::from("B")),
        ];
        let items = ["a", "a", "z"];
        let buckets = count_by(seeds, &items, |s| Some((*s).to_string()));

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].count, 2);
        assert_eq!(buckets[1].count, 0);
    }

    #[test]
    fn test_count_by_ignores_duplicate_seeds() {
        let seeds = vec![
            (String::from("a"), String::from("first")),
            (String::from("a"), String::from("second")),
        ];
        let buckets = count_by(seeds, &["a"], |s| Some((*s).to_string()));
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].label, "first");
        assert_eq!(buckets[0].count, 1);
    }

    #[test]
    fn test_location_grouping_matches_on_document_id() {
        let locations = vec![location("loc-1", "Old Harbour"), location("loc-2", "Summit")];
        let mut by_id = activity("1", None, None);
        by_id.location_name = Some(String::from("loc-1"));
        let mut by_name = activity("2", None, None);
        by_name.location_name = Some(String::from("Old Harbour"));

        let buckets = group_by_location(&[by_id, by_name], &locations);
        assert_eq!(buckets[0].label, "Old Harbour");
        assert_eq!(buckets[0].count, 1);
        assert_eq!(buckets[1].count, 0);
    }

    #[test]
    fn test_month_total_matches_resolvable_created_at() {
        let activities = vec![
            activity("1", None, Some(1)),
            activity("2", None, Some(1)),
            activity("3", None, Some(12)),
            activity("4", None, None),
        ];
        let buckets = group_by_month(&activities);

        assert_eq!(buckets.len(), 12);
        assert_eq!(buckets[0].count, 2);
        assert_eq!(buckets[11].label, "Dec");
        assert_eq!(buckets[11].count, 1);
        let total: usize = buckets.iter().map(|b| b.count).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_price_bucket_boundaries() {
        assert_eq!(PriceBucket::classify(0.0), Some(PriceBucket::Free));
        assert_eq!(PriceBucket::classify(0.5), Some(PriceBucket::UpTo50));
        assert_eq!(PriceBucket::classify(50.0), Some(PriceBucket::UpTo50));
        assert_eq!(PriceBucket::classify(51.0), Some(PriceBucket::UpTo100));
        assert_eq!(PriceBucket::classify(100.0), Some(PriceBucket::UpTo100));
        assert_eq!(PriceBucket::classify(200.0), Some(PriceBucket::UpTo200));
        assert_eq!(PriceBucket::classify(500.0), Some(PriceBucket::UpTo500));
        assert_eq!(PriceBucket::classify(500.5), Some(PriceBucket::Over500));
        assert_eq!(PriceBucket::classify(501.0), Some(PriceBucket::Over500));
        assert_eq!(PriceBucket::classify(-1.0), None);
        assert_eq!(PriceBucket::classify(f64::NAN), None);
    }

    #[test]
    fn test_price_total_excludes_missing_prices() {
        let activities = vec![
            activity("1", Some(0.0), None),
            activity("2", None, None),
            activity("3", Some(35.0), None),
            activity("4", Some(900.0), None),
        ];
        let buckets = group_by_price_bucket(&activities);

        assert_eq!(buckets.len(), 6);
        assert_eq!(buckets[0].count, 1);
        let total: usize = buckets.iter().map(|b| b.count).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_registrations_per_activity() {
        let activities = vec![activity("a", None, None), activity("b", None, None)];
        let registrations: Vec<Registration> = ["a", "a", "b", "ghost"]
            .iter()
            .enumerate()
            .map(|(i, activity_id)| Registration {
                id: format!("r{i}"),
                user_id: format!("u{i}"),
                activity_id: (*activity_id).to_string(),
                registered_at: None,
            })
            .collect();

        let buckets = registrations_per_activity(&activities, &registrations);
        assert_eq!(buckets[0].count, 2);
        assert_eq!(buckets[1].count, 1);
    }

    #[test]
    fn test_assigned_users_per_activity() {
        let aggregate = vec![
            ActivityUsers {
                activity_id: String::from("a"),
                user_ids: vec![String::from("u1"), String::from("u2")],
            },
            ActivityUsers {
                activity_id: String::from("b"),
                user_ids: Vec::new(),
            },
        ];
        let counts = assigned_users_per_activity(&aggregate);
        assert_eq!(counts.get("a"), Some(&2));
        assert_eq!(counts.get("b"), Some(&0));
        assert_eq!(counts.get("c"), None);
    }
}
