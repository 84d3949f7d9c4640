// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Dashboard statistics.
//!
//! [`compute_statistics`] is a pure, single-pass function over collections
//! that were fetched beforehand. It assumes well-formed input: defaulting
//! has already happened at ingestion.

use crate::grouping::{
    CountBucket, assigned_users_per_activity, group_by_location, group_by_month,
    group_by_price_bucket, group_by_type, registrations_per_activity,
};
use crate::ranking::rank_by_count;
use crate::ratios::{average_price, percentage, safe_ratio};
use crate::timestamp::Clock;
use crate::types::{Activity, ActivityType, ActivityUsers, Location, Registration, UserProfile};
use serde::{Deserialize, Serialize};

/// Number of locations kept in the ranked location list.
pub const TOP_LOCATIONS: usize = 10;

/// Number of activities kept in the ranked registrant list.
pub const TOP_ACTIVITIES: usize = 5;

/// Collections the dashboard is computed from.
#[derive(Debug, Clone, Copy)]
pub struct StatisticsInput<'a> {
    pub activities: &'a [Activity],
    pub activity_types: &'a [ActivityType],
    pub locations: &'a [Location],
    pub registrations: &'a [Registration],
    pub users: &'a [UserProfile],
    /// Precomputed activity → assigned users aggregate, when available.
    pub activity_users: Option<&'a [ActivityUsers]>,
}

/// One row of the top-activities list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopActivity {
    pub activity_id: String,
    pub name: String,
    pub registrations: usize,
    /// Users assigned through the aggregate; zero when it is unavailable.
    pub assigned_users: usize,
}

/// Everything the statistics page shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStatistics {
    pub activity_count: usize,
    pub user_count: usize,
    pub location_count: usize,
    pub type_count: usize,
    pub active_count: usize,
    /// Activities whose status is anything but active.
    pub draft_count: usize,
    pub average_price: f64,
    pub upcoming_count: usize,
    pub past_count: usize,
    /// `None` when there are no activities.
    pub upcoming_percentage: Option<u32>,
    pub activities_by_type: Vec<CountBucket>,
    pub top_locations: Vec<CountBucket>,
    pub activities_by_month: Vec<CountBucket>,
    pub activities_by_price: Vec<CountBucket>,
    pub top_activities: Vec<TopActivity>,
    pub total_registrations: usize,
    pub average_registrations_per_activity: f64,
    pub average_activities_per_user: f64,
}

/// Computes the dashboard statistics.
///
/// An activity is upcoming when its scheduled instant (see
/// [`Activity::scheduled_at`]) is strictly after `clock.now()`, and past
/// otherwise.
#[must_use]
pub fn compute_statistics(input: &StatisticsInput<'_>, clock: &dyn Clock) -> DashboardStatistics {
    let activities: &[Activity] = input.activities;
    let now = clock.now();

    let active_count: usize = activities.iter().filter(|a| a.is_active()).count();
    let upcoming_count: usize = activities
        .iter()
        .filter(|a| a.scheduled_at(clock) > now)
        .count();

    let assigned = input
        .activity_users
        .map(assigned_users_per_activity)
        .unwrap_or_default();
    let top_activities: Vec<TopActivity> = rank_by_count(
        registrations_per_activity(activities, input.registrations),
        Some(TOP_ACTIVITIES),
    )
    .into_iter()
    .map(|bucket| TopActivity {
        assigned_users: assigned.get(&bucket.key).copied().unwrap_or(0),
        activity_id: bucket.key,
        name: bucket.label,
        registrations: bucket.count,
    })
    .collect();

    DashboardStatistics {
        activity_count: activities.len(),
        user_count: input.users.len(),
        location_count: input.locations.len(),
        type_count: input.activity_types.len(),
        active_count,
        draft_count: activities.len() - active_count,
        average_price: average_price(activities),
        upcoming_count,
        past_count: activities.len() - upcoming_count,
        upcoming_percentage: percentage(upcoming_count, activities.len()),
        activities_by_type: rank_by_count(group_by_type(activities, input.activity_types), None),
        top_locations: rank_by_count(
            group_by_location(activities, input.locations),
            Some(TOP_LOCATIONS),
        ),
        activities_by_month: group_by_month(activities),
        activities_by_price: group_by_price_bucket(activities),
        top_activities,
        total_registrations: input.registrations.len(),
        average_registrations_per_activity: safe_ratio(
            input.registrations.len(),
            activities.len(),
        ),
        average_activities_per_user: safe_ratio(activities.len(), input.users.len()),
    }
}
