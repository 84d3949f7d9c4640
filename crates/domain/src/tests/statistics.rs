// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Activity, ActivityStatus, ActivityType, ActivityUsers, CountBucket, FixedClock, Location,
    Registration, StatisticsInput, TOP_ACTIVITIES, TOP_LOCATIONS, UserProfile,
    compute_statistics,
};
use chrono::{DateTime, TimeZone, Utc};

fn at(month: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, month, 15, 12, 0, 0).unwrap()
}

fn clock() -> FixedClock {
    FixedClock::new(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap())
}

fn activity(id: &str, activity_type: &str, price: Option<f64>, created: u32) -> Activity {
    Activity {
        id: id.to_string(),
        name: format!("Activity {id}"),
        activity_type: Some(activity_type.to_string()),
        location_name: None,
        description: None,
        image_url: None,
        price,
        status: ActivityStatus::Active,
        activity_date: None,
        created_at: Some(at(created)),
    }
}

fn activity_type(id: &str) -> ActivityType {
    ActivityType {
        id: id.to_string(),
        name: id.to_string(),
        icon: String::new(),
        description: String::new(),
    }
}

fn registration(id: &str, activity_id: &str) -> Registration {
    Registration {
        id: id.to_string(),
        user_id: format!("user-{id}"),
        activity_id: activity_id.to_string(),
        registered_at: None,
    }
}

fn user(id: &str) -> UserProfile {
    UserProfile {
        id: id.to_string(),
        display_name: id.to_string(),
        email: None,
        created_at: None,
    }
}

fn counts(buckets: &[CountBucket]) -> Vec<(&str, usize)> {
    buckets.iter().map(|b| (b.label.as_str(), b.count)).collect()
}

#[test]
fn test_three_activity_scenario() {
    let activities = vec![
        activity("1", "hiking", Some(0.0), 1),
        activity("2", "hiking", Some(75.0), 1),
        activity("3", "diving", Some(300.0), 2),
    ];
    let types = vec![
        activity_type("hiking"),
        activity_type("diving"),
        activity_type("biking"),
    ];

    let stats = compute_statistics(
        &StatisticsInput {
            activities: &activities,
            activity_types: &types,
            locations: &[],
            registrations: &[],
            users: &[],
            activity_users: None,
        },
        &clock(),
    );

    assert_eq!(
        counts(&stats.activities_by_type),
        vec![("hiking", 2), ("diving", 1), ("biking", 0)]
    );
    assert_eq!(
        counts(&stats.activities_by_price),
        vec![
            ("$0", 1),
            ("$1-$50", 0),
            ("$51-$100", 1),
            ("$101-$200", 0),
            ("$201-$500", 1),
            ("$500+", 0),
        ]
    );
    assert_eq!(stats.activities_by_month[0].count, 2);
    assert_eq!(stats.activities_by_month[1].count, 1);
    assert_eq!(stats.average_price, 125.0);
}

#[test]
fn test_empty_input_yields_defined_results() {
    let stats = compute_statistics(
        &StatisticsInput {
            activities: &[],
            activity_types: &[],
            locations: &[],
            registrations: &[],
            users: &[],
            activity_users: None,
        },
        &clock(),
    );

    assert_eq!(stats.activity_count, 0);
    assert_eq!(stats.average_price, 0.0);
    assert_eq!(stats.upcoming_percentage, None);
    assert_eq!(stats.activities_by_month.len(), 12);
    assert_eq!(stats.activities_by_price.len(), 6);
    assert_eq!(stats.average_registrations_per_activity, 0.0);
    assert_eq!(stats.average_activities_per_user, 0.0);
    assert!(stats.top_activities.is_empty());
}

#[test]
fn test_counts_and_ratios() {
    let mut draft = activity("d", "hiking", None, 3);
    draft.status = ActivityStatus::ComingSoon;
    let mut upcoming = activity("u", "hiking", Some(20.0), 3);
    upcoming.activity_date = Some(at(9));
    let activities = vec![activity("p", "hiking", Some(10.0), 3), draft, upcoming];

    let registrations = vec![
        registration("r1", "u"),
        registration("r2", "u"),
        registration("r3", "p"),
        registration("r4", "gone"),
    ];
    let users = vec![user("a"), user("b")];
    let aggregate = vec![ActivityUsers {
        activity_id: String::from("u"),
        user_ids: vec![String::from("a"), String::from("b"), String::from("c")],
    }];

    let stats = compute_statistics(
        &StatisticsInput {
            activities: &activities,
            activity_types: &[],
            locations: &[],
            registrations: &registrations,
            users: &users,
            activity_users: Some(&aggregate),
        },
        &clock(),
    );

    assert_eq!(stats.active_count, 2);
    assert_eq!(stats.draft_count, 1);
    assert_eq!(stats.upcoming_count, 1);
    assert_eq!(stats.past_count, 2);
    assert_eq!(stats.upcoming_percentage, Some(33));
    assert_eq!(stats.total_registrations, 4);
    assert_eq!(stats.average_registrations_per_activity, 1.33);
    assert_eq!(stats.average_activities_per_user, 1.5);

    assert_eq!(stats.top_activities[0].activity_id, "u");
    assert_eq!(stats.top_activities[0].registrations, 2);
    assert_eq!(stats.top_activities[0].assigned_users, 3);
    assert_eq!(stats.top_activities[1].activity_id, "p");
    assert_eq!(stats.top_activities[2].registrations, 0);
}

#[test]
fn test_top_lists_are_truncated() {
    let locations: Vec<Location> = (0..15)
        .map(|i| Location {
            id: format!("loc-{i}"),
            name: format!("Spot {i}"),
            category: None,
            description: None,
            coordinates: None,
        })
        .collect();
    let activities: Vec<Activity> = (0..8)
        .map(|i| {
            let mut a = activity(&i.to_string(), "hiking", None, 1);
            a.location_name = Some(format!("loc-{}", 14 - i));
            a
        })
        .collect();

    let stats = compute_statistics(
        &StatisticsInput {
            activities: &activities,
            activity_types: &[],
            locations: &locations,
            registrations: &[],
            users: &[],
            activity_users: None,
        },
        &clock(),
    );

    assert_eq!(stats.top_locations.len(), TOP_LOCATIONS);
    assert_eq!(stats.top_locations[0].key, "loc-7");
    assert_eq!(stats.top_activities.len(), TOP_ACTIVITIES);
}
