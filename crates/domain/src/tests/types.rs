// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Activity, ActivityStatus, Coordinates, DomainError, FixedClock, GuideRequestStatus, Track,
    TrackStatus, name_or_placeholder,
};
use chrono::{DateTime, TimeZone, Utc};
use std::str::FromStr;

fn instant(month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, month, day, 10, 0, 0).unwrap()
}

fn create_test_activity() -> Activity {
    Activity {
        id: String::from("act-1"),
        name: String::from("Sunset kayak"),
        activity_type: Some(String::from("water")),
        location_name: None,
        description: None,
        image_url: None,
        price: Some(45.0),
        status: ActivityStatus::Active,
        activity_date: None,
        created_at: None,
    }
}

#[test]
fn test_name_placeholder() {
    assert_eq!(
        name_or_placeholder(Some(String::from("Cliff walk")), "activity"),
        "Cliff walk"
    );
    assert_eq!(name_or_placeholder(None, "activity"), "Unnamed activity");
    assert_eq!(
        name_or_placeholder(Some(String::from("   ")), "location"),
        "Unnamed location"
    );
}

#[test]
fn test_activity_status_round_trip() {
    for status in [
        ActivityStatus::Active,
        ActivityStatus::Inactive,
        ActivityStatus::ComingSoon,
    ] {
        assert_eq!(ActivityStatus::from_str(status.as_str()), Ok(status));
    }
    assert_eq!(
        ActivityStatus::from_str("archived"),
        Err(DomainError::InvalidActivityStatus(String::from("archived")))
    );
    assert_eq!(ActivityStatus::default(), ActivityStatus::Active);
}

#[test]
fn test_scheduled_at_fallback_chain() {
    let clock = FixedClock::new(instant(6, 1));
    let mut activity = create_test_activity();
    assert_eq!(activity.scheduled_at(&clock), instant(6, 1));

    activity.created_at = Some(instant(2, 1));
    assert_eq!(activity.scheduled_at(&clock), instant(2, 1));

    activity.activity_date = Some(instant(9, 1));
    assert_eq!(activity.scheduled_at(&clock), instant(9, 1));
}

#[test]
fn test_coordinates_from_parts() {
    assert_eq!(
        Coordinates::from_parts(Some(38.7), Some(-9.1)),
        Some(Coordinates {
            latitude: 38.7,
            longitude: -9.1
        })
    );
    assert_eq!(Coordinates::from_parts(Some(38.7), None), None);
    assert_eq!(Coordinates::from_parts(Some(f64::NAN), Some(1.0)), None);
}

#[test]
fn test_guide_transitions() {
    use GuideRequestStatus::{Approved, Pending, Rejected};

    assert!(Pending.can_transition_to(Approved));
    assert!(Pending.can_transition_to(Rejected));
    assert!(Approved.can_transition_to(Rejected));
    assert!(Rejected.can_transition_to(Approved));
    assert!(!Approved.can_transition_to(Pending));
    assert!(!Pending.can_transition_to(Pending));
}

#[test]
fn test_track_transitions_and_terminal_states() {
    use TrackStatus::{Cancelled, Completed, Ongoing, Pending};

    assert!(Pending.can_transition_to(Ongoing));
    assert!(Ongoing.can_transition_to(Completed));
    assert!(!Pending.can_transition_to(Completed));
    assert!(!Completed.can_transition_to(Ongoing));
    assert!(Completed.is_terminal());
    assert!(Cancelled.is_terminal());
    assert!(!Ongoing.is_terminal());
}

#[test]
fn test_track_end_time() {
    let track = Track {
        id: String::from("t1"),
        name: String::from("Old town"),
        location_ids: Vec::new(),
        activity_ids: Vec::new(),
        tour_guide_id: None,
        start_time: Some(instant(4, 2)),
        duration_minutes: 150,
        status: TrackStatus::Pending,
    };
    assert_eq!(
        track.end_time(),
        Some(Utc.with_ymd_and_hms(2026, 4, 2, 12, 30, 0).unwrap())
    );
}

#[test]
fn test_track_end_time_out_of_range_is_none() {
    let track = Track {
        id: String::from("t1"),
        name: String::from("Far future"),
        location_ids: Vec::new(),
        activity_ids: Vec::new(),
        tour_guide_id: None,
        start_time: Some(DateTime::<Utc>::MAX_UTC),
        duration_minutes: 60,
        status: TrackStatus::Pending,
    };
    assert_eq!(track.end_time(), None);

    let unscheduled = Track {
        start_time: None,
        ..track
    };
    assert_eq!(unscheduled.end_time(), None);
}
