// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Activity, ActivityStatus, Coordinates, DomainError, GuideRequestStatus, Location,
    Registration, TourGuideRequest, Track, TrackStatus, validate_activity,
    validate_guide_transition, validate_guides_approved, validate_location,
    validate_registration, validate_registration_unique, validate_track,
    validate_track_transition,
};

fn create_test_activity(name: &str, price: Option<f64>) -> Activity {
    Activity {
        id: String::from("a1"),
        name: name.to_string(),
        activity_type: None,
        location_name: None,
        description: None,
        image_url: None,
        price,
        status: ActivityStatus::Active,
        activity_date: None,
        created_at: None,
    }
}

fn create_test_registration(user_id: &str, activity_id: &str) -> Registration {
    Registration {
        id: format!("{user_id}-{activity_id}"),
        user_id: user_id.to_string(),
        activity_id: activity_id.to_string(),
        registered_at: None,
    }
}

fn create_test_guide(id: &str, status: GuideRequestStatus) -> TourGuideRequest {
    TourGuideRequest {
        id: id.to_string(),
        full_name: String::from("Ana Guide"),
        email: None,
        phone: None,
        regions: Vec::new(),
        languages: vec![String::from("pt")],
        status,
        active: false,
        submitted_at: None,
    }
}

#[test]
fn test_validate_activity_accepts_valid_activity() {
    assert!(validate_activity(&create_test_activity("Kayak", Some(0.0))).is_ok());
    assert!(validate_activity(&create_test_activity("Kayak", None)).is_ok());
}

#[test]
fn test_validate_activity_rejects_blank_name() {
    let result = validate_activity(&create_test_activity("  ", None));
    assert_eq!(result, Err(DomainError::EmptyField { field: "name" }));
}

#[test]
fn test_validate_activity_rejects_bad_price() {
    let negative = validate_activity(&create_test_activity("Kayak", Some(-5.0)));
    assert!(matches!(negative, Err(DomainError::InvalidPrice(_))));

    let infinite = validate_activity(&create_test_activity("Kayak", Some(f64::INFINITY)));
    assert!(matches!(infinite, Err(DomainError::InvalidPrice(_))));
}

#[test]
fn test_validate_location_checks_coordinate_range() {
    let mut location = Location {
        id: String::from("l1"),
        name: String::from("Harbour"),
        category: None,
        description: None,
        coordinates: None,
    };
    assert!(validate_location(&location).is_ok());

    location.coordinates = Some(Coordinates {
        latitude: 91.0,
        longitude: 0.0,
    });
    assert!(matches!(
        validate_location(&location),
        Err(DomainError::InvalidCoordinates(_))
    ));
}

#[test]
fn test_validate_track_rejects_zero_duration() {
    let track = Track {
        id: String::from("t1"),
        name: String::from("Ridge"),
        location_ids: Vec::new(),
        activity_ids: Vec::new(),
        tour_guide_id: None,
        start_time: None,
        duration_minutes: 0,
        status: TrackStatus::Pending,
    };
    assert!(matches!(
        validate_track(&track),
        Err(DomainError::InvalidDuration(_))
    ));
}

#[test]
fn test_validate_registration_requires_ids() {
    assert!(validate_registration(&create_test_registration("u1", "a1")).is_ok());
    assert_eq!(
        validate_registration(&create_test_registration("", "a1")),
        Err(DomainError::EmptyField { field: "userId" })
    );
}

#[test]
fn test_validate_registration_unique_rejects_duplicate_pair() {
    let existing = vec![
        create_test_registration("u1", "a1"),
        create_test_registration("u2", "a2"),
    ];

    assert!(validate_registration_unique("u1", "a2", &existing).is_ok());
    assert_eq!(
        validate_registration_unique("u1", "a1", &existing),
        Err(DomainError::DuplicateRegistration {
            user_id: String::from("u1"),
            activity_id: String::from("a1"),
        })
    );
}

#[test]
fn test_validate_guides_approved() {
    let requests = vec![
        create_test_guide("g1", GuideRequestStatus::Approved),
        create_test_guide("g2", GuideRequestStatus::Pending),
    ];

    assert!(validate_guides_approved(&[String::from("g1")], &requests).is_ok());
    assert_eq!(
        validate_guides_approved(&[String::from("g1"), String::from("g2")], &requests),
        Err(DomainError::GuideNotApproved {
            guide_id: String::from("g2")
        })
    );
    assert!(validate_guides_approved(&[String::from("ghost")], &requests).is_err());
}

#[test]
fn test_validate_transitions() {
    assert!(
        validate_guide_transition(GuideRequestStatus::Pending, GuideRequestStatus::Approved)
            .is_ok()
    );
    assert_eq!(
        validate_guide_transition(GuideRequestStatus::Rejected, GuideRequestStatus::Pending),
        Err(DomainError::InvalidGuideTransition {
            from: String::from("rejected"),
            to: String::from("pending"),
        })
    );

    assert!(validate_track_transition(TrackStatus::Ongoing, TrackStatus::Cancelled).is_ok());
    assert_eq!(
        validate_track_transition(TrackStatus::Cancelled, TrackStatus::Ongoing),
        Err(DomainError::InvalidTrackTransition {
            from: String::from("cancelled"),
            to: String::from("ongoing"),
        })
    );
}
