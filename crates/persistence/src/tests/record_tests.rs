// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Document ↔ record conversion and defaulting.

use chrono::{TimeZone, Utc};
use serde_json::json;
use tourdesk_domain::{
    Activity, ActivityGuide, ActivityStatus, Clock, Coordinates, GuideRequestStatus, Location,
    TourGuideRequest, Track, TrackStatus,
};

use super::create_test_clock;
use crate::{
    Collection, DEFAULT_TRACK_MINUTES, DocumentStore, MemoryDocumentStore, SqliteDocumentStore,
    StoredDocument, decode, fetch_all, fetch_one, insert_record, replace_record,
};
use crate::{ActivityDocument, PersistenceError, TrackDocument, update_record};

fn stored(id: &str, body: serde_json::Value) -> StoredDocument {
    StoredDocument {
        id: id.to_string(),
        body,
    }
}

#[test]
fn test_activity_defaults() {
    let clock = create_test_clock();
    let activity: Activity = decode(stored("a1", json!({})), &clock);

    assert_eq!(activity.id, "a1");
    assert_eq!(activity.name, "Unnamed activity");
    assert_eq!(activity.status, ActivityStatus::Active);
    assert_eq!(activity.price, None);
    assert_eq!(activity.created_at, None);
    assert_eq!(activity.activity_date, None);
}

#[test]
fn test_activity_fields_and_timestamp_shapes() {
    let clock = create_test_clock();
    let activity: Activity = decode(
        stored(
            "a1",
            json!({
                "name": "Grotto dive",
                "type": "diving",
                "locationName": "loc-1",
                "price": 75,
                "status": "coming_soon",
                "activityDate": "2026-08-14T09:30:00Z",
                "createdAt": {"seconds": 1_700_000_000, "nanoseconds": 0}
            }),
        ),
        &clock,
    );

    assert_eq!(activity.activity_type.as_deref(), Some("diving"));
    assert_eq!(activity.location_name.as_deref(), Some("loc-1"));
    assert_eq!(activity.price, Some(75.0));
    assert_eq!(activity.status, ActivityStatus::ComingSoon);
    assert_eq!(
        activity.activity_date,
        Some(Utc.with_ymd_and_hms(2026, 8, 14, 9, 30, 0).unwrap())
    );
    assert_eq!(
        activity.created_at,
        Some(Utc.timestamp_opt(1_700_000_000, 0).unwrap())
    );
}

#[test]
fn test_wrong_field_types_read_as_absent() {
    let clock = create_test_clock();
    let activity: Activity = decode(
        stored(
            "a1",
            json!({
                "name": "Kept",
                "price": "cheap",
                "status": "archived",
                "createdAt": "last week"
            }),
        ),
        &clock,
    );

    assert_eq!(activity.name, "Kept");
    assert_eq!(activity.price, None);
    assert_eq!(activity.status, ActivityStatus::Active);
    assert_eq!(activity.created_at, Some(clock.now()));
}

#[test]
fn test_negative_price_reads_as_absent() {
    let clock = create_test_clock();
    let activity: Activity = decode(stored("a1", json!({"price": -3.5})), &clock);
    assert_eq!(activity.price, None);
}

#[test]
fn test_location_partial_coordinates_are_absent() {
    let clock = create_test_clock();
    let partial: Location = decode(stored("l1", json!({"latitude": 38.7})), &clock);
    assert_eq!(partial.coordinates, None);
    assert_eq!(partial.name, "Unnamed location");

    let full: Location = decode(
        stored("l2", json!({"name": "Cabo", "latitude": 38.7, "longitude": -9.5})),
        &clock,
    );
    assert_eq!(
        full.coordinates,
        Some(Coordinates {
            latitude: 38.7,
            longitude: -9.5
        })
    );
}

#[test]
fn test_guide_request_defaults_to_active_pending() {
    let clock = create_test_clock();
    let request: TourGuideRequest = decode(stored("g1", json!({"fullName": "Rita"})), &clock);
    assert!(request.active);
    assert_eq!(request.status, GuideRequestStatus::Pending);
    assert!(request.languages.is_empty());
}

#[test]
fn test_track_defaults() {
    let clock = create_test_clock();
    let track: Track = decode(stored("t1", json!({"locationIds": "not-a-list"})), &clock);
    assert_eq!(track.duration_minutes, DEFAULT_TRACK_MINUTES);
    assert_eq!(track.status, TrackStatus::Pending);
    assert!(track.location_ids.is_empty());
}

#[test]
fn test_keyed_records_take_id_from_document() {
    let clock = create_test_clock();
    let guides: ActivityGuide = decode(
        stored("act-9", json!({"guideIds": ["g1", "g2"]})),
        &clock,
    );
    assert_eq!(guides.activity_id, "act-9");
    assert_eq!(guides.guide_ids.len(), 2);
}

#[test]
fn test_record_round_trip_through_sqlite() {
    let clock = create_test_clock();
    let mut store = SqliteDocumentStore::new_in_memory().unwrap();

    let original = Track {
        id: String::new(),
        name: String::from("Coast"),
        location_ids: vec![String::from("l1"), String::from("l2")],
        activity_ids: Vec::new(),
        tour_guide_id: Some(String::from("g1")),
        start_time: Some(Utc.with_ymd_and_hms(2026, 5, 4, 8, 15, 0).unwrap()),
        duration_minutes: 240,
        status: TrackStatus::Ongoing,
    };
    let id = insert_record(&mut store, &original).unwrap();

    let fetched: Track = fetch_one(&mut store, &id, &clock).unwrap().unwrap();
    assert_eq!(fetched, Track { id, ..original });
}

#[test]
fn test_replace_record_and_fetch_all() {
    let clock = create_test_clock();
    let mut store = MemoryDocumentStore::new();

    let mut guides = ActivityGuide {
        activity_id: String::from("act-1"),
        guide_ids: vec![String::from("g1")],
    };
    replace_record(&mut store, &guides).unwrap();
    guides.guide_ids.push(String::from("g2"));
    replace_record(&mut store, &guides).unwrap();

    let all: Vec<ActivityGuide> = fetch_all(&mut store, &clock).unwrap();
    assert_eq!(all, vec![guides]);
}

#[test]
fn test_demo_data_decodes() {
    let clock = create_test_clock();
    let mut store = MemoryDocumentStore::with_demo_data();

    let activities: Vec<Activity> = fetch_all(&mut store, &clock).unwrap();
    assert_eq!(activities.len(), 4);
    assert!(activities.iter().all(|a| a.created_at.is_some()));
    assert!(activities.iter().any(|a| a.name == "Unnamed activity"));

    for collection in Collection::ALL {
        assert!(
            !store.list(collection).unwrap().is_empty(),
            "demo data missing {collection}"
        );
    }
}

#[test]
fn test_blank_references_read_as_absent() {
    let clock = create_test_clock();
    let activity: Activity = decode(stored("a1", json!({"type": " ", "locationName": ""})), &clock);
    assert_eq!(activity.activity_type, None);
    assert_eq!(activity.location_name, None);

    let track: Track = decode(stored("t1", json!({"tourGuideId": ""})), &clock);
    assert_eq!(track.tour_guide_id, None);
}

#[test]
fn test_update_record_merges_patch_into_sqlite_document() {
    let clock = create_test_clock();
    let mut store = SqliteDocumentStore::new_in_memory().unwrap();
    store
        .put(
            Collection::Activities,
            "a1",
            json!({
                "name": "Kayak",
                "status": "archived",
                "createdAt": "last spring",
                "guide": "rita"
            }),
        )
        .unwrap();

    let patch = ActivityDocument {
        price: Some(25.0),
        ..ActivityDocument::default()
    };
    let updated: Activity = update_record(&mut store, "a1", &patch, &clock).unwrap();

    assert_eq!(updated.price, Some(25.0));
    assert_eq!(updated.status, ActivityStatus::Active);
    let body = store.get(Collection::Activities, "a1").unwrap().unwrap().body;
    assert_eq!(
        body,
        json!({
            "name": "Kayak",
            "status": "archived",
            "createdAt": "last spring",
            "guide": "rita",
            "price": 25.0
        })
    );
}

#[test]
fn test_update_record_missing_document_is_not_found() {
    let clock = create_test_clock();
    let mut store = MemoryDocumentStore::new();
    let patch = TrackDocument {
        status: Some(String::from("ongoing")),
        ..TrackDocument::default()
    };

    let result: Result<Track, PersistenceError> = update_record(&mut store, "t1", &patch, &clock);
    assert!(matches!(result, Err(PersistenceError::DocumentNotFound { .. })));
}
