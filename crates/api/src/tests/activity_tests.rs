// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde_json::json;
use tourdesk_domain::{Activity, ActivityStatus, Clock};
use tourdesk_persistence::{Collection, DocumentStore, MemoryDocumentStore};

use crate::{
    ActivityFilter, ApiError, CreateActivityRequest, CreatedResponse, UpdateActivityRequest,
    create_activity, delete_activity, get_activity, list_activities, update_activity,
};

use super::helpers::{
    assert_invalid_input, create_demo_store, create_test_clock, create_valid_activity_request,
};

// ============================================================================
// Create
// ============================================================================

#[test]
fn test_create_activity_stamps_creation_time_and_defaults_status() {
    let mut store = MemoryDocumentStore::new();
    let clock = create_test_clock();

    let created: CreatedResponse =
        create_activity(&mut store, create_valid_activity_request(), &clock).unwrap();
    let activity: Activity = get_activity(&mut store, &created.id, &clock).unwrap();

    assert_eq!(activity.name, "Sunset kayak");
    assert_eq!(activity.status, ActivityStatus::Active);
    assert_eq!(activity.created_at, Some(clock.now()));
    assert_eq!(activity.price, Some(45.0));
}

#[test]
fn test_create_activity_trims_name() {
    let mut store = MemoryDocumentStore::new();
    let clock = create_test_clock();
    let request = CreateActivityRequest {
        name: String::from("  Night market  "),
        ..CreateActivityRequest::default()
    };

    let created = create_activity(&mut store, request, &clock).unwrap();
    let activity = get_activity(&mut store, &created.id, &clock).unwrap();
    assert_eq!(activity.name, "Night market");
}

#[test]
fn test_create_activity_rejects_blank_name() {
    let mut store = MemoryDocumentStore::new();
    let request = CreateActivityRequest {
        name: String::from("   "),
        ..create_valid_activity_request()
    };

    let err = create_activity(&mut store, request, &create_test_clock()).unwrap_err();
    assert_invalid_input(&err, "name");
}

#[test]
fn test_create_activity_rejects_negative_price() {
    let mut store = MemoryDocumentStore::new();
    let request = CreateActivityRequest {
        price: Some(-5.0),
        ..create_valid_activity_request()
    };

    let err = create_activity(&mut store, request, &create_test_clock()).unwrap_err();
    assert_invalid_input(&err, "price");
}

#[test]
fn test_create_activity_rejects_unknown_status() {
    let mut store = MemoryDocumentStore::new();
    let request = CreateActivityRequest {
        status: Some(String::from("archived")),
        ..create_valid_activity_request()
    };

    let err = create_activity(&mut store, request, &create_test_clock()).unwrap_err();
    assert_invalid_input(&err, "status");
    assert!(store.list(Collection::Activities).unwrap().is_empty());
}

// ============================================================================
// Update and get
// ============================================================================

#[test]
fn test_update_activity_changes_only_given_fields() {
    let mut store = create_demo_store();
    let clock = create_test_clock();
    let before = get_activity(&mut store, "grotto-dive", &clock).unwrap();

    let request = UpdateActivityRequest {
        price: Some(90.0),
        status: Some(String::from("inactive")),
        ..UpdateActivityRequest::default()
    };
    let updated = update_activity(&mut store, "grotto-dive", request, &clock).unwrap();

    assert_eq!(updated.price, Some(90.0));
    assert_eq!(updated.status, ActivityStatus::Inactive);
    assert_eq!(updated.name, before.name);
    assert_eq!(updated.activity_date, before.activity_date);
    assert_eq!(get_activity(&mut store, "grotto-dive", &clock).unwrap(), updated);
}

#[test]
fn test_update_activity_writes_only_given_fields() {
    let mut store = MemoryDocumentStore::new();
    let clock = create_test_clock();
    store
        .put(
            Collection::Activities,
            "a1",
            json!({
                "name": "Kayak",
                "createdAt": "last spring",
                "status": "archived",
                "duration": 90
            }),
        )
        .unwrap();

    let request = UpdateActivityRequest {
        price: Some(10.0),
        ..UpdateActivityRequest::default()
    };
    let updated = update_activity(&mut store, "a1", request, &clock).unwrap();
    assert_eq!(updated.price, Some(10.0));

    let stored = store.get(Collection::Activities, "a1").unwrap().unwrap();
    assert_eq!(
        stored.body,
        json!({
            "name": "Kayak",
            "createdAt": "last spring",
            "status": "archived",
            "duration": 90,
            "price": 10.0
        })
    );
}

#[test]
fn test_update_activity_blank_location_clears_it() {
    let mut store = create_demo_store();
    let clock = create_test_clock();
    let request = UpdateActivityRequest {
        location_name: Some(String::from("  ")),
        ..UpdateActivityRequest::default()
    };

    let updated = update_activity(&mut store, "cliff-walk", request, &clock).unwrap();
    assert_eq!(updated.location_name, None);
    assert_eq!(
        get_activity(&mut store, "cliff-walk", &clock)
            .unwrap()
            .location_name,
        None
    );
}

#[test]
fn test_update_missing_activity_is_not_found() {
    let mut store = MemoryDocumentStore::new();
    let err = update_activity(
        &mut store,
        "nope",
        UpdateActivityRequest::default(),
        &create_test_clock(),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

#[test]
fn test_get_activity_applies_placeholder_name() {
    let mut store = create_demo_store();
    let activity = get_activity(&mut store, "untitled", &create_test_clock()).unwrap();
    assert_eq!(activity.name, "Unnamed activity");
}

// ============================================================================
// List
// ============================================================================

#[test]
fn test_list_activities_without_filter_keeps_insertion_order() {
    let mut store = create_demo_store();
    let activities =
        list_activities(&mut store, &ActivityFilter::default(), &create_test_clock()).unwrap();
    let ids: Vec<&str> = activities.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["cliff-walk", "grotto-dive", "palace-tasting", "untitled"]
    );
}

#[test]
fn test_list_activities_by_status() {
    let mut store = create_demo_store();
    let filter = ActivityFilter {
        status: Some(String::from("coming_soon")),
        activity_type: None,
    };
    let activities = list_activities(&mut store, &filter, &create_test_clock()).unwrap();
    assert_eq!(activities.len(), 1);
    assert_eq!(activities[0].id, "palace-tasting");
}

#[test]
fn test_list_activities_by_type_and_status() {
    let mut store = create_demo_store();
    let filter = ActivityFilter {
        status: Some(String::from("active")),
        activity_type: Some(String::from("hiking")),
    };
    let activities = list_activities(&mut store, &filter, &create_test_clock()).unwrap();
    let ids: Vec<&str> = activities.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["cliff-walk", "untitled"]);
}

#[test]
fn test_list_activities_rejects_unknown_status_filter() {
    let mut store = create_demo_store();
    let filter = ActivityFilter {
        status: Some(String::from("draft")),
        activity_type: None,
    };
    let err = list_activities(&mut store, &filter, &create_test_clock()).unwrap_err();
    assert_invalid_input(&err, "status");
}

// ============================================================================
// Delete
// ============================================================================

#[test]
fn test_delete_activity_removes_guide_assignment() {
    let mut store = create_demo_store();
    assert!(store
        .get(Collection::ActivityGuides, "cliff-walk")
        .unwrap()
        .is_some());

    delete_activity(&mut store, "cliff-walk").unwrap();

    assert!(store.get(Collection::Activities, "cliff-walk").unwrap().is_none());
    assert!(store
        .get(Collection::ActivityGuides, "cliff-walk")
        .unwrap()
        .is_none());
}

#[test]
fn test_delete_activity_without_guides_succeeds() {
    let mut store = create_demo_store();
    delete_activity(&mut store, "palace-tasting").unwrap();
    assert!(store
        .get(Collection::Activities, "palace-tasting")
        .unwrap()
        .is_none());
}

#[test]
fn test_delete_missing_activity_is_not_found() {
    let mut store = MemoryDocumentStore::new();
    let err = delete_activity(&mut store, "ghost").unwrap_err();
    assert!(matches!(
        err,
        ApiError::ResourceNotFound { ref resource_type, .. } if resource_type == "activities"
    ));
}
