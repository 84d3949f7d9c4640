// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use chrono::{TimeZone, Utc};
use serde_json::Value;
use tourdesk_domain::FixedClock;
use tourdesk_persistence::{
    Collection, DocumentStore, MemoryDocumentStore, PersistenceError, StoredDocument,
};

use crate::{ApiError, CreateActivityRequest};

/// A clock fixed at 2026-03-01 12:00 UTC.
pub fn create_test_clock() -> FixedClock {
    FixedClock::new(Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap())
}

pub fn create_demo_store() -> MemoryDocumentStore {
    MemoryDocumentStore::with_demo_data()
}

pub fn create_valid_activity_request() -> CreateActivityRequest {
    CreateActivityRequest {
        name: String::from("Sunset kayak"),
        activity_type: Some(String::from("diving")),
        location_name: Some(String::from("ponta-piedade")),
        price: Some(45.0),
        activity_date: Some(Utc.with_ymd_and_hms(2026, 7, 2, 18, 30, 0).unwrap()),
        ..CreateActivityRequest::default()
    }
}

/// Asserts that `err` is an `InvalidInput` for `expected_field`.
pub fn assert_invalid_input(err: &ApiError, expected_field: &str) {
    match err {
        ApiError::InvalidInput { field, .. } => assert_eq!(field, expected_field),
        other => panic!("expected InvalidInput for '{expected_field}', got {other:?}"),
    }
}

/// Asserts that `err` is a `DomainRuleViolation` of `expected_rule`.
pub fn assert_rule_violation(err: &ApiError, expected_rule: &str) {
    match err {
        ApiError::DomainRuleViolation { rule, .. } => assert_eq!(rule, expected_rule),
        other => panic!("expected violation of '{expected_rule}', got {other:?}"),
    }
}

/// A demo store whose reads of one collection always fail.
pub struct FailingStore {
    inner: MemoryDocumentStore,
    failing: Collection,
}

impl FailingStore {
    pub fn new(failing: Collection) -> Self {
        Self {
            inner: create_demo_store(),
            failing,
        }
    }
}

impl DocumentStore for FailingStore {
    fn backend_name(&self) -> &'static str {
        "failing"
    }

    fn list(&mut self, collection: Collection) -> Result<Vec<StoredDocument>, PersistenceError> {
        if collection == self.failing {
            return Err(PersistenceError::DatabaseError(String::from("disk I/O error")));
        }
        self.inner.list(collection)
    }

    fn get(
        &mut self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<StoredDocument>, PersistenceError> {
        self.inner.get(collection, id)
    }

    fn insert(&mut self, collection: Collection, body: Value) -> Result<String, PersistenceError> {
        self.inner.insert(collection, body)
    }

    fn put(
        &mut self,
        collection: Collection,
        id: &str,
        body: Value,
    ) -> Result<(), PersistenceError> {
        self.inner.put(collection, id, body)
    }

    fn update(
        &mut self,
        collection: Collection,
        id: &str,
        patch: Value,
    ) -> Result<StoredDocument, PersistenceError> {
        self.inner.update(collection, id, patch)
    }

    fn delete(&mut self, collection: Collection, id: &str) -> Result<(), PersistenceError> {
        self.inner.delete(collection, id)
    }
}
