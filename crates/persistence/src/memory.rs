// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashMap;

use serde_json::{Value, json};
use tracing::debug;

use crate::collection::Collection;
use crate::error::PersistenceError;
use crate::store::{
    DocumentStore, StoredDocument, expect_object, generate_document_id, merge_shallow, not_found,
};

/// An in-memory document store.
///
/// Used as the simulated backend and in tests. Documents keep their
/// insertion order; `put` on an existing id keeps the original position.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: HashMap<Collection, Vec<StoredDocument>>,
}

impl MemoryDocumentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with a small demo dataset.
    #[must_use]
    pub fn with_demo_data() -> Self {
        let mut store: Self = Self::new();
        for (collection, id, body) in demo_documents() {
            store
                .collections
                .entry(collection)
                .or_default()
                .push(StoredDocument {
                    id: id.to_string(),
                    body,
                });
        }
        store
    }

    fn documents_mut(&mut self, collection: Collection) -> &mut Vec<StoredDocument> {
        self.collections.entry(collection).or_default()
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn list(&mut self, collection: Collection) -> Result<Vec<StoredDocument>, PersistenceError> {
        Ok(self
            .collections
            .get(&collection)
            .cloned()
            .unwrap_or_default())
    }

    fn get(
        &mut self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<StoredDocument>, PersistenceError> {
        Ok(self
            .collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned())
    }

    fn insert(&mut self, collection: Collection, body: Value) -> Result<String, PersistenceError> {
        let body = expect_object(collection, body)?;
        let id: String = generate_document_id();
        self.documents_mut(collection).push(StoredDocument {
            id: id.clone(),
            body: Value::Object(body),
        });
        debug!(%collection, id, "Inserted document");
        Ok(id)
    }

    fn put(
        &mut self,
        collection: Collection,
        id: &str,
        body: Value,
    ) -> Result<(), PersistenceError> {
        let body = Value::Object(expect_object(collection, body)?);
        let docs = self.documents_mut(collection);
        match docs.iter_mut().find(|d| d.id == id) {
            Some(existing) => existing.body = body,
            None => docs.push(StoredDocument {
                id: id.to_string(),
                body,
            }),
        }
        debug!(%collection, id, "Stored document");
        Ok(())
    }

    fn update(
        &mut self,
        collection: Collection,
        id: &str,
        patch: Value,
    ) -> Result<StoredDocument, PersistenceError> {
        let patch = expect_object(collection, patch)?;
        let existing = self
            .documents_mut(collection)
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| not_found(collection, id))?;

        let mut body = expect_object(collection, existing.body.take())?;
        merge_shallow(&mut body, patch);
        existing.body = Value::Object(body);

        debug!(%collection, id, "Updated document");
        Ok(existing.clone())
    }

    fn delete(&mut self, collection: Collection, id: &str) -> Result<(), PersistenceError> {
        let docs = self.documents_mut(collection);
        let position = docs
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| not_found(collection, id))?;
        docs.remove(position);
        debug!(%collection, id, "Deleted document");
        Ok(())
    }
}

/// The demo dataset. Timestamps deliberately use every stored shape.
#[allow(clippy::too_many_lines)]
fn demo_documents() -> Vec<(Collection, &'static str, Value)> {
    vec![
        (
            Collection::ActivityTypes,
            "hiking",
            json!({"name": "Hiking", "icon": "mountain", "description": "Guided walks and treks"}),
        ),
        (
            Collection::ActivityTypes,
            "diving",
            json!({"name": "Diving", "icon": "waves", "description": "Reef and wreck dives"}),
        ),
        (
            Collection::ActivityTypes,
            "food",
            json!({"name": "Food & wine", "icon": "utensils", "description": "Tastings and markets"}),
        ),
        (
            Collection::Categories,
            "coast",
            json!({"name": "Coast", "description": "Beaches, cliffs and harbours"}),
        ),
        (
            Collection::Categories,
            "heritage",
            json!({"name": "Heritage", "description": "Historic sites"}),
        ),
        (
            Collection::Locations,
            "ponta-piedade",
            json!({
                "name": "Ponta da Piedade",
                "category": "coast",
                "description": "Sea arches and grottoes",
                "latitude": 37.0806,
                "longitude": -8.6697
            }),
        ),
        (
            Collection::Locations,
            "sintra-palace",
            json!({
                "name": "Pena Palace",
                "category": "heritage",
                "latitude": 38.7876,
                "longitude": -9.3906
            }),
        ),
        (
            Collection::Locations,
            "old-market",
            json!({"name": "Old Market", "category": "retired-category"}),
        ),
        (
            Collection::Activities,
            "cliff-walk",
            json!({
                "name": "Seven Hanging Valleys walk",
                "type": "hiking",
                "locationName": "ponta-piedade",
                "price": 0,
                "status": "active",
                "activityDate": {"seconds": 1_790_000_000, "nanoseconds": 0},
                "createdAt": {"seconds": 1_767_600_000, "nanoseconds": 0}
            }),
        ),
        (
            Collection::Activities,
            "grotto-dive",
            json!({
                "name": "Grotto dive",
                "type": "diving",
                "locationName": "Ponta da Piedade",
                "price": 75,
                "status": "active",
                "activityDate": "2026-08-14T09:30:00Z",
                "createdAt": {"_seconds": 1_770_000_000, "_nanoseconds": 0}
            }),
        ),
        (
            Collection::Activities,
            "palace-tasting",
            json!({
                "name": "Palace garden tasting",
                "type": "food",
                "locationName": "sintra-palace",
                "price": 320,
                "status": "coming_soon",
                "createdAt": 1_772_000_000_000_i64
            }),
        ),
        (
            Collection::Activities,
            "untitled",
            json!({"type": "hiking", "createdAt": "2026-03-02"}),
        ),
        (
            Collection::Users,
            "user-ana",
            json!({"displayName": "Ana", "email": "ana@example.com", "createdAt": "2026-01-10T08:00:00Z"}),
        ),
        (
            Collection::Users,
            "user-ben",
            json!({"displayName": "Ben", "createdAt": {"seconds": 1_768_000_000}}),
        ),
        (
            Collection::Registrations,
            "reg-1",
            json!({"userId": "user-ana", "activityId": "cliff-walk", "registeredAt": "2026-02-01T10:00:00Z"}),
        ),
        (
            Collection::Registrations,
            "reg-2",
            json!({"userId": "user-ben", "activityId": "cliff-walk"}),
        ),
        (
            Collection::Registrations,
            "reg-3",
            json!({"userId": "user-ana", "activityId": "grotto-dive"}),
        ),
        (
            Collection::ActivityUsers,
            "cliff-walk",
            json!({"userIds": ["user-ana", "user-ben"]}),
        ),
        (
            Collection::TourGuideRequests,
            "guide-rita",
            json!({
                "fullName": "Rita Sousa",
                "email": "rita@example.com",
                "regions": ["Algarve"],
                "languages": ["pt", "en"],
                "status": "approved",
                "submittedAt": "2026-01-05T12:00:00Z"
            }),
        ),
        (
            Collection::TourGuideRequests,
            "guide-tom",
            json!({
                "fullName": "Tom Hale",
                "languages": ["en"],
                "status": "pending"
            }),
        ),
        (
            Collection::ActivityGuides,
            "cliff-walk",
            json!({"guideIds": ["guide-rita"]}),
        ),
        (
            Collection::Tracks,
            "algarve-coast",
            json!({
                "name": "Algarve coast day",
                "locationIds": ["ponta-piedade"],
                "activityIds": ["cliff-walk", "grotto-dive"],
                "tourGuideId": "guide-rita",
                "startTime": "2026-08-14T08:00:00Z",
                "durationMinutes": 480,
                "status": "pending"
            }),
        ),
    ]
}
