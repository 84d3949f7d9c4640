// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Conversion between stored documents and domain records.
//!
//! This is the single place where defaults are applied and timestamps are
//! normalized. Defaulting rules:
//!
//! - a missing or blank name becomes a placeholder such as `"Unnamed activity"`
//! - a blank reference (type, location, category, guide) reads as absent
//! - a missing or unknown status becomes the status type's default
//! - a negative or non-finite price reads as absent
//! - a guide request without `active` is active
//! - a track without a duration lasts [`DEFAULT_TRACK_MINUTES`]
//! - an absent timestamp stays absent; one that is present but unreadable
//!   becomes the current instant
//!
//! A document whose body does not deserialize at all is replaced by an
//! all-default document and logged, never dropped.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tourdesk_domain::{
    Activity, ActivityGuide, ActivityType, ActivityUsers, Clock, Coordinates, Location,
    LocationCategory, RawTimestamp, Registration, TourGuideRequest, Track, UserProfile,
    name_or_placeholder, normalize_present,
};
use tracing::warn;

use crate::collection::Collection;
use crate::documents::{
    ActivityDocument, ActivityGuideDocument, ActivityTypeDocument, ActivityUsersDocument,
    CategoryDocument, GuideRequestDocument, LocationDocument, RegistrationDocument,
    TrackDocument, UserDocument,
};
use crate::error::PersistenceError;
use crate::store::{DocumentStore, StoredDocument};

/// Duration given to tracks stored without one.
pub const DEFAULT_TRACK_MINUTES: u32 = 60;

/// A domain record stored as a document.
pub trait Record: Sized {
    /// Stored document shape.
    type Document: Serialize + DeserializeOwned + Default;

    /// Collection the record lives in.
    const COLLECTION: Collection;

    /// Builds the record from a stored document, applying defaults.
    fn from_document(id: String, document: Self::Document, clock: &dyn Clock) -> Self;

    /// Builds the stored document for this record.
    fn to_document(&self) -> Self::Document;

    /// Id the record is stored under.
    fn document_id(&self) -> &str;
}

fn parse_or_default<T: std::str::FromStr + Default>(value: Option<&str>) -> T {
    value.and_then(|s| s.parse().ok()).unwrap_or_default()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn raw(instant: Option<chrono::DateTime<chrono::Utc>>) -> Option<RawTimestamp> {
    instant.map(RawTimestamp::from)
}

impl Record for Activity {
    type Document = ActivityDocument;
    const COLLECTION: Collection = Collection::Activities;

    fn from_document(id: String, doc: ActivityDocument, clock: &dyn Clock) -> Self {
        Self {
            id,
            name: name_or_placeholder(doc.name, "activity"),
            activity_type: non_blank(doc.activity_type),
            location_name: non_blank(doc.location_name),
            description: doc.description,
            image_url: doc.image_url,
            price: doc.price.filter(|p| p.is_finite() && *p >= 0.0),
            status: parse_or_default(doc.status.as_deref()),
            activity_date: normalize_present(doc.activity_date.as_ref(), clock),
            created_at: normalize_present(doc.created_at.as_ref(), clock),
        }
    }

    fn to_document(&self) -> ActivityDocument {
        ActivityDocument {
            name: Some(self.name.clone()),
            activity_type: self.activity_type.clone(),
            location_name: self.location_name.clone(),
            description: self.description.clone(),
            image_url: self.image_url.clone(),
            price: self.price,
            status: Some(self.status.as_str().to_string()),
            activity_date: raw(self.activity_date),
            created_at: raw(self.created_at),
        }
    }

    fn document_id(&self) -> &str {
        &self.id
    }
}

impl Record for ActivityType {
    type Document = ActivityTypeDocument;
    const COLLECTION: Collection = Collection::ActivityTypes;

    fn from_document(id: String, doc: ActivityTypeDocument, _clock: &dyn Clock) -> Self {
        Self {
            id,
            name: name_or_placeholder(doc.name, "type"),
            icon: doc.icon.unwrap_or_default(),
            description: doc.description.unwrap_or_default(),
        }
    }

    fn to_document(&self) -> ActivityTypeDocument {
        ActivityTypeDocument {
            name: Some(self.name.clone()),
            icon: Some(self.icon.clone()),
            description: Some(self.description.clone()),
        }
    }

    fn document_id(&self) -> &str {
        &self.id
    }
}

impl Record for LocationCategory {
    type Document = CategoryDocument;
    const COLLECTION: Collection = Collection::Categories;

    fn from_document(id: String, doc: CategoryDocument, _clock: &dyn Clock) -> Self {
        Self {
            id,
            name: name_or_placeholder(doc.name, "category"),
            description: doc.description.unwrap_or_default(),
        }
    }

    fn to_document(&self) -> CategoryDocument {
        CategoryDocument {
            name: Some(self.name.clone()),
            description: Some(self.description.clone()),
        }
    }

    fn document_id(&self) -> &str {
        &self.id
    }
}

impl Record for Location {
    type Document = LocationDocument;
    const COLLECTION: Collection = Collection::Locations;

    fn from_document(id: String, doc: LocationDocument, _clock: &dyn Clock) -> Self {
        Self {
            id,
            name: name_or_placeholder(doc.name, "location"),
            category: non_blank(doc.category),
            description: doc.description,
            coordinates: Coordinates::from_parts(doc.latitude, doc.longitude),
        }
    }

    fn to_document(&self) -> LocationDocument {
        LocationDocument {
            name: Some(self.name.clone()),
            category: self.category.clone(),
            description: self.description.clone(),
            latitude: self.coordinates.map(|c| c.latitude),
            longitude: self.coordinates.map(|c| c.longitude),
        }
    }

    fn document_id(&self) -> &str {
        &self.id
    }
}

impl Record for Registration {
    type Document = RegistrationDocument;
    const COLLECTION: Collection = Collection::Registrations;

    fn from_document(id: String, doc: RegistrationDocument, clock: &dyn Clock) -> Self {
        Self {
            id,
            user_id: doc.user_id.unwrap_or_default(),
            activity_id: doc.activity_id.unwrap_or_default(),
            registered_at: normalize_present(doc.registered_at.as_ref(), clock),
        }
    }

    fn to_document(&self) -> RegistrationDocument {
        RegistrationDocument {
            user_id: Some(self.user_id.clone()),
            activity_id: Some(self.activity_id.clone()),
            registered_at: raw(self.registered_at),
        }
    }

    fn document_id(&self) -> &str {
        &self.id
    }
}

impl Record for UserProfile {
    type Document = UserDocument;
    const COLLECTION: Collection = Collection::Users;

    fn from_document(id: String, doc: UserDocument, clock: &dyn Clock) -> Self {
        Self {
            id,
            display_name: name_or_placeholder(doc.display_name, "user"),
            email: doc.email,
            created_at: normalize_present(doc.created_at.as_ref(), clock),
        }
    }

    fn to_document(&self) -> UserDocument {
        UserDocument {
            display_name: Some(self.display_name.clone()),
            email: self.email.clone(),
            created_at: raw(self.created_at),
        }
    }

    fn document_id(&self) -> &str {
        &self.id
    }
}

impl Record for ActivityUsers {
    type Document = ActivityUsersDocument;
    const COLLECTION: Collection = Collection::ActivityUsers;

    fn from_document(id: String, doc: ActivityUsersDocument, _clock: &dyn Clock) -> Self {
        Self {
            activity_id: id,
            user_ids: doc.user_ids.unwrap_or_default(),
        }
    }

    fn to_document(&self) -> ActivityUsersDocument {
        ActivityUsersDocument {
            user_ids: Some(self.user_ids.clone()),
        }
    }

    fn document_id(&self) -> &str {
        &self.activity_id
    }
}

impl Record for TourGuideRequest {
    type Document = GuideRequestDocument;
    const COLLECTION: Collection = Collection::TourGuideRequests;

    fn from_document(id: String, doc: GuideRequestDocument, clock: &dyn Clock) -> Self {
        Self {
            id,
            full_name: name_or_placeholder(doc.full_name, "applicant"),
            email: doc.email,
            phone: doc.phone,
            regions: doc.regions.unwrap_or_default(),
            languages: doc.languages.unwrap_or_default(),
            status: parse_or_default(doc.status.as_deref()),
            active: doc.active.unwrap_or(true),
            submitted_at: normalize_present(doc.submitted_at.as_ref(), clock),
        }
    }

    fn to_document(&self) -> GuideRequestDocument {
        GuideRequestDocument {
            full_name: Some(self.full_name.clone()),
            email: self.email.clone(),
            phone: self.phone.clone(),
            regions: Some(self.regions.clone()),
            languages: Some(self.languages.clone()),
            status: Some(self.status.as_str().to_string()),
            active: Some(self.active),
            submitted_at: raw(self.submitted_at),
        }
    }

    fn document_id(&self) -> &str {
        &self.id
    }
}

impl Record for Track {
    type Document = TrackDocument;
    const COLLECTION: Collection = Collection::Tracks;

    fn from_document(id: String, doc: TrackDocument, clock: &dyn Clock) -> Self {
        Self {
            id,
            name: name_or_placeholder(doc.name, "track"),
            location_ids: doc.location_ids.unwrap_or_default(),
            activity_ids: doc.activity_ids.unwrap_or_default(),
            tour_guide_id: non_blank(doc.tour_guide_id),
            start_time: normalize_present(doc.start_time.as_ref(), clock),
            duration_minutes: doc.duration_minutes.unwrap_or(DEFAULT_TRACK_MINUTES),
            status: parse_or_default(doc.status.as_deref()),
        }
    }

    fn to_document(&self) -> TrackDocument {
        TrackDocument {
            name: Some(self.name.clone()),
            location_ids: Some(self.location_ids.clone()),
            activity_ids: Some(self.activity_ids.clone()),
            tour_guide_id: self.tour_guide_id.clone(),
            start_time: raw(self.start_time),
            duration_minutes: Some(self.duration_minutes),
            status: Some(self.status.as_str().to_string()),
        }
    }

    fn document_id(&self) -> &str {
        &self.id
    }
}

impl Record for ActivityGuide {
    type Document = ActivityGuideDocument;
    const COLLECTION: Collection = Collection::ActivityGuides;

    fn from_document(id: String, doc: ActivityGuideDocument, _clock: &dyn Clock) -> Self {
        Self {
            activity_id: id,
            guide_ids: doc.guide_ids.unwrap_or_default(),
        }
    }

    fn to_document(&self) -> ActivityGuideDocument {
        ActivityGuideDocument {
            guide_ids: Some(self.guide_ids.clone()),
        }
    }

    fn document_id(&self) -> &str {
        &self.activity_id
    }
}

/// Converts a stored document into a record.
///
/// A body that does not deserialize is replaced by the default document.
pub fn decode<R: Record>(stored: StoredDocument, clock: &dyn Clock) -> R {
    let document: R::Document = match serde_json::from_value(stored.body) {
        Ok(document) => document,
        Err(e) => {
            warn!(
                collection = %R::COLLECTION,
                id = %stored.id,
                error = %e,
                "Malformed document, substituting defaults"
            );
            R::Document::default()
        }
    };
    R::from_document(stored.id, document, clock)
}

/// Serializes a record's document body.
///
/// # Errors
///
/// Returns an error if the document cannot be serialized.
pub fn encode<R: Record>(record: &R) -> Result<Value, PersistenceError> {
    Ok(serde_json::to_value(record.to_document())?)
}

/// Fetches and decodes every record of a collection.
///
/// # Errors
///
/// Returns an error if the collection cannot be read.
pub fn fetch_all<R: Record>(
    store: &mut dyn DocumentStore,
    clock: &dyn Clock,
) -> Result<Vec<R>, PersistenceError> {
    Ok(store
        .list(R::COLLECTION)?
        .into_iter()
        .map(|stored| decode(stored, clock))
        .collect())
}

/// Fetches and decodes one record.
///
/// # Errors
///
/// Returns an error if the collection cannot be read.
pub fn fetch_one<R: Record>(
    store: &mut dyn DocumentStore,
    id: &str,
    clock: &dyn Clock,
) -> Result<Option<R>, PersistenceError> {
    Ok(store
        .get(R::COLLECTION, id)?
        .map(|stored| decode(stored, clock)))
}

/// Stores a new record under a generated id and returns the id.
///
/// The record's own id is ignored.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn insert_record<R: Record>(
    store: &mut dyn DocumentStore,
    record: &R,
) -> Result<String, PersistenceError> {
    store.insert(R::COLLECTION, encode(record)?)
}

/// Stores a record at its own id, replacing any existing document.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn replace_record<R: Record>(
    store: &mut dyn DocumentStore,
    record: &R,
) -> Result<(), PersistenceError> {
    store.put(R::COLLECTION, record.document_id(), encode(record)?)
}

/// Merges the fields set in `patch` into a stored record and returns the
/// record as read back.
///
/// Fields left `None` in the patch keep their stored value, including
/// fields the document shape does not model and values that only read as
/// defaults.
///
/// # Errors
///
/// Returns `PersistenceError::DocumentNotFound` if the record does not
/// exist, or an error if the write fails.
pub fn update_record<R: Record>(
    store: &mut dyn DocumentStore,
    id: &str,
    patch: &R::Document,
    clock: &dyn Clock,
) -> Result<R, PersistenceError> {
    let stored: StoredDocument = store.update(R::COLLECTION, id, serde_json::to_value(patch)?)?;
    Ok(decode(stored, clock))
}
