// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Catalog handlers: activities, activity types, location categories,
//! locations and registrations.
//!
//! Handlers validate with the domain validators, convert through the
//! persistence record layer and return typed responses.

use tourdesk_domain::{
    Activity, ActivityStatus, ActivityType, Clock, Coordinates, Location, LocationCategory,
    RawTimestamp, Registration, validate_activity, validate_activity_type, validate_category,
    validate_location, validate_registration, validate_registration_unique,
};
use tourdesk_persistence::{
    ActivityDocument, ActivityTypeDocument, CategoryDocument, Collection, DocumentStore,
    LocationDocument, PersistenceError, Record, fetch_all, fetch_one, insert_record,
    update_record,
};
use tracing::info;

use crate::error::{ApiError, not_found, translate_domain_error};
use crate::request_response::{
    ActivityFilter, ActivityTypeRequest, CategoryRequest, CreateActivityRequest, CreatedResponse,
    LocationRequest, RegistrationRequest, UpdateActivityRequest,
};

/// Fetches a record, failing with `ResourceNotFound` if it does not exist.
pub(crate) fn require_record<R: Record>(
    store: &mut dyn DocumentStore,
    id: &str,
    clock: &dyn Clock,
    resource_type: &str,
) -> Result<R, ApiError> {
    fetch_one::<R>(store, id, clock)?.ok_or_else(|| not_found(resource_type, id))
}

/// Deletes a document, treating an already-missing document as done.
pub(crate) fn delete_if_present(
    store: &mut dyn DocumentStore,
    collection: Collection,
    id: &str,
) -> Result<(), ApiError> {
    match store.delete(collection, id) {
        Ok(()) | Err(PersistenceError::DocumentNotFound { .. }) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn trimmed(value: String) -> String {
    value.trim().to_string()
}

fn trimmed_opt(value: Option<String>) -> Option<String> {
    value.map(trimmed).filter(|v| !v.is_empty())
}

fn parse_activity_status(status: &str) -> Result<ActivityStatus, ApiError> {
    status.parse().map_err(translate_domain_error)
}

// ============================================================================
// Activities
// ============================================================================

/// Creates a new activity.
///
/// # Arguments
///
/// * `store` - The document store
/// * `request` - The activity fields
/// * `clock` - Source of the creation timestamp
///
/// # Returns
///
/// The generated id of the new activity.
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty or the price is negative
/// - The status is not a known activity status
/// - The write fails
pub fn create_activity(
    store: &mut dyn DocumentStore,
    request: CreateActivityRequest,
    clock: &dyn Clock,
) -> Result<CreatedResponse, ApiError> {
    let status: ActivityStatus = match request.status.as_deref() {
        Some(status) => parse_activity_status(status)?,
        None => ActivityStatus::default(),
    };

    let activity: Activity = Activity {
        id: String::new(),
        name: trimmed(request.name),
        activity_type: trimmed_opt(request.activity_type),
        location_name: trimmed_opt(request.location_name),
        description: request.description,
        image_url: request.image_url,
        price: request.price,
        status,
        activity_date: request.activity_date,
        created_at: Some(clock.now()),
    };
    validate_activity(&activity).map_err(translate_domain_error)?;

    let id: String = insert_record(store, &activity)?;
    info!(id, name = %activity.name, "Created activity");

    Ok(CreatedResponse {
        id,
        message: format!("Created activity '{}'", activity.name),
    })
}

/// Updates the fields of an existing activity.
///
/// Only the fields present in the request are written; everything else in
/// the stored document is left as it is.
///
/// # Errors
///
/// Returns an error if the activity does not exist, the updated activity
/// fails validation, or the write fails.
pub fn update_activity(
    store: &mut dyn DocumentStore,
    id: &str,
    request: UpdateActivityRequest,
    clock: &dyn Clock,
) -> Result<Activity, ApiError> {
    let mut activity: Activity = require_record(store, id, clock, "Activity")?;
    let mut patch: ActivityDocument = ActivityDocument::default();

    if let Some(name) = request.name {
        activity.name = trimmed(name);
        patch.name = Some(activity.name.clone());
    }
    if let Some(activity_type) = request.activity_type {
        activity.activity_type = trimmed_opt(Some(activity_type.clone()));
        patch.activity_type = Some(trimmed(activity_type));
    }
    if let Some(location_name) = request.location_name {
        activity.location_name = trimmed_opt(Some(location_name.clone()));
        patch.location_name = Some(trimmed(location_name));
    }
    if let Some(description) = request.description {
        activity.description = Some(description);
        patch.description.clone_from(&activity.description);
    }
    if let Some(image_url) = request.image_url {
        activity.image_url = Some(image_url);
        patch.image_url.clone_from(&activity.image_url);
    }
    if let Some(price) = request.price {
        activity.price = Some(price);
        patch.price = Some(price);
    }
    if let Some(status) = request.status {
        activity.status = parse_activity_status(&status)?;
        patch.status = Some(activity.status.as_str().to_string());
    }
    if let Some(activity_date) = request.activity_date {
        activity.activity_date = Some(activity_date);
        patch.activity_date = Some(RawTimestamp::from(activity_date));
    }
    validate_activity(&activity).map_err(translate_domain_error)?;

    let updated: Activity = update_record(store, id, &patch, clock)?;
    info!(id, "Updated activity");
    Ok(updated)
}

/// Returns one activity.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no activity has this id.
pub fn get_activity(
    store: &mut dyn DocumentStore,
    id: &str,
    clock: &dyn Clock,
) -> Result<Activity, ApiError> {
    require_record(store, id, clock, "Activity")
}

/// Lists activities in insertion order.
///
/// # Arguments
///
/// * `store` - The document store
/// * `filter` - Optional status and type filters; both must match
/// * `clock` - Used to normalize stored timestamps
///
/// # Errors
///
/// Returns an error if the status filter is unknown or the read fails.
pub fn list_activities(
    store: &mut dyn DocumentStore,
    filter: &ActivityFilter,
    clock: &dyn Clock,
) -> Result<Vec<Activity>, ApiError> {
    let status: Option<ActivityStatus> = filter
        .status
        .as_deref()
        .map(parse_activity_status)
        .transpose()?;

    let activities: Vec<Activity> = fetch_all::<Activity>(store, clock)?;
    Ok(activities
        .into_iter()
        .filter(|a| status.is_none_or(|s| a.status == s))
        .filter(|a| {
            filter
                .activity_type
                .as_deref()
                .is_none_or(|t| a.activity_type.as_deref() == Some(t))
        })
        .collect())
}

/// Deletes an activity together with its guide assignment.
///
/// Registrations and tracks that reference the activity are left as they
/// are; readers treat them as dangling.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no activity has this id, or an error if a
/// write fails.
pub fn delete_activity(store: &mut dyn DocumentStore, id: &str) -> Result<(), ApiError> {
    store.delete(Collection::Activities, id)?;
    delete_if_present(store, Collection::ActivityGuides, id)?;
    info!(id, "Deleted activity");
    Ok(())
}

// ============================================================================
// Activity types
// ============================================================================

/// Creates a new activity type.
///
/// # Errors
///
/// Returns an error if the name is empty or the write fails.
pub fn create_activity_type(
    store: &mut dyn DocumentStore,
    request: ActivityTypeRequest,
) -> Result<CreatedResponse, ApiError> {
    let activity_type: ActivityType = ActivityType {
        id: String::new(),
        name: trimmed(request.name.unwrap_or_default()),
        icon: request.icon.unwrap_or_default(),
        description: request.description.unwrap_or_default(),
    };
    validate_activity_type(&activity_type).map_err(translate_domain_error)?;

    let id: String = insert_record(store, &activity_type)?;
    info!(id, name = %activity_type.name, "Created activity type");

    Ok(CreatedResponse {
        id,
        message: format!("Created activity type '{}'", activity_type.name),
    })
}

/// Updates an activity type.
///
/// # Errors
///
/// Returns an error if the type does not exist, the name would become
/// empty, or the write fails.
pub fn update_activity_type(
    store: &mut dyn DocumentStore,
    id: &str,
    request: ActivityTypeRequest,
    clock: &dyn Clock,
) -> Result<ActivityType, ApiError> {
    let mut activity_type: ActivityType = require_record(store, id, clock, "ActivityType")?;
    if let Some(name) = &request.name {
        activity_type.name = trimmed(name.clone());
    }
    validate_activity_type(&activity_type).map_err(translate_domain_error)?;

    let patch: ActivityTypeDocument = ActivityTypeDocument {
        name: request.name.map(trimmed),
        icon: request.icon,
        description: request.description,
    };
    let updated: ActivityType = update_record(store, id, &patch, clock)?;
    info!(id, "Updated activity type");
    Ok(updated)
}

/// Lists every activity type.
///
/// # Errors
///
/// Returns an error if the read fails.
pub fn list_activity_types(
    store: &mut dyn DocumentStore,
    clock: &dyn Clock,
) -> Result<Vec<ActivityType>, ApiError> {
    Ok(fetch_all(store, clock)?)
}

/// Deletes an activity type. Activities keep their dangling type id.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no type has this id.
pub fn delete_activity_type(store: &mut dyn DocumentStore, id: &str) -> Result<(), ApiError> {
    store.delete(Collection::ActivityTypes, id)?;
    info!(id, "Deleted activity type");
    Ok(())
}

// ============================================================================
// Location categories
// ============================================================================

/// Creates a new location category.
///
/// # Errors
///
/// Returns an error if the name is empty or the write fails.
pub fn create_category(
    store: &mut dyn DocumentStore,
    request: CategoryRequest,
) -> Result<CreatedResponse, ApiError> {
    let category: LocationCategory = LocationCategory {
        id: String::new(),
        name: trimmed(request.name.unwrap_or_default()),
        description: request.description.unwrap_or_default(),
    };
    validate_category(&category).map_err(translate_domain_error)?;

    let id: String = insert_record(store, &category)?;
    info!(id, name = %category.name, "Created location category");

    Ok(CreatedResponse {
        id,
        message: format!("Created category '{}'", category.name),
    })
}

/// Updates a location category.
///
/// # Errors
///
/// Returns an error if the category does not exist, the name would become
/// empty, or the write fails.
pub fn update_category(
    store: &mut dyn DocumentStore,
    id: &str,
    request: CategoryRequest,
    clock: &dyn Clock,
) -> Result<LocationCategory, ApiError> {
    let mut category: LocationCategory = require_record(store, id, clock, "Category")?;
    if let Some(name) = &request.name {
        category.name = trimmed(name.clone());
    }
    validate_category(&category).map_err(translate_domain_error)?;

    let patch: CategoryDocument = CategoryDocument {
        name: request.name.map(trimmed),
        description: request.description,
    };
    let updated: LocationCategory = update_record(store, id, &patch, clock)?;
    info!(id, "Updated location category");
    Ok(updated)
}

/// Lists every location category.
///
/// # Errors
///
/// Returns an error if the read fails.
pub fn list_categories(
    store: &mut dyn DocumentStore,
    clock: &dyn Clock,
) -> Result<Vec<LocationCategory>, ApiError> {
    Ok(fetch_all(store, clock)?)
}

/// Deletes a location category.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no category has this id.
pub fn delete_category(store: &mut dyn DocumentStore, id: &str) -> Result<(), ApiError> {
    store.delete(Collection::Categories, id)?;
    info!(id, "Deleted location category");
    Ok(())
}

// ============================================================================
// Locations
// ============================================================================

/// Creates a new location.
///
/// # Errors
///
/// Returns an error if the name is empty, the coordinates are out of range,
/// or the write fails.
pub fn create_location(
    store: &mut dyn DocumentStore,
    request: LocationRequest,
) -> Result<CreatedResponse, ApiError> {
    let location: Location = Location {
        id: String::new(),
        name: trimmed(request.name.unwrap_or_default()),
        category: trimmed_opt(request.category),
        description: request.description,
        coordinates: Coordinates::from_parts(request.latitude, request.longitude),
    };
    validate_location(&location).map_err(translate_domain_error)?;

    let id: String = insert_record(store, &location)?;
    info!(id, name = %location.name, "Created location");

    Ok(CreatedResponse {
        id,
        message: format!("Created location '{}'", location.name),
    })
}

/// Updates a location.
///
/// A request carrying only one coordinate half combines it with the stored
/// other half.
///
/// # Errors
///
/// Returns an error if the location does not exist, the result fails
/// validation, or the write fails.
pub fn update_location(
    store: &mut dyn DocumentStore,
    id: &str,
    request: LocationRequest,
    clock: &dyn Clock,
) -> Result<Location, ApiError> {
    let mut location: Location = require_record(store, id, clock, "Location")?;
    if let Some(name) = &request.name {
        location.name = trimmed(name.clone());
    }
    if let Some(category) = &request.category {
        location.category = trimmed_opt(Some(category.clone()));
    }
    if let Some(description) = &request.description {
        location.description = Some(description.clone());
    }
    if request.latitude.is_some() || request.longitude.is_some() {
        location.coordinates = Coordinates::from_parts(
            request
                .latitude
                .or_else(|| location.coordinates.map(|c| c.latitude)),
            request
                .longitude
                .or_else(|| location.coordinates.map(|c| c.longitude)),
        );
    }
    validate_location(&location).map_err(translate_domain_error)?;

    let patch: LocationDocument = LocationDocument {
        name: request.name.map(trimmed),
        category: request.category.map(trimmed),
        description: request.description,
        latitude: request.latitude,
        longitude: request.longitude,
    };
    let updated: Location = update_record(store, id, &patch, clock)?;
    info!(id, "Updated location");
    Ok(updated)
}

/// Returns one location.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no location has this id.
pub fn get_location(
    store: &mut dyn DocumentStore,
    id: &str,
    clock: &dyn Clock,
) -> Result<Location, ApiError> {
    require_record(store, id, clock, "Location")
}

/// Lists every location.
///
/// # Errors
///
/// Returns an error if the read fails.
pub fn list_locations(
    store: &mut dyn DocumentStore,
    clock: &dyn Clock,
) -> Result<Vec<Location>, ApiError> {
    Ok(fetch_all(store, clock)?)
}

/// Deletes a location. Tracks keep the dangling stop id.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no location has this id.
pub fn delete_location(store: &mut dyn DocumentStore, id: &str) -> Result<(), ApiError> {
    store.delete(Collection::Locations, id)?;
    info!(id, "Deleted location");
    Ok(())
}

// ============================================================================
// Registrations
// ============================================================================

/// Registers a user for an activity.
///
/// # Arguments
///
/// * `store` - The document store
/// * `request` - The user and activity ids
/// * `clock` - Source of the registration timestamp
///
/// # Errors
///
/// Returns an error if:
/// - Either id is empty
/// - The activity does not exist
/// - The user is already registered for the activity
/// - The write fails
pub fn register_for_activity(
    store: &mut dyn DocumentStore,
    request: RegistrationRequest,
    clock: &dyn Clock,
) -> Result<CreatedResponse, ApiError> {
    let registration: Registration = Registration {
        id: String::new(),
        user_id: trimmed(request.user_id),
        activity_id: trimmed(request.activity_id),
        registered_at: Some(clock.now()),
    };
    validate_registration(&registration).map_err(translate_domain_error)?;

    let activity: Activity =
        require_record(store, &registration.activity_id, clock, "Activity")?;
    let existing: Vec<Registration> = fetch_all(store, clock)?;
    validate_registration_unique(&registration.user_id, &activity.id, &existing)
        .map_err(translate_domain_error)?;

    let id: String = insert_record(store, &registration)?;
    info!(
        id,
        user_id = %registration.user_id,
        activity_id = %registration.activity_id,
        "Registered user for activity"
    );

    Ok(CreatedResponse {
        id,
        message: format!("Registered for '{}'", activity.name),
    })
}

/// Lists registrations, optionally for one activity only.
///
/// # Errors
///
/// Returns an error if the read fails.
pub fn list_registrations(
    store: &mut dyn DocumentStore,
    activity_id: Option<&str>,
    clock: &dyn Clock,
) -> Result<Vec<Registration>, ApiError> {
    let registrations: Vec<Registration> = fetch_all(store, clock)?;
    Ok(registrations
        .into_iter()
        .filter(|r| activity_id.is_none_or(|id| r.activity_id == id))
        .collect())
}

/// Deletes a registration.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no registration has this id.
pub fn delete_registration(store: &mut dyn DocumentStore, id: &str) -> Result<(), ApiError> {
    store.delete(Collection::Registrations, id)?;
    info!(id, "Deleted registration");
    Ok(())
}
