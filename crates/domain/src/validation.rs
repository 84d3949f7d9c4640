// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::lookup::find_by_id;
use crate::types::{
    Activity, ActivityType, GuideRequestStatus, Location, LocationCategory, Registration,
    TourGuideRequest, Track, TrackStatus,
};

fn require(value: &str, field: &'static str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::EmptyField { field });
    }
    Ok(())
}

/// Validates an activity before it is written.
///
/// # Arguments
///
/// * `activity` - The activity to validate
///
/// # Errors
///
/// Returns an error if:
/// - The name is blank
/// - The price is negative or not a finite number
pub fn validate_activity(activity: &Activity) -> Result<(), DomainError> {
    require(&activity.name, "name")?;

    if let Some(price) = activity.price.filter(|p| !p.is_finite() || *p < 0.0) {
        return Err(DomainError::InvalidPrice(format!(
            "Price must be a non-negative number, got {price}"
        )));
    }

    Ok(())
}

/// Validates an activity type.
///
/// # Errors
///
/// Returns an error if the name is blank.
pub fn validate_activity_type(activity_type: &ActivityType) -> Result<(), DomainError> {
    require(&activity_type.name, "name")
}

/// Validates a location category.
///
/// # Errors
///
/// Returns an error if the name is blank.
pub fn validate_category(category: &LocationCategory) -> Result<(), DomainError> {
    require(&category.name, "name")
}

/// Validates a location.
///
/// Coordinates are optional, but when present both halves must lie in
/// range.
///
/// # Errors
///
/// Returns an error if:
/// - The name is blank
/// - The latitude is outside -90..=90 or the longitude outside -180..=180
pub fn validate_location(location: &Location) -> Result<(), DomainError> {
    require(&location.name, "name")?;

    if let Some(coordinates) = location.coordinates.filter(|c| !c.in_range()) {
        return Err(DomainError::InvalidCoordinates(format!(
            "({}, {}) is outside the valid range",
            coordinates.latitude, coordinates.longitude
        )));
    }

    Ok(())
}

/// Validates a tour guide application.
///
/// # Errors
///
/// Returns an error if the applicant's name is blank.
pub fn validate_guide_request(request: &TourGuideRequest) -> Result<(), DomainError> {
    require(&request.full_name, "fullName")
}

/// Validates a track.
///
/// # Errors
///
/// Returns an error if:
/// - The name is blank
/// - The duration is zero
pub fn validate_track(track: &Track) -> Result<(), DomainError> {
    require(&track.name, "name")?;

    if track.duration_minutes == 0 {
        return Err(DomainError::InvalidDuration(String::from(
            "Duration must be at least one minute",
        )));
    }

    Ok(())
}

/// Validates a registration's own fields.
///
/// This does NOT check that the activity exists or that the pair is new;
/// see [`validate_registration_unique`].
///
/// # Errors
///
/// Returns an error if the user id or activity id is blank.
pub fn validate_registration(registration: &Registration) -> Result<(), DomainError> {
    require(&registration.user_id, "userId")?;
    require(&registration.activity_id, "activityId")
}

/// Validates that a user is not already registered for an activity.
///
/// # Arguments
///
/// * `user_id` - The registering user
/// * `activity_id` - The activity being registered for
/// * `existing` - All current registrations
///
/// # Errors
///
/// Returns `DomainError::DuplicateRegistration` if the pair already exists.
pub fn validate_registration_unique(
    user_id: &str,
    activity_id: &str,
    existing: &[Registration],
) -> Result<(), DomainError> {
    if existing
        .iter()
        .any(|r| r.user_id == user_id && r.activity_id == activity_id)
    {
        return Err(DomainError::DuplicateRegistration {
            user_id: user_id.to_string(),
            activity_id: activity_id.to_string(),
        });
    }
    Ok(())
}

/// Validates that every guide id refers to an approved guide request.
///
/// Inactive guides may still be assigned; only the review state matters.
///
/// # Errors
///
/// Returns `DomainError::GuideNotApproved` for the first id that is unknown
/// or not approved.
pub fn validate_guides_approved(
    guide_ids: &[String],
    requests: &[TourGuideRequest],
) -> Result<(), DomainError> {
    for guide_id in guide_ids {
        let approved: bool = find_by_id(requests, guide_id)
            .is_some_and(|r| r.status == GuideRequestStatus::Approved);
        if !approved {
            return Err(DomainError::GuideNotApproved {
                guide_id: guide_id.clone(),
            });
        }
    }
    Ok(())
}

/// Validates a review decision on a guide request.
///
/// # Errors
///
/// Returns `DomainError::InvalidGuideTransition` if the move is not allowed.
pub fn validate_guide_transition(
    from: GuideRequestStatus,
    to: GuideRequestStatus,
) -> Result<(), DomainError> {
    if from.can_transition_to(to) {
        return Ok(());
    }
    Err(DomainError::InvalidGuideTransition {
        from: from.to_string(),
        to: to.to_string(),
    })
}

/// Validates a track status change.
///
/// # Errors
///
/// Returns `DomainError::InvalidTrackTransition` if the move is not allowed.
pub fn validate_track_transition(from: TrackStatus, to: TrackStatus) -> Result<(), DomainError> {
    if from.can_transition_to(to) {
        return Ok(());
    }
    Err(DomainError::InvalidTrackTransition {
        from: from.to_string(),
        to: to.to_string(),
    })
}
