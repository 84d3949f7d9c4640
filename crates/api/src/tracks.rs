// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Track handlers.

use tourdesk_domain::{
    Activity, Clock, Location, RawTimestamp, TourGuideRequest, Track, TrackDetails, TrackStatus,
    resolve_track, validate_guides_approved, validate_track, validate_track_transition,
};
use tourdesk_persistence::{
    Collection, DEFAULT_TRACK_MINUTES, DocumentStore, TrackDocument, fetch_all, insert_record,
    update_record,
};
use tracing::info;

use crate::error::{ApiError, translate_domain_error};
use crate::handlers::require_record;
use crate::request_response::{CreatedResponse, StatusChangeRequest, TrackRequest};

fn parse_track_status(status: &str) -> Result<TrackStatus, ApiError> {
    status.parse().map_err(translate_domain_error)
}

/// Checks that a track's guide, if any, is an approved guide.
fn check_guide(
    store: &mut dyn DocumentStore,
    track: &Track,
    clock: &dyn Clock,
) -> Result<(), ApiError> {
    let Some(guide_id) = track.tour_guide_id.clone() else {
        return Ok(());
    };
    let requests: Vec<TourGuideRequest> = fetch_all(store, clock)?;
    validate_guides_approved(&[guide_id], &requests).map_err(translate_domain_error)
}

/// Creates a new pending track.
///
/// # Arguments
///
/// * `store` - The document store
/// * `request` - The track fields; the duration defaults to one hour
/// * `clock` - Used to normalize stored timestamps
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty or the duration is zero
/// - The guide is not an approved guide
/// - The write fails
pub fn create_track(
    store: &mut dyn DocumentStore,
    request: TrackRequest,
    clock: &dyn Clock,
) -> Result<CreatedResponse, ApiError> {
    let track: Track = Track {
        id: String::new(),
        name: request.name.unwrap_or_default().trim().to_string(),
        location_ids: request.location_ids.unwrap_or_default(),
        activity_ids: request.activity_ids.unwrap_or_default(),
        tour_guide_id: request.tour_guide_id.filter(|id| !id.trim().is_empty()),
        start_time: request.start_time,
        duration_minutes: request.duration_minutes.unwrap_or(DEFAULT_TRACK_MINUTES),
        status: TrackStatus::Pending,
    };
    validate_track(&track).map_err(translate_domain_error)?;
    check_guide(store, &track, clock)?;

    let id: String = insert_record(store, &track)?;
    info!(id, name = %track.name, "Created track");

    Ok(CreatedResponse {
        id,
        message: format!("Created track '{}'", track.name),
    })
}

/// Updates a track that has not finished.
///
/// Status changes go through [`transition_track_status`].
///
/// # Errors
///
/// Returns an error if the track does not exist, is completed or cancelled,
/// fails validation, or the write fails.
pub fn update_track(
    store: &mut dyn DocumentStore,
    id: &str,
    request: TrackRequest,
    clock: &dyn Clock,
) -> Result<Track, ApiError> {
    let mut track: Track = require_record(store, id, clock, "Track")?;
    if track.status.is_terminal() {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("track_closed"),
            message: format!("Track '{id}' is {} and can no longer change", track.status),
        });
    }

    let mut patch: TrackDocument = TrackDocument::default();
    if let Some(name) = request.name {
        track.name = name.trim().to_string();
        patch.name = Some(track.name.clone());
    }
    if let Some(location_ids) = request.location_ids {
        track.location_ids.clone_from(&location_ids);
        patch.location_ids = Some(location_ids);
    }
    if let Some(activity_ids) = request.activity_ids {
        track.activity_ids.clone_from(&activity_ids);
        patch.activity_ids = Some(activity_ids);
    }
    if let Some(tour_guide_id) = request.tour_guide_id {
        let tour_guide_id: String = tour_guide_id.trim().to_string();
        track.tour_guide_id = Some(tour_guide_id.clone()).filter(|id| !id.is_empty());
        patch.tour_guide_id = Some(tour_guide_id);
    }
    if let Some(start_time) = request.start_time {
        track.start_time = Some(start_time);
        patch.start_time = Some(RawTimestamp::from(start_time));
    }
    if let Some(duration_minutes) = request.duration_minutes {
        track.duration_minutes = duration_minutes;
        patch.duration_minutes = Some(duration_minutes);
    }
    validate_track(&track).map_err(translate_domain_error)?;
    check_guide(store, &track, clock)?;

    let updated: Track = update_record(store, id, &patch, clock)?;
    info!(id, "Updated track");
    Ok(updated)
}

/// Returns a track with its locations, activities and guide resolved.
///
/// # Errors
///
/// Returns an error if the track does not exist or a read fails.
pub fn get_track_details(
    store: &mut dyn DocumentStore,
    id: &str,
    clock: &dyn Clock,
) -> Result<TrackDetails, ApiError> {
    let track: Track = require_record(store, id, clock, "Track")?;
    let locations: Vec<Location> = fetch_all(store, clock)?;
    let activities: Vec<Activity> = fetch_all(store, clock)?;
    let guides: Vec<TourGuideRequest> = fetch_all(store, clock)?;

    Ok(resolve_track(track, &locations, &activities, &guides))
}

/// Lists tracks, optionally only those in one status.
///
/// # Errors
///
/// Returns an error if the status filter is unknown or the read fails.
pub fn list_tracks(
    store: &mut dyn DocumentStore,
    status: Option<&str>,
    clock: &dyn Clock,
) -> Result<Vec<Track>, ApiError> {
    let status: Option<TrackStatus> = status.map(parse_track_status).transpose()?;
    let tracks: Vec<Track> = fetch_all(store, clock)?;
    Ok(tracks
        .into_iter()
        .filter(|t| status.is_none_or(|s| t.status == s))
        .collect())
}

/// Moves a track to a new status.
///
/// # Errors
///
/// Returns an error if the track does not exist, the status is unknown, the
/// transition is not allowed, or the write fails.
pub fn transition_track_status(
    store: &mut dyn DocumentStore,
    id: &str,
    request: &StatusChangeRequest,
    clock: &dyn Clock,
) -> Result<Track, ApiError> {
    let target: TrackStatus = parse_track_status(&request.status)?;
    let track: Track = require_record(store, id, clock, "Track")?;

    validate_track_transition(track.status, target).map_err(translate_domain_error)?;

    let patch: TrackDocument = TrackDocument {
        status: Some(target.as_str().to_string()),
        ..TrackDocument::default()
    };
    let updated: Track = update_record(store, id, &patch, clock)?;
    info!(id, from = %track.status, to = %target, "Changed track status");
    Ok(updated)
}

/// Deletes a track.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no track has this id.
pub fn delete_track(store: &mut dyn DocumentStore, id: &str) -> Result<(), ApiError> {
    store.delete(Collection::Tracks, id)?;
    info!(id, "Deleted track");
    Ok(())
}
