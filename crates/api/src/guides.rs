// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tour guide applications and guide assignment.
//!
//! An approved `TourGuideRequest` doubles as the guide's profile; there is
//! no separate guide collection.

use tourdesk_domain::{
    Activity, ActivityGuide, Clock, DomainError, GuideRequestStatus, TourGuideRequest,
    approved_guides, resolve_ids, validate_guide_request, validate_guide_transition,
    validate_guides_approved,
};
use tourdesk_persistence::{
    Collection, DocumentStore, GuideRequestDocument, fetch_all, fetch_one, insert_record,
    replace_record, update_record,
};
use tracing::info;

use crate::error::{ApiError, translate_domain_error};
use crate::handlers::require_record;
use crate::request_response::{
    ActivityGuidesResponse, AssignGuidesRequest, CreatedResponse, GuideApplicationRequest,
    StatusChangeRequest,
};

fn parse_guide_status(status: &str) -> Result<GuideRequestStatus, ApiError> {
    status.parse().map_err(translate_domain_error)
}

/// Submits a tour guide application.
///
/// New applications are pending and active.
///
/// # Errors
///
/// Returns an error if the full name is empty or the write fails.
pub fn submit_guide_request(
    store: &mut dyn DocumentStore,
    request: GuideApplicationRequest,
    clock: &dyn Clock,
) -> Result<CreatedResponse, ApiError> {
    let application: TourGuideRequest = TourGuideRequest {
        id: String::new(),
        full_name: request.full_name.trim().to_string(),
        email: request.email,
        phone: request.phone,
        regions: request.regions,
        languages: request.languages,
        status: GuideRequestStatus::Pending,
        active: true,
        submitted_at: Some(clock.now()),
    };
    validate_guide_request(&application).map_err(translate_domain_error)?;

    let id: String = insert_record(store, &application)?;
    info!(id, full_name = %application.full_name, "Received tour guide application");

    Ok(CreatedResponse {
        id,
        message: format!("Application from '{}' received", application.full_name),
    })
}

/// Lists guide applications, optionally only those in one review state.
///
/// # Errors
///
/// Returns an error if the status filter is unknown or the read fails.
pub fn list_guide_requests(
    store: &mut dyn DocumentStore,
    status: Option<&str>,
    clock: &dyn Clock,
) -> Result<Vec<TourGuideRequest>, ApiError> {
    let status: Option<GuideRequestStatus> = status.map(parse_guide_status).transpose()?;
    let requests: Vec<TourGuideRequest> = fetch_all(store, clock)?;
    Ok(requests
        .into_iter()
        .filter(|r| status.is_none_or(|s| r.status == s))
        .collect())
}

/// Approves or rejects a guide application.
///
/// # Arguments
///
/// * `store` - The document store
/// * `id` - The application id
/// * `request` - The target review state
/// * `clock` - Used to normalize stored timestamps
///
/// # Returns
///
/// The application after the review.
///
/// # Errors
///
/// Returns an error if:
/// - The application does not exist
/// - The target status is unknown
/// - The transition is not allowed (nothing returns to pending)
/// - The write fails
pub fn review_guide_request(
    store: &mut dyn DocumentStore,
    id: &str,
    request: &StatusChangeRequest,
    clock: &dyn Clock,
) -> Result<TourGuideRequest, ApiError> {
    let target: GuideRequestStatus = parse_guide_status(&request.status)?;
    let application: TourGuideRequest = require_record(store, id, clock, "TourGuideRequest")?;

    validate_guide_transition(application.status, target).map_err(translate_domain_error)?;

    let patch: GuideRequestDocument = GuideRequestDocument {
        status: Some(target.as_str().to_string()),
        ..GuideRequestDocument::default()
    };
    let reviewed: TourGuideRequest = update_record(store, id, &patch, clock)?;
    info!(id, from = %application.status, to = %target, "Reviewed tour guide application");
    Ok(reviewed)
}

/// Marks an approved guide as taking or not taking tours.
///
/// # Errors
///
/// Returns an error if the application does not exist, is not approved, or
/// the write fails.
pub fn set_guide_active(
    store: &mut dyn DocumentStore,
    id: &str,
    active: bool,
    clock: &dyn Clock,
) -> Result<TourGuideRequest, ApiError> {
    let guide: TourGuideRequest = require_record(store, id, clock, "TourGuideRequest")?;
    if guide.status != GuideRequestStatus::Approved {
        return Err(translate_domain_error(DomainError::GuideNotApproved {
            guide_id: guide.id,
        }));
    }

    let patch: GuideRequestDocument = GuideRequestDocument {
        active: Some(active),
        ..GuideRequestDocument::default()
    };
    let updated: TourGuideRequest = update_record(store, id, &patch, clock)?;
    info!(id, active, "Changed guide availability");
    Ok(updated)
}

/// Deletes a guide application.
///
/// Activity assignments and tracks keep the dangling id.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no application has this id.
pub fn delete_guide_request(store: &mut dyn DocumentStore, id: &str) -> Result<(), ApiError> {
    store.delete(Collection::TourGuideRequests, id)?;
    info!(id, "Deleted tour guide application");
    Ok(())
}

/// Lists guides that are approved and currently active.
///
/// # Errors
///
/// Returns an error if the read fails.
pub fn list_approved_guides(
    store: &mut dyn DocumentStore,
    clock: &dyn Clock,
) -> Result<Vec<TourGuideRequest>, ApiError> {
    let requests: Vec<TourGuideRequest> = fetch_all(store, clock)?;
    Ok(approved_guides(&requests).into_iter().cloned().collect())
}

/// Replaces the guides assigned to an activity.
///
/// Duplicate ids are collapsed, keeping the first occurrence.
///
/// # Errors
///
/// Returns an error if:
/// - The activity does not exist
/// - Any id is not an approved guide
/// - The write fails
pub fn assign_activity_guides(
    store: &mut dyn DocumentStore,
    activity_id: &str,
    request: AssignGuidesRequest,
    clock: &dyn Clock,
) -> Result<ActivityGuidesResponse, ApiError> {
    require_record::<Activity>(store, activity_id, clock, "Activity")?;
    let requests: Vec<TourGuideRequest> = fetch_all(store, clock)?;

    let mut guide_ids: Vec<String> = Vec::with_capacity(request.guide_ids.len());
    for guide_id in request.guide_ids {
        if !guide_ids.contains(&guide_id) {
            guide_ids.push(guide_id);
        }
    }
    validate_guides_approved(&guide_ids, &requests).map_err(translate_domain_error)?;

    let assignment: ActivityGuide = ActivityGuide {
        activity_id: activity_id.to_string(),
        guide_ids,
    };
    replace_record(store, &assignment)?;
    info!(
        activity_id,
        guides = assignment.guide_ids.len(),
        "Assigned guides to activity"
    );

    Ok(guides_response(assignment, &requests))
}

/// Returns the guides assigned to an activity.
///
/// Assigned ids whose application was deleted are reported separately.
///
/// # Errors
///
/// Returns an error if the activity does not exist or a read fails.
pub fn get_activity_guides(
    store: &mut dyn DocumentStore,
    activity_id: &str,
    clock: &dyn Clock,
) -> Result<ActivityGuidesResponse, ApiError> {
    require_record::<Activity>(store, activity_id, clock, "Activity")?;
    let assignment: ActivityGuide = fetch_one::<ActivityGuide>(store, activity_id, clock)?
        .unwrap_or_else(|| ActivityGuide {
            activity_id: activity_id.to_string(),
            guide_ids: Vec::new(),
        });
    let requests: Vec<TourGuideRequest> = fetch_all(store, clock)?;

    Ok(guides_response(assignment, &requests))
}

fn guides_response(
    assignment: ActivityGuide,
    requests: &[TourGuideRequest],
) -> ActivityGuidesResponse {
    let resolved = resolve_ids(requests, &assignment.guide_ids);
    ActivityGuidesResponse {
        activity_id: assignment.activity_id,
        guides: resolved.found,
        missing_guide_ids: resolved.missing,
    }
}
