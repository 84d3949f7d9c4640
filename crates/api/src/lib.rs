// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for Tourdesk.
//!
//! Every operation takes the document store as `&mut dyn DocumentStore`
//! and, where it stamps or normalizes timestamps, a `&dyn Clock`. Domain
//! and persistence errors are translated into [`ApiError`] here so the
//! server never sees them directly.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod dashboard;
mod error;
mod guides;
mod handlers;
mod request_response;
mod tracks;

#[cfg(test)]
mod tests;

pub use dashboard::{
    DashboardData, fetch_dashboard_data, list_map_markers, load_calendar,
    load_dashboard_statistics,
};
pub use error::{ApiError, FETCH_FAILED_MESSAGE, not_found, translate_domain_error};
pub use guides::{
    assign_activity_guides, delete_guide_request, get_activity_guides, list_approved_guides,
    list_guide_requests, review_guide_request, set_guide_active, submit_guide_request,
};
pub use handlers::{
    create_activity, create_activity_type, create_category, create_location, delete_activity,
    delete_activity_type, delete_category, delete_location, delete_registration, get_activity,
    get_location, list_activities, list_activity_types, list_categories, list_locations,
    list_registrations, register_for_activity, update_activity, update_activity_type,
    update_category, update_location,
};
pub use request_response::{
    ActivityFilter, ActivityGuidesResponse, ActivityTypeRequest, AssignGuidesRequest,
    CalendarQuery, CategoryRequest, CreateActivityRequest, CreatedResponse,
    GuideApplicationRequest, LocationRequest, MapMarkersResponse, RegistrationRequest,
    SetGuideActiveRequest, StatusChangeRequest, TrackRequest, UpdateActivityRequest,
};
pub use tracks::{
    create_track, delete_track, get_track_details, list_tracks, transition_track_status,
    update_track,
};
