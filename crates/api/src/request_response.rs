// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response data transfer objects.
//!
//! Update requests carry every field as optional; absent fields keep their
//! stored value.

use chrono::{DateTime, Utc};
use tourdesk_domain::{MapMarker, MapView, TourGuideRequest};

/// API request to create an activity.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CreateActivityRequest {
    /// Display name.
    pub name: String,
    /// Activity type id.
    #[serde(default)]
    pub activity_type: Option<String>,
    /// Free-text location.
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    /// Publication state; `active` when omitted.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub activity_date: Option<DateTime<Utc>>,
}

/// API request to update an activity.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UpdateActivityRequest {
    pub name: Option<String>,
    pub activity_type: Option<String>,
    pub location_name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<f64>,
    pub status: Option<String>,
    pub activity_date: Option<DateTime<Utc>>,
}

/// Filters for listing activities.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ActivityFilter {
    /// Only activities with this status.
    pub status: Option<String>,
    /// Only activities of this type id.
    pub activity_type: Option<String>,
}

/// API request to create or update an activity type.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ActivityTypeRequest {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub description: Option<String>,
}

/// API request to create or update a location category.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// API request to create or update a location.
///
/// Coordinates are only stored when both halves are known.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LocationRequest {
    pub name: Option<String>,
    /// Location category id.
    pub category: Option<String>,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// API request to apply as a tour guide.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct GuideApplicationRequest {
    /// Applicant's full name.
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
}

/// API request carrying a target status.
///
/// Used for guide reviews and track transitions.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct StatusChangeRequest {
    pub status: String,
}

/// API request to toggle whether an approved guide takes tours.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct SetGuideActiveRequest {
    pub active: bool,
}

/// API request to set the guides of an activity.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct AssignGuidesRequest {
    /// Guide request ids, replacing the current assignment.
    pub guide_ids: Vec<String>,
}

/// API request to create or update a track.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrackRequest {
    pub name: Option<String>,
    pub location_ids: Option<Vec<String>>,
    pub activity_ids: Option<Vec<String>>,
    pub tour_guide_id: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub duration_minutes: Option<u32>,
}

/// API request to register a user for an activity.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct RegistrationRequest {
    pub user_id: String,
    pub activity_id: String,
}

/// Calendar query parameters.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CalendarQuery {
    pub year: i32,
    /// Month number, 1 to 12.
    pub month: u32,
    /// IANA timezone; the server default when omitted.
    #[serde(default)]
    pub timezone: Option<String>,
}

/// API response for a newly created document.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreatedResponse {
    /// The generated document id.
    pub id: String,
    /// A success message.
    pub message: String,
}

/// API response describing the guides of an activity.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ActivityGuidesResponse {
    pub activity_id: String,
    /// Guides that still exist, in assignment order.
    pub guides: Vec<TourGuideRequest>,
    /// Assigned ids that no longer resolve to a guide request.
    pub missing_guide_ids: Vec<String>,
}

/// API response for the map page.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MapMarkersResponse {
    pub markers: Vec<MapMarker>,
    /// `None` when no location has coordinates.
    pub view: Option<MapView>,
}
