// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::timestamp::Clock;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Returns the stored name, or a placeholder such as `"Unnamed activity"`.
///
/// Blank names count as missing.
#[must_use]
pub fn name_or_placeholder(name: Option<String>, kind: &str) -> String {
    match name {
        Some(name) if !name.trim().is_empty() => name,
        _ => format!("Unnamed {kind}"),
    }
}

/// Publication state of an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    /// Bookable and listed.
    #[default]
    Active,
    /// Hidden from listings.
    Inactive,
    /// Announced but not yet bookable.
    ComingSoon,
}

impl FromStr for ActivityStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "coming_soon" => Ok(Self::ComingSoon),
            _ => Err(DomainError::InvalidActivityStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ActivityStatus {
    /// Converts this status to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::ComingSoon => "coming_soon",
        }
    }
}

/// Review state of a tour guide application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GuideRequestStatus {
    /// Submitted, awaiting review.
    #[default]
    Pending,
    /// Accepted; the request now doubles as the guide profile.
    Approved,
    /// Declined.
    Rejected,
}

impl FromStr for GuideRequestStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidGuideStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for GuideRequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl GuideRequestStatus {
    /// Converts this status to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Checks if a review may move a request from this state to `target`.
    ///
    /// Valid transitions are:
    /// - Pending → Approved
    /// - Pending → Rejected
    /// - Approved → Rejected
    /// - Rejected → Approved
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Approved | Self::Rejected)
                | (Self::Approved, Self::Rejected)
                | (Self::Rejected, Self::Approved)
        )
    }
}

/// Progress of a scheduled track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TrackStatus {
    /// Scheduled, not started.
    #[default]
    Pending,
    /// Currently running.
    Ongoing,
    /// Finished.
    Completed,
    /// Called off.
    Cancelled,
}

impl FromStr for TrackStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "ongoing" => Ok(Self::Ongoing),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidTrackStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for TrackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TrackStatus {
    /// Converts this status to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Checks if a track may move from this state to `target`.
    ///
    /// Valid transitions are:
    /// - Pending → Ongoing
    /// - Pending → Cancelled
    /// - Ongoing → Completed
    /// - Ongoing → Cancelled
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Ongoing | Self::Cancelled)
                | (Self::Ongoing, Self::Completed | Self::Cancelled)
        )
    }

    /// Returns whether no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// A bookable tourism offering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Document id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Id of the `ActivityType` this activity belongs to.
    pub activity_type: Option<String>,
    /// Free-text location field. Not a foreign key.
    pub location_name: Option<String>,
    /// Long description.
    pub description: Option<String>,
    /// URL of the cover image in the blob store.
    pub image_url: Option<String>,
    /// Price, never negative when present.
    pub price: Option<f64>,
    /// Publication state.
    pub status: ActivityStatus,
    /// When the activity takes place.
    pub activity_date: Option<DateTime<Utc>>,
    /// When the document was created.
    pub created_at: Option<DateTime<Utc>>,
}

impl Activity {
    /// Returns the instant used to place this activity in time.
    ///
    /// Falls back to the creation time, then to the clock's current instant.
    #[must_use]
    pub fn scheduled_at(&self, clock: &dyn Clock) -> DateTime<Utc> {
        self.activity_date
            .or(self.created_at)
            .unwrap_or_else(|| clock.now())
    }

    /// Returns whether the activity is published.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == ActivityStatus::Active
    }
}

/// A category of activities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityType {
    /// Document id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-text icon identifier.
    pub icon: String,
    /// Long description.
    pub description: String,
}

/// A category of locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationCategory {
    /// Document id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Long description.
    pub description: String,
}

/// A latitude/longitude pair. Only constructed when both halves are known.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Degrees north.
    pub latitude: f64,
    /// Degrees east.
    pub longitude: f64,
}

impl Coordinates {
    /// Builds coordinates from two optional halves.
    ///
    /// Partial or non-finite coordinates are treated as absent.
    #[must_use]
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) if latitude.is_finite() && longitude.is_finite() => {
                Some(Self {
                    latitude,
                    longitude,
                })
            }
            _ => None,
        }
    }

    /// Returns whether both halves lie in their valid ranges.
    #[must_use]
    pub fn in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// A point of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Document id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Id of the `LocationCategory`.
    pub category: Option<String>,
    /// Long description.
    pub description: Option<String>,
    /// Map position, when complete.
    pub coordinates: Option<Coordinates>,
}

/// A user's sign-up for an activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    /// Document id.
    pub id: String,
    /// The registering user.
    pub user_id: String,
    /// The activity registered for.
    pub activity_id: String,
    /// When the registration was made.
    pub registered_at: Option<DateTime<Utc>>,
}

/// A platform user, as far as the dashboard needs to know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Document id.
    pub id: String,
    /// Display name.
    pub display_name: String,
    /// Contact email.
    pub email: Option<String>,
    /// When the account was created.
    pub created_at: Option<DateTime<Utc>>,
}

/// Precomputed list of users assigned to an activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityUsers {
    /// The activity id (also the document id).
    pub activity_id: String,
    /// Assigned users.
    pub user_ids: Vec<String>,
}

/// A tour guide application, and the guide profile once approved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourGuideRequest {
    /// Document id.
    pub id: String,
    /// Applicant's full name.
    pub full_name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Regions the guide covers.
    pub regions: Vec<String>,
    /// Languages the guide speaks.
    pub languages: Vec<String>,
    /// Review state.
    pub status: GuideRequestStatus,
    /// Whether the guide is currently taking tours.
    pub active: bool,
    /// When the application was submitted.
    pub submitted_at: Option<DateTime<Utc>>,
}

impl TourGuideRequest {
    /// Returns whether this request is an approved, active guide.
    #[must_use]
    pub fn is_available_guide(&self) -> bool {
        self.status == GuideRequestStatus::Approved && self.active
    }
}

/// A scheduled guided route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Document id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Stops, in visiting order.
    pub location_ids: Vec<String>,
    /// Activities included in the route.
    pub activity_ids: Vec<String>,
    /// The guide leading the track.
    pub tour_guide_id: Option<String>,
    /// Departure.
    pub start_time: Option<DateTime<Utc>>,
    /// Length in minutes.
    pub duration_minutes: u32,
    /// Progress.
    pub status: TrackStatus,
}

impl Track {
    /// Returns the scheduled end of the track.
    ///
    /// `None` without a start time, or when the end falls outside the
    /// representable range.
    #[must_use]
    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.start_time.and_then(|start| {
            start.checked_add_signed(Duration::minutes(i64::from(self.duration_minutes)))
        })
    }
}

/// Guides assigned to an activity. Keyed by activity id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityGuide {
    /// The activity id (also the document id).
    pub activity_id: String,
    /// Assigned guide request ids.
    pub guide_ids: Vec<String>,
}
