// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required text field is empty.
    EmptyField {
        /// The field that was empty.
        field: &'static str,
    },
    /// A price is negative or not a finite number.
    InvalidPrice(String),
    /// Latitude or longitude is out of range.
    InvalidCoordinates(String),
    /// A track duration is zero.
    InvalidDuration(String),
    /// An activity status string is not recognized.
    InvalidActivityStatus(String),
    /// A guide request status string is not recognized.
    InvalidGuideStatus(String),
    /// A track status string is not recognized.
    InvalidTrackStatus(String),
    /// A guide request cannot move between the given states.
    InvalidGuideTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
    },
    /// A track cannot move between the given states.
    InvalidTrackTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
    },
    /// The timezone name is not a known IANA zone.
    InvalidTimezone(String),
    /// The calendar month is out of range.
    InvalidMonth {
        /// The requested year.
        year: i32,
        /// The requested month (1-based).
        month: u32,
    },
    /// The user is already registered for the activity.
    DuplicateRegistration {
        /// The user id.
        user_id: String,
        /// The activity id.
        activity_id: String,
    },
    /// A guide assigned to an activity is not an approved guide.
    GuideNotApproved {
        /// The guide request id.
        guide_id: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField { field } => write!(f, "Field '{field}' cannot be empty"),
            Self::InvalidPrice(msg) => write!(f, "Invalid price: {msg}"),
            Self::InvalidCoordinates(msg) => write!(f, "Invalid coordinates: {msg}"),
            Self::InvalidDuration(msg) => write!(f, "Invalid duration: {msg}"),
            Self::InvalidActivityStatus(s) => write!(f, "Invalid activity status: {s}"),
            Self::InvalidGuideStatus(s) => write!(f, "Invalid guide request status: {s}"),
            Self::InvalidTrackStatus(s) => write!(f, "Invalid track status: {s}"),
            Self::InvalidGuideTransition { from, to } => {
                write!(f, "Guide request cannot move from {from} to {to}")
            }
            Self::InvalidTrackTransition { from, to } => {
                write!(f, "Track cannot move from {from} to {to}")
            }
            Self::InvalidTimezone(tz) => write!(f, "Unknown timezone '{tz}'"),
            Self::InvalidMonth { year, month } => {
                write!(f, "Invalid calendar month {year}-{month:02}")
            }
            Self::DuplicateRegistration {
                user_id,
                activity_id,
            } => {
                write!(
                    f,
                    "User '{user_id}' is already registered for activity '{activity_id}'"
                )
            }
            Self::GuideNotApproved { guide_id } => {
                write!(f, "Guide '{guide_id}' is not an approved tour guide")
            }
        }
    }
}

impl std::error::Error for DomainError {}
