// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use tourdesk_domain::DomainError;
use tourdesk_persistence::PersistenceError;

/// Message reported for every failed collection fetch.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to load data, please try again later";

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent the
/// API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// Loading the collections behind a view failed.
    ///
    /// Carries no detail; the cause is logged where it happens.
    FetchFailed,
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::FetchFailed => write!(f, "{FETCH_FAILED_MESSAGE}"),
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::DocumentNotFound { collection, id } => Self::ResourceNotFound {
                resource_type: collection,
                message: format!("No document with id '{id}'"),
            },
            other => Self::Internal {
                message: other.to_string(),
            },
        }
    }
}

/// Builds a not-found error for a resource id.
#[must_use]
pub fn not_found(resource_type: &str, id: &str) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: resource_type.to_string(),
        message: format!("No {} with id '{id}'", resource_type.to_lowercase()),
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::EmptyField { field } => ApiError::InvalidInput {
            field: field.to_string(),
            message: String::from("cannot be empty"),
        },
        DomainError::InvalidPrice(msg) => ApiError::InvalidInput {
            field: String::from("price"),
            message: msg,
        },
        DomainError::InvalidCoordinates(msg) => ApiError::InvalidInput {
            field: String::from("coordinates"),
            message: msg,
        },
        DomainError::InvalidDuration(msg) => ApiError::InvalidInput {
            field: String::from("durationMinutes"),
            message: msg,
        },
        DomainError::InvalidActivityStatus(status)
        | DomainError::InvalidGuideStatus(status)
        | DomainError::InvalidTrackStatus(status) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown status '{status}'"),
        },
        err @ DomainError::InvalidGuideTransition { .. } => ApiError::DomainRuleViolation {
            rule: String::from("guide_review_transition"),
            message: err.to_string(),
        },
        err @ DomainError::InvalidTrackTransition { .. } => ApiError::DomainRuleViolation {
            rule: String::from("track_status_transition"),
            message: err.to_string(),
        },
        DomainError::InvalidTimezone(tz) => ApiError::InvalidInput {
            field: String::from("timezone"),
            message: format!("Unknown timezone '{tz}'"),
        },
        err @ DomainError::InvalidMonth { .. } => ApiError::InvalidInput {
            field: String::from("month"),
            message: err.to_string(),
        },
        err @ DomainError::DuplicateRegistration { .. } => ApiError::DomainRuleViolation {
            rule: String::from("unique_registration"),
            message: err.to_string(),
        },
        err @ DomainError::GuideNotApproved { .. } => ApiError::DomainRuleViolation {
            rule: String::from("approved_guides_only"),
            message: err.to_string(),
        },
    }
}
