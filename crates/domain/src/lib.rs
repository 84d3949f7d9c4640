// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod calendar;
mod error;
mod grouping;
mod lookup;
mod map;
mod ranking;
mod ratios;
mod statistics;
mod timestamp;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use calendar::{
    CalendarDay, CalendarEntry, CalendarEntryKind, MonthCalendar, build_month_calendar,
    parse_timezone,
};
pub use error::DomainError;
pub use grouping::{
    CountBucket, MONTH_LABELS, PriceBucket, assigned_users_per_activity, count_by,
    group_by_location, group_by_month, group_by_price_bucket, group_by_type,
    registrations_per_activity,
};
pub use lookup::{
    Identified, Resolved, TrackDetails, approved_guides, find_by_id, resolve_ids, resolve_track,
};
pub use map::{MapMarker, MapView, map_markers};
pub use ranking::{rank_by, rank_by_count};
pub use ratios::{
    NOT_APPLICABLE, average_price, format_percentage, percentage, round_to, safe_ratio,
};
pub use statistics::{
    DashboardStatistics, StatisticsInput, TOP_ACTIVITIES, TOP_LOCATIONS, TopActivity,
    compute_statistics,
};
pub use timestamp::{Clock, FixedClock, RawTimestamp, SystemClock, normalize_or, normalize_present};

// Re-export public types
pub use types::{
    Activity, ActivityGuide, ActivityStatus, ActivityType, ActivityUsers, Coordinates,
    GuideRequestStatus, Location, LocationCategory, Registration, TourGuideRequest, Track,
    TrackStatus, UserProfile, name_or_placeholder,
};
pub use validation::{
    validate_activity, validate_activity_type, validate_category, validate_guide_request,
    validate_guide_transition, validate_guides_approved, validate_location, validate_registration,
    validate_registration_unique, validate_track, validate_track_transition,
};

/// Re-exported so callers can name timezones without depending on chrono-tz.
pub use chrono_tz::Tz;
