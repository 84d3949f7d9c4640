// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only views: dashboard statistics, the month calendar and map markers.
//!
//! Each view fetches every collection it needs before computing anything.
//! If any fetch fails the view fails as a whole with
//! [`ApiError::FetchFailed`]; there are no partial results and no retries.

use tourdesk_domain::{
    Activity, ActivityType, ActivityUsers, Clock, DashboardStatistics, Location,
    LocationCategory, MapMarker, MapView, MonthCalendar, Registration, StatisticsInput, Track,
    UserProfile, build_month_calendar, compute_statistics, map_markers, parse_timezone,
};
use tourdesk_persistence::{DocumentStore, Record, fetch_all};
use tracing::error;

use crate::error::{ApiError, translate_domain_error};
use crate::request_response::MapMarkersResponse;

fn fetch_for_view<R: Record>(
    store: &mut dyn DocumentStore,
    clock: &dyn Clock,
    view: &'static str,
) -> Result<Vec<R>, ApiError> {
    let backend: &'static str = store.backend_name();
    fetch_all::<R>(store, clock).map_err(|e| {
        error!(
            view,
            collection = %R::COLLECTION,
            backend,
            error = %e,
            "Failed to fetch collection"
        );
        ApiError::FetchFailed
    })
}

/// Every collection the statistics page is computed from.
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub activities: Vec<Activity>,
    pub activity_types: Vec<ActivityType>,
    pub locations: Vec<Location>,
    pub registrations: Vec<Registration>,
    pub users: Vec<UserProfile>,
    /// `None` when the assigned-users aggregate has never been written.
    pub activity_users: Option<Vec<ActivityUsers>>,
}

impl DashboardData {
    /// Computes the statistics over the fetched collections.
    #[must_use]
    pub fn statistics(&self, clock: &dyn Clock) -> DashboardStatistics {
        let input: StatisticsInput<'_> = StatisticsInput {
            activities: &self.activities,
            activity_types: &self.activity_types,
            locations: &self.locations,
            registrations: &self.registrations,
            users: &self.users,
            activity_users: self.activity_users.as_deref(),
        };
        compute_statistics(&input, clock)
    }
}

/// Fetches every collection the statistics page needs.
///
/// Callers sharing the store can release it before computing.
///
/// # Errors
///
/// Returns `ApiError::FetchFailed` if any collection cannot be read.
pub fn fetch_dashboard_data(
    store: &mut dyn DocumentStore,
    clock: &dyn Clock,
) -> Result<DashboardData, ApiError> {
    const VIEW: &str = "statistics";

    Ok(DashboardData {
        activities: fetch_for_view(store, clock, VIEW)?,
        activity_types: fetch_for_view(store, clock, VIEW)?,
        locations: fetch_for_view(store, clock, VIEW)?,
        registrations: fetch_for_view(store, clock, VIEW)?,
        users: fetch_for_view(store, clock, VIEW)?,
        activity_users: Some(fetch_for_view::<ActivityUsers>(store, clock, VIEW)?)
            .filter(|a| !a.is_empty()),
    })
}

/// Fetches and computes the dashboard statistics.
///
/// # Errors
///
/// Returns `ApiError::FetchFailed` if any collection cannot be read.
pub fn load_dashboard_statistics(
    store: &mut dyn DocumentStore,
    clock: &dyn Clock,
) -> Result<DashboardStatistics, ApiError> {
    Ok(fetch_dashboard_data(store, clock)?.statistics(clock))
}

/// Builds the calendar for one month.
///
/// # Arguments
///
/// * `store` - The document store
/// * `timezone` - IANA timezone the days are local to
/// * `year` - Calendar year
/// * `month` - Month number, 1 to 12
/// * `clock` - Places activities with no stored date
///
/// # Errors
///
/// Returns an error if:
/// - The timezone is unknown or the month is invalid
/// - A collection cannot be read (`ApiError::FetchFailed`)
pub fn load_calendar(
    store: &mut dyn DocumentStore,
    timezone: &str,
    year: i32,
    month: u32,
    clock: &dyn Clock,
) -> Result<MonthCalendar, ApiError> {
    const VIEW: &str = "calendar";

    let tz = parse_timezone(timezone).map_err(translate_domain_error)?;
    let activities: Vec<Activity> = fetch_for_view(store, clock, VIEW)?;
    let tracks: Vec<Track> = fetch_for_view(store, clock, VIEW)?;

    build_month_calendar(&activities, &tracks, tz, year, month, clock)
        .map_err(translate_domain_error)
}

/// Returns the map markers and the viewport that fits them.
///
/// # Errors
///
/// Returns `ApiError::FetchFailed` if a collection cannot be read.
pub fn list_map_markers(
    store: &mut dyn DocumentStore,
    clock: &dyn Clock,
) -> Result<MapMarkersResponse, ApiError> {
    const VIEW: &str = "map";

    let locations: Vec<Location> = fetch_for_view(store, clock, VIEW)?;
    let categories: Vec<LocationCategory> = fetch_for_view(store, clock, VIEW)?;

    let markers: Vec<MapMarker> = map_markers(&locations, &categories);
    let view: Option<MapView> = MapView::fit(&markers);
    Ok(MapMarkersResponse { markers, view })
}
