// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP handlers and the router.
//!
//! Handlers hold the store lock only while they call into the API layer.
//! The statistics handler releases it before aggregating.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    routing::{delete, get, patch, post, put},
};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tourdesk_api::{
    ActivityFilter, ActivityGuidesResponse, ActivityTypeRequest, AssignGuidesRequest,
    CalendarQuery, CategoryRequest, CreateActivityRequest, CreatedResponse, DashboardData,
    GuideApplicationRequest, LocationRequest, MapMarkersResponse, RegistrationRequest,
    SetGuideActiveRequest, StatusChangeRequest, TrackRequest, UpdateActivityRequest,
    assign_activity_guides, create_activity, create_activity_type, create_category,
    create_location, create_track, delete_activity, delete_activity_type, delete_category,
    delete_guide_request, delete_location, delete_registration, delete_track,
    fetch_dashboard_data, get_activity, get_activity_guides, get_location, get_track_details,
    list_activities, list_activity_types, list_approved_guides, list_categories,
    list_guide_requests, list_locations, list_map_markers, list_registrations, list_tracks,
    load_calendar, register_for_activity, review_guide_request, set_guide_active,
    submit_guide_request, transition_track_status, update_activity, update_activity_type,
    update_category, update_location, update_track,
};
use tourdesk_domain::{
    Activity, ActivityType, Clock, DashboardStatistics, Location, LocationCategory,
    MonthCalendar, Registration, TourGuideRequest, Track, TrackDetails,
};
use tourdesk_persistence::DocumentStore;
use tracing::info;

use crate::http_error::HttpError;

/// Application state shared across handlers.
///
/// The document store is wrapped in a Mutex to allow safe concurrent
/// access.
#[derive(Clone)]
pub struct AppState {
    /// The document store chosen at startup.
    pub store: Arc<Mutex<Box<dyn DocumentStore>>>,
    /// Source of the current instant.
    pub clock: Arc<dyn Clock>,
    /// Calendar timezone used when a request names none.
    pub default_timezone: String,
}

impl AppState {
    pub fn new(
        store: Box<dyn DocumentStore>,
        clock: Arc<dyn Clock>,
        default_timezone: String,
    ) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            clock,
            default_timezone,
        }
    }
}

/// Query for endpoints filtered by status.
#[derive(Debug, Default, Deserialize)]
pub struct StatusQuery {
    pub status: Option<String>,
}

/// Query for registrations, optionally for one activity.
#[derive(Debug, Default, Deserialize)]
pub struct RegistrationQuery {
    pub activity_id: Option<String>,
}

/// Calendar query with every field optional, so defaults can be applied.
#[derive(Debug, Default, Deserialize)]
pub struct CalendarParams {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub timezone: Option<String>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub backend: String,
}

type Created = (StatusCode, Json<CreatedResponse>);

fn created(response: CreatedResponse) -> Created {
    (StatusCode::CREATED, Json(response))
}

// ============================================================================
// Activities
// ============================================================================

async fn handle_list_activities(
    AxumState(app_state): AxumState<AppState>,
    Query(filter): Query<ActivityFilter>,
) -> Result<Json<Vec<Activity>>, HttpError> {
    info!(?filter, "Handling list_activities request");
    let mut store = app_state.store.lock().await;
    Ok(Json(list_activities(&mut **store, &filter, app_state.clock.as_ref())?))
}

async fn handle_create_activity(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateActivityRequest>,
) -> Result<Created, HttpError> {
    info!(name = %req.name, "Handling create_activity request");
    let mut store = app_state.store.lock().await;
    Ok(created(create_activity(&mut **store, req, app_state.clock.as_ref())?))
}

async fn handle_get_activity(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Activity>, HttpError> {
    let mut store = app_state.store.lock().await;
    Ok(Json(get_activity(&mut **store, &id, app_state.clock.as_ref())?))
}

async fn handle_update_activity(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateActivityRequest>,
) -> Result<Json<Activity>, HttpError> {
    info!(id, "Handling update_activity request");
    let mut store = app_state.store.lock().await;
    Ok(Json(update_activity(&mut **store, &id, req, app_state.clock.as_ref())?))
}

async fn handle_delete_activity(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, HttpError> {
    info!(id, "Handling delete_activity request");
    let mut store = app_state.store.lock().await;
    delete_activity(&mut **store, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn handle_get_activity_guides(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ActivityGuidesResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    Ok(Json(get_activity_guides(&mut **store, &id, app_state.clock.as_ref())?))
}

async fn handle_assign_activity_guides(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    Json(req): Json<AssignGuidesRequest>,
) -> Result<Json<ActivityGuidesResponse>, HttpError> {
    info!(
        id,
        guides = req.guide_ids.len(),
        "Handling assign_activity_guides request"
    );
    let mut store = app_state.store.lock().await;
    Ok(Json(assign_activity_guides(&mut **store, &id, req, app_state.clock.as_ref())?))
}

// ============================================================================
// Activity types and categories
// ============================================================================

async fn handle_list_activity_types(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<ActivityType>>, HttpError> {
    let mut store = app_state.store.lock().await;
    Ok(Json(list_activity_types(&mut **store, app_state.clock.as_ref())?))
}

async fn handle_create_activity_type(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActivityTypeRequest>,
) -> Result<Created, HttpError> {
    info!(name = ?req.name, "Handling create_activity_type request");
    let mut store = app_state.store.lock().await;
    Ok(created(create_activity_type(&mut **store, req)?))
}

async fn handle_update_activity_type(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ActivityTypeRequest>,
) -> Result<Json<ActivityType>, HttpError> {
    info!(id, "Handling update_activity_type request");
    let mut store = app_state.store.lock().await;
    Ok(Json(update_activity_type(&mut **store, &id, req, app_state.clock.as_ref())?))
}

async fn handle_delete_activity_type(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, HttpError> {
    info!(id, "Handling delete_activity_type request");
    let mut store = app_state.store.lock().await;
    delete_activity_type(&mut **store, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn handle_list_categories(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<LocationCategory>>, HttpError> {
    let mut store = app_state.store.lock().await;
    Ok(Json(list_categories(&mut **store, app_state.clock.as_ref())?))
}

async fn handle_create_category(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CategoryRequest>,
) -> Result<Created, HttpError> {
    info!(name = ?req.name, "Handling create_category request");
    let mut store = app_state.store.lock().await;
    Ok(created(create_category(&mut **store, req)?))
}

async fn handle_update_category(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    Json(req): Json<CategoryRequest>,
) -> Result<Json<LocationCategory>, HttpError> {
    info!(id, "Handling update_category request");
    let mut store = app_state.store.lock().await;
    Ok(Json(update_category(&mut **store, &id, req, app_state.clock.as_ref())?))
}

async fn handle_delete_category(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, HttpError> {
    info!(id, "Handling delete_category request");
    let mut store = app_state.store.lock().await;
    delete_category(&mut **store, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Locations
// ============================================================================

async fn handle_list_locations(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<Location>>, HttpError> {
    let mut store = app_state.store.lock().await;
    Ok(Json(list_locations(&mut **store, app_state.clock.as_ref())?))
}

async fn handle_create_location(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LocationRequest>,
) -> Result<Created, HttpError> {
    info!(name = ?req.name, "Handling create_location request");
    let mut store = app_state.store.lock().await;
    Ok(created(create_location(&mut **store, req)?))
}

async fn handle_get_location(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Location>, HttpError> {
    let mut store = app_state.store.lock().await;
    Ok(Json(get_location(&mut **store, &id, app_state.clock.as_ref())?))
}

async fn handle_update_location(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    Json(req): Json<LocationRequest>,
) -> Result<Json<Location>, HttpError> {
    info!(id, "Handling update_location request");
    let mut store = app_state.store.lock().await;
    Ok(Json(update_location(&mut **store, &id, req, app_state.clock.as_ref())?))
}

async fn handle_delete_location(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, HttpError> {
    info!(id, "Handling delete_location request");
    let mut store = app_state.store.lock().await;
    delete_location(&mut **store, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Tour guides
// ============================================================================

async fn handle_list_guide_requests(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Vec<TourGuideRequest>>, HttpError> {
    let mut store = app_state.store.lock().await;
    Ok(Json(list_guide_requests(
        &mut **store,
        query.status.as_deref(),
        app_state.clock.as_ref(),
    )?))
}

async fn handle_submit_guide_request(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<GuideApplicationRequest>,
) -> Result<Created, HttpError> {
    info!(full_name = %req.full_name, "Handling submit_guide_request request");
    let mut store = app_state.store.lock().await;
    Ok(created(submit_guide_request(&mut **store, req, app_state.clock.as_ref())?))
}

async fn handle_review_guide_request(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    Json(req): Json<StatusChangeRequest>,
) -> Result<Json<TourGuideRequest>, HttpError> {
    info!(id, status = %req.status, "Handling review_guide_request request");
    let mut store = app_state.store.lock().await;
    Ok(Json(review_guide_request(&mut **store, &id, &req, app_state.clock.as_ref())?))
}

async fn handle_set_guide_active(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SetGuideActiveRequest>,
) -> Result<Json<TourGuideRequest>, HttpError> {
    info!(id, active = req.active, "Handling set_guide_active request");
    let mut store = app_state.store.lock().await;
    Ok(Json(set_guide_active(&mut **store, &id, req.active, app_state.clock.as_ref())?))
}

async fn handle_delete_guide_request(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, HttpError> {
    info!(id, "Handling delete_guide_request request");
    let mut store = app_state.store.lock().await;
    delete_guide_request(&mut **store, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn handle_list_approved_guides(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<TourGuideRequest>>, HttpError> {
    let mut store = app_state.store.lock().await;
    Ok(Json(list_approved_guides(&mut **store, app_state.clock.as_ref())?))
}

// ============================================================================
// Tracks
// ============================================================================

async fn handle_list_tracks(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Vec<Track>>, HttpError> {
    let mut store = app_state.store.lock().await;
    Ok(Json(list_tracks(
        &mut **store,
        query.status.as_deref(),
        app_state.clock.as_ref(),
    )?))
}

async fn handle_create_track(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<TrackRequest>,
) -> Result<Created, HttpError> {
    info!(name = ?req.name, "Handling create_track request");
    let mut store = app_state.store.lock().await;
    Ok(created(create_track(&mut **store, req, app_state.clock.as_ref())?))
}

async fn handle_get_track(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TrackDetails>, HttpError> {
    let mut store = app_state.store.lock().await;
    Ok(Json(get_track_details(&mut **store, &id, app_state.clock.as_ref())?))
}

async fn handle_update_track(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    Json(req): Json<TrackRequest>,
) -> Result<Json<Track>, HttpError> {
    info!(id, "Handling update_track request");
    let mut store = app_state.store.lock().await;
    Ok(Json(update_track(&mut **store, &id, req, app_state.clock.as_ref())?))
}

async fn handle_transition_track(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    Json(req): Json<StatusChangeRequest>,
) -> Result<Json<Track>, HttpError> {
    info!(id, status = %req.status, "Handling transition_track_status request");
    let mut store = app_state.store.lock().await;
    Ok(Json(transition_track_status(&mut **store, &id, &req, app_state.clock.as_ref())?))
}

async fn handle_delete_track(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, HttpError> {
    info!(id, "Handling delete_track request");
    let mut store = app_state.store.lock().await;
    delete_track(&mut **store, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Registrations
// ============================================================================

async fn handle_list_registrations(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<RegistrationQuery>,
) -> Result<Json<Vec<Registration>>, HttpError> {
    let mut store = app_state.store.lock().await;
    Ok(Json(list_registrations(
        &mut **store,
        query.activity_id.as_deref(),
        app_state.clock.as_ref(),
    )?))
}

async fn handle_register(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RegistrationRequest>,
) -> Result<Created, HttpError> {
    info!(
        user_id = %req.user_id,
        activity_id = %req.activity_id,
        "Handling register_for_activity request"
    );
    let mut store = app_state.store.lock().await;
    Ok(created(register_for_activity(&mut **store, req, app_state.clock.as_ref())?))
}

async fn handle_delete_registration(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, HttpError> {
    info!(id, "Handling delete_registration request");
    let mut store = app_state.store.lock().await;
    delete_registration(&mut **store, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Views
// ============================================================================

/// Handler for GET `/statistics`.
///
/// Fetches under the lock, then computes after releasing it.
async fn handle_statistics(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<DashboardStatistics>, HttpError> {
    info!("Handling statistics request");
    let mut store = app_state.store.lock().await;
    let data: DashboardData = fetch_dashboard_data(&mut **store, app_state.clock.as_ref())?;
    drop(store);

    Ok(Json(data.statistics(app_state.clock.as_ref())))
}

/// Handler for GET `/calendar`.
///
/// Year and month default to the current month; the timezone defaults to
/// the server's configured one.
async fn handle_calendar(
    AxumState(app_state): AxumState<AppState>,
    Query(params): Query<CalendarParams>,
) -> Result<Json<MonthCalendar>, HttpError> {
    let now = app_state.clock.now();
    let query: CalendarQuery = CalendarQuery {
        year: params.year.unwrap_or_else(|| now.year()),
        month: params.month.unwrap_or_else(|| now.month()),
        timezone: params.timezone,
    };
    let timezone: &str = query
        .timezone
        .as_deref()
        .unwrap_or(&app_state.default_timezone);
    info!(
        year = query.year,
        month = query.month,
        timezone,
        "Handling calendar request"
    );

    let mut store = app_state.store.lock().await;
    Ok(Json(load_calendar(
        &mut **store,
        timezone,
        query.year,
        query.month,
        app_state.clock.as_ref(),
    )?))
}

async fn handle_map(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<MapMarkersResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    Ok(Json(list_map_markers(&mut **store, app_state.clock.as_ref())?))
}

async fn handle_health(AxumState(app_state): AxumState<AppState>) -> Json<HealthResponse> {
    let store = app_state.store.lock().await;
    Json(HealthResponse {
        status: String::from("ok"),
        backend: store.backend_name().to_string(),
    })
}

/// Builds the application router with all endpoints.
pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/activities",
            get(handle_list_activities).post(handle_create_activity),
        )
        .route(
            "/activities/{id}",
            get(handle_get_activity)
                .patch(handle_update_activity)
                .delete(handle_delete_activity),
        )
        .route(
            "/activities/{id}/guides",
            get(handle_get_activity_guides).put(handle_assign_activity_guides),
        )
        .route(
            "/activity_types",
            get(handle_list_activity_types).post(handle_create_activity_type),
        )
        .route(
            "/activity_types/{id}",
            patch(handle_update_activity_type).delete(handle_delete_activity_type),
        )
        .route(
            "/categories",
            get(handle_list_categories).post(handle_create_category),
        )
        .route(
            "/categories/{id}",
            patch(handle_update_category).delete(handle_delete_category),
        )
        .route(
            "/locations",
            get(handle_list_locations).post(handle_create_location),
        )
        .route(
            "/locations/{id}",
            get(handle_get_location)
                .patch(handle_update_location)
                .delete(handle_delete_location),
        )
        .route(
            "/guide_requests",
            get(handle_list_guide_requests).post(handle_submit_guide_request),
        )
        .route("/guide_requests/{id}", delete(handle_delete_guide_request))
        .route(
            "/guide_requests/{id}/review",
            post(handle_review_guide_request),
        )
        .route("/guide_requests/{id}/active", put(handle_set_guide_active))
        .route("/guides", get(handle_list_approved_guides))
        .route("/tracks", get(handle_list_tracks).post(handle_create_track))
        .route(
            "/tracks/{id}",
            get(handle_get_track)
                .patch(handle_update_track)
                .delete(handle_delete_track),
        )
        .route("/tracks/{id}/status", post(handle_transition_track))
        .route(
            "/registrations",
            get(handle_list_registrations).post(handle_register),
        )
        .route("/registrations/{id}", delete(handle_delete_registration))
        .route("/statistics", get(handle_statistics))
        .route("/calendar", get(handle_calendar))
        .route("/map", get(handle_map))
        .route("/health", get(handle_health))
        .with_state(app_state)
}
