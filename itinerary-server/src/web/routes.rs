//! HTTP route handlers.

use std::path::Path;
use std::sync::Arc;

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::de::DeserializeOwned;
use tokio::task::JoinError;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::planner::{Planner, SearchError, SearchRequest};
use crate::store::{ScheduleStore, StoreError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
///
/// When `static_dir` is given, unmatched paths are served from it.
pub fn create_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .route("/api/stations", get(list_stations).post(create_station))
        .route("/api/search", get(search_itineraries))
        .route("/api/trains", post(create_train))
        .with_state(state);

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router.layer(TraceLayer::new_for_http())
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Stations with at least one stop, by name.
async fn list_stations(
    State(state): State<AppState>,
) -> Result<Json<Vec<StationResult>>, AppError> {
    let snapshot = state.schedule.snapshot()?;
    let mut stations = snapshot.stations_with_stops();
    stations.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

    Ok(Json(stations.iter().map(StationResult::from_station).collect()))
}

/// Search itineraries between two stations.
async fn search_itineraries(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ItineraryResult>>, AppError> {
    let request = SearchRequest::from_params(
        query.from.as_deref(),
        query.to.as_deref(),
        query.sort_by.as_deref(),
    )?;

    let snapshot = state.schedule.snapshot()?;
    let resolved = Planner::new(snapshot.as_ref(), &state.config).resolve(&request)?;
    let key = (resolved.from.id, resolved.to.id, resolved.sort_by);

    let itineraries = match state.cache.get(&key).await {
        Some(cached) => {
            debug!(from = %resolved.from.name, to = %resolved.to.name, "Search cache hit");
            cached
        }
        None => {
            let searched = Arc::clone(&snapshot);
            let config = Arc::clone(&state.config);
            let result = tokio::task::spawn_blocking(move || {
                Planner::new(searched.as_ref(), &config).search_resolved(&resolved)
            })
            .await?;

            let entry = Arc::new(result.itineraries);
            state.cache.insert(key, Arc::clone(&entry)).await;
            // A write may have published and cleared the cache mid-search
            if !Arc::ptr_eq(&snapshot, &state.schedule.snapshot()?) {
                state.cache.invalidate(&key).await;
            }
            entry
        }
    };

    Ok(Json(
        itineraries
            .iter()
            .map(ItineraryResult::from_itinerary)
            .collect(),
    ))
}

/// Get or create a station.
async fn create_station(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<StationResult>, AppError> {
    let req: CreateStationRequest = parse_json(&body)?;
    let name = req
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest {
            message: "name required".to_string(),
        })?;

    let schedule = Arc::clone(&state.schedule);
    let station = tokio::task::spawn_blocking(move || schedule.add_station(&name)).await??;
    state.cache.invalidate_all();

    info!(station_id = %station.id, name = %station.name, "Station created");
    Ok(Json(StationResult::from_station(&station)))
}

/// Add a train with its stops.
async fn create_train(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CreateTrainResponse>, AppError> {
    let req: CreateTrainRequest = parse_json(&body)?;
    let train = req
        .to_new_train()
        .map_err(|message| AppError::BadRequest { message })?;

    let schedule = Arc::clone(&state.schedule);
    let id = tokio::task::spawn_blocking(move || schedule.add_train(&train)).await??;
    state.cache.invalidate_all();

    Ok(Json(CreateTrainResponse { id: id.0 }))
}

/// Parse a JSON body, logging it on failure.
fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        debug!(error = %e, body = %String::from_utf8_lossy(body), "Rejected request body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::InvalidArgument(message) => AppError::BadRequest { message },
            SearchError::NotFound(message) => AppError::NotFound { message },
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::InvalidStation(_) | StoreError::InvalidTrain(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<JoinError> for AppError {
    fn from(e: JoinError) -> Self {
        AppError::Internal {
            message: format!("background task failed: {e}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            warn!(%status, %message, "Request failed");
        } else {
            debug!(%status, %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
