use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use crate::bulletin::{SkippedSegment, Zone};
use crate::error::IngestError;
use crate::extractor::InputFormat;
use crate::services::{ForecastService, ZoneNavEntry};

#[derive(Clone)]
pub struct AppState {
    pub forecast_service: ForecastService,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct IngestParams {
    #[serde(default)]
    pub format: InputFormat,
}

#[derive(Debug, Serialize)]
pub struct SkippedSegmentResponse {
    pub index: usize,
    pub first_line: String,
    pub reason: String,
}

impl From<&SkippedSegment> for SkippedSegmentResponse {
    fn from(skipped: &SkippedSegment) -> Self {
        Self {
            index: skipped.index,
            first_line: skipped.first_line.clone(),
            reason: skipped.reason.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub received_at: DateTime<Utc>,
    pub zone_count: usize,
    pub skipped_segments: Vec<SkippedSegmentResponse>,
}

#[derive(Debug, Serialize)]
pub struct ZoneListResponse {
    pub received_at: DateTime<Utc>,
    pub zones: Vec<ZoneNavEntry>,
}

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health))
        .route("/bulletin", post(post_bulletin))
        .route("/zones", get(get_zones))
        .route("/zones/{index}", get(get_zone))
        .route("/zones/by-id/{zone_id}", get(get_zone_by_id))
        .with_state(state);

    Router::new().nest("/api/v1", api_routes)
}

#[instrument(skip(_state))]
async fn health(State(_state): State<AppState>) -> impl IntoResponse {
    debug!("Health check requested");
    let response = HealthResponse {
        status: "healthy".to_string(),
    };
    (StatusCode::OK, Json(response))
}

#[instrument(skip(state, body), fields(body_size = body.len()))]
async fn post_bulletin(
    State(state): State<AppState>,
    Query(params): Query<IngestParams>,
    body: String,
) -> Result<(StatusCode, Json<IngestResponse>), StatusCode> {
    debug!("Ingesting bulletin (format={:?})", params.format);
    let snapshot = state
        .forecast_service
        .ingest(&body, params.format)
        .await
        .map_err(|e| match e {
            IngestError::NoZones => {
                warn!("Rejected bulletin: {}", e);
                StatusCode::UNPROCESSABLE_ENTITY
            }
            IngestError::Extraction(_) => {
                error!("Failed to extract bulletin text: {}", e);
                StatusCode::BAD_REQUEST
            }
        })?;

    info!(
        "Accepted bulletin with {} zones received at {}",
        snapshot.zones.len(),
        snapshot.received_at
    );

    let response = IngestResponse {
        received_at: snapshot.received_at,
        zone_count: snapshot.zones.len(),
        skipped_segments: snapshot
            .skipped_segments
            .iter()
            .map(SkippedSegmentResponse::from)
            .collect(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip(state))]
async fn get_zones(State(state): State<AppState>) -> Result<Json<ZoneListResponse>, StatusCode> {
    debug!("Fetching zone navigation list");
    let (received_at, zones) = state.forecast_service.zone_index().await.ok_or_else(|| {
        warn!("No bulletin has been ingested yet");
        StatusCode::NOT_FOUND
    })?;

    info!("Retrieved {} zones from bulletin received at {}", zones.len(), received_at);
    Ok(Json(ZoneListResponse { received_at, zones }))
}

#[instrument(skip(state), fields(index = %index))]
async fn get_zone(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<Zone>, StatusCode> {
    debug!("Fetching zone at index {}", index);
    let zone = state.forecast_service.zone(index).await.ok_or_else(|| {
        warn!("No zone at index {}", index);
        StatusCode::NOT_FOUND
    })?;

    info!("Retrieved zone {} ({} periods)", zone.id, zone.forecast.len());
    Ok(Json(zone))
}

#[instrument(skip(state), fields(zone_id = %zone_id))]
async fn get_zone_by_id(
    State(state): State<AppState>,
    Path(zone_id): Path<String>,
) -> Result<Json<Zone>, StatusCode> {
    debug!("Fetching zone {}", zone_id);
    let zone = state
        .forecast_service
        .zone_by_id(&zone_id)
        .await
        .ok_or_else(|| {
            warn!("Zone {} not found", zone_id);
            StatusCode::NOT_FOUND
        })?;

    info!("Retrieved zone {} ({} periods)", zone.id, zone.forecast.len());
    Ok(Json(zone))
}
