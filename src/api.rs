//! HTTP API
//!
//! All routes are mounted under `/api` by [`crate::web`]. Plan routes take a
//! JSON trip request body and run the configured enrichment provider, if any.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{instrument, warn};

use crate::cache::ResponseCache;
use crate::config::TravelBuddiConfig;
use crate::enrichment::PlaceEnricher;
use crate::export::{ARCHIVE_FILE, PlanExport, build_export_zip, plan_to_markdown};
use crate::models::{GeneratedPlan, TripRequest};
use crate::planner::generate_plan_with_enrichment;
use crate::region::{Region, classify_region};
use crate::{TravelBuddiError, VERSION};

/// Shared by every request
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<TravelBuddiConfig>,
    pub cache: Option<Arc<ResponseCache>>,
    enricher: Option<Arc<PlaceEnricher>>,
    setup_warning: Option<String>,
}

impl AppState {
    /// Builds the configured enricher once, with the shared cache attached.
    /// A misconfigured provider degrades to the offline plan with a warning.
    #[must_use]
    pub fn new(config: TravelBuddiConfig) -> Self {
        let ttl = Duration::from_secs(config.cache.ttl_seconds);
        let cache = config
            .cache
            .enabled
            .then(|| Arc::new(ResponseCache::new(ttl)));

        let (enricher, setup_warning) = match PlaceEnricher::from_config(&config.enrichment) {
            Ok(Some(enricher)) => {
                let enricher = match &cache {
                    Some(cache) => enricher.with_cache(cache.clone()),
                    None => enricher,
                };
                (Some(Arc::new(enricher)), None)
            }
            Ok(None) => (None, None),
            Err(e) => {
                warn!("Enrichment disabled: {}", e);
                (None, Some(e.user_message()))
            }
        };

        Self {
            config: Arc::new(config),
            cache,
            enricher,
            setup_warning,
        }
    }
}

/// Error response carrying the user-facing message
#[derive(Debug)]
pub struct ApiError(TravelBuddiError);

impl From<TravelBuddiError> for ApiError {
    fn from(err: TravelBuddiError) -> Self {
        Self(err)
    }
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self.0 {
            TravelBuddiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            TravelBuddiError::Config { .. } => StatusCode::BAD_REQUEST,
            TravelBuddiError::Api { .. } => StatusCode::BAD_GATEWAY,
            TravelBuddiError::Export { .. } | TravelBuddiError::Io { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!("Request failed: {}", self.0);
        }
        (status, Json(json!({ "error": self.0.user_message() }))).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/region", get(region))
        .route("/plan", post(plan))
        .route("/plan/markdown", post(plan_markdown))
        .route("/plan/archive", post(plan_archive))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": VERSION }))
}

#[derive(Deserialize)]
pub struct RegionQuery {
    #[serde(default)]
    pub destination: String,
}

#[derive(Serialize)]
pub struct RegionResponse {
    pub destination: String,
    pub region: Region,
}

async fn region(Query(query): Query<RegionQuery>) -> Result<Json<RegionResponse>, ApiError> {
    let destination = query.destination.trim();
    if destination.is_empty() {
        return Err(TravelBuddiError::validation("Please enter a destination.").into());
    }
    Ok(Json(RegionResponse {
        destination: destination.to_string(),
        region: classify_region(destination),
    }))
}

#[instrument(skip(state, payload))]
async fn build_plan(
    state: &AppState,
    payload: Value,
) -> Result<(TripRequest, GeneratedPlan, Vec<String>), ApiError> {
    let request = TripRequest::from_json_value(payload)?;
    let (plan, warning) =
        generate_plan_with_enrichment(&request, state.enricher.as_deref()).await;
    let warnings = state.setup_warning.iter().cloned().chain(warning).collect();
    Ok((request, plan, warnings))
}

async fn plan(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let (request, plan, warnings) = build_plan(&state, payload).await?;
    let mut body = serde_json::to_value(PlanExport::new(&request, &plan))
        .map_err(TravelBuddiError::from)?;
    body["warnings"] = json!(warnings);
    Ok(Json(body))
}

async fn plan_markdown(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let (request, plan, _) = build_plan(&state, payload).await?;
    Ok((
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        plan_to_markdown(&request, &plan),
    ))
}

async fn plan_archive(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let (request, plan, _) = build_plan(&state, payload).await?;
    let bytes = build_export_zip(&request, &plan)?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{ARCHIVE_FILE}\""),
            ),
        ],
        bytes,
    ))
}
