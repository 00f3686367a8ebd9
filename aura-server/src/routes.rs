//! HTTP routes

use crate::error::ApiError;
use crate::state::AppState;
use aura_core::{normalize_identifiers, BriefingRequest, BriefingResult, PirepSubmission};
use aura_llm::PirepConverter;
use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::{MatchedPath, Query, State};
use axum::http::Request;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

pub const BRIEFING_PATH: &str = "/briefing";
pub const CONVERT_PATH: &str = "/api/convert-to-pirep";
pub const HEALTHZ_PATH: &str = "/healthz";

const NO_CODES_MESSAGE: &str = "No ICAO codes provided";
const NO_TEXT_MESSAGE: &str = "No text provided";

#[derive(Debug, Default, Deserialize)]
struct BriefingQuery {
    codes: Option<String>,
    include_notams: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ConvertRequest {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    icao: Option<String>,
    #[serde(default, rename = "aircraftModel")]
    aircraft_model: Option<String>,
    #[serde(default)]
    aircraft_name: Option<String>,
}

impl ConvertRequest {
    fn aircraft(&self) -> Option<String> {
        self.aircraft_model
            .as_deref()
            .filter(|name| !name.is_empty())
            .or(self.aircraft_name.as_deref())
            .map(str::to_string)
    }
}

#[derive(Debug, Serialize)]
struct ConvertResponse {
    success: bool,
    pirep: String,
}

#[derive(Debug, Serialize)]
struct HealthzResponse {
    status: &'static str,
}

/// Router with all API routes, static assets as fallback when `static_dir` is set
pub fn build_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let mut router = Router::new()
        .route(BRIEFING_PATH, get(briefing))
        .route(CONVERT_PATH, post(convert_to_pirep))
        .route(HEALTHZ_PATH, get(healthz))
        .with_state(state);

    if let Some(dir) = static_dir {
        info!(dir = %dir.display(), "Serving static assets");
        router = router.fallback_service(ServeDir::new(dir));
    }

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            let path = request
                .extensions()
                .get::<MatchedPath>()
                .map_or_else(|| request.uri().path().to_string(), |p| p.as_str().to_string());
            tracing::info_span!("http.request", method = %request.method(), path = %path)
        })
        .on_response(|response: &Response, latency: Duration, span: &tracing::Span| {
            let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
            info!(parent: span, status = response.status().as_u16(), latency_ms, "request completed");
        })
        .on_failure(|error: ServerErrorsFailureClass, latency: Duration, span: &tracing::Span| {
            let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
            tracing::error!(parent: span, latency_ms, error = %error, "request failed");
        });

    router.layer(trace_layer)
}

async fn briefing(
    State(state): State<AppState>,
    Query(query): Query<BriefingQuery>,
) -> Result<Json<BriefingResult>, ApiError> {
    let airports = normalize_identifiers(query.codes.as_deref().unwrap_or_default());
    if airports.is_empty() {
        return Err(ApiError::bad_request(NO_CODES_MESSAGE));
    }
    let include_notices = query
        .include_notams
        .as_deref()
        .is_some_and(|value| value.eq_ignore_ascii_case("true"));

    let request = BriefingRequest::new(airports, include_notices);
    Ok(Json(state.briefing.brief(&request).await))
}

async fn convert_to_pirep(
    State(state): State<AppState>,
    payload: Result<Json<ConvertRequest>, JsonRejection>,
) -> Result<Json<ConvertResponse>, ApiError> {
    let Json(payload) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let text = payload.text.as_deref().map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(ApiError::bad_request(NO_TEXT_MESSAGE));
    }

    let pirep = state.converter.convert(text).await.map_err(|err| {
        warn!(error = %err, "PIREP conversion failed");
        ApiError::conversion_failed(err.to_string())
    })?;

    // Only the converted line is stored; the free text is dropped here.
    let submission = PirepSubmission {
        received_at: Utc::now(),
        pirep: pirep.clone(),
        icao_hint: payload.icao.clone(),
        aircraft_name: payload.aircraft(),
    };
    let recorder = state.recorder.clone();
    tokio::spawn(async move {
        let outcome = recorder.record(&submission).await;
        debug!(?outcome, "PIREP recording finished");
    });

    Ok(Json(ConvertResponse {
        success: true,
        pirep,
    }))
}

async fn healthz() -> Json<HealthzResponse> {
    Json(HealthzResponse { status: "ok" })
}
