//! JSON API handlers.

use axum::extract::State;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use artfolio_core::{filter, ArtRecord};

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/images` — the visible catalog as a JSON array, order
/// preserved.
pub async fn images(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<Vec<ArtRecord>>, ApiError> {
    let catalog = artfolio_core::Catalog::load(&state.config.data_file)?;

    let show_ai = filter::show_flag(jar.get("showAI").map(|c| c.value()));
    let show_nsfw = filter::show_flag(jar.get("showNSFW").map(|c| c.value()));

    Ok(Json(filter::apply(catalog.records(), show_ai, show_nsfw)))
}

/// `GET /art.json` — the raw catalog file, unfiltered.
pub async fn art_json(State(state): State<AppState>) -> Result<Response, ApiError> {
    let bytes = tokio::fs::read(&state.config.data_file)
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("reading catalog file: {e}")))?;

    let headers = [(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json; charset=utf-8"),
    )];
    Ok((StatusCode::OK, headers, bytes).into_response())
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

/// Public health check endpoint for load balancer probes.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "artfolio-serve",
        version: env!("CARGO_PKG_VERSION"),
    })
}
