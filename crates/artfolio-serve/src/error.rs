//! Error types for the web server.
//!
//! Page routes render errors as simple HTML pages; API routes return a
//! small JSON body. Both are caught at the route boundary — upstream
//! failures never crash the process.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use maud::{html, DOCTYPE};
use serde::Serialize;

/// Error type for the HTML page routes.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// The requested artwork does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Catalog or thumbnail error from the core crate.
    #[error("catalog error: {0}")]
    Core(#[from] artfolio_core::Error),

    /// Session storage error.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, title, message) = match &self {
            Self::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                "Not Found",
                format!("The requested artwork was not found: {msg}"),
            ),
            Self::Core(err) => {
                tracing::error!(error = %err, "catalog error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Error",
                    "The art catalog could not be read. Please try again later.".to_string(),
                )
            }
            Self::Session(err) => {
                tracing::error!(error = %err, "session error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Error",
                    "An internal error occurred. Please try again later.".to_string(),
                )
            }
            Self::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Error",
                    "An internal error occurred. Please try again later.".to_string(),
                )
            }
        };

        (status, error_page(title, &message)).into_response()
    }
}

/// Render a minimal standalone error page.
pub fn error_page(title: &str, message: &str) -> maud::Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                meta name="robots" content="noindex";
                style { (maud::PreEscaped(crate::render::components::ERROR_CSS)) }
            }
            body {
                main class="error-page" {
                    h1 { (title) }
                    p { (message) }
                    a href="/" { "Back to the gallery" }
                }
            }
        }
    }
}

/// Error type for the JSON API routes.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Invalid request parameters.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The server has no API key configured for the requested upstream.
    #[error("unauthorized")]
    Unauthorized,

    /// Resource not found (unknown art id, no linked account, unknown user).
    #[error("not found: {0}")]
    NotFound(String),

    /// The upstream rate-limited us.
    #[error("upstream rate limited")]
    RateLimited,

    /// Other upstream or transport failure.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Catalog error from the core crate.
    #[error("catalog error: {0}")]
    Core(#[from] artfolio_core::Error),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body.
#[derive(Debug, Clone, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone())),
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                Some("no API key configured for this endpoint".to_string()),
            ),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            Self::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "rate_limited",
                Some("the upstream API rate-limited this request".to_string()),
            ),
            Self::Upstream(err) => {
                tracing::error!(error = %err, "upstream error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "upstream_error",
                    Some("the upstream request failed".to_string()),
                )
            }
            Self::Core(err) => {
                tracing::error!(error = %err, "catalog error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    Some("the art catalog could not be read".to_string()),
                )
            }
            Self::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    Some("an internal error occurred".to_string()),
                )
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}
