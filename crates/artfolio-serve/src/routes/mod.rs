//! Route definitions for the gallery server.
//!
//! ## Routes
//!
//! - `GET /` - Homepage (4 random visible pieces)
//! - `GET /library` - Full visible catalog
//! - `GET /favs` - Static favorites page
//! - `GET /view/{id}` - Share page with Open Graph metadata
//! - `GET /embed/{id}` - Embeddable single-image view
//! - `GET /art.json` - Raw catalog file
//! - `GET /api/images` - Visible catalog as JSON
//! - `GET /health` - Health check (JSON)
//! - `GET /api/v1/oauth/login` - Start the OAuth handshake
//! - `GET /api/v1/oauth/callback` - Complete the OAuth handshake
//! - `GET /api/v1/fetch/discord-avatar` - Avatar lookup proxy
//! - `/static/images`, `/static/thumbs` - Static file serving

mod api;
mod discord;
mod oauth;
mod pages;

use axum::routing::get;
use axum::Router;
use tower_http::services::ServeDir;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::state::AppState;

/// Build the complete gallery router.
///
/// Sessions are cookie-backed with an in-process store; they hold only
/// the pending OAuth anti-forgery token and the authenticated username.
pub fn router(state: AppState) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default()).with_secure(false);

    Router::new()
        .route("/", get(pages::home))
        .route("/library", get(pages::library))
        .route("/favs", get(pages::favs))
        .route("/view/{id}", get(pages::view))
        .route("/embed/{id}", get(pages::embed))
        .route("/art.json", get(api::art_json))
        .route("/api/images", get(api::images))
        .route("/health", get(api::health))
        .route("/api/v1/oauth/login", get(oauth::login))
        .route("/api/v1/oauth/callback", get(oauth::callback))
        .route("/api/v1/fetch/discord-avatar", get(discord::avatar))
        .nest_service("/static/images", ServeDir::new(&state.config.image_dir))
        .nest_service("/static/thumbs", ServeDir::new(&state.config.thumb_dir))
        .layer(session_layer)
        .with_state(state)
}
