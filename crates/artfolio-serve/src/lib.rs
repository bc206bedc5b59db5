//! Artfolio web server — a small personal art-gallery site.
//!
//! Serves the gallery pages (homepage, library, per-image share/embed
//! pages), a JSON art catalog API, an OAuth login flow delegated to an
//! external identity provider, and a Discord avatar-lookup proxy.
//!
//! # Architecture
//!
//! - **Catalog**: the flat `art.json` store from `artfolio-core`, re-read
//!   per request (the offline CLI is the only writer)
//! - **Render**: maud compile-time templates with Open Graph tags on the
//!   share pages
//! - **Thumbnails**: generated once at startup, then served as static
//!   files from the thumbnail directory
//!
//! # Security
//!
//! - All dynamic content is HTML-escaped by maud
//! - The OAuth callback is bound to its login attempt by a single-use
//!   session-held anti-forgery token

pub mod config;
pub mod error;
pub mod render;
pub mod routes;
pub mod state;

pub use config::Config;
pub use routes::router;
pub use state::AppState;
