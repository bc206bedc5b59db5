//! Application state shared across all request handlers.

use std::sync::Arc;
use std::time::Duration;

use artfolio_core::Catalog;

use crate::config::Config;
use crate::error::PageError;

/// Timeout for all outbound HTTP calls (identity provider, Discord).
/// The upstreams get no retries; a slow provider surfaces to the caller.
const OUTBOUND_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<Config>,

    /// HTTP client for the identity provider and the Discord API.
    pub http: reqwest::Client,
}

impl AppState {
    /// Create a new application state from configuration.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(OUTBOUND_TIMEOUT)
            .user_agent(concat!("artfolio/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }

    /// Load a fresh catalog snapshot from disk.
    ///
    /// The catalog is re-read per request; the file is small and the CLI
    /// may have rewritten it since the server started.
    pub fn catalog(&self) -> Result<Catalog, PageError> {
        Catalog::load(&self.config.data_file).map_err(PageError::from)
    }
}
