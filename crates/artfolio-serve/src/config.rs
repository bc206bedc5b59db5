//! Application configuration loaded from environment variables.

use std::path::PathBuf;

use artfolio_core::thumbs::DEFAULT_TARGET_WIDTH;

/// OAuth provider settings. Present only when a client id is configured;
/// without it the login route reports that login is unavailable.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    /// Provider authorization endpoint.
    pub authorize_url: String,
    /// Provider token endpoint (authorization-code exchange).
    pub token_url: String,
    /// Provider userinfo endpoint.
    pub userinfo_url: String,
    /// OAuth client id.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
    /// This server's callback URL, registered with the provider.
    pub redirect_uri: String,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8080").
    pub bind_addr: String,

    /// Base URL for this site, used in OG tags and canonical URLs.
    pub base_url: String,

    /// Site name shown in page titles and OG tags.
    pub site_name: String,

    /// Path to the catalog file (`art.json`).
    pub data_file: PathBuf,

    /// Directory holding source images.
    pub image_dir: PathBuf,

    /// Directory holding derived `.webp` thumbnails.
    pub thumb_dir: PathBuf,

    /// Thumbnail target width in pixels.
    pub thumb_width: u32,

    /// OAuth provider settings, if login is configured.
    pub oauth: Option<OAuthConfig>,

    /// Discord bot token for the avatar-lookup proxy, if configured.
    pub discord_bot_token: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// All gallery settings have defaults for local development:
    /// - `ARTFOLIO_BIND_ADDR`: bind address (default: "0.0.0.0:8080")
    /// - `ARTFOLIO_BASE_URL`: base URL for links/OG tags (default: "http://localhost:8080")
    /// - `ARTFOLIO_SITE_NAME`: site name (default: "Artfolio")
    /// - `ARTFOLIO_DATA_FILE`: catalog path (default: "data/art.json")
    /// - `ARTFOLIO_IMAGE_DIR`: source images (default: "static/images")
    /// - `ARTFOLIO_THUMB_DIR`: thumbnails (default: "static/thumbs")
    /// - `ARTFOLIO_THUMB_WIDTH`: thumbnail width (default: 280)
    ///
    /// OAuth is enabled when `OAUTH_CLIENT_ID` is set, in which case
    /// `OAUTH_AUTHORIZE_URL`, `OAUTH_TOKEN_URL`, `OAUTH_USERINFO_URL`,
    /// `OAUTH_CLIENT_SECRET`, and `OAUTH_REDIRECT_URI` are all required.
    ///
    /// `DISCORD_BOT_TOKEN` enables the avatar-lookup proxy.
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr =
            std::env::var("ARTFOLIO_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let base_url = std::env::var("ARTFOLIO_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string())
            .trim_end_matches('/')
            .to_string();

        let site_name =
            std::env::var("ARTFOLIO_SITE_NAME").unwrap_or_else(|_| "Artfolio".to_string());

        let data_file = PathBuf::from(
            std::env::var("ARTFOLIO_DATA_FILE").unwrap_or_else(|_| "data/art.json".to_string()),
        );

        let image_dir = PathBuf::from(
            std::env::var("ARTFOLIO_IMAGE_DIR").unwrap_or_else(|_| "static/images".to_string()),
        );

        let thumb_dir = PathBuf::from(
            std::env::var("ARTFOLIO_THUMB_DIR").unwrap_or_else(|_| "static/thumbs".to_string()),
        );

        let thumb_width = match std::env::var("ARTFOLIO_THUMB_WIDTH") {
            Ok(raw) => raw
                .parse::<u32>()
                .map_err(|_| anyhow::anyhow!("ARTFOLIO_THUMB_WIDTH must be an integer: {raw}"))?,
            Err(_) => DEFAULT_TARGET_WIDTH,
        };

        let oauth = match std::env::var("OAUTH_CLIENT_ID") {
            Ok(client_id) => Some(OAuthConfig {
                authorize_url: require_env("OAUTH_AUTHORIZE_URL")?,
                token_url: require_env("OAUTH_TOKEN_URL")?,
                userinfo_url: require_env("OAUTH_USERINFO_URL")?,
                client_id,
                client_secret: require_env("OAUTH_CLIENT_SECRET")?,
                redirect_uri: require_env("OAUTH_REDIRECT_URI")?,
            }),
            Err(_) => None,
        };

        let discord_bot_token = std::env::var("DISCORD_BOT_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());

        tracing::info!(
            bind_addr = %bind_addr,
            base_url = %base_url,
            site_name = %site_name,
            data_file = %data_file.display(),
            oauth_enabled = oauth.is_some(),
            discord_enabled = discord_bot_token.is_some(),
            "configuration loaded"
        );

        Ok(Self {
            bind_addr,
            base_url,
            site_name,
            data_file,
            image_dir,
            thumb_dir,
            thumb_width,
            oauth,
            discord_bot_token,
        })
    }
}

fn require_env(key: &str) -> anyhow::Result<String> {
    std::env::var(key)
        .map_err(|_| anyhow::anyhow!("{key} is required when OAUTH_CLIENT_ID is set"))
}
