//! The OAuth handshake against the external identity provider.
//!
//! Two transitions:
//!
//! - **login** (`Idle -> Pending`): generate a fresh anti-forgery token,
//!   park it in the caller's session, redirect to the provider's
//!   authorization endpoint.
//! - **callback** (`Pending -> Authenticated`): verify the returned state
//!   against the session-held token (consumed exactly once, match or
//!   not), exchange the code for tokens server-to-server, fetch the
//!   userinfo, and store the resolved identity in the session.
//!
//! Every failure path returns to `Idle` without a persisted identity.

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Deserialize;
use tower_sessions::Session;

use crate::config::OAuthConfig;
use crate::error::{error_page, PageError};
use crate::routes::pages::SESSION_USERNAME;
use crate::state::AppState;

/// Session key holding the pending anti-forgery token.
const SESSION_OAUTH_STATE: &str = "oauth_state";

/// Scopes requested from the identity provider.
const OAUTH_SCOPES: &str = "openid profile email offline_access";

/// Length of the anti-forgery token.
const STATE_TOKEN_LEN: usize = 32;

/// Query parameters of the provider's callback redirect.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// Token endpoint response; only the access token is consumed.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// `GET /api/v1/oauth/login` — start the handshake.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, PageError> {
    let Some(oauth) = &state.config.oauth else {
        return Ok((
            StatusCode::SERVICE_UNAVAILABLE,
            error_page("Login Unavailable", "Login is not configured on this server."),
        )
            .into_response());
    };

    let token = new_state_token();
    // A fresh login attempt overwrites any stale pending token
    session.insert(SESSION_OAUTH_STATE, token.clone()).await?;

    let url = authorize_redirect_url(oauth, &token).map_err(PageError::Internal)?;

    tracing::debug!("redirecting to identity provider");
    Ok(found(&url))
}

/// `GET /api/v1/oauth/callback` — complete the handshake.
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<Response, PageError> {
    let Some(oauth) = &state.config.oauth else {
        return Ok(found("/"));
    };

    // Provider-reported error: surface it, leave the pending token alone
    if let Some(error) = &params.error {
        let detail = params.error_description.as_deref().unwrap_or(error);
        tracing::warn!(error = %error, "identity provider returned an error");
        return Ok((
            StatusCode::BAD_REQUEST,
            error_page("Login Failed", &format!("The identity provider reported: {detail}")),
        )
            .into_response());
    }

    // The pending token is consumed here, match or not
    let pending: Option<String> = session.remove(SESSION_OAUTH_STATE).await?;
    if !state_matches(pending.as_deref(), params.state.as_deref()) {
        tracing::warn!("oauth state mismatch, rejecting callback");
        return Ok((
            StatusCode::BAD_REQUEST,
            error_page(
                "Login Failed",
                "State verification failed. Please try logging in again.",
            ),
        )
            .into_response());
    }

    let Some(code) = params.code else {
        return Ok((
            StatusCode::BAD_REQUEST,
            error_page("Login Failed", "The identity provider returned no code."),
        )
            .into_response());
    };

    // Exchange the code for tokens; any failure aborts to home
    let access_token = match exchange_code(&state, oauth, &code).await {
        Ok(token) => token,
        Err(e) => {
            tracing::error!(error = %e, "token exchange failed");
            return Ok(found("/"));
        }
    };

    // Fetch the userinfo and resolve a display identity
    let userinfo = match fetch_userinfo(&state, oauth, &access_token).await {
        Ok(info) => info,
        Err(e) => {
            tracing::error!(error = %e, "userinfo fetch failed");
            return Ok(found("/"));
        }
    };

    let Some(username) = resolve_identity(&userinfo) else {
        tracing::error!("userinfo response carried no usable identity");
        return Ok(found("/"));
    };

    session.insert(SESSION_USERNAME, username.clone()).await?;
    tracing::info!(username = %username, "login completed");

    Ok(found("/"))
}

/// Plain `302 Found` redirect. `axum::response::Redirect::to` emits
/// `303 See Other`; the handshake uses the classic status.
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

/// Generate a fresh unguessable anti-forgery token.
fn new_state_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(STATE_TOKEN_LEN)
        .map(char::from)
        .collect()
}

/// Build the provider authorization URL with the standard
/// authorization-code parameters.
fn authorize_redirect_url(oauth: &OAuthConfig, state_token: &str) -> anyhow::Result<String> {
    let url = reqwest::Url::parse_with_params(
        &oauth.authorize_url,
        &[
            ("response_type", "code"),
            ("client_id", oauth.client_id.as_str()),
            ("scope", OAUTH_SCOPES),
            ("redirect_uri", oauth.redirect_uri.as_str()),
            ("state", state_token),
        ],
    )
    .map_err(|e| anyhow::anyhow!("invalid authorize URL: {e}"))?;
    Ok(url.into())
}

/// Compare the session-held pending token with the returned state.
fn state_matches(pending: Option<&str>, returned: Option<&str>) -> bool {
    matches!((pending, returned), (Some(p), Some(r)) if p == r)
}

/// Exchange the authorization code for an access token.
async fn exchange_code(
    state: &AppState,
    oauth: &OAuthConfig,
    code: &str,
) -> anyhow::Result<String> {
    let response = state
        .http
        .post(&oauth.token_url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", oauth.redirect_uri.as_str()),
            ("client_id", oauth.client_id.as_str()),
            ("client_secret", oauth.client_secret.as_str()),
        ])
        .send()
        .await?;

    if !response.status().is_success() {
        anyhow::bail!("token endpoint returned {}", response.status());
    }

    let token: TokenResponse = response.json().await?;
    Ok(token.access_token)
}

/// Fetch the userinfo document with the bearer access token.
async fn fetch_userinfo(
    state: &AppState,
    oauth: &OAuthConfig,
    access_token: &str,
) -> anyhow::Result<serde_json::Value> {
    let response = state
        .http
        .get(&oauth.userinfo_url)
        .bearer_auth(access_token)
        .send()
        .await?;

    if !response.status().is_success() {
        anyhow::bail!("userinfo endpoint returned {}", response.status());
    }

    Ok(response.json().await?)
}

/// Resolve a display identity from the userinfo response: the first
/// present of `preferred_username`, `email`, `sub`.
fn resolve_identity(userinfo: &serde_json::Value) -> Option<String> {
    for key in ["preferred_username", "email", "sub"] {
        if let Some(value) = userinfo.get(key).and_then(|v| v.as_str()) {
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use axum::body::Body;
    use axum::http::Request;
    use axum::Router;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;

    fn oauth_config() -> OAuthConfig {
        OAuthConfig {
            authorize_url: "https://idp.example.com/authorize".to_string(),
            token_url: "https://idp.example.com/token".to_string(),
            userinfo_url: "https://idp.example.com/userinfo".to_string(),
            client_id: "gallery".to_string(),
            client_secret: "s3cret".to_string(),
            redirect_uri: "http://localhost:8080/api/v1/oauth/callback".to_string(),
        }
    }

    fn test_router() -> Router {
        let mut oauth = oauth_config();
        // An unroutable token endpoint so a reached exchange fails fast
        oauth.token_url = "http://127.0.0.1:9/token".to_string();
        let state = AppState::new(Config {
            bind_addr: "127.0.0.1:0".to_string(),
            base_url: "http://localhost:8080".to_string(),
            site_name: "Artfolio".to_string(),
            data_file: PathBuf::from("data/art.json"),
            image_dir: PathBuf::from("static/images"),
            thumb_dir: PathBuf::from("static/thumbs"),
            thumb_width: 280,
            oauth: Some(oauth),
            discord_bot_token: None,
        })
        .unwrap();
        crate::routes::router(state)
    }

    async fn send(app: &Router, uri: &str, cookie: Option<&str>) -> Response {
        let mut request = Request::get(uri);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        app.clone()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    fn session_cookie(response: &Response) -> String {
        response.headers()[header::SET_COOKIE]
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string()
    }

    /// The state token the login redirect handed to the provider.
    fn location_state(response: &Response) -> String {
        let location = response.headers()[header::LOCATION].to_str().unwrap();
        let url = reqwest::Url::parse(location).unwrap();
        url.query_pairs()
            .find(|(key, _)| key == "state")
            .map(|(_, value)| value.into_owned())
            .unwrap()
    }

    #[tokio::test]
    async fn login_redirects_to_provider_with_302() {
        let app = test_router();
        let response = send(&app, "/api/v1/oauth/login", None).await;
        assert_eq!(response.status(), StatusCode::FOUND);
        let location = response.headers()[header::LOCATION].to_str().unwrap();
        assert!(location.starts_with("https://idp.example.com/authorize?"));
        assert!(location.contains("state="));
    }

    #[tokio::test]
    async fn mismatched_callback_state_fails_and_consumes_the_token() {
        let app = test_router();
        let login = send(&app, "/api/v1/oauth/login", None).await;
        let cookie = session_cookie(&login);

        let first = send(
            &app,
            "/api/v1/oauth/callback?code=abc&state=not-the-token",
            Some(&cookie),
        )
        .await;
        assert_eq!(first.status(), StatusCode::BAD_REQUEST);

        // The mismatch consumed the pending token, so even the genuine
        // state from the login redirect no longer verifies
        let state_param = location_state(&login);
        let replay = send(
            &app,
            &format!("/api/v1/oauth/callback?code=abc&state={state_param}"),
            Some(&cookie),
        )
        .await;
        assert_eq!(replay.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn provider_error_leaves_the_pending_token_in_place() {
        let app = test_router();
        let login = send(&app, "/api/v1/oauth/login", None).await;
        let cookie = session_cookie(&login);

        let errored = send(
            &app,
            "/api/v1/oauth/callback?error=access_denied",
            Some(&cookie),
        )
        .await;
        assert_eq!(errored.status(), StatusCode::BAD_REQUEST);

        // The token survived the provider error: the genuine state still
        // verifies, the flow reaches the dead token endpoint, and the
        // exchange failure aborts home with a 302
        let state_param = location_state(&login);
        let after = send(
            &app,
            &format!("/api/v1/oauth/callback?code=abc&state={state_param}"),
            Some(&cookie),
        )
        .await;
        assert_eq!(after.status(), StatusCode::FOUND);
        assert_eq!(after.headers()[header::LOCATION], "/");
    }

    #[test]
    fn state_token_is_long_and_alphanumeric() {
        let token = new_state_token();
        assert_eq!(token.len(), STATE_TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
        // Two tokens colliding would mean the RNG is broken
        assert_ne!(token, new_state_token());
    }

    #[test]
    fn authorize_url_carries_all_parameters() {
        let url = authorize_redirect_url(&oauth_config(), "tok123").unwrap();
        assert!(url.starts_with("https://idp.example.com/authorize?"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("client_id=gallery"));
        assert!(url.contains("state=tok123"));
        assert!(url.contains("offline_access"));
        // The redirect URI must be query-encoded
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A8080%2Fapi%2Fv1%2Foauth%2Fcallback"));
    }

    #[test]
    fn state_matches_requires_exact_equality() {
        assert!(state_matches(Some("abc"), Some("abc")));
        assert!(!state_matches(Some("abc"), Some("abd")));
        assert!(!state_matches(Some("abc"), None));
        assert!(!state_matches(None, Some("abc")));
        assert!(!state_matches(None, None));
    }

    #[test]
    fn identity_prefers_preferred_username() {
        let info = serde_json::json!({
            "preferred_username": "zee",
            "email": "zee@example.com",
            "sub": "uuid-1"
        });
        assert_eq!(resolve_identity(&info).unwrap(), "zee");
    }

    #[test]
    fn identity_falls_back_to_email_then_sub() {
        let info = serde_json::json!({ "email": "zee@example.com", "sub": "uuid-1" });
        assert_eq!(resolve_identity(&info).unwrap(), "zee@example.com");

        let info = serde_json::json!({ "sub": "uuid-1" });
        assert_eq!(resolve_identity(&info).unwrap(), "uuid-1");
    }

    #[test]
    fn identity_absent_everywhere_is_none() {
        assert!(resolve_identity(&serde_json::json!({})).is_none());
        assert!(resolve_identity(&serde_json::json!({ "preferred_username": "" })).is_none());
        assert!(resolve_identity(&serde_json::json!({ "sub": 42 })).is_none());
    }
}
