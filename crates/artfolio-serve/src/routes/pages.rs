//! HTML page handlers.
//!
//! Every page re-reads the catalog from disk (the offline CLI is the only
//! writer, and the file is small) and narrows it through the visibility
//! filter using the `showAI`/`showNSFW` preference cookies.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum_extra::extract::cookie::CookieJar;
use rand::seq::SliceRandom;
use tower_sessions::Session;

use artfolio_core::{filter, ArtRecord};

use crate::error::PageError;
use crate::render;
use crate::state::AppState;

/// Number of random pieces shown on the homepage.
const HOME_SAMPLE: usize = 4;

/// Session key holding the authenticated username.
pub const SESSION_USERNAME: &str = "username";

/// Resolve the visibility flags from the preference cookies.
fn visible_records(jar: &CookieJar, records: &[ArtRecord]) -> Vec<ArtRecord> {
    let show_ai = filter::show_flag(jar.get("showAI").map(|c| c.value()));
    let show_nsfw = filter::show_flag(jar.get("showNSFW").map(|c| c.value()));
    filter::apply(records, show_ai, show_nsfw)
}

/// Authenticated username from the session, if any.
async fn session_username(session: &Session) -> Result<Option<String>, PageError> {
    Ok(session.get::<String>(SESSION_USERNAME).await?)
}

/// `GET /` — homepage with a random sample of the visible catalog.
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
) -> Result<impl IntoResponse, PageError> {
    let catalog = state.catalog()?;
    let visible = visible_records(&jar, catalog.records());

    let picks: Vec<ArtRecord> = visible
        .choose_multiple(&mut rand::thread_rng(), HOME_SAMPLE)
        .cloned()
        .collect();

    let username = session_username(&session).await?;
    Ok(render::home_page(
        &state.config.site_name,
        &picks,
        username.as_deref(),
    ))
}

/// `GET /library` — the full visible catalog.
pub async fn library(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
) -> Result<impl IntoResponse, PageError> {
    let catalog = state.catalog()?;
    let visible = visible_records(&jar, catalog.records());
    let username = session_username(&session).await?;
    Ok(render::library_page(
        &state.config.site_name,
        &visible,
        username.as_deref(),
    ))
}

/// `GET /favs` — static favorites page.
pub async fn favs(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, PageError> {
    let username = session_username(&session).await?;
    Ok(render::favs_page(&state.config.site_name, username.as_deref()))
}

/// `GET /view/{id}` — share page with Open Graph metadata.
pub async fn view(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, PageError> {
    let catalog = state.catalog()?;
    let record = catalog
        .find(id)
        .ok_or_else(|| PageError::NotFound(format!("artwork {id}")))?;
    let username = session_username(&session).await?;
    Ok(render::view_page(
        &state.config.site_name,
        &state.config.base_url,
        record,
        username.as_deref(),
    ))
}

/// `GET /embed/{id}` — embeddable single-image view.
pub async fn embed(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, PageError> {
    let catalog = state.catalog()?;
    let record = catalog
        .find(id)
        .ok_or_else(|| PageError::NotFound(format!("artwork {id}")))?;
    Ok(render::embed_page(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_extra::extract::cookie::Cookie;

    fn record(id: u64, is_ai: bool, is_nsfw: bool) -> ArtRecord {
        ArtRecord {
            filename: "fox.png".into(),
            title: "Fox".into(),
            stripped_filename: "fox".into(),
            filetype: "image/png".into(),
            ai_model: None,
            artist: "Vix".into(),
            artist_pic: "discord".into(),
            discord_id: "1".into(),
            shapeshift_form: "Fox Form".into(),
            characters: vec!["Zee".into()],
            art_name: String::new(),
            creation_date: "2024-01-01".into(),
            recieval_method: "Self Made".into(),
            recieval_price: None,
            is_ai,
            is_nsfw,
            is_disc_emoji: false,
            disable_download: false,
            id,
        }
    }

    #[test]
    fn absent_cookies_hide_flagged_records() {
        let records = vec![record(1_000_000, false, false), record(1_000_001, true, true)];
        let visible = visible_records(&CookieJar::new(), &records);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 1_000_000);
    }

    #[test]
    fn cookies_opt_flagged_records_in() {
        let records = vec![record(1_000_000, true, false), record(1_000_001, false, true)];
        let jar = CookieJar::new()
            .add(Cookie::new("showAI", "true"))
            .add(Cookie::new("showNSFW", "1"));
        assert_eq!(visible_records(&jar, &records).len(), 2);
    }

    #[test]
    fn explicit_false_cookie_hides() {
        let records = vec![record(1_000_000, true, false)];
        let jar = CookieJar::new().add(Cookie::new("showAI", "false"));
        assert!(visible_records(&jar, &records).is_empty());
    }
}
