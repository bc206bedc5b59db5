//! HTML rendering for the gallery pages.
//!
//! All rendering uses [maud](https://maud.lambda.xyz/) for compile-time
//! HTML generation with automatic XSS protection; every dynamic value is
//! escaped.

pub mod components;

use maud::{html, Markup};

use artfolio_core::ArtRecord;

use components::{art_grid, og_tags, shell};

/// Homepage: a small random selection from the visible catalog.
pub fn home_page(site_name: &str, picks: &[ArtRecord], username: Option<&str>) -> Markup {
    let body = html! {
        h1 class="page-title" { "Welcome" }
        @if picks.is_empty() {
            p { "Nothing to show yet — the gallery is empty (or everything is hidden by your preferences)." }
        } @else {
            (art_grid(picks))
        }
    };
    shell(site_name, "Home", html! {}, username, body)
}

/// Library: the full visible catalog, in insertion order.
pub fn library_page(site_name: &str, records: &[ArtRecord], username: Option<&str>) -> Markup {
    let body = html! {
        h1 class="page-title" { "Library" }
        (art_grid(records))
    };
    shell(site_name, "Library", html! {}, username, body)
}

/// Static favorites page.
pub fn favs_page(site_name: &str, username: Option<&str>) -> Markup {
    let body = html! {
        h1 class="page-title" { "Favorites" }
        p { "A hand-picked selection of favorite pieces." }
        p { a href="/library" { "Browse the full library instead" } }
    };
    shell(site_name, "Favorites", html! {}, username, body)
}

/// Share page for a single artwork, with Open Graph metadata so links
/// unfurl with the thumbnail.
pub fn view_page(
    site_name: &str,
    base_url: &str,
    record: &ArtRecord,
    username: Option<&str>,
) -> Markup {
    let head = og_tags(record, base_url, site_name);
    let body = html! {
        div class="viewer" {
            div class="viewer-image" {
                img src={ "/static/images/" (record.filename) } alt=(record.title);
            }
            div class="viewer-meta" {
                h1 class="page-title" { (record.title) }
                (meta_row("Artist", &record.artist))
                @if !record.art_name.is_empty() { (meta_row("Art name", &record.art_name)) }
                @if !record.shapeshift_form.is_empty() { (meta_row("Form", &record.shapeshift_form)) }
                @if !record.characters.is_empty() { (meta_row("Characters", &record.characters.join(", "))) }
                @if !record.creation_date.is_empty() { (meta_row("Created", &record.creation_date)) }
                (meta_row("Obtained", &record.recieval_method))
                @if let Some(price) = &record.recieval_price { (meta_row("Price", price)) }
                @if let Some(model) = &record.ai_model { (meta_row("AI model", model)) }
            }
            div class="viewer-actions" {
                @if !record.disable_download {
                    a class="btn" href={ "/static/images/" (record.filename) } download { "Download" }
                }
                a class="btn" href={ "/embed/" (record.id) } { "Embed" }
            }
        }
    };
    shell(site_name, &record.title, head, username, body)
}

/// Minimal embeddable single-image page: no nav, no chrome.
pub fn embed_page(record: &ArtRecord) -> Markup {
    html! {
        (maud::DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (record.title) }
                style { (maud::PreEscaped(components::PAGE_CSS)) }
            }
            body class="embed-body" {
                img src={ "/static/images/" (record.filename) } alt=(record.title);
            }
        }
    }
}

fn meta_row(label: &str, value: &str) -> Markup {
    html! {
        div class="meta-row" {
            span class="meta-label" { (label) }
            span class="meta-value" { (value) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64) -> ArtRecord {
        ArtRecord {
            filename: "fox.png".into(),
            title: "Fox".into(),
            stripped_filename: "fox".into(),
            filetype: "image/png".into(),
            ai_model: Some("Sora 1.0 Turbo".into()),
            artist: "Vix".into(),
            artist_pic: "discord".into(),
            discord_id: "1".into(),
            shapeshift_form: "Fox Form".into(),
            characters: vec!["Zee".into()],
            art_name: "portrait".into(),
            creation_date: "2024-01-01".into(),
            recieval_method: "Commission".into(),
            recieval_price: Some("$50".into()),
            is_ai: true,
            is_nsfw: false,
            is_disc_emoji: false,
            disable_download: false,
            id,
        }
    }

    #[test]
    fn view_page_includes_og_and_metadata() {
        let html = view_page("Artfolio", "https://art.example.com", &record(1_000_000), None)
            .into_string();
        assert!(html.contains("og:image"));
        assert!(html.contains("Sora 1.0 Turbo"));
        assert!(html.contains("$50"));
        assert!(html.contains("download"));
    }

    #[test]
    fn view_page_hides_download_when_disabled() {
        let mut r = record(1_000_000);
        r.disable_download = true;
        let html = view_page("Artfolio", "https://art.example.com", &r, None).into_string();
        assert!(!html.contains("download"));
    }

    #[test]
    fn embed_page_is_chromeless() {
        let html = embed_page(&record(1_000_000)).into_string();
        assert!(html.contains("/static/images/fox.png"));
        assert!(!html.contains("class=\"nav\""));
    }

    #[test]
    fn home_page_handles_empty_catalog() {
        let html = home_page("Artfolio", &[], None).into_string();
        assert!(html.contains("gallery is empty"));
    }
}
