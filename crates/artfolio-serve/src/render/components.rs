//! Shared HTML components used across the gallery pages.
//!
//! These are maud functions returning `Markup` fragments for composition
//! into full pages, plus the inline CSS constants.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use artfolio_core::ArtRecord;

/// Inline CSS for all gallery pages.
///
/// Flat, dark design; spacing and subtle background shifts for hierarchy.
pub const PAGE_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
:root{--bg:#121016;--fg:#f2eef7;--fg2:#b4abc4;--fg3:#776e88;--accent:#b86bff;--accent-hover:#9a45e8;--surface:#1b1722;--border:rgba(184,107,255,.18);--mono:"SF Mono",SFMono-Regular,ui-monospace,Menlo,monospace}
body{font-family:Inter,-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;line-height:1.6;color:var(--fg);background:var(--bg);min-height:100vh;display:flex;flex-direction:column;align-items:center;padding:1.5rem 1rem}
main{max-width:960px;width:100%;flex:1}
a{color:var(--accent);text-decoration:none}
a:hover{text-decoration:underline}
img{max-width:100%;height:auto}
.nav{display:flex;align-items:center;gap:1.25rem;width:100%;max-width:960px;margin-bottom:2rem}
.nav-brand{font-weight:800;font-size:1.2rem;letter-spacing:-.02em;color:var(--fg)}
.nav-links{display:flex;gap:1rem;margin-left:auto;font-size:.95rem}
.nav-user{font-family:var(--mono);font-size:.8rem;color:var(--fg3)}
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(220px,1fr));gap:1rem}
.card{background:var(--surface);border:1px solid var(--border);border-radius:10px;overflow:hidden;display:block;color:var(--fg);transition:border-color .15s}
.card:hover{border-color:var(--accent);text-decoration:none}
.card img{width:100%;aspect-ratio:1;object-fit:cover;display:block;background:var(--border)}
.card-body{padding:.65rem .85rem}
.card-title{font-weight:600;font-size:.95rem;overflow:hidden;text-overflow:ellipsis;white-space:nowrap}
.card-artist{font-size:.8rem;color:var(--fg3)}
.badge{display:inline-block;background:var(--bg);color:var(--fg3);font-size:.7rem;padding:.1rem .5rem;border-radius:100px;border:1px solid var(--border);margin-left:.35rem;vertical-align:1px}
.page-title{font-size:1.6rem;font-weight:700;letter-spacing:-.02em;margin-bottom:1.25rem}
.viewer{display:flex;flex-direction:column;gap:1.25rem}
.viewer-image{border-radius:10px;overflow:hidden;background:var(--surface);border:1px solid var(--border)}
.viewer-image img{width:100%;display:block}
.viewer-meta{background:var(--surface);border:1px solid var(--border);border-radius:10px;padding:1.25rem}
.meta-row{display:flex;gap:.75rem;padding:.3rem 0;font-size:.95rem}
.meta-label{color:var(--fg3);width:130px;flex-shrink:0}
.meta-value{color:var(--fg2);word-break:break-word}
.viewer-actions{display:flex;gap:.75rem}
.btn{display:inline-block;background:var(--accent);color:#fff;border-radius:8px;padding:.5rem 1rem;font-size:.9rem;font-weight:600}
.btn:hover{background:var(--accent-hover);text-decoration:none}
.footer{margin-top:2.5rem;font-size:.8rem;color:var(--fg3)}
.embed-body{padding:0;background:#000;align-items:stretch}
.embed-body main{max-width:none}
.embed-body img{width:100%;height:100vh;object-fit:contain;display:block}
"#;

/// CSS for standalone error pages.
pub const ERROR_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:Inter,-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;background:#121016;color:#f2eef7;min-height:100vh;display:flex;align-items:center;justify-content:center;padding:2rem 1rem;text-align:center}
.error-page h1{font-size:1.8rem;margin-bottom:.75rem}
.error-page p{color:#b4abc4;margin-bottom:1.25rem;max-width:420px}
.error-page a{color:#b86bff;text-decoration:none}
.error-page a:hover{text-decoration:underline}
"#;

/// Full page shell: doctype, head with CSS, nav, body, footer.
///
/// `head_extra` carries page-specific meta (Open Graph tags on the share
/// pages); `username` is the authenticated identity from the session, if
/// any.
pub fn shell(
    site_name: &str,
    title: &str,
    head_extra: Markup,
    username: Option<&str>,
    body: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " — " (site_name) }
                style { (PreEscaped(PAGE_CSS)) }
                (head_extra)
            }
            body {
                nav class="nav" {
                    a class="nav-brand" href="/" { (site_name) }
                    div class="nav-links" {
                        a href="/" { "Home" }
                        a href="/library" { "Library" }
                        a href="/favs" { "Favorites" }
                        @match username {
                            Some(name) => {
                                span class="nav-user" { (name) }
                            }
                            None => {
                                a href="/api/v1/oauth/login" { "Login" }
                            }
                        }
                    }
                }
                main { (body) }
                footer class="footer" {
                    (site_name) " — a personal art gallery"
                }
            }
        }
    }
}

/// One gallery card linking to the artwork's share page.
pub fn art_card(record: &ArtRecord) -> Markup {
    html! {
        a class="card" href={ "/view/" (record.id) } {
            img src={ "/static/thumbs/" (record.thumbnail_name()) }
                alt=(record.title) loading="lazy";
            div class="card-body" {
                div class="card-title" {
                    (record.title)
                    @if record.is_ai { span class="badge" { "AI" } }
                    @if record.is_nsfw { span class="badge" { "NSFW" } }
                }
                div class="card-artist" { (record.artist) }
            }
        }
    }
}

/// Grid of gallery cards.
pub fn art_grid(records: &[ArtRecord]) -> Markup {
    html! {
        div class="grid" {
            @for record in records {
                (art_card(record))
            }
        }
    }
}

/// Open Graph + Twitter meta tags for an artwork share page.
pub fn og_tags(record: &ArtRecord, base_url: &str, site_name: &str) -> Markup {
    let page_url = format!("{base_url}/view/{}", record.id);
    let image_url = format!("{base_url}/static/thumbs/{}", record.thumbnail_name());
    let description = if record.art_name.is_empty() {
        format!("Art by {}", record.artist)
    } else {
        format!("{} — art by {}", record.art_name, record.artist)
    };

    html! {
        meta property="og:title" content=(record.title);
        meta property="og:description" content=(description);
        meta property="og:type" content="website";
        meta property="og:url" content=(page_url);
        meta property="og:image" content=(image_url);
        meta property="og:site_name" content=(site_name);
        meta name="twitter:card" content="summary_large_image";
        meta name="twitter:image" content=(image_url);
        meta name="theme-color" content="#b86bff";
        link rel="canonical" href=(page_url);
    }
}
