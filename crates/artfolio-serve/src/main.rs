//! Artfolio web server entry point.
//!
//! Startup sequence: load config, run the thumbnail generation pass over
//! the full catalog (best-effort; a broken image never prevents the
//! server from starting), then bind and serve.

use axum::http::Request;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use artfolio_core::{Catalog, ThumbnailOptions};
use artfolio_serve::{router, AppState, Config};

/// Artfolio — personal art gallery server.
#[derive(Parser, Debug)]
#[command(name = "artfolio-serve")]
#[command(about = "Personal art gallery web server", long_about = None)]
struct Args {
    /// Path to .env file (optional).
    #[arg(long, env = "DOTENV_PATH", default_value = ".env")]
    dotenv: String,

    /// Regenerate every thumbnail at startup, even if one already exists.
    #[arg(long)]
    refresh_thumbs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load .env file if it exists
    if std::path::Path::new(&args.dotenv).exists() {
        dotenvy::from_path(&args.dotenv)?;
        eprintln!("Loaded environment from {}", args.dotenv);
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    let bind_addr = config.bind_addr.clone();

    // Thumbnail population pass, before the first request is served
    generate_thumbnails(&config, args.refresh_thumbs);

    // Create application state
    let state = AppState::new(config)?;

    // Build router with middleware
    let app = router(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::span!(
                    Level::INFO,
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "starting gallery server");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Run the startup thumbnail pass and log its report.
///
/// Best-effort: a missing or unreadable catalog only skips the pass, and
/// per-image failures are reported without aborting startup.
fn generate_thumbnails(config: &Config, force: bool) {
    let catalog = match Catalog::load(&config.data_file) {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::warn!(error = %e, "skipping thumbnail pass, catalog unavailable");
            return;
        }
    };

    let opts = ThumbnailOptions {
        target_width: config.thumb_width,
        force,
        ..Default::default()
    };

    match artfolio_core::generate_all(catalog.records(), &config.image_dir, &config.thumb_dir, opts)
    {
        Ok(report) => {
            tracing::info!(
                created = report.created.len(),
                skipped = report.skipped,
                missing = report.missing.len(),
                failed = report.failures.len(),
                "thumbnail pass complete"
            );
            for (id, error) in &report.failures {
                tracing::warn!(id, error = %error, "thumbnail failed");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "thumbnail pass could not run");
        }
    }
}
