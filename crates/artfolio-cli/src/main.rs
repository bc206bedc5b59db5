//! artmgr — offline catalog manager for the artfolio gallery.
//!
//! Manages the flat `art.json` catalog: add entries interactively, list
//! with filters, edit in place, remove by id. The web server never
//! mutates the catalog; this tool is the only writer.
//!
//! # Usage
//!
//! ```bash
//! artmgr add
//! artmgr list --artist vix --nsfw false
//! artmgr edit 1000003
//! artmgr remove 1000003
//! ```

mod commands;
mod prompt;

use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::ListFilters;

/// Manage the art catalog (art.json).
#[derive(Parser, Debug)]
#[command(name = "artmgr")]
#[command(about = "Manage the art catalog (art.json)")]
#[command(version)]
struct Cli {
    /// Path to the catalog file.
    #[arg(long, env = "ARTFOLIO_DATA_FILE", default_value = "data/art.json")]
    data_file: PathBuf,

    /// Directory holding the source images.
    #[arg(long, env = "ARTFOLIO_IMAGE_DIR", default_value = "static/images")]
    image_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a new artwork entry (interactive).
    Add,

    /// List artwork entries.
    List {
        /// Filter by ID.
        #[arg(long)]
        id: Option<u64>,

        /// Filter by artist name (substring, case-insensitive).
        #[arg(long)]
        artist: Option<String>,

        /// Filter by title (substring, case-insensitive).
        #[arg(long)]
        title: Option<String>,

        /// Filter by NSFW flag (true/false).
        #[arg(long)]
        nsfw: Option<bool>,
    },

    /// Edit an existing artwork (interactive, blank keeps current value).
    Edit {
        /// ID of the artwork to edit.
        id: u64,
    },

    /// Remove an artwork.
    Remove {
        /// ID of the artwork to remove.
        id: u64,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();

    // The image directory must exist for filename validation to make sense
    std::fs::create_dir_all(&cli.image_dir)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();

    match cli.command {
        Command::Add => commands::add(&mut input, &cli.data_file, &cli.image_dir),
        Command::List {
            id,
            artist,
            title,
            nsfw,
        } => commands::list(
            &cli.data_file,
            &ListFilters {
                id,
                artist,
                title,
                nsfw,
            },
        ),
        Command::Edit { id } => commands::edit(&mut input, &cli.data_file, &cli.image_dir, id),
        Command::Remove { id } => commands::remove(&cli.data_file, id),
    }
}
