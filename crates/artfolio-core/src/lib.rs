//! Core types and logic for the artfolio gallery.
//!
//! This crate provides:
//! - The [`ArtRecord`] data model matching the on-disk `art.json` schema
//! - The [`Catalog`] store (full load, full rewrite, id assignment)
//! - The visibility filter (mature-content / AI-generated narrowing)
//! - Thumbnail generation (resize + WebP re-encode, cached on disk)
//! - Shared error types

mod error;

pub mod catalog;
pub mod filter;
pub mod record;
pub mod thumbs;

/// First id assigned to an empty catalog. Ids grow monotonically from
/// here and are never reused after removal.
pub const FIRST_ID: u64 = 1_000_000;

pub use catalog::Catalog;
pub use error::{Error, Result};
pub use filter::{apply, show_flag};
pub use record::ArtRecord;
pub use thumbs::{ThumbnailOptions, ThumbnailReport, generate_all};

#[cfg(test)]
pub(crate) mod testutil {
    use crate::ArtRecord;

    /// Build a minimal record for tests.
    pub fn record(id: u64, is_ai: bool, is_nsfw: bool) -> ArtRecord {
        ArtRecord {
            filename: format!("art-{id}.png"),
            title: format!("Artwork {id}"),
            stripped_filename: format!("art-{id}"),
            filetype: "image/png".to_string(),
            ai_model: is_ai.then(|| "Sora 1.0 Turbo".to_string()),
            artist: "Vix".to_string(),
            artist_pic: "discord".to_string(),
            discord_id: "123456789012345678".to_string(),
            shapeshift_form: "Fox Form".to_string(),
            characters: vec!["Zee".to_string()],
            art_name: String::new(),
            creation_date: "2024-01-01".to_string(),
            recieval_method: "Self Made".to_string(),
            recieval_price: None,
            is_ai,
            is_nsfw,
            is_disc_emoji: false,
            disable_download: false,
            id,
        }
    }
}
