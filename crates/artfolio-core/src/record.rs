//! The art record data model.
//!
//! Field names are serialized exactly as they appear in `art.json`,
//! which predates this implementation and uses mixed camelCase (including
//! the historical misspelling `recievalMethod`).

use serde::{Deserialize, Serialize};

/// Sentinel value of [`ArtRecord::artist_pic`] indicating the artist's
/// picture should be resolved via their Discord account.
pub const ARTIST_PIC_DISCORD: &str = "discord";

/// Recieval method that requires a price to be recorded.
pub const METHOD_COMMISSION: &str = "Commission";

/// One catalog entry describing a single artwork and its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtRecord {
    /// Source image filename; must exist in the image directory at
    /// creation/edit time. Validated, never copied.
    pub filename: String,

    /// Display title.
    pub title: String,

    /// Extension-less identifier used to name the derived thumbnail
    /// (`<strippedFilename>.webp`).
    pub stripped_filename: String,

    /// MIME type of the source file, e.g. `image/png`.
    pub filetype: String,

    /// Populated only when `is_ai` is true.
    pub ai_model: Option<String>,

    /// Artist name.
    pub artist: String,

    /// Either a literal filename or the sentinel `"discord"`.
    pub artist_pic: String,

    /// Discord snowflake, non-empty only when `artist_pic == "discord"`.
    #[serde(rename = "discordID")]
    pub discord_id: String,

    /// Which shapeshift form is depicted.
    pub shapeshift_form: String,

    /// Characters depicted, in display order.
    pub characters: Vec<String>,

    /// Name of the art piece itself (distinct from the page title).
    pub art_name: String,

    /// Free-text creation date.
    pub creation_date: String,

    /// How the piece was obtained, e.g. `Self Made` or `Commission`.
    pub recieval_method: String,

    /// Populated only when `recieval_method == "Commission"`.
    pub recieval_price: Option<String>,

    /// AI-generated flag; gates visibility via the `showAI` preference.
    #[serde(rename = "isAI")]
    pub is_ai: bool,

    /// Mature-content flag; gates visibility via the `showNSFW` preference.
    #[serde(rename = "isNSFW")]
    pub is_nsfw: bool,

    /// Whether the piece doubles as a Discord emoji.
    pub is_disc_emoji: bool,

    /// Hide the download button on the viewer page.
    pub disable_download: bool,

    /// Unique, monotonically assigned identity. Never reused.
    pub id: u64,
}

impl ArtRecord {
    /// Filename of this record's derived thumbnail.
    pub fn thumbnail_name(&self) -> String {
        format!("{}.webp", self.stripped_filename)
    }

    /// Whether the artist picture should be looked up via Discord.
    pub fn uses_discord_pic(&self) -> bool {
        self.artist_pic == ARTIST_PIC_DISCORD && !self.discord_id.is_empty()
    }
}
