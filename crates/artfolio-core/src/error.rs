//! Error types shared across the artfolio crates.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while working with the catalog or thumbnails.
#[derive(Error, Debug)]
pub enum Error {
    /// The catalog file does not exist at the expected path.
    #[error("catalog file not found: {0}")]
    CatalogMissing(PathBuf),

    /// No record with the given id exists in the catalog.
    #[error("artwork {0} not found")]
    NotFound(u64),

    /// A record references an image file that is not present in the
    /// image directory. Raised before any catalog write happens.
    #[error("image file not found in {dir}: {filename}")]
    ImageMissing {
        /// Directory that was searched.
        dir: PathBuf,
        /// The missing filename.
        filename: String,
    },

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Image decode/resize error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// WebP encoding failed.
    #[error("WebP encode error: {0}")]
    WebpEncode(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let err = Error::NotFound(1_000_042);
        assert_eq!(err.to_string(), "artwork 1000042 not found");
    }

    #[test]
    fn image_missing_display() {
        let err = Error::ImageMissing {
            dir: PathBuf::from("static/images"),
            filename: "fox.png".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("static/images"));
        assert!(msg.contains("fox.png"));
    }

    #[test]
    fn from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
