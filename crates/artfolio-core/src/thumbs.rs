//! Thumbnail generation and the on-disk thumbnail cache.
//!
//! Thumbnails are expensive to produce (decode + resample + re-encode)
//! relative to serving them, so they are generated once — at startup, over
//! the whole catalog — and served as static files afterwards. "A file
//! exists at the derived path" is the entire cache-validity check: a
//! source image replaced in place under the same filename will not
//! regenerate its thumbnail unless `force` is set.

use std::fs;
use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, ImageDecoder, ImageReader};

use crate::error::{Error, Result};
use crate::record::ArtRecord;

/// Width every thumbnail is constrained to; height preserves aspect ratio.
pub const DEFAULT_TARGET_WIDTH: u32 = 280;

/// Lossy WebP quality for re-encoding.
pub const DEFAULT_QUALITY: f32 = 85.0;

/// Options for a thumbnail generation pass.
#[derive(Debug, Clone, Copy)]
pub struct ThumbnailOptions {
    /// Output width in pixels.
    pub target_width: u32,
    /// WebP encoder quality (0-100).
    pub quality: f32,
    /// Regenerate thumbnails that already exist on disk.
    pub force: bool,
}

impl Default for ThumbnailOptions {
    fn default() -> Self {
        Self {
            target_width: DEFAULT_TARGET_WIDTH,
            quality: DEFAULT_QUALITY,
            force: false,
        }
    }
}

/// Outcome of a generation pass over the catalog.
///
/// Per-item failures are collected here rather than logged-and-swallowed;
/// the caller decides whether to log, alert, or abort. A broken image
/// never fails the pass as a whole.
#[derive(Debug, Default)]
pub struct ThumbnailReport {
    /// Thumbnail filenames written during this pass.
    pub created: Vec<String>,
    /// Records whose thumbnail already existed (and `force` was off).
    pub skipped: usize,
    /// Source filenames that were absent from the image directory.
    pub missing: Vec<String>,
    /// Per-record failures: (record id, error).
    pub failures: Vec<(u64, Error)>,
}

impl ThumbnailReport {
    /// Whether the pass completed without a single per-item failure.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Ensure a thumbnail exists for every record with a present source image.
///
/// For each record: skip if the source file is missing (recorded, not an
/// error), skip if `<strippedFilename>.webp` already exists and `force`
/// is off, otherwise decode the source, apply its stored orientation,
/// resize to `opts.target_width` preserving aspect ratio, and write a
/// lossy WebP into `thumb_dir`.
pub fn generate_all(
    records: &[ArtRecord],
    image_dir: impl AsRef<Path>,
    thumb_dir: impl AsRef<Path>,
    opts: ThumbnailOptions,
) -> Result<ThumbnailReport> {
    let image_dir = image_dir.as_ref();
    let thumb_dir = thumb_dir.as_ref();
    fs::create_dir_all(thumb_dir)?;

    let mut report = ThumbnailReport::default();

    for record in records {
        let source = image_dir.join(&record.filename);
        if !source.is_file() {
            report.missing.push(record.filename.clone());
            continue;
        }

        let thumb_name = record.thumbnail_name();
        let dest = thumb_dir.join(&thumb_name);
        if dest.exists() && !opts.force {
            report.skipped += 1;
            continue;
        }

        match generate_one(&source, &dest, opts) {
            Ok(()) => report.created.push(thumb_name),
            Err(e) => {
                tracing::warn!(id = record.id, filename = %record.filename, error = %e,
                    "thumbnail generation failed");
                report.failures.push((record.id, e));
            }
        }
    }

    Ok(report)
}

/// Generate a single thumbnail from `source` to `dest`.
fn generate_one(source: &Path, dest: &Path, opts: ThumbnailOptions) -> Result<()> {
    let img = open_oriented(source)?;

    let (src_w, src_h) = (img.width(), img.height());
    let target_h = scaled_height(src_w, src_h, opts.target_width);
    let resized = img.resize_exact(opts.target_width, target_h, FilterType::Lanczos3);

    let rgba = resized.to_rgba8();
    let encoder = webp::Encoder::from_rgba(&rgba, resized.width(), resized.height());
    let encoded = encoder
        .encode_simple(false, opts.quality)
        .map_err(|e| Error::WebpEncode(format!("{e:?}")))?;

    fs::write(dest, &*encoded)?;
    Ok(())
}

/// Open an image and rotate/flip its pixels per the stored EXIF
/// orientation, so the buffer matches intended display rotation.
fn open_oriented(path: &Path) -> Result<DynamicImage> {
    let mut decoder = ImageReader::open(path)?.with_guessed_format()?.into_decoder()?;
    let orientation = decoder.orientation()?;
    let mut img = DynamicImage::from_decoder(decoder)?;
    img.apply_orientation(orientation);
    Ok(img)
}

/// Output height for a fixed target width, aspect ratio preserved.
fn scaled_height(src_w: u32, src_h: u32, target_w: u32) -> u32 {
    let h = (src_h as f64 * target_w as f64 / src_w as f64).round() as u32;
    h.max(1)
}
