//! The visibility filter: narrows a catalog snapshot by the two
//! client-supplied preference flags (mature content, AI-generated).
//!
//! Pure functions, safe to call repeatedly per request.

use crate::record::ArtRecord;

/// Decode a client-supplied preference signal into a boolean.
///
/// The cookies are loosely-typed strings; only `"true"` (any case) and
/// `"1"` opt in. Absent or any other value means false.
pub fn show_flag(value: Option<&str>) -> bool {
    match value {
        Some(v) => v.eq_ignore_ascii_case("true") || v == "1",
        None => false,
    }
}

/// Filter `records` by the resolved preference flags, preserving order.
///
/// A record is excluded when its `isNSFW` flag is set and `show_nsfw` is
/// false, independently excluded when `isAI` is set and `show_ai` is
/// false. Idempotent: filtering an already-filtered list with the same
/// flags is a no-op.
pub fn apply(records: &[ArtRecord], show_ai: bool, show_nsfw: bool) -> Vec<ArtRecord> {
    records
        .iter()
        .filter(|r| (show_nsfw || !r.is_nsfw) && (show_ai || !r.is_ai))
        .cloned()
        .collect()
}
