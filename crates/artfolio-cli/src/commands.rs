//! The catalog management commands: add, list, edit, remove.
//!
//! All writes go through [`Catalog::save`]; the web server is a read-only
//! consumer and is never expected to run concurrently with a rewrite.

use std::io::BufRead;
use std::path::Path;

use anyhow::Context;

use artfolio_core::catalog::validate_filename;
use artfolio_core::record::{ARTIST_PIC_DISCORD, METHOD_COMMISSION};
use artfolio_core::{ArtRecord, Catalog};

use crate::prompt::{prompt_input, yes_no};

/// Filters for the `list` command; AND-combined.
#[derive(Debug, Default)]
pub struct ListFilters {
    pub id: Option<u64>,
    pub artist: Option<String>,
    pub title: Option<String>,
    pub nsfw: Option<bool>,
}

/// `add` — interactively append one record, id assigned at creation.
///
/// The referenced image file must already exist in `image_dir`; the check
/// happens before any further prompting, and nothing is written on
/// failure.
pub fn add(input: &mut impl BufRead, data_file: &Path, image_dir: &Path) -> anyhow::Result<()> {
    let mut catalog = Catalog::load_or_empty(data_file).context("loading catalog")?;

    println!("=== Add New Artwork ===");
    let filename = prompt_input(
        input,
        &format!("Filename (must exist in {})", image_dir.display()),
        None,
        true,
    )?;
    validate_filename(image_dir, &filename)?;

    let default_stripped = filename
        .rsplit_once('.')
        .map(|(stem, _)| stem.to_string())
        .unwrap_or_else(|| filename.clone());

    let title = prompt_input(input, "Title", Some(&filename), true)?;
    let stripped_filename =
        prompt_input(input, "Stripped Filename", Some(&default_stripped), true)?;
    let filetype = prompt_input(input, "Filetype (e.g., image/png)", Some("image/png"), true)?;

    let is_ai = yes_no(input, "Is this AI-generated?", Some(true))?;
    let is_nsfw = yes_no(input, "Is this NSFW?", Some(false))?;
    let is_disc_emoji = yes_no(input, "Is this a Discord emoji?", Some(false))?;

    let ai_model = if is_ai {
        Some(prompt_input(input, "AI Model", Some("Sora 1.0 Turbo"), true)?)
    } else {
        None
    };

    let artist = prompt_input(input, "Artist", None, true)?;
    let artist_pic = prompt_input(
        input,
        "Artist Pic (filename or 'discord')",
        Some(ARTIST_PIC_DISCORD),
        true,
    )?;
    let discord_id = if artist_pic == ARTIST_PIC_DISCORD {
        prompt_input(input, "Discord ID", None, true)?
    } else {
        String::new()
    };

    let shapeshift_form = format!(
        "{} Form",
        prompt_input(input, "Shapeshift Form", Some(""), false)?
    );
    let characters = parse_characters(&prompt_input(
        input,
        "Characters (comma-separated)",
        Some(""),
        false,
    )?);
    let art_name = prompt_input(input, "Art Name", Some(""), false)?;
    let creation_date = prompt_input(input, "Creation Date (YYYY-MM-DD)", Some(""), false)?;

    let recieval_method = prompt_input(input, "Recieval Method", Some("Self Made"), true)?;
    let recieval_price = if recieval_method == METHOD_COMMISSION {
        Some(prompt_input(input, "Recieval Price", None, true)?)
    } else {
        None
    };

    let disable_download = yes_no(input, "Disable download?", Some(false))?;

    let record = ArtRecord {
        filename,
        title,
        stripped_filename,
        filetype,
        ai_model,
        artist,
        artist_pic,
        discord_id,
        shapeshift_form,
        characters,
        art_name,
        creation_date,
        recieval_method,
        recieval_price,
        is_ai,
        is_nsfw,
        is_disc_emoji,
        disable_download,
        id: catalog.next_id(),
    };

    let id = record.id;
    catalog.push(record);
    catalog.save(data_file).context("saving catalog")?;
    println!("\nArtwork added with ID: {id}");
    Ok(())
}

/// `list` — print matching records, one per line.
pub fn list(data_file: &Path, filters: &ListFilters) -> anyhow::Result<()> {
    let catalog = Catalog::load_or_empty(data_file).context("loading catalog")?;
    if catalog.is_empty() {
        println!("No artwork found.");
        return Ok(());
    }

    let matches: Vec<&ArtRecord> = catalog
        .records()
        .iter()
        .filter(|r| matches_filters(r, filters))
        .collect();

    if matches.is_empty() {
        println!("No matching artwork.");
        return Ok(());
    }

    for art in matches {
        println!(
            "ID: {} | Title: {} | Artist: {} | AI: {} | NSFW: {}",
            art.id, art.title, art.artist, art.is_ai, art.is_nsfw
        );
    }
    Ok(())
}

/// `edit` — re-prompt every field with the current value as default.
pub fn edit(
    input: &mut impl BufRead,
    data_file: &Path,
    image_dir: &Path,
    id: u64,
) -> anyhow::Result<()> {
    let mut catalog = Catalog::load_or_empty(data_file).context("loading catalog")?;
    // Prompt against a copy so a validation failure leaves the catalog alone
    let Some(mut target) = catalog.find(id).cloned() else {
        println!("Artwork with ID {id} not found.");
        return Ok(());
    };

    println!("=== Editing Artwork ID {id} ===");
    println!("Leave blank to keep current value.");

    let filename = prompt_input(input, "Filename", Some(&target.filename), true)?;
    validate_filename(image_dir, &filename)?;
    target.filename = filename;

    target.title = prompt_input(input, "Title", Some(&target.title), true)?;
    target.stripped_filename = prompt_input(
        input,
        "Stripped Filename",
        Some(&target.stripped_filename),
        true,
    )?;
    target.filetype = prompt_input(input, "Filetype", Some(&target.filetype), true)?;

    target.is_ai = yes_no(input, "Is this AI-generated?", Some(target.is_ai))?;
    target.is_nsfw = yes_no(input, "Is this NSFW?", Some(target.is_nsfw))?;
    target.is_disc_emoji = yes_no(input, "Is this a Discord emoji?", Some(target.is_disc_emoji))?;

    target.ai_model = if target.is_ai {
        let current = target.ai_model.as_deref().unwrap_or("Sora 1.0 Turbo");
        Some(prompt_input(input, "AI Model", Some(current), true)?)
    } else {
        None
    };

    target.artist = prompt_input(input, "Artist", Some(&target.artist), true)?;
    target.artist_pic = prompt_input(input, "Artist Pic", Some(&target.artist_pic), true)?;
    target.discord_id = if target.artist_pic == ARTIST_PIC_DISCORD {
        prompt_input(input, "Discord ID", Some(&target.discord_id), true)?
    } else {
        String::new()
    };

    target.shapeshift_form = prompt_input(
        input,
        "Shapeshift Form",
        Some(&target.shapeshift_form),
        true,
    )?;
    let characters = prompt_input(
        input,
        "Characters (comma-separated)",
        Some(&target.characters.join(", ")),
        false,
    )?;
    target.characters = parse_characters(&characters);
    target.art_name = prompt_input(input, "Art Name", Some(&target.art_name), false)?;
    target.creation_date = prompt_input(input, "Creation Date", Some(&target.creation_date), false)?;

    target.recieval_method =
        prompt_input(input, "Recieval Method", Some(&target.recieval_method), true)?;
    target.recieval_price = if target.recieval_method == METHOD_COMMISSION {
        let current = target.recieval_price.clone().unwrap_or_default();
        let price = prompt_input(input, "Recieval Price", Some(&current), false)?;
        (!price.is_empty()).then_some(price)
    } else {
        None
    };

    target.disable_download = yes_no(input, "Disable download?", Some(target.disable_download))?;

    if let Some(slot) = catalog.find_mut(id) {
        *slot = target;
    }
    catalog.save(data_file).context("saving catalog")?;
    println!("Artwork updated.");
    Ok(())
}

/// `remove` — delete by id; unknown ids print a message and succeed.
pub fn remove(data_file: &Path, id: u64) -> anyhow::Result<()> {
    let mut catalog = Catalog::load_or_empty(data_file).context("loading catalog")?;
    if catalog.remove(id) {
        catalog.save(data_file).context("saving catalog")?;
        println!("Artwork ID {id} removed.");
    } else {
        println!("Artwork with ID {id} not found.");
    }
    Ok(())
}

fn matches_filters(record: &ArtRecord, filters: &ListFilters) -> bool {
    if let Some(id) = filters.id {
        if record.id != id {
            return false;
        }
    }
    if let Some(artist) = &filters.artist {
        if !record.artist.to_lowercase().contains(&artist.to_lowercase()) {
            return false;
        }
    }
    if let Some(title) = &filters.title {
        if !record.title.to_lowercase().contains(&title.to_lowercase()) {
            return false;
        }
    }
    if let Some(nsfw) = filters.nsfw {
        if record.is_nsfw != nsfw {
            return false;
        }
    }
    true
}

fn parse_characters(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',').map(|c| c.trim().to_string()).collect()
}
