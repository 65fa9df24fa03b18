//! MusicXML lead sheet output
//!
//! Lays the lead sheet out into measures and writes a score-partwise
//! document with one part.

mod durations;
mod layout;
mod writer;

pub use durations::{split_duration, NoteType, NoteValue};
pub use layout::{layout_measures, Measure, MeasureElement, NoteElement};
pub use writer::{write_musicxml, WriteOptions};

use crate::model::LeadSheet;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Write the lead sheet to `path`, creating parent directories as needed
pub fn write_lead_sheet(sheet: &LeadSheet, options: &WriteOptions, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {:?}", parent))?;
    }

    let bytes = write_musicxml(sheet, options, Vec::new())?;
    fs::write(path, bytes).with_context(|| format!("Failed to write MusicXML: {:?}", path))?;
    Ok(())
}
