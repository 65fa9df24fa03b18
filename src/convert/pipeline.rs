//! Main conversion pipeline orchestration

use super::assemble::{assemble_lead_sheet, Extracted};
use super::config::ConvertConfig;
use super::organizer::ConversionJob;
use crate::extract::{extract_chords, extract_melody, extract_rehearsal_marks};
use crate::midi::MidiFile;
use crate::model::LeadSheet;
use crate::musicxml::{write_lead_sheet, WriteOptions};
use crate::quantize::Quantizer;
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// What one conversion produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub notes: usize,
    pub chords: usize,
    pub rehearsal_marks: usize,
    pub measures: u64,
}

/// Main conversion pipeline
pub struct ConvertPipeline<Q: Quantizer> {
    config: ConvertConfig,
    quantizer: Q,
    options: WriteOptions,
}

impl<Q: Quantizer> ConvertPipeline<Q> {
    /// Create a new conversion pipeline
    pub fn new(config: ConvertConfig, quantizer: Q) -> Self {
        let options = WriteOptions::default().with_part_name(config.part_name.clone());
        Self {
            config,
            quantizer,
            options,
        }
    }

    /// Override document settings such as the encoding date
    pub fn with_write_options(mut self, options: WriteOptions) -> Self {
        self.options = options;
        self
    }

    /// Read a MIDI file and build its lead sheet
    pub fn build_lead_sheet(&self, input: &Path) -> Result<LeadSheet> {
        log::info!("Loading MIDI file: {:?}", input);
        let midi = MidiFile::open(input)
            .with_context(|| format!("Failed to load MIDI file: {:?}", input))?;
        log::debug!(
            "  - {} track(s), {} ticks per quarter",
            midi.track_count(),
            midi.ticks_per_quarter()
        );

        let channel = self.config.melody_channel;
        let melody = extract_melody(&midi, channel);
        log::info!("  - Melody: {} note(s) on channel {}", melody.len(), channel + 1);

        let chords = extract_chords(&midi).chords;
        if chords.is_empty() {
            log::warn!("No chord symbols found in {:?}", input);
        } else {
            log::info!("  - Chords: {}", chords.len());
        }

        let rehearsal_marks = if self.config.include_rehearsal_marks {
            extract_rehearsal_marks(&midi)
        } else {
            Vec::new()
        };
        if !rehearsal_marks.is_empty() {
            log::info!("  - Rehearsal marks: {}", rehearsal_marks.len());
        }

        let extracted = Extracted {
            melody,
            chords,
            rehearsal_marks,
        };
        let sheet = assemble_lead_sheet(&midi, &extracted, &self.quantizer, &self.config)
            .with_context(|| format!("Failed to lay out {:?}", input))?;

        log::info!(
            "  - Time signature {}/{}, {} division(s) per quarter",
            sheet.time_signature.beats,
            sheet.time_signature.beat_type,
            sheet.divisions
        );
        match sheet.key_signature {
            Some(key) => log::info!("  - Key signature: {} fifths ({})", key.fifths, key.mode()),
            None => log::debug!("  - No key signature"),
        }

        Ok(sheet)
    }

    /// Convert one MIDI file to MusicXML
    pub fn convert(&self, input: &Path, output: &Path) -> Result<ConversionSummary> {
        let sheet = self.build_lead_sheet(input)?;

        write_lead_sheet(&sheet, &self.options, output)
            .with_context(|| format!("Failed to convert {:?}", input))?;
        log::info!("✅ Wrote {:?}", output);

        Ok(ConversionSummary {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            notes: sheet.notes.len(),
            chords: sheet.harmonies.len(),
            rehearsal_marks: sheet.rehearsal_marks.len(),
            measures: sheet.measure_count(),
        })
    }

    /// Convert many files in parallel; each result is reported separately
    pub fn convert_all(&self, jobs: &[ConversionJob]) -> Vec<Result<ConversionSummary>> {
        log::info!("Converting {} file(s)...", jobs.len());

        jobs.par_iter()
            .map(|job| self.convert(&job.input, &job.output))
            .collect()
    }
}
