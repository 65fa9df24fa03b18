//! Chord and rehearsal mark checks
//!
//! Dump what the extractor sees in a file, event by event, without
//! converting anything.

use crate::extract::{extract_chords, extract_rehearsal_marks, ChordScan, RehearsalEvent};
use crate::midi::MidiFile;
use anyhow::{bail, Context, Result};
use std::path::Path;

/// Outcome of a chord check
#[derive(Debug, Clone)]
pub struct ChordCheck {
    pub ticks_per_quarter: u16,
    pub scan: ChordScan,
}

/// Outcome of a rehearsal mark check
#[derive(Debug, Clone)]
pub struct RehearsalCheck {
    pub ticks_per_quarter: u16,
    pub marks: Vec<RehearsalEvent>,
}

fn load(path: &Path) -> Result<MidiFile> {
    if !path.exists() {
        bail!("File not found: {:?}", path);
    }
    MidiFile::open(path).with_context(|| format!("Failed to load MIDI file: {:?}", path))
}

/// Log every chord candidate in the file and how it was interpreted
pub fn check_chords(path: &Path) -> Result<ChordCheck> {
    let midi = load(path)?;
    let ticks_per_quarter = midi.ticks_per_quarter();
    log::info!("Checking chords in {:?} ({} ticks per quarter)", path, ticks_per_quarter);

    let scan = extract_chords(&midi);
    for line in &scan.trace {
        log::info!("{}", line);
    }

    for chord in &scan.chords {
        let quarters = chord.tick as f64 / ticks_per_quarter.max(1) as f64;
        log::info!("  - {:>8.3} q  {}", quarters, chord.harmony);
    }
    log::info!("✅ Found {} chord(s)", scan.chords.len());

    Ok(ChordCheck {
        ticks_per_quarter,
        scan,
    })
}

/// Log every XF rehearsal mark in the file
pub fn check_rehearsal_marks(path: &Path) -> Result<RehearsalCheck> {
    let midi = load(path)?;
    let ticks_per_quarter = midi.ticks_per_quarter();
    log::info!(
        "Checking rehearsal marks in {:?} ({} ticks per quarter)",
        path,
        ticks_per_quarter
    );

    let marks = extract_rehearsal_marks(&midi);
    for mark in &marks {
        log::info!(
            "  - [TICK {}] {} (raw 0x{:02X})",
            mark.tick,
            mark.text,
            mark.raw
        );
    }
    log::info!("✅ Found {} rehearsal mark(s)", marks.len());

    Ok(RehearsalCheck {
        ticks_per_quarter,
        marks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use midly::num::{u15, u28};
    use midly::{Format, Header, MetaMessage, Smf, Timing, TrackEvent, TrackEventKind};
    use std::fs;
    use tempfile::TempDir;

    fn write_midi(dir: &TempDir, meta: Vec<MetaMessage<'static>>) -> std::path::PathBuf {
        let mut track: Vec<TrackEvent<'static>> = meta
            .into_iter()
            .map(|m| TrackEvent {
                delta: u28::from(0u32),
                kind: TrackEventKind::Meta(m),
            })
            .collect();
        track.push(TrackEvent {
            delta: u28::from(0u32),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        });
        let smf = Smf {
            header: Header::new(Format::SingleTrack, Timing::Metrical(u15::from(480u16))),
            tracks: vec![track],
        };
        let mut data = Vec::new();
        smf.write_std(&mut data).unwrap();

        let path = dir.path().join("check.mid");
        fs::write(&path, data).unwrap();
        path
    }

    #[test]
    fn test_check_chords() {
        let dir = TempDir::new().unwrap();
        let path = write_midi(
            &dir,
            vec![
                MetaMessage::SequencerSpecific(&[0x43, 0x7B, 0x01, 0x31, 0x00, 0x31, 0x00]),
                MetaMessage::Marker(b"Dm7"),
            ],
        );

        let check = check_chords(&path).unwrap();
        assert_eq!(check.ticks_per_quarter, 480);
        assert_eq!(check.scan.chords.len(), 2);
        assert!(check.scan.trace[0].contains("Found XF event (ID: 01)"));
    }

    #[test]
    fn test_check_rehearsal_marks() {
        let dir = TempDir::new().unwrap();
        let path = write_midi(
            &dir,
            vec![MetaMessage::SequencerSpecific(&[0x43, 0x7B, 0x02, 0x13])],
        );

        let check = check_rehearsal_marks(&path).unwrap();
        assert_eq!(check.marks.len(), 1);
        assert_eq!(check.marks[0].text, "A'");
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        assert!(check_chords(&dir.path().join("absent.mid")).is_err());
        assert!(check_rehearsal_marks(&dir.path().join("absent.mid")).is_err());
    }
}
