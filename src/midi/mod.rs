//! Standard MIDI File loading
//!
//! Parses SMF data with midly into owned events carrying absolute tick
//! positions, and offers a merged, time-ordered view across all tracks.

mod error;
mod events;

pub use error::MidiError;
pub use events::{EventKind, MidiEvent, TextKind};

use midly::{Smf, Timing};
use std::path::Path;

/// A parsed MIDI file with absolute event times
#[derive(Debug, Clone)]
pub struct MidiFile {
    ticks_per_quarter: u16,
    tracks: Vec<Vec<MidiEvent>>,
}

impl MidiFile {
    /// Read and parse a MIDI file from disk
    pub fn open(path: &Path) -> Result<Self, MidiError> {
        let data = std::fs::read(path).map_err(|source| MidiError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&data)
    }

    /// Parse MIDI data already in memory
    pub fn from_bytes(data: &[u8]) -> Result<Self, MidiError> {
        let smf = Smf::parse(data)?;

        let ticks_per_quarter = match smf.header.timing {
            Timing::Metrical(tpq) => tpq.as_int(),
            Timing::Timecode(fps, subframes) => {
                return Err(MidiError::Timecode {
                    fps: fps.as_int(),
                    subframes,
                })
            }
        };
        if ticks_per_quarter == 0 {
            return Err(MidiError::ZeroTicksPerQuarter);
        }

        let tracks = smf
            .tracks
            .iter()
            .enumerate()
            .map(|(track_index, track)| {
                let mut tick = 0u64;
                track
                    .iter()
                    .map(|event| {
                        tick += event.delta.as_int() as u64;
                        MidiEvent {
                            tick,
                            track: track_index,
                            kind: EventKind::from_midly(&event.kind),
                        }
                    })
                    .collect()
            })
            .collect();

        Ok(Self {
            ticks_per_quarter,
            tracks,
        })
    }

    pub fn ticks_per_quarter(&self) -> u16 {
        self.ticks_per_quarter
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Events of a single track in file order
    pub fn track(&self, index: usize) -> &[MidiEvent] {
        self.tracks.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All events of all tracks as one stream ordered by absolute tick
    ///
    /// Events at the same tick keep track order, then file order.
    pub fn merged_events(&self) -> Vec<&MidiEvent> {
        let mut events: Vec<&MidiEvent> = self.tracks.iter().flatten().collect();
        events.sort_by_key(|event| event.tick);
        events
    }

    /// Song title: the first track name in the first track
    pub fn title(&self) -> Option<String> {
        self.track(0).iter().find_map(|event| match &event.kind {
            EventKind::Text {
                kind: TextKind::TrackName,
                text,
            } => Some(text.trim().to_string()),
            _ => None,
        })
        .filter(|title| !title.is_empty())
    }

    /// First time signature in the merged stream as (numerator, denominator power)
    pub fn time_signature(&self) -> Option<(u8, u8)> {
        self.merged_events()
            .into_iter()
            .find_map(|event| match event.kind {
                EventKind::TimeSignature {
                    numerator,
                    denominator_pow,
                } => Some((numerator, denominator_pow)),
                _ => None,
            })
    }

    /// First key signature in the merged stream as (sharps, minor)
    pub fn key_signature(&self) -> Option<(i8, bool)> {
        self.merged_events()
            .into_iter()
            .find_map(|event| match event.kind {
                EventKind::KeySignature { sharps, minor } => Some((sharps, minor)),
                _ => None,
            })
    }
}
