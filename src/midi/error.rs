use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a Standard MIDI File
#[derive(Debug, Error)]
pub enum MidiError {
    #[error("failed to read MIDI file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse MIDI data: {0}")]
    Parse(#[from] midly::Error),

    #[error("SMPTE timecode timing ({fps} fps, {subframes} subframes) is not supported; ticks per quarter note are required")]
    Timecode { fps: u8, subframes: u8 },

    #[error("MIDI header declares zero ticks per quarter note")]
    ZeroTicksPerQuarter,
}
