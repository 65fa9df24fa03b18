use serde::{Deserialize, Serialize};

/// A melody note (or simultaneous notes) on the quantized timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// MIDI note numbers, ascending; more than one means a chord
    pub pitches: Vec<u8>,

    /// Start position in divisions
    pub offset: u64,

    /// Length in divisions
    pub duration: u64,
}

impl Note {
    /// Create a single-pitch note
    pub fn single(pitch: u8, offset: u64, duration: u64) -> Self {
        Self {
            pitches: vec![pitch],
            offset,
            duration,
        }
    }

    /// End position in divisions
    pub fn end(&self) -> u64 {
        self.offset + self.duration
    }
}
