//! Conversion configuration

/// Settings for turning a MIDI file into a lead sheet
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// MIDI channel carrying the melody, 0-based (channel 1 = 0)
    pub melody_channel: u8,

    /// Whether XF rehearsal marks are written as MusicXML rehearsal directions
    pub include_rehearsal_marks: bool,

    /// Name of the single MusicXML part
    pub part_name: String,
}

impl ConvertConfig {
    /// Create a configuration with default settings (melody on channel 1)
    pub fn new() -> Self {
        Self {
            melody_channel: 0,
            include_rehearsal_marks: true,
            part_name: "Lead Sheet".to_string(),
        }
    }

    /// Set the melody channel (0-based)
    pub fn with_melody_channel(mut self, channel: u8) -> Self {
        self.melody_channel = channel.min(15);
        self
    }

    /// Enable or disable rehearsal marks
    pub fn with_rehearsal_marks(mut self, include: bool) -> Self {
        self.include_rehearsal_marks = include;
        self
    }

    pub fn with_part_name(mut self, part_name: impl Into<String>) -> Self {
        self.part_name = part_name.into();
        self
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self::new()
    }
}
