//! Owned MIDI events with absolute timing

use midly::{MetaMessage, MidiMessage, TrackEventKind};

/// Which meta event a piece of text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    Text,
    Lyric,
    Marker,
    TrackName,
}

impl TextKind {
    /// Name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            TextKind::Text => "text",
            TextKind::Lyric => "lyrics",
            TextKind::Marker => "marker",
            TextKind::TrackName => "track_name",
        }
    }
}

/// The subset of MIDI event content the converter cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    NoteOn { channel: u8, key: u8, velocity: u8 },
    NoteOff { channel: u8, key: u8, velocity: u8 },
    /// Any other channel voice message
    Channel { channel: u8 },
    SysEx,
    Text { kind: TextKind, text: String },
    SequencerSpecific(Vec<u8>),
    TimeSignature { numerator: u8, denominator_pow: u8 },
    KeySignature { sharps: i8, minor: bool },
    OtherMeta,
}

impl EventKind {
    pub(crate) fn from_midly(kind: &TrackEventKind<'_>) -> Self {
        match *kind {
            TrackEventKind::Midi { channel, message } => {
                let channel = channel.as_int();
                match message {
                    MidiMessage::NoteOn { key, vel } => EventKind::NoteOn {
                        channel,
                        key: key.as_int(),
                        velocity: vel.as_int(),
                    },
                    MidiMessage::NoteOff { key, vel } => EventKind::NoteOff {
                        channel,
                        key: key.as_int(),
                        velocity: vel.as_int(),
                    },
                    _ => EventKind::Channel { channel },
                }
            }
            TrackEventKind::SysEx(_) | TrackEventKind::Escape(_) => EventKind::SysEx,
            TrackEventKind::Meta(meta) => Self::from_meta(meta),
        }
    }

    fn from_meta(meta: MetaMessage<'_>) -> Self {
        match meta {
            MetaMessage::Text(bytes) => Self::text(TextKind::Text, bytes),
            MetaMessage::Lyric(bytes) => Self::text(TextKind::Lyric, bytes),
            MetaMessage::Marker(bytes) => Self::text(TextKind::Marker, bytes),
            MetaMessage::TrackName(bytes) => Self::text(TextKind::TrackName, bytes),
            MetaMessage::SequencerSpecific(data) => EventKind::SequencerSpecific(data.to_vec()),
            MetaMessage::TimeSignature(numerator, denominator_pow, _, _) => {
                EventKind::TimeSignature {
                    numerator,
                    denominator_pow,
                }
            }
            MetaMessage::KeySignature(sharps, minor) => EventKind::KeySignature { sharps, minor },
            _ => EventKind::OtherMeta,
        }
    }

    fn text(kind: TextKind, bytes: &[u8]) -> Self {
        EventKind::Text {
            kind,
            text: decode_latin1(bytes),
        }
    }

    /// Channel of a channel voice message (0-15)
    pub fn channel(&self) -> Option<u8> {
        match *self {
            EventKind::NoteOn { channel, .. }
            | EventKind::NoteOff { channel, .. }
            | EventKind::Channel { channel } => Some(channel),
            _ => None,
        }
    }
}

/// Meta text is not guaranteed to be UTF-8; every byte maps to one char
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// An event at an absolute position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiEvent {
    /// Absolute time in ticks from the start of the track
    pub tick: u64,

    /// Index of the track the event came from
    pub track: usize,

    pub kind: EventKind,
}
