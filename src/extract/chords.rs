//! Chord symbol extraction
//!
//! Chords are found in two places:
//! 1. Yamaha XF chord events (sequencer-specific meta)
//! 2. Text, lyric and marker meta events containing a chord name

use crate::chord::{find_chord_figure, parse_chord};
use crate::midi::{EventKind, MidiFile, TextKind};
use crate::model::Harmony;
use crate::xf::{self, XF_CHORD_ID};

/// A chord symbol at an absolute tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordEvent {
    pub tick: u64,
    pub harmony: Harmony,
}

/// Result of scanning a file for chords
#[derive(Debug, Clone, Default)]
pub struct ChordScan {
    /// Chords in stream order
    pub chords: Vec<ChordEvent>,

    /// Human-readable trace of every candidate event
    pub trace: Vec<String>,
}

/// Scan all tracks for chord symbols
pub fn extract_chords(midi: &MidiFile) -> ChordScan {
    let mut scan = ChordScan::default();

    for event in midi.merged_events() {
        let tick = event.tick;
        let harmony = match &event.kind {
            EventKind::SequencerSpecific(data) => match xf::xf_event(data) {
                Some((id, payload)) => {
                    scan.trace
                        .push(format!("[TICK {}] Found XF event (ID: {:02X})", tick, id));
                    if id == XF_CHORD_ID {
                        xf_chord(payload, &mut scan.trace)
                    } else {
                        None
                    }
                }
                None => None,
            },
            EventKind::Text { kind, text }
                if matches!(kind, TextKind::Text | TextKind::Lyric | TextKind::Marker) =>
            {
                text_chord(*kind, text, tick, &mut scan.trace)
            }
            _ => None,
        };

        if let Some(harmony) = harmony {
            log::debug!("Chord {} at tick {}", harmony, tick);
            scan.chords.push(ChordEvent { tick, harmony });
        }
    }

    scan
}

fn xf_chord(payload: &[u8], trace: &mut Vec<String>) -> Option<Harmony> {
    let bytes = xf::chord_bytes(payload);
    if bytes.is_empty() {
        return None;
    }
    match xf::decode_chord(&bytes) {
        Ok(harmony) => {
            trace.push(format!("  Parsed XF chord as '{}'", harmony));
            Some(harmony)
        }
        Err(e) => {
            trace.push(format!("  Failed to parse XF chord bytes {:02X?}: {}", bytes, e));
            None
        }
    }
}

fn text_chord(kind: TextKind, text: &str, tick: u64, trace: &mut Vec<String>) -> Option<Harmony> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    trace.push(format!(
        "[TICK {}] Found text in '{}': '{}'",
        tick,
        kind.name(),
        text
    ));

    let figure = find_chord_figure(text)?;
    match parse_chord(figure) {
        Some(chord) => Some(Harmony::Chord(chord)),
        None => {
            trace.push(format!(
                "  Text '{}' looked like a chord but failed to parse",
                figure
            ));
            None
        }
    }
}
