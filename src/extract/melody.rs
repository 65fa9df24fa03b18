use crate::midi::{EventKind, MidiFile};
use std::collections::HashMap;

/// A sounding note with absolute start and end ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MelodyNote {
    pub pitch: u8,
    pub velocity: u8,
    pub start_tick: u64,
    pub end_tick: u64,
}

impl MelodyNote {
    pub fn duration_ticks(&self) -> u64 {
        self.end_tick - self.start_tick
    }
}

/// Pair note-on/note-off events on one channel (0-15) into notes
///
/// A note-on with velocity 0 counts as a note-off. A second note-on for a
/// pitch that is already sounding restarts it. Notes never released are
/// dropped. The result is in release order.
pub fn extract_melody(midi: &MidiFile, channel: u8) -> Vec<MelodyNote> {
    let mut notes = Vec::new();
    let mut open_notes: HashMap<u8, (u64, u8)> = HashMap::new();

    let on_channel = midi
        .merged_events()
        .into_iter()
        .filter(|event| event.kind.channel() == Some(channel));

    for event in on_channel {
        match event.kind {
            EventKind::NoteOn { key, velocity, .. } if velocity > 0 => {
                open_notes.insert(key, (event.tick, velocity));
            }
            EventKind::NoteOn { key, .. } | EventKind::NoteOff { key, .. } => {
                if let Some((start_tick, velocity)) = open_notes.remove(&key) {
                    notes.push(MelodyNote {
                        pitch: key,
                        velocity,
                        start_tick,
                        end_tick: event.tick,
                    });
                }
            }
            _ => {}
        }
    }

    if !open_notes.is_empty() {
        log::debug!(
            "Dropping {} note(s) on channel {} that were never released",
            open_notes.len(),
            channel + 1
        );
    }

    notes
}
