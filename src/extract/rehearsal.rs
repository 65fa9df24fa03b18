use crate::midi::{EventKind, MidiFile};
use crate::xf::{self, XF_REHEARSAL_ID};

/// An XF rehearsal mark at an absolute tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RehearsalEvent {
    pub tick: u64,
    pub text: String,

    /// The raw XF byte, kept for diagnostics
    pub raw: u8,
}

/// Scan all tracks for XF rehearsal marks
pub fn extract_rehearsal_marks(midi: &MidiFile) -> Vec<RehearsalEvent> {
    midi.merged_events()
        .into_iter()
        .filter_map(|event| match &event.kind {
            EventKind::SequencerSpecific(data) => match xf::xf_event(data) {
                Some((XF_REHEARSAL_ID, payload)) => {
                    xf::decode_rehearsal(payload).map(|mark| RehearsalEvent {
                        tick: event.tick,
                        text: mark.text,
                        raw: mark.raw,
                    })
                }
                _ => None,
            },
            _ => None,
        })
        .collect()
}
