//! Yamaha XF meta event decoding
//!
//! XF files carry chord names and rehearsal marks in sequencer-specific
//! meta events (`FF 7F len 43 7B id ...`).

mod chord;
mod rehearsal;

pub use chord::{chord_bytes, decode_chord, XfChordError, XF_CHORD_TYPES};
pub use rehearsal::{decode_rehearsal, XfRehearsal};

/// Manufacturer/format prefix of every XF sequencer-specific event
pub const XF_HEADER: [u8; 2] = [0x43, 0x7B];
/// Chord name event ID
pub const XF_CHORD_ID: u8 = 0x01;
/// Rehearsal mark event ID
pub const XF_REHEARSAL_ID: u8 = 0x02;

/// Split sequencer-specific data into (event ID, payload) when it is an XF event
pub fn xf_event(data: &[u8]) -> Option<(u8, &[u8])> {
    if data.len() > 2 && data[..2] == XF_HEADER {
        Some((data[2], &data[3..]))
    } else {
        None
    }
}
