//! Musical content extraction from parsed MIDI
//!
//! Works on the merged event stream and produces tick-positioned melody
//! notes, chord symbols and rehearsal marks.

mod chords;
mod melody;
mod rehearsal;

pub use chords::{extract_chords, ChordEvent, ChordScan};
pub use melody::{extract_melody, MelodyNote};
pub use rehearsal::{extract_rehearsal_marks, RehearsalEvent};
