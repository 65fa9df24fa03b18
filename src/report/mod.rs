//! Diagnostic reports for inspecting MIDI files

mod check;

pub use check::{check_chords, check_rehearsal_marks, ChordCheck, RehearsalCheck};
