//! Unified data model for lead sheet representation
//!
//! This module defines data structures that are independent of
//! both input (MIDI) and output (MusicXML) formats.

mod harmony;
mod lead_sheet;
mod note;
mod pitch;

pub use harmony::{ChordKind, ChordQuality, ChordSymbol, Degree, DegreeType, Harmony};
pub(crate) use lead_sheet::{gcd, lcm};
pub use lead_sheet::{KeySignature, LeadSheet, PlacedHarmony, RehearsalMark, TimeSignature};
pub use note::Note;
pub use pitch::{PitchName, SpelledPitch, Step};
