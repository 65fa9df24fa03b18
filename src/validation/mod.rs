//! Validation utilities
//!
//! Re-reads generated MusicXML to confirm it is well-formed and that every
//! measure is filled exactly.

mod musicxml;

pub use musicxml::{validate_musicxml, validate_musicxml_str, ValidationReport};
