//! Lead Sheet Converter - MIDI to MusicXML lead sheets
//!
//! This library reads Standard MIDI Files, picks out the melody, chord
//! symbols (Yamaha XF chord events or chord names in text events) and
//! rehearsal marks, and writes a quantized single-staff MusicXML lead sheet.

pub mod chord;
pub mod convert;
pub mod extract;
pub mod midi;
pub mod model;
pub mod musicxml;
pub mod quantize;
pub mod report;
pub mod validation;
pub mod xf;

pub use convert::{ConvertConfig, ConvertPipeline};
