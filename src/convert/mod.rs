//! MIDI to lead sheet conversion
//!
//! Ties extraction, quantization and MusicXML output together, one file or a
//! whole directory at a time.

pub mod assemble;
pub mod config;
pub mod organizer;
pub mod pipeline;

pub use config::ConvertConfig;
pub use organizer::{ConversionJob, OutputLayout};
pub use pipeline::{ConversionSummary, ConvertPipeline};
