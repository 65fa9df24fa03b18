//! Timing quantization layer
//!
//! Maps raw MIDI tick positions onto the integer "divisions" timeline used
//! by MusicXML. The grid quantizer snaps to musical values; the pass-through
//! quantizer keeps ticks unchanged.

mod grid;
mod passthrough;
mod traits;

pub use grid::GridQuantizer;
pub use passthrough::PassThroughQuantizer;
pub use traits::Quantizer;
