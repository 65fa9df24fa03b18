//! Pass-through quantizer
//!
//! Keeps raw tick timing: one division per tick. Durations that do not map
//! to a standard note value are still written, just without a note type.

use super::traits::Quantizer;

/// Quantizer that leaves tick positions untouched
pub struct PassThroughQuantizer;

impl PassThroughQuantizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PassThroughQuantizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Quantizer for PassThroughQuantizer {
    fn divisions(&self, ticks_per_quarter: u16) -> u32 {
        ticks_per_quarter as u32
    }

    fn offset(&self, ticks: u64, _ticks_per_quarter: u16) -> u64 {
        ticks
    }

    fn duration(&self, ticks: u64, _ticks_per_quarter: u16) -> u64 {
        ticks
    }
}
