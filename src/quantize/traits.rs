//! Quantizer trait definition

/// Maps tick positions to divisions - allows swapping between grid and pass-through
pub trait Quantizer: Send + Sync {
    /// Divisions per quarter note of the quantized timeline
    fn divisions(&self, ticks_per_quarter: u16) -> u32;

    /// Quantize an absolute position
    fn offset(&self, ticks: u64, ticks_per_quarter: u16) -> u64;

    /// Quantize a length; implementations keep positive lengths positive
    fn duration(&self, ticks: u64, ticks_per_quarter: u16) -> u64;
}
