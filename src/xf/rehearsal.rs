/// Base names for the low nibble of an XF rehearsal byte
const REHEARSAL_BASE: [&str; 16] = [
    "Intro", "Ending", "Fill-in", "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M",
];

/// A decoded XF rehearsal mark
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XfRehearsal {
    /// The raw `rr` byte
    pub raw: u8,

    /// Display text, e.g. "A" or "B''"
    pub text: String,
}

/// Decode the payload of an XF rehearsal mark event (`rr`)
///
/// Bits 0-3 select the section name, bits 4-6 the number of variation primes.
pub fn decode_rehearsal(payload: &[u8]) -> Option<XfRehearsal> {
    let raw = *payload.first()?;
    let base = REHEARSAL_BASE
        .get((raw & 0x0F) as usize)
        .copied()
        .unwrap_or("?");
    let variation = ((raw >> 4) & 0x07) as usize;

    Some(XfRehearsal {
        raw,
        text: format!("{}{}", base, "'".repeat(variation)),
    })
}
