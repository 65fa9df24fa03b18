use crate::chord::quality_from_suffix;
use crate::model::{ChordSymbol, Harmony, PitchName, Step};
use thiserror::Error;

/// Chord type suffixes indexed by the XF `ct` byte (0x00..=0x22)
pub const XF_CHORD_TYPES: [&str; 35] = [
    "",          // Maj
    "6",         // Maj6
    "maj7",      // Maj7
    "maj7(#11)", // Maj7(#11)
    "add9",      // Maj(9)
    "maj9",      // Maj7(9)
    "6(9)",      // Maj6(9)
    "aug",       // aug
    "m",         // min
    "m6",        // min6
    "m7",        // min7
    "m7b5",      // min7b5
    "m(add9)",   // min(9)
    "m9",        // min7(9)
    "m11",       // min7(11)
    "m(maj7)",   // minMaj7
    "m(maj7,9)", // minMaj7(9)
    "dim",       // dim
    "dim7",      // dim7
    "7",         // 7th
    "7sus4",     // 7sus4
    "7b5",       // 7b5
    "7(9)",      // 7(9)
    "7(#11)",    // 7(#11)
    "7(13)",     // 7(13)
    "7(b9)",     // 7(b9)
    "7(b13)",    // 7(b13)
    "7(#9)",     // 7(#9)
    "maj7aug",   // Maj7aug
    "7aug",      // 7aug
    "1+8",       // 1+8
    "1+5",       // 1+5
    "sus4",      // sus4
    "1+2+5",     // 1+2+5
    "N.C.",      // cc
];

const NO_CHORD_TYPE: u8 = 0x22;
/// Note byte meaning "no note" (also used as padding)
const NO_NOTE: u8 = 0x7F;

/// Reasons an XF chord payload could not be decoded
#[derive(Debug, Error, PartialEq, Eq)]
pub enum XfChordError {
    #[error("expected 2 to 4 chord bytes, got {0}")]
    Length(usize),

    #[error("unknown chord type 0x{0:02X}")]
    UnknownType(u8),

    #[error("invalid root note byte 0x{0:02X}")]
    InvalidRoot(u8),
}

/// Chord payload with the 0x7F separators removed
pub fn chord_bytes(payload: &[u8]) -> Vec<u8> {
    payload.iter().copied().filter(|&b| b != NO_NOTE).collect()
}

/// Decode filtered chord bytes (`cr ct [bn [bt]]`) into a harmony
pub fn decode_chord(bytes: &[u8]) -> Result<Harmony, XfChordError> {
    if !(2..=4).contains(&bytes.len()) {
        return Err(XfChordError::Length(bytes.len()));
    }

    let (cr, ct) = (bytes[0], bytes[1]);
    let bn = bytes.get(2).copied().unwrap_or(NO_NOTE);

    if ct == NO_CHORD_TYPE {
        return Ok(Harmony::NoChord);
    }
    let suffix = XF_CHORD_TYPES
        .get(ct as usize)
        .ok_or(XfChordError::UnknownType(ct))?;
    let quality = quality_from_suffix(suffix).ok_or(XfChordError::UnknownType(ct))?;

    let root = note_from_byte(cr).ok_or(XfChordError::InvalidRoot(cr))?;
    // An unreadable bass byte just means no bass
    let bass = note_from_byte(bn).filter(|bass| *bass != root);

    Ok(Harmony::Chord(ChordSymbol {
        root: root.simplified(),
        quality,
        bass: bass.map(PitchName::simplified),
    }))
}

/// Decode an XF note byte: bits 4-6 accidental, bits 0-3 letter
fn note_from_byte(byte: u8) -> Option<PitchName> {
    if byte == NO_NOTE {
        return None;
    }
    let accidental = (byte >> 4) & 0b0111;
    let letter = byte & 0x0F;

    // 0 = bbb ... 3 = natural ... 6 = ###
    if accidental > 6 {
        return None;
    }
    let step = match letter {
        1 => Step::C,
        2 => Step::D,
        3 => Step::E,
        4 => Step::F,
        5 => Step::G,
        6 => Step::A,
        7 => Step::B,
        _ => return None,
    };
    Some(PitchName::new(step, accidental as i8 - 3))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChordKind;

    fn chord(bytes: &[u8]) -> ChordSymbol {
        match decode_chord(bytes).unwrap() {
            Harmony::Chord(chord) => chord,
            Harmony::NoChord => panic!("expected a chord"),
        }
    }

    #[test]
    fn test_every_xf_type_has_a_quality() {
        for suffix in XF_CHORD_TYPES.iter().filter(|s| **s != "N.C.") {
            assert!(quality_from_suffix(suffix).is_some(), "no quality for {:?}", suffix);
        }
    }

    #[test]
    fn test_decode_flat_minor_seventh() {
        // fff = 2 (flat), nnnn = 3 (E), type 0x0A (m7)
        let c = chord(&[0x23, 0x0A]);
        assert_eq!(c.to_string(), "Ebm7");
        assert_eq!(c.quality.kind, ChordKind::MinorSeventh);
        assert_eq!(c.bass, None);
    }

    #[test]
    fn test_decode_slash_chord() {
        // C major over G
        let c = chord(&[0x31, 0x00, 0x35]);
        assert_eq!(c.to_string(), "C/G");
    }

    #[test]
    fn test_bass_equal_to_root_is_dropped() {
        let c = chord(&[0x45, 0x13, 0x45, 0x00]);
        assert_eq!(c.to_string(), "G#7");
    }

    #[test]
    fn test_no_chord() {
        assert_eq!(decode_chord(&[0x31, 0x22]), Ok(Harmony::NoChord));
    }

    #[test]
    fn test_enharmonic_root_is_simplified() {
        // E# major -> F
        assert_eq!(chord(&[0x43, 0x00]).to_string(), "F");
    }

    #[test]
    fn test_invalid_payloads() {
        assert_eq!(decode_chord(&[0x31]), Err(XfChordError::Length(1)));
        assert_eq!(
            decode_chord(&[0x31, 0x00, 0x35, 0x00, 0x01]),
            Err(XfChordError::Length(5))
        );
        assert_eq!(decode_chord(&[0x31, 0x40]), Err(XfChordError::UnknownType(0x40)));
        assert_eq!(decode_chord(&[0x38, 0x00]), Err(XfChordError::InvalidRoot(0x38)));
    }

    #[test]
    fn test_separator_filtering() {
        assert_eq!(chord_bytes(&[0x31, 0x00, 0x7F, 0x7F]), vec![0x31, 0x00]);
        assert!(chord_bytes(&[0x7F, 0x7F]).is_empty());
    }
}
