use super::quality_from_suffix;
use crate::model::{ChordSymbol, PitchName, Step};
use std::str::FromStr;
use thiserror::Error;

/// Reasons a chord figure could not be understood
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChordParseError {
    #[error("empty chord figure")]
    Empty,

    #[error("chord figure must start with a note letter A-G, found {0:?}")]
    InvalidRoot(char),

    #[error("unknown chord quality {0:?}")]
    UnknownQuality(String),
}

impl FromStr for ChordSymbol {
    type Err = ChordParseError;

    /// Parse `Root[accidentals]Quality[/Bass]`, e.g. "Bbm7/F" or "F#7(b9)".
    ///
    /// Awkward enharmonic roots and basses (E#, Cb, Gbb, ...) are simplified.
    fn from_str(figure: &str) -> Result<Self, Self::Err> {
        let figure = figure.trim();
        let first = figure.chars().next().ok_or(ChordParseError::Empty)?;
        let step = Step::from_letter(first).ok_or(ChordParseError::InvalidRoot(first))?;

        let (alter, rest) = split_accidentals(&figure[1..]);
        let (suffix, bass) = split_bass(rest);
        let quality = quality_from_suffix(suffix)
            .ok_or_else(|| ChordParseError::UnknownQuality(suffix.to_string()))?;

        Ok(ChordSymbol {
            root: PitchName::new(step, alter).simplified(),
            quality,
            bass: bass.map(PitchName::simplified),
        })
    }
}

/// Consume leading '#'/'b' characters, returning the alteration and the remainder
fn split_accidentals(s: &str) -> (i8, &str) {
    let mut alter: i8 = 0;
    for (index, c) in s.char_indices() {
        match c {
            '#' => alter = alter.saturating_add(1),
            'b' => alter = alter.saturating_sub(1),
            _ => return (alter, &s[index..]),
        }
    }
    (alter, "")
}

/// Split a trailing "/Bass" off the quality, if what follows the slash is a note name
fn split_bass(s: &str) -> (&str, Option<PitchName>) {
    if let Some(pos) = s.rfind('/') {
        if let Some(bass) = parse_pitch_name(&s[pos + 1..]) {
            return (&s[..pos], Some(bass));
        }
    }
    (s, None)
}

fn parse_pitch_name(s: &str) -> Option<PitchName> {
    let step = Step::from_letter(s.chars().next()?)?;
    match split_accidentals(&s[1..]) {
        (alter, "") => Some(PitchName::new(step, alter)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChordKind;

    fn parse(figure: &str) -> ChordSymbol {
        figure.parse().unwrap()
    }

    #[test]
    fn test_parse_simple_chords() {
        let c = parse("C");
        assert_eq!(c.root, PitchName::natural(Step::C));
        assert_eq!(c.quality.kind, ChordKind::Major);

        let g = parse("Gm7");
        assert_eq!(g.quality.kind, ChordKind::MinorSeventh);
        assert_eq!(g.to_string(), "Gm7");
    }

    #[test]
    fn test_parse_accidentals_and_bass() {
        let c = parse("Bbm7/F");
        assert_eq!(c.root, PitchName::new(Step::B, -1));
        assert_eq!(c.bass, Some(PitchName::natural(Step::F)));
        assert_eq!(c.to_string(), "Bbm7/F");

        assert_eq!(parse("F#7(b9)").to_string(), "F#7(b9)");
    }

    #[test]
    fn test_normalisation() {
        assert_eq!(parse("E#m").to_string(), "Fm");
        assert_eq!(parse("Dm7(11)").to_string(), "Dm11");
        assert_eq!(parse("Cadd2").to_string(), "Cadd9");
        assert_eq!(parse("A/Cb").to_string(), "A/B");
        assert_eq!(parse("Cmin").to_string(), "Cm");
        assert_eq!(parse("C_maj").to_string(), "C");
        assert_eq!(parse("Bb_").quality.kind, ChordKind::Major);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<ChordSymbol>(), Err(ChordParseError::Empty));
        assert_eq!("Xm".parse::<ChordSymbol>(), Err(ChordParseError::InvalidRoot('X')));
        assert_eq!(
            "Cwhat".parse::<ChordSymbol>(),
            Err(ChordParseError::UnknownQuality("what".to_string()))
        );
        // A slash not followed by a note is part of the (unknown) quality
        assert_eq!(
            "C6/9".parse::<ChordSymbol>(),
            Err(ChordParseError::UnknownQuality("6/9".to_string()))
        );
    }
}
