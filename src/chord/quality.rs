use crate::model::{ChordKind, ChordQuality, Degree};

/// (accepted suffixes, kind, canonical display text, degree modifications)
type QualityEntry = (&'static [&'static str], ChordKind, &'static str, &'static [Degree]);

/// Known chord qualities; the first group covers the XF chord table,
/// the rest are common spellings found in text events.
const QUALITIES: &[QualityEntry] = &[
    (&["", "maj", "M", "_", "_maj"], ChordKind::Major, "", &[]),
    (&["6", "maj6", "M6"], ChordKind::MajorSixth, "6", &[]),
    (&["maj7", "M7", "Maj7"], ChordKind::MajorSeventh, "maj7", &[]),
    (&["maj7(#11)", "M7(#11)"], ChordKind::MajorSeventh, "maj7(#11)", &[Degree::add(11, 1)]),
    (&["add9", "add2", "(9)", "(add9)"], ChordKind::Major, "add9", &[Degree::add(9, 0)]),
    (&["maj9", "M9"], ChordKind::MajorNinth, "maj9", &[]),
    (&["6(9)", "69"], ChordKind::MajorSixth, "6(9)", &[Degree::add(9, 0)]),
    (&["aug", "+"], ChordKind::Augmented, "aug", &[]),
    (&["m", "min", "-"], ChordKind::Minor, "m", &[]),
    (&["m6", "min6", "-6"], ChordKind::MinorSixth, "m6", &[]),
    (&["m7", "min7", "-7"], ChordKind::MinorSeventh, "m7", &[]),
    (&["m7b5", "m7(b5)", "min7b5"], ChordKind::HalfDiminished, "m7b5", &[]),
    (&["m(add9)", "madd9", "m(9)", "madd2"], ChordKind::Minor, "m(add9)", &[Degree::add(9, 0)]),
    (&["m9", "min9", "-9"], ChordKind::MinorNinth, "m9", &[]),
    (&["m11", "m7(11)", "min11"], ChordKind::MinorEleventh, "m11", &[]),
    (&["m(maj7)", "mmaj7", "mM7", "minmaj7"], ChordKind::MajorMinor, "m(maj7)", &[]),
    (&["m(maj7,9)", "m(maj9)"], ChordKind::MajorMinor, "m(maj7,9)", &[Degree::add(9, 0)]),
    (&["dim", "o"], ChordKind::Diminished, "dim", &[]),
    (&["dim7", "o7"], ChordKind::DiminishedSeventh, "dim7", &[]),
    (&["7", "dom7"], ChordKind::Dominant, "7", &[]),
    (&["7sus4", "7sus"], ChordKind::SuspendedFourth, "7sus4", &[Degree::add(7, -1)]),
    (&["7b5", "7(b5)"], ChordKind::Dominant, "7b5", &[Degree::alter(5, -1)]),
    (&["7(9)", "9"], ChordKind::DominantNinth, "7(9)", &[]),
    (&["7(#11)"], ChordKind::Dominant, "7(#11)", &[Degree::add(11, 1)]),
    (&["7(13)", "13"], ChordKind::DominantThirteenth, "7(13)", &[]),
    (&["7(b9)", "7b9"], ChordKind::Dominant, "7(b9)", &[Degree::add(9, -1)]),
    (&["7(b13)"], ChordKind::Dominant, "7(b13)", &[Degree::add(13, -1)]),
    (&["7(#9)", "7#9"], ChordKind::Dominant, "7(#9)", &[Degree::add(9, 1)]),
    (&["maj7aug", "maj7(#5)", "M7+"], ChordKind::MajorSeventh, "maj7aug", &[Degree::alter(5, 1)]),
    (&["7aug", "aug7", "7(#5)", "7+"], ChordKind::AugmentedSeventh, "7aug", &[]),
    (&["1+8"], ChordKind::Power, "1+8", &[Degree::subtract(5)]),
    (&["1+5", "5"], ChordKind::Power, "1+5", &[]),
    (&["sus4", "sus"], ChordKind::SuspendedFourth, "sus4", &[]),
    (&["1+2+5", "sus2"], ChordKind::SuspendedSecond, "1+2+5", &[]),
    (&["11"], ChordKind::DominantEleventh, "11", &[]),
];

/// Look up the chord quality for the suffix following a root (e.g. "m7", "7(b9)")
pub fn quality_from_suffix(suffix: &str) -> Option<ChordQuality> {
    QUALITIES
        .iter()
        .find(|(spellings, ..)| spellings.iter().any(|s| *s == suffix))
        .map(|(_, kind, text, degrees)| ChordQuality {
            kind: *kind,
            text: text.to_string(),
            degrees: degrees.to_vec(),
        })
}
