use super::PitchName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Chord kind as named by the MusicXML `<kind>` element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChordKind {
    Major,
    Minor,
    Augmented,
    Diminished,
    Dominant,
    MajorSeventh,
    MinorSeventh,
    DiminishedSeventh,
    AugmentedSeventh,
    HalfDiminished,
    MajorMinor,
    MajorSixth,
    MinorSixth,
    DominantNinth,
    MajorNinth,
    MinorNinth,
    DominantEleventh,
    MinorEleventh,
    DominantThirteenth,
    SuspendedSecond,
    SuspendedFourth,
    Power,
    None,
}

impl ChordKind {
    /// The MusicXML `<kind>` value
    pub fn as_musicxml(&self) -> &'static str {
        match self {
            ChordKind::Major => "major",
            ChordKind::Minor => "minor",
            ChordKind::Augmented => "augmented",
            ChordKind::Diminished => "diminished",
            ChordKind::Dominant => "dominant",
            ChordKind::MajorSeventh => "major-seventh",
            ChordKind::MinorSeventh => "minor-seventh",
            ChordKind::DiminishedSeventh => "diminished-seventh",
            ChordKind::AugmentedSeventh => "augmented-seventh",
            ChordKind::HalfDiminished => "half-diminished",
            ChordKind::MajorMinor => "major-minor",
            ChordKind::MajorSixth => "major-sixth",
            ChordKind::MinorSixth => "minor-sixth",
            ChordKind::DominantNinth => "dominant-ninth",
            ChordKind::MajorNinth => "major-ninth",
            ChordKind::MinorNinth => "minor-ninth",
            ChordKind::DominantEleventh => "dominant-11th",
            ChordKind::MinorEleventh => "minor-11th",
            ChordKind::DominantThirteenth => "dominant-13th",
            ChordKind::SuspendedSecond => "suspended-second",
            ChordKind::SuspendedFourth => "suspended-fourth",
            ChordKind::Power => "power",
            ChordKind::None => "none",
        }
    }
}

/// How a chord degree modifies the basic kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DegreeType {
    Add,
    Alter,
    Subtract,
}

impl DegreeType {
    pub fn as_musicxml(&self) -> &'static str {
        match self {
            DegreeType::Add => "add",
            DegreeType::Alter => "alter",
            DegreeType::Subtract => "subtract",
        }
    }
}

/// A `<degree>` modification (e.g. add #11, alter b5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Degree {
    pub value: u8,
    pub alter: i8,
    pub degree_type: DegreeType,
}

impl Degree {
    pub const fn add(value: u8, alter: i8) -> Self {
        Self {
            value,
            alter,
            degree_type: DegreeType::Add,
        }
    }

    pub const fn alter(value: u8, alter: i8) -> Self {
        Self {
            value,
            alter,
            degree_type: DegreeType::Alter,
        }
    }

    pub const fn subtract(value: u8) -> Self {
        Self {
            value,
            alter: 0,
            degree_type: DegreeType::Subtract,
        }
    }
}

/// Chord quality: kind plus display text and degree modifications
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChordQuality {
    pub kind: ChordKind,

    /// Suffix shown after the root (e.g. "m7", "7(b9)")
    pub text: String,

    pub degrees: Vec<Degree>,
}

/// A chord symbol such as "Bbm7/F"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChordSymbol {
    pub root: PitchName,
    pub quality: ChordQuality,
    pub bass: Option<PitchName>,
}

impl fmt::Display for ChordSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.quality.text)?;
        if let Some(bass) = self.bass {
            write!(f, "/{}", bass)?;
        }
        Ok(())
    }
}

/// Either a real chord or an explicit "no chord" marking
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Harmony {
    Chord(ChordSymbol),
    NoChord,
}

impl fmt::Display for Harmony {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Harmony::Chord(chord) => chord.fmt(f),
            Harmony::NoChord => f.write_str("N.C."),
        }
    }
}
