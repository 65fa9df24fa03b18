use serde::{Deserialize, Serialize};
use std::fmt;

/// Diatonic note letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Step {
    /// Parse an upper-case note letter
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'C' => Some(Step::C),
            'D' => Some(Step::D),
            'E' => Some(Step::E),
            'F' => Some(Step::F),
            'G' => Some(Step::G),
            'A' => Some(Step::A),
            'B' => Some(Step::B),
            _ => None,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            Step::C => 'C',
            Step::D => 'D',
            Step::E => 'E',
            Step::F => 'F',
            Step::G => 'G',
            Step::A => 'A',
            Step::B => 'B',
        }
    }
}

/// A spelled note name without octave (e.g. Bb, F#)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PitchName {
    pub step: Step,

    /// Chromatic alteration in semitones (-1 = flat, 1 = sharp)
    pub alter: i8,
}

impl PitchName {
    pub fn new(step: Step, alter: i8) -> Self {
        Self { step, alter }
    }

    pub fn natural(step: Step) -> Self {
        Self::new(step, 0)
    }

    /// Replace awkward enharmonic spellings with their plain equivalents.
    ///
    /// Only E#, B#, Fb, Cb and the double flats on D, E, G, A and B are
    /// rewritten; everything else is returned unchanged.
    pub fn simplified(self) -> Self {
        use Step::*;
        match (self.step, self.alter) {
            (E, 1) => Self::natural(F),
            (B, 1) => Self::natural(C),
            (F, -1) => Self::natural(E),
            (C, -1) => Self::natural(B),
            (D, -2) => Self::natural(C),
            (E, -2) => Self::natural(D),
            (G, -2) => Self::natural(F),
            (A, -2) => Self::natural(G),
            (B, -2) => Self::natural(A),
            _ => self,
        }
    }
}

impl fmt::Display for PitchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.step.letter())?;
        let accidental = if self.alter < 0 { "b" } else { "#" };
        for _ in 0..self.alter.unsigned_abs() {
            f.write_str(accidental)?;
        }
        Ok(())
    }
}

const SHARP_SPELLING: [(Step, i8); 12] = [
    (Step::C, 0),
    (Step::C, 1),
    (Step::D, 0),
    (Step::D, 1),
    (Step::E, 0),
    (Step::F, 0),
    (Step::F, 1),
    (Step::G, 0),
    (Step::G, 1),
    (Step::A, 0),
    (Step::A, 1),
    (Step::B, 0),
];

const FLAT_SPELLING: [(Step, i8); 12] = [
    (Step::C, 0),
    (Step::D, -1),
    (Step::D, 0),
    (Step::E, -1),
    (Step::E, 0),
    (Step::F, 0),
    (Step::G, -1),
    (Step::G, 0),
    (Step::A, -1),
    (Step::A, 0),
    (Step::B, -1),
    (Step::B, 0),
];

/// Spelling used when the key gives no preference
const DEFAULT_SPELLING: [(Step, i8); 12] = [
    (Step::C, 0),
    (Step::C, 1),
    (Step::D, 0),
    (Step::E, -1),
    (Step::E, 0),
    (Step::F, 0),
    (Step::F, 1),
    (Step::G, 0),
    (Step::G, 1),
    (Step::A, 0),
    (Step::B, -1),
    (Step::B, 0),
];

/// A MIDI pitch spelled for notation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpelledPitch {
    pub name: PitchName,
    pub octave: i8,
}

impl SpelledPitch {
    /// Spell a MIDI note number, preferring sharps in sharp keys and flats in flat keys
    pub fn from_midi(key: u8, fifths: Option<i8>) -> Self {
        let table = match fifths {
            Some(f) if f > 0 => &SHARP_SPELLING,
            Some(f) if f < 0 => &FLAT_SPELLING,
            _ => &DEFAULT_SPELLING,
        };
        let (step, alter) = table[(key % 12) as usize];
        Self {
            name: PitchName::new(step, alter),
            octave: (key / 12) as i8 - 1,
        }
    }
}
