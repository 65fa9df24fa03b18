use super::{Harmony, Note};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Meter of the lead sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSignature {
    pub beats: u32,
    pub beat_type: u32,
}

impl TimeSignature {
    pub fn new(beats: u32, beat_type: u32) -> Self {
        Self { beats, beat_type }
    }

    /// Build from a MIDI time signature meta event (denominator given as a power of two)
    pub fn from_midi(numerator: u8, denominator_pow: u8) -> Option<Self> {
        if numerator == 0 || denominator_pow > 6 {
            return None;
        }
        Some(Self::new(numerator as u32, 1 << denominator_pow))
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self::new(4, 4)
    }
}

/// Key signature as a position on the circle of fifths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySignature {
    /// Number of sharps (positive) or flats (negative)
    pub fifths: i8,
    pub minor: bool,
}

impl KeySignature {
    pub fn new(fifths: i8, minor: bool) -> Self {
        Self { fifths, minor }
    }

    pub fn mode(&self) -> &'static str {
        if self.minor {
            "minor"
        } else {
            "major"
        }
    }
}

/// A chord symbol anchored at a position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedHarmony {
    /// Position in divisions
    pub offset: u64,
    pub harmony: Harmony,
}

/// A rehearsal mark anchored at a position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RehearsalMark {
    /// Position in divisions
    pub offset: u64,
    pub text: String,
}

/// Complete lead sheet: one melody line with chord symbols and rehearsal marks
///
/// All positions and lengths are integer counts of `1 / divisions` quarter notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadSheet {
    pub title: Option<String>,

    /// Divisions per quarter note
    pub divisions: u32,

    pub time_signature: TimeSignature,

    /// None when the source carried no key signature
    pub key_signature: Option<KeySignature>,

    /// Chord symbols sorted by offset
    pub harmonies: Vec<PlacedHarmony>,

    /// Melody notes sorted by offset, never overlapping
    pub notes: Vec<Note>,

    /// Rehearsal marks sorted by offset
    pub rehearsal_marks: Vec<RehearsalMark>,
}

impl LeadSheet {
    /// Create an empty lead sheet
    pub fn new(divisions: u32, time_signature: TimeSignature) -> Self {
        Self {
            title: None,
            divisions,
            time_signature,
            key_signature: None,
            harmonies: Vec::new(),
            notes: Vec::new(),
            rehearsal_marks: Vec::new(),
        }
    }

    /// Length of one measure in divisions
    ///
    /// Exact only when [`LeadSheet::fit_divisions_to_meter`] has been applied.
    pub fn measure_length(&self) -> u64 {
        let ts = self.time_signature;
        (self.divisions as u64 * 4 * ts.beats as u64) / ts.beat_type as u64
    }

    /// Scale divisions (and every position) so a measure is a whole number of divisions
    pub fn fit_divisions_to_meter(&mut self) -> Result<()> {
        let ts = self.time_signature;
        let per_measure = self.divisions as u64 * 4 * ts.beats as u64;
        let factor = ts.beat_type as u64 / gcd(per_measure, ts.beat_type as u64);
        if factor > 1 {
            log::debug!(
                "Rescaling divisions {} -> {} to fit {}/{}",
                self.divisions,
                self.divisions as u64 * factor,
                ts.beats,
                ts.beat_type
            );
            self.rescale(factor)?;
        }
        Ok(())
    }

    /// Multiply divisions and all positions by `factor`
    ///
    /// Fails, leaving the sheet untouched, if the new divisions do not fit in a `u32`.
    pub fn rescale(&mut self, factor: u64) -> Result<()> {
        let scaled = self.divisions as u64 * factor;
        let Ok(divisions) = u32::try_from(scaled) else {
            bail!(
                "Rescaling {} divisions by {} gives {}, too many divisions per quarter",
                self.divisions,
                factor,
                scaled
            );
        };
        self.divisions = divisions;
        for note in &mut self.notes {
            note.offset *= factor;
            note.duration *= factor;
        }
        for harmony in &mut self.harmonies {
            harmony.offset *= factor;
        }
        for mark in &mut self.rehearsal_marks {
            mark.offset *= factor;
        }
        Ok(())
    }

    /// Position just past the last musical event
    pub fn content_end(&self) -> u64 {
        let note_end = self.notes.iter().map(Note::end).max().unwrap_or(0);
        let harmony_end = self.harmonies.iter().map(|h| h.offset + 1).max().unwrap_or(0);
        let mark_end = self.rehearsal_marks.iter().map(|m| m.offset + 1).max().unwrap_or(0);
        note_end.max(harmony_end).max(mark_end)
    }

    /// Number of measures needed to hold all content (at least one)
    pub fn measure_count(&self) -> u64 {
        let measure = self.measure_length().max(1);
        self.content_end().div_ceil(measure).max(1)
    }

    /// Mean MIDI pitch of the melody, if there is one
    pub fn mean_pitch(&self) -> Option<f64> {
        let pitches: Vec<u8> = self.notes.iter().flat_map(|n| n.pitches.iter().copied()).collect();
        if pitches.is_empty() {
            return None;
        }
        Some(pitches.iter().map(|&p| p as f64).sum::<f64>() / pitches.len() as f64)
    }
}

pub(crate) fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a.max(1)
}

pub(crate) fn lcm(a: u64, b: u64) -> u64 {
    a / gcd(a, b) * b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_signature_from_midi() {
        assert_eq!(TimeSignature::from_midi(6, 3), Some(TimeSignature::new(6, 8)));
        assert_eq!(TimeSignature::from_midi(0, 2), None);
        assert_eq!(TimeSignature::from_midi(4, 9), None);
    }

    #[test]
    fn test_measure_length_and_count() {
        let mut sheet = LeadSheet::new(12, TimeSignature::new(3, 4));
        assert_eq!(sheet.measure_length(), 36);
        assert_eq!(sheet.measure_count(), 1);

        sheet.notes.push(Note::single(60, 30, 12));
        assert_eq!(sheet.measure_count(), 2);
    }

    #[test]
    fn test_fit_divisions_to_meter() {
        // 7/32 with 12 divisions: 12 * 4 * 7 / 32 = 10.5, needs doubling
        let mut sheet = LeadSheet::new(12, TimeSignature::new(7, 32));
        sheet.notes.push(Note::single(60, 3, 3));
        sheet.fit_divisions_to_meter().unwrap();

        assert_eq!(sheet.divisions, 24);
        assert_eq!(sheet.measure_length(), 21);
        assert_eq!(sheet.notes[0], Note::single(60, 6, 6));
    }

    #[test]
    fn test_fit_divisions_overflow_is_an_error() {
        // Odd divisions in 7/32 need a factor of 8, which no longer fits in u32
        let mut sheet = LeadSheet::new(4_000_000_001, TimeSignature::new(7, 32));
        sheet.notes.push(Note::single(60, 5, 5));

        assert!(sheet.fit_divisions_to_meter().is_err());
        assert_eq!(sheet.divisions, 4_000_000_001);
        assert_eq!(sheet.notes[0], Note::single(60, 5, 5));
    }

    #[test]
    fn test_fit_divisions_is_noop_for_common_time() {
        let mut sheet = LeadSheet::new(12, TimeSignature::default());
        sheet.fit_divisions_to_meter().unwrap();
        assert_eq!(sheet.divisions, 12);
    }
}
