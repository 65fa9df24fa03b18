//! Measure layout
//!
//! Cuts the continuous lead sheet timeline into measures of notes and rests,
//! tying notes across barlines and anchoring chord symbols and rehearsal
//! marks to the note or rest they fall in.

use super::durations::{split_duration, NoteValue};
use crate::model::{Harmony, LeadSheet};
use std::collections::BTreeSet;

/// One `<note>` (or chord of notes, or rest) inside a measure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteElement {
    /// MIDI pitches; empty for a rest
    pub pitches: Vec<u8>,
    pub duration: u64,
    pub value: Option<NoteValue>,
    pub tie_start: bool,
    pub tie_stop: bool,
    /// Rest filling an otherwise empty measure
    pub measure_rest: bool,
}

impl NoteElement {
    pub fn is_rest(&self) -> bool {
        self.pitches.is_empty()
    }
}

/// Anything written into a measure, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeasureElement {
    /// `offset` is relative to the start of the next note element
    Harmony { harmony: Harmony, offset: u64 },
    Rehearsal { text: String, offset: u64 },
    Note(NoteElement),
}

/// A laid-out measure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measure {
    /// 1-based measure number
    pub number: u64,
    /// Start position in divisions
    pub start: u64,
    pub elements: Vec<MeasureElement>,
}

impl Measure {
    pub fn notes(&self) -> impl Iterator<Item = &NoteElement> {
        self.elements.iter().filter_map(|e| match e {
            MeasureElement::Note(note) => Some(note),
            _ => None,
        })
    }
}

/// A stretch of the timeline that is either one note/chord or silence
struct Span {
    start: u64,
    end: u64,
    pitches: Vec<u8>,
}

/// Something anchored at a position rather than occupying time
enum Anchor {
    Rehearsal(String),
    Harmony(Harmony),
}

/// Lay out the whole lead sheet as a sequence of measures
pub fn layout_measures(sheet: &LeadSheet) -> Vec<Measure> {
    let measure_len = sheet.measure_length().max(1);
    let total = sheet.measure_count() * measure_len;

    let spans = fill_timeline(sheet, total);

    let mut anchors: Vec<(u64, Anchor)> = sheet
        .rehearsal_marks
        .iter()
        .map(|m| (m.offset, Anchor::Rehearsal(m.text.clone())))
        .chain(
            sheet
                .harmonies
                .iter()
                .map(|h| (h.offset, Anchor::Harmony(h.harmony.clone()))),
        )
        .collect();
    // Stable: rehearsal marks stay ahead of chords at the same position
    anchors.sort_by_key(|(offset, _)| *offset);
    let anchor_positions: BTreeSet<u64> = anchors.iter().map(|(offset, _)| *offset).collect();

    // Timed note elements per measure
    let measure_count = (total / measure_len) as usize;
    let mut timed: Vec<Vec<(u64, NoteElement)>> = vec![Vec::new(); measure_count];

    for span in &spans {
        let is_rest = span.pitches.is_empty();
        let mut cuts: BTreeSet<u64> = (span.start / measure_len + 1..)
            .map(|m| m * measure_len)
            .take_while(|&bar| bar < span.end)
            .collect();
        if is_rest {
            cuts.extend(anchor_positions.range(span.start + 1..span.end).copied());
        }
        cuts.insert(span.end);

        let mut piece_start = span.start;
        for piece_end in cuts {
            let pieces = split_duration(piece_end - piece_start, sheet.divisions);
            let last = pieces.len().saturating_sub(1);
            let mut position = piece_start;
            for (i, (length, value)) in pieces.into_iter().enumerate() {
                let element = NoteElement {
                    pitches: span.pitches.clone(),
                    duration: length,
                    value,
                    tie_stop: !is_rest && (i > 0 || position > span.start),
                    tie_start: !is_rest && (i < last || piece_end < span.end),
                    measure_rest: false,
                };
                let index = ((position / measure_len) as usize).min(measure_count - 1);
                timed[index].push((position, element));
                position += length;
            }
            piece_start = piece_end;
        }
    }

    let mut anchors = anchors.into_iter().peekable();
    timed
        .into_iter()
        .enumerate()
        .map(|(index, mut notes)| {
            let start = index as u64 * measure_len;
            if notes.iter().all(|(_, note)| note.is_rest()) {
                notes = vec![(start, measure_rest(measure_len))];
            }

            let mut elements = Vec::new();
            for (position, note) in notes {
                let end = position + note.duration;
                while let Some((offset, _)) = anchors.peek() {
                    if *offset >= end {
                        break;
                    }
                    if let Some((offset, anchor)) = anchors.next() {
                        let offset = offset.saturating_sub(position);
                        elements.push(match anchor {
                            Anchor::Rehearsal(text) => MeasureElement::Rehearsal { text, offset },
                            Anchor::Harmony(harmony) => MeasureElement::Harmony { harmony, offset },
                        });
                    }
                }
                elements.push(MeasureElement::Note(note));
            }

            Measure {
                number: index as u64 + 1,
                start,
                elements,
            }
        })
        .collect()
}

/// Notes in order with the gaps between them filled by rests, up to `total`
fn fill_timeline(sheet: &LeadSheet, total: u64) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for note in &sheet.notes {
        let start = note.offset.max(cursor);
        let end = note.end().min(total);
        if end <= start {
            continue;
        }
        if start > cursor {
            spans.push(Span {
                start: cursor,
                end: start,
                pitches: Vec::new(),
            });
        }
        spans.push(Span {
            start,
            end,
            pitches: note.pitches.clone(),
        });
        cursor = end;
    }

    if cursor < total {
        spans.push(Span {
            start: cursor,
            end: total,
            pitches: Vec::new(),
        });
    }
    spans
}

fn measure_rest(measure_len: u64) -> NoteElement {
    NoteElement {
        pitches: Vec::new(),
        duration: measure_len,
        value: None,
        tie_start: false,
        tie_stop: false,
        measure_rest: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Note, PlacedHarmony, RehearsalMark, TimeSignature};

    fn sheet() -> LeadSheet {
        LeadSheet::new(12, TimeSignature::default())
    }

    fn chord(figure: &str) -> Harmony {
        Harmony::Chord(figure.parse().unwrap())
    }

    fn measure_total(measure: &Measure) -> u64 {
        measure.notes().map(|n| n.duration).sum()
    }

    #[test]
    fn test_empty_sheet_is_one_measure_rest() {
        let measures = layout_measures(&sheet());
        assert_eq!(measures.len(), 1);
        let notes: Vec<_> = measures[0].notes().collect();
        assert_eq!(notes.len(), 1);
        assert!(notes[0].measure_rest);
        assert_eq!(notes[0].duration, 48);
    }

    #[test]
    fn test_rests_fill_gaps() {
        let mut s = sheet();
        s.notes.push(Note::single(60, 12, 12));
        let measures = layout_measures(&s);

        assert_eq!(measures.len(), 1);
        let notes: Vec<_> = measures[0].notes().collect();
        assert!(notes[0].is_rest());
        assert_eq!(notes[1].pitches, vec![60]);
        assert!(notes[2].is_rest());
        assert_eq!(measure_total(&measures[0]), 48);
    }

    #[test]
    fn test_note_tied_across_barline() {
        let mut s = sheet();
        s.notes.push(Note::single(67, 36, 24));
        let measures = layout_measures(&s);

        assert_eq!(measures.len(), 2);
        let first: Vec<_> = measures[0].notes().collect();
        let tail = first.last().unwrap();
        assert_eq!(tail.duration, 12);
        assert!(tail.tie_start && !tail.tie_stop);

        let second: Vec<_> = measures[1].notes().collect();
        assert_eq!(second[0].duration, 12);
        assert!(second[0].tie_stop && !second[0].tie_start);
        assert_eq!(measure_total(&measures[0]), 48);
        assert_eq!(measure_total(&measures[1]), 48);
    }

    #[test]
    fn test_harmony_inside_note_gets_offset() {
        let mut s = sheet();
        s.notes.push(Note::single(60, 0, 48));
        s.harmonies.push(PlacedHarmony {
            offset: 0,
            harmony: chord("C"),
        });
        s.harmonies.push(PlacedHarmony {
            offset: 24,
            harmony: chord("G7"),
        });
        let measures = layout_measures(&s);

        match &measures[0].elements[..] {
            [MeasureElement::Harmony { offset: 0, .. }, MeasureElement::Harmony { offset: 24, .. }, MeasureElement::Note(n)] => {
                assert_eq!(n.duration, 48)
            }
            other => panic!("unexpected layout: {:?}", other),
        }
    }

    #[test]
    fn test_rests_split_at_harmonies() {
        let mut s = sheet();
        s.notes.push(Note::single(60, 0, 12));
        s.harmonies.push(PlacedHarmony {
            offset: 30,
            harmony: chord("F"),
        });
        let measures = layout_measures(&s);

        let elements = &measures[0].elements;
        let harmony_index = elements
            .iter()
            .position(|e| matches!(e, MeasureElement::Harmony { .. }))
            .unwrap();
        assert!(matches!(elements[harmony_index], MeasureElement::Harmony { offset: 0, .. }));
        match &elements[harmony_index - 1] {
            MeasureElement::Note(rest) => assert_eq!(rest.duration, 18),
            other => panic!("expected a rest, got {:?}", other),
        }
        assert_eq!(measure_total(&measures[0]), 48);
    }

    #[test]
    fn test_chord_beyond_melody_extends_piece() {
        let mut s = sheet();
        s.notes.push(Note::single(60, 0, 12));
        s.rehearsal_marks.push(RehearsalMark {
            offset: 48,
            text: "B".to_string(),
        });
        s.harmonies.push(PlacedHarmony {
            offset: 60,
            harmony: Harmony::NoChord,
        });
        let measures = layout_measures(&s);

        assert_eq!(measures.len(), 2);
        let second = &measures[1].elements;
        assert!(matches!(second[0], MeasureElement::Rehearsal { offset: 0, .. }));
        assert!(matches!(second[1], MeasureElement::Harmony { offset: 12, .. }));
        assert!(matches!(&second[2], MeasureElement::Note(n) if n.measure_rest));
    }

    #[test]
    fn test_compound_meter() {
        let mut s = LeadSheet::new(12, TimeSignature::new(6, 8));
        s.notes.push(Note::single(72, 0, 54));
        let measures = layout_measures(&s);

        assert_eq!(measures.len(), 2);
        assert_eq!(measure_total(&measures[0]), 36);
        assert_eq!(measure_total(&measures[1]), 36);
    }
}
