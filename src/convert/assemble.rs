//! Lead sheet assembly
//!
//! Maps extracted tick-based events onto the quantized timeline and cleans
//! the melody up into a single non-overlapping line.

use super::config::ConvertConfig;
use crate::extract::{ChordEvent, MelodyNote, RehearsalEvent};
use crate::midi::MidiFile;
use crate::model::{KeySignature, LeadSheet, Note, PlacedHarmony, RehearsalMark, TimeSignature};
use crate::quantize::Quantizer;
use anyhow::Result;

/// Everything pulled out of one MIDI file before quantization
#[derive(Debug, Clone, Default)]
pub struct Extracted {
    pub melody: Vec<MelodyNote>,
    pub chords: Vec<ChordEvent>,
    pub rehearsal_marks: Vec<RehearsalEvent>,
}

/// Build a lead sheet from extracted events
pub fn assemble_lead_sheet<Q: Quantizer + ?Sized>(
    midi: &MidiFile,
    extracted: &Extracted,
    quantizer: &Q,
    config: &ConvertConfig,
) -> Result<LeadSheet> {
    let tpq = midi.ticks_per_quarter();

    let time_signature = midi
        .time_signature()
        .and_then(|(numerator, pow)| TimeSignature::from_midi(numerator, pow))
        .unwrap_or_default();

    let mut sheet = LeadSheet::new(quantizer.divisions(tpq), time_signature);
    sheet.title = midi.title();
    sheet.key_signature = midi
        .key_signature()
        .filter(|(sharps, _)| (-7..=7).contains(sharps))
        .map(|(sharps, minor)| KeySignature::new(sharps, minor));

    sheet.notes = monophonic_line(&extracted.melody, quantizer, tpq);
    sheet.harmonies = place_harmonies(&extracted.chords, quantizer, tpq);

    if config.include_rehearsal_marks {
        let mut marks: Vec<RehearsalMark> = extracted
            .rehearsal_marks
            .iter()
            .map(|mark| RehearsalMark {
                offset: quantizer.offset(mark.tick, tpq),
                text: mark.text.clone(),
            })
            .collect();
        marks.sort_by_key(|m| m.offset);
        marks.dedup_by_key(|m| m.offset);
        sheet.rehearsal_marks = marks;
    }

    sheet.fit_divisions_to_meter()?;
    Ok(sheet)
}

/// Quantize the melody and make it one line: simultaneous onsets become a
/// chord, a note ringing into the next onset is cut there
fn monophonic_line<Q: Quantizer + ?Sized>(melody: &[MelodyNote], quantizer: &Q, tpq: u16) -> Vec<Note> {
    let mut sorted: Vec<&MelodyNote> = melody.iter().filter(|n| n.duration_ticks() > 0).collect();
    sorted.sort_by_key(|n| (n.start_tick, n.pitch));

    let mut notes: Vec<Note> = Vec::new();
    for melody_note in sorted {
        let offset = quantizer.offset(melody_note.start_tick, tpq);
        let duration = quantizer.duration(melody_note.duration_ticks(), tpq);
        if duration == 0 {
            continue;
        }

        match notes.last_mut() {
            Some(last) if last.offset == offset => {
                if !last.pitches.contains(&melody_note.pitch) {
                    last.pitches.push(melody_note.pitch);
                    last.pitches.sort_unstable();
                }
                last.duration = last.duration.max(duration);
            }
            _ => notes.push(Note::single(melody_note.pitch, offset, duration)),
        }
    }

    // Offsets are strictly increasing here, so every cut leaves a positive length
    let onsets: Vec<u64> = notes.iter().map(|n| n.offset).collect();
    for (note, next_onset) in notes.iter_mut().zip(onsets.iter().skip(1)) {
        if note.end() > *next_onset {
            note.duration = next_onset - note.offset;
        }
    }

    notes
}

/// Quantize chord positions; of several chords landing on one position the last wins
fn place_harmonies<Q: Quantizer + ?Sized>(chords: &[ChordEvent], quantizer: &Q, tpq: u16) -> Vec<PlacedHarmony> {
    let mut placed: Vec<PlacedHarmony> = Vec::new();
    for chord in chords {
        let offset = quantizer.offset(chord.tick, tpq);
        let harmony = chord.harmony.clone();
        match placed.iter_mut().find(|p| p.offset == offset) {
            Some(existing) => {
                log::debug!(
                    "Chord {} replaces {} at offset {}",
                    harmony,
                    existing.harmony,
                    offset
                );
                existing.harmony = harmony;
            }
            None => placed.push(PlacedHarmony { offset, harmony }),
        }
    }
    placed.sort_by_key(|p| p.offset);
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Harmony;
    use crate::quantize::{GridQuantizer, PassThroughQuantizer};

    fn melody_note(pitch: u8, start_tick: u64, end_tick: u64) -> MelodyNote {
        MelodyNote {
            pitch,
            velocity: 100,
            start_tick,
            end_tick,
        }
    }

    #[test]
    fn test_simultaneous_onsets_merge() {
        let melody = vec![melody_note(64, 0, 480), melody_note(60, 0, 960)];
        let notes = monophonic_line(&melody, &GridQuantizer::default(), 480);

        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].pitches, vec![60, 64]);
        assert_eq!(notes[0].duration, 24);
    }

    #[test]
    fn test_overlaps_are_truncated() {
        let melody = vec![melody_note(60, 0, 720), melody_note(62, 480, 960)];
        let notes = monophonic_line(&melody, &GridQuantizer::default(), 480);

        assert_eq!(notes[0], Note::single(60, 0, 12));
        assert_eq!(notes[1], Note::single(62, 12, 12));
    }

    #[test]
    fn test_zero_length_notes_dropped() {
        let melody = vec![melody_note(60, 100, 100), melody_note(62, 0, 480)];
        let notes = monophonic_line(&melody, &PassThroughQuantizer::new(), 480);
        assert_eq!(notes, vec![Note::single(62, 0, 480)]);
    }

    #[test]
    fn test_sloppy_onsets_snap_together() {
        // 10 ticks apart at 480 tpq: both snap to the downbeat
        let melody = vec![melody_note(60, 0, 470), melody_note(67, 10, 480)];
        let notes = monophonic_line(&melody, &GridQuantizer::default(), 480);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].pitches, vec![60, 67]);
    }

    #[test]
    fn test_last_chord_wins_on_shared_offset() {
        let chords = vec![
            ChordEvent {
                tick: 0,
                harmony: Harmony::Chord("C".parse().unwrap()),
            },
            ChordEvent {
                tick: 5,
                harmony: Harmony::Chord("Am".parse().unwrap()),
            },
            ChordEvent {
                tick: 960,
                harmony: Harmony::NoChord,
            },
        ];
        let placed = place_harmonies(&chords, &GridQuantizer::default(), 480);

        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].harmony.to_string(), "Am");
        assert_eq!(placed[1].offset, 24);
    }
}
