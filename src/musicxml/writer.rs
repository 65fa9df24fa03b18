//! MusicXML (score-partwise 4.0) serialization

use super::durations::NoteValue;
use super::layout::{layout_measures, Measure, MeasureElement, NoteElement};
use crate::model::{Harmony, LeadSheet, PitchName, SpelledPitch};
use anyhow::Result;
use chrono::NaiveDate;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

const DOCTYPE: &str = r#"score-partwise PUBLIC "-//Recordare//DTD MusicXML 4.0 Partwise//EN" "http://www.musicxml.org/dtds/partwise.dtd""#;

/// Melodies averaging below G3 get a bass clef
const BASS_CLEF_THRESHOLD: f64 = 55.0;

const PART_ID: &str = "P1";

/// Document-level settings that are not part of the lead sheet itself
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Written to `identification/encoding/software`
    pub software: String,

    /// Written to `identification/encoding/encoding-date` when set
    pub encoding_date: Option<NaiveDate>,

    pub part_name: String,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            software: format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            encoding_date: Some(chrono::Local::now().date_naive()),
            part_name: "Lead Sheet".to_string(),
        }
    }
}

impl WriteOptions {
    pub fn with_part_name(mut self, part_name: impl Into<String>) -> Self {
        self.part_name = part_name.into();
        self
    }

    pub fn with_encoding_date(mut self, date: Option<NaiveDate>) -> Self {
        self.encoding_date = date;
        self
    }
}

/// Serialize a lead sheet as an indented MusicXML document
pub fn write_musicxml<W: Write>(sheet: &LeadSheet, options: &WriteOptions, out: W) -> Result<W> {
    let mut writer = Writer::new_with_indent(out, b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("no"))))?;
    writer.write_event(Event::DocType(BytesText::from_escaped(DOCTYPE)))?;

    start(&mut writer, BytesStart::new("score-partwise").with_attributes([("version", "4.0")]))?;

    if let Some(title) = &sheet.title {
        start(&mut writer, BytesStart::new("work"))?;
        text_element(&mut writer, "work-title", title)?;
        end(&mut writer, "work")?;
        text_element(&mut writer, "movement-title", title)?;
    }

    start(&mut writer, BytesStart::new("identification"))?;
    start(&mut writer, BytesStart::new("encoding"))?;
    text_element(&mut writer, "software", &options.software)?;
    if let Some(date) = options.encoding_date {
        text_element(&mut writer, "encoding-date", &date.format("%Y-%m-%d").to_string())?;
    }
    end(&mut writer, "encoding")?;
    end(&mut writer, "identification")?;

    start(&mut writer, BytesStart::new("part-list"))?;
    start(&mut writer, BytesStart::new("score-part").with_attributes([("id", PART_ID)]))?;
    text_element(&mut writer, "part-name", &options.part_name)?;
    end(&mut writer, "score-part")?;
    end(&mut writer, "part-list")?;

    start(&mut writer, BytesStart::new("part").with_attributes([("id", PART_ID)]))?;
    let fifths = sheet.key_signature.map(|k| k.fifths);
    for measure in layout_measures(sheet) {
        write_measure(&mut writer, sheet, &measure, fifths)?;
    }
    end(&mut writer, "part")?;

    end(&mut writer, "score-partwise")?;
    Ok(writer.into_inner())
}

fn write_measure<W: Write>(
    writer: &mut Writer<W>,
    sheet: &LeadSheet,
    measure: &Measure,
    fifths: Option<i8>,
) -> Result<()> {
    let number = measure.number.to_string();
    start(writer, BytesStart::new("measure").with_attributes([("number", number.as_str())]))?;

    if measure.number == 1 {
        write_attributes(writer, sheet)?;
    }

    for element in &measure.elements {
        match element {
            MeasureElement::Harmony { harmony, offset } => write_harmony(writer, harmony, *offset)?,
            MeasureElement::Rehearsal { text, offset } => write_rehearsal(writer, text, *offset)?,
            MeasureElement::Note(note) => write_note(writer, note, fifths)?,
        }
    }

    end(writer, "measure")
}

fn write_attributes<W: Write>(writer: &mut Writer<W>, sheet: &LeadSheet) -> Result<()> {
    start(writer, BytesStart::new("attributes"))?;
    text_element(writer, "divisions", &sheet.divisions.to_string())?;

    if let Some(key) = sheet.key_signature {
        start(writer, BytesStart::new("key"))?;
        text_element(writer, "fifths", &key.fifths.to_string())?;
        text_element(writer, "mode", key.mode())?;
        end(writer, "key")?;
    }

    start(writer, BytesStart::new("time"))?;
    text_element(writer, "beats", &sheet.time_signature.beats.to_string())?;
    text_element(writer, "beat-type", &sheet.time_signature.beat_type.to_string())?;
    end(writer, "time")?;

    let (sign, line) = match sheet.mean_pitch() {
        Some(mean) if mean < BASS_CLEF_THRESHOLD => ("F", "4"),
        _ => ("G", "2"),
    };
    start(writer, BytesStart::new("clef"))?;
    text_element(writer, "sign", sign)?;
    text_element(writer, "line", line)?;
    end(writer, "clef")?;

    end(writer, "attributes")
}

fn write_harmony<W: Write>(writer: &mut Writer<W>, harmony: &Harmony, offset: u64) -> Result<()> {
    start(writer, BytesStart::new("harmony"))?;

    match harmony {
        Harmony::Chord(chord) => {
            start(writer, BytesStart::new("root"))?;
            write_step_alter(writer, "root", chord.root)?;
            end(writer, "root")?;

            let kind = chord.quality.kind.as_musicxml();
            let text = chord.quality.text.as_str();
            start(writer, BytesStart::new("kind").with_attributes([("text", text)]))?;
            writer.write_event(Event::Text(BytesText::new(kind)))?;
            end(writer, "kind")?;

            if let Some(bass) = chord.bass {
                start(writer, BytesStart::new("bass"))?;
                write_step_alter(writer, "bass", bass)?;
                end(writer, "bass")?;
            }

            for degree in &chord.quality.degrees {
                start(writer, BytesStart::new("degree"))?;
                text_element(writer, "degree-value", &degree.value.to_string())?;
                text_element(writer, "degree-alter", &degree.alter.to_string())?;
                text_element(writer, "degree-type", degree.degree_type.as_musicxml())?;
                end(writer, "degree")?;
            }
        }
        Harmony::NoChord => {
            // MusicXML requires a root even for "none"; hide it
            start(writer, BytesStart::new("root"))?;
            start(writer, BytesStart::new("root-step").with_attributes([("text", "")]))?;
            writer.write_event(Event::Text(BytesText::new("C")))?;
            end(writer, "root-step")?;
            end(writer, "root")?;

            start(writer, BytesStart::new("kind").with_attributes([("text", "N.C.")]))?;
            writer.write_event(Event::Text(BytesText::new("none")))?;
            end(writer, "kind")?;
        }
    }

    if offset > 0 {
        text_element(writer, "offset", &offset.to_string())?;
    }
    end(writer, "harmony")
}

fn write_step_alter<W: Write>(writer: &mut Writer<W>, prefix: &str, name: PitchName) -> Result<()> {
    text_element(writer, &format!("{prefix}-step"), &name.step.letter().to_string())?;
    if name.alter != 0 {
        text_element(writer, &format!("{prefix}-alter"), &name.alter.to_string())?;
    }
    Ok(())
}

fn write_rehearsal<W: Write>(writer: &mut Writer<W>, text: &str, offset: u64) -> Result<()> {
    start(writer, BytesStart::new("direction").with_attributes([("placement", "above")]))?;
    start(writer, BytesStart::new("direction-type"))?;
    text_element(writer, "rehearsal", text)?;
    end(writer, "direction-type")?;
    if offset > 0 {
        text_element(writer, "offset", &offset.to_string())?;
    }
    end(writer, "direction")
}

fn write_note<W: Write>(writer: &mut Writer<W>, note: &NoteElement, fifths: Option<i8>) -> Result<()> {
    if note.is_rest() {
        return write_single_note(writer, note, None, false);
    }
    for (i, &pitch) in note.pitches.iter().enumerate() {
        let spelled = SpelledPitch::from_midi(pitch, fifths);
        write_single_note(writer, note, Some(spelled), i > 0)?;
    }
    Ok(())
}

fn write_single_note<W: Write>(
    writer: &mut Writer<W>,
    note: &NoteElement,
    pitch: Option<SpelledPitch>,
    chord: bool,
) -> Result<()> {
    start(writer, BytesStart::new("note"))?;

    if chord {
        empty(writer, BytesStart::new("chord"))?;
    }

    match pitch {
        Some(spelled) => {
            start(writer, BytesStart::new("pitch"))?;
            write_pitch(writer, spelled)?;
            end(writer, "pitch")?;
        }
        None if note.measure_rest => {
            empty(writer, BytesStart::new("rest").with_attributes([("measure", "yes")]))?
        }
        None => empty(writer, BytesStart::new("rest"))?,
    }

    text_element(writer, "duration", &note.duration.to_string())?;

    if note.tie_stop {
        empty(writer, BytesStart::new("tie").with_attributes([("type", "stop")]))?;
    }
    if note.tie_start {
        empty(writer, BytesStart::new("tie").with_attributes([("type", "start")]))?;
    }

    text_element(writer, "voice", "1")?;

    if let Some(value) = note.value {
        write_note_value(writer, value)?;
    }

    if note.tie_start || note.tie_stop {
        start(writer, BytesStart::new("notations"))?;
        if note.tie_stop {
            empty(writer, BytesStart::new("tied").with_attributes([("type", "stop")]))?;
        }
        if note.tie_start {
            empty(writer, BytesStart::new("tied").with_attributes([("type", "start")]))?;
        }
        end(writer, "notations")?;
    }

    end(writer, "note")
}

fn write_pitch<W: Write>(writer: &mut Writer<W>, spelled: SpelledPitch) -> Result<()> {
    text_element(writer, "step", &spelled.name.step.letter().to_string())?;
    if spelled.name.alter != 0 {
        text_element(writer, "alter", &spelled.name.alter.to_string())?;
    }
    text_element(writer, "octave", &spelled.octave.to_string())
}

fn write_note_value<W: Write>(writer: &mut Writer<W>, value: NoteValue) -> Result<()> {
    text_element(writer, "type", value.note_type.as_musicxml())?;
    for _ in 0..value.dots {
        empty(writer, BytesStart::new("dot"))?;
    }
    if value.triplet {
        start(writer, BytesStart::new("time-modification"))?;
        text_element(writer, "actual-notes", "3")?;
        text_element(writer, "normal-notes", "2")?;
        end(writer, "time-modification")?;
    }
    Ok(())
}

fn start<W: Write>(writer: &mut Writer<W>, element: BytesStart<'_>) -> Result<()> {
    writer.write_event(Event::Start(element))?;
    Ok(())
}

fn end<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<()> {
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn empty<W: Write>(writer: &mut Writer<W>, element: BytesStart<'_>) -> Result<()> {
    writer.write_event(Event::Empty(element))?;
    Ok(())
}

fn text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    start(writer, BytesStart::new(name))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    end(writer, name)
}
