//! Round-trip validation of written MusicXML

use anyhow::{bail, Context, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// What a MusicXML file contains
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub title: Option<String>,
    pub divisions: Option<u32>,
    pub parts: usize,
    pub measures: usize,
    /// Pitched notes, counting each chord member
    pub notes: usize,
    pub rests: usize,
    pub harmonies: usize,
    pub rehearsal_marks: usize,
}

/// Where a `<duration>` belongs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimedElement {
    Note,
    Backup,
    Forward,
}

/// Per-file parse state
#[derive(Default)]
struct Scan {
    report: ValidationReport,
    beats: Option<u64>,
    beat_type: Option<u64>,
    measure_number: String,
    measure_fill: i64,
    timed: Option<TimedElement>,
    note_is_chord: bool,
    note_is_rest: bool,
    note_duration: i64,
    text_target: Vec<u8>,
}

impl Scan {
    fn start(&mut self, e: &BytesStart<'_>) {
        match e.name().as_ref() {
            b"part" => self.report.parts += 1,
            b"measure" => {
                self.report.measures += 1;
                self.measure_fill = 0;
                self.measure_number = e
                    .try_get_attribute("number")
                    .ok()
                    .flatten()
                    .and_then(|a| a.unescape_value().ok().map(|v| v.to_string()))
                    .unwrap_or_else(|| self.report.measures.to_string());
            }
            b"note" => {
                self.timed = Some(TimedElement::Note);
                self.note_is_chord = false;
                self.note_is_rest = false;
                self.note_duration = 0;
            }
            b"backup" => self.timed = Some(TimedElement::Backup),
            b"forward" => self.timed = Some(TimedElement::Forward),
            b"chord" => self.note_is_chord = true,
            b"rest" => self.note_is_rest = true,
            b"harmony" => self.report.harmonies += 1,
            b"rehearsal" => self.report.rehearsal_marks += 1,
            _ => {}
        }
        self.text_target = e.name().as_ref().to_vec();
    }

    fn text(&mut self, text: &str) -> Result<()> {
        match self.text_target.as_slice() {
            b"work-title" | b"movement-title" if self.report.title.is_none() => {
                self.report.title = Some(text.to_string());
            }
            b"divisions" => {
                let divisions = text
                    .parse()
                    .with_context(|| format!("Invalid divisions: {:?}", text))?;
                self.report.divisions = Some(divisions);
            }
            b"beats" => self.beats = text.parse().ok(),
            b"beat-type" => self.beat_type = text.parse().ok(),
            b"duration" => {
                let duration: i64 = text
                    .parse()
                    .with_context(|| format!("Invalid duration: {:?}", text))?;
                match self.timed {
                    Some(TimedElement::Note) => self.note_duration = duration,
                    Some(TimedElement::Backup) => self.measure_fill -= duration,
                    Some(TimedElement::Forward) => self.measure_fill += duration,
                    None => {}
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn end(&mut self, name: &[u8]) -> Result<()> {
        match name {
            b"note" => {
                if self.note_is_rest {
                    self.report.rests += 1;
                } else {
                    self.report.notes += 1;
                }
                if !self.note_is_chord {
                    self.measure_fill += self.note_duration;
                }
                self.timed = None;
            }
            b"backup" | b"forward" => self.timed = None,
            b"measure" => self.check_measure()?,
            _ => {}
        }
        self.text_target.clear();
        Ok(())
    }

    fn check_measure(&self) -> Result<()> {
        let (Some(divisions), Some(beats), Some(beat_type)) =
            (self.report.divisions, self.beats, self.beat_type)
        else {
            bail!(
                "Measure {} appears before divisions and time signature are known",
                self.measure_number
            );
        };
        let expected = (divisions as u64 * 4 * beats / beat_type.max(1)) as i64;
        if self.measure_fill != expected {
            bail!(
                "Measure {} holds {} divisions, expected {}",
                self.measure_number,
                self.measure_fill,
                expected
            );
        }
        Ok(())
    }
}

/// Validate a MusicXML file written by this tool
pub fn validate_musicxml(path: &Path) -> Result<ValidationReport> {
    log::info!("Validating MusicXML at: {:?}", path);

    let file = File::open(path).with_context(|| format!("Failed to open MusicXML: {:?}", path))?;
    let report = validate_reader(BufReader::new(file))
        .with_context(|| format!("Validation failed for {:?}", path))?;

    log::info!("  - Parts: {}", report.parts);
    log::info!("  - Measures: {}", report.measures);
    log::info!("  - Notes: {} ({} rests)", report.notes, report.rests);
    log::info!("  - Chord symbols: {}", report.harmonies);
    log::info!("  - Rehearsal marks: {}", report.rehearsal_marks);
    Ok(report)
}

/// Validate an in-memory MusicXML document
pub fn validate_musicxml_str(xml: &str) -> Result<ValidationReport> {
    validate_reader(xml.as_bytes())
}

fn validate_reader<R: BufRead>(input: R) -> Result<ValidationReport> {
    let mut reader = Reader::from_reader(input);
    reader.config_mut().trim_text(true);

    let mut scan = Scan::default();
    let mut root_seen = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if !root_seen {
                    if e.name().as_ref() != b"score-partwise" {
                        bail!(
                            "Root element is <{}>, expected <score-partwise>",
                            String::from_utf8_lossy(e.name().as_ref())
                        );
                    }
                    root_seen = true;
                }
                scan.start(&e);
            }
            Ok(Event::Empty(e)) => {
                scan.start(&e);
                scan.end(e.name().as_ref())?;
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().unwrap_or_default();
                scan.text(&text)?;
            }
            Ok(Event::End(e)) => scan.end(e.name().as_ref())?,
            Ok(Event::Eof) => break,
            Err(e) => bail!("XML parsing error at position {}: {}", reader.buffer_position(), e),
            _ => {}
        }

        buf.clear();
    }

    if !root_seen {
        bail!("Document has no <score-partwise> element");
    }
    if scan.report.parts == 0 {
        bail!("Score has no parts");
    }
    Ok(scan.report)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<score-partwise version="4.0">
  <movement-title>Test</movement-title>
  <part-list><score-part id="P1"><part-name>Lead</part-name></score-part></part-list>
  <part id="P1">"#;

    fn document(measures: &str) -> String {
        format!("{}{}</part></score-partwise>", HEADER, measures)
    }

    const ATTRIBUTES: &str = "<attributes><divisions>2</divisions><time><beats>2</beats><beat-type>4</beat-type></time></attributes>";

    #[test]
    fn test_valid_document() {
        let xml = document(&format!(
            r#"<measure number="1">{}
                <harmony><root><root-step>C</root-step></root><kind>major</kind></harmony>
                <note><pitch><step>C</step><octave>4</octave></pitch><duration>2</duration></note>
                <note><chord/><pitch><step>E</step><octave>4</octave></pitch><duration>2</duration></note>
                <note><rest/><duration>2</duration></note>
              </measure>
              <measure number="2">
                <direction><direction-type><rehearsal>A</rehearsal></direction-type></direction>
                <note><rest measure="yes"/><duration>4</duration></note>
              </measure>"#,
            ATTRIBUTES
        ));

        let report = validate_musicxml_str(&xml).unwrap();
        assert_eq!(report.title.as_deref(), Some("Test"));
        assert_eq!(report.divisions, Some(2));
        assert_eq!(report.parts, 1);
        assert_eq!(report.measures, 2);
        assert_eq!(report.notes, 2);
        assert_eq!(report.rests, 2);
        assert_eq!(report.harmonies, 1);
        assert_eq!(report.rehearsal_marks, 1);
    }

    #[test]
    fn test_underfull_measure() {
        let xml = document(&format!(
            r#"<measure number="7">{}<note><rest/><duration>3</duration></note></measure>"#,
            ATTRIBUTES
        ));
        let err = validate_musicxml_str(&xml).unwrap_err();
        assert!(err.to_string().contains("Measure 7 holds 3 divisions, expected 4"));
    }

    #[test]
    fn test_wrong_root() {
        assert!(validate_musicxml_str("<score-timewise version=\"4.0\"></score-timewise>").is_err());
    }

    #[test]
    fn test_malformed_xml() {
        assert!(validate_musicxml_str("<score-partwise><part></score-partwise>").is_err());
    }
}
