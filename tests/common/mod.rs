//! Shared fixtures: build Standard MIDI Files in memory
#![allow(dead_code)]

use midly::num::{u15, u28, u4, u7};
use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind};
use std::fs;
use std::path::Path;

/// Absolute-tick SMF builder
pub struct MidiBuilder {
    ticks_per_quarter: u16,
    tracks: Vec<Vec<(u32, TrackEventKind<'static>)>>,
}

impl MidiBuilder {
    pub fn new(ticks_per_quarter: u16) -> Self {
        Self {
            ticks_per_quarter,
            tracks: Vec::new(),
        }
    }

    /// Add an empty track and return its index
    pub fn track(&mut self) -> usize {
        self.tracks.push(Vec::new());
        self.tracks.len() - 1
    }

    pub fn meta(&mut self, track: usize, tick: u32, meta: MetaMessage<'static>) -> &mut Self {
        self.tracks[track].push((tick, TrackEventKind::Meta(meta)));
        self
    }

    /// Yamaha XF event: `43 7B <id> <payload...>`
    pub fn xf(&mut self, track: usize, tick: u32, data: &'static [u8]) -> &mut Self {
        self.meta(track, tick, MetaMessage::SequencerSpecific(data))
    }

    /// Note-on at `start`, note-off at `end`; `channel` is 0-based
    pub fn note(&mut self, track: usize, channel: u8, key: u8, start: u32, end: u32) -> &mut Self {
        let channel = u4::from(channel);
        self.tracks[track].push((
            start,
            TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOn {
                    key: u7::from(key),
                    vel: u7::from(100u8),
                },
            },
        ));
        self.tracks[track].push((
            end,
            TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOff {
                    key: u7::from(key),
                    vel: u7::from(0u8),
                },
            },
        ));
        self
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let tracks = self
            .tracks
            .iter()
            .map(|events| {
                let mut events = events.clone();
                events.sort_by_key(|(tick, _)| *tick);

                let mut previous = 0;
                let mut track: Vec<TrackEvent<'static>> = events
                    .into_iter()
                    .map(|(tick, kind)| {
                        let delta = tick - previous;
                        previous = tick;
                        TrackEvent {
                            delta: u28::from(delta),
                            kind,
                        }
                    })
                    .collect();
                track.push(TrackEvent {
                    delta: u28::from(0u32),
                    kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
                });
                track
            })
            .collect();

        let smf = Smf {
            header: Header::new(
                Format::Parallel,
                Timing::Metrical(u15::from(self.ticks_per_quarter)),
            ),
            tracks,
        };
        let mut data = Vec::new();
        smf.write_std(&mut data).unwrap();
        data
    }

    pub fn write(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, self.to_bytes()).unwrap();
    }
}

/// Two bars of 4/4 in F major with XF chords F and C7, a rehearsal mark,
/// a melody on channel 1 (one note tied over the barline) and a bass line
/// on channel 2.
pub fn xf_song() -> MidiBuilder {
    let mut midi = MidiBuilder::new(480);
    let conductor = midi.track();
    midi.meta(conductor, 0, MetaMessage::TrackName(b"Test Tune"))
        .meta(conductor, 0, MetaMessage::TimeSignature(4, 2, 24, 8))
        .meta(conductor, 0, MetaMessage::KeySignature(-1, false))
        .xf(conductor, 0, &[0x43, 0x7B, 0x02, 0x03])
        .xf(conductor, 0, &[0x43, 0x7B, 0x01, 0x34, 0x00, 0x7F, 0x7F])
        .xf(conductor, 1920, &[0x43, 0x7B, 0x01, 0x31, 0x13, 0x7F, 0x7F]);

    let band = midi.track();
    midi.note(band, 0, 72, 0, 480)
        .note(band, 0, 74, 480, 960)
        .note(band, 0, 76, 960, 1440)
        .note(band, 0, 77, 1440, 2400)
        .note(band, 0, 79, 2400, 3840)
        .note(band, 1, 41, 0, 1920)
        .note(band, 1, 36, 1920, 3840);
    midi
}
