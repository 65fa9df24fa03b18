//! Input discovery and output path layout

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extension written for every converted file
pub const OUTPUT_EXTENSION: &str = "musicxml";

/// One MIDI file and where its MusicXML goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Maps an input file or directory onto output paths
///
/// A single input file converts to the output path as given. An input
/// directory is searched recursively for `.mid`/`.midi` files, and each one
/// lands at the same relative path under the output directory with a
/// `.musicxml` extension.
pub struct OutputLayout {
    input_root: PathBuf,
    output_root: PathBuf,
}

impl OutputLayout {
    pub fn new(input_root: PathBuf, output_root: PathBuf) -> Self {
        Self {
            input_root,
            output_root,
        }
    }

    /// Whether the input is a directory of MIDI files
    pub fn is_batch(&self) -> bool {
        self.input_root.is_dir()
    }

    /// All conversions to perform, sorted by input path
    pub fn jobs(&self) -> Result<Vec<ConversionJob>> {
        if !self.input_root.exists() {
            bail!("Input not found: {:?}", self.input_root);
        }

        if !self.is_batch() {
            return Ok(vec![ConversionJob {
                input: self.input_root.clone(),
                output: self.output_root.clone(),
            }]);
        }

        let mut jobs = Vec::new();
        for entry in WalkDir::new(&self.input_root).sort_by_file_name() {
            let entry = entry
                .with_context(|| format!("Failed to scan input directory: {:?}", self.input_root))?;
            if entry.file_type().is_file() && is_midi_file(entry.path()) {
                jobs.push(ConversionJob {
                    input: entry.path().to_path_buf(),
                    output: self.output_path_for(entry.path()),
                });
            }
        }

        log::debug!("Found {} MIDI file(s) under {:?}", jobs.len(), self.input_root);
        Ok(jobs)
    }

    /// Output path for a file found under the input directory
    pub fn output_path_for(&self, input: &Path) -> PathBuf {
        let relative = input.strip_prefix(&self.input_root).unwrap_or(input);
        let relative = match relative.file_name() {
            Some(_) => relative.to_path_buf(),
            None => PathBuf::from("output"),
        };
        self.output_root.join(relative).with_extension(OUTPUT_EXTENSION)
    }
}

/// `.mid` or `.midi`, case-insensitive
pub fn is_midi_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("mid") || ext.eq_ignore_ascii_case("midi"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_is_midi_file() {
        assert!(is_midi_file(Path::new("song.mid")));
        assert!(is_midi_file(Path::new("SONG.MIDI")));
        assert!(!is_midi_file(Path::new("song.kar.txt")));
        assert!(!is_midi_file(Path::new("mid")));
    }

    #[test]
    fn test_single_file_job() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("tune.mid");
        fs::write(&input, b"MThd").unwrap();
        let output = dir.path().join("out.musicxml");

        let layout = OutputLayout::new(input.clone(), output.clone());
        assert!(!layout.is_batch());
        assert_eq!(layout.jobs().unwrap(), vec![ConversionJob { input, output }]);
    }

    #[test]
    fn test_directory_mirrors_structure() {
        let dir = TempDir::new().unwrap();
        let input_root = dir.path().join("in");
        fs::create_dir_all(input_root.join("set1")).unwrap();
        fs::write(input_root.join("a.mid"), b"").unwrap();
        fs::write(input_root.join("set1/b.MIDI"), b"").unwrap();
        fs::write(input_root.join("notes.txt"), b"").unwrap();

        let output_root = dir.path().join("out");
        let layout = OutputLayout::new(input_root.clone(), output_root.clone());
        let jobs = layout.jobs().unwrap();

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].output, output_root.join("a.musicxml"));
        assert_eq!(jobs[1].input, input_root.join("set1/b.MIDI"));
        assert_eq!(jobs[1].output, output_root.join("set1/b.musicxml"));
    }

    #[test]
    fn test_missing_input() {
        let dir = TempDir::new().unwrap();
        let layout = OutputLayout::new(dir.path().join("nope.mid"), dir.path().join("x"));
        assert!(layout.jobs().is_err());
    }
}
