//! Chord symbol parsing
//!
//! Turns chord names such as "Bbm7/F" into [`ChordSymbol`] values and finds
//! chord-like figures inside free text from MIDI text, lyric and marker events.

mod figure;
mod finder;
mod quality;

pub use figure::ChordParseError;
pub use finder::find_chord_figure;
pub use quality::quality_from_suffix;

use crate::model::ChordSymbol;

/// Parse a chord figure, or `None` if it is not a recognised chord name
pub fn parse_chord(figure: &str) -> Option<ChordSymbol> {
    figure.parse().ok()
}
