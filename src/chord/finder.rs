use regex::Regex;
use std::sync::LazyLock;

/// Chord-like token: root, optional quality word, extension digits,
/// optional parenthesised alterations and optional slash bass.
static CHORD_FIGURE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"[^A-G]*([A-G][b#]?(?:maj|min|m|M|dim|aug|sus|add|[-_])?[0-9]*(?:\(.*\))?(?:/[A-G][b#]?)?)\b",
    )
    .ok()
});

/// Find the first chord-looking figure in a piece of text
///
/// The result still needs validating with [`super::parse_chord`]; the pattern
/// is deliberately loose (any capital A-G matches).
pub fn find_chord_figure(text: &str) -> Option<&str> {
    let regex = CHORD_FIGURE.as_ref()?;
    regex
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
