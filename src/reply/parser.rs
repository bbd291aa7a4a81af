//! Splits a generated reply into classified lines.
//!
//! The only structure expected from the model is the bullet prefix on theme
//! lines. Everything else is treated as prose.

/// Bullet characters that mark a theme line.
pub const THEME_MARKERS: [char; 3] = ['-', '–', '•'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Bullet-marked line naming a playlist or video subject.
    Theme,
    Plain,
}

/// A single line of the generated reply, borrowed from the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    pub raw: &'a str,
    pub kind: LineKind,
}

/// Returns true if the trimmed line starts with one of the [`THEME_MARKERS`].
pub fn is_theme_candidate(line: &str) -> bool {
    line.trim().starts_with(&THEME_MARKERS[..])
}

/// Split a reply into lines, in order, keeping empty lines.
///
/// A trailing line terminator does not produce an extra empty line, and a
/// `\r` before a `\n` is dropped.
pub fn parse_reply(reply: &str) -> Vec<ParsedLine<'_>> {
    reply
        .lines()
        .map(|raw| ParsedLine {
            raw,
            kind: if is_theme_candidate(raw) {
                LineKind::Theme
            } else {
                LineKind::Plain
            },
        })
        .collect()
}
