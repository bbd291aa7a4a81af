//! Narration text sanitization.

use lazy_static::lazy_static;
use regex::Regex;

use super::enricher::EnrichedReply;

lazy_static! {
    /// A recognized scheme followed by `://` and the rest of the non-whitespace run.
    static ref URL_PATTERN: Regex =
        Regex::new(r"(?i)(?:https?|ftp)://\S*").expect("Failed to compile URL pattern");
}

const PERMITTED_PUNCTUATION: &[char] = &[',', '.', '!', '?'];

fn is_permitted(c: char) -> bool {
    c.is_ascii_alphanumeric() || c.is_whitespace() || PERMITTED_PUNCTUATION.contains(&c)
}

/// Project text into a form the speech engine can read aloud.
///
/// Removes URLs, then every character outside ASCII letters, digits,
/// whitespace and `,.!?`, then collapses whitespace and trims.
/// Applying it to its own output changes nothing.
pub fn sanitize_for_narration(text: &str) -> String {
    let without_urls = URL_PATTERN.replace_all(text, "");
    let permitted: String = without_urls.chars().filter(|c| is_permitted(*c)).collect();
    permitted.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Sanitized projection of an [`EnrichedReply`], ready for synthesis.
///
/// Only constructible through sanitization, so the links appended during
/// enrichment can never reach the speech engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrationText(String);

impl NarrationText {
    pub fn from_enriched(reply: &EnrichedReply) -> Self {
        Self::sanitize(reply.text())
    }

    pub fn sanitize(text: &str) -> Self {
        Self(sanitize_for_narration(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for NarrationText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
