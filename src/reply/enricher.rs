//! Appends a media link to every theme line of a generated reply.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use super::normalizer::normalize_theme;
use super::parser::{parse_reply, LineKind};
use crate::media::{Resolution, ThemeResolver};

/// Glyph placed between a theme query and its link.
pub const NOTE_GLYPH: &str = "🎵";

/// Text shown in place of a link when neither tier found anything.
pub const NO_RESULT_SENTINEL: &str = "No result found";

/// A theme line together with the outcome of its single resolution attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeLine {
    /// Line index in the reply.
    pub index: usize,
    pub raw_line: String,
    pub query: String,
    pub resolution: Resolution,
}

/// The generated reply with links appended to its theme lines.
///
/// Has exactly as many lines as the reply it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedReply {
    text: String,
    themes: Vec<ThemeLine>,
}

impl EnrichedReply {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn themes(&self) -> &[ThemeLine] {
        &self.themes
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Render the link part of an enriched theme line.
pub fn render_link(resolution: &Resolution) -> String {
    match resolution {
        Resolution::Resolved(reference) => reference.url.clone(),
        Resolution::Unavailable => NO_RESULT_SENTINEL.to_string(),
        Resolution::Failed(reason) => format!("(link not available: {})", reason),
    }
}

enum EnrichedLine<'a> {
    Unchanged(&'a str),
    Theme(ThemeLine),
}

pub struct LineEnricher {
    resolver: Arc<dyn ThemeResolver>,
}

impl LineEnricher {
    pub fn new(resolver: Arc<dyn ThemeResolver>) -> Self {
        Self { resolver }
    }

    /// Enrich every theme line of `reply`.
    ///
    /// Theme lines are resolved concurrently, the output keeps the input
    /// order. Plain lines and theme lines with nothing searchable are emitted
    /// unchanged. Resolution failures end up as inline diagnostics.
    /// A trailing line terminator on `reply` is kept as `\n`.
    pub async fn enrich(&self, reply: &str) -> EnrichedReply {
        let lines = parse_reply(reply);

        let pending = lines.iter().enumerate().map(|(index, line)| async move {
            if line.kind == LineKind::Plain {
                return EnrichedLine::Unchanged(line.raw);
            }
            let Some(query) = normalize_theme(line.raw) else {
                debug!(line = index, raw = %line.raw, "Theme line has nothing searchable, keeping as is");
                return EnrichedLine::Unchanged(line.raw);
            };
            let resolution = self.resolver.resolve(&query).await;
            EnrichedLine::Theme(ThemeLine {
                index,
                raw_line: line.raw.to_string(),
                query,
                resolution,
            })
        });

        let enriched = join_all(pending).await;

        let mut rendered = Vec::with_capacity(enriched.len());
        let mut themes = Vec::new();
        for line in enriched {
            match line {
                EnrichedLine::Unchanged(raw) => rendered.push(raw.to_string()),
                EnrichedLine::Theme(theme) => {
                    if let Resolution::Failed(reason) = &theme.resolution {
                        warn!(line = theme.index, query = %theme.query, reason = %reason, "Theme link not available");
                    }
                    rendered.push(format!(
                        "- {} {} {}",
                        theme.query,
                        NOTE_GLYPH,
                        render_link(&theme.resolution)
                    ));
                    themes.push(theme);
                }
            }
        }

        debug!(
            lines = rendered.len(),
            themes = themes.len(),
            "Enriched generated reply"
        );

        let mut text = rendered.join("\n");
        if reply.ends_with('\n') {
            text.push('\n');
        }

        EnrichedReply { text, themes }
    }
}
