//! Reply enrichment and narration pipeline.
//!
//! A generated reply flows through these stages:
//! - [`parser`]: split into lines and classify theme lines by bullet marker
//! - [`normalizer`]: turn a theme line into a clean search query
//! - [`enricher`]: resolve every theme to a media link, keeping line order
//! - [`narration`]: strip links and symbols so the text can be spoken

mod enricher;
mod narration;
mod normalizer;
mod parser;

pub use enricher::{
    render_link, EnrichedReply, LineEnricher, ThemeLine, NOTE_GLYPH, NO_RESULT_SENTINEL,
};
pub use narration::{sanitize_for_narration, NarrationText};
pub use normalizer::normalize_theme;
pub use parser::{is_theme_candidate, parse_reply, LineKind, ParsedLine, THEME_MARKERS};
