use super::parser::THEME_MARKERS;

/// Turn a theme candidate line into a search query.
///
/// Strips the leading bullet markers, drops every character that is neither
/// alphanumeric nor whitespace, and collapses whitespace runs. Returns `None`
/// when nothing searchable is left, in which case the line is not a theme.
pub fn normalize_theme(line: &str) -> Option<String> {
    let without_markers = line
        .trim_start()
        .trim_start_matches(&THEME_MARKERS[..])
        .trim_start();

    let cleaned: String = without_markers
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    let query = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    if query.is_empty() {
        None
    } else {
        Some(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_emoji_and_punctuation() {
        assert_eq!(
            normalize_theme("- 😊 Relaxing Telugu Beats!!"),
            Some("Relaxing Telugu Beats".to_string())
        );
    }

    #[test]
    fn strips_runs_of_mixed_markers() {
        assert_eq!(
            normalize_theme("  -–• Lo-fi   study\tsession "),
            Some("Lofi study session".to_string())
        );
    }

    #[test]
    fn keeps_accented_letters() {
        assert_eq!(
            normalize_theme("- Café Música Romántica"),
            Some("Café Música Romántica".to_string())
        );
    }

    #[test]
    fn symbol_only_line_is_not_a_theme() {
        assert_eq!(normalize_theme("- !!! 🎶"), None);
        assert_eq!(normalize_theme("-"), None);
        assert_eq!(normalize_theme("•   "), None);
    }

    #[test]
    fn markdown_bold_is_removed() {
        assert_eq!(
            normalize_theme("- **Telugu:** Feel-good Melodies"),
            Some("Telugu Feelgood Melodies".to_string())
        );
    }
}
