/// Languages the reply asks playlist themes for.
pub const THEME_LANGUAGES: [&str; 3] = ["Telugu", "Hindi", "English"];

/// Themes requested per language.
pub const THEMES_PER_LANGUAGE: usize = 2;

/// Tips requested per reply.
pub const TIPS_PER_REPLY: usize = 2;

/// Build the advisory prompt for a mood.
///
/// The model is asked for a fixed structure, but nothing downstream relies on
/// it being followed beyond the `-` prefix on theme lines.
pub fn build_mood_prompt(mood: &str) -> String {
    let mut prompt = format!(
        "The user feels: {}\n\n\
         🎯 Your reply must always include:\n\
         - {} short healing or motivational tips\n",
        mood.trim(),
        TIPS_PER_REPLY
    );
    for language in THEME_LANGUAGES {
        prompt.push_str(&format!(
            "- EXACTLY {} {} playlist themes\n",
            THEMES_PER_LANGUAGE, language
        ));
    }
    prompt.push_str("- Format playlists as list items starting with \"-\"\n");
    prompt
}
