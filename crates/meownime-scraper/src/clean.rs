//! Title cleaning.

/// Boilerplate removed from titles, in order. Each is removed both as
/// written and in lowercase.
pub const BOILERPLATE: &[&str] = &[
    "Sub Indo",
    "Subtitle Indonesia",
    "Episode",
    "Batch",
    "Download",
    "Streaming",
    "Watch",
    "Online",
];

/// Cleaned titles must be longer than this many characters
pub const MIN_CLEAN_TITLE_CHARS: usize = 2;

/// Strip boilerplate and collapse whitespace
///
/// When cleaning leaves two characters or fewer, the original trimmed title
/// is returned unchanged instead.
pub fn clean_title(title: &str) -> String {
    let mut cleaned = title.trim().to_string();

    for pattern in BOILERPLATE {
        cleaned = cleaned
            .replace(pattern, "")
            .replace(&pattern.to_lowercase(), "");
    }

    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    if cleaned.chars().count() > MIN_CLEAN_TITLE_CHARS {
        cleaned
    } else {
        title.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_boilerplate() {
        assert_eq!(
            clean_title("  Jujutsu Kaisen  Sub Indo Batch "),
            "Jujutsu Kaisen"
        );
        assert_eq!(
            clean_title("Download Spy x Family Subtitle Indonesia"),
            "Spy x Family"
        );
        assert_eq!(clean_title("one piece episode 1100 sub indo"), "one piece 1100");
    }

    #[test]
    fn test_mixed_case_boilerplate_survives() {
        assert_eq!(clean_title("Naruto EPISODE 5"), "Naruto EPISODE 5");
    }

    #[test]
    fn test_over_cleaning_falls_back_to_original() {
        assert_eq!(clean_title("  Download Batch  "), "Download Batch");
        assert_eq!(clean_title("Watch Online"), "Watch Online");
        assert_eq!(clean_title("K Episode"), "K Episode");
    }

    #[test]
    fn test_idempotent_on_clean_titles() {
        for title in [
            "Frieren: Beyond Journey's End",
            "Sousou no Frieren Sub Indo",
            "Download Batch",
            "Oshi no Ko Season 2 Episode 3",
            "  spaced    out   title ",
        ] {
            let once = clean_title(title);
            assert_eq!(clean_title(&once), once, "{title}");
        }
    }
}
