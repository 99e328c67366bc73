/// Lowercases `query` and splits it on whitespace, dropping empty tokens.
#[must_use]
pub fn keywords(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .map(ToString::to_string)
        .collect()
}

#[must_use]
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    let Some((clip_idx, _)) = text.char_indices().nth(max_chars) else {
        return text.to_string();
    };

    let mut out = text[..clip_idx].to_string();
    out.push_str("...");
    out
}

/// Splits a comma-separated folder list into trimmed, non-empty prefixes.
#[must_use]
pub fn folder_prefixes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|folder| !folder.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[must_use]
pub fn is_cjk_ideograph(ch: char) -> bool {
    matches!(ch, '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' | '\u{F900}'..='\u{FAFF}')
}

#[must_use]
pub fn count_cjk_ideographs(text: &str) -> usize {
    text.chars().filter(|ch| is_cjk_ideograph(*ch)).count()
}

#[must_use]
pub fn count_latin_letters(text: &str) -> usize {
    text.chars().filter(char::is_ascii_alphabetic).count()
}

/// True when `needle` occurs in `haystack` bounded by whitespace or the
/// start/end of the text on both sides.
#[must_use]
pub fn contains_whole_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.match_indices(needle).any(|(start, matched)| {
        let end = start + matched.len();
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .is_none_or(char::is_whitespace);
        let after_ok = haystack[end..]
            .chars()
            .next()
            .is_none_or(char::is_whitespace);
        before_ok && after_ok
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_lowercase_and_drop_empty_tokens() {
        assert_eq!(keywords("  Hello \t WORLD\n"), vec!["hello", "world"]);
        assert!(keywords("   ").is_empty());
        assert!(keywords("").is_empty());
    }

    #[test]
    fn truncate_text_preserves_utf8_char_boundaries() {
        let input = "\u{4F60}\u{597D}\u{4E16}\u{754C}\u{554A}-hello";
        let clipped = truncate_text(input, 5);
        let expected = format!("{}...", "\u{4F60}\u{597D}\u{4E16}\u{754C}\u{554A}");
        assert_eq!(clipped, expected);
    }

    #[test]
    fn truncate_text_returns_original_when_input_fits_limit() {
        assert_eq!(truncate_text("hello", 5), "hello");
    }

    #[test]
    fn folder_prefixes_trim_and_skip_blanks() {
        assert_eq!(
            folder_prefixes(" Archive , ,Daily/2024,"),
            vec!["Archive", "Daily/2024"]
        );
        assert!(folder_prefixes("").is_empty());
    }

    #[test]
    fn script_counters_distinguish_cjk_and_latin() {
        assert_eq!(count_cjk_ideographs("\u{641C}\u{7D22}abc"), 2);
        assert_eq!(count_latin_letters("\u{641C}\u{7D22}abc 12"), 3);
    }

    #[test]
    fn whole_word_requires_whitespace_or_line_boundaries() {
        assert!(contains_whole_word("rust is fun", "rust"));
        assert!(contains_whole_word("is rust", "rust"));
        assert!(contains_whole_word("a rust b", "rust"));
        assert!(!contains_whole_word("rusty nail", "rust"));
        assert!(!contains_whole_word("trust", "rust"));
        assert!(contains_whole_word("trust rust", "rust"));
    }
}
