//! Tokenization helpers shared by the analysis modules.

/// Count whitespace-delimited tokens.
///
/// Punctuation attached to a word is part of the token, so `"end."` is one
/// word and a lone `"-"` is one word too.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Extract words from text, splitting on whitespace and stripping punctuation.
///
/// Leading and trailing punctuation is trimmed (inner apostrophes and
/// hyphens survive, so `don't` and `well-known` stay whole) and every word
/// is lowercased. Tokens made only of punctuation are dropped.
pub fn extract_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'' && c != '-'))
        .map(|w| w.trim_matches(|c: char| c == '\'' || c == '-'))
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}
