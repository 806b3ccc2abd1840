//! Document statistics: words, characters, pages and reading time.
//!
//! Page and reading-time figures use fixed rates of 250 words per page and
//! 200 words per minute. Halves round to even, so 500 words read in
//! 2 minutes, not 3.

use chrono::Local;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::markup;
use crate::text;

/// Words that fit on one manuscript page.
pub const WORDS_PER_PAGE: f64 = 250.0;

/// Average silent reading speed, in words per minute.
pub const WORDS_PER_MINUTE: f64 = 200.0;

/// Statistics for a single document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStats {
    /// Whitespace-delimited words after tags are stripped.
    pub word_count: usize,
    /// Characters (Unicode scalar values) after tags are stripped.
    pub character_count: usize,
    /// Pages at 250 words per page, one decimal place. Never below 1 for
    /// non-empty text; 0 for empty text.
    pub page_count: f64,
    /// Reading time for display, e.g. `"3 min"`.
    pub reading_time: String,
    /// Reading time in whole minutes.
    pub reading_time_minutes: u64,
    /// When these statistics were computed (local time, ISO-8601).
    pub last_modified: String,
}

/// [`DocumentStats`] plus the finer-grained counts shown in the inspector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DetailedStats {
    /// Core statistics.
    #[serde(flatten)]
    pub stats: DocumentStats,
    /// Characters other than the ASCII space.
    pub characters_no_spaces: usize,
    /// Number of `.` characters.
    pub sentence_count: usize,
    /// Number of blank-line (`\n\n`) separators.
    pub paragraph_count: usize,
}

/// Compute statistics for raw editor content.
///
/// Markup tags are stripped first. Nothing is cached: every call recounts
/// and stamps the current time.
#[tracing::instrument(skip_all, fields(text_len = raw.len()))]
pub fn compute_stats(raw: &str) -> DocumentStats {
    let content = markup::strip_tags(raw);
    stats_for_plain(&content)
}

/// Compute [`DetailedStats`] for raw editor content.
#[tracing::instrument(skip_all, fields(text_len = raw.len()))]
pub fn compute_detailed_stats(raw: &str) -> DetailedStats {
    let content = markup::strip_tags(raw);
    let stats = stats_for_plain(&content);

    DetailedStats {
        stats,
        characters_no_spaces: content.chars().filter(|&c| c != ' ').count(),
        sentence_count: content.matches('.').count(),
        paragraph_count: content.matches("\n\n").count(),
    }
}

fn stats_for_plain(content: &str) -> DocumentStats {
    let words = if content.trim().is_empty() {
        0
    } else {
        text::count_words(content)
    };
    let minutes = reading_minutes(words);

    DocumentStats {
        word_count: words,
        character_count: content.chars().count(),
        page_count: page_count(words),
        reading_time: format!("{minutes} min"),
        reading_time_minutes: minutes,
        last_modified: Local::now()
            .naive_local()
            .format("%Y-%m-%dT%H:%M:%S%.6f")
            .to_string(),
    }
}

fn page_count(words: usize) -> f64 {
    if words == 0 {
        return 0.0;
    }
    let pages = (words as f64 / WORDS_PER_PAGE * 10.0).round_ties_even() / 10.0;
    pages.max(1.0)
}

fn reading_minutes(words: usize) -> u64 {
    if words == 0 {
        return 0;
    }
    let minutes = (words as f64 / WORDS_PER_MINUTE).round_ties_even() as u64;
    minutes.max(1)
}
