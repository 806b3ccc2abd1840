//! Heuristic style and grammar checks.
//!
//! Three fixed rules run in order: long sentences, irregular spacing, and
//! excessive passive voice. Their findings are concatenated in that order
//! and cut to [`MAX_ISSUES`]. The cut happens after all rules run, so five
//! or more long sentences hide the spacing and passive-voice findings.

use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::markup;
use crate::text;

/// Maximum number of issues returned by [`check_style`].
pub const MAX_ISSUES: usize = 5;

/// Texts shorter than this many words are not checked.
pub const MIN_WORDS: usize = 10;

/// Sentences with more words than this are flagged.
pub const LONG_SENTENCE_WORDS: usize = 30;

/// Passive constructions tolerated before the passive rule fires.
pub const PASSIVE_THRESHOLD: usize = 3;

/// Excerpt length for long-sentence issues, in characters.
const EXCERPT_CHARS: usize = 50;

/// Three or more consecutive spaces.
static SPACING_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"   +").expect("valid regex"));

/// "was" followed by a word ending in -ed. Case-sensitive.
static PASSIVE_WAS_ED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bwas\s+\w+ed\b").expect("valid regex"));

/// A single finding from [`check_style`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StyleIssue {
    /// Sentence index for long sentences, otherwise `"spacing"` or `"passive"`.
    pub id: String,
    /// Excerpt or summary of what was found.
    pub text: String,
    /// How to fix it.
    pub suggestion: String,
    /// What kind of problem this is.
    #[serde(rename = "type")]
    pub category: IssueCategory,
    /// How serious it is.
    pub severity: Severity,
}

/// Category of a style issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum IssueCategory {
    /// Wording and sentence construction.
    Style,
    /// Whitespace and layout.
    Formatting,
}

/// Issue severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Worth a look.
    Info,
    /// Likely worth rewriting.
    Warning,
}

impl IssueCategory {
    /// Returns the category as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Style => "style",
            Self::Formatting => "formatting",
        }
    }
}

impl Severity {
    /// Returns the severity as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
        }
    }
}

/// Check raw editor content for style issues.
///
/// Tags are stripped first. Returns at most [`MAX_ISSUES`] issues, in rule
/// order, and nothing at all for texts under [`MIN_WORDS`] words.
#[tracing::instrument(skip_all, fields(text_len = raw.len()))]
pub fn check_style(raw: &str) -> Vec<StyleIssue> {
    let content = markup::strip_tags(raw);
    if text::count_words(&content) < MIN_WORDS {
        return Vec::new();
    }

    let mut issues = long_sentences(&content);
    issues.extend(irregular_spacing(&content));
    issues.extend(passive_voice(&content));

    if issues.len() > MAX_ISSUES {
        tracing::debug!(found = issues.len(), kept = MAX_ISSUES, "truncating style issues");
        issues.truncate(MAX_ISSUES);
    }
    issues
}

fn long_sentences(content: &str) -> Vec<StyleIssue> {
    content
        .split('.')
        .enumerate()
        .filter(|(_, sentence)| text::count_words(sentence) > LONG_SENTENCE_WORDS)
        .map(|(idx, sentence)| StyleIssue {
            id: idx.to_string(),
            text: excerpt(sentence),
            suggestion: "Consider breaking this sentence into shorter ones".to_string(),
            category: IssueCategory::Style,
            severity: Severity::Warning,
        })
        .collect()
}

/// Trimmed sentence, cut to 50 characters plus `...` when the untrimmed
/// sentence is longer than 50 characters.
fn excerpt(sentence: &str) -> String {
    let trimmed = sentence.trim();
    if sentence.chars().count() > EXCERPT_CHARS {
        let head: String = trimmed.chars().take(EXCERPT_CHARS).collect();
        format!("{head}...")
    } else {
        trimmed.to_string()
    }
}

fn irregular_spacing(content: &str) -> Option<StyleIssue> {
    SPACING_RUN.is_match(content).then(|| StyleIssue {
        id: "spacing".to_string(),
        text: "Multiple spaces detected".to_string(),
        suggestion: "Remove extra spaces between words".to_string(),
        category: IssueCategory::Formatting,
        severity: Severity::Info,
    })
}

fn passive_voice(content: &str) -> Option<StyleIssue> {
    let count = PASSIVE_WAS_ED.find_iter(content).count();
    (count > PASSIVE_THRESHOLD).then(|| StyleIssue {
        id: "passive".to_string(),
        text: format!("Passive voice detected {count} times"),
        suggestion: "Consider using active voice for more engaging writing".to_string(),
        category: IssueCategory::Style,
        severity: Severity::Warning,
    })
}
