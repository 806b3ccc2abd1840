//! Similarity scoring between two texts.
//!
//! Three independent lenses on the same tokens:
//!
//! - **Jaccard**: shared unique words over all unique words.
//! - **Cosine**: angle between the two term-frequency vectors.
//! - **Vocabulary overlap**: shared unique words over the smaller vocabulary.
//!
//! Vocabulary overlap reaches 100% when one text's vocabulary is contained in
//! the other's, which makes it the better signal for a short passage lifted
//! from a longer source.

use std::collections::{HashMap, HashSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};
use crate::text;

/// Similarity of two texts under three metrics, each in `0.0..=100.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityScore {
    /// Jaccard index of the unique word sets, as a percentage.
    pub jaccard_percent: f64,
    /// Cosine similarity of the term-frequency vectors, as a percentage.
    pub cosine_percent: f64,
    /// Shared words relative to the smaller vocabulary, as a percentage.
    pub vocab_overlap_percent: f64,
}

impl SimilarityScore {
    const ZERO: Self = Self {
        jaccard_percent: 0.0,
        cosine_percent: 0.0,
        vocab_overlap_percent: 0.0,
    };
}

/// Compare two texts.
///
/// Both texts are tokenized with [`text::extract_words`]. Returns
/// [`AnalysisError::EmptyInput`] if either text is blank. A text that is
/// not blank but has no words (punctuation only) scores 0 on every metric.
#[tracing::instrument(skip_all, fields(a_len = a.len(), b_len = b.len()))]
pub fn compare(a: &str, b: &str) -> AnalysisResult<SimilarityScore> {
    if a.trim().is_empty() || b.trim().is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let words_a = text::extract_words(a);
    let words_b = text::extract_words(b);
    let freq_a = term_frequencies(&words_a);
    let freq_b = term_frequencies(&words_b);
    if freq_a.is_empty() || freq_b.is_empty() {
        tracing::debug!("no words after tokenization");
        return Ok(SimilarityScore::ZERO);
    }

    let vocab_a: HashSet<&str> = freq_a.keys().copied().collect();
    let vocab_b: HashSet<&str> = freq_b.keys().copied().collect();
    let shared = vocab_a.intersection(&vocab_b).count() as f64;
    let union = vocab_a.union(&vocab_b).count() as f64;
    let smaller = vocab_a.len().min(vocab_b.len()) as f64;

    let score = SimilarityScore {
        jaccard_percent: shared / union * 100.0,
        cosine_percent: cosine(&freq_a, &freq_b) * 100.0,
        vocab_overlap_percent: shared / smaller * 100.0,
    };
    tracing::debug!(
        jaccard = score.jaccard_percent,
        cosine = score.cosine_percent,
        overlap = score.vocab_overlap_percent,
        "texts compared"
    );
    Ok(score)
}

fn term_frequencies(words: &[String]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for w in words {
        *counts.entry(w.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Cosine similarity in `0.0..=1.0`. Both maps must be non-empty.
fn cosine(a: &HashMap<&str, usize>, b: &HashMap<&str, usize>) -> f64 {
    let dot: f64 = a
        .iter()
        .filter_map(|(word, &ca)| b.get(word).map(|&cb| (ca * cb) as f64))
        .sum();
    let norm = |m: &HashMap<&str, usize>| {
        m.values()
            .map(|&c| (c * c) as f64)
            .sum::<f64>()
            .sqrt()
    };
    (dot / (norm(a) * norm(b))).clamp(0.0, 1.0)
}
