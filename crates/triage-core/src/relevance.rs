//! Natural-language relevance scoring.
//!
//! Ranks FAQ text against a caller query with a simple term-frequency score:
//! both sides are tokenized into lowercase alphanumeric words, short tokens
//! are ignored, and the score is the total number of occurrences of distinct
//! query terms in the document. The Postgres backend ranks with `ts_rank`
//! instead; the two scorers agree on what counts as a match, and scores are
//! only ever compared within one result set.

use std::collections::BTreeSet;

/// Tokens shorter than this never participate in matching, mirroring the
/// stop-short-words behavior of store-native full-text indexes.
pub const MIN_TOKEN_LEN: usize = 3;

/// Split text into lowercase alphanumeric tokens of at least
/// [`MIN_TOKEN_LEN`] characters.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() >= MIN_TOKEN_LEN)
        .map(str::to_lowercase)
        .collect()
}

/// Relevance of `document` to `query`.
///
/// Returns 0.0 when no query term occurs in the document. Higher is more
/// relevant; scores are not normalized.
#[must_use]
pub fn score(query: &str, document: &str) -> f64 {
    let terms: BTreeSet<String> = tokenize(query).into_iter().collect();
    if terms.is_empty() {
        return 0.0;
    }

    let mut hits = 0usize;
    for token in tokenize(document) {
        if terms.contains(&token) {
            hits += 1;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    {
        hits as f64
    }
}

/// Whether `document` matches `query` at all.
#[must_use]
pub fn matches(query: &str, document: &str) -> bool {
    score(query, document) > 0.0
}
