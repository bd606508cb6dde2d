//! Tokenizer shared by document ingestion and querying.
//!
//! Text is lowercased and split on anything that is not alphanumeric.
//! Tokens shorter than three characters and common English stopwords
//! are dropped. Both sides of the engine must use this function so that
//! query terms line up with graph labels.

use std::collections::BTreeMap;

/// Minimum token length kept by the tokenizer.
pub const MIN_TERM_LEN: usize = 3;

const STOPWORDS: &[&str] = &[
    "about", "above", "after", "again", "all", "and", "are", "because", "been", "before",
    "being", "below", "between", "both", "but", "can", "could", "did", "does", "during",
    "each", "every", "few", "for", "from", "further", "had", "has", "have", "her", "here",
    "his", "how", "into", "its", "may", "might", "more", "most", "must", "nor", "not", "off",
    "once", "only", "other", "our", "out", "over", "own", "same", "shall", "she", "should",
    "some", "such", "than", "that", "the", "their", "them", "then", "there", "these", "they",
    "this", "those", "through", "too", "under", "very", "was", "were", "what", "when",
    "where", "which", "while", "who", "whom", "why", "will", "with", "would", "you", "your",
];

fn is_stopword(word: &str) -> bool {
    STOPWORDS.binary_search(&word).is_ok()
}

/// Split text into lowercase alphanumeric terms, in order of appearance.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .filter(|w| w.chars().count() >= MIN_TERM_LEN && !is_stopword(w))
        .collect()
}

/// Count how often each term occurs in `text`.
pub fn term_frequencies(text: &str) -> BTreeMap<String, u32> {
    let mut freq = BTreeMap::new();
    for term in tokenize(text) {
        *freq.entry(term).or_insert(0) += 1;
    }
    freq
}
