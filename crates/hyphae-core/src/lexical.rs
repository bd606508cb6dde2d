//! Lexical index: document-frequency statistics for TF-IDF.
//!
//! Counts are driven by digestion, not ingestion: a document contributes
//! to a term's document frequency only once a digestion event has
//! consumed that term from it. IDF therefore ranks against what the
//! colony has learned rather than against its unprocessed backlog.

use crate::types::DocumentId;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Per-term document frequency plus the per-document record of which
/// terms have already been counted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LexicalIndex {
    document_frequency: BTreeMap<String, u32>,
    counted: BTreeMap<DocumentId, BTreeSet<String>>,
}

impl LexicalIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count `terms` as appearing in `document`.
    ///
    /// Terms already counted for this document are ignored, so repeated
    /// digestion events never inflate a term's frequency. Returns how
    /// many terms were newly counted.
    pub fn record<'a>(
        &mut self,
        document: DocumentId,
        terms: impl IntoIterator<Item = &'a str>,
    ) -> usize {
        let seen = self.counted.entry(document).or_default();
        let mut added = 0;
        for term in terms {
            if seen.insert(term.to_string()) {
                *self.document_frequency.entry(term.to_string()).or_insert(0) += 1;
                added += 1;
            }
        }
        added
    }

    /// Number of counted documents containing `term`.
    pub fn document_frequency(&self, term: &str) -> u32 {
        self.document_frequency.get(term).copied().unwrap_or(0)
    }

    /// Number of documents touched by at least one digestion event.
    pub fn document_count(&self) -> usize {
        self.counted.len()
    }

    /// Whether `term` has been counted for `document`.
    pub fn is_counted(&self, document: DocumentId, term: &str) -> bool {
        self.counted
            .get(&document)
            .map_or(false, |terms| terms.contains(term))
    }

    /// Smoothed inverse document frequency:
    /// `ln((1 + N) / (1 + df)) + 1`.
    ///
    /// `df <= N` always holds, so the result is at least 1.
    pub fn idf(&self, term: &str) -> f64 {
        let n = self.document_count() as f64;
        let df = self.document_frequency(term) as f64;
        ((1.0 + n) / (1.0 + df)).ln() + 1.0
    }

    /// Number of distinct counted terms.
    pub fn vocabulary_size(&self) -> usize {
        self.document_frequency.len()
    }
}
