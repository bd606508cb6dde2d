//! Hybrid scoring: learned TF-IDF blended with graph connectivity.
//!
//! Strategy:
//! 1. Tokenize the query exactly like ingestion does
//! 2. Seed nodes are the nodes labelled with a query term
//! 3. Candidates are the seeds plus their 1-hop neighbours
//! 4. Each candidate gets:
//!    - `tfidf_score`: sum over shared terms of `tf * idf`, where the
//!      node's label is its pseudo-document and idf comes from the
//!      lexical index (documents the colony has actually digested)
//!    - `graph_score`: total edge weight to the seeds, divided by the
//!      largest such total among this query's candidates
//! 5. `score = alpha * graph_score + (1 - alpha) * tfidf_score`
//! 6. Sort by score, then tfidf, then label; cap at `max_results`

use hyphae_core::error::{ArgumentError, HyphaeError, Result};
use hyphae_core::lexical::LexicalIndex;
use hyphae_core::tokenize::tokenize;
use hyphae_core::topology::KnowledgeTopology;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Configuration for a hybrid query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HybridConfig {
    /// Weight of the graph component (0.0 to 1.0). Lexical weight = 1.0 - alpha.
    pub alpha: f64,
    /// Maximum results to return. Must be positive.
    pub max_results: usize,
}

impl Default for HybridConfig {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            max_results: 10,
        }
    }
}

impl HybridConfig {
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_max_results(mut self, n: usize) -> Self {
        self.max_results = n;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_results == 0 {
            return Err(ArgumentError::ZeroMaxResults.into());
        }
        HyphaeError::check_alpha(self.alpha)
    }
}

/// A ranked concept with its component scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub label: String,
    pub score: f64,
    pub tfidf_score: f64,
    pub graph_score: f64,
}

/// Rank graph nodes against `query_text`.
///
/// An empty graph, an empty query or a query with no matching labels
/// yields an empty list. Only an invalid `config` is an error.
pub fn hybrid_query<G>(
    graph: &G,
    index: &LexicalIndex,
    query_text: &str,
    config: &HybridConfig,
) -> Result<Vec<QueryResult>>
where
    G: KnowledgeTopology + ?Sized,
{
    config.validate()?;

    let query_terms: BTreeSet<String> = tokenize(query_text).into_iter().collect();
    let seeds: Vec<&str> = query_terms
        .iter()
        .map(String::as_str)
        .filter(|t| graph.contains(t))
        .collect();
    if seeds.is_empty() {
        return Ok(Vec::new());
    }

    let mut candidates: BTreeSet<&str> = seeds.iter().copied().collect();
    for seed in &seeds {
        for (neighbor, _) in graph.neighbors(seed) {
            candidates.insert(neighbor);
        }
    }

    // (label, tfidf, raw connectivity)
    let mut scored: Vec<(&str, f64, f64)> = candidates
        .into_iter()
        .map(|label| {
            let tfidf = tfidf_score(graph, index, label, &query_terms);
            let connectivity: f64 = seeds
                .iter()
                .filter(|s| **s != label)
                .map(|s| graph.edge_weight(label, s))
                .sum();
            (label, tfidf, connectivity)
        })
        .collect();

    let max_connectivity = scored.iter().map(|s| s.2).fold(0.0_f64, f64::max);

    let mut results: Vec<QueryResult> = scored
        .drain(..)
        .map(|(label, tfidf_score, connectivity)| {
            let graph_score = if max_connectivity > 0.0 {
                connectivity / max_connectivity
            } else {
                0.0
            };
            QueryResult {
                label: label.to_string(),
                score: config.alpha * graph_score + (1.0 - config.alpha) * tfidf_score,
                tfidf_score,
                graph_score,
            }
        })
        .collect();

    results.sort_by(rank_order);
    results.truncate(config.max_results);
    Ok(results)
}

/// Descending score, then descending tfidf, then ascending label.
fn rank_order(a: &QueryResult, b: &QueryResult) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.tfidf_score.total_cmp(&a.tfidf_score))
        .then_with(|| a.label.cmp(&b.label))
}

/// TF-IDF of a node treated as a pseudo-document made of its label's
/// terms, each carrying the node's accumulated weight.
fn tfidf_score<G>(graph: &G, index: &LexicalIndex, label: &str, query_terms: &BTreeSet<String>) -> f64
where
    G: KnowledgeTopology + ?Sized,
{
    let Some(node) = graph.node(label) else {
        return 0.0;
    };
    let label_terms = tokenize(label);
    let total_weight = node.weight * label_terms.len() as f64;
    if total_weight <= 0.0 {
        return 0.0;
    }

    query_terms
        .iter()
        .map(|term| {
            let occurrences = label_terms.iter().filter(|t| *t == term).count() as f64;
            if occurrences == 0.0 {
                return 0.0;
            }
            let tf = occurrences * node.weight / total_weight;
            tf * index.idf(term)
        })
        .sum()
}
