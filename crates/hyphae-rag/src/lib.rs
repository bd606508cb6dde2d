//! # Hyphae RAG
//!
//! Retrieval over the knowledge graph a colony has grown.
//!
//! A query is answered by blending two signals per concept node:
//!
//! | Signal | Source | Range |
//! |--------|--------|-------|
//! | `tfidf_score` | term overlap with the query, weighted by learned IDF | ≥ 0 |
//! | `graph_score` | edge weight linking the node to query-term nodes | [0, 1] |
//!
//! `score = alpha * graph_score + (1 - alpha) * tfidf_score`, so `alpha = 0`
//! ranks purely lexically and `alpha = 1` purely structurally.

pub mod hybrid;
pub mod prelude;

pub use hybrid::{hybrid_query, HybridConfig, QueryResult};
