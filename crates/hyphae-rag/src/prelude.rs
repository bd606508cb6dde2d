//! Convenience re-exports for hyphae-rag.

pub use crate::hybrid::{hybrid_query, HybridConfig, QueryResult};
