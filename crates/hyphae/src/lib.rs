//! # Hyphae
//!
//! Self-growing knowledge graphs digested from documents by an agent colony.
//!
//! Documents are placed in a 2-D plane. A population of cells wanders that
//! plane, senses nearby documents, and digests them a bite at a time. Every
//! bite reinforces concept nodes and co-occurrence edges in a knowledge
//! graph and feeds the document-frequency statistics used for TF-IDF.
//! Queries blend the two signals into a single ranked list.
//!
//! ## Quick Start
//!
//! ```rust
//! use hyphae::prelude::*;
//!
//! let mut colony = Colony::new(ColonyConfig::default()).unwrap();
//! colony
//!     .ingest_document("Biology 101", "The cell membrane controls transport.", None)
//!     .unwrap();
//!
//! colony.run(50).unwrap();
//!
//! let results = colony.query("cell membrane", 5, None).unwrap();
//! assert!(results.iter().any(|r| r.label == "cell" && r.score > 0.0));
//!
//! for r in &results {
//!     println!("{} (score: {:.3})", r.label, r.score);
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`hyphae_core`] - Shared types, tokenizer, lexical index, graph trait
//! - [`hyphae_runtime`] - The colony: documents, cells, digestion, ticks
//! - [`hyphae_rag`] - Hybrid TF-IDF and graph-connectivity scoring
//!
//! ## The Tick
//!
//! | Phase | What happens |
//! |-------|--------------|
//! | Perceive | every cell reads the start-of-tick state and plans a move |
//! | Apply | moves and energy upkeep are committed |
//! | Digest | cells next to food take a bite, in ascending id order |
//! | Divide | cells above the energy threshold split, up to the cap |
//! | Die | cells with no energy left are removed |
//!
//! A colony is fully determined by its configuration (seed included) and
//! the sequence of calls made on it.

pub use hyphae_core as core;
pub use hyphae_rag as rag;
pub use hyphae_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust
/// use hyphae::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use hyphae_core::types::{
        AgentId, ConceptEdge, ConceptNode, DocumentId, Position, Tick,
    };
    pub use hyphae_core::topology::KnowledgeTopology;
    pub use hyphae_core::tokenize::tokenize;
    pub use hyphae_core::lexical::LexicalIndex;

    // Error types
    pub use hyphae_core::error::{ArgumentError, HyphaeError, Result};

    // Runtime
    pub use hyphae_runtime::colony::{Colony, ColonyEvent, ColonySnapshot, ColonyStats};
    pub use hyphae_runtime::config::ColonyConfig;
    pub use hyphae_runtime::document_store::Document;
    pub use hyphae_runtime::topology_impl::PetKnowledgeGraph;

    // RAG
    pub use hyphae_rag::{hybrid_query, HybridConfig, QueryResult};
}
