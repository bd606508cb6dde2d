//! # Hyphae Core
//!
//! Shared types for the hyphae colony engine:
//!
//! - **types**: identifiers, positions and knowledge-graph value types
//! - **tokenize**: the tokenizer shared by ingestion and querying
//! - **lexical**: document-frequency statistics for TF-IDF scoring
//! - **topology**: the read contract of the knowledge graph
//! - **error**: the error type returned across the engine boundary
//!
//! ## Quick Start
//!
//! ```rust
//! use hyphae_core::prelude::*;
//!
//! let pos = Position::new(0.0, 0.0);
//! assert!(pos.is_finite());
//!
//! let terms = tokenize("The cell membrane controls transport.");
//! assert_eq!(terms, vec!["cell", "membrane", "controls", "transport"]);
//! ```

pub mod error;
pub mod lexical;
pub mod prelude;
pub mod tokenize;
pub mod topology;
pub mod types;
