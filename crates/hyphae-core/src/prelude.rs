//! Convenience re-exports for hyphae-core.

pub use crate::error::{ArgumentError, HyphaeError, Result};
pub use crate::lexical::LexicalIndex;
pub use crate::tokenize::{term_frequencies, tokenize};
pub use crate::topology::KnowledgeTopology;
pub use crate::types::*;
