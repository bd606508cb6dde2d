//! Hyphae Runtime Prelude: convenient imports for common usage.
//!
//! ```rust
//! use hyphae_runtime::prelude::*;
//! ```

// Re-export colony
pub use crate::colony::{
    AgentSnapshot, Colony, ColonyEvent, ColonySnapshot, ColonyStats, DocumentSnapshot,
    EdgeSnapshot, NodeSnapshot,
};

pub use crate::agent::Cell;
pub use crate::config::ColonyConfig;
pub use crate::digestion::DigestionEvent;
pub use crate::document_store::Document;
pub use crate::topology_impl::PetKnowledgeGraph;

// Re-export from core and rag
pub use hyphae_core::prelude::*;
pub use hyphae_rag::prelude::*;
