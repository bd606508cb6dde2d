//! Error types for hyphae operations.
//!
//! Only caller mistakes are errors. Sparse data (empty text, an empty
//! graph, a colony with no agents, a query with no matches) produces
//! empty or neutral results instead.

use thiserror::Error;

/// Result type for hyphae operations.
pub type Result<T> = std::result::Result<T, HyphaeError>;

/// Errors surfaced at the engine boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HyphaeError {
    /// The call was rejected before any state was touched.
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ArgumentError),
    /// A lookup referenced something that was never created.
    #[error("Not found: {0}")]
    NotFound(String),
    /// A snapshot could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for HyphaeError {
    fn from(e: serde_json::Error) -> Self {
        HyphaeError::Serialization(e.to_string())
    }
}

/// The specific contract violation behind an `InvalidArgument`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArgumentError {
    #[error("tick count must be non-negative, got {0}")]
    NegativeTicks(i64),
    #[error("max_results must be positive")]
    ZeroMaxResults,
    #[error("alpha must be within [0, 1], got {0}")]
    AlphaOutOfRange(f64),
    #[error("position must have finite coordinates, got ({x}, {y})")]
    NonFinitePosition { x: f64, y: f64 },
    #[error("radius must be non-negative, got {0}")]
    InvalidRadius(f64),
    #[error("invalid value for {field}: {reason}")]
    Config { field: String, reason: String },
}

// Convenience constructors
impl HyphaeError {
    pub fn document_not_found(id: impl std::fmt::Display) -> Self {
        HyphaeError::NotFound(format!("document {}", id))
    }

    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        HyphaeError::InvalidArgument(ArgumentError::Config {
            field: field.into(),
            reason: reason.into(),
        })
    }

    /// Validate a blend factor.
    pub fn check_alpha(alpha: f64) -> Result<()> {
        if (0.0..=1.0).contains(&alpha) {
            Ok(())
        } else {
            Err(ArgumentError::AlphaOutOfRange(alpha).into())
        }
    }

    /// Whether this is an `InvalidArgument` error.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, HyphaeError::InvalidArgument(_))
    }

    /// Whether this is a `NotFound` error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, HyphaeError::NotFound(_))
    }
}
