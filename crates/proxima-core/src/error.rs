//! Error types for Proxima.
//!
//! A single unified error type covers every operation in the crate. Each
//! variant carries a stable `PROX-XXX` code so host services can match on
//! errors without parsing messages.

use thiserror::Error;

/// Result type alias for Proxima operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in Proxima operations.
///
/// Every error surfaces synchronously to the caller of the failing operation.
/// A failed `add_vector` leaves the index unchanged; a failed `search`
/// returns no partial result.
#[derive(Error, Debug)]
pub enum Error {
    /// Index already exists (PROX-001).
    #[error("[PROX-001] Index '{0}' already exists")]
    IndexExists(String),

    /// Index not found (PROX-002).
    #[error("[PROX-002] Index '{0}' not found")]
    IndexNotFound(String),

    /// Dimension mismatch (PROX-003).
    #[error("[PROX-003] Vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
    },

    /// Invalid argument (PROX-004).
    #[error("[PROX-004] Invalid argument: {0}")]
    InvalidArgument(String),

    /// Degenerate vector (PROX-005).
    ///
    /// Raised for zero-norm vectors under the cosine metric, where the
    /// cosine of the angle is undefined.
    #[error("[PROX-005] Degenerate vector: {0}")]
    DegenerateVector(String),

    /// Configuration error (PROX-006).
    #[error("[PROX-006] Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns the error code (e.g., "PROX-001").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::IndexExists(_) => "PROX-001",
            Self::IndexNotFound(_) => "PROX-002",
            Self::DimensionMismatch { .. } => "PROX-003",
            Self::InvalidArgument(_) => "PROX-004",
            Self::DegenerateVector(_) => "PROX-005",
            Self::Config(_) => "PROX-006",
        }
    }
}

/// Conversion from configuration errors.
impl From<crate::config::ConfigError> for Error {
    fn from(err: crate::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
