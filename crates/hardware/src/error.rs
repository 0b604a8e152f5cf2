//! Error types for the hardware bridge

use thiserror::Error;

/// Errors raised by register backends and the bridge
///
/// A command that does not finish inside its poll budget is not an error;
/// see [`crate::PollOutcome`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The backend rejected or failed a bus transaction
    #[error("Backend error during {operation}: {details}")]
    Backend {
        /// Bus operation that failed
        operation: &'static str,
        /// Backend-provided details
        details: String,
    },

    /// The backend does not implement an optional capability
    #[error("Operation not supported by this backend: {0}")]
    Unsupported(&'static str),

    /// A memory slot index outside the three polynomial slots
    #[error("Invalid memory slot {0}")]
    InvalidSlot(usize),
}

impl Error {
    /// Shorthand for a backend failure
    pub fn backend(operation: &'static str, details: impl Into<String>) -> Self {
        Error::Backend {
            operation,
            details: details.into(),
        }
    }
}

/// Result type for hardware operations
pub type Result<T> = std::result::Result<T, Error>;
