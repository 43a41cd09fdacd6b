use thiserror::Error;

use crate::validation::ValidationReport;

/// Core error type shared across medsynth crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A post-generation uniqueness or referential-integrity check failed.
    #[error("integrity violation: {0}")]
    IntegrityViolation(ValidationReport),
    /// Fixed lookup data or run options are inconsistent.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Convenience alias for results returned by medsynth crates.
pub type Result<T> = std::result::Result<T, Error>;
