use thiserror::Error;

/// Errors emitted by the generation pipeline.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// A rejection-sampling loop ran out of fresh candidates.
    #[error("{what} space exhausted after {attempts} attempts ({taken} values already taken)")]
    Exhausted {
        what: &'static str,
        attempts: u32,
        taken: usize,
        capacity: Option<u64>,
    },
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error(transparent)]
    Core(#[from] medsynth_core::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
