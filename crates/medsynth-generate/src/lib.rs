//! Synthetic hospital dataset generation for medsynth.
//!
//! The pipeline runs leaf-first: lookup tables, primary entities, then the
//! association tables that reference them, followed by a validation pass.
//! Every random draw comes from one seeded stream owned by the
//! [`GenerationContext`], so a seed fully determines the dataset.

pub mod catalog;
pub mod context;
pub mod engine;
pub mod errors;
pub mod faker_rs;
pub mod generators;
pub mod model;
pub mod output;
pub mod sampling;
pub mod ssn;

pub use context::{GenerationContext, GenerationStats, IdSequence};
pub use engine::{GenerationEngine, GenerationResult};
pub use errors::GenerationError;
pub use model::{GenerationConfig, GenerationReport, TableReport};
pub use output::{
    DEFAULT_ARCHIVE_NAME, DirectorySink, ExportSummary, ExportedTable, TableSink, TarGzSink,
    export_dataset,
};
pub use ssn::{FixedSsnPool, SsnPool, UsSsnPool};
