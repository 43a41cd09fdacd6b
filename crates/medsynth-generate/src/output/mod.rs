//! Export of a validated dataset to CSV files inside an archive or directory.

pub mod archive;
pub mod atomic;
pub mod csv;

use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use medsynth_core::{Dataset, TableName};

use crate::errors::GenerationError;

pub use archive::{DEFAULT_ARCHIVE_NAME, DirectorySink, TarGzSink};

/// Destination for encoded tables.
pub trait TableSink {
    fn add_table(&mut self, file_name: &str, data: &[u8]) -> Result<(), GenerationError>;

    /// Flush everything and return the artifact path.
    fn finish(self) -> Result<PathBuf, GenerationError>
    where
        Self: Sized;
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportedTable {
    pub table: TableName,
    pub file_name: String,
    pub rows: u64,
    pub bytes: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub artifact: PathBuf,
    pub tables: Vec<ExportedTable>,
    /// Uncompressed CSV bytes across all tables.
    pub bytes_written: u64,
}

/// Encode every table in export order and hand it to `sink`.
pub fn export_dataset<S: TableSink>(
    dataset: &Dataset,
    mut sink: S,
) -> Result<ExportSummary, GenerationError> {
    let mut tables = Vec::with_capacity(TableName::ALL.len());
    let mut bytes_written = 0_u64;

    for table in TableName::ALL {
        let data = csv::encode_dataset_table(dataset, table)?;
        let file_name = table.file_name();
        sink.add_table(&file_name, &data)?;

        let bytes = data.len() as u64;
        bytes_written += bytes;
        tables.push(ExportedTable {
            table,
            file_name,
            rows: dataset.row_count(table) as u64,
            bytes,
        });
    }

    let artifact = sink.finish()?;
    info!(
        artifact = %artifact.display(),
        tables = tables.len(),
        bytes_written,
        "dataset exported"
    );

    Ok(ExportSummary {
        artifact,
        tables,
        bytes_written,
    })
}
