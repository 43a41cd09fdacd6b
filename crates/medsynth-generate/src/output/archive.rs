use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use flate2::Compression;
use flate2::write::GzEncoder;
use tar::{Builder, Header};

use super::TableSink;
use super::atomic::write_bytes_atomic;
use crate::errors::GenerationError;

pub const DEFAULT_ARCHIVE_NAME: &str = "medical_data.tar.gz";

/// Gzip-compressed tar archive assembled in memory.
///
/// Nothing touches the filesystem until [`TableSink::finish`], which writes
/// the archive atomically, so an aborted export leaves no partial artifact.
pub struct TarGzSink {
    path: PathBuf,
    builder: Builder<GzEncoder<Vec<u8>>>,
    mtime: u64,
}

impl TarGzSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let mtime = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or(0);
        Self {
            path: path.into(),
            builder: Builder::new(GzEncoder::new(Vec::new(), Compression::default())),
            mtime,
        }
    }

    /// Pin the modification time stamped on every entry.
    pub fn with_mtime(mut self, mtime: u64) -> Self {
        self.mtime = mtime;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TableSink for TarGzSink {
    fn add_table(&mut self, file_name: &str, data: &[u8]) -> Result<(), GenerationError> {
        let mut header = Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_mtime(self.mtime);
        header.set_cksum();
        self.builder.append_data(&mut header, file_name, data)?;
        Ok(())
    }

    fn finish(self) -> Result<PathBuf, GenerationError> {
        let bytes = self.builder.into_inner()?.finish()?;
        write_bytes_atomic(&self.path, &bytes)?;
        Ok(self.path)
    }
}

/// Plain CSV files in a directory, one per table.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl TableSink for DirectorySink {
    fn add_table(&mut self, file_name: &str, data: &[u8]) -> Result<(), GenerationError> {
        write_bytes_atomic(&self.dir.join(file_name), data)?;
        Ok(())
    }

    fn finish(self) -> Result<PathBuf, GenerationError> {
        std::fs::create_dir_all(&self.dir)?;
        Ok(self.dir)
    }
}
