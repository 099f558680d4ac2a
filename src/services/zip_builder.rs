//! src/services/zip_builder.rs
//!
//! ZipBuilder — incremental construction of a single in-memory zip archive.
//! Entries are written append-only in the order they are started; the central
//! directory is emitted by `finish`. The builder performs no store I/O: it
//! only accepts bytes and hands back the finished archive.

use std::collections::HashSet;
use std::io::{self, Cursor, Write};
use thiserror::Error;
use zip::result::ZipError;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("archive already contains an entry named `{0}`")]
    DuplicateEntry(String),
    #[error(transparent)]
    Zip(#[from] ZipError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type BuildResult<T> = Result<T, BuildError>;

/// One archive construction session. Dropping a builder discards everything
/// written so far; only `finish` materializes the archive.
pub struct ZipBuilder {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    names: HashSet<String>,
    entry_count: usize,
}

impl ZipBuilder {
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            names: HashSet::new(),
            entry_count: 0,
        }
    }

    /// Begin a new entry. Subsequent `write_chunk` calls append to it until
    /// the next `start_entry` or `finish`. Duplicate names are fatal: two
    /// entries under one name would silently shadow each other on extraction.
    pub fn start_entry(&mut self, name: &str) -> BuildResult<()> {
        if !self.names.insert(name.to_string()) {
            return Err(BuildError::DuplicateEntry(name.to_string()));
        }
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
        self.writer.start_file(name, options)?;
        self.entry_count += 1;
        Ok(())
    }

    pub fn write_chunk(&mut self, chunk: &[u8]) -> BuildResult<()> {
        self.writer.write_all(chunk)?;
        Ok(())
    }

    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    /// Write the central directory and return the complete archive bytes.
    /// A session with zero entries yields a valid empty archive.
    pub fn finish(mut self) -> BuildResult<Vec<u8>> {
        let cursor = self.writer.finish()?;
        Ok(cursor.into_inner())
    }
}

impl Default for ZipBuilder {
    fn default() -> Self {
        Self::new()
    }
}
