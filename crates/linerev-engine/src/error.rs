use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from either phase of a reversal.
///
/// Every variant is fatal for the file being processed: no retries, and a
/// partially written destination is invalid.
#[derive(Debug, Error)]
pub enum ReverseError {
    #[error("failed to read source file {path} at offset {offset}: {source}")]
    SourceRead {
        path: PathBuf,
        offset: u64,
        source: io::Error,
    },

    #[error("failed to create or write destination file {path}: {source}")]
    DestinationWrite { path: PathBuf, source: io::Error },

    #[error("source file {path} truncated: expected {expected} bytes at offset {offset}")]
    TruncatedRead {
        path: PathBuf,
        offset: u64,
        expected: u64,
    },

    #[error("destination file already exists: {0}")]
    DestinationExists(PathBuf),

    #[error("read chunk size must be at least 1 byte")]
    InvalidChunkSize,
}
