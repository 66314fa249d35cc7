//! Error types for the unresume library.

use std::io;
use thiserror::Error;

/// Result type alias for unresume operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur around the extraction boundary.
///
/// The pipeline itself never fails a document over a single bad fragment;
/// those conditions surface as `parsing_warnings` on the returned
/// [`ParsedDocument`](crate::ParsedDocument) instead. This enum covers the
/// external-capability boundary and serialization.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when staging bytes for the partitioner.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The external partitioning capability failed.
    #[error("document partitioning failed: {0}")]
    Partition(String),

    /// The partitioner has no secondary plain-text capability.
    #[error("plain-text extraction is not available for this partitioner")]
    PlainTextUnavailable,

    /// Byte content could not be decoded as text.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Error serializing a parsed document.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
