//! Error types for the transfer pipeline's remote side.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the source/archive clients and the upload orchestrator.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ArchiveError {
    /// The requested id does not exist in the source catalog; rejected
    /// before any remote call.
    #[error("record id {0} is not in the source catalog")]
    InvalidRecordId(u64),

    /// Draft creation answered with a non-success status. Nothing was
    /// created, so no compensating action is needed.
    #[error("draft creation failed with status {status}")]
    CreateFailed { status: u16 },

    /// The archive rejected the metadata document.
    #[error("metadata rejected with status {status}")]
    MetadataRejected { status: u16 },

    /// A file upload answered with a non-success status.
    #[error("file upload failed with status {status} on {filename:?}")]
    FileUploadFailed { status: u16, filename: String },

    /// The publish action answered with a non-success status.
    #[error("publish failed with status {status}")]
    PublishFailed { status: u16 },

    /// A successful archive response was missing an expected field.
    #[error("deposit response missing field {0:?}")]
    MissingDepositField(&'static str),

    /// Draining drafts listed deposits but deleted none of them.
    #[error("draft reset made no progress; {remaining} drafts still listed")]
    ResetStalled { remaining: usize },

    #[error("network error: {0}")]
    Network(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("JSON parse error: {0}")]
    JsonParse(String),

    #[error("lookup table error: {0}")]
    Table(String),

    #[error("failed to load config {path}: {message}")]
    Config { path: PathBuf, message: String },
}

impl From<reqwest::Error> for ArchiveError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<std::io::Error> for ArchiveError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ArchiveError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonParse(err.to_string())
    }
}

impl From<docrelay_tables::TableError> for ArchiveError {
    fn from(err: docrelay_tables::TableError) -> Self {
        Self::Table(err.to_string())
    }
}

/// Result type alias for transfer operations.
pub type Result<T> = std::result::Result<T, ArchiveError>;
