use thiserror::Error;

/// Fatal transform failures; each aborts only the offending record.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("record {legacy_id}: no type resolution for key {key:?}")]
    UnknownType { legacy_id: u64, key: String },

    #[error("record {legacy_id}: required field {field:?} is missing")]
    MissingField { legacy_id: u64, field: &'static str },
}

/// Non-fatal conditions recorded during a transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformWarning {
    /// Identifier remediation found no live alternative for a stale URL;
    /// the related-identifier entry is dropped and processing continues.
    UnresolvableUrl { url: String },
}

pub type Result<T> = std::result::Result<T, TransformError>;
