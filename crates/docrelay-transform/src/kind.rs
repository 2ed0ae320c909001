//! Record type resolution.
//!
//! Precedence: the curated per-record exception table wins outright, then
//! the generic `type[/subtype]` composite key is resolved through the
//! static type map. The resolved `target[/subtarget]` value splits into the
//! archive's `upload_type` plus a conditional subtype field.

use docrelay_model::SourceRecord;
use docrelay_tables::CurationTables;

use crate::error::{Result, TransformError};

/// Resolved archive typing for a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedKind {
    pub upload_type: String,
    /// Present when `upload_type == "publication"`.
    pub publication_type: Option<String>,
    /// Present when `upload_type == "image"`; defaults to `"other"` when no
    /// subtype was resolved.
    pub image_type: Option<String>,
}

/// Resolve a record's archive type, exception table first.
pub fn resolve(record: &SourceRecord, tables: &CurationTables) -> Result<ResolvedKind> {
    let resolved = match tables.type_exceptions.get(&record.legacy_id) {
        Some(exception) => exception.clone(),
        None => {
            let key = composite_key(record);
            tables
                .type_map
                .get(&key)
                .cloned()
                .ok_or(TransformError::UnknownType {
                    legacy_id: record.legacy_id,
                    key,
                })?
        }
    };

    let (upload_type, subtype) = match resolved.split_once('/') {
        Some((upload, sub)) => (upload.to_string(), Some(sub.to_string())),
        None => (resolved, None),
    };

    let publication_type = if upload_type == "publication" {
        subtype.clone()
    } else {
        None
    };
    let image_type = if upload_type == "image" {
        Some(subtype.unwrap_or_else(|| "other".to_string()))
    } else {
        None
    };

    Ok(ResolvedKind {
        upload_type,
        publication_type,
        image_type,
    })
}

/// Composite resolution key: the generic `type`, extended with the
/// type-specific sub-field when one applies.
fn composite_key(record: &SourceRecord) -> String {
    match record.kind.as_str() {
        "monograph" => match &record.monograph_type {
            Some(sub) => format!("monograph/{sub}"),
            None => "monograph".to_string(),
        },
        "conference_item" | "exhibition" => match &record.pres_type {
            Some(sub) => format!("{}/{sub}", record.kind),
            None => record.kind.clone(),
        },
        other => other.to_string(),
    }
}
