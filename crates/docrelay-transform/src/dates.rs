//! Publication date normalization.
//!
//! The legacy `date` field loses precision freely: a bare year, a
//! `YYYY-MM` string, or a full date. Partial values are padded to the first
//! day/month; anything else passes through unchanged. Records with no date
//! at all fall back to the ISO date prefix of the repository ingest
//! timestamp.

use docrelay_model::{DateValue, SourceRecord};

use crate::error::{Result, TransformError};

/// Normalize a legacy date value to a full `YYYY-MM-DD` when possible.
pub fn normalize_date(value: &DateValue) -> String {
    match value {
        DateValue::Year(year) => format!("{year}-01-01"),
        DateValue::Text(text) if text.len() == 7 => format!("{text}-01"),
        DateValue::Text(text) => text.clone(),
    }
}

/// The record's publication date, with the `datestamp` fallback.
pub fn publication_date(record: &SourceRecord) -> Result<String> {
    if let Some(date) = &record.date {
        return Ok(normalize_date(date));
    }
    let datestamp = record
        .datestamp
        .as_ref()
        .ok_or(TransformError::MissingField {
            legacy_id: record.legacy_id,
            field: "datestamp",
        })?;
    Ok(datestamp.chars().take(10).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_pads_month_and_day() {
        assert_eq!(normalize_date(&DateValue::Year(1999)), "1999-01-01");
    }

    #[test]
    fn year_month_pads_day() {
        assert_eq!(
            normalize_date(&DateValue::Text("1999-06".to_string())),
            "1999-06-01"
        );
    }

    #[test]
    fn full_date_passes_through() {
        assert_eq!(
            normalize_date(&DateValue::Text("1999-06-15".to_string())),
            "1999-06-15"
        );
    }
}
