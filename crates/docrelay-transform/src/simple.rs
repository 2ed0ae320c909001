//! Directly-mapped fields: title, description, imprint, conference,
//! journal, publisher, publication title, subjects, references.

use docrelay_model::{DepositMetadata, SourceRecord, Subject};
use docrelay_tables::CurationTables;

use crate::error::{Result, TransformError};

/// Default language tag; the legacy catalog is English-only.
const LANGUAGE: &str = "eng";

/// Fill the directly-mapped fields of the deposit metadata.
pub fn apply(
    record: &SourceRecord,
    tables: &CurationTables,
    metadata: &mut DepositMetadata,
) -> Result<()> {
    let title = record.title.as_ref().ok_or(TransformError::MissingField {
        legacy_id: record.legacy_id,
        field: "title",
    })?;
    let mut title = title.replace("\r\n", " ");
    // An article's number belongs in the displayed title.
    if record.kind == "article" {
        if let Some(number) = &record.number {
            title.push(' ');
            title.push_str(number);
        }
    }
    metadata.title = title;

    metadata.description = Some(
        record
            .abstract_text
            .clone()
            .unwrap_or_else(|| metadata.title.clone()),
    );
    metadata.language = LANGUAGE.to_string();

    metadata.imprint_isbn = record.isbn.clone();
    metadata.imprint_place = record.place_of_pub.clone();
    metadata.imprint_publisher = publisher(record, tables);

    metadata.conference_dates = record.event_dates.clone();
    metadata.conference_place = record.event_location.clone();
    metadata.conference_title = record.event_title.clone();

    metadata.partof_title = record.book_title.clone();
    // A page count beats a page range when both exist.
    metadata.partof_pages = record
        .pages
        .map(|pages| pages.to_string())
        .or_else(|| record.pagerange.clone());

    metadata.journal_issue = record.number.clone();
    metadata.journal_volume = record.volume.clone();
    metadata.journal_title = publication_title(record);

    metadata.subjects = subjects(record, tables);
    metadata.references = references(record);

    Ok(())
}

/// Publisher, filtered for missing-value markers and expanded through the
/// acronym table.
fn publisher(record: &SourceRecord, tables: &CurationTables) -> Option<String> {
    let publisher = record.publisher.as_deref()?;
    if matches!(publisher, "N/A" | "Unknown" | "unknown") {
        return None;
    }
    Some(
        tables
            .publisher_acronyms
            .get(publisher)
            .cloned()
            .unwrap_or_else(|| publisher.to_string()),
    )
}

/// Publication title with a type-dependent qualifier.
fn publication_title(record: &SourceRecord) -> Option<String> {
    let publication = record.publication.as_deref()?;
    let qualifier = match record.kind.as_str() {
        "book" => " book",
        "article" => "",
        _ => match record.monograph_type.as_deref() {
            Some("documentation") => " documentation",
            Some("technical_report") => " technical report",
            _ => "",
        },
    };
    Some(format!("{publication}{qualifier}"))
}

/// Subject codes resolved through the authority vocabulary.
fn subjects(record: &SourceRecord, tables: &CurationTables) -> Vec<Subject> {
    record
        .subjects
        .iter()
        .filter_map(|code| tables.subject_vocabulary.get(code))
        .map(|term| Subject {
            term: term.term.clone(),
            identifier: tables.subject_identifier(term),
            scheme: "url".to_string(),
        })
        .collect()
}

/// The free-text reference block, split into entries on CRLF.
fn references(record: &SourceRecord) -> Vec<String> {
    match &record.referencetext {
        Some(text) => text.split("\r\n").map(str::to_string).collect(),
        None => Vec::new(),
    }
}
