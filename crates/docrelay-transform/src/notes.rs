//! Free-text notes composition.
//!
//! The notes block is an ordered sequence of conditional fragments, each
//! terminated by a blank line, closed by an unterminated provenance
//! sentence naming the depositor and the transfer date. The trailing
//! fragment separator is stripped when it is actually there.

use chrono::NaiveDate;
use docrelay_model::SourceRecord;

/// Labels naming the two repositories in the provenance sentence.
#[derive(Debug, Clone)]
pub struct Provenance {
    /// The legacy repository, e.g. a document archive's full name.
    pub source_label: String,
    /// The receiving community on the target archive.
    pub community_label: String,
}

/// Compose the notes block for a record.
pub fn compose(
    record: &SourceRecord,
    depositor: Option<&str>,
    provenance: &Provenance,
    transfer_date: NaiveDate,
) -> String {
    let mut notes = String::new();
    let mut fragment = |text: String| {
        notes.push_str(&text);
        notes.push_str("\n\n");
    };

    if let Some(uri) = &record.uri {
        fragment(format!("Previously curated at: {uri}."));
    }
    if let Some(email) = &record.contact_email {
        fragment(format!("Contact for resource: {email}."));
    }
    if let Some(event_type) = &record.event_type {
        fragment(format!("Event type: {event_type}."));
    }
    // ISBNs already surface as related identifiers.
    if let Some(id_number) = record
        .id_number
        .as_ref()
        .filter(|value| !value.starts_with("ISBN"))
    {
        fragment(format!("Related identifier for this resource: {id_number}."));
    }
    if let Some(pedagogic) = &record.pedagogic_type {
        fragment(format!("This work was part of a {pedagogic}."));
    }
    if let Some(date_type) = &record.date_type {
        fragment(format!(
            "The publish date on this item was its original {date_type} date."
        ));
    }
    if let Some(url) = &record.official_url {
        fragment(format!(
            "This item was previously associated with content (as an official url) at: {url}."
        ));
    }
    if let Some(media) = record
        .output_media
        .as_ref()
        .filter(|value| value.as_str() != "Internet")
    {
        fragment(format!("Originally provided via {media}."));
    }
    if let Some(series) = &record.series {
        fragment(format!("This item was part of the {series} series."));
    }
    if !record.funders.is_empty() {
        fragment(format!(
            "This work was funded by: {}",
            join_funders(&record.funders)
        ));
    }
    if let Some(refereed) = record.refereed {
        let negation = if refereed { "" } else { "not " };
        fragment(format!(
            "This item was {negation}refereed before the publication"
        ));
    }
    if !record.projects.is_empty() {
        fragment(format!(
            "Associated projects:\n{}",
            record.projects.join("\n")
        ));
    }

    let filenames: Vec<&str> = record.primary_filenames().collect();
    if filenames.is_empty() {
        fragment("Main files in this record:".to_string());
    } else {
        fragment(format!(
            "Main files in this record:\n{}",
            filenames.join("\n")
        ));
    }

    if let Some(name) = depositor.filter(|name| !name.is_empty()) {
        notes.push_str(&format!(
            "Item originally deposited with {} by {name}. Transferred to {} on {}",
            provenance.source_label,
            provenance.community_label,
            transfer_date.format("%d/%m/%Y")
        ));
    }

    match notes.strip_suffix("\n\n") {
        Some(trimmed) => trimmed.to_string(),
        None => notes,
    }
}

/// Join 1..N funder names: semicolons between entries, an Oxford-style
/// `" and, "` before the last, and a closing full stop.
fn join_funders(funders: &[String]) -> String {
    let mut out = String::new();
    for (index, funder) in funders.iter().enumerate() {
        if index + 1 == funders.len() {
            out.push_str(funder);
            out.push('.');
        } else if index + 2 == funders.len() {
            out.push_str(funder);
            out.push_str(" and, ");
        } else {
            out.push_str(funder);
            out.push_str("; ");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn funder_joining() {
        let one = vec!["NERC".to_string()];
        assert_eq!(join_funders(&one), "NERC.");

        let two = vec!["NERC".to_string(), "STFC".to_string()];
        assert_eq!(join_funders(&two), "NERC and, STFC.");

        let three = vec!["NERC".to_string(), "STFC".to_string(), "ESA".to_string()];
        assert_eq!(join_funders(&three), "NERC; STFC and, ESA.");
    }
}
