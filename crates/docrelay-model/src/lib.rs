pub mod audit;
pub mod metadata;
pub mod record;

pub use audit::AuditLogEntry;
pub use metadata::{
    Contributor, ContributorRole, Creator, DepositMetadata, DepositPayload, RelatedIdentifier,
    Relation, Subject,
};
pub use record::{DateValue, Document, FileEntry, NamedPerson, PersonName, SourceRecord};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audit_entry_line_has_six_columns() {
        let entry = AuditLogEntry {
            legacy_id: 42,
            timestamp: "\"01/02/2026 10:30:00\"".to_string(),
            create_status: "201".to_string(),
            metadata_status: "400".to_string(),
            file_status: String::new(),
            failing_filename: String::new(),
        };
        let line = entry.csv_line();
        assert_eq!(line.split(',').count(), 6);
        assert!(line.starts_with("42,"));
    }

    #[test]
    fn payload_wraps_metadata_under_single_key() {
        let payload = DepositPayload {
            metadata: DepositMetadata {
                upload_type: "publication".to_string(),
                title: "Study".to_string(),
                publication_date: "1999-01-01".to_string(),
                language: "eng".to_string(),
                ..DepositMetadata::default()
            },
        };
        let json = serde_json::to_value(&payload).expect("serialize payload");
        assert!(json.get("metadata").is_some());
        assert_eq!(json["metadata"]["upload_type"], "publication");
    }
}
