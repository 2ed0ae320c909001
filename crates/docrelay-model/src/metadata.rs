//! Normalized deposit metadata for the target research archive.
//!
//! Absent optional data means the key is omitted from the serialized
//! document, never an empty string or list. The one exception is
//! `keywords`, which the archive accepts (and the transformer emits) as an
//! explicitly empty list when a record carries curated subject tags but no
//! raw keyword string.

use serde::{Deserialize, Serialize};

/// Wire shape expected by the deposit endpoint: the metadata document
/// wrapped under a single `metadata` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepositPayload {
    pub metadata: DepositMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DepositMetadata {
    pub upload_type: String,
    /// Set when `upload_type == "publication"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_type: Option<String>,
    /// Set when `upload_type == "image"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_type: Option<String>,
    pub title: String,
    pub publication_date: String,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub creators: Vec<Creator>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contributors: Vec<Contributor>,
    /// Always serialized; may be empty.
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_identifiers: Vec<RelatedIdentifier>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subjects: Vec<Subject>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub journal_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub journal_issue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub journal_volume: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imprint_publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imprint_isbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imprint_place: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partof_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partof_pages: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conference_dates: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conference_place: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conference_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub name: String,
    #[serde(rename = "type")]
    pub role: ContributorRole,
}

/// Contributor role vocabulary accepted by the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContributorRole {
    Other,
    Editor,
    RightsHolder,
    HostingInstitution,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedIdentifier {
    pub identifier: String,
    pub relation: Relation,
}

/// Relation vocabulary for related identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Relation {
    IsAlternateIdentifier,
    IsSupplementedBy,
    IsNewVersionOf,
}

/// A controlled-vocabulary subject with its authority identifier URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub term: String,
    pub identifier: String,
    pub scheme: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> DepositMetadata {
        DepositMetadata {
            upload_type: "publication".to_string(),
            publication_type: Some("article".to_string()),
            title: "Study".to_string(),
            publication_date: "1999-01-01".to_string(),
            language: "eng".to_string(),
            ..DepositMetadata::default()
        }
    }

    #[test]
    fn absent_optionals_are_omitted() {
        let json = serde_json::to_value(minimal()).expect("serialize");
        assert!(json.get("notes").is_none());
        assert!(json.get("creators").is_none());
        assert!(json.get("related_identifiers").is_none());
        assert!(json.get("journal_title").is_none());
    }

    #[test]
    fn empty_keywords_list_is_kept() {
        let json = serde_json::to_value(minimal()).expect("serialize");
        assert_eq!(json["keywords"], serde_json::json!([]));
    }

    #[test]
    fn vocabulary_serializes_to_archive_spelling() {
        let contributor = Contributor {
            name: "Unknown".to_string(),
            role: ContributorRole::HostingInstitution,
        };
        let json = serde_json::to_value(&contributor).expect("serialize");
        assert_eq!(json["type"], "HostingInstitution");

        let ident = RelatedIdentifier {
            identifier: "10.5281/zenodo.1".to_string(),
            relation: Relation::IsNewVersionOf,
        };
        let json = serde_json::to_value(&ident).expect("serialize");
        assert_eq!(json["relation"], "isNewVersionOf");
    }
}
