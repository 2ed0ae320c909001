//! Legacy repository record as exported by its JSON interface.
//!
//! The export is sparse: most fields are simply absent when a record has no
//! value for them, and absence is meaningful (a missing `keywords` field is
//! not the same as an empty one). Every optional field is therefore an
//! `Option`/`Vec` so the transformer's rules can match on presence
//! explicitly instead of probing a loose map.

use serde::{Deserialize, Deserializer};

/// A bibliographic record fetched from the legacy document repository.
///
/// Identified uniquely by `legacy_id`; immutable once fetched.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceRecord {
    #[serde(rename = "eprintid")]
    pub legacy_id: u64,
    /// Generic record classification (`article`, `monograph`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Sub-classification for `monograph` records.
    pub monograph_type: Option<String>,
    /// Sub-classification for `conference_item`/`exhibition` records.
    pub pres_type: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub date: Option<DateValue>,
    /// Repository ingest timestamp, ISO date prefix; date fallback.
    pub datestamp: Option<String>,
    pub publisher: Option<String>,
    pub isbn: Option<String>,
    pub issn: Option<String>,
    /// Composite identifier field, e.g. `"ISBN 0-123..."` or a report number.
    pub id_number: Option<String>,
    pub official_url: Option<String>,
    pub event_dates: Option<String>,
    pub event_location: Option<String>,
    pub event_title: Option<String>,
    pub event_type: Option<String>,
    pub book_title: Option<String>,
    pub place_of_pub: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub number: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub volume: Option<String>,
    pub pagerange: Option<String>,
    pub pages: Option<u64>,
    /// Raw keyword string, comma/semicolon/CRLF separated.
    pub keywords: Option<String>,
    pub skill_areas: Option<String>,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub creators: Vec<NamedPerson>,
    #[serde(default)]
    pub editors: Vec<NamedPerson>,
    #[serde(default)]
    pub contributors: Vec<NamedPerson>,
    #[serde(default)]
    pub corp_creators: Vec<String>,
    #[serde(default)]
    pub copyright_holders: Vec<String>,
    pub institution: Option<String>,
    pub department: Option<String>,
    #[serde(default)]
    pub funders: Vec<String>,
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default, deserialize_with = "bool_or_flag")]
    pub refereed: Option<bool>,
    pub referencetext: Option<String>,
    /// Legacy id of the record this one supersedes.
    pub succeeds: Option<u64>,
    pub contact_email: Option<String>,
    pub pedagogic_type: Option<String>,
    pub date_type: Option<String>,
    pub output_media: Option<String>,
    pub series: Option<String>,
    /// Canonical repository URI of the record itself.
    pub uri: Option<String>,
    pub publication: Option<String>,
    #[serde(default)]
    pub documents: Vec<Document>,
}

impl SourceRecord {
    /// All attached files across every document, in source order.
    ///
    /// This order determines upload order and, on failure, which file is
    /// reported as the failing one.
    pub fn attached_files(&self) -> impl Iterator<Item = &FileEntry> {
        self.documents.iter().flat_map(|doc| doc.files.iter())
    }

    /// Primary filename of each attached document, in source order.
    pub fn primary_filenames(&self) -> impl Iterator<Item = &str> {
        self.documents.iter().map(|doc| doc.main.as_str())
    }
}

/// The legacy `date` field: either a bare year or a date string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DateValue {
    Year(i64),
    Text(String),
}

/// A structured personal name from the creators/editors/contributors lists.
#[derive(Debug, Clone, Deserialize)]
pub struct NamedPerson {
    pub name: PersonName,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonName {
    #[serde(default)]
    pub given: String,
    #[serde(default)]
    pub family: String,
}

/// An attached document: a primary filename plus its stored files.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    /// Primary (displayed) filename of the document.
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

/// A stored file within a document, addressable by its source URI.
#[derive(Debug, Clone, Deserialize)]
pub struct FileEntry {
    pub filename: String,
    pub uri: String,
}

/// Fields like `number` and `volume` show up as either strings or bare
/// integers in the export; both normalize to strings.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
    }

    let value = Option::<Raw>::deserialize(deserializer)?;
    Ok(value.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Int(number) => number.to_string(),
    }))
}

/// The legacy export encodes booleans either as JSON booleans or as the
/// strings `"TRUE"`/`"FALSE"`.
fn bool_or_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    let value = Option::<Flag>::deserialize(deserializer)?;
    Ok(value.map(|flag| match flag {
        Flag::Bool(b) => b,
        Flag::Text(s) => s.eq_ignore_ascii_case("true"),
    }))
}
