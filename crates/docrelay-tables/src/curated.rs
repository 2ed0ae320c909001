//! Hand-maintained curation tables.
//!
//! These encode the per-record and per-value exceptions accumulated during
//! curation of the legacy catalog: records whose generic classification is
//! known to be wrong, keyword lists reconstructed by hand, publisher
//! acronyms, and the subject vocabulary. They are process-wide immutable
//! configuration, built once and injected wherever field rules need them so
//! tests can substitute their own.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// A subject term in the authority vocabulary, addressable by a stable
/// external identifier page under the authority base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectTerm {
    pub term: String,
    pub authority_page: String,
}

/// Curated lookup tables used by the metadata transformer.
#[derive(Debug, Clone, Default)]
pub struct CurationTables {
    /// Per-record type overrides, highest precedence in type resolution.
    pub type_exceptions: BTreeMap<u64, String>,
    /// Generic `type[/subtype]` composite key -> `target[/subtarget]`.
    pub type_map: BTreeMap<String, String>,
    /// Subject codes that have no authority entry and become plain keywords.
    pub subject_keywords: BTreeMap<String, String>,
    /// Subject codes resolvable in the authority vocabulary.
    pub subject_vocabulary: BTreeMap<String, SubjectTerm>,
    /// Base URL of the subject authority.
    pub subject_authority_base: String,
    /// Keywords for the records that carry a `skill_areas` field.
    pub skill_area_keywords: Vec<String>,
    /// Id ranges whose records all share `range_keywords`.
    pub keyword_ranges: Vec<RangeInclusive<u64>>,
    pub range_keywords: Vec<String>,
    /// Literal per-record keyword lists.
    pub keyword_overrides: BTreeMap<u64, Vec<String>>,
    /// Publisher acronym -> full institution name.
    pub publisher_acronyms: BTreeMap<String, String>,
}

impl CurationTables {
    /// The tables curated for the legacy catalog this tool was built for.
    pub fn builtin() -> Self {
        Self {
            type_exceptions: type_exceptions(),
            type_map: type_map(),
            subject_keywords: subject_keywords(),
            subject_vocabulary: subject_vocabulary(),
            subject_authority_base: "https://id.loc.gov/authorities/subjects/".to_string(),
            skill_area_keywords: vec![
                "data management".to_string(),
                "scientific computing".to_string(),
            ],
            keyword_ranges: vec![823..=865, 913..=915],
            range_keywords: vec![
                "Environmental Physics Group".to_string(),
                "Institute of Physics".to_string(),
            ],
            keyword_overrides: keyword_overrides(),
            publisher_acronyms: publisher_acronyms(),
        }
    }

    /// Literal keyword list for a curated record, if any.
    pub fn keyword_override(&self, legacy_id: u64) -> Option<&[String]> {
        self.keyword_overrides
            .get(&legacy_id)
            .map(Vec::as_slice)
    }

    /// True when the record falls in one of the curated keyword id ranges.
    pub fn in_keyword_range(&self, legacy_id: u64) -> bool {
        self.keyword_ranges
            .iter()
            .any(|range| range.contains(&legacy_id))
    }

    /// Authority identifier URL for a vocabulary subject.
    pub fn subject_identifier(&self, subject: &SubjectTerm) -> String {
        format!("{}{}", self.subject_authority_base, subject.authority_page)
    }
}

fn type_exceptions() -> BTreeMap<u64, String> {
    [
        (158, "publication/report"),
        (1295, "other"),
        (53, "image/photo"),
        (55, "image/photo"),
        (56, "image/photo"),
        (150, "image/photo"),
        (65, "image/figure"),
        (91, "image/figure"),
        (1287, "image/diagram"),
        (1474, "image/diagram"),
        (194, "presentation"),
        (333, "poster"),
    ]
    .into_iter()
    .map(|(id, value)| (id, value.to_string()))
    .collect()
}

fn type_map() -> BTreeMap<String, String> {
    [
        ("article", "publication/article"),
        ("book", "publication/book"),
        ("book_section", "publication/section"),
        ("conference_item", "other"),
        ("conference_item/keynote", "presentation"),
        ("conference_item/speech", "presentation"),
        ("conference_item/lecture", "publication/conferencepaper"),
        ("conference_item/paper", "publication/conferencepaper"),
        ("conference_item/other", "publication/other"),
        ("conference_item/poster", "poster"),
        ("exhibition", "other"),
        ("exhibition/speech", "presentation"),
        ("image", "image"),
        ("other", "other"),
        ("teaching_resource", "lesson"),
        ("video", "video"),
        ("audio", "video"),
        ("dataset", "dataset"),
        ("monograph/working_paper", "publication/workingpaper"),
        ("monograph/other", "other"),
        ("monograph/structured_metadata", "other"),
        ("monograph/discussion_paper", "publication/workingpaper"),
        ("monograph/documentation", "other"),
        ("monograph/manual", "publication/technicalnote"),
        ("monograph/minutes", "publication/report"),
        ("monograph/annual_report", "publication/report"),
        ("monograph/project_report", "publication/report"),
        ("monograph/technical_report", "publication/technicalnote"),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value.to_string()))
    .collect()
}

fn subject_keywords() -> BTreeMap<String, String> {
    [
        ("biology_and_microbiology", "biology and microbiology"),
        ("computer_science", "computer science"),
        ("data_and_information", "data and information"),
        ("ecology_and_environment", "ecology and environment"),
        ("hist_of_science", "history of science"),
        ("science_policy", "science policy"),
    ]
    .into_iter()
    .map(|(code, label)| (code.to_string(), label.to_string()))
    .collect()
}

fn subject_vocabulary() -> BTreeMap<String, SubjectTerm> {
    [
        ("archaeology", "Archaeology", "sh85006507.html"),
        ("atmospheric_sciences", "Atmospheric Sciences", "sh2018002590.html"),
        ("chemistry", "Chemistry", "sh85022986.html"),
        ("earth_sciences", "Earth Sciences", "sh85040468.html"),
        ("economics", "Economics", "sh85040850.html"),
        ("education", "Education", "sh85040989.html"),
        ("electronics", "Electronics", "sh85042383.html"),
        ("glaciology", "Glaciology", "sh85055077.html"),
        ("health", "Health", "sh85059518.html"),
        ("hydrology", "Hydrology", "sh85063458.html"),
        ("law", "Law", "sh85075119.html"),
        ("management", "Management", "sh85080336.html"),
        ("marine_sciences", "Marine Sciences", "sh85081263.html"),
        ("mathematics", "Mathematics", "sh85082139.html"),
        ("meteorology", "Meteorology", "sh85084334.html"),
        ("physics", "Physics", "sh85101653.html"),
        ("space_science", "Space Science", "sh85125953.html"),
    ]
    .into_iter()
    .map(|(code, term, page)| {
        (
            code.to_string(),
            SubjectTerm {
                term: term.to_string(),
                authority_page: page.to_string(),
            },
        )
    })
    .collect()
}

fn keyword_overrides() -> BTreeMap<u64, Vec<String>> {
    let table: [(u64, &[&str]); 9] = [
        (150, &["radiosonde", "weather", "balloon", "clouds"]),
        (274, &["data quality", "European Space Agency", "ESA"]),
        (341, &["Doppler", "LiDAR", "Atmospheric Physics Turbulence"]),
        (764, &["FAAM Website", "Airborne Measurements"]),
        (
            785,
            &["LiDAR", "Volcanic Ash", "EZlidar", "UKMO", "Technical Note", "OBR"],
        ),
        (
            810,
            &[
                "data holdings",
                "NERC",
                "SIS",
                "dataset",
                "CEDA",
                "NEODC",
                "BADC",
                "UKSSDC",
                "services",
            ],
        ),
        (899, &["metadata", "tools", "climate modelling"]),
        (1313, &["MIPAS", "Cloud Retrieval Algorithm"]),
        (1382, &["CMIP", "ESGF", "CF"]),
    ];
    table
        .into_iter()
        .map(|(id, words)| (id, words.iter().map(|w| (*w).to_string()).collect()))
        .collect()
}

fn publisher_acronyms() -> BTreeMap<String, String> {
    [
        (
            "ARSF-DAN",
            "Airborne Remote Sensing Facility Data Analysis Node (ARSF-DAN)",
        ),
        ("STFC", "Science and Technology Facilities Council (STFC)"),
        (
            "STFC RAL",
            "Science and Technology Facilities Council; Rutherford Appleton Laboratory (STFC RAL)",
        ),
        ("BAS", "British Antarctic Survey (BAS)"),
        ("ESRIN", "European Space Research Institute (ESRIN)"),
        (
            "British Atmospheric Data Centre",
            "British Atmospheric Data Centre (BADC)",
        ),
        (
            "National Aeronautics and Space Administration",
            "National Aeronautics and Space Administration (NASA)",
        ),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value.to_string()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_are_populated() {
        let tables = CurationTables::builtin();
        assert_eq!(
            tables.type_map.get("monograph/manual").map(String::as_str),
            Some("publication/technicalnote")
        );
        assert_eq!(
            tables.type_exceptions.get(&150).map(String::as_str),
            Some("image/photo")
        );
        assert_eq!(tables.subject_vocabulary.len(), 17);
    }

    #[test]
    fn keyword_ranges_are_exclusive_of_bounds_neighbours() {
        let tables = CurationTables::builtin();
        assert!(!tables.in_keyword_range(822));
        assert!(tables.in_keyword_range(823));
        assert!(tables.in_keyword_range(865));
        assert!(!tables.in_keyword_range(866));
        assert!(tables.in_keyword_range(913));
        assert!(!tables.in_keyword_range(916));
    }

    #[test]
    fn subject_identifier_joins_base_and_page() {
        let tables = CurationTables::builtin();
        let physics = tables.subject_vocabulary.get("physics").expect("physics");
        assert_eq!(
            tables.subject_identifier(physics),
            "https://id.loc.gov/authorities/subjects/sh85101653.html"
        );
    }
}
