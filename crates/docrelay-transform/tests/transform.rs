//! End-to-end transformer scenarios against fake collaborators.

use chrono::NaiveDate;
use docrelay_model::{ContributorRole, Relation, SourceRecord};
use docrelay_tables::{CurationTables, DoiMap, UrlFix, UrlFixTable};
use docrelay_transform::{
    DepositorSource, LinkProbe, Provenance, TransformError, TransformWarning, Transformer,
    identifiers::remediate_url,
};
use serde_json::json;

struct DeadProbe;

impl LinkProbe for DeadProbe {
    fn is_live(&self, _url: &str) -> bool {
        false
    }
}

struct LiveProbe;

impl LinkProbe for LiveProbe {
    fn is_live(&self, _url: &str) -> bool {
        true
    }
}

struct NoDepositor;

impl DepositorSource for NoDepositor {
    fn depositor_name(&self, _legacy_id: u64) -> Option<String> {
        None
    }
}

struct NamedDepositor(&'static str);

impl DepositorSource for NamedDepositor {
    fn depositor_name(&self, _legacy_id: u64) -> Option<String> {
        Some(self.0.to_string())
    }
}

struct Fixture {
    tables: CurationTables,
    doi_map: DoiMap,
    url_fixes: UrlFixTable,
}

impl Fixture {
    fn new() -> Self {
        Self {
            tables: CurationTables::builtin(),
            doi_map: DoiMap::default(),
            url_fixes: UrlFixTable::default(),
        }
    }

    fn transformer<'a>(
        &'a self,
        probe: &'a dyn LinkProbe,
        depositors: &'a dyn DepositorSource,
    ) -> Transformer<'a> {
        Transformer::new(
            &self.tables,
            &self.doi_map,
            &self.url_fixes,
            probe,
            depositors,
            Provenance {
                source_label: "the Example Centre document repository".to_string(),
                community_label: "the Example Centre community on the archive".to_string(),
            },
            NaiveDate::from_ymd_opt(2026, 8, 5).expect("date"),
        )
    }
}

fn record(value: serde_json::Value) -> SourceRecord {
    serde_json::from_value(value).expect("record json")
}

#[test]
fn article_number_lands_in_title_and_issue() {
    let fixture = Fixture::new();
    let transformer = fixture.transformer(&DeadProbe, &NoDepositor);
    let report = transformer
        .transform(&record(json!({
            "eprintid": 1200,
            "type": "article",
            "title": "Study",
            "number": "3",
            "date": 1999
        })))
        .expect("transform");

    assert_eq!(report.metadata.title, "Study 3");
    assert_eq!(report.metadata.upload_type, "publication");
    assert_eq!(report.metadata.publication_type.as_deref(), Some("article"));
    assert_eq!(report.metadata.journal_issue.as_deref(), Some("3"));
    assert_eq!(report.metadata.publication_date, "1999-01-01");
    assert_eq!(report.metadata.language, "eng");
    // No abstract: the title doubles as the description.
    assert_eq!(report.metadata.description.as_deref(), Some("Study 3"));
}

#[test]
fn exception_table_beats_generic_type_resolution() {
    let fixture = Fixture::new();
    let transformer = fixture.transformer(&DeadProbe, &NoDepositor);
    // The generic path would resolve monograph/working_paper to
    // publication/workingpaper; the curated exception pins this record to
    // publication/report.
    let report = transformer
        .transform(&record(json!({
            "eprintid": 158,
            "type": "monograph",
            "monograph_type": "working_paper",
            "title": "Annual summary",
            "date": 2001
        })))
        .expect("transform");

    assert_eq!(report.metadata.upload_type, "publication");
    assert_eq!(report.metadata.publication_type.as_deref(), Some("report"));
}

#[test]
fn image_without_subtype_defaults_to_other() {
    let fixture = Fixture::new();
    let transformer = fixture.transformer(&DeadProbe, &NoDepositor);
    let report = transformer
        .transform(&record(json!({
            "eprintid": 2000,
            "type": "image",
            "title": "Chart",
            "date": 2004
        })))
        .expect("transform");

    assert_eq!(report.metadata.upload_type, "image");
    assert_eq!(report.metadata.image_type.as_deref(), Some("other"));
    assert!(report.metadata.publication_type.is_none());
}

#[test]
fn unknown_type_is_fatal_for_the_record() {
    let fixture = Fixture::new();
    let transformer = fixture.transformer(&DeadProbe, &NoDepositor);
    let err = transformer
        .transform(&record(json!({
            "eprintid": 2001,
            "type": "sculpture",
            "title": "Bust",
            "date": 2004
        })))
        .expect_err("must fail");

    match err {
        TransformError::UnknownType { legacy_id, key } => {
            assert_eq!(legacy_id, 2001);
            assert_eq!(key, "sculpture");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn curated_keyword_override_ignores_raw_keywords() {
    let fixture = Fixture::new();
    let transformer = fixture.transformer(&DeadProbe, &NoDepositor);
    let report = transformer
        .transform(&record(json!({
            "eprintid": 150,
            "type": "image",
            "title": "Balloon launch",
            "date": 1962,
            "keywords": "this, raw, string; is ignored"
        })))
        .expect("transform");

    assert_eq!(
        report.metadata.keywords,
        vec!["radiosonde", "weather", "balloon", "clouds"]
    );
}

#[test]
fn keyword_range_records_get_the_fixed_pair() {
    let fixture = Fixture::new();
    let transformer = fixture.transformer(&DeadProbe, &NoDepositor);
    let report = transformer
        .transform(&record(json!({
            "eprintid": 830,
            "type": "other",
            "title": "Newsletter",
            "date": 1990,
            "keywords": "ignored"
        })))
        .expect("transform");

    assert_eq!(
        report.metadata.keywords,
        vec!["Environmental Physics Group", "Institute of Physics"]
    );
}

#[test]
fn subject_tags_without_raw_keywords_yield_empty_keyword_list() {
    let fixture = Fixture::new();
    let transformer = fixture.transformer(&DeadProbe, &NoDepositor);
    let report = transformer
        .transform(&record(json!({
            "eprintid": 2002,
            "type": "other",
            "title": "Atlas",
            "date": 2010,
            "subjects": ["physics"]
        })))
        .expect("transform");

    // "physics" resolves in the authority vocabulary, not to a keyword, so
    // the keyword list is present but empty.
    assert!(report.metadata.keywords.is_empty());
    let json = serde_json::to_value(&report.metadata).expect("serialize");
    assert_eq!(json["keywords"], json!([]));
    assert_eq!(json["subjects"][0]["term"], "Physics");
    assert_eq!(
        json["subjects"][0]["identifier"],
        "https://id.loc.gov/authorities/subjects/sh85101653.html"
    );
    assert_eq!(json["subjects"][0]["scheme"], "url");
}

#[test]
fn keyword_subjects_seed_the_generic_path() {
    let fixture = Fixture::new();
    let transformer = fixture.transformer(&DeadProbe, &NoDepositor);
    let report = transformer
        .transform(&record(json!({
            "eprintid": 2003,
            "type": "other",
            "title": "Survey",
            "date": 2012,
            "subjects": ["computer_science"],
            "keywords": "archives; retrieval."
        })))
        .expect("transform");

    assert_eq!(
        report.metadata.keywords,
        vec!["computer science", "archives", "retrieval"]
    );
}

#[test]
fn remediation_prefers_suggested_over_redirected() {
    let mut fixes = UrlFixTable::default();
    fixes.insert(
        "http://old.example/page",
        UrlFix {
            status: "Moved".to_string(),
            redirected: "http://old.example/redirected".to_string(),
            suggested: "http://new.example/curated".to_string(),
        },
    );
    assert_eq!(
        remediate_url("http://old.example/page", &fixes, &DeadProbe),
        Some("http://new.example/curated".to_string())
    );
}

#[test]
fn remediation_keeps_correct_urls() {
    let mut fixes = UrlFixTable::default();
    fixes.insert(
        "http://good.example/page",
        UrlFix {
            status: "Correct".to_string(),
            redirected: String::new(),
            suggested: String::new(),
        },
    );
    assert_eq!(
        remediate_url("http://good.example/page", &fixes, &DeadProbe),
        Some("http://good.example/page".to_string())
    );
}

#[test]
fn remediation_falls_back_to_live_base_url() {
    let fixes = UrlFixTable::default();
    assert_eq!(
        remediate_url("http://data.example/deep/path", &fixes, &LiveProbe),
        Some("http://data.example".to_string())
    );
    assert_eq!(
        remediate_url("http://data.example/deep/path", &fixes, &DeadProbe),
        None
    );
}

#[test]
fn unresolved_url_warns_but_does_not_abort() {
    let fixture = Fixture::new();
    let transformer = fixture.transformer(&DeadProbe, &NoDepositor);
    let report = transformer
        .transform(&record(json!({
            "eprintid": 2004,
            "type": "other",
            "title": "Atlas",
            "date": 2010,
            "official_url": "http://gone.example/resource"
        })))
        .expect("transform survives");

    assert_eq!(
        report.warnings,
        vec![TransformWarning::UnresolvableUrl {
            url: "http://gone.example/resource".to_string()
        }]
    );
    assert!(
        report
            .metadata
            .related_identifiers
            .iter()
            .all(|entry| entry.relation != Relation::IsSupplementedBy)
    );
}

#[test]
fn identifiers_cover_isbn_issn_and_predecessor_doi() {
    let mut fixture = Fixture::new();
    let doi_file = {
        use std::io::Write as _;
        let mut file = tempfile::NamedTempFile::new().expect("temp");
        writeln!(file, "90,10.5281/zenodo.90").expect("write");
        file
    };
    fixture.doi_map = DoiMap::load(doi_file.path()).expect("doi map");

    let transformer = fixture.transformer(&DeadProbe, &NoDepositor);
    let report = transformer
        .transform(&record(json!({
            "eprintid": 2005,
            "type": "book",
            "title": "Handbook",
            "date": 2015,
            "id_number": "ISBN 0-123-45678-9",
            "issn": "1234-5678",
            "succeeds": 90
        })))
        .expect("transform");

    let idents = &report.metadata.related_identifiers;
    assert_eq!(idents.len(), 3);
    assert_eq!(idents[0].identifier, "0-123-45678-9");
    assert_eq!(idents[0].relation, Relation::IsAlternateIdentifier);
    assert_eq!(idents[1].identifier, "1234-5678");
    assert_eq!(idents[2].identifier, "10.5281/zenodo.90");
    assert_eq!(idents[2].relation, Relation::IsNewVersionOf);
}

#[test]
fn contributors_carry_fixed_role_tags() {
    let fixture = Fixture::new();
    let transformer = fixture.transformer(&DeadProbe, &NoDepositor);
    let report = transformer
        .transform(&record(json!({
            "eprintid": 2006,
            "type": "other",
            "title": "Proceedings",
            "date": 2018,
            "creators": [{"name": {"given": "John", "family": "Smith"}}],
            "editors": [{"name": {"given": "Jane", "family": "Doe"}}],
            "copyright_holders": ["Example Centre"],
            "institution": "Example University",
            "department": "Physics"
        })))
        .expect("transform");

    assert_eq!(report.metadata.creators[0].name, "Smith, John");
    let contributors = &report.metadata.contributors;
    assert_eq!(contributors.len(), 3);
    assert_eq!(contributors[0].name, "Doe, Jane");
    assert_eq!(contributors[0].role, ContributorRole::Editor);
    assert_eq!(contributors[1].role, ContributorRole::RightsHolder);
    assert_eq!(contributors[2].name, "Physics, Example University");
    assert_eq!(contributors[2].role, ContributorRole::HostingInstitution);
}

#[test]
fn publisher_markers_are_dropped_and_acronyms_expanded() {
    let fixture = Fixture::new();
    let transformer = fixture.transformer(&DeadProbe, &NoDepositor);

    let dropped = transformer
        .transform(&record(json!({
            "eprintid": 2007,
            "type": "other",
            "title": "Report",
            "date": 2019,
            "publisher": "Unknown"
        })))
        .expect("transform");
    assert!(dropped.metadata.imprint_publisher.is_none());

    let expanded = transformer
        .transform(&record(json!({
            "eprintid": 2008,
            "type": "other",
            "title": "Report",
            "date": 2019,
            "publisher": "BAS"
        })))
        .expect("transform");
    assert_eq!(
        expanded.metadata.imprint_publisher.as_deref(),
        Some("British Antarctic Survey (BAS)")
    );
}

#[test]
fn datestamp_prefix_backs_up_a_missing_date() {
    let fixture = Fixture::new();
    let transformer = fixture.transformer(&DeadProbe, &NoDepositor);
    let report = transformer
        .transform(&record(json!({
            "eprintid": 2009,
            "type": "other",
            "title": "Notes",
            "datestamp": "2006-03-14 09:00:00"
        })))
        .expect("transform");
    assert_eq!(report.metadata.publication_date, "2006-03-14");
}

#[test]
fn notes_never_end_with_the_fragment_separator() {
    let fixture = Fixture::new();
    let transformer = fixture.transformer(&DeadProbe, &NoDepositor);
    let report = transformer
        .transform(&record(json!({
            "eprintid": 2010,
            "type": "other",
            "title": "Notes",
            "date": 2020,
            "series": "Annual Review",
            "funders": ["NERC", "STFC", "ESA"]
        })))
        .expect("transform");

    let notes = report.metadata.notes.expect("notes");
    assert!(!notes.ends_with("\n\n"));
    assert!(notes.contains("This item was part of the Annual Review series."));
    assert!(notes.contains("This work was funded by: NERC; STFC and, ESA."));
}

#[test]
fn depositor_sentence_closes_the_notes() {
    let fixture = Fixture::new();
    let transformer = fixture.transformer(&DeadProbe, &NamedDepositor("Jane Doe"));
    let report = transformer
        .transform(&record(json!({
            "eprintid": 2011,
            "type": "other",
            "title": "Notes",
            "date": 2020,
            "documents": [{"main": "notes.pdf", "files": []}]
        })))
        .expect("transform");

    let notes = report.metadata.notes.expect("notes");
    assert!(notes.contains("Main files in this record:\nnotes.pdf"));
    assert!(notes.ends_with(
        "Item originally deposited with the Example Centre document repository by Jane Doe. \
         Transferred to the Example Centre community on the archive on 05/08/2026"
    ));
}
