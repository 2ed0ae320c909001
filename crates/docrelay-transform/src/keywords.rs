//! Keyword assembly.
//!
//! The seed list comes from subject codes that have no authority entry and
//! live on as plain keywords. Three curated override tiers are checked in
//! order before the generic raw-string path, and when one applies the raw
//! `keywords` field is ignored entirely:
//!
//! 1. records carrying a `skill_areas` field get a fixed two-term list;
//! 2. records in the curated id ranges get the seed plus a fixed pair;
//! 3. records with a literal per-id list get the seed plus that list.
//!
//! Only then is the raw keyword string split up and appended to the seed.

use docrelay_model::SourceRecord;
use docrelay_tables::CurationTables;

/// Keywords for a record. The result may be empty (curated subject tags but
/// no raw keyword string); the caller still emits the key.
pub fn keywords(record: &SourceRecord, tables: &CurationTables) -> Vec<String> {
    let mut seed: Vec<String> = record
        .subjects
        .iter()
        .filter_map(|code| tables.subject_keywords.get(code).cloned())
        .collect();

    if record.skill_areas.is_some() {
        return tables.skill_area_keywords.clone();
    }
    if tables.in_keyword_range(record.legacy_id) {
        seed.extend(tables.range_keywords.iter().cloned());
        return seed;
    }
    if let Some(curated) = tables.keyword_override(record.legacy_id) {
        seed.extend(curated.iter().cloned());
        return seed;
    }

    if let Some(raw) = &record.keywords {
        seed.extend(split_raw_keywords(raw));
    }
    seed
}

/// Split a raw keyword string on comma/semicolon/CRLF, trimming entries,
/// dropping empties, and stripping one trailing full stop first.
fn split_raw_keywords(raw: &str) -> Vec<String> {
    let raw = raw.strip_suffix('.').unwrap_or(raw);
    raw.replace("\r\n", ";")
        .split([',', ';'])
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
