//! Flat-file lookup tables loaded once at startup and read-only thereafter.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{Result, TableError};

/// Cross-reference of already-migrated records: legacy id -> persistent
/// identifier on the archive. The backing file is append-only; each
/// successful publish adds one `legacy_id,identifier` line.
#[derive(Debug, Clone, Default)]
pub struct DoiMap {
    entries: BTreeMap<u64, String>,
}

impl DoiMap {
    /// Load the `legacy_id,identifier` CSV (no header row).
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .map_err(|err| TableError::csv(path, err.to_string()))?;

        let mut entries = BTreeMap::new();
        for record in reader.records() {
            let record = record.map_err(|err| TableError::csv(path, err.to_string()))?;
            let (Some(id), Some(doi)) = (record.get(0), record.get(1)) else {
                continue;
            };
            let id: u64 = id
                .trim()
                .parse()
                .map_err(|_| TableError::parse(path, format!("bad legacy id {id:?}")))?;
            entries.insert(id, doi.trim().to_string());
        }
        Ok(Self { entries })
    }

    pub fn get(&self, legacy_id: u64) -> Option<&str> {
        self.entries.get(&legacy_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append one `legacy_id,identifier` line to the backing file.
    pub fn append_line(path: &Path, legacy_id: u64, identifier: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|err| TableError::io(path, err))?;
        writeln!(file, "{legacy_id},{identifier}").map_err(|err| TableError::io(path, err))?;
        Ok(())
    }
}

/// Remediation verdict for one catalogued legacy URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlFix {
    /// `"Correct"` means the URL is known good as-is.
    pub status: String,
    /// Where the URL currently redirects, when recorded.
    pub redirected: String,
    /// A hand-picked replacement, when one exists. Preferred over
    /// `redirected`.
    pub suggested: String,
}

impl UrlFix {
    pub fn is_correct(&self) -> bool {
        self.status == "Correct"
    }
}

/// URL-remediation table keyed by the exact legacy URL.
///
/// The source sheet has no header row; columns are
/// `id, status, url, redirected, suggested` with the trailing columns often
/// empty.
#[derive(Debug, Clone, Default)]
pub struct UrlFixTable {
    entries: BTreeMap<String, UrlFix>,
}

impl UrlFixTable {
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .map_err(|err| TableError::csv(path, err.to_string()))?;

        let mut entries = BTreeMap::new();
        for record in reader.records() {
            let record = record.map_err(|err| TableError::csv(path, err.to_string()))?;
            let Some(url) = record.get(2) else { continue };
            if url.trim().is_empty() {
                continue;
            }
            entries.insert(
                url.trim().to_string(),
                UrlFix {
                    status: record.get(1).unwrap_or_default().trim().to_string(),
                    redirected: record.get(3).unwrap_or_default().trim().to_string(),
                    suggested: record.get(4).unwrap_or_default().trim().to_string(),
                },
            );
        }
        Ok(Self { entries })
    }

    pub fn get(&self, url: &str) -> Option<&UrlFix> {
        self.entries.get(url)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register an entry directly; loaders and tests build tables with this.
    pub fn insert(&mut self, url: impl Into<String>, fix: UrlFix) {
        self.entries.insert(url.into(), fix);
    }
}

/// The set of legacy ids that exist in the source catalog. Transfers of any
/// other id are rejected before a single remote call.
#[derive(Debug, Clone, Default)]
pub struct ValidIds {
    ids: BTreeSet<u64>,
}

impl ValidIds {
    /// Load a one-id-per-line text file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|err| TableError::io(path, err))?;
        let mut ids = BTreeSet::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let id: u64 = line
                .parse()
                .map_err(|_| TableError::parse(path, format!("bad legacy id {line:?}")))?;
            ids.insert(id);
        }
        Ok(Self { ids })
    }

    pub fn contains(&self, legacy_id: u64) -> bool {
        self.ids.contains(&legacy_id)
    }

    /// Ids within `[start, end)`, in ascending order.
    pub fn in_range(&self, start: u64, end: u64) -> impl Iterator<Item = u64> + '_ {
        self.ids.range(start..end).copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    fn temp_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write");
        file
    }

    #[test]
    fn doi_map_loads_and_appends() {
        let file = temp_file("12,10.5281/zenodo.100\n900,10.5281/zenodo.901\n");
        let map = DoiMap::load(file.path()).expect("load");
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(900), Some("10.5281/zenodo.901"));
        assert_eq!(map.get(1), None);

        DoiMap::append_line(file.path(), 77, "10.5281/zenodo.777").expect("append");
        let map = DoiMap::load(file.path()).expect("reload");
        assert_eq!(map.get(77), Some("10.5281/zenodo.777"));
    }

    #[test]
    fn url_fixes_key_on_exact_url() {
        let file = temp_file(
            "1,Correct,http://a.example/x,,\n\
             2,Moved,http://b.example/y,http://b.example/new,http://b.example/best\n",
        );
        let table = UrlFixTable::load(file.path()).expect("load");
        assert!(table.get("http://a.example/x").expect("entry").is_correct());
        let moved = table.get("http://b.example/y").expect("entry");
        assert_eq!(moved.suggested, "http://b.example/best");
        assert_eq!(moved.redirected, "http://b.example/new");
        assert!(table.get("http://c.example/z").is_none());
    }

    #[test]
    fn valid_ids_range_iteration_is_ordered() {
        let file = temp_file("10\n5\n30\n20\n");
        let ids = ValidIds::load(file.path()).expect("load");
        assert!(ids.contains(20));
        assert!(!ids.contains(21));
        assert_eq!(ids.in_range(10, 30).collect::<Vec<_>>(), vec![10, 20]);
    }

    #[test]
    fn valid_ids_rejects_garbage() {
        let file = temp_file("10\nnot-an-id\n");
        assert!(ValidIds::load(file.path()).is_err());
    }
}
