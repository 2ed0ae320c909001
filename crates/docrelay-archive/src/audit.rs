//! Append-only audit log of transfer attempts.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use chrono::Local;
use docrelay_model::AuditLogEntry;

use crate::error::Result;

/// File-backed audit sink; one comma-separated line per attempt, appended
/// atomically at the file level.
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn append(&self, entry: &AuditLogEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", entry.csv_line())?;
        Ok(())
    }
}

/// Quoted local timestamp for an audit entry, `"dd/mm/YYYY HH:MM:SS"`.
pub fn local_timestamp() -> String {
    format!("\"{}\"", Local::now().format("%d/%m/%Y %H:%M:%S"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_one_line_per_entry() {
        let dir = tempfile::tempdir().expect("tempdir");
        let log = AuditLog::new(dir.path().join("transfers.csv"));

        log.append(&AuditLogEntry::begin(1, "\"t1\"".to_string()))
            .expect("append");
        log.append(&AuditLogEntry::begin(2, "\"t2\"".to_string()))
            .expect("append");

        let text = std::fs::read_to_string(dir.path().join("transfers.csv")).expect("read");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["1,\"t1\",,,,", "2,\"t2\",,,,"]);
    }

    #[test]
    fn timestamp_is_quoted() {
        let stamp = local_timestamp();
        assert!(stamp.starts_with('"') && stamp.ends_with('"'));
        assert_eq!(stamp.len(), 21);
    }
}
