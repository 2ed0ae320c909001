//! Migration configuration, loaded from a TOML file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ArchiveError, Result};

/// Top-level configuration for a migration run.
#[derive(Debug, Clone, Deserialize)]
pub struct MigrationConfig {
    pub source: SourceConfig,
    pub archive: ArchiveConfig,
    pub tables: TablePaths,
    #[serde(default)]
    pub pacing: Pacing,
}

/// The legacy repository records are fetched from.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the legacy repository, without a trailing slash.
    pub base_url: String,
    /// Full display name used in the provenance note.
    pub display_name: String,
}

/// The target archive deposits are created on.
#[derive(Debug, Clone, Deserialize)]
pub struct ArchiveConfig {
    /// Base URL of the archive, without a trailing slash.
    pub base_url: String,
    /// Static credential passed as a query parameter on every call.
    pub access_token: String,
    /// Receiving community, named in the provenance note.
    pub community_name: String,
}

/// Locations of the flat-file lookup tables and the audit log.
#[derive(Debug, Clone, Deserialize)]
pub struct TablePaths {
    pub doi_list: PathBuf,
    pub url_fixes: PathBuf,
    pub valid_ids: PathBuf,
    pub audit_log: PathBuf,
}

/// Rate-limit pacing for file uploads and between batch records.
#[derive(Debug, Clone, Deserialize)]
pub struct Pacing {
    /// Pause after this many file uploads within a session.
    #[serde(default = "default_files_per_pause")]
    pub files_per_pause: usize,
    /// Length of each pause, in seconds.
    #[serde(default = "default_pause_secs")]
    pub pause_secs: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            files_per_pause: default_files_per_pause(),
            pause_secs: default_pause_secs(),
        }
    }
}

fn default_files_per_pause() -> usize {
    40
}

fn default_pause_secs() -> u64 {
    3
}

impl MigrationConfig {
    /// Load and parse the TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|err| ArchiveError::Config {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        toml::from_str(&text).map_err(|err| ArchiveError::Config {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }
}
