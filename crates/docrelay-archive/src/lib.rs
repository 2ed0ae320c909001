#![deny(unsafe_code)]

//! Remote side of the migration: HTTP clients for the legacy source and
//! the target archive, the per-record upload session, publish and reset
//! maintenance operations, the audit log, and run configuration.

pub mod audit;
pub mod client;
pub mod config;
pub mod error;
pub mod session;

pub use crate::audit::{AuditLog, local_timestamp};
pub use crate::client::{ArchiveClient, SourceClient};
pub use crate::config::{ArchiveConfig, MigrationConfig, Pacing, SourceConfig, TablePaths};
pub use crate::error::ArchiveError;
pub use crate::session::{
    CreateResponse, DepositApi, DraftDeposit, FileSource, Pacer, Phase, SleepPacer,
    TransferOutcome, UploadSession, drain_drafts, publish_and_record,
};
