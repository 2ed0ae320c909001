//! Per-record upload session: a strictly sequential state machine with a
//! compensating delete on any phase failure.
//!
//! Phases run Create -> Metadata -> Files; the `Failed` state is reachable
//! from each. Once a draft exists, every failure path deletes it before the
//! audit entry is written, so the log always reflects the final remote
//! state. Exactly one audit entry is written per attempt.

use std::path::Path;
use std::time::Duration;

use docrelay_model::{AuditLogEntry, DepositPayload, SourceRecord};
use docrelay_tables::DoiMap;
use tracing::{debug, info, warn};

use crate::audit::AuditLog;
use crate::error::{ArchiveError, Result};

/// Remote deposit operations, implemented by [`crate::ArchiveClient`] and
/// by recording fakes in tests.
pub trait DepositApi {
    fn create_draft(&self) -> Result<CreateResponse>;
    fn put_metadata(&self, deposit_id: u64, payload: &DepositPayload) -> Result<u16>;
    fn upload_file(&self, bucket_url: &str, filename: &str, bytes: Vec<u8>) -> Result<u16>;
    fn delete_draft(&self, deposit_id: u64) -> Result<u16>;
    fn publish_draft(&self, deposit_id: u64) -> Result<u16>;
    fn fetch_doi(&self, deposit_id: u64) -> Result<Option<String>>;
    fn list_draft_ids(&self) -> Result<Vec<u64>>;
}

/// Byte source for the files being re-uploaded.
pub trait FileSource {
    fn fetch_bytes(&self, uri: &str) -> Result<Vec<u8>>;
}

/// Rate-limit pause, injectable so tests can count pauses instead of
/// sleeping.
pub trait Pacer {
    fn pause(&mut self);
}

/// Real pacer: a fixed blocking sleep.
#[derive(Debug, Clone)]
pub struct SleepPacer {
    delay: Duration,
}

impl SleepPacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Pacer for SleepPacer {
    fn pause(&mut self) {
        std::thread::sleep(self.delay);
    }
}

/// Outcome of a draft creation call.
#[derive(Debug, Clone)]
pub struct CreateResponse {
    pub status: u16,
    /// Present exactly when the status is a success.
    pub draft: Option<DraftDeposit>,
}

/// Handle to a created draft deposit.
#[derive(Debug, Clone)]
pub struct DraftDeposit {
    pub deposit_id: u64,
    /// Per-draft endpoint files are streamed to.
    pub bucket_url: String,
}

/// Session phase; `FilesUploaded` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Start,
    Created,
    MetadataSet,
    FilesUploaded,
    Failed,
}

/// Result of one completed transfer attempt.
#[derive(Debug)]
pub struct TransferOutcome {
    pub phase: Phase,
    /// The draft that survives a completed transfer; rolled-back drafts do
    /// not surface here.
    pub deposit_id: Option<u64>,
    pub entry: AuditLogEntry,
    pub failure: Option<ArchiveError>,
}

impl TransferOutcome {
    pub fn is_complete(&self) -> bool {
        self.phase == Phase::FilesUploaded
    }
}

/// One record transfer attempt. Ephemeral: consumed by [`Self::run`] and
/// not persisted beyond the audit log.
pub struct UploadSession<'a> {
    api: &'a dyn DepositApi,
    files: &'a dyn FileSource,
    files_per_pause: usize,
    phase: Phase,
    deposit: Option<DraftDeposit>,
    entry: AuditLogEntry,
}

impl<'a> UploadSession<'a> {
    pub fn new(
        api: &'a dyn DepositApi,
        files: &'a dyn FileSource,
        files_per_pause: usize,
        legacy_id: u64,
        timestamp: String,
    ) -> Self {
        Self {
            api,
            files,
            files_per_pause,
            phase: Phase::Start,
            deposit: None,
            entry: AuditLogEntry::begin(legacy_id, timestamp),
        }
    }

    /// Drive the session to a terminal state and append the audit entry.
    ///
    /// Phase rejections (non-success statuses) end up as a `Failed` outcome
    /// carrying the typed failure; transport errors take the same rollback
    /// path. The outer `Err` is reserved for an unwritable audit log.
    pub fn run(
        mut self,
        record: &SourceRecord,
        payload: &DepositPayload,
        pacer: &mut dyn Pacer,
        audit: &AuditLog,
    ) -> Result<TransferOutcome> {
        info!(legacy_id = record.legacy_id, "uploading record");
        let result = self.drive(record, payload, pacer);

        if result.is_err() {
            self.phase = Phase::Failed;
            self.rollback();
        }
        // The compensating delete has already run; the log line reflects
        // the final remote state.
        audit.append(&self.entry)?;

        let deposit_id = self.deposit.as_ref().map(|draft| draft.deposit_id);
        match result {
            Ok(()) => {
                info!(legacy_id = record.legacy_id, deposit_id, "record transferred");
                Ok(TransferOutcome {
                    phase: self.phase,
                    deposit_id,
                    entry: self.entry,
                    failure: None,
                })
            }
            Err(failure) => {
                warn!(legacy_id = record.legacy_id, error = %failure, "transfer failed");
                Ok(TransferOutcome {
                    phase: Phase::Failed,
                    deposit_id: None,
                    entry: self.entry,
                    failure: Some(failure),
                })
            }
        }
    }

    fn drive(
        &mut self,
        record: &SourceRecord,
        payload: &DepositPayload,
        pacer: &mut dyn Pacer,
    ) -> Result<()> {
        // Create.
        let created = self.api.create_draft()?;
        self.entry.create_status = created.status.to_string();
        info!(status = created.status, "draft creation finished");
        if !is_success(created.status) {
            return Err(ArchiveError::CreateFailed {
                status: created.status,
            });
        }
        let draft = created
            .draft
            .ok_or(ArchiveError::MissingDepositField("id"))?;
        self.deposit = Some(draft.clone());
        self.phase = Phase::Created;

        // Metadata.
        let status = self.api.put_metadata(draft.deposit_id, payload)?;
        self.entry.metadata_status = status.to_string();
        info!(status, "metadata upload finished");
        if !is_success(status) {
            return Err(ArchiveError::MetadataRejected { status });
        }
        self.phase = Phase::MetadataSet;

        // Files, in source-list order.
        for (index, file) in record.attached_files().enumerate() {
            if index > 0 && index % self.files_per_pause == 0 {
                debug!(uploaded = index, "pausing for rate limit");
                pacer.pause();
            }
            let bytes = self.files.fetch_bytes(&file.uri)?;
            let status = self.api.upload_file(&draft.bucket_url, &file.filename, bytes)?;
            if !is_success(status) {
                self.entry.file_status = status.to_string();
                self.entry.failing_filename = file.filename.clone();
                return Err(ArchiveError::FileUploadFailed {
                    status,
                    filename: file.filename.clone(),
                });
            }
            debug!(filename = %file.filename, "file uploaded");
        }
        self.phase = Phase::FilesUploaded;
        Ok(())
    }

    /// Compensating action: delete the draft if one was created. Create
    /// failures leave nothing behind and skip this.
    fn rollback(&mut self) {
        let Some(draft) = &self.deposit else { return };
        match self.api.delete_draft(draft.deposit_id) {
            Ok(status) if is_success(status) => {
                info!(deposit_id = draft.deposit_id, "draft removed after failure");
            }
            Ok(status) => {
                warn!(
                    deposit_id = draft.deposit_id,
                    status, "compensating delete answered non-success"
                );
            }
            Err(err) => {
                warn!(deposit_id = draft.deposit_id, error = %err, "compensating delete failed");
            }
        }
        self.deposit = None;
    }
}

/// Publish a completed draft, then record the assigned persistent
/// identifier in the DOI cross-reference store.
pub fn publish_and_record(
    api: &dyn DepositApi,
    pacer: &mut dyn Pacer,
    deposit_id: u64,
    legacy_id: u64,
    doi_list: &Path,
) -> Result<String> {
    let status = api.publish_draft(deposit_id)?;
    info!(deposit_id, status, "publish finished");
    if !is_success(status) {
        return Err(ArchiveError::PublishFailed { status });
    }
    // Give the archive a moment to mint the identifier before reading it
    // back.
    pacer.pause();
    let doi = api
        .fetch_doi(deposit_id)?
        .ok_or(ArchiveError::MissingDepositField("doi"))?;
    DoiMap::append_line(doi_list, legacy_id, &doi)?;
    info!(legacy_id, doi = %doi, "identifier recorded");
    Ok(doi)
}

/// Maintenance reset: list and delete drafts until the listing is empty.
/// Returns the number of drafts deleted.
pub fn drain_drafts(api: &dyn DepositApi) -> Result<usize> {
    let mut deleted = 0usize;
    loop {
        let listed = api.list_draft_ids()?;
        if listed.is_empty() {
            return Ok(deleted);
        }
        let remaining = listed.len();
        let mut progressed = false;
        for deposit_id in listed {
            let status = api.delete_draft(deposit_id)?;
            if is_success(status) {
                debug!(deposit_id, "draft deleted");
                deleted += 1;
                progressed = true;
            } else {
                warn!(deposit_id, status, "draft delete answered non-success");
            }
        }
        if !progressed {
            return Err(ArchiveError::ResetStalled { remaining });
        }
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}
