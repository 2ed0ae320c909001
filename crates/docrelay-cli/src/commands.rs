use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{info, warn};

use docrelay_archive::{
    ArchiveClient, ArchiveError, AuditLog, MigrationConfig, Pacer, SleepPacer, SourceClient,
    UploadSession, drain_drafts, local_timestamp, publish_and_record,
};
use docrelay_model::DepositPayload;
use docrelay_tables::{CurationTables, DoiMap, UrlFixTable, ValidIds};
use docrelay_transform::{Provenance, TransformReport, Transformer};

use crate::cli::{BatchArgs, TransferArgs};
use crate::types::{BatchResult, TransferSummary};

/// Everything a migration run needs, loaded once: configuration, lookup
/// tables, and the HTTP clients.
pub struct Runtime {
    config: MigrationConfig,
    tables: CurationTables,
    doi_map: DoiMap,
    url_fixes: UrlFixTable,
    valid_ids: ValidIds,
    source: SourceClient,
    archive: ArchiveClient,
    audit: AuditLog,
}

impl Runtime {
    pub fn load(config_path: &Path) -> Result<Self> {
        let config = MigrationConfig::load(config_path)?;
        let doi_map =
            DoiMap::load(&config.tables.doi_list).context("load DOI cross-reference")?;
        let url_fixes =
            UrlFixTable::load(&config.tables.url_fixes).context("load URL remediation table")?;
        let valid_ids = ValidIds::load(&config.tables.valid_ids).context("load valid id list")?;
        info!(
            dois = doi_map.len(),
            url_fixes = url_fixes.len(),
            valid_ids = valid_ids.len(),
            "lookup tables loaded"
        );
        let source = SourceClient::new(config.source.base_url.clone())?;
        let archive = ArchiveClient::new(
            config.archive.base_url.clone(),
            config.archive.access_token.clone(),
        )?;
        let audit = AuditLog::new(config.tables.audit_log.clone());
        Ok(Self {
            config,
            tables: CurationTables::builtin(),
            doi_map,
            url_fixes,
            valid_ids,
            source,
            archive,
            audit,
        })
    }

    fn provenance(&self) -> Provenance {
        Provenance {
            source_label: self.config.source.display_name.clone(),
            community_label: self.config.archive.community_name.clone(),
        }
    }

    fn pacer(&self) -> SleepPacer {
        SleepPacer::new(Duration::from_secs(self.config.pacing.pause_secs))
    }
}

pub fn run_transfer(runtime: &Runtime, args: &TransferArgs) -> Result<TransferSummary> {
    transfer_record(runtime, args.legacy_id, args.publish)
}

pub fn run_batch(runtime: &Runtime, args: &BatchArgs) -> Result<BatchResult> {
    let ids: Vec<u64> = runtime.valid_ids.in_range(args.start, args.end).collect();
    info!(
        count = ids.len(),
        start = args.start,
        end = args.end,
        "starting batch transfer"
    );
    let mut pacer = runtime.pacer();
    let mut transfers = Vec::with_capacity(ids.len());
    for (index, legacy_id) in ids.into_iter().enumerate() {
        if index > 0 {
            pacer.pause();
        }
        match transfer_record(runtime, legacy_id, args.publish) {
            Ok(summary) => transfers.push(summary),
            Err(error) => {
                warn!(legacy_id, error = %error, "record transfer aborted");
                transfers.push(TransferSummary::aborted(legacy_id, format!("{error:#}")));
            }
        }
    }
    let has_failures = transfers.iter().any(|transfer| !transfer.completed);
    Ok(BatchResult {
        transfers,
        has_failures,
    })
}

pub fn run_reset(runtime: &Runtime) -> Result<usize> {
    let deleted = drain_drafts(&runtime.archive)?;
    info!(deleted, "draft reset finished");
    Ok(deleted)
}

fn transfer_record(runtime: &Runtime, legacy_id: u64, publish: bool) -> Result<TransferSummary> {
    if !runtime.valid_ids.contains(legacy_id) {
        return Err(ArchiveError::InvalidRecordId(legacy_id).into());
    }

    let record = runtime.source.fetch_record(legacy_id)?;
    let transformer = Transformer::new(
        &runtime.tables,
        &runtime.doi_map,
        &runtime.url_fixes,
        &runtime.source,
        &runtime.source,
        runtime.provenance(),
        Local::now().date_naive(),
    );
    let TransformReport { metadata, warnings } = transformer.transform(&record)?;
    for warning in &warnings {
        warn!(legacy_id, ?warning, "transform warning");
    }

    let payload = DepositPayload { metadata };
    let mut pacer = runtime.pacer();
    let session = UploadSession::new(
        &runtime.archive,
        &runtime.source,
        runtime.config.pacing.files_per_pause,
        legacy_id,
        local_timestamp(),
    );
    let outcome = session.run(&record, &payload, &mut pacer, &runtime.audit)?;

    let mut summary = TransferSummary {
        legacy_id,
        completed: outcome.is_complete(),
        deposit_id: outcome.deposit_id,
        doi: None,
        warnings: warnings.len(),
        detail: outcome.failure.as_ref().map(ToString::to_string),
    };

    if publish && summary.completed {
        if let Some(deposit_id) = summary.deposit_id {
            let doi = publish_and_record(
                &runtime.archive,
                &mut pacer,
                deposit_id,
                legacy_id,
                &runtime.config.tables.doi_list,
            )?;
            summary.doi = Some(doi);
        }
    }

    Ok(summary)
}
