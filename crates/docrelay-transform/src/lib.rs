#![deny(unsafe_code)]

//! Metadata transformer: maps a sparse legacy record into the target
//! archive's normalized deposit metadata.
//!
//! The transform is deterministic given its inputs. The only collaborators
//! that touch the network sit behind the [`LinkProbe`] and
//! [`DepositorSource`] traits so the whole transform runs against fakes in
//! tests; the transfer date is injected for the same reason.

pub mod dates;
pub mod error;
pub mod identifiers;
pub mod keywords;
pub mod kind;
pub mod names;
pub mod notes;
pub mod simple;

use chrono::NaiveDate;
use docrelay_model::{DepositMetadata, SourceRecord};
use docrelay_tables::{CurationTables, DoiMap, UrlFixTable};
use tracing::debug;

pub use crate::error::{TransformError, TransformWarning};
pub use crate::notes::Provenance;

/// Liveness probe used by URL remediation as a last resort.
pub trait LinkProbe {
    /// True when the URL answers a GET with a success status.
    fn is_live(&self, url: &str) -> bool;
}

/// Source of the human-readable depositor name for a record. The name is
/// not part of the JSON export; the HTTP implementation scrapes the legacy
/// record page for it.
pub trait DepositorSource {
    fn depositor_name(&self, legacy_id: u64) -> Option<String>;
}

/// A finished transform: the metadata document plus any non-fatal
/// conditions recorded along the way.
#[derive(Debug)]
pub struct TransformReport {
    pub metadata: DepositMetadata,
    pub warnings: Vec<TransformWarning>,
}

/// The metadata transformer. Holds only read-only tables and collaborator
/// handles; one instance serves any number of records.
pub struct Transformer<'a> {
    tables: &'a CurationTables,
    doi_map: &'a DoiMap,
    url_fixes: &'a UrlFixTable,
    probe: &'a dyn LinkProbe,
    depositors: &'a dyn DepositorSource,
    provenance: Provenance,
    transfer_date: NaiveDate,
}

impl<'a> Transformer<'a> {
    pub fn new(
        tables: &'a CurationTables,
        doi_map: &'a DoiMap,
        url_fixes: &'a UrlFixTable,
        probe: &'a dyn LinkProbe,
        depositors: &'a dyn DepositorSource,
        provenance: Provenance,
        transfer_date: NaiveDate,
    ) -> Self {
        Self {
            tables,
            doi_map,
            url_fixes,
            probe,
            depositors,
            provenance,
            transfer_date,
        }
    }

    /// Transform one record. Field-group converters are independent; the
    /// result is their key union, with only the documented overrides (type
    /// exceptions, keyword tiers, pages over pagerange) replacing values.
    pub fn transform(&self, record: &SourceRecord) -> Result<TransformReport, TransformError> {
        debug!(legacy_id = record.legacy_id, kind = %record.kind, "transforming record");
        let mut warnings = Vec::new();

        let resolved = kind::resolve(record, self.tables)?;
        let mut metadata = DepositMetadata {
            upload_type: resolved.upload_type,
            publication_type: resolved.publication_type,
            image_type: resolved.image_type,
            ..DepositMetadata::default()
        };

        metadata.publication_date = dates::publication_date(record)?;
        metadata.creators = names::creators(record);
        metadata.contributors = names::contributors(record);
        simple::apply(record, self.tables, &mut metadata)?;
        metadata.keywords = keywords::keywords(record, self.tables);
        metadata.related_identifiers = identifiers::related_identifiers(
            record,
            self.doi_map,
            self.url_fixes,
            self.probe,
            &mut warnings,
        );

        let depositor = self
            .depositors
            .depositor_name(record.legacy_id)
            .filter(|name| !name.is_empty());
        metadata.notes = Some(notes::compose(
            record,
            depositor.as_deref(),
            &self.provenance,
            self.transfer_date,
        ));

        Ok(TransformReport { metadata, warnings })
    }
}
