/// Outcome of one record transfer, for the console summary.
#[derive(Debug)]
pub struct TransferSummary {
    pub legacy_id: u64,
    pub completed: bool,
    pub deposit_id: Option<u64>,
    pub doi: Option<String>,
    pub warnings: usize,
    /// Failure description when the transfer did not complete.
    pub detail: Option<String>,
}

impl TransferSummary {
    /// A transfer that never reached the upload session (invalid id,
    /// fetch or transform failure).
    pub fn aborted(legacy_id: u64, detail: String) -> Self {
        Self {
            legacy_id,
            completed: false,
            deposit_id: None,
            doi: None,
            warnings: 0,
            detail: Some(detail),
        }
    }
}

/// Collected outcomes of a batch run.
#[derive(Debug)]
pub struct BatchResult {
    pub transfers: Vec<TransferSummary>,
    pub has_failures: bool,
}
