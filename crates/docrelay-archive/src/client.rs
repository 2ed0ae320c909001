//! Blocking HTTP clients for the legacy source repository and the target
//! archive.

use std::time::Duration;

use docrelay_model::{DepositPayload, SourceRecord};
use docrelay_transform::{DepositorSource, LinkProbe};
use regex::Regex;
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ArchiveError, Result};
use crate::session::{CreateResponse, DepositApi, DraftDeposit, FileSource};

/// Timeout for URL liveness probes; stale hosts often hang rather than
/// refuse.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for the legacy document repository: record export fetches,
/// depositor page scrapes, file downloads, and remediation probes.
#[derive(Debug, Clone)]
pub struct SourceClient {
    http: Client,
    probe_http: Client,
    base_url: String,
}

impl SourceClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .build()
            .map_err(|err| ArchiveError::Network(format!("failed to create HTTP client: {err}")))?;
        let probe_http = Client::builder()
            .timeout(PROBE_TIMEOUT)
            .build()
            .map_err(|err| ArchiveError::Network(format!("failed to create HTTP client: {err}")))?;
        Ok(Self {
            http,
            probe_http,
            base_url: base_url.into(),
        })
    }

    /// Fetch a record's JSON export by legacy id.
    pub fn fetch_record(&self, legacy_id: u64) -> Result<SourceRecord> {
        let url = format!(
            "{}/cgi/export/eprint/{legacy_id}/JSON/eprint-{legacy_id}.js",
            self.base_url
        );
        debug!(legacy_id, url = %url, "fetching record export");
        let response = self.http.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ArchiveError::Network(format!(
                "record export for {legacy_id} answered {status}"
            )));
        }
        Ok(response.json()?)
    }
}

impl FileSource for SourceClient {
    fn fetch_bytes(&self, uri: &str) -> Result<Vec<u8>> {
        let response = self.http.get(uri).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ArchiveError::Network(format!(
                "file download from {uri} answered {status}"
            )));
        }
        Ok(response.bytes()?.to_vec())
    }
}

impl LinkProbe for SourceClient {
    fn is_live(&self, url: &str) -> bool {
        match self.probe_http.get(url).send() {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                debug!(url = %url, error = %err, "liveness probe failed");
                false
            }
        }
    }
}

impl DepositorSource for SourceClient {
    fn depositor_name(&self, legacy_id: u64) -> Option<String> {
        let url = format!("{}/{legacy_id}", self.base_url);
        let body = self.http.get(&url).send().ok()?.text().ok()?;
        extract_depositor(&body)
    }
}

/// Pull the depositor name out of the record page's citation span. The
/// name is not part of the JSON export.
fn extract_depositor(html: &str) -> Option<String> {
    let pattern = Regex::new(
        r#"class="ep_name_citation"[^>]*>\s*<span[^>]*>([^<]+)</span>"#,
    )
    .ok()?;
    pattern
        .captures(html)
        .map(|captures| captures[1].trim().to_string())
        .filter(|name| !name.is_empty())
}

/// Client for the target archive's deposit API. The access token rides as
/// a query parameter on every call.
#[derive(Debug, Clone)]
pub struct ArchiveClient {
    http: Client,
    base_url: String,
    access_token: String,
}

impl ArchiveClient {
    pub fn new(base_url: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .build()
            .map_err(|err| ArchiveError::Network(format!("failed to create HTTP client: {err}")))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            access_token: access_token.into(),
        })
    }

    fn depositions_url(&self) -> String {
        format!("{}/api/deposit/depositions", self.base_url)
    }

    fn deposit_url(&self, deposit_id: u64) -> String {
        format!("{}/{deposit_id}", self.depositions_url())
    }

    fn token(&self) -> [(&'static str, &str); 1] {
        [("access_token", self.access_token.as_str())]
    }
}

impl DepositApi for ArchiveClient {
    fn create_draft(&self) -> Result<CreateResponse> {
        let response = self
            .http
            .post(self.depositions_url())
            .query(&self.token())
            .json(&serde_json::json!({}))
            .send()?;
        let status = response.status().as_u16();
        if !response.status().is_success() {
            return Ok(CreateResponse {
                status,
                draft: None,
            });
        }
        let body: Value = response.json()?;
        let deposit_id = body
            .get("id")
            .and_then(Value::as_u64)
            .ok_or(ArchiveError::MissingDepositField("id"))?;
        let bucket_url = body
            .pointer("/links/bucket")
            .and_then(Value::as_str)
            .ok_or(ArchiveError::MissingDepositField("links.bucket"))?
            .to_string();
        Ok(CreateResponse {
            status,
            draft: Some(DraftDeposit {
                deposit_id,
                bucket_url,
            }),
        })
    }

    fn put_metadata(&self, deposit_id: u64, payload: &DepositPayload) -> Result<u16> {
        let response = self
            .http
            .put(self.deposit_url(deposit_id))
            .query(&self.token())
            .json(payload)
            .send()?;
        Ok(response.status().as_u16())
    }

    fn upload_file(&self, bucket_url: &str, filename: &str, bytes: Vec<u8>) -> Result<u16> {
        let response = self
            .http
            .put(format!("{bucket_url}/{filename}"))
            .query(&self.token())
            .body(bytes)
            .send()?;
        Ok(response.status().as_u16())
    }

    fn delete_draft(&self, deposit_id: u64) -> Result<u16> {
        let response = self
            .http
            .delete(self.deposit_url(deposit_id))
            .query(&self.token())
            .send()?;
        Ok(response.status().as_u16())
    }

    fn publish_draft(&self, deposit_id: u64) -> Result<u16> {
        let response = self
            .http
            .post(format!("{}/actions/publish", self.deposit_url(deposit_id)))
            .query(&self.token())
            .send()?;
        Ok(response.status().as_u16())
    }

    fn fetch_doi(&self, deposit_id: u64) -> Result<Option<String>> {
        let response = self
            .http
            .get(self.deposit_url(deposit_id))
            .query(&self.token())
            .send()?;
        let status = response.status();
        if !status.is_success() {
            warn!(deposit_id, %status, "deposit fetch after publish failed");
            return Ok(None);
        }
        let body: Value = response.json()?;
        Ok(body
            .get("doi")
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    fn list_draft_ids(&self) -> Result<Vec<u64>> {
        let response = self
            .http
            .get(self.depositions_url())
            .query(&self.token())
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ArchiveError::Network(format!(
                "deposit listing answered {status}"
            )));
        }
        let body: Value = response.json()?;
        let listed = body
            .as_array()
            .ok_or(ArchiveError::MissingDepositField("depositions array"))?;
        Ok(listed
            .iter()
            .filter_map(|entry| entry.get("id").and_then(Value::as_u64))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depositor_is_scraped_from_citation_span() {
        let html = r#"
            <div><span class="ep_name_citation"><span>Jane Doe</span></span></div>
        "#;
        assert_eq!(extract_depositor(html), Some("Jane Doe".to_string()));
    }

    #[test]
    fn missing_citation_span_yields_none() {
        assert_eq!(extract_depositor("<html><body>nothing</body></html>"), None);
        let empty = r#"<span class="ep_name_citation"><span></span></span>"#;
        assert_eq!(extract_depositor(empty), None);
    }
}
