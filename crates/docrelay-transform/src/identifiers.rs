//! Related identifiers and URL remediation.

use docrelay_model::{RelatedIdentifier, Relation, SourceRecord};
use docrelay_tables::{DoiMap, UrlFixTable};
use tracing::warn;

use crate::LinkProbe;
use crate::error::TransformWarning;

/// Build the record's related-identifier list. Remediation failures drop
/// only the affected entry and push a warning.
pub fn related_identifiers(
    record: &SourceRecord,
    doi_map: &DoiMap,
    url_fixes: &UrlFixTable,
    probe: &dyn LinkProbe,
    warnings: &mut Vec<TransformWarning>,
) -> Vec<RelatedIdentifier> {
    let mut result = Vec::new();

    if let Some(id_number) = &record.id_number {
        if id_number.starts_with("ISBN") {
            if let Some(isbn) = id_number.get(5..).filter(|rest| !rest.is_empty()) {
                result.push(RelatedIdentifier {
                    identifier: isbn.to_string(),
                    relation: Relation::IsAlternateIdentifier,
                });
            }
        }
    }

    if let Some(issn) = &record.issn {
        result.push(RelatedIdentifier {
            identifier: issn.clone(),
            relation: Relation::IsAlternateIdentifier,
        });
    }

    if let Some(url) = &record.official_url {
        match remediate_url(url, url_fixes, probe) {
            Some(remediated) => result.push(RelatedIdentifier {
                identifier: remediated,
                relation: Relation::IsSupplementedBy,
            }),
            None => {
                warn!(legacy_id = record.legacy_id, url = %url, "no live alternative for official url");
                warnings.push(TransformWarning::UnresolvableUrl { url: url.clone() });
            }
        }
    }

    if let Some(predecessor) = record.succeeds {
        if let Some(doi) = doi_map.get(predecessor) {
            result.push(RelatedIdentifier {
                identifier: doi.to_string(),
                relation: Relation::IsNewVersionOf,
            });
        }
    }

    result
}

/// Replace a stale legacy URL with a known-good alternative.
///
/// Precedence: a `Correct` table verdict keeps the URL; otherwise the
/// curated suggestion, then the recorded redirect target; as a last resort
/// the URL is truncated to its base and kept only if a liveness probe
/// answers with success. `None` means no live alternative exists.
pub fn remediate_url(url: &str, fixes: &UrlFixTable, probe: &dyn LinkProbe) -> Option<String> {
    if let Some(fix) = fixes.get(url) {
        if fix.is_correct() {
            return Some(url.to_string());
        }
        if !fix.suggested.is_empty() {
            return Some(fix.suggested.clone());
        }
        if !fix.redirected.is_empty() {
            return Some(fix.redirected.clone());
        }
    }
    let base = base_url(url)?;
    probe.is_live(&base).then_some(base)
}

/// Truncate a URL at its third `/`, leaving `scheme://authority`.
fn base_url(url: &str) -> Option<String> {
    let (index, _) = url.char_indices().filter(|(_, ch)| *ch == '/').nth(2)?;
    Some(url[..index].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_stops_at_third_slash() {
        assert_eq!(
            base_url("http://data.example.org/archive/file.dat"),
            Some("http://data.example.org".to_string())
        );
        assert_eq!(base_url("no slashes here"), None);
    }
}
