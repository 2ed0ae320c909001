//! Name formatting and the creator/contributor field groups.

use docrelay_model::{Contributor, ContributorRole, Creator, NamedPerson, SourceRecord};

/// Format a personal name as `"family, first"`.
///
/// A part that is empty or the literal placeholder `"."` is dropped. If any
/// remaining part reads as `unknown` (case-insensitive prefix), the whole
/// name collapses to the literal `"Unknown"`.
pub fn format_name(first: &str, family: &str) -> String {
    let mut parts = Vec::new();
    if !family.is_empty() && family != "." {
        parts.push(family);
    }
    if !first.is_empty() && first != "." {
        parts.push(first);
    }
    if parts
        .iter()
        .any(|part| part.to_ascii_lowercase().starts_with("unknown"))
    {
        return "Unknown".to_string();
    }
    parts.join(", ")
}

fn person_name(person: &NamedPerson) -> String {
    format_name(&person.name.given, &person.name.family)
}

/// The archive's creators list.
pub fn creators(record: &SourceRecord) -> Vec<Creator> {
    record
        .creators
        .iter()
        .map(|person| Creator {
            name: person_name(person),
        })
        .collect()
}

/// The archive's contributors list, assembled from the five legacy source
/// groups, each with its fixed role tag.
pub fn contributors(record: &SourceRecord) -> Vec<Contributor> {
    let mut result = Vec::new();

    for person in &record.contributors {
        result.push(Contributor {
            name: person_name(person),
            role: ContributorRole::Other,
        });
    }
    for person in &record.editors {
        result.push(Contributor {
            name: person_name(person),
            role: ContributorRole::Editor,
        });
    }
    for name in &record.corp_creators {
        result.push(Contributor {
            name: name.clone(),
            role: ContributorRole::Other,
        });
    }
    for name in &record.copyright_holders {
        result.push(Contributor {
            name: name.clone(),
            role: ContributorRole::RightsHolder,
        });
    }
    if let Some(institution) = &record.institution {
        let name = match &record.department {
            Some(department) => format!("{department}, {institution}"),
            None => institution.clone(),
        };
        result.push(Contributor {
            name,
            role: ContributorRole::HostingInstitution,
        });
    }

    result
}
