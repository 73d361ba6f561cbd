//! JSON output formatting.

use serde_json::{Value, json};

use crate::countries::AggregationResult;
use crate::models::{Author, AuthorId, AuthorSuggestion};

/// The machine-readable country report.
///
/// `co_countries` is the complete coauthor tally, never truncated.
#[must_use]
pub fn country_report(author: &AuthorId, result: &AggregationResult) -> Value {
    json!({
        "author_id": author,
        "anchor_iso": result.anchor_or_empty(),
        "co_countries": result.coauthor_tally,
    })
}

/// Create a compact author representation for JSON output.
#[must_use]
pub fn compact_author(author: &Author) -> Value {
    let mut obj = json!({
        "id": author.short_id(),
        "name": author.name_or_default(),
        "works": author.works(),
        "citations": author.citations(),
    });

    if let Some(inst) = author.primary_institution() {
        obj["institution"] = json!(inst.display_name);
        if let Some(country) = inst.country() {
            obj["country"] = json!(country);
        }
    }

    if let Some(orcid) = &author.orcid {
        obj["orcid"] = json!(orcid);
    }

    obj
}

/// Author search candidates as a JSON array.
#[must_use]
pub fn author_candidates(authors: &[Author]) -> Value {
    Value::Array(authors.iter().map(compact_author).collect())
}

/// Autocomplete suggestions as a JSON array.
#[must_use]
pub fn suggestions(found: &[AuthorSuggestion]) -> Value {
    found
        .iter()
        .map(|s| {
            json!({
                "id": s.short_id(),
                "name": s.display_name.as_deref().unwrap_or("Unknown"),
                "hint": s.hint,
                "works": s.works_count.unwrap_or(0),
                "citations": s.cited_by_count.unwrap_or(0),
            })
        })
        .collect()
}

/// Full author profile: the compact fields plus indicators and affiliations.
#[must_use]
pub fn author_detail(author: &Author) -> Value {
    let mut obj = compact_author(author);

    if let Some(stats) = &author.summary_stats {
        obj["h_index"] = json!(stats.h_index);
        obj["i10_index"] = json!(stats.i10_index);
        obj["two_year_mean_citedness"] = json!(stats.two_year_mean_citedness);
    }

    obj["affiliations"] = author
        .affiliations
        .iter()
        .filter_map(|a| a.institution.as_ref())
        .map(|inst| json!({"name": inst.display_name, "country": inst.country()}))
        .collect();

    if let Some(url) = &author.works_api_url {
        obj["works_api_url"] = json!(url);
    }

    obj
}
