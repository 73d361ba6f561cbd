//! Plain-text output formatting.

use crate::config::api;
use crate::countries::AggregationResult;
use crate::models::{Author, AuthorId, AuthorSuggestion};

/// Format the country report for a terminal.
///
/// Lists at most [`api::DISPLAY_TOP_N`] coauthor countries.
#[must_use]
pub fn format_country_report(author: &AuthorId, result: &AggregationResult) -> String {
    let mut output = String::from("=== Frequentist Coauthor-by-Country ===\n");

    output.push_str(&format!("Author: {author}\n"));
    output.push_str(&format!(
        "Anchor country (mode): {}\n",
        result.anchor.as_deref().unwrap_or("N/A")
    ));
    output.push_str(&format!(
        "Works counted: {} of {}\n",
        result.works_counted, result.works_seen
    ));

    if result.coauthor_tally.is_empty() {
        output.push_str("Top coauthor countries: none\n");
        return output;
    }

    output.push_str("Top coauthor countries:\n");
    for (code, count) in result.coauthor_tally.top(api::DISPLAY_TOP_N) {
        output.push_str(&format!("  {code}: {count}\n"));
    }

    let hidden = result.coauthor_tally.len().saturating_sub(api::DISPLAY_TOP_N);
    if hidden > 0 {
        output.push_str(&format!("  ... and {hidden} more\n"));
    }

    output
}

/// Format author search candidates, one block per author.
#[must_use]
pub fn format_author_candidates(query: &str, authors: &[Author]) -> String {
    if authors.is_empty() {
        return format!("No authors found for '{query}'.\n");
    }

    let mut output = format!("=== Authors matching '{query}' ===\n");

    for (i, author) in authors.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", i + 1, author.name_or_default()));
        output.push_str(&format!("   ID: {}\n", author.short_id().unwrap_or("N/A")));
        output.push_str(&format!(
            "   Works: {} | Citations: {}\n",
            author.works(),
            author.citations()
        ));

        if let Some(inst) = author.primary_institution() {
            let name = inst.display_name.as_deref().unwrap_or("Unknown");
            match inst.country() {
                Some(country) => output.push_str(&format!("   Institution: {name} ({country})\n")),
                None => output.push_str(&format!("   Institution: {name}\n")),
            }
        }

        if let Some(orcid) = &author.orcid {
            output.push_str(&format!("   ORCID: {orcid}\n"));
        }
    }

    output
}

/// Format autocomplete suggestions.
#[must_use]
pub fn format_suggestions(query: &str, found: &[AuthorSuggestion]) -> String {
    if found.is_empty() {
        return format!("No suggestions for '{query}'.\n");
    }

    let mut output = format!("=== Suggestions for '{query}' ===\n");

    for (i, s) in found.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", i + 1, s.display_name.as_deref().unwrap_or("Unknown")));
        output.push_str(&format!("   ID: {}\n", s.short_id().unwrap_or("N/A")));
        output.push_str(&format!("   Hint: {}\n", s.hint.as_deref().unwrap_or("N/A")));
        output.push_str(&format!(
            "   Works: {} | Citations: {}\n",
            s.works_count.unwrap_or(0),
            s.cited_by_count.unwrap_or(0)
        ));
    }

    output
}

/// Format a single author profile.
///
/// Shows at most three affiliations.
#[must_use]
pub fn format_author_detail(author: &Author) -> String {
    let mut output = format!("=== {} ===\n", author.name_or_default());

    output.push_str(&format!("ID: {}\n", author.short_id().unwrap_or("N/A")));
    output.push_str(&format!("Works: {} | Citations: {}\n", author.works(), author.citations()));

    let stats = author.summary_stats.clone().unwrap_or_default();
    let or_na = |v: Option<String>| v.unwrap_or_else(|| "N/A".to_string());
    output.push_str(&format!("H-index: {}\n", or_na(stats.h_index.map(|v| v.to_string()))));
    output.push_str(&format!("i10-index: {}\n", or_na(stats.i10_index.map(|v| v.to_string()))));
    output.push_str(&format!(
        "2-year mean citedness: {}\n",
        or_na(stats.two_year_mean_citedness.map(|v| format!("{v:.2}")))
    ));

    let institutions: Vec<_> =
        author.affiliations.iter().filter_map(|a| a.institution.as_ref()).take(3).collect();
    if !institutions.is_empty() {
        output.push_str("Affiliations:\n");
        for (i, inst) in institutions.iter().enumerate() {
            let name = inst.display_name.as_deref().unwrap_or("Unknown Institution");
            match inst.country() {
                Some(country) => output.push_str(&format!("  {}. {name} ({country})\n", i + 1)),
                None => output.push_str(&format!("  {}. {name}\n", i + 1)),
            }
        }
    }

    if let Some(orcid) = &author.orcid {
        output.push_str(&format!("ORCID: {orcid}\n"));
    }

    if let Some(url) = &author.works_api_url {
        output.push_str(&format!("Works API: {url}\n"));
    }

    output
}
