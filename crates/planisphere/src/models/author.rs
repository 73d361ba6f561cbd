//! Author data model matching the OpenAlex authors schema.

use serde::{Deserialize, Serialize};

use super::work::{Institution, PageMeta, lenient, lenient_or_default, lenient_vec};

/// An author record from `/authors` or `/authors/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Author {
    /// OpenAlex author URL.
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,

    /// Author name.
    #[serde(default, deserialize_with = "lenient")]
    pub display_name: Option<String>,

    /// ORCID URL.
    #[serde(default, deserialize_with = "lenient")]
    pub orcid: Option<String>,

    /// Number of works attributed to this author.
    #[serde(default, deserialize_with = "lenient")]
    pub works_count: Option<u64>,

    /// Total citation count.
    #[serde(default, deserialize_with = "lenient")]
    pub cited_by_count: Option<u64>,

    /// Most recent known affiliations.
    #[serde(default, deserialize_with = "lenient_vec")]
    pub last_known_institutions: Vec<Institution>,

    /// Citation indicators (single-author lookups only).
    #[serde(default, deserialize_with = "lenient")]
    pub summary_stats: Option<SummaryStats>,

    /// Affiliation history, most recent first.
    #[serde(default, deserialize_with = "lenient_vec")]
    pub affiliations: Vec<Affiliation>,

    /// Ready-made `/works` query for this author.
    #[serde(default, deserialize_with = "lenient")]
    pub works_api_url: Option<String>,
}

impl Author {
    /// Bare identifier (`A...`), stripped of the URL prefix.
    #[must_use]
    pub fn short_id(&self) -> Option<&str> {
        let id = self.id.as_deref()?.trim_end_matches('/');
        id.rsplit('/').next().filter(|s| !s.is_empty())
    }

    /// Get the author name, falling back to "Unknown".
    #[must_use]
    pub fn name_or_default(&self) -> &str {
        self.display_name.as_deref().unwrap_or("Unknown")
    }

    /// Works count or 0.
    #[must_use]
    pub fn works(&self) -> u64 {
        self.works_count.unwrap_or(0)
    }

    /// Citation count or 0.
    #[must_use]
    pub fn citations(&self) -> u64 {
        self.cited_by_count.unwrap_or(0)
    }

    /// The first last-known institution, else the most recent affiliation.
    #[must_use]
    pub fn primary_institution(&self) -> Option<&Institution> {
        self.last_known_institutions
            .first()
            .or_else(|| self.affiliations.iter().find_map(|a| a.institution.as_ref()))
    }
}

/// Citation indicators attached to an author.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryStats {
    /// h-index.
    #[serde(default, deserialize_with = "lenient")]
    pub h_index: Option<u32>,

    /// i10-index.
    #[serde(default, deserialize_with = "lenient")]
    pub i10_index: Option<u32>,

    /// Mean citations over the last two years.
    #[serde(rename = "2yr_mean_citedness", default, deserialize_with = "lenient")]
    pub two_year_mean_citedness: Option<f64>,
}

/// One entry of an author's affiliation history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Affiliation {
    /// The institution.
    #[serde(default, deserialize_with = "lenient")]
    pub institution: Option<Institution>,

    /// Years the author was affiliated, most recent first.
    #[serde(default, deserialize_with = "lenient_vec")]
    pub years: Vec<i32>,
}

/// Author search response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorSearchResult {
    /// Matching authors, best match first.
    #[serde(default, deserialize_with = "lenient_vec")]
    pub results: Vec<Author>,

    /// Paging metadata.
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub meta: PageMeta,
}

/// A type-ahead suggestion from `/autocomplete/authors`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorSuggestion {
    /// OpenAlex author URL.
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,

    /// Author name.
    #[serde(default, deserialize_with = "lenient")]
    pub display_name: Option<String>,

    /// Disambiguation hint (usually the last known institution).
    #[serde(default, deserialize_with = "lenient")]
    pub hint: Option<String>,

    /// Number of works attributed to this author.
    #[serde(default, deserialize_with = "lenient")]
    pub works_count: Option<u64>,

    /// Total citation count.
    #[serde(default, deserialize_with = "lenient")]
    pub cited_by_count: Option<u64>,
}

impl AuthorSuggestion {
    /// Bare identifier (`A...`), stripped of the URL prefix.
    #[must_use]
    pub fn short_id(&self) -> Option<&str> {
        let id = self.id.as_deref()?.trim_end_matches('/');
        id.rsplit('/').next().filter(|s| !s.is_empty())
    }
}

/// Autocomplete response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AutocompleteResult {
    /// Suggestions, best match first.
    #[serde(default, deserialize_with = "lenient_vec")]
    pub results: Vec<AuthorSuggestion>,
}
