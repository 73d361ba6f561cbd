//! Country aggregation over an author's works.
//!
//! Each work casts at most one vote per country for the target author's own
//! affiliations (the anchor signal) and at most one vote per country for its
//! coauthors. The anchor country is the mode of the anchor votes.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::models::{AuthorId, Work};

/// Country code -> number of works in which it appeared.
///
/// Keys are uppercase ISO codes kept in sorted order, so iteration and JSON
/// output are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CountryTally(BTreeMap<String, u32>);

impl CountryTally {
    /// Create an empty tally.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one occurrence of `code`.
    pub fn increment(&mut self, code: &str) {
        *self.0.entry(code.to_string()).or_insert(0) += 1;
    }

    /// Count for `code`, 0 if never seen.
    #[must_use]
    pub fn get(&self, code: &str) -> u32 {
        self.0.get(code).copied().unwrap_or(0)
    }

    /// Number of distinct countries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no country was counted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(code, count)` in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(code, count)| (code.as_str(), *count))
    }

    /// The most frequent code; ties go to the lexicographically smallest code.
    #[must_use]
    pub fn mode(&self) -> Option<&str> {
        let mut best: Option<(&str, u32)> = None;
        for (code, count) in self.iter() {
            // Ascending iteration plus strict `>` keeps the smallest tied code.
            if best.is_none_or(|(_, max)| count > max) {
                best = Some((code, count));
            }
        }
        best.map(|(code, _)| code)
    }

    /// All entries by descending count, ties by ascending code.
    #[must_use]
    pub fn ranked(&self) -> Vec<(&str, u32)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// The first `n` entries of [`Self::ranked`]. For display only.
    #[must_use]
    pub fn top(&self, n: usize) -> Vec<(&str, u32)> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for CountryTally {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(code, count)| (code.into(), count)).collect())
    }
}

/// Outcome of one aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregationResult {
    /// Mode of the anchor tally, `None` when no work carried an anchor country.
    pub anchor: Option<String>,
    /// Works per country for the target author's own institutions.
    pub anchor_tally: CountryTally,
    /// Works per country with at least one coauthor affiliated there.
    pub coauthor_tally: CountryTally,
    /// Works examined.
    pub works_seen: usize,
    /// Works that contributed to the tallies.
    pub works_counted: usize,
}

impl AggregationResult {
    /// Anchor code, or `""` when undetermined.
    #[must_use]
    pub fn anchor_or_empty(&self) -> &str {
        self.anchor.as_deref().unwrap_or_default()
    }
}

/// Reduce `works` into anchor and coauthor country tallies for `author`.
///
/// A work is skipped when the author has no authorship in it or none of the
/// author's institutions has a country. Never fails.
#[must_use]
pub fn aggregate(author: &AuthorId, works: &[Work]) -> AggregationResult {
    let mut anchor_tally = CountryTally::new();
    let mut coauthor_tally = CountryTally::new();
    let mut works_counted = 0;

    for work in works {
        let Some(anchor_authorship) = work.find_authorship(|id| author.matches(id)) else {
            continue;
        };

        let anchor_set: BTreeSet<String> = anchor_authorship.countries().collect();
        if anchor_set.is_empty() {
            continue;
        }

        let coauthor_set: BTreeSet<String> = work
            .authorships
            .iter()
            .filter(|a| a.author_id().is_some_and(|id| !author.matches(id)))
            .flat_map(|a| a.countries())
            .collect();

        for code in &anchor_set {
            anchor_tally.increment(code);
        }
        for code in &coauthor_set {
            coauthor_tally.increment(code);
        }
        works_counted += 1;
    }

    tracing::debug!(
        works = works.len(),
        counted = works_counted,
        anchor_countries = anchor_tally.len(),
        coauthor_countries = coauthor_tally.len(),
        "Aggregated countries"
    );

    AggregationResult {
        anchor: anchor_tally.mode().map(str::to_string),
        anchor_tally,
        coauthor_tally,
        works_seen: works.len(),
        works_counted,
    }
}
