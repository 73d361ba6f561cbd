//! Work data model matching the OpenAlex works schema.
//!
//! Every field is optional and decoded on its own: `null` or a value of the
//! wrong type reads as absent, and list entries that fail to decode fall back
//! to their empty default. An odd value in one field never hides the rest of
//! the record, and a single odd record never sinks a page.

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};

/// A scholarly work returned by `/works`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Work {
    /// OpenAlex work URL (`https://openalex.org/W...`).
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,

    /// Work title.
    #[serde(default, deserialize_with = "lenient")]
    pub display_name: Option<String>,

    /// Publication year.
    #[serde(default, deserialize_with = "lenient")]
    pub publication_year: Option<i32>,

    /// Authorships in byline order.
    #[serde(default, deserialize_with = "lenient_vec")]
    pub authorships: Vec<Authorship>,
}

impl Work {
    /// Find the first authorship whose author id satisfies `is_target`.
    pub fn find_authorship(&self, mut is_target: impl FnMut(&str) -> bool) -> Option<&Authorship> {
        self.authorships.iter().find(|a| a.author_id().is_some_and(&mut is_target))
    }
}

/// One author's contribution to a work.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Authorship {
    /// The author, as a dehydrated reference.
    #[serde(default, deserialize_with = "lenient")]
    pub author: Option<DehydratedAuthor>,

    /// Institutions listed for this authorship.
    #[serde(default, deserialize_with = "lenient_vec")]
    pub institutions: Vec<Institution>,
}

impl Authorship {
    /// The author id, if present and non-empty.
    #[must_use]
    pub fn author_id(&self) -> Option<&str> {
        self.author.as_ref()?.id.as_deref().filter(|id| !id.is_empty())
    }

    /// Normalized country codes of all institutions, duplicates included.
    pub fn countries(&self) -> impl Iterator<Item = String> + '_ {
        self.institutions.iter().filter_map(Institution::country)
    }
}

/// Minimal author reference embedded in an authorship.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DehydratedAuthor {
    /// OpenAlex author URL.
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,

    /// Author name.
    #[serde(default, deserialize_with = "lenient")]
    pub display_name: Option<String>,
}

/// An institution affiliation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Institution {
    /// OpenAlex institution URL.
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,

    /// Institution name.
    #[serde(default, deserialize_with = "lenient")]
    pub display_name: Option<String>,

    /// ISO 3166-1 alpha-2 country code, any case.
    #[serde(default, deserialize_with = "lenient")]
    pub country_code: Option<String>,
}

impl Institution {
    /// Country code trimmed and uppercased, `None` when absent or blank.
    #[must_use]
    pub fn country(&self) -> Option<String> {
        let code = self.country_code.as_deref()?.trim();
        (!code.is_empty()).then(|| code.to_ascii_uppercase())
    }
}

/// One page of a cursor-paginated list response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorksPage {
    /// Works on this page.
    #[serde(default, deserialize_with = "lenient_vec")]
    pub results: Vec<Work>,

    /// Paging metadata.
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub meta: PageMeta,
}

/// Paging metadata shared by OpenAlex list endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageMeta {
    /// Total number of matching records.
    #[serde(default, deserialize_with = "lenient")]
    pub count: Option<u64>,

    /// Cursor for the next page; absent on the last page.
    #[serde(default, deserialize_with = "lenient")]
    pub next_cursor: Option<String>,
}

impl PageMeta {
    /// The next cursor, treating an empty string as "no more pages".
    #[must_use]
    pub fn next_cursor(&self) -> Option<&str> {
        self.next_cursor.as_deref().filter(|c| !c.is_empty())
    }
}

/// Read an optional value, treating `null` and mistyped values as absent.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value)
        .inspect_err(|err| tracing::debug!(error = %err, "Ignoring mistyped field"))
        .ok())
}

/// Read a value, treating `null` and mistyped values as the type's default.
pub(crate) fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

/// Read a list whose entries may individually be malformed.
///
/// `null` or a non-list value yields an empty list; entries that fail to
/// decode become `T::default()`.
pub(crate) fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .map(|item| {
            serde_json::from_value(item).unwrap_or_else(|err| {
                tracing::debug!(error = %err, "Skipping malformed record");
                T::default()
            })
        })
        .collect())
}
