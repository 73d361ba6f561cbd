//! Normalized OpenAlex author identifiers.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::InputError;

/// An author identifier reduced to its bare token (e.g. `A5023888391`).
///
/// Built from either the bare token or a full identifier URL such as
/// `https://openalex.org/A5023888391/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AuthorId(String);

impl AuthorId {
    /// Normalize a raw identifier.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::MissingAuthorId`] for blank input and
    /// [`InputError::InvalidAuthorId`] when no usable token remains.
    pub fn parse(raw: &str) -> Result<Self, InputError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InputError::MissingAuthorId);
        }

        let token = match url::Url::parse(trimmed) {
            Ok(parsed) if parsed.has_host() => parsed
                .path_segments()
                .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
                .unwrap_or_default()
                .to_string(),
            _ => trimmed.trim_end_matches('/').rsplit('/').next().unwrap_or_default().to_string(),
        };

        if token.is_empty() || !token.chars().all(is_id_char) {
            return Err(InputError::InvalidAuthorId { input: raw.to_string() });
        }

        Ok(Self(token))
    }

    /// The bare token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether an authorship's author id refers to this author.
    ///
    /// Accepts the bare token itself or anything ending in `/<token>`.
    #[must_use]
    pub fn matches(&self, raw: &str) -> bool {
        if raw.is_empty() {
            return false;
        }
        raw == self.0
            || raw.strip_suffix(self.0.as_str()).is_some_and(|prefix| prefix.ends_with('/'))
    }
}

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

impl FromStr for AuthorId {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AuthorId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
