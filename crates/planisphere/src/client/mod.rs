//! OpenAlex API client.
//!
//! Thin async wrapper over reqwest:
//! - one request at a time, no retries
//! - per-request and connect timeouts
//! - non-2xx statuses mapped onto [`ClientError`] variants

mod source;

pub use source::WorksSource;

use reqwest::Client;

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult, InputError};
use crate::models::{Author, AuthorId, AuthorSearchResult, AutocompleteResult, WorksPage};

/// OpenAlex API client.
#[derive(Clone)]
pub struct OpenAlexClient {
    /// HTTP client.
    client: Client,

    /// API base URL.
    base_url: String,

    /// Contact e-mail for the polite pool (optional).
    mailto: Option<String>,
}

impl OpenAlexClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(api::USER_AGENT)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .build()?;

        Ok(Self { client, base_url: config.base_url, mailto: config.mailto })
    }

    /// Check if a contact e-mail is configured.
    #[must_use]
    pub fn has_mailto(&self) -> bool {
        self.mailto.is_some()
    }

    /// Fetch one cursor page of works by an author.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-success status, or an
    /// undecodable body.
    pub async fn get_works_page(
        &self,
        author: &AuthorId,
        cursor: &str,
        per_page: u32,
    ) -> ClientResult<WorksPage> {
        let url = format!("{}/works", self.base_url);

        let params = vec![
            ("filter".to_string(), format!("author.id:{author}")),
            ("per-page".to_string(), per_page.to_string()),
            ("cursor".to_string(), cursor.to_string()),
        ];

        self.get(&url, params).await
    }

    /// Search authors by name.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn search_authors(&self, query: &str, per_page: u32) -> ClientResult<AuthorSearchResult> {
        let url = format!("{}/authors", self.base_url);

        let params = vec![
            ("search".to_string(), query.to_string()),
            ("per-page".to_string(), per_page.to_string()),
        ];

        self.get(&url, params).await
    }

    /// Search authors within a single field, e.g. `display_name`.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn search_authors_by_field(
        &self,
        field: &SearchField,
        query: &str,
        per_page: u32,
    ) -> ClientResult<AuthorSearchResult> {
        let url = format!("{}/authors", self.base_url);

        let params = vec![
            ("filter".to_string(), format!("{field}.search:{query}")),
            ("per-page".to_string(), per_page.to_string()),
        ];

        self.get(&url, params).await
    }

    /// Type-ahead author suggestions for a partial name.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn autocomplete_authors(&self, query: &str) -> ClientResult<AutocompleteResult> {
        let url = format!("{}/autocomplete/authors", self.base_url);
        self.get(&url, vec![("q".to_string(), query.to_string())]).await
    }

    /// Fetch a single author record.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] for unknown ids, or error on API failure.
    pub async fn get_author(&self, author: &AuthorId) -> ClientResult<Author> {
        let url = format!("{}/authors/{author}", self.base_url);
        self.get(&url, Vec::new()).await
    }

    /// Make a GET request and decode the JSON body.
    async fn get<T>(&self, url: &str, mut params: Vec<(String, String)>) -> ClientResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        if let Some(ref mailto) = self.mailto {
            params.push(("mailto".to_string(), mailto.clone()));
        }

        tracing::debug!(url, "GET");
        let response = self.client.get(url).query(&params).send().await?;

        let response = Self::handle_response(response).await?;
        let body = response.bytes().await?;

        serde_json::from_slice(&body).map_err(ClientError::from)
    }

    /// Handle API response status codes.
    async fn handle_response(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);

                Err(ClientError::rate_limited(retry_after))
            }
            404 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::not_found(text))
            }
            400 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::bad_request(text))
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::server(status.as_u16(), text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
            }
        }
    }
}

/// Name of an author field usable in a `<field>.search:` filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchField(String);

impl SearchField {
    /// Validate a field name: lowercase ASCII letters, digits, `_` and `.`.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidSearchField`] for anything else, which
    /// would otherwise corrupt the filter expression.
    pub fn parse(field: &str) -> Result<Self, InputError> {
        let field = field.trim();
        let valid = !field.is_empty()
            && field
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '.');

        if valid {
            Ok(Self(field.to_string()))
        } else {
            Err(InputError::InvalidSearchField { field: field.to_string() })
        }
    }
}

impl std::fmt::Display for SearchField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[async_trait::async_trait]
impl WorksSource for OpenAlexClient {
    async fn works_page(
        &self,
        author: &AuthorId,
        cursor: &str,
        per_page: u32,
    ) -> ClientResult<WorksPage> {
        self.get_works_page(author, cursor, per_page).await
    }
}

impl std::fmt::Debug for OpenAlexClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAlexClient")
            .field("base_url", &self.base_url)
            .field("has_mailto", &self.has_mailto())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_field_accepts_field_names() {
        assert_eq!(SearchField::parse(" display_name ").unwrap().to_string(), "display_name");
        assert!(SearchField::parse("display_name.alternatives").is_ok());
    }

    #[test]
    fn test_search_field_rejects_filter_syntax() {
        for bad in ["", "  ", "display_name:x", "a,b", "Display_Name", "a|b"] {
            assert!(
                matches!(SearchField::parse(bad), Err(InputError::InvalidSearchField { .. })),
                "{bad:?} should be rejected"
            );
        }
    }
}
