//! Configuration for the OpenAlex client and the fetch loop.

use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Base URL for the OpenAlex API.
    pub const BASE_URL: &str = "https://api.openalex.org";

    /// User agent sent with every request.
    pub const USER_AGENT: &str = concat!("planisphere/", env!("CARGO_PKG_VERSION"));

    /// Per-request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Fixed pause between successive page requests, in milliseconds.
    pub const PAGE_PAUSE_MS: u64 = 200;

    /// Fixed pause between successive page requests.
    pub const PAGE_PAUSE: Duration = Duration::from_millis(PAGE_PAUSE_MS);

    /// Largest `per-page` value the works endpoint accepts.
    pub const MAX_PER_PAGE: u32 = 200;

    /// Default page size.
    pub const DEFAULT_PER_PAGE: u32 = 200;

    /// Default page ceiling (at most 4000 works with the default page size).
    pub const DEFAULT_MAX_PAGES: u32 = 20;

    /// Cursor value requesting the first page.
    pub const FIRST_CURSOR: &str = "*";

    /// Number of countries shown in text output.
    pub const DISPLAY_TOP_N: usize = 50;
}

/// Client configuration.
#[derive(Clone)]
pub struct Config {
    /// Base URL of the API (overridable for mock servers).
    pub base_url: String,

    /// Contact e-mail for the OpenAlex polite pool (optional).
    pub mailto: Option<String>,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,
}

impl Config {
    /// Create a new configuration with an optional contact e-mail.
    #[must_use]
    pub fn new(mailto: Option<String>) -> Self {
        Self {
            base_url: api::BASE_URL.to_string(),
            mailto,
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
        }
    }

    /// Create a test configuration pointing at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            mailto: None,
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `OPENALEX_MAILTO` and `OPENALEX_BASE_URL`; blank values are ignored.
    pub fn from_env() -> anyhow::Result<Self> {
        let mailto = non_blank_var("OPENALEX_MAILTO");
        let mut config = Self::new(mailto);
        if let Some(base_url) = non_blank_var("OPENALEX_BASE_URL") {
            config = config.with_base_url(&base_url)?;
        }
        Ok(config)
    }

    /// Override the API base URL.
    ///
    /// # Errors
    ///
    /// Returns error if the URL does not parse.
    pub fn with_base_url(mut self, base_url: &str) -> anyhow::Result<Self> {
        url::Url::parse(base_url)?;
        self.base_url = base_url.trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Check if a contact e-mail is configured.
    #[must_use]
    pub const fn has_mailto(&self) -> bool {
        self.mailto.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("has_mailto", &self.has_mailto())
            .field("request_timeout", &self.request_timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

fn non_blank_var(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.base_url, api::BASE_URL);
        assert!(!config.has_mailto());
        assert_eq!(config.request_timeout, api::REQUEST_TIMEOUT);
    }

    #[test]
    fn test_for_testing_strips_trailing_slash() {
        let config = Config::for_testing("http://127.0.0.1:4000/");
        assert_eq!(config.base_url, "http://127.0.0.1:4000");
    }

    #[test]
    fn test_with_base_url_rejects_garbage() {
        assert!(Config::default().with_base_url("not a url").is_err());
        let config = Config::default().with_base_url("http://localhost:8080/").unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_default_page_ceiling() {
        assert_eq!(api::DEFAULT_PER_PAGE * api::DEFAULT_MAX_PAGES, 4000);
    }
}
