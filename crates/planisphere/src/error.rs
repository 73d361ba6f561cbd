//! Error types for the planisphere pipeline.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.
//! Aggregation has no error type: malformed records degrade to "no signal".

use std::time::Duration;

/// Errors from the HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Rate limited by the OpenAlex API (429 response)
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry
        retry_after: Duration,
    },

    /// Resource not found (404 response)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Invalid request parameters (400 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from API
        message: String,
    },

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl ClientError {
    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after: Duration::from_secs(seconds) }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// HTTP status code carried by this error, if the server answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RateLimited { .. } => Some(429),
            Self::NotFound { .. } => Some(404),
            Self::BadRequest { .. } => Some(400),
            Self::Server { status, .. } | Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Http(_) | Self::Parse(_) => None,
        }
    }

    /// Returns true for failures of the HTTP exchange itself (transport or
    /// non-success status), as opposed to an undecodable body.
    #[must_use]
    pub const fn is_http(&self) -> bool {
        !matches!(self, Self::Parse(_))
    }
}

/// Malformed or missing author identifier, detected before any network call.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// No identifier was given (empty or whitespace only)
    #[error("Missing author id")]
    MissingAuthorId,

    /// Identifier could not be reduced to a usable id
    #[error("Invalid author id: {input:?}")]
    InvalidAuthorId {
        /// The raw input as given
        input: String,
    },

    /// Author search was given a blank query
    #[error("Search query cannot be empty")]
    EmptyQuery,

    /// Field search named something that is not a field
    #[error("Invalid search field: {field:?}")]
    InvalidSearchField {
        /// The field as given
        field: String,
    },
}

/// A page request failed during pagination. The whole fetch is aborted.
#[derive(thiserror::Error, Debug)]
#[error("Failed to fetch page {page}: {source}")]
pub struct FetchError {
    /// Zero-based index of the failing page
    pub page: u32,
    /// Underlying client failure
    #[source]
    pub source: ClientError,
}

impl FetchError {
    /// Wrap a client error with the index of the page that failed.
    #[must_use]
    pub const fn new(page: u32, source: ClientError) -> Self {
        Self { page, source }
    }
}

/// Errors surfaced at the command-line boundary.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Bad author identifier or search query
    #[error("Invalid input: {0}")]
    Input(#[from] InputError),

    /// Pagination aborted
    #[error("{0}")]
    Fetch(#[from] FetchError),

    /// Single-request command failed
    #[error("{0}")]
    Client(#[from] ClientError),

    /// Anything else (client construction, serialization, I/O)
    #[error("Error: {0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Process exit code: 1 invalid input, 2 HTTP failure, 3 anything else.
    ///
    /// "HTTP failure" covers transport errors (connect, TLS, timeout) as well
    /// as non-success statuses; only an undecodable body falls through to 3.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Input(_) => 1,
            Self::Fetch(FetchError { source, .. }) | Self::Client(source) if source.is_http() => 2,
            _ => 3,
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_status() {
        assert_eq!(ClientError::rate_limited(60).status(), Some(429));
        assert_eq!(ClientError::not_found("works").status(), Some(404));
        assert_eq!(ClientError::server(503, "down").status(), Some(503));
    }

    #[test]
    fn test_fetch_error_keeps_page_index() {
        let err = FetchError::new(3, ClientError::server(502, "bad gateway"));
        assert_eq!(err.page, 3);
        assert!(err.to_string().contains("page 3"));
        assert!(err.to_string().contains("502"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(AppError::from(InputError::MissingAuthorId).exit_code(), 1);

        let http = FetchError::new(0, ClientError::server(500, "boom"));
        assert_eq!(AppError::from(http).exit_code(), 2);

        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let decode = FetchError::new(1, ClientError::from(parse));
        assert_eq!(AppError::from(decode).exit_code(), 3);

        assert_eq!(AppError::from(anyhow::anyhow!("other")).exit_code(), 3);
    }
}
