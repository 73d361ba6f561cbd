//! Cursor-paginated retrieval of every work by one author.
//!
//! Pages are requested strictly in sequence since each request needs the
//! cursor returned by the previous one.

use std::time::Duration;

use crate::client::WorksSource;
use crate::config::api;
use crate::error::FetchError;
use crate::models::{AuthorId, Work};

/// Knobs for one fetch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Page size, clamped to `1..=200`.
    pub per_page: u32,
    /// Hard ceiling on the number of page requests.
    pub max_pages: u32,
    /// Pause between successive page requests.
    pub pause: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            per_page: api::DEFAULT_PER_PAGE,
            max_pages: api::DEFAULT_MAX_PAGES,
            pause: api::PAGE_PAUSE,
        }
    }
}

impl FetchOptions {
    /// Page size actually sent to the API.
    #[must_use]
    pub fn effective_per_page(&self) -> u32 {
        self.per_page.clamp(1, api::MAX_PER_PAGE)
    }
}

/// Pulls all pages of an author's works from a [`WorksSource`].
#[derive(Debug, Clone)]
pub struct WorkFetcher<S> {
    source: S,
}

impl<S: WorksSource> WorkFetcher<S> {
    /// Wrap a page source.
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Fetch every work attributed to `author`, up to `options.max_pages` pages.
    ///
    /// Stops when the API returns no next cursor, when a page comes back
    /// empty, or when the page ceiling is reached. Pages are concatenated in
    /// arrival order without deduplication.
    ///
    /// # Errors
    ///
    /// The first failing page aborts the run with a [`FetchError`] carrying
    /// its zero-based index; works gathered so far are dropped.
    pub async fn fetch_all_works(
        &self,
        author: &AuthorId,
        options: FetchOptions,
    ) -> Result<Vec<Work>, FetchError> {
        let per_page = options.effective_per_page();
        let mut works = Vec::new();
        let mut cursor = Some(api::FIRST_CURSOR.to_string());
        let mut page = 0;

        while let Some(current) = cursor.take() {
            if page >= options.max_pages {
                tracing::info!(
                    max_pages = options.max_pages,
                    fetched = works.len(),
                    "Page ceiling reached with more results available"
                );
                break;
            }

            if page > 0 && !options.pause.is_zero() {
                tokio::time::sleep(options.pause).await;
            }

            let result = self
                .source
                .works_page(author, &current, per_page)
                .await
                .map_err(|source| FetchError::new(page, source))?;
            page += 1;

            if result.results.is_empty() {
                tracing::debug!(page, "Empty page, stopping");
                break;
            }

            works.extend(result.results);
            cursor = result.meta.next_cursor().map(str::to_string);

            tracing::debug!(
                page,
                fetched = works.len(),
                total = ?result.meta.count,
                has_next = cursor.is_some(),
                "Fetched page"
            );
        }

        tracing::info!(author = %author, pages = page, works = works.len(), "Fetch complete");
        Ok(works)
    }
}
