//! The page-source seam between the fetch loop and the HTTP transport.

use std::sync::Arc;

use crate::error::ClientResult;
use crate::models::{AuthorId, WorksPage};

/// Anything that can serve one cursor page of an author's works.
///
/// Implemented by [`super::OpenAlexClient`]; tests substitute scripted fakes.
#[async_trait::async_trait]
pub trait WorksSource: Send + Sync {
    /// Fetch the page at `cursor` of works filtered by `author.id`.
    async fn works_page(
        &self,
        author: &AuthorId,
        cursor: &str,
        per_page: u32,
    ) -> ClientResult<WorksPage>;
}

#[async_trait::async_trait]
impl<S: WorksSource + ?Sized> WorksSource for Arc<S> {
    async fn works_page(
        &self,
        author: &AuthorId,
        cursor: &str,
        per_page: u32,
    ) -> ClientResult<WorksPage> {
        (**self).works_page(author, cursor, per_page).await
    }
}
