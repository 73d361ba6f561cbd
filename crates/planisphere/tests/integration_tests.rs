//! Integration tests against the live OpenAlex API.
//!
//! Run with: `cargo test --features integration -- --nocapture`

#![cfg(feature = "integration")]

use std::time::Duration;

use planisphere::{AuthorId, Config, FetchOptions, OpenAlexClient, WorkFetcher, aggregate};

/// Jason Priem, a small and stable author profile.
const PRIEM: &str = "https://openalex.org/A5023888391";

fn create_client() -> OpenAlexClient {
    OpenAlexClient::new(Config::from_env().expect("config")).expect("Failed to create client")
}

#[tokio::test]
async fn test_fetch_and_aggregate_live() {
    let author = AuthorId::parse(PRIEM).unwrap();
    let options = FetchOptions { per_page: 50, max_pages: 2, pause: Duration::from_millis(200) };

    let works = WorkFetcher::new(create_client()).fetch_all_works(&author, options).await.unwrap();
    assert!(!works.is_empty());
    assert!(works.len() <= 100);

    let result = aggregate(&author, &works);
    println!("anchor={:?} coauthors={:?}", result.anchor, result.coauthor_tally.top(10));
    assert!(result.works_counted <= works.len());
}

#[tokio::test]
async fn test_search_authors_live() {
    let found = create_client().search_authors("Jason Priem", 5).await.unwrap();
    assert!(!found.results.is_empty());
    assert!(found.results.iter().all(|a| a.short_id().is_some()));
}
