//! Pagination tests against a mocked OpenAlex works endpoint.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use planisphere::{AuthorId, ClientError, Config, FetchOptions, OpenAlexClient, WorkFetcher};

fn setup_fetcher(mock_server: &MockServer) -> WorkFetcher<OpenAlexClient> {
    let config = Config::for_testing(&mock_server.uri());
    WorkFetcher::new(OpenAlexClient::new(config).unwrap())
}

fn fast_options(max_pages: u32) -> FetchOptions {
    FetchOptions { per_page: 200, max_pages, pause: Duration::ZERO }
}

fn author() -> AuthorId {
    AuthorId::parse("A1").unwrap()
}

/// Minimal work JSON with a single authorship.
fn sample_work(id: &str) -> serde_json::Value {
    json!({
        "id": format!("https://openalex.org/{id}"),
        "display_name": format!("Work {id}"),
        "authorships": [{
            "author": {"id": "https://openalex.org/A1"},
            "institutions": [{"country_code": "US"}]
        }]
    })
}

fn works_page(works: Vec<serde_json::Value>, next_cursor: Option<&str>) -> serde_json::Value {
    json!({
        "meta": {"count": works.len(), "next_cursor": next_cursor},
        "results": works
    })
}

// =============================================================================
// Cursor Following
// =============================================================================

#[tokio::test]
async fn test_follows_cursor_chain() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .and(query_param("cursor", "*"))
        .and(query_param("filter", "author.id:A1"))
        .and(query_param("per-page", "200"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(works_page(vec![sample_work("W1"), sample_work("W2")], Some("abc"))),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .and(query_param("cursor", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(works_page(vec![sample_work("W3")], None)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let works = setup_fetcher(&mock_server).fetch_all_works(&author(), fast_options(20)).await.unwrap();

    let ids: Vec<_> = works.iter().filter_map(|w| w.id.as_deref()).collect();
    assert_eq!(
        ids,
        vec!["https://openalex.org/W1", "https://openalex.org/W2", "https://openalex.org/W3"]
    );
}

#[tokio::test]
async fn test_stops_at_max_pages_with_cursor_remaining() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(works_page(vec![sample_work("W1")], Some("more"))),
        )
        .expect(3)
        .mount(&mock_server)
        .await;

    let works = setup_fetcher(&mock_server).fetch_all_works(&author(), fast_options(3)).await.unwrap();

    // No dedup: the same record served three times is kept three times.
    assert_eq!(works.len(), 3);
}

#[tokio::test]
async fn test_empty_page_ends_fetch_before_ceiling() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .and(query_param("cursor", "*"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(works_page(vec![sample_work("W1")], Some("p2"))),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .and(query_param("cursor", "p2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(works_page(vec![], Some("p3"))))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .and(query_param("cursor", "p3"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(works_page(vec![sample_work("W9")], None)),
        )
        .expect(0)
        .mount(&mock_server)
        .await;

    let works = setup_fetcher(&mock_server).fetch_all_works(&author(), fast_options(20)).await.unwrap();
    assert_eq!(works.len(), 1);
}

#[tokio::test]
async fn test_missing_meta_is_last_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": [sample_work("W1")]})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let works = setup_fetcher(&mock_server).fetch_all_works(&author(), fast_options(20)).await.unwrap();
    assert_eq!(works.len(), 1);
}

#[tokio::test]
async fn test_per_page_is_clamped_to_api_maximum() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .and(query_param("per-page", "200"))
        .respond_with(ResponseTemplate::new(200).set_body_json(works_page(vec![], None)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let options = FetchOptions { per_page: 5000, ..fast_options(20) };
    let works = setup_fetcher(&mock_server).fetch_all_works(&author(), options).await.unwrap();
    assert!(works.is_empty());
}

#[tokio::test]
async fn test_mailto_sent_when_configured() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .and(query_param("mailto", "team@example.org"))
        .respond_with(ResponseTemplate::new(200).set_body_json(works_page(vec![], None)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = Config {
        mailto: Some("team@example.org".to_string()),
        ..Config::for_testing(&mock_server.uri())
    };
    let fetcher = WorkFetcher::new(OpenAlexClient::new(config).unwrap());

    assert!(fetcher.fetch_all_works(&author(), fast_options(1)).await.is_ok());
}

// =============================================================================
// Failure Propagation
// =============================================================================

#[tokio::test]
async fn test_server_error_aborts_with_page_index() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .and(query_param("cursor", "*"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(works_page(vec![sample_work("W1")], Some("p2"))),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .and(query_param("cursor", "p2"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let err =
        setup_fetcher(&mock_server).fetch_all_works(&author(), fast_options(20)).await.unwrap_err();

    assert_eq!(err.page, 1);
    assert!(matches!(err.source, ClientError::Server { status: 503, .. }));
    assert!(err.to_string().contains("maintenance"));
}

#[tokio::test]
async fn test_rate_limit_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err =
        setup_fetcher(&mock_server).fetch_all_works(&author(), fast_options(20)).await.unwrap_err();

    assert_eq!(err.page, 0);
    assert!(matches!(
        err.source,
        ClientError::RateLimited { retry_after } if retry_after == Duration::from_secs(7)
    ));
}

#[tokio::test]
async fn test_bad_request_maps_to_client_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid filter"))
        .mount(&mock_server)
        .await;

    let err =
        setup_fetcher(&mock_server).fetch_all_works(&author(), fast_options(20)).await.unwrap_err();

    assert!(matches!(err.source, ClientError::BadRequest { ref message } if message == "invalid filter"));
}

#[tokio::test]
async fn test_undecodable_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let err =
        setup_fetcher(&mock_server).fetch_all_works(&author(), fast_options(20)).await.unwrap_err();

    assert!(matches!(err.source, ClientError::Parse(_)));
    assert!(!err.source.is_http());
}

#[tokio::test]
async fn test_malformed_records_do_not_fail_the_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"next_cursor": null},
            "results": [sample_work("W1"), 17, {"authorships": "nope"}]
        })))
        .mount(&mock_server)
        .await;

    let works = setup_fetcher(&mock_server).fetch_all_works(&author(), fast_options(20)).await.unwrap();

    assert_eq!(works.len(), 3);
    assert_eq!(works[0].authorships.len(), 1);
    assert!(works[1].authorships.is_empty());
    assert!(works[2].authorships.is_empty());
}

#[tokio::test]
async fn test_mistyped_meta_count_does_not_abort_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .and(query_param("cursor", "*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"count": -1, "next_cursor": "p2"},
            "results": [sample_work("W1")]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .and(query_param("cursor", "p2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"count": "lots", "next_cursor": 99},
            "results": [sample_work("W2")]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let works = setup_fetcher(&mock_server).fetch_all_works(&author(), fast_options(20)).await.unwrap();

    // A non-string cursor reads as absent, so paging ends after page two.
    assert_eq!(works.len(), 2);
}
