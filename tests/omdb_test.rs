//! OMDb client tests
//!
//! Runs the client against a mockito server: page fan-out, ordering,
//! truncation and per-page failure handling.

use cinefav::api::{OmdbClient, MAX_LIMIT};
use mockito::{Matcher, Server, ServerGuard};

fn page_body(prefix: &str, page: usize, count: usize) -> String {
    let items: Vec<String> = (0..count)
        .map(|i| {
            format!(
                r#"{{"Title":"{prefix} {page}-{i}","Year":"20{i:02}","imdbID":"tt{page}{i:06}","Type":"movie","Poster":"https://img.example/{page}-{i}.jpg"}}"#
            )
        })
        .collect();
    format!(
        r#"{{"Search":[{}],"totalResults":"100","Response":"True"}}"#,
        items.join(",")
    )
}

fn page_matcher(query: &str, page: usize) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("apikey".into(), "test-key".into()),
        Matcher::UrlEncoded("s".into(), query.into()),
        Matcher::UrlEncoded("type".into(), "movie".into()),
        Matcher::UrlEncoded("page".into(), page.to_string()),
    ])
}

fn client(server: &ServerGuard) -> OmdbClient {
    OmdbClient::with_base_url("test-key", format!("{}/", server.url()))
}

#[tokio::test]
async fn test_two_pages_merge_in_page_order() {
    let mut server = Server::new_async().await;
    let p1 = server
        .mock("GET", "/")
        .match_query(page_matcher("Batman", 1))
        .with_status(200)
        .with_body(page_body("Batman", 1, 10))
        .create_async()
        .await;
    let p2 = server
        .mock("GET", "/")
        .match_query(page_matcher("Batman", 2))
        .with_status(200)
        .with_body(page_body("Batman", 2, 10))
        .create_async()
        .await;

    let movies = client(&server).search("Batman", 20).await.unwrap();

    p1.assert_async().await;
    p2.assert_async().await;
    assert_eq!(movies.len(), 20);
    assert_eq!(movies[0].title, "Batman 1-0");
    assert_eq!(movies[9].title, "Batman 1-9");
    assert_eq!(movies[10].title, "Batman 2-0");
    assert_eq!(movies[19].title, "Batman 2-9");
}

#[tokio::test]
async fn test_limit_truncates_and_requests_only_needed_pages() {
    let mut server = Server::new_async().await;
    let p1 = server
        .mock("GET", "/")
        .match_query(page_matcher("Alien", 1))
        .with_body(page_body("Alien", 1, 10))
        .create_async()
        .await;
    let p2 = server
        .mock("GET", "/")
        .match_query(page_matcher("Alien", 2))
        .with_body(page_body("Alien", 2, 10))
        .expect(0)
        .create_async()
        .await;

    let movies = client(&server).search("Alien", 7).await.unwrap();

    p1.assert_async().await;
    p2.assert_async().await;
    assert_eq!(movies.len(), 7);
    assert_eq!(movies[6].title, "Alien 1-6");
}

#[tokio::test]
async fn test_short_page_returns_fewer_than_limit() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/")
        .match_query(page_matcher("Primer", 1))
        .with_body(page_body("Primer", 1, 3))
        .create_async()
        .await;
    server
        .mock("GET", "/")
        .match_query(page_matcher("Primer", 2))
        .with_body(r#"{"Response":"False","Error":"Movie not found!"}"#)
        .create_async()
        .await;

    let movies = client(&server).search("Primer", 20).await.unwrap();
    assert_eq!(movies.len(), 3);
}

#[tokio::test]
async fn test_failed_page_counts_as_empty() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/")
        .match_query(page_matcher("Heat", 1))
        .with_body(page_body("Heat", 1, 10))
        .create_async()
        .await;
    server
        .mock("GET", "/")
        .match_query(page_matcher("Heat", 2))
        .with_status(500)
        .with_body("Internal Server Error")
        .create_async()
        .await;

    let movies = client(&server).search("Heat", 20).await.unwrap();
    assert_eq!(movies.len(), 10);
    assert!(movies.iter().all(|m| m.title.starts_with("Heat 1-")));
}

#[tokio::test]
async fn test_every_page_failing_yields_empty_success() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"Response":"False","Error":"Movie not found!"}"#)
        .expect(2)
        .create_async()
        .await;

    let movies = client(&server).search("zzqqxx", 20).await.unwrap();
    assert!(movies.is_empty());
}

#[tokio::test]
async fn test_garbage_body_counts_as_empty() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let movies = client(&server).search("Heat", 10).await.unwrap();
    assert!(movies.is_empty());
}

#[test]
fn test_empty_query_makes_no_request() {
    let mut server = Server::new();
    let any = server.mock("GET", Matcher::Any).expect(0).create();

    let c = client(&server);
    tokio_test::block_on(async {
        assert!(c.search("", 20).await.unwrap().is_empty());
        assert!(c.search("   \t", 20).await.unwrap().is_empty());
    });

    any.assert();
}

#[tokio::test]
async fn test_huge_limit_is_capped_at_max_pages() {
    let mut server = Server::new_async().await;
    let pages = server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_body(page_body("Batman", 1, 10))
        .expect(MAX_LIMIT / 10)
        .create_async()
        .await;

    let c = client(&server);
    let movies = c.search("Batman", usize::MAX).await.unwrap();

    pages.assert_async().await;
    assert_eq!(movies.len(), MAX_LIMIT);
}

#[tokio::test]
async fn test_limit_above_cap_requests_no_extra_pages() {
    let mut server = Server::new_async().await;
    let last = server
        .mock("GET", "/")
        .match_query(page_matcher("Batman", 100))
        .with_body(page_body("Batman", 100, 10))
        .create_async()
        .await;
    let beyond = server
        .mock("GET", "/")
        .match_query(page_matcher("Batman", 101))
        .expect(0)
        .create_async()
        .await;

    let movies = client(&server).search("Batman", MAX_LIMIT + 500).await.unwrap();

    last.assert_async().await;
    beyond.assert_async().await;
    assert_eq!(movies.len(), 10);
    assert_eq!(movies[0].title, "Batman 100-0");
}

#[tokio::test]
async fn test_query_is_trimmed_and_encoded() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("GET", "/")
        .match_query(page_matcher("the dark knight", 1))
        .with_body(page_body("Knight", 1, 2))
        .create_async()
        .await;

    let movies = client(&server)
        .search("  the dark knight  ", 10)
        .await
        .unwrap();

    m.assert_async().await;
    assert_eq!(movies.len(), 2);
}

#[tokio::test]
async fn test_fetch_default_uses_configured_query() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("GET", "/")
        .match_query(page_matcher("Comedy", 1))
        .with_body(page_body("Comedy", 1, 5))
        .create_async()
        .await;

    let movies = client(&server)
        .with_default_query("Comedy")
        .fetch_default(10)
        .await
        .unwrap();

    m.assert_async().await;
    assert_eq!(movies.len(), 5);
    assert_eq!(movies[0].title, "Comedy 1-0");
}

#[tokio::test]
async fn test_missing_poster_is_preserved() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_body(
            r#"{"Search":[{"Title":"Obscure","Year":"1971","imdbID":"tt0067000","Type":"movie","Poster":"N/A"}],"totalResults":"1","Response":"True"}"#,
        )
        .create_async()
        .await;

    let movies = client(&server).search("Obscure", 10).await.unwrap();
    assert_eq!(movies.len(), 1);
    assert!(!movies[0].has_poster());
    assert_eq!(movies[0].poster_url(), cinefav::models::PLACEHOLDER_POSTER);
}

#[tokio::test]
async fn test_invalid_base_url_is_an_error() {
    let client = OmdbClient::with_base_url("test-key", "::not-a-url::");
    let err = client.search("Batman", 20).await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid base URL '::not-a-url::'");
}
