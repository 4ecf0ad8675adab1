//! Integration tests for the Pretalx client against a mock server.
//!
//! Run with: cargo test --test pretalx_api

use std::sync::Once;

use futures_util::StreamExt;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pytanis_rs::client::Params;
use pytanis_rs::prelude::*;

static INIT: Once = Once::new();

/// Initialize logging for tests
fn init_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// A client pointed at the mock server with a quota that never stalls.
fn client(server: &MockServer) -> PretalxClient {
    init_logging();
    let config = ClientConfig::pretalx()
        .with_base_url(server.uri())
        .with_throttle(Throttle::new(100, 1).unwrap());
    PretalxClient::with_config("secret", config).unwrap()
}

fn submission(code: &str) -> Value {
    json!({
        "code": code,
        "speakers": [{"code": "SPK1", "name": "Ada Lovelace", "biography": null, "avatar": null}],
        "title": format!("Talk {code}"),
        "submission_type": {"en": "Talk"},
        "submission_type_id": 2,
        "track": null,
        "state": "submitted",
        "abstract": "We count.",
        "description": "At length.",
        "duration": 30,
        "do_not_record": false,
        "is_featured": false,
        "content_locale": "en",
        "slot": null,
        "slot_count": 1,
        "resources": []
    })
}

fn tag(name: &str) -> Value {
    json!({"tag": name, "description": {"en": ""}, "color": "#2185d0"})
}

// ============================================================================
// PAGINATION
// ============================================================================

#[tokio::test]
async fn test_two_page_chain_is_walked_lazily() {
    let server = MockServer::start().await;
    let next = format!("{}/api/events/pycon/submissions/?page=2", server.uri());

    Mock::given(method("GET"))
        .and(path("/api/events/pycon/submissions/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 3,
            "next": null,
            "results": [submission("CCC")]
        })))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/events/pycon/submissions/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 3,
            "next": next,
            "results": [submission("AAA"), submission("BBB")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let paged = client.submissions().list("pycon").await.unwrap();
    assert_eq!(paged.count(), 3);

    let mut stream = paged.into_stream();
    let first = stream.next().await.unwrap().unwrap();
    let second = stream.next().await.unwrap().unwrap();
    assert_eq!((first.code.as_str(), second.code.as_str()), ("AAA", "BBB"));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);

    let third = stream.next().await.unwrap().unwrap();
    assert_eq!(third.code, "CCC");
    assert!(stream.next().await.is_none());
    assert_eq!(stream.pages_fetched(), 2);
}

#[tokio::test]
async fn test_collect_all_follows_next_links() {
    let server = MockServer::start().await;
    let next = format!("{}/api/events/pycon/tags/?limit=1&offset=1", server.uri());

    Mock::given(method("GET"))
        .and(path("/api/events/pycon/tags/"))
        .and(query_param("offset", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "next": null,
            "results": [tag("ml")]
        })))
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/events/pycon/tags/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "next": next,
            "results": [tag("python")]
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    let tags = client.tags().list("pycon").await.unwrap().collect_all().await.unwrap();
    let names: Vec<&str> = tags.iter().map(|t| t.tag.as_str()).collect();
    assert_eq!(names, ["python", "ml"]);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].url.query(), Some("limit=1&offset=1"));
}

#[tokio::test]
async fn test_bare_list_is_a_single_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/events/pycon/tags/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([tag("a"), tag("b"), tag("c")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let paged = client.tags().list("pycon").await.unwrap();
    assert_eq!(paged.count(), 3);
    assert_eq!(paged.collect_all().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_count_is_reported_not_reconciled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/events/pycon/tags/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 10,
            "next": null,
            "results": [tag("only")]
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    let paged = client.tags().list("pycon").await.unwrap();
    assert_eq!(paged.count(), 10);
    assert_eq!(paged.collect_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_schema_violation_ends_stream() {
    let server = MockServer::start().await;
    let mut broken = submission("BAD");
    broken["state"] = json!("pondering");

    Mock::given(method("GET"))
        .and(path("/api/events/pycon/submissions/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 3,
            "next": null,
            "results": [submission("OK1"), broken, submission("OK2")]
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    let mut stream = client.submissions().list("pycon").await.unwrap().into_stream();

    assert!(stream.next().await.unwrap().is_ok());
    match stream.next().await.unwrap() {
        Err(Error::Schema { type_name, .. }) => assert!(type_name.contains("Submission")),
        other => panic!("expected schema error, got {other:?}"),
    }
    assert!(stream.next().await.is_none());
}

// ============================================================================
// SINGLE RESOURCES
// ============================================================================

#[tokio::test]
async fn test_get_single_submission_with_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/events/pycon/submissions/MD9SLQ/"))
        .and(query_param("questions", "all"))
        .and(header("authorization", "Token secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(submission("MD9SLQ")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let mut params = Params::new();
    params.insert("questions".to_string(), "all".to_string());
    let sub = client
        .submissions()
        .get_with_params("pycon", "MD9SLQ", params)
        .await
        .unwrap();
    assert_eq!(sub.code, "MD9SLQ");
    assert_eq!(sub.state, State::Submitted);
}

#[tokio::test]
async fn test_me_and_event() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Ada",
            "email": "ada@example.org",
            "locale": "en",
            "timezone": "Europe/Berlin"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/events/pycon/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": {"en": "PyCon"},
            "slug": "pycon",
            "is_public": true,
            "date_from": "2024-04-22",
            "date_to": "2024-04-24",
            "timezone": "Europe/Berlin",
            "urls": {
                "base": "https://pretalx.com/pycon/",
                "schedule": "https://pretalx.com/pycon/schedule/",
                "login": "https://pretalx.com/pycon/login/",
                "feed": "https://pretalx.com/pycon/schedule/feed.xml"
            }
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    assert_eq!(client.me().await.unwrap().name, "Ada");

    let event = client.events().get("pycon").await.unwrap();
    assert_eq!(event.slug, "pycon");
    assert_eq!(event.name.to_string(), "PyCon");
}

// ============================================================================
// FAILURES
// ============================================================================

#[tokio::test]
async fn test_http_status_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/events/pycon/speakers/NOPE/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
        .mount(&server)
        .await;

    let client = client(&server);
    let err = client.speakers().get("pycon", "NOPE").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(err.is_client_error());
    match err {
        Error::HttpStatus { body, .. } => assert_eq!(body["detail"], "Not found."),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/events/pycon/rooms/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 1})))
        .mount(&server)
        .await;

    let client = client(&server);
    let err = client.rooms().list("pycon").await.unwrap_err();
    assert!(matches!(err, Error::SchemaShape(_)));
}

#[tokio::test]
async fn test_throttle_spaces_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Ada",
            "email": "ada@example.org",
            "timezone": "UTC"
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    client.set_throttling(1, 1).await.unwrap();

    let start = std::time::Instant::now();
    client.me().await.unwrap();
    client.me().await.unwrap();
    assert!(start.elapsed() >= std::time::Duration::from_secs(1));
}
