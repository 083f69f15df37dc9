//! Alias → token resolution against a mocked updown API.
//!
//! Uses wiremock to count how many times the check listing is fetched.

use updown::{Check, List, UpdownClient, UpdownError};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn checks_body(pairs: &[(&str, &str)]) -> serde_json::Value {
    serde_json::Value::Array(
        pairs
            .iter()
            .map(|(alias, token)| {
                serde_json::json!({
                    "token": token,
                    "url": format!("https://{token}.example.com"),
                    "alias": alias,
                    "enabled": true
                })
            })
            .collect(),
    )
}

async fn list_requests(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .expect("request recording enabled")
        .iter()
        .filter(|r| r.url.path() == "/checks")
        .count()
}

#[tokio::test]
async fn test_cold_cache_absent_alias_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/checks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(checks_body(&[("A", "t1")])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = UpdownClient::new("test-key", &mock_server.uri()).unwrap();
    let err = Check::token_for_alias(&client, "Z").await.unwrap_err();

    assert!(matches!(err, UpdownError::AliasNotFound { ref alias } if alias == "Z"));
    // The listing still warmed the cache for other aliases.
    assert_eq!(client.cached_token("A").await.as_deref(), Some("t1"));
}

#[tokio::test]
async fn test_cold_cache_present_alias_then_warm_hit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/checks"))
        .and(header("X-API-KEY", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(checks_body(&[("A", "t1")])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = UpdownClient::new("test-key", &mock_server.uri()).unwrap();

    let token = Check::token_for_alias(&client, "A").await.unwrap();
    assert_eq!(token, "t1");

    let token = Check::token_for_alias(&client, "A").await.unwrap();
    assert_eq!(token, "t1");
    assert_eq!(list_requests(&mock_server).await, 1);
}

#[tokio::test]
async fn test_rebuild_replaces_previous_mapping() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/checks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(checks_body(&[("A", "t1")])))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/checks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(checks_body(&[("B", "t2")])))
        .mount(&mock_server)
        .await;

    let client = UpdownClient::new("test-key", &mock_server.uri()).unwrap();

    assert_eq!(Check::token_for_alias(&client, "A").await.unwrap(), "t1");
    assert_eq!(Check::token_for_alias(&client, "B").await.unwrap(), "t2");
    assert_eq!(list_requests(&mock_server).await, 2);

    // "A" is gone after the rebuild, so it costs another listing.
    assert_eq!(client.cached_token("A").await, None);
    let err = Check::token_for_alias(&client, "A").await.unwrap_err();
    assert!(err.is_alias_not_found());
    assert_eq!(list_requests(&mock_server).await, 3);
}

#[tokio::test]
async fn test_fetch_failure_is_not_reported_as_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/checks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(checks_body(&[("A", "t1")])))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/checks"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(serde_json::json!({"error": "boom"})),
        )
        .mount(&mock_server)
        .await;

    let client = UpdownClient::new("test-key", &mock_server.uri()).unwrap();
    Check::token_for_alias(&client, "A").await.unwrap();

    let err = Check::token_for_alias(&client, "B").await.unwrap_err();
    match err {
        UpdownError::ApiError {
            status_code,
            ref message,
        } => {
            assert_eq!(status_code, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected API error, got {other:?}"),
    }

    // Existing mapping survives the failed refill.
    assert_eq!(Check::token_for_alias(&client, "A").await.unwrap(), "t1");
    assert_eq!(list_requests(&mock_server).await, 2);
}

#[tokio::test]
async fn test_decode_failure_propagates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/checks"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = UpdownClient::new("test-key", &mock_server.uri()).unwrap();
    let err = Check::token_for_alias(&client, "A").await.unwrap_err();

    assert!(matches!(err, UpdownError::HttpError(_)));
    assert_eq!(client.cached_token("A").await, None);
}

#[tokio::test]
async fn test_duplicate_alias_last_write_wins() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/checks"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(checks_body(&[("A", "t1"), ("A", "t2")])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = UpdownClient::new("test-key", &mock_server.uri()).unwrap();

    assert_eq!(Check::token_for_alias(&client, "A").await.unwrap(), "t2");
}

#[tokio::test]
async fn test_listing_checks_warms_the_cache() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/checks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(checks_body(&[("A", "t1")])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = UpdownClient::new("test-key", &mock_server.uri()).unwrap();
    let checks = Check::list(&client, &()).await.unwrap();
    assert_eq!(checks.len(), 1);

    // Served from the listing above, no second request.
    assert_eq!(Check::token_for_alias(&client, "A").await.unwrap(), "t1");
}

#[tokio::test]
async fn test_unaliased_checks_resolve_under_empty_alias() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/checks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"token": "t0", "url": "https://example.com", "alias": null}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = UpdownClient::new("test-key", &mock_server.uri()).unwrap();

    assert_eq!(Check::token_for_alias(&client, "").await.unwrap(), "t0");
}

#[tokio::test]
async fn test_concurrent_resolves_share_one_listing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/checks"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(checks_body(&[("A", "t1")]))
                .set_delay(std::time::Duration::from_millis(50)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = UpdownClient::new("test-key", &mock_server.uri()).unwrap();

    let mut handles = Vec::new();
    for _ in 0..5 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            Check::token_for_alias(&client, "A").await
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), "t1");
    }
}
