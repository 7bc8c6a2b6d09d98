//! Resolver integration tests against local HTTP doubles
use std::time::Duration;

use postgrab_core::*;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const POST_URL: &str = "https://twitter.com/alice/status/42";

fn resolver_for(server: &MockServer) -> Resolver {
    let config = ResolverConfig::builder()
        .timeout(2)
        .mirror_base(server.uri())
        .syndication_base(server.uri())
        .oembed_base(server.uri())
        .retry_delay(Duration::from_millis(1))
        .build();
    Resolver::with_config(config)
}

fn mirror() -> wiremock::MockBuilder {
    Mock::given(method("GET")).and(path("/Twitter/status/42"))
}

fn syndication() -> wiremock::MockBuilder {
    Mock::given(method("GET"))
        .and(path("/tweet-result"))
        .and(query_param("id", "42"))
        .and(query_param("lang", "ja"))
        .and(query_param("token", "x"))
}

fn oembed() -> wiremock::MockBuilder {
    Mock::given(method("GET"))
        .and(path("/oembed"))
        .and(query_param("url", POST_URL))
        .and(query_param("omit_script", "true"))
}

fn syndication_body() -> serde_json::Value {
    json!({
        "text": "Short version https://t.co/attach",
        "user": {"name": "Alice", "screen_name": "alice"},
        "note_tweet": {"note_tweet_results": {"result": {
            "text": "Long  form post\n\n\n\nwith a link https://t.co/ext and a quote https://t.co/quote\nend https://t.co/attach",
            "entity_set": {"urls": [
                {"url": "https://t.co/ext", "expanded_url": "https://example.com/article"},
                {"url": "https://t.co/quote", "expanded_url": "https://x.com/bob/status/7"}
            ]}
        }}}
    })
}

#[tokio::test]
async fn test_mirror_success_skips_other_providers() {
    let server = MockServer::start().await;
    mirror()
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "text": "  Hello   from the mirror \n",
            "user_name": "Alice",
            "user_screen_name": "alice",
            "likes": 10
        })))
        .expect(1)
        .mount(&server)
        .await;
    syndication().respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;
    oembed().respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let post = resolver_for(&server).resolve(POST_URL).await.unwrap();

    assert_eq!(
        post,
        ResolvedPost::new(
            "Hello from the mirror".to_string(),
            "Alice".to_string(),
            "@alice".to_string(),
            POST_URL.to_string(),
        )
    );
}

#[tokio::test]
async fn test_long_form_syndication_after_mirror_not_applicable() {
    let server = MockServer::start().await;
    mirror()
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": "missing author"})))
        .expect(1)
        .mount(&server)
        .await;
    syndication()
        .respond_with(ResponseTemplate::new(200).set_body_json(syndication_body()))
        .expect(1)
        .mount(&server)
        .await;
    oembed().respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let post = resolver_for(&server).resolve(POST_URL).await.unwrap();

    assert_eq!(
        post.text,
        "Long form post\n\nwith a link https://example.com/article and a quote\nend"
    );
    assert_eq!(post.author_name, "Alice");
    assert_eq!(post.author_handle, "@alice");
    assert_eq!(post.tweet_url, POST_URL);
}

#[tokio::test]
async fn test_rate_limit_retry_is_transparent() {
    let server = MockServer::start().await;
    mirror().respond_with(ResponseTemplate::new(503)).expect(1).mount(&server).await;
    syndication()
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    syndication()
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "full_text": "Third time lucky",
            "user": {"name": "Alice", "screen_name": "alice"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    oembed().respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let post = resolver_for(&server).resolve(POST_URL).await.unwrap();
    assert_eq!(post.text, "Third time lucky");

    let attempts = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|req| req.url.path() == "/tweet-result")
        .count();
    assert_eq!(attempts, 3);
}

#[tokio::test]
async fn test_syndication_timeout_consumes_retry_slot() {
    let server = MockServer::start().await;
    mirror().respond_with(ResponseTemplate::new(404)).expect(1).mount(&server).await;
    syndication()
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"text": "too late", "user": {"name": "Alice", "screen_name": "alice"}}))
                .set_delay(Duration::from_millis(1500)),
        )
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    syndication()
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "text": "ok now",
            "user": {"name": "Alice", "screen_name": "alice"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    oembed().respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let config = ResolverConfig::builder()
        .timeout(1)
        .mirror_base(server.uri())
        .syndication_base(server.uri())
        .oembed_base(server.uri())
        .retry_delay(Duration::from_millis(1))
        .build();
    let post = Resolver::with_config(config).resolve(POST_URL).await.unwrap();

    assert_eq!(post.text, "ok now");
}

#[tokio::test]
async fn test_rate_limit_exhausted_falls_back_to_embed() {
    let server = MockServer::start().await;
    mirror().respond_with(ResponseTemplate::new(404)).mount(&server).await;
    syndication().respond_with(ResponseTemplate::new(429)).expect(3).mount(&server).await;
    oembed()
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "html": "<blockquote class=\"twitter-tweet\"><p lang=\"en\">Hello <a href=\"https://t.co/x\">world</a> &amp; friends</p>&mdash; Alice (@alice) <a href=\"https://twitter.com/alice/status/42\">May 1, 2024</a></blockquote>",
            "author_name": "Alice",
            "author_url": "https://twitter.com/alice"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let post = resolver_for(&server).resolve(POST_URL).await.unwrap();

    assert_eq!(post.text, "Hello world & friends");
    assert_eq!(post.author_name, "Alice");
    assert_eq!(post.author_handle, "@alice");
}

#[tokio::test]
async fn test_non_rate_limit_status_is_not_retried() {
    let server = MockServer::start().await;
    mirror().respond_with(ResponseTemplate::new(404)).mount(&server).await;
    syndication().respond_with(ResponseTemplate::new(500)).expect(1).mount(&server).await;
    oembed().respond_with(ResponseTemplate::new(404)).expect(1).mount(&server).await;

    let result = resolver_for(&server).resolve(POST_URL).await;
    assert!(matches!(result, Err(PostgrabError::NotFound)));
}

#[tokio::test]
async fn test_embed_without_profile_handle() {
    let server = MockServer::start().await;
    mirror().respond_with(ResponseTemplate::new(404)).mount(&server).await;
    syndication().respond_with(ResponseTemplate::new(404)).mount(&server).await;
    oembed()
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "html": "<blockquote><p>First</p><p>Second</p></blockquote>",
            "author_name": "Alice",
            "author_url": "https://example.com/profile"
        })))
        .mount(&server)
        .await;

    let post = resolver_for(&server).resolve(POST_URL).await.unwrap();
    assert_eq!(post.text, "First\n\nSecond");
    assert_eq!(post.author_handle, "");
}

#[tokio::test]
async fn test_malformed_mirror_body_falls_through() {
    let server = MockServer::start().await;
    mirror()
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .expect(1)
        .mount(&server)
        .await;
    syndication()
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "text": "From syndication",
            "user": {"name": "Alice", "screen_name": "alice"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let post = resolver_for(&server).resolve(POST_URL).await.unwrap();
    assert_eq!(post.text, "From syndication");
}

#[tokio::test]
async fn test_nothing_found() {
    let server = MockServer::start().await;
    mirror().respond_with(ResponseTemplate::new(200).set_body_json(json!({}))).mount(&server).await;
    syndication()
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user": {"name": "A", "screen_name": "a"}})))
        .expect(1)
        .mount(&server)
        .await;
    oembed()
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"author_name": "A"})))
        .expect(1)
        .mount(&server)
        .await;

    let result = resolver_for(&server).resolve(POST_URL).await;
    assert!(matches!(result, Err(PostgrabError::NotFound)));
}

#[tokio::test]
async fn test_invalid_url_makes_no_request() {
    let server = MockServer::start().await;

    let result = resolver_for(&server).resolve("https://example.com/not-a-tweet").await;

    assert!(matches!(result, Err(PostgrabError::InvalidUrl(_))));
    assert!(server.received_requests().await.unwrap().is_empty());
}
