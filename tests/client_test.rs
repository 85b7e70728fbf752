//! Tests for Client API.

mod common;

use common::{http_response, serve_once, serve_silence};
use std::sync::Arc;
use std::time::Duration;
use storebridge::base::error::BridgeError;
use storebridge::base::neterror::NetError;
use storebridge::client::Client;
use storebridge::cookies::jar::CookieJar;
use storebridge::cookies::monster::CookieMonster;
use storebridge::socket::tls::TlsConfig;
use url::Url;

// === Client Tests ===

#[test]
fn test_client_creation() {
    let _client = Client::new();
}

#[test]
fn test_client_builder() {
    let _client = Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent("Configurator/2.17")
        .tls_config(TlsConfig::default())
        .cookie_jar(Arc::new(CookieMonster::new()))
        .build();
}

#[test]
fn test_request_builder_headers_and_body() {
    let client = Client::new();
    let _req = client
        .post("https://example.com")
        .header("X-Custom", "value")
        .header(http::header::ACCEPT, "application/json")
        .body(b"test body".to_vec());
}

#[tokio::test]
async fn test_get_round_trip() {
    let (addr, captured) =
        serve_once(http_response("200 OK", &[("Content-Type", "text/plain")], b"hello")).await;

    let client = Client::builder().user_agent("storebridge-test").build();
    let resp = client.get(format!("http://{}/path?q=1", addr)).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().unwrap(), "hello");

    let request = captured.await.unwrap();
    assert_eq!(request.request_line(), "GET /path?q=1 HTTP/1.1");
    assert_eq!(request.header("host"), Some(addr.to_string().as_str()));
    assert_eq!(request.header("user-agent"), Some("storebridge-test"));
}

#[tokio::test]
async fn test_post_sends_body_and_length() {
    let (addr, captured) = serve_once(http_response("204 No Content", &[], b"")).await;

    let resp = Client::new()
        .post(format!("http://{}/submit", addr))
        .header(http::header::USER_AGENT, "explicit")
        .body("payload")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let request = captured.await.unwrap();
    assert_eq!(request.header("content-length"), Some("7"));
    assert_eq!(request.header("user-agent"), Some("explicit"));
    assert_eq!(request.body, b"payload");
}

#[tokio::test]
async fn test_cookie_jar_round_trip() {
    let (addr, captured) = serve_once(http_response(
        "200 OK",
        &[("Set-Cookie", "fresh=1"), ("Set-Cookie", "stale=; Max-Age=0")],
        b"",
    ))
    .await;

    let jar = Arc::new(CookieMonster::new());
    let origin = Url::parse(&format!("http://{}/", addr)).unwrap();
    jar.parse_and_save_cookie(&origin, "sent=yes");

    let client = Client::builder().cookie_jar(jar.clone()).build();
    client.get(origin.as_str()).send().await.unwrap();

    let request = captured.await.unwrap();
    assert_eq!(request.header("cookie"), Some("sent=yes"));

    let names = jar.export().into_iter().map(|r| r.name).collect::<Vec<_>>();
    assert_eq!(names, vec!["fresh", "sent"]);
}

#[tokio::test]
async fn test_timeout_against_silent_server() {
    let addr = serve_silence().await;

    let err = Client::builder()
        .timeout(Duration::from_millis(200))
        .build()
        .get(format!("http://{}/", addr))
        .send()
        .await
        .unwrap_err();
    assert_eq!(err, NetError::ConnectionTimedOut);
    assert_eq!(BridgeError::from(err), BridgeError::Timeout);
}

#[tokio::test]
async fn test_invalid_url() {
    let err = Client::new().get("not a url").send().await.unwrap_err();
    assert_eq!(err, NetError::InvalidUrl);
}

#[tokio::test]
async fn test_connection_refused() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = Client::new().get(format!("http://{}/", addr)).send().await.unwrap_err();
    assert!(err.is_connect_error(), "{:?}", err);
}
