mod common;

use common::{http_response, serve_once};
use serde_json::{json, Value};
use storebridge::base::error::BridgeError;
use storebridge::bridge::{Bridge, Operation};
use storebridge::catalog::CatalogClient;
use storebridge::config::BridgeConfig;
use storebridge::records::{LookupRequest, SearchRequest};
use storebridge::storefront::Unlinked;

fn config_for(addr: std::net::SocketAddr) -> BridgeConfig {
    BridgeConfig::default().with_catalog_base(format!("http://{}", addr))
}

#[tokio::test]
async fn test_search_passes_results_through() {
    let body = json!({
        "resultCount": 2,
        "results": [
            {"trackId": 1, "bundleId": "com.example.one", "extra": {"nested": true}},
            {"trackId": 2, "bundleId": "com.example.two"}
        ]
    })
    .to_string();
    let (addr, captured) = serve_once(http_response(
        "200 OK",
        &[("Content-Type", "application/json")],
        body.as_bytes(),
    ))
    .await;

    let results = CatalogClient::new(&config_for(addr))
        .search(&SearchRequest {
            term: "note app".into(),
            country_code: "US".into(),
            limit: 5,
            entity_type: "iPad".into(),
        })
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["extra"]["nested"], true);

    let request = captured.await.unwrap();
    let line = request.request_line();
    assert!(line.starts_with("GET /search?"), "{}", line);
    assert!(line.contains("entity=iPadSoftware"));
    assert!(line.contains("limit=5"));
    assert!(line.contains("media=software"));
    assert!(line.contains("term=note+app"));
    assert!(line.contains("country=US"));
    assert!(request.header("user-agent").unwrap().starts_with("Configurator/"));
}

#[tokio::test]
async fn test_lookup_returns_first_result() {
    let body = json!({"resultCount": 1, "results": [{"trackId": 42, "version": "3.0"}]}).to_string();
    let (addr, captured) = serve_once(http_response("200 OK", &[], body.as_bytes())).await;

    let result = CatalogClient::new(&config_for(addr))
        .lookup(&LookupRequest {
            bundle_id: "com.example.app".into(),
            country_code: "GB".into(),
        })
        .await
        .unwrap();
    assert_eq!(result, json!({"trackId": 42, "version": "3.0"}));

    let request = captured.await.unwrap();
    let line = request.request_line();
    assert!(line.starts_with("GET /lookup?"));
    assert!(line.contains("bundleId=com.example.app"));
    assert!(line.contains("limit=1"));
    assert!(line.contains("entity=software%2CiPadSoftware"));
}

#[tokio::test]
async fn test_lookup_without_results() {
    let body = br#"{"resultCount":0,"results":[]}"#;
    let (addr, _) = serve_once(http_response("200 OK", &[], body)).await;

    let err = CatalogClient::new(&config_for(addr))
        .lookup(&LookupRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err, BridgeError::NoResults);
    assert_eq!(err.to_string(), "no results found");
}

#[tokio::test]
async fn test_non_200_status() {
    let (addr, _) = serve_once(http_response("503 Service Unavailable", &[], b"busy")).await;

    let err = CatalogClient::new(&config_for(addr))
        .search(&SearchRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err, BridgeError::HttpStatus(503));
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_undecodable_body() {
    let (addr, _) = serve_once(http_response("200 OK", &[], b"<html>")).await;

    let err = CatalogClient::new(&config_for(addr))
        .search(&SearchRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, BridgeError::MalformedResponse(_)));
    assert!(err.to_string().starts_with("failed to decode search response: "));
}

#[tokio::test]
async fn test_lookup_through_envelope() {
    let body = json!({"resultCount": 1, "results": [{"trackId": 7}]}).to_string();
    let (addr, _) = serve_once(http_response("200 OK", &[], body.as_bytes())).await;

    let bridge = Bridge::new(Unlinked, config_for(addr));
    let out = bridge
        .handle(
            Operation::Lookup,
            Some(r#"{"bundleID":"com.example.app","countryCode":"US"}"#),
        )
        .await;
    let out: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(out, json!({"ok": true, "result": {"trackId": 7}}));
}
