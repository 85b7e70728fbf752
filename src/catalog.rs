//! Public catalog search and lookup.
//!
//! Plain GETs against the catalog endpoints. Results are passed through to the
//! host untouched; only the envelope shape (`resultCount`, `results`) is
//! checked.

use crate::base::error::{BridgeError, BridgeResult};
use crate::base::neterror::NetError;
use crate::client::Client;
use crate::config::BridgeConfig;
use crate::records::{LookupRequest, SearchRequest};
use http::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogResponse {
    #[serde(default)]
    result_count: i64,
    #[serde(default)]
    results: Vec<Value>,
}

/// Entity filter for a search: `iPadSoftware` for `ipad`, else `software`.
pub fn search_entity(entity_type: &str) -> &'static str {
    if entity_type.eq_ignore_ascii_case("ipad") {
        "iPadSoftware"
    } else {
        "software"
    }
}

pub struct CatalogClient {
    client: Client,
    base: String,
}

impl CatalogClient {
    pub fn new(config: &BridgeConfig) -> Self {
        let client = Client::builder()
            .timeout(config.catalog_timeout)
            .user_agent(config.user_agent.clone())
            .build();
        Self {
            client,
            base: config.catalog_base.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> BridgeResult<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base, path))
            .map_err(|_| BridgeError::Network(NetError::InvalidUrl))?;
        url.query_pairs_mut().extend_pairs(query);
        Ok(url)
    }

    async fn get(&self, url: Url, what: &str) -> BridgeResult<CatalogResponse> {
        let response = self.client.get(url.as_str()).send().await?;
        if response.status() != StatusCode::OK {
            return Err(BridgeError::HttpStatus(response.status().as_u16()));
        }

        serde_json::from_slice(response.bytes()).map_err(|e| {
            BridgeError::malformed(format!("failed to decode {} response: {}", what, e))
        })
    }

    pub async fn search(&self, request: &SearchRequest) -> BridgeResult<Vec<Value>> {
        let limit = request.limit.to_string();
        let url = self.endpoint(
            "/search",
            &[
                ("entity", search_entity(&request.entity_type)),
                ("limit", limit.as_str()),
                ("media", "software"),
                ("term", request.term.as_str()),
                ("country", request.country_code.as_str()),
            ],
        )?;

        let decoded = self.get(url, "search").await?;
        tracing::debug!(results = decoded.results.len(), "catalog search finished");
        Ok(decoded.results)
    }

    /// First lookup hit; `NoResults` when the catalog has none.
    pub async fn lookup(&self, request: &LookupRequest) -> BridgeResult<Value> {
        let url = self.endpoint(
            "/lookup",
            &[
                ("bundleId", request.bundle_id.as_str()),
                ("country", request.country_code.as_str()),
                ("entity", "software,iPadSoftware"),
                ("limit", "1"),
                ("media", "software"),
            ],
        )?;

        let decoded = self.get(url, "lookup").await?;
        if decoded.result_count == 0 {
            return Err(BridgeError::NoResults);
        }
        decoded.results.into_iter().next().ok_or(BridgeError::NoResults)
    }
}
