//! The direct download exchange.
//!
//! The storefront client has no download operation the bridge can use, so the
//! POST to the buy endpoint is made here with the session's cookie jar and the
//! property-list response goes through [`normalize_download`].

use crate::base::error::{BridgeError, BridgeResult};
use crate::base::neterror::NetError;
use crate::client::Client;
use crate::config::{BridgeConfig, DOWNLOAD_PATH};
use crate::mapper;
use crate::normalizer::normalize_download;
use crate::records::{DownloadRequest, DownloadResult};
use crate::session::SessionContext;
use http::header::{HeaderName, CONTENT_TYPE, USER_AGENT};
use http::StatusCode;
use plist::{Dictionary, Value};
use std::io::Cursor;
use url::Url;

pub const PLIST_CONTENT_TYPE: &str = "application/x-apple-plist";

const ICLOUD_DSID: HeaderName = HeaderName::from_static("icloud-dsid");
const X_DSID: HeaderName = HeaderName::from_static("x-dsid");

/// XML property list sent to the buy endpoint.
pub fn build_payload(guid: &str, app_id: i64, external_version_id: &str) -> BridgeResult<Vec<u8>> {
    let mut payload = Dictionary::new();
    payload.insert("creditDisplay".to_string(), Value::String(String::new()));
    payload.insert("guid".to_string(), Value::String(guid.trim().to_string()));
    payload.insert("salableAdamId".to_string(), Value::Integer(app_id.into()));

    let external_version_id = external_version_id.trim();
    if !external_version_id.is_empty() {
        payload.insert(
            "externalVersionId".to_string(),
            Value::String(external_version_id.to_string()),
        );
    }

    let mut body = Vec::new();
    Value::Dictionary(payload)
        .to_writer_xml(&mut body)
        .map_err(|e| BridgeError::Encoding(format!("download request: {}", e)))?;
    Ok(body)
}

/// Buy endpoint for `pod`, unless the configuration overrides it.
pub fn download_url(config: &BridgeConfig, pod: &str) -> BridgeResult<Url> {
    if let Some(endpoint) = &config.buy_endpoint_override {
        return Ok(endpoint.clone());
    }
    let raw = format!("https://{}{}", mapper::store_api_host(pod), DOWNLOAD_PATH);
    Url::parse(&raw).map_err(|_| BridgeError::Network(NetError::InvalidUrl))
}

pub async fn download<C>(
    session: &SessionContext<C>,
    config: &BridgeConfig,
    request: &DownloadRequest,
) -> BridgeResult<DownloadResult> {
    let account = mapper::account_to_external(&request.account);
    let body = build_payload(session.guid(), request.app.id, &request.external_version_id)?;
    let url = download_url(config, &account.pod)?;
    let dsid = request.account.directory_services_identifier.as_str();

    let client = Client::builder()
        .cookie_jar(session.cookie_jar().clone())
        .timeout(config.download_timeout)
        .build();

    tracing::debug!(app_id = request.app.id, host = url.host_str().unwrap_or(""), "requesting download");

    let response = client
        .post(url.as_str())
        .header(CONTENT_TYPE, PLIST_CONTENT_TYPE)
        .header(USER_AGENT, config.user_agent_or_default(&request.user_agent))
        .header(ICLOUD_DSID, dsid)
        .header(X_DSID, dsid)
        .body(body)
        .send()
        .await?;

    let document = match Value::from_reader(Cursor::new(response.bytes())) {
        Ok(document) => document,
        Err(_) if response.status() != StatusCode::OK => {
            return Err(BridgeError::HttpStatus(response.status().as_u16()));
        }
        Err(e) => {
            return Err(BridgeError::malformed(format!(
                "failed to decode download response: {}",
                e
            )));
        }
    };

    let normalized = normalize_download(&document, &request.account.email)?;

    let mut updated = request.account.clone();
    updated.cookie = session.export_cookies();
    if !account.pod.is_empty() {
        updated.pod = Some(account.pod);
    }

    Ok(DownloadResult {
        account: updated,
        download_url: normalized.download_url,
        sinfs: normalized.sinfs,
        bundle_short_version_string: normalized.bundle_short_version_string,
        bundle_version: normalized.bundle_version,
        itunes_metadata_base64: normalized.itunes_metadata_base64,
    })
}
