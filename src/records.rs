//! Wire records exchanged with the host as JSON.
//!
//! Field names follow the host's camelCase JSON. Every field defaults when
//! absent so that partial requests decode; required values are validated by
//! the operation that needs them.

use crate::cookies::record::CookieRecord;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountRecord {
    pub email: String,
    pub password: String,
    pub apple_id: String,
    pub store: String,
    pub first_name: String,
    pub last_name: String,
    pub password_token: String,
    pub directory_services_identifier: String,
    pub cookie: Vec<CookieRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pod: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoftwareRecord {
    #[serde(rename = "trackId")]
    pub id: i64,
    #[serde(rename = "bundleId")]
    pub bundle_id: String,
    #[serde(rename = "trackName")]
    pub name: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchRequest {
    pub term: String,
    pub country_code: String,
    pub limit: i64,
    pub entity_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LookupRequest {
    #[serde(rename = "bundleID")]
    pub bundle_id: String,
    #[serde(rename = "countryCode")]
    pub country_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BagRequest {
    pub device_identifier: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthenticateRequest {
    pub email: String,
    pub password: String,
    pub code: String,
    pub cookies: Vec<CookieRecord>,
    pub device_identifier: String,
    pub user_agent: String,
}

/// Refreshes the password token of an account that already signed in.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RotateTokenRequest {
    pub account: AccountRecord,
    pub device_identifier: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PurchaseRequest {
    pub account: AccountRecord,
    pub app: SoftwareRecord,
    pub device_identifier: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListVersionsRequest {
    pub account: AccountRecord,
    pub bundle_identifier: String,
    pub device_identifier: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VersionMetadataRequest {
    pub account: AccountRecord,
    pub app: SoftwareRecord,
    #[serde(rename = "versionID")]
    pub version_id: String,
    pub device_identifier: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DownloadRequest {
    pub account: AccountRecord,
    pub app: SoftwareRecord,
    #[serde(rename = "externalVersionID")]
    pub external_version_id: String,
    pub device_identifier: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BagResult {
    pub auth_endpoint: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseResult {
    pub account: AccountRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListVersionsResult {
    pub account: AccountRecord,
    pub versions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionMetadataRecord {
    pub display_version: String,
    #[serde(with = "time::serde::rfc3339")]
    pub release_date: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionMetadataResult {
    pub account: AccountRecord,
    pub metadata: VersionMetadataRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SinfRecord {
    pub id: i64,
    pub sinf_base64: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DownloadResult {
    pub account: AccountRecord,
    #[serde(rename = "downloadURL")]
    pub download_url: String,
    pub sinfs: Vec<SinfRecord>,
    #[serde(rename = "bundleShortVersionString")]
    pub bundle_short_version_string: String,
    #[serde(rename = "bundleVersion")]
    pub bundle_version: String,
    #[serde(rename = "iTunesMetadataBase64")]
    pub itunes_metadata_base64: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionInfo {
    pub module: String,
    pub version: String,
}
