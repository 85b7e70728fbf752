//! Reshapes the download endpoint's property list into the bridge result.
//!
//! The document is server controlled and loosely typed. Failure codes are
//! classified first; after that every field the result needs is required and
//! a missing or mistyped one fails the whole download.

use crate::base::error::{BridgeError, BridgeResult};
use crate::document;
use crate::records::SinfRecord;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use plist::{Dictionary, Value};

const PASSWORD_TOKEN_EXPIRED_CODES: [&str; 2] = ["2034", "2042"];
const LICENSE_REQUIRED_CODE: &str = "9610";

/// The download fields extracted from one response, ready for transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDownload {
    pub download_url: String,
    pub sinfs: Vec<SinfRecord>,
    pub bundle_short_version_string: String,
    pub bundle_version: String,
    pub itunes_metadata_base64: String,
}

/// Maps a `failureType` code onto the error the host sees.
pub fn classify_failure(failure_type: &str, customer_message: &str) -> BridgeError {
    if PASSWORD_TOKEN_EXPIRED_CODES.contains(&failure_type) {
        BridgeError::PasswordTokenExpired
    } else if failure_type == LICENSE_REQUIRED_CODE {
        BridgeError::LicenseRequired
    } else if !customer_message.is_empty() {
        BridgeError::RemoteRejected(customer_message.to_string())
    } else {
        BridgeError::RemoteRejected(format!("download failed: {}", failure_type))
    }
}

/// Normalizes a download response for the account `email`.
pub fn normalize_download(document: &Value, email: &str) -> BridgeResult<NormalizedDownload> {
    let root = document::dict(document).ok_or_else(|| BridgeError::malformed("invalid response"))?;

    let failure_type = document::string(root.get("failureType"));
    if !failure_type.is_empty() {
        let customer_message = document::string(root.get("customerMessage"));
        tracing::debug!(failure_type = %failure_type, "storefront rejected download");
        return Err(classify_failure(&failure_type, &customer_message));
    }

    let item = root
        .get("songList")
        .and_then(document::array)
        .and_then(<[Value]>::first)
        .ok_or_else(|| BridgeError::malformed("no items in response"))?;
    let item = document::dict(item).ok_or_else(|| BridgeError::malformed("invalid response"))?;

    let download_url = document::string(item.get("URL"));
    if download_url.is_empty() {
        return Err(BridgeError::MissingField("download URL"));
    }

    let metadata = item
        .get("metadata")
        .and_then(document::dict)
        .cloned()
        .ok_or(BridgeError::MissingField("metadata"))?;

    let bundle_short_version_string = document::string(metadata.get("bundleShortVersionString"));
    let bundle_version = document::string(metadata.get("bundleVersion"));
    if bundle_short_version_string.is_empty() || bundle_version.is_empty() {
        return Err(BridgeError::MissingField("required information"));
    }

    let itunes_metadata_base64 = encode_metadata(metadata, email)?;
    let sinfs = extract_sinfs(item)?;

    Ok(NormalizedDownload {
        download_url,
        sinfs,
        bundle_short_version_string,
        bundle_version,
        itunes_metadata_base64,
    })
}

/// Stamps the purchasing identity and encodes the metadata as a base64
/// binary property list.
fn encode_metadata(mut metadata: Dictionary, email: &str) -> BridgeResult<String> {
    metadata.insert("apple-id".to_string(), Value::String(email.to_string()));
    metadata.insert("userName".to_string(), Value::String(email.to_string()));

    let mut encoded = Vec::new();
    Value::Dictionary(metadata)
        .to_writer_binary(&mut encoded)
        .map_err(|e| BridgeError::Encoding(format!("iTunesMetadata: {}", e)))?;
    Ok(STANDARD.encode(encoded))
}

fn extract_sinfs(item: &Dictionary) -> BridgeResult<Vec<SinfRecord>> {
    let entries = item
        .get("sinfs")
        .and_then(document::array)
        .filter(|entries| !entries.is_empty())
        .ok_or_else(|| BridgeError::malformed("no sinf found in response"))?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| -> BridgeResult<SinfRecord> {
            let entry = document::dict(entry)
                .ok_or_else(|| BridgeError::invalid_sinf(format!("entry {} is not a dictionary", index)))?;
            let id = entry
                .get("id")
                .and_then(document::coerce_i64)
                .ok_or_else(|| BridgeError::invalid_sinf(format!("entry {} has no integer id", index)))?;
            let payload = entry
                .get("sinf")
                .and_then(document::bytes)
                .ok_or_else(|| BridgeError::invalid_sinf(format!("entry {} has no payload", index)))?;

            Ok(SinfRecord {
                id,
                sinf_base64: STANDARD.encode(payload),
            })
        })
        .collect()
}
