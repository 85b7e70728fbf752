//! The JSON envelope exchanged with the host.
//!
//! Requests arrive as JSON text. Every response is `{"ok":true,"result":...}`
//! or `{"ok":false,"error":"..."}`, and producing one can never fail: if even
//! the error envelope cannot be encoded, [`FALLBACK_ERROR_ENVELOPE`] is
//! returned.

use crate::base::error::{BridgeError, BridgeResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;

pub const FALLBACK_ERROR_ENVELOPE: &str = r#"{"ok":false,"error":"failed to encode error response"}"#;

pub const EMPTY_REQUEST_MESSAGE: &str = "request body is empty";

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

/// Decodes a request payload. Missing or blank payloads are rejected before
/// any parsing.
pub fn decode_request<T: DeserializeOwned>(payload: Option<&str>) -> BridgeResult<T> {
    let payload = match payload {
        Some(payload) if !payload.trim().is_empty() => payload,
        _ => return Err(BridgeError::invalid_argument(EMPTY_REQUEST_MESSAGE)),
    };
    serde_json::from_str(payload).map_err(|e| BridgeError::Decode(e.to_string()))
}

pub fn success<T: Serialize>(result: &T) -> String {
    let envelope = Envelope {
        ok: true,
        result: Some(result),
        error: None,
    };
    match serde_json::to_string(&envelope) {
        Ok(json) => json,
        Err(e) => failure(&BridgeError::Encoding(format!("response: {}", e))),
    }
}

pub fn failure(error: &dyn Display) -> String {
    let message = error.to_string();
    tracing::warn!(error = %message, "bridge call failed");
    let envelope: Envelope<'_, ()> = Envelope {
        ok: false,
        result: None,
        error: Some(&message),
    };
    serde_json::to_string(&envelope).unwrap_or_else(|_| FALLBACK_ERROR_ENVELOPE.to_string())
}

pub fn respond<T: Serialize>(result: BridgeResult<T>) -> String {
    match result {
        Ok(value) => success(&value),
        Err(e) => failure(&e),
    }
}
