//! Transport-neutral cookie records.
//!
//! This is the shape cookies take when they leave the bridge inside an
//! account record and come back on a later call. Field names match the host's
//! JSON (`expiresAt` is epoch seconds).

use crate::cookies::canonical_cookie::CanonicalCookie;
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, PrimitiveDateTime};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CookieRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<f64>,
    #[serde(default)]
    pub http_only: bool,
    #[serde(default)]
    pub secure: bool,
}

impl CookieRecord {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    /// Expiry as an absolute time. Fractional seconds are truncated and values
    /// outside the representable range clamp to its ends. `NaN` means no expiry.
    pub fn expiration_time(&self) -> Option<OffsetDateTime> {
        let secs = self.expires_at?.trunc();
        if secs.is_nan() {
            return None;
        }

        let earliest = PrimitiveDateTime::MIN.assume_utc();
        let latest = PrimitiveDateTime::MAX.assume_utc();
        if secs <= earliest.unix_timestamp() as f64 {
            return Some(earliest);
        }
        if secs >= latest.unix_timestamp() as f64 {
            return Some(latest);
        }
        OffsetDateTime::from_unix_timestamp(secs as i64).ok()
    }
}

impl From<&CanonicalCookie> for CookieRecord {
    fn from(cookie: &CanonicalCookie) -> Self {
        Self {
            name: cookie.name.clone(),
            value: cookie.value.clone(),
            path: cookie.path.clone(),
            domain: Some(cookie.domain.clone()),
            expires_at: cookie
                .expiration_time
                .map(|t| t.unix_timestamp() as f64),
            http_only: cookie.http_only,
            secure: cookie.secure,
        }
    }
}
