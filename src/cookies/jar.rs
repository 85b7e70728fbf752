//! The cookie jar capability.
//!
//! Anything that carries session cookies through a bridge call implements
//! [`CookieJar`]: the HTTP transaction queries it for the `Cookie` header and
//! feeds `Set-Cookie` responses back into it, the session imports the caller's
//! records into it, and the bridge exports it into the response.
//!
//! Implementations take `&self` and must synchronize internally; callers hold
//! the jar behind an `Arc` and never lock it themselves.

use crate::cookies::canonical_cookie::CanonicalCookie;
use crate::cookies::record::CookieRecord;
use http::HeaderMap;
use time::{Duration, OffsetDateTime, PrimitiveDateTime};
use url::Url;

pub trait CookieJar: Send + Sync {
    /// Stores `cookies` received from `url`, overwriting entries with the same
    /// (domain, path, name) identity.
    fn set(&self, url: &Url, cookies: Vec<CanonicalCookie>);

    /// Returns the cookies applicable to `url`, sorted by (name, domain, path).
    fn query(&self, url: &Url) -> Vec<CanonicalCookie>;

    /// Bulk-loads records handed back by the caller.
    fn import(&self, records: &[CookieRecord]);

    /// Returns every non-expired cookie as a record, sorted by (name, domain, path).
    fn export(&self) -> Vec<CookieRecord>;

    /// Returns the `Cookie` request header value for `url`, if any cookie applies.
    fn request_header(&self, url: &Url) -> Option<String> {
        let cookies = self.query(url);
        if cookies.is_empty() {
            return None;
        }
        Some(
            cookies
                .iter()
                .map(|c| format!("{}={}", c.name, c.value))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// Parses every `Set-Cookie` header in `headers` and stores the result.
    fn store_response_headers(&self, url: &Url, headers: &HeaderMap) {
        let cookies = headers
            .get_all(http::header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(parse_set_cookie)
            .collect::<Vec<_>>();
        if !cookies.is_empty() {
            self.set(url, cookies);
        }
    }
}

/// Parses one `Set-Cookie` line. `Max-Age` wins over `Expires`.
pub fn parse_set_cookie(line: &str) -> Option<CanonicalCookie> {
    let parsed = match cookie::Cookie::parse(line) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::debug!(error = %e, "ignoring unparsable Set-Cookie header");
            return None;
        }
    };

    let now = OffsetDateTime::now_utc();
    let expiration_time = match parsed.max_age() {
        Some(max_age) => Some(expiry_after(now, max_age)),
        None => parsed.expires_datetime(),
    };

    Some(CanonicalCookie {
        name: parsed.name().to_string(),
        value: parsed.value().to_string(),
        domain: parsed.domain().unwrap_or_default().to_string(),
        path: parsed.path().unwrap_or_default().to_string(),
        creation_time: now,
        expiration_time,
        secure: parsed.secure().unwrap_or(false),
        http_only: parsed.http_only().unwrap_or(false),
    })
}

/// `now + max_age`, saturating at the ends of the representable range.
fn expiry_after(now: OffsetDateTime, max_age: Duration) -> OffsetDateTime {
    now.checked_add(max_age).unwrap_or_else(|| {
        if max_age.is_negative() {
            PrimitiveDateTime::MIN.assume_utc()
        } else {
            PrimitiveDateTime::MAX.assume_utc()
        }
    })
}
