use crate::cookies::canonical_cookie::CanonicalCookie;
use crate::cookies::jar::{parse_set_cookie, CookieJar};
use crate::cookies::record::CookieRecord;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use time::OffsetDateTime;
use url::Url;

/// Domain given to imported records that carry none: bare name/value cookies
/// from the host are meant for the buy endpoint.
pub const DEFAULT_IMPORT_DOMAIN: &str = "buy.itunes.apple.com";

/// Identity of a stored cookie. Domain is already lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CookieKey {
    domain: String,
    path: String,
    name: String,
}

impl CookieKey {
    fn of(cookie: &CanonicalCookie) -> Self {
        Self {
            domain: cookie.domain.clone(),
            path: cookie.path.clone(),
            name: cookie.name.clone(),
        }
    }
}

/// The in-memory cookie jar for one session.
/// Modeled after Chromium's `net::CookieMonster`, minus eviction and
/// persistence: the session is discarded when the bridge call ends.
///
/// Every operation takes the single lock for its whole duration, so
/// concurrent callers never observe a partial write.
#[derive(Debug, Default)]
pub struct CookieMonster {
    store: Mutex<HashMap<CookieKey, CanonicalCookie>>,
}

impl CookieMonster {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CookieKey, CanonicalCookie>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Parses a `Set-Cookie` line received from `url` and stores it.
    pub fn parse_and_save_cookie(&self, url: &Url, cookie_line: &str) {
        if let Some(cookie) = parse_set_cookie(cookie_line) {
            self.set(url, vec![cookie]);
        }
    }

    /// Get total cookie count, expired entries included.
    pub fn total_cookie_count(&self) -> usize {
        self.lock().len()
    }

    /// Check if cookie domain matches request host.
    ///
    /// A match is the host itself or a proper subdomain of it; `evil-example.com`
    /// does not match a cookie scoped to `example.com`.
    pub fn domain_matches(cookie_domain: &str, request_host: &str) -> bool {
        let cookie_domain = cookie_domain.trim();
        let cookie_domain = cookie_domain
            .strip_prefix('.')
            .unwrap_or(cookie_domain)
            .to_ascii_lowercase();
        let request_host = request_host.trim().to_ascii_lowercase();
        if cookie_domain.is_empty() || request_host.is_empty() {
            return false;
        }

        if request_host == cookie_domain {
            return true;
        }

        request_host
            .strip_suffix(cookie_domain.as_str())
            .is_some_and(|prefix| prefix.ends_with('.'))
    }

    /// Check if request path matches cookie path.
    ///
    /// `/ab` matches `/ab` and `/ab/cd` but not `/abcd`.
    pub fn path_matches(cookie_path: &str, request_path: &str) -> bool {
        if cookie_path.is_empty() || cookie_path == "/" {
            return true;
        }
        if request_path == cookie_path {
            return true;
        }

        match request_path.strip_prefix(cookie_path) {
            Some(rest) => cookie_path.ends_with('/') || rest.starts_with('/'),
            None => false,
        }
    }

    fn is_secure_scheme(url: &Url) -> bool {
        matches!(url.scheme(), "https" | "wss")
    }

    fn compare(a: (&str, &str, &str), b: (&str, &str, &str)) -> Ordering {
        a.0.cmp(b.0)
            .then_with(|| a.1.cmp(b.1))
            .then_with(|| a.2.cmp(b.2))
    }

    /// Lower-cased, dot-less domain, falling back to `fallback` when blank.
    fn canonical_domain(domain: &str, fallback: &str) -> String {
        let domain = domain.trim();
        let domain = domain.strip_prefix('.').unwrap_or(domain);
        if domain.is_empty() {
            fallback.to_ascii_lowercase()
        } else {
            domain.to_ascii_lowercase()
        }
    }

    fn canonical_path(path: &str) -> String {
        if path.trim().is_empty() {
            "/".to_string()
        } else {
            path.to_string()
        }
    }
}

impl CookieJar for CookieMonster {
    fn set(&self, url: &Url, cookies: Vec<CanonicalCookie>) {
        let host = url.host_str().unwrap_or("");
        let mut store = self.lock();

        for mut cookie in cookies {
            if cookie.name.is_empty() {
                continue;
            }

            let domain = Self::canonical_domain(&cookie.domain, host);
            if domain.is_empty() {
                tracing::debug!(name = %cookie.name, "dropping cookie without a domain");
                continue;
            }

            cookie.domain = domain;
            cookie.path = Self::canonical_path(&cookie.path);
            store.insert(CookieKey::of(&cookie), cookie);
        }
    }

    fn query(&self, url: &Url) -> Vec<CanonicalCookie> {
        let host = url.host_str().unwrap_or("");
        let path = match url.path() {
            "" => "/",
            path => path,
        };
        let secure = Self::is_secure_scheme(url);
        let now = OffsetDateTime::now_utc();

        let mut result = self
            .lock()
            .values()
            .filter(|cookie| !cookie.is_expired(now))
            .filter(|cookie| !cookie.secure || secure)
            .filter(|cookie| Self::domain_matches(&cookie.domain, host))
            .filter(|cookie| Self::path_matches(&cookie.path, path))
            .cloned()
            .collect::<Vec<_>>();

        result.sort_by(|a, b| {
            Self::compare(
                (&a.name, &a.domain, &a.path),
                (&b.name, &b.domain, &b.path),
            )
        });
        result
    }

    fn import(&self, records: &[CookieRecord]) {
        let now = OffsetDateTime::now_utc();
        let mut store = self.lock();

        for record in records {
            if record.name.is_empty() || record.value.is_empty() {
                continue;
            }

            let domain = Self::canonical_domain(
                record.domain.as_deref().unwrap_or_default(),
                DEFAULT_IMPORT_DOMAIN,
            );
            let cookie = CanonicalCookie {
                name: record.name.clone(),
                value: record.value.clone(),
                domain,
                path: Self::canonical_path(&record.path),
                creation_time: now,
                expiration_time: record.expiration_time(),
                secure: record.secure,
                http_only: record.http_only,
            };
            store.insert(CookieKey::of(&cookie), cookie);
        }
    }

    fn export(&self) -> Vec<CookieRecord> {
        let now = OffsetDateTime::now_utc();

        let mut result = self
            .lock()
            .values()
            .filter(|cookie| !cookie.is_expired(now))
            .map(CookieRecord::from)
            .collect::<Vec<_>>();

        result.sort_by(|a, b| {
            Self::compare(
                (&a.name, a.domain.as_deref().unwrap_or(""), &a.path),
                (&b.name, b.domain.as_deref().unwrap_or(""), &b.path),
            )
        });
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_domain_matches_suffix_on_dot_boundary() {
        assert!(CookieMonster::domain_matches("example.com", "example.com"));
        assert!(CookieMonster::domain_matches("example.com", "a.b.example.com"));
        assert!(CookieMonster::domain_matches(".Example.COM", "www.example.com"));
        assert!(!CookieMonster::domain_matches("example.com", "evil-example.com"));
        assert!(!CookieMonster::domain_matches("example.com", "example.com.evil"));
        assert!(!CookieMonster::domain_matches("", "example.com"));
    }

    #[test]
    fn test_path_matches() {
        assert!(CookieMonster::path_matches("", "/anything"));
        assert!(CookieMonster::path_matches("/", "/anything"));
        assert!(CookieMonster::path_matches("/ab", "/ab"));
        assert!(CookieMonster::path_matches("/ab", "/ab/cd"));
        assert!(!CookieMonster::path_matches("/ab", "/abcd"));
        assert!(CookieMonster::path_matches("/ab/", "/ab/cd"));
        assert!(!CookieMonster::path_matches("/ab", "/"));
    }

    #[test]
    fn test_set_defaults_domain_and_path() {
        let jar = CookieMonster::new();
        jar.set(
            &url("https://Buy.iTunes.Apple.com/x"),
            vec![CanonicalCookie::new("a", "1")],
        );
        let exported = jar.export();
        assert_eq!(exported.len(), 1);
        assert_eq!(exported[0].domain.as_deref(), Some("buy.itunes.apple.com"));
        assert_eq!(exported[0].path, "/");
    }

    #[test]
    fn test_set_discards_nameless_cookie() {
        let jar = CookieMonster::new();
        jar.set(&url("https://apple.com/"), vec![CanonicalCookie::new("", "1")]);
        assert_eq!(jar.total_cookie_count(), 0);
    }

    #[test]
    fn test_set_overwrites_same_identity() {
        let jar = CookieMonster::new();
        let target = url("https://apple.com/");
        jar.set(&target, vec![CanonicalCookie::new("a", "1")]);
        jar.set(&target, vec![CanonicalCookie::new("a", "2")]);
        jar.set(
            &target,
            vec![CanonicalCookie::new("a", "3").with_domain("APPLE.com")],
        );
        assert_eq!(jar.total_cookie_count(), 1);
        assert_eq!(jar.query(&target)[0].value, "3");
    }

    #[test]
    fn test_query_filters_expired_and_secure() {
        let jar = CookieMonster::new();
        let now = OffsetDateTime::now_utc();
        jar.set(
            &url("https://apple.com/"),
            vec![
                CanonicalCookie::new("old", "1").with_expiration(now - Duration::minutes(1)),
                CanonicalCookie::new("fresh", "1").with_expiration(now + Duration::hours(1)),
                CanonicalCookie::new("sec", "1").with_secure(true),
            ],
        );

        let https = jar.query(&url("https://apple.com/"));
        let names: Vec<_> = https.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["fresh", "sec"]);

        let http = jar.query(&url("http://apple.com/"));
        let names: Vec<_> = http.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["fresh"]);
    }

    #[test]
    fn test_parse_and_save_cookie() {
        let jar = CookieMonster::new();
        let target = url("https://p25-buy.itunes.apple.com/WebObjects/MZFinance.woa");
        jar.parse_and_save_cookie(&target, "itspod=25; Domain=.apple.com; Path=/");
        let cookies = jar.query(&url("https://init.itunes.apple.com/"));
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies[0].domain, "apple.com");
    }
}
