//! Session cookie management.
//!
//! Cookies live only for the duration of one bridge call: they are imported
//! from the caller's account record, attached to and harvested from every
//! storefront exchange, and exported back into the result.
//!
//! # Architecture
//!
//! | Chromium (C++) | storebridge (Rust) | Responsibility |
//! |----------------|--------------------|----------------|
//! | `net::CookieMonster` | [`CookieMonster`](monster::CookieMonster) | Mutex-guarded in-memory jar |
//! | `net::CanonicalCookie` | [`CanonicalCookie`](canonical_cookie::CanonicalCookie) | Single cookie representation |
//! | `net::CookieStore` | [`CookieJar`](jar::CookieJar) | Capability the transport talks to |
//!
//! # Example
//!
//! ```rust
//! use storebridge::cookies::jar::CookieJar;
//! use storebridge::cookies::monster::CookieMonster;
//! use storebridge::cookies::record::CookieRecord;
//! use url::Url;
//!
//! let jar = CookieMonster::new();
//! jar.import(&[CookieRecord::new("mz_at0", "token")]);
//!
//! let url = Url::parse("https://buy.itunes.apple.com/WebObjects").unwrap();
//! assert_eq!(jar.request_header(&url).as_deref(), Some("mz_at0=token"));
//! ```

pub mod canonical_cookie;
pub mod jar;
pub mod monster;
pub mod record;
