//! Conversions between wire records and the storefront client's entities.

use crate::config::{DEFAULT_BUY_HOST, STOREFRONT_SUFFIX};
use crate::cookies::record::CookieRecord;
use crate::records::{AccountRecord, SoftwareRecord};
use crate::storefront::{StoreAccount, StoreApp};

/// Storefront code as the client expects it: bare codes get the default
/// subregion, so `143441` becomes `143441-1`.
pub fn storefront_to_external(store: &str) -> String {
    let store = store.trim();
    if store.is_empty() || store.contains('-') {
        store.to_string()
    } else {
        format!("{}{}", store, STOREFRONT_SUFFIX)
    }
}

/// The part of a storefront code before the first `-`.
pub fn storefront_from_external(store_front: &str) -> String {
    store_front
        .split_once('-')
        .map_or(store_front, |(code, _)| code)
        .to_string()
}

pub fn join_name(first: &str, last: &str) -> String {
    format!("{} {}", first, last).trim().to_string()
}

/// First whitespace token, then the rest joined by single spaces.
pub fn split_name(name: &str) -> (String, String) {
    let mut parts = name.split_whitespace();
    let first = parts.next().unwrap_or_default().to_string();
    let last = parts.collect::<Vec<_>>().join(" ");
    (first, last)
}

/// Host serving downloads for `pod`.
pub fn store_api_host(pod: &str) -> String {
    match pod.trim() {
        "" => DEFAULT_BUY_HOST.to_string(),
        pod => format!("p{}-buy.itunes.apple.com", pod),
    }
}

pub fn account_to_external(input: &AccountRecord) -> StoreAccount {
    StoreAccount {
        email: input.email.clone(),
        password_token: input.password_token.clone(),
        directory_services_id: input.directory_services_identifier.clone(),
        name: join_name(&input.first_name, &input.last_name),
        store_front: storefront_to_external(&input.store),
        password: input.password.clone(),
        pod: input
            .pod
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string(),
    }
}

/// The client never returns the password, so the caller's is carried over.
pub fn account_from_external(
    input: &StoreAccount,
    password: &str,
    cookies: Vec<CookieRecord>,
) -> AccountRecord {
    let (first_name, last_name) = split_name(&input.name);
    AccountRecord {
        email: input.email.clone(),
        password: password.to_string(),
        apple_id: input.email.clone(),
        store: storefront_from_external(&input.store_front),
        first_name,
        last_name,
        password_token: input.password_token.clone(),
        directory_services_identifier: input.directory_services_id.clone(),
        cookie: cookies,
        pod: (!input.pod.is_empty()).then(|| input.pod.clone()),
    }
}

pub fn software_to_external(input: &SoftwareRecord) -> StoreApp {
    StoreApp {
        id: input.id,
        bundle_id: input.bundle_id.clone(),
        name: input.name.clone(),
        version: input.version.clone(),
        price: input.price.unwrap_or(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storefront_round_trip() {
        assert_eq!(storefront_to_external("143441"), "143441-1");
        assert_eq!(storefront_to_external(" 143441 "), "143441-1");
        assert_eq!(storefront_to_external("143441-2"), "143441-2");
        assert_eq!(storefront_to_external(""), "");
        assert_eq!(storefront_from_external("143441-1"), "143441");
        assert_eq!(storefront_from_external("143441"), "143441");
    }

    #[test]
    fn test_names() {
        assert_eq!(join_name("Jane", "Doe"), "Jane Doe");
        assert_eq!(join_name("Jane", ""), "Jane");
        assert_eq!(join_name("", ""), "");
        assert_eq!(split_name("  Jane  van   Doe "), ("Jane".into(), "van Doe".into()));
        assert_eq!(split_name("Jane"), ("Jane".into(), String::new()));
        assert_eq!(split_name(""), (String::new(), String::new()));
    }

    #[test]
    fn test_store_api_host() {
        assert_eq!(store_api_host(""), "p25-buy.itunes.apple.com");
        assert_eq!(store_api_host("  "), "p25-buy.itunes.apple.com");
        assert_eq!(store_api_host(" 42 "), "p42-buy.itunes.apple.com");
    }

    #[test]
    fn test_account_mapping() {
        let record = AccountRecord {
            email: "jane@example.com".into(),
            password: "pw".into(),
            store: "143441".into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            password_token: "tok".into(),
            directory_services_identifier: "999".into(),
            pod: Some("  ".into()),
            ..AccountRecord::default()
        };

        let external = account_to_external(&record);
        assert_eq!(external.store_front, "143441-1");
        assert_eq!(external.name, "Jane Doe");
        assert_eq!(external.pod, "");

        let back = account_from_external(&external, "pw", Vec::new());
        assert_eq!(back.store, "143441");
        assert_eq!(back.first_name, "Jane");
        assert_eq!(back.last_name, "Doe");
        assert_eq!(back.apple_id, "jane@example.com");
        assert_eq!(back.directory_services_identifier, "999");
        assert!(back.pod.is_none());
    }

    #[test]
    fn test_software_price_defaults() {
        let app = software_to_external(&SoftwareRecord {
            id: 1,
            ..SoftwareRecord::default()
        });
        assert_eq!(app.price, 0.0);
    }
}
