//! # storebridge
//!
//! A stateless session bridge between a host application and an App Store
//! style storefront.
//!
//! Every call is self-contained: the host sends a JSON request carrying the
//! cookies it kept from the previous call, the bridge builds a fresh session
//! around them, performs one storefront operation, and returns the result
//! together with the updated cookies for the host to persist.
//!
//! ## Modules
//!
//! - [`cookies`] - Cookie jar with domain/path matching and record import/export
//! - [`session`] - Per-call session context, device identity and credential store
//! - [`storefront`] - Contract of the external storefront client
//! - [`bridge`] - One method per bridge operation, error remapping
//! - [`normalizer`] - Download property-list normalization
//! - [`catalog`] / [`download`] - Direct HTTP exchanges
//! - [`envelope`] / [`ffi`] - JSON envelope and C entry points
//! - [`http`] / [`socket`] / [`client`] - HTTP/1.1 over tokio and BoringSSL
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use storebridge::bridge::{Bridge, Operation};
//! use storebridge::config::BridgeConfig;
//! use storebridge::storefront::Unlinked;
//!
//! #[tokio::main]
//! async fn main() {
//!     let bridge = Bridge::new(Unlinked, BridgeConfig::default());
//!     let response = bridge
//!         .handle(
//!             Operation::Lookup,
//!             Some(r#"{"bundleID":"com.example.app","countryCode":"US"}"#),
//!         )
//!         .await;
//!     println!("{}", response);
//! }
//! ```

pub mod base;
pub mod bridge;
pub mod catalog;
pub mod client;
pub mod config;
pub mod cookies;
pub mod document;
pub mod download;
pub mod envelope;
pub mod ffi;
pub mod http;
pub mod keychain;
pub mod mapper;
pub mod normalizer;
pub mod records;
pub mod session;
pub mod socket;
pub mod storefront;
