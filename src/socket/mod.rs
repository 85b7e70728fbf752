//! Socket and connection management.
//!
//! Mirrors a slice of Chromium's `net/socket/`:
//! - [`connectjob`]: DNS → TCP → TLS connection flow
//! - [`client`]: the connected socket type
//! - [`tls`]: TLS configuration with BoringSSL
//!
//! Every bridge call opens fresh connections; there is no pooling.

pub mod client;
pub mod connectjob;
pub mod tls;
