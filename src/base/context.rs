//! Ergonomic error context helpers.
//!
//! Provides extension traits for converting IO errors from the connect path
//! into `NetError` values, logging the host that failed.

use crate::base::neterror::NetError;
use std::io;

/// Extension trait for adding context to IO Results.
pub trait IoResultExt<T> {
    /// Map a TCP connect error for `host:port` onto a `NetError`.
    ///
    /// # Example
    /// ```ignore
    /// use storebridge::base::context::IoResultExt;
    ///
    /// let stream = TcpStream::connect(addr).await
    ///     .connection_context("itunes.apple.com", 443)?;
    /// ```
    fn connection_context(self, host: &str, port: u16) -> Result<T, NetError>;

    /// Map a DNS resolution error for `domain` onto a `NetError`.
    fn dns_context(self, domain: &str) -> Result<T, NetError>;
}

impl<T> IoResultExt<T> for Result<T, io::Error> {
    fn connection_context(self, host: &str, port: u16) -> Result<T, NetError> {
        self.map_err(|e| {
            tracing::debug!(host = %host, port, error = %e, "connect failed");
            match e.kind() {
                io::ErrorKind::ConnectionRefused => NetError::ConnectionRefused,
                io::ErrorKind::ConnectionReset => NetError::ConnectionReset,
                io::ErrorKind::ConnectionAborted => NetError::ConnectionAborted,
                io::ErrorKind::TimedOut => NetError::ConnectionTimedOut,
                _ => NetError::ConnectionFailed,
            }
        })
    }

    fn dns_context(self, domain: &str) -> Result<T, NetError> {
        self.map_err(|e| {
            tracing::debug!(domain = %domain, error = %e, "DNS resolution failed");
            NetError::NameNotResolved
        })
    }
}
