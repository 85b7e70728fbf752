//! Bridge error taxonomy.
//!
//! Every bridge operation returns exactly one success value or one
//! [`BridgeError`]. The `Display` text of each variant is what the host sees in
//! the `{ok: false, error}` envelope, so the storefront-identity variants carry
//! fixed user-facing messages.

use crate::base::neterror::NetError;
use thiserror::Error;

/// Message shown when the storefront asks for a second-factor code.
pub const AUTH_CODE_REQUIRED_MESSAGE: &str = "Authentication requires verification code\n\
If no verification code prompted, try logging in at https://account.apple.com to trigger the alert and fill the code in the 2FA Code here.";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// Malformed or missing caller input.
    #[error("{0}")]
    InvalidArgument(String),

    /// The request payload was present but did not decode.
    #[error("failed to decode request payload: {0}")]
    Decode(String),

    /// Transport failure.
    #[error("request failed: {0}")]
    Network(NetError),

    /// The exchange did not complete within its bound.
    #[error("request timed out")]
    Timeout,

    /// A catalog call answered with something other than 200.
    #[error("request failed with status {0}")]
    HttpStatus(u16),

    /// The storefront refused the request; carries its own text when available.
    #[error("{0}")]
    RemoteRejected(String),

    #[error("{}", AUTH_CODE_REQUIRED_MESSAGE)]
    AuthCodeRequired,

    #[error("password token is expired")]
    PasswordTokenExpired,

    #[error("License required")]
    LicenseRequired,

    #[error("item is temporarily unavailable")]
    TemporarilyUnavailable,

    #[error("subscription required")]
    SubscriptionRequired,

    /// The response shape violated the expected contract.
    #[error("{0}")]
    MalformedResponse(String),

    #[error("missing {0}")]
    MissingField(&'static str),

    #[error("invalid sinf item: {0}")]
    InvalidSinf(String),

    #[error("no results found")]
    NoResults,

    /// Credential store miss.
    #[error("key not found: {0}")]
    NotFound(String),

    /// Serialization of an outbound payload failed.
    #[error("failed to encode {0}")]
    Encoding(String),
}

pub type BridgeResult<T> = Result<T, BridgeError>;

impl BridgeError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        BridgeError::InvalidArgument(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        BridgeError::MalformedResponse(message.into())
    }

    pub fn invalid_sinf(reason: impl Into<String>) -> Self {
        BridgeError::InvalidSinf(reason.into())
    }

    /// True for failures of the network exchange itself.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            BridgeError::Network(_) | BridgeError::Timeout | BridgeError::HttpStatus(_)
        )
    }
}

impl From<NetError> for BridgeError {
    fn from(err: NetError) -> Self {
        match err {
            NetError::ConnectionTimedOut => BridgeError::Timeout,
            other => BridgeError::Network(other),
        }
    }
}
