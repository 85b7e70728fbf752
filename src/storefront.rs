//! Contract of the external storefront client.
//!
//! The login and purchase handshakes belong to a separate client library.
//! The bridge only needs the operations below, and it hands the client the
//! session's cookie jar, keychain and device identity through
//! [`StorefrontArgs`] when a [`SessionContext`](crate::session::SessionContext)
//! is created.

use crate::cookies::jar::CookieJar;
use crate::keychain::Keychain;
use crate::session::Machine;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use time::OffsetDateTime;

/// Errors reported by the storefront client.
///
/// Only the five named identities are recognized by the bridge; everything
/// else passes through with its own text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorefrontError {
    #[error("auth code is required")]
    AuthCodeRequired,

    #[error("password token is expired")]
    PasswordTokenExpired,

    #[error("license is required")]
    LicenseRequired,

    #[error("item is temporarily unavailable")]
    TemporarilyUnavailable,

    #[error("subscription required")]
    SubscriptionRequired,

    #[error("{0}")]
    Other(String),
}

/// Account as the storefront client models it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreAccount {
    pub email: String,
    pub password_token: String,
    pub directory_services_id: String,
    /// First and last name joined by a space.
    pub name: String,
    /// Storefront code with subregion, e.g. `143441-1`.
    pub store_front: String,
    pub password: String,
    /// Empty when no pod is assigned.
    pub pod: String,
}

/// App as the storefront client models it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreApp {
    pub id: i64,
    pub bundle_id: String,
    pub name: String,
    pub version: String,
    pub price: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BagOutput {
    pub auth_endpoint: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionMetadata {
    pub display_version: String,
    pub release_date: OffsetDateTime,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
    pub auth_code: String,
    pub endpoint: String,
}

/// Session capabilities the client is bound to.
#[derive(Clone)]
pub struct StorefrontArgs {
    pub cookie_jar: Arc<dyn CookieJar>,
    pub keychain: Arc<dyn Keychain>,
    pub machine: Arc<dyn Machine>,
    pub user_agent: String,
}

/// Operations the bridge drives on the storefront client.
pub trait StorefrontClient: Send + Sync {
    fn bag(&self) -> impl Future<Output = Result<BagOutput, StorefrontError>> + Send;

    fn login(
        &self,
        input: LoginInput,
    ) -> impl Future<Output = Result<StoreAccount, StorefrontError>> + Send;

    fn lookup(
        &self,
        account: &StoreAccount,
        bundle_id: &str,
    ) -> impl Future<Output = Result<StoreApp, StorefrontError>> + Send;

    /// External version identifiers, oldest first as the storefront lists them.
    fn list_versions(
        &self,
        account: &StoreAccount,
        app: &StoreApp,
    ) -> impl Future<Output = Result<Vec<String>, StorefrontError>> + Send;

    fn get_version_metadata(
        &self,
        account: &StoreAccount,
        app: &StoreApp,
        version_id: &str,
    ) -> impl Future<Output = Result<VersionMetadata, StorefrontError>> + Send;

    /// The client may assign a pod to `account` while purchasing.
    fn purchase(
        &self,
        account: &mut StoreAccount,
        app: &StoreApp,
    ) -> impl Future<Output = Result<(), StorefrontError>> + Send;
}

/// Builds a storefront client bound to one session.
pub trait StorefrontConnector: Send + Sync {
    type Client: StorefrontClient;

    fn connect(&self, args: StorefrontArgs) -> Self::Client;
}

/// Connector for builds that link no storefront client.
///
/// Catalog calls and downloads never touch the client and work normally;
/// every storefront operation fails with a fixed message.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unlinked;

#[derive(Debug, Clone, Copy, Default)]
pub struct UnlinkedClient;

pub const UNLINKED_MESSAGE: &str = "storefront client is not linked into this build";

impl UnlinkedClient {
    fn unavailable<T>() -> Result<T, StorefrontError> {
        Err(StorefrontError::Other(UNLINKED_MESSAGE.to_string()))
    }
}

impl StorefrontClient for UnlinkedClient {
    async fn bag(&self) -> Result<BagOutput, StorefrontError> {
        Self::unavailable()
    }

    async fn login(&self, _input: LoginInput) -> Result<StoreAccount, StorefrontError> {
        Self::unavailable()
    }

    async fn lookup(&self, _: &StoreAccount, _: &str) -> Result<StoreApp, StorefrontError> {
        Self::unavailable()
    }

    async fn list_versions(
        &self,
        _: &StoreAccount,
        _: &StoreApp,
    ) -> Result<Vec<String>, StorefrontError> {
        Self::unavailable()
    }

    async fn get_version_metadata(
        &self,
        _: &StoreAccount,
        _: &StoreApp,
        _: &str,
    ) -> Result<VersionMetadata, StorefrontError> {
        Self::unavailable()
    }

    async fn purchase(&self, _: &mut StoreAccount, _: &StoreApp) -> Result<(), StorefrontError> {
        Self::unavailable()
    }
}

impl StorefrontConnector for Unlinked {
    type Client = UnlinkedClient;

    fn connect(&self, _args: StorefrontArgs) -> UnlinkedClient {
        UnlinkedClient
    }
}
