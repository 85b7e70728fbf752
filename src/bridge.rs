//! Bridge operations.
//!
//! Each operation is one stateless call: it builds a
//! [`SessionContext`] from the request, drives the storefront client (or a
//! catalog/download exchange), and returns the reshaped result together with
//! the session's exported cookies. Storefront errors are remapped once here.

use crate::base::error::{BridgeError, BridgeResult};
use crate::catalog::CatalogClient;
use crate::config::BridgeConfig;
use crate::cookies::record::CookieRecord;
use crate::download;
use crate::envelope;
use crate::mapper;
use crate::records::{
    AccountRecord, AuthenticateRequest, BagRequest, BagResult, DownloadRequest, DownloadResult,
    ListVersionsRequest, ListVersionsResult, LookupRequest, PurchaseRequest, PurchaseResult,
    RotateTokenRequest, SearchRequest, VersionInfo, VersionMetadataRecord, VersionMetadataRequest,
    VersionMetadataResult,
};
use crate::session::SessionContext;
use crate::storefront::{LoginInput, StorefrontClient, StorefrontConnector, StorefrontError};
use serde_json::Value;

impl From<StorefrontError> for BridgeError {
    fn from(err: StorefrontError) -> Self {
        match err {
            StorefrontError::AuthCodeRequired => BridgeError::AuthCodeRequired,
            StorefrontError::PasswordTokenExpired => BridgeError::PasswordTokenExpired,
            StorefrontError::LicenseRequired => BridgeError::LicenseRequired,
            StorefrontError::TemporarilyUnavailable => BridgeError::TemporarilyUnavailable,
            StorefrontError::SubscriptionRequired => BridgeError::SubscriptionRequired,
            StorefrontError::Other(message) => BridgeError::RemoteRejected(message),
        }
    }
}

/// Operations reachable through the envelope layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Search,
    Lookup,
    FetchBag,
    Authenticate,
    RotatePasswordToken,
    Purchase,
    ListVersions,
    GetVersionMetadata,
    Download,
    Version,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Operation::Search => "search",
            Operation::Lookup => "lookup",
            Operation::FetchBag => "fetch_bag",
            Operation::Authenticate => "authenticate",
            Operation::RotatePasswordToken => "rotate_password_token",
            Operation::Purchase => "purchase",
            Operation::ListVersions => "list_versions",
            Operation::GetVersionMetadata => "get_version_metadata",
            Operation::Download => "download",
            Operation::Version => "version",
        }
    }
}

/// Crate name and version reported to the host.
pub fn version() -> VersionInfo {
    VersionInfo {
        module: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

pub struct Bridge<C> {
    connector: C,
    config: BridgeConfig,
}

impl<C: StorefrontConnector> Bridge<C> {
    pub fn new(connector: C, config: BridgeConfig) -> Self {
        Self { connector, config }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    fn session(
        &self,
        device_identifier: &str,
        cookies: &[CookieRecord],
        user_agent: &str,
    ) -> BridgeResult<SessionContext<C::Client>> {
        SessionContext::create(
            device_identifier,
            cookies,
            self.config.user_agent_or_default(user_agent),
            &self.connector,
        )
    }

    pub async fn search(&self, request: &SearchRequest) -> BridgeResult<Vec<Value>> {
        CatalogClient::new(&self.config).search(request).await
    }

    pub async fn lookup(&self, request: &LookupRequest) -> BridgeResult<Value> {
        CatalogClient::new(&self.config).lookup(request).await
    }

    pub async fn fetch_bag(&self, request: &BagRequest) -> BridgeResult<BagResult> {
        let session = self.session(&request.device_identifier, &[], &request.user_agent)?;
        let bag = session.client().bag().await?;
        Ok(BagResult {
            auth_endpoint: bag.auth_endpoint,
        })
    }

    /// Fetches the bag, then logs in against its auth endpoint.
    pub async fn authenticate(&self, request: &AuthenticateRequest) -> BridgeResult<AccountRecord> {
        let session =
            self.session(&request.device_identifier, &request.cookies, &request.user_agent)?;
        let bag = session.client().bag().await?;
        let account = session
            .client()
            .login(LoginInput {
                email: request.email.clone(),
                password: request.password.clone(),
                auth_code: request.code.clone(),
                endpoint: bag.auth_endpoint,
            })
            .await?;

        let mut record =
            mapper::account_from_external(&account, &request.password, session.export_cookies());
        if record.email.is_empty() {
            record.email = request.email.clone();
        }
        if record.password.is_empty() {
            record.password = request.password.clone();
        }

        tracing::debug!(has_pod = record.pod.is_some(), "authenticated");
        Ok(record)
    }

    /// Signs in again with the stored credentials to obtain a fresh token.
    pub async fn rotate_password_token(
        &self,
        request: &RotateTokenRequest,
    ) -> BridgeResult<AccountRecord> {
        let account = &request.account;
        self.authenticate(&AuthenticateRequest {
            email: account.email.clone(),
            password: account.password.clone(),
            code: String::new(),
            cookies: account.cookie.clone(),
            device_identifier: request.device_identifier.clone(),
            user_agent: request.user_agent.clone(),
        })
        .await
    }

    pub async fn purchase(&self, request: &PurchaseRequest) -> BridgeResult<PurchaseResult> {
        let session = self.session(
            &request.device_identifier,
            &request.account.cookie,
            &request.user_agent,
        )?;

        let mut account = mapper::account_to_external(&request.account);
        let app = mapper::software_to_external(&request.app);
        session.client().purchase(&mut account, &app).await?;

        let mut updated = request.account.clone();
        updated.cookie = session.export_cookies();
        if !account.pod.is_empty() {
            updated.pod = Some(account.pod);
        }
        Ok(PurchaseResult { account: updated })
    }

    /// Resolves the app by bundle id, then lists its external versions.
    pub async fn list_versions(
        &self,
        request: &ListVersionsRequest,
    ) -> BridgeResult<ListVersionsResult> {
        let session = self.session(
            &request.device_identifier,
            &request.account.cookie,
            &request.user_agent,
        )?;

        let account = mapper::account_to_external(&request.account);
        let app = session
            .client()
            .lookup(&account, &request.bundle_identifier)
            .await?;
        let versions = session.client().list_versions(&account, &app).await?;

        let mut updated = request.account.clone();
        updated.cookie = session.export_cookies();
        Ok(ListVersionsResult {
            account: updated,
            versions,
        })
    }

    pub async fn get_version_metadata(
        &self,
        request: &VersionMetadataRequest,
    ) -> BridgeResult<VersionMetadataResult> {
        let session = self.session(
            &request.device_identifier,
            &request.account.cookie,
            &request.user_agent,
        )?;

        let account = mapper::account_to_external(&request.account);
        let app = mapper::software_to_external(&request.app);
        let metadata = session
            .client()
            .get_version_metadata(&account, &app, &request.version_id)
            .await?;

        let mut updated = request.account.clone();
        updated.cookie = session.export_cookies();
        Ok(VersionMetadataResult {
            account: updated,
            metadata: VersionMetadataRecord {
                display_version: metadata.display_version,
                release_date: metadata.release_date,
            },
        })
    }

    pub async fn download(&self, request: &DownloadRequest) -> BridgeResult<DownloadResult> {
        let session = self.session(
            &request.device_identifier,
            &request.account.cookie,
            &request.user_agent,
        )?;
        download::download(&session, &self.config, request).await
    }

    /// Decodes `payload`, runs `operation` and encodes the envelope.
    pub async fn handle(&self, operation: Operation, payload: Option<&str>) -> String {
        tracing::debug!(operation = operation.name(), "bridge call");
        match operation {
            Operation::Search => match envelope::decode_request(payload) {
                Ok(req) => envelope::respond(self.search(&req).await),
                Err(e) => envelope::failure(&e),
            },
            Operation::Lookup => match envelope::decode_request(payload) {
                Ok(req) => envelope::respond(self.lookup(&req).await),
                Err(e) => envelope::failure(&e),
            },
            Operation::FetchBag => match envelope::decode_request(payload) {
                Ok(req) => envelope::respond(self.fetch_bag(&req).await),
                Err(e) => envelope::failure(&e),
            },
            Operation::Authenticate => match envelope::decode_request(payload) {
                Ok(req) => envelope::respond(self.authenticate(&req).await),
                Err(e) => envelope::failure(&e),
            },
            Operation::RotatePasswordToken => match envelope::decode_request(payload) {
                Ok(req) => envelope::respond(self.rotate_password_token(&req).await),
                Err(e) => envelope::failure(&e),
            },
            Operation::Purchase => match envelope::decode_request(payload) {
                Ok(req) => envelope::respond(self.purchase(&req).await),
                Err(e) => envelope::failure(&e),
            },
            Operation::ListVersions => match envelope::decode_request(payload) {
                Ok(req) => envelope::respond(self.list_versions(&req).await),
                Err(e) => envelope::failure(&e),
            },
            Operation::GetVersionMetadata => match envelope::decode_request(payload) {
                Ok(req) => envelope::respond(self.get_version_metadata(&req).await),
                Err(e) => envelope::failure(&e),
            },
            Operation::Download => match envelope::decode_request(payload) {
                Ok(req) => envelope::respond(self.download(&req).await),
                Err(e) => envelope::failure(&e),
            },
            Operation::Version => envelope::success(&version()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::error::AUTH_CODE_REQUIRED_MESSAGE;

    #[test]
    fn test_storefront_error_remap() {
        let cases = [
            (StorefrontError::AuthCodeRequired, AUTH_CODE_REQUIRED_MESSAGE),
            (StorefrontError::PasswordTokenExpired, "password token is expired"),
            (StorefrontError::LicenseRequired, "License required"),
            (StorefrontError::TemporarilyUnavailable, "item is temporarily unavailable"),
            (StorefrontError::SubscriptionRequired, "subscription required"),
            (StorefrontError::Other("something odd".into()), "something odd"),
        ];
        for (err, message) in cases {
            assert_eq!(BridgeError::from(err).to_string(), message);
        }
    }

    #[test]
    fn test_version_info() {
        let info = version();
        assert_eq!(info.module, "storebridge");
        assert!(!info.version.is_empty());
    }
}
