//! Per-call session state.
//!
//! A [`SessionContext`] owns the cookie jar and keychain for exactly one
//! bridge call. Nothing is shared across calls: continuity comes only from the
//! cookie records the caller hands back in.

use crate::base::error::{BridgeError, BridgeResult};
use crate::cookies::jar::CookieJar;
use crate::cookies::monster::CookieMonster;
use crate::cookies::record::CookieRecord;
use crate::keychain::MemoryKeychain;
use crate::storefront::{StorefrontArgs, StorefrontConnector};
use std::path::PathBuf;
use std::sync::Arc;

/// Device identity presented to the storefront.
pub trait Machine: Send + Sync {
    /// The identifier sent as the storefront `guid`.
    fn mac_address(&self) -> BridgeResult<String>;

    fn home_directory(&self) -> PathBuf;

    /// Interactive password entry; never available inside the bridge.
    fn read_password(&self) -> BridgeResult<Vec<u8>> {
        Err(BridgeError::invalid_argument("read password is unsupported"))
    }
}

/// A machine whose identity is the caller's device identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedMachine {
    guid: String,
}

impl FixedMachine {
    pub fn new(guid: impl Into<String>) -> Self {
        Self { guid: guid.into() }
    }

    pub fn guid(&self) -> &str {
        &self.guid
    }
}

impl Machine for FixedMachine {
    fn mac_address(&self) -> BridgeResult<String> {
        if self.guid.trim().is_empty() {
            return Err(BridgeError::invalid_argument("device identifier is empty"));
        }
        Ok(self.guid.clone())
    }

    fn home_directory(&self) -> PathBuf {
        std::env::temp_dir()
    }
}

pub struct SessionContext<C> {
    guid: String,
    cookie_jar: Arc<CookieMonster>,
    keychain: Arc<MemoryKeychain>,
    client: C,
}

impl<C> std::fmt::Debug for SessionContext<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("guid", &self.guid)
            .field("cookies", &self.cookie_jar.total_cookie_count())
            .finish_non_exhaustive()
    }
}

impl<C> SessionContext<C> {
    /// Builds the session for one call.
    ///
    /// Fails with `InvalidArgument` before anything else happens when the
    /// device identifier is blank.
    pub fn create<K>(
        device_identifier: &str,
        cookies: &[CookieRecord],
        user_agent: &str,
        connector: &K,
    ) -> BridgeResult<Self>
    where
        K: StorefrontConnector<Client = C>,
    {
        let guid = device_identifier.trim();
        if guid.is_empty() {
            return Err(BridgeError::invalid_argument("device identifier is empty"));
        }

        let cookie_jar = Arc::new(CookieMonster::new());
        cookie_jar.import(cookies);
        let keychain = Arc::new(MemoryKeychain::new());

        let client = connector.connect(StorefrontArgs {
            cookie_jar: cookie_jar.clone(),
            keychain: keychain.clone(),
            machine: Arc::new(FixedMachine::new(guid)),
            user_agent: user_agent.to_string(),
        });

        tracing::debug!(
            imported = cookies.len(),
            stored = cookie_jar.total_cookie_count(),
            "session created"
        );

        Ok(Self {
            guid: guid.to_string(),
            cookie_jar,
            keychain,
            client,
        })
    }

    /// Trimmed device identifier.
    pub fn guid(&self) -> &str {
        &self.guid
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn cookie_jar(&self) -> &Arc<CookieMonster> {
        &self.cookie_jar
    }

    pub fn keychain(&self) -> &Arc<MemoryKeychain> {
        &self.keychain
    }

    /// Current jar contents, for the caller to persist.
    pub fn export_cookies(&self) -> Vec<CookieRecord> {
        self.cookie_jar.export()
    }
}
