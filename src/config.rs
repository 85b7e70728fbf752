//! Bridge configuration.

use std::time::Duration;
use url::Url;

/// User agent sent when the caller supplies none.
pub const DEFAULT_USER_AGENT: &str =
    "Configurator/2.17 (Macintosh; OS X 15.2; 24C5089c) AppleWebKit/0620.1.16.11.6";

/// Catalog search/lookup origin.
pub const DEFAULT_CATALOG_BASE: &str = "https://itunes.apple.com";

/// Buy host used when the account has no pod.
pub const DEFAULT_BUY_HOST: &str = "p25-buy.itunes.apple.com";

pub const DOWNLOAD_PATH: &str = "/WebObjects/MZFinance.woa/wa/volumeStoreDownloadProduct";

/// Default storefront subregion appended to bare storefront codes.
pub const STOREFRONT_SUFFIX: &str = "-1";

pub const CATALOG_TIMEOUT: Duration = Duration::from_secs(30);
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub user_agent: String,
    /// Origin the catalog `/search` and `/lookup` paths are joined onto.
    pub catalog_base: String,
    pub catalog_timeout: Duration,
    pub download_timeout: Duration,
    /// Sends the download POST here instead of the pod-derived host.
    pub buy_endpoint_override: Option<Url>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            catalog_base: DEFAULT_CATALOG_BASE.to_string(),
            catalog_timeout: CATALOG_TIMEOUT,
            download_timeout: DOWNLOAD_TIMEOUT,
            buy_endpoint_override: None,
        }
    }
}

impl BridgeConfig {
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_catalog_base(mut self, base: impl Into<String>) -> Self {
        self.catalog_base = base.into();
        self
    }

    pub fn with_catalog_timeout(mut self, timeout: Duration) -> Self {
        self.catalog_timeout = timeout;
        self
    }

    pub fn with_download_timeout(mut self, timeout: Duration) -> Self {
        self.download_timeout = timeout;
        self
    }

    pub fn with_buy_endpoint(mut self, endpoint: Url) -> Self {
        self.buy_endpoint_override = Some(endpoint);
        self
    }

    /// The caller's user agent when non-blank, else the configured one.
    pub fn user_agent_or_default<'a>(&'a self, requested: &'a str) -> &'a str {
        match requested.trim() {
            "" => &self.user_agent,
            value => value,
        }
    }
}
