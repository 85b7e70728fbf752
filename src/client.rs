//! HTTP Client with builder pattern.
//!
//! # Example
//!
//! ```rust,no_run
//! use storebridge::client::Client;
//! use std::time::Duration;
//!
//! # async fn run() -> Result<(), storebridge::base::neterror::NetError> {
//! let client = Client::builder()
//!     .timeout(Duration::from_secs(30))
//!     .user_agent("Configurator/2.17")
//!     .build();
//!
//! let resp = client.get("https://itunes.apple.com/lookup?bundleId=com.example").send().await?;
//! println!("{}", resp.status());
//! # Ok(())
//! # }
//! ```

use crate::base::neterror::NetError;
use crate::cookies::jar::CookieJar;
use crate::http::requestbody::RequestBody;
use crate::http::streamfactory::HttpStreamFactory;
use crate::http::transaction::HttpNetworkTransaction;
use crate::http::HttpResponse;
use crate::socket::connectjob::ConnectJob;
use crate::socket::tls::TlsConfig;
use http::header::USER_AGENT;
use http::{HeaderMap, Method};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// HTTP Client for making requests.
///
/// Use [`Client::builder()`] to configure and create a client.
#[derive(Clone)]
pub struct Client {
    factory: Arc<HttpStreamFactory>,
    cookie_jar: Option<Arc<dyn CookieJar>>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Create a new client with default settings.
    pub fn new() -> Self {
        ClientBuilder::default().build()
    }

    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Start building a GET request.
    pub fn get<U: AsRef<str>>(&self, url: U) -> RequestBuilder {
        self.request(Method::GET, url)
    }

    /// Start building a POST request.
    pub fn post<U: AsRef<str>>(&self, url: U) -> RequestBuilder {
        self.request(Method::POST, url)
    }

    /// Start building a request with custom method.
    pub fn request<U: AsRef<str>>(&self, method: Method, url: U) -> RequestBuilder {
        RequestBuilder {
            client: self.clone(),
            method,
            url: url.as_ref().to_string(),
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
            timeout: None,
        }
    }
}

/// Builder for creating a [`Client`].
#[derive(Default)]
pub struct ClientBuilder {
    cookie_jar: Option<Arc<dyn CookieJar>>,
    tls_config: Option<TlsConfig>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Attach and harvest cookies through `jar` on every request.
    pub fn cookie_jar(mut self, jar: Arc<dyn CookieJar>) -> Self {
        self.cookie_jar = Some(jar);
        self
    }

    pub fn tls_config(mut self, config: TlsConfig) -> Self {
        self.tls_config = Some(config);
        self
    }

    /// Default `User-Agent`; a per-request header overrides it.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> Client {
        let connect_job = ConnectJob::new(self.tls_config.unwrap_or_default());
        Client {
            factory: Arc::new(HttpStreamFactory::new(connect_job)),
            cookie_jar: self.cookie_jar,
            user_agent: self.user_agent,
            timeout: self.timeout,
        }
    }
}

/// Builder for a single request.
pub struct RequestBuilder {
    client: Client,
    method: Method,
    url: String,
    headers: HeaderMap,
    body: RequestBody,
    timeout: Option<Duration>,
}

impl RequestBuilder {
    /// Add a header. Values that are not valid header bytes are ignored.
    pub fn header<K, V>(mut self, key: K, value: V) -> Self
    where
        K: http::header::IntoHeaderName,
        V: TryInto<http::HeaderValue>,
    {
        if let Ok(val) = value.try_into() {
            self.headers.insert(key, val);
        }
        self
    }

    /// Set request body.
    pub fn body<B: Into<RequestBody>>(mut self, body: B) -> Self {
        self.body = body.into();
        self
    }

    /// Override the client timeout for this request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Send the request and buffer the response.
    pub async fn send(mut self) -> Result<HttpResponse, NetError> {
        let url = Url::parse(&self.url).map_err(|_| NetError::InvalidUrl)?;

        if !self.headers.contains_key(USER_AGENT) {
            if let Some(ua) = self.client.user_agent.as_deref() {
                if let Ok(value) = http::HeaderValue::from_str(ua) {
                    self.headers.insert(USER_AGENT, value);
                }
            }
        }

        let mut transaction =
            HttpNetworkTransaction::new(self.client.factory.clone(), self.method, url);
        transaction.set_headers(self.headers);
        transaction.set_body(self.body);
        if let Some(jar) = self.client.cookie_jar.clone() {
            transaction.set_cookie_jar(jar);
        }
        if let Some(timeout) = self.timeout.or(self.client.timeout) {
            transaction.set_timeout(timeout);
        }

        transaction.start().await?;
        transaction.take_response().ok_or(NetError::EmptyResponse)
    }
}
