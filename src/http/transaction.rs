use crate::base::neterror::NetError;
use crate::cookies::jar::CookieJar;
use crate::http::requestbody::RequestBody;
use crate::http::response::HttpResponse;
use crate::http::streamfactory::{HttpStream, HttpStreamFactory};
use http::header::{HeaderValue, CONTENT_LENGTH, COOKIE, HOST};
use http::{HeaderMap, Method, Request};
use std::sync::Arc;
use std::time::Duration;
use url::{Position, Url};

/// Internal state machine states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    CreateStream,
    SendRequest,
    ReadBody,
    Done,
}

/// One request/response exchange over a fresh HTTP/1.1 stream.
///
/// Cookies applicable to the URL are attached from the jar before sending and
/// every `Set-Cookie` in the response is stored back into it. A failed
/// exchange is reported once; there is no retry.
pub struct HttpNetworkTransaction {
    factory: Arc<HttpStreamFactory>,
    url: Url,
    method: Method,
    request_headers: HeaderMap,
    body: RequestBody,
    cookie_jar: Option<Arc<dyn CookieJar>>,
    timeout: Option<Duration>,
    state: State,
    stream: Option<HttpStream>,
    raw_response: Option<http::Response<hyper::body::Incoming>>,
    response: Option<HttpResponse>,
}

impl HttpNetworkTransaction {
    pub fn new(factory: Arc<HttpStreamFactory>, method: Method, url: Url) -> Self {
        Self {
            factory,
            url,
            method,
            request_headers: HeaderMap::new(),
            body: RequestBody::Empty,
            cookie_jar: None,
            timeout: None,
            state: State::CreateStream,
            stream: None,
            raw_response: None,
            response: None,
        }
    }

    pub fn set_cookie_jar(&mut self, jar: Arc<dyn CookieJar>) {
        self.cookie_jar = Some(jar);
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = Some(timeout);
    }

    pub fn set_headers(&mut self, headers: HeaderMap) {
        self.request_headers = headers;
    }

    pub fn set_body(&mut self, body: RequestBody) {
        self.body = body;
    }

    /// Runs the exchange to completion, bounded by the timeout if one is set.
    pub async fn start(&mut self) -> Result<(), NetError> {
        self.state = State::CreateStream;

        let Some(limit) = self.timeout else {
            return self.do_loop().await;
        };

        let outcome = tokio::time::timeout(limit, self.do_loop()).await;
        match outcome {
            Ok(result) => result,
            Err(_) => {
                tracing::debug!(host = self.url.host_str().unwrap_or(""), ?limit, "transaction timed out");
                self.stream = None;
                Err(NetError::ConnectionTimedOut)
            }
        }
    }

    async fn do_loop(&mut self) -> Result<(), NetError> {
        loop {
            match self.state {
                State::CreateStream => {
                    self.stream = Some(self.factory.request_stream(&self.url).await?);
                    self.state = State::SendRequest;
                }
                State::SendRequest => {
                    let req = self.build_request()?;
                    let stream = self.stream.as_mut().ok_or(NetError::ConnectionClosed)?;
                    let resp = stream.send_request(req).await?;

                    tracing::debug!(
                        method = %self.method,
                        host = self.url.host_str().unwrap_or(""),
                        status = resp.status().as_u16(),
                        "response headers received"
                    );

                    if let Some(jar) = &self.cookie_jar {
                        jar.store_response_headers(&self.url, resp.headers());
                    }

                    self.raw_response = Some(resp);
                    self.state = State::ReadBody;
                }
                State::ReadBody => {
                    let raw = self.raw_response.take().ok_or(NetError::EmptyResponse)?;
                    self.response = Some(HttpResponse::from_hyper(raw).await?);
                    self.stream = None;
                    self.state = State::Done;
                }
                State::Done => return Ok(()),
            }
        }
    }

    fn build_request(&mut self) -> Result<Request<http_body_util::Full<bytes::Bytes>>, NetError> {
        let mut headers = std::mem::take(&mut self.request_headers);

        if !headers.contains_key(HOST) {
            let host = self.url.host_str().ok_or(NetError::InvalidUrl)?;
            let value = match self.url.port() {
                Some(port) => format!("{}:{}", host, port),
                None => host.to_string(),
            };
            headers.insert(
                HOST,
                HeaderValue::from_str(&value).map_err(|_| NetError::InvalidUrl)?,
            );
        }

        if let Some(cookie) = self.cookie_jar.as_ref().and_then(|jar| jar.request_header(&self.url)) {
            // Unrepresentable cookie bytes drop the header, not the request.
            if let Ok(value) = HeaderValue::from_str(&cookie) {
                headers.insert(COOKIE, value);
            }
        }

        let body = std::mem::take(&mut self.body);
        if !body.is_empty() || self.method == Method::POST {
            headers.insert(CONTENT_LENGTH, HeaderValue::from(body.len()));
        }

        let target = &self.url[Position::BeforePath..];
        let mut req = Request::builder()
            .method(self.method.clone())
            .uri(target)
            .body(body.into_full())
            .map_err(|_| NetError::InvalidUrl)?;
        *req.headers_mut() = headers;
        Ok(req)
    }

    /// Take the buffered response. Only the first call returns it.
    pub fn take_response(&mut self) -> Option<HttpResponse> {
        self.response.take()
    }
}
