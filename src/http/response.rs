//! Fully buffered HTTP response.

use crate::base::neterror::NetError;
use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use http_body_util::BodyExt;
use hyper::body::Incoming;

/// Storefront responses are small documents, so the body is read in full
/// before the transaction completes.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl HttpResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Reads a hyper response to the end.
    pub async fn from_hyper(resp: http::Response<Incoming>) -> Result<Self, NetError> {
        let (parts, body) = resp.into_parts();
        let collected = body.collect().await.map_err(|e| {
            tracing::debug!(error = %e, "failed reading response body");
            NetError::HttpBodyError
        })?;
        Ok(Self {
            status: parts.status,
            headers: parts.headers,
            body: collected.to_bytes(),
        })
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// Body as UTF-8 text.
    pub fn text(&self) -> Result<String, NetError> {
        String::from_utf8(self.body.to_vec()).map_err(|_| NetError::InvalidUtf8)
    }

    /// Body as JSON, deserializing to type T.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, NetError> {
        serde_json::from_slice(&self.body).map_err(|_| NetError::JsonParseError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_and_json() {
        let resp = HttpResponse::new(
            StatusCode::OK,
            HeaderMap::new(),
            Bytes::from_static(br#"{"resultCount":0}"#),
        );
        assert_eq!(resp.text().unwrap(), r#"{"resultCount":0}"#);
        let value: serde_json::Value = resp.json().unwrap();
        assert_eq!(value["resultCount"], 0);
    }

    #[test]
    fn test_invalid_utf8() {
        let resp = HttpResponse::new(StatusCode::OK, HeaderMap::new(), Bytes::from_static(&[0xff, 0xfe]));
        assert_eq!(resp.text().unwrap_err(), NetError::InvalidUtf8);
        assert_eq!(resp.json::<serde_json::Value>().unwrap_err(), NetError::JsonParseError);
    }
}
