use crate::base::neterror::NetError;
use crate::socket::connectjob::ConnectJob;
use bytes::Bytes;
use http::{Request, Response};
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::client::conn::http1;
use hyper_util::rt::TokioIo;
use url::Url;

/// Wraps an HTTP/1.1 connection.
/// Equivalent to net::HttpStream.
pub struct HttpStream {
    sender: http1::SendRequest<Full<Bytes>>,
}

impl HttpStream {
    pub async fn send_request(
        &mut self,
        req: Request<Full<Bytes>>,
    ) -> Result<Response<Incoming>, NetError> {
        self.sender.send_request(req).await.map_err(|e| {
            tracing::debug!(error = %e, "request failed on stream");
            if e.is_parse() {
                NetError::InvalidHttpResponse
            } else if e.is_incomplete_message() {
                NetError::EmptyResponse
            } else {
                NetError::ConnectionClosed
            }
        })
    }
}

/// Opens a fresh connection per request.
#[derive(Debug, Clone, Default)]
pub struct HttpStreamFactory {
    connect_job: ConnectJob,
}

impl HttpStreamFactory {
    pub fn new(connect_job: ConnectJob) -> Self {
        Self { connect_job }
    }

    pub async fn request_stream(&self, url: &Url) -> Result<HttpStream, NetError> {
        let socket = self.connect_job.connect(url).await?;
        let io = TokioIo::new(socket);

        let (sender, conn) = http1::handshake(io).await.map_err(|e| {
            tracing::debug!(error = %e, "HTTP/1.1 handshake failed");
            NetError::ConnectionFailed
        })?;

        tokio::spawn(async move {
            if let Err(e) = conn.await {
                tracing::debug!(error = %e, "connection driver ended");
            }
        });

        Ok(HttpStream { sender })
    }
}
