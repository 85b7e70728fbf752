use crate::base::context::IoResultExt;
use crate::base::neterror::NetError;
use crate::socket::client::SocketType;
use crate::socket::tls::TlsConfig;
use tokio::net::TcpStream;
use url::Url;

/// Manages the connection process: DNS -> TCP -> SSL.
/// Roughly equivalent to net::ConnectJob.
#[derive(Debug, Clone, Default)]
pub struct ConnectJob {
    tls: TlsConfig,
}

impl ConnectJob {
    pub fn new(tls: TlsConfig) -> Self {
        Self { tls }
    }

    pub async fn connect(&self, url: &Url) -> Result<SocketType, NetError> {
        let host = url.host_str().ok_or(NetError::InvalidUrl)?;
        let port = url.port_or_known_default().ok_or(NetError::InvalidUrl)?;
        let secure = match url.scheme() {
            "https" => true,
            "http" => false,
            _ => return Err(NetError::UnknownUrlScheme),
        };

        // 1. DNS Resolution
        let addrs = tokio::net::lookup_host((host, port)).await.dns_context(host)?;

        // 2. TCP Connect, first address that answers wins
        let mut last_error = NetError::NameNotResolved;
        let mut stream = None;
        for addr in addrs {
            match TcpStream::connect(addr).await.connection_context(host, port) {
                Ok(s) => {
                    stream = Some(s);
                    break;
                }
                Err(e) => last_error = e,
            }
        }
        let stream = stream.ok_or(last_error)?;
        tracing::debug!(host = %host, port, "tcp connected");

        if !secure {
            return Ok(SocketType::Tcp(stream));
        }

        // 3. SSL Handshake
        let connector = self.tls.connector()?;
        let mut config = connector.configure().map_err(|_| NetError::SslProtocolError)?;
        if !TlsConfig::should_set_sni(host) {
            config.set_use_server_name_indication(false);
            config.set_verify_hostname(false);
        }

        let tls_stream = tokio_boring::connect(config, host, stream).await.map_err(|e| {
            tracing::debug!(host = %host, error = %e, "TLS handshake failed");
            NetError::SslProtocolError
        })?;
        let socket = SocketType::Ssl(tls_stream);
        tracing::debug!(
            host = %host,
            alpn = %String::from_utf8_lossy(socket.negotiated_alpn().unwrap_or_default()),
            "TLS established"
        );

        Ok(socket)
    }
}
