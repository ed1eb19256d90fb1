//! Plain TCP dial to the proxy

use tokio::net::TcpStream;

use crate::error::ConnectionError;

/// Establish the TCP leg to `host:port`.
///
/// Name resolution is the operating system resolver, via the address tuple
/// form of [`TcpStream::connect`]. The connect-time bound lives one level
/// up, where it covers the TLS handshake as well.
pub(crate) async fn dial(host: &str, port: u16, nodelay: bool) -> Result<TcpStream, ConnectionError> {
    tracing::debug!(target: "viaduct::connect", host = %host, port, "Dialing proxy");

    let stream = TcpStream::connect((host, port))
        .await
        .map_err(ConnectionError::Dial)?;

    if nodelay {
        if let Err(error) = stream.set_nodelay(true) {
            tracing::warn!(target: "viaduct::connect", %error, "Failed to set TCP_NODELAY");
        }
    }

    Ok(stream)
}
