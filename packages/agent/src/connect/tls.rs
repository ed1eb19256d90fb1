//! TLS transport to the proxy
//!
//! The client configuration is assembled once per agent, not per connect:
//! platform trust roots (with the bundled webpki roots as fallback), any
//! extra PEM roots from the configuration, and the ring crypto provider,
//! pinned explicitly so the process-global provider choice never matters.

use std::io::Cursor;
use std::sync::Arc;

use rustls::pki_types::ServerName;
use rustls::{ClientConfig, RootCertStore};
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;
use tokio_rustls::TlsConnector;

use crate::error::{ConfigurationError, ConnectionError};
use crate::proxy::config::TlsOptions;

/// Build the rustls client configuration for the secure dial.
pub(crate) fn client_config(options: &TlsOptions) -> Result<ClientConfig, ConfigurationError> {
    let mut root_store = RootCertStore::empty();

    if options.native_roots {
        let cert_result = rustls_native_certs::load_native_certs();
        for error in &cert_result.errors {
            tracing::warn!("Certificate load error: {}", error);
        }
        for cert in cert_result.certs {
            if let Err(error) = root_store.add(cert) {
                tracing::warn!("Failed to add system certificate: {}", error);
            }
        }
        tracing::debug!("Loaded {} system certificates", root_store.len());
    }
    if root_store.is_empty() {
        // Use webpki roots as fallback
        root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    }

    for cert_pem in &options.extra_root_certificates {
        let mut reader = Cursor::new(cert_pem.as_bytes());
        let mut added = 0usize;
        for cert in rustls_pemfile::certs(&mut reader) {
            let cert = cert.map_err(|error| {
                ConfigurationError::Tls(format!("Invalid PEM root certificate: {error}"))
            })?;
            root_store.add(cert).map_err(|error| {
                ConfigurationError::Tls(format!("Rejected extra root certificate: {error}"))
            })?;
            added += 1;
        }
        if added == 0 {
            return Err(ConfigurationError::Tls(
                "Extra root certificate PEM contained no certificates".to_owned(),
            ));
        }
    }

    let config = ClientConfig::builder_with_provider(Arc::new(
        rustls::crypto::ring::default_provider(),
    ))
    .with_safe_default_protocol_versions()
    .map_err(|error| ConfigurationError::Tls(error.to_string()))?
    .with_root_certificates(root_store)
    .with_no_client_auth();

    Ok(config)
}

/// Run the TLS handshake over an established TCP stream.
pub(crate) async fn handshake(
    config: Arc<ClientConfig>,
    server_name: &str,
    stream: TcpStream,
) -> Result<TlsStream<TcpStream>, ConnectionError> {
    let name = ServerName::try_from(server_name.to_owned())
        .map_err(|_| ConnectionError::InvalidServerName(server_name.to_owned()))?;
    let connector = TlsConnector::from(config);
    connector
        .connect(name, stream)
        .await
        .map_err(ConnectionError::Handshake)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_builds_with_webpki_fallback() {
        let options = TlsOptions {
            native_roots: false,
            ..TlsOptions::default()
        };
        let config = client_config(&options).expect("webpki fallback config");
        drop(config);
    }

    #[test]
    fn test_client_config_rejects_garbage_pem() {
        let options = TlsOptions {
            native_roots: false,
            extra_root_certificates: vec!["not a certificate".to_owned()],
            ..TlsOptions::default()
        };
        assert!(matches!(
            client_config(&options),
            Err(ConfigurationError::Tls(_))
        ));
    }
}
