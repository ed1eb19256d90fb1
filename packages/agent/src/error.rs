//! Error taxonomy for proxy configuration and connection establishment

use std::io;
use std::time::Duration;

/// Configuration-stage errors for detailed error handling
///
/// Every variant is fatal at construction time: an agent is never built from
/// a descriptor that failed to resolve.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Proxy configuration is missing")]
    Missing,
    #[error("Proxy configuration has no host")]
    MissingHost,
    #[error("Invalid proxy URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Unsupported proxy scheme: {0}")]
    UnsupportedScheme(String),
    #[error("Invalid proxy port: {0}")]
    InvalidPort(String),
    #[error("TLS client setup failed: {0}")]
    Tls(String),
}

/// Connection-stage errors, surfaced as the result of a single connect call
///
/// The agent never retries on its own; callers decide what a failed attempt
/// means for the request.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("Invalid request target: {0}")]
    InvalidTarget(#[from] http::Error),
    #[error("Request has no origin host: target is relative and no host was supplied")]
    MissingOrigin,
    #[error("Proxy dial failed: {0}")]
    Dial(#[source] io::Error),
    #[error("TLS handshake with proxy failed: {0}")]
    Handshake(#[source] io::Error),
    #[error("Invalid TLS server name: {0}")]
    InvalidServerName(String),
    #[error("Connection to proxy timed out after {0:?}")]
    ConnectTimeout(Duration),
}

impl ConnectionError {
    /// True when the configured window elapsed before the transport was up.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, ConnectionError::ConnectTimeout(_))
    }
}

/// Umbrella error for the public construction-and-connect surface
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Connection(#[from] ConnectionError),
}
