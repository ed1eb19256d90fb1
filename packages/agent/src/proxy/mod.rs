//! Proxy configuration shapes and descriptor resolution

pub mod config;
pub mod descriptor;

pub use config::{IntoProxyConfig, PortField, ProxyConfig, TlsOptions};
pub use descriptor::{ProxyDescriptor, DEFAULT_PLAIN_PORT, DEFAULT_SECURE_PORT};

use crate::error::ConfigurationError;

/// Resolve a descriptor for a plaintext proxy at `host:port`.
pub fn http(host: impl Into<String>, port: u16) -> Result<ProxyDescriptor, ConfigurationError> {
    ProxyDescriptor::resolve(ProxyConfig {
        protocol: Some("http:".to_owned()),
        hostname: Some(host.into()),
        port: Some(PortField::from(port)),
        ..ProxyConfig::default()
    })
}

/// Resolve a descriptor for a TLS-wrapped proxy at `host:port`.
pub fn https(host: impl Into<String>, port: u16) -> Result<ProxyDescriptor, ConfigurationError> {
    ProxyDescriptor::resolve(ProxyConfig {
        protocol: Some("https:".to_owned()),
        hostname: Some(host.into()),
        port: Some(PortField::from(port)),
        ..ProxyConfig::default()
    })
}
