//! Viaduct Public API
//!
//! Connection agent for non-transparent forward HTTP proxies with a fluent
//! builder pattern. The agent dials the configured proxy instead of the
//! origin, rewrites request targets into absolute form, injects
//! `Proxy-Authorization`, and hands the connected socket back to the calling
//! HTTP pipeline.
//!
//! ```no_run
//! use viaduct::{AgentBuilder, ConnectOptions, ProxyRequest};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let agent = AgentBuilder::new()
//!     .url("http://proxy.internal:3128")
//!     .basic_auth("svc", "secret")
//!     .build()?;
//!
//! let mut req = ProxyRequest::get("/status");
//! let opts = ConnectOptions::new("origin.example", 8080);
//! let stream = agent.connect(&mut req, &opts).await?;
//! # let _ = stream;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod builder;

// Re-export all public API components
pub use builder::*;

// Re-export important types from the agent package
pub use viaduct_agent::{
    AgentError, ConfigurationError, ConnectOptions, ConnectionError, HeadBuffer, HttpProxyAgent,
    IdleTimeout, IntoProxyConfig, PortField, ProxyConfig, ProxyDescriptor, ProxyRequest,
    ProxyStream, TlsOptions, WriteRecord,
};
pub use viaduct_agent::{HeaderMap, HeaderName, HeaderValue, Method, Url, Version};

// Main builder type alias for convenience
pub use builder::core::AgentBuilder;

/// Main entry point providing static construction methods
pub struct ForwardProxy;

impl ForwardProxy {
    /// Build an agent for a plaintext proxy from any accepted configuration
    /// shape: a URI string, a parsed [`Url`], or a [`ProxyConfig`].
    pub fn http(input: impl IntoProxyConfig) -> Result<HttpProxyAgent, AgentError> {
        Ok(HttpProxyAgent::new(input)?)
    }

    /// Build an agent that reaches its proxy over TLS.
    ///
    /// Forces the secure transport regardless of the configured scheme; the
    /// port still defaults to 443 when the input names none.
    pub fn https(input: impl IntoProxyConfig) -> Result<HttpProxyAgent, AgentError> {
        let mut config = input.into_proxy_config()?;
        config.secure = Some(true);
        Ok(HttpProxyAgent::new(config)?)
    }

    /// Build an agent from the `HTTP_PROXY` / `http_proxy` environment
    /// variables.
    pub fn from_env() -> Result<HttpProxyAgent, AgentError> {
        Ok(HttpProxyAgent::new(ProxyConfig::from_env()?)?)
    }

    /// Start a fluent builder.
    ///
    /// Shorthand for `AgentBuilder::new()`
    #[must_use]
    pub fn builder() -> AgentBuilder {
        AgentBuilder::new()
    }
}

/// Build an agent for a plaintext proxy
///
/// Shorthand for `ForwardProxy::http()`
pub fn http(input: impl IntoProxyConfig) -> Result<HttpProxyAgent, AgentError> {
    ForwardProxy::http(input)
}

/// Build an agent that reaches its proxy over TLS
///
/// Shorthand for `ForwardProxy::https()`
pub fn https(input: impl IntoProxyConfig) -> Result<HttpProxyAgent, AgentError> {
    ForwardProxy::https(input)
}

/// Start a fluent builder
///
/// Shorthand for `ForwardProxy::builder()`
#[must_use]
pub fn builder() -> AgentBuilder {
    ForwardProxy::builder()
}
