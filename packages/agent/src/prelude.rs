//! Prelude with canonical public types
//!
//! The essential surface for embedding the agent: configuration shapes, the
//! resolver, the connector, and the request-side model it rewrites.

// The agent itself and what a connect call yields
pub use crate::connect::agent::HttpProxyAgent;
pub use crate::connect::idle::IdleTimeout;
pub use crate::connect::stream::ProxyStream;

// Error types
pub use crate::error::{AgentError, ConfigurationError, ConnectionError};

// Request-side model
pub use crate::http::headbuf::{HeadBuffer, WriteRecord};
pub use crate::http::request::{ConnectOptions, ProxyRequest};

// Configuration and resolution
pub use crate::proxy::config::{IntoProxyConfig, PortField, ProxyConfig, TlsOptions};
pub use crate::proxy::descriptor::{ProxyDescriptor, DEFAULT_PLAIN_PORT, DEFAULT_SECURE_PORT};

// HTTP standard types from http crate
pub use ::http::{HeaderMap, HeaderName, HeaderValue, Method, Version};

// URL handling
pub use url::Url;
