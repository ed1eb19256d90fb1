//! Request connector: target rewriting, credential injection, transport
//! dial and idle enforcement

pub mod agent;
pub mod idle;
pub mod stream;
pub mod target;

pub(crate) mod tcp;
pub(crate) mod tls;

pub use agent::HttpProxyAgent;
pub use idle::IdleTimeout;
pub use stream::ProxyStream;
pub use target::absolute_target;
