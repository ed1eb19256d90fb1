//! Request-side data model: the request slice the connector rewrites and the
//! pre-serialized buffers it reconciles

pub mod headbuf;
pub mod request;

pub use headbuf::{HeadBuffer, WriteRecord};
pub use request::{ConnectOptions, ProxyRequest};
