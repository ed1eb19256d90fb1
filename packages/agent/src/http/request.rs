//! Outgoing request model seen by the connector
//!
//! The agent never runs a request pipeline of its own; it only needs the
//! slice of the request that proxy routing touches: the request-line inputs,
//! the header map, and (when the caller serialized early) the pending write
//! buffer.

use http::header::HeaderMap;
use http::{Method, Version};

use crate::http::headbuf::HeadBuffer;

/// The mutable view of an outgoing request the connector rewrites.
///
/// `target` starts as whatever the caller held, usually an origin-form path,
/// and is rewritten to absolute form during connect. `head` is only present
/// when the calling pipeline rendered the request bytes before the connector
/// ran; it is patched in place so the stale target never reaches the wire.
#[derive(Debug, Clone)]
pub struct ProxyRequest {
    pub method: Method,
    pub target: String,
    pub version: Version,
    pub headers: HeaderMap,
    pub head: Option<HeadBuffer>,
}

impl ProxyRequest {
    /// Request for `target` with the given method, HTTP/1.1, no headers.
    pub fn new(method: Method, target: impl Into<String>) -> Self {
        Self {
            method,
            target: target.into(),
            version: Version::HTTP_11,
            headers: HeaderMap::new(),
            head: None,
        }
    }

    /// Shorthand for a GET request.
    pub fn get(target: impl Into<String>) -> Self {
        Self::new(Method::GET, target)
    }

    /// Serialize the request head: request line, header block, and the
    /// terminating blank line.
    ///
    /// This is the byte sequence callers write before the body, and the
    /// replacement text used when patching a pre-serialized head buffer.
    #[must_use]
    pub fn render_head(&self) -> String {
        let mut head = String::with_capacity(64 + self.headers.len() * 32);
        head.push_str(self.method.as_str());
        head.push(' ');
        head.push_str(&self.target);
        head.push(' ');
        head.push_str(version_str(self.version));
        head.push_str("\r\n");
        for (name, value) in &self.headers {
            head.push_str(name.as_str());
            head.push_str(": ");
            head.push_str(String::from_utf8_lossy(value.as_bytes()).as_ref());
            head.push_str("\r\n");
        }
        head.push_str("\r\n");
        head
    }
}

fn version_str(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_2 => "HTTP/2.0",
        Version::HTTP_3 => "HTTP/3.0",
        _ => "HTTP/1.1",
    }
}

/// Per-request description of the origin server the proxy must route to.
#[derive(Debug, Clone, Default)]
pub struct ConnectOptions {
    /// Preferred origin host field.
    pub hostname: Option<String>,
    /// Origin host, used when `hostname` is unset.
    pub host: Option<String>,
    /// Origin port; fills the rewritten target when it names none.
    pub port: Option<u16>,
}

impl ConnectOptions {
    /// Options targeting `hostname:port`.
    pub fn new(hostname: impl Into<String>, port: u16) -> Self {
        Self {
            hostname: Some(hostname.into()),
            host: None,
            port: Some(port),
        }
    }

    /// Effective origin host: `hostname` wins over `host`; blank values do
    /// not shadow a usable one.
    #[must_use]
    pub fn origin_host(&self) -> Option<&str> {
        non_blank(self.hostname.as_deref()).or_else(|| non_blank(self.host.as_deref()))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|host| !host.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::{HeaderValue, HOST};

    #[test]
    fn test_render_head_line_and_terminator() {
        let mut req = ProxyRequest::get("http://example.com/index.html");
        req.headers
            .insert(HOST, HeaderValue::from_static("example.com"));
        let head = req.render_head();
        assert!(head.starts_with("GET http://example.com/index.html HTTP/1.1\r\n"));
        assert!(head.contains("host: example.com\r\n"));
        assert!(head.ends_with("\r\n\r\n"));
    }

    #[test]
    fn test_render_head_repeats_multivalued_headers() {
        let mut req = ProxyRequest::new(Method::POST, "/submit");
        req.headers.append(
            "x-trace",
            HeaderValue::from_static("one"),
        );
        req.headers.append(
            "x-trace",
            HeaderValue::from_static("two"),
        );
        let head = req.render_head();
        assert!(head.contains("x-trace: one\r\n"));
        assert!(head.contains("x-trace: two\r\n"));
    }

    #[test]
    fn test_origin_host_prefers_hostname() {
        let opts = ConnectOptions {
            hostname: Some("preferred.example".to_owned()),
            host: Some("legacy.example".to_owned()),
            port: None,
        };
        assert_eq!(opts.origin_host(), Some("preferred.example"));

        let blank = ConnectOptions {
            hostname: Some("  ".to_owned()),
            host: Some("legacy.example".to_owned()),
            port: None,
        };
        assert_eq!(blank.origin_host(), Some("legacy.example"));
    }
}
