//! Absolute-form target rewriting
//!
//! A non-transparent proxy routes by the request line alone, so a proxied
//! request must name the full origin there. This rewrites whatever target
//! the caller held (usually origin-form) into absolute form, filling scheme,
//! host and port from the connect options.

use http::uri::{PathAndQuery, Scheme, Uri};

use crate::error::ConnectionError;
use crate::http::request::ConnectOptions;
use crate::proxy::descriptor::strip_brackets;

/// Rewrite `target` into the absolute form the proxy routes by.
///
/// Pieces the target already names win over `opts`. A literal port 80 is
/// omitted from the authority; every other port, 443 included, is kept.
pub fn absolute_target(target: &str, opts: &ConnectOptions) -> Result<String, ConnectionError> {
    let uri: Uri = if target.is_empty() {
        Uri::from_static("/")
    } else {
        target.parse().map_err(http::Error::from)?
    };

    let scheme = uri.scheme().cloned().unwrap_or(Scheme::HTTP);

    let host = match uri.host() {
        Some(host) => strip_brackets(host).to_owned(),
        None => opts
            .origin_host()
            .map(str::to_owned)
            .ok_or(ConnectionError::MissingOrigin)?,
    };

    let port = uri.port_u16().or(opts.port);
    let path_and_query = uri.path_and_query().map_or("/", PathAndQuery::as_str);

    let rewritten = Uri::builder()
        .scheme(scheme)
        .authority(render_authority(&host, port))
        .path_and_query(path_and_query)
        .build()?;

    Ok(rewritten.to_string())
}

fn render_authority(host: &str, port: Option<u16>) -> String {
    let mut authority = if host.contains(':') {
        format!("[{host}]")
    } else {
        host.to_owned()
    };
    match port {
        // A literal 80 is dropped from the authority; nothing else is.
        None | Some(80) => {}
        Some(port) => {
            authority.push(':');
            authority.push_str(&port.to_string());
        }
    }
    authority
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(hostname: &str, port: u16) -> ConnectOptions {
        ConnectOptions::new(hostname, port)
    }

    #[test]
    fn test_origin_form_becomes_absolute() {
        let rewritten =
            absolute_target("/index.html", &opts("example.com", 8080)).expect("rewrites");
        assert_eq!(rewritten, "http://example.com:8080/index.html");
    }

    #[test]
    fn test_literal_port_80_dropped() {
        let rewritten = absolute_target("/", &opts("example.com", 80)).expect("rewrites");
        assert_eq!(rewritten, "http://example.com/");
    }

    #[test]
    fn test_port_443_is_kept() {
        let rewritten =
            absolute_target("https://example.com:443/secure", &ConnectOptions::default())
                .expect("rewrites");
        assert_eq!(rewritten, "https://example.com:443/secure");
    }

    #[test]
    fn test_absolute_target_keeps_its_own_authority() {
        let rewritten = absolute_target(
            "http://other.example:3000/page",
            &opts("ignored.example", 9999),
        )
        .expect("rewrites");
        assert_eq!(rewritten, "http://other.example:3000/page");
    }

    #[test]
    fn test_query_preserved() {
        let rewritten =
            absolute_target("/search?q=rust&page=2", &opts("example.com", 8080)).expect("rewrites");
        assert_eq!(rewritten, "http://example.com:8080/search?q=rust&page=2");
    }

    #[test]
    fn test_empty_target_becomes_root() {
        let rewritten = absolute_target("", &opts("example.com", 8080)).expect("rewrites");
        assert_eq!(rewritten, "http://example.com:8080/");
    }

    #[test]
    fn test_missing_origin_is_an_error() {
        assert!(matches!(
            absolute_target("/index.html", &ConnectOptions::default()),
            Err(ConnectionError::MissingOrigin)
        ));
    }

    #[test]
    fn test_ipv6_origin_bracketed_in_authority() {
        let rewritten = absolute_target("/", &opts("::1", 8080)).expect("rewrites");
        assert_eq!(rewritten, "http://[::1]:8080/");
    }

    #[test]
    fn test_opts_port_80_also_dropped() {
        let rewritten = absolute_target("/path", &opts("example.com", 80)).expect("rewrites");
        assert_eq!(rewritten, "http://example.com/path");
    }

    #[test]
    fn test_target_port_wins_over_opts() {
        let rewritten =
            absolute_target("http://example.com:3000/", &opts("example.com", 8080))
                .expect("rewrites");
        assert_eq!(rewritten, "http://example.com:3000/");
    }
}
