//! Forward one plain HTTP request through a proxy from the command line.
//!
//! ```text
//! cargo run --example plain_forward -- http://127.0.0.1:3128 http://example.com/
//! ```
//!
//! The agent only establishes the connection; this example plays the HTTP
//! pipeline, writing the rewritten head and reading whatever comes back.

use anyhow::Context;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use viaduct::{AgentBuilder, ConnectOptions, HeaderValue, ProxyRequest, Url};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let usage = "usage: plain_forward <proxy-url> <origin-url>";
    let proxy = args.next().context(usage)?;
    let origin = args.next().context(usage)?;

    let agent = AgentBuilder::new().url(proxy).build()?;

    let url = Url::parse(&origin).context("origin must be an absolute URL")?;
    let host = url.host_str().context("origin URL has no host")?.to_owned();
    let port = url.port().unwrap_or(80);
    let target = match url.query() {
        Some(query) => format!("{}?{query}", url.path()),
        None => url.path().to_owned(),
    };

    let mut req = ProxyRequest::get(target);
    req.headers.insert("host", HeaderValue::from_str(&host)?);
    req.headers
        .insert("connection", HeaderValue::from_static("close"));

    let opts = ConnectOptions::new(host, port);
    let mut stream = agent.connect(&mut req, &opts).await?;

    stream.write_all(req.render_head().as_bytes()).await?;
    let mut response = Vec::new();
    stream.read_to_end(&mut response).await?;
    print!("{}", String::from_utf8_lossy(&response));
    Ok(())
}
