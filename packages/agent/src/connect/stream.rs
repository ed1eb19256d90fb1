//! Established proxy connection stream

use std::io;
use std::net::SocketAddr;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use pin_project_lite::pin_project;
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;

use crate::connect::idle::IdleTimeout;

pin_project! {
    /// A connection to the proxy, plaintext or TLS-wrapped, with the idle
    /// deadline already armed.
    ///
    /// Ownership passes to the caller on a successful connect; the caller
    /// writes the rewritten request over it and reads the response back.
    /// The TLS variant is boxed to keep the two variants close in size.
    #[derive(Debug)]
    #[project = ProxyStreamProj]
    pub enum ProxyStream {
        Tcp { #[pin] stream: IdleTimeout<TcpStream> },
        Tls { #[pin] stream: IdleTimeout<Box<TlsStream<TcpStream>>> },
    }
}

impl ProxyStream {
    pub(crate) fn tcp(stream: TcpStream, window: Option<Duration>) -> Self {
        ProxyStream::Tcp {
            stream: IdleTimeout::new(stream, window),
        }
    }

    pub(crate) fn tls(stream: TlsStream<TcpStream>, window: Option<Duration>) -> Self {
        ProxyStream::Tls {
            stream: IdleTimeout::new(Box::new(stream), window),
        }
    }

    /// True when the proxy leg is TLS-wrapped.
    #[must_use]
    pub fn is_tls(&self) -> bool {
        matches!(self, ProxyStream::Tls { .. })
    }

    /// True once the idle deadline has fired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        match self {
            ProxyStream::Tcp { stream } => stream.is_expired(),
            ProxyStream::Tls { stream } => stream.is_expired(),
        }
    }

    /// Address of the proxy end of the connection.
    pub fn peer_addr(&self) -> io::Result<SocketAddr> {
        self.tcp_stream().peer_addr()
    }

    /// Local address of the connection.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.tcp_stream().local_addr()
    }

    fn tcp_stream(&self) -> &TcpStream {
        match self {
            ProxyStream::Tcp { stream } => stream.get_ref(),
            ProxyStream::Tls { stream } => stream.get_ref().get_ref().0,
        }
    }
}

impl AsyncRead for ProxyStream {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match self.project() {
            ProxyStreamProj::Tcp { stream } => stream.poll_read(cx, buf),
            ProxyStreamProj::Tls { stream } => stream.poll_read(cx, buf),
        }
    }
}

impl AsyncWrite for ProxyStream {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        match self.project() {
            ProxyStreamProj::Tcp { stream } => stream.poll_write(cx, buf),
            ProxyStreamProj::Tls { stream } => stream.poll_write(cx, buf),
        }
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.project() {
            ProxyStreamProj::Tcp { stream } => stream.poll_flush(cx),
            ProxyStreamProj::Tls { stream } => stream.poll_flush(cx),
        }
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.project() {
            ProxyStreamProj::Tcp { stream } => stream.poll_shutdown(cx),
            ProxyStreamProj::Tls { stream } => stream.poll_shutdown(cx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn require_unpin<T: Unpin>() {}

    #[test]
    fn test_streams_stay_unpin_for_io_helpers() {
        // Callers drive these with the `AsyncReadExt`/`AsyncWriteExt`
        // helpers, all of which require `Unpin`.
        require_unpin::<ProxyStream>();
        require_unpin::<IdleTimeout<TcpStream>>();
        require_unpin::<IdleTimeout<Box<TlsStream<TcpStream>>>>();
    }
}
