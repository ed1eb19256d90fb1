//! Idle timeout enforcement on established streams
//!
//! Wraps a stream with a deadline that re-arms whenever bytes move in either
//! direction. When the deadline fires, the wrapper shuts the write side down
//! (the graceful half-close a peer reads as end-of-stream) and every
//! subsequent operation fails with [`std::io::ErrorKind::TimedOut`].

use std::future::Future;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use pin_project_lite::pin_project;
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::time::{sleep, Instant, Sleep};

pin_project! {
    /// Stream adapter enforcing an inactivity deadline.
    ///
    /// With no window configured the adapter is a transparent passthrough.
    /// The deadline is armed at construction, so building one with a window
    /// requires a runtime context.
    #[derive(Debug)]
    pub struct IdleTimeout<S> {
        #[pin]
        inner: S,
        // Boxed so `IdleTimeout` stays `Unpin` regardless of `Sleep`.
        deadline: Option<Pin<Box<Sleep>>>,
        window: Option<Duration>,
        state: IdleState,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdleState {
    Active,
    ShuttingDown,
    Expired,
}

impl<S> IdleTimeout<S> {
    /// Wrap `inner`, expiring after `window` of inactivity.
    pub fn new(inner: S, window: Option<Duration>) -> Self {
        Self {
            inner,
            deadline: window.map(|window| Box::pin(sleep(window))),
            window,
            state: IdleState::Active,
        }
    }

    /// True once the deadline has fired, whether or not the half-close has
    /// finished.
    pub fn is_expired(&self) -> bool {
        matches!(self.state, IdleState::ShuttingDown | IdleState::Expired)
    }

    /// Shared access to the wrapped stream.
    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    /// Unwrap, discarding the deadline.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

/// Push the deadline out by one window after bytes moved.
fn register_activity(window: Option<Duration>, deadline: &mut Option<Pin<Box<Sleep>>>) {
    if let (Some(window), Some(sleep)) = (window, deadline.as_mut()) {
        sleep.as_mut().reset(Instant::now() + window);
    }
}

fn deadline_elapsed(deadline: &mut Option<Pin<Box<Sleep>>>, cx: &mut Context<'_>) -> bool {
    match deadline.as_mut() {
        Some(sleep) => sleep.as_mut().poll(cx).is_ready(),
        None => false,
    }
}

/// Drive the write-side shutdown the expired deadline demanded, then fail
/// the caller's operation.
fn poll_expire<S: AsyncWrite>(
    inner: Pin<&mut S>,
    state: &mut IdleState,
    cx: &mut Context<'_>,
) -> Poll<io::Result<()>> {
    match inner.poll_shutdown(cx) {
        Poll::Ready(result) => {
            if let Err(error) = result {
                tracing::debug!(
                    target: "viaduct::connect",
                    %error,
                    "Shutdown after idle timeout failed"
                );
            }
            *state = IdleState::Expired;
            Poll::Ready(Err(timeout_error()))
        }
        Poll::Pending => Poll::Pending,
    }
}

fn timeout_error() -> io::Error {
    io::Error::new(io::ErrorKind::TimedOut, "connection idle timeout expired")
}

impl<S: AsyncRead + AsyncWrite> AsyncRead for IdleTimeout<S> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let mut this = self.project();
        match this.state {
            IdleState::Active => {}
            IdleState::ShuttingDown => return poll_expire(this.inner, this.state, cx),
            IdleState::Expired => return Poll::Ready(Err(timeout_error())),
        }

        let before = buf.filled().len();
        match this.inner.as_mut().poll_read(cx, buf) {
            Poll::Ready(Ok(())) => {
                if buf.filled().len() > before {
                    register_activity(*this.window, this.deadline);
                }
                Poll::Ready(Ok(()))
            }
            Poll::Ready(Err(error)) => Poll::Ready(Err(error)),
            Poll::Pending => {
                if deadline_elapsed(this.deadline, cx) {
                    *this.state = IdleState::ShuttingDown;
                    poll_expire(this.inner, this.state, cx)
                } else {
                    Poll::Pending
                }
            }
        }
    }
}

impl<S: AsyncRead + AsyncWrite> AsyncWrite for IdleTimeout<S> {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let mut this = self.project();
        match this.state {
            IdleState::Active => {}
            IdleState::ShuttingDown => {
                return poll_expire(this.inner, this.state, cx).map(|result| result.map(|()| 0));
            }
            IdleState::Expired => return Poll::Ready(Err(timeout_error())),
        }

        match this.inner.as_mut().poll_write(cx, buf) {
            Poll::Ready(Ok(written)) => {
                if written > 0 {
                    register_activity(*this.window, this.deadline);
                }
                Poll::Ready(Ok(written))
            }
            Poll::Ready(Err(error)) => Poll::Ready(Err(error)),
            Poll::Pending => {
                if deadline_elapsed(this.deadline, cx) {
                    *this.state = IdleState::ShuttingDown;
                    poll_expire(this.inner, this.state, cx).map(|result| result.map(|()| 0))
                } else {
                    Poll::Pending
                }
            }
        }
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        let mut this = self.project();
        match this.state {
            IdleState::Active => {}
            IdleState::ShuttingDown => return poll_expire(this.inner, this.state, cx),
            IdleState::Expired => return Poll::Ready(Err(timeout_error())),
        }

        match this.inner.as_mut().poll_flush(cx) {
            Poll::Ready(result) => Poll::Ready(result),
            Poll::Pending => {
                if deadline_elapsed(this.deadline, cx) {
                    *this.state = IdleState::ShuttingDown;
                    poll_expire(this.inner, this.state, cx)
                } else {
                    Poll::Pending
                }
            }
        }
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        let this = self.project();
        if *this.state == IdleState::ShuttingDown {
            // Finish the half-close the deadline already started; the
            // caller's shutdown succeeds even though the stream expired.
            return match poll_expire(this.inner, this.state, cx) {
                Poll::Ready(_) => Poll::Ready(Ok(())),
                Poll::Pending => Poll::Pending,
            };
        }
        this.inner.poll_shutdown(cx)
    }
}
