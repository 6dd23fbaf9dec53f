//! Request body stream.
//!
//! The server streams the inbound payload straight off the connection
//! (`IncomingBody`); tests and callers building requests by hand usually
//! pass in-memory bytes. Middleware can swap either for any other
//! [`RequestBody`], which is how byte counting is layered in.

use std::io::{self, Cursor};
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::{Buf, Bytes};
use hyper::body::{Body as _, Incoming};
use tokio::io::{AsyncRead, ReadBuf};

/// A readable, closeable request payload.
///
/// Reads go through [`AsyncRead`]. Closing is explicit so wrappers can
/// forward it; most in-memory bodies have nothing to release and keep the
/// default no-op.
pub trait RequestBody: AsyncRead + Send + Unpin {
    fn poll_close(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

impl RequestBody for Cursor<Bytes> {}

impl RequestBody for &'static [u8] {}

impl RequestBody for tokio::io::Empty {}

impl<B: RequestBody + ?Sized> RequestBody for Box<B> {
    fn poll_close(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut **self).poll_close(cx)
    }
}

/// A request payload read frame by frame from a hyper connection.
///
/// Nothing is buffered beyond the current data frame. Trailers are skipped.
/// Transport failures (peer gone, body shorter than `content-length`)
/// surface as read errors.
pub(crate) struct IncomingBody {
    incoming: Incoming,
    chunk: Bytes,
}

impl IncomingBody {
    pub(crate) fn new(incoming: Incoming) -> Self {
        Self { incoming, chunk: Bytes::new() }
    }
}

impl AsyncRead for IncomingBody {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        while self.chunk.is_empty() {
            match Pin::new(&mut self.incoming).poll_frame(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(None) => return Poll::Ready(Ok(())),
                Poll::Ready(Some(Err(e))) => return Poll::Ready(Err(io::Error::other(e))),
                Poll::Ready(Some(Ok(frame))) => {
                    if let Ok(data) = frame.into_data() {
                        self.chunk = data;
                    }
                }
            }
        }

        let n = buf.remaining().min(self.chunk.len());
        buf.put_slice(&self.chunk[..n]);
        self.chunk.advance(n);
        Poll::Ready(Ok(()))
    }
}

impl RequestBody for IncomingBody {}

/// The type-erased body carried by [`Request`](crate::Request).
pub struct Body {
    inner: Box<dyn RequestBody>,
}

impl Body {
    pub fn new(body: impl RequestBody + 'static) -> Self {
        Self { inner: Box::new(body) }
    }

    pub fn empty() -> Self {
        Self::new(tokio::io::empty())
    }

    /// Closes the underlying stream.
    pub async fn close(&mut self) -> io::Result<()> {
        std::future::poll_fn(|cx| Pin::new(&mut *self).poll_close(cx)).await
    }
}

impl Default for Body {
    fn default() -> Self { Self::empty() }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Self::new(Cursor::new(bytes))
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from(Bytes::from(bytes))
    }
}

impl From<&'static str> for Body {
    fn from(s: &'static str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl From<String> for Body {
    fn from(s: String) -> Self {
        Self::from(Bytes::from(s))
    }
}

impl AsyncRead for Body {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Pin::new(&mut *self.inner).poll_read(cx, buf)
    }
}

impl RequestBody for Body {
    fn poll_close(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut *self.inner).poll_close(cx)
    }
}
