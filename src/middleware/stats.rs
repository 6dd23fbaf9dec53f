//! Pass-through byte counters for the two halves of a request.
//!
//! Neither wrapper buffers, retries or reshapes anything: every call goes to
//! the wrapped value exactly once and its result comes back untouched. The
//! counters only ever observe what the inner value reported.

use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::task::{Context, Poll};

use http::{HeaderMap, StatusCode};
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

use crate::body::RequestBody;
use crate::sink::ResponseSink;

// ── Response side ─────────────────────────────────────────────────────────────

/// Records the status code and body bytes flowing through a [`ResponseSink`].
///
/// The status starts at `200 OK` and tracks the last value set; the byte
/// total is the sum of what the inner sink accepted, which can be less than
/// what was offered on partial writes. Not synchronised: read the counters
/// once the handler is done writing.
#[derive(Debug)]
pub struct ResponseStats<W> {
    inner: W,
    status: StatusCode,
    bytes_written: u64,
}

impl<W: ResponseSink> ResponseStats<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, status: StatusCode::OK, bytes_written: 0 }
    }

    pub fn status(&self) -> StatusCode { self.status }
    pub fn bytes_written(&self) -> u64 { self.bytes_written }

    pub fn into_inner(self) -> W { self.inner }
}

impl<W: ResponseSink> ResponseSink for ResponseStats<W> {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        self.inner.headers_mut()
    }

    fn set_status(&mut self, status: StatusCode) {
        self.status = status;
        self.inner.set_status(status);
    }
}

impl<W: ResponseSink> AsyncWrite for ResponseStats<W> {
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let poll = Pin::new(&mut self.inner).poll_write(cx, buf);
        if let Poll::Ready(Ok(n)) = poll {
            self.bytes_written += n as u64;
        }
        poll
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.inner).poll_flush(cx)
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.inner).poll_shutdown(cx)
    }
}

// ── Request side ──────────────────────────────────────────────────────────────

/// A read handle on a [`RequestBodyStats`] total.
///
/// The counted body is moved into the request it measures, so whoever needs
/// the number afterwards keeps one of these. Each `RequestBodyStats` owns a
/// fresh counter; clones only ever point at that one body.
#[derive(Clone, Debug, Default)]
pub struct ByteCounter(Arc<AtomicU64>);

impl ByteCounter {
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    fn add(&self, n: usize) {
        self.0.fetch_add(n as u64, Ordering::Relaxed);
    }
}

/// Records how many bytes were read through a [`RequestBody`].
///
/// Only bytes the inner stream actually produced are counted, never the size
/// of the caller's buffer. Close is forwarded and leaves the total alone.
#[derive(Debug)]
pub struct RequestBodyStats<B> {
    inner: B,
    bytes_read: ByteCounter,
}

impl<B: RequestBody> RequestBodyStats<B> {
    pub fn new(inner: B) -> Self {
        Self { inner, bytes_read: ByteCounter::default() }
    }

    pub fn bytes_read(&self) -> u64 { self.bytes_read.get() }

    pub fn counter(&self) -> ByteCounter {
        self.bytes_read.clone()
    }

    pub fn into_inner(self) -> B { self.inner }
}

impl<B: RequestBody> AsyncRead for RequestBodyStats<B> {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let before = buf.filled().len();
        let poll = Pin::new(&mut self.inner).poll_read(cx, buf);
        self.bytes_read.add(buf.filled().len().saturating_sub(before));
        poll
    }
}

impl<B: RequestBody> RequestBody for RequestBodyStats<B> {
    fn poll_close(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.inner).poll_close(cx)
    }
}
