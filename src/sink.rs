//! The write side of a request: headers, status, body bytes.

use http::{HeaderMap, StatusCode};
use tokio::io::AsyncWrite;

/// Where a handler sends its response.
///
/// Body bytes go through [`AsyncWrite`], so `tokio::io::AsyncWriteExt`
/// (`write_all`, `write`, …) works on any sink, including
/// `&mut dyn ResponseSink`. Headers must be set before the first body
/// write; what a sink does with late header changes is up to the sink.
pub trait ResponseSink: AsyncWrite + Send + Unpin {
    fn headers_mut(&mut self) -> &mut HeaderMap;

    fn set_status(&mut self, status: StatusCode);
}

impl<T: ResponseSink + ?Sized> ResponseSink for &mut T {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        (**self).headers_mut()
    }

    fn set_status(&mut self, status: StatusCode) {
        (**self).set_status(status)
    }
}
