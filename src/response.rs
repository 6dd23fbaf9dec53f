//! The server's concrete response sink.
//!
//! Handlers never build a [`Response`] themselves: the server hands them one
//! as `&mut dyn ResponseSink`, they set a status, add headers and write bytes,
//! and the server ships it once the handler returns. Outside the server it
//! doubles as a recorder for tests.

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use http_body_util::Full;
use tokio::io::AsyncWrite;

use crate::sink::ResponseSink;

/// An outgoing HTTP response, buffered in memory until the handler returns.
///
/// Starts as `200 OK` with no headers and an empty body.
#[derive(Debug, Default)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> StatusCode { self.status }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    pub(crate) fn into_inner(self) -> http::Response<Full<Bytes>> {
        let mut res = http::Response::new(Full::new(Bytes::from(self.body)));
        *res.status_mut() = self.status;
        *res.headers_mut() = self.headers;
        res
    }
}

impl ResponseSink for Response {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }
}

impl AsyncWrite for Response {
    fn poll_write(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        self.body.extend_from_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use http::header::CONTENT_TYPE;
    use http::HeaderValue;
    use tokio::io::AsyncWriteExt;

    use super::*;

    #[test]
    fn defaults_to_ok_and_empty() {
        let res = Response::new();
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().is_empty());
        assert!(res.body().is_empty());
    }

    #[tokio::test]
    async fn converts_into_hyper_response() {
        let mut res = Response::new();
        res.set_status(StatusCode::CREATED);
        res.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        res.write_all(b"made").await.unwrap();

        let inner = res.into_inner();
        assert_eq!(inner.status(), StatusCode::CREATED);
        assert_eq!(inner.headers()[CONTENT_TYPE], "text/plain");
    }
}
