//! `Access-Control-Allow-Origin` on every response.

use http::HeaderValue;
use http::header::ACCESS_CONTROL_ALLOW_ORIGIN;

use crate::error::Error;
use crate::handler::{BoxFuture, Handler};
use crate::request::Request;
use crate::sink::ResponseSink;

/// Sets `Access-Control-Allow-Origin` to a fixed value, then delegates.
///
/// The header is inserted before the inner handler runs, replacing any value
/// already present, so repeated application never stacks values. Preflight
/// handling and the other CORS headers are out of scope.
pub struct AllowOrigin<H> {
    inner: H,
    origin: HeaderValue,
}

impl<H: Handler> AllowOrigin<H> {
    /// Wraps `inner`; fails if `origin` is not a valid header value.
    pub fn new(inner: H, origin: &str) -> Result<Self, Error> {
        let origin = HeaderValue::from_str(origin)?;
        Ok(Self { inner, origin })
    }

    /// `Access-Control-Allow-Origin: *`
    pub fn any(inner: H) -> Self {
        Self { inner, origin: HeaderValue::from_static("*") }
    }

    pub fn origin(&self) -> &HeaderValue { &self.origin }
}

impl<H: Handler> Handler for AllowOrigin<H> {
    fn call<'a>(&'a self, res: &'a mut dyn ResponseSink, req: &'a mut Request) -> BoxFuture<'a> {
        res.headers_mut().insert(ACCESS_CONTROL_ALLOW_ORIGIN, self.origin.clone());
        self.inner.call(res, req)
    }
}
