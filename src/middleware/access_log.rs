//! One access-log line per request.
//!
//! Line layout, space separated, fixed order:
//!
//! ```text
//! remote_addr protocol method url status elapsed bytes_read bytes_written
//! 127.0.0.1:52114 HTTP/1.1 POST / 400 41.2µs 13 22
//! ```
//!
//! `url` is the path and query only, so HTTP/2's absolute-form URIs log the
//! same as HTTP/1.1's origin form.
//! `remote_addr` is `-` when the request did not come off a socket. `elapsed`
//! uses `Duration`'s `Debug` form, which never contains a space.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::body::Body;
use crate::handler::{BoxFuture, Handler};
use crate::request::Request;
use crate::sink::ResponseSink;

use super::stats::{RequestBodyStats, ResponseStats};

/// Where access-log lines go.
///
/// Passed to [`AccessLog`] explicitly rather than reached through a global,
/// so tests can capture lines in memory.
pub trait LogSink: Send + Sync + 'static {
    fn log(&self, line: fmt::Arguments<'_>);
}

impl<L: LogSink + ?Sized> LogSink for Arc<L> {
    fn log(&self, line: fmt::Arguments<'_>) {
        (**self).log(line)
    }
}

/// Emits each line as a `tracing` event at INFO, target `access_log`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLog;

impl LogSink for TracingLog {
    fn log(&self, line: fmt::Arguments<'_>) {
        tracing::info!(target: "access_log", "{line}");
    }
}

/// Times the inner handler and logs what it read and wrote.
///
/// Per call, the response sink and the request body are wrapped in fresh
/// [`ResponseStats`] / [`RequestBodyStats`], so nothing is shared between
/// concurrent requests going through the same `AccessLog`. The request body
/// is counted as far as the inner handler read it; it is never drained on the
/// handler's behalf.
///
/// If the inner handler panics, the line for that request is lost.
pub struct AccessLog<H, L> {
    inner: H,
    log: L,
}

impl<H: Handler, L: LogSink> AccessLog<H, L> {
    pub fn new(inner: H, log: L) -> Self {
        Self { inner, log }
    }
}

impl<H: Handler, L: LogSink> Handler for AccessLog<H, L> {
    fn call<'a>(&'a self, res: &'a mut dyn ResponseSink, req: &'a mut Request) -> BoxFuture<'a> {
        Box::pin(async move {
            let start = Instant::now();

            let mut out = ResponseStats::new(res);
            let input = RequestBodyStats::new(req.replace_body(Body::empty()));
            let bytes_read = input.counter();
            req.replace_body(Body::new(input));

            self.inner.call(&mut out, req).await;

            let elapsed = start.elapsed();
            self.log.log(format_args!(
                "{} {:?} {} {} {} {:?} {} {}",
                RemoteAddr(req),
                req.version(),
                req.method(),
                req.uri().path_and_query().map_or("/", |pq| pq.as_str()),
                out.status().as_u16(),
                elapsed,
                bytes_read.get(),
                out.bytes_written(),
            ));
        })
    }
}

struct RemoteAddr<'a>(&'a Request);

impl fmt::Display for RemoteAddr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.remote_addr() {
            Some(addr) => write!(f, "{addr}"),
            None => f.write_str("-"),
        }
    }
}
