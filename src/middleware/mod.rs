//! Middleware layer.
//!
//! Each middleware is a [`Handler`](crate::Handler) that owns the handler it
//! wraps, so layers nest by plain construction:
//!
//! ```rust,no_run
//! use httputil::middleware::{AccessLog, AllowOrigin, TracingLog};
//! use httputil::Router;
//!
//! # fn wrap(router: Router) -> Result<(), httputil::Error> {
//! let app = AllowOrigin::new(AccessLog::new(router, TracingLog), "*")?;
//! # let _ = app;
//! # Ok(())
//! # }
//! ```
//!
//! - [`AllowOrigin`] sets `Access-Control-Allow-Origin` before delegating.
//! - [`AccessLog`] counts request and response bytes through
//!   [`RequestBodyStats`] / [`ResponseStats`], times the call, and writes one
//!   line to a [`LogSink`].

mod access_log;
mod cors;
mod stats;

pub use access_log::{AccessLog, LogSink, TracingLog};
pub use cors::AllowOrigin;
pub use stats::{ByteCounter, RequestBodyStats, ResponseStats};
