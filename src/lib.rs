//! # httputil
//!
//! HTTP middleware for services behind a reverse proxy: a fixed
//! `Access-Control-Allow-Origin` header, and a one-line access log carrying
//! the byte counts that actually crossed the wire.
//!
//! ## The pieces
//!
//! - [`middleware::AllowOrigin`] sets the allow-origin header, then delegates.
//! - [`middleware::AccessLog`] wraps the response sink and the request body
//!   in pass-through counters, times the inner handler, and emits
//!   `remote_addr protocol method url status elapsed bytes_read bytes_written`.
//! - [`Router`] / [`Server`]: radix-tree routing via [`matchit`] and a hyper
//!   server with graceful shutdown, so the middleware has something to sit on.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use httputil::middleware::{AccessLog, AllowOrigin, TracingLog};
//! use httputil::{handler_fn, BoxFuture, Request, ResponseSink, Router, Server, StatusCode};
//! use tokio::io::{AsyncReadExt, AsyncWriteExt};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), httputil::Error> {
//!     let app = Router::new()
//!         .post("/echo", handler_fn(echo));
//!
//!     let app = AllowOrigin::new(AccessLog::new(app, TracingLog), "*")?;
//!     Server::bind("0.0.0.0:3000").serve(app).await
//! }
//!
//! fn echo<'a>(res: &'a mut dyn ResponseSink, req: &'a mut Request) -> BoxFuture<'a> {
//!     Box::pin(async move {
//!         let mut body = Vec::new();
//!         if req.body_mut().read_to_end(&mut body).await.is_err() {
//!             res.set_status(StatusCode::BAD_REQUEST);
//!             return;
//!         }
//!         let _ = res.write_all(&body).await;
//!     })
//! }
//! ```

mod body;
mod error;
mod handler;
mod request;
mod response;
mod router;
mod server;
mod sink;

pub mod middleware;

pub use body::{Body, RequestBody};
pub use error::Error;
pub use handler::{BoxFuture, Handler, HandlerFn, handler_fn};
pub use http::{HeaderMap, HeaderValue, Method, StatusCode, Version};
pub use request::Request;
pub use response::Response;
pub use router::Router;
pub use server::Server;
pub use sink::ResponseSink;
