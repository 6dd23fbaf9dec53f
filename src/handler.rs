//! Handler trait and the function adapter.
//!
//! # Shape of a handler
//!
//! A handler borrows the response sink and the request for the duration of
//! one call and returns a boxed future tied to that borrow:
//!
//! ```text
//! fn echo<'a>(res: &'a mut dyn ResponseSink, req: &'a mut Request) -> BoxFuture<'a>
//! ```
//!
//! Middleware relies on the borrow: it wraps the sink, runs the inner handler,
//! and reads the wrapper's counters once the inner future resolves.
//!
//! The chain from user code to vtable call is:
//!
//! ```text
//! fn echo<'a>(…) -> BoxFuture<'a> { … }           ← user writes this
//!        ↓ router.post("/echo", handler_fn(echo))
//! Box::new(HandlerFn(echo))                         ← stored as BoxedHandler
//!        ↓
//! handler.call(&mut res, &mut req)  per request     ← one vtable dispatch
//! ```

use std::future::Future;
use std::pin::Pin;

use crate::request::Request;
use crate::sink::ResponseSink;

/// A heap-allocated, type-erased future borrowing the handler's arguments.
///
/// `Send` lets tokio move the connection task across worker threads.
pub type BoxFuture<'a> = Pin<Box<dyn Future<Output = ()> + Send + 'a>>;

/// A handler stored behind a pointer, as the router keeps them.
pub(crate) type BoxedHandler = Box<dyn Handler>;

/// A unit of request-processing logic.
///
/// Implement it directly for middleware (see [`crate::middleware`]); wrap
/// plain functions and closures with [`handler_fn`].
pub trait Handler: Send + Sync + 'static {
    fn call<'a>(&'a self, res: &'a mut dyn ResponseSink, req: &'a mut Request) -> BoxFuture<'a>;
}

impl<H: Handler + ?Sized> Handler for Box<H> {
    fn call<'a>(&'a self, res: &'a mut dyn ResponseSink, req: &'a mut Request) -> BoxFuture<'a> {
        (**self).call(res, req)
    }
}

/// Adapts a function or closure into a [`Handler`].
///
/// ```rust
/// use httputil::{handler_fn, ResponseSink, StatusCode};
///
/// let not_found = handler_fn(|res, _req| Box::pin(async move {
///     res.set_status(StatusCode::NOT_FOUND);
/// }));
/// # let _ = not_found;
/// ```
pub fn handler_fn<F>(f: F) -> HandlerFn<F>
where
    F: for<'a> Fn(&'a mut dyn ResponseSink, &'a mut Request) -> BoxFuture<'a> + Send + Sync + 'static,
{
    HandlerFn(f)
}

/// Newtype returned by [`handler_fn`].
#[derive(Clone, Copy)]
pub struct HandlerFn<F>(F);

impl<F> Handler for HandlerFn<F>
where
    F: for<'a> Fn(&'a mut dyn ResponseSink, &'a mut Request) -> BoxFuture<'a> + Send + Sync + 'static,
{
    fn call<'a>(&'a self, res: &'a mut dyn ResponseSink, req: &'a mut Request) -> BoxFuture<'a> {
        (self.0)(res, req)
    }
}
