//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. The router is itself a
//! [`Handler`], so middleware wraps the whole route table the same way it
//! wraps a single function.

use std::collections::HashMap;

use http::{Method, StatusCode};
use matchit::Router as MatchitRouter;

use crate::handler::{BoxFuture, BoxedHandler, Handler};
use crate::request::Request;
use crate::sink::ResponseSink;

/// The application router.
///
/// Build it once at startup; pass it (optionally wrapped in middleware) to
/// [`Server::serve`](crate::Server::serve). Each registration returns `self`
/// so calls chain naturally. Unmatched requests get `404 Not Found` with an
/// empty body.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves them.
    ///
    /// # Panics
    ///
    /// Panics if `path` is malformed or conflicts with an existing route.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, Box::new(handler))
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::GET, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::POST, path, handler)
    }

    pub fn put(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::PUT, path, handler)
    }

    pub fn delete(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::DELETE, path, handler)
    }

    fn lookup(&self, method: &Method, path: &str) -> Option<(&BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(method)?;
        let matched = tree.at(path).ok()?;
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((matched.value, params))
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

impl Handler for Router {
    fn call<'a>(&'a self, res: &'a mut dyn ResponseSink, req: &'a mut Request) -> BoxFuture<'a> {
        match self.lookup(req.method(), req.uri().path()) {
            Some((handler, params)) => {
                req.params = params;
                handler.call(res, req)
            }
            None => {
                res.set_status(StatusCode::NOT_FOUND);
                Box::pin(async {})
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::AsyncWriteExt;

    use super::*;
    use crate::body::Body;
    use crate::handler::handler_fn;
    use crate::response::Response;

    fn request(method: Method, path: &str) -> Request {
        let (parts, ()) = http::Request::builder()
            .method(method)
            .uri(path)
            .body(())
            .unwrap()
            .into_parts();
        Request::from_parts(parts, Body::empty())
    }

    fn app() -> Router {
        Router::new()
            .get("/users/{id}", handler_fn(|res, req| Box::pin(async move {
                let id = req.param("id").unwrap_or("unknown").to_owned();
                let _ = res.write_all(id.as_bytes()).await;
            })))
            .put("/users/{id}", handler_fn(|res, req| Box::pin(async move {
                let id = req.param("id").unwrap_or("unknown").to_owned();
                res.set_status(StatusCode::ACCEPTED);
                let _ = res.write_all(format!("updated {id}").as_bytes()).await;
            })))
            .delete("/users/{id}", handler_fn(|res, _req| Box::pin(async move {
                res.set_status(StatusCode::NO_CONTENT);
            })))
    }

    #[tokio::test]
    async fn dispatches_with_params() {
        let mut res = Response::new();
        app().call(&mut res, &mut request(Method::GET, "/users/42")).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.body(), b"42");
    }

    #[tokio::test]
    async fn dispatches_by_method() {
        let mut res = Response::new();
        app().call(&mut res, &mut request(Method::DELETE, "/users/42")).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);

        let mut res = Response::new();
        app().call(&mut res, &mut request(Method::PUT, "/users/7")).await;
        assert_eq!(res.status(), StatusCode::ACCEPTED);
        assert_eq!(res.body(), b"updated 7");
    }

    #[tokio::test]
    async fn unmatched_is_not_found() {
        let router = app();
        for (method, path) in [(Method::GET, "/nope"), (Method::POST, "/users/42")] {
            let mut res = Response::new();
            router.call(&mut res, &mut request(method, path)).await;
            assert_eq!(res.status(), StatusCode::NOT_FOUND);
            assert!(res.body().is_empty());
        }
    }
}
