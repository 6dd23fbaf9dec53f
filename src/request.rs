//! Incoming HTTP request type.

use std::collections::HashMap;
use std::mem;
use std::net::SocketAddr;

use http::{HeaderMap, Method, Uri, Version};

use crate::body::Body;

/// An incoming HTTP request.
///
/// Head fields are read-only; the body is a stream that handlers read through
/// [`body_mut`](Request::body_mut) and middleware may swap out.
pub struct Request {
    method: Method,
    uri: Uri,
    version: Version,
    headers: HeaderMap,
    remote_addr: Option<SocketAddr>,
    body: Body,
    pub(crate) params: HashMap<String, String>,
}

impl Request {
    /// Builds a request from an [`http`] head and a body.
    ///
    /// ```rust
    /// use httputil::{Body, Request};
    ///
    /// let (parts, ()) = http::Request::post("/").body(()).unwrap().into_parts();
    /// let req = Request::from_parts(parts, Body::from("hello, server"));
    /// assert_eq!(req.method(), "POST");
    /// ```
    pub fn from_parts(parts: http::request::Parts, body: Body) -> Self {
        Self {
            method: parts.method,
            uri: parts.uri,
            version: parts.version,
            headers: parts.headers,
            remote_addr: None,
            body,
            params: HashMap::new(),
        }
    }

    pub fn with_remote_addr(mut self, addr: SocketAddr) -> Self {
        self.remote_addr = Some(addr);
        self
    }

    pub fn method(&self) -> &Method { &self.method }
    pub fn uri(&self) -> &Uri { &self.uri }
    pub fn version(&self) -> Version { self.version }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body_mut(&mut self) -> &mut Body { &mut self.body }

    /// Peer address of the connection, when the request came off a socket.
    pub fn remote_addr(&self) -> Option<SocketAddr> { self.remote_addr }

    /// Swaps in a new body and returns the previous one.
    pub fn replace_body(&mut self, body: Body) -> Body {
        mem::replace(&mut self.body, body)
    }

    /// Case-insensitive header lookup. Non-UTF-8 values read as `None`.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/{id}`, `req.param("id")` on `/users/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}
