//! Unified error type.

use std::fmt;

/// The error type returned by httputil's fallible operations.
///
/// Application-level failures (404, 400, etc.) are expressed as HTTP
/// responses written to a [`ResponseSink`](crate::ResponseSink), not as
/// `Error`s. This type surfaces setup and infrastructure failures: parsing a
/// bind address, binding a port, or building a header value.
#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    InvalidAddr(std::net::AddrParseError),
    InvalidHeaderValue(http::header::InvalidHeaderValue),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::InvalidAddr(e) => write!(f, "invalid socket address: {e}"),
            Self::InvalidHeaderValue(e) => write!(f, "invalid header value: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::InvalidAddr(e) => Some(e),
            Self::InvalidHeaderValue(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<std::net::AddrParseError> for Error {
    fn from(e: std::net::AddrParseError) -> Self {
        Self::InvalidAddr(e)
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(e: http::header::InvalidHeaderValue) -> Self {
        Self::InvalidHeaderValue(e)
    }
}
