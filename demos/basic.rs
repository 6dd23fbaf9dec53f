//! Minimal httputil example: an echo endpoint behind the access log and a
//! wildcard allow-origin header.
//!
//! Run with:
//!   cargo run --example basic
//!
//! Try:
//!   curl -i http://localhost:3000/users/42
//!   curl -i -X POST http://localhost:3000/echo -d 'hello, server'
//!
//! Each request prints one `access_log` line:
//!   127.0.0.1:52114 HTTP/1.1 POST /echo 200 38.1µs 13 13

use httputil::middleware::{AccessLog, AllowOrigin, TracingLog};
use httputil::{handler_fn, BoxFuture, HeaderValue, Request, ResponseSink, Router, Server, StatusCode};
use http::header::CONTENT_TYPE;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

#[tokio::main]
async fn main() -> Result<(), httputil::Error> {
    tracing_subscriber::fmt::init();

    let app = Router::new()
        .get("/users/{id}", handler_fn(get_user))
        .post("/echo",      handler_fn(echo))
        .delete("/users/{id}", handler_fn(delete_user));

    let app = AllowOrigin::new(AccessLog::new(app, TracingLog), "*")?;

    Server::bind("0.0.0.0:3000").serve(app).await
}

// GET /users/{id}
fn get_user<'a>(res: &'a mut dyn ResponseSink, req: &'a mut Request) -> BoxFuture<'a> {
    Box::pin(async move {
        let id = req.param("id").unwrap_or("unknown").to_owned();
        res.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let _ = res.write_all(format!(r#"{{"id":"{id}","name":"alice"}}"#).as_bytes()).await;
    })
}

// POST /echo reads the whole body and sends it back.
fn echo<'a>(res: &'a mut dyn ResponseSink, req: &'a mut Request) -> BoxFuture<'a> {
    Box::pin(async move {
        let mut body = Vec::new();
        if req.body_mut().read_to_end(&mut body).await.is_err() {
            res.set_status(StatusCode::BAD_REQUEST);
            return;
        }
        let _ = res.write_all(&body).await;
    })
}

// DELETE /users/{id} → 204 No Content
fn delete_user<'a>(res: &'a mut dyn ResponseSink, _req: &'a mut Request) -> BoxFuture<'a> {
    Box::pin(async move {
        res.set_status(StatusCode::NO_CONTENT);
    })
}
