use std::fmt;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use httputil::middleware::{AccessLog, AllowOrigin, LogSink};
use httputil::{handler_fn, BoxFuture, Request, ResponseSink, Router, Server, StatusCode};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

#[derive(Default)]
struct Lines(Mutex<Vec<String>>);

impl LogSink for Lines {
    fn log(&self, line: fmt::Arguments<'_>) {
        self.0.lock().unwrap().push(line.to_string());
    }
}

fn echo<'a>(res: &'a mut dyn ResponseSink, req: &'a mut Request) -> BoxFuture<'a> {
    Box::pin(async move {
        let mut body = Vec::new();
        if req.body_mut().read_to_end(&mut body).await.is_err() {
            res.set_status(StatusCode::INTERNAL_SERVER_ERROR);
            return;
        }
        res.set_status(StatusCode::BAD_REQUEST);
        let _ = res.write_all(b" - echo: ").await;
        let _ = res.write_all(&body).await;
    })
}

struct TestServer {
    addr: SocketAddr,
    lines: Arc<Lines>,
    stop: oneshot::Sender<()>,
    task: JoinHandle<Result<(), httputil::Error>>,
}

async fn start() -> TestServer {
    let lines = Arc::new(Lines::default());
    let app = Router::new()
        .post("/", handler_fn(echo))
        .get("/", handler_fn(|res, _req| Box::pin(async move {
            let _ = res.write_all(b"hello, world").await;
        })));
    let app = AllowOrigin::new(AccessLog::new(app, Arc::clone(&lines)), "*").unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop, stopped) = oneshot::channel::<()>();
    let task = tokio::spawn(
        Server::from_listener(listener).serve_with_shutdown(app, async move {
            let _ = stopped.await;
        }),
    );

    TestServer { addr, lines, stop, task }
}

impl TestServer {
    async fn roundtrip(&self, raw: &str) -> String {
        let mut stream = TcpStream::connect(self.addr).await.unwrap();
        stream.write_all(raw.as_bytes()).await.unwrap();
        let mut out = Vec::new();
        stream.read_to_end(&mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    async fn stop(self) -> Vec<String> {
        self.stop.send(()).unwrap();
        self.task.await.unwrap().unwrap();
        let lines = self.lines.0.lock().unwrap();
        lines.clone()
    }
}

fn header<'a>(response: &'a str, name: &str) -> Option<&'a str> {
    response
        .split("\r\n")
        .take_while(|line| !line.is_empty())
        .filter_map(|line| line.split_once(':'))
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.trim())
}

#[tokio::test]
async fn post_is_echoed_and_logged() {
    let server = start().await;

    let response = server
        .roundtrip(
            "POST / HTTP/1.1\r\nhost: localhost\r\ncontent-length: 13\r\nconnection: close\r\n\r\nhello, server",
        )
        .await;

    assert!(response.starts_with("HTTP/1.1 400"), "{response}");
    assert_eq!(header(&response, "access-control-allow-origin"), Some("*"));
    assert!(response.ends_with("\r\n\r\n - echo: hello, server"), "{response}");

    let lines = server.stop().await;
    assert_eq!(lines.len(), 1);
    let fields: Vec<&str> = lines[0].split(' ').collect();
    assert_eq!(fields.len(), 8, "{fields:?}");
    assert!(fields[0].starts_with("127.0.0.1:"), "{}", fields[0]);
    assert_eq!(fields[1], "HTTP/1.1");
    assert_eq!(fields[2], "POST");
    assert_eq!(fields[3], "/");
    assert_eq!(fields[4], "400");
    assert_eq!(fields[6], "13");
    assert_eq!(fields[7], "22");
}

#[tokio::test]
async fn get_carries_allow_origin() {
    let server = start().await;

    let response = server
        .roundtrip("GET / HTTP/1.1\r\nhost: localhost\r\nconnection: close\r\n\r\n")
        .await;

    assert!(response.starts_with("HTTP/1.1 200"), "{response}");
    assert_eq!(header(&response, "access-control-allow-origin"), Some("*"));
    assert!(response.ends_with("hello, world"), "{response}");

    let lines = server.stop().await;
    let fields: Vec<&str> = lines[0].split(' ').collect();
    assert_eq!((fields[2], fields[4], fields[6], fields[7]), ("GET", "200", "0", "12"));
}

#[tokio::test]
async fn unknown_route_is_404_and_still_logged() {
    let server = start().await;

    let response = server
        .roundtrip("DELETE /missing HTTP/1.1\r\nhost: localhost\r\nconnection: close\r\n\r\n")
        .await;

    assert!(response.starts_with("HTTP/1.1 404"), "{response}");
    assert_eq!(header(&response, "access-control-allow-origin"), Some("*"));

    let lines = server.stop().await;
    let fields: Vec<&str> = lines[0].split(' ').collect();
    assert_eq!((fields[2], fields[3], fields[4]), ("DELETE", "/missing", "404"));
}

#[tokio::test]
async fn truncated_body_still_reaches_middleware() {
    let server = start().await;

    let mut stream = TcpStream::connect(server.addr).await.unwrap();
    stream
        .write_all(b"POST / HTTP/1.1\r\nhost: localhost\r\ncontent-length: 13\r\n\r\nhello")
        .await
        .unwrap();
    stream.shutdown().await.unwrap();
    let mut out = Vec::new();
    stream.read_to_end(&mut out).await.unwrap();
    let response = String::from_utf8(out).unwrap();

    assert!(response.starts_with("HTTP/1.1 500"), "{response}");
    assert_eq!(header(&response, "access-control-allow-origin"), Some("*"));

    let lines = server.stop().await;
    assert_eq!(lines.len(), 1, "{lines:?}");
    let fields: Vec<&str> = lines[0].split(' ').collect();
    assert_eq!((fields[2], fields[4], fields[6], fields[7]), ("POST", "500", "5", "0"));
}

#[tokio::test]
async fn invalid_bind_address_is_an_error() {
    let app = Router::new();
    let err = Server::bind("not an address")
        .serve_with_shutdown(app, async {})
        .await
        .unwrap_err();
    assert!(matches!(err, httputil::Error::InvalidAddr(_)));
}
