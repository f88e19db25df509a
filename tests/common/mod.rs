//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use no_as_a_service::{HttpServer, ReasonList, ServiceConfig, Shutdown};

pub const REASONS: &[&str] = &[
    "I have to alphabetize my spice rack.",
    "My horoscope said no.",
    "Not in this economy.",
    "I'd love to, but I'm allergic to that.",
];

pub fn reasons() -> ReasonList {
    ReasonList::from_vec(REASONS.iter().map(|r| r.to_string()).collect())
}

/// A running server on an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start the service with a tweaked default config.
pub async fn start_server<F>(configure: F) -> TestServer
where
    F: FnOnce(&mut ServiceConfig),
{
    let mut config = ServiceConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    configure(&mut config);

    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, reasons());
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    TestServer {
        addr,
        shutdown,
        handle,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Send a hand-written HTTP/1.1 request and return the raw response text.
///
/// Used where reqwest would add headers of its own (it always sends `Accept`).
pub async fn raw_request(addr: SocketAddr, head: &str) -> String {
    let mut socket = TcpStream::connect(addr).await.unwrap();
    socket.write_all(head.as_bytes()).await.unwrap();

    let mut buf = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), socket.read_to_end(&mut buf))
        .await
        .expect("server did not close the connection")
        .unwrap();
    String::from_utf8_lossy(&buf).into_owned()
}

/// Split a raw response into (status line, headers block, body).
pub fn split_response(raw: &str) -> (&str, &str, &str) {
    let (head, body) = raw.split_once("\r\n\r\n").unwrap_or((raw, ""));
    let (status, headers) = head.split_once("\r\n").unwrap_or((head, ""));
    (status, headers, body)
}
