//! End-to-end behaviour of the `/no` endpoint over real TCP.

use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

mod common;

fn xml_reason(body: &str) -> &str {
    body.strip_prefix("<Response><Reason>")
        .and_then(|rest| rest.strip_suffix("</Reason></Response>"))
        .unwrap_or_else(|| panic!("unexpected XML body {body:?}"))
}

#[tokio::test]
async fn every_supported_format_is_negotiated() {
    let server = common::start_server(|config| {
        config.rate_limit.trust_forwarded_for = true;
    })
    .await;
    let client = common::client();

    let cases = [
        ("application/json", "application/json"),
        ("text/plain", "text/plain"),
        ("text/html", "text/html"),
        ("application/xml", "application/xml"),
        ("text/html;q=0.2, application/xml;q=0.9", "application/xml"),
        ("*/*", "application/json"),
    ];

    for (i, (accept, expected)) in cases.iter().enumerate() {
        let res = client
            .get(server.url("/no"))
            .header("accept", *accept)
            .header("x-forwarded-for", format!("192.0.2.{}", i + 1))
            .send()
            .await
            .unwrap();

        assert_eq!(res.status(), 200, "accept {accept}");
        let content_type = res.headers()["content-type"].to_str().unwrap().to_string();
        assert_eq!(content_type, *expected, "accept {accept}");
        assert!(res.headers().contains_key("x-request-id"));

        let body = res.text().await.unwrap();
        let reason = match content_type.as_str() {
            "application/json" => {
                let value: serde_json::Value = serde_json::from_str(&body).unwrap();
                value["reason"].as_str().unwrap().to_string()
            }
            "application/xml" => xml_reason(&body).to_string(),
            _ => body.clone(),
        };
        assert!(
            common::REASONS.contains(&reason.as_str()),
            "unexpected reason {reason:?}"
        );
    }

    server.shutdown.trigger();
}

#[tokio::test]
async fn missing_accept_defaults_to_json() {
    let server = common::start_server(|_| {}).await;

    let raw = common::raw_request(
        server.addr,
        "GET /no HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    )
    .await;
    let (status, headers, body) = common::split_response(&raw);

    assert!(status.contains("200"), "status line {status:?}");
    assert!(headers
        .to_ascii_lowercase()
        .contains("content-type: application/json"));
    let value: serde_json::Value = serde_json::from_str(body).unwrap();
    assert!(common::REASONS.contains(&value["reason"].as_str().unwrap()));

    server.shutdown.trigger();
}

#[tokio::test]
async fn empty_accept_defaults_to_json() {
    let server = common::start_server(|_| {}).await;

    let raw = common::raw_request(
        server.addr,
        "GET /no HTTP/1.1\r\nHost: localhost\r\nAccept: \r\nConnection: close\r\n\r\n",
    )
    .await;
    let (status, headers, _) = common::split_response(&raw);

    assert!(status.contains("200"), "status line {status:?}");
    assert!(headers
        .to_ascii_lowercase()
        .contains("content-type: application/json"));

    server.shutdown.trigger();
}

#[tokio::test]
async fn unsupported_accept_is_406_with_json() {
    let server = common::start_server(|_| {}).await;

    let res = common::client()
        .get(server.url("/no"))
        .header("accept", "application/pdf")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 406);
    assert_eq!(res.headers()["content-type"], "application/json");
    let value: serde_json::Value = res.json().await.unwrap();
    assert!(common::REASONS.contains(&value["reason"].as_str().unwrap()));

    server.shutdown.trigger();
}

#[tokio::test]
async fn second_request_within_interval_is_429() {
    let server = common::start_server(|_| {}).await;
    let client = common::client();

    let first = client.get(server.url("/no")).send().await.unwrap();
    let second = client.get(server.url("/no")).send().await.unwrap();

    assert_eq!(first.status(), 200);
    assert_eq!(second.status(), 429);
    assert_eq!(second.text().await.unwrap(), "Too many requests");

    server.shutdown.trigger();
}

#[tokio::test]
async fn requests_spaced_past_interval_are_admitted() {
    let server = common::start_server(|config| {
        config.rate_limit.min_interval_ms = 200;
    })
    .await;
    let client = common::client();

    let first = client.get(server.url("/no")).send().await.unwrap();
    tokio::time::sleep(Duration::from_millis(300)).await;
    let second = client.get(server.url("/no")).send().await.unwrap();

    assert_eq!(first.status(), 200);
    assert_eq!(second.status(), 200);

    server.shutdown.trigger();
}

#[tokio::test]
async fn idle_connection_is_closed() {
    let server = common::start_server(|config| {
        config.timeouts.idle_secs = 1;
    })
    .await;

    let mut socket = TcpStream::connect(server.addr).await.unwrap();
    let mut buf = [0u8; 64];
    let read = tokio::time::timeout(Duration::from_secs(4), socket.read(&mut buf))
        .await
        .expect("idle connection was left open");

    // Either a clean EOF or a reset; both mean the server hung up.
    if let Ok(n) = read {
        assert_eq!(n, 0);
    }

    server.shutdown.trigger();
}

#[tokio::test]
async fn incomplete_request_head_hits_read_timeout() {
    let server = common::start_server(|config| {
        config.timeouts.read_secs = 1;
        config.timeouts.idle_secs = 30;
    })
    .await;

    let mut socket = TcpStream::connect(server.addr).await.unwrap();
    socket
        .write_all(b"GET /no HTTP/1.1\r\nHost: localhost\r\n")
        .await
        .unwrap();

    let started = std::time::Instant::now();
    let mut buf = Vec::new();
    let read = tokio::time::timeout(Duration::from_secs(4), socket.read_to_end(&mut buf))
        .await
        .expect("stalled request head was never cut off");

    // The idle watchdog is far away, so only the header-read timeout can
    // have closed this connection.
    assert!(started.elapsed() < Duration::from_secs(3));
    if read.is_ok() {
        assert!(!String::from_utf8_lossy(&buf).contains("200 OK"));
    }

    server.shutdown.trigger();
}

#[tokio::test]
async fn shutdown_stops_the_server() {
    let server = common::start_server(|_| {}).await;

    server.shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(5), server.handle)
        .await
        .expect("server did not stop")
        .unwrap()
        .unwrap();

    assert!(TcpStream::connect(server.addr).await.is_err());
}
