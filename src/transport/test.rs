use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use super::Connector;
use crate::config::UpstreamConfig;
use crate::http::Version;
use crate::parser::ParseError;
use crate::policy::HeaderPolicy;
use crate::proto::ExchangeError;
use crate::request::Target;

async fn read_request(sock: &mut TcpStream) -> Vec<u8> {
    let mut request = Vec::new();
    let mut buf = [0u8; 512];
    while !request.ends_with(b"\r\n\r\n") {
        let read = sock.read(&mut buf).await.unwrap();
        assert_ne!(read, 0, "origin saw EOF before the request completed");
        request.extend_from_slice(&buf[..read]);
    }
    request
}

/// Scripted origin: accept one connection, read the request, then write the
/// given fragments with a flush and a pause between each, and close.
async fn origin(fragments: &'static [&'static [u8]]) -> (SocketAddr, JoinHandle<Vec<u8>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (mut sock, _) = listener.accept().await.unwrap();
        let request = read_request(&mut sock).await;
        for fragment in fragments {
            sock.write_all(fragment).await.unwrap();
            sock.flush().await.unwrap();
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        request
    });

    (addr, server)
}

fn connector() -> Connector {
    Connector::new(Arc::new(HeaderPolicy::default()))
}

#[tokio::test]
async fn dispatch_parses_a_fragmented_head() {
    let (addr, server) = origin(&[
        b"HTTP/1.1 20",
        b"0 OK\r\nContent-Typ",
        b"e: text/html\r\nX-Accel-Redirect: /internal\r\n\r\n",
        b"hello",
    ])
    .await;

    let target = Target::new("origin.test", addr).unwrap();
    let mut response = connector().dispatch(&target).await.unwrap();

    assert_eq!(response.head.version, Version::HTTP_11);
    assert_eq!(response.head.status.code(), 200);
    assert_eq!(
        response
            .head
            .headers
            .get("content-type")
            .unwrap()
            .as_bytes(),
        b"text/html"
    );
    assert!(!response.head.headers.contains("x-accel-redirect"));
    assert!(response.head.headers.contains("server"));
    assert!(response.head.headers.contains("date"));

    // body bytes: whatever rode along with the head plus the rest of the stream
    let mut body = response.body_prefix.to_vec();
    response.stream.read_to_end(&mut body).await.unwrap();
    assert_eq!(body, b"hello");

    let request = server.await.unwrap();
    assert_eq!(
        request,
        b"GET / HTTP/1.1\r\nHost: origin.test\r\nConnection: close\r\n\r\n"
    );
}

#[tokio::test]
async fn dispatch_fails_on_invalid_upstream_header() {
    let (addr, server) = origin(&[b"HTTP/1.1 200 OK\r\nNot A Header\r\n\r\n"]).await;

    let target = Target::new("origin.test", addr).unwrap();
    let err = connector().dispatch(&target).await.unwrap_err();

    assert!(matches!(
        err,
        ExchangeError::InvalidHeader(ParseError::InvalidHeaderName)
    ));
    server.await.unwrap();
}

#[tokio::test]
async fn dispatch_times_out_on_a_silent_origin() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let (mut sock, _) = listener.accept().await.unwrap();
        let _ = read_request(&mut sock).await;
        // hold the connection open without answering
        tokio::time::sleep(Duration::from_secs(30)).await;
        drop(sock);
    });

    let config = UpstreamConfig {
        read_timeout: Duration::from_millis(50),
        ..UpstreamConfig::default()
    };
    let connector = Connector::with_config(Arc::new(HeaderPolicy::default()), config);
    let target = Target::new("origin.test", addr).unwrap();

    let err = connector.dispatch(&target).await.unwrap_err();
    match err {
        ExchangeError::Transport(err) => {
            assert_eq!(err.kind(), std::io::ErrorKind::TimedOut)
        }
        other => panic!("expected transport timeout, got {other:?}"),
    }
    server.abort();
}

#[tokio::test]
async fn dispatch_fails_when_origin_closes_mid_head() {
    let (addr, server) = origin(&[b"HTTP/1.1 200 OK\r\nContent-Ty"]).await;

    let target = Target::new("origin.test", addr).unwrap();
    let err = connector().dispatch(&target).await.unwrap_err();

    assert!(matches!(err, ExchangeError::Transport(_)));
    server.await.unwrap();
}
