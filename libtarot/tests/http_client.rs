//! HTTP client integration tests
//!
//! These tests run `HttpApi` against a one-shot local HTTP responder to verify:
//! - Request method, path and body for each endpoint
//! - Decoding of successful responses
//! - Non-success statuses surfacing as `ApiError::Request`
//! - Malformed bodies surfacing as `ApiError::Decode`
//! - Unreachable servers surfacing as `ApiError::Transport`

use libtarot::api::mock::fixtures;
use libtarot::api::{HttpApi, TarotApi};
use libtarot::error::{ApiError, TarotError};
use libtarot::types::{DeckId, ReadingId, SpreadId};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A request as seen by the test server
#[derive(Debug)]
struct Captured {
    request_line: String,
    body: String,
}

/// Serve exactly one request with the given status and body
async fn serve_once(status: &'static str, body: String) -> (String, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let captured = read_request(&mut socket).await;

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        captured
    });

    (format!("http://{}/api", addr), handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> Captured {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    // Read until the end of the headers
    let header_end = loop {
        let n = socket.read(&mut chunk).await.unwrap();
        assert!(n > 0, "client closed before sending headers");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = headers
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    Captured {
        request_line: headers.lines().next().unwrap_or_default().to_string(),
        body: String::from_utf8_lossy(&buf[header_end..]).to_string(),
    }
}

/// Client that never routes loopback traffic through an environment proxy
fn local_api(base: &str) -> HttpApi {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    HttpApi::with_client(base, client).unwrap()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

#[tokio::test]
async fn test_list_decks_decodes_array() {
    let body = serde_json::to_string(&vec![fixtures::deck(1, "Rider-Waite")]).unwrap();
    let (base, server) = serve_once("200 OK", body).await;

    let api = local_api(&base);
    let decks = api.list_decks().await.unwrap();

    assert_eq!(decks.len(), 1);
    assert_eq!(decks[0].id, DeckId(1));
    assert_eq!(decks[0].name, "Rider-Waite");

    let captured = server.await.unwrap();
    assert_eq!(captured.request_line, "GET /api/decks/ HTTP/1.1");
}

#[tokio::test]
async fn test_list_spreads_includes_positions() {
    let body = serde_json::to_string(&vec![fixtures::three_card_spread(5)]).unwrap();
    let (base, server) = serve_once("200 OK", body).await;

    let api = local_api(&base);
    let spreads = api.list_spreads().await.unwrap();

    assert_eq!(spreads[0].id, SpreadId(5));
    assert_eq!(spreads[0].num_cards, 3);
    assert_eq!(spreads[0].positions.len(), 3);

    let captured = server.await.unwrap();
    assert_eq!(captured.request_line, "GET /api/spreads/ HTTP/1.1");
}

#[tokio::test]
async fn test_create_reading_posts_json_body() {
    let body = serde_json::to_string(&fixtures::reading(42)).unwrap();
    let (base, server) = serve_once("201 Created", body).await;

    let api = local_api(&base);
    let reading = api
        .create_reading(DeckId(1), SpreadId(5), "Will it rain?")
        .await
        .unwrap();

    assert_eq!(reading.id, ReadingId(42));
    assert_eq!(reading.cards.len(), 3);

    let captured = server.await.unwrap();
    assert_eq!(captured.request_line, "POST /api/readings/ HTTP/1.1");
    let sent: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
    assert_eq!(
        sent,
        serde_json::json!({"deck_id": 1, "spread_id": 5, "question": "Will it rain?"})
    );
}

#[tokio::test]
async fn test_get_reading_uses_id_path() {
    let body = serde_json::to_string(&fixtures::reading(7)).unwrap();
    let (base, server) = serve_once("200 OK", body).await;

    let api = local_api(&base);
    let reading = api.get_reading(ReadingId(7)).await.unwrap();
    assert_eq!(reading.id, ReadingId(7));

    let captured = server.await.unwrap();
    assert_eq!(captured.request_line, "GET /api/readings/7/ HTTP/1.1");
}

#[tokio::test]
async fn test_error_status_carries_status_and_body() {
    let (base, server) = serve_once(
        "400 Bad Request",
        r#"{"spread_id":["Spread not found."]}"#.to_string(),
    )
    .await;

    let api = local_api(&base);
    let err = api
        .create_reading(DeckId(1), SpreadId(999), "Anything?")
        .await
        .unwrap_err();

    match err {
        TarotError::Api(ApiError::Request { status, body }) => {
            assert_eq!(status, 400);
            assert!(body.contains("Spread not found."));
        }
        other => panic!("expected request error, got {:?}", other),
    }
    server.await.unwrap();
}

#[tokio::test]
async fn test_not_found_reading() {
    let (base, server) = serve_once("404 Not Found", r#"{"detail":"Not found."}"#.to_string()).await;

    let api = local_api(&base);
    let err = api.get_reading(ReadingId(12345)).await.unwrap_err();

    assert!(matches!(
        err,
        TarotError::Api(ApiError::Request { status: 404, .. })
    ));
    server.await.unwrap();
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let (base, server) = serve_once("200 OK", r#"[{"id": "one"}]"#.to_string()).await;

    let api = local_api(&base);
    let err = api.list_decks().await.unwrap_err();

    assert!(matches!(err, TarotError::Api(ApiError::Decode(_))));
    server.await.unwrap();
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    // Bind then drop to get a port nobody is listening on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = local_api(&format!("http://{}/api", addr));
    let err = api.list_spreads().await.unwrap_err();

    assert!(matches!(err, TarotError::Api(ApiError::Transport(_))));
    assert_eq!(err.exit_code(), 2);
}
