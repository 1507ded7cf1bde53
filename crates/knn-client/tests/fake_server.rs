//! Cliente contra un servidor HTTP falso de una sola conexión.

use std::time::Duration;

use knn_client::{ClientError, OpenSearchClient};
use knn_core::ConnectionParams;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

fn params(port: u16, timeout: Duration) -> ConnectionParams {
    ConnectionParams { endpoint: "127.0.0.1".into(),
                       port,
                       timeout }
}

/// Acepta una conexión, captura la request completa y responde `response`.
async fn serve_once(response: String) -> (u16, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf);
            if let Some(head_end) = text.find("\r\n\r\n") {
                let content_length = text[..head_end].lines()
                                                     .find_map(|l| {
                                                         let (name, value) = l.split_once(':')?;
                                                         name.eq_ignore_ascii_case("content-length").then(|| value.trim().parse::<usize>().ok())?
                                                     })
                                                     .unwrap_or(0);
                if buf.len() >= head_end + 4 + content_length {
                    break;
                }
            }
        }
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&buf).into_owned()
    });
    (port, handle)
}

fn http_response(status: &str, body: &str) -> String {
    format!("HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len())
}

#[tokio::test]
async fn search_posts_body_and_parses_hits() {
    let body = r#"{"took": 12, "timed_out": false, "hits": {"hits": [{"_id": "2", "_score": 1.0}, {"_id": "0", "_score": 0.5}]}}"#;
    let (port, server) = serve_once(http_response("200 OK", body)).await;
    let client = OpenSearchClient::new(&params(port, Duration::from_secs(5))).unwrap();

    let query = json!({"size": 2, "query": {"knn": {"vec": {"vector": [0.0, 1.0], "k": 2}}}});
    let res = client.search_index("idx", &query, &["vec".to_string()]).await.unwrap();
    assert_eq!(res.took, 12.0);
    assert_eq!(res.hits, vec!["2", "0"]);

    let request = server.await.unwrap();
    let request_line = request.lines().next().unwrap();
    assert!(request_line.starts_with("POST /idx/_search?_source_excludes=vec "), "{request_line}");
    let sent: serde_json::Value = serde_json::from_str(request.split("\r\n\r\n").nth(1).unwrap()).unwrap();
    assert_eq!(sent, query);
}

#[tokio::test]
async fn non_success_status_is_reported_with_body() {
    let (port, _server) = serve_once(http_response("404 Not Found", r#"{"error":"no such index"}"#)).await;
    let client = OpenSearchClient::new(&params(port, Duration::from_secs(5))).unwrap();
    let err = client.search_index("missing", &json!({}), &[]).await.unwrap_err();
    match err {
        ClientError::Status { status, body } => {
            assert_eq!(status, 404);
            assert!(body.contains("no such index"));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let (port, _server) = serve_once(http_response("200 OK", r#"{"hits": []}"#)).await;
    let client = OpenSearchClient::new(&params(port, Duration::from_secs(5))).unwrap();
    let err = client.search_index("idx", &json!({}), &[]).await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn refused_connection_is_a_connect_error() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = OpenSearchClient::new(&params(port, Duration::from_secs(5))).unwrap();
    let err = client.search_index("idx", &json!({}), &[]).await.unwrap_err();
    assert!(matches!(err, ClientError::Connect(_)), "{err:?}");
}

#[tokio::test]
async fn silent_server_hits_the_client_timeout() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let _server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
        drop(socket);
    });
    let client = OpenSearchClient::new(&params(port, Duration::from_millis(200))).unwrap();
    let err = client.search_index("idx", &json!({}), &[]).await.unwrap_err();
    assert!(matches!(err, ClientError::Timeout(_)), "{err:?}");
}
