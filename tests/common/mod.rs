//! Shared utilities for session integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// What the mock gateway answers to one JSON-RPC method.
#[allow(dead_code)]
pub enum Reply {
    /// A well-formed JSON-RPC result.
    Result(Value),
    /// A JSON-RPC error object.
    Error(i64, &'static str),
    /// Raw body with HTTP 200, e.g. something that is not JSON.
    Raw(&'static str),
    /// Bare HTTP status with an empty body.
    Status(u16),
    /// Accept the request and never answer.
    Stall,
}

/// A running mock JSON-RPC gateway.
pub struct MockRpc {
    pub url: String,
    requests: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl MockRpc {
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

/// Start a gateway on an ephemeral port answering each method via `handler`.
pub async fn start_mock_rpc<F>(handler: F) -> MockRpc
where
    F: Fn(&str) -> Reply + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handler = Arc::new(handler);
    let requests = Arc::new(AtomicUsize::new(0));
    let counter = requests.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let handler = handler.clone();
                    let counter = counter.clone();
                    tokio::spawn(async move {
                        counter.fetch_add(1, Ordering::SeqCst);
                        serve_one(socket, handler.as_ref()).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockRpc {
        url: format!("http://{addr}"),
        requests,
    }
}

/// A gateway that reports `chain_id` and answers `eth_call` with `call_word`
/// (a 32-byte hex word without `0x`).
#[allow(dead_code)]
pub async fn start_chain(chain_id: u64, call_word: &'static str) -> MockRpc {
    start_mock_rpc(move |method| match method {
        "eth_chainId" => Reply::Result(json!(format!("0x{chain_id:x}"))),
        "eth_call" => Reply::Result(json!(format!("0x{call_word}"))),
        _ => Reply::Error(-32601, "method not found"),
    })
    .await
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub async fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

async fn serve_one(mut socket: TcpStream, handler: &(dyn Fn(&str) -> Reply + Send + Sync)) {
    let Some(body) = read_request_body(&mut socket).await else {
        return;
    };

    let request: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let id = request.get("id").cloned().unwrap_or(Value::Null);
    let method = request
        .get("method")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let (status, payload) = match handler(&method) {
        Reply::Result(result) => (
            "200 OK",
            json!({ "jsonrpc": "2.0", "id": id, "result": result }).to_string(),
        ),
        Reply::Error(code, message) => (
            "200 OK",
            json!({ "jsonrpc": "2.0", "id": id, "error": { "code": code, "message": message } })
                .to_string(),
        ),
        Reply::Raw(raw) => ("200 OK", raw.to_string()),
        Reply::Status(500) => ("500 Internal Server Error", String::new()),
        Reply::Status(_) => ("503 Service Unavailable", String::new()),
        Reply::Stall => {
            tokio::time::sleep(Duration::from_secs(30)).await;
            return;
        }
    };

    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        payload.len(),
        payload
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

async fn read_request_body(socket: &mut TcpStream) -> Option<Vec<u8>> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    Some(buf[header_end..].to_vec())
}
