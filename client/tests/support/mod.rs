//! Shared helpers for client integration tests.
//!
//! [`CannedServer`] is a minimal HTTP/1.1 responder on a loopback port. It
//! records each request it receives and answers with queued status/body
//! pairs, so the reqwest transport can be exercised without the real room
//! service.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use reqwest::Url;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

/// One request as seen on the wire.
#[derive(Debug, Clone, Default)]
pub struct CapturedRequest {
    /// Request method, e.g. `POST`.
    pub method: String,
    /// Request target: path plus query string.
    pub target: String,
    /// Header names (lowercased) and values.
    pub headers: Vec<(String, String)>,
    /// Raw body text.
    pub body: String,
}

impl CapturedRequest {
    /// First header value named `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        let wanted = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(key, _)| *key == wanted)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Default)]
struct Exchange {
    responses: VecDeque<(u16, String)>,
    requests: Vec<CapturedRequest>,
}

/// Loopback server answering queued responses in order.
///
/// Once the queue is empty every request receives `200 []`.
pub struct CannedServer {
    base_url: Url,
    exchange: Arc<Mutex<Exchange>>,
}

impl CannedServer {
    /// Bind to an ephemeral port and start accepting connections.
    pub async fn start(responses: Vec<(u16, &str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind loopback listener");
        let address = listener.local_addr().expect("listener address");
        let exchange = Arc::new(Mutex::new(Exchange {
            responses: responses
                .into_iter()
                .map(|(status, body)| (status, body.to_owned()))
                .collect(),
            requests: Vec::new(),
        }));

        let shared = Arc::clone(&exchange);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let connection = Arc::clone(&shared);
                tokio::spawn(async move {
                    drop(serve_one(stream, connection).await);
                });
            }
        });

        let base_url = Url::parse(&format!("http://{address}/GlobalDorm/Dorm"))
            .expect("loopback base URL");
        Self { base_url, exchange }
    }

    /// Base URL in the same shape as the production default.
    pub fn base_url(&self) -> Url {
        self.base_url.clone()
    }

    /// Requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.exchange
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .requests
            .clone()
    }
}

async fn serve_one(stream: TcpStream, exchange: Arc<Mutex<Exchange>>) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).await?;
    let mut parts = request_line.split_whitespace();
    let mut captured = CapturedRequest {
        method: parts.next().unwrap_or_default().to_owned(),
        target: parts.next().unwrap_or_default().to_owned(),
        ..CapturedRequest::default()
    };

    let mut content_length = 0_usize;
    loop {
        let mut raw_line = String::new();
        if reader.read_line(&mut raw_line).await? == 0 {
            break;
        }
        let line = raw_line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            break;
        }
        if let Some((raw_name, raw_value)) = line.split_once(':') {
            let name = raw_name.trim().to_ascii_lowercase();
            let value = raw_value.trim().to_owned();
            if name == "content-length" {
                content_length = value.parse().unwrap_or_default();
            }
            captured.headers.push((name, value));
        }
    }

    let mut body = vec![0_u8; content_length];
    reader.read_exact(&mut body).await?;
    captured.body = String::from_utf8_lossy(&body).into_owned();

    let (status, payload) = {
        let mut guard = exchange.lock().unwrap_or_else(PoisonError::into_inner);
        guard.requests.push(captured);
        guard
            .responses
            .pop_front()
            .unwrap_or_else(|| (200, "[]".to_owned()))
    };

    let length = payload.len();
    let response = format!(
        "HTTP/1.1 {status} Canned\r\n\
         Content-Type: application/json\r\n\
         Content-Length: {length}\r\n\
         Connection: close\r\n\r\n\
         {payload}"
    );
    let mut socket = reader.into_inner();
    socket.write_all(response.as_bytes()).await?;
    socket.shutdown().await
}
