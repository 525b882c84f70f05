//! Common test utilities
//!
//! A loopback HTTP responder standing in for the upstream catalogs. Each
//! connection gets one canned response chosen from the request path; every
//! request target is recorded so tests can inspect the query actually sent.

use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Status and JSON body returned for a request target
pub type Responder = dyn Fn(&str) -> (u16, String) + Send + Sync;

pub struct MockServer {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockServer {
    /// Bind to an ephemeral loopback port and start answering
    pub async fn start<F>(responder: F) -> Self
    where
        F: Fn(&str) -> (u16, String) + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let responder: Arc<Responder> = Arc::new(responder);

        let recorded = requests.clone();
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                let responder = responder.clone();
                let recorded = recorded.clone();

                tokio::spawn(async move {
                    let Some(target) = read_request_target(&mut socket).await else {
                        return;
                    };
                    recorded.lock().unwrap().push(target.clone());

                    let (status, body) = responder(&target);
                    let response = format!(
                        "HTTP/1.1 {} Mock\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    /// Serve the same response to every request
    #[allow(dead_code)]
    pub async fn fixed(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        Self::start(move |_| (status, body.clone())).await
    }

    pub fn url(&self, prefix: &str) -> String {
        format!("{}{}", self.base_url, prefix)
    }

    /// Request targets (path plus query) in arrival order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Decoded query pairs of the only request received
    #[allow(dead_code)]
    pub fn single_query(&self) -> (String, Vec<(String, String)>) {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected one request, got {:?}", requests);
        split_target(&requests[0])
    }
}

/// Path and decoded query pairs of a request target
pub fn split_target(target: &str) -> (String, Vec<(String, String)>) {
    let url = reqwest::Url::parse(&format!("http://localhost{}", target)).unwrap();
    let pairs = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    (url.path().to_string(), pairs)
}

/// All values sent for `key`, in order
#[allow(dead_code)]
pub fn values<'a>(pairs: &'a [(String, String)], key: &str) -> Vec<&'a str> {
    pairs
        .iter()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .collect()
}

async fn read_request_target(socket: &mut tokio::net::TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let head = String::from_utf8_lossy(&buf);
    let request_line = head.lines().next()?;
    request_line.split_whitespace().nth(1).map(str::to_string)
}
