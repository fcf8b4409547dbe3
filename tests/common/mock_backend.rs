//! Mock portfolio backend for store and client tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, Response, StatusCode};
use axum::routing::any;
use axum::Router;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// A captured request for assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body is not JSON")
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// A mock response to return.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    pub delay_ms: u64,
}

impl Default for MockResponse {
    fn default() -> Self {
        Self {
            status: 200,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: br#"{"ok": true}"#.to_vec(),
            delay_ms: 0,
        }
    }
}

impl MockResponse {
    pub fn json(body: serde_json::Value) -> Self {
        Self {
            body: body.to_string().into_bytes(),
            ..Self::default()
        }
    }

    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: format!(r#"{{"error": "{}"}}"#, message).into_bytes(),
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, ms: u64) -> Self {
        self.delay_ms = ms;
        self
    }
}

/// Response served for requests matching method, path and optionally a body substring.
#[derive(Debug, Clone)]
struct Rule {
    method: String,
    path: String,
    body_contains: Option<String>,
    response: MockResponse,
    /// `None` serves forever.
    remaining: Option<usize>,
}

impl Rule {
    fn matches(&self, method: &str, path: &str, body: &str) -> bool {
        self.remaining != Some(0)
            && self.method.eq_ignore_ascii_case(method)
            && self.path == path
            && self
                .body_contains
                .as_deref()
                .map_or(true, |needle| body.contains(needle))
    }
}

#[derive(Clone)]
struct MockState {
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    rules: Arc<Mutex<Vec<Rule>>>,
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
}

/// Mock backend server for testing.
pub struct MockBackend {
    pub addr: SocketAddr,
    state: MockState,
    shutdown: tokio::sync::watch::Sender<bool>,
}

impl MockBackend {
    /// Start a new mock backend server.
    pub async fn start() -> Self {
        let state = MockState {
            requests: Arc::new(Mutex::new(Vec::new())),
            rules: Arc::new(Mutex::new(Vec::new())),
            responses: Arc::new(Mutex::new(VecDeque::new())),
        };

        let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);

        let app = Router::new()
            .route("/{*path}", any(handle_request))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.changed().await;
                })
                .await
                .ok();
        });

        Self {
            addr,
            state,
            shutdown: shutdown_tx,
        }
    }

    /// Serve `resp` for every `method path` request.
    pub async fn on(&self, method: &str, path: &str, resp: MockResponse) {
        self.push_rule(method, path, None, resp, None).await;
    }

    /// Serve `resp` once for the next `method path` request.
    pub async fn once(&self, method: &str, path: &str, resp: MockResponse) {
        self.push_rule(method, path, None, resp, Some(1)).await;
    }

    /// Serve `resp` for `method path` requests whose body contains `needle`.
    pub async fn on_body(&self, method: &str, path: &str, needle: &str, resp: MockResponse) {
        self.push_rule(method, path, Some(needle.to_string()), resp, None)
            .await;
    }

    async fn push_rule(
        &self,
        method: &str,
        path: &str,
        body_contains: Option<String>,
        response: MockResponse,
        remaining: Option<usize>,
    ) {
        self.state.rules.lock().await.push(Rule {
            method: method.to_string(),
            path: path.to_string(),
            body_contains,
            response,
            remaining,
        });
    }

    /// Enqueue a response for the next request no rule matches.
    pub async fn enqueue_response(&self, resp: MockResponse) {
        self.state.responses.lock().await.push_back(resp);
    }

    /// Get all captured requests.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.state.requests.lock().await.clone()
    }

    /// Captured requests for one method and path.
    pub async fn requests_to(&self, method: &str, path: &str) -> Vec<CapturedRequest> {
        self.captured_requests()
            .await
            .into_iter()
            .filter(|r| r.method.eq_ignore_ascii_case(method) && r.path == path)
            .collect()
    }

    /// Get the base URL for this mock server.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Clear captured requests and configured responses.
    pub async fn clear(&self) {
        self.state.requests.lock().await.clear();
        self.state.rules.lock().await.clear();
        self.state.responses.lock().await.clear();
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

async fn handle_request(State(state): State<MockState>, req: Request<Body>) -> Response<Body> {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(str::to_string);
    let headers: Vec<(String, String)> = req
        .headers()
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
        .collect();

    let body_bytes = axum::body::to_bytes(req.into_body(), 1024 * 1024)
        .await
        .unwrap_or_default()
        .to_vec();
    let body_text = String::from_utf8_lossy(&body_bytes).into_owned();

    state.requests.lock().await.push(CapturedRequest {
        method: method.clone(),
        path: path.clone(),
        query,
        headers,
        body: body_bytes,
    });

    let ruled = {
        let mut rules = state.rules.lock().await;
        rules
            .iter_mut()
            .find(|rule| rule.matches(&method, &path, &body_text))
            .map(|rule| {
                if let Some(n) = rule.remaining.as_mut() {
                    *n -= 1;
                }
                rule.response.clone()
            })
    };
    let mock_resp = match ruled {
        Some(resp) => resp,
        None => state
            .responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_default(),
    };

    if mock_resp.delay_ms > 0 {
        tokio::time::sleep(tokio::time::Duration::from_millis(mock_resp.delay_ms)).await;
    }

    let mut builder = Response::builder().status(StatusCode::from_u16(mock_resp.status).unwrap());
    for (name, value) in mock_resp.headers {
        builder = builder.header(name, value);
    }
    builder.body(Body::from(mock_resp.body)).unwrap()
}
