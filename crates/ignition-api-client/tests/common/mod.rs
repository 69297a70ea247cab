//! In-process mock gateway.
//!
//! Every request is recorded and answered by a scripted handler that sees the
//! request and how many times its `(method, path)` has been hit before.

#![allow(dead_code)]

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, Response, StatusCode, Uri};
use axum::Router;
use ignition_api_client::{GatewayClient, GatewayClientConfig, RetryConfig, TOKEN_HEADER};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

pub const TOKEN: &str = "test-token";

/// A request as the gateway saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub token: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl Recorded {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// Scripted reply.
#[derive(Debug, Clone)]
pub struct Canned {
    pub status: StatusCode,
    pub body: String,
    pub retry_after: Option<String>,
    pub delay: Option<Duration>,
}

impl Canned {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.into(),
            retry_after: None,
            delay: None,
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub fn empty(status: u16) -> Self {
        Self::new(status, "")
    }

    pub fn with_retry_after(mut self, value: &str) -> Self {
        self.retry_after = Some(value.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

type Handler = dyn Fn(&Recorded, u32) -> Canned + Send + Sync;

struct Shared {
    handler: Box<Handler>,
    requests: Mutex<Vec<Recorded>>,
    total: AtomicU32,
}

pub struct MockGateway {
    pub url: String,
    shared: Arc<Shared>,
}

impl MockGateway {
    /// Start a gateway on an ephemeral port. The handler receives the request
    /// and the number of earlier requests with the same method and path.
    pub async fn start<F>(handler: F) -> Self
    where
        F: Fn(&Recorded, u32) -> Canned + Send + Sync + 'static,
    {
        let shared = Arc::new(Shared {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
            total: AtomicU32::new(0),
        });

        let app = Router::new().fallback(respond).with_state(shared.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{addr}"),
            shared,
        }
    }

    /// Client with short backoff so retry tests stay fast.
    pub fn client(&self) -> GatewayClient {
        self.client_with(fast_retry())
    }

    pub fn client_with(&self, retry: RetryConfig) -> GatewayClient {
        GatewayClient::new(GatewayClientConfig::new(&self.url, TOKEN).with_retry(retry)).unwrap()
    }

    pub fn total(&self) -> u32 {
        self.shared.total.load(Ordering::SeqCst)
    }

    pub fn count(&self, method: Method) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method)
            .count()
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.shared.requests.lock().unwrap().clone()
    }

    pub fn last(&self, method: Method) -> Recorded {
        self.requests()
            .into_iter()
            .rev()
            .find(|r| r.method == method)
            .unwrap()
    }
}

pub fn fast_retry() -> RetryConfig {
    RetryConfig::default()
        .with_min_backoff(Duration::from_millis(10))
        .with_max_backoff(Duration::from_millis(50))
}

/// Address that refuses connections.
pub async fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

async fn respond(
    State(shared): State<Arc<Shared>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response<Body> {
    let read_header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let request = Recorded {
        method,
        path: uri.path().to_string(),
        token: read_header(TOKEN_HEADER),
        content_type: read_header("content-type"),
        body: String::from_utf8_lossy(&body).into_owned(),
    };

    let canned = {
        let mut requests = shared.requests.lock().unwrap();
        let seen = requests
            .iter()
            .filter(|r| r.method == request.method && r.path == request.path)
            .count();
        requests.push(request.clone());
        (shared.handler)(&request, u32::try_from(seen).unwrap())
    };
    shared.total.fetch_add(1, Ordering::SeqCst);

    if let Some(delay) = canned.delay {
        tokio::time::sleep(delay).await;
    }

    let mut response = Response::builder()
        .status(canned.status)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(retry_after) = canned.retry_after {
        response = response.header(header::RETRY_AFTER, retry_after);
    }
    response.body(Body::from(canned.body)).unwrap()
}
