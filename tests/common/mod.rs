use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    routing::post,
    Router,
};
use schemagen::config::ServiceSettings;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A request as the stub service saw it
#[derive(Debug, Clone)]
pub struct Received {
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

struct StubState {
    status: StatusCode,
    body: &'static str,
    delay: Duration,
    received: Mutex<Vec<Received>>,
}

/// Stand-in for the generation service answering every POST /generate
/// with a fixed status and body
pub struct StubService {
    pub addr: SocketAddr,
    state: Arc<StubState>,
}

impl StubService {
    pub async fn start(status: StatusCode, body: &'static str) -> Self {
        Self::start_with_delay(status, body, Duration::ZERO).await
    }

    pub async fn start_with_delay(status: StatusCode, body: &'static str, delay: Duration) -> Self {
        let state = Arc::new(StubState {
            status,
            body,
            delay,
            received: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/generate", post(generate))
            .with_state(state.clone());

        // Start server on random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        StubService { addr, state }
    }

    pub fn settings(&self, timeout_seconds: u64) -> ServiceSettings {
        ServiceSettings {
            endpoint: format!("http://{}/generate", self.addr),
            timeout_seconds,
        }
    }

    pub fn received(&self) -> Vec<Received> {
        self.state.received.lock().unwrap().clone()
    }
}

async fn generate(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    state.received.lock().unwrap().push(Received {
        content_type: headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: body.to_vec(),
    });

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    (state.status, state.body)
}

/// Settings pointing at a port nothing listens on
pub async fn unreachable_settings() -> ServiceSettings {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    ServiceSettings {
        endpoint: format!("http://{}/generate", addr),
        timeout_seconds: 5,
    }
}
