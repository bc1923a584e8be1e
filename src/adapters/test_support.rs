//! Shared fakes for adapter tests

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use super::error::RequestResult;
use super::transport::{GenerationTransport, TransportResponse};

/// Transport returning a canned result, optionally held back until released
pub struct FakeTransport {
    result: RequestResult<TransportResponse>,
    gate: Option<Arc<Notify>>,
    bodies: Mutex<Vec<Bytes>>,
}

impl FakeTransport {
    pub fn respond(result: RequestResult<TransportResponse>) -> Arc<Self> {
        Arc::new(Self {
            result,
            gate: None,
            bodies: Mutex::new(Vec::new()),
        })
    }

    pub fn gated(result: RequestResult<TransportResponse>, gate: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self {
            result,
            gate: Some(gate),
            bodies: Mutex::new(Vec::new()),
        })
    }

    pub fn bodies(&self) -> Vec<Bytes> {
        self.bodies.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationTransport for FakeTransport {
    async fn post(&self, body: Bytes) -> RequestResult<TransportResponse> {
        self.bodies.lock().unwrap().push(body);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.result.clone()
    }

    fn endpoint(&self) -> &str {
        "fake://generate"
    }
}
