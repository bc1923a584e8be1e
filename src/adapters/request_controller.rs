//! Request lifecycle controller
//!
//! Owns at most one in-flight generation request. The owner (normally the
//! UI/event loop) calls [`RequestController::submit`] and
//! [`RequestController::cancel`], and pulls lifecycle notifications with
//! [`RequestController::next_event`], so every notification is handled on
//! the owner's side without extra locking.
//!
//! Each submitted request produces, in order, `BusyStarted`, `BusyEnded`
//! and exactly one terminal event (`Succeeded`, `Failed` or `Cancelled`).
//! A cancel always wins: once `cancel` returns, whatever the transport task
//! produced for that request is dropped.

use bytes::Bytes;
use futures::FutureExt;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info, warn};

use super::error::{ControllerError, RequestError, RequestResult};
use super::transport::{GenerationTransport, TransportResponse};

/// Identity of one submitted request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Observable lifecycle state. How a request ended is reported by its
/// terminal [`RequestEvent`]; the controller itself is back to `Idle` by then.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Sending(RequestId),
}

/// Notification for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestEvent {
    BusyStarted { request: RequestId },
    BusyEnded { request: RequestId },
    /// Raw response bytes, expected to be CSV
    Succeeded { request: RequestId, body: Bytes },
    Failed { request: RequestId, error: RequestError },
    Cancelled { request: RequestId },
}

impl RequestEvent {
    pub fn request(&self) -> RequestId {
        match self {
            RequestEvent::BusyStarted { request }
            | RequestEvent::BusyEnded { request }
            | RequestEvent::Succeeded { request, .. }
            | RequestEvent::Failed { request, .. }
            | RequestEvent::Cancelled { request } => *request,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RequestEvent::Succeeded { .. }
                | RequestEvent::Failed { .. }
                | RequestEvent::Cancelled { .. }
        )
    }
}

struct InFlight {
    request: RequestId,
    task: JoinHandle<RequestResult<TransportResponse>>,
}

pub struct RequestController {
    transport: Arc<dyn GenerationTransport>,
    state: RequestState,
    next_id: u64,
    in_flight: Option<InFlight>,
    pending: VecDeque<RequestEvent>,
}

impl RequestController {
    pub fn new(transport: Arc<dyn GenerationTransport>) -> Self {
        Self {
            transport,
            state: RequestState::Idle,
            next_id: 0,
            in_flight: None,
            pending: VecDeque::new(),
        }
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    pub fn is_sending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Start posting `body`. Returns immediately; must be called from
    /// within a Tokio runtime.
    pub fn submit(&mut self, body: impl Into<Bytes>) -> Result<RequestId, ControllerError> {
        if let Some(in_flight) = &self.in_flight {
            warn!(request_id = %in_flight.request, "Rejecting submit while a request is in flight");
            return Err(ControllerError::RequestInFlight);
        }

        self.next_id += 1;
        let request = RequestId(self.next_id);
        let body = body.into();
        let transport = self.transport.clone();

        info!(
            request_id = %request,
            endpoint = %transport.endpoint(),
            bytes = body.len(),
            "Submitting generation request"
        );

        let task = tokio::spawn(async move { transport.post(body).await });
        self.in_flight = Some(InFlight { request, task });
        self.transition(RequestState::Sending(request));
        self.pending.push_back(RequestEvent::BusyStarted { request });

        Ok(request)
    }

    /// Abort the in-flight request. No-op when nothing is being sent.
    pub fn cancel(&mut self) {
        let Some(in_flight) = self.in_flight.take() else {
            debug!("Cancel requested while idle");
            return;
        };

        in_flight.task.abort();
        info!(request_id = %in_flight.request, "Request cancelled");
        self.finish(RequestEvent::Cancelled {
            request: in_flight.request,
        });
    }

    /// Next lifecycle notification, waiting for the in-flight request if
    /// needed. `None` once idle with nothing left to report.
    ///
    /// Cancel-safe: dropping the future loses no notification.
    pub async fn next_event(&mut self) -> Option<RequestEvent> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }

            let in_flight = self.in_flight.as_mut()?;
            let joined = (&mut in_flight.task).await;
            self.complete(joined);
        }
    }

    /// Non-blocking variant of [`next_event`](Self::next_event) for owners
    /// that poll from a timer or render loop
    pub fn try_next_event(&mut self) -> Option<RequestEvent> {
        if let Some(event) = self.pending.pop_front() {
            return Some(event);
        }

        let in_flight = self.in_flight.as_mut()?;
        let joined = (&mut in_flight.task).now_or_never()?;
        self.complete(joined);
        self.pending.pop_front()
    }

    fn complete(&mut self, joined: Result<RequestResult<TransportResponse>, JoinError>) {
        let Some(in_flight) = self.in_flight.take() else {
            return;
        };
        let request = in_flight.request;

        let event = match joined {
            Ok(result) => classify(request, result),
            Err(err) if err.is_cancelled() => RequestEvent::Cancelled { request },
            Err(err) => RequestEvent::Failed {
                request,
                error: RequestError::Transport(format!("Request worker failed: {}", err)),
            },
        };

        match &event {
            RequestEvent::Succeeded { body, .. } => {
                info!(request_id = %request, bytes = body.len(), "Request succeeded")
            }
            RequestEvent::Failed { error, .. } => {
                warn!(request_id = %request, error = %error, "Request failed")
            }
            _ => info!(request_id = %request, "Request cancelled by transport"),
        }

        self.finish(event);
    }

    /// Queue `BusyEnded` and the terminal event, then return to `Idle`
    fn finish(&mut self, terminal: RequestEvent) {
        let request = terminal.request();
        self.pending.push_back(RequestEvent::BusyEnded { request });
        self.pending.push_back(terminal);
        self.transition(RequestState::Idle);
    }

    fn transition(&mut self, next: RequestState) {
        debug!(from = ?self.state, to = ?next, "Request state transition");
        self.state = next;
    }
}

impl Drop for RequestController {
    fn drop(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.task.abort();
        }
    }
}

/// Map a transport result to the terminal notification for `request`
fn classify(request: RequestId, result: RequestResult<TransportResponse>) -> RequestEvent {
    match result {
        Err(error) if error.is_cancelled() => RequestEvent::Cancelled { request },
        Err(error) => RequestEvent::Failed { request, error },
        Ok(response) if response.is_success() => RequestEvent::Succeeded {
            request,
            body: response.body,
        },
        Ok(response) => RequestEvent::Failed {
            request,
            error: RequestError::from_response(response.status, &response.body),
        },
    }
}
