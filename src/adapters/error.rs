//! Error types for the request side of the client

use thiserror::Error;

/// Why a generation request did not produce a CSV payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// Connectivity, DNS, TLS or body transfer failure
    #[error("Network error: {0}")]
    Transport(String),

    /// The transport gave up waiting for the service
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// The service answered with a non-success status
    #[error("{message}")]
    Server { status: u16, message: String },

    /// The transport operation was aborted before completing
    #[error("Request was cancelled")]
    Cancelled,
}

impl RequestError {
    /// Build a server error from a non-success response, preferring the
    /// `"error"` string of a JSON body over the raw text
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|json| json.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .unwrap_or_else(|| {
                format!(
                    "Server returned HTTP {}: {}",
                    status,
                    String::from_utf8_lossy(body)
                )
            });

        RequestError::Server { status, message }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, RequestError::Cancelled)
    }
}

/// Non-timeout reqwest failures. Timeouts are mapped by the transport, which
/// knows the configured duration.
impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            RequestError::Transport(format!("Connection error: {}", err))
        } else {
            RequestError::Transport(err.to_string())
        }
    }
}

/// Misuse of the request controller
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("A request is already in flight")]
    RequestInFlight,
}

/// Result type alias for transport operations
pub type RequestResult<T> = Result<T, RequestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_uses_json_error_field() {
        let err = RequestError::from_response(404, br#"{"error":"unknown table"}"#);
        assert_eq!(
            err,
            RequestError::Server {
                status: 404,
                message: "unknown table".to_string()
            }
        );
        assert_eq!(err.to_string(), "unknown table");
    }

    #[test]
    fn test_server_error_falls_back_to_raw_body() {
        let err = RequestError::from_response(500, b"upstream exploded");
        assert_eq!(err.to_string(), "Server returned HTTP 500: upstream exploded");

        // valid JSON without a string "error" field
        let err = RequestError::from_response(400, br#"{"error":42}"#);
        assert_eq!(err.to_string(), r#"Server returned HTTP 400: {"error":42}"#);
    }

    #[test]
    fn test_reqwest_builder_error_is_transport() {
        let err = reqwest::Client::new()
            .post("not a url")
            .build()
            .unwrap_err();
        assert!(!err.is_timeout());

        match RequestError::from(err) {
            RequestError::Transport(message) => assert!(!message.is_empty()),
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[test]
    fn test_cancelled() {
        assert!(RequestError::Cancelled.is_cancelled());
        assert!(!RequestError::Timeout(3).is_cancelled());
    }
}
