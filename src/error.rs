use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use thiserror::Error;

/// Failure reported by the host bridge while running a command.
///
/// The payload is whatever the host produced (a message string, an error
/// object, ...). It is carried through untouched so callers see exactly what
/// the host rejected with.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("bridge invocation failed: {payload}")]
pub struct BridgeInvocationError {
    payload: Value,
}

impl BridgeInvocationError {
    pub fn new(payload: impl Into<Value>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    /// The raw error value produced by the host.
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn into_payload(self) -> Value {
        self.payload
    }
}

/// Errors from adapter helpers that decode a typed result out of the
/// host's response.
#[derive(Error, Debug)]
pub enum AdapterError {
    #[error(transparent)]
    Bridge(#[from] BridgeInvocationError),

    #[error("Unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors raised by the host process itself.
#[derive(Error, Debug)]
pub enum HostError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

impl IntoResponse for BridgeInvocationError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(self.payload)).into_response()
    }
}
