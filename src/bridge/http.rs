//! Host bridge transport that posts commands to an IPC endpoint over HTTP.
//!
//! Each invocation is `POST {base_url}/{command}` with the argument record as
//! the JSON body. A 2xx status settles the call with the decoded body; any
//! other status settles it with the body as the error payload.

use super::{BridgeFuture, HostBridge};
use crate::error::BridgeInvocationError;
use serde_json::Value;

#[derive(Clone)]
pub struct HttpBridge {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBridge {
    /// Creates a bridge for an endpoint such as `http://127.0.0.1:3000/ipc`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn command_url(&self, command: &str) -> String {
        format!("{}/{}", self.base_url, command)
    }

    async fn send(&self, command: String, args: Value) -> Result<Value, BridgeInvocationError> {
        let url = self.command_url(&command);

        let response = self
            .client
            .post(&url)
            .json(&args)
            .send()
            .await
            .map_err(|e| BridgeInvocationError::new(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| BridgeInvocationError::new(e.to_string()))?;
        let payload = decode_body(&text);

        if status.is_success() {
            Ok(payload)
        } else {
            tracing::debug!(
                command = %command,
                status = status.as_u16(),
                "Host rejected command"
            );
            Err(BridgeInvocationError::new(payload))
        }
    }
}

impl HostBridge for HttpBridge {
    fn invoke(&self, command: &str, args: Value) -> BridgeFuture<'_> {
        Box::pin(self.send(command.to_string(), args))
    }
}

/// Empty bodies decode to `null`; bodies that are not JSON become a string.
fn decode_body(text: &str) -> Value {
    if text.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
