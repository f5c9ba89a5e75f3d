//! Request adapter that forwards request descriptions to the host's
//! `http_request` command.
//!
//! The adapter does no network work itself. It fills in defaults, shapes the
//! description into the host's argument record and relays whatever the host
//! settles with.

use super::types::{HttpMethod, RequestDescription};
use crate::bridge::HostBridge;
use crate::commands::network::{NetworkInfo, GET_LOCAL_IP_COMMAND};
use crate::error::{AdapterError, BridgeInvocationError};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Name of the host command that performs HTTP requests.
pub const HTTP_REQUEST_COMMAND: &str = "http_request";

/// Stateless adapter over a [`HostBridge`].
///
/// Every call issues exactly one host invocation. Calls are independent, so
/// one adapter can be shared freely between tasks.
#[derive(Debug, Clone)]
pub struct RequestAdapter<B> {
    bridge: B,
}

impl<B: HostBridge> RequestAdapter<B> {
    pub fn new(bridge: B) -> Self {
        Self { bridge }
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    /// Sends `description` to the host and returns the host's response value
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns the host's error payload, untouched, if the command fails.
    pub async fn request(
        &self,
        description: RequestDescription,
    ) -> Result<Value, BridgeInvocationError> {
        let args = description.into_bridge_args();

        tracing::debug!(
            method = %args.options.method,
            url = %args.url,
            "Forwarding request to host"
        );

        let args = serde_json::to_value(&args)
            .map_err(|e| BridgeInvocationError::new(format!("Failed to encode request: {e}")))?;

        match self.bridge.invoke(HTTP_REQUEST_COMMAND, args).await {
            Ok(response) => {
                tracing::debug!("Host request succeeded");
                Ok(response)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Host request failed");
                Err(err)
            }
        }
    }

    pub async fn get(
        &self,
        url: impl Into<String>,
        params: Option<Map<String, Value>>,
        headers: Option<HashMap<String, String>>,
    ) -> Result<Value, BridgeInvocationError> {
        let description = RequestDescription::new(url)
            .with_method(HttpMethod::Get)
            .with_params(params.unwrap_or_default())
            .with_headers(headers.unwrap_or_default());
        self.request(description).await
    }

    pub async fn post(
        &self,
        url: impl Into<String>,
        data: Option<Value>,
        headers: Option<HashMap<String, String>>,
    ) -> Result<Value, BridgeInvocationError> {
        self.request(with_body(url, HttpMethod::Post, data, headers)).await
    }

    pub async fn put(
        &self,
        url: impl Into<String>,
        data: Option<Value>,
        headers: Option<HashMap<String, String>>,
    ) -> Result<Value, BridgeInvocationError> {
        self.request(with_body(url, HttpMethod::Put, data, headers)).await
    }

    pub async fn patch(
        &self,
        url: impl Into<String>,
        data: Option<Value>,
        headers: Option<HashMap<String, String>>,
    ) -> Result<Value, BridgeInvocationError> {
        self.request(with_body(url, HttpMethod::Patch, data, headers)).await
    }

    /// DELETE request. No body parameter; the host receives the default
    /// empty-object body.
    pub async fn del(
        &self,
        url: impl Into<String>,
        headers: Option<HashMap<String, String>>,
    ) -> Result<Value, BridgeInvocationError> {
        self.request(with_body(url, HttpMethod::Delete, None, headers)).await
    }

    /// Asks the host for its local network information.
    pub async fn local_network_info(&self) -> Result<NetworkInfo, AdapterError> {
        let value = self
            .bridge
            .invoke(GET_LOCAL_IP_COMMAND, Value::Object(Map::new()))
            .await?;
        Ok(serde_json::from_value(value)?)
    }
}

fn with_body(
    url: impl Into<String>,
    method: HttpMethod,
    data: Option<Value>,
    headers: Option<HashMap<String, String>>,
) -> RequestDescription {
    let description = RequestDescription::new(url)
        .with_method(method)
        .with_headers(headers.unwrap_or_default());
    match data {
        Some(data) => description.with_data(data),
        None => description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::BridgeFuture;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    /// Bridge double that records every invocation and settles with a fixed
    /// outcome.
    struct RecordingBridge {
        calls: Mutex<Vec<(String, Value)>>,
        outcome: Result<Value, BridgeInvocationError>,
    }

    impl RecordingBridge {
        fn resolving(value: Value) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                outcome: Ok(value),
            }
        }

        fn rejecting(payload: Value) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                outcome: Err(BridgeInvocationError::new(payload)),
            }
        }

        fn calls(&self) -> Vec<(String, Value)> {
            self.calls.lock().unwrap().clone()
        }

        fn last_args(&self) -> Value {
            let calls = self.calls();
            let (command, args) = calls.last().expect("no invocation recorded");
            assert_eq!(command, HTTP_REQUEST_COMMAND);
            args.clone()
        }
    }

    impl HostBridge for RecordingBridge {
        fn invoke(&self, command: &str, args: Value) -> BridgeFuture<'_> {
            self.calls
                .lock()
                .unwrap()
                .push((command.to_string(), args));
            let outcome = self.outcome.clone();
            Box::pin(async move { outcome })
        }
    }

    fn adapter() -> RequestAdapter<RecordingBridge> {
        RequestAdapter::new(RecordingBridge::resolving(json!({ "status": 200 })))
    }

    #[tokio::test]
    async fn test_post_dispatches_body() {
        let adapter = adapter();
        let description = RequestDescription::new("https://api.example.com/items")
            .with_method("post")
            .with_data(json!({ "name": "x" }));

        adapter.request(description).await.unwrap();

        assert_eq!(
            adapter.bridge().last_args(),
            json!({
                "url": "https://api.example.com/items",
                "options": {
                    "method": "POST",
                    "params": {},
                    "body": { "name": "x" },
                    "headers": {}
                }
            })
        );
    }

    #[tokio::test]
    async fn test_get_helper_omits_body() {
        let adapter = adapter();
        let mut params = Map::new();
        params.insert("page".to_string(), json!(2));

        adapter
            .get("https://api.example.com/items", Some(params), None)
            .await
            .unwrap();

        let args = adapter.bridge().last_args();
        assert_eq!(
            args,
            json!({
                "url": "https://api.example.com/items",
                "options": { "method": "GET", "params": { "page": 2 }, "headers": {} }
            })
        );
        assert!(args["options"].get("body").is_none());
    }

    #[tokio::test]
    async fn test_url_only_defaults() {
        let adapter = adapter();
        adapter.request(RequestDescription::new("/status")).await.unwrap();

        assert_eq!(
            adapter.bridge().last_args(),
            json!({
                "url": "/status",
                "options": { "method": "GET", "params": {}, "headers": {} }
            })
        );
    }

    #[tokio::test]
    async fn test_lowercase_get_still_drops_body() {
        let adapter = adapter();
        let description: RequestDescription = serde_json::from_value(json!({
            "url": "/items",
            "method": "get",
            "data": { "should": "vanish" },
            "timeout": 1000
        }))
        .unwrap();

        adapter.request(description).await.unwrap();

        let args = adapter.bridge().last_args();
        assert!(args["options"].get("body").is_none());
        assert_eq!(args["options"]["method"], "GET");
    }

    #[tokio::test]
    async fn test_helpers_match_request() {
        let mut headers = HashMap::new();
        headers.insert("X-Trace".to_string(), "abc".to_string());

        let via_helpers = adapter();
        via_helpers
            .post("/items", Some(json!({ "n": 1 })), Some(headers.clone()))
            .await
            .unwrap();
        via_helpers
            .put("/items/1", Some(json!({ "n": 2 })), None)
            .await
            .unwrap();
        via_helpers.del("/items/1", Some(headers.clone())).await.unwrap();

        let via_request = adapter();
        via_request
            .request(
                RequestDescription::new("/items")
                    .with_method(HttpMethod::Post)
                    .with_data(json!({ "n": 1 }))
                    .with_headers(headers.clone()),
            )
            .await
            .unwrap();
        via_request
            .request(
                RequestDescription::new("/items/1")
                    .with_method(HttpMethod::Put)
                    .with_data(json!({ "n": 2 })),
            )
            .await
            .unwrap();
        via_request
            .request(
                RequestDescription::new("/items/1")
                    .with_method(HttpMethod::Delete)
                    .with_headers(headers),
            )
            .await
            .unwrap();

        assert_eq!(via_helpers.bridge().calls(), via_request.bridge().calls());
    }

    #[tokio::test]
    async fn test_del_sends_empty_object_body() {
        let adapter = adapter();
        adapter.del("/items/1", None).await.unwrap();

        let args = adapter.bridge().last_args();
        assert_eq!(args["options"]["method"], "DELETE");
        assert_eq!(args["options"]["body"], json!({}));
    }

    #[tokio::test]
    async fn test_post_without_data_sends_empty_object() {
        let adapter = adapter();
        adapter.post("/items", None, None).await.unwrap();
        assert_eq!(adapter.bridge().last_args()["options"]["body"], json!({}));
    }

    #[tokio::test]
    async fn test_unknown_method_forwarded() {
        let adapter = adapter();
        adapter
            .request(RequestDescription::new("/cache").with_method("purge"))
            .await
            .unwrap();

        let args = adapter.bridge().last_args();
        assert_eq!(args["options"]["method"], "PURGE");
        assert_eq!(args["options"]["body"], json!({}));
    }

    #[tokio::test]
    async fn test_success_value_passes_through() {
        let response = json!({ "status": 201, "data": [1, 2, 3], "nested": { "ok": true } });
        let adapter = RequestAdapter::new(RecordingBridge::resolving(response.clone()));

        let result = adapter.post("/items", None, None).await.unwrap();
        assert_eq!(result, response);
    }

    #[tokio::test]
    async fn test_error_payload_passes_through() {
        let payload = json!({ "message": "connection refused", "code": 111 });
        let adapter = RequestAdapter::new(RecordingBridge::rejecting(payload.clone()));

        let err = adapter.get("/items", None, None).await.unwrap_err();
        assert_eq!(err, BridgeInvocationError::new(payload));
    }

    #[tokio::test]
    async fn test_one_invocation_per_call() {
        let adapter = adapter();
        adapter.get("/a", None, None).await.unwrap();
        adapter.put("/b", None, None).await.unwrap();
        assert_eq!(adapter.bridge().calls().len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_calls_are_independent() {
        let adapter = Arc::new(adapter());

        let (a, b) = tokio::join!(
            adapter.get("/a", None, None),
            adapter.patch("/b", Some(json!({ "x": 1 })), None),
        );
        a.unwrap();
        b.unwrap();

        let calls = adapter.bridge().calls();
        assert_eq!(calls.len(), 2);
        let urls: Vec<&str> = calls
            .iter()
            .map(|(_, args)| args["url"].as_str().unwrap())
            .collect();
        assert!(urls.contains(&"/a"));
        assert!(urls.contains(&"/b"));
    }

    #[tokio::test]
    async fn test_adapter_over_shared_bridge() {
        let bridge = Arc::new(RecordingBridge::resolving(json!("ok")));
        let adapter = RequestAdapter::new(Arc::clone(&bridge));

        assert_eq!(adapter.get("/a", None, None).await.unwrap(), json!("ok"));
        assert_eq!(bridge.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_adapter_over_borrowed_bridge() {
        let bridge = RecordingBridge::resolving(json!("borrowed"));
        let adapter = RequestAdapter::new(&bridge);

        assert_eq!(adapter.del("/a", None).await.unwrap(), json!("borrowed"));
        assert_eq!(bridge.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_local_network_info_decodes() {
        let info = json!({
            "interface_name": "primary",
            "ip_address": "10.0.0.7",
            "network_base": "10.0.0"
        });
        let adapter = RequestAdapter::new(RecordingBridge::resolving(info));

        let decoded = adapter.local_network_info().await.unwrap();
        assert_eq!(decoded.network_base, "10.0.0");

        let (command, _) = adapter.bridge().calls().pop().unwrap();
        assert_eq!(command, GET_LOCAL_IP_COMMAND);
    }

    #[tokio::test]
    async fn test_local_network_info_bad_shape() {
        let adapter = RequestAdapter::new(RecordingBridge::resolving(json!("nope")));
        let err = adapter.local_network_info().await.unwrap_err();
        assert!(matches!(err, AdapterError::Decode(_)));
    }
}
