//! In-process host bridge that routes commands to registered handlers.

use super::{BridgeFuture, HostBridge};
use crate::error::BridgeInvocationError;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

type HandlerFuture = Pin<Box<dyn Future<Output = Result<Value, Value>> + Send>>;
type Handler = Arc<dyn Fn(Value) -> HandlerFuture + Send + Sync>;

/// Registry of named host commands.
///
/// Cloning is cheap; handlers are shared.
#[derive(Clone, Default)]
pub struct CommandRouter {
    handlers: HashMap<String, Handler>,
}

impl CommandRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` under `name`, replacing any previous handler.
    pub fn register<F, Fut>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, Value>> + Send + 'static,
    {
        let handler: Handler = Arc::new(move |args| -> HandlerFuture { Box::pin(handler(args)) });
        self.handlers.insert(name.into(), handler);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered command names, sorted.
    pub fn commands(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub async fn dispatch(
        &self,
        command: &str,
        args: Value,
    ) -> Result<Value, BridgeInvocationError> {
        self.invoke(command, args).await
    }
}

impl HostBridge for CommandRouter {
    fn invoke(&self, command: &str, args: Value) -> BridgeFuture<'_> {
        let handler = self.handlers.get(command).cloned();
        let command = command.to_string();

        Box::pin(async move {
            match handler {
                Some(handler) => handler(args).await.map_err(BridgeInvocationError::new),
                None => Err(BridgeInvocationError::new(format!(
                    "command {command} not found"
                ))),
            }
        })
    }
}
