pub mod bridge;
pub mod commands;
pub mod config;
pub mod error;
pub mod request;
pub mod routes;

pub use bridge::{BridgeFuture, CommandRouter, HostBridge, HttpBridge};
pub use config::Config;
pub use error::{AdapterError, BridgeInvocationError};
pub use request::{
    BridgeArgs, BridgeOptions, HttpMethod, RequestAdapter, RequestDescription,
    HTTP_REQUEST_COMMAND,
};
