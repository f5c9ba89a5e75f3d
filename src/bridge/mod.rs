//! Host bridge abstraction.
//!
//! A host bridge runs named commands on behalf of the front-end and settles
//! each call with either a success value or an error value. The adapter only
//! ever talks to this trait, so the transport (in-process registry, IPC over
//! HTTP, a test double) is swappable.

pub mod http;
pub mod router;

pub use http::HttpBridge;
pub use router::CommandRouter;

use crate::error::BridgeInvocationError;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Future returned by [`HostBridge::invoke`].
pub type BridgeFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Value, BridgeInvocationError>> + Send + 'a>>;

/// Trait for host runtimes that expose callable commands.
pub trait HostBridge: Send + Sync {
    /// Invokes `command` with the given argument record.
    ///
    /// # Returns
    ///
    /// A future that settles exactly once with the command's result value or
    /// the host's error payload.
    fn invoke(&self, command: &str, args: Value) -> BridgeFuture<'_>;
}

impl<T: HostBridge + ?Sized> HostBridge for Arc<T> {
    fn invoke(&self, command: &str, args: Value) -> BridgeFuture<'_> {
        (**self).invoke(command, args)
    }
}

impl<T: HostBridge + ?Sized> HostBridge for &T {
    fn invoke(&self, command: &str, args: Value) -> BridgeFuture<'_> {
        (**self).invoke(command, args)
    }
}
