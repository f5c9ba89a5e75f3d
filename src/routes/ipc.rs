//! Host-side IPC endpoint serving a [`CommandRouter`] over HTTP.

use crate::bridge::CommandRouter;
use crate::error::{BridgeInvocationError, HostError};
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub fn router(commands: CommandRouter) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health_check))
        .route("/ipc/:command", post(invoke_command))
        .with_state(commands)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener, commands: CommandRouter) -> Result<(), HostError> {
    axum::serve(listener, router(commands)).await?;
    Ok(())
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn invoke_command(
    State(commands): State<CommandRouter>,
    Path(command): Path<String>,
    Json(args): Json<Value>,
) -> Result<Json<Value>, BridgeInvocationError> {
    tracing::debug!(command = %command, "Invoking host command");

    let result = commands.dispatch(&command, args).await;

    if let Err(ref err) = result {
        tracing::warn!(command = %command, error = %err, "Host command failed");
    }

    result.map(Json)
}
