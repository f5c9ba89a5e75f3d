use bridge_request::{commands, error::HostError, routes, CommandRouter, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), HostError> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bridge_request=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let addr = config.socket_addr();

    let commands = commands::register_all(CommandRouter::new());
    tracing::info!(commands = ?commands.commands(), "Starting bridge host on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| HostError::Bind {
            addr: addr.to_string(),
            source,
        })?;

    tracing::info!("Listening on http://{}/ipc", addr);
    routes::ipc::run(listener, commands).await
}
