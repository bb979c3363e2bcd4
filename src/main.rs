use anyhow::Context;
use axum::Router;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use eventboard_server::config::Config;
use eventboard_server::routes::create_routes;
use eventboard_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("eventboard_server=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env();
    tracing::debug!(
        port = config.port,
        public_dir = %config.public_dir,
        database = config.database_url.is_some(),
        webhook = config.webhook_url.is_some(),
        "Loaded configuration"
    );

    let state = AppState::from_config(&config)
        .await
        .context("Failed to initialise event store")?;

    let app: Router = create_routes(state, &config.public_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Server running on http://localhost:{}", config.port);

    axum::serve(listener, app).await.context("Server failed")?;

    Ok(())
}
