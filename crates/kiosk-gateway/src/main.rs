mod config;
mod fetch;
mod routes;

use tracing_subscriber::EnvFilter;

use crate::config::GatewayConfig;
use crate::fetch::CatalogClient;
use crate::routes::{build_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = GatewayConfig::from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_filter.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let http = reqwest::Client::new();
    let client = CatalogClient::new(http.clone(), config.catalog_url.clone());
    let state = AppState::new(client, http, config.catalog_origin());
    let app = build_router(state);

    tracing::info!(addr = %config.bind_addr, upstream = %config.catalog_url, "kiosk gateway listening");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
