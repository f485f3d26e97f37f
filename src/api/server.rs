//! API server startup.

use tracing::info;

use crate::api::routes::build_router;
use crate::api::state::AppState;
use crate::config::ServerConfig;
use crate::errors::{Error, Result};

/// Bind the configured address and serve the API until a shutdown signal.
pub async fn start_api_server(config: &ServerConfig, state: AppState) -> Result<()> {
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        Error::internal(format!("Failed to bind API listener on {}: {}", addr, e))
    })?;

    info!(%addr, "API server listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.expect("install CTRL+C signal handler");
            info!("Shutdown signal received");
        })
        .await
        .map_err(|e| Error::internal(format!("API server terminated: {}", e)))
}
