use anyhow::Context;
use axum::middleware;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::build_app;
use crate::auth::require_auth;
use crate::core::ServerState;

/// HTTP server lifecycle
pub struct Server;

impl Server {
    /// Bind and serve until ctrl-c.
    pub async fn run(state: ServerState) -> anyhow::Result<()> {
        let app = build_app()
            .layer(middleware::from_fn_with_state(state.clone(), require_auth))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(state.clone());

        let addr = format!("0.0.0.0:{}", state.config.http_port);
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        info!(addr = %addr, "HTTP server listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server error")?;

        info!("HTTP server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    } else {
        info!("Shutdown signal received");
    }
}
