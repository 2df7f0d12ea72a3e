//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use super::{
    handler::{entry, health_check},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket signaling server
///
/// # Example
///
/// ```ignore
/// let state = AppState::new(repository, message_pusher, &config);
/// Server::new(Arc::new(state)).run(&config.bind_addr()).await?;
/// ```
pub struct Server {
    app_state: Arc<AppState>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(app_state: Arc<AppState>) -> Self {
        Self { app_state }
    }

    /// Build the router without binding it.
    ///
    /// `/api/health` is routed explicitly; every other path is a room path
    /// handled by the fallback (WebSocket upgrade or HTTP query). Room paths
    /// only answer `GET`, other methods get `405`.
    pub fn router(&self) -> Router {
        Router::new()
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            // WebSocket と Room クエリ
            .fallback(get(entry))
            .with_state(self.app_state.clone())
            .layer(TraceLayer::new_for_http())
    }

    /// Run the WebSocket signaling server
    ///
    /// # Arguments
    ///
    /// * `bind_addr` - The address to bind to (e.g., "127.0.0.1:8080")
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, bind_addr: &str) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        // Bind the server to the host and port
        let listener = tokio::net::TcpListener::bind(bind_addr).await?;

        // Start the server
        tracing::info!(
            "WebSocket signaling server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Create a room at: ws://{}/", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
