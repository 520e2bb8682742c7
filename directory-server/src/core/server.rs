//! Server Implementation
//!
//! HTTP server startup and shutdown

use tokio::net::TcpListener;

use crate::core::{Config, Result, ServerState};

/// HTTP Server
pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    pub fn new(config: Config, state: ServerState) -> Self {
        Self { config, state }
    }

    /// Bind, serve until Ctrl-C, then drain in-flight requests
    pub async fn run(&self) -> Result<()> {
        let app = crate::api::build_router(self.state.clone());

        let addr = self.config.bind_addr();
        let listener = TcpListener::bind(&addr).await?;
        tracing::info!(
            addr = %listener.local_addr()?,
            environment = %self.config.environment,
            "Employee directory listening"
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        return;
    }
    tracing::info!("Shutting down...");
}
