use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::context::AggregatorContext;
use crate::error::ServerResult;
use crate::router::build_router;

/// The vane aggregation server.
pub struct AggregationServer {
    config: ServerConfig,
}

impl AggregationServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router over a fresh context (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(Arc::new(AggregatorContext::from_config(&self.config)))
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let ctx = Arc::new(AggregatorContext::from_config(&self.config));
        let app = build_router(ctx);
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!(
            "aggregation server listening on {} (staleness {:?})",
            self.config.bind_addr,
            self.config.staleness
        );
        axum::serve(listener, app).await?;
        Ok(())
    }
}
