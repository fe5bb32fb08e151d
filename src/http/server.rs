//! HTTP server setup and lifecycle.
//!
//! # Responsibilities
//! - Create the Axum router with the health handler
//! - Wire up middleware (tracing, request timeout, request ID)
//! - Bind the listener before the coordinator runs (fail fast on bad ports)
//! - Drain in-flight requests once cancellation is observed

use std::net::SocketAddr;

use async_trait::async_trait;
use axum::{http::StatusCode, routing::get, Router};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::http::request::RequestIdLayer;
use crate::lifecycle::{Activity, ActivityError, ShutdownReceiver};

/// The HTTP-facing activity: serves the health endpoint until cancelled.
pub struct ServerActivity {
    listener: TcpListener,
    router: Router,
    local_addr: SocketAddr,
}

impl ServerActivity {
    /// Bind the listener and build the router.
    ///
    /// Binding happens here, before the coordinator launches anything, so a
    /// bad address or occupied port aborts startup instead of surfacing as a
    /// runtime failure.
    pub async fn bind(config: &ServerConfig) -> Result<Self, ActivityError> {
        let listener = TcpListener::bind(&config.bind_address).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!(address = %local_addr, "Listener bound");

        Ok(Self {
            listener,
            router: build_router(config),
            local_addr,
        })
    }

    /// The address the listener is bound to. With port 0 this is the
    /// ephemeral port the OS picked.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}

fn build_router(config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(RequestIdLayer)
        .layer(TraceLayer::new_for_http())
}

/// Liveness endpoint.
async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

#[async_trait]
impl Activity for ServerActivity {
    fn name(&self) -> &str {
        "http-server"
    }

    async fn run(self: Box<Self>, mut shutdown: ShutdownReceiver) -> Result<(), ActivityError> {
        tracing::info!(address = %self.local_addr, "HTTP server starting");

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.recv().await;
                tracing::info!("HTTP server draining in-flight requests");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
