//! HTTP Server
//!
//! Serves the execution endpoint over TCP with axum.

use crate::handler;
use axum::routing::{get, post};
use axum::Router;
use relay_core::application::{shutdown_channel, RelayService, ShutdownSender};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};

const DEFAULT_HTTP_HOST: &str = "0.0.0.0";
const DEFAULT_HTTP_PORT: u16 = 8000;

/// HTTP Server Configuration
#[derive(Debug, Clone)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HTTP_HOST.to_string(),
            port: DEFAULT_HTTP_PORT,
        }
    }
}

/// Build the endpoint router around a relay service
pub fn build_router(service: Arc<RelayService>) -> Router {
    Router::new()
        .route("/list_scripts", get(handler::list_scripts))
        .route("/run_script", post(handler::run_script))
        .route("/health", get(handler::health))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(service)
}

/// HTTP Server
pub struct HttpServer {
    config: HttpServerConfig,
    service: Arc<RelayService>,
}

impl HttpServer {
    pub fn new(config: HttpServerConfig, service: Arc<RelayService>) -> Self {
        Self { config, service }
    }

    /// Bind and start serving in the background
    ///
    /// Port 0 binds an ephemeral port; see [`HttpServerHandle::local_addr`].
    pub async fn start(self) -> Result<HttpServerHandle, String> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| format!("Failed to bind {}: {}", addr, e))?;
        let local_addr = listener
            .local_addr()
            .map_err(|e| format!("Failed to read bound address: {}", e))?;

        info!(addr = %local_addr, "Starting HTTP server");

        let (shutdown, mut token) = shutdown_channel();
        let app = build_router(self.service);

        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move { token.wait().await })
                .await
        });

        info!("HTTP server started successfully");

        Ok(HttpServerHandle {
            local_addr,
            shutdown,
            task,
        })
    }
}

/// Running server
pub struct HttpServerHandle {
    local_addr: SocketAddr,
    shutdown: ShutdownSender,
    task: JoinHandle<std::io::Result<()>>,
}

impl HttpServerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// `http://<addr>` of the bound socket
    pub fn base_url(&self) -> String {
        format!("http://{}", self.local_addr)
    }

    /// Stop accepting connections and wait for in-flight requests
    pub async fn stop(self) -> Result<(), String> {
        self.shutdown.shutdown();
        match self.task.await {
            Ok(Ok(())) => {
                info!("HTTP server stopped");
                Ok(())
            }
            Ok(Err(e)) => Err(format!("HTTP server failed: {}", e)),
            Err(e) => Err(format!("HTTP server task failed: {}", e)),
        }
    }
}
