//! Script Relay - Execution endpoint daemon
//! Serves GET /list_scripts and POST /run_script for one scripts directory

mod config;
mod telemetry;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use config::DaemonConfig;
use relay_api_http::HttpServer;
use relay_core::application::RelayService;
use relay_core::port::time_provider::SystemTimeProvider;
use relay_infra_system::{FsScriptStore, SubprocessExecutor};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load configuration (.env first, process environment wins)
    dotenvy::dotenv().ok();
    let config = DaemonConfig::from_env()?;

    // 2. Initialize logging
    let _log_guard = telemetry::init_logging(&config.log)?;

    info!("Script Relay v{} starting...", VERSION);

    // 3. Open the script store; a missing directory is fatal
    let store = FsScriptStore::open(&config.scripts_dir).with_context(|| {
        format!(
            "Cannot open scripts directory {}",
            config.scripts_dir.display()
        )
    })?;
    info!(scripts_dir = %store.root().display(), "Script store ready");

    // 4. Setup dependencies (DI wiring)
    let time_provider = Arc::new(SystemTimeProvider);
    let mut executor = SubprocessExecutor::new(time_provider, config.limits);
    if let Some(interpreter) = &config.interpreter {
        executor = executor.with_interpreter(interpreter);
    }
    info!(
        interpreter = %executor.interpreter().display(),
        timeout = ?config.limits.timeout,
        max_output_bytes = ?config.limits.max_output_bytes,
        "Execution limits"
    );

    let service = Arc::new(RelayService::new(Arc::new(store), Arc::new(executor)));

    // 5. Start HTTP server
    let handle = HttpServer::new(config.http.clone(), service)
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server start failed: {}", e))?;

    info!(url = %handle.base_url(), "System ready. Press Ctrl+C to shutdown");

    // 6. Wait for shutdown signal
    shutdown_signal().await?;

    // 7. Graceful shutdown
    handle
        .stop()
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server stop failed: {}", e))?;

    info!("Shutdown complete.");

    Ok(())
}

/// Resolve on SIGINT, or SIGTERM on unix
async fn shutdown_signal() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut terminate =
            signal(SignalKind::terminate()).context("Failed to install SIGTERM handler")?;

        tokio::select! {
            res = tokio::signal::ctrl_c() => {
                res.context("Failed to listen for Ctrl-C")?;
                info!("Received SIGINT, starting graceful shutdown");
            }
            _ = terminate.recv() => {
                info!("Received SIGTERM, starting graceful shutdown");
            }
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c()
            .await
            .context("Failed to listen for Ctrl-C")?;
        info!("Received Ctrl-C, starting graceful shutdown");
    }

    Ok(())
}
