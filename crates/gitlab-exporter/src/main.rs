//! GitLab license exporter.
//!
//! - Polls `{GITLAB_URL}/api/v4/license` once per interval (first cycle at startup)
//! - Publishes the license as gauges on `GET /metrics` (port 9090 by default)
//! - Missing `GITLAB_TOKEN` / `GITLAB_URL` is fatal before anything starts

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gitlab_exporter::{app_state::AppState, config, fetch::HttpLicenseClient, router, scrape::Scraper};
use gitlab_exporter_core::error::{ExporterError, Result};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, kind = e.kind().as_str(), "fatal");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cfg = config::from_env()?;
    tracing::debug!(config = ?cfg, "config resolved");

    let state = AppState::new()?;
    let client = HttpLicenseClient::new(cfg.license_url(), cfg.request_timeout)?;

    let listener = tokio::net::TcpListener::bind(cfg.listen)
        .await
        .map_err(|e| ExporterError::Internal(format!("failed to bind {}: {e}", cfg.listen)))?;
    tracing::info!(listen = %cfg.listen, "gitlab-exporter starting");

    Scraper::new(Arc::new(client), state.metrics(), cfg.scrape_interval).spawn();

    axum::serve(listener, router::build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ExporterError::Internal(format!("server failed: {e}")))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, starting graceful shutdown");
}
