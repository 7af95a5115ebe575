//! HTTP server initialization and runtime setup.
//!
//! Wires content storage, caches and the background sweeper into the Axum
//! server and drives graceful shutdown.

use crate::application::services::{CatalogService, ContentStore};
use crate::config::Config;
use crate::infrastructure::cache::ResponseCache;
use crate::infrastructure::storage::FsContentStorage;
use crate::routes::app_service;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::watch;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Filesystem content storage and the content cache
/// - Response cache and its expiry sweeper
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - The listen address is invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let storage = Arc::new(FsContentStorage::new(&config.content_dir));
    let content = Arc::new(ContentStore::new(storage));
    let available = content.list_available_ids().await;
    tracing::info!(
        dir = %config.content_dir.display(),
        files = available.len(),
        "Content storage ready"
    );

    let catalog = Arc::new(CatalogService::new());
    let response_cache = Arc::new(ResponseCache::new(config.cache_ttl_seconds));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper = response_cache.spawn_sweeper(config.cache_check_period(), shutdown_rx);
    tracing::info!(
        period_secs = config.cache_check_period_seconds,
        "Response cache sweeper started"
    );

    let state = AppState::new(content, catalog, response_cache);
    let app = app_service(state, &config);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped, shutting down background tasks");
    let _ = shutdown_tx.send(true);
    if let Err(e) = sweeper.await {
        tracing::warn!(error = %e, "Response cache sweeper ended abnormally");
    }

    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl-C"),
        _ = terminate => tracing::info!("Received SIGTERM"),
    }
}
