//! HTTP surface of the ledger

mod error;
mod routes;

pub use error::*;
pub use routes::*;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::application::LedgerService;

/// Bind `addr` and serve the ledger until Ctrl-C.
pub async fn serve(ledger: Arc<LedgerService>, addr: &str) -> Result<()> {
    let app = create_router(ledger);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Wallet ledger listening on: {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Wallet ledger stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
    }
}
