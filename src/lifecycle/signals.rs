//! OS signal handling.

use crate::lifecycle::Shutdown;

/// Wait for ctrl-c and trigger shutdown.
pub async fn handle_signals(shutdown: &Shutdown) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for ctrl-c: {}", e);
    }
    tracing::info!("Interrupt received, shutting down");
    shutdown.trigger();
}
