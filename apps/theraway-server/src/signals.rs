use anyhow::{Context, Result};
use tokio::signal;

/// Resolve once Ctrl+C or SIGTERM arrives.
pub async fn wait_for_shutdown() -> Result<()> {
    let received = tokio::select! {
        result = signal::ctrl_c() => result.context("failed to listen for Ctrl+C").map(|()| "ctrl_c")?,
        result = terminate() => result?,
    };
    tracing::info!(signal = received, "shutdown requested, draining connections");
    Ok(())
}

#[cfg(unix)]
async fn terminate() -> Result<&'static str> {
    signal::unix::signal(signal::unix::SignalKind::terminate())
        .context("failed to install SIGTERM handler")?
        .recv()
        .await;
    Ok("sigterm")
}

#[cfg(not(unix))]
async fn terminate() -> Result<&'static str> {
    std::future::pending().await
}
