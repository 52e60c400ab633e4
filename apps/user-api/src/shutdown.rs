use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::Notify;

/// Resolves once the process is asked to stop (Ctrl+C or SIGTERM) and
/// notifies `drain_started` so the drain deadline can start counting.
pub async fn shutdown_signal(drain_started: Arc<Notify>, timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("received SIGTERM, initiating graceful shutdown");
        }
    }

    tracing::info!(
        timeout_secs = timeout.as_secs(),
        "allowing connections to drain"
    );
    drain_started.notify_one();
}

/// Runs `server` to completion, but stops waiting `timeout` after
/// `drain_started` fires.
pub async fn serve_with_drain_deadline<F, E>(
    server: F,
    drain_started: Arc<Notify>,
    timeout: Duration,
) -> Result<(), E>
where
    F: Future<Output = Result<(), E>>,
{
    tokio::pin!(server);

    let deadline = async {
        drain_started.notified().await;
        tokio::time::sleep(timeout).await;
    };

    tokio::select! {
        result = &mut server => result,
        _ = deadline => {
            tracing::warn!(
                timeout_secs = timeout.as_secs(),
                "connections still open after drain timeout, stopping"
            );
            Ok(())
        }
    }
}
