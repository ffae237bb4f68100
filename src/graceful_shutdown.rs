use std::future::Future;

use actix_web::dev::ServerHandle;
use tokio::signal;
use tracing::{error, info, warn};

/// Waits for `signal`, then stops the server while letting in-flight requests finish.
pub async fn stop_on<F>(signal: F, handle: ServerHandle)
where
    F: Future<Output = ()>,
{
    signal.await;
    info!("Draining in-flight requests");
    handle.stop(true).await;
}

/// Resolves on Ctrl+C or SIGTERM. A handler that fails to install never fires.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Ctrl+C received, shutting down");
        },
        _ = terminate => {
            warn!("SIGTERM received, shutting down");
        }
    }
}
