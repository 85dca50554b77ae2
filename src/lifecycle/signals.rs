//! OS signal handling.
//!
//! # Responsibilities
//! - Wait for SIGINT / SIGTERM and trigger graceful shutdown
//! - Turn SIGHUP into a config reload
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - SIGHUP triggers config reload, not shutdown

use std::path::PathBuf;
use tokio::sync::mpsc;

use crate::config::watcher::reload;
use crate::config::RouterConfig;
use crate::lifecycle::Shutdown;

/// Resolve once Ctrl+C or SIGTERM arrives.
pub async fn termination() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Trigger `shutdown` when the process is asked to stop.
pub fn spawn_shutdown_on_signal(shutdown: &Shutdown) {
    let tx = shutdown.clone_sender();
    tokio::spawn(async move {
        termination().await;
        tracing::info!("Termination signal received");
        let _ = tx.send(());
    });
}

/// Reload `path` into `tx` on every SIGHUP.
#[cfg(unix)]
pub fn spawn_reload_on_hangup(path: PathBuf, tx: mpsc::UnboundedSender<RouterConfig>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut hangup = match signal(SignalKind::hangup()) {
            Ok(sig) => sig,
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGHUP handler");
                return;
            }
        };
        while hangup.recv().await.is_some() {
            tracing::info!(path = ?path, "SIGHUP received, reloading config");
            reload(&path, &tx);
        }
    });
}

#[cfg(not(unix))]
pub fn spawn_reload_on_hangup(_path: PathBuf, _tx: mpsc::UnboundedSender<RouterConfig>) {}
