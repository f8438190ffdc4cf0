//! Metrics HTTP server task.
//!
//! One task per aggregator run, started when dispatch starts. Scrapes are
//! handled outside the dispatch loop's control; a bind or serve failure is
//! reported once through the returned channel and never takes the loop or
//! the process down, so counting continues with degraded scraping.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::mpsc;

use devents_core::error::DeventsError;

use crate::metrics::EventMetrics;
use crate::router;

pub fn spawn(
    port: u16,
    path: String,
    metrics: Arc<EventMetrics>,
) -> mpsc::Receiver<DeventsError> {
    let (err_tx, err_rx) = mpsc::channel(1);

    tokio::spawn(async move {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let app = router::build_router(&path, metrics);

        let listener = match tokio::net::TcpListener::bind(addr).await {
            Ok(l) => l,
            Err(e) => {
                let _ = err_tx
                    .send(DeventsError::Server(format!("bind {addr} failed: {e}")))
                    .await;
                return;
            }
        };

        tracing::info!(%addr, %path, "metrics server listening");
        if let Err(e) = axum::serve(listener, app).await {
            let _ = err_tx
                .send(DeventsError::Server(format!("serve failed: {e}")))
                .await;
        }
    });

    err_rx
}
