//! Axum router wiring (scrape path + liveness).

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::{metrics::EventMetrics, ops};

pub fn build_router(path: &str, metrics: Arc<EventMetrics>) -> Router {
    Router::new()
        .route(path, get(ops::metrics))
        .route("/healthz", get(ops::healthz))
        .with_state(metrics)
}
