//! devents aggregator binary.
//!
//! Reads newline-delimited JSON lifecycle events from stdin and serves
//! cumulative action counters on the configured scrape endpoint.

use tracing_subscriber::{fmt, EnvFilter};

use devents_aggregator::aggregator::Aggregator;
use devents_aggregator::collector::{Collector, StdinCollector};
use devents_aggregator::config;

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "devents.yaml".to_string());
    let cfg = config::load_from_file(&cfg_path).expect("config load failed");

    // Counter registration is the only fatal path; fail before serving.
    let aggregator = Aggregator::new(&cfg.metrics).expect("aggregator init failed");

    let (event_tx, event_rx) = tokio::sync::mpsc::channel(1024);
    let (error_tx, error_rx) = tokio::sync::mpsc::channel(16);

    tokio::spawn(Box::new(StdinCollector).run(event_tx, error_tx));

    aggregator.run(event_rx, error_rx).await;
}
