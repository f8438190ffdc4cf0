//! The event dispatch loop.
//!
//! Consumes events and error signals, extracts labels, and mutates the
//! counter registry while the metrics server reads it concurrently. The
//! only failure surfaced to the caller is counter registration at
//! construction time; every runtime fault is logged and the loop continues.

use std::sync::Arc;

use tokio::sync::mpsc;

use devents_core::error::{DeventsError, Result};
use devents_core::Event;

use crate::config::MetricsSection;
use crate::labels::LabelPolicy;
use crate::metrics::EventMetrics;
use crate::server;

pub struct Aggregator {
    path: String,
    port: u16,
    policy: LabelPolicy,
    metrics: Arc<EventMetrics>,
}

impl Aggregator {
    /// Derive the label policy from configuration and register the counter
    /// families. Registration conflicts surface here, before anything is
    /// served or dispatched.
    pub fn new(cfg: &MetricsSection) -> Result<Self> {
        let policy = LabelPolicy::new(&cfg.labels);
        let metrics = EventMetrics::new(&policy.container_label_names())?;

        tracing::info!(port = cfg.port, path = %cfg.path, "aggregator initialized");

        Ok(Self {
            path: cfg.path.clone(),
            port: cfg.port,
            policy,
            metrics: Arc::new(metrics),
        })
    }

    /// Handle to the counter registry, shared with the metrics server.
    pub fn metrics(&self) -> Arc<EventMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Run the dispatch loop.
    ///
    /// Starts the metrics server task, then multiplexes over the event
    /// stream, source errors, and server errors. Selection among
    /// simultaneously ready inputs is unordered (tokio's randomized
    /// default); order within each channel is preserved. There is no
    /// graceful-shutdown input: the loop ends only when the event channel
    /// closes, i.e. when every producer has gone away. Errors never
    /// terminate it.
    pub async fn run(
        self,
        mut events: mpsc::Receiver<Event>,
        mut source_errors: mpsc::Receiver<DeventsError>,
    ) {
        let mut server_errors = server::spawn(self.port, self.path.clone(), self.metrics());

        tracing::info!("listening to events");
        loop {
            tokio::select! {
                Some(err) = server_errors.recv() => {
                    tracing::error!(error = %err, "metrics HTTP server failed");
                }
                Some(err) = source_errors.recv() => {
                    tracing::error!(error = %err, "events retrieval failed");
                }
                maybe_event = events.recv() => {
                    let Some(ev) = maybe_event else { break };
                    self.observe(&ev);
                }
            }
        }
    }

    fn observe(&self, ev: &Event) {
        // Unrecognized categories extract to None and are dropped silently.
        let Some(extraction) = self.policy.extract(ev) else {
            return;
        };

        if let Err(err) = self.metrics.record(extraction.category, &extraction.values) {
            tracing::error!(error = %err, action = %ev.action, "counter update failed");
        }
    }
}
