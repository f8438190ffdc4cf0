//! Counter registry for lifecycle events.
//!
//! One `IntCounterVec` per counted category, all owned by an explicit
//! `prometheus::Registry` instance rather than the process-global default.
//! Name collisions surface as construction errors, and isolated registries
//! can coexist in tests.
//!
//! Counts are monotonic: a tuple's first observation creates its series at
//! count 1, and series are never removed.

use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

use devents_core::error::{DeventsError, Result};

/// Counter families. Closed set mirroring the counted event categories
/// (everything in [`devents_core::EventType`] except `Other`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Container,
    Image,
    Network,
    Plugin,
    Volume,
}

#[derive(Debug)]
pub struct EventMetrics {
    registry: Registry,

    container_actions: IntCounterVec,
    image_actions: IntCounterVec,
    network_actions: IntCounterVec,
    plugin_actions: IntCounterVec,
    volume_actions: IntCounterVec,
}

impl EventMetrics {
    /// Build and register the five counter families.
    ///
    /// `container_labels` is the full container schema: `action` first,
    /// then the custom keys already normalized for exposition. Any
    /// registration conflict (duplicate metric or label name) is a fatal
    /// construction error; nothing must be served or dispatched after one.
    pub fn new(container_labels: &[String]) -> Result<Self> {
        let registry = Registry::new();

        let container_names: Vec<&str> =
            container_labels.iter().map(String::as_str).collect();

        let container_actions = new_counter_vec(
            "container_action",
            "Container actions performed",
            &container_names,
        )?;
        let image_actions =
            new_counter_vec("image_action", "Image actions performed", &["action"])?;
        let network_actions = new_counter_vec(
            "network_action",
            "Network actions performed",
            &["action", "name", "type"],
        )?;
        let plugin_actions = new_counter_vec(
            "plugin_action",
            "Plugin actions performed",
            &["action", "name"],
        )?;
        let volume_actions = new_counter_vec(
            "volume_action",
            "Volume actions performed",
            &["action", "driver"],
        )?;

        for vec in [
            &container_actions,
            &image_actions,
            &network_actions,
            &plugin_actions,
            &volume_actions,
        ] {
            registry
                .register(Box::new(vec.clone()))
                .map_err(|e| DeventsError::Registration(e.to_string()))?;
        }

        Ok(Self {
            registry,
            container_actions,
            image_actions,
            network_actions,
            plugin_actions,
            volume_actions,
        })
    }

    /// Increment the counter for `category` at `values`.
    ///
    /// The only mutation operation; safe under unbounded concurrent
    /// callers (the counter primitive is atomic). An arity mismatch is
    /// surfaced as an error, never a panic.
    pub fn record(&self, category: Category, values: &[&str]) -> Result<()> {
        let vec = match category {
            Category::Container => &self.container_actions,
            Category::Image => &self.image_actions,
            Category::Network => &self.network_actions,
            Category::Plugin => &self.plugin_actions,
            Category::Volume => &self.volume_actions,
        };

        vec.get_metric_with_label_values(values)
            .map_err(|e| DeventsError::Internal(format!("counter lookup failed: {e}")))?
            .inc();

        Ok(())
    }

    /// Render the exposition document for everything observed so far.
    ///
    /// Safe to call concurrently with `record`; each series reports a
    /// consistent value at read time, with no cross-series snapshot.
    /// Families with no observed series are omitted.
    pub fn render(&self) -> Result<String> {
        let mut buf = Vec::new();
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buf)
            .map_err(|e| DeventsError::Internal(format!("metrics encode failed: {e}")))?;

        String::from_utf8(buf)
            .map_err(|e| DeventsError::Internal(format!("metrics encode produced invalid utf-8: {e}")))
    }
}

fn new_counter_vec(name: &str, help: &str, labels: &[&str]) -> Result<IntCounterVec> {
    IntCounterVec::new(Opts::new(name, help).namespace("devents"), labels)
        .map_err(|e| DeventsError::Registration(e.to_string()))
}
