//! Per-category label extraction policy.
//!
//! The container schema is configurable: `action` first, then the custom
//! attribute keys in configuration order. The other categories carry fixed
//! schemas. Extraction is pure and deterministic; a missing attribute key
//! reads as the empty string.

use devents_core::{Event, EventType};

use crate::metrics::Category;

/// Normalize a configured attribute key into a legal exposition label name
/// (`.` is not a valid Prometheus label character).
pub fn normalize(key: &str) -> String {
    key.replace('.', "_")
}

/// One extracted sample: which counter family to touch, and its label
/// values in schema order.
#[derive(Debug, PartialEq, Eq)]
pub struct Extraction<'e> {
    pub category: Category,
    pub values: Vec<&'e str>,
}

/// Ordered extraction policy, derived once from configuration.
///
/// Keeps the raw keys (attribute lookup) and their normalized counterparts
/// (counter registration) side by side so label order is never re-derived
/// per event.
#[derive(Debug, Default)]
pub struct LabelPolicy {
    keys: Vec<String>,
    names: Vec<String>,
}

impl LabelPolicy {
    pub fn new(custom_keys: &[String]) -> Self {
        let names = custom_keys.iter().map(|k| normalize(k)).collect();
        Self {
            keys: custom_keys.to_vec(),
            names,
        }
    }

    /// Full container label schema for registration: `action`, then the
    /// normalized custom keys in configuration order.
    pub fn container_label_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(1 + self.names.len());
        names.push("action".to_string());
        names.extend(self.names.iter().cloned());
        names
    }

    /// Map an event to its counter family and label values. Returns `None`
    /// for categories that are not counted; the event is dropped silently.
    pub fn extract<'e>(&'e self, ev: &'e Event) -> Option<Extraction<'e>> {
        let (category, values) = match ev.kind {
            EventType::Container => {
                let mut values = Vec::with_capacity(1 + self.keys.len());
                values.push(ev.action.as_str());
                values.extend(self.keys.iter().map(|k| ev.attr(k)));
                (Category::Container, values)
            }
            EventType::Image => (Category::Image, vec![ev.action.as_str()]),
            EventType::Network => (
                Category::Network,
                vec![ev.action.as_str(), ev.attr("name"), ev.attr("type")],
            ),
            EventType::Plugin => (
                Category::Plugin,
                vec![ev.action.as_str(), ev.attr("name")],
            ),
            EventType::Volume => (
                Category::Volume,
                vec![ev.action.as_str(), ev.attr("driver")],
            ),
            EventType::Other => return None,
        };

        Some(Extraction { category, values })
    }
}
